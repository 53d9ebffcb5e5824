use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameplayConfig {
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub move_speed: f32,
    pub run_multiplier: f32,
    pub fly_speed: f32,
    pub jump_velocity: f32,
    pub raycast_distance: f32,
    pub fixed_time_step: f32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            gravity: 28.0,
            terminal_velocity: 48.0,
            move_speed: 4.3,
            run_multiplier: 1.6,
            fly_speed: 8.0,
            jump_velocity: 8.5,
            raycast_distance: 6.0,
            fixed_time_step: 1.0 / 60.0,
        }
    }
}
