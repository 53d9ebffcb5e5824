use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldGenConfig {
    pub world_seed: i64,
    /// Sea level in blocks; columns at or below this surface become sand.
    pub water_level: i32,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            world_seed: 1337,
            water_level: 18,
        }
    }
}
