use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Base occlusion shade per corner occlusion count (0..=3).
pub const AO_LUT: [f32; 4] = [1.0, 0.62, 0.34, 0.08];

/// Upper bound for `ao_strength`; values past this wash out into pure black.
pub const AO_STRENGTH_MAX: f32 = 1.5;

/// Lowest brightness any vertex may reach after all shade terms.
pub const SHADE_FLOOR: f32 = 0.05;

/// Snapshot of the shading knobs consumed on every mesh rebuild. The UI owns
/// and mutates a value of this type; the world only reads it, so a rebuild is
/// a pure function of voxel data plus one `ShadingSettings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShadingSettings {
    pub ao_enabled: bool,
    pub ao_strength: f32,
    pub ao_directional_strength: f32,
    pub ao_sky_strength: f32,
    /// Number of discrete upward samples when estimating vertical cover.
    pub sky_steps: u32,
    pub sun_direction: Vec3,
}

impl Default for ShadingSettings {
    fn default() -> Self {
        Self {
            ao_enabled: true,
            ao_strength: AO_STRENGTH_MAX,
            ao_directional_strength: 0.85,
            ao_sky_strength: 0.65,
            sky_steps: 5,
            sun_direction: Vec3::new(80.0, 120.0, 60.0).normalize(),
        }
    }
}

impl ShadingSettings {
    /// Strength with garbage input clamped away; the mesher only ever sees
    /// values in [0, AO_STRENGTH_MAX].
    pub fn strength(&self) -> f32 {
        if self.ao_strength.is_finite() {
            self.ao_strength.clamp(0.0, AO_STRENGTH_MAX)
        } else {
            0.0
        }
    }

    pub fn set_strength(&mut self, value: f32) {
        if value.is_finite() {
            self.ao_strength = value.clamp(0.0, AO_STRENGTH_MAX);
        }
    }
}
