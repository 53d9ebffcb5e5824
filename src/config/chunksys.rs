use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkSysConfig {
    /// Edge length of a cubic chunk in blocks.
    pub chunk_size: u32,
    /// Vertical world bound in blocks; blocks outside [0, chunk_height) are air.
    pub chunk_height: u32,
    pub render_distance_default: u32,
    /// Fallback radius used when toggling down for stutter recovery.
    pub render_distance_reduced: u32,
    /// Extra radius a chunk may drift past the render distance before it is
    /// unloaded. Keeps the boundary from thrashing.
    pub removal_buffer: f32,
    /// Minimum time between unforced streaming passes.
    pub refresh_interval_ms: u64,
}

impl Default for ChunkSysConfig {
    fn default() -> Self {
        Self {
            chunk_size: 16,
            chunk_height: 64,
            render_distance_default: 10,
            render_distance_reduced: 2,
            removal_buffer: 1.0,
            refresh_interval_ms: 200,
        }
    }
}

impl ChunkSysConfig {
    /// Number of vertical chunk layers the world may create.
    pub fn max_chunk_y(&self) -> i32 {
        (self.chunk_height as f32 / self.chunk_size as f32).ceil() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layer_count_covers_world_height() {
        let config = ChunkSysConfig::default();
        assert_eq!(config.max_chunk_y(), 4);
    }

    #[test]
    fn partial_top_layer_rounds_up() {
        let config = ChunkSysConfig {
            chunk_height: 70,
            ..ChunkSysConfig::default()
        };
        assert_eq!(config.max_chunk_y(), 5);
    }
}
