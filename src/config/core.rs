use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::chunksys::ChunkSysConfig;
use crate::config::gameplay::GameplayConfig;
use crate::config::shading::ShadingSettings;
use crate::config::worldgen::WorldGenConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Top-level engine configuration. Everything here is fixed at world
/// construction; only the render distance and shading settings are meant to
/// change at runtime, through their own entry points.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub worldgen: WorldGenConfig,
    #[serde(default)]
    pub chunksys: ChunkSysConfig,
    #[serde(default)]
    pub gameplay: GameplayConfig,
    #[serde(default)]
    pub shading: ShadingSettings,
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Loads the config, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_the_canonical_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.worldgen.world_seed, 1337);
        assert_eq!(config.worldgen.water_level, 18);
        assert_eq!(config.chunksys.chunk_size, 16);
        assert_eq!(config.chunksys.chunk_height, 64);
        assert_eq!(config.chunksys.render_distance_default, 10);
    }

    #[test]
    fn toml_round_trip() {
        let config = EngineConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: EngineConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.worldgen.world_seed, config.worldgen.world_seed);
        assert_eq!(back.shading.sky_steps, config.shading.sky_steps);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let back: EngineConfig = toml::from_str("[worldgen]\nworld_seed = 7\nwater_level = 18\n").unwrap();
        assert_eq!(back.worldgen.world_seed, 7);
        assert_eq!(back.chunksys.chunk_size, 16);
    }
}
