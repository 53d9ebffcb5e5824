pub mod chunksys;
pub mod core;
pub mod gameplay;
pub mod shading;
pub mod worldgen;

pub use chunksys::ChunkSysConfig;
pub use self::core::{ConfigError, EngineConfig};
pub use gameplay::GameplayConfig;
pub use shading::ShadingSettings;
pub use worldgen::WorldGenConfig;
