pub mod config;
pub mod physics;
pub mod terrain;
pub mod world;

// Re-export commonly used types
pub use config::chunksys::ChunkSysConfig;
pub use config::core::{ConfigError, EngineConfig};
pub use config::gameplay::GameplayConfig;
pub use config::shading::ShadingSettings;
pub use config::worldgen::WorldGenConfig;
pub use physics::aabb::{move_axis, sweep_axis, Aabb, Axis};
pub use physics::raycast::{raycast, RayHit};
pub use physics::stepper::FixedTimestep;
pub use terrain::generator::TerrainGenerator;
pub use terrain::noise::PerlinNoise;
pub use world::block::{BlockDef, BlockId, Tile};
pub use world::chunk::Chunk;
pub use world::chunk_coord::ChunkCoord;
pub use world::mesher::{ChunkMesh, TileSet, TileUv};
pub use world::store::{MeshHooks, NoopHooks, World};
