pub mod generator;
pub mod noise;

pub use generator::TerrainGenerator;
pub use noise::PerlinNoise;
