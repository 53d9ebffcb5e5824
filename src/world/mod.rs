pub mod block;
pub mod chunk;
pub mod chunk_coord;
pub mod mesher;
pub mod store;

// Re-export commonly used types
pub use block::{BlockDef, BlockId, Tile, BLOCK_DEFS};
pub use chunk::Chunk;
pub use chunk_coord::ChunkCoord;
pub use mesher::{ChunkMesh, TileSet, TileUv};
pub use store::{MeshHooks, NoopHooks, World};
