use crate::terrain::generator::TerrainGenerator;
use crate::world::block::BlockId;
use crate::world::chunk_coord::ChunkCoord;
use crate::world::mesher::ChunkMesh;

/// Vertical span above the surface that may hold tree blocks; nothing from
/// a tree reaches higher than this.
const TREE_SPAN: i32 = 8;
/// Horizontal radius of the canopy anchor scan. Fixed by design: widening
/// it would change where leaves land and break world determinism.
const CANOPY_SCAN_RADIUS: i32 = 2;

/// A cubic block of voxels, the unit of generation, meshing and streaming.
/// Voxel data is filled once, synchronously, before the chunk is visible to
/// anyone; a chunk is never partially generated.
pub struct Chunk {
    pub coord: ChunkCoord,
    size: i32,
    data: Box<[BlockId]>,
    pub mesh: Option<ChunkMesh>,
}

impl Chunk {
    pub fn new(coord: ChunkCoord, size: u32) -> Self {
        let size = size as i32;
        let volume = (size * size * size) as usize;
        Self {
            coord,
            size,
            data: vec![BlockId::Air; volume].into_boxed_slice(),
            mesh: None,
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    fn index(&self, x: i32, y: i32, z: i32) -> usize {
        debug_assert!(x >= 0 && x < self.size && y >= 0 && y < self.size && z >= 0 && z < self.size);
        (y * self.size * self.size + z * self.size + x) as usize
    }

    /// Local-coordinate lookup; callers guarantee 0 <= c < size.
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockId {
        self.data[self.index(x, y, z)]
    }

    pub fn set(&mut self, x: i32, y: i32, z: i32, id: BlockId) {
        let index = self.index(x, y, z);
        self.data[index] = id;
    }

    /// Fills the whole volume from per-column terrain and tree queries. Tree
    /// lookups use world coordinates, so canopies from anchors in other
    /// chunks bleed in correctly.
    pub fn generate(&mut self, generator: &mut TerrainGenerator) {
        let size = self.size;
        let base_x = self.coord.x() * size;
        let base_y = self.coord.y() * size;
        let base_z = self.coord.z() * size;
        let water_level = generator.water_level();

        for lx in 0..size {
            let world_x = base_x + lx;
            for lz in 0..size {
                let world_z = base_z + lz;
                let surface = generator.height_at(world_x, world_z);
                let tree_height = generator.tree_height_at(world_x, world_z);

                for ly in 0..size {
                    let world_y = base_y + ly;
                    let id = if world_y <= surface {
                        ground_block(world_y, surface, water_level)
                    } else {
                        self.tree_block(generator, world_x, world_y, world_z, surface, tree_height)
                    };
                    self.set(lx, ly, lz, id);
                }
            }
        }
    }

    fn tree_block(
        &self,
        generator: &mut TerrainGenerator,
        world_x: i32,
        world_y: i32,
        world_z: i32,
        surface: i32,
        tree_height: i32,
    ) -> BlockId {
        // Trunk directly above this column's own anchor.
        if tree_height > 0 && world_y > surface && world_y <= surface + tree_height {
            return BlockId::Wood;
        }

        // Scan nearby anchors so trunks and leaves spill across chunk
        // boundaries; everything is keyed off the anchor's own surface.
        if world_y > surface && world_y <= surface + TREE_SPAN {
            for dx in -CANOPY_SCAN_RADIUS..=CANOPY_SCAN_RADIUS {
                for dz in -CANOPY_SCAN_RADIUS..=CANOPY_SCAN_RADIUS {
                    let anchor_x = world_x + dx;
                    let anchor_z = world_z + dz;
                    let anchor_tree = generator.tree_height_at(anchor_x, anchor_z);
                    if anchor_tree <= 0 {
                        continue;
                    }
                    let anchor_surface = generator.height_at(anchor_x, anchor_z);
                    let rel_y = world_y - anchor_surface;
                    if rel_y < 1 || rel_y > anchor_tree + 1 {
                        continue;
                    }

                    if dx == 0 && dz == 0 && rel_y <= anchor_tree {
                        return BlockId::Wood;
                    }
                    if rel_y >= anchor_tree - 2 {
                        // Canopy tapers from radius 3 down to 1 over its
                        // four vertical layers.
                        let layer = rel_y - (anchor_tree - 2);
                        let radius = (3 - layer).max(1);
                        if dx.abs() <= radius && dz.abs() <= radius {
                            return BlockId::Leaves;
                        }
                    }
                }
            }
        }

        BlockId::Air
    }
}

/// Block for a voxel at or below the surface of its column.
fn ground_block(world_y: i32, surface: i32, water_level: i32) -> BlockId {
    if world_y == surface {
        if surface <= water_level + 1 {
            BlockId::Sand
        } else {
            BlockId::Grass
        }
    } else if surface <= water_level {
        // Fully submerged columns are sand all the way down.
        BlockId::Sand
    } else if surface - world_y <= 3 {
        BlockId::Dirt
    } else {
        BlockId::Stone
    }
}
