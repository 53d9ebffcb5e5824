use glam::{IVec3, Vec3};
use std::cmp::Ordering;

/// Integer chunk coordinates; the key a chunk is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkCoord(pub IVec3);

impl PartialOrd for ChunkCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChunkCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.0.x.cmp(&other.0.x) {
            Ordering::Equal => match self.0.y.cmp(&other.0.y) {
                Ordering::Equal => self.0.z.cmp(&other.0.z),
                ord => ord,
            },
            ord => ord,
        }
    }
}

impl ChunkCoord {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self(IVec3::new(x, y, z))
    }

    /// Chunk containing the given world-space block coordinate.
    pub fn from_block(x: i32, y: i32, z: i32, chunk_size: i32) -> Self {
        Self::new(
            x.div_euclid(chunk_size),
            y.div_euclid(chunk_size),
            z.div_euclid(chunk_size),
        )
    }

    pub fn from_world_pos(pos: Vec3, chunk_size: i32) -> Self {
        let x = (pos.x / chunk_size as f32).floor() as i32;
        let y = (pos.y / chunk_size as f32).floor() as i32;
        let z = (pos.z / chunk_size as f32).floor() as i32;
        Self::new(x, y, z)
    }

    pub fn x(&self) -> i32 {
        self.0.x
    }

    pub fn y(&self) -> i32 {
        self.0.y
    }

    pub fn z(&self) -> i32 {
        self.0.z
    }

    /// World-space position of the chunk's minimum corner.
    pub fn to_world_pos(&self, chunk_size: i32) -> Vec3 {
        Vec3::new(
            (self.0.x * chunk_size) as f32,
            (self.0.y * chunk_size) as f32,
            (self.0.z * chunk_size) as f32,
        )
    }

    /// Horizontal (column) distance to another coordinate, ignoring layers.
    pub fn column_distance(&self, cx: i32, cz: i32) -> f32 {
        let dx = (self.0.x - cx) as f32;
        let dz = (self.0.z - cz) as f32;
        (dx * dx + dz * dz).sqrt()
    }

    pub fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self(self.0 + IVec3::new(dx, dy, dz))
    }
}

impl From<IVec3> for ChunkCoord {
    fn from(vec: IVec3) -> Self {
        Self(vec)
    }
}

impl From<ChunkCoord> for IVec3 {
    fn from(coord: ChunkCoord) -> Self {
        coord.0
    }
}
