/// Closed set of block types. The discriminant doubles as the voxel value
/// stored in chunk arrays, so this must stay `repr(u8)` and dense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlockId {
    Air = 0,
    Grass = 1,
    Dirt = 2,
    Stone = 3,
    Wood = 4,
    Leaves = 5,
    Sand = 6,
}

pub const BLOCK_COUNT: usize = 7;

impl BlockId {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Air),
            1 => Some(Self::Grass),
            2 => Some(Self::Dirt),
            3 => Some(Self::Stone),
            4 => Some(Self::Wood),
            5 => Some(Self::Leaves),
            6 => Some(Self::Sand),
            _ => None,
        }
    }

    pub fn def(self) -> &'static BlockDef {
        &BLOCK_DEFS[self as usize]
    }

    pub fn is_solid(self) -> bool {
        self.def().solid
    }

    pub fn is_transparent(self) -> bool {
        self.def().transparent
    }

    /// True when a face behind this block is never visible.
    pub fn is_opaque_solid(self) -> bool {
        let def = self.def();
        def.solid && !def.transparent
    }
}

/// Texture atlas tiles referenced by block faces. Atlas layout and pixel
/// data are the renderer's business; the engine only names tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    GrassTop = 0,
    GrassSide = 1,
    Dirt = 2,
    Stone = 3,
    WoodSide = 4,
    WoodTop = 5,
    Leaves = 6,
    Sand = 7,
}

pub const TILE_COUNT: usize = 8;

/// Immutable per-block-type properties. Face order matches the mesher's
/// face table: +X, -X, +Y, -Y, +Z, -Z.
#[derive(Debug, Clone)]
pub struct BlockDef {
    pub name: &'static str,
    pub solid: bool,
    /// Transparent blocks never cull a neighbor's face.
    pub transparent: bool,
    pub breakable: bool,
    /// Hold time to break the block, in milliseconds.
    pub break_ms: u32,
    pub faces: [Option<Tile>; 6],
}

pub static BLOCK_DEFS: [BlockDef; BLOCK_COUNT] = [
    BlockDef {
        name: "Air",
        solid: false,
        transparent: true,
        breakable: false,
        break_ms: 0,
        faces: [None; 6],
    },
    BlockDef {
        name: "Grass",
        solid: true,
        transparent: false,
        breakable: true,
        break_ms: 280,
        faces: [
            Some(Tile::GrassSide),
            Some(Tile::GrassSide),
            Some(Tile::GrassTop),
            Some(Tile::Dirt),
            Some(Tile::GrassSide),
            Some(Tile::GrassSide),
        ],
    },
    BlockDef {
        name: "Dirt",
        solid: true,
        transparent: false,
        breakable: true,
        break_ms: 360,
        faces: [Some(Tile::Dirt); 6],
    },
    BlockDef {
        name: "Stone",
        solid: true,
        transparent: false,
        breakable: true,
        break_ms: 1500,
        faces: [Some(Tile::Stone); 6],
    },
    BlockDef {
        name: "Wood",
        solid: true,
        transparent: false,
        breakable: true,
        break_ms: 1000,
        faces: [
            Some(Tile::WoodSide),
            Some(Tile::WoodSide),
            Some(Tile::WoodTop),
            Some(Tile::WoodTop),
            Some(Tile::WoodSide),
            Some(Tile::WoodSide),
        ],
    },
    BlockDef {
        name: "Leaves",
        solid: true,
        transparent: true,
        breakable: true,
        break_ms: 220,
        faces: [Some(Tile::Leaves); 6],
    },
    BlockDef {
        name: "Sand",
        solid: true,
        transparent: false,
        breakable: true,
        break_ms: 420,
        faces: [Some(Tile::Sand); 6],
    },
];
