use crate::config::shading::{ShadingSettings, AO_LUT, SHADE_FLOOR};
use crate::world::block::{BlockId, Tile, TILE_COUNT};
use crate::world::chunk::Chunk;

/// Anything that can answer a world-space block query. The world implements
/// this; meshing goes through it so boundary faces see neighbor chunks.
pub trait BlockSampler {
    fn block_at(&self, x: i32, y: i32, z: i32) -> BlockId;

    fn occludes(&self, x: i32, y: i32, z: i32) -> bool {
        self.block_at(x, y, z).is_solid()
    }
}

/// Atlas rectangle for one tile, in normalized texture coordinates.
#[derive(Debug, Clone, Copy)]
pub struct TileUv {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

/// Where each tile lives in the texture atlas. Building the atlas image is
/// the renderer's job; the mesher only needs the rectangles.
#[derive(Debug, Clone)]
pub struct TileSet {
    uvs: [TileUv; TILE_COUNT],
}

impl TileSet {
    pub fn new(uvs: [TileUv; TILE_COUNT]) -> Self {
        Self { uvs }
    }

    /// Every tile maps to the full texture. Good enough for headless use
    /// and tests.
    pub fn uniform() -> Self {
        Self {
            uvs: [TileUv {
                u0: 0.0,
                v0: 0.0,
                u1: 1.0,
                v1: 1.0,
            }; TILE_COUNT],
        }
    }

    fn uv(&self, tile: Tile) -> TileUv {
        self.uvs[tile as usize]
    }
}

impl Default for TileSet {
    fn default() -> Self {
        Self::uniform()
    }
}

/// Rebuildable render geometry for one chunk. Derived data only; any voxel
/// edit in or next to the chunk invalidates it wholesale.
#[derive(Debug, Clone, Default)]
pub struct ChunkMesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub uvs: Vec<f32>,
    /// Per-vertex baked shade, replicated into r, g, b.
    pub colors: Vec<f32>,
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// One cube face: outward direction, the four corner offsets in emit order,
/// and the two axes the corner AO probes swing along.
struct Face {
    dir: [i32; 3],
    corners: [[i32; 3]; 4],
    normal: [f32; 3],
    ao_u: [i32; 3],
    ao_v: [i32; 3],
    u_axis: usize,
    v_axis: usize,
}

/// Face order is +X, -X, +Y, -Y, +Z, -Z and matches `BlockDef::faces`.
static FACE_DATA: [Face; 6] = [
    Face {
        dir: [1, 0, 0],
        corners: [[1, 1, 0], [1, 1, 1], [1, 0, 1], [1, 0, 0]],
        normal: [1.0, 0.0, 0.0],
        ao_u: [0, 1, 0],
        ao_v: [0, 0, 1],
        u_axis: 1,
        v_axis: 2,
    },
    Face {
        dir: [-1, 0, 0],
        corners: [[0, 1, 1], [0, 1, 0], [0, 0, 0], [0, 0, 1]],
        normal: [-1.0, 0.0, 0.0],
        ao_u: [0, 1, 0],
        ao_v: [0, 0, 1],
        u_axis: 1,
        v_axis: 2,
    },
    Face {
        dir: [0, 1, 0],
        corners: [[0, 1, 1], [1, 1, 1], [1, 1, 0], [0, 1, 0]],
        normal: [0.0, 1.0, 0.0],
        ao_u: [1, 0, 0],
        ao_v: [0, 0, 1],
        u_axis: 0,
        v_axis: 2,
    },
    Face {
        dir: [0, -1, 0],
        corners: [[0, 0, 0], [1, 0, 0], [1, 0, 1], [0, 0, 1]],
        normal: [0.0, -1.0, 0.0],
        ao_u: [1, 0, 0],
        ao_v: [0, 0, 1],
        u_axis: 0,
        v_axis: 2,
    },
    Face {
        dir: [0, 0, 1],
        corners: [[1, 1, 1], [0, 1, 1], [0, 0, 1], [1, 0, 1]],
        normal: [0.0, 0.0, 1.0],
        ao_u: [1, 0, 0],
        ao_v: [0, 1, 0],
        u_axis: 0,
        v_axis: 1,
    },
    Face {
        dir: [0, 0, -1],
        corners: [[0, 1, 0], [1, 1, 0], [1, 0, 0], [0, 0, 0]],
        normal: [0.0, 0.0, -1.0],
        ao_u: [1, 0, 0],
        ao_v: [0, 1, 0],
        u_axis: 0,
        v_axis: 1,
    },
];

const FACE_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Corner occlusion count in 0..=3. When both edge cells are solid the
/// corner is pinned to full occlusion no matter what the diagonal says;
/// anything else produces a visible seam where the diagonal sample is
/// ambiguous. Keep the clamp, do not "fix" it into a plain sum.
fn occlusion_level(side1: bool, side2: bool, corner: bool) -> usize {
    if side1 && side2 {
        3
    } else {
        side1 as usize + side2 as usize + corner as usize
    }
}

/// Base corner shade for an occlusion level, blended toward full brightness
/// as strength falls off.
fn occlusion_shade(level: usize, strength: f32) -> f32 {
    lerp(1.0, AO_LUT[level], strength)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Fraction of `steps` upward probes blocked by solid voxels above (x, y, z).
fn sky_occlusion(sampler: &dyn BlockSampler, x: i32, y: i32, z: i32, steps: u32) -> f32 {
    if steps == 0 {
        return 0.0;
    }
    let mut blocked = 0;
    for i in 1..=steps as i32 {
        if sampler.occludes(x, y + i, z) {
            blocked += 1;
        }
    }
    blocked as f32 / steps as f32
}

/// Per-corner shade values for one face. Disabled AO early-outs to full
/// brightness without touching any neighbor, matching the cheap path the
/// renderer toggle expects.
fn face_shades(
    sampler: &dyn BlockSampler,
    x: i32,
    y: i32,
    z: i32,
    face: &Face,
    settings: &ShadingSettings,
) -> [f32; 4] {
    let strength = settings.strength();
    if !settings.ao_enabled || strength <= 0.0 {
        return [1.0; 4];
    }

    let base_x = x + face.dir[0];
    let base_y = y + face.dir[1];
    let base_z = z + face.dir[2];

    // Directional term: darken faces turned away from the sun, with a mild
    // boost for sunward faces. Applied per face, not per corner.
    let sun = settings.sun_direction;
    let face_dot = face.normal[0] * sun.x + face.normal[1] * sun.y + face.normal[2] * sun.z;
    let directional_strength = settings.ao_directional_strength * strength;
    let away = (-face_dot).max(0.0);
    let facing = face_dot.max(0.0);
    let directional_shade =
        ((1.0 - away * directional_strength) * (1.0 + facing * directional_strength * 0.2)).max(0.1);

    // Sky term: discrete upward probes estimate vertical cover; mostly
    // darkens downward and lateral faces caught under canopies.
    let sky = sky_occlusion(sampler, x, y, z, settings.sky_steps);
    let sky_influence = settings.ao_sky_strength * strength;
    let lateral = 1.0 - face.normal[1].abs();
    let downward = (-face.normal[1]).max(0.0);
    let sky_shade = (1.0 - sky * sky_influence * (downward + lateral * 0.4)).max(0.1);

    let mut shades = [1.0; 4];
    for (i, corner) in face.corners.iter().enumerate() {
        let sign_u = if corner[face.u_axis] == 1 { 1 } else { -1 };
        let sign_v = if corner[face.v_axis] == 1 { 1 } else { -1 };

        let ux = face.ao_u[0] * sign_u;
        let uy = face.ao_u[1] * sign_u;
        let uz = face.ao_u[2] * sign_u;
        let vx = face.ao_v[0] * sign_v;
        let vy = face.ao_v[1] * sign_v;
        let vz = face.ao_v[2] * sign_v;

        let side1 = sampler.occludes(base_x + ux, base_y + uy, base_z + uz);
        let side2 = sampler.occludes(base_x + vx, base_y + vy, base_z + vz);
        let corner_cell = sampler.occludes(base_x + ux + vx, base_y + uy + vy, base_z + uz + vz);

        let level = occlusion_level(side1, side2, corner_cell);
        let shade = occlusion_shade(level, strength);
        shades[i] = (shade * directional_shade * sky_shade).max(SHADE_FLOOR);
    }
    shades
}

/// Builds the visible-face mesh for one chunk. Every face of every non-air
/// voxel is tested against its neighbor (possibly in another chunk) and
/// skipped when fully hidden. Returns `None` for a chunk with nothing to
/// draw.
pub fn build_mesh(
    sampler: &dyn BlockSampler,
    chunk: &Chunk,
    tiles: &TileSet,
    settings: &ShadingSettings,
) -> Option<ChunkMesh> {
    let size = chunk.size();
    let origin_x = chunk.coord.x() * size;
    let origin_y = chunk.coord.y() * size;
    let origin_z = chunk.coord.z() * size;

    let mut mesh = ChunkMesh::default();
    let mut vertex_offset = 0u32;

    for ly in 0..size {
        for lz in 0..size {
            for lx in 0..size {
                let id = chunk.get(lx, ly, lz);
                if id == BlockId::Air {
                    continue;
                }
                let x = origin_x + lx;
                let y = origin_y + ly;
                let z = origin_z + lz;
                let faces = &id.def().faces;

                for (face_index, face) in FACE_DATA.iter().enumerate() {
                    let neighbor =
                        sampler.block_at(x + face.dir[0], y + face.dir[1], z + face.dir[2]);
                    if neighbor.is_opaque_solid() {
                        continue;
                    }
                    let Some(tile) = faces[face_index] else {
                        continue;
                    };

                    let shades = face_shades(sampler, x, y, z, face, settings);

                    for i in FACE_INDICES {
                        mesh.indices.push(vertex_offset + i);
                    }
                    for (corner, shade) in face.corners.iter().zip(shades) {
                        mesh.positions.extend([
                            (x + corner[0]) as f32,
                            (y + corner[1]) as f32,
                            (z + corner[2]) as f32,
                        ]);
                        mesh.normals.extend(face.normal);
                        mesh.colors.extend([shade, shade, shade]);
                    }
                    let uv = tiles.uv(tile);
                    mesh.uvs.extend([
                        uv.u1, uv.v1, //
                        uv.u0, uv.v1, //
                        uv.u0, uv.v0, //
                        uv.u1, uv.v0,
                    ]);
                    vertex_offset += 4;
                }
            }
        }
    }

    if mesh.is_empty() {
        None
    } else {
        Some(mesh)
    }
}
