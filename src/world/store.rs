use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use glam::Vec3;
use log::debug;

use crate::config::chunksys::ChunkSysConfig;
use crate::config::shading::ShadingSettings;
use crate::config::worldgen::WorldGenConfig;
use crate::terrain::generator::TerrainGenerator;
use crate::world::block::BlockId;
use crate::world::chunk::Chunk;
use crate::world::chunk_coord::ChunkCoord;
use crate::world::mesher::{self, BlockSampler, ChunkMesh, TileSet};

/// Chunk mesh lifecycle callbacks. The renderer collaborator implements
/// these to attach geometry to its scene; the engine never talks to a
/// rendering API directly.
pub trait MeshHooks {
    fn on_chunk_mesh_ready(&mut self, _coord: ChunkCoord, _mesh: &ChunkMesh) {}
    fn on_chunk_mesh_retired(&mut self, _coord: ChunkCoord) {}
}

/// Hook implementation for headless use.
pub struct NoopHooks;

impl MeshHooks for NoopHooks {}

/// Owns every loaded chunk and drives generation, meshing and streaming.
///
/// All work is synchronous on the caller's thread: a refresh that pulls in
/// many chunks blocks until they are generated and meshed. The throttle and
/// the reduced render distance exist to keep that burst tolerable.
pub struct World {
    chunks: HashMap<ChunkCoord, Chunk>,
    generator: TerrainGenerator,
    tiles: TileSet,
    hooks: Box<dyn MeshHooks>,
    chunk_size: i32,
    chunk_height: i32,
    max_chunk_y: i32,
    render_distance: u32,
    preferred_render_distance: u32,
    reduced_render_distance: u32,
    removal_buffer: f32,
    refresh_interval: Duration,
    last_refresh: Option<Instant>,
    force_refresh: bool,
}

impl BlockSampler for World {
    fn block_at(&self, x: i32, y: i32, z: i32) -> BlockId {
        self.get_block(x, y, z)
    }
}

impl World {
    pub fn new(
        worldgen: &WorldGenConfig,
        chunksys: &ChunkSysConfig,
        tiles: TileSet,
        hooks: Box<dyn MeshHooks>,
    ) -> Self {
        Self {
            chunks: HashMap::new(),
            generator: TerrainGenerator::new(worldgen, chunksys.chunk_height),
            tiles,
            hooks,
            chunk_size: chunksys.chunk_size as i32,
            chunk_height: chunksys.chunk_height as i32,
            max_chunk_y: chunksys.max_chunk_y(),
            render_distance: chunksys.render_distance_default,
            preferred_render_distance: chunksys.render_distance_default,
            reduced_render_distance: chunksys.render_distance_reduced.max(1),
            removal_buffer: chunksys.removal_buffer,
            refresh_interval: Duration::from_millis(chunksys.refresh_interval_ms),
            last_refresh: None,
            force_refresh: true,
        }
    }

    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    pub fn chunk_height(&self) -> i32 {
        self.chunk_height
    }

    pub fn render_distance(&self) -> u32 {
        self.render_distance
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn loaded_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// Surface height of the column at (x, z); delegates to the memoized
    /// terrain generator, so this is cheap after the first query.
    pub fn height_at(&mut self, x: i32, z: i32) -> i32 {
        self.generator.height_at(x, z)
    }

    /// World-space block lookup. Out-of-bounds heights and unloaded chunks
    /// both read as air; there is no error path here.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockId {
        if y < 0 || y >= self.chunk_height {
            return BlockId::Air;
        }
        let coord = ChunkCoord::from_block(x, y, z, self.chunk_size);
        match self.chunks.get(&coord) {
            Some(chunk) => chunk.get(
                x.rem_euclid(self.chunk_size),
                y.rem_euclid(self.chunk_size),
                z.rem_euclid(self.chunk_size),
            ),
            None => BlockId::Air,
        }
    }

    /// Writes one voxel and rebuilds every mesh the edit can affect: the
    /// owning chunk, plus any face-adjacent neighbor when the edit sits on
    /// the shared boundary. Returns true iff the voxel actually changed.
    pub fn set_block(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        id: BlockId,
        settings: &ShadingSettings,
    ) -> bool {
        if y < 0 || y >= self.chunk_height {
            return false;
        }
        let coord = ChunkCoord::from_block(x, y, z, self.chunk_size);
        if !self.ensure_chunk(coord, settings) {
            return false;
        }

        let size = self.chunk_size;
        let (lx, ly, lz) = (x.rem_euclid(size), y.rem_euclid(size), z.rem_euclid(size));
        let Some(chunk) = self.chunks.get_mut(&coord) else {
            return false;
        };
        if chunk.get(lx, ly, lz) == id {
            return false;
        }
        chunk.set(lx, ly, lz, id);
        self.rebuild_mesh(coord, settings);

        if lx == 0 {
            self.rebuild_mesh(coord.offset(-1, 0, 0), settings);
        }
        if lx == size - 1 {
            self.rebuild_mesh(coord.offset(1, 0, 0), settings);
        }
        if ly == 0 {
            self.rebuild_mesh(coord.offset(0, -1, 0), settings);
        }
        if ly == size - 1 {
            self.rebuild_mesh(coord.offset(0, 1, 0), settings);
        }
        if lz == 0 {
            self.rebuild_mesh(coord.offset(0, 0, -1), settings);
        }
        if lz == size - 1 {
            self.rebuild_mesh(coord.offset(0, 0, 1), settings);
        }
        true
    }

    /// Generates and meshes the chunk at `coord` if it is missing. Returns
    /// false only for vertical layers outside the world, which are never
    /// created.
    fn ensure_chunk(&mut self, coord: ChunkCoord, settings: &ShadingSettings) -> bool {
        if coord.y() < 0 || coord.y() >= self.max_chunk_y {
            return false;
        }
        if self.chunks.contains_key(&coord) {
            return true;
        }
        let mut chunk = Chunk::new(coord, self.chunk_size as u32);
        chunk.generate(&mut self.generator);
        // Insert before meshing so boundary lookups see the voxel data.
        self.chunks.insert(coord, chunk);
        self.rebuild_mesh(coord, settings);
        true
    }

    /// Rebuilds the mesh of a loaded chunk from scratch, retiring the old
    /// geometry first. Missing chunks are ignored.
    fn rebuild_mesh(&mut self, coord: ChunkCoord, settings: &ShadingSettings) {
        let Some(chunk) = self.chunks.get_mut(&coord) else {
            return;
        };
        if chunk.mesh.take().is_some() {
            self.hooks.on_chunk_mesh_retired(coord);
        }

        let Some(chunk) = self.chunks.get(&coord) else {
            return;
        };
        let mesh = mesher::build_mesh(&*self, chunk, &self.tiles, settings);

        if let Some(chunk) = self.chunks.get_mut(&coord) {
            chunk.mesh = mesh;
        }
        if let Some(mesh) = self.chunks.get(&coord).and_then(|chunk| chunk.mesh.as_ref()) {
            self.hooks.on_chunk_mesh_ready(coord, mesh);
        }
    }

    fn remove_chunk(&mut self, coord: ChunkCoord) {
        if let Some(mut chunk) = self.chunks.remove(&coord) {
            if chunk.mesh.take().is_some() {
                self.hooks.on_chunk_mesh_retired(coord);
            }
        }
    }

    /// Streams the chunk set toward the player: loads every column within
    /// the render distance (all vertical layers), drops columns past the
    /// removal buffer. Throttled unless `force`; forcing also remeshes
    /// already-loaded chunks, which is how shading-setting changes
    /// propagate.
    pub fn refresh_chunks(&mut self, player_pos: Vec3, force: bool, settings: &ShadingSettings) {
        let now = Instant::now();
        if !force {
            if let Some(last) = self.last_refresh {
                if now.duration_since(last) < self.refresh_interval {
                    return;
                }
            }
        }
        self.last_refresh = Some(now);

        let base = ChunkCoord::from_world_pos(player_pos, self.chunk_size);
        let (base_cx, base_cz) = (base.x(), base.z());
        let radius = self.render_distance as i32;
        let mut required = HashSet::new();

        for dx in -radius..=radius {
            for dz in -radius..=radius {
                let distance = ((dx * dx + dz * dz) as f32).sqrt();
                if distance > radius as f32 + 0.5 {
                    continue;
                }
                for cy in 0..self.max_chunk_y {
                    let coord = ChunkCoord::new(base_cx + dx, cy, base_cz + dz);
                    required.insert(coord);
                    if !self.chunks.contains_key(&coord) {
                        self.ensure_chunk(coord, settings);
                    } else if force {
                        self.rebuild_mesh(coord, settings);
                    }
                }
            }
        }

        // Hysteresis: chunks linger a little past the radius so walking
        // along the boundary does not churn them.
        let mut stale: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .filter(|coord| {
                !required.contains(coord)
                    && coord.column_distance(base_cx, base_cz) > radius as f32 + self.removal_buffer
            })
            .copied()
            .collect();
        // Deterministic retire order for the hook consumer.
        stale.sort();
        for coord in stale {
            self.remove_chunk(coord);
        }

        debug!(
            "chunk refresh around ({base_cx}, {base_cz}): {} loaded",
            self.chunks.len()
        );
    }

    /// Per-frame entry point: runs at most one streaming pass, forced when
    /// a render-distance or shading change is pending.
    pub fn update(&mut self, player_pos: Vec3, settings: &ShadingSettings) {
        let force = self.force_refresh;
        self.refresh_chunks(player_pos, force, settings);
        if force {
            self.force_refresh = false;
        }
    }

    /// Flip between the preferred radius and the reduced recovery radius.
    pub fn toggle_render_distance(&mut self) -> u32 {
        if self.render_distance == self.preferred_render_distance {
            self.render_distance = self.reduced_render_distance;
        } else {
            self.render_distance = self.preferred_render_distance;
        }
        self.force_refresh = true;
        self.render_distance
    }

    /// Sets a new preferred radius. Garbage input (non-finite) is ignored
    /// and leaves the current radius untouched; finite input saturates into
    /// [1, u32::MAX] so the radius can never leave its valid range.
    pub fn set_render_distance(&mut self, distance: f64) -> u32 {
        if !distance.is_finite() {
            return self.render_distance;
        }
        let clamped = distance.floor().clamp(1.0, u32::MAX as f64) as u32;
        self.preferred_render_distance = clamped;
        self.render_distance = clamped;
        self.force_refresh = true;
        self.render_distance
    }

    /// Outward square-ring scan from the origin for the first column above
    /// the shoreline; used by spawn placement. Falls back to (0, 0).
    pub fn find_spawn_column(&mut self, max_radius: i32) -> (i32, i32, i32) {
        let shoreline = self.generator.water_level() + 1;
        for radius in 0..=max_radius {
            for dx in -radius..=radius {
                for dz in -radius..=radius {
                    if dx.abs().max(dz.abs()) != radius {
                        continue;
                    }
                    let surface = self.generator.height_at(dx, dz);
                    if surface > shoreline {
                        return (dx, dz, surface);
                    }
                }
            }
        }
        let surface = self.generator.height_at(0, 0);
        (0, 0, surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct HookLog {
        ready: Vec<ChunkCoord>,
        retired: Vec<ChunkCoord>,
    }

    struct CountingHooks(Rc<RefCell<HookLog>>);

    impl MeshHooks for CountingHooks {
        fn on_chunk_mesh_ready(&mut self, coord: ChunkCoord, _mesh: &ChunkMesh) {
            self.0.borrow_mut().ready.push(coord);
        }
        fn on_chunk_mesh_retired(&mut self, coord: ChunkCoord) {
            self.0.borrow_mut().retired.push(coord);
        }
    }

    fn small_config() -> ChunkSysConfig {
        ChunkSysConfig {
            render_distance_default: 2,
            render_distance_reduced: 1,
            ..ChunkSysConfig::default()
        }
    }

    fn test_world() -> (World, Rc<RefCell<HookLog>>) {
        let log = Rc::new(RefCell::new(HookLog::default()));
        let world = World::new(
            &WorldGenConfig::default(),
            &small_config(),
            TileSet::uniform(),
            Box::new(CountingHooks(log.clone())),
        );
        (world, log)
    }

    fn settings() -> ShadingSettings {
        ShadingSettings::default()
    }

    #[test]
    fn out_of_bounds_reads_are_air() {
        let (mut world, _) = test_world();
        world.refresh_chunks(Vec3::ZERO, true, &settings());
        assert_eq!(world.chunk_size(), 16);
        let height = world.chunk_height();
        for (x, z) in [(0, 0), (-100, 250), (7, -3)] {
            assert_eq!(world.get_block(x, -1, z), BlockId::Air);
            assert_eq!(world.get_block(x, height, z), BlockId::Air);
            assert_eq!(world.get_block(x, 10_000, z), BlockId::Air);
        }
    }

    #[test]
    fn out_of_bounds_writes_are_rejected() {
        let (mut world, _) = test_world();
        assert!(!world.set_block(0, -1, 0, BlockId::Stone, &settings()));
        assert!(!world.set_block(0, 64, 0, BlockId::Stone, &settings()));
        assert_eq!(world.chunk_count(), 0);
    }

    #[test]
    fn placing_over_air_then_same_id_is_idempotent() {
        let (mut world, log) = test_world();
        // High above the terrain, guaranteed air.
        assert!(world.set_block(4, 60, 4, BlockId::Stone, &settings()));
        assert_eq!(world.get_block(4, 60, 4), BlockId::Stone);

        let rebuilds_before = log.borrow().ready.len();
        assert!(!world.set_block(4, 60, 4, BlockId::Stone, &settings()));
        assert_eq!(log.borrow().ready.len(), rebuilds_before);
    }

    #[test]
    fn placing_stone_over_stone_returns_false() {
        let (mut world, _) = test_world();
        world.set_block(8, 58, 8, BlockId::Stone, &settings());
        assert!(!world.set_block(8, 58, 8, BlockId::Stone, &settings()));
        assert!(world.set_block(8, 58, 8, BlockId::Air, &settings()));
    }

    #[test]
    fn boundary_edit_remeshes_the_touching_neighbor_only() {
        let (mut world, log) = test_world();
        world.refresh_chunks(Vec3::new(8.0, 0.0, 8.0), true, &settings());

        // Seed the neighbor with geometry so its rebuild is observable; an
        // all-air chunk meshes to nothing and stays silent.
        assert!(world.set_block(-2, 60, 4, BlockId::Stone, &settings()));

        log.borrow_mut().ready.clear();
        // Local x == 0 of chunk (0, 3, 0): neighbor (-1, 3, 0) shares the face.
        assert!(world.set_block(0, 60, 4, BlockId::Stone, &settings()));

        let ready = log.borrow().ready.clone();
        assert!(ready.contains(&ChunkCoord::new(0, 3, 0)));
        assert!(ready.contains(&ChunkCoord::new(-1, 3, 0)));
        // An interior edit must not fan out sideways.
        assert!(!ready.contains(&ChunkCoord::new(1, 3, 0)));
        assert!(!ready.contains(&ChunkCoord::new(0, 3, 1)));
        assert!(!ready.contains(&ChunkCoord::new(0, 3, -1)));
    }

    #[test]
    fn interior_edit_remeshes_only_its_own_chunk() {
        let (mut world, log) = test_world();
        world.refresh_chunks(Vec3::new(8.0, 0.0, 8.0), true, &settings());

        log.borrow_mut().ready.clear();
        assert!(world.set_block(4, 56, 4, BlockId::Stone, &settings()));
        let ready = log.borrow().ready.clone();
        assert_eq!(ready, vec![ChunkCoord::new(0, 3, 0)]);
    }

    #[test]
    fn streaming_ring_covers_every_column_and_layer() {
        let (mut world, _) = test_world();
        world.refresh_chunks(Vec3::ZERO, true, &settings());

        let radius = world.render_distance() as i32;
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                let distance = ((dx * dx + dz * dz) as f32).sqrt();
                if distance > radius as f32 + 0.5 {
                    continue;
                }
                for cy in 0..4 {
                    assert!(
                        world.chunk(ChunkCoord::new(dx, cy, dz)).is_some(),
                        "missing chunk ({dx}, {cy}, {dz})"
                    );
                }
            }
        }
    }

    #[test]
    fn distant_chunks_are_unloaded_with_hysteresis() {
        let (mut world, log) = test_world();
        world.refresh_chunks(Vec3::ZERO, true, &settings());
        let before = world.chunk_count();
        assert!(before > 0);

        // Walk far away; everything near the origin is now out of range.
        let far = Vec3::new(640.0, 0.0, 0.0);
        world.refresh_chunks(far, true, &settings());

        let radius = world.render_distance() as f32;
        let limit = radius + 1.0;
        for coord in world.loaded_coords() {
            assert!(
                coord.column_distance(40, 0) <= limit,
                "stale chunk {coord:?} survived"
            );
        }
        assert!(!log.borrow().retired.is_empty());
    }

    #[test]
    fn unforced_refresh_is_throttled() {
        let config = ChunkSysConfig {
            refresh_interval_ms: 600_000,
            ..small_config()
        };
        let mut world = World::new(
            &WorldGenConfig::default(),
            &config,
            TileSet::uniform(),
            Box::new(NoopHooks),
        );
        world.refresh_chunks(Vec3::ZERO, true, &settings());
        let before = world.chunk_count();

        // Immediately after a pass, an unforced refresh must be a no-op even
        // though the player has moved a long way.
        world.refresh_chunks(Vec3::new(640.0, 0.0, 0.0), false, &settings());
        assert_eq!(world.chunk_count(), before);
    }

    #[test]
    fn bottom_and_top_layers_are_never_created() {
        let (mut world, _) = test_world();
        world.refresh_chunks(Vec3::ZERO, true, &settings());
        for coord in world.loaded_coords() {
            assert!((0..4).contains(&coord.y()));
        }
    }

    #[test]
    fn toggle_render_distance_round_trips() {
        let (mut world, _) = test_world();
        assert_eq!(world.render_distance(), 2);
        assert_eq!(world.toggle_render_distance(), 1);
        assert_eq!(world.toggle_render_distance(), 2);
    }

    #[test]
    fn set_render_distance_rejects_garbage() {
        let (mut world, _) = test_world();
        assert_eq!(world.set_render_distance(f64::NAN), 2);
        assert_eq!(world.set_render_distance(f64::INFINITY), 2);
        assert_eq!(world.set_render_distance(6.9), 6);
        assert_eq!(world.set_render_distance(-3.0), 1);
        // Values past u32 range saturate instead of wrapping to zero.
        assert_eq!(world.set_render_distance(4_294_967_296.0), u32::MAX);
        assert!(world.set_render_distance(1e300) >= 1);
    }

    #[test]
    fn spawn_column_sits_above_the_shoreline() {
        let (mut world, _) = test_world();
        let (x, z, surface) = world.find_spawn_column(96);
        assert!(surface > 18 + 1 || (x, z) == (0, 0));
        assert_eq!(world.height_at(x, z), surface);
    }

    #[test]
    fn forced_refresh_remeshes_loaded_chunks() {
        let (mut world, log) = test_world();
        world.refresh_chunks(Vec3::ZERO, true, &settings());
        let loaded = world.chunk_count();

        log.borrow_mut().ready.clear();
        world.refresh_chunks(Vec3::ZERO, true, &settings());
        // Every chunk with geometry reports back in on a forced pass.
        assert!(log.borrow().ready.len() <= loaded);
        assert!(!log.borrow().ready.is_empty());
    }

    #[test]
    fn get_block_reads_fresh_terrain() {
        let (mut world, _) = test_world();
        world.refresh_chunks(Vec3::ZERO, true, &settings());
        let surface = world.height_at(3, 5);
        let top = world.get_block(3, surface, 5);
        assert!(top == BlockId::Grass || top == BlockId::Sand);
        assert_eq!(world.get_block(3, surface + 20, 5), BlockId::Air);
    }
}
