use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use anyhow::Result;
use glam::{IVec3, Vec3};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

use blockfield::{
    config::core::EngineConfig,
    physics::raycast::raycast,
    physics::stepper::FixedTimestep,
    world::block::BlockId,
    world::chunk_coord::ChunkCoord,
    world::mesher::{ChunkMesh, TileSet},
    world::store::{MeshHooks, World},
};

#[derive(Default)]
struct MeshStats {
    built: usize,
    retired: usize,
    vertices: usize,
}

/// Counts mesh churn instead of uploading geometry; stands in for a
/// renderer in this headless demo.
struct StatsHooks(Rc<RefCell<MeshStats>>);

impl MeshHooks for StatsHooks {
    fn on_chunk_mesh_ready(&mut self, _coord: ChunkCoord, mesh: &ChunkMesh) {
        let mut stats = self.0.borrow_mut();
        stats.built += 1;
        stats.vertices += mesh.vertex_count();
    }

    fn on_chunk_mesh_retired(&mut self, _coord: ChunkCoord) {
        self.0.borrow_mut().retired += 1;
    }
}

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;
    info!("Starting headless world demo...");

    let config = EngineConfig::load_or_default(Path::new("config.toml"))?;
    let settings = config.shading.clone();

    let stats = Rc::new(RefCell::new(MeshStats::default()));
    let mut world = World::new(
        &config.worldgen,
        &config.chunksys,
        TileSet::uniform(),
        Box::new(StatsHooks(stats.clone())),
    );

    let (spawn_x, spawn_z, surface) = world.find_spawn_column(64);
    let mut player = Vec3::new(
        spawn_x as f32 + 0.5,
        surface as f32 + 1.0,
        spawn_z as f32 + 0.5,
    );
    info!(
        "Spawn at ({spawn_x}, {spawn_z}), surface height {surface}, seed {}",
        config.worldgen.world_seed
    );

    // Walk east for about a second of simulated time; the stepper
    // decouples the walk rate from however fast this loop runs.
    let mut stepper = FixedTimestep::new(config.gameplay.fixed_time_step);
    for _ in 0..8 {
        stepper.advance(0.25);
        while stepper.tick() {
            player.x += config.gameplay.move_speed * stepper.step();
        }
        world.update(player, &settings);
    }
    info!(
        "Streamed {} chunks around the player at ({:.1}, {:.1}, {:.1})",
        world.chunk_count(),
        player.x,
        player.y,
        player.z
    );

    // Look straight down and break whatever the ray lands on.
    if let Some(hit) = raycast(
        &world,
        player + Vec3::new(0.0, 1.6, 0.0),
        Vec3::NEG_Y,
        config.gameplay.raycast_distance,
    ) {
        info!(
            "Ray hit {:?} at {:?} (face {:?})",
            hit.id, hit.block, hit.normal
        );
        let broke = world.set_block(hit.block.x, hit.block.y, hit.block.z, BlockId::Air, &settings);
        info!("Broke block: {broke}");

        // Put a stone back on the face the ray entered through.
        let place: IVec3 = hit.block + hit.normal;
        let placed = world.set_block(place.x, place.y, place.z, BlockId::Stone, &settings);
        info!("Placed stone at {place:?}: {placed}");
    }

    let stats = stats.borrow();
    info!(
        "Done: {} chunks loaded, {} meshes built ({} vertices), {} retired",
        world.chunk_count(),
        stats.built,
        stats.vertices,
        stats.retired
    );
    Ok(())
}
