use glam::{IVec3, Vec3};

use crate::world::block::BlockId;
use crate::world::store::World;

/// Result of a voxel ray walk: the solid block that was struck, where the
/// ray entered it, and the outward normal of the entered face. The normal
/// is what block placement offsets by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub block: IVec3,
    pub id: BlockId,
    pub position: Vec3,
    pub normal: IVec3,
    pub distance: f32,
}

/// Walks the voxel grid cell by cell from `origin` along `direction` until
/// a solid block is hit or `max_distance` runs out. Reads `get_block` only;
/// unloaded chunks count as air, so rays pass straight through them.
pub fn raycast(world: &World, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
    let dir = direction.normalize_or_zero();
    if dir == Vec3::ZERO || !max_distance.is_finite() || max_distance <= 0.0 {
        return None;
    }

    let mut cell = IVec3::new(
        origin.x.floor() as i32,
        origin.y.floor() as i32,
        origin.z.floor() as i32,
    );
    let step = IVec3::new(
        if dir.x > 0.0 { 1 } else { -1 },
        if dir.y > 0.0 { 1 } else { -1 },
        if dir.z > 0.0 { 1 } else { -1 },
    );

    // Distance along the ray to the next grid plane on each axis, and the
    // distance between successive planes.
    let t_delta = Vec3::new(
        if dir.x != 0.0 { (1.0 / dir.x).abs() } else { f32::INFINITY },
        if dir.y != 0.0 { (1.0 / dir.y).abs() } else { f32::INFINITY },
        if dir.z != 0.0 { (1.0 / dir.z).abs() } else { f32::INFINITY },
    );
    let mut t_max = Vec3::new(
        axis_entry(origin.x, dir.x, cell.x),
        axis_entry(origin.y, dir.y, cell.y),
        axis_entry(origin.z, dir.z, cell.z),
    );

    let mut normal = IVec3::ZERO;
    let mut travelled = 0.0f32;

    while travelled <= max_distance {
        // The starting cell has no entry face; a hit there reports a zero
        // normal, which callers treat as "inside a block".
        let id = world.get_block(cell.x, cell.y, cell.z);
        if id.is_solid() {
            return Some(RayHit {
                block: cell,
                id,
                position: origin + dir * travelled,
                normal,
                distance: travelled,
            });
        }

        if t_max.x <= t_max.y && t_max.x <= t_max.z {
            travelled = t_max.x;
            t_max.x += t_delta.x;
            cell.x += step.x;
            normal = IVec3::new(-step.x, 0, 0);
        } else if t_max.y <= t_max.z {
            travelled = t_max.y;
            t_max.y += t_delta.y;
            cell.y += step.y;
            normal = IVec3::new(0, -step.y, 0);
        } else {
            travelled = t_max.z;
            t_max.z += t_delta.z;
            cell.z += step.z;
            normal = IVec3::new(0, 0, -step.z);
        }
    }

    None
}

/// Ray parameter at which the ray leaves its starting cell on one axis.
fn axis_entry(origin: f32, dir: f32, cell: i32) -> f32 {
    if dir > 0.0 {
        (cell as f32 + 1.0 - origin) / dir
    } else if dir < 0.0 {
        (cell as f32 - origin) / dir
    } else {
        f32::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::chunksys::ChunkSysConfig;
    use crate::config::shading::ShadingSettings;
    use crate::config::worldgen::WorldGenConfig;
    use crate::world::mesher::TileSet;
    use crate::world::store::NoopHooks;

    fn world_with_block(x: i32, y: i32, z: i32) -> World {
        let mut world = World::new(
            &WorldGenConfig::default(),
            &ChunkSysConfig::default(),
            TileSet::uniform(),
            Box::new(NoopHooks),
        );
        world.set_block(x, y, z, BlockId::Stone, &ShadingSettings::default());
        world
    }

    #[test]
    fn axis_aligned_ray_hits_the_near_face() {
        let world = world_with_block(5, 55, 0);
        let hit = raycast(
            &world,
            Vec3::new(0.5, 55.5, 0.5),
            Vec3::X,
            10.0,
        )
        .expect("ray should hit");
        assert_eq!(hit.block, IVec3::new(5, 55, 0));
        assert_eq!(hit.id, BlockId::Stone);
        assert_eq!(hit.normal, IVec3::new(-1, 0, 0));
        assert!((hit.distance - 4.5).abs() < 1e-4);
        assert!((hit.position.x - 5.0).abs() < 1e-4);
    }

    #[test]
    fn ray_respects_max_distance() {
        let world = world_with_block(5, 55, 0);
        assert!(raycast(&world, Vec3::new(0.5, 55.5, 0.5), Vec3::X, 4.0).is_none());
    }

    #[test]
    fn downward_ray_reports_the_top_face() {
        let world = world_with_block(2, 52, 2);
        let hit = raycast(
            &world,
            Vec3::new(2.5, 58.0, 2.5),
            Vec3::NEG_Y,
            10.0,
        )
        .expect("ray should hit");
        assert_eq!(hit.block, IVec3::new(2, 52, 2));
        assert_eq!(hit.normal, IVec3::new(0, 1, 0));
    }

    #[test]
    fn diagonal_ray_walks_cell_by_cell() {
        let world = world_with_block(4, 56, 4);
        let origin = Vec3::new(0.5, 56.5, 0.5);
        let direction = Vec3::new(1.0, 0.0, 1.0);
        let hit = raycast(&world, origin, direction, 12.0).expect("ray should hit");
        assert_eq!(hit.block, IVec3::new(4, 56, 4));
        // Entered through one of the two lateral faces.
        assert!(hit.normal == IVec3::new(-1, 0, 0) || hit.normal == IVec3::new(0, 0, -1));
    }

    #[test]
    fn degenerate_rays_miss() {
        let world = world_with_block(1, 55, 0);
        assert!(raycast(&world, Vec3::new(0.5, 55.5, 0.5), Vec3::ZERO, 6.0).is_none());
        assert!(raycast(&world, Vec3::new(0.5, 55.5, 0.5), Vec3::X, 0.0).is_none());
        assert!(raycast(&world, Vec3::new(0.5, 55.5, 0.5), Vec3::X, f32::NAN).is_none());
    }

    #[test]
    fn ray_starting_inside_a_block_reports_zero_normal() {
        let world = world_with_block(3, 57, 3);
        let hit = raycast(&world, Vec3::new(3.5, 57.5, 3.5), Vec3::X, 6.0).expect("inside hit");
        assert_eq!(hit.block, IVec3::new(3, 57, 3));
        assert_eq!(hit.normal, IVec3::ZERO);
        assert_eq!(hit.distance, 0.0);
    }
}
