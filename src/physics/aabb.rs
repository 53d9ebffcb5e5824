use glam::Vec3;

use crate::world::store::World;

/// Separation left between a resolved box and the block it hit, so the
/// next sweep does not immediately re-detect the same contact.
const CONTACT_EPSILON: f32 = 0.0005;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Axis-aligned box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Player-style box: `feet` is the bottom-center point.
    pub fn from_feet(feet: Vec3, radius: f32, height: f32) -> Self {
        Self {
            min: Vec3::new(feet.x - radius, feet.y, feet.z - radius),
            max: Vec3::new(feet.x + radius, feet.y + height, feet.z + radius),
        }
    }

    /// Unit cube occupied by the voxel at (x, y, z).
    pub fn block(x: i32, y: i32, z: i32) -> Self {
        let min = Vec3::new(x as f32, y as f32, z as f32);
        Self {
            min,
            max: min + Vec3::ONE,
        }
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
            && self.max.z > other.min.z
            && self.min.z < other.max.z
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.min += offset;
        self.max += offset;
    }

    fn axis_extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.max.x - self.min.x,
            Axis::Y => self.max.y - self.min.y,
            Axis::Z => self.max.z - self.min.z,
        }
    }
}

fn axis_component(v: Vec3, axis: Axis) -> f32 {
    match axis {
        Axis::X => v.x,
        Axis::Y => v.y,
        Axis::Z => v.z,
    }
}

fn set_axis_component(v: &mut Vec3, axis: Axis, value: f32) {
    match axis {
        Axis::X => v.x = value,
        Axis::Y => v.y = value,
        Axis::Z => v.z = value,
    }
}

/// Pushes `aabb` out of the first solid voxel it overlaps, along one axis
/// only. The push direction comes from the velocity sign; that velocity
/// component is zeroed on contact. Returns true when a downward Y sweep
/// landed on ground.
pub fn sweep_axis(world: &World, aabb: &mut Aabb, velocity: &mut Vec3, axis: Axis) -> bool {
    let min_x = aabb.min.x.floor() as i32;
    let max_x = aabb.max.x.floor() as i32;
    let min_y = aabb.min.y.floor() as i32;
    let max_y = aabb.max.y.floor() as i32;
    let min_z = aabb.min.z.floor() as i32;
    let max_z = aabb.max.z.floor() as i32;

    for x in min_x..=max_x {
        for y in min_y..=max_y {
            for z in min_z..=max_z {
                if !world.get_block(x, y, z).is_solid() {
                    continue;
                }
                let block = Aabb::block(x, y, z);
                if !aabb.intersects(&block) {
                    continue;
                }

                let speed = axis_component(*velocity, axis);
                let extent = aabb.axis_extent(axis);
                let mut grounded = false;
                let new_min = if speed > 0.0 {
                    axis_component(block.min, axis) - extent - CONTACT_EPSILON
                } else if speed < 0.0 {
                    if axis == Axis::Y {
                        grounded = true;
                    }
                    axis_component(block.max, axis) + CONTACT_EPSILON
                } else {
                    // Overlap with no motion on this axis; leave it for the
                    // moving axes to resolve.
                    continue;
                };

                let delta = new_min - axis_component(aabb.min, axis);
                let mut offset = Vec3::ZERO;
                set_axis_component(&mut offset, axis, delta);
                aabb.translate(offset);
                set_axis_component(velocity, axis, 0.0);
                return grounded;
            }
        }
    }
    false
}

/// Advances the box along one axis by `velocity * dt`, then resolves the
/// resulting penetration. Axis-separated movement means callers invoke this
/// three times per step, one axis at a time.
pub fn move_axis(world: &World, aabb: &mut Aabb, velocity: &mut Vec3, axis: Axis, dt: f32) -> bool {
    let mut offset = Vec3::ZERO;
    set_axis_component(&mut offset, axis, axis_component(*velocity, axis) * dt);
    aabb.translate(offset);
    sweep_axis(world, aabb, velocity, axis)
}
