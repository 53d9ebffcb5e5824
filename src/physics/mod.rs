pub mod aabb;
pub mod raycast;
pub mod stepper;

pub use aabb::{move_axis, sweep_axis, Aabb, Axis};
pub use raycast::{raycast, RayHit};
pub use stepper::FixedTimestep;
