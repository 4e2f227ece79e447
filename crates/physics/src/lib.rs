#![warn(missing_docs)]
//! Spatial queries against voxel occupancy: DDA ray casting and
//! axis-separated AABB collision.

mod body;
mod collision;
mod ray;

pub use body::{PhysicsParams, PlayerBody};
pub use collision::{
    is_colliding, resolve_axis, resolve_motion, Aabb, Axis, AxisResolution, BoxExtents, Motion,
};
pub use ray::{cast, Ray, RayResult};
