//! Voxel ray casting using the DDA (Amanatides–Woo) traversal.

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};
use voxelstream_core::{voxel_at, Occupancy};

/// Outcome of a single cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RayResult {
    /// First occupied voxel along the ray, if any.
    pub hit: Option<IVec3>,
    /// Outward normal of the face the ray entered through.
    ///
    /// Zero on a miss, and also when the ray starts inside an occupied voxel.
    pub face: IVec3,
}

impl RayResult {
    /// Nothing hit within range.
    pub const MISS: Self = Self {
        hit: None,
        face: IVec3::ZERO,
    };

    /// Returns true when a voxel was hit.
    pub fn is_hit(&self) -> bool {
        self.hit.is_some()
    }

    /// Empty voxel adjacent to the hit face, where a new block would go.
    pub fn placement(&self) -> Option<IVec3> {
        self.hit.map(|voxel| voxel + self.face)
    }
}

/// A ray with a maximum travel distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point in world space.
    pub origin: Vec3,
    /// Direction of travel. Does not need to be normalized; distances are
    /// measured in multiples of this vector.
    pub direction: Vec3,
    /// Furthest parametric distance to consider.
    pub max_distance: f32,
}

impl Ray {
    /// Create a ray.
    pub fn new(origin: Vec3, direction: Vec3, max_distance: f32) -> Self {
        Self {
            origin,
            direction,
            max_distance,
        }
    }

    /// Cast against an occupancy query.
    pub fn cast<O>(&self, occupancy: &O) -> RayResult
    where
        O: Occupancy + ?Sized,
    {
        cast(self.origin, self.direction, self.max_distance, occupancy)
    }
}

/// Per-axis stepping state: (step, first boundary crossing, crossing interval).
fn axis_setup(origin: f32, voxel: i32, direction: f32) -> (i32, f32, f32) {
    if direction > 0.0 {
        (
            1,
            ((voxel + 1) as f32 - origin) / direction,
            1.0 / direction,
        )
    } else if direction < 0.0 {
        (-1, (origin - voxel as f32) / -direction, 1.0 / -direction)
    } else {
        (0, f32::INFINITY, f32::INFINITY)
    }
}

/// Marches from `origin` along `direction` and returns the first occupied voxel
/// whose entry distance is within `max_distance`.
///
/// Axes are advanced by smallest boundary distance; on ties the comparison
/// `x < y && x < z`, then `y < z`, else `z` decides, so for equal X and Y
/// crossings Y moves first. The result only depends on the inputs and the
/// occupancy answers. A zero direction only tests the starting voxel, even
/// for an unbounded `max_distance`.
pub fn cast<O>(origin: Vec3, direction: Vec3, max_distance: f32, occupancy: &O) -> RayResult
where
    O: Occupancy + ?Sized,
{
    let mut voxel = voxel_at(origin);

    let (step_x, t_max_x, t_delta_x) = axis_setup(origin.x, voxel.x, direction.x);
    let (step_y, t_max_y, t_delta_y) = axis_setup(origin.y, voxel.y, direction.y);
    let (step_z, t_max_z, t_delta_z) = axis_setup(origin.z, voxel.z, direction.z);

    let step = IVec3::new(step_x, step_y, step_z);
    let mut t_max = Vec3::new(t_max_x, t_max_y, t_max_z);
    let t_delta = Vec3::new(t_delta_x, t_delta_y, t_delta_z);

    let mut face = IVec3::ZERO;
    let mut t = 0.0f32;

    while t <= max_distance {
        if occupancy.is_occupied(voxel) {
            return RayResult {
                hit: Some(voxel),
                face,
            };
        }

        // Nothing left to cross: the direction has no usable component.
        if !t_max.min_element().is_finite() {
            break;
        }

        if t_max.x < t_max.y && t_max.x < t_max.z {
            voxel.x += step.x;
            t = t_max.x;
            t_max.x += t_delta.x;
            face = IVec3::new(-step.x, 0, 0);
        } else if t_max.y < t_max.z {
            voxel.y += step.y;
            t = t_max.y;
            t_max.y += t_delta.y;
            face = IVec3::new(0, -step.y, 0);
        } else {
            voxel.z += step.z;
            t = t_max.z;
            t_max.z += t_delta.z;
            face = IVec3::new(0, 0, -step.z);
        }
    }

    RayResult::MISS
}
