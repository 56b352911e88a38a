// Static collision queries using parry3d bounding volumes

mod collision;

pub use collision::{CollisionVolumeIndex, SubMesh, VolumeId};

// Re-export the bounding volume types used at the query boundary
pub use parry3d::bounding_volume::{Aabb, BoundingVolume};

use glam::Vec3;
use parry3d::math::{Point, Vector};

/// Build an axis-aligned box from a center and half extents given as glam vectors
pub fn aabb_from_center(center: Vec3, half_extents: Vec3) -> Aabb {
    Aabb::from_half_extents(
        Point::new(center.x, center.y, center.z),
        Vector::new(half_extents.x, half_extents.y, half_extents.z),
    )
}

/// Build an axis-aligned box from its minimum and maximum corners
pub fn aabb_from_corners(min: Vec3, max: Vec3) -> Aabb {
    Aabb::new(Point::new(min.x, min.y, min.z), Point::new(max.x, max.y, max.z))
}
