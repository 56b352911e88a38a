use glam::Vec3;
use log::debug;

use super::{aabb_from_corners, Aabb, BoundingVolume};

/// Index of a stored volume, in insertion order
pub type VolumeId = usize;

/// One independently bounded piece of the environment
///
/// Vertices are expected in world space, the way the environment loader
/// hands them over after placing the scene.
#[derive(Debug, Clone)]
pub struct SubMesh {
    pub name: String,
    pub vertices: Vec<Vec3>,
}

impl SubMesh {
    pub fn new(name: impl Into<String>, vertices: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            vertices,
        }
    }

    /// A box-shaped sub-mesh given by its eight corners
    pub fn cuboid(name: impl Into<String>, center: Vec3, half_extents: Vec3) -> Self {
        let mut vertices = Vec::with_capacity(8);
        for sx in [-1.0, 1.0] {
            for sy in [-1.0, 1.0] {
                for sz in [-1.0, 1.0] {
                    vertices.push(center + half_extents * Vec3::new(sx, sy, sz));
                }
            }
        }
        Self::new(name, vertices)
    }

    /// Tight bounds around every vertex, or `None` for an empty mesh
    pub fn bounds(&self) -> Option<Aabb> {
        let (first, rest) = self.vertices.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)));
        Some(aabb_from_corners(min, max))
    }
}

/// Immutable set of static bounding volumes built once per environment
///
/// Every sub-mesh keeps its own box instead of being merged into one
/// aggregate, so gaps between pieces of a composite model stay walkable.
/// The index is read-only after construction and can be shared across
/// threads for lookahead queries.
#[derive(Debug, Clone, Default)]
pub struct CollisionVolumeIndex {
    volumes: Vec<Aabb>,
    names: Vec<String>,
}

impl CollisionVolumeIndex {
    /// Create an index with no volumes (nothing ever collides)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one volume per non-empty sub-mesh
    pub fn from_meshes<'a>(meshes: impl IntoIterator<Item = &'a SubMesh>) -> Self {
        let mut index = Self::new();
        for mesh in meshes {
            match mesh.bounds() {
                Some(bounds) => {
                    index.volumes.push(bounds);
                    index.names.push(mesh.name.clone());
                }
                None => debug!("Skipping empty sub-mesh '{}'", mesh.name),
            }
        }
        index
    }

    /// Does the candidate overlap any stored volume?
    #[allow(dead_code)]
    pub fn intersects(&self, candidate: &Aabb) -> bool {
        self.volumes.iter().any(|volume| volume.intersects(candidate))
    }

    /// First stored volume the candidate overlaps, if any
    pub fn first_intersecting(&self, candidate: &Aabb) -> Option<VolumeId> {
        self.volumes
            .iter()
            .position(|volume| volume.intersects(candidate))
    }

    /// Name of the sub-mesh a volume was built from
    pub fn name(&self, id: VolumeId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// All stored volumes, e.g. for drawing debug boxes
    pub fn volumes(&self) -> &[Aabb] {
        &self.volumes
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }
}
