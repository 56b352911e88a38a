// Static scene the characters walk around in

use glam::Vec3;
use log::{debug, info};

use crate::engine::physics::{CollisionVolumeIndex, SubMesh};

/// The courtyard scene, one sub-mesh per solid piece
///
/// The ground is not part of the collision set; characters stand on it
/// implicitly.
pub fn courtyard() -> Vec<SubMesh> {
    vec![
        SubMesh::cuboid("bench", Vec3::new(0.0, 0.25, -3.0), Vec3::new(1.2, 0.25, 0.4)),
        SubMesh::cuboid("north_wall", Vec3::new(0.0, 1.5, -8.0), Vec3::new(8.0, 1.5, 0.3)),
        SubMesh::cuboid("pillar_west", Vec3::new(-3.0, 1.5, -1.0), Vec3::new(0.4, 1.5, 0.4)),
        SubMesh::cuboid("pillar_east", Vec3::new(3.0, 1.5, -1.0), Vec3::new(0.4, 1.5, 0.4)),
    ]
}

/// Build the collision index for a scene
pub fn build_colliders(meshes: &[SubMesh]) -> CollisionVolumeIndex {
    let index = CollisionVolumeIndex::from_meshes(meshes);
    info!("Environment ready: {} collision volumes", index.len());
    for (id, volume) in index.volumes().iter().enumerate() {
        debug!(
            "  volume {} '{}': {:?} .. {:?}",
            id,
            index.name(id).unwrap_or("?"),
            volume.mins,
            volume.maxs
        );
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::aabb_from_center;
    use crate::game::characters::locomotion::ActorBounds;
    use crate::game::characters::stats::CharacterStats;

    #[test]
    fn test_courtyard_volume_per_piece() {
        let meshes = courtyard();
        let index = build_colliders(&meshes);
        assert_eq!(index.len(), meshes.len());
        assert_eq!(index.name(0), Some("bench"));
    }

    #[test]
    fn test_spawn_point_is_free() {
        let stats = CharacterStats::standard();
        let index = build_colliders(&courtyard());
        let candidate = ActorBounds::from_stats(&stats).candidate_at(stats.spawn_position);
        assert!(!index.intersects(&candidate));
    }

    #[test]
    fn test_bench_blocks_walking_into_it() {
        let index = build_colliders(&courtyard());
        let on_bench = aabb_from_center(Vec3::new(0.0, 0.5, -3.0), Vec3::splat(0.1));
        assert_eq!(index.first_intersecting(&on_bench), Some(0));
    }
}
