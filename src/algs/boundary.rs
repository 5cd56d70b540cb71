//! Boundary point collection.
//!
//! The boundary-only export keeps just the points referenced by included
//! patches. These helpers collect them and renumber them densely. The local
//! numbering is the ascending order of original indices, so the map does not
//! depend on patch iteration order.

use hashbrown::HashSet;

use crate::algs::renumber::PointMap;
use crate::mesh_error::FoamCgnsError;
use crate::topology::patch::{Patch, PatchFilter};

/// Sorted distinct mesh points of all patches accepted by `filter`.
pub fn collect_boundary_points(patches: &[Patch], filter: &PatchFilter) -> Vec<usize> {
    let mut seen: HashSet<usize> = HashSet::new();
    for (_, patch) in filter.included(patches) {
        log::debug!(
            "Collecting patch {} (type {}, {} points, {} faces)",
            patch.name(),
            patch.patch_type(),
            patch.n_points(),
            patch.n_faces()
        );
        seen.extend(patch.mesh_points().iter().copied());
    }
    let mut points: Vec<usize> = seen.into_iter().collect();
    points.sort_unstable();
    points
}

/// Build the dense boundary point map over a mesh of `n_mesh_points` points.
///
/// Points outside every included patch have no entry.
pub fn build_boundary_point_map(
    patches: &[Patch],
    filter: &PatchFilter,
    n_mesh_points: usize,
) -> Result<PointMap, FoamCgnsError> {
    let points = collect_boundary_points(patches, filter);
    log::info!("Found {} unique boundary points", points.len());
    PointMap::from_sorted_points(points, n_mesh_points)
}
