//! Dense renumbering of mesh points.
//!
//! A [`PointMap`] sends a subset of original (0-based) mesh point indices to
//! the compact range `[0, n)`. The reverse table lists the original index of
//! every local index, so coordinates and field arrays can be gathered in
//! output order.

use crate::mesh_error::FoamCgnsError;

/// Injective map from original point indices to a dense local range.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PointMap {
    /// Local index -> original index.
    originals: Vec<usize>,
    /// Original index -> local index, sized to the mesh point count.
    local: Vec<Option<usize>>,
}

impl PointMap {
    /// Identity map over `n_points` mesh points (volume pipeline).
    pub fn identity(n_points: usize) -> Self {
        Self {
            originals: (0..n_points).collect(),
            local: (0..n_points).map(Some).collect(),
        }
    }

    /// Build a map from strictly ascending original indices; the position of an
    /// index in `sorted_points` becomes its local index.
    pub fn from_sorted_points(
        sorted_points: Vec<usize>,
        n_mesh_points: usize,
    ) -> Result<Self, FoamCgnsError> {
        let mut local = vec![None; n_mesh_points];
        for (i, &p) in sorted_points.iter().enumerate() {
            let slot = local
                .get_mut(p)
                .ok_or(FoamCgnsError::PointIndexOutOfRange {
                    point: p,
                    n_points: n_mesh_points,
                })?;
            debug_assert!(slot.is_none(), "duplicate point {p} in sorted list");
            *slot = Some(i);
        }
        Ok(Self {
            originals: sorted_points,
            local,
        })
    }

    /// Local index of an original point, if mapped.
    pub fn get(&self, original: usize) -> Option<usize> {
        self.local.get(original).copied().flatten()
    }

    /// Local index of an original point, or [`FoamCgnsError::UnmappedPoint`].
    pub fn try_get(&self, original: usize) -> Result<usize, FoamCgnsError> {
        self.get(original)
            .ok_or(FoamCgnsError::UnmappedPoint(original))
    }

    /// 1-based CGNS index of an original point.
    pub fn try_one_based(&self, original: usize) -> Result<i64, FoamCgnsError> {
        self.try_get(original).map(|i| i as i64 + 1)
    }

    /// Original indices in local order.
    pub fn originals(&self) -> &[usize] {
        &self.originals
    }

    pub fn len(&self) -> usize {
        self.originals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }

    /// Iterate `(original, local)` pairs in local order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.originals.iter().enumerate().map(|(i, &p)| (p, i))
    }
}
