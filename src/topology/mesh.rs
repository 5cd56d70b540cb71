//! Source mesh: point positions, cell shapes and boundary patches.
//!
//! Indices are 0-based. A cell shape is the ordered list of its point
//! indices; its length selects the element type.

use crate::mesh_error::FoamCgnsError;
use crate::topology::patch::Patch;

/// Volumetric unstructured mesh as handed over by the mesh collaborator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FoamMesh {
    points: Vec<[f64; 3]>,
    cells: Vec<Vec<usize>>,
    patches: Vec<Patch>,
}

impl FoamMesh {
    pub fn new(points: Vec<[f64; 3]>, cells: Vec<Vec<usize>>, patches: Vec<Patch>) -> Self {
        Self {
            points,
            cells,
            patches,
        }
    }

    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    pub fn cells(&self) -> &[Vec<usize>] {
        &self.cells
    }

    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    /// Look up a patch by name.
    pub fn patch(&self, name: &str) -> Option<&Patch> {
        self.patches.iter().find(|p| p.name() == name)
    }

    /// Split the positions into three coordinate arrays, optionally restricted
    /// to (and ordered by) `subset`.
    pub fn coordinate_arrays(
        &self,
        subset: Option<&[usize]>,
    ) -> Result<[Vec<f64>; 3], FoamCgnsError> {
        let n = subset.map_or(self.points.len(), <[usize]>::len);
        let mut xyz = [
            Vec::with_capacity(n),
            Vec::with_capacity(n),
            Vec::with_capacity(n),
        ];
        let mut push = |p: &[f64; 3]| {
            for (axis, values) in xyz.iter_mut().enumerate() {
                values.push(p[axis]);
            }
        };
        match subset {
            Some(indices) => {
                for &i in indices {
                    let p = self.points.get(i).ok_or(FoamCgnsError::PointIndexOutOfRange {
                        point: i,
                        n_points: self.points.len(),
                    })?;
                    push(p);
                }
            }
            None => self.points.iter().for_each(&mut push),
        }
        Ok(xyz)
    }

    fn check_point(&self, point: usize) -> Result<(), FoamCgnsError> {
        if point < self.points.len() {
            Ok(())
        } else {
            Err(FoamCgnsError::PointIndexOutOfRange {
                point,
                n_points: self.points.len(),
            })
        }
    }

    /// Check that every cell references an existing point.
    pub fn validate_cells(&self) -> Result<(), FoamCgnsError> {
        self.cells
            .iter()
            .flatten()
            .try_for_each(|&point| self.check_point(point))
    }

    /// Check that the faces and point list of `patch` reference existing
    /// points.
    pub fn validate_patch(&self, patch: &Patch) -> Result<(), FoamCgnsError> {
        patch
            .faces()
            .iter()
            .flatten()
            .chain(patch.mesh_points())
            .try_for_each(|&point| self.check_point(point))
    }

    /// Check every cell and every patch.
    pub fn validate_indices(&self) -> Result<(), FoamCgnsError> {
        self.validate_cells()?;
        self.patches
            .iter()
            .try_for_each(|patch| self.validate_patch(patch))
    }
}
