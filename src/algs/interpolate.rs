//! Cell-to-vertex interpolation seam.
//!
//! The volume pipeline writes vertex-located solutions but receives
//! cell-centred fields. The scheme that moves values from cells to points
//! belongs to the caller; the assembler only checks the result length.

use crate::mesh_error::FoamCgnsError;
use crate::topology::mesh::FoamMesh;

/// Moves cell-centred values onto mesh points.
///
/// Implementations return one value per mesh point, in mesh point order.
pub trait PointInterpolator {
    fn interpolate_scalar(&self, mesh: &FoamMesh, cell_values: &[f64]) -> Vec<f64>;

    fn interpolate_vector(&self, mesh: &FoamMesh, cell_values: &[[f64; 3]]) -> Vec<[f64; 3]>;
}

impl<I: PointInterpolator + ?Sized> PointInterpolator for &I {
    fn interpolate_scalar(&self, mesh: &FoamMesh, cell_values: &[f64]) -> Vec<f64> {
        (**self).interpolate_scalar(mesh, cell_values)
    }

    fn interpolate_vector(&self, mesh: &FoamMesh, cell_values: &[[f64; 3]]) -> Vec<[f64; 3]> {
        (**self).interpolate_vector(mesh, cell_values)
    }
}

/// Check an interpolated array against the mesh point count.
pub fn check_point_count<T>(
    field: &str,
    values: &[T],
    n_points: usize,
) -> Result<(), FoamCgnsError> {
    if values.len() != n_points {
        return Err(FoamCgnsError::FieldSizeMismatch {
            field: field.to_string(),
            expected: n_points,
            found: values.len(),
        });
    }
    Ok(())
}
