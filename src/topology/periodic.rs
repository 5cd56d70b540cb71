//! Cyclic (periodic) patch pairing.
//!
//! A cyclic patch holds two congruent halves related by a rigid transform.
//! [`pair_cyclic_patch`] walks the patch's correspondence list and produces
//! two parallel point arrays, one per half, expressed in the output point
//! numbering. How the pair is written (one connectivity record per half, or two
//! plain boundary conditions) is decided by the assembler, not here.

use crate::algs::renumber::PointMap;
use crate::mesh_error::FoamCgnsError;
use crate::topology::patch::Patch;

/// Rigid transform from the reference half of a cyclic patch to its periodic
/// half: rotation about `rotation_center` by `rotation_angle` (degrees about
/// x, y then z), followed by `translation`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PeriodicTransform {
    pub rotation_center: [f64; 3],
    pub rotation_angle: [f64; 3],
    pub translation: [f64; 3],
}

impl Default for PeriodicTransform {
    /// 30 degree rotation about the z axis through the origin.
    fn default() -> Self {
        Self::rotation_about_z([0.0; 3], 30.0)
    }
}

impl PeriodicTransform {
    pub fn identity() -> Self {
        Self {
            rotation_center: [0.0; 3],
            rotation_angle: [0.0; 3],
            translation: [0.0; 3],
        }
    }

    /// Rotation of `angle_deg` degrees about the z axis through `center`.
    pub fn rotation_about_z(center: [f64; 3], angle_deg: f64) -> Self {
        Self {
            rotation_center: center,
            rotation_angle: [0.0, 0.0, angle_deg],
            translation: [0.0; 3],
        }
    }

    /// Pure translation.
    pub fn translation(offset: [f64; 3]) -> Self {
        Self {
            translation: offset,
            ..Self::identity()
        }
    }

    /// Transform with equal and opposite angles and translation.
    ///
    /// Exact for rotations about a single axis and for pure translations,
    /// which are the cases a cyclic patch describes.
    pub fn inverse(&self) -> Self {
        Self {
            rotation_center: self.rotation_center,
            rotation_angle: self.rotation_angle.map(|a| -a),
            translation: self.translation.map(|t| -t),
        }
    }

    /// Map a position from the reference half onto the periodic half.
    pub fn apply(&self, p: [f64; 3]) -> [f64; 3] {
        let c = self.rotation_center;
        let mut q = [p[0] - c[0], p[1] - c[1], p[2] - c[2]];
        let [ax, ay, az] = self.rotation_angle.map(f64::to_radians);
        q = rotate(q, 1, 2, ax);
        q = rotate(q, 2, 0, ay);
        q = rotate(q, 0, 1, az);
        [
            q[0] + c[0] + self.translation[0],
            q[1] + c[1] + self.translation[1],
            q[2] + c[2] + self.translation[2],
        ]
    }
}

/// Rotate `q` in the (`i`, `j`) plane by `angle` radians.
fn rotate(q: [f64; 3], i: usize, j: usize, angle: f64) -> [f64; 3] {
    if angle == 0.0 {
        return q;
    }
    let (s, c) = angle.sin_cos();
    let mut out = q;
    out[i] = c * q[i] - s * q[j];
    out[j] = s * q[i] + c * q[j];
    out
}

/// Point correspondence between the two halves of a cyclic patch.
///
/// Indices are 0-based in the output point numbering.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PairedBoundary {
    pub reference: Vec<usize>,
    pub periodic: Vec<usize>,
    pub transform: PeriodicTransform,
}

impl PairedBoundary {
    pub fn len(&self) -> usize {
        self.reference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }

    /// The same pairing seen from the periodic half.
    pub fn swapped(&self) -> Self {
        Self {
            reference: self.periodic.clone(),
            periodic: self.reference.clone(),
            transform: self.transform.inverse(),
        }
    }

    pub fn reference_one_based(&self) -> Vec<i64> {
        self.reference.iter().map(|&i| i as i64 + 1).collect()
    }

    pub fn periodic_one_based(&self) -> Vec<i64> {
        self.periodic.iter().map(|&i| i as i64 + 1).collect()
    }
}

/// Pair the points of a cyclic patch through `map`.
///
/// Requires an even number of patch points and exactly `n_points / 2`
/// correspondence entries. The patch's own transform is used when present,
/// `default_transform` otherwise.
pub fn pair_cyclic_patch(
    patch: &Patch,
    map: &PointMap,
    default_transform: &PeriodicTransform,
) -> Result<PairedBoundary, FoamCgnsError> {
    let malformed = |reason: String| FoamCgnsError::MalformedCyclicPatch {
        patch: patch.name().to_string(),
        reason,
    };
    if !patch.is_cyclic() && !patch.is_coupled() {
        return Err(malformed(format!(
            "patch type `{}` is not cyclic",
            patch.patch_type()
        )));
    }
    let n_points = patch.n_points();
    if n_points % 2 != 0 {
        return Err(malformed(format!("odd number of points ({n_points})")));
    }
    let half = n_points / 2;
    let edges = patch.coupled_points();
    if edges.len() != half {
        return Err(malformed(format!(
            "{} correspondences for {} points (expected {half})",
            edges.len(),
            n_points
        )));
    }

    let mesh_points = patch.mesh_points();
    let lookup = |local: usize| -> Result<usize, FoamCgnsError> {
        let original = *mesh_points
            .get(local)
            .ok_or_else(|| malformed(format!("local point {local} out of range")))?;
        map.try_get(original)
    };

    let mut reference = Vec::with_capacity(half);
    let mut periodic = Vec::with_capacity(half);
    for &(start, end) in edges {
        reference.push(lookup(start)?);
        periodic.push(lookup(end)?);
    }

    Ok(PairedBoundary {
        reference,
        periodic,
        transform: patch.transform().copied().unwrap_or(*default_transform),
    })
}
