//! Solution fields and their boundary values.

use crate::mesh_error::FoamCgnsError;

/// Physical dimensions of a field as exponents of the SI base quantities.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DimensionSet {
    pub mass: f64,
    pub length: f64,
    pub time: f64,
    pub temperature: f64,
}

impl DimensionSet {
    pub fn new(mass: f64, length: f64, time: f64, temperature: f64) -> Self {
        Self {
            mass,
            length,
            time,
            temperature,
        }
    }

    /// CGNS `DimensionalExponents` order: mass, length, time, temperature,
    /// angle. Angle is always zero.
    pub fn cgns_exponents(&self) -> [f64; 5] {
        [self.mass, self.length, self.time, self.temperature, 0.0]
    }
}

/// Value type that can be summed and averaged.
pub trait FieldValue: Copy + std::fmt::Debug + PartialEq {
    const ZERO: Self;

    fn accumulate(&mut self, other: Self);

    /// `self - other`.
    fn difference(self, other: Self) -> Self;

    fn scaled(self, factor: f64) -> Self;
}

impl FieldValue for f64 {
    const ZERO: Self = 0.0;

    fn accumulate(&mut self, other: Self) {
        *self += other;
    }

    fn difference(self, other: Self) -> Self {
        self - other
    }

    fn scaled(self, factor: f64) -> Self {
        self * factor
    }
}

impl FieldValue for [f64; 3] {
    const ZERO: Self = [0.0; 3];

    fn accumulate(&mut self, other: Self) {
        for (a, b) in self.iter_mut().zip(other) {
            *a += b;
        }
    }

    fn difference(self, other: Self) -> Self {
        [self[0] - other[0], self[1] - other[1], self[2] - other[2]]
    }

    fn scaled(self, factor: f64) -> Self {
        self.map(|v| v * factor)
    }
}

/// Boundary-condition kind reported for degenerate patches.
pub const EMPTY_BC_TYPE: &str = "empty";

/// Face values of one field on one patch, aligned with the patch face order.
#[derive(Clone, Debug, PartialEq)]
pub struct PatchField<T> {
    pub bc_type: String,
    pub values: Vec<T>,
}

impl<T> PatchField<T> {
    pub fn new(bc_type: impl Into<String>, values: Vec<T>) -> Self {
        Self {
            bc_type: bc_type.into(),
            values,
        }
    }

    /// An `empty` condition or a missing value array contributes nothing.
    pub fn is_degenerate(&self) -> bool {
        self.bc_type == EMPTY_BC_TYPE || self.values.is_empty()
    }
}

/// Cell-centred field with per-patch boundary values.
#[derive(Clone, Debug, PartialEq)]
pub struct VolField<T> {
    pub name: String,
    pub dimensions: DimensionSet,
    pub internal: Vec<T>,
    /// One entry per mesh patch, in mesh patch order. Missing trailing entries
    /// are treated as degenerate.
    pub boundary: Vec<PatchField<T>>,
}

impl<T> VolField<T> {
    pub fn new(name: impl Into<String>, dimensions: DimensionSet, internal: Vec<T>) -> Self {
        Self {
            name: name.into(),
            dimensions,
            internal,
            boundary: Vec::new(),
        }
    }

    pub fn with_boundary(mut self, boundary: Vec<PatchField<T>>) -> Self {
        self.boundary = boundary;
        self
    }

    /// Boundary values on patch `patch_index`, if any were supplied.
    pub fn patch_field(&self, patch_index: usize) -> Option<&PatchField<T>> {
        self.boundary.get(patch_index)
    }

    /// Check the internal array against the mesh cell count.
    pub fn check_cell_count(&self, n_cells: usize) -> Result<(), FoamCgnsError> {
        if self.internal.len() != n_cells {
            return Err(FoamCgnsError::FieldSizeMismatch {
                field: self.name.clone(),
                expected: n_cells,
                found: self.internal.len(),
            });
        }
        Ok(())
    }
}

pub type VolScalarField = VolField<f64>;
pub type VolVectorField = VolField<[f64; 3]>;

/// Fields of one time step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldSet {
    pub scalars: Vec<VolScalarField>,
    pub vectors: Vec<VolVectorField>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scalar(mut self, field: VolScalarField) -> Self {
        self.scalars.push(field);
        self
    }

    pub fn with_vector(mut self, field: VolVectorField) -> Self {
        self.vectors.push(field);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.vectors.is_empty()
    }
}
