//! FoamCgnsError: Unified error type for foam-cgns public APIs
//!
//! Component functions only return an error for structurally invalid input
//! (a cell arity with no CGNS element type, an index outside the mesh, a
//! malformed cyclic patch). Missing or degenerate data that has a
//! well-defined empty result is never an error.

use thiserror::Error;

/// Unified error type for mesh and field conversion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FoamCgnsError {
    /// A cell whose vertex count is not 4, 5, 6 or 8 was found in the volume pipeline.
    #[error("Wrong number of vertices in cell {cell}: expected 4, 5, 6 or 8, found {vertices}")]
    InvalidCellArity { cell: usize, vertices: usize },
    /// A point index beyond the mesh point array.
    #[error("Point index {point} out of range (mesh has {n_points} points)")]
    PointIndexOutOfRange { point: usize, n_points: usize },
    /// A point referenced by exported geometry has no entry in the point map.
    #[error("Point {0} has no entry in the point map")]
    UnmappedPoint(usize),
    /// A cyclic patch violates the two-congruent-halves precondition.
    #[error("Malformed cyclic patch `{patch}`: {reason}")]
    MalformedCyclicPatch { patch: String, reason: String },
    /// A field array does not have the length its location requires.
    #[error("Field `{field}` has {found} values, expected {expected}")]
    FieldSizeMismatch {
        field: String,
        expected: usize,
        found: usize,
    },
    /// An export option has an unusable value.
    #[error("Invalid option: {0}")]
    InvalidOption(String),
    /// Filesystem error while preparing output.
    #[error("I/O error: {0}")]
    Io(String),
    /// The output writer rejected a record.
    #[error("Writer error: {0}")]
    Writer(String),
}

impl From<std::io::Error> for FoamCgnsError {
    fn from(err: std::io::Error) -> Self {
        FoamCgnsError::Io(err.to_string())
    }
}
