#![cfg_attr(docsrs, feature(doc_cfg))]
//! # foam-cgns
//!
//! foam-cgns converts OpenFOAM-style unstructured meshes and their solution
//! fields into CGNS zone trees. It remaps cell connectivity into CGNS element
//! blocks, extracts deduplicated boundary point sets, decomposes boundary
//! faces into quads and triangles, translates field names to canonical CGNS
//! quantities and averages boundary face values onto points.
//!
//! ## Features
//! - Uniform and mixed volume meshes (tetrahedra, pyramids, prisms, hexahedra)
//! - Boundary-only export with a single shared patch filter
//! - Cyclic patches as boundary conditions or periodic grid connectivities
//! - An in-memory [`CgnsTree`](io::CgnsTree) that replays into any
//!   [`CgnsWriter`](io::CgnsWriter) backend
//! - Optional `rayon` feature for assembling time steps concurrently
//!
//! The crate does not encode CGNS files itself and does not interpolate cell
//! values to points; both are supplied by the caller through
//! [`io::CgnsWriter`] and [`algs::PointInterpolator`].
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! foam-cgns = "0.3"
//! # features = ["rayon"]
//! ```
//!
//! ## Logging
//! Progress and every skipped field, patch or face are reported through the
//! [`log`] facade. Install any logger to see them.

// Re-export our major subsystems:
pub mod algs;
pub mod data;
pub mod io;
pub mod mesh_error;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::interpolate::PointInterpolator;
    pub use crate::algs::renumber::PointMap;
    pub use crate::data::field::{
        DimensionSet, FieldSet, PatchField, VolScalarField, VolVectorField,
    };
    pub use crate::data::quantity::{init_quantity_table, Quantity};
    pub use crate::io::{
        CgnsTree, CgnsWriter, ConversionDictionary, ConversionDriver, CyclicExport, ExportMode,
        ExportOptions, TimeStep, ZoneAssembler,
    };
    pub use crate::mesh_error::FoamCgnsError;
    pub use crate::topology::cell_type::ElementType;
    pub use crate::topology::mesh::FoamMesh;
    pub use crate::topology::patch::{Patch, PatchFilter};
    pub use crate::topology::periodic::PeriodicTransform;
}
