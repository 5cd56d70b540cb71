//! Source mesh topology.
//!
//! This module holds the mesh-side data model consumed by the conversion:
//! - [`FoamMesh`](mesh::FoamMesh): point positions, cell shapes and patches
//! - [`Patch`](patch::Patch) and the shared [`PatchFilter`](patch::PatchFilter)
//! - CGNS [`ElementType`](cell_type::ElementType) with per-type vertex tables
//! - cyclic patch pairing in [`periodic`]

pub mod cell_type;
pub mod mesh;
pub mod patch;
pub mod periodic;

pub use cell_type::ElementType;
pub use mesh::FoamMesh;
pub use patch::{Patch, PatchFilter};
pub use periodic::{PairedBoundary, PeriodicTransform};
