//! Re-export public algorithms.

pub mod aggregate;
pub mod boundary;
pub mod connectivity;
pub mod faces;
pub mod interpolate;
pub mod renumber;

pub use aggregate::{aggregate_patch_values, scale_values};
pub use boundary::{build_boundary_point_map, collect_boundary_points};
pub use connectivity::{build_volume_blocks, detect_element_type, VolumeConnectivity};
pub use faces::{build_surface_blocks, decompose_face, Primitive, SurfaceConnectivity};
pub use interpolate::PointInterpolator;
pub use renumber::PointMap;
