//! CGNS output records and the writer interface.
//!
//! The conversion never encodes CGNS itself. It produces the records below,
//! collected into a [`CgnsTree`](tree::CgnsTree), and hands them to a
//! [`CgnsWriter`] supplied by the caller (an HDF5/ADF backend, a test recorder,
//! or the tree itself).
//!
//! All index arrays in these records are 1-based, as CGNS requires.

pub mod cgns;
pub mod series;
pub mod tree;

use crate::data::bc::BcType;
use crate::mesh_error::FoamCgnsError;
use crate::topology::cell_type::ElementType;
use crate::topology::periodic::PeriodicTransform;

pub use cgns::{CyclicExport, ExportMode, ExportOptions, ZoneAssembler};
pub use series::{ConversionDictionary, ConversionDriver, TimeStep};
pub use tree::CgnsTree;

/// CGNS `SimulationType_t`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum SimulationType {
    TimeAccurate,
    NonTimeAccurate,
}

/// `CGNSBase_t` header. Data class is always Dimensional with SI units.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BaseDescription {
    pub name: String,
    pub cell_dim: u8,
    pub phys_dim: u8,
    pub simulation_type: SimulationType,
}

/// Unstructured `Zone_t` sizes.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ZoneDescription {
    pub name: String,
    pub vertex_count: usize,
    pub cell_count: usize,
}

/// Cartesian `GridCoordinates_t` arrays.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinates {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl Coordinates {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Homogeneous `Elements_t` section.
///
/// Covers global element indices `start..=start + count - 1`; consecutive
/// blocks of one zone are contiguous.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ElementBlock {
    pub name: String,
    pub element_type: ElementType,
    pub start: i64,
    pub count: usize,
    pub connectivity: Vec<i64>,
}

impl ElementBlock {
    /// Last global element index covered by the block.
    pub fn end(&self) -> i64 {
        self.start + self.count as i64 - 1
    }
}

/// Location of flow-solution values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum GridLocation {
    Vertex,
    CellCenter,
}

/// One `DataArray_t` of a flow solution.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SolutionField {
    pub name: String,
    pub values: Vec<f64>,
    /// `[mass, length, time, temperature, angle]`, for user-defined fields.
    pub exponents: Option<[f64; 5]>,
}

/// `FlowSolution_t` node with its arrays.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlowSolution {
    pub name: String,
    pub location: GridLocation,
    pub fields: Vec<SolutionField>,
}

/// `BC_t` node with a `PointList` point set.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BoundaryCondition {
    pub name: String,
    pub bc_type: BcType,
    pub points: Vec<i64>,
}

/// Abutting 1-to-1 `GridConnectivity_t` with a periodic property.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridConnectivity {
    pub name: String,
    pub donor_zone: String,
    pub points: Vec<i64>,
    pub donor_points: Vec<i64>,
    pub periodic: PeriodicTransform,
}

/// Sink for CGNS records, called in hierarchical order: base, zone,
/// coordinates, element blocks, flow solutions and their fields, boundary
/// conditions, grid connectivities.
pub trait CgnsWriter {
    fn write_base(&mut self, base: &BaseDescription) -> Result<(), FoamCgnsError>;

    fn write_zone(&mut self, zone: &ZoneDescription) -> Result<(), FoamCgnsError>;

    fn write_coordinates(&mut self, coords: &Coordinates) -> Result<(), FoamCgnsError>;

    fn write_elements(&mut self, block: &ElementBlock) -> Result<(), FoamCgnsError>;

    /// Open a flow solution; subsequent [`CgnsWriter::write_field`] calls
    /// belong to it.
    fn write_flow_solution(
        &mut self,
        name: &str,
        location: GridLocation,
    ) -> Result<(), FoamCgnsError>;

    fn write_field(&mut self, field: &SolutionField) -> Result<(), FoamCgnsError>;

    fn write_bc(&mut self, bc: &BoundaryCondition) -> Result<(), FoamCgnsError>;

    fn write_grid_connectivity(&mut self, conn: &GridConnectivity) -> Result<(), FoamCgnsError>;
}
