//! CGNS element types and vertex-ordering tables.
//!
//! Each volume element type owns a fixed table mapping its CGNS local vertex
//! slot to the slot of the OpenFOAM cell shape. For the four solid shapes
//! supported here the two conventions happen to agree, so the tables are
//! identities, but connectivity is always routed through them.

use static_assertions::const_assert_eq;

/// Element types written to CGNS `Elements_t` nodes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ElementType {
    /// 3-node triangle.
    Tri3,
    /// 4-node quadrilateral.
    Quad4,
    /// 4-node tetrahedron.
    Tetra4,
    /// 5-node pyramid.
    Pyra5,
    /// 6-node prism (pentahedron).
    Penta6,
    /// 8-node hexahedron.
    Hexa8,
    /// Mesh holding more than one volume element type.
    Mixed,
}

const TETRA_4_ORDER: [usize; 4] = [0, 1, 2, 3];
const PYRA_5_ORDER: [usize; 5] = [0, 1, 2, 3, 4];
const PENTA_6_ORDER: [usize; 6] = [0, 1, 2, 3, 4, 5];
const HEXA_8_ORDER: [usize; 8] = [0, 1, 2, 3, 4, 5, 6, 7];
const TRI_3_ORDER: [usize; 3] = [0, 1, 2];
const QUAD_4_ORDER: [usize; 4] = [0, 1, 2, 3];

const_assert_eq!(TETRA_4_ORDER.len(), ElementType::Tetra4.nodes());
const_assert_eq!(PYRA_5_ORDER.len(), ElementType::Pyra5.nodes());
const_assert_eq!(PENTA_6_ORDER.len(), ElementType::Penta6.nodes());
const_assert_eq!(HEXA_8_ORDER.len(), ElementType::Hexa8.nodes());
const_assert_eq!(TRI_3_ORDER.len(), ElementType::Tri3.nodes());
const_assert_eq!(QUAD_4_ORDER.len(), ElementType::Quad4.nodes());

/// Emission order of volume element blocks for mixed meshes.
pub const MIXED_BLOCK_ORDER: [ElementType; 4] = [
    ElementType::Hexa8,
    ElementType::Penta6,
    ElementType::Pyra5,
    ElementType::Tetra4,
];

impl ElementType {
    /// Volume element type for a cell with `n` vertices.
    pub fn from_volume_arity(n: usize) -> Option<Self> {
        match n {
            4 => Some(ElementType::Tetra4),
            5 => Some(ElementType::Pyra5),
            6 => Some(ElementType::Penta6),
            8 => Some(ElementType::Hexa8),
            _ => None,
        }
    }

    const fn nodes(self) -> usize {
        match self {
            ElementType::Tri3 => 3,
            ElementType::Quad4 | ElementType::Tetra4 => 4,
            ElementType::Pyra5 => 5,
            ElementType::Penta6 => 6,
            ElementType::Hexa8 => 8,
            ElementType::Mixed => 0,
        }
    }

    /// Number of nodes per element; `None` for [`ElementType::Mixed`].
    pub const fn node_count(self) -> Option<usize> {
        match self {
            ElementType::Mixed => None,
            ty => Some(ty.nodes()),
        }
    }

    /// Position of a volume type in [`MIXED_BLOCK_ORDER`].
    pub const fn mixed_slot(self) -> Option<usize> {
        match self {
            ElementType::Hexa8 => Some(0),
            ElementType::Penta6 => Some(1),
            ElementType::Pyra5 => Some(2),
            ElementType::Tetra4 => Some(3),
            ElementType::Tri3 | ElementType::Quad4 | ElementType::Mixed => None,
        }
    }

    /// Topological dimension of the element.
    pub fn dimension(self) -> u8 {
        match self {
            ElementType::Tri3 | ElementType::Quad4 => 2,
            ElementType::Tetra4
            | ElementType::Pyra5
            | ElementType::Penta6
            | ElementType::Hexa8
            | ElementType::Mixed => 3,
        }
    }

    /// Source-shape slot for each CGNS vertex slot.
    pub fn vertex_order(self) -> &'static [usize] {
        match self {
            ElementType::Tri3 => &TRI_3_ORDER,
            ElementType::Quad4 => &QUAD_4_ORDER,
            ElementType::Tetra4 => &TETRA_4_ORDER,
            ElementType::Pyra5 => &PYRA_5_ORDER,
            ElementType::Penta6 => &PENTA_6_ORDER,
            ElementType::Hexa8 => &HEXA_8_ORDER,
            ElementType::Mixed => &[],
        }
    }

    /// CGNS `ElementType_t` name.
    pub fn cgns_name(self) -> &'static str {
        match self {
            ElementType::Tri3 => "TRI_3",
            ElementType::Quad4 => "QUAD_4",
            ElementType::Tetra4 => "TETRA_4",
            ElementType::Pyra5 => "PYRA_5",
            ElementType::Penta6 => "PENTA_6",
            ElementType::Hexa8 => "HEXA_8",
            ElementType::Mixed => "MIXED",
        }
    }

    /// Suffix appended to the zone name for a block of this type.
    pub fn block_suffix(self) -> &'static str {
        match self {
            ElementType::Tri3 => "Tris",
            ElementType::Quad4 => "Quads",
            ElementType::Tetra4 => "Tetra",
            ElementType::Pyra5 => "Pyra",
            ElementType::Penta6 => "Penta",
            ElementType::Hexa8 => "Hexa",
            ElementType::Mixed => "Body",
        }
    }
}
