//! Boundary-condition types written to CGNS `BC_t` nodes.

/// Subset of CGNS `BCType_t` produced from OpenFOAM patch tags.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum BcType {
    BCTypeNull,
    BCTypeUserDefined,
    BCWall,
    BCInflow,
    BCOutflow,
    BCSymmetryPlane,
    BCFarfield,
}

impl BcType {
    /// Map a physical or patch type tag. Matching is exact; unknown non-empty
    /// tags become [`BcType::BCTypeUserDefined`].
    pub fn from_physical_type(tag: &str) -> Self {
        match tag {
            "" => BcType::BCTypeNull,
            "wall" => BcType::BCWall,
            "inlet" | "inflow" | "velocityInlet" => BcType::BCInflow,
            "outlet" | "outflow" | "pressureOutlet" => BcType::BCOutflow,
            "symmetryPlane" | "symmetry" => BcType::BCSymmetryPlane,
            "farfield" | "freestream" => BcType::BCFarfield,
            _ => BcType::BCTypeUserDefined,
        }
    }

    pub fn cgns_name(self) -> &'static str {
        match self {
            BcType::BCTypeNull => "BCTypeNull",
            BcType::BCTypeUserDefined => "BCTypeUserDefined",
            BcType::BCWall => "BCWall",
            BcType::BCInflow => "BCInflow",
            BcType::BCOutflow => "BCOutflow",
            BcType::BCSymmetryPlane => "BCSymmetryPlane",
            BcType::BCFarfield => "BCFarfield",
        }
    }
}
