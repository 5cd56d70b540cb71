//! Translation of OpenFOAM field names into CGNS quantity names.
//!
//! The lookup table is process-wide and read-only. It is built by
//! [`init_quantity_table`], which conversion drivers call once before any
//! time step is processed; lookups before that still work but pay the
//! construction cost on first use.
//!
//! Lookups are exact and case-sensitive. Vector fields are always resolved per
//! axis (`U` is looked up as `U_X`, `U_Y`, `U_Z`), never by base name.

use crate::data::field::DimensionSet;
use hashbrown::HashMap;
use once_cell::sync::Lazy;

/// Canonical CGNS quantities known to the converter.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Quantity {
    VelocityX,
    VelocityY,
    VelocityZ,
    Pressure,
    TurbulentEnergyKinetic,
    TurbulentDissipation,
    TurbulentSANuTilde,
}

impl Quantity {
    /// CGNS data-array name of the quantity.
    pub fn cgns_name(self) -> &'static str {
        match self {
            Quantity::VelocityX => "VelocityX",
            Quantity::VelocityY => "VelocityY",
            Quantity::VelocityZ => "VelocityZ",
            Quantity::Pressure => "Pressure",
            Quantity::TurbulentEnergyKinetic => "TurbulentEnergyKinetic",
            Quantity::TurbulentDissipation => "TurbulentDissipation",
            Quantity::TurbulentSANuTilde => "TurbulentSANuTilde",
        }
    }
}

const QUANTITY_TOKENS: [(&str, Quantity); 7] = [
    ("U_X", Quantity::VelocityX),
    ("U_Y", Quantity::VelocityY),
    ("U_Z", Quantity::VelocityZ),
    ("p", Quantity::Pressure),
    ("k", Quantity::TurbulentEnergyKinetic),
    ("epsilon", Quantity::TurbulentDissipation),
    ("nuTilda", Quantity::TurbulentSANuTilde),
];

static QUANTITY_TABLE: Lazy<HashMap<&'static str, Quantity>> =
    Lazy::new(|| QUANTITY_TOKENS.iter().copied().collect());

/// Build the lookup table now.
pub fn init_quantity_table() {
    Lazy::force(&QUANTITY_TABLE);
}

/// Resolve a field-name token to its canonical quantity.
pub fn resolve(token: &str) -> Option<Quantity> {
    QUANTITY_TABLE.get(token).copied()
}

/// Axis suffixes used for vector components.
pub const AXIS_SUFFIXES: [&str; 3] = ["_X", "_Y", "_Z"];

/// Output name of one exported data array.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedName {
    /// Name written to the flow solution.
    pub output_name: String,
    /// Canonical quantity, `None` for user-defined fields.
    pub quantity: Option<Quantity>,
    /// Exponents `[mass, length, time, temperature, angle]`, only set for
    /// user-defined fields.
    pub exponents: Option<[f64; 5]>,
}

impl ResolvedName {
    fn new(token: &str, fallback: String, dimensions: &DimensionSet) -> Self {
        match resolve(token) {
            Some(q) => Self {
                output_name: q.cgns_name().to_string(),
                quantity: Some(q),
                exponents: None,
            },
            None => Self {
                output_name: fallback,
                quantity: None,
                exponents: Some(dimensions.cgns_exponents()),
            },
        }
    }

    pub fn is_pressure(&self) -> bool {
        self.quantity == Some(Quantity::Pressure)
    }
}

/// Resolve a scalar field name.
///
/// Returns `None` when the name is unknown and user-defined fields are not
/// allowed; the caller skips the field.
pub fn resolve_scalar(
    name: &str,
    dimensions: &DimensionSet,
    allow_user_defined: bool,
) -> Option<ResolvedName> {
    if resolve(name).is_none() && !allow_user_defined {
        return None;
    }
    Some(ResolvedName::new(name, name.to_string(), dimensions))
}

/// Resolve the three component names of a vector field.
///
/// The X component decides whether the field is exported at all; each
/// component then falls back to `<name>_<axis>` independently.
pub fn resolve_vector(
    name: &str,
    dimensions: &DimensionSet,
    allow_user_defined: bool,
) -> Option<[ResolvedName; 3]> {
    let x_token = format!("{name}{}", AXIS_SUFFIXES[0]);
    if resolve(&x_token).is_none() && !allow_user_defined {
        return None;
    }
    Some(AXIS_SUFFIXES.map(|suffix| {
        let token = format!("{name}{suffix}");
        ResolvedName::new(&token, token.clone(), dimensions)
    }))
}
