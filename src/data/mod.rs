//! Data module: solution fields, quantity names and boundary-condition types

pub mod bc;
pub mod field;
pub mod quantity;

pub use bc::BcType;
pub use field::{
    DimensionSet, FieldSet, FieldValue, PatchField, VolField, VolScalarField, VolVectorField,
};
pub use quantity::{Quantity, ResolvedName, init_quantity_table, resolve};
