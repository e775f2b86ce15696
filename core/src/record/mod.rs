//! Input record and field catalogue

pub mod field;
pub mod input;

pub use field::{Field, FieldKind, FieldSpec, SliderRange};
pub use input::{FieldValue, InputRecord, Sex};
