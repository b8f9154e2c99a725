//! Convenience re-exports.

#[doc(no_inline)]
pub use crate::{field_accessors, BitField, BitFlag, Field, FieldValue, Word};
