//! Logical value types that can be read from and written to a bit field.

use crate::word::Word;

/// Types with a fixed-width integer representation.
///
/// A bit field's storage word is the representation of its value type: a
/// `BitField<_, _, u32>` lives in a `u32`, and a field typed with an
/// enumeration lives in the enumeration's [`Storage`](Self::Storage) word. All
/// shift and mask arithmetic happens on the storage word; `FieldValue` only
/// converts the extracted bits to and from the logical type.
///
/// Every primitive [`Word`] implements this trait as the identity conversion.
///
/// # Enumerations
///
/// Bit fields are read from arbitrary bytes, so
/// [`from_storage`](Self::from_storage) must accept every bit pattern the field
/// can hold. Enumerations used as field types therefore carry a fallback
/// variant holding unrecognized values:
///
/// ```
/// use bitview::prelude::*;
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// enum Filter {
///     Nearest,
///     Linear,
///     Reserved(u16),
/// }
///
/// impl FieldValue for Filter {
///     type Storage = u16;
///
///     fn from_storage(storage: u16) -> Self {
///         match storage {
///             0 => Self::Nearest,
///             1 => Self::Linear,
///             other => Self::Reserved(other),
///         }
///     }
///
///     fn into_storage(self) -> u16 {
///         match self {
///             Self::Nearest => 0,
///             Self::Linear => 1,
///             Self::Reserved(other) => other,
///         }
///     }
/// }
///
/// type FilterField = BitField<4, 2, Filter>;
///
/// assert_eq!(FilterField::get(0b01_0000), Filter::Linear);
/// assert_eq!(FilterField::get(0b11_0000), Filter::Reserved(3));
/// ```
pub trait FieldValue: Copy {
    /// The primitive word holding this value and the fields around it.
    type Storage: Word;

    /// Whether extracted field bits are sign-extended before conversion.
    ///
    /// This is true only for the signed primitive integers. Other value types,
    /// including enumerations stored in a signed word, see the field's bits
    /// zero-extended.
    const SIGN_EXTEND: bool = false;

    /// Converts extracted field bits to the logical value.
    ///
    /// The argument holds at most the field's width of significant bits,
    /// sign-extended if [`SIGN_EXTEND`](Self::SIGN_EXTEND) is set.
    fn from_storage(storage: Self::Storage) -> Self;

    /// Converts the logical value to its representation. Bits beyond the
    /// field's width are discarded when the value is assigned.
    fn into_storage(self) -> Self::Storage;
}

macro_rules! impl_field_value_for_words {
    ($($ty:ty),*) => {$(
        impl FieldValue for $ty {
            type Storage = Self;

            const SIGN_EXTEND: bool = <Self as Word>::SIGNED;

            #[inline(always)]
            fn from_storage(storage: Self) -> Self {
                storage
            }

            #[inline(always)]
            fn into_storage(self) -> Self {
                self
            }
        }
    )*};
}
impl_field_value_for_words!(u8, u16, u32, u64, i8, i16, i32, i64);
