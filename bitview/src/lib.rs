//! Typed views of bit fields packed into primitive integer words.
//!
//! A [`BitField<OFFSET, WIDTH, T>`](BitField) names the `WIDTH` bits starting
//! `OFFSET` bits above the least significant bit of a storage word, and reads
//! them as a `T`. A [`BitFlag<OFFSET, T>`] names a single bit and reads it as a
//! `bool`. Neither type can be instantiated: they never own or borrow a word,
//! they only carry the position and type needed to interpret one. Many
//! descriptors may describe the same word, including overlapping ranges.
//!
//! Fields are extracted and assigned with shift and mask arithmetic on the
//! storage word, so the result never depends on how the host compiler would lay
//! out a native bit field. Assigning a field leaves every bit outside it
//! untouched, and signed fields are sign-extended from their own most
//! significant bit.
//!
//! ```
//! use bitview::prelude::*;
//!
//! type Low = BitField<0, 4, i32>;
//! type High = BitField<28, 4, u32>;
//!
//! let mut word = 0i32;
//! Low::set(&mut word, -8);
//! assert_eq!(Low::get(word), -8);
//!
//! let mut word = 0xffff_ffffu32;
//! High::set(&mut word, 0x5);
//! assert_eq!(word, 0x5fff_ffff);
//! ```
//!
//! Records usually hold one private word and expose each logical field through
//! generated accessors; see [`field_accessors!`].
//!
//! # Compile-time checks
//!
//! A descriptor whose bits reach the top of its storage word is accepted:
//!
//! ```
//! use bitview::{BitField, BitFlag};
//!
//! assert_eq!(BitField::<28, 4, u32>::get(0xf000_0000), 0xf);
//! assert_eq!(BitField::<3, 1, u8>::get(0b1000), 1);
//! assert!(BitFlag::<15, u16>::get(0x8000));
//! ```
//!
//! Using a descriptor whose bits do not fit its storage word is a compile
//! error:
//!
//! ```compile_fail
//! use bitview::BitField;
//!
//! // 28 + 8 bits do not fit in a u32.
//! let _ = BitField::<28, 8, u32>::get(0);
//! ```
//!
//! ```compile_fail
//! use bitview::BitField;
//!
//! let _ = BitField::<3, 0, u8>::get(0);
//! ```
//!
//! ```compile_fail
//! use bitview::BitFlag;
//!
//! let _ = BitFlag::<16, u16>::get(0);
//! ```
//!
//! # Concurrency
//!
//! Descriptors hold no state. Several fields usually share one word, so writers
//! of different fields in the same word must still be serialized by the owner
//! of that word.

#![no_std]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use core::convert::Infallible;
use core::marker::PhantomData;

use num_traits::{One, Zero};

pub mod prelude;
mod value;
mod word;

pub use value::FieldValue;
pub use word::Word;

// For macro access via `$crate`.
#[doc(hidden)]
pub mod __private {
    pub use paste::paste;
}

mod sealed {
    pub trait Sealed {}
}

/// A bit field descriptor: `WIDTH` bits starting at bit `OFFSET` of a
/// `T::Storage` word, read as a `T`.
///
/// The descriptor cannot be constructed. This keeps it from ever being mistaken
/// for a value or for a copy of the word it describes.
pub struct BitField<const OFFSET: u32, const WIDTH: u32, T> {
    _value: PhantomData<fn() -> T>,
    _unconstructible: Infallible,
}

impl<const OFFSET: u32, const WIDTH: u32, T: FieldValue> BitField<OFFSET, WIDTH, T> {
    const VALID: () = {
        let bits = <T::Storage as Word>::BITS;
        assert!(WIDTH > 0, "bit field must be at least one bit wide");
        assert!(WIDTH <= bits, "bit field is wider than its storage word");
        assert!(OFFSET < bits, "bit field starts outside its storage word");
        assert!(
            OFFSET + WIDTH <= bits,
            "bit field extends past the end of its storage word"
        );
    };

    /// The distance in bits from the least significant bit of the word to the
    /// field.
    #[inline(always)]
    pub const fn offset() -> u32 {
        OFFSET
    }

    /// The number of bits in the field.
    #[inline(always)]
    pub const fn width() -> u32 {
        WIDTH
    }

    /// Returns the mask selecting this field's bits within the storage word.
    #[inline(always)]
    pub fn mask() -> T::Storage {
        let () = Self::VALID;
        <T::Storage as Word>::from_unsigned(<T::Storage as Word>::mask(OFFSET, WIDTH))
    }

    /// Reads the field's bits from `storage`, moved down to the least
    /// significant bits and sign-extended if `T` is a signed integer (see
    /// [`FieldValue::SIGN_EXTEND`]).
    #[inline(always)]
    pub fn get_raw(storage: T::Storage) -> T::Storage {
        let () = Self::VALID;
        if T::SIGN_EXTEND {
            storage.extract(OFFSET, WIDTH)
        } else {
            storage.extract_unsigned(OFFSET, WIDTH)
        }
    }

    /// Reads the field from `storage`.
    #[inline(always)]
    pub fn get(storage: T::Storage) -> T {
        T::from_storage(Self::get_raw(storage))
    }

    /// Replaces the field's bits in `storage` with the low `WIDTH` bits of
    /// `value`.
    #[inline(always)]
    pub fn set_raw(storage: &mut T::Storage, value: T::Storage) {
        let () = Self::VALID;
        *storage = storage.insert(OFFSET, WIDTH, value);
    }

    /// Assigns the field in `storage`. Bits outside the field are preserved;
    /// bits of `value` that do not fit in the field are discarded.
    #[inline(always)]
    pub fn set(storage: &mut T::Storage, value: T) {
        Self::set_raw(storage, value.into_storage());
    }

    /// Returns `storage` with the field assigned.
    #[inline(always)]
    #[must_use]
    pub fn with(mut storage: T::Storage, value: T) -> T::Storage {
        Self::set(&mut storage, value);
        storage
    }
}

/// A one-bit field descriptor: bit `OFFSET` of a `T::Storage` word, read as a
/// `bool`.
///
/// Equivalent to a [`BitField<OFFSET, 1, T>`](BitField) whose value is compared
/// against zero.
pub struct BitFlag<const OFFSET: u32, T> {
    _value: PhantomData<fn() -> T>,
    _unconstructible: Infallible,
}

impl<const OFFSET: u32, T: FieldValue> BitFlag<OFFSET, T> {
    /// The bit number of the flag within the storage word.
    #[inline(always)]
    pub const fn offset() -> u32 {
        OFFSET
    }

    /// Returns the mask selecting this flag within the storage word.
    #[inline(always)]
    pub fn mask() -> T::Storage {
        BitField::<OFFSET, 1, T>::mask()
    }

    /// Reads the flag from `storage`.
    #[inline(always)]
    pub fn get(storage: T::Storage) -> bool {
        BitField::<OFFSET, 1, T>::get_raw(storage) != <T::Storage as Zero>::zero()
    }

    /// Sets or clears the flag in `storage`, preserving all other bits.
    #[inline(always)]
    pub fn set(storage: &mut T::Storage, value: bool) {
        let raw = if value {
            <T::Storage as One>::one()
        } else {
            <T::Storage as Zero>::zero()
        };
        BitField::<OFFSET, 1, T>::set_raw(storage, raw);
    }

    /// Returns `storage` with the flag set or cleared.
    #[inline(always)]
    #[must_use]
    pub fn with(mut storage: T::Storage, value: bool) -> T::Storage {
        Self::set(&mut storage, value);
        storage
    }
}

/// Field descriptors, abstracted over [`BitField`] and [`BitFlag`].
pub trait Field {
    /// The word the field is stored in.
    type Storage: Word;
    /// The logical value of the field.
    type Value;

    /// Reads the field from `storage`.
    fn get(storage: Self::Storage) -> Self::Value;

    /// Assigns the field in `storage`, preserving all other bits.
    fn set(storage: &mut Self::Storage, value: Self::Value);

    /// Returns `storage` with the field assigned.
    #[must_use]
    fn with(mut storage: Self::Storage, value: Self::Value) -> Self::Storage {
        Self::set(&mut storage, value);
        storage
    }
}

impl<const OFFSET: u32, const WIDTH: u32, T: FieldValue> Field for BitField<OFFSET, WIDTH, T> {
    type Storage = T::Storage;
    type Value = T;

    #[inline(always)]
    fn get(storage: T::Storage) -> T {
        BitField::<OFFSET, WIDTH, T>::get(storage)
    }

    #[inline(always)]
    fn set(storage: &mut T::Storage, value: T) {
        BitField::<OFFSET, WIDTH, T>::set(storage, value)
    }
}

impl<const OFFSET: u32, T: FieldValue> Field for BitFlag<OFFSET, T> {
    type Storage = T::Storage;
    type Value = bool;

    #[inline(always)]
    fn get(storage: T::Storage) -> bool {
        BitFlag::<OFFSET, T>::get(storage)
    }

    #[inline(always)]
    fn set(storage: &mut T::Storage, value: bool) {
        BitFlag::<OFFSET, T>::set(storage, value)
    }
}

/// Generates accessor methods for fields packed into one storage field of a
/// struct.
///
/// Invoke inside an `impl` block. The first token names the struct field
/// holding the storage word (an identifier, or a tuple index such as `0`). Each
/// following line declares one logical field as `name: Descriptor;`, where the
/// descriptor is any [`Field`] type whose storage is the type of that struct
/// field. For each line the macro emits:
///
/// - `name(&self)`, which reads the field;
/// - `set_name(&mut self, value)`, which assigns it in place;
/// - `with_name(self, value) -> Self`, which assigns it and returns the
///   modified struct.
///
/// Attributes on a line, such as doc comments, are attached to the getter.
///
/// ```
/// use bitview::prelude::*;
///
/// #[derive(Clone, Copy, Default)]
/// pub struct Status(u16);
///
/// impl Status {
///     bitview::field_accessors! {
///         0;
///         /// Set once the transfer has finished.
///         pub done: BitFlag<15, u16>;
///         pub channel: BitField<8, 3, u16>;
///         pub level: BitField<0, 8, u16>;
///     }
/// }
///
/// let status = Status::default()
///     .with_done(true)
///     .with_channel(5)
///     .with_level(0xfe);
/// assert!(status.done());
/// assert_eq!(status.channel(), 5);
/// assert_eq!(status.0, 0b1_0000_101_1111_1110);
/// ```
#[macro_export]
macro_rules! field_accessors {
    (
        $word:tt;
        $(
            $(#[$attr:meta])*
            $vis:vis $name:ident: $field:ty;
        )*
    ) => {
        $crate::__private::paste! {
            $(
                $(#[$attr])*
                #[inline]
                $vis fn $name(&self) -> <$field as $crate::Field>::Value {
                    <$field as $crate::Field>::get(self.$word)
                }

                #[doc = "Assigns the `" $name "` field, preserving all other bits."]
                #[inline]
                $vis fn [<set_ $name>](&mut self, value: <$field as $crate::Field>::Value) {
                    <$field as $crate::Field>::set(&mut self.$word, value)
                }

                #[doc = "Returns `self` with the `" $name "` field assigned."]
                #[inline]
                #[must_use]
                $vis fn [<with_ $name>](mut self, value: <$field as $crate::Field>::Value) -> Self {
                    <$field as $crate::Field>::set(&mut self.$word, value);
                    self
                }
            )*
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Kind {
        A,
        B,
        Other(u32),
    }

    impl FieldValue for Kind {
        type Storage = u32;

        fn from_storage(storage: u32) -> Self {
            match storage {
                0 => Self::A,
                1 => Self::B,
                other => Self::Other(other),
            }
        }

        fn into_storage(self) -> u32 {
            match self {
                Self::A => 0,
                Self::B => 1,
                Self::Other(other) => other,
            }
        }
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    struct Packed {
        word: u32,
    }

    impl Packed {
        field_accessors! {
            word;
            kind: BitField<0, 2, Kind>;
            flag: BitFlag<2, u32>;
            id: BitField<16, 8, u32>;
            full: BitField<0, 32, u32>;
        }
    }

    #[test]
    fn test_masks() {
        assert_eq!(BitField::<0, 2, u32>::mask(), 0b11);
        assert_eq!(BitField::<16, 8, u32>::mask(), 0x00ff_0000);
        assert_eq!(BitField::<0, 64, u64>::mask(), u64::MAX);
        assert_eq!(BitField::<4, 4, i8>::mask(), 0xf0u8 as i8);
        assert_eq!(BitFlag::<31, u32>::mask(), 0x8000_0000);
    }

    #[test]
    fn test_offset_and_width() {
        assert_eq!(BitField::<16, 8, u32>::offset(), 16);
        assert_eq!(BitField::<16, 8, u32>::width(), 8);
        assert_eq!(BitFlag::<5, u8>::offset(), 5);
    }

    #[test]
    fn test_enum_field() {
        let mut word = 0xffff_fffcu32;
        BitField::<0, 2, Kind>::set(&mut word, Kind::B);
        assert_eq!(BitField::<0, 2, Kind>::get(word), Kind::B);
        assert_eq!(word, 0xffff_fffd);
        assert_eq!(BitField::<0, 2, Kind>::get(0b11), Kind::Other(3));
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Level {
        Low,
        High,
        Other(i8),
    }

    impl FieldValue for Level {
        type Storage = i8;

        fn from_storage(storage: i8) -> Self {
            match storage {
                0 => Self::Low,
                1 => Self::High,
                other => Self::Other(other),
            }
        }

        fn into_storage(self) -> i8 {
            match self {
                Self::Low => 0,
                Self::High => 1,
                Self::Other(other) => other,
            }
        }
    }

    #[test]
    fn test_enum_field_in_signed_word_is_not_sign_extended() {
        type LevelField = BitField<2, 2, Level>;

        assert_eq!(LevelField::get_raw(0b0000_1100), 0b11);
        assert_eq!(LevelField::get(0b0000_1100), Level::Other(3));
        assert_eq!(LevelField::get(-1), Level::Other(3));
        assert_eq!(LevelField::get(0b0000_0100), Level::High);

        // The same bits read as a signed integer are sign-extended.
        assert_eq!(BitField::<2, 2, i8>::get(0b0000_1100), -1);
    }

    #[test]
    fn test_enum_fallback_truncated_to_width() {
        let word = BitField::<0, 2, Kind>::with(0, Kind::Other(0x1f));
        assert_eq!(word, 0b11);
    }

    #[test]
    fn test_flag() {
        let mut word = 0u8;
        BitFlag::<7, u8>::set(&mut word, true);
        assert_eq!(word, 0x80);
        assert!(BitFlag::<7, u8>::get(word));
        assert!(!BitFlag::<6, u8>::get(word));
        BitFlag::<7, u8>::set(&mut word, false);
        assert_eq!(word, 0);
    }

    #[test]
    fn test_signed_flag() {
        let word = BitFlag::<0, i32>::with(0, true);
        assert_eq!(word, 1);
        assert_eq!(BitField::<0, 1, i32>::get(word), -1);
        assert!(BitFlag::<0, i32>::get(word));
    }

    #[test]
    fn test_accessors() {
        let packed = Packed::default()
            .with_kind(Kind::B)
            .with_flag(true)
            .with_id(0xab);
        assert_eq!(packed.word, 0x00ab_0005);
        assert_eq!(packed.kind(), Kind::B);
        assert!(packed.flag());
        assert_eq!(packed.id(), 0xab);
        assert_eq!(packed.full(), 0x00ab_0005);
    }

    #[test]
    fn test_accessors_set_in_place() {
        let mut packed = Packed { word: u32::MAX };
        packed.set_id(0);
        packed.set_flag(false);
        assert_eq!(packed.word, 0xff00_fffb);
        assert_eq!(packed.kind(), Kind::Other(3));
    }

    #[test]
    fn test_field_trait_with() {
        assert_eq!(<BitField<8, 8, u16> as Field>::with(0xffff, 0x12), 0x12ff);
        assert_eq!(<BitFlag<0, u16> as Field>::with(0xffff, false), 0xfffe);
    }
}
