//! Primitive storage words and the shift/mask arithmetic performed on them.

use num_traits::{PrimInt, Zero};

use crate::sealed::Sealed;

/// Primitive integer types that can hold bit fields.
///
/// There is one implementation for each signed and unsigned primitive integer
/// from 8 to 64 bits wide. All field arithmetic happens in
/// [`Unsigned`](Self::Unsigned) so that building masks and moving fields into
/// place never propagates a sign bit. The only signed operation is the final
/// arithmetic right shift that sign-extends a signed field.
pub trait Word: PrimInt + Sealed {
    /// The unsigned primitive type of the same width.
    type Unsigned: PrimInt;

    /// The bit width of this type.
    const BITS: u32;
    /// Whether values of this type are sign-extended when extracted from a
    /// field.
    const SIGNED: bool;

    /// Reinterprets the bits of `self` as [`Unsigned`](Self::Unsigned).
    fn to_unsigned(self) -> Self::Unsigned;

    /// Reinterprets the bits of an [`Unsigned`](Self::Unsigned) value as
    /// `Self`.
    fn from_unsigned(value: Self::Unsigned) -> Self;

    /// Returns the mask selecting `width` bits starting `offset` bits above the
    /// least significant bit.
    ///
    /// The caller must ensure `0 < width`, `offset < BITS`, and
    /// `offset + width <= BITS`. [`BitField`](crate::BitField) checks these at
    /// compile time.
    #[inline(always)]
    fn mask(offset: u32, width: u32) -> Self::Unsigned {
        (!<Self::Unsigned as Zero>::zero() >> (Self::BITS - width) as usize) << offset as usize
    }

    /// Extracts the field at `offset..offset + width`, moved down to the least
    /// significant bits.
    ///
    /// Signed types are sign-extended from the field's most significant bit:
    /// the field is shifted up until that bit occupies the sign position, then
    /// shifted back down arithmetically.
    #[inline(always)]
    fn extract(self, offset: u32, width: u32) -> Self {
        if Self::SIGNED {
            let field = self.to_unsigned() & Self::mask(offset, width);
            let shift = (Self::BITS - width) as usize;
            Self::from_unsigned(field << (shift - offset as usize)) >> shift
        } else {
            self.extract_unsigned(offset, width)
        }
    }

    /// Extracts the field at `offset..offset + width`, moved down to the least
    /// significant bits and zero-extended regardless of signedness.
    #[inline(always)]
    fn extract_unsigned(self, offset: u32, width: u32) -> Self {
        Self::from_unsigned((self.to_unsigned() & Self::mask(offset, width)) >> offset as usize)
    }

    /// Returns `self` with the field at `offset..offset + width` replaced by
    /// the low `width` bits of `value`. Bits outside the field are preserved.
    #[inline(always)]
    #[must_use]
    fn insert(self, offset: u32, width: u32, value: Self) -> Self {
        let mask = Self::mask(offset, width);
        Self::from_unsigned(
            (self.to_unsigned() & !mask) | ((value.to_unsigned() << offset as usize) & mask),
        )
    }
}

macro_rules! impl_word {
    ($($ty:ident: $unsigned:ident, $signed:literal;)*) => {$(
        impl Sealed for $ty {}

        impl Word for $ty {
            type Unsigned = $unsigned;

            const BITS: u32 = $ty::BITS;
            const SIGNED: bool = $signed;

            #[inline(always)]
            fn to_unsigned(self) -> $unsigned {
                self as $unsigned
            }

            #[inline(always)]
            fn from_unsigned(value: $unsigned) -> Self {
                value as $ty
            }
        }
    )*};
}

impl_word! {
    u8: u8, false;
    u16: u16, false;
    u32: u32, false;
    u64: u64, false;
    i8: u8, true;
    i16: u16, true;
    i32: u32, true;
    i64: u64, true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(u32::mask(0, 2), 0b11);
        assert_eq!(u32::mask(16, 8), 0x00ff_0000);
        assert_eq!(u32::mask(0, 32), u32::MAX);
        assert_eq!(u64::mask(32, 32), 0xffff_ffff_0000_0000);
        assert_eq!(i8::mask(7, 1), 0x80);
        assert_eq!(i16::mask(0, 16), 0xffff);
    }

    #[test]
    fn test_extract_unsigned() {
        assert_eq!(0x1234_5678u32.extract(8, 8), 0x56);
        assert_eq!(0x1234_5678u32.extract(28, 4), 0x1);
        assert_eq!(0xffu8.extract(0, 8), 0xff);
    }

    #[test]
    fn test_extract_signed() {
        assert_eq!(0b0010_0000i8.extract(2, 4), -8);
        assert_eq!(0b0001_1100i8.extract(2, 4), 7);
        assert_eq!(0b0011_1100i8.extract(2, 4), -1);
        assert_eq!((-1i32).extract(0, 32), -1);
        assert_eq!(i64::MIN.extract(63, 1), -1);
    }

    #[test]
    fn test_extract_unsigned_ignores_sign() {
        assert_eq!(0b0011_1100i8.extract_unsigned(2, 4), 0b1111);
        assert_eq!((-1i32).extract_unsigned(0, 32), -1);
        assert_eq!(i64::MIN.extract_unsigned(63, 1), 1);
        assert_eq!(0x1234_5678u32.extract_unsigned(8, 8), 0x56);
    }

    #[test]
    fn test_insert_preserves_other_bits() {
        assert_eq!(0xffff_ffffu32.insert(8, 8, 0), 0xffff_00ff);
        assert_eq!(0u32.insert(8, 8, 0x1ab), 0x0000_ab00);
        assert_eq!((-1i8).insert(2, 4, 0), 0b1100_0011u8 as i8);
        assert_eq!(0i8.insert(2, 4, -8), 0b0010_0000);
    }
}
