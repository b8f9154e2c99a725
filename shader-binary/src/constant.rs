use core::mem::size_of;

use bitview::prelude::*;
use bytemuck::{Pod, Zeroable};

use crate::Record;

/// Selects which member of a [`ConstantInfo`]'s value union is meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConstantType {
    Bool,
    Int,
    Float,
    /// The unassigned tag value 3.
    Unknown(u32),
}

impl FieldValue for ConstantType {
    type Storage = u32;

    fn from_storage(storage: u32) -> Self {
        match storage {
            0 => Self::Bool,
            1 => Self::Int,
            2 => Self::Float,
            other => Self::Unknown(other),
        }
    }

    fn into_storage(self) -> u32 {
        match self {
            Self::Bool => 0,
            Self::Int => 1,
            Self::Float => 2,
            Self::Unknown(other) => other,
        }
    }
}

/// A 24-bit GPU float: 1 sign bit, a 7-bit exponent biased by 63, and a 16-bit
/// mantissa, held in the low bits of a 32-bit word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Zeroable, Pod)]
#[repr(transparent)]
pub struct Float24(u32);

impl Float24 {
    pub const ZERO: Self = Self(0);
    const MAX_EXPONENT: u32 = 0x7f;
    const MAX_MANTISSA: u32 = 0xffff;

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn to_bits(self) -> u32 {
        self.0
    }

    bitview::field_accessors! {
        0;
        pub mantissa: BitField<0, 16, u32>;
        pub exponent: BitField<16, 7, u32>;
        pub negative: BitFlag<23, u32>;
    }

    /// Widens to an `f32`. The conversion is exact.
    ///
    /// A zero exponent and mantissa is a signed zero. The largest exponent
    /// encodes infinity when the mantissa is zero and NaN otherwise.
    pub fn to_f32(self) -> f32 {
        let sign = u32::from(self.negative()) << 31;
        let bits = match (self.exponent(), self.mantissa()) {
            (0, 0) => sign,
            (Self::MAX_EXPONENT, mantissa) => sign | (0xff << 23) | (mantissa << 7),
            (exponent, mantissa) => sign | ((exponent + 64) << 23) | (mantissa << 7),
        };
        f32::from_bits(bits)
    }

    /// Narrows an `f32`, truncating the mantissa.
    ///
    /// Magnitudes too small for a float24 become a zero of the same sign.
    /// Magnitudes too large become an infinity of the same sign. NaNs stay
    /// NaNs.
    pub fn from_f32(value: f32) -> Self {
        let bits = value.to_bits();
        let negative = bits >> 31 != 0;
        let exponent = ((bits >> 23) & 0xff) as i32 - 127 + 63;
        let mantissa = (bits >> 7) & Self::MAX_MANTISSA;
        let (exponent, mantissa) = if value.is_nan() {
            (Self::MAX_EXPONENT, mantissa.max(1))
        } else if exponent >= Self::MAX_EXPONENT as i32 {
            (Self::MAX_EXPONENT, 0)
        } else if exponent < 0 {
            (0, 0)
        } else {
            (exponent as u32, mantissa)
        };
        Self::ZERO
            .with_mantissa(mantissa)
            .with_exponent(exponent)
            .with_negative(negative)
    }
}

/// A decoded constant value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConstantValue {
    Bool(bool),
    /// Components x, y, z and w.
    Int([i8; 4]),
    /// Components x, y, z and w.
    Float([Float24; 4]),
    /// A value with an unassigned type tag; the raw words are preserved.
    Unknown { ty: u32, words: [u32; 4] },
}

/// A constant table entry: a value preloaded into one register.
///
/// The first word carries the value's type and the register index. The four
/// value words are a union selected by the type:
///
/// - bool: bit 0 of word 0;
/// - int: the four bytes of word 0, x first;
/// - float: one [`Float24`] per word, x first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Zeroable, Pod)]
#[repr(C)]
pub struct ConstantInfo {
    pub first_word: u32,
    pub value_words: [u32; 4],
}

impl ConstantInfo {
    bitview::field_accessors! {
        first_word;
        pub ty: BitField<0, 2, ConstantType>;
        /// Register index within the register class selected by
        /// [`ty`](Self::ty).
        pub regid: BitField<16, 8, u32>;
    }

    pub fn new(regid: u32, value: ConstantValue) -> Self {
        let mut info = Self::default().with_regid(regid);
        info.set_value(value);
        info
    }

    pub fn bool_value(&self) -> bool {
        BitFlag::<0, u32>::get(self.value_words[0])
    }

    pub fn set_bool_value(&mut self, value: bool) {
        BitFlag::<0, u32>::set(&mut self.value_words[0], value);
    }

    pub fn int_value(&self) -> [i8; 4] {
        self.value_words[0].to_le_bytes().map(|byte| byte as i8)
    }

    pub fn set_int_value(&mut self, value: [i8; 4]) {
        self.value_words[0] = u32::from_le_bytes(value.map(|component| component as u8));
    }

    pub fn float_value(&self) -> [Float24; 4] {
        self.value_words.map(Float24::from_bits)
    }

    pub fn set_float_value(&mut self, value: [Float24; 4]) {
        self.value_words = value.map(Float24::to_bits);
    }

    /// Decodes the value union according to [`ty`](Self::ty).
    pub fn value(&self) -> ConstantValue {
        match self.ty() {
            ConstantType::Bool => ConstantValue::Bool(self.bool_value()),
            ConstantType::Int => ConstantValue::Int(self.int_value()),
            ConstantType::Float => ConstantValue::Float(self.float_value()),
            ConstantType::Unknown(ty) => ConstantValue::Unknown {
                ty,
                words: self.value_words,
            },
        }
    }

    /// Stores `value` and the matching type tag. Unused value words are
    /// cleared.
    pub fn set_value(&mut self, value: ConstantValue) {
        self.value_words = [0; 4];
        match value {
            ConstantValue::Bool(value) => {
                self.set_ty(ConstantType::Bool);
                self.set_bool_value(value);
            }
            ConstantValue::Int(value) => {
                self.set_ty(ConstantType::Int);
                self.set_int_value(value);
            }
            ConstantValue::Float(value) => {
                self.set_ty(ConstantType::Float);
                self.set_float_value(value);
            }
            ConstantValue::Unknown { ty, words } => {
                self.set_ty(ConstantType::Unknown(ty));
                self.value_words = words;
            }
        }
    }
}

impl Record for ConstantInfo {
    fn from_le(self) -> Self {
        Self {
            first_word: u32::from_le(self.first_word),
            value_words: self.value_words.map(u32::from_le),
        }
    }
}

const _: () = assert!(size_of::<ConstantInfo>() == 20);
