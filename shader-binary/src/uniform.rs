use core::mem::size_of;
use core::ops::Range;

use bitview::prelude::*;
use bytemuck::{Pod, Zeroable};

use crate::Record;

/// The register class a register number falls in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegisterType {
    Input,
    FloatUniform,
    IntUniform,
    BoolUniform,
    /// Register numbers outside every class, including the gap between the int
    /// and bool uniforms.
    Unknown,
}

impl RegisterType {
    const INPUT: Range<u32> = 0x00..0x10;
    const FLOAT_UNIFORM: Range<u32> = 0x10..0x70;
    const INT_UNIFORM: Range<u32> = 0x70..0x74;
    const BOOL_UNIFORM: Range<u32> = 0x78..0x88;

    /// The register numbers belonging to this class, or `None` for
    /// [`RegisterType::Unknown`].
    pub fn range(self) -> Option<Range<u32>> {
        match self {
            Self::Input => Some(Self::INPUT),
            Self::FloatUniform => Some(Self::FLOAT_UNIFORM),
            Self::IntUniform => Some(Self::INT_UNIFORM),
            Self::BoolUniform => Some(Self::BOOL_UNIFORM),
            Self::Unknown => None,
        }
    }

    pub fn classify(reg: u32) -> Self {
        [
            Self::Input,
            Self::FloatUniform,
            Self::IntUniform,
            Self::BoolUniform,
        ]
        .into_iter()
        .find(|ty| ty.range().is_some_and(|range| range.contains(&reg)))
        .unwrap_or(Self::Unknown)
    }

    /// The zero-based index of `reg` within its class, or `None` if it has no
    /// class.
    pub fn index(reg: u32) -> Option<u32> {
        let range = Self::classify(reg).range()?;
        Some(reg - range.start)
    }
}

/// A uniform table entry: a named uniform occupying a run of registers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Zeroable, Pod)]
#[repr(C)]
pub struct UniformInfo {
    /// Offset of the uniform's name in the variant's symbol table.
    pub symbol_offset: u32,
    pub regs: u32,
}

impl UniformInfo {
    bitview::field_accessors! {
        regs;
        /// The first register of the uniform.
        pub reg_start: BitField<0, 16, u32>;
        /// The last register of the uniform, inclusive.
        pub reg_end: BitField<16, 16, u32>;
    }

    pub fn start_type(&self) -> RegisterType {
        RegisterType::classify(self.reg_start())
    }

    pub fn end_type(&self) -> RegisterType {
        RegisterType::classify(self.reg_end())
    }

    pub fn start_index(&self) -> Option<u32> {
        RegisterType::index(self.reg_start())
    }

    pub fn end_index(&self) -> Option<u32> {
        RegisterType::index(self.reg_end())
    }
}

impl Record for UniformInfo {
    fn from_le(self) -> Self {
        Self {
            symbol_offset: u32::from_le(self.symbol_offset),
            regs: u32::from_le(self.regs),
        }
    }
}

const _: () = assert!(size_of::<UniformInfo>() == 0x08);
