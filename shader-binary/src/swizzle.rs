use core::mem::size_of;

use bytemuck::{Pod, Zeroable};

use crate::Record;

/// An entry in the program's operand descriptor table.
///
/// Instructions refer to entries by index to select swizzles, negation and
/// write masks for their operands. The pattern word is left packed;
/// interpreting it belongs to the instruction set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Zeroable, Pod)]
#[repr(C)]
pub struct SwizzleInfo {
    pub pattern: u32,
    pub unknown: u32,
}

impl Record for SwizzleInfo {
    fn from_le(self) -> Self {
        Self {
            pattern: u32::from_le(self.pattern),
            unknown: u32::from_le(self.unknown),
        }
    }
}

const _: () = assert!(size_of::<SwizzleInfo>() == 0x08);
