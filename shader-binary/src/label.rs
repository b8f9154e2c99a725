use core::mem::size_of;

use bitview::prelude::*;
use bytemuck::{Pod, Zeroable};

use crate::Record;

/// A label table entry naming a location in the program's microcode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Zeroable, Pod)]
#[repr(C)]
pub struct LabelInfo {
    pub id_word: u32,
    /// In words from the start of the program's microcode.
    pub program_offset: u32,
    pub unknown: u32,
    /// Offset of the label's name in the variant's symbol table.
    pub name_offset: u32,
}

impl LabelInfo {
    bitview::field_accessors! {
        id_word;
        pub id: BitField<0, 8, u32>;
    }
}

impl Record for LabelInfo {
    fn from_le(self) -> Self {
        Self {
            id_word: u32::from_le(self.id_word),
            program_offset: u32::from_le(self.program_offset),
            unknown: u32::from_le(self.unknown),
            name_offset: u32::from_le(self.name_offset),
        }
    }
}

const _: () = assert!(size_of::<LabelInfo>() == 0x10);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_low_byte() {
        let mut label = LabelInfo {
            id_word: 0xabcd_ef12,
            ..Default::default()
        };
        assert_eq!(label.id(), 0x12);

        label.set_id(0x3);
        assert_eq!(label.id_word, 0xabcd_ef03);
    }
}
