use core::mem::size_of;
use core::ops::Range;

use bitview::prelude::*;
use bytemuck::{Pod, Zeroable};

use crate::Record;

/// The file header. The variant offset table, `num_programs` entries of `u32`
/// measured from the start of the file, follows immediately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Zeroable, Pod)]
#[repr(C)]
pub struct DvlbHeader {
    pub magic_word: u32,
    pub num_programs: u32,
}

impl DvlbHeader {
    /// `"DVLB"`
    pub const MAGIC_WORD: u32 = 0x424c_5644;

    pub fn has_magic(&self) -> bool {
        self.magic_word == Self::MAGIC_WORD
    }
}

impl Record for DvlbHeader {
    fn from_le(self) -> Self {
        Self {
            magic_word: u32::from_le(self.magic_word),
            num_programs: u32::from_le(self.num_programs),
        }
    }
}

/// The program header, shared by all variants. Offsets are relative to the
/// start of this header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Zeroable, Pod)]
#[repr(C)]
pub struct DvlpHeader {
    pub magic_word: u32,
    pub version: u32,
    pub binary_offset: u32,
    pub binary_size_words: u32,
    pub swizzle_info_offset: u32,
    pub swizzle_info_num_entries: u32,
    pub filename_symbol_offset: u32,
}

impl DvlpHeader {
    /// `"DVLP"`
    pub const MAGIC_WORD: u32 = 0x504c_5644;

    pub fn has_magic(&self) -> bool {
        self.magic_word == Self::MAGIC_WORD
    }
}

impl Record for DvlpHeader {
    fn from_le(self) -> Self {
        Self {
            magic_word: u32::from_le(self.magic_word),
            version: u32::from_le(self.version),
            binary_offset: u32::from_le(self.binary_offset),
            binary_size_words: u32::from_le(self.binary_size_words),
            swizzle_info_offset: u32::from_le(self.swizzle_info_offset),
            swizzle_info_num_entries: u32::from_le(self.swizzle_info_num_entries),
            filename_symbol_offset: u32::from_le(self.filename_symbol_offset),
        }
    }
}

/// Which pipeline stage a variant runs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderType {
    Vertex,
    Geometry,
    /// Any other stage byte.
    Unknown(u8),
}

impl FieldValue for ShaderType {
    type Storage = u8;

    fn from_storage(storage: u8) -> Self {
        match storage {
            0 => Self::Vertex,
            1 => Self::Geometry,
            other => Self::Unknown(other),
        }
    }

    fn into_storage(self) -> u8 {
        match self {
            Self::Vertex => 0,
            Self::Geometry => 1,
            Self::Unknown(other) => other,
        }
    }
}

/// The location of one of a variant's tables, relative to the start of its
/// [`DvleHeader`].
///
/// `count` is in entries for the record tables and in bytes for the symbol
/// table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Zeroable, Pod)]
#[repr(C)]
pub struct TableLocation {
    pub offset: u32,
    pub count: u32,
}

impl Record for TableLocation {
    fn from_le(self) -> Self {
        Self {
            offset: u32::from_le(self.offset),
            count: u32::from_le(self.count),
        }
    }
}

/// The header of one shader variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Zeroable, Pod)]
#[repr(C)]
pub struct DvleHeader {
    pub magic_word: u32,
    pub _padding1: u16,
    /// Raw [`ShaderType`] byte; see [`DvleHeader::kind`].
    pub shader_type: u8,
    pub _padding2: u8,

    /// Entry point, in words from the start of the program's microcode.
    pub main_offset_words: u32,
    /// End of the main routine, in words from the start of the program's
    /// microcode.
    pub endmain_offset_words: u32,

    pub _padding3: u32,
    pub _padding4: u32,

    /// Constant values preloaded into single registers.
    pub constant_table: TableLocation,
    /// Code labels.
    pub label_table: TableLocation,
    /// Output registers and their semantics.
    pub output_register_table: TableLocation,
    /// Uniforms, each of which may span several registers.
    pub uniform_table: TableLocation,
    /// NUL-terminated strings referenced by the other tables. `count` is in
    /// bytes.
    pub symbol_table: TableLocation,
}

impl DvleHeader {
    /// `"DVLE"`
    pub const MAGIC_WORD: u32 = 0x454c_5644;

    pub fn has_magic(&self) -> bool {
        self.magic_word == Self::MAGIC_WORD
    }

    bitview::field_accessors! {
        shader_type;
        /// The pipeline stage this variant runs in.
        pub kind: BitField<0, 8, ShaderType>;
    }

    /// The words of microcode making up the main routine.
    pub fn main_range(&self) -> Range<u32> {
        self.main_offset_words..self.endmain_offset_words
    }
}

impl Record for DvleHeader {
    fn from_le(self) -> Self {
        Self {
            magic_word: u32::from_le(self.magic_word),
            _padding1: u16::from_le(self._padding1),
            shader_type: self.shader_type,
            _padding2: self._padding2,
            main_offset_words: u32::from_le(self.main_offset_words),
            endmain_offset_words: u32::from_le(self.endmain_offset_words),
            _padding3: u32::from_le(self._padding3),
            _padding4: u32::from_le(self._padding4),
            constant_table: self.constant_table.from_le(),
            label_table: self.label_table.from_le(),
            output_register_table: self.output_register_table.from_le(),
            uniform_table: self.uniform_table.from_le(),
            symbol_table: self.symbol_table.from_le(),
        }
    }
}

const _: () = assert!(size_of::<DvlbHeader>() == 0x08);
const _: () = assert!(size_of::<DvlpHeader>() == 0x1c);
const _: () = assert!(size_of::<DvleHeader>() == 0x40);
const _: () = assert!(size_of::<TableLocation>() == 0x08);
