use core::fmt;
use core::mem::size_of;

use bitview::prelude::*;
use bytemuck::{Pod, Zeroable};

use crate::Record;

/// The meaning a variant assigns to one of its output registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputSemantic {
    Position,
    Quaternion,
    Color,
    TexCoord0,
    TexCoord0W,
    TexCoord1,
    TexCoord2,
    View,
    /// Any unassigned semantic value, including 7.
    Unknown(u64),
}

impl OutputSemantic {
    /// A short tag naming the semantic, as used in shader assembly listings.
    pub fn name(self) -> &'static str {
        match self {
            Self::Position => "out.pos",
            Self::Quaternion => "out.quat",
            Self::Color => "out.col",
            Self::TexCoord0 => "out.tex0",
            Self::TexCoord0W => "out.texw",
            Self::TexCoord1 => "out.tex1",
            Self::TexCoord2 => "out.tex2",
            Self::View => "out.view",
            Self::Unknown(_) => "out.unk",
        }
    }
}

impl FieldValue for OutputSemantic {
    type Storage = u64;

    fn from_storage(storage: u64) -> Self {
        match storage {
            0 => Self::Position,
            1 => Self::Quaternion,
            2 => Self::Color,
            3 => Self::TexCoord0,
            4 => Self::TexCoord0W,
            5 => Self::TexCoord1,
            6 => Self::TexCoord2,
            8 => Self::View,
            other => Self::Unknown(other),
        }
    }

    fn into_storage(self) -> u64 {
        match self {
            Self::Position => 0,
            Self::Quaternion => 1,
            Self::Color => 2,
            Self::TexCoord0 => 3,
            Self::TexCoord0W => 4,
            Self::TexCoord1 => 5,
            Self::TexCoord2 => 6,
            Self::View => 8,
            Self::Unknown(other) => other,
        }
    }
}

/// Prints the numeric representation.
impl fmt::Display for OutputSemantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.into_storage())
    }
}

// Indexed by component mask; bit 0 is x.
const MASK_LETTERS: [&str; 16] = [
    "", "x", "y", "xy", "z", "xz", "yz", "xyz", "w", "xw", "yw", "xyw", "zw", "xzw", "yzw", "xyzw",
];

/// An output register table entry, packed into a single 64-bit word.
///
/// [`descriptor`](Self::descriptor) covers the whole upper half of the word and
/// so includes the bits of [`component_mask`](Self::component_mask).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Zeroable, Pod)]
#[repr(C)]
pub struct OutputRegisterInfo {
    pub hex: u64,
}

impl OutputRegisterInfo {
    bitview::field_accessors! {
        hex;
        pub semantic: BitField<0, 16, OutputSemantic>;
        /// The output register number.
        pub id: BitField<16, 16, u64>;
        /// Which of the x, y, z and w components are written, x in bit 0.
        pub component_mask: BitField<32, 4, u64>;
        pub descriptor: BitField<32, 32, u64>;
    }

    /// The components selected by [`component_mask`](Self::component_mask), in
    /// xyzw order.
    pub fn mask_letters(&self) -> &'static str {
        MASK_LETTERS[self.component_mask() as usize]
    }

    pub fn semantic_name(&self) -> &'static str {
        self.semantic().name()
    }
}

impl Record for OutputRegisterInfo {
    fn from_le(self) -> Self {
        Self {
            hex: u64::from_le(self.hex),
        }
    }
}

const _: () = assert!(size_of::<OutputRegisterInfo>() == 0x08);

#[cfg(test)]
mod tests {
    use super::*;

    fn with_mask(mask: u64) -> OutputRegisterInfo {
        OutputRegisterInfo::default().with_component_mask(mask)
    }

    #[test]
    fn test_mask_letters() {
        assert_eq!(with_mask(0b1010).mask_letters(), "yw");
        assert_eq!(with_mask(0b1111).mask_letters(), "xyzw");
        assert_eq!(with_mask(0b0001).mask_letters(), "x");
        assert_eq!(with_mask(0b0110).mask_letters(), "yz");
        assert_eq!(with_mask(0).mask_letters(), "");
    }

    #[test]
    fn test_mask_letters_keep_xyzw_order() {
        for mask in 0..16 {
            let letters = with_mask(mask).mask_letters();
            let expected = "xyzw"
                .chars()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, letter)| letter);
            assert!(letters.chars().eq(expected), "mask {mask:#06b}");
        }
    }

    #[test]
    fn test_semantic_names() {
        let names = [
            (0, "out.pos"),
            (1, "out.quat"),
            (2, "out.col"),
            (3, "out.tex0"),
            (4, "out.texw"),
            (5, "out.tex1"),
            (6, "out.tex2"),
            (7, "out.unk"),
            (8, "out.view"),
            (9, "out.unk"),
            (0xffff, "out.unk"),
        ];
        for (value, name) in names {
            let info = OutputRegisterInfo { hex: value };
            assert_eq!(info.semantic_name(), name, "semantic {value}");
        }
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_semantic_display_is_numeric() {
        assert_eq!(OutputSemantic::View.to_string(), "8");
        assert_eq!(OutputSemantic::Unknown(7).to_string(), "7");
    }

    #[test]
    fn test_fields() {
        let info = OutputRegisterInfo {
            hex: 0x1234_5678_0003_0002,
        };
        assert_eq!(info.semantic(), OutputSemantic::Color);
        assert_eq!(info.id(), 3);
        assert_eq!(info.component_mask(), 0x8);
        assert_eq!(info.descriptor(), 0x1234_5678);
        assert_eq!(info.mask_letters(), "w");
    }

    #[test]
    fn test_descriptor_overlaps_component_mask() {
        let mut info = OutputRegisterInfo::default()
            .with_semantic(OutputSemantic::TexCoord0)
            .with_descriptor(0xffff_fff0);
        assert_eq!(info.component_mask(), 0);

        info.set_component_mask(0b0101);
        assert_eq!(info.descriptor(), 0xffff_fff5);
        assert_eq!(info.semantic(), OutputSemantic::TexCoord0);
        assert_eq!(info.mask_letters(), "xz");
    }
}
