//! Little-endian serialization of shader binary records.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::{
    ConstantInfo, DvlbHeader, DvleHeader, DvlpHeader, Float24, LabelInfo, OutputRegisterInfo,
    SwizzleInfo, TableLocation, UniformInfo,
};

pub trait WriteTo<W: Write> {
    fn write_to(&self, w: &mut W) -> io::Result<()>;
}

impl<W: Write> WriteTo<W> for u32 {
    fn write_to(&self, w: &mut W) -> io::Result<()> {
        w.write_u32::<LittleEndian>(*self)
    }
}

impl<W: Write> WriteTo<W> for Float24 {
    fn write_to(&self, w: &mut W) -> io::Result<()> {
        w.write_u32::<LittleEndian>(self.to_bits())
    }
}

impl<W: Write, T: WriteTo<W>> WriteTo<W> for [T] {
    fn write_to(&self, w: &mut W) -> io::Result<()> {
        for item in self {
            item.write_to(w)?;
        }
        Ok(())
    }
}

impl<W: Write> WriteTo<W> for DvlbHeader {
    fn write_to(&self, w: &mut W) -> io::Result<()> {
        w.write_u32::<LittleEndian>(self.magic_word)?;
        w.write_u32::<LittleEndian>(self.num_programs)?;
        Ok(())
    }
}

impl<W: Write> WriteTo<W> for DvlpHeader {
    fn write_to(&self, w: &mut W) -> io::Result<()> {
        w.write_u32::<LittleEndian>(self.magic_word)?;
        w.write_u32::<LittleEndian>(self.version)?;
        w.write_u32::<LittleEndian>(self.binary_offset)?;
        w.write_u32::<LittleEndian>(self.binary_size_words)?;
        w.write_u32::<LittleEndian>(self.swizzle_info_offset)?;
        w.write_u32::<LittleEndian>(self.swizzle_info_num_entries)?;
        w.write_u32::<LittleEndian>(self.filename_symbol_offset)?;
        Ok(())
    }
}

impl<W: Write> WriteTo<W> for TableLocation {
    fn write_to(&self, w: &mut W) -> io::Result<()> {
        w.write_u32::<LittleEndian>(self.offset)?;
        w.write_u32::<LittleEndian>(self.count)?;
        Ok(())
    }
}

impl<W: Write> WriteTo<W> for DvleHeader {
    fn write_to(&self, w: &mut W) -> io::Result<()> {
        w.write_u32::<LittleEndian>(self.magic_word)?;
        w.write_u16::<LittleEndian>(self._padding1)?;
        w.write_u8(self.shader_type)?;
        w.write_u8(self._padding2)?;
        w.write_u32::<LittleEndian>(self.main_offset_words)?;
        w.write_u32::<LittleEndian>(self.endmain_offset_words)?;
        w.write_u32::<LittleEndian>(self._padding3)?;
        w.write_u32::<LittleEndian>(self._padding4)?;
        self.constant_table.write_to(w)?;
        self.label_table.write_to(w)?;
        self.output_register_table.write_to(w)?;
        self.uniform_table.write_to(w)?;
        self.symbol_table.write_to(w)?;
        Ok(())
    }
}

impl<W: Write> WriteTo<W> for ConstantInfo {
    fn write_to(&self, w: &mut W) -> io::Result<()> {
        w.write_u32::<LittleEndian>(self.first_word)?;
        self.value_words.write_to(w)
    }
}

impl<W: Write> WriteTo<W> for LabelInfo {
    fn write_to(&self, w: &mut W) -> io::Result<()> {
        w.write_u32::<LittleEndian>(self.id_word)?;
        w.write_u32::<LittleEndian>(self.program_offset)?;
        w.write_u32::<LittleEndian>(self.unknown)?;
        w.write_u32::<LittleEndian>(self.name_offset)?;
        Ok(())
    }
}

impl<W: Write> WriteTo<W> for OutputRegisterInfo {
    fn write_to(&self, w: &mut W) -> io::Result<()> {
        w.write_u64::<LittleEndian>(self.hex)
    }
}

impl<W: Write> WriteTo<W> for UniformInfo {
    fn write_to(&self, w: &mut W) -> io::Result<()> {
        w.write_u32::<LittleEndian>(self.symbol_offset)?;
        w.write_u32::<LittleEndian>(self.regs)?;
        Ok(())
    }
}

impl<W: Write> WriteTo<W> for SwizzleInfo {
    fn write_to(&self, w: &mut W) -> io::Result<()> {
        w.write_u32::<LittleEndian>(self.pattern)?;
        w.write_u32::<LittleEndian>(self.unknown)?;
        Ok(())
    }
}
