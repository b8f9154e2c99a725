//! Read-only navigation of a DVLB file held in memory.
//!
//! The views borrow the caller's bytes and resolve offsets lazily. Every lookup
//! is bounds-checked: a header, table or string that does not lie entirely
//! inside the buffer comes back as `None`. Nothing else is validated. Magic
//! words are not checked and table counts are trusted as long as the table
//! fits.
//!
//! ```
//! use shader_binary::binary::ShaderBinary;
//!
//! fn dump(data: &[u8]) {
//!     let binary = ShaderBinary::new(data);
//!     for variant in binary.variants() {
//!         let Some(uniforms) = variant.uniforms() else { continue };
//!         for uniform in uniforms {
//!             let name = variant.uniform_name(&uniform);
//!             println!("{:?} @ {:#x}", name, uniform.reg_start());
//!         }
//!     }
//! }
//! # dump(&[]);
//! ```

use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;
use core::slice::ChunksExact;

use log::{debug, trace};

use crate::{
    ConstantInfo, DvlbHeader, DvleHeader, DvlpHeader, LabelInfo, OutputRegisterInfo, Record,
    SwizzleInfo, TableLocation, UniformInfo,
};

/// A whole shader binary.
#[derive(Clone, Copy)]
pub struct ShaderBinary<'a>(&'a [u8]);

impl<'a> ShaderBinary<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self(data)
    }

    pub fn data(self) -> &'a [u8] {
        self.0
    }

    pub fn header(self) -> Option<DvlbHeader> {
        read_at(self.0, 0)
    }

    /// The offset of each variant's [`DvleHeader`] from the start of the file.
    pub fn variant_offsets(self) -> Option<Table<'a, u32>> {
        let header = self.header()?;
        table_at(self.0, DvlbHeader::SIZE, header.num_programs)
    }

    /// The program shared by every variant, which immediately follows the
    /// variant offset table.
    pub fn program(self) -> Option<Program<'a>> {
        let header = self.header()?;
        let offset = (header.num_programs as usize)
            .checked_mul(u32::SIZE)?
            .checked_add(DvlbHeader::SIZE)?;
        Some(Program {
            data: self.0,
            offset,
        })
    }

    /// The variant at `index` in the offset table, or `None` if the table has
    /// no such entry.
    pub fn variant(self, index: usize) -> Option<Variant<'a>> {
        let offset = self.variant_offsets()?.get(index)?;
        Some(Variant::new(self.0, offset as usize))
    }

    /// Every variant listed in the offset table. Yields nothing if the table
    /// does not fit.
    pub fn variants(self) -> impl Iterator<Item = Variant<'a>> + 'a {
        let data = self.0;
        self.variant_offsets()
            .into_iter()
            .flatten()
            .map(move |offset| Variant::new(data, offset as usize))
    }
}

impl<'a> Debug for ShaderBinary<'a> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("ShaderBinary")
            .field("len", &self.0.len())
            .field("header", &self.header())
            .finish()
    }
}

/// The microcode and operand descriptors shared by all variants.
#[derive(Clone, Copy)]
pub struct Program<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Program<'a> {
    /// The position of the [`DvlpHeader`] in the file.
    pub fn offset(self) -> usize {
        self.offset
    }

    pub fn header(self) -> Option<DvlpHeader> {
        read_at(self.data, self.offset)
    }

    /// The microcode, one instruction per word.
    pub fn code(self) -> Option<Table<'a, u32>> {
        let header = self.header()?;
        let offset = self.offset.checked_add(header.binary_offset as usize)?;
        table_at(self.data, offset, header.binary_size_words)
    }

    pub fn swizzle_info(self) -> Option<Table<'a, SwizzleInfo>> {
        let header = self.header()?;
        let offset = self.offset.checked_add(header.swizzle_info_offset as usize)?;
        table_at(self.data, offset, header.swizzle_info_num_entries)
    }
}

impl<'a> Debug for Program<'a> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Program")
            .field("offset", &self.offset)
            .field("header", &self.header())
            .finish()
    }
}

/// One shader variant: an entry point into the program plus its own tables.
#[derive(Clone, Copy)]
pub struct Variant<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Variant<'a> {
    fn new(data: &'a [u8], offset: usize) -> Self {
        Self { data, offset }
    }

    /// The position of the [`DvleHeader`] in the file.
    pub fn offset(self) -> usize {
        self.offset
    }

    pub fn header(self) -> Option<DvleHeader> {
        read_at(self.data, self.offset)
    }

    pub fn constants(self) -> Option<Table<'a, ConstantInfo>> {
        self.table(self.header()?.constant_table)
    }

    pub fn labels(self) -> Option<Table<'a, LabelInfo>> {
        self.table(self.header()?.label_table)
    }

    pub fn output_registers(self) -> Option<Table<'a, OutputRegisterInfo>> {
        self.table(self.header()?.output_register_table)
    }

    pub fn uniforms(self) -> Option<Table<'a, UniformInfo>> {
        self.table(self.header()?.uniform_table)
    }

    /// The raw symbol table, a run of NUL-terminated strings.
    pub fn symbols(self) -> Option<&'a [u8]> {
        let location = self.header()?.symbol_table;
        let start = self.offset.checked_add(location.offset as usize)?;
        let end = start.checked_add(location.count as usize)?;
        let symbols = self.data.get(start..end);
        if symbols.is_none() {
            debug!(
                "symbol table {start:#x}..{end:#x} lies outside a {:#x} byte buffer",
                self.data.len()
            );
        }
        symbols
    }

    /// The string starting `offset` bytes into the symbol table.
    ///
    /// Returns `None` if the offset is outside the table, the string is not
    /// terminated before the end of the table, or it is not UTF-8.
    pub fn symbol(self, offset: u32) -> Option<&'a str> {
        let symbols = self.symbols()?;
        let Some(tail) = symbols.get(offset as usize..) else {
            debug!("symbol offset {offset:#x} is past the end of the symbol table");
            return None;
        };
        let Some(len) = tail.iter().position(|&byte| byte == 0) else {
            debug!("symbol at {offset:#x} is not NUL-terminated");
            return None;
        };
        core::str::from_utf8(&tail[..len]).ok()
    }

    pub fn label_name(self, label: &LabelInfo) -> Option<&'a str> {
        self.symbol(label.name_offset)
    }

    pub fn uniform_name(self, uniform: &UniformInfo) -> Option<&'a str> {
        self.symbol(uniform.symbol_offset)
    }

    fn table<T: Record>(self, location: TableLocation) -> Option<Table<'a, T>> {
        let offset = self.offset.checked_add(location.offset as usize)?;
        table_at(self.data, offset, location.count)
    }
}

impl<'a> Debug for Variant<'a> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Variant")
            .field("offset", &self.offset)
            .field("header", &self.header())
            .finish()
    }
}

/// A packed array of records inside the file.
///
/// Entries are read by value, so the table works at any alignment.
pub struct Table<'a, T> {
    bytes: &'a [u8],
    _phantom: PhantomData<&'a [T]>,
}

impl<'a, T: Record> Table<'a, T> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            _phantom: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len() / T::SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn get(&self, index: usize) -> Option<T> {
        let start = index.checked_mul(T::SIZE)?;
        self.bytes
            .get(start..)
            .and_then(|bytes| T::read_from_bytes(bytes).ok())
    }

    pub fn iter(&self) -> Iter<'a, T> {
        Iter {
            chunks: self.bytes.chunks_exact(T::SIZE),
            _phantom: PhantomData,
        }
    }

    /// Overlays the entries in place, or returns `None` if the table is not
    /// aligned for `T`.
    ///
    /// The entries are in file byte order, so multi-byte fields are only
    /// meaningful on a little-endian host.
    pub fn as_slice(&self) -> Option<&'a [T]> {
        bytemuck::try_cast_slice(self.bytes).ok()
    }
}

impl<'a, T> Clone for Table<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Table<'a, T> {}

impl<'a, T: Record + Debug> Debug for Table<'a, T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T: Record> IntoIterator for Table<'a, T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Iterator over the entries of a [`Table`].
pub struct Iter<'a, T> {
    chunks: ChunksExact<'a, u8>,
    _phantom: PhantomData<&'a [T]>,
}

impl<'a, T: Record> Iterator for Iter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.chunks
            .next()
            .map(|chunk| bytemuck::pod_read_unaligned::<T>(chunk).from_le())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl<'a, T: Record> ExactSizeIterator for Iter<'a, T> {}

fn read_at<T: Record>(data: &[u8], offset: usize) -> Option<T> {
    let record = data
        .get(offset..)
        .and_then(|bytes| T::read_from_bytes(bytes).ok());
    if record.is_none() {
        debug!(
            "{}-byte record at {offset:#x} lies outside a {:#x} byte buffer",
            T::SIZE,
            data.len()
        );
    }
    record
}

fn table_at<T: Record>(data: &[u8], offset: usize, count: u32) -> Option<Table<'_, T>> {
    let end = (count as usize)
        .checked_mul(T::SIZE)
        .and_then(|len| offset.checked_add(len));
    match end.and_then(|end| data.get(offset..end)) {
        Some(bytes) => {
            trace!("{count} table entries at {offset:#x}");
            Some(Table::new(bytes))
        }
        None => {
            debug!(
                "table of {count} {}-byte entries at {offset:#x} lies outside a {:#x} byte buffer",
                T::SIZE,
                data.len()
            );
            None
        }
    }
}
