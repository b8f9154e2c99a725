//! Memory layouts for DVLB shader binaries, the container format holding
//! compiled microcode for the PICA200 GPU.
//!
//! A DVLB file starts with a [`DvlbHeader`] and a table of offsets, one per
//! shader variant. A single [`DvlpHeader`] follows the offset table and locates
//! the microcode shared by every variant. Each variant begins with a
//! [`DvleHeader`] locating its own tables of [`ConstantInfo`], [`LabelInfo`],
//! [`OutputRegisterInfo`] and [`UniformInfo`] entries, plus a table of
//! NUL-terminated symbol strings.
//!
//! Every record is a `#[repr(C)]` [`Pod`](bytemuck::Pod) type with the exact
//! size of its on-disk form. Packed words are interpreted through [`bitview`]
//! descriptors. The [`binary`] module navigates a whole file held in memory.
//!
//! # Byte order
//!
//! Files are little-endian. [`Record::read_from_bytes`] and the [`binary`]
//! navigator convert to the host's representation; [`Record::ref_from_bytes`]
//! overlays the bytes as they are, which is exact only on little-endian hosts.
//!
//! # Features
//!
//! - `std` (default): [`write::WriteTo`] for serializing records, and
//!   [`std::error::Error`] for [`LayoutError`]. Without it the crate is
//!   `no_std`.

#![cfg_attr(not(feature = "std"), no_std)]

use core::mem::size_of;

use bytemuck::Pod;

pub mod binary;
mod constant;
mod error;
mod header;
mod label;
mod output;
mod swizzle;
mod uniform;
#[cfg(feature = "std")]
pub mod write;

pub use constant::{ConstantInfo, ConstantType, ConstantValue, Float24};
pub use error::LayoutError;
pub use header::{DvlbHeader, DvleHeader, DvlpHeader, ShaderType, TableLocation};
pub use label::LabelInfo;
pub use output::{OutputRegisterInfo, OutputSemantic};
pub use swizzle::SwizzleInfo;
pub use uniform::{RegisterType, UniformInfo};

/// Fixed-size records that appear at known offsets or as table entries in a
/// shader binary.
pub trait Record: Pod {
    /// The record's size in bytes. Tables are packed arrays of records of this
    /// size.
    const SIZE: usize = size_of::<Self>();

    /// Converts a record loaded byte-for-byte from little-endian data into host
    /// representation.
    ///
    /// This is the identity on little-endian hosts.
    #[must_use]
    fn from_le(self) -> Self;

    /// Overlays a record on the start of `bytes` without copying.
    ///
    /// The bytes are used as-is, so multi-byte fields are only meaningful on a
    /// little-endian host.
    fn ref_from_bytes(bytes: &[u8]) -> Result<&Self, LayoutError> {
        let bytes = prefix::<Self>(bytes)?;
        bytemuck::try_from_bytes(bytes).map_err(|_| LayoutError::Misaligned)
    }

    /// Reads a record from the start of `bytes`, which need not be aligned, and
    /// converts it into host representation.
    fn read_from_bytes(bytes: &[u8]) -> Result<Self, LayoutError> {
        let bytes = prefix::<Self>(bytes)?;
        Ok(bytemuck::pod_read_unaligned::<Self>(bytes).from_le())
    }
}

fn prefix<T: Record>(bytes: &[u8]) -> Result<&[u8], LayoutError> {
    bytes.get(..T::SIZE).ok_or(LayoutError::TooShort {
        needed: T::SIZE,
        available: bytes.len(),
    })
}

impl Record for u32 {
    fn from_le(self) -> Self {
        u32::from_le(self)
    }
}
