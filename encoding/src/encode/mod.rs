//! This module contains all DICOM data element header encoding logic.
//!
//! Encoders write element headers, item headers and delimiters.
//! Values are written by the caller,
//! already in the byte order of the encoder.

use byteordered::Endianness;
use dicomio_core::header::DataElementHeader;
use dicomio_core::{Tag, VR};
use snafu::{Backtrace, Snafu};
use std::io::{self, Write};

mod explicit_be;
mod explicit_le;
mod implicit_le;

pub use self::explicit_be::ExplicitVRBigEndianEncoder;
pub use self::explicit_le::ExplicitVRLittleEndianEncoder;
pub use self::implicit_le::ImplicitVRLittleEndianEncoder;

/// Module-level error type:
/// for errors which may occur while encoding DICOM data.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to write tag"))]
    WriteTag {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write element header"))]
    WriteHeader {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write item header"))]
    WriteItemHeader {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write item delimiter"))]
    WriteItemDelimiter {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write sequence delimiter"))]
    WriteSequenceDelimiter {
        backtrace: Backtrace,
        source: io::Error,
    },
}

/// Type alias for a result from this module.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The value representation to state in an explicit VR header
/// for a value of the given length.
///
/// Short-form representations cannot hold a length over `0xFFFF`,
/// so such values are written as `UN` instead.
#[inline]
pub fn header_vr(vr: VR, len: u32) -> VR {
    if !vr.has_long_header() && len > 0xFFFF {
        VR::UN
    } else {
        vr
    }
}

/// The length in bytes of an element header
/// holding a value of the given representation and length.
#[inline]
pub fn element_header_len(explicit_vr: bool, vr: VR, len: u32) -> u32 {
    if explicit_vr {
        header_vr(vr, len).explicit_header_len()
    } else {
        8
    }
}

/// Type trait for an encoder of DICOM element headers
/// in a particular element encoding.
pub trait Encode {
    /// The byte order of the encoded headers,
    /// which is also the byte order expected of values.
    fn endianness(&self) -> Endianness;

    /// Whether element headers state the value representation.
    fn is_explicit_vr(&self) -> bool;

    /// Encode and write an element tag.
    fn encode_tag<W>(&self, to: W, tag: Tag) -> Result<()>
    where
        W: Write;

    /// Encode and write a data element header to the given destination.
    /// Returns the number of bytes effectively written on success.
    ///
    /// In explicit VR, a short-form representation
    /// with a length over `0xFFFF` is written as `UN`.
    fn encode_element_header<W>(&self, to: W, de: DataElementHeader) -> Result<usize>
    where
        W: Write;

    /// Encode and write a DICOM sequence item header to the given destination.
    fn encode_item_header<W>(&self, to: W, len: u32) -> Result<()>
    where
        W: Write;

    /// Encode and write a DICOM sequence item delimiter to the given destination.
    fn encode_item_delimiter<W>(&self, to: W) -> Result<()>
    where
        W: Write;

    /// Encode and write a DICOM sequence delimiter to the given destination.
    fn encode_sequence_delimiter<W>(&self, to: W) -> Result<()>
    where
        W: Write;
}

impl<'a, T: ?Sized> Encode for &'a T
where
    T: Encode,
{
    fn endianness(&self) -> Endianness {
        (**self).endianness()
    }

    fn is_explicit_vr(&self) -> bool {
        (**self).is_explicit_vr()
    }

    fn encode_tag<W>(&self, to: W, tag: Tag) -> Result<()>
    where
        W: Write,
    {
        (**self).encode_tag(to, tag)
    }

    fn encode_element_header<W>(&self, to: W, de: DataElementHeader) -> Result<usize>
    where
        W: Write,
    {
        (**self).encode_element_header(to, de)
    }

    fn encode_item_header<W>(&self, to: W, len: u32) -> Result<()>
    where
        W: Write,
    {
        (**self).encode_item_header(to, len)
    }

    fn encode_item_delimiter<W>(&self, to: W) -> Result<()>
    where
        W: Write,
    {
        (**self).encode_item_delimiter(to)
    }

    fn encode_sequence_delimiter<W>(&self, to: W) -> Result<()>
    where
        W: Write,
    {
        (**self).encode_sequence_delimiter(to)
    }
}

/// A header encoder for any of the native element encodings,
/// chosen at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyEncoder {
    /// Implicit VR Little Endian
    ImplicitVRLittleEndian(ImplicitVRLittleEndianEncoder),
    /// Explicit VR Little Endian
    ExplicitVRLittleEndian(ExplicitVRLittleEndianEncoder),
    /// Explicit VR Big Endian
    ExplicitVRBigEndian(ExplicitVRBigEndianEncoder),
}

impl AnyEncoder {
    /// Obtain the encoder for the given element encoding.
    ///
    /// Returns `None` for implicit VR big endian.
    pub fn new(explicit_vr: bool, big_endian: bool) -> Option<Self> {
        match (explicit_vr, big_endian) {
            (false, false) => Some(AnyEncoder::ImplicitVRLittleEndian(Default::default())),
            (true, false) => Some(AnyEncoder::ExplicitVRLittleEndian(Default::default())),
            (true, true) => Some(AnyEncoder::ExplicitVRBigEndian(Default::default())),
            (false, true) => None,
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $e:ident => $x:expr) => {
        match $self {
            AnyEncoder::ImplicitVRLittleEndian($e) => $x,
            AnyEncoder::ExplicitVRLittleEndian($e) => $x,
            AnyEncoder::ExplicitVRBigEndian($e) => $x,
        }
    };
}

impl Encode for AnyEncoder {
    fn endianness(&self) -> Endianness {
        dispatch!(self, e => e.endianness())
    }

    fn is_explicit_vr(&self) -> bool {
        dispatch!(self, e => e.is_explicit_vr())
    }

    fn encode_tag<W>(&self, to: W, tag: Tag) -> Result<()>
    where
        W: Write,
    {
        dispatch!(self, e => e.encode_tag(to, tag))
    }

    fn encode_element_header<W>(&self, to: W, de: DataElementHeader) -> Result<usize>
    where
        W: Write,
    {
        dispatch!(self, e => e.encode_element_header(to, de))
    }

    fn encode_item_header<W>(&self, to: W, len: u32) -> Result<()>
    where
        W: Write,
    {
        dispatch!(self, e => e.encode_item_header(to, len))
    }

    fn encode_item_delimiter<W>(&self, to: W) -> Result<()>
    where
        W: Write,
    {
        dispatch!(self, e => e.encode_item_delimiter(to))
    }

    fn encode_sequence_delimiter<W>(&self, to: W) -> Result<()>
    where
        W: Write,
    {
        dispatch!(self, e => e.encode_sequence_delimiter(to))
    }
}
