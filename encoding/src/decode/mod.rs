//! This module contains all DICOM data element header decoding logic.
//!
//! Decoders read element headers, item headers and delimiters
//! from a byte source.
//! Values are not decoded here:
//! after a header is read,
//! the source points at the value field,
//! which the caller reads or skips as necessary.

use dicomio_core::header::{DataElementHeader, SequenceItemHeader};
use dicomio_core::{Tag, VR};
use snafu::{Backtrace, Snafu};
use std::io::{self, Read};

mod explicit_be;
mod explicit_le;
mod implicit_le;

pub use self::explicit_be::ExplicitVRBigEndianDecoder;
pub use self::explicit_le::ExplicitVRLittleEndianDecoder;
pub use self::implicit_le::ImplicitVRLittleEndianDecoder;

/// Module-level error type:
/// for errors which may occur while decoding DICOM data.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to read the beginning (tag) of the header"))]
    ReadHeaderTag {
        backtrace: Option<Backtrace>,
        source: io::Error,
    },
    #[snafu(display("Failed to read the item header"))]
    ReadItemHeader {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to read the header's item length field"))]
    ReadItemLength {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to read the header's tag field"))]
    ReadTag {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to read the header's reserved bytes"))]
    ReadReserved {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to read the header's element length field"))]
    ReadLength {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to read the header's value representation"))]
    ReadVr {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Bad sequence item header"))]
    BadSequenceHeader {
        source: dicomio_core::header::SequenceItemHeaderError,
    },
}

impl Error {
    /// Whether the error was caused by the source
    /// ending before the header was complete.
    pub fn is_eof(&self) -> bool {
        use std::error::Error as _;
        self.source()
            .and_then(|e| e.downcast_ref::<io::Error>())
            .map(|e| e.kind() == io::ErrorKind::UnexpectedEof)
            .unwrap_or(false)
    }
}

/// Type alias for a result from this module.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Type trait for reading and decoding DICOM data element headers.
///
/// The specific behaviour of decoding
/// depends on the element encoding of the transfer syntax.
pub trait Decode {
    /// Fetch and decode the next data element header from the given source,
    /// using `vr_of` to resolve the value representation
    /// when it is not stated in the stream.
    ///
    /// In implicit VR, `vr_of` is called with the element tag and `None`.
    /// In explicit VR, it is only called
    /// if the stream holds an unrecognized VR code,
    /// which is passed as the second argument.
    /// The returned VR then decides the header shape.
    ///
    /// Item headers and delimiters are decoded as well,
    /// with a VR of `UN` and without calling `vr_of`.
    ///
    /// Returns the header and the exact number of bytes read from the source.
    fn decode_header_with<S, F>(
        &self,
        source: &mut S,
        vr_of: F,
    ) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read,
        F: FnOnce(Tag, Option<[u8; 2]>) -> VR;

    /// Fetch and decode the next data element header from the given source,
    /// with this decoder's default resolution of value representations.
    ///
    /// Returns the header and the exact number of bytes read from the source.
    fn decode_header<S>(&self, source: &mut S) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read;

    /// Fetch and decode the next sequence item header from the given source.
    ///
    /// It is a separate method because the value representation
    /// is always implicit when reading item headers and delimiters.
    /// At the end of this operation,
    /// the source will be pointing at the beginning of the item's data.
    fn decode_item_header<S>(&self, source: &mut S) -> Result<SequenceItemHeader>
    where
        S: ?Sized + Read;

    /// Decode a DICOM attribute tag from the given source.
    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read;
}

impl<'a, T: ?Sized> Decode for &'a T
where
    T: Decode,
{
    fn decode_header_with<S, F>(
        &self,
        source: &mut S,
        vr_of: F,
    ) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read,
        F: FnOnce(Tag, Option<[u8; 2]>) -> VR,
    {
        (**self).decode_header_with(source, vr_of)
    }

    fn decode_header<S>(&self, source: &mut S) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read,
    {
        (**self).decode_header(source)
    }

    fn decode_item_header<S>(&self, source: &mut S) -> Result<SequenceItemHeader>
    where
        S: ?Sized + Read,
    {
        (**self).decode_item_header(source)
    }

    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read,
    {
        (**self).decode_tag(source)
    }
}

/// A header decoder for any of the native element encodings,
/// chosen at run time.
///
/// Implicit VR big endian is not a valid combination,
/// so it cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyDecoder {
    /// Implicit VR Little Endian
    ImplicitVRLittleEndian(ImplicitVRLittleEndianDecoder),
    /// Explicit VR Little Endian
    ExplicitVRLittleEndian(ExplicitVRLittleEndianDecoder),
    /// Explicit VR Big Endian
    ExplicitVRBigEndian(ExplicitVRBigEndianDecoder),
}

impl AnyDecoder {
    /// Obtain the decoder for the given element encoding.
    ///
    /// Returns `None` for implicit VR big endian.
    pub fn new(explicit_vr: bool, big_endian: bool) -> Option<Self> {
        match (explicit_vr, big_endian) {
            (false, false) => Some(AnyDecoder::ImplicitVRLittleEndian(Default::default())),
            (true, false) => Some(AnyDecoder::ExplicitVRLittleEndian(Default::default())),
            (true, true) => Some(AnyDecoder::ExplicitVRBigEndian(Default::default())),
            (false, true) => None,
        }
    }

    /// Whether this decoder reads explicit VR headers.
    pub fn is_explicit_vr(&self) -> bool {
        !matches!(self, AnyDecoder::ImplicitVRLittleEndian(_))
    }

    /// Whether this decoder reads big endian headers.
    pub fn is_big_endian(&self) -> bool {
        matches!(self, AnyDecoder::ExplicitVRBigEndian(_))
    }
}

macro_rules! dispatch {
    ($self:ident, $d:ident => $e:expr) => {
        match $self {
            AnyDecoder::ImplicitVRLittleEndian($d) => $e,
            AnyDecoder::ExplicitVRLittleEndian($d) => $e,
            AnyDecoder::ExplicitVRBigEndian($d) => $e,
        }
    };
}

impl Decode for AnyDecoder {
    fn decode_header_with<S, F>(
        &self,
        source: &mut S,
        vr_of: F,
    ) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read,
        F: FnOnce(Tag, Option<[u8; 2]>) -> VR,
    {
        dispatch!(self, d => d.decode_header_with(source, vr_of))
    }

    fn decode_header<S>(&self, source: &mut S) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read,
    {
        dispatch!(self, d => d.decode_header(source))
    }

    fn decode_item_header<S>(&self, source: &mut S) -> Result<SequenceItemHeader>
    where
        S: ?Sized + Read,
    {
        dispatch!(self, d => d.decode_item_header(source))
    }

    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read,
    {
        dispatch!(self, d => d.decode_tag(source))
    }
}

/// Obtain a data element decoder for reading the data elements in a DICOM
/// file's meta information. According to the standard, these are always
/// encoded in Explicit VR Little Endian.
pub fn file_header_decoder() -> ExplicitVRLittleEndianDecoder {
    ExplicitVRLittleEndianDecoder::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicomio_core::header::{HasLength, Header, Length};
    use std::io::Cursor;

    #[test]
    fn any_decoder_combinations() {
        assert!(AnyDecoder::new(false, true).is_none());
        let d = AnyDecoder::new(true, true).unwrap();
        assert!(d.is_explicit_vr() && d.is_big_endian());
        let d = AnyDecoder::new(false, false).unwrap();
        assert!(!d.is_explicit_vr() && !d.is_big_endian());
    }

    #[test]
    fn truncated_header_is_eof() {
        let decoder = AnyDecoder::new(true, false).unwrap();
        let mut source = Cursor::new(vec![0x08, 0x00]);
        let err = decoder.decode_header(&mut source).unwrap_err();
        assert!(err.is_eof());
    }

    #[test]
    fn delimiters_have_no_vr() {
        #[rustfmt::skip]
        let raw = [
            0xFE, 0xFF, 0xDD, 0xE0, 0x00, 0x00, 0x00, 0x00,
        ];
        for explicit in [true, false] {
            let decoder = AnyDecoder::new(explicit, false).unwrap();
            let (header, len) = decoder
                .decode_header_with(&mut Cursor::new(&raw[..]), |_, _| {
                    panic!("no VR lookup for delimiters")
                })
                .unwrap();
            assert_eq!(len, 8);
            assert_eq!(header.tag(), Tag::SEQUENCE_DELIMITER);
            assert_eq!(header.vr(), VR::UN);
            assert_eq!(header.length(), Length(0));
        }
    }
}
