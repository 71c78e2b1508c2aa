//! Explicit VR Little Endian syntax transfer implementation

use crate::decode::{
    BadSequenceHeaderSnafu, Decode, ReadHeaderTagSnafu, ReadItemHeaderSnafu, ReadItemLengthSnafu,
    ReadLengthSnafu, ReadReservedSnafu, ReadTagSnafu, ReadVrSnafu, Result,
};
use byteordered::byteorder::{ByteOrder, LittleEndian};
use dicomio_core::header::{DataElementHeader, Length, SequenceItemHeader};
use dicomio_core::{Tag, VR};
use snafu::ResultExt;
use std::io::Read;

/// A data element decoder for the Explicit VR Little Endian transfer syntax.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExplicitVRLittleEndianDecoder;

impl Decode for ExplicitVRLittleEndianDecoder {
    fn decode_header_with<S, F>(
        &self,
        source: &mut S,
        vr_of: F,
    ) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read,
        F: FnOnce(Tag, Option<[u8; 2]>) -> VR,
    {
        let mut buf = [0u8; 4];
        source.read_exact(&mut buf).context(ReadHeaderTagSnafu)?;
        let tag = Tag(
            LittleEndian::read_u16(&buf[0..2]),
            LittleEndian::read_u16(&buf[2..4]),
        );

        if tag.group() == 0xFFFE {
            // item delimiters do not have VR or reserved field
            source.read_exact(&mut buf).context(ReadItemLengthSnafu)?;
            let len = LittleEndian::read_u32(&buf);
            return Ok((DataElementHeader::new(tag, VR::UN, Length(len)), 8));
        }

        // retrieve explicit VR
        source.read_exact(&mut buf[0..2]).context(ReadVrSnafu)?;
        let code = [buf[0], buf[1]];
        let vr = VR::from_binary(code).unwrap_or_else(|| vr_of(tag, Some(code)));

        // PS3.5 7.1.2: the length field is 16 bits
        // for the short-form VRs,
        // and 32 bits after two reserved bytes for the others
        if vr.has_long_header() {
            source
                .read_exact(&mut buf[0..2])
                .context(ReadReservedSnafu)?;
            source.read_exact(&mut buf).context(ReadLengthSnafu)?;
            let len = LittleEndian::read_u32(&buf);
            Ok((DataElementHeader::new(tag, vr, Length(len)), 12))
        } else {
            source.read_exact(&mut buf[0..2]).context(ReadLengthSnafu)?;
            let len = u32::from(LittleEndian::read_u16(&buf[0..2]));
            Ok((DataElementHeader::new(tag, vr, Length(len)), 8))
        }
    }

    fn decode_header<S>(&self, source: &mut S) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read,
    {
        self.decode_header_with(source, |_, _| VR::UN)
    }

    fn decode_item_header<S>(&self, source: &mut S) -> Result<SequenceItemHeader>
    where
        S: ?Sized + Read,
    {
        let mut buf = [0u8; 8];
        source.read_exact(&mut buf).context(ReadItemHeaderSnafu)?;
        let group = LittleEndian::read_u16(&buf[0..2]);
        let element = LittleEndian::read_u16(&buf[2..4]);
        let len = LittleEndian::read_u32(&buf[4..8]);

        SequenceItemHeader::new((group, element), Length(len)).context(BadSequenceHeaderSnafu)
    }

    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read,
    {
        let mut buf = [0u8; 4];
        source.read_exact(&mut buf).context(ReadTagSnafu)?;
        Ok(Tag(
            LittleEndian::read_u16(&buf[0..2]),
            LittleEndian::read_u16(&buf[2..4]),
        ))
    }
}
