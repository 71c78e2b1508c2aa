//! Explicit VR Big Endian syntax transfer implementation

use crate::decode::{
    BadSequenceHeaderSnafu, Decode, ReadHeaderTagSnafu, ReadItemHeaderSnafu, ReadItemLengthSnafu,
    ReadLengthSnafu, ReadReservedSnafu, ReadTagSnafu, ReadVrSnafu, Result,
};
use byteordered::byteorder::{BigEndian, ByteOrder};
use dicomio_core::header::{DataElementHeader, Length, SequenceItemHeader};
use dicomio_core::{Tag, VR};
use snafu::ResultExt;
use std::io::Read;

/// A data element decoder for the Explicit VR Big Endian transfer syntax.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExplicitVRBigEndianDecoder;

impl Decode for ExplicitVRBigEndianDecoder {
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
            BigEndian::read_u16(&buf[0..2]),
            BigEndian::read_u16(&buf[2..4]),
        );

        if tag.group() == 0xFFFE {
            // item delimiters do not have VR or reserved field
            source.read_exact(&mut buf).context(ReadItemLengthSnafu)?;
            let len = BigEndian::read_u32(&buf);
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
            let len = BigEndian::read_u32(&buf);
            Ok((DataElementHeader::new(tag, vr, Length(len)), 12))
        } else {
            source.read_exact(&mut buf[0..2]).context(ReadLengthSnafu)?;
            let len = u32::from(BigEndian::read_u16(&buf[0..2]));
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
        let group = BigEndian::read_u16(&buf[0..2]);
        let element = BigEndian::read_u16(&buf[2..4]);
        let len = BigEndian::read_u32(&buf[4..8]);

        SequenceItemHeader::new((group, element), Length(len)).context(BadSequenceHeaderSnafu)
    }

    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read,
    {
        let mut buf = [0u8; 4];
        source.read_exact(&mut buf).context(ReadTagSnafu)?;
        Ok(Tag(
            BigEndian::read_u16(&buf[0..2]),
            BigEndian::read_u16(&buf[2..4]),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::ExplicitVRBigEndianDecoder;
    use crate::decode::Decode;
    use dicomio_core::header::{HasLength, Header, Length, SequenceItemHeader};
    use dicomio_core::{Tag, VR};
    use std::io::{Cursor, Read};

    #[rustfmt::skip]
    const RAW: &[u8] = &[
        0x00, 0x28, 0x00, 0x10,     // (0028,0010) (BE) Rows
            b'U', b'S',             // VR: US
            0x00, 0x02,             // Length: 2 (BE)
                0x02, 0x00,         // 512 (BE)
        0x00, 0x08, 0x11, 0x40,     // (0008,1140) (BE) Referenced Image Sequence
            b'S', b'Q',             // VR: SQ
            0x00, 0x00,             // reserved
            0x00, 0x00, 0x00, 0x10, // Length: 16 (BE)
        0xFF, 0xFE, 0xE0, 0x00,     // Item
            0x00, 0x00, 0x00, 0x08, // Length: 8 (BE)
    ];

    #[test]
    fn decode_data_elements() {
        let dec = ExplicitVRBigEndianDecoder;
        let mut cursor = Cursor::new(RAW);

        let (elem, bytes_read) = dec.decode_header(&mut cursor).unwrap();
        assert_eq!(elem.tag(), Tag(0x0028, 0x0010));
        assert_eq!(elem.vr(), VR::US);
        assert_eq!(elem.length(), Length(2));
        assert_eq!(bytes_read, 8);
        let mut value = [0u8; 2];
        cursor.read_exact(&mut value).unwrap();
        assert_eq!(u16::from_be_bytes(value), 512);

        let (elem, bytes_read) = dec.decode_header(&mut cursor).unwrap();
        assert_eq!(elem.tag(), Tag(0x0008, 0x1140));
        assert_eq!(elem.vr(), VR::SQ);
        assert_eq!(elem.length(), Length(16));
        assert_eq!(bytes_read, 12);

        let item = dec.decode_item_header(&mut cursor).unwrap();
        assert_eq!(item, SequenceItemHeader::Item { len: Length(8) });
    }
}
