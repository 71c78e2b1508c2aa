//! Implicit VR Little Endian syntax transfer implementation

use crate::decode::{
    BadSequenceHeaderSnafu, Decode, ReadHeaderTagSnafu, ReadItemHeaderSnafu, ReadLengthSnafu,
    ReadTagSnafu, Result,
};
use byteordered::byteorder::{ByteOrder, LittleEndian};
use dicomio_core::dictionary::DataDictionary;
use dicomio_core::header::{DataElementHeader, Length, SequenceItemHeader};
use dicomio_core::{Tag, VR};
use dicomio_dictionary_std::StandardDataDictionary;
use snafu::ResultExt;
use std::io::Read;

/// A data element decoder for the Implicit VR Little Endian transfer syntax.
///
/// The value representation of each element
/// is looked up in a data element dictionary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImplicitVRLittleEndianDecoder<D = StandardDataDictionary> {
    dict: D,
}

impl<D> ImplicitVRLittleEndianDecoder<D> {
    /// Create a decoder which looks up value representations
    /// in the given dictionary.
    pub fn with_dict(dict: D) -> Self {
        ImplicitVRLittleEndianDecoder { dict }
    }
}

impl<D> Decode for ImplicitVRLittleEndianDecoder<D>
where
    D: DataDictionary,
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
        let mut buf = [0u8; 4];
        source.read_exact(&mut buf).context(ReadHeaderTagSnafu)?;
        let tag = Tag(
            LittleEndian::read_u16(&buf[0..2]),
            LittleEndian::read_u16(&buf[2..4]),
        );

        source.read_exact(&mut buf).context(ReadLengthSnafu)?;
        let len = LittleEndian::read_u32(&buf);

        let vr = if tag.group() == 0xFFFE {
            VR::UN
        } else {
            vr_of(tag, None)
        };
        Ok((DataElementHeader::new(tag, vr, Length(len)), 8))
    }

    fn decode_header<S>(&self, source: &mut S) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read,
    {
        self.decode_header_with(source, |tag, _| self.dict.vr_of(tag, None))
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

#[cfg(test)]
mod tests {
    use super::ImplicitVRLittleEndianDecoder;
    use crate::decode::Decode;
    use dicomio_core::dictionary::stub::StubDataDictionary;
    use dicomio_core::header::{HasLength, Header, Length};
    use dicomio_core::{Tag, VR};
    use std::io::Cursor;

    #[rustfmt::skip]
    const RAW: &[u8] = &[
        0x10, 0x00, 0x10, 0x00,     // (0010,0010) Patient's Name
            0x08, 0x00, 0x00, 0x00, // Length: 8
                b'D', b'O', b'E', b'^', b'J', b'O', b'H', b'N',
        0xE0, 0x7F, 0x10, 0x00,     // (7FE0,0010) Pixel Data
            0x04, 0x00, 0x00, 0x00, // Length: 4
                0x01, 0x02, 0x03, 0x04,
        0x09, 0x00, 0x10, 0x10,     // (0009,1010) unknown private element
            0x02, 0x00, 0x00, 0x00, // Length: 2
                0x00, 0x00,
    ];

    #[test]
    fn decode_with_standard_dictionary() {
        let dec: ImplicitVRLittleEndianDecoder = ImplicitVRLittleEndianDecoder::default();
        let mut cursor = Cursor::new(RAW);

        let (elem, bytes_read) = dec.decode_header(&mut cursor).unwrap();
        assert_eq!(elem.tag(), Tag(0x0010, 0x0010));
        assert_eq!(elem.vr(), VR::PN);
        assert_eq!(elem.length(), Length(8));
        assert_eq!(bytes_read, 8);

        cursor.set_position(16);
        let (elem, _) = dec.decode_header(&mut cursor).unwrap();
        assert_eq!(elem.tag(), Tag(0x7FE0, 0x0010));
        assert_eq!(elem.vr(), VR::OW);

        cursor.set_position(28);
        let (elem, _) = dec.decode_header(&mut cursor).unwrap();
        assert_eq!(elem.vr(), VR::UN);
        assert_eq!(elem.length(), Length(2));
    }

    #[test]
    fn decode_with_custom_resolution() {
        let dec = ImplicitVRLittleEndianDecoder::with_dict(StubDataDictionary);
        let mut cursor = Cursor::new(RAW);
        let (elem, _) = dec.decode_header(&mut cursor).unwrap();
        assert_eq!(elem.vr(), VR::UN);

        cursor.set_position(28);
        let (elem, _) = dec
            .decode_header_with(&mut cursor, |tag, code| {
                assert_eq!(code, None);
                if tag == Tag(0x0009, 0x1010) {
                    VR::US
                } else {
                    VR::UN
                }
            })
            .unwrap();
        assert_eq!(elem.vr(), VR::US);
    }
}
