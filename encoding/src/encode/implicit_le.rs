//! Implicit VR Little Endian syntax transfer implementation

use crate::encode::{
    Encode, Result, WriteHeaderSnafu, WriteItemDelimiterSnafu, WriteItemHeaderSnafu,
    WriteSequenceDelimiterSnafu, WriteTagSnafu,
};
use byteordered::byteorder::{ByteOrder, LittleEndian};
use byteordered::Endianness;
use dicomio_core::header::{DataElementHeader, HasLength, Header};
use dicomio_core::Tag;
use snafu::ResultExt;
use std::io::Write;

/// A concrete encoder for the transfer syntax ImplicitVRLittleEndian
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImplicitVRLittleEndianEncoder;

impl ImplicitVRLittleEndianEncoder {
    fn write_pair<W: Write>(mut to: W, tag: Tag, len: u32) -> std::io::Result<()> {
        let mut buf = [0u8; 8];
        LittleEndian::write_u16(&mut buf[0..], tag.group());
        LittleEndian::write_u16(&mut buf[2..], tag.element());
        LittleEndian::write_u32(&mut buf[4..], len);
        to.write_all(&buf)
    }
}

impl Encode for ImplicitVRLittleEndianEncoder {
    fn endianness(&self) -> Endianness {
        Endianness::Little
    }

    fn is_explicit_vr(&self) -> bool {
        false
    }

    fn encode_tag<W>(&self, mut to: W, tag: Tag) -> Result<()>
    where
        W: Write,
    {
        let mut buf = [0u8; 4];
        LittleEndian::write_u16(&mut buf[..], tag.group());
        LittleEndian::write_u16(&mut buf[2..], tag.element());
        to.write_all(&buf).context(WriteTagSnafu)
    }

    fn encode_element_header<W>(&self, to: W, de: DataElementHeader) -> Result<usize>
    where
        W: Write,
    {
        Self::write_pair(to, de.tag(), de.length().0).context(WriteHeaderSnafu)?;
        Ok(8)
    }

    fn encode_item_header<W>(&self, to: W, len: u32) -> Result<()>
    where
        W: Write,
    {
        Self::write_pair(to, Tag::ITEM, len).context(WriteItemHeaderSnafu)
    }

    fn encode_item_delimiter<W>(&self, to: W) -> Result<()>
    where
        W: Write,
    {
        Self::write_pair(to, Tag::ITEM_DELIMITER, 0).context(WriteItemDelimiterSnafu)
    }

    fn encode_sequence_delimiter<W>(&self, to: W) -> Result<()>
    where
        W: Write,
    {
        Self::write_pair(to, Tag::SEQUENCE_DELIMITER, 0).context(WriteSequenceDelimiterSnafu)
    }
}

#[cfg(test)]
mod tests {
    use super::ImplicitVRLittleEndianEncoder;
    use crate::encode::Encode;
    use dicomio_core::header::{DataElementHeader, Length};
    use dicomio_core::{Tag, VR};

    #[test]
    fn encode_data_elements() {
        let enc = ImplicitVRLittleEndianEncoder;
        let mut out = Vec::new();
        let written = enc
            .encode_element_header(
                &mut out,
                DataElementHeader::new(Tag(0x0010, 0x0010), VR::PN, Length(8)),
            )
            .unwrap();
        assert_eq!(written, 8);
        // the VR is never written, even for long values
        enc.encode_element_header(
            &mut out,
            DataElementHeader::new(Tag(0x0010, 0x4000), VR::LT, Length(0x1_0000)),
        )
        .unwrap();
        enc.encode_sequence_delimiter(&mut out).unwrap();
        #[rustfmt::skip]
        let expected = [
            0x10, 0x00, 0x10, 0x00, 0x08, 0x00, 0x00, 0x00,
            0x10, 0x00, 0x00, 0x40, 0x00, 0x00, 0x01, 0x00,
            0xFE, 0xFF, 0xDD, 0xE0, 0x00, 0x00, 0x00, 0x00,
        ];
        assert_eq!(&out[..], &expected);
    }
}
