//! Conversion of DICOM streams between native transfer syntaxes,
//! element by element,
//! without building the data set in memory.
use crate::dataset::read::{self, DicomInputStream, ValueRead, WriteOutputSnafu as ForwardSnafu};
use crate::dataset::write::{self, DicomOutputStream, EncodeOptions};
use crate::dataset::DicomInputHandler;
use dicomio_core::header::Length;
use dicomio_core::{BulkData, Fragment, Tag, VR};
use dicomio_encoding::{byte_order, TransferSyntaxRegistry};
use snafu::{ensure, Backtrace, ResultExt, Snafu};
use std::io::{Read, Write};

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// Could not read the input stream
    ReadInput {
        #[snafu(backtrace)]
        source: read::Error,
    },
    /// Could not write the output stream
    WriteOutput {
        #[snafu(backtrace)]
        source: write::Error,
    },
    /// Cannot transcode encapsulated transfer syntax {from} to {to}
    UnsupportedTranscoding {
        from: String,
        to: String,
        backtrace: Backtrace,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

fn is_encapsulated(uid: &str) -> bool {
    TransferSyntaxRegistry
        .get(uid)
        .map(|ts| ts.is_encapsulated())
        .unwrap_or(false)
}

/// The element writing operations of an output stream,
/// so that elements can go to the output or to a group buffer alike.
trait ElementWrite {
    fn is_big_endian(&self) -> bool;
    fn is_value_big_endian(&self, vr: VR, len: u32) -> bool;
    fn write_header(&mut self, tag: Tag, vr: VR, length: Length) -> write::Result<()>;
    fn write_value_bytes(&mut self, tag: Tag, vr: VR, bytes: &[u8]) -> write::Result<()>;
    fn write_bulk_data(&mut self, tag: Tag, vr: VR, bulk: &BulkData) -> write::Result<()>;
    fn write_fragment(&mut self, tag: Tag, bytes: &[u8]) -> write::Result<()>;
    fn write_item_header(&mut self, length: Length) -> write::Result<()>;
    fn write_item_delimiter(&mut self) -> write::Result<()>;
    fn write_sequence_delimiter(&mut self) -> write::Result<()>;
}

impl<W: Write> ElementWrite for DicomOutputStream<W> {
    fn is_big_endian(&self) -> bool {
        DicomOutputStream::is_big_endian(self)
    }
    fn is_value_big_endian(&self, vr: VR, len: u32) -> bool {
        DicomOutputStream::is_value_big_endian(self, vr, len)
    }
    fn write_header(&mut self, tag: Tag, vr: VR, length: Length) -> write::Result<()> {
        DicomOutputStream::write_header(self, tag, vr, length)
    }
    fn write_value_bytes(&mut self, tag: Tag, vr: VR, bytes: &[u8]) -> write::Result<()> {
        DicomOutputStream::write_value_bytes(self, tag, vr, bytes)
    }
    fn write_bulk_data(&mut self, tag: Tag, vr: VR, bulk: &BulkData) -> write::Result<()> {
        DicomOutputStream::write_bulk_data(self, tag, vr, bulk)
    }
    fn write_fragment(&mut self, tag: Tag, bytes: &[u8]) -> write::Result<()> {
        DicomOutputStream::write_fragment(self, tag, bytes)
    }
    fn write_item_header(&mut self, length: Length) -> write::Result<()> {
        DicomOutputStream::write_item_header(self, length)
    }
    fn write_item_delimiter(&mut self) -> write::Result<()> {
        DicomOutputStream::write_item_delimiter(self)
    }
    fn write_sequence_delimiter(&mut self) -> write::Result<()> {
        DicomOutputStream::write_sequence_delimiter(self)
    }
}

/// The elements of one group of a data set, held until the group ends.
type GroupBuffer = (u16, DicomOutputStream<Vec<u8>>);

/// A handler forwarding everything it is given to an output stream.
///
/// Sequences and items are always written with undefined length,
/// so that no length needs to be known before the content is read.
/// Group length elements of the input are dropped.
/// When the output options ask for group lengths,
/// each group of each data set is held in memory
/// until its length is known.
/// Values arrive in the byte order of the output.
#[derive(Debug)]
pub struct TranscodeHandler<'w, W: Write> {
    out: &'w mut DicomOutputStream<W>,
    fragments_tag: Tag,
    group_length: bool,
    /// the open group of each nested data set, root first
    groups: Vec<Option<GroupBuffer>>,
}

impl<'w, W: Write> TranscodeHandler<'w, W> {
    pub fn new(out: &'w mut DicomOutputStream<W>) -> Self {
        let group_length = out.options().group_length;
        TranscodeHandler {
            out,
            fragments_tag: Tag(0, 0),
            group_length,
            groups: vec![None],
        }
    }

    /// Write out whatever is still held for the root data set.
    pub fn finish(mut self) -> write::Result<()> {
        self.end_group()
    }

    /// The innermost open group, or the output itself.
    fn sink(&mut self) -> &mut dyn ElementWrite {
        match self.groups.iter_mut().rev().find_map(Option::as_mut) {
            Some((_, buffer)) => buffer,
            None => &mut *self.out,
        }
    }

    /// Make sure the group of `tag` is open in the current data set.
    fn start_element(&mut self, tag: Tag) -> write::Result<()> {
        if !self.group_length {
            return Ok(());
        }
        if let Some(Some((group, _))) = self.groups.last() {
            if *group == tag.group() {
                return Ok(());
            }
        }
        self.end_group()?;
        let buffer = DicomOutputStream::with_transfer_syntax(
            Vec::new(),
            self.out.is_explicit_vr(),
            self.out.is_big_endian(),
        )?
        .with_options(*self.out.options());
        if let Some(level) = self.groups.last_mut() {
            *level = Some((tag.group(), buffer));
        }
        Ok(())
    }

    /// Write the open group of the current data set,
    /// preceded by its group length.
    fn end_group(&mut self) -> write::Result<()> {
        let Some((group, buffer)) = self.groups.last_mut().and_then(Option::take) else {
            return Ok(());
        };
        let bytes = buffer.finish()?;
        let tag = Tag(group, 0x0000);
        let sink = self.sink();
        let mut len = [0; 4];
        byte_order::uint_to_bytes(bytes.len() as u32, &mut len, 0, sink.is_big_endian());
        sink.write_header(tag, VR::UL, Length(4))?;
        sink.write_value_bytes(tag, VR::UL, &len)?;
        sink.write_value_bytes(tag, VR::UN, &bytes)
    }
}

impl<W: Write> DicomInputHandler for TranscodeHandler<'_, W> {
    fn read_value<R: Read>(&mut self, dis: &mut DicomInputStream<R>) -> read::Result<()> {
        let (tag, vr, length) = (dis.tag(), dis.vr(), dis.length());
        if tag.is_group_length() && length.is_defined() {
            return dis.skip_value();
        }
        self.start_element(tag).context(ForwardSnafu { tag })?;
        if vr == VR::SQ {
            self.sink()
                .write_header(tag, vr, Length::UNDEFINED)
                .context(ForwardSnafu { tag })?;
            dis.read_sequence(self)?;
            return self
                .sink()
                .write_sequence_delimiter()
                .context(ForwardSnafu { tag });
        }
        if length.is_undefined() {
            self.sink()
                .write_header(tag, vr, Length::UNDEFINED)
                .context(ForwardSnafu { tag })?;
            self.fragments_tag = tag;
            dis.read_fragments(self)?;
            return self
                .sink()
                .write_sequence_delimiter()
                .context(ForwardSnafu { tag });
        }
        let len = length.0 + (length.0 & 1);
        let big_endian = self.sink().is_value_big_endian(vr, len);
        match dis.read_primitive_value(big_endian)? {
            ValueRead::Bytes(bytes) => {
                let len = bytes.len() as u32;
                let sink = self.sink();
                sink.write_header(tag, vr, Length(len + (len & 1)))
                    .and_then(|_| sink.write_value_bytes(tag, vr, &bytes))
                    .context(ForwardSnafu { tag })
            }
            ValueRead::BulkData(bulk) => {
                let sink = self.sink();
                sink.write_header(tag, vr, Length(bulk.length + (bulk.length & 1)))
                    .and_then(|_| sink.write_bulk_data(tag, vr, &bulk))
                    .context(ForwardSnafu { tag })
            }
            ValueRead::Skipped => Ok(()),
        }
    }

    fn read_item<R: Read>(&mut self, dis: &mut DicomInputStream<R>) -> read::Result<()> {
        self.sink()
            .write_item_header(Length::UNDEFINED)
            .context(ForwardSnafu { tag: Tag::ITEM })?;
        self.groups.push(None);
        dis.read_item_dataset(self)?;
        self.end_group()
            .context(ForwardSnafu { tag: Tag::ITEM })?;
        self.groups.pop();
        self.sink()
            .write_item_delimiter()
            .context(ForwardSnafu {
                tag: Tag::ITEM_DELIMITER,
            })
    }

    fn read_fragment<R: Read>(&mut self, dis: &mut DicomInputStream<R>) -> read::Result<()> {
        let tag = self.fragments_tag;
        let sink = self.sink();
        match dis.read_fragment_value()? {
            Some(Fragment::Bytes(bytes)) => sink
                .write_fragment(tag, &bytes)
                .context(ForwardSnafu { tag }),
            Some(Fragment::BulkData(bulk)) => sink
                .write_item_header(Length(bulk.length + (bulk.length & 1)))
                .and_then(|_| sink.write_bulk_data(tag, VR::OB, &bulk))
                .context(ForwardSnafu { tag }),
            None => Ok(()),
        }
    }
}

/// Read a whole DICOM stream and write it again in another transfer syntax.
///
/// The file meta group, if any, is written with the new transfer syntax.
/// Encapsulated data can only be copied to the same transfer syntax.
pub fn transcode<R, W>(
    input: &mut DicomInputStream<R>,
    output: W,
    uid: &str,
    options: EncodeOptions,
) -> Result<W>
where
    R: Read,
    W: Write,
{
    let meta = input
        .read_file_meta_information()
        .context(ReadInputSnafu)?
        .cloned();
    let from = input.transfer_syntax().uid.clone();
    ensure!(
        from == uid || !(is_encapsulated(&from) || is_encapsulated(uid)),
        UnsupportedTranscodingSnafu { from, to: uid }
    );

    let mut out = DicomOutputStream::new(output, uid)
        .context(WriteOutputSnafu)?
        .with_options(options);
    if let Some(mut meta) = meta {
        meta.set_transfer_syntax(out.transfer_syntax());
        out.write_file_meta_information(&meta)
            .context(WriteOutputSnafu)?;
    }
    let mut handler = TranscodeHandler::new(&mut out);
    input
        .read_dataset(&mut handler, Length::UNDEFINED, None)
        .context(ReadInputSnafu)?;
    handler.finish().context(WriteOutputSnafu)?;
    out.finish().context(WriteOutputSnafu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::read::DicomInputOptions;
    use crate::meta::FileMetaTableBuilder;
    use dicomio_dictionary_std::{tags, uids};
    use std::io::Cursor;

    /// A part 10 file in implicit VR little endian
    /// with a nested sequence and encapsulated pixel data.
    fn implicit_input() -> Vec<u8> {
        let meta = FileMetaTableBuilder::new()
            .media_storage_sop_class_uid(uids::CT_IMAGE_STORAGE)
            .media_storage_sop_instance_uid("2.25.3")
            .transfer_syntax(uids::IMPLICIT_VR_LITTLE_ENDIAN)
            .build()
            .unwrap();
        let mut out = DicomOutputStream::new(Vec::new(), uids::IMPLICIT_VR_LITTLE_ENDIAN).unwrap();
        out.write_file_meta_information(&meta).unwrap();
        out.write_header(Tag(0x0008, 0x0000), VR::UL, Length(4)).unwrap();
        out.write_value_bytes(Tag(0x0008, 0x0000), VR::UL, &[0; 4])
            .unwrap();
        out.write_header(tags::SOP_CLASS_UID, VR::UI, Length(4)).unwrap();
        out.write_value_bytes(tags::SOP_CLASS_UID, VR::UI, b"1.2")
            .unwrap();
        out.write_header(tags::REFERENCED_IMAGE_SEQUENCE, VR::SQ, Length::UNDEFINED)
            .unwrap();
        out.write_item_header(Length(12)).unwrap();
        out.write_header(tags::REFERENCED_SOP_CLASS_UID, VR::UI, Length(4))
            .unwrap();
        out.write_value_bytes(tags::REFERENCED_SOP_CLASS_UID, VR::UI, b"1.2")
            .unwrap();
        out.write_sequence_delimiter().unwrap();
        out.write_header(tags::ROWS, VR::US, Length(2)).unwrap();
        out.write_value_bytes(tags::ROWS, VR::US, &[2, 0]).unwrap();
        out.write_header(tags::PIXEL_DATA, VR::OB, Length::UNDEFINED)
            .unwrap();
        out.write_fragment(tags::PIXEL_DATA, &[]).unwrap();
        out.write_fragment(tags::PIXEL_DATA, &[1, 2, 3, 4]).unwrap();
        out.write_sequence_delimiter().unwrap();
        out.finish().unwrap()
    }

    fn transcode_bytes(input: Vec<u8>, uid: &str) -> Vec<u8> {
        let mut dis = DicomInputStream::new(Cursor::new(input)).unwrap();
        transcode(&mut dis, Vec::new(), uid, EncodeOptions::default()).unwrap()
    }

    #[derive(Debug, Default)]
    struct Collect(Vec<(Tag, VR, Vec<u8>)>);

    impl DicomInputHandler for Collect {
        fn read_value<R: Read>(&mut self, dis: &mut DicomInputStream<R>) -> read::Result<()> {
            if dis.vr() == VR::SQ {
                return dis.read_sequence(self);
            }
            if dis.length().is_undefined() {
                return dis.read_fragments(self);
            }
            let (tag, vr) = (dis.tag(), dis.vr());
            if let ValueRead::Bytes(bytes) = dis.read_primitive_value(false)? {
                self.0.push((tag, vr, bytes));
            }
            Ok(())
        }

        fn read_fragment<R: Read>(&mut self, dis: &mut DicomInputStream<R>) -> read::Result<()> {
            if let Some(Fragment::Bytes(bytes)) = dis.read_fragment_value()? {
                self.0.push((Tag::ITEM, VR::OB, bytes));
            }
            Ok(())
        }
    }

    fn collect(bytes: Vec<u8>) -> (String, Vec<(Tag, VR, Vec<u8>)>) {
        let mut dis = DicomInputStream::new(Cursor::new(bytes)).unwrap();
        let mut collect = Collect::default();
        dis.read_dataset(&mut collect, Length::UNDEFINED, None)
            .unwrap();
        (dis.transfer_syntax().uid.clone(), collect.0)
    }

    #[test]
    fn transcode_through_big_endian() {
        let input = implicit_input();
        let (_, original) = collect(input.clone());

        let big_endian = transcode_bytes(input.clone(), uids::EXPLICIT_VR_BIG_ENDIAN);
        let (uid, elements) = collect(big_endian.clone());
        assert_eq!(uid, uids::EXPLICIT_VR_BIG_ENDIAN);
        // the group length is dropped
        let expected: Vec<_> = original
            .iter()
            .filter(|(tag, _, _)| !tag.is_group_length())
            .cloned()
            .collect();
        assert_eq!(elements, expected);
        assert!(elements.contains(&(tags::ROWS, VR::US, vec![2, 0])));
        assert!(elements.contains(&(Tag::ITEM, VR::OB, vec![1, 2, 3, 4])));

        let via_big_endian = transcode_bytes(big_endian, uids::EXPLICIT_VR_LITTLE_ENDIAN);
        let direct = transcode_bytes(input, uids::EXPLICIT_VR_LITTLE_ENDIAN);
        assert_eq!(via_big_endian, direct);
    }

    #[test]
    fn transcode_to_deflated() {
        let input = implicit_input();
        let deflated = transcode_bytes(input.clone(), uids::DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN);
        assert_eq!(deflated.len() % 2, 0);
        let (uid, elements) = collect(deflated);
        assert_eq!(uid, uids::DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN);
        let (_, original) = collect(input);
        assert_eq!(elements.len(), original.len() - 1);
    }

    #[test]
    fn encapsulated_cannot_change() {
        let meta = FileMetaTableBuilder::new()
            .media_storage_sop_class_uid(uids::CT_IMAGE_STORAGE)
            .media_storage_sop_instance_uid("2.25.3")
            .transfer_syntax(uids::JPEG_BASELINE8_BIT)
            .build()
            .unwrap();
        let mut out = DicomOutputStream::new(Vec::new(), uids::JPEG_BASELINE8_BIT).unwrap();
        out.write_file_meta_information(&meta).unwrap();
        out.write_header(tags::ROWS, VR::US, Length(2)).unwrap();
        out.write_value_bytes(tags::ROWS, VR::US, &[2, 0]).unwrap();
        let input = out.finish().unwrap();

        let mut dis =
            DicomInputStream::with_options(Cursor::new(input.clone()), DicomInputOptions::new())
                .unwrap();
        let err = transcode(
            &mut dis,
            Vec::new(),
            uids::EXPLICIT_VR_LITTLE_ENDIAN,
            EncodeOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedTranscoding { .. }));

        // copying to the same transfer syntax is fine
        let copy = transcode_bytes(input.clone(), uids::JPEG_BASELINE8_BIT);
        assert_eq!(copy, input);
    }

    fn transcode_bare(input: Vec<u8>, from: &str, to: &str, options: EncodeOptions) -> Vec<u8> {
        let mut dis =
            DicomInputStream::with_transfer_syntax(Cursor::new(input), from, DicomInputOptions::new())
                .unwrap();
        transcode(&mut dis, Vec::new(), to, options).unwrap()
    }

    #[test]
    fn group_lengths_recalculated() {
        #[rustfmt::skip]
        let input = vec![
            // (0008,0016) UI "1.2"
            0x08, 0x00, 0x16, 0x00, b'U', b'I', 4, 0, b'1', b'.', b'2', 0,
            // (0008,1140) SQ undefined length, one item
            0x08, 0x00, 0x40, 0x11, b'S', b'Q', 0, 0, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFE, 0xFF, 0x00, 0xE0, 0xFF, 0xFF, 0xFF, 0xFF,
            0x08, 0x00, 0x50, 0x11, b'U', b'I', 4, 0, b'1', b'.', b'2', 0,
            0xFE, 0xFF, 0x0D, 0xE0, 0, 0, 0, 0,
            0xFE, 0xFF, 0xDD, 0xE0, 0, 0, 0, 0,
            // (0010,0020) LO "42"
            0x10, 0x00, 0x20, 0x00, b'L', b'O', 2, 0, b'4', b'2',
        ];
        let uid = uids::EXPLICIT_VR_LITTLE_ENDIAN;
        let output = transcode_bare(
            input.clone(),
            uid,
            uid,
            EncodeOptions::new().group_length(true),
        );

        let mut expected = vec![0x08, 0x00, 0x00, 0x00, b'U', b'L', 4, 0, 72, 0, 0, 0];
        expected.extend(&input[..32]);
        // the item has its own group length
        expected.extend([0x08, 0x00, 0x00, 0x00, b'U', b'L', 4, 0, 12, 0, 0, 0]);
        expected.extend(&input[32..]);
        expected.splice(
            expected.len() - 10..expected.len() - 10,
            [0x10, 0x00, 0x00, 0x00, b'U', b'L', 4, 0, 10, 0, 0, 0],
        );
        assert_eq!(output, expected);

        // and without the option, the input is copied as is
        let output = transcode_bare(input.clone(), uid, uid, EncodeOptions::new());
        assert_eq!(output, input);
    }

    #[test]
    fn promoted_un_values_survive_big_endian() {
        let words: Vec<u8> = (0..35_000u16).flat_map(|w| w.to_le_bytes()).collect();
        let mut out = DicomOutputStream::with_transfer_syntax(Vec::new(), true, false).unwrap();
        out.write_header(tags::ROWS, VR::US, Length(words.len() as u32))
            .unwrap();
        out.write_value_bytes(tags::ROWS, VR::US, &words).unwrap();
        let input = out.finish().unwrap();
        assert_eq!(&input[4..6], b"UN");

        let big_endian = transcode_bare(
            input.clone(),
            uids::EXPLICIT_VR_LITTLE_ENDIAN,
            uids::EXPLICIT_VR_BIG_ENDIAN,
            EncodeOptions::new(),
        );
        assert_eq!(&big_endian[4..6], b"UN");
        assert_eq!(&big_endian[12..], &words[..]);

        let back = transcode_bare(
            big_endian,
            uids::EXPLICIT_VR_BIG_ENDIAN,
            uids::EXPLICIT_VR_LITTLE_ENDIAN,
            EncodeOptions::new(),
        );
        assert_eq!(back, input);
    }
}
