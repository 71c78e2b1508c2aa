//! Building in-memory data sets from a DICOM input stream.
use crate::mem::{InMemDataSet, InMemElement};
use dicomio_core::{Fragment, Value, VR};
use dicomio_parser::dataset::read::{Result, ValueRead};
use dicomio_parser::{DicomInputHandler, DicomInputStream};
use std::io::Read;
use std::mem;
use tracing::debug;

/// An input handler collecting every element it is given
/// into an [`InMemDataSet`].
///
/// Values are converted to little endian.
/// Group length elements are dropped,
/// since they are recalculated on writing.
/// Bulk data skipped by the input stream leaves no element behind.
#[derive(Debug, Default)]
pub struct InMemHandler {
    current: InMemDataSet,
    items: Vec<InMemDataSet>,
    fragments: Vec<Fragment>,
    skipped_fragments: usize,
}

impl InMemHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The root data set collected so far.
    pub fn dataset(&self) -> &InMemDataSet {
        &self.current
    }

    pub fn into_dataset(self) -> InMemDataSet {
        self.current
    }
}

impl DicomInputHandler for InMemHandler {
    fn read_value<R: Read>(&mut self, dis: &mut DicomInputStream<R>) -> Result<()> {
        let (tag, vr, length) = (dis.tag(), dis.vr(), dis.length());
        if tag.is_group_length() && length.is_defined() {
            return dis.skip_value();
        }

        if vr == VR::SQ {
            let outer = mem::take(&mut self.items);
            dis.read_sequence(self)?;
            let items = mem::replace(&mut self.items, outer);
            self.current.put(InMemElement::sequence(tag, items));
            return Ok(());
        }

        if length.is_undefined() {
            self.fragments.clear();
            self.skipped_fragments = 0;
            dis.read_fragments(self)?;
            let fragments = mem::take(&mut self.fragments);
            if fragments.is_empty() && self.skipped_fragments > 0 {
                debug!("All fragments of {} were skipped", tag);
                return Ok(());
            }
            self.current
                .put(InMemElement::new(tag, vr, Value::Fragments(fragments)));
            return Ok(());
        }

        let value = match dis.read_primitive_value(false)? {
            ValueRead::Bytes(bytes) if bytes.is_empty() => Value::Empty,
            ValueRead::Bytes(bytes) => Value::Primitive(bytes),
            ValueRead::BulkData(bulk) => Value::BulkData(bulk),
            ValueRead::Skipped => return Ok(()),
        };
        self.current.put(InMemElement::new(tag, vr, value));
        Ok(())
    }

    fn read_item<R: Read>(&mut self, dis: &mut DicomInputStream<R>) -> Result<()> {
        let parent = mem::take(&mut self.current);
        let result = dis.read_item_dataset(self);
        let item = mem::replace(&mut self.current, parent);
        result?;
        self.items.push(item);
        Ok(())
    }

    fn read_fragment<R: Read>(&mut self, dis: &mut DicomInputStream<R>) -> Result<()> {
        match dis.read_fragment_value()? {
            Some(fragment) => self.fragments.push(fragment),
            None => self.skipped_fragments += 1,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicomio_core::header::Length;
    use dicomio_core::Tag;
    use dicomio_dictionary_std::tags;
    use dicomio_parser::{DicomInputOptions, IncludeBulkData};
    use std::io::Cursor;

    fn read(bytes: Vec<u8>, options: DicomInputOptions) -> InMemDataSet {
        let mut dis = DicomInputStream::with_transfer_syntax(
            Cursor::new(bytes),
            dicomio_dictionary_std::uids::EXPLICIT_VR_LITTLE_ENDIAN,
            options,
        )
        .unwrap();
        let mut handler = InMemHandler::new();
        dis.read_dataset(&mut handler, Length::UNDEFINED, None)
            .unwrap();
        handler.into_dataset()
    }

    #[rustfmt::skip]
    fn nested() -> Vec<u8> {
        vec![
            // (0008,0000) UL 4, group length
            0x08, 0x00, 0x00, 0x00, b'U', b'L', 4, 0, 0, 0, 0, 0,
            // (0008,1140) SQ undefined length
            0x08, 0x00, 0x40, 0x11, b'S', b'Q', 0, 0, 0xFF, 0xFF, 0xFF, 0xFF,
            // item, undefined length
            0xFE, 0xFF, 0x00, 0xE0, 0xFF, 0xFF, 0xFF, 0xFF,
            // (0008,1150) UI "1.2"
            0x08, 0x00, 0x50, 0x11, b'U', b'I', 4, 0, b'1', b'.', b'2', 0,
            // item delimiter
            0xFE, 0xFF, 0x0D, 0xE0, 0, 0, 0, 0,
            // empty item of defined length
            0xFE, 0xFF, 0x00, 0xE0, 0, 0, 0, 0,
            // sequence delimiter
            0xFE, 0xFF, 0xDD, 0xE0, 0, 0, 0, 0,
            // (0010,0010) PN empty
            0x10, 0x00, 0x10, 0x00, b'P', b'N', 0, 0,
            // (0028,0010) US 512
            0x28, 0x00, 0x10, 0x00, b'U', b'S', 2, 0, 0x00, 0x02,
        ]
    }

    #[test]
    fn collects_nested_items() {
        let obj = read(nested(), DicomInputOptions::new());
        assert_eq!(obj.len(), 3);
        assert!(obj.element_opt(Tag(0x0008, 0x0000)).is_none());
        let items = obj
            .element(tags::REFERENCED_IMAGE_SEQUENCE)
            .unwrap()
            .items()
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].element(tags::REFERENCED_SOP_CLASS_UID).unwrap().to_str(),
            Some("1.2")
        );
        assert!(items[1].is_empty());
        assert_eq!(obj.element(tags::PATIENT_NAME).unwrap().value(), &Value::Empty);
        assert_eq!(
            obj.element(tags::ROWS).unwrap().value().primitive(),
            Some(&[0x00, 0x02][..])
        );
    }

    #[rustfmt::skip]
    fn encapsulated() -> Vec<u8> {
        vec![
            // (7FE0,0010) OB undefined length
            0xE0, 0x7F, 0x10, 0x00, b'O', b'B', 0, 0, 0xFF, 0xFF, 0xFF, 0xFF,
            // empty offset table
            0xFE, 0xFF, 0x00, 0xE0, 0, 0, 0, 0,
            // one fragment
            0xFE, 0xFF, 0x00, 0xE0, 4, 0, 0, 0, 1, 2, 3, 4,
            // sequence delimiter
            0xFE, 0xFF, 0xDD, 0xE0, 0, 0, 0, 0,
        ]
    }

    #[test]
    fn collects_fragments() {
        let obj = read(encapsulated(), DicomInputOptions::new());
        let fragments = obj
            .element(tags::PIXEL_DATA)
            .unwrap()
            .value()
            .fragments()
            .unwrap();
        assert_eq!(
            fragments,
            &[Fragment::Bytes(vec![]), Fragment::Bytes(vec![1, 2, 3, 4])][..]
        );
    }

    #[test]
    fn skipped_fragments_keep_offset_table() {
        let obj = read(
            encapsulated(),
            DicomInputOptions::new().include_bulk_data(IncludeBulkData::No),
        );
        // the empty offset table is kept
        let fragments = obj
            .element(tags::PIXEL_DATA)
            .unwrap()
            .value()
            .fragments()
            .unwrap();
        assert_eq!(fragments, &[Fragment::Bytes(vec![])][..]);
    }
}
