//! This module contains the implementation for an in-memory DICOM data set.
//!
//! Primitive values are held in little endian,
//! whichever transfer syntax they were read from.
use crate::file::OpenFileOptions;
use crate::handler::InMemHandler;
use crate::{
    AccessByNameError, AccessError, BuildMetaTableSnafu, FileDicomObject,
    NoSuchAttributeNameSnafu, NoSuchDataElementTagSnafu, ReadDataSetSnafu, ReadError,
    WriteDataSetSnafu, WriteError,
};
use dicomio_core::dictionary::{DataDictionary, DataDictionaryEntry};
use dicomio_core::header::Length;
use dicomio_core::{Tag, Value, VR};
use dicomio_dictionary_std::StandardDataDictionary;
use dicomio_parser::dataset::write::{DicomOutputStream, EncodeOptions, WriteDataSet};
use dicomio_parser::{DicomInputStream, FileMetaTableBuilder};
use snafu::{OptionExt, ResultExt};
use std::collections::BTreeMap;
use std::io::{Read, Write};

/// A full in-memory DICOM data element.
#[derive(Debug, Clone, PartialEq)]
pub struct InMemElement {
    tag: Tag,
    vr: VR,
    value: Value<InMemDataSet>,
}

impl InMemElement {
    /// Create a data element from its parts.
    pub fn new(tag: Tag, vr: VR, value: impl Into<Value<InMemDataSet>>) -> Self {
        InMemElement {
            tag,
            vr,
            value: value.into(),
        }
    }

    /// Create a text element, the text being taken as is.
    pub fn text(tag: Tag, vr: VR, text: &str) -> Self {
        Self::new(tag, vr, Value::Primitive(text.as_bytes().to_vec()))
    }

    /// Create a sequence element.
    pub fn sequence(tag: Tag, items: Vec<InMemDataSet>) -> Self {
        Self::new(tag, VR::SQ, Value::Sequence(items))
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn vr(&self) -> VR {
        self.vr
    }

    pub fn value(&self) -> &Value<InMemDataSet> {
        &self.value
    }

    pub fn into_value(self) -> Value<InMemDataSet> {
        self.value
    }

    /// The value as text without trailing padding,
    /// if it is a primitive UTF-8 value.
    pub fn to_str(&self) -> Option<&str> {
        self.value.to_str()
    }

    /// The items of a sequence element.
    pub fn items(&self) -> Option<&[InMemDataSet]> {
        self.value.items()
    }
}

/// A DICOM data set fully contained in memory,
/// keyed by tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemDataSet {
    entries: BTreeMap<Tag, InMemElement>,
}

impl InMemDataSet {
    /// Create an empty data set.
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Create a data set from a sequence of elements.
    /// Later elements replace earlier ones with the same tag.
    pub fn from_element_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = InMemElement>,
    {
        iter.into_iter().collect()
    }

    /// Read the root data set of a stream,
    /// after its file meta group if any.
    pub fn read_dataset<R: Read>(dis: &mut DicomInputStream<R>) -> Result<Self, ReadError> {
        let mut handler = InMemHandler::new();
        dis.read_dataset(&mut handler, Length::UNDEFINED, None)
            .context(ReadDataSetSnafu)?;
        Ok(handler.into_dataset())
    }

    /// Read a data set from a file or a bare data set stream
    /// with the given options, discarding any file meta group.
    pub fn read_with_options<R: Read>(
        from: R,
        options: &OpenFileOptions,
    ) -> Result<Self, ReadError> {
        let mut dis = DicomInputStream::with_options(from, options.input().clone())
            .context(ReadDataSetSnafu)?;
        let mut handler = InMemHandler::new();
        dis.read_dataset(&mut handler, Length::UNDEFINED, options.stop_tag())
            .context(ReadDataSetSnafu)?;
        Ok(handler.into_dataset())
    }

    /// The number of elements at the root of the data set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retrieve a particular element by its tag.
    pub fn element(&self, tag: Tag) -> Result<&InMemElement, AccessError> {
        self.entries
            .get(&tag)
            .context(NoSuchDataElementTagSnafu { tag })
    }

    /// Retrieve a particular element by its tag, if present.
    pub fn element_opt(&self, tag: Tag) -> Option<&InMemElement> {
        self.entries.get(&tag)
    }

    /// Retrieve a particular element by its keyword,
    /// as known by the standard dictionary.
    pub fn element_by_name(&self, name: &str) -> Result<&InMemElement, AccessByNameError> {
        let tag = StandardDataDictionary
            .by_name(name)
            .map(|entry| entry.tag())
            .context(NoSuchAttributeNameSnafu { name })?;
        self.element(tag)
            .map_err(|e| e.into_access_by_name(name))
    }

    /// Insert an element, replacing and returning
    /// any previous element with the same tag.
    pub fn put(&mut self, elt: InMemElement) -> Option<InMemElement> {
        self.entries.insert(elt.tag, elt)
    }

    /// Remove an element by its tag.
    /// Returns whether it was present.
    pub fn remove_element(&mut self, tag: Tag) -> bool {
        self.entries.remove(&tag).is_some()
    }

    /// Remove and return an element by its tag.
    pub fn take_element(&mut self, tag: Tag) -> Result<InMemElement, AccessError> {
        self.entries
            .remove(&tag)
            .context(NoSuchDataElementTagSnafu { tag })
    }

    /// Iterate over the elements in ascending tag order.
    pub fn iter(&self) -> impl Iterator<Item = &InMemElement> {
        self.entries.values()
    }

    /// Write the data set alone, without file meta group,
    /// in the given transfer syntax.
    pub fn write_dataset_with_ts<W: Write>(
        &self,
        to: W,
        uid: &str,
        options: EncodeOptions,
    ) -> Result<W, WriteError> {
        let mut out = DicomOutputStream::new(to, uid)
            .context(WriteDataSetSnafu)?
            .with_options(options);
        out.write_dataset(self).context(WriteDataSetSnafu)?;
        out.finish().context(WriteDataSetSnafu)
    }

    /// Attach a file meta group to the data set.
    ///
    /// The SOP class and instance UIDs
    /// are taken from the data set when not given to the builder.
    pub fn with_meta(
        self,
        mut meta: FileMetaTableBuilder,
    ) -> Result<FileDicomObject<InMemDataSet>, WriteError> {
        if let Some(uid) = self
            .element_opt(dicomio_dictionary_std::tags::SOP_CLASS_UID)
            .and_then(InMemElement::to_str)
        {
            meta = meta.media_storage_sop_class_uid_if_missing(uid);
        }
        if let Some(uid) = self
            .element_opt(dicomio_dictionary_std::tags::SOP_INSTANCE_UID)
            .and_then(InMemElement::to_str)
        {
            meta = meta.media_storage_sop_instance_uid_if_missing(uid);
        }
        let meta = meta.build().context(BuildMetaTableSnafu)?;
        Ok(FileDicomObject::new(meta, self))
    }
}

impl WriteDataSet for InMemDataSet {
    fn elements(&self) -> Box<dyn Iterator<Item = (Tag, VR, &Value<Self>)> + '_> {
        Box::new(self.entries.values().map(|e| (e.tag, e.vr, &e.value)))
    }
}

impl FromIterator<InMemElement> for InMemDataSet {
    fn from_iter<T: IntoIterator<Item = InMemElement>>(iter: T) -> Self {
        InMemDataSet {
            entries: iter.into_iter().map(|e| (e.tag, e)).collect(),
        }
    }
}

impl Extend<InMemElement> for InMemDataSet {
    fn extend<T: IntoIterator<Item = InMemElement>>(&mut self, iter: T) {
        self.entries.extend(iter.into_iter().map(|e| (e.tag, e)));
    }
}

impl<'a> IntoIterator for &'a InMemDataSet {
    type Item = &'a InMemElement;
    type IntoIter = std::collections::btree_map::Values<'a, Tag, InMemElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

impl IntoIterator for InMemDataSet {
    type Item = InMemElement;
    type IntoIter = std::collections::btree_map::IntoValues<Tag, InMemElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}
