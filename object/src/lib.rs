#![allow(clippy::derive_partial_eq_without_eq)]
//! This crate contains a high-level abstraction for reading and manipulating
//! DICOM objects.
//! At this level, objects are comparable to a dictionary of elements,
//! in which some of them can have DICOM objects themselves.
//!
//! Loading a DICOM file can be done with ease via the function [`open_file`].
//! For additional file reading options, use [`OpenFileOptions`].
//! New DICOM instances can be built from scratch using [`InMemDataSet`]
//! (see the [`mem`] module for more details).
//!
//! # Examples
//!
//! Read an object and fetch some attributes:
//!
//! ```no_run
//! use dicomio_dictionary_std::tags;
//! use dicomio_object::open_file;
//! # fn foo() -> Result<(), Box<dyn std::error::Error>> {
//! let obj = open_file("0001.dcm")?;
//!
//! let patient_name = obj.element(tags::PATIENT_NAME)?.to_str();
//! let modality = obj.element_by_name("Modality")?.to_str();
//! # Ok(())
//! # }
//! ```
//!
//! By default, the entire data set is loaded into memory.
//! The pixel data and following elements can be ignored
//! by using [`OpenFileOptions`]:
//!
//! ```no_run
//! use dicomio_object::OpenFileOptions;
//!
//! let obj = OpenFileOptions::new()
//!     .read_until(dicomio_dictionary_std::tags::PIXEL_DATA)
//!     .open_file("0002.dcm")?;
//! # Result::<(), dicomio_object::ReadError>::Ok(())
//! ```
//!
//! Bulk data can also be left in the source file,
//! or spilled into temporary files,
//! so that only a reference is kept in memory:
//!
//! ```no_run
//! use dicomio_object::{IncludeBulkData, OpenFileOptions};
//!
//! let obj = OpenFileOptions::new()
//!     .include_bulk_data(IncludeBulkData::Uri)
//!     .open_file("0003.dcm")?;
//! # Result::<(), dicomio_object::ReadError>::Ok(())
//! ```
//!
//! DICOM objects can be written back into a new DICOM file.
//! When creating a new DICOM object from scratch,
//! use a [`FileMetaTableBuilder`] to construct the file meta group,
//! then use [`with_meta`](InMemDataSet::with_meta):
//!
//! ```no_run
//! # use dicomio_object::{InMemDataSet, FileMetaTableBuilder};
//! # fn something(obj: InMemDataSet) -> Result<(), Box<dyn std::error::Error>> {
//! use dicomio_dictionary_std::uids;
//!
//! let file_obj = obj.with_meta(
//!     FileMetaTableBuilder::new()
//!         .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
//!         .media_storage_sop_class_uid(uids::CT_IMAGE_STORAGE)
//!         .media_storage_sop_instance_uid("2.25.1234"),
//! )?;
//! file_obj.write_to_file("0001_new.dcm")?;
//! # Ok(())
//! # }
//! ```
pub mod file;
mod handler;
pub mod mem;

pub use crate::file::{from_reader, open_file, OpenFileOptions};
pub use crate::handler::InMemHandler;
pub use crate::mem::{InMemDataSet, InMemElement};
pub use dicomio_core::Tag;
pub use dicomio_dictionary_std::StandardDataDictionary;
pub use dicomio_parser::dataset::write::EncodeOptions;
pub use dicomio_parser::{BulkDataFiles, FileMetaTable, FileMetaTableBuilder, IncludeBulkData};

use dicomio_parser::DicomOutputStream;
use snafu::{Backtrace, ResultExt, Snafu};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The default implementation of a root DICOM object.
pub type DefaultDicomObject = FileDicomObject<InMemDataSet>;

/// An error which may occur when loading a DICOM object
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum ReadError {
    #[snafu(display("Could not read data set"))]
    ReadDataSet {
        #[snafu(backtrace)]
        source: dicomio_parser::dataset::read::Error,
    },
    /// The source has no file meta group
    MissingFileMeta { backtrace: Backtrace },
}

/// An error which may occur when writing a DICOM object
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum WriteError {
    #[snafu(display("Could not write to file '{}'", filename.display()))]
    WriteFile {
        filename: std::path::PathBuf,
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Could not write data set"))]
    WriteDataSet {
        #[snafu(backtrace)]
        source: dicomio_parser::dataset::write::Error,
    },
    /// Could not build file meta table
    BuildMetaTable {
        #[snafu(backtrace)]
        source: dicomio_parser::meta::Error,
    },
}

/// An error which may occur when looking up a DICOM object's attributes.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum AccessError {
    #[snafu(display("No such data element with tag {}", tag))]
    NoSuchDataElementTag { tag: Tag, backtrace: Backtrace },
}

impl AccessError {
    pub fn into_access_by_name(self, alias: impl Into<String>) -> AccessByNameError {
        match self {
            AccessError::NoSuchDataElementTag { tag, backtrace } => {
                AccessByNameError::NoSuchDataElementAlias {
                    tag,
                    alias: alias.into(),
                    backtrace,
                }
            }
        }
    }
}

/// An error which may occur when looking up a DICOM object's attributes
/// by a keyword (or alias) instead of by tag.
///
/// These accesses incur a look-up at the data element dictionary,
/// which may fail if no such entry exists.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AccessByNameError {
    #[snafu(display("No such data element {} (with tag {})", alias, tag))]
    NoSuchDataElementAlias {
        tag: Tag,
        alias: String,
        backtrace: Backtrace,
    },

    /// Could not resolve attribute name from the data dictionary
    #[snafu(display("Unknown data attribute named `{}`", name))]
    NoSuchAttributeName { name: String, backtrace: Backtrace },
}

/// A root DICOM object retrieved from a standard DICOM file,
/// containing additional information from the file meta group
/// in a separate table value.
///
/// When bulk data was spilled into temporary files while reading,
/// the object owns those files,
/// which are removed when it is dropped.
#[derive(Debug)]
pub struct FileDicomObject<O> {
    meta: FileMetaTable,
    obj: O,
    bulk_files: Option<BulkDataFiles>,
}

impl<O> FileDicomObject<O> {
    /// Join a file meta table with a data set.
    pub fn new(meta: FileMetaTable, obj: O) -> Self {
        FileDicomObject {
            meta,
            obj,
            bulk_files: None,
        }
    }

    pub(crate) fn with_bulk_data_files(mut self, files: Option<BulkDataFiles>) -> Self {
        self.bulk_files = files;
        self
    }

    /// Retrieve the processed meta header table.
    pub fn meta(&self) -> &FileMetaTable {
        &self.meta
    }

    /// Retrieve a mutable reference to the processed meta header table.
    ///
    /// Considerable care should be taken when modifying this table,
    /// as it decides how the object is written.
    pub fn meta_mut(&mut self) -> &mut FileMetaTable {
        &mut self.meta
    }

    /// The temporary files holding spilled bulk data, if any.
    pub fn bulk_data_files(&self) -> Option<&BulkDataFiles> {
        self.bulk_files.as_ref()
    }

    /// Take ownership of the temporary bulk data files.
    ///
    /// Bulk data values of the object
    /// stay readable only as long as the files live.
    pub fn take_bulk_data_files(&mut self) -> Option<BulkDataFiles> {
        self.bulk_files.take()
    }

    /// Retrieve the inner DICOM object structure, discarding the meta table.
    ///
    /// Spilled bulk data files are removed.
    pub fn into_inner(self) -> O {
        self.obj
    }
}

impl FileDicomObject<InMemDataSet> {
    /// Write the entire object as a DICOM file
    /// into the given file path.
    /// Preamble, magic code, and file meta group will be included
    /// before the inner object.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), WriteError> {
        let path = path.as_ref();
        let file = File::create(path).context(WriteFileSnafu { filename: path })?;
        let to = self.write_all(BufWriter::new(file))?;
        to.into_inner()
            .map_err(|e| e.into_error())
            .context(WriteFileSnafu { filename: path })?;
        Ok(())
    }

    /// Write the entire object as a DICOM file
    /// into the given writer,
    /// in the transfer syntax of the file meta table.
    pub fn write_all<W: Write>(&self, to: W) -> Result<W, WriteError> {
        self.write_all_with_options(to, EncodeOptions::default())
    }

    /// Write the entire object as a DICOM file
    /// with the given encoding options.
    pub fn write_all_with_options<W: Write>(
        &self,
        to: W,
        options: EncodeOptions,
    ) -> Result<W, WriteError> {
        let mut out = DicomOutputStream::new(to, self.meta.transfer_syntax())
            .context(WriteDataSetSnafu)?
            .with_options(options);
        out.write_file_meta_information(&self.meta)
            .context(WriteDataSetSnafu)?;
        out.write_dataset(&self.obj).context(WriteDataSetSnafu)?;
        out.finish().context(WriteDataSetSnafu)
    }

    /// Write the inner data set into the given writer,
    /// without preamble, magic code, nor file meta group.
    ///
    /// The transfer syntax is selected from the file meta table.
    pub fn write_dataset<W: Write>(&self, to: W) -> Result<W, WriteError> {
        self.obj
            .write_dataset_with_ts(to, self.meta.transfer_syntax(), EncodeOptions::default())
    }
}

impl<O> ::std::ops::Deref for FileDicomObject<O> {
    type Target = O;

    fn deref(&self) -> &Self::Target {
        &self.obj
    }
}

impl<O> ::std::ops::DerefMut for FileDicomObject<O> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicomio_core::VR;
    use dicomio_dictionary_std::{tags, uids};

    fn sample() -> DefaultDicomObject {
        InMemDataSet::from_element_iter(vec![
            InMemElement::text(tags::SOP_CLASS_UID, VR::UI, uids::CT_IMAGE_STORAGE),
            InMemElement::text(tags::SOP_INSTANCE_UID, VR::UI, "2.25.77\0"),
            InMemElement::text(tags::PATIENT_NAME, VR::PN, "Doe^John"),
        ])
        .with_meta(FileMetaTableBuilder::new().transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN))
        .unwrap()
    }

    #[test]
    fn write_all_starts_with_preamble_and_meta() {
        let obj = sample();
        let bytes = obj.write_all(Vec::new()).unwrap();
        assert!(bytes[..128].iter().all(|b| *b == 0));
        assert_eq!(&bytes[128..132], b"DICM");
        // group length element right after the magic code
        assert_eq!(&bytes[132..138], &[0x02, 0x00, 0x00, 0x00, b'U', b'L']);
        assert_eq!(bytes.len() % 2, 0);
    }

    #[test]
    fn write_dataset_leaves_out_meta() {
        let obj = sample();
        let bytes = obj.write_dataset(Vec::new()).unwrap();
        assert_eq!(&bytes[..6], &[0x08, 0x00, 0x16, 0x00, b'U', b'I']);
    }

    #[test]
    fn deref_to_data_set() {
        let mut obj = sample();
        assert_eq!(obj.len(), 3);
        obj.put(InMemElement::text(tags::PATIENT_ID, VR::LO, "1"));
        assert_eq!(obj.element(tags::PATIENT_ID).unwrap().to_str(), Some("1"));
        assert!(obj.bulk_data_files().is_none());
    }
}
