//! Opening DICOM files into in-memory objects.
use crate::handler::InMemHandler;
use crate::{DefaultDicomObject, FileDicomObject, MissingFileMetaSnafu, ReadDataSetSnafu, ReadError};
use dicomio_core::header::Length;
use dicomio_core::Tag;
use dicomio_parser::{DicomInputOptions, DicomInputStream, IncludeBulkData};
use snafu::{OptionExt, ResultExt};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Create a DICOM object by reading from a byte source.
///
/// The source may start with the 128-byte preamble or directly with
/// the file meta group, followed by the rest of the data set.
pub fn from_reader<F>(file: F) -> Result<DefaultDicomObject, ReadError>
where
    F: Read,
{
    OpenFileOptions::new().from_reader(file)
}

/// Create a DICOM object by reading from a file.
///
/// This function assumes the standard file encoding structure: 128-byte
/// preamble, file meta group, and the rest of the data set.
pub fn open_file<P>(path: P) -> Result<DefaultDicomObject, ReadError>
where
    P: AsRef<Path>,
{
    OpenFileOptions::new().open_file(path)
}

/// A builder type for opening a DICOM file with additional options.
///
/// # Example
///
/// Create a `OpenFileOptions`,
/// call adaptor methods in a chain,
/// and finish the operation with [`.open_file()`](OpenFileOptions::open_file).
///
/// ```no_run
/// # use dicomio_object::OpenFileOptions;
/// let file = OpenFileOptions::new()
///     .read_until(dicomio_dictionary_std::tags::PIXEL_DATA)
///     .open_file("path/to/file.dcm")?;
/// # Result::<(), Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Default, Clone)]
#[non_exhaustive]
pub struct OpenFileOptions {
    read_until: Option<Tag>,
    input: DicomInputOptions,
}

impl OpenFileOptions {
    pub fn new() -> Self {
        OpenFileOptions::default()
    }

    /// Set the operation to read only until the given tag is found.
    ///
    /// The reading process ends immediately before this tag,
    /// or any other tag that is next in the standard DICOM tag ordering,
    /// is found in the object's root data set.
    /// An element with the exact tag will be excluded from the output.
    pub fn read_until(mut self, tag: Tag) -> Self {
        self.read_until = Some(tag);
        self
    }

    /// Set the operation to read all elements of the data set to the end.
    ///
    /// This is the default behavior.
    pub fn read_all(mut self) -> Self {
        self.read_until = None;
        self
    }

    /// Set how bulk data is read:
    /// into memory, skipped,
    /// or referenced in the source file or temporary files.
    pub fn include_bulk_data(mut self, include: IncludeBulkData) -> Self {
        self.input = self.input.include_bulk_data(include);
        self
    }

    /// Set the largest buffer allocated for a value
    /// before its bytes are received.
    pub fn allocate_limit(mut self, limit: u32) -> Self {
        self.input = self.input.allocate_limit(limit);
        self
    }

    /// Set the directory of temporary bulk data files.
    pub fn bulk_data_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.input = self.input.bulk_data_directory(directory);
        self
    }

    /// Set whether all spilled bulk data goes into a single temporary file.
    pub fn concatenate_bulk_data_files(mut self, concatenate: bool) -> Self {
        self.input = self.input.concatenate_bulk_data_files(concatenate);
        self
    }

    /// Set the transfer syntax assumed when the source is not recognized.
    pub fn fallback_transfer_syntax(mut self, uid: impl Into<String>) -> Self {
        self.input = self.input.fallback_transfer_syntax(uid);
        self
    }

    /// Replace the input stream options altogether.
    pub fn input_options(mut self, options: DicomInputOptions) -> Self {
        self.input = options;
        self
    }

    pub(crate) fn input(&self) -> &DicomInputOptions {
        &self.input
    }

    pub(crate) fn stop_tag(&self) -> Option<Tag> {
        self.read_until
    }

    /// Open the file at the given path.
    pub fn open_file<P>(self, path: P) -> Result<DefaultDicomObject, ReadError>
    where
        P: AsRef<Path>,
    {
        let dis = DicomInputStream::open_file(path, self.input.clone()).context(ReadDataSetSnafu)?;
        self.read(dis)
    }

    /// Obtain a DICOM object by reading from a byte source.
    ///
    /// Bulk data cannot be referenced in a byte source,
    /// so it is spilled into temporary files instead
    /// when [`IncludeBulkData::Uri`] is chosen.
    pub fn from_reader<R>(self, from: R) -> Result<DefaultDicomObject, ReadError>
    where
        R: Read,
    {
        let dis = DicomInputStream::with_options(from, self.input.clone()).context(ReadDataSetSnafu)?;
        self.read(dis)
    }

    fn read<R: Read>(&self, mut dis: DicomInputStream<R>) -> Result<DefaultDicomObject, ReadError> {
        let mut handler = InMemHandler::new();
        dis.read_dataset(&mut handler, Length::UNDEFINED, self.read_until)
            .context(ReadDataSetSnafu)?;
        let meta = dis.take_file_meta().context(MissingFileMetaSnafu)?;
        Ok(FileDicomObject::new(meta, handler.into_dataset())
            .with_bulk_data_files(dis.take_bulk_data_files()))
    }
}
