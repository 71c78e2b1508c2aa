//! Bulk data classification and storage.
//!
//! A [`BulkDataDescriptor`] decides, for each element met while reading,
//! whether its value is bulk data:
//! a value which should not be loaded into memory
//! but referenced at its place in the source,
//! spilled to a temporary file,
//! or skipped entirely.
//!
//! [`BulkDataFiles`] owns the temporary files
//! created when bulk data has to be spilled.
use dicomio_core::dictionary::DataDictionary;
use dicomio_core::header::Length;
use dicomio_core::ops::{AttributeSelector, ItemPointer};
use dicomio_core::{BulkData, Tag, VR};
use dicomio_dictionary_std::{tags, StandardDataDictionary};
use snafu::{Backtrace, ResultExt, Snafu};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tempfile::TempPath;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// A selector or length threshold could not be interpreted.
    #[snafu(display("Invalid argument `{}`: {}", value, reason))]
    InvalidArgument {
        value: String,
        reason: String,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not create bulk data file"))]
    CreateFile {
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not copy bulk data into {}", path.display()))]
    WriteFile {
        path: PathBuf,
        source: io::Error,
        backtrace: Backtrace,
    },
    /// The source ended before the whole value was copied.
    #[snafu(display("Bulk data value truncated: expected {} bytes, got {}", expected, actual))]
    Truncated {
        expected: u32,
        actual: u64,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not keep bulk data file"))]
    KeepFile {
        source: tempfile::PathPersistError,
        backtrace: Backtrace,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A policy deciding which attributes are bulk data.
///
/// The decision is made from the element header
/// and its position in the data set:
/// `item_path` lists the sequence items enclosing the element,
/// from the outermost one.
/// For fragments of an encapsulated value,
/// the element is the encapsulated value itself
/// and `length` is undefined.
pub trait BulkDataDescriptor {
    /// Whether the value of this element is bulk data.
    fn is_bulk_data(
        &self,
        item_path: &[ItemPointer],
        private_creator: Option<&str>,
        tag: Tag,
        vr: VR,
        length: Length,
    ) -> bool;
}

impl<F> BulkDataDescriptor for F
where
    F: Fn(&[ItemPointer], Option<&str>, Tag, VR, Length) -> bool,
{
    fn is_bulk_data(
        &self,
        item_path: &[ItemPointer],
        private_creator: Option<&str>,
        tag: Tag,
        vr: VR,
        length: Length,
    ) -> bool {
        self(item_path, private_creator, tag, vr, length)
    }
}

/// Whether the attribute is one of the standard bulk data attributes:
/// pixel data, overlay and curve data, audio samples,
/// spectroscopy data, encapsulated documents
/// and palette color lookup table data,
/// all at the root of the data set,
/// or waveform data directly inside an item of the waveform sequence.
pub fn is_standard_bulk_data(item_path: &[ItemPointer], tag: Tag) -> bool {
    match tag.normalized() {
        tags::PIXEL_DATA
        | tags::FLOAT_PIXEL_DATA
        | tags::DOUBLE_FLOAT_PIXEL_DATA
        | tags::SPECTROSCOPY_DATA
        | tags::OVERLAY_DATA
        | tags::CURVE_DATA
        | tags::AUDIO_SAMPLE_DATA
        | tags::ENCAPSULATED_DOCUMENT
        | tags::RED_PALETTE_COLOR_LOOKUP_TABLE_DATA
        | tags::GREEN_PALETTE_COLOR_LOOKUP_TABLE_DATA
        | tags::BLUE_PALETTE_COLOR_LOOKUP_TABLE_DATA
        | tags::ALPHA_PALETTE_COLOR_LOOKUP_TABLE_DATA
        | tags::LARGE_RED_PALETTE_COLOR_LOOKUP_TABLE_DATA
        | tags::LARGE_GREEN_PALETTE_COLOR_LOOKUP_TABLE_DATA
        | tags::LARGE_BLUE_PALETTE_COLOR_LOOKUP_TABLE_DATA
        | tags::SEGMENTED_RED_PALETTE_COLOR_LOOKUP_TABLE_DATA
        | tags::SEGMENTED_GREEN_PALETTE_COLOR_LOOKUP_TABLE_DATA
        | tags::SEGMENTED_BLUE_PALETTE_COLOR_LOOKUP_TABLE_DATA
        | tags::SEGMENTED_ALPHA_PALETTE_COLOR_LOOKUP_TABLE_DATA => item_path.is_empty(),
        tags::WAVEFORM_DATA => {
            item_path.len() == 1 && item_path[0].sequence_tag == tags::WAVEFORM_SEQUENCE
        }
        _ => false,
    }
}

/// The standard bulk data policy,
/// see [`is_standard_bulk_data`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StandardBulkDataDescriptor;

impl BulkDataDescriptor for StandardBulkDataDescriptor {
    fn is_bulk_data(
        &self,
        item_path: &[ItemPointer],
        _private_creator: Option<&str>,
        tag: Tag,
        _vr: VR,
        _length: Length,
    ) -> bool {
        is_standard_bulk_data(item_path, tag)
    }
}

/// A configurable bulk data policy.
///
/// An element is bulk data if any of these hold:
///
/// - it is standard bulk data,
///   unless the standard attributes are excluded;
/// - it is matched by one of the selectors;
/// - its length is defined and exceeds the threshold of its VR.
///
/// ```
/// # use dicomio_parser::bulkdata::{BasicBulkDataDescriptor, BulkDataDescriptor};
/// # use dicomio_core::{Tag, VR, header::Length};
/// let mut descriptor = BasicBulkDataDescriptor::new();
/// descriptor.add_length_thresholds("OB,OW=1024")?;
/// assert!(descriptor.is_bulk_data(&[], None, Tag(0x0009, 0x1010), VR::OB, Length(2048)));
/// assert!(!descriptor.is_bulk_data(&[], None, Tag(0x0009, 0x1010), VR::OB, Length(1024)));
/// # Ok::<(), dicomio_parser::bulkdata::Error>(())
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BasicBulkDataDescriptor {
    exclude_defaults: bool,
    selectors: Vec<AttributeSelector>,
    length_thresholds: HashMap<VR, u32>,
}

impl BasicBulkDataDescriptor {
    /// Create a descriptor which only recognizes standard bulk data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the standard bulk data attributes are left out.
    pub fn exclude_defaults(&self) -> bool {
        self.exclude_defaults
    }

    /// Leave out (or bring back) the standard bulk data attributes.
    pub fn set_exclude_defaults(&mut self, exclude: bool) {
        self.exclude_defaults = exclude;
    }

    /// The selectors of attributes always treated as bulk data.
    pub fn selectors(&self) -> &[AttributeSelector] {
        &self.selectors
    }

    /// Treat the selected attribute as bulk data.
    pub fn add_selector(&mut self, selector: impl Into<AttributeSelector>) {
        self.selectors.push(selector.into());
    }

    /// Treat the attribute selected by the given text as bulk data.
    ///
    /// The text may use keywords or tags,
    /// such as `ContentSequence.TextValue` or `(0009,1010)`.
    pub fn add_selector_str(&mut self, text: &str) -> Result<()> {
        let selector = StandardDataDictionary
            .parse_selector(text)
            .map_err(|e| e.to_string())
            .map_err(|reason| {
                InvalidArgumentSnafu {
                    value: text,
                    reason,
                }
                .build()
            })?;
        self.selectors.push(selector);
        Ok(())
    }

    /// The length threshold of the given VR, if any.
    pub fn length_threshold(&self, vr: VR) -> Option<u32> {
        self.length_thresholds.get(&vr).copied()
    }

    /// Treat values of the given VR longer than `threshold` as bulk data.
    pub fn set_length_threshold(&mut self, vr: VR, threshold: u32) {
        self.length_thresholds.insert(vr, threshold);
    }

    /// Set length thresholds from text
    /// in the form `VR[,VR...]=LENGTH`,
    /// such as `OB,OW,UN=1024`.
    pub fn add_length_thresholds(&mut self, text: &str) -> Result<()> {
        let invalid = |reason: &str| {
            InvalidArgumentSnafu {
                value: text,
                reason,
            }
            .build()
        };
        let (vrs, threshold) = text
            .split_once('=')
            .ok_or_else(|| invalid("expected `VR[,VR...]=LENGTH`"))?;
        let threshold: u32 = threshold
            .trim()
            .parse()
            .map_err(|_| invalid("length is not an unsigned integer"))?;
        let vrs = vrs
            .split(',')
            .map(|vr| vr.trim().parse::<VR>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| invalid("unknown value representation"))?;
        for vr in vrs {
            self.length_thresholds.insert(vr, threshold);
        }
        Ok(())
    }

    fn exceeds_length_threshold(&self, vr: VR, length: Length) -> bool {
        match (self.length_thresholds.get(&vr), length.get()) {
            (Some(threshold), Some(length)) => length > *threshold,
            _ => false,
        }
    }
}

impl BulkDataDescriptor for BasicBulkDataDescriptor {
    fn is_bulk_data(
        &self,
        item_path: &[ItemPointer],
        private_creator: Option<&str>,
        tag: Tag,
        vr: VR,
        length: Length,
    ) -> bool {
        (!self.exclude_defaults && is_standard_bulk_data(item_path, tag))
            || self
                .selectors
                .iter()
                .any(|s| s.matches(item_path, private_creator, tag))
            || self.exceeds_length_threshold(vr, length)
    }
}

/// The owner of the temporary files holding spilled bulk data.
///
/// Each spilled value is written either to a new file
/// or, in concatenating mode,
/// appended to a single file shared by all values.
/// The files are deleted when this value is dropped,
/// unless they are [kept](BulkDataFiles::keep).
/// Bulk data references into these files
/// must not be used after that.
pub struct BulkDataFiles {
    prefix: String,
    suffix: String,
    directory: Option<PathBuf>,
    concatenate: bool,
    // dropped before the paths, so that the file is closed on deletion
    current: Option<SpillFile>,
    files: Vec<TempPath>,
}

/// The file being appended to.
struct SpillFile {
    file: File,
    path: PathBuf,
    len: u64,
}

impl fmt::Debug for BulkDataFiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkDataFiles")
            .field("prefix", &self.prefix)
            .field("suffix", &self.suffix)
            .field("directory", &self.directory)
            .field("concatenate", &self.concatenate)
            .field("files", &self.files)
            .finish()
    }
}

impl BulkDataFiles {
    /// Create an empty set of bulk data files.
    ///
    /// Files are named with the given prefix and suffix,
    /// and created in `directory`
    /// or in the system's temporary directory.
    pub fn new(
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        directory: Option<PathBuf>,
        concatenate: bool,
    ) -> Self {
        BulkDataFiles {
            prefix: prefix.into(),
            suffix: suffix.into(),
            directory,
            concatenate,
            current: None,
            files: Vec::new(),
        }
    }

    /// Copy exactly `length` bytes from the source into a bulk data file,
    /// returning a reference to them.
    pub fn spill<R>(&mut self, source: &mut R, length: u32, big_endian: bool) -> Result<BulkData>
    where
        R: ?Sized + Read,
    {
        let mut current = match self.current.take() {
            Some(current) if self.concatenate => current,
            _ => self.create_file()?,
        };
        let offset = current.len;
        let copied = io::copy(&mut source.take(u64::from(length)), &mut current.file)
            .context(WriteFileSnafu {
                path: &current.path,
            })?;
        current.len += copied;
        if copied != u64::from(length) {
            return TruncatedSnafu {
                expected: length,
                actual: copied,
            }
            .fail();
        }
        let bulk = BulkData::in_file(&current.path, offset, length, big_endian);
        if self.concatenate {
            self.current = Some(current);
        }
        Ok(bulk)
    }

    fn create_file(&mut self) -> Result<SpillFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(&self.prefix).suffix(&self.suffix);
        let file = match &self.directory {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .context(CreateFileSnafu)?;
        let (file, temp_path) = file.into_parts();
        let path = temp_path.to_path_buf();
        tracing::debug!("Created bulk data file {}", path.display());
        self.files.push(temp_path);
        Ok(SpillFile { file, path, len: 0 })
    }

    /// The paths of the files created so far.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|p| p.as_ref())
    }

    /// The number of files created so far.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no file was created.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Keep the files in the file system,
    /// returning their paths.
    /// The caller becomes responsible for deleting them.
    pub fn keep(mut self) -> Result<Vec<PathBuf>> {
        self.current = None;
        std::mem::take(&mut self.files)
            .into_iter()
            .map(|p| p.keep().context(KeepFileSnafu))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn waveform_item() -> ItemPointer {
        ItemPointer::new(tags::WAVEFORM_SEQUENCE, 0)
    }

    #[test]
    fn standard_bulk_data_at_root() {
        for tag in [
            tags::PIXEL_DATA,
            tags::FLOAT_PIXEL_DATA,
            tags::DOUBLE_FLOAT_PIXEL_DATA,
            tags::ENCAPSULATED_DOCUMENT,
            tags::SPECTROSCOPY_DATA,
            tags::RED_PALETTE_COLOR_LOOKUP_TABLE_DATA,
            tags::SEGMENTED_ALPHA_PALETTE_COLOR_LOOKUP_TABLE_DATA,
            Tag(0x6000, 0x3000),
            Tag(0x6002, 0x3000),
            Tag(0x501E, 0x3000),
            Tag(0x5000, 0x200C),
        ] {
            assert!(is_standard_bulk_data(&[], tag), "{}", tag);
            assert!(!is_standard_bulk_data(&[waveform_item()], tag), "{}", tag);
        }
        assert!(!is_standard_bulk_data(&[], tags::PATIENT_NAME));
        assert!(!is_standard_bulk_data(&[], Tag(0x6001, 0x3000)));
    }

    #[test]
    fn waveform_data_only_in_waveform_sequence() {
        assert!(is_standard_bulk_data(&[waveform_item()], tags::WAVEFORM_DATA));
        assert!(!is_standard_bulk_data(&[], tags::WAVEFORM_DATA));
        assert!(!is_standard_bulk_data(
            &[ItemPointer::new(tags::CONTENT_SEQUENCE, 0)],
            tags::WAVEFORM_DATA
        ));
        assert!(!is_standard_bulk_data(
            &[waveform_item(), waveform_item()],
            tags::WAVEFORM_DATA
        ));
    }

    #[test]
    fn basic_descriptor_rules() {
        let mut d = BasicBulkDataDescriptor::new();
        let len = Length(64);
        assert!(d.is_bulk_data(&[], None, tags::PIXEL_DATA, VR::OW, len));
        d.set_exclude_defaults(true);
        assert!(!d.is_bulk_data(&[], None, tags::PIXEL_DATA, VR::OW, len));

        d.add_selector_str("ContentSequence.TextValue").unwrap();
        let path = [ItemPointer::new(tags::CONTENT_SEQUENCE, 3)];
        assert!(d.is_bulk_data(&path, None, tags::TEXT_VALUE, VR::UT, len));
        assert!(!d.is_bulk_data(&[], None, tags::TEXT_VALUE, VR::UT, len));

        d.add_selector(AttributeSelector::private(Tag(0x0009, 0x0010), "ACME 1.0"));
        assert!(d.is_bulk_data(&[], Some("ACME 1.0"), Tag(0x0009, 0x1010), VR::OB, len));
        assert!(!d.is_bulk_data(&[], Some("OTHER"), Tag(0x0009, 0x1010), VR::OB, len));
    }

    #[test]
    fn length_thresholds() {
        let mut d = BasicBulkDataDescriptor::new();
        d.add_length_thresholds("OB, OW=1024").unwrap();
        assert_eq!(d.length_threshold(VR::OW), Some(1024));
        assert_eq!(d.length_threshold(VR::UN), None);
        let tag = Tag(0x0009, 0x1010);
        assert!(d.is_bulk_data(&[], None, tag, VR::OB, Length(1025)));
        assert!(!d.is_bulk_data(&[], None, tag, VR::OB, Length(1024)));
        assert!(!d.is_bulk_data(&[], None, tag, VR::UN, Length(4096)));
        assert!(!d.is_bulk_data(&[], None, tag, VR::OB, Length::UNDEFINED));
    }

    #[test]
    fn invalid_arguments() {
        let mut d = BasicBulkDataDescriptor::new();
        for bad in ["OB", "OB=", "XX=10", "OB=-1", "OB=ten"] {
            assert!(
                matches!(
                    d.add_length_thresholds(bad),
                    Err(Error::InvalidArgument { .. })
                ),
                "{}",
                bad
            );
        }
        assert!(matches!(
            d.add_selector_str("NotAKeyword"),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(d.selectors().is_empty());
    }

    #[test]
    fn closures_are_descriptors() {
        let d = |_: &[ItemPointer], _: Option<&str>, _: Tag, vr: VR, _: Length| vr == VR::UN;
        assert!(d.is_bulk_data(&[], None, Tag(0x0009, 0x1010), VR::UN, Length(2)));
        assert!(!d.is_bulk_data(&[], None, Tag(0x0009, 0x1010), VR::OB, Length(2)));
    }

    #[test]
    fn spill_to_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = BulkDataFiles::new("blk", ".tmp", Some(dir.path().to_owned()), false);
        let mut source = Cursor::new(b"abcdefgh".to_vec());
        let a = files.spill(&mut source, 3, false).unwrap();
        let b = files.spill(&mut source, 5, true).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!((a.offset, b.offset), (0, 0));
        assert_ne!(a.source, b.source);
        assert!(b.big_endian);
        assert_eq!(a.read_bytes().unwrap(), b"abc");
        assert_eq!(b.read_bytes().unwrap(), b"defgh");

        let paths: Vec<PathBuf> = files.paths().map(Path::to_path_buf).collect();
        assert!(paths.iter().all(|p| p.exists()));
        drop(files);
        assert!(paths.iter().all(|p| !p.exists()));
    }

    #[test]
    fn spill_concatenated() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = BulkDataFiles::new("blk", "", Some(dir.path().to_owned()), true);
        let mut source = Cursor::new(b"abcdefgh".to_vec());
        let a = files.spill(&mut source, 3, false).unwrap();
        let b = files.spill(&mut source, 5, false).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(a.source, b.source);
        assert_eq!((a.offset, b.offset), (0, 3));
        assert_eq!(b.read_bytes().unwrap(), b"defgh");

        let kept = files.keep().unwrap();
        assert_eq!(kept.len(), 1);
        assert!(kept[0].exists());
        std::fs::remove_file(&kept[0]).unwrap();
    }

    #[test]
    fn spill_truncated() {
        let mut files = BulkDataFiles::new("blk", "", None, false);
        let mut source = Cursor::new(b"abc".to_vec());
        let err = files.spill(&mut source, 8, false).unwrap_err();
        assert!(matches!(
            err,
            Error::Truncated {
                expected: 8,
                actual: 3,
                ..
            }
        ));
    }
}
