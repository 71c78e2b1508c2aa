//! This module contains [`DicomInputStream`],
//! a reader of DICOM data sets from an arbitrary byte source.
//!
//! The stream recognizes the transfer syntax of its source,
//! reads the file meta group if there is one,
//! and then walks the data set,
//! delivering each element to a [`DicomInputHandler`].
//! Values are only read when the handler asks for them,
//! so that large values may be skipped,
//! referenced in place or spilled to temporary files
//! according to the [bulk data policy](crate::bulkdata).
use crate::bulkdata::{self, BulkDataDescriptor, BulkDataFiles, StandardBulkDataDescriptor};
use crate::dataset::source::{Pushback, Source};
use crate::dataset::DicomInputHandler;
use crate::meta::{FileMetaTable, DICM_MAGIC_CODE};
use dicomio_core::dictionary::{DataDictionary, DataDictionaryEntry};
use dicomio_core::header::{HasLength, Header, Length};
use dicomio_core::ops::{ItemPath, ItemPointer};
use dicomio_core::{BulkData, Fragment, Tag, VR};
use dicomio_dictionary_std::{tags, uids, StandardDataDictionary};
use dicomio_encoding::byte_order;
use dicomio_encoding::decode::{self, AnyDecoder, Decode};
use dicomio_encoding::TransferSyntaxRegistry;
use snafu::{Backtrace, OptionExt, ResultExt, Snafu};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Could not open file {}", path.display()))]
    OpenFile {
        path: PathBuf,
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not read from the source at position {:#x}", position))]
    PeekSource {
        position: u64,
        source: io::Error,
        backtrace: Backtrace,
    },
    /// The beginning of the stream is neither a DICOM file
    /// nor a data set in a recognizable encoding.
    #[snafu(display("Not a DICOM stream"))]
    NotADicomStream { backtrace: Backtrace },
    /// The stream appears to be encoded in implicit VR big endian,
    /// which is not a valid transfer syntax.
    #[snafu(display("Implicit VR Big Endian encoded DICOM stream"))]
    ImplicitVrBigEndian { backtrace: Backtrace },
    #[snafu(display("Could not read element header at position {:#x}", position))]
    ReadHeader {
        position: u64,
        #[snafu(backtrace)]
        source: decode::Error,
    },
    /// The source ended in the middle of an element.
    #[snafu(display(
        "Unexpected end of stream at position {:#x} while reading element {}",
        position,
        tag
    ))]
    UnexpectedEndOfStream {
        tag: Tag,
        position: u64,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not read value of element {} at position {:#x}", tag, position))]
    ReadValue {
        tag: Tag,
        position: u64,
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("Element {} has a value of undefined length", tag))]
    UndefinedValueLength { tag: Tag, backtrace: Backtrace },
    #[snafu(display("Could not start inflating the data set"))]
    Inflate {
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not store bulk data of element {}", tag))]
    StoreBulkData {
        tag: Tag,
        #[snafu(backtrace)]
        source: bulkdata::Error,
    },
    /// A handler forwarding the data set to an output stream
    /// failed to write it.
    #[snafu(display("Could not write element {}", tag))]
    WriteOutput {
        tag: Tag,
        #[snafu(backtrace)]
        source: crate::dataset::write::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// How the values of bulk data elements are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncludeBulkData {
    /// Bulk data is skipped.
    No,
    /// Bulk data is read into memory like any other value.
    Yes,
    /// Bulk data is delivered as a reference:
    /// to its place in the source file if possible,
    /// or else to a temporary file it is spilled to.
    Uri,
}

/// The default limit of the first allocation when reading a value: 64 MiB
pub const DEFAULT_ALLOCATE_LIMIT: u32 = 64 * 1024 * 1024;

/// Options for reading a DICOM stream.
#[derive(Clone)]
#[non_exhaustive]
pub struct DicomInputOptions {
    /// How bulk data is delivered, [`IncludeBulkData::Yes`] by default
    pub include_bulk_data: IncludeBulkData,
    /// The largest buffer allocated up front for a value,
    /// before any of its bytes were received.
    /// Longer values grow the buffer as the bytes arrive.
    pub allocate_limit: u32,
    /// The file name prefix of spilled bulk data files
    pub bulk_data_file_prefix: String,
    /// The file name suffix of spilled bulk data files
    pub bulk_data_file_suffix: String,
    /// The directory of spilled bulk data files,
    /// the system's temporary directory if `None`
    pub bulk_data_directory: Option<PathBuf>,
    /// Whether all spilled bulk data goes to a single file
    pub concatenate_bulk_data_files: bool,
    /// Whether values stated as `UN` are decoded as implicit VR little endian,
    /// `true` by default
    pub decode_un_with_ivr_le: bool,
    /// Whether the stream keeps a list of the bulk data references it creates
    pub add_bulk_data_references: bool,
    /// The transfer syntax assumed when the stream is not recognized
    pub fallback_transfer_syntax: Option<String>,
    /// The policy deciding which elements are bulk data
    pub bulk_data_descriptor: Arc<dyn BulkDataDescriptor + Send + Sync>,
    /// The path of the file being read, if any,
    /// for bulk data references into it
    pub source_path: Option<PathBuf>,
}

impl fmt::Debug for DicomInputOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DicomInputOptions")
            .field("include_bulk_data", &self.include_bulk_data)
            .field("allocate_limit", &self.allocate_limit)
            .field("bulk_data_file_prefix", &self.bulk_data_file_prefix)
            .field("bulk_data_file_suffix", &self.bulk_data_file_suffix)
            .field("bulk_data_directory", &self.bulk_data_directory)
            .field(
                "concatenate_bulk_data_files",
                &self.concatenate_bulk_data_files,
            )
            .field("decode_un_with_ivr_le", &self.decode_un_with_ivr_le)
            .field("add_bulk_data_references", &self.add_bulk_data_references)
            .field("fallback_transfer_syntax", &self.fallback_transfer_syntax)
            .field("source_path", &self.source_path)
            .finish_non_exhaustive()
    }
}

impl Default for DicomInputOptions {
    fn default() -> Self {
        DicomInputOptions {
            include_bulk_data: IncludeBulkData::Yes,
            allocate_limit: DEFAULT_ALLOCATE_LIMIT,
            bulk_data_file_prefix: "blk".to_string(),
            bulk_data_file_suffix: String::new(),
            bulk_data_directory: None,
            concatenate_bulk_data_files: false,
            decode_un_with_ivr_le: true,
            add_bulk_data_references: false,
            fallback_transfer_syntax: None,
            bulk_data_descriptor: Arc::new(StandardBulkDataDescriptor),
            source_path: None,
        }
    }
}

impl DicomInputOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how bulk data is delivered.
    pub fn include_bulk_data(mut self, include: IncludeBulkData) -> Self {
        self.include_bulk_data = include;
        self
    }

    /// Set the largest buffer allocated up front for a value.
    pub fn allocate_limit(mut self, limit: u32) -> Self {
        self.allocate_limit = limit;
        self
    }

    /// Set the file name prefix and suffix of spilled bulk data files.
    pub fn bulk_data_file_names(
        mut self,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        self.bulk_data_file_prefix = prefix.into();
        self.bulk_data_file_suffix = suffix.into();
        self
    }

    /// Set the directory of spilled bulk data files.
    pub fn bulk_data_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.bulk_data_directory = Some(directory.into());
        self
    }

    /// Set whether all spilled bulk data goes to a single file.
    pub fn concatenate_bulk_data_files(mut self, concatenate: bool) -> Self {
        self.concatenate_bulk_data_files = concatenate;
        self
    }

    /// Set whether values stated as `UN`
    /// are decoded as implicit VR little endian.
    pub fn decode_un_with_ivr_le(mut self, decode: bool) -> Self {
        self.decode_un_with_ivr_le = decode;
        self
    }

    /// Set whether the stream keeps a list of its bulk data references.
    pub fn add_bulk_data_references(mut self, add: bool) -> Self {
        self.add_bulk_data_references = add;
        self
    }

    /// Set the transfer syntax assumed when the stream is not recognized.
    pub fn fallback_transfer_syntax(mut self, uid: impl Into<String>) -> Self {
        self.fallback_transfer_syntax = Some(uid.into());
        self
    }

    /// Set the policy deciding which elements are bulk data.
    pub fn bulk_data_descriptor<D>(mut self, descriptor: D) -> Self
    where
        D: BulkDataDescriptor + Send + Sync + 'static,
    {
        self.bulk_data_descriptor = Arc::new(descriptor);
        self
    }

    /// Set the path of the file being read.
    pub fn source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }
}

/// The transfer syntax of a stream, as recognized or declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSyntaxInfo {
    /// the transfer syntax UID
    pub uid: String,
    /// whether element headers state the VR
    pub explicit_vr: bool,
    /// whether the data set is big endian
    pub big_endian: bool,
    /// whether the data set is deflated after the file meta group
    pub deflated: bool,
    /// whether the stream starts with a file meta group
    pub has_file_meta: bool,
    /// whether the file meta group is preceded
    /// by the 128-byte preamble and the `DICM` code
    pub has_preamble: bool,
}

impl TransferSyntaxInfo {
    fn native(uid: &str, explicit_vr: bool, big_endian: bool) -> Self {
        TransferSyntaxInfo {
            uid: uid.to_string(),
            explicit_vr,
            big_endian,
            deflated: false,
            has_file_meta: false,
            has_preamble: false,
        }
    }

    /// Describe the transfer syntax of the given UID.
    ///
    /// Unknown transfer syntaxes are assumed
    /// to be explicit VR little endian.
    pub fn from_uid(uid: &str) -> Self {
        match TransferSyntaxRegistry.get(uid) {
            Some(ts) => TransferSyntaxInfo {
                uid: ts.uid().to_string(),
                explicit_vr: ts.is_explicit_vr(),
                big_endian: ts.is_big_endian(),
                deflated: ts.is_deflated(),
                has_file_meta: false,
                has_preamble: false,
            },
            None => {
                warn!(
                    "Unknown transfer syntax {}, assuming explicit VR little endian",
                    uid
                );
                TransferSyntaxInfo::native(uid, true, false)
            }
        }
    }
}

/// The state of one nesting level of the data set being read:
/// the root data set or a sequence item.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetContext {
    explicit_vr: bool,
    big_endian: bool,
    item: Option<ItemPointer>,
    item_length: Length,
    private_creators: HashMap<Tag, String>,
}

impl DatasetContext {
    fn root(explicit_vr: bool, big_endian: bool) -> Self {
        DatasetContext {
            explicit_vr,
            big_endian,
            item: None,
            item_length: Length::UNDEFINED,
            private_creators: HashMap::new(),
        }
    }

    fn item(explicit_vr: bool, big_endian: bool, item: ItemPointer, item_length: Length) -> Self {
        DatasetContext {
            explicit_vr,
            big_endian,
            item: Some(item),
            item_length,
            private_creators: HashMap::new(),
        }
    }

    /// Whether element headers at this level state the VR.
    pub fn is_explicit_vr(&self) -> bool {
        self.explicit_vr
    }

    /// Whether values at this level are big endian.
    pub fn is_big_endian(&self) -> bool {
        self.big_endian
    }

    /// The item of this level, `None` for the root data set.
    pub fn item_pointer(&self) -> Option<&ItemPointer> {
        self.item.as_ref()
    }

    /// The private creator reserving the block of a private tag,
    /// if it was seen at this level.
    pub fn private_creator(&self, tag: Tag) -> Option<&str> {
        let creator_tag = tag.private_creator_tag()?;
        self.private_creators.get(&creator_tag).map(String::as_str)
    }
}

fn private_creator_in(contexts: &[DatasetContext], tag: Tag) -> Option<&str> {
    contexts.last().and_then(|c| c.private_creator(tag))
}

/// A bulk data reference created while reading,
/// along with the element it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkDataReference {
    /// the items enclosing the element
    pub item_path: ItemPath,
    /// the private creator of the element, if private
    pub private_creator: Option<String>,
    pub tag: Tag,
    pub vr: VR,
    /// the index of the fragment, for encapsulated values
    pub fragment: Option<u32>,
    pub bulk_data: BulkData,
}

/// The outcome of reading a primitive value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueRead {
    /// The value bytes, in the requested byte order
    Bytes(Vec<u8>),
    /// A reference to the value bytes
    BulkData(BulkData),
    /// The value was bulk data and was skipped
    Skipped,
}

/// The sizes a value buffer goes through while reading a value:
/// at most `allocate_limit` bytes at first,
/// then doubling up to the full length.
///
/// The buffer is never more than twice
/// the number of bytes already received.
pub fn allocation_schedule(length: u32, allocate_limit: u32) -> impl Iterator<Item = usize> {
    let length = length as usize;
    let first = length.min(allocate_limit.max(1) as usize);
    std::iter::successors(if length == 0 { None } else { Some(first) }, move |&size| {
        if size >= length {
            None
        } else {
            Some(size.saturating_mul(2).min(length))
        }
    })
}

#[derive(Debug, Clone)]
struct FragmentState {
    tag: Tag,
    vr: VR,
    big_endian: bool,
    pointer: ItemPointer,
}

/// A reader of DICOM data sets from a byte source.
///
/// On construction, the transfer syntax of the source is recognized
/// from its first bytes.
/// The file meta group, if any,
/// is read before the data set or on request
/// with [`read_file_meta_information`](DicomInputStream::read_file_meta_information).
///
/// ```no_run
/// # use dicomio_parser::{DicomInputHandler, DicomInputOptions, DicomInputStream};
/// # use dicomio_parser::dataset::read::Result;
/// # use dicomio_core::header::Length;
/// # use std::io::Read;
/// struct PrintTags;
///
/// impl DicomInputHandler for PrintTags {
///     fn read_value<R: Read>(&mut self, dis: &mut DicomInputStream<R>) -> Result<()> {
///         println!("{} {}", dis.tag(), dis.vr());
///         if dis.vr() == dicomio_core::VR::SQ {
///             dis.read_sequence(self)
///         } else if dis.length().is_undefined() {
///             dis.read_fragments(self)
///         } else {
///             dis.skip_value()
///         }
///     }
/// }
///
/// let mut dis = DicomInputStream::open_file("file.dcm", DicomInputOptions::default())?;
/// dis.read_dataset(&mut PrintTags, Length::UNDEFINED, None)?;
/// # Ok::<(), dicomio_parser::dataset::read::Error>(())
/// ```
pub struct DicomInputStream<R> {
    src: Pushback<Source<R>>,
    pos: u64,
    options: DicomInputOptions,
    dict: StandardDataDictionary,
    ts: TransferSyntaxInfo,
    file_meta: Option<FileMetaTable>,
    meta_read: bool,
    contexts: Vec<DatasetContext>,
    tag: Tag,
    vr: VR,
    length: Length,
    header_position: u64,
    un_as_ivr_le: bool,
    fragment: Option<FragmentState>,
    bulk_files: Option<BulkDataFiles>,
    bulk_refs: Vec<BulkDataReference>,
}

impl<R> fmt::Debug for DicomInputStream<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DicomInputStream")
            .field("position", &self.pos)
            .field("transfer_syntax", &self.ts)
            .field("depth", &self.contexts.len())
            .field("tag", &self.tag)
            .field("vr", &self.vr)
            .field("length", &self.length)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl DicomInputStream<BufReader<File>> {
    /// Open a file for reading,
    /// with the file's path known for bulk data references.
    pub fn open_file<P>(path: P, options: DicomInputOptions) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).context(OpenFileSnafu { path })?;
        DicomInputStream::with_options(BufReader::new(file), options.source_path(path))
    }
}

impl<R: Read> DicomInputStream<R> {
    /// Create a stream with the default options,
    /// recognizing the transfer syntax of the source.
    pub fn new(source: R) -> Result<Self> {
        Self::with_options(source, DicomInputOptions::default())
    }

    /// Create a stream recognizing the transfer syntax of the source.
    pub fn with_options(source: R, options: DicomInputOptions) -> Result<Self> {
        let mut dis = Self::unstarted(source, options, TransferSyntaxInfo::native("", true, false));
        let ts = dis.detect_transfer_syntax()?;
        dis.set_transfer_syntax(ts);
        Ok(dis)
    }

    /// Create a stream over a data set without file meta group
    /// in the given transfer syntax.
    ///
    /// A deflated transfer syntax is inflated from the start.
    pub fn with_transfer_syntax(source: R, uid: &str, options: DicomInputOptions) -> Result<Self> {
        let ts = TransferSyntaxInfo::from_uid(uid);
        let deflated = ts.deflated;
        let mut dis = Self::unstarted(source, options, ts.clone());
        dis.set_transfer_syntax(ts);
        dis.meta_read = true;
        if deflated {
            dis.src.start_inflating().context(InflateSnafu)?;
        }
        Ok(dis)
    }

    fn unstarted(source: R, options: DicomInputOptions, ts: TransferSyntaxInfo) -> Self {
        DicomInputStream {
            src: Pushback::new(Source::Plain(source)),
            pos: 0,
            options,
            dict: StandardDataDictionary,
            contexts: vec![DatasetContext::root(ts.explicit_vr, ts.big_endian)],
            ts,
            file_meta: None,
            meta_read: false,
            tag: Tag(0, 0),
            vr: VR::UN,
            length: Length(0),
            header_position: 0,
            un_as_ivr_le: false,
            fragment: None,
            bulk_files: None,
            bulk_refs: Vec::new(),
        }
    }

    fn set_transfer_syntax(&mut self, ts: TransferSyntaxInfo) {
        if let Some(root) = self.contexts.first_mut() {
            root.explicit_vr = ts.explicit_vr;
            root.big_endian = ts.big_endian;
        }
        self.ts = ts;
    }

    /// Recognize the transfer syntax from the first bytes of the source,
    /// without consuming them.
    ///
    /// A `DICM` code after a 128-byte preamble
    /// means a file meta group in explicit VR little endian.
    /// Otherwise, the first element header is matched
    /// against the standard dictionary,
    /// in little endian and then in big endian byte order.
    pub fn detect_transfer_syntax(&mut self) -> Result<TransferSyntaxInfo> {
        let position = self.pos;
        let head = self
            .src
            .peek(132)
            .context(PeekSourceSnafu { position })?
            .to_vec();

        if head.len() == 132 && head[128..132] == DICM_MAGIC_CODE {
            return Ok(TransferSyntaxInfo {
                has_file_meta: true,
                has_preamble: true,
                ..TransferSyntaxInfo::native(uids::EXPLICIT_VR_LITTLE_ENDIAN, true, false)
            });
        }

        if head.len() >= 8 {
            for big_endian in [false, true] {
                if let Some(explicit_vr) = self.guess_encoding(&head, big_endian)? {
                    let uid = match (explicit_vr, big_endian) {
                        (true, true) => uids::EXPLICIT_VR_BIG_ENDIAN,
                        (true, false) => uids::EXPLICIT_VR_LITTLE_ENDIAN,
                        _ => uids::IMPLICIT_VR_LITTLE_ENDIAN,
                    };
                    let first_tag = byte_order::bytes_to_tag(&head, 0, big_endian);
                    debug!("Recognized {} from first element {}", uid, first_tag);
                    return Ok(TransferSyntaxInfo {
                        has_file_meta: first_tag.is_file_meta(),
                        ..TransferSyntaxInfo::native(uid, explicit_vr, big_endian)
                    });
                }
            }
        }

        match &self.options.fallback_transfer_syntax {
            Some(uid) => {
                warn!(
                    "Could not recognize the transfer syntax, falling back to {}",
                    uid
                );
                Ok(TransferSyntaxInfo::from_uid(uid))
            }
            None => NotADicomStreamSnafu.fail(),
        }
    }

    /// Try to interpret the first element header in the given byte order.
    /// Returns whether the header is explicit VR,
    /// or `None` if it makes no sense in that byte order.
    fn guess_encoding(&self, head: &[u8], big_endian: bool) -> Result<Option<bool>> {
        let tag = byte_order::bytes_to_tag(head, 0, big_endian);
        let allowed = match self.dict.by_tag(tag) {
            Some(entry) if entry.vr().relaxed() != VR::UN => entry.vr(),
            _ => return Ok(None),
        };
        if byte_order::bytes_to_vr(head, 4).map_or(false, |vr| allowed.allows(vr)) {
            return Ok(Some(true));
        }
        let len = byte_order::bytes_to_int(head, 4, big_endian);
        if len < 0 || 8 + i64::from(len) > head.len() as i64 {
            return Ok(None);
        }
        if big_endian {
            return ImplicitVrBigEndianSnafu.fail();
        }
        Ok(Some(false))
    }

    /// Read the file meta group, if the stream has one
    /// and it was not read yet.
    ///
    /// The group ends where its group length says,
    /// or, lacking a group length, before the first element of another group.
    /// The transfer syntax of the data set is then taken from the group:
    /// a missing or unknown transfer syntax
    /// is assumed to be explicit VR little endian.
    /// A deflated data set starts being inflated.
    pub fn read_file_meta_information(&mut self) -> Result<Option<&FileMetaTable>> {
        if self.meta_read {
            return Ok(self.file_meta.as_ref());
        }
        self.meta_read = true;
        if !self.ts.has_file_meta {
            return Ok(None);
        }
        if self.ts.has_preamble {
            self.skip(132)?;
        }

        let mut elements = Vec::new();
        let mut end = None;
        loop {
            if let Some(end) = end {
                if self.pos >= end {
                    break;
                }
            }
            let position = self.pos;
            let big_endian = self.ts.big_endian;
            let head = self.src.peek(4).context(PeekSourceSnafu { position })?;
            if head.len() < 4 {
                break;
            }
            let tag = byte_order::bytes_to_tag(head, 0, big_endian);
            if !tag.is_file_meta() {
                if end.is_some() {
                    warn!(
                        "File meta group ended at {:#x}, before its stated length",
                        position
                    );
                }
                break;
            }
            self.read_header()?;
            let bytes = self.read_value_bytes()?;
            if self.tag == tags::FILE_META_INFORMATION_GROUP_LENGTH && bytes.len() >= 4 {
                let group_length = byte_order::bytes_to_uint(&bytes, 0, big_endian);
                end = Some(self.pos + u64::from(group_length));
            } else if elements.is_empty() && end.is_none() {
                warn!("Missing File Meta Information Group Length");
            }
            elements.push((self.tag, bytes));
        }

        let meta = FileMetaTable::from_elements(elements);
        let ts = if meta.transfer_syntax().is_empty() {
            warn!("Missing Transfer Syntax UID, assuming explicit VR little endian");
            TransferSyntaxInfo::native(uids::EXPLICIT_VR_LITTLE_ENDIAN, true, false)
        } else {
            TransferSyntaxInfo::from_uid(meta.transfer_syntax())
        };
        let deflated = ts.deflated;
        self.set_transfer_syntax(TransferSyntaxInfo {
            has_file_meta: true,
            has_preamble: self.ts.has_preamble,
            ..ts
        });
        if deflated {
            self.src.start_inflating().context(InflateSnafu)?;
        }
        self.file_meta = Some(meta);
        Ok(self.file_meta.as_ref())
    }

    /// Read the root data set,
    /// after the file meta group if it was not read yet.
    ///
    /// Reading stops after `max_len` bytes if defined,
    /// at the end of the source,
    /// or before the first root element with a tag
    /// greater than or equal to `stop_tag`.
    /// That element's header is not consumed.
    pub fn read_dataset<H>(
        &mut self,
        handler: &mut H,
        max_len: Length,
        stop_tag: Option<Tag>,
    ) -> Result<()>
    where
        H: ?Sized + DicomInputHandler,
    {
        self.read_file_meta_information()?;
        handler.start_dataset(self)?;
        self.read_attributes(handler, max_len, stop_tag)?;
        handler.end_dataset(self)
    }

    /// Read the data elements of the current level,
    /// handing each of them to the handler.
    ///
    /// Inside an item of undefined length,
    /// reading ends at the item delimiter.
    pub fn read_attributes<H>(
        &mut self,
        handler: &mut H,
        len: Length,
        stop_tag: Option<Tag>,
    ) -> Result<()>
    where
        H: ?Sized + DicomInputHandler,
    {
        let end = len.get().map(|len| self.pos + u64::from(len));
        let in_item = self.contexts.len() > 1;
        loop {
            if let Some(end) = end {
                if self.pos >= end {
                    break;
                }
            }
            let position = self.pos;
            let big_endian = self.encoding().1;
            let head = self.src.peek(4).context(PeekSourceSnafu { position })?;
            if head.is_empty() {
                if end.is_some() {
                    return UnexpectedEndOfStreamSnafu {
                        tag: self.tag,
                        position,
                    }
                    .fail();
                }
                break;
            }
            if let Some(stop_tag) = stop_tag {
                if head.len() == 4 {
                    let tag = byte_order::bytes_to_tag(head, 0, big_endian);
                    if tag >= stop_tag {
                        self.tag = tag;
                        break;
                    }
                }
            }

            self.read_header()?;
            match self.tag {
                Tag::ITEM_DELIMITER if in_item => {
                    if self.length.0 != 0 {
                        warn!(
                            "Item delimiter with non-zero length {} at {:#x}",
                            self.length, self.header_position
                        );
                        self.skip_leniently()?;
                    }
                    break;
                }
                Tag::ITEM | Tag::ITEM_DELIMITER | Tag::SEQUENCE_DELIMITER => {
                    warn!(
                        "Unexpected {} at {:#x}, skipped",
                        self.tag, self.header_position
                    );
                    self.skip_leniently()?;
                }
                _ => handler.read_value(self)?,
            }
        }
        Ok(())
    }

    /// The element encoding at the current level.
    fn encoding(&self) -> (bool, bool) {
        self.contexts
            .last()
            .map(|c| (c.explicit_vr, c.big_endian))
            .unwrap_or((self.ts.explicit_vr, self.ts.big_endian))
    }

    fn read_header(&mut self) -> Result<()> {
        let (explicit_vr, big_endian) = self.encoding();
        self.read_header_in(explicit_vr, big_endian)
    }

    fn read_header_in(&mut self, explicit_vr: bool, big_endian: bool) -> Result<()> {
        let position = self.pos;
        let decoder = AnyDecoder::new(explicit_vr, big_endian).context(ImplicitVrBigEndianSnafu)?;
        let mut unknown_code = None;
        let decoded = {
            let dict = &self.dict;
            let contexts = &self.contexts;
            let unknown_code = &mut unknown_code;
            decoder.decode_header_with(&mut self.src, |tag, code| {
                *unknown_code = code;
                dict.vr_of(tag, private_creator_in(contexts, tag))
            })
        };
        let (header, read) = match decoded {
            Ok(decoded) => decoded,
            Err(e) if e.is_eof() => {
                return UnexpectedEndOfStreamSnafu {
                    tag: self.tag,
                    position,
                }
                .fail()
            }
            Err(source) => return Err(Error::ReadHeader { position, source }),
        };
        self.pos += read as u64;
        self.header_position = position;
        self.tag = header.tag();
        self.length = header.length();
        self.un_as_ivr_le = false;
        let mut vr = header.vr();

        if let Some(code) = unknown_code {
            warn!(
                "Unrecognized VR code {:?} of element {} at {:#x}, using {}",
                String::from_utf8_lossy(&code),
                self.tag,
                position,
                vr
            );
        }

        if !self.tag.is_item_or_delimiter() {
            if explicit_vr && vr == VR::UN && unknown_code.is_none() {
                vr = self
                    .dict
                    .vr_of(self.tag, private_creator_in(&self.contexts, self.tag));
                self.un_as_ivr_le = self.options.decode_un_with_ivr_le;
            }
            if vr == VR::UN && self.length.is_undefined() {
                debug!(
                    "Element {} of unknown VR and undefined length read as a sequence",
                    self.tag
                );
                vr = VR::SQ;
            }
        }
        self.vr = vr;
        Ok(())
    }

    /// The tag of the current element header.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The value representation of the current element,
    /// as resolved from the header and the dictionary.
    pub fn vr(&self) -> VR {
        self.vr
    }

    /// The value length of the current element or item.
    pub fn length(&self) -> Length {
        self.length
    }

    /// The position right after the last header or value read,
    /// counted in bytes from the start of the stream.
    /// After inflation starts, inflated bytes are counted.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// The position of the current element header.
    pub fn header_position(&self) -> u64 {
        self.header_position
    }

    /// The transfer syntax of the stream.
    pub fn transfer_syntax(&self) -> &TransferSyntaxInfo {
        &self.ts
    }

    /// The file meta group, if it was read.
    pub fn file_meta(&self) -> Option<&FileMetaTable> {
        self.file_meta.as_ref()
    }

    /// Take the file meta group out of the stream.
    pub fn take_file_meta(&mut self) -> Option<FileMetaTable> {
        self.file_meta.take()
    }

    /// The options of the stream.
    pub fn options(&self) -> &DicomInputOptions {
        &self.options
    }

    /// Whether the element headers at the current level state the VR.
    pub fn is_explicit_vr(&self) -> bool {
        self.encoding().0
    }

    /// Whether the values at the current level are big endian.
    pub fn is_big_endian(&self) -> bool {
        self.encoding().1
    }

    /// Whether the value of the current element is big endian.
    ///
    /// Values stated as `UN` are little endian
    /// when decoded as implicit VR little endian.
    pub fn is_value_big_endian(&self) -> bool {
        !self.un_as_ivr_le && self.encoding().1
    }

    /// The state of the current level.
    pub fn context(&self) -> Option<&DatasetContext> {
        self.contexts.last()
    }

    /// The states of all levels, from the root data set.
    pub fn contexts(&self) -> &[DatasetContext] {
        &self.contexts
    }

    /// The number of items enclosing the current element.
    pub fn depth(&self) -> usize {
        self.contexts.len() - 1
    }

    /// The items enclosing the current element,
    /// including the current fragment of an encapsulated value.
    pub fn item_path(&self) -> ItemPath {
        let mut path = self.element_path();
        if let Some(fragment) = &self.fragment {
            path.push(fragment.pointer.clone());
        }
        path
    }

    fn element_path(&self) -> ItemPath {
        self.contexts
            .iter()
            .filter_map(|c| c.item.clone())
            .collect()
    }

    /// The private creator reserving the block of a private tag
    /// at the current level.
    pub fn private_creator(&self, tag: Tag) -> Option<&str> {
        private_creator_in(&self.contexts, tag)
    }

    /// The bulk data references created so far,
    /// if the stream keeps them.
    pub fn bulk_data_references(&self) -> &[BulkDataReference] {
        &self.bulk_refs
    }

    /// Take the temporary files holding spilled bulk data,
    /// along with the responsibility to keep them alive
    /// while references into them are in use.
    pub fn take_bulk_data_files(&mut self) -> Option<BulkDataFiles> {
        self.bulk_files.take()
    }

    /// Read the value of the current element in full.
    ///
    /// The buffer grows as bytes arrive,
    /// following [`allocation_schedule`].
    /// No byte order conversion is made.
    pub fn read_value_bytes(&mut self) -> Result<Vec<u8>> {
        let tag = self.tag;
        let len = self
            .length
            .get()
            .context(UndefinedValueLengthSnafu { tag })?;
        let mut buf = Vec::new();
        let mut filled = 0;
        for size in allocation_schedule(len, self.options.allocate_limit) {
            buf.resize(size, 0);
            let position = self.pos;
            match self.src.read_exact(&mut buf[filled..]) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    return UnexpectedEndOfStreamSnafu { tag, position }.fail();
                }
                Err(source) => {
                    return Err(source).context(ReadValueSnafu { tag, position });
                }
            }
            self.pos += (size - filled) as u64;
            filled = size;
        }
        Ok(buf)
    }

    /// Skip the value of the current element.
    pub fn skip_value(&mut self) -> Result<()> {
        match self.length.get() {
            Some(len) => self.skip(u64::from(len)),
            None => UndefinedValueLengthSnafu { tag: self.tag }.fail(),
        }
    }

    fn skip(&mut self, n: u64) -> Result<()> {
        let position = self.pos;
        let skipped = self.skip_up_to(n)?;
        if skipped < n {
            return UnexpectedEndOfStreamSnafu {
                tag: self.tag,
                position: position + skipped,
            }
            .fail();
        }
        Ok(())
    }

    fn skip_up_to(&mut self, n: u64) -> Result<u64> {
        let position = self.pos;
        let skipped = io::copy(&mut (&mut self.src).take(n), &mut io::sink())
            .context(ReadValueSnafu {
                tag: self.tag,
                position,
            })?;
        self.pos += skipped;
        Ok(skipped)
    }

    /// Skip the value of a delimiter,
    /// tolerating the end of the stream.
    fn skip_leniently(&mut self) -> Result<()> {
        if let Some(len) = self.length.get() {
            let skipped = self.skip_up_to(u64::from(len))?;
            if skipped < u64::from(len) {
                warn!("Stream ended while skipping {}", self.tag);
            }
        }
        Ok(())
    }

    fn is_bulk_data(&self) -> bool {
        let path = self.element_path();
        self.options.bulk_data_descriptor.is_bulk_data(
            &path,
            self.private_creator(self.tag),
            self.tag,
            self.vr,
            self.length,
        )
    }

    /// Read the primitive value of the current element,
    /// converted to the requested byte order.
    ///
    /// Bulk data is skipped or delivered as a reference,
    /// according to [`DicomInputOptions::include_bulk_data`].
    /// Private creator values are recorded at the current level.
    pub fn read_primitive_value(&mut self, big_endian: bool) -> Result<ValueRead> {
        let value_big_endian = self.is_value_big_endian();
        if self.options.include_bulk_data != IncludeBulkData::Yes && self.is_bulk_data() {
            if self.options.include_bulk_data == IncludeBulkData::No {
                debug!("Skipping bulk data {}", self.tag);
                self.skip_value()?;
                return Ok(ValueRead::Skipped);
            }
            return self.read_bulk_data(value_big_endian).map(ValueRead::BulkData);
        }

        let mut bytes = self.read_value_bytes()?;
        if self.tag.is_private_creator() {
            let creator = String::from_utf8_lossy(&bytes)
                .trim_matches(|c| c == ' ' || c == '\0')
                .to_string();
            let tag = self.tag;
            if let Some(context) = self.contexts.last_mut() {
                context.private_creators.insert(tag, creator);
            }
        }
        if value_big_endian != big_endian {
            if let Err(e) = byte_order::toggle_endian(self.vr, &mut bytes) {
                warn!(
                    "Could not convert byte order of {} {}: {}",
                    self.tag, self.vr, e
                );
            }
        }
        Ok(ValueRead::Bytes(bytes))
    }

    fn read_bulk_data(&mut self, big_endian: bool) -> Result<BulkData> {
        let tag = self.tag;
        let len = self
            .length
            .get()
            .context(UndefinedValueLengthSnafu { tag })?;
        let source_path = match &self.options.source_path {
            Some(path) if !self.ts.deflated => Some(path.clone()),
            _ => None,
        };
        let bulk = match source_path {
            Some(path) => {
                let bulk = BulkData::in_file(path, self.pos, len, big_endian);
                self.skip(u64::from(len))?;
                bulk
            }
            None => {
                let options = &self.options;
                let files = self.bulk_files.get_or_insert_with(|| {
                    BulkDataFiles::new(
                        options.bulk_data_file_prefix.clone(),
                        options.bulk_data_file_suffix.clone(),
                        options.bulk_data_directory.clone(),
                        options.concatenate_bulk_data_files,
                    )
                });
                let position = self.pos;
                let bulk = match files.spill(&mut self.src, len, big_endian) {
                    Ok(bulk) => bulk,
                    Err(bulkdata::Error::Truncated { actual, .. }) => {
                        return UnexpectedEndOfStreamSnafu {
                            tag,
                            position: position + actual,
                        }
                        .fail();
                    }
                    Err(source) => return Err(source).context(StoreBulkDataSnafu { tag }),
                };
                self.pos += u64::from(len);
                bulk
            }
        };
        if self.options.add_bulk_data_references {
            let (tag, vr, fragment) = match &self.fragment {
                Some(f) => (f.tag, f.vr, Some(f.pointer.item_index)),
                None => (self.tag, self.vr, None),
            };
            let reference = BulkDataReference {
                item_path: self.element_path(),
                private_creator: self.private_creator(tag).map(str::to_string),
                tag,
                vr,
                fragment,
                bulk_data: bulk.clone(),
            };
            self.bulk_refs.push(reference);
        }
        Ok(bulk)
    }

    /// Read the next item header of a sequence or encapsulated value.
    ///
    /// Returns `false` at the sequence delimiter.
    /// Other elements are skipped with a warning.
    fn read_item_header(&mut self, explicit_vr: bool, big_endian: bool) -> Result<bool> {
        loop {
            let position = self.pos;
            let head = self.src.peek(8).context(PeekSourceSnafu { position })?;
            if head.is_empty() {
                warn!("Stream ended at {:#x}, expected an item", position);
                return Ok(false);
            }
            self.read_header_in(explicit_vr, big_endian)?;
            match self.tag {
                Tag::ITEM => return Ok(true),
                Tag::SEQUENCE_DELIMITER => {
                    if self.length.0 != 0 {
                        warn!(
                            "Sequence delimiter with non-zero length {} at {:#x}",
                            self.length, position
                        );
                        self.skip_leniently()?;
                    }
                    return Ok(false);
                }
                _ => {
                    warn!(
                        "Unexpected element {} at {:#x}, expected an item",
                        self.tag, position
                    );
                    if self.length.is_undefined() {
                        return Ok(false);
                    }
                    self.skip_leniently()?;
                }
            }
        }
    }

    /// Read the items of the current sequence element,
    /// calling back [`read_item`](DicomInputHandler::read_item)
    /// once per item.
    ///
    /// Items of a sequence stated as `UN`
    /// are read in implicit VR little endian
    /// if [`decode_un_with_ivr_le`](DicomInputOptions::decode_un_with_ivr_le) is set.
    /// Afterwards, the header accessors describe the sequence element again.
    pub fn read_sequence<H>(&mut self, handler: &mut H) -> Result<()>
    where
        H: ?Sized + DicomInputHandler,
    {
        let (tag, vr, length, un_as_ivr_le) = (self.tag, self.vr, self.length, self.un_as_ivr_le);
        let private_creator = self.private_creator(tag).map(str::to_string);
        let (explicit_vr, big_endian) = if un_as_ivr_le {
            (false, false)
        } else {
            self.encoding()
        };
        let end = length.get().map(|len| self.pos + u64::from(len));
        let mut item_index = 0;
        loop {
            if let Some(end) = end {
                if self.pos >= end {
                    break;
                }
            }
            if !self.read_item_header(explicit_vr, big_endian)? {
                break;
            }
            let item = ItemPointer {
                sequence_tag: tag,
                private_creator: private_creator.clone(),
                item_index,
            };
            self.contexts
                .push(DatasetContext::item(explicit_vr, big_endian, item, self.length));
            let result = handler.read_item(self);
            self.contexts.pop();
            result?;
            item_index += 1;
        }
        if let Some(end) = end {
            if self.pos != end {
                warn!(
                    "Sequence {} ended at {:#x} instead of {:#x}",
                    tag, self.pos, end
                );
            }
        }
        self.tag = tag;
        self.vr = vr;
        self.length = length;
        self.un_as_ivr_le = un_as_ivr_le;
        Ok(())
    }

    /// Read the data set of the current item,
    /// handing its elements to the handler.
    pub fn read_item_dataset<H>(&mut self, handler: &mut H) -> Result<()>
    where
        H: ?Sized + DicomInputHandler,
    {
        let length = self
            .contexts
            .last()
            .filter(|c| c.item.is_some())
            .map(|c| c.item_length)
            .unwrap_or(Length::UNDEFINED);
        self.read_attributes(handler, length, None)
    }

    /// Read the fragments of the current encapsulated value,
    /// calling back [`read_fragment`](DicomInputHandler::read_fragment)
    /// once per fragment.
    ///
    /// Afterwards, the header accessors describe the encapsulated element again.
    pub fn read_fragments<H>(&mut self, handler: &mut H) -> Result<()>
    where
        H: ?Sized + DicomInputHandler,
    {
        let (tag, vr, length, un_as_ivr_le) = (self.tag, self.vr, self.length, self.un_as_ivr_le);
        let private_creator = self.private_creator(tag).map(str::to_string);
        let (explicit_vr, big_endian) = if un_as_ivr_le {
            (false, false)
        } else {
            self.encoding()
        };
        let mut item_index = 0;
        while self.read_item_header(explicit_vr, big_endian)? {
            self.fragment = Some(FragmentState {
                tag,
                vr,
                big_endian,
                pointer: ItemPointer {
                    sequence_tag: tag,
                    private_creator: private_creator.clone(),
                    item_index,
                },
            });
            let result = handler.read_fragment(self);
            self.fragment = None;
            result?;
            item_index += 1;
        }
        self.tag = tag;
        self.vr = vr;
        self.length = length;
        self.un_as_ivr_le = un_as_ivr_le;
        Ok(())
    }

    /// Read the current fragment of an encapsulated value.
    ///
    /// Returns `None` if the fragment is bulk data and was skipped.
    pub fn read_fragment_value(&mut self) -> Result<Option<Fragment>> {
        let (tag, vr, big_endian) = match &self.fragment {
            Some(f) => (f.tag, f.vr, f.big_endian),
            None => (self.tag, self.vr, self.is_value_big_endian()),
        };
        if self.length.0 == 0 {
            return Ok(Some(Fragment::Bytes(Vec::new())));
        }
        if self.options.include_bulk_data != IncludeBulkData::Yes {
            let path = self.element_path();
            let bulk = self.options.bulk_data_descriptor.is_bulk_data(
                &path,
                self.private_creator(tag),
                tag,
                vr,
                Length::UNDEFINED,
            );
            if bulk {
                if self.options.include_bulk_data == IncludeBulkData::No {
                    self.skip_value()?;
                    return Ok(None);
                }
                return self
                    .read_bulk_data(big_endian)
                    .map(|b| Some(Fragment::BulkData(b)));
            }
        }
        self.read_value_bytes().map(|b| Some(Fragment::Bytes(b)))
    }
}
