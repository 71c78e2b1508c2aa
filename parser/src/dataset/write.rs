//! This module contains [`DicomOutputStream`],
//! a writer of DICOM files and data sets in a native transfer syntax.
//!
//! The writer takes data elements as [`Value`]s,
//! through the [`EncodeValue`] trait,
//! and whole data sets through the [`WriteDataSet`] trait.
//! Lower level methods write element headers, values
//! and item delimitation by hand,
//! which is what a streaming transcoder needs.
use crate::meta::{FileMetaTable, DICM_MAGIC_CODE};
use dicomio_core::header::{DataElementHeader, Length};
use dicomio_core::{BulkData, Fragment, Tag, Value, VR};
use dicomio_encoding::byte_order;
use dicomio_encoding::encode::{
    self, element_header_len, AnyEncoder, Encode, ExplicitVRLittleEndianEncoder,
};
use dicomio_encoding::TransferSyntaxRegistry;
use dicomio_dictionary_std::uids;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use snafu::{Backtrace, OptionExt, ResultExt, Snafu};
use std::fmt;
use std::io::{self, Read, Write};
use tracing::warn;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// Implicit VR big endian is not a valid element encoding.
    #[snafu(display("Implicit VR Big Endian is not supported"))]
    ImplicitVrBigEndian { backtrace: Backtrace },
    /// The file meta group names another transfer syntax
    /// than the one of the stream.
    #[snafu(display(
        "File meta group transfer syntax {} does not match stream transfer syntax {}",
        meta,
        stream
    ))]
    InconsistentTransferSyntax {
        meta: String,
        stream: String,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not write header of element {}", tag))]
    WriteHeader {
        tag: Tag,
        #[snafu(backtrace)]
        source: encode::Error,
    },
    #[snafu(display("Could not write value of element {}", tag))]
    WriteValue {
        tag: Tag,
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not write file preamble"))]
    WritePreamble {
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not open bulk data of element {}", tag))]
    OpenBulkData {
        tag: Tag,
        #[snafu(backtrace)]
        source: dicomio_core::Error,
    },
    #[snafu(display("Could not read bulk data of element {}", tag))]
    ReadBulkData {
        tag: Tag,
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not compute value of element {}", tag))]
    ComputeValue {
        tag: Tag,
        #[snafu(backtrace)]
        source: dicomio_core::Error,
    },
    /// A sequence or encapsulated value was asked for its bytes.
    #[snafu(display("Value of element {} is not primitive", tag))]
    NotPrimitive { tag: Tag, backtrace: Backtrace },
    #[snafu(display("Could not finish the output"))]
    Finish {
        source: io::Error,
        backtrace: Backtrace,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

const BULK_DATA_CHUNK: usize = 8192;

/// Options for encoding data sets.
///
/// Lengths of sequences and items are undefined by default,
/// except for empty ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct EncodeOptions {
    /// Whether group length elements are written, `false` by default
    pub group_length: bool,
    /// Whether sequences are written with undefined length
    pub undefined_sequence_length: bool,
    /// Whether sequences without items are written with undefined length
    pub undefined_empty_sequence_length: bool,
    /// Whether items are written with undefined length
    pub undefined_item_length: bool,
    /// Whether items without elements are written with undefined length
    pub undefined_empty_item_length: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            group_length: false,
            undefined_sequence_length: true,
            undefined_empty_sequence_length: false,
            undefined_item_length: true,
            undefined_empty_item_length: false,
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write all sequences and items with defined length.
    pub fn defined_lengths() -> Self {
        EncodeOptions {
            undefined_sequence_length: false,
            undefined_item_length: false,
            ..Self::default()
        }
    }

    pub fn group_length(mut self, group_length: bool) -> Self {
        self.group_length = group_length;
        self
    }

    pub fn undefined_sequence_length(mut self, undefined: bool) -> Self {
        self.undefined_sequence_length = undefined;
        self
    }

    pub fn undefined_empty_sequence_length(mut self, undefined: bool) -> Self {
        self.undefined_empty_sequence_length = undefined;
        self
    }

    pub fn undefined_item_length(mut self, undefined: bool) -> Self {
        self.undefined_item_length = undefined;
        self
    }

    pub fn undefined_empty_item_length(mut self, undefined: bool) -> Self {
        self.undefined_empty_item_length = undefined;
        self
    }

    fn sequence_length_undefined(&self, empty: bool) -> bool {
        self.undefined_sequence_length && (!empty || self.undefined_empty_sequence_length)
    }

    fn item_length_undefined(&self, empty: bool) -> bool {
        self.undefined_item_length && (!empty || self.undefined_empty_item_length)
    }
}

/// A data set which can be written to a [`DicomOutputStream`]:
/// an ordered collection of elements whose sequence items
/// are data sets of the same kind.
pub trait WriteDataSet: Sized {
    /// Iterate over the elements in ascending tag order.
    fn elements(&self) -> Box<dyn Iterator<Item = (Tag, VR, &Value<Self>)> + '_>;
}

/// A value which can be encoded by a [`DicomOutputStream`].
pub trait EncodeValue {
    /// Whether the value has nothing to encode.
    fn is_empty(&self) -> bool;

    /// The bytes of a primitive value in the given byte order,
    /// without padding.
    fn to_bytes(&self, tag: Tag, vr: VR, big_endian: bool) -> Result<Vec<u8>>;

    /// The length of the encoded value field,
    /// padding, items and fragments included,
    /// but not the closing sequence delimiter.
    fn calc_length(&self, tag: Tag, options: &EncodeOptions, explicit_vr: bool, vr: VR)
        -> Result<u32>;

    /// The length to state in the element header,
    /// which may be undefined.
    fn encoded_length(
        &self,
        tag: Tag,
        options: &EncodeOptions,
        explicit_vr: bool,
        vr: VR,
    ) -> Result<Length>;

    /// Write the whole element: header, value and delimitation.
    fn write_to<W: Write>(&self, out: &mut DicomOutputStream<W>, tag: Tag, vr: VR) -> Result<()>;
}

fn padded(len: u32) -> u32 {
    len + (len & 1)
}

fn value_error(tag: Tag) -> impl FnOnce(dicomio_core::Error) -> Error {
    move |source| Error::ComputeValue { tag, source }
}

/// The length of a whole data set as written with the given options,
/// group lengths included if enabled.
pub fn dataset_length<D>(dataset: &D, options: &EncodeOptions, explicit_vr: bool) -> Result<u32>
where
    D: WriteDataSet,
{
    let mut len = 0;
    let mut group = None;
    for (tag, vr, value) in dataset.elements() {
        if tag.is_group_length() {
            continue;
        }
        if options.group_length && group != Some(tag.group()) {
            group = Some(tag.group());
            len += 12;
        }
        len += element_length(value, tag, options, explicit_vr, vr)?;
    }
    Ok(len)
}

/// The length of a whole element as written with the given options:
/// header, value field and closing delimiter.
pub fn element_length<V>(
    value: &V,
    tag: Tag,
    options: &EncodeOptions,
    explicit_vr: bool,
    vr: VR,
) -> Result<u32>
where
    V: ?Sized + EncodeValue,
{
    let calc = value.calc_length(tag, options, explicit_vr, vr)?;
    let encoded = value.encoded_length(tag, options, explicit_vr, vr)?;
    let header = element_header_len(explicit_vr, vr, encoded.get().unwrap_or(0));
    let delimiter = if encoded.is_undefined() { 8 } else { 0 };
    Ok(header + calc + delimiter)
}

impl<I: WriteDataSet> EncodeValue for Value<I> {
    fn is_empty(&self) -> bool {
        Value::is_empty(self)
    }

    fn to_bytes(&self, tag: Tag, vr: VR, big_endian: bool) -> Result<Vec<u8>> {
        let (mut bytes, source_big_endian) = match self {
            Value::Empty => return Ok(Vec::new()),
            Value::Primitive(bytes) => (bytes.clone(), false),
            Value::Deferred(deferred) => (deferred.get().map_err(value_error(tag))?.to_vec(), false),
            Value::BulkData(bulk) => (
                bulk.read_bytes().context(OpenBulkDataSnafu { tag })?,
                bulk.big_endian,
            ),
            Value::Sequence(_) | Value::Fragments(_) => return NotPrimitiveSnafu { tag }.fail(),
        };
        if source_big_endian != big_endian {
            if let Err(e) = byte_order::toggle_endian(vr, &mut bytes) {
                warn!("Could not convert byte order of {} {}: {}", tag, vr, e);
            }
        }
        Ok(bytes)
    }

    fn calc_length(
        &self,
        tag: Tag,
        options: &EncodeOptions,
        explicit_vr: bool,
        _vr: VR,
    ) -> Result<u32> {
        match self {
            Value::Empty => Ok(0),
            Value::Primitive(bytes) => Ok(padded(bytes.len() as u32)),
            Value::BulkData(bulk) => Ok(padded(bulk.length)),
            Value::Deferred(deferred) => deferred
                .len()
                .map(padded)
                .map_err(value_error(tag)),
            Value::Sequence(items) => items.iter().try_fold(0, |acc, item| {
                let len = dataset_length(item, options, explicit_vr)?;
                let delimiter = if options.item_length_undefined(len == 0) {
                    8
                } else {
                    0
                };
                Ok(acc + 8 + len + delimiter)
            }),
            Value::Fragments(fragments) => Ok(fragments
                .iter()
                .map(|f| 8 + padded(f.len()))
                .sum()),
        }
    }

    fn encoded_length(
        &self,
        tag: Tag,
        options: &EncodeOptions,
        explicit_vr: bool,
        vr: VR,
    ) -> Result<Length> {
        match self {
            Value::Sequence(items) => {
                if options.sequence_length_undefined(items.is_empty()) {
                    Ok(Length::UNDEFINED)
                } else {
                    self.calc_length(tag, options, explicit_vr, vr).map(Length)
                }
            }
            Value::Fragments(_) => Ok(Length::UNDEFINED),
            _ => self.calc_length(tag, options, explicit_vr, vr).map(Length),
        }
    }

    fn write_to<W: Write>(&self, out: &mut DicomOutputStream<W>, tag: Tag, vr: VR) -> Result<()> {
        match self {
            Value::Empty => out.write_header(tag, vr, Length(0)),
            Value::Primitive(_) | Value::Deferred(_) => {
                let options = *out.options();
                let len = self.calc_length(tag, &options, out.is_explicit_vr(), vr)?;
                let bytes = self.to_bytes(tag, vr, out.is_value_big_endian(vr, len))?;
                out.write_header(tag, vr, Length(len))?;
                out.write_value_bytes(tag, vr, &bytes)
            }
            Value::BulkData(bulk) => {
                out.write_header(tag, vr, Length(padded(bulk.length)))?;
                out.write_bulk_data(tag, vr, bulk)
            }
            Value::Sequence(items) => {
                let options = *out.options();
                let explicit_vr = out.is_explicit_vr();
                let length = self.encoded_length(tag, &options, explicit_vr, vr)?;
                out.write_header(tag, vr, length)?;
                for item in items {
                    let len = dataset_length(item, &options, explicit_vr)?;
                    let undefined = options.item_length_undefined(len == 0);
                    out.write_item_header(if undefined {
                        Length::UNDEFINED
                    } else {
                        Length(len)
                    })?;
                    out.write_dataset(item)?;
                    if undefined {
                        out.write_item_delimiter()?;
                    }
                }
                if length.is_undefined() {
                    out.write_sequence_delimiter()?;
                }
                Ok(())
            }
            Value::Fragments(fragments) => {
                out.write_header(tag, vr, Length::UNDEFINED)?;
                for fragment in fragments {
                    match fragment {
                        Fragment::Bytes(bytes) => out.write_fragment(tag, bytes)?,
                        Fragment::BulkData(bulk) => {
                            out.write_item_header(Length(padded(bulk.length)))?;
                            out.write_bulk_data(tag, VR::OB, bulk)?;
                        }
                    }
                }
                out.write_sequence_delimiter()
            }
        }
    }
}

/// A writer counting the bytes passed through it.
#[derive(Debug)]
struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

enum Sink<W: Write> {
    Plain(CountingWriter<W>),
    Deflate(DeflateEncoder<CountingWriter<W>>),
    /// left behind while switching to deflation
    Detached,
}

impl<W: Write> Write for Sink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Plain(w) => w.write(buf),
            Sink::Deflate(w) => w.write(buf),
            Sink::Detached => Err(io::Error::new(
                io::ErrorKind::Other,
                "output detached after a failed switch to deflation",
            )),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Plain(w) => w.flush(),
            Sink::Deflate(w) => w.flush(),
            Sink::Detached => Ok(()),
        }
    }
}

/// A writer of DICOM data sets in a native transfer syntax.
///
/// ```
/// # use dicomio_parser::{DicomOutputStream, FileMetaTableBuilder};
/// # use dicomio_core::{Tag, Value, VR};
/// # use dicomio_core::header::Length;
/// # use dicomio_dictionary_std::uids;
/// let meta = FileMetaTableBuilder::new()
///     .media_storage_sop_class_uid(uids::CT_IMAGE_STORAGE)
///     .media_storage_sop_instance_uid("2.25.1")
///     .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
///     .build()?;
/// let mut out = DicomOutputStream::new(Vec::new(), uids::EXPLICIT_VR_LITTLE_ENDIAN)?;
/// out.write_file_meta_information(&meta)?;
/// out.write_header(Tag(0x0010, 0x0020), VR::LO, Length(4))?;
/// out.write_value_bytes(Tag(0x0010, 0x0020), VR::LO, b"1234")?;
/// let bytes = out.finish()?;
/// assert_eq!(&bytes[128..132], b"DICM");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct DicomOutputStream<W: Write> {
    sink: Sink<W>,
    uid: String,
    encoder: AnyEncoder,
    explicit_vr: bool,
    big_endian: bool,
    deflate_pending: bool,
    options: EncodeOptions,
}

impl<W: Write> fmt::Debug for DicomOutputStream<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DicomOutputStream")
            .field("transfer_syntax", &self.uid)
            .field("explicit_vr", &self.explicit_vr)
            .field("big_endian", &self.big_endian)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<W: Write> DicomOutputStream<W> {
    /// Create a writer of the given transfer syntax.
    ///
    /// Unknown transfer syntaxes are written in explicit VR little endian.
    /// Encapsulated transfer syntaxes
    /// are written in explicit VR little endian as well,
    /// leaving the encapsulation to the values.
    /// A deflated transfer syntax starts deflating
    /// after the file meta group,
    /// or right away if the first thing written is not the file meta group.
    pub fn new(to: W, uid: &str) -> Result<Self> {
        match TransferSyntaxRegistry.get(uid) {
            Some(ts) => Self::with_encoding(
                to,
                uid,
                ts.is_explicit_vr(),
                ts.is_big_endian(),
                ts.is_deflated(),
            ),
            None => {
                warn!(
                    "Unknown transfer syntax {}, writing explicit VR little endian",
                    uid
                );
                Self::with_encoding(to, uid, true, false, false)
            }
        }
    }

    /// Create a writer of a native element encoding.
    pub fn with_transfer_syntax(to: W, explicit_vr: bool, big_endian: bool) -> Result<Self> {
        let uid = match (explicit_vr, big_endian) {
            (true, true) => uids::EXPLICIT_VR_BIG_ENDIAN,
            (true, false) => uids::EXPLICIT_VR_LITTLE_ENDIAN,
            _ => uids::IMPLICIT_VR_LITTLE_ENDIAN,
        };
        Self::with_encoding(to, uid, explicit_vr, big_endian, false)
    }

    fn with_encoding(
        to: W,
        uid: &str,
        explicit_vr: bool,
        big_endian: bool,
        deflated: bool,
    ) -> Result<Self> {
        let encoder = AnyEncoder::new(explicit_vr, big_endian).context(ImplicitVrBigEndianSnafu)?;
        Ok(DicomOutputStream {
            sink: Sink::Plain(CountingWriter {
                inner: to,
                count: 0,
            }),
            uid: uid.trim_end_matches(|c| c == '\0' || c == ' ').to_string(),
            encoder,
            explicit_vr,
            big_endian,
            deflate_pending: deflated,
            options: EncodeOptions::default(),
        })
    }

    /// Set the encoding options of the writer.
    pub fn with_options(mut self, options: EncodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// The transfer syntax UID of the data set.
    pub fn transfer_syntax(&self) -> &str {
        &self.uid
    }

    pub fn is_explicit_vr(&self) -> bool {
        self.explicit_vr
    }

    pub fn is_big_endian(&self) -> bool {
        self.big_endian
    }

    /// Whether a value of the given representation and encoded length
    /// is written in big endian.
    ///
    /// A value whose header is promoted to `UN` in explicit VR big endian
    /// is written in little endian,
    /// like every other `UN` value.
    pub fn is_value_big_endian(&self, vr: VR, len: u32) -> bool {
        self.big_endian && !(self.explicit_vr && encode::header_vr(vr, len) == VR::UN)
    }

    /// The number of bytes passed on to the underlying writer so far,
    /// after compression if the output is deflated.
    pub fn bytes_written(&self) -> u64 {
        match &self.sink {
            Sink::Plain(w) => w.count,
            Sink::Deflate(w) => w.get_ref().count,
            Sink::Detached => 0,
        }
    }

    /// The data set output, deflating from now on if pending.
    fn out(&mut self) -> &mut Sink<W> {
        if self.deflate_pending {
            self.deflate_pending = false;
            if let Sink::Plain(w) = std::mem::replace(&mut self.sink, Sink::Detached) {
                self.sink = Sink::Deflate(DeflateEncoder::new(w, Compression::default()));
            }
        }
        &mut self.sink
    }

    /// Write the preamble, the `DICM` code and the file meta group,
    /// always in explicit VR little endian.
    ///
    /// This must be the first thing written.
    pub fn write_file_meta_information(&mut self, meta: &FileMetaTable) -> Result<()> {
        if meta.transfer_syntax() != self.uid {
            return InconsistentTransferSyntaxSnafu {
                meta: meta.transfer_syntax(),
                stream: self.uid.clone(),
            }
            .fail();
        }
        let sink = &mut self.sink;
        sink.write_all(&[0; 128]).context(WritePreambleSnafu)?;
        sink.write_all(&DICM_MAGIC_CODE).context(WritePreambleSnafu)?;
        let encoder = ExplicitVRLittleEndianEncoder::default();
        for (tag, vr, bytes) in meta.to_elements() {
            let header = DataElementHeader::new(tag, vr, Length(bytes.len() as u32));
            encoder
                .encode_element_header(&mut *sink, header)
                .context(WriteHeaderSnafu { tag })?;
            sink.write_all(&bytes).context(WriteValueSnafu { tag })?;
        }
        Ok(())
    }

    /// Write all elements of a data set.
    ///
    /// Group length elements of the data set are left out,
    /// and written anew if the options say so.
    pub fn write_dataset<D: WriteDataSet>(&mut self, dataset: &D) -> Result<()> {
        let options = self.options;
        let explicit_vr = self.explicit_vr;
        let elements: Vec<_> = dataset
            .elements()
            .filter(|(tag, _, _)| !tag.is_group_length())
            .collect();

        let mut group_lengths = Vec::new();
        if options.group_length {
            for (tag, vr, value) in &elements {
                let len = element_length(*value, *tag, &options, explicit_vr, *vr)?;
                match group_lengths.last_mut() {
                    Some((group, total)) if *group == tag.group() => *total += len,
                    _ => group_lengths.push((tag.group(), len)),
                }
            }
        }

        let mut group_lengths = group_lengths.into_iter().peekable();
        for (tag, vr, value) in elements {
            if let Some((group, len)) = group_lengths.next_if(|(group, _)| *group == tag.group()) {
                let tag = Tag(group, 0x0000);
                let mut bytes = [0; 4];
                byte_order::uint_to_bytes(len, &mut bytes, 0, self.big_endian);
                self.write_header(tag, VR::UL, Length(4))?;
                self.write_value_bytes(tag, VR::UL, &bytes)?;
            }
            value.write_to(self, tag, vr)?;
        }
        Ok(())
    }

    /// Write a whole element.
    pub fn write_element<V>(&mut self, tag: Tag, vr: VR, value: &V) -> Result<()>
    where
        V: ?Sized + EncodeValue,
    {
        value.write_to(self, tag, vr)
    }

    /// Write an element header.
    ///
    /// In explicit VR, a short-form representation
    /// with a length over `0xFFFF` is written as `UN`.
    pub fn write_header(&mut self, tag: Tag, vr: VR, length: Length) -> Result<()> {
        let encoder = self.encoder;
        encoder
            .encode_element_header(self.out(), DataElementHeader::new(tag, vr, length))
            .context(WriteHeaderSnafu { tag })?;
        Ok(())
    }

    /// Write value bytes, already in the byte order of the stream,
    /// padded to even length with the padding of the VR.
    pub fn write_value_bytes(&mut self, tag: Tag, vr: VR, bytes: &[u8]) -> Result<()> {
        let out = self.out();
        out.write_all(bytes).context(WriteValueSnafu { tag })?;
        if bytes.len() % 2 == 1 {
            out.write_all(&[vr.padding()])
                .context(WriteValueSnafu { tag })?;
        }
        Ok(())
    }

    /// Write the bytes of a bulk data reference as a value,
    /// streaming them from their source
    /// and converting their byte order if needed.
    pub fn write_bulk_data(&mut self, tag: Tag, vr: VR, bulk: &BulkData) -> Result<()> {
        let mut reader = bulk.open().context(OpenBulkDataSnafu { tag })?;
        let big_endian = self.is_value_big_endian(vr, padded(bulk.length));
        let swap = bulk.big_endian != big_endian && vr.swap_width().is_some();
        let mut buf = vec![0u8; BULK_DATA_CHUNK];
        let mut remaining = bulk.length as usize;
        let mut swap_failed = false;
        while remaining > 0 {
            let n = remaining.min(buf.len());
            reader
                .read_exact(&mut buf[..n])
                .context(ReadBulkDataSnafu { tag })?;
            if swap && !swap_failed {
                if let Err(e) = byte_order::toggle_endian(vr, &mut buf[..n]) {
                    warn!("Could not convert byte order of {} {}: {}", tag, vr, e);
                    swap_failed = true;
                }
            }
            self.out()
                .write_all(&buf[..n])
                .context(WriteValueSnafu { tag })?;
            remaining -= n;
        }
        if bulk.length % 2 == 1 {
            self.out()
                .write_all(&[vr.padding()])
                .context(WriteValueSnafu { tag })?;
        }
        Ok(())
    }

    /// Write an item of an encapsulated value,
    /// padded to even length.
    pub fn write_fragment(&mut self, tag: Tag, bytes: &[u8]) -> Result<()> {
        self.write_item_header(Length(padded(bytes.len() as u32)))?;
        self.write_value_bytes(tag, VR::OB, bytes)
    }

    pub fn write_item_header(&mut self, length: Length) -> Result<()> {
        let encoder = self.encoder;
        encoder
            .encode_item_header(self.out(), length.0)
            .context(WriteHeaderSnafu { tag: Tag::ITEM })
    }

    pub fn write_item_delimiter(&mut self) -> Result<()> {
        let encoder = self.encoder;
        encoder
            .encode_item_delimiter(self.out())
            .context(WriteHeaderSnafu {
                tag: Tag::ITEM_DELIMITER,
            })
    }

    pub fn write_sequence_delimiter(&mut self) -> Result<()> {
        let encoder = self.encoder;
        encoder
            .encode_sequence_delimiter(self.out())
            .context(WriteHeaderSnafu {
                tag: Tag::SEQUENCE_DELIMITER,
            })
    }

    /// Complete the output and retrieve the underlying writer.
    ///
    /// The deflated stream is finished,
    /// and the output is padded to an even number of bytes.
    pub fn finish(mut self) -> Result<W> {
        self.out();
        let mut counting = match self.sink {
            Sink::Plain(w) => w,
            Sink::Deflate(w) => w.finish().context(FinishSnafu)?,
            Sink::Detached => {
                return Err(io::Error::new(io::ErrorKind::Other, "output detached"))
                    .context(FinishSnafu)
            }
        };
        if counting.count % 2 == 1 {
            counting.write_all(&[0]).context(FinishSnafu)?;
        }
        counting.flush().context(FinishSnafu)?;
        Ok(counting.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::FileMetaTableBuilder;
    use dicomio_core::value::DeferredValue;
    use dicomio_dictionary_std::tags;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct TestSet(Vec<(Tag, VR, Value<TestSet>)>);

    impl WriteDataSet for TestSet {
        fn elements(&self) -> Box<dyn Iterator<Item = (Tag, VR, &Value<Self>)> + '_> {
            Box::new(self.0.iter().map(|(tag, vr, value)| (*tag, *vr, value)))
        }
    }

    fn write_with<F>(explicit_vr: bool, big_endian: bool, f: F) -> Vec<u8>
    where
        F: FnOnce(&mut DicomOutputStream<Vec<u8>>),
    {
        let mut out =
            DicomOutputStream::with_transfer_syntax(Vec::new(), explicit_vr, big_endian).unwrap();
        f(&mut out);
        out.finish().unwrap()
    }

    #[test]
    fn header_shapes() {
        for vr in VR::ALL {
            let bytes = write_with(true, false, |out| {
                out.write_header(tags::PATIENT_ID, vr, Length(4)).unwrap();
            });
            let expected = if vr.has_long_header() { 12 } else { 8 };
            assert_eq!(bytes.len(), expected, "header length of {}", vr);
            assert_eq!(&bytes[4..6], &vr.to_bytes());
        }
        let bytes = write_with(false, false, |out| {
            out.write_header(tags::PIXEL_DATA, VR::OB, Length(4)).unwrap();
        });
        assert_eq!(bytes, [0xE0, 0x7F, 0x10, 0x00, 4, 0, 0, 0]);
    }

    #[test]
    fn long_short_form_value_promoted_to_un() {
        let bytes = write_with(true, false, |out| {
            out.write_header(tags::STUDY_DESCRIPTION, VR::LO, Length(0x1_0000))
                .unwrap();
        });
        assert_eq!(
            bytes,
            [0x08, 0x00, 0x30, 0x10, b'U', b'N', 0, 0, 0x00, 0x00, 0x01, 0x00]
        );
    }

    #[test]
    fn odd_values_padded() {
        let bytes = write_with(true, false, |out| {
            let v: Value<TestSet> = Value::Primitive(b"ABC".to_vec());
            out.write_element(tags::PATIENT_ID, VR::LO, &v).unwrap();
            let v: Value<TestSet> = Value::Primitive(vec![1, 2, 3]);
            out.write_element(tags::PIXEL_DATA, VR::OB, &v).unwrap();
        });
        assert_eq!(&bytes[6..8], &[4, 0]);
        assert_eq!(&bytes[8..12], b"ABC ");
        assert_eq!(&bytes[20..24], &[4, 0, 0, 0]);
        assert_eq!(&bytes[24..28], &[1, 2, 3, 0]);
    }

    #[test]
    fn big_endian_values_swapped() {
        let bytes = write_with(true, true, |out| {
            let v: Value<TestSet> = Value::Primitive(vec![0x01, 0x02, 0x03, 0x04]);
            out.write_element(tags::ROWS, VR::US, &v).unwrap();
        });
        assert_eq!(bytes, [0x00, 0x28, 0x00, 0x10, b'U', b'S', 0, 4, 2, 1, 4, 3]);
    }

    #[test]
    fn promoted_un_values_stay_little_endian() {
        let words: Vec<u8> = (0..35_000u16).flat_map(|w| w.to_le_bytes()).collect();
        let v: Value<TestSet> = Value::Primitive(words.clone());
        let bytes = write_with(true, true, |out| {
            out.write_element(tags::ROWS, VR::US, &v).unwrap();
        });
        assert_eq!(&bytes[4..6], b"UN");
        assert_eq!(&bytes[8..12], &70_000u32.to_be_bytes());
        assert_eq!(&bytes[12..], &words[..]);

        // bulk data of the same length is not swapped either
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&words).unwrap();
        let bulk: Value<TestSet> =
            Value::BulkData(BulkData::in_file(file.path(), 0, words.len() as u32, false));
        let bytes = write_with(true, true, |out| {
            out.write_element(tags::ROWS, VR::US, &bulk).unwrap();
        });
        assert_eq!(&bytes[12..], &words[..]);
    }

    #[test]
    fn deferred_failure_names_element() {
        let value: Value<TestSet> = Value::Deferred(DeferredValue::new(|| {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "gone"))
        }));
        let options = EncodeOptions::default();
        let err = element_length(&value, tags::PATIENT_ID, &options, true, VR::LO).unwrap_err();
        assert!(matches!(err, Error::ComputeValue { tag, .. } if tag == tags::PATIENT_ID));
    }

    #[test]
    fn implicit_big_endian_rejected() {
        let err = DicomOutputStream::with_transfer_syntax(Vec::new(), false, true).unwrap_err();
        assert!(matches!(err, Error::ImplicitVrBigEndian { .. }));
    }

    fn sample() -> TestSet {
        let item = TestSet(vec![(
            tags::CODE_VALUE,
            VR::SH,
            Value::Primitive(b"AB".to_vec()),
        )]);
        TestSet(vec![
            (
                tags::REFERENCED_IMAGE_SEQUENCE,
                VR::SQ,
                Value::Sequence(vec![item, TestSet::default()]),
            ),
            (tags::REFERENCED_SOP_SEQUENCE, VR::SQ, Value::Sequence(vec![])),
            (tags::PATIENT_ID, VR::LO, Value::Primitive(b"42".to_vec())),
        ])
    }

    #[test]
    fn sequences_with_default_options() {
        let bytes = write_with(false, false, |out| out.write_dataset(&sample()).unwrap());
        let mut expected = vec![0x08, 0x00, 0x40, 0x11, 0xFF, 0xFF, 0xFF, 0xFF];
        // first item, undefined length
        expected.extend([0xFE, 0xFF, 0x00, 0xE0, 0xFF, 0xFF, 0xFF, 0xFF]);
        expected.extend([0x08, 0x00, 0x00, 0x01, 2, 0, 0, 0, b'A', b'B']);
        expected.extend([0xFE, 0xFF, 0x0D, 0xE0, 0, 0, 0, 0]);
        // empty item, defined length
        expected.extend([0xFE, 0xFF, 0x00, 0xE0, 0, 0, 0, 0]);
        expected.extend([0xFE, 0xFF, 0xDD, 0xE0, 0, 0, 0, 0]);
        // empty sequence, defined length
        expected.extend([0x08, 0x00, 0x99, 0x11, 0, 0, 0, 0]);
        expected.extend([0x10, 0x00, 0x20, 0x00, 2, 0, 0, 0, b'4', b'2']);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn computed_lengths_match_output() {
        let options_list = [
            EncodeOptions::default(),
            EncodeOptions::defined_lengths(),
            EncodeOptions::default().group_length(true),
            EncodeOptions::defined_lengths()
                .group_length(true)
                .undefined_empty_item_length(true),
            EncodeOptions::default()
                .undefined_empty_sequence_length(true)
                .undefined_empty_item_length(true),
        ];
        let data = sample();
        for options in options_list {
            for (explicit_vr, big_endian) in [(false, false), (true, false), (true, true)] {
                let mut out =
                    DicomOutputStream::with_transfer_syntax(Vec::new(), explicit_vr, big_endian)
                        .unwrap()
                        .with_options(options);
                out.write_dataset(&data).unwrap();
                let bytes = out.finish().unwrap();
                let len = dataset_length(&data, &options, explicit_vr).unwrap();
                assert_eq!(bytes.len() as u32, len, "{:?} {}", options, explicit_vr);
            }
        }
    }

    #[test]
    fn group_lengths_written() {
        let data = TestSet(vec![
            (tags::SOP_INSTANCE_UID, VR::UI, Value::Primitive(b"1.2".to_vec())),
            (Tag(0x0010, 0x0000), VR::UL, Value::Primitive(vec![99, 0, 0, 0])),
            (tags::PATIENT_ID, VR::LO, Value::Primitive(b"42".to_vec())),
        ]);
        let mut out = DicomOutputStream::with_transfer_syntax(Vec::new(), true, false)
            .unwrap()
            .with_options(EncodeOptions::default().group_length(true));
        out.write_dataset(&data).unwrap();
        let bytes = out.finish().unwrap();
        let mut expected = vec![0x08, 0x00, 0x00, 0x00, b'U', b'L', 4, 0, 12, 0, 0, 0];
        expected.extend([0x08, 0x00, 0x18, 0x00, b'U', b'I', 4, 0, b'1', b'.', b'2', 0]);
        expected.extend([0x10, 0x00, 0x00, 0x00, b'U', b'L', 4, 0, 10, 0, 0, 0]);
        expected.extend([0x10, 0x00, 0x20, 0x00, b'L', b'O', 2, 0, b'4', b'2']);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn fragments_always_undefined() {
        let value: Value<TestSet> = Value::Fragments(vec![
            Fragment::Bytes(vec![]),
            Fragment::Bytes(vec![1, 2, 3]),
        ]);
        let bytes = write_with(true, false, |out| {
            out.write_element(tags::PIXEL_DATA, VR::OB, &value).unwrap();
        });
        let mut expected = vec![0xE0, 0x7F, 0x10, 0x00, b'O', b'B', 0, 0, 0xFF, 0xFF, 0xFF, 0xFF];
        expected.extend([0xFE, 0xFF, 0x00, 0xE0, 0, 0, 0, 0]);
        expected.extend([0xFE, 0xFF, 0x00, 0xE0, 4, 0, 0, 0, 1, 2, 3, 0]);
        expected.extend([0xFE, 0xFF, 0xDD, 0xE0, 0, 0, 0, 0]);
        assert_eq!(bytes, expected);
        let options = EncodeOptions::default();
        assert_eq!(
            element_length(&value, tags::PIXEL_DATA, &options, true, VR::OB).unwrap(),
            40
        );
    }

    #[test]
    fn deferred_value_written() {
        let value: Value<TestSet> = Value::Deferred(DeferredValue::new(|| Ok(b"1.2.3".to_vec())));
        let bytes = write_with(true, false, |out| {
            out.write_element(tags::SOP_INSTANCE_UID, VR::UI, &value)
                .unwrap();
        });
        assert_eq!(&bytes[6..8], &[6, 0]);
        assert_eq!(&bytes[8..], b"1.2.3\0");
    }

    #[test]
    fn bulk_data_streamed_with_byte_order_conversion() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[9, 9, 0x00, 0x01, 0x00, 0x02]).unwrap();
        let bulk = BulkData::in_file(file.path(), 2, 4, true);
        let value: Value<TestSet> = Value::BulkData(bulk);
        let bytes = write_with(true, false, |out| {
            out.write_element(tags::PIXEL_DATA, VR::OW, &value).unwrap();
        });
        assert_eq!(&bytes[12..], &[0x01, 0x00, 0x02, 0x00]);
    }

    #[test]
    fn file_meta_and_deflated_data_set() {
        use flate2::read::DeflateDecoder;

        let uid = uids::DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN;
        let meta = FileMetaTableBuilder::new()
            .media_storage_sop_class_uid(uids::CT_IMAGE_STORAGE)
            .media_storage_sop_instance_uid("2.25.7")
            .transfer_syntax(uid)
            .build()
            .unwrap();
        let mut out = DicomOutputStream::new(Vec::new(), uid).unwrap();
        out.write_file_meta_information(&meta).unwrap();
        let meta_len = out.bytes_written() as usize;
        assert_eq!(meta_len, 132 + 12 + meta.information_group_length as usize);
        let v: Value<TestSet> = Value::Primitive(b"42".to_vec());
        out.write_element(tags::PATIENT_ID, VR::LO, &v).unwrap();
        let bytes = out.finish().unwrap();
        assert_eq!(bytes.len() % 2, 0);
        assert_eq!(&bytes[128..132], b"DICM");

        let mut inflated = Vec::new();
        DeflateDecoder::new(&bytes[meta_len..])
            .read_to_end(&mut inflated)
            .unwrap();
        assert_eq!(inflated, [0x10, 0x00, 0x20, 0x00, b'L', b'O', 2, 0, b'4', b'2']);
    }

    #[test]
    fn inconsistent_meta_transfer_syntax() {
        let meta = FileMetaTableBuilder::new()
            .media_storage_sop_class_uid(uids::CT_IMAGE_STORAGE)
            .media_storage_sop_instance_uid("2.25.7")
            .transfer_syntax(uids::IMPLICIT_VR_LITTLE_ENDIAN)
            .build()
            .unwrap();
        let mut out = DicomOutputStream::new(Vec::new(), uids::EXPLICIT_VR_LITTLE_ENDIAN).unwrap();
        let err = out.write_file_meta_information(&meta).unwrap_err();
        assert!(matches!(err, Error::InconsistentTransferSyntax { .. }));
        assert_eq!(out.bytes_written(), 0);
    }

    mod props {
        use super::TestSet;
        use crate::dataset::read::{self, DicomInputOptions, DicomInputStream, ValueRead};
        use crate::dataset::write::DicomOutputStream;
        use crate::DicomInputHandler;
        use dicomio_core::header::Length;
        use dicomio_core::{Tag, Value, VR};
        use dicomio_dictionary_std::{tags, uids};
        use proptest::prelude::*;
        use std::io::{Cursor, Read};

        /// Elements with a fixed VR in the dictionary
        const ELEMENTS: [(Tag, VR); 4] = [
            (tags::SOP_INSTANCE_UID, VR::UI),
            (tags::PATIENT_ID, VR::LO),
            (tags::SLICE_THICKNESS, VR::DS),
            (tags::ROWS, VR::US),
        ];

        const SYNTAXES: [(&str, bool, bool); 3] = [
            (uids::IMPLICIT_VR_LITTLE_ENDIAN, false, false),
            (uids::EXPLICIT_VR_LITTLE_ENDIAN, true, false),
            (uids::EXPLICIT_VR_BIG_ENDIAN, true, true),
        ];

        #[derive(Default)]
        struct Collect(Vec<(Tag, VR, Length, Vec<u8>)>);

        impl DicomInputHandler for Collect {
            fn read_value<R: Read>(&mut self, dis: &mut DicomInputStream<R>) -> read::Result<()> {
                let (tag, vr, len) = (dis.tag(), dis.vr(), dis.length());
                if let ValueRead::Bytes(bytes) = dis.read_primitive_value(false)? {
                    self.0.push((tag, vr, len, bytes));
                }
                Ok(())
            }
        }

        proptest! {
            #[test]
            fn element_read_back_as_written(
                element in 0..ELEMENTS.len(),
                syntax in 0..SYNTAXES.len(),
                words in proptest::collection::vec(any::<u16>(), 0..40),
            ) {
                let (tag, vr) = ELEMENTS[element];
                let (uid, explicit_vr, big_endian) = SYNTAXES[syntax];
                let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();

                let mut out =
                    DicomOutputStream::with_transfer_syntax(Vec::new(), explicit_vr, big_endian)
                        .unwrap();
                let value: Value<TestSet> = Value::Primitive(bytes.clone());
                out.write_element(tag, vr, &value).unwrap();
                let encoded = out.finish().unwrap();
                // short headers only
                prop_assert_eq!(encoded.len(), 8 + bytes.len());

                let mut dis = DicomInputStream::with_transfer_syntax(
                    Cursor::new(encoded),
                    uid,
                    DicomInputOptions::default(),
                )
                .unwrap();
                let mut collect = Collect::default();
                dis.read_dataset(&mut collect, Length::UNDEFINED, None).unwrap();
                prop_assert_eq!(collect.0.len(), 1);
                let (read_tag, read_vr, len, read_bytes) = &collect.0[0];
                prop_assert_eq!(*read_tag, tag);
                prop_assert_eq!(*read_vr, vr);
                prop_assert_eq!(len.get(), Some(bytes.len() as u32));
                prop_assert_eq!(read_bytes, &bytes);
            }
        }
    }
}
