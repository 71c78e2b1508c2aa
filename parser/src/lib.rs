//! This crate provides a streaming reader and writer of DICOM data sets,
//! in accordance with the DICOM standard.
//!
//! - [`dataset::read`] contains [`DicomInputStream`],
//!   which detects the transfer syntax of a stream,
//!   reads the file meta information
//!   and walks the data set element by element,
//!   handing each one to a [`DicomInputHandler`].
//! - [`dataset::write`] contains [`DicomOutputStream`],
//!   which serializes any data set model implementing [`WriteDataSet`]
//!   in one of the native transfer syntaxes.
//! - [`bulkdata`] decides which attributes are bulk data
//!   and manages the temporary files holding spilled bulk data.
//! - [`meta`] contains the file meta information table.
//! - [`transcode`] wires a reader to a writer,
//!   converting a stream between transfer syntaxes
//!   without building the data set in memory.
//!
//! For the time being, all APIs are based on synchronous I/O.
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    unused_qualifications,
    unused_import_braces
)]

pub mod bulkdata;
pub mod dataset;
pub mod meta;
pub mod transcode;

pub use bulkdata::{
    BasicBulkDataDescriptor, BulkDataDescriptor, BulkDataFiles, StandardBulkDataDescriptor,
};
pub use dataset::read::{DicomInputOptions, DicomInputStream, IncludeBulkData};
pub use dataset::write::{DicomOutputStream, EncodeOptions, EncodeValue, WriteDataSet};
pub use dataset::DicomInputHandler;
pub use meta::{FileMetaTable, FileMetaTableBuilder};
pub use transcode::{transcode, TranscodeHandler};
