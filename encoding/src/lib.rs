//! DICOM encoding and decoding primitives.
//!
//! This crate provides the building blocks
//! for reading and writing DICOM data sets:
//!
//! - [`byte_order`] converts numbers and tags to and from byte buffers
//!   in either byte order, and swaps values in place;
//! - [`decode`] and [`encode`] read and write element headers,
//!   item headers and delimiters
//!   in each of the native element encodings;
//! - [`transfer_syntax`] describes the known transfer syntaxes
//!   and provides a registry to look them up by UID.
//!
//! All APIs are based on synchronous I/O.
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    unused_qualifications,
    unused_import_braces
)]

pub mod byte_order;
pub mod decode;
pub mod encode;
pub mod transfer_syntax;

pub use byteordered::Endianness;
pub use decode::Decode;
pub use encode::Encode;
pub use transfer_syntax::{TransferSyntax, TransferSyntaxRegistry};
