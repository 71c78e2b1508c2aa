#![crate_type = "lib"]
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    unused_import_braces
)]

//! This is the core library of dicomio containing various concepts,
//! data structures and traits specific to DICOM content.
//!
//! The current structure of this crate is as follows:
//!
//! - [`header`] comprises various data types for DICOM element header,
//!   including common definitions for DICOM tags and value representations.
//! - [`dictionary`] describes common behavior of DICOM data dictionaries,
//!   which translate attribute names and/or tags to a dictionary entry
//!   containing relevant information about the attribute.
//! - [`ops`] contains item paths and attribute selectors,
//!   used to address attributes in nested data sets.
//! - [`value`] holds definitions for values in DICOM elements,
//!   including bulk data references and deferred values.
//! - [`error`] contains crate-level error and result types.

pub mod dictionary;
pub mod error;
pub mod header;
pub mod ops;
pub mod value;

pub use dictionary::DataDictionary;
pub use error::{Error, Result};
pub use header::{DataElementHeader, Length, Tag, VR};
pub use value::{BulkData, Fragment, Value};

// re-export crates that are part of the public API
pub use smallvec;
