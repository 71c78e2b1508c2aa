//! This crate implements the standard DICOM data element dictionary
//! and related constants.
//!
//! ## Run-time dictionary
//!
//! - [`data_element`]: information about the DICOM attributes
//!   relevant to encoding and decoding data sets,
//!   according to [DICOM PS3.6].
//!   Decoders use it to resolve the value representation
//!   of elements in implicit VR and of elements stored as UN.
//!
//! The dictionary is provided as a singleton
//! behind a unit type for efficiency and ease of use.
//!
//! [DICOM PS3.6]: https://dicom.nema.org/medical/dicom/current/output/chtml/part06/ps3.6.html
//!
//! ## Constants
//!
//! The following modules contain constant declarations,
//! which perform an equivalent mapping at compile time,
//! thus without incurring a look-up cost:
//!
//! - [`tags`], which map an attribute alias to a DICOM tag
//! - [`uids`], for transfer syntax and storage class identifiers
pub mod data_element;

pub mod tags;
pub mod uids;

pub use data_element::StandardDataDictionary;
