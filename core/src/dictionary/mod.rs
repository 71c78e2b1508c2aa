//! This module contains the concept of a DICOM data dictionary.
//!
//! The standard data dictionary is available in the `dicomio-dictionary-std` crate.
//! During decoding, a dictionary is consulted
//! to learn the value representation of elements in implicit VR
//! and of elements stored as UN.

mod data_element;

pub mod stub;

pub use self::data_element::{
    DataDictionary, DataDictionaryEntry, DataDictionaryEntryRef, ParseSelectorError, TagRange,
    TagRangeParseError, VirtualVr,
};
