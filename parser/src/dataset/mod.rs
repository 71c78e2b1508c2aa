//! Reading and writing of DICOM data sets as streams.
//!
//! A [`DicomInputStream`](read::DicomInputStream) walks a data set
//! and reports its structure to a [`DicomInputHandler`],
//! which decides what to do with each value:
//! build a data set model in memory,
//! forward it to a [`DicomOutputStream`](write::DicomOutputStream),
//! or anything else.
use std::io::Read;

pub mod read;
mod source;
pub mod write;

pub use self::read::{DicomInputStream, Result};

/// A sink of the structure of a data set being read.
///
/// The input stream calls [`read_value`](DicomInputHandler::read_value)
/// once per data element, with the element header available
/// through the stream's accessors
/// ([`tag`](DicomInputStream::tag),
/// [`vr`](DicomInputStream::vr),
/// [`length`](DicomInputStream::length)).
/// The handler must then consume the value field, with one of:
///
/// - [`read_sequence`](DicomInputStream::read_sequence) for sequences,
///   which calls back [`read_item`](DicomInputHandler::read_item) once per item;
/// - [`read_fragments`](DicomInputStream::read_fragments)
///   for encapsulated values of undefined length,
///   which calls back [`read_fragment`](DicomInputHandler::read_fragment)
///   once per fragment;
/// - [`read_primitive_value`](DicomInputStream::read_primitive_value)
///   or [`skip_value`](DicomInputStream::skip_value) otherwise.
pub trait DicomInputHandler {
    /// Called before the first element of the root data set.
    fn start_dataset<R: Read>(&mut self, _dis: &mut DicomInputStream<R>) -> Result<()> {
        Ok(())
    }

    /// Called after the last element of the root data set.
    fn end_dataset<R: Read>(&mut self, _dis: &mut DicomInputStream<R>) -> Result<()> {
        Ok(())
    }

    /// Called for each data element header.
    fn read_value<R: Read>(&mut self, dis: &mut DicomInputStream<R>) -> Result<()>;

    /// Called for each item of a sequence,
    /// right after the item header.
    ///
    /// The default implementation reads the item's data set,
    /// handing its elements to [`read_value`](DicomInputHandler::read_value).
    fn read_item<R: Read>(&mut self, dis: &mut DicomInputStream<R>) -> Result<()> {
        dis.read_item_dataset(self)
    }

    /// Called for each item of an encapsulated value,
    /// right after the item header.
    ///
    /// The default implementation skips the fragment.
    fn read_fragment<R: Read>(&mut self, dis: &mut DicomInputStream<R>) -> Result<()> {
        dis.skip_value()
    }
}
