//! This module includes a high level abstraction over a DICOM data element's value.
//!
//! Primitive values are kept in their encoded form:
//! a sequence of bytes in little endian byte order,
//! as they would appear in the value field
//! of an element in a little endian transfer syntax.
//! Byte order conversions happen at the stream boundaries,
//! according to the value representation.

mod bulkdata;
mod deferred;

pub use self::bulkdata::{BulkData, BulkDataSource};
pub use self::deferred::DeferredValue;

/// A single fragment of an encapsulated value,
/// such as compressed pixel data.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// the fragment bytes, held in memory
    Bytes(Vec<u8>),
    /// a reference to the fragment bytes in external storage
    BulkData(BulkData),
}

impl Fragment {
    /// The length of the fragment in bytes, without padding.
    pub fn len(&self) -> u32 {
        match self {
            Fragment::Bytes(bytes) => bytes.len() as u32,
            Fragment::BulkData(bulk) => bulk.length,
        }
    }

    /// Whether the fragment has no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<u8>> for Fragment {
    fn from(bytes: Vec<u8>) -> Self {
        Fragment::Bytes(bytes)
    }
}

/// Representation of a full DICOM value,
/// which may be primitive, a sequence of nested data sets (items)
/// of type `I`,
/// or a list of fragments in an encapsulated value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<I> {
    /// An element with no value (zero length).
    Empty,
    /// The encoded bytes of a primitive value, in little endian.
    Primitive(Vec<u8>),
    /// A sequence of nested data sets.
    Sequence(Vec<I>),
    /// The fragments of an encapsulated value, with undefined length.
    /// The first fragment is the basic offset table.
    Fragments(Vec<Fragment>),
    /// A reference to the value bytes in external storage.
    BulkData(BulkData),
    /// A value whose bytes are computed on first use.
    Deferred(DeferredValue),
}

impl<I> Value<I> {
    /// Whether this value has nothing to encode.
    ///
    /// A sequence without items and a fragment list
    /// without fragments are also empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::Primitive(bytes) => bytes.is_empty(),
            Value::Sequence(items) => items.is_empty(),
            Value::Fragments(fragments) => fragments.is_empty(),
            Value::BulkData(bulk) => bulk.length == 0,
            Value::Deferred(_) => false,
        }
    }

    /// Gets a reference to the primitive value bytes.
    pub fn primitive(&self) -> Option<&[u8]> {
        match self {
            Value::Primitive(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Gets a reference to the items of a sequence.
    pub fn items(&self) -> Option<&[I]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Gets a mutable reference to the items of a sequence.
    pub fn items_mut(&mut self) -> Option<&mut Vec<I>> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Gets a reference to the fragments of an encapsulated value.
    pub fn fragments(&self) -> Option<&[Fragment]> {
        match self {
            Value::Fragments(fragments) => Some(fragments),
            _ => None,
        }
    }

    /// Gets a reference to the bulk data reference.
    pub fn bulk_data(&self) -> Option<&BulkData> {
        match self {
            Value::BulkData(bulk) => Some(bulk),
            _ => None,
        }
    }

    /// Interpret the primitive value as text,
    /// with trailing padding (spaces and null bytes) removed.
    ///
    /// Returns `None` if this is not a primitive value
    /// or the bytes are not valid UTF-8.
    pub fn to_str(&self) -> Option<&str> {
        let bytes = self.primitive()?;
        std::str::from_utf8(bytes)
            .ok()
            .map(|s| s.trim_end_matches(|c| c == ' ' || c == '\0'))
    }
}

impl<I> From<Vec<u8>> for Value<I> {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Primitive(bytes)
    }
}

impl<I> From<&str> for Value<I> {
    fn from(text: &str) -> Self {
        Value::Primitive(text.as_bytes().to_vec())
    }
}

impl<I> From<BulkData> for Value<I> {
    fn from(bulk: BulkData) -> Self {
        Value::BulkData(bulk)
    }
}

impl<I> From<DeferredValue> for Value<I> {
    fn from(value: DeferredValue) -> Self {
        Value::Deferred(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values() {
        assert!(Value::<()>::Empty.is_empty());
        assert!(Value::<()>::Sequence(vec![]).is_empty());
        assert!(Value::<()>::Fragments(vec![]).is_empty());
        assert!(!Value::<()>::Sequence(vec![()]).is_empty());
        assert!(!Value::<()>::from("ABC").is_empty());
    }

    #[test]
    fn trimmed_text() {
        let value = Value::<()>::from("1.2.840.10008.1.2.1\0");
        assert_eq!(value.to_str(), Some("1.2.840.10008.1.2.1"));
        let value = Value::<()>::from("ORIGINAL ");
        assert_eq!(value.to_str(), Some("ORIGINAL"));
        assert_eq!(Value::<()>::Empty.to_str(), None);
    }
}
