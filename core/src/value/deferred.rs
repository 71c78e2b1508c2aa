//! Values computed on demand.
use crate::error::{ComputeValueSnafu, Result};
use once_cell::sync::OnceCell;
use snafu::ResultExt;
use std::fmt;
use std::sync::Arc;

type Thunk = dyn Fn() -> std::io::Result<Vec<u8>> + Send + Sync;

/// A primitive value whose encoded bytes are only produced when needed,
/// such as a frame which has not been compressed yet.
///
/// The computation runs at most once successfully:
/// the resulting bytes are kept,
/// so that the value's length and content are always consistent.
/// Clones share the same memoized result.
///
/// ```
/// # use dicomio_core::value::DeferredValue;
/// let value = DeferredValue::new(|| Ok(vec![1, 2, 3, 4]));
/// assert!(!value.is_computed());
/// assert_eq!(value.len().unwrap(), 4);
/// assert!(value.is_computed());
/// ```
#[derive(Clone)]
pub struct DeferredValue {
    thunk: Arc<Thunk>,
    bytes: Arc<OnceCell<Vec<u8>>>,
}

impl DeferredValue {
    /// Create a deferred value from a function producing its bytes,
    /// in little endian.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> std::io::Result<Vec<u8>> + Send + Sync + 'static,
    {
        DeferredValue {
            thunk: Arc::new(f),
            bytes: Arc::new(OnceCell::new()),
        }
    }

    /// Obtain the bytes of the value, computing them if necessary.
    pub fn get(&self) -> Result<&[u8]> {
        self.bytes
            .get_or_try_init(|| (self.thunk)())
            .map(Vec::as_slice)
            .context(ComputeValueSnafu)
    }

    /// The length of the value in bytes,
    /// computing the value if necessary.
    pub fn len(&self) -> Result<u32> {
        self.get().map(|bytes| bytes.len() as u32)
    }

    /// Whether the value has already been computed.
    pub fn is_computed(&self) -> bool {
        self.bytes.get().is_some()
    }
}

impl fmt::Debug for DeferredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bytes.get() {
            Some(bytes) => f
                .debug_struct("DeferredValue")
                .field("len", &bytes.len())
                .finish(),
            None => f.write_str("DeferredValue(pending)"),
        }
    }
}

/// Two deferred values are equal if they share the same computation,
/// or if both have been computed to the same bytes.
impl PartialEq for DeferredValue {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.bytes, &other.bytes) {
            return true;
        }
        match (self.bytes.get(), other.bytes.get()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
