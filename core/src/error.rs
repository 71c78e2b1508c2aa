//! Crate-level error types.
use snafu::{Backtrace, Snafu};
use std::path::PathBuf;

/// An error which may occur when accessing the bytes
/// of a value which is not held in memory.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The file of a bulk data reference could not be opened.
    #[snafu(display("Could not open bulk data file {}", path.display()))]
    OpenBulkData {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },
    /// The byte range of a bulk data reference could not be read.
    #[snafu(display("Could not read bulk data range from {}", path.display()))]
    ReadBulkData {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },
    /// The bulk data reference does not point to a local file.
    #[snafu(display("Bulk data source `{}` is not a local file", uri))]
    UnsupportedBulkDataSource { uri: String, backtrace: Backtrace },
    /// The computation of a deferred value failed.
    #[snafu(display("Could not compute deferred value"))]
    ComputeValue {
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

/// Type alias for a result from this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
