//! Bulk data references.
use crate::error::{
    OpenBulkDataSnafu, ReadBulkDataSnafu, Result, UnsupportedBulkDataSourceSnafu,
};
use snafu::{OptionExt, ResultExt};
use std::fmt;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// The storage holding the bytes of a bulk data reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BulkDataSource {
    /// A file in the local file system
    File(PathBuf),
    /// An arbitrary URI
    Uri(String),
}

impl BulkDataSource {
    /// Obtain the local file path of this source,
    /// if it is a file or a `file:` URI.
    pub fn path(&self) -> Option<&Path> {
        match self {
            BulkDataSource::File(path) => Some(path),
            BulkDataSource::Uri(uri) => uri
                .strip_prefix("file://")
                .or_else(|| uri.strip_prefix("file:"))
                .map(Path::new),
        }
    }
}

impl fmt::Display for BulkDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BulkDataSource::File(path) => write!(f, "file://{}", path.display()),
            BulkDataSource::Uri(uri) => f.write_str(uri),
        }
    }
}

/// A reference to a value stored outside of the data set:
/// a byte range in some source, along with its byte order.
///
/// A bulk data reference does not own the storage it points to.
/// The range is only meaningful while the source exists unchanged,
/// which for temporary files
/// means while their owner has not released them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BulkData {
    /// where the bytes are stored
    pub source: BulkDataSource,
    /// the position of the first byte in the source
    pub offset: u64,
    /// the number of bytes
    pub length: u32,
    /// whether multi-byte numbers in the range are big endian
    pub big_endian: bool,
}

impl BulkData {
    /// Create a new bulk data reference.
    pub fn new(source: BulkDataSource, offset: u64, length: u32, big_endian: bool) -> Self {
        BulkData {
            source,
            offset,
            length,
            big_endian,
        }
    }

    /// Create a reference to a range of a local file.
    pub fn in_file(path: impl Into<PathBuf>, offset: u64, length: u32, big_endian: bool) -> Self {
        BulkData::new(BulkDataSource::File(path.into()), offset, length, big_endian)
    }

    /// Open the source and position a reader over the referenced range.
    ///
    /// Only local files are supported.
    pub fn open(&self) -> Result<std::io::Take<File>> {
        let path = self.source.path().context(UnsupportedBulkDataSourceSnafu {
            uri: self.source.to_string(),
        })?;
        let mut file = File::open(path).context(OpenBulkDataSnafu { path })?;
        file.seek(SeekFrom::Start(self.offset))
            .context(ReadBulkDataSnafu { path })?;
        Ok(file.take(u64::from(self.length)))
    }

    /// Read all bytes of the referenced range into memory,
    /// in the byte order of the reference.
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        let mut reader = self.open()?;
        let mut bytes = Vec::with_capacity(self.length as usize);
        reader
            .read_to_end(&mut bytes)
            .context(ReadBulkDataSnafu {
                path: self.source.path().unwrap_or_else(|| Path::new("")),
            })?;
        if bytes.len() != self.length as usize {
            return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof)).context(
                ReadBulkDataSnafu {
                    path: self.source.path().unwrap_or_else(|| Path::new("")),
                },
            );
        }
        Ok(bytes)
    }
}

/// Formats the reference as a URI with the range in its fragment,
/// such as `file:///tmp/blk0001.tmp#offset=256&length=1024`.
impl fmt::Display for BulkData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#offset={}&length={}",
            self.source, self.offset, self.length
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn read_range_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"0123456789").unwrap();
        file.flush().unwrap();

        let bulk = BulkData::in_file(file.path(), 2, 5, false);
        assert_eq!(bulk.read_bytes().unwrap(), b"23456");
    }

    #[test]
    fn truncated_range_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"0123").unwrap();
        file.flush().unwrap();

        let bulk = BulkData::in_file(file.path(), 2, 5, false);
        assert!(bulk.read_bytes().is_err());
    }

    #[test]
    fn remote_source_unsupported() {
        let bulk = BulkData::new(
            BulkDataSource::Uri("http://example.com/blk".into()),
            0,
            4,
            false,
        );
        assert!(matches!(
            bulk.read_bytes(),
            Err(crate::Error::UnsupportedBulkDataSource { .. })
        ));
        assert_eq!(
            bulk.to_string(),
            "http://example.com/blk#offset=0&length=4"
        );
    }

    #[test]
    fn file_uri_path() {
        let source = BulkDataSource::Uri("file:///tmp/blk.tmp".into());
        assert_eq!(source.path(), Some(Path::new("/tmp/blk.tmp")));
    }
}
