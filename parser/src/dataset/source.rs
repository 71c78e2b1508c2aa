//! The byte source of a DICOM input stream:
//! a reader which can look ahead and push bytes back,
//! and which can switch to inflating its remaining input.
use flate2::read::{DeflateDecoder, ZlibDecoder};
use std::fmt;
use std::io::{self, Read};

/// A reader with a buffer of bytes to be read again
/// before the inner reader is consulted.
pub(crate) struct Pushback<R> {
    buf: Vec<u8>,
    start: usize,
    inner: R,
}

impl<R> fmt::Debug for Pushback<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pushback")
            .field("buffered", &(self.buf.len() - self.start))
            .finish()
    }
}

impl<R: Read> Pushback<R> {
    pub fn new(inner: R) -> Self {
        Pushback {
            buf: Vec::new(),
            start: 0,
            inner,
        }
    }

    /// Look at up to `n` bytes ahead without consuming them.
    ///
    /// Fewer bytes are returned only if the inner reader ended.
    pub fn peek(&mut self, n: usize) -> io::Result<&[u8]> {
        if self.start > 0 {
            self.buf.drain(..self.start);
            self.start = 0;
        }
        let mut chunk = [0u8; 512];
        while self.buf.len() < n {
            let want = (n - self.buf.len()).min(chunk.len());
            match self.inner.read(&mut chunk[..want]) {
                Ok(0) => break,
                Ok(read) => self.buf.extend_from_slice(&chunk[..read]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        let end = n.min(self.buf.len());
        Ok(&self.buf[..end])
    }

    /// Take the buffered bytes and the inner reader apart.
    pub fn into_parts(mut self) -> (Vec<u8>, R) {
        self.buf.drain(..self.start);
        (self.buf, self.inner)
    }
}

impl<R: Read> Read for Pushback<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if self.start < self.buf.len() {
            let available = &self.buf[self.start..];
            let n = available.len().min(out.len());
            out[..n].copy_from_slice(&available[..n]);
            self.start += n;
            if self.start == self.buf.len() {
                self.buf.clear();
                self.start = 0;
            }
            return Ok(n);
        }
        self.inner.read(out)
    }
}

/// The underlying reader of a DICOM input stream,
/// either read as is or inflated.
pub(crate) enum Source<R> {
    Plain(R),
    Deflate(DeflateDecoder<Pushback<R>>),
    Zlib(ZlibDecoder<Pushback<R>>),
    /// left behind while switching to inflation
    Detached,
}

impl<R> fmt::Debug for Source<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Source::Plain(_) => "Plain",
            Source::Deflate(_) => "Deflate",
            Source::Zlib(_) => "Zlib",
            Source::Detached => "Detached",
        })
    }
}

impl<R: Read> Read for Source<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        match self {
            Source::Plain(r) => r.read(out),
            Source::Deflate(r) => r.read(out),
            Source::Zlib(r) => r.read(out),
            Source::Detached => Err(io::Error::new(
                io::ErrorKind::Other,
                "source detached after a failed switch to inflation",
            )),
        }
    }
}

/// Whether the two bytes start a ZLIB stream
/// (deflate compression method, valid header checksum)
/// rather than raw deflate data.
pub(crate) fn is_zlib_header(b0: u8, b1: u8) -> bool {
    b0 & 0x0F == 8 && (u16::from(b0) << 8 | u16::from(b1)) % 31 == 0
}

impl<R: Read> Pushback<Source<R>> {
    /// Inflate everything after the current position.
    ///
    /// Raw deflate data is expected,
    /// but a ZLIB header is recognized and honored.
    /// Bytes already buffered are inflated as well.
    pub fn start_inflating(&mut self) -> io::Result<()> {
        let this = std::mem::replace(self, Pushback::new(Source::Detached));
        let (buffered, source) = this.into_parts();
        let plain = match source {
            Source::Plain(r) => r,
            other => {
                // already inflating
                *self = Pushback {
                    buf: buffered,
                    start: 0,
                    inner: other,
                };
                return Ok(());
            }
        };
        let mut compressed = Pushback {
            buf: buffered,
            start: 0,
            inner: plain,
        };
        let head = compressed.peek(2)?;
        let zlib = head.len() == 2 && is_zlib_header(head[0], head[1]);
        let source = if zlib {
            tracing::warn!("Deflated data set is wrapped in a ZLIB stream");
            Source::Zlib(ZlibDecoder::new(compressed))
        } else {
            Source::Deflate(DeflateDecoder::new(compressed))
        };
        *self = Pushback::new(source);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::{DeflateEncoder, ZlibEncoder};
    use flate2::Compression;
    use std::io::{Cursor, Write};

    #[test]
    fn peek_then_read() {
        let mut src = Pushback::new(Cursor::new(b"0123456789".to_vec()));
        assert_eq!(src.peek(4).unwrap(), b"0123");
        let mut out = [0u8; 4];
        src.read_exact(&mut out).unwrap();
        assert_eq!(&out, b"0123");
        assert_eq!(src.peek(2).unwrap(), b"45");
        assert_eq!(src.peek(20).unwrap(), b"456789");
        let mut rest = Vec::new();
        src.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"456789");
    }

    #[test]
    fn zlib_header_detection() {
        assert!(is_zlib_header(0x78, 0x9C));
        assert!(is_zlib_header(0x78, 0x01));
        assert!(is_zlib_header(0x78, 0xDA));
        assert!(!is_zlib_header(0x78, 0x9D));
        assert!(!is_zlib_header(0x63, 0x60));
    }

    fn inflate_after_prefix(compressed: Vec<u8>) -> Vec<u8> {
        let mut raw = b"HEAD".to_vec();
        raw.extend(compressed);
        let mut src = Pushback::new(Source::Plain(Cursor::new(raw)));
        // buffered bytes are carried over into the inflater
        src.peek(16).unwrap();
        let mut head = [0u8; 4];
        src.read_exact(&mut head).unwrap();
        assert_eq!(&head, b"HEAD");
        src.start_inflating().unwrap();
        let mut out = Vec::new();
        src.read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn inflate_raw_deflate() {
        let mut enc = DeflateEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b"raw deflated content").unwrap();
        let out = inflate_after_prefix(enc.finish().unwrap());
        assert_eq!(out, b"raw deflated content");
    }

    #[test]
    fn inflate_zlib() {
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b"zlib wrapped content").unwrap();
        let out = inflate_after_prefix(enc.finish().unwrap());
        assert_eq!(out, b"zlib wrapped content");
    }
}
