//! Conversions between byte buffers and numbers or tags,
//! in either byte order.
//!
//! Every reading function takes a buffer and an offset,
//! and every writing function writes into a buffer at an offset.
//! Functions without a byte order suffix take an explicit
//! `big_endian` flag.
//! Offsets out of the buffer's bounds cause a panic,
//! as with slice indexing.
//!
//! Tags are always encoded as two 16-bit words,
//! group first and element second,
//! which in little endian is not the same as
//! encoding the tag as a single 32-bit integer.
//!
//! ```
//! # use dicomio_core::Tag;
//! # use dicomio_encoding::byte_order::*;
//! let mut buf = [0u8; 4];
//! tag_to_bytes_le(Tag(0x0010, 0x0020), &mut buf, 0);
//! assert_eq!(buf, [0x10, 0x00, 0x20, 0x00]);
//! int_to_bytes_le(0x0010_0020, &mut buf, 0);
//! assert_eq!(buf, [0x20, 0x00, 0x10, 0x00]);
//! ```

use byteordered::byteorder::{BigEndian, ByteOrder, LittleEndian};
use dicomio_core::{Tag, VR};
use snafu::{ensure, Backtrace, Snafu};

/// An error from an in-place byte swap.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The buffer length is not a multiple of the word width.
    #[snafu(display("Cannot swap {} bytes in words of {} bytes", len, width))]
    InvalidArgument {
        len: usize,
        width: usize,
        backtrace: Backtrace,
    },
}

/// Type alias for the result of a byte swap.
pub type Result<T, E = Error> = std::result::Result<T, E>;

macro_rules! read_fns {
    ($($name:ident, $name_le:ident, $name_be:ident => $t:ty, $read:ident;)*) => {
        $(
            #[doc = concat!("Read a `", stringify!($t), "` in the given byte order.")]
            #[inline]
            pub fn $name(bytes: &[u8], off: usize, big_endian: bool) -> $t {
                if big_endian {
                    $name_be(bytes, off)
                } else {
                    $name_le(bytes, off)
                }
            }

            #[doc = concat!("Read a little endian `", stringify!($t), "`.")]
            #[inline]
            pub fn $name_le(bytes: &[u8], off: usize) -> $t {
                LittleEndian::$read(&bytes[off..])
            }

            #[doc = concat!("Read a big endian `", stringify!($t), "`.")]
            #[inline]
            pub fn $name_be(bytes: &[u8], off: usize) -> $t {
                BigEndian::$read(&bytes[off..])
            }
        )*
    };
}

macro_rules! write_fns {
    ($($name:ident, $name_le:ident, $name_be:ident => $t:ty, $write:ident, $w:literal;)*) => {
        $(
            #[doc = concat!("Write a `", stringify!($t), "` in the given byte order.")]
            #[inline]
            pub fn $name(value: $t, bytes: &mut [u8], off: usize, big_endian: bool) {
                if big_endian {
                    $name_be(value, bytes, off)
                } else {
                    $name_le(value, bytes, off)
                }
            }

            #[doc = concat!("Write a little endian `", stringify!($t), "`.")]
            #[inline]
            pub fn $name_le(value: $t, bytes: &mut [u8], off: usize) {
                LittleEndian::$write(&mut bytes[off..off + $w], value)
            }

            #[doc = concat!("Write a big endian `", stringify!($t), "`.")]
            #[inline]
            pub fn $name_be(value: $t, bytes: &mut [u8], off: usize) {
                BigEndian::$write(&mut bytes[off..off + $w], value)
            }
        )*
    };
}

read_fns! {
    bytes_to_ushort, bytes_to_ushort_le, bytes_to_ushort_be => u16, read_u16;
    bytes_to_short, bytes_to_short_le, bytes_to_short_be => i16, read_i16;
    bytes_to_uint, bytes_to_uint_le, bytes_to_uint_be => u32, read_u32;
    bytes_to_int, bytes_to_int_le, bytes_to_int_be => i32, read_i32;
    bytes_to_long, bytes_to_long_le, bytes_to_long_be => i64, read_i64;
    bytes_to_float, bytes_to_float_le, bytes_to_float_be => f32, read_f32;
    bytes_to_double, bytes_to_double_le, bytes_to_double_be => f64, read_f64;
}

write_fns! {
    ushort_to_bytes, ushort_to_bytes_le, ushort_to_bytes_be => u16, write_u16, 2;
    short_to_bytes, short_to_bytes_le, short_to_bytes_be => i16, write_i16, 2;
    uint_to_bytes, uint_to_bytes_le, uint_to_bytes_be => u32, write_u32, 4;
    int_to_bytes, int_to_bytes_le, int_to_bytes_be => i32, write_i32, 4;
    long_to_bytes, long_to_bytes_le, long_to_bytes_be => i64, write_i64, 8;
    float_to_bytes, float_to_bytes_le, float_to_bytes_be => f32, write_f32, 4;
    double_to_bytes, double_to_bytes_le, double_to_bytes_be => f64, write_f64, 8;
}

/// Read a tag (group, then element) in the given byte order.
#[inline]
pub fn bytes_to_tag(bytes: &[u8], off: usize, big_endian: bool) -> Tag {
    if big_endian {
        bytes_to_tag_be(bytes, off)
    } else {
        bytes_to_tag_le(bytes, off)
    }
}

/// Read a tag as two little endian words.
#[inline]
pub fn bytes_to_tag_le(bytes: &[u8], off: usize) -> Tag {
    Tag(
        bytes_to_ushort_le(bytes, off),
        bytes_to_ushort_le(bytes, off + 2),
    )
}

/// Read a tag as two big endian words.
#[inline]
pub fn bytes_to_tag_be(bytes: &[u8], off: usize) -> Tag {
    Tag(
        bytes_to_ushort_be(bytes, off),
        bytes_to_ushort_be(bytes, off + 2),
    )
}

/// Write a tag (group, then element) in the given byte order.
#[inline]
pub fn tag_to_bytes(tag: Tag, bytes: &mut [u8], off: usize, big_endian: bool) {
    if big_endian {
        tag_to_bytes_be(tag, bytes, off)
    } else {
        tag_to_bytes_le(tag, bytes, off)
    }
}

/// Write a tag as two little endian words.
#[inline]
pub fn tag_to_bytes_le(tag: Tag, bytes: &mut [u8], off: usize) {
    ushort_to_bytes_le(tag.group(), bytes, off);
    ushort_to_bytes_le(tag.element(), bytes, off + 2);
}

/// Write a tag as two big endian words.
#[inline]
pub fn tag_to_bytes_be(tag: Tag, bytes: &mut [u8], off: usize) {
    ushort_to_bytes_be(tag.group(), bytes, off);
    ushort_to_bytes_be(tag.element(), bytes, off + 2);
}

/// Read a two-letter value representation code.
///
/// Returns `None` if the code is not a known VR.
#[inline]
pub fn bytes_to_vr(bytes: &[u8], off: usize) -> Option<VR> {
    VR::from_binary([bytes[off], bytes[off + 1]])
}

/// Reverse the bytes of every `width`-byte word in the buffer.
///
/// Fails if the buffer length is not a multiple of `width`,
/// leaving the buffer untouched.
pub fn swap(bytes: &mut [u8], width: usize) -> Result<()> {
    ensure!(
        width > 0 && bytes.len() % width == 0,
        InvalidArgumentSnafu {
            len: bytes.len(),
            width,
        }
    );
    if width > 1 {
        bytes.chunks_exact_mut(width).for_each(<[u8]>::reverse);
    }
    Ok(())
}

/// Swap every 16-bit word in the buffer.
#[inline]
pub fn swap_shorts(bytes: &mut [u8]) -> Result<()> {
    swap(bytes, 2)
}

/// Swap every 32-bit word in the buffer.
#[inline]
pub fn swap_ints(bytes: &mut [u8]) -> Result<()> {
    swap(bytes, 4)
}

/// Swap every 64-bit word in the buffer.
#[inline]
pub fn swap_longs(bytes: &mut [u8]) -> Result<()> {
    swap(bytes, 8)
}

/// Convert a value of the given representation
/// from one byte order to the other, in place.
///
/// Values of representations without a swap width
/// (text and bytes) are left as is.
pub fn toggle_endian(vr: VR, bytes: &mut [u8]) -> Result<()> {
    match vr.swap_width() {
        Some(width) => swap(bytes, width),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn scalars_both_orders() {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        assert_eq!(bytes_to_ushort(&bytes, 0, false), 0x0201);
        assert_eq!(bytes_to_ushort(&bytes, 0, true), 0x0102);
        assert_eq!(bytes_to_uint(&bytes, 4, false), 0x0807_0605);
        assert_eq!(bytes_to_uint(&bytes, 4, true), 0x0506_0708);
        assert_eq!(bytes_to_long(&bytes, 0, true), 0x0102_0304_0506_0708);
        assert_eq!(bytes_to_short(&[0xFF, 0xFE], 0, true), -2);

        let mut out = [0u8; 8];
        double_to_bytes(1.5, &mut out, 0, true);
        assert_eq!(bytes_to_double(&out, 0, true), 1.5);
        float_to_bytes(-0.25, &mut out, 4, false);
        assert_eq!(bytes_to_float(&out, 4, false), -0.25);
    }

    #[test]
    fn tag_encoding_is_not_int_encoding() {
        let tag = Tag(0x7FE0, 0x0010);
        let mut as_tag = [0u8; 4];
        let mut as_int = [0u8; 4];
        tag_to_bytes_le(tag, &mut as_tag, 0);
        int_to_bytes_le(u32::from(tag) as i32, &mut as_int, 0);
        assert_eq!(as_tag, [0xE0, 0x7F, 0x10, 0x00]);
        assert_ne!(as_tag, as_int);

        let mut be = [0u8; 4];
        tag_to_bytes_be(tag, &mut be, 0);
        assert_eq!(be, [0x7F, 0xE0, 0x00, 0x10]);
        assert_eq!(bytes_to_tag(&be, 0, true), tag);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_panics() {
        bytes_to_uint_le(&[0, 1, 2], 0);
    }

    #[test]
    fn swap_widths() {
        let mut bytes = [1, 2, 3, 4, 5, 6, 7, 8];
        swap_shorts(&mut bytes).unwrap();
        assert_eq!(bytes, [2, 1, 4, 3, 6, 5, 8, 7]);
        swap_shorts(&mut bytes).unwrap();
        swap_ints(&mut bytes).unwrap();
        assert_eq!(bytes, [4, 3, 2, 1, 8, 7, 6, 5]);
        swap_ints(&mut bytes).unwrap();
        swap_longs(&mut bytes).unwrap();
        assert_eq!(bytes, [8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn swap_rejects_partial_words() {
        let mut bytes = [1, 2, 3];
        assert!(matches!(
            swap_shorts(&mut bytes),
            Err(Error::InvalidArgument { len: 3, width: 2, .. })
        ));
        assert_eq!(bytes, [1, 2, 3]);
        assert!(swap_longs(&mut [0; 12]).is_err());
    }

    #[test]
    fn toggle_by_vr() {
        let mut us = [0x00, 0x01, 0x00, 0x02];
        toggle_endian(VR::US, &mut us).unwrap();
        assert_eq!(us, [0x01, 0x00, 0x02, 0x00]);

        let mut fd = 2.0f64.to_le_bytes();
        toggle_endian(VR::FD, &mut fd).unwrap();
        assert_eq!(fd, 2.0f64.to_be_bytes());

        let mut text = *b"ABCD";
        toggle_endian(VR::LO, &mut text).unwrap();
        assert_eq!(&text, b"ABCD");

        let mut at = [0x10, 0x00, 0x20, 0x00];
        toggle_endian(VR::AT, &mut at).unwrap();
        assert_eq!(bytes_to_tag_be(&at, 0), Tag(0x0010, 0x0020));
    }

    proptest! {
        #[test]
        fn tag_roundtrip_le(group: u16, element: u16) {
            let tag = Tag(group, element);
            let mut buf = [0u8; 6];
            tag_to_bytes_le(tag, &mut buf, 2);
            prop_assert_eq!(bytes_to_tag_le(&buf, 2), tag);
        }

        #[test]
        fn tag_roundtrip_be(group: u16, element: u16) {
            let tag = Tag(group, element);
            let mut buf = [0u8; 4];
            tag_to_bytes(tag, &mut buf, 0, true);
            prop_assert_eq!(bytes_to_tag(&buf, 0, true), tag);
        }

        #[test]
        fn swap_is_involution(words in proptest::collection::vec(any::<u32>(), 0..16)) {
            let original: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
            let mut bytes = original.clone();
            swap_ints(&mut bytes).unwrap();
            let swapped: Vec<u8> = words.iter().flat_map(|w| w.to_be_bytes()).collect();
            prop_assert_eq!(&bytes, &swapped);
            swap_ints(&mut bytes).unwrap();
            prop_assert_eq!(bytes, original);
        }
    }
}
