//! Module containing the DICOM transfer syntax descriptors
//! and a registry of the transfer syntaxes known to this library.
//!
//! A transfer syntax determines three properties of a data set encoding:
//! whether element headers state the value representation,
//! the byte order of headers and numeric values,
//! and whether the data set is compressed (deflated)
//! or only the pixel data is (encapsulated).
//!
//! ```
//! # use dicomio_encoding::TransferSyntaxRegistry;
//! let ts = TransferSyntaxRegistry.get("1.2.840.10008.1.2.2\0").unwrap();
//! assert!(ts.is_explicit_vr());
//! assert!(ts.is_big_endian());
//! ```

use crate::decode::AnyDecoder;
use crate::encode::AnyEncoder;
use byteordered::Endianness;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The kind of compression involved in a transfer syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// Native encoding, no compression.
    None,
    /// The whole data set after the file meta group
    /// is compressed with the deflate algorithm.
    Deflate,
    /// Pixel data is encapsulated in fragments
    /// and compressed with some image or video codec.
    EncapsulatedPixelData,
}

/// A DICOM transfer syntax specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferSyntax {
    uid: &'static str,
    name: &'static str,
    byte_order: Endianness,
    explicit_vr: bool,
    codec: Codec,
}

impl TransferSyntax {
    /// Create a new transfer syntax descriptor.
    pub const fn new(
        uid: &'static str,
        name: &'static str,
        byte_order: Endianness,
        explicit_vr: bool,
        codec: Codec,
    ) -> Self {
        TransferSyntax {
            uid,
            name,
            byte_order,
            explicit_vr,
            codec,
        }
    }

    /// Create a new descriptor
    /// for an explicit VR little endian transfer syntax.
    pub const fn new_ele(uid: &'static str, name: &'static str, codec: Codec) -> Self {
        TransferSyntax::new(uid, name, Endianness::Little, true, codec)
    }

    /// Obtain this transfer syntax' unique identifier.
    pub const fn uid(&self) -> &'static str {
        self.uid
    }

    /// Obtain the name of this transfer syntax.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Obtain this transfer syntax' expected endianness.
    pub const fn endianness(&self) -> Endianness {
        self.byte_order
    }

    /// Whether headers and numeric values are big endian.
    pub fn is_big_endian(&self) -> bool {
        self.byte_order == Endianness::Big
    }

    /// Whether element headers state the value representation.
    pub const fn is_explicit_vr(&self) -> bool {
        self.explicit_vr
    }

    /// Obtain the compression involved in this transfer syntax.
    pub const fn codec(&self) -> Codec {
        self.codec
    }

    /// Whether the data set is compressed with deflate.
    pub fn is_deflated(&self) -> bool {
        self.codec == Codec::Deflate
    }

    /// Whether pixel data is encapsulated.
    pub fn is_encapsulated(&self) -> bool {
        self.codec == Codec::EncapsulatedPixelData
    }

    /// Whether this transfer syntax is one of the native encodings,
    /// in which values of any element can be converted to
    /// another native transfer syntax.
    pub fn is_native(&self) -> bool {
        self.codec != Codec::EncapsulatedPixelData
    }

    /// Obtain the element header decoder for this transfer syntax.
    ///
    /// Returns `None` if the transfer syntax is implicit VR big endian.
    pub fn decoder(&self) -> Option<AnyDecoder> {
        AnyDecoder::new(self.explicit_vr, self.is_big_endian())
    }

    /// Obtain the element header encoder for this transfer syntax.
    ///
    /// Returns `None` if the transfer syntax is implicit VR big endian.
    pub fn encoder(&self) -> Option<AnyEncoder> {
        AnyEncoder::new(self.explicit_vr, self.is_big_endian())
    }
}

/// The transfer syntax descriptors known to this library.
pub mod entries {
    use super::{Codec, TransferSyntax as Ts};
    use byteordered::Endianness;

    /// Implicit VR Little Endian: Default Transfer Syntax for DICOM
    pub const IMPLICIT_VR_LITTLE_ENDIAN: Ts = Ts::new(
        "1.2.840.10008.1.2",
        "Implicit VR Little Endian",
        Endianness::Little,
        false,
        Codec::None,
    );

    /// Explicit VR Little Endian
    pub const EXPLICIT_VR_LITTLE_ENDIAN: Ts =
        Ts::new_ele("1.2.840.10008.1.2.1", "Explicit VR Little Endian", Codec::None);

    /// Explicit VR Big Endian (retired)
    pub const EXPLICIT_VR_BIG_ENDIAN: Ts = Ts::new(
        "1.2.840.10008.1.2.2",
        "Explicit VR Big Endian",
        Endianness::Big,
        true,
        Codec::None,
    );

    /// Deflated Explicit VR Little Endian
    pub const DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN: Ts = Ts::new_ele(
        "1.2.840.10008.1.2.1.99",
        "Deflated Explicit VR Little Endian",
        Codec::Deflate,
    );

    /// Encapsulated Uncompressed Explicit VR Little Endian
    pub const ENCAPSULATED_UNCOMPRESSED_EXPLICIT_VR_LITTLE_ENDIAN: Ts = Ts::new_ele(
        "1.2.840.10008.1.2.1.98",
        "Encapsulated Uncompressed Explicit VR Little Endian",
        Codec::EncapsulatedPixelData,
    );

    /// JPEG Baseline (Process 1)
    pub const JPEG_BASELINE: Ts = Ts::new_ele(
        "1.2.840.10008.1.2.4.50",
        "JPEG Baseline (Process 1)",
        Codec::EncapsulatedPixelData,
    );

    /// JPEG Extended (Process 2 & 4)
    pub const JPEG_EXTENDED: Ts = Ts::new_ele(
        "1.2.840.10008.1.2.4.51",
        "JPEG Extended (Process 2 & 4)",
        Codec::EncapsulatedPixelData,
    );

    /// JPEG Lossless, Non-Hierarchical (Process 14)
    pub const JPEG_LOSSLESS_NON_HIERARCHICAL: Ts = Ts::new_ele(
        "1.2.840.10008.1.2.4.57",
        "JPEG Lossless, Non-Hierarchical (Process 14)",
        Codec::EncapsulatedPixelData,
    );

    /// JPEG Lossless, Non-Hierarchical, First-Order Prediction
    pub const JPEG_LOSSLESS_NON_HIERARCHICAL_FIRST_ORDER_PREDICTION: Ts = Ts::new_ele(
        "1.2.840.10008.1.2.4.70",
        "JPEG Lossless, Non-Hierarchical, First-Order Prediction",
        Codec::EncapsulatedPixelData,
    );

    /// JPEG-LS Lossless Image Compression
    pub const JPEG_LS_LOSSLESS_IMAGE_COMPRESSION: Ts = Ts::new_ele(
        "1.2.840.10008.1.2.4.80",
        "JPEG-LS Lossless Image Compression",
        Codec::EncapsulatedPixelData,
    );

    /// JPEG-LS Lossy (Near-Lossless) Image Compression
    pub const JPEG_LS_LOSSY_IMAGE_COMPRESSION: Ts = Ts::new_ele(
        "1.2.840.10008.1.2.4.81",
        "JPEG-LS Lossy (Near-Lossless) Image Compression",
        Codec::EncapsulatedPixelData,
    );

    /// JPEG 2000 Image Compression (Lossless Only)
    pub const JPEG_2000_IMAGE_COMPRESSION_LOSSLESS_ONLY: Ts = Ts::new_ele(
        "1.2.840.10008.1.2.4.90",
        "JPEG 2000 Image Compression (Lossless Only)",
        Codec::EncapsulatedPixelData,
    );

    /// JPEG 2000 Image Compression
    pub const JPEG_2000_IMAGE_COMPRESSION: Ts = Ts::new_ele(
        "1.2.840.10008.1.2.4.91",
        "JPEG 2000 Image Compression",
        Codec::EncapsulatedPixelData,
    );

    /// MPEG2 Main Profile / Main Level
    pub const MPEG2_MAIN_PROFILE_MAIN_LEVEL: Ts = Ts::new_ele(
        "1.2.840.10008.1.2.4.100",
        "MPEG2 Main Profile / Main Level",
        Codec::EncapsulatedPixelData,
    );

    /// MPEG-4 AVC/H.264 High Profile / Level 4.1
    pub const MPEG4_AVC_H264_HIGH_PROFILE: Ts = Ts::new_ele(
        "1.2.840.10008.1.2.4.102",
        "MPEG-4 AVC/H.264 High Profile / Level 4.1",
        Codec::EncapsulatedPixelData,
    );

    /// High-Throughput JPEG 2000 Image Compression (Lossless Only)
    pub const HTJ2K_LOSSLESS: Ts = Ts::new_ele(
        "1.2.840.10008.1.2.4.201",
        "High-Throughput JPEG 2000 Image Compression (Lossless Only)",
        Codec::EncapsulatedPixelData,
    );

    /// RLE Lossless
    pub const RLE_LOSSLESS: Ts = Ts::new_ele(
        "1.2.840.10008.1.2.5",
        "RLE Lossless",
        Codec::EncapsulatedPixelData,
    );

    pub(crate) const ALL: &[Ts] = &[
        IMPLICIT_VR_LITTLE_ENDIAN,
        EXPLICIT_VR_LITTLE_ENDIAN,
        EXPLICIT_VR_BIG_ENDIAN,
        DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN,
        ENCAPSULATED_UNCOMPRESSED_EXPLICIT_VR_LITTLE_ENDIAN,
        JPEG_BASELINE,
        JPEG_EXTENDED,
        JPEG_LOSSLESS_NON_HIERARCHICAL,
        JPEG_LOSSLESS_NON_HIERARCHICAL_FIRST_ORDER_PREDICTION,
        JPEG_LS_LOSSLESS_IMAGE_COMPRESSION,
        JPEG_LS_LOSSY_IMAGE_COMPRESSION,
        JPEG_2000_IMAGE_COMPRESSION_LOSSLESS_ONLY,
        JPEG_2000_IMAGE_COMPRESSION,
        MPEG2_MAIN_PROFILE_MAIN_LEVEL,
        MPEG4_AVC_H264_HIGH_PROFILE,
        HTJ2K_LOSSLESS,
        RLE_LOSSLESS,
    ];
}

static REGISTRY: Lazy<HashMap<&'static str, &'static TransferSyntax>> = Lazy::new(|| {
    entries::ALL
        .iter()
        .map(|ts| (ts.uid(), ts))
        .collect()
});

/// The registry of transfer syntaxes known to this library.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransferSyntaxRegistry;

impl TransferSyntaxRegistry {
    /// Obtain a transfer syntax descriptor by UID.
    ///
    /// Trailing padding (null or space) in the UID is ignored.
    pub fn get(&self, uid: &str) -> Option<&'static TransferSyntax> {
        let uid = uid.trim_end_matches(|c| c == '\0' || c == ' ');
        REGISTRY.get(uid).copied()
    }

    /// Iterate over all known transfer syntaxes.
    pub fn iter(&self) -> impl Iterator<Item = &'static TransferSyntax> {
        entries::ALL.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_syntaxes() {
        let reg = TransferSyntaxRegistry;
        let ts = reg.get("1.2.840.10008.1.2").unwrap();
        assert_eq!(ts.name(), "Implicit VR Little Endian");
        assert!(!ts.is_explicit_vr() && !ts.is_big_endian() && ts.is_native());

        let ts = reg.get("1.2.840.10008.1.2.1\0").unwrap();
        assert!(ts.is_explicit_vr() && !ts.is_deflated());
        assert!(ts.decoder().unwrap().is_explicit_vr());

        let ts = reg.get("1.2.840.10008.1.2.1.99").unwrap();
        assert!(ts.is_deflated() && ts.is_native());

        let ts = reg.get("1.2.840.10008.1.2.4.50").unwrap();
        assert!(ts.is_encapsulated() && !ts.is_native());
    }

    #[test]
    fn unknown_uid() {
        assert!(TransferSyntaxRegistry.get("1.2.3.4").is_none());
        assert!(TransferSyntaxRegistry.get("").is_none());
    }

    #[test]
    fn registry_covers_all_entries() {
        for ts in TransferSyntaxRegistry.iter() {
            assert_eq!(TransferSyntaxRegistry.get(ts.uid()), Some(ts));
            assert!(ts.decoder().is_some());
            assert!(ts.encoder().is_some());
        }
    }
}
