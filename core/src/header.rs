//! This modules contains an assortment of types required for interpreting DICOM data elements.
//! It comprises a variety of basic data types, such as the DICOM attribute tag, the
//! value representation, the element header, and the value length.

use snafu::{Backtrace, Snafu};
use std::cmp::Ordering;
use std::fmt;
use std::str::{from_utf8, FromStr};

/// Error type for issues constructing a sequence item header.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum SequenceItemHeaderError {
    /// Unexpected header tag.
    /// Only Item (0xFFFE, 0xE000),
    /// Item Delimiter (0xFFFE, 0xE00D),
    /// or Sequence Delimiter (0xFFFE, 0xE0DD)
    /// are admitted.
    #[snafu(display("Unexpected tag {}", tag))]
    UnexpectedTag { tag: Tag, backtrace: Backtrace },
}

type Result<T, E = SequenceItemHeaderError> = std::result::Result<T, E>;

/// Trait for any DICOM entity (element or item) which may have a length.
pub trait HasLength {
    /// Retrieve the value data's length as specified by the data element or
    /// item, in bytes.
    ///
    /// It is named `length` to make it distinct from the conventional method
    /// signature `len(&self) -> usize` for the number of elements of a
    /// collection.
    ///
    /// According to the standard, the concrete value size may be undefined,
    /// which can be the case for sequence elements or specific primitive
    /// values.
    fn length(&self) -> Length;

    /// Check whether the value is empty (0 length).
    fn is_empty(&self) -> bool {
        self.length() == Length(0)
    }
}

/// A trait for a data type containing a DICOM header.
#[allow(clippy::len_without_is_empty)]
pub trait Header: HasLength {
    /// Retrieve the element's tag as a `(group, element)` tuple.
    fn tag(&self) -> Tag;

    /// Check whether this is the header of an item.
    fn is_item(&self) -> bool {
        self.tag() == Tag::ITEM
    }

    /// Check whether this is the header of an item delimiter.
    fn is_item_delimiter(&self) -> bool {
        self.tag() == Tag::ITEM_DELIMITER
    }

    /// Check whether this is the header of a sequence delimiter.
    fn is_sequence_delimiter(&self) -> bool {
        self.tag() == Tag::SEQUENCE_DELIMITER
    }

    /// Check whether this is the header of an encapsulated pixel data.
    fn is_encapsulated_pixeldata(&self) -> bool {
        self.tag() == Tag(0x7FE0, 0x0010) && self.length().is_undefined()
    }
}

/// A data structure for a data element header, containing
/// a tag, value representation and specified length.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct DataElementHeader {
    /// DICOM tag
    pub tag: Tag,
    /// Value Representation
    pub vr: VR,
    /// Element length
    pub len: Length,
}

impl HasLength for DataElementHeader {
    #[inline]
    fn length(&self) -> Length {
        self.len
    }
}

impl Header for DataElementHeader {
    #[inline]
    fn tag(&self) -> Tag {
        self.tag
    }
}

impl DataElementHeader {
    /// Create a new data element header with the given properties.
    /// This is just a trivial constructor.
    #[inline]
    pub fn new<T: Into<Tag>>(tag: T, vr: VR, len: Length) -> DataElementHeader {
        DataElementHeader {
            tag: tag.into(),
            vr,
            len,
        }
    }

    /// Retrieve the element's value representation.
    #[inline]
    pub fn vr(&self) -> VR {
        self.vr
    }
}

/// Data type for describing a sequence item data element.
/// If the element represents an item, it will also contain
/// the specified length.
///
/// Delimiters keep their declared length,
/// which should be zero in conformant streams.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SequenceItemHeader {
    /// The cursor contains an item.
    Item {
        /// the length of the item in bytes (can be 0xFFFFFFFF if undefined)
        len: Length,
    },
    /// The cursor read an item delimiter.
    ItemDelimiter {
        /// the declared length, expected to be zero
        len: Length,
    },
    /// The cursor read a sequence delimiter.
    SequenceDelimiter {
        /// the declared length, expected to be zero
        len: Length,
    },
}

impl SequenceItemHeader {
    /// Create a sequence item header using the element's raw properties.
    /// An error is raised if the given tag does not relate to a
    /// sequence item, a sequence item delimiter or a sequence delimiter.
    pub fn new<T: Into<Tag>>(tag: T, len: Length) -> Result<SequenceItemHeader> {
        match tag.into() {
            Tag::ITEM => Ok(SequenceItemHeader::Item { len }),
            Tag::ITEM_DELIMITER => Ok(SequenceItemHeader::ItemDelimiter { len }),
            Tag::SEQUENCE_DELIMITER => Ok(SequenceItemHeader::SequenceDelimiter { len }),
            tag => UnexpectedTagSnafu { tag }.fail(),
        }
    }
}

impl HasLength for SequenceItemHeader {
    #[inline]
    fn length(&self) -> Length {
        match *self {
            SequenceItemHeader::Item { len }
            | SequenceItemHeader::ItemDelimiter { len }
            | SequenceItemHeader::SequenceDelimiter { len } => len,
        }
    }
}

impl Header for SequenceItemHeader {
    #[inline]
    fn tag(&self) -> Tag {
        match *self {
            SequenceItemHeader::Item { .. } => Tag::ITEM,
            SequenceItemHeader::ItemDelimiter { .. } => Tag::ITEM_DELIMITER,
            SequenceItemHeader::SequenceDelimiter { .. } => Tag::SEQUENCE_DELIMITER,
        }
    }
}

/// An enum type for a DICOM value representation.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Ord, PartialOrd)]
pub enum VR {
    /// Application Entity
    AE,
    /// Age String
    AS,
    /// Attribute Tag
    AT,
    /// Code String
    CS,
    /// Date
    DA,
    /// Decimal String
    DS,
    /// Date Time
    DT,
    /// Floating Point Single
    FL,
    /// Floating Point Double
    FD,
    /// Integer String
    IS,
    /// Long String
    LO,
    /// Long Text
    LT,
    /// Other Byte
    OB,
    /// Other Double
    OD,
    /// Other Float
    OF,
    /// Other Long
    OL,
    /// Other Very Long
    OV,
    /// Other Word
    OW,
    /// Person Name
    PN,
    /// Short String
    SH,
    /// Signed Long
    SL,
    /// Sequence of Items
    SQ,
    /// Signed Short
    SS,
    /// Short Text
    ST,
    /// Signed Very Long
    SV,
    /// Time
    TM,
    /// Unlimited Characters
    UC,
    /// Unique Identifier (UID)
    UI,
    /// Unsigned Long
    UL,
    /// Unknown
    UN,
    /// Universal Resource Identifier or Universal Resource Locator (URI/URL)
    UR,
    /// Unsigned Short
    US,
    /// Unlimited Text
    UT,
    /// Unsigned Very Long
    UV,
}

impl VR {
    /// All value representations, in alphabetical order.
    pub const ALL: [VR; 34] = [
        VR::AE,
        VR::AS,
        VR::AT,
        VR::CS,
        VR::DA,
        VR::DS,
        VR::DT,
        VR::FL,
        VR::FD,
        VR::IS,
        VR::LO,
        VR::LT,
        VR::OB,
        VR::OD,
        VR::OF,
        VR::OL,
        VR::OV,
        VR::OW,
        VR::PN,
        VR::SH,
        VR::SL,
        VR::SQ,
        VR::SS,
        VR::ST,
        VR::SV,
        VR::TM,
        VR::UC,
        VR::UI,
        VR::UL,
        VR::UN,
        VR::UR,
        VR::US,
        VR::UT,
        VR::UV,
    ];

    /// Obtain the value representation corresponding to the given two bytes.
    /// Each byte should represent an alphabetic character in upper case.
    pub fn from_binary(chars: [u8; 2]) -> Option<Self> {
        from_utf8(chars.as_ref())
            .ok()
            .and_then(|s| VR::from_str(s).ok())
    }

    /// Retrieve a string representation of this VR.
    pub fn to_string(self) -> &'static str {
        use VR::*;
        match self {
            AE => "AE",
            AS => "AS",
            AT => "AT",
            CS => "CS",
            DA => "DA",
            DS => "DS",
            DT => "DT",
            FL => "FL",
            FD => "FD",
            IS => "IS",
            LO => "LO",
            LT => "LT",
            OB => "OB",
            OD => "OD",
            OF => "OF",
            OL => "OL",
            OV => "OV",
            OW => "OW",
            PN => "PN",
            SH => "SH",
            SL => "SL",
            SQ => "SQ",
            SS => "SS",
            ST => "ST",
            SV => "SV",
            TM => "TM",
            UC => "UC",
            UI => "UI",
            UL => "UL",
            UN => "UN",
            UR => "UR",
            US => "US",
            UT => "UT",
            UV => "UV",
        }
    }

    /// Retrieve a copy of this VR's byte representation.
    /// The function returns two alphabetic characters in upper case.
    pub fn to_bytes(self) -> [u8; 2] {
        let bytes = self.to_string().as_bytes();
        [bytes[0], bytes[1]]
    }

    /// Whether an element of this VR
    /// uses the long header form in explicit VR transfer syntaxes:
    /// two reserved bytes followed by a 4-byte length.
    ///
    /// All other representations have a 2-byte length
    /// immediately after the VR code.
    pub fn has_long_header(self) -> bool {
        use VR::*;
        matches!(
            self,
            OB | OD | OF | OL | OV | OW | SQ | SV | UC | UN | UR | UT | UV
        )
    }

    /// The length of an element header of this VR
    /// in an explicit VR transfer syntax, in bytes.
    ///
    /// This is either 8 or 12.
    pub fn explicit_header_len(self) -> u32 {
        if self.has_long_header() {
            12
        } else {
            8
        }
    }

    /// The byte used to pad values of this VR to an even length.
    ///
    /// Textual representations are padded with a space,
    /// except for UI, which is padded with a null byte
    /// like all binary representations.
    pub fn padding(self) -> u8 {
        use VR::*;
        match self {
            AE | AS | CS | DA | DS | DT | IS | LO | LT | PN | SH | ST | TM | UC | UR | UT => b' ',
            _ => 0,
        }
    }

    /// The width of each numeric word in values of this VR,
    /// which need to be swapped when changing byte order.
    ///
    /// Returns `None` for textual and byte-oriented representations,
    /// whose values are independent of byte order.
    pub fn swap_width(self) -> Option<usize> {
        use VR::*;
        match self {
            AT | OW | SS | US => Some(2),
            FL | OF | OL | SL | UL => Some(4),
            FD | OD | OV | SV | UV => Some(8),
            _ => None,
        }
    }
}

/// Obtain the value representation corresponding to the given string.
/// The string should hold exactly two UTF-8 encoded alphabetic characters
/// in upper case, otherwise no match is made.
impl FromStr for VR {
    type Err = &'static str;

    fn from_str(string: &str) -> std::result::Result<Self, Self::Err> {
        VR::ALL
            .iter()
            .copied()
            .find(|vr| vr.to_string() == string)
            .ok_or("no such value representation")
    }
}

impl fmt::Display for VR {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(VR::to_string(*self))
    }
}

/// Idiomatic alias for a tag's group number.
pub type GroupNumber = u16;
/// Idiomatic alias for a tag's element number.
pub type ElementNumber = u16;

/// The data type for DICOM data element tags.
///
/// A tag is a `(group, element)` pair.
/// It converts to and from its 32-bit form,
/// in which the group occupies the 16 most significant bits.
/// The properties of a tag
/// (private, group length, item or delimiter)
/// are always derived from these two numbers.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy)]
pub struct Tag(pub GroupNumber, pub ElementNumber);

impl Tag {
    /// Item (FFFE,E000)
    pub const ITEM: Tag = Tag(0xFFFE, 0xE000);
    /// Item Delimitation Item (FFFE,E00D)
    pub const ITEM_DELIMITER: Tag = Tag(0xFFFE, 0xE00D);
    /// Sequence Delimitation Item (FFFE,E0DD)
    pub const SEQUENCE_DELIMITER: Tag = Tag(0xFFFE, 0xE0DD);

    /// Getter for the tag's group value.
    #[inline]
    pub fn group(self) -> GroupNumber {
        self.0
    }

    /// Getter for the tag's element value.
    #[inline]
    pub fn element(self) -> ElementNumber {
        self.1
    }

    /// Whether this tag belongs to a private group (odd group number).
    #[inline]
    pub fn is_private(self) -> bool {
        self.0 & 1 == 1
    }

    /// Whether this is a group length tag `(gggg,0000)`.
    #[inline]
    pub fn is_group_length(self) -> bool {
        self.1 == 0
    }

    /// Whether this is a private creator tag,
    /// `(gggg,0010)` to `(gggg,00FF)` in a private group.
    #[inline]
    pub fn is_private_creator(self) -> bool {
        self.is_private() && self.1 & 0xFF00 == 0 && self.1 >= 0x0010
    }

    /// Whether this is one of the item or delimitation pseudo-tags
    /// of group FFFE.
    #[inline]
    pub fn is_item_or_delimiter(self) -> bool {
        self.0 == 0xFFFE
    }

    /// Whether this tag is part of the file meta information group.
    #[inline]
    pub fn is_file_meta(self) -> bool {
        self.0 == 0x0002
    }

    /// Obtain the tag of the private creator element
    /// which reserves the block of this private tag.
    ///
    /// Returns `None` if the tag is not a private data element tag.
    pub fn private_creator_tag(self) -> Option<Tag> {
        if !self.is_private() || self.1 < 0x1000 {
            return None;
        }
        Some(Tag(self.0, self.1 >> 8))
    }

    /// Obtain the canonical form of this tag for dictionary look-ups.
    ///
    /// Tags in the even repeating groups 50xx (curve data)
    /// and 60xx (overlay data)
    /// are folded into the groups 5000 and 6000 respectively.
    /// Odd groups are private and, like all other tags,
    /// are returned unchanged.
    pub fn normalized(self) -> Tag {
        match self.0 & 0xFF00 {
            0x5000 | 0x6000 if self.0 & 1 == 0 => Tag(self.0 & 0xFF00, self.1),
            _ => self,
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({:#06X?}, {:#06X?})", self.0, self.1)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:04X},{:04X})", self.0, self.1)
    }
}

impl PartialEq<(u16, u16)> for Tag {
    fn eq(&self, other: &(u16, u16)) -> bool {
        self.0 == other.0 && self.1 == other.1
    }
}

impl PartialEq<[u16; 2]> for Tag {
    fn eq(&self, other: &[u16; 2]) -> bool {
        self.0 == other[0] && self.1 == other[1]
    }
}

impl From<(u16, u16)> for Tag {
    #[inline]
    fn from(value: (u16, u16)) -> Tag {
        Tag(value.0, value.1)
    }
}

impl From<[u16; 2]> for Tag {
    #[inline]
    fn from(value: [u16; 2]) -> Tag {
        Tag(value[0], value[1])
    }
}

impl From<u32> for Tag {
    #[inline]
    fn from(value: u32) -> Tag {
        Tag((value >> 16) as u16, value as u16)
    }
}

impl From<Tag> for u32 {
    #[inline]
    fn from(tag: Tag) -> u32 {
        (u32::from(tag.0) << 16) | u32::from(tag.1)
    }
}

/// Parse a tag in one of the forms `(gggg,eeee)`, `gggg,eeee` or `ggggeeee`,
/// with hexadecimal digits.
impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .unwrap_or(s);
        let (group, element) = match s.split_once(',') {
            Some(parts) => parts,
            None if s.len() == 8 && s.is_char_boundary(4) => s.split_at(4),
            None => return Err(ParseTagError { text: s.to_string() }),
        };
        if group.len() != 4 || element.len() != 4 {
            return Err(ParseTagError { text: s.to_string() });
        }
        let group = u16::from_str_radix(group, 16).map_err(|_| ParseTagError {
            text: s.to_string(),
        })?;
        let element = u16::from_str_radix(element, 16).map_err(|_| ParseTagError {
            text: s.to_string(),
        })?;
        Ok(Tag(group, element))
    }
}

/// An error returned when a string does not represent a DICOM tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTagError {
    text: String,
}

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid tag `{}`", self.text)
    }
}

impl std::error::Error for ParseTagError {}

/// A type for representing data set content length, in bytes.
/// An internal value of `0xFFFF_FFFF` represents an undefined
/// (unspecified) length, which would have to be determined
/// with a traversal based on the content's encoding.
///
/// This also means that numeric comparisons and arithmetic
/// do not function the same way as primitive number types:
///
/// Two length of undefined length are not equal.
///
/// ```
/// # use dicomio_core::Length;
/// assert_ne!(Length::UNDEFINED, Length::UNDEFINED);
/// ```
///
/// Any addition with at least one undefined
/// length results in an undefined length.
///
/// ```
/// # use dicomio_core::Length;
/// assert!((Length::defined(64) + Length::UNDEFINED).is_undefined());
/// ```
///
/// Comparing between at least one undefined length is always `false`.
///
/// ```
/// # use dicomio_core::Length;
/// assert!(Length::defined(16) < Length::defined(64));
/// assert!(!(Length::UNDEFINED < Length::defined(64)));
/// assert!(!(Length::UNDEFINED > Length::defined(64)));
/// ```
#[derive(Clone, Copy)]
pub struct Length(pub u32);

const UNDEFINED_LEN: u32 = 0xFFFF_FFFF;

impl Length {
    /// A length that is undefined.
    pub const UNDEFINED: Self = Length(UNDEFINED_LEN);

    /// Create a new length value from its internal representation.
    /// This is equivalent to `Length(len)`.
    #[inline]
    pub fn new(len: u32) -> Self {
        Length(len)
    }

    /// Create a new length value with the given number of bytes.
    ///
    /// # Panic
    ///
    /// This function will panic if `len` represents an undefined length.
    #[inline]
    pub fn defined(len: u32) -> Self {
        assert_ne!(len, UNDEFINED_LEN);
        Length(len)
    }

    /// Check whether this length is undefined (unknown).
    #[inline]
    pub fn is_undefined(self) -> bool {
        self.0 == UNDEFINED_LEN
    }

    /// Check whether this length is well defined (not undefined).
    #[inline]
    pub fn is_defined(self) -> bool {
        !self.is_undefined()
    }

    /// Fetch the concrete length value, if available.
    /// Returns `None` if it represents an undefined length.
    #[inline]
    pub fn get(self) -> Option<u32> {
        match self.0 {
            UNDEFINED_LEN => None,
            v => Some(v),
        }
    }
}

impl From<u32> for Length {
    #[inline]
    fn from(o: u32) -> Self {
        Length(o)
    }
}

impl PartialEq<Length> for Length {
    fn eq(&self, rhs: &Length) -> bool {
        match (self.0, rhs.0) {
            (UNDEFINED_LEN, _) | (_, UNDEFINED_LEN) => false,
            (l1, l2) => l1 == l2,
        }
    }
}

impl PartialOrd<Length> for Length {
    fn partial_cmp(&self, rhs: &Length) -> Option<Ordering> {
        match (self.0, rhs.0) {
            (UNDEFINED_LEN, _) | (_, UNDEFINED_LEN) => None,
            (l1, l2) => Some(l1.cmp(&l2)),
        }
    }
}

impl std::ops::Add<Length> for Length {
    type Output = Self;

    fn add(self, rhs: Length) -> Self::Output {
        match (self.0, rhs.0) {
            (UNDEFINED_LEN, _) | (_, UNDEFINED_LEN) => Length::UNDEFINED,
            (l1, l2) => {
                let o = l1 + l2;
                debug_assert!(
                    o != UNDEFINED_LEN,
                    "integer overflow (0xFFFF_FFFF reserved for undefined length)"
                );
                Length(o)
            }
        }
    }
}

impl fmt::Debug for Length {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            UNDEFINED_LEN => f.write_str("Length(Undefined)"),
            l => f.debug_tuple("Length").field(&l).finish(),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            UNDEFINED_LEN => f.write_str("U/L"),
            l => write!(f, "{}", &l),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_from_u16_pair() {
        let t = Tag::from((0x0010u16, 0x0020u16));
        assert_eq!(0x0010u16, t.group());
        assert_eq!(0x0020u16, t.element());
    }

    #[test]
    fn tag_u32_conversion() {
        let t = Tag::from(0x7FE0_0010u32);
        assert_eq!(t, Tag(0x7FE0, 0x0010));
        assert_eq!(u32::from(t), 0x7FE0_0010);
    }

    #[test]
    fn tag_properties() {
        assert!(Tag(0x0029, 0x0010).is_private_creator());
        assert!(!Tag(0x0029, 0x1010).is_private_creator());
        assert!(!Tag(0x0028, 0x0010).is_private_creator());
        assert!(!Tag(0x0029, 0x0000).is_private_creator());
        assert!(Tag(0x0028, 0x0000).is_group_length());
        assert!(Tag::ITEM.is_item_or_delimiter());
        assert_eq!(
            Tag(0x0029, 0x1210).private_creator_tag(),
            Some(Tag(0x0029, 0x0012))
        );
        assert_eq!(Tag(0x0028, 0x1210).private_creator_tag(), None);
    }

    #[test]
    fn tag_normalization() {
        assert_eq!(Tag(0x6002, 0x3000).normalized(), Tag(0x6000, 0x3000));
        assert_eq!(Tag(0x501E, 0x3000).normalized(), Tag(0x5000, 0x3000));
        assert_eq!(Tag(0x7FE0, 0x0010).normalized(), Tag(0x7FE0, 0x0010));
        assert_eq!(Tag(0x5400, 0x1010).normalized(), Tag(0x5400, 0x1010));
        // private groups in the repeating ranges
        assert_eq!(Tag(0x6001, 0x3000).normalized(), Tag(0x6001, 0x3000));
        assert_eq!(Tag(0x50FF, 0x3000).normalized(), Tag(0x50FF, 0x3000));
    }

    #[test]
    fn parse_tags() {
        assert_eq!("(7FE0,0010)".parse::<Tag>(), Ok(Tag(0x7FE0, 0x0010)));
        assert_eq!("0020,000d".parse::<Tag>(), Ok(Tag(0x0020, 0x000D)));
        assert_eq!("00100010".parse::<Tag>(), Ok(Tag(0x0010, 0x0010)));
        assert!("(0010,001)".parse::<Tag>().is_err());
        assert!("PatientName".parse::<Tag>().is_err());
    }

    #[test]
    fn vr_header_lengths() {
        let long: Vec<_> = VR::ALL
            .iter()
            .copied()
            .filter(|vr| vr.explicit_header_len() == 12)
            .collect();
        assert_eq!(
            long,
            vec![
                VR::OB,
                VR::OD,
                VR::OF,
                VR::OL,
                VR::OV,
                VR::OW,
                VR::SQ,
                VR::SV,
                VR::UC,
                VR::UN,
                VR::UR,
                VR::UT,
                VR::UV
            ]
        );
        for vr in VR::ALL {
            let len = vr.explicit_header_len();
            assert!(len == 8 || len == 12, "{} has header length {}", vr, len);
        }
    }

    #[test]
    fn vr_binary_round_trip() {
        for vr in VR::ALL {
            assert_eq!(VR::from_binary(vr.to_bytes()), Some(vr));
        }
        assert_eq!(VR::from_binary(*b"ZZ"), None);
    }

    #[test]
    fn vr_padding() {
        assert_eq!(VR::CS.padding(), b' ');
        assert_eq!(VR::UI.padding(), 0);
        assert_eq!(VR::OB.padding(), 0);
    }

    #[test]
    fn sequence_item_headers() {
        assert_eq!(
            SequenceItemHeader::new(Tag::ITEM, Length(8)).unwrap(),
            SequenceItemHeader::Item { len: Length(8) }
        );
        let h = SequenceItemHeader::new(Tag::SEQUENCE_DELIMITER, Length(4)).unwrap();
        assert!(h.is_sequence_delimiter());
        assert_eq!(h.length(), Length(4));
        assert!(SequenceItemHeader::new(Tag(0x0008, 0x0016), Length(0)).is_err());
    }
}
