//! Core data element dictionary types

use std::str::FromStr;

use snafu::{ensure, Backtrace, OptionExt, ResultExt, Snafu};
use smallvec::SmallVec;

use crate::{
    ops::{AttributeSelector, AttributeSelectorStep},
    Tag, VR,
};

/// Specification of a range of tags pertaining to an attribute.
/// Very often, the dictionary of attributes indicates a unique
/// group part and element part `(group,elem)`,
/// but occasionally an attribute may cover
/// a range of groups or elements instead.
/// For example,
/// _Overlay Data_ (60xx,3000) has more than one possible tag,
/// since it is part of a repeating group.
/// Moreover, a unique variant is defined for group length tags
/// and another one for private creator tags.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TagRange {
    /// Only a specific tag
    Single(Tag),
    /// The two rightmost digits of the _group_ portion are open:
    /// `(GGxx,EEEE)`
    Group100(Tag),
    /// The two rightmost digits of the _element_ portion are open:
    /// `(GGGG,EExx)`
    Element100(Tag),
    /// Generic group length tag,
    /// refers to any attribute of the form `(GGGG,0000)`,
    /// _save for the following exceptions_
    /// which have their own single tag record:
    ///
    /// - _Command Group Length_ (0000,0000)
    /// - _File Meta Information Group Length_ (0002,0000)
    GroupLength,
    /// Generic private creator tag,
    /// refers to any tag from (GGGG,0010) to (GGGG,00FF),
    /// where `GGGG` is an odd number.
    PrivateCreator,
}

impl TagRange {
    /// Retrieve the inner tag representation of this range.
    ///
    /// Open components are zeroed out.
    /// Returns a zeroed out tag
    /// (equivalent to _Command Group Length_)
    /// if it is a group length tag.
    /// If it is a private creator tag,
    /// this method returns `Tag(0x0009, 0x0010)`.
    pub fn inner(self) -> Tag {
        match self {
            TagRange::Single(tag) => tag,
            TagRange::Group100(tag) => tag,
            TagRange::Element100(tag) => tag,
            TagRange::GroupLength => Tag(0x0000, 0x0000),
            TagRange::PrivateCreator => Tag(0x0009, 0x0010),
        }
    }
}

/// An error returned when parsing an invalid tag range.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum TagRangeParseError {
    #[snafu(display("Not enough tag components, expected tag (group, element)"))]
    MissingTag { backtrace: Backtrace },
    #[snafu(display("Not enough tag components, expected tag element"))]
    MissingTagElement { backtrace: Backtrace },
    #[snafu(display(
        "tag component `group` has an invalid length: got {} but must be 4",
        got
    ))]
    InvalidGroupLength { got: usize, backtrace: Backtrace },
    #[snafu(display(
        "tag component `element` has an invalid length: got {} but must be 4",
        got
    ))]
    InvalidElementLength { got: usize, backtrace: Backtrace },
    #[snafu(display("unsupported tag range"))]
    UnsupportedTagRange { backtrace: Backtrace },
    #[snafu(display("invalid tag component `group`"))]
    InvalidTagGroup {
        backtrace: Backtrace,
        source: std::num::ParseIntError,
    },
    #[snafu(display("invalid tag component `element`"))]
    InvalidTagElement {
        backtrace: Backtrace,
        source: std::num::ParseIntError,
    },
}

impl FromStr for TagRange {
    type Err = TagRangeParseError;

    fn from_str(mut s: &str) -> Result<Self, Self::Err> {
        if s.starts_with('(') && s.ends_with(')') {
            s = &s[1..s.len() - 1];
        }
        let mut parts = s.split(',');
        let group = parts.next().context(MissingTagSnafu)?;
        let elem = parts.next().context(MissingTagElementSnafu)?;
        ensure!(
            group.len() == 4,
            InvalidGroupLengthSnafu { got: group.len() }
        );
        ensure!(
            elem.len() == 4,
            InvalidElementLengthSnafu { got: elem.len() }
        );

        match (&group.as_bytes()[2..], &elem.as_bytes()[2..]) {
            (b"xx", b"xx") => UnsupportedTagRangeSnafu.fail(),
            (b"xx", _) => {
                // Group100
                let group =
                    u16::from_str_radix(&group[..2], 16).context(InvalidTagGroupSnafu)? << 8;
                let elem = u16::from_str_radix(elem, 16).context(InvalidTagElementSnafu)?;
                Ok(TagRange::Group100(Tag(group, elem)))
            }
            (_, b"xx") => {
                // Element100
                let group = u16::from_str_radix(group, 16).context(InvalidTagGroupSnafu)?;
                let elem =
                    u16::from_str_radix(&elem[..2], 16).context(InvalidTagElementSnafu)? << 8;
                Ok(TagRange::Element100(Tag(group, elem)))
            }
            (_, _) => {
                // single element
                let group = u16::from_str_radix(group, 16).context(InvalidTagGroupSnafu)?;
                let elem = u16::from_str_radix(elem, 16).context(InvalidTagElementSnafu)?;
                Ok(TagRange::Single(Tag(group, elem)))
            }
        }
    }
}

/// A "virtual" value representation (VR) descriptor
/// which extends the standard enumeration with context-dependent VRs.
///
/// It is used by element dictionary entries to describe circumstances
/// in which the real VR may depend on context.
/// As an example, the _Pixel Data_ attribute
/// can have a value representation of either [`OB`](VR::OB) or [`OW`](VR::OW).
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum VirtualVr {
    /// The value representation is exactly known
    /// and does not depend on context.
    Exact(VR),
    /// Represents a pixel data sample value
    /// with a short magnitude,
    /// either [`US`](VR::US) or [`SS`](VR::SS).
    Xs,
    /// Represents overlay data sample values.
    ///
    /// It can be either [`OB`](VR::OB) or [`OW`](VR::OW).
    Ox,
    /// Represents pixel data sample value.
    ///
    /// It can be either [`OB`](VR::OB) or [`OW`](VR::OW).
    Px,
    /// Represents LUT data, which can be [`US`](VR::US) or [`OW`](VR::OW)
    Lt,
}

impl From<VR> for VirtualVr {
    fn from(value: VR) -> Self {
        VirtualVr::Exact(value)
    }
}

impl VirtualVr {
    /// Return the underlying value representation
    /// in the case that it can be unambiguously defined without context.
    pub fn exact(self) -> Option<VR> {
        match self {
            VirtualVr::Exact(vr) => Some(vr),
            _ => None,
        }
    }

    /// Whether an explicitly stated value representation
    /// is one this attribute can take.
    pub fn allows(self, vr: VR) -> bool {
        match self {
            VirtualVr::Exact(exact) => exact == vr,
            VirtualVr::Xs => matches!(vr, VR::US | VR::SS),
            VirtualVr::Ox | VirtualVr::Px => matches!(vr, VR::OB | VR::OW),
            VirtualVr::Lt => matches!(vr, VR::US | VR::OW),
        }
    }

    /// Return the underlying value representation,
    /// making a relaxed conversion if it cannot be
    /// accurately resolved without context.
    ///
    /// - [`Xs`](VirtualVr::Xs) is relaxed to [`US`](VR::US)
    /// - [`Ox`](VirtualVr::Ox) is relaxed to [`OW`](VR::OW)
    /// - [`Px`](VirtualVr::Px) is relaxed to [`OW`](VR::OW)
    /// - [`Lt`](VirtualVr::Lt) is relaxed to [`OW`](VR::OW)
    ///
    /// This is the representation to assume
    /// when decoding these attributes in implicit VR.
    pub fn relaxed(self) -> VR {
        match self {
            VirtualVr::Exact(vr) => vr,
            VirtualVr::Xs => VR::US,
            VirtualVr::Ox => VR::OW,
            VirtualVr::Px => VR::OW,
            VirtualVr::Lt => VR::OW,
        }
    }
}

/// An error during attribute selector parsing
#[derive(Debug, Snafu)]
pub struct ParseSelectorError(ParseSelectorErrorInner);

#[derive(Debug, Snafu)]
enum ParseSelectorErrorInner {
    /// missing item index delimiter `[`
    MissingItemDelimiter,
    /// missing private creator delimiter `}}`
    MissingCreatorDelimiter,
    /// invalid tag or unrecognized keyword
    ParseKey,
    /// invalid item index, should be an unsigned integer or `*`
    ParseItemIndex,
    /// last selector step should select a plain tag
    ParseLeaf,
}

/// Type trait for a dictionary of DICOM attributes.
///
/// The main purpose of an attribute dictionary is
/// to retrieve a record containing additional information about a data element,
/// in one of the following ways:
///
/// - By DICOM tag, via [`by_tag`][1];
/// - By its keyword (also known as alias) via [`by_name`][2];
/// - By an expression which may either be a keyword
///   or a tag printed in one of its standard forms,
///   using [`by_expr`][3].
///
/// These methods will return `None`
/// when the tag or name is not recognized by the dictionary.
///
/// The value representation of an element while decoding
/// is obtained through [`vr_of`][4],
/// which also takes the private creator of private attributes.
///
/// [1]: DataDictionary::by_tag
/// [2]: DataDictionary::by_name
/// [3]: DataDictionary::by_expr
/// [4]: DataDictionary::vr_of
pub trait DataDictionary {
    /// The type of the dictionary entry.
    type Entry: DataDictionaryEntry;

    /// Fetch a data element entry by its tag.
    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry>;

    /// Fetch an entry by its usual alias
    /// (e.g. "PatientName" or "SOPInstanceUID").
    /// Aliases (or keyword)
    /// are usually in UpperCamelCase,
    /// not separated by spaces,
    /// and are case sensitive.
    fn by_name(&self, name: &str) -> Option<&Self::Entry>;

    /// Fetch the entry of a private attribute
    /// in the block reserved by the given private creator.
    ///
    /// The default implementation knows no private attributes.
    fn by_private_tag(&self, _private_creator: &str, _tag: Tag) -> Option<&Self::Entry> {
        None
    }

    /// Fetch an entry by its alias or by DICOM tag expression.
    ///
    /// This method accepts a tag descriptor in any of the following formats:
    ///
    /// - `(gggg,eeee)`:
    ///   a 4-digit hexadecimal group part
    ///   and a 4-digit hexadecimal element part
    ///   surrounded by parentheses
    /// - `gggg,eeee`:
    ///   a 4-digit hexadecimal group part
    ///   and a 4-digit hexadecimal element part
    ///   not surrounded by parentheses
    /// - _`KeywordName`_:
    ///   an exact match (case sensitive) by DICOM tag keyword
    ///
    /// When failing to identify the intended syntax or the tag keyword,
    /// `None` is returned.
    fn by_expr(&self, tag: &str) -> Option<&Self::Entry> {
        match tag.parse() {
            Ok(tag) => self.by_tag(tag),
            Err(_) => self.by_name(tag),
        }
    }

    /// Determine the value representation of an attribute
    /// in the absence of an explicit VR.
    ///
    /// Private creator elements are always [`LO`](VR::LO).
    /// Other private attributes are looked up
    /// in the block of their private creator, if known.
    /// Context-dependent representations are [relaxed](VirtualVr::relaxed).
    /// Unknown attributes resolve to [`UN`](VR::UN).
    fn vr_of(&self, tag: Tag, private_creator: Option<&str>) -> VR {
        if tag.is_private_creator() {
            return VR::LO;
        }
        let entry = if tag.is_private() && !tag.is_group_length() {
            private_creator.and_then(|creator| self.by_private_tag(creator, tag))
        } else {
            self.by_tag(tag)
        };
        entry.map(|e| e.vr().relaxed()).unwrap_or(VR::UN)
    }

    /// Use this data element dictionary to interpret a DICOM tag.
    ///
    /// This method accepts a tag descriptor in any of the following formats:
    ///
    /// - `(gggg,eeee)`:
    ///   a 4-digit hexadecimal group part
    ///   and a 4-digit hexadecimal element part
    ///   surrounded by parentheses
    /// - `gggg,eeee`:
    ///   a 4-digit hexadecimal group part
    ///   and a 4-digit hexadecimal element part
    ///   not surrounded by parentheses
    /// - _`KeywordName`_:
    ///   an exact match (case sensitive) by DICOM tag keyword
    ///
    /// When failing to identify the intended syntax or the tag keyword,
    /// `None` is returned.
    fn parse_tag(&self, tag: &str) -> Option<Tag> {
        tag.parse().ok().or_else(|| {
            // look for tag in the data dictionary
            self.by_name(tag).map(|e| e.tag())
        })
    }

    /// Parse a string as an [attribute selector][1].
    ///
    /// Attribute selectors are defined by the syntax
    /// `( «key»({«creator»})?([«item»])? . )* «key»({«creator»})?`
    /// where _`«key»`_ is either a DICOM tag or keyword
    /// as accepted by this dictionary
    /// when calling the method [`parse_tag`](DataDictionary::parse_tag),
    /// _`«creator»`_ is the private creator of a private attribute
    /// (in which case the element may be written as `xxEE`),
    /// and _`«item»`_ is an item index or `*` for any item.
    /// An intermediate step without an item index also matches any item.
    ///
    /// Returns an error if the string does not follow the given syntax,
    /// or one of the key components could not be resolved.
    ///
    /// [1]: crate::ops::AttributeSelector
    ///
    /// ### Examples of valid input:
    ///
    /// - `(0002,0010)`:
    ///   _Transfer Syntax UID_
    /// - `00101010`:
    ///   _Patient Age_
    /// - `0040A168[0].CodeValue`:
    ///   _Code Value_ in first item of _Concept Code Sequence_
    /// - `WaveformSequence[*].WaveformData`:
    ///   _Waveform Data_ in any item of _Waveform Sequence_
    /// - `(0029,xx10){ACME 1.0}`:
    ///   private attribute of the block reserved by `ACME 1.0`
    fn parse_selector(&self, selector_text: &str) -> Result<AttributeSelector, ParseSelectorError> {
        let parts = split_selector_steps(selector_text);
        let count = parts.len();
        let mut steps: SmallVec<[AttributeSelectorStep; 2]> = SmallVec::new();
        for (i, part) in parts.into_iter().enumerate() {
            let is_last = i + 1 == count;
            let (part, item) = match part.strip_suffix(']') {
                Some(rest) => {
                    let split_i = rest.rfind('[').context(MissingItemDelimiterSnafu)?;
                    let item = match &rest[split_i + 1..] {
                        "*" => None,
                        index => Some(index.parse::<u32>().ok().context(ParseItemIndexSnafu)?),
                    };
                    (&rest[..split_i], Some(item))
                }
                None => (part, None),
            };
            let (key, private_creator) = match part.find('{') {
                Some(split_i) => {
                    let creator = part[split_i + 1..]
                        .strip_suffix('}')
                        .context(MissingCreatorDelimiterSnafu)?;
                    (&part[..split_i], Some(creator.to_string()))
                }
                None => (part, None),
            };
            let tag = if private_creator.is_some() {
                // the block number is not part of a private selector
                let key = key.replace("xx", "00").replace("XX", "00");
                self.parse_tag(&key)
            } else {
                self.parse_tag(key)
            };
            let tag = tag.context(ParseKeySnafu)?;

            if is_last && item.is_none() {
                steps.push(AttributeSelectorStep::Tag {
                    tag,
                    private_creator,
                });
            } else {
                steps.push(AttributeSelectorStep::Nested {
                    tag,
                    private_creator,
                    item: item.flatten(),
                });
            }
        }

        Ok(AttributeSelector::new(steps).context(ParseLeafSnafu)?)
    }
}

/// Split a selector at each `.` which is not part of a private creator.
fn split_selector_steps(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0u32;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts
}

/// The data element dictionary entry type,
/// representing a DICOM attribute.
pub trait DataDictionaryEntry {
    /// The full possible tag range of the attribute,
    /// which this dictionary entry can represent.
    fn tag_range(&self) -> TagRange;

    /// Fetch a single tag applicable to this attribute.
    ///
    /// Note that this is not necessarily
    /// the original tag used as key for this entry.
    fn tag(&self) -> Tag {
        self.tag_range().inner()
    }
    /// The alias of the attribute, with no spaces, usually in UpperCamelCase.
    fn alias(&self) -> &str;

    /// The extended value representation descriptor of the attribute.
    fn vr(&self) -> VirtualVr;
}

/// A data type for a dictionary entry with a string slice for its alias.
#[derive(Debug, PartialEq, Clone)]
pub struct DataDictionaryEntryRef<'a> {
    /// The attribute tag or tag range
    pub tag: TagRange,
    /// The alias of the attribute, with no spaces, usually InCapitalizedCamelCase
    pub alias: &'a str,
    /// The extended value representation descriptor of the attribute
    pub vr: VirtualVr,
}

impl<'a> DataDictionaryEntry for DataDictionaryEntryRef<'a> {
    fn tag_range(&self) -> TagRange {
        self.tag
    }
    fn alias(&self) -> &str {
        self.alias
    }
    fn vr(&self) -> VirtualVr {
        self.vr
    }
}

#[cfg(test)]
mod tests {
    use super::{DataDictionary, TagRange};
    use crate::dictionary::stub::StubDataDictionary;
    use crate::header::{Tag, VR};
    use crate::ops::{AttributeSelector, AttributeSelectorStep, ItemPointer};

    #[test]
    fn test_parse_tag_range() {
        let tag: TagRange = "(1234,5678)".parse().unwrap();
        assert_eq!(tag, TagRange::Single(Tag(0x1234, 0x5678)));

        let tag: TagRange = "1234,5678".parse().unwrap();
        assert_eq!(tag, TagRange::Single(Tag(0x1234, 0x5678)));

        let tag: TagRange = "12xx,5678".parse().unwrap();
        assert_eq!(tag, TagRange::Group100(Tag(0x1200, 0x5678)));

        let tag: TagRange = "1234,56xx".parse().unwrap();
        assert_eq!(tag, TagRange::Element100(Tag(0x1234, 0x5600)));
    }

    #[test]
    fn parse_selectors_without_keywords() {
        let dict = StubDataDictionary;

        let selector = dict.parse_selector("(7FE0,0010)").unwrap();
        assert_eq!(selector, AttributeSelector::from(Tag(0x7FE0, 0x0010)));

        let selector = dict.parse_selector("(0040,0275)[1].0020000D").unwrap();
        assert_eq!(
            selector,
            AttributeSelector::from((Tag(0x0040, 0x0275), 1, Tag(0x0020, 0x000D)))
        );

        let selector = dict.parse_selector("(5400,0100)[*].(5400,1010)").unwrap();
        let path = [ItemPointer::new(Tag(0x5400, 0x0100), 7)];
        assert!(selector.matches(&path, None, Tag(0x5400, 0x1010)));

        let selector = dict.parse_selector("(0029,xx10){ACME 1.0}").unwrap();
        assert_eq!(
            selector.iter().next(),
            Some(&AttributeSelectorStep::Tag {
                tag: Tag(0x0029, 0x0010),
                private_creator: Some("ACME 1.0".to_string()),
            })
        );

        // private creator containing a dot
        let selector = dict
            .parse_selector("(0029,xx01){ACME.SEQ}.(0029,xx10){ACME.SEQ}")
            .unwrap();
        assert_eq!(selector.depth(), 1);
    }

    #[test]
    fn parse_bad_selectors() {
        let dict = StubDataDictionary;
        assert!(dict.parse_selector("").is_err());
        assert!(dict.parse_selector("PatientName").is_err());
        assert!(dict.parse_selector("(0040,0275)[x].(0020,000D)").is_err());
        assert!(dict.parse_selector("(0040,0275)[0]").is_err());
        assert!(dict.parse_selector("(0040,0275).(0020,000D)[").is_err());
        assert!(dict.parse_selector("(0029,xx10){ACME").is_err());
    }

    #[test]
    fn vr_of_without_entries() {
        let dict = StubDataDictionary;
        assert_eq!(dict.vr_of(Tag(0x0029, 0x0010), None), VR::LO);
        assert_eq!(dict.vr_of(Tag(0x0029, 0x1010), Some("ACME")), VR::UN);
        assert_eq!(dict.vr_of(Tag(0x0010, 0x0010), None), VR::UN);
    }
}
