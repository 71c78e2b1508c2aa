//! The standard data element dictionary,
//! indexed for the look-ups made while decoding.
use crate::tags::ENTRIES;
use dicomio_core::dictionary::{DataDictionary, DataDictionaryEntryRef, TagRange, VirtualVr};
use dicomio_core::{Tag, VR};
use once_cell::sync::Lazy;
use std::collections::HashMap;

type Entry = DataDictionaryEntryRef<'static>;

static INDEX: Lazy<Index> = Lazy::new(Index::build);

/// Entries by tag and by keyword.
///
/// Attributes of the repeating groups 50xx and 60xx
/// are indexed under their [normalized](Tag::normalized) tag.
#[derive(Debug)]
struct Index {
    by_tag: HashMap<Tag, &'static Entry>,
    by_name: HashMap<&'static str, &'static Entry>,
}

impl Index {
    fn build() -> Self {
        let mut by_tag = HashMap::with_capacity(ENTRIES.len());
        let mut by_name = HashMap::with_capacity(ENTRIES.len() + 1);
        for entry in ENTRIES {
            by_tag.insert(entry.tag.inner(), entry);
            by_name.insert(entry.alias, entry);
        }
        by_name.insert(GROUP_LENGTH.alias, &GROUP_LENGTH);
        Index { by_tag, by_name }
    }

    fn get(&self, tag: Tag) -> Option<&'static Entry> {
        if let Some(entry) = self.by_tag.get(&tag) {
            return Some(*entry);
        }
        let normalized = tag.normalized();
        if normalized != tag {
            if let Some(entry) = self.by_tag.get(&normalized) {
                if matches!(entry.tag, TagRange::Group100(_)) {
                    return Some(*entry);
                }
            }
        }
        generic_entry(tag)
    }
}

/// Group length of any group without an entry of its own.
static GROUP_LENGTH: Entry = DataDictionaryEntryRef {
    tag: TagRange::GroupLength,
    alias: "GenericGroupLength",
    vr: VirtualVr::Exact(VR::UL),
};

static PRIVATE_CREATOR: Entry = DataDictionaryEntryRef {
    tag: TagRange::PrivateCreator,
    alias: "PrivateCreator",
    vr: VirtualVr::Exact(VR::LO),
};

/// The entries of attributes present in every group.
fn generic_entry(tag: Tag) -> Option<&'static Entry> {
    if tag.is_private_creator() {
        Some(&PRIVATE_CREATOR)
    } else if tag.is_group_length() {
        Some(&GROUP_LENGTH)
    } else {
        None
    }
}

/// The standard DICOM data element dictionary.
///
/// It holds the attributes of the [`tags`](crate::tags) module,
/// plus generic group length and private creator entries.
/// No private attributes are known,
/// so they resolve to `UN` in implicit VR.
/// The index is built on first use.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StandardDataDictionary;

impl DataDictionary for StandardDataDictionary {
    type Entry = Entry;

    fn by_name(&self, name: &str) -> Option<&Entry> {
        INDEX.by_name.get(name).copied()
    }

    fn by_tag(&self, tag: Tag) -> Option<&Entry> {
        INDEX.get(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::StandardDataDictionary;
    use crate::tags;
    use dicomio_core::dictionary::{DataDictionary, TagRange, VirtualVr};
    use dicomio_core::ops::{AttributeSelector, AttributeSelectorStep};
    use dicomio_core::{Tag, VR};

    #[test]
    fn keywords_and_tags() {
        let dict = StandardDataDictionary;
        let name = dict.by_name("PatientName").unwrap();
        assert_eq!(name.tag, TagRange::Single(tags::PATIENT_NAME));
        assert_eq!(name.vr, VirtualVr::Exact(VR::PN));

        let pixel_data = dict.by_tag(tags::PIXEL_DATA).unwrap();
        assert_eq!(pixel_data.alias, "PixelData");
        assert_eq!(pixel_data.vr, VirtualVr::Px);

        assert_eq!(dict.by_expr("(0010,0010)"), Some(name));
        assert_eq!(dict.parse_tag("OperatorsName"), Some(tags::OPERATORS_NAME));
        assert_eq!(dict.parse_tag("OPERATORSNAME"), None);
        assert_eq!(dict.parse_tag("1111,2222,3333"), None);
    }

    #[test]
    fn repeating_groups() {
        let dict = StandardDataDictionary;
        let overlay = dict.by_tag(Tag(0x60EE, 0x3000)).unwrap();
        assert_eq!(overlay.alias, "OverlayData");
        assert_eq!(overlay.tag, TagRange::Group100(Tag(0x6000, 0x3000)));
        assert_eq!(dict.by_tag(Tag(0x5002, 0x3000)).unwrap().alias, "CurveData");
        // odd groups are private
        assert_eq!(dict.by_tag(Tag(0x6001, 0x3000)), None);
    }

    #[test]
    fn generic_entries() {
        let dict = StandardDataDictionary;
        assert_eq!(
            dict.by_tag(tags::FILE_META_INFORMATION_GROUP_LENGTH)
                .unwrap()
                .alias,
            "FileMetaInformationGroupLength"
        );
        let group_length = dict.by_tag(Tag(0x7FE0, 0x0000)).unwrap();
        assert_eq!(group_length.tag, TagRange::GroupLength);
        assert_eq!(dict.by_name("GenericGroupLength"), Some(group_length));

        for tag in [Tag(0x0009, 0x0010), Tag(0x00ED, 0x00FF)] {
            assert_eq!(dict.by_tag(tag).unwrap().tag, TagRange::PrivateCreator);
        }
        assert_eq!(dict.by_tag(Tag(0x0009, 0x1010)), None);
        assert_eq!(dict.by_tag(Tag(0x0008, 0x0001)), None);
    }

    #[test]
    fn resolves_implicit_vr() {
        let dict = StandardDataDictionary;
        assert_eq!(dict.vr_of(tags::PATIENT_NAME, None), VR::PN);
        assert_eq!(dict.vr_of(tags::PIXEL_DATA, None), VR::OW);
        assert_eq!(dict.vr_of(Tag(0x6002, 0x3000), None), VR::OW);
        assert_eq!(dict.vr_of(tags::SMALLEST_IMAGE_PIXEL_VALUE, None), VR::US);
        assert_eq!(dict.vr_of(Tag(0x0029, 0x0010), None), VR::LO);
        assert_eq!(dict.vr_of(Tag(0x0029, 0x1010), Some("ACME 1.0")), VR::UN);
        assert_eq!(dict.vr_of(Tag(0x0019, 0x0000), None), VR::UL);
        assert_eq!(dict.vr_of(Tag(0x0009, 0x1234), None), VR::UN);
    }

    #[test]
    fn stated_vr_of_context_dependent_attributes() {
        let dict = StandardDataDictionary;
        let pixel_data = dict.by_tag(tags::PIXEL_DATA).unwrap().vr;
        assert!(pixel_data.allows(VR::OB));
        assert!(pixel_data.allows(VR::OW));
        assert!(!pixel_data.allows(VR::UN));
        let smallest = dict.by_tag(tags::SMALLEST_IMAGE_PIXEL_VALUE).unwrap().vr;
        assert!(smallest.allows(VR::SS));
        assert!(smallest.allows(VR::US));
        assert!(!smallest.allows(VR::UL));
        let name = dict.by_tag(tags::PATIENT_NAME).unwrap().vr;
        assert!(name.allows(VR::PN));
        assert!(!name.allows(VR::LO));
    }

    #[test]
    fn parse_selector_with_keywords() {
        let dict = StandardDataDictionary;
        let selector: AttributeSelector = dict
            .parse_selector("WaveformSequence[0].WaveformData")
            .unwrap();
        assert_eq!(
            selector,
            AttributeSelector::from((tags::WAVEFORM_SEQUENCE, 0, tags::WAVEFORM_DATA))
        );
        let steps: Vec<_> = selector.iter().cloned().collect();
        assert_eq!(steps[1], AttributeSelectorStep::from(tags::WAVEFORM_DATA));
    }
}
