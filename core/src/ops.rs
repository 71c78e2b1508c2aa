//! Module for attribute addressing inside nested data sets.
//!
//! An [`ItemPointer`] describes one level of nesting
//! (the sequence element and the item index within it),
//! and an [`ItemPath`] lists them from the data set root
//! to the data set containing the element being processed.
//!
//! An [`AttributeSelector`] describes an attribute to look for,
//! possibly nested in sequences,
//! and can be [matched](AttributeSelector::matches)
//! against the path and tag of an element while it is being read.
use std::fmt::{self, Write};

use smallvec::{smallvec, SmallVec};

use crate::Tag;

/// One level of nesting inside a data set:
/// the item at position `item_index` of the sequence `sequence_tag`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemPointer {
    /// the tag of the sequence element
    pub sequence_tag: Tag,
    /// the private creator reserving the sequence's block,
    /// if the sequence is a private attribute
    pub private_creator: Option<String>,
    /// the index of the item in the sequence, starting at 0
    pub item_index: u32,
}

impl ItemPointer {
    /// Create an item pointer to a public sequence.
    pub fn new(sequence_tag: Tag, item_index: u32) -> Self {
        ItemPointer {
            sequence_tag,
            private_creator: None,
            item_index,
        }
    }

    /// Create an item pointer to a private sequence.
    pub fn private(sequence_tag: Tag, private_creator: impl Into<String>, item_index: u32) -> Self {
        ItemPointer {
            sequence_tag,
            private_creator: Some(private_creator.into()),
            item_index,
        }
    }
}

impl fmt::Display for ItemPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sequence_tag)?;
        if let Some(creator) = &self.private_creator {
            write!(f, "{{{}}}", creator)?;
        }
        write!(f, "[{}]", self.item_index)
    }
}

/// An ordered list of item pointers,
/// from the data set root (outermost) to the innermost item.
pub type ItemPath = SmallVec<[ItemPointer; 4]>;

/// A single step of an attribute selection.
///
/// A selector step may either select an element directly at the root
/// (`Tag`)
/// or a nested data set in a sequence (`Nested`).
/// A full attribute selector can be built
/// from a sequence of these steps.
///
/// When a private creator is attached to the step,
/// the tag's element number is only compared on its lower byte,
/// since the upper byte depends on which block the creator reserved.
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub enum AttributeSelectorStep {
    /// Select the element with the tag reachable at the root of this data set
    Tag {
        /// the attribute tag
        tag: Tag,
        /// the private creator of the attribute, if private
        private_creator: Option<String>,
    },
    /// Select an item in a data set sequence
    Nested {
        /// the sequence tag
        tag: Tag,
        /// the private creator of the sequence, if private
        private_creator: Option<String>,
        /// the item index, or `None` to match any item
        item: Option<u32>,
    },
}

impl AttributeSelectorStep {
    /// The tag selected by this step.
    pub fn tag(&self) -> Tag {
        match self {
            AttributeSelectorStep::Tag { tag, .. } | AttributeSelectorStep::Nested { tag, .. } => {
                *tag
            }
        }
    }

    /// The private creator of the attribute selected by this step.
    pub fn private_creator(&self) -> Option<&str> {
        match self {
            AttributeSelectorStep::Tag {
                private_creator, ..
            }
            | AttributeSelectorStep::Nested {
                private_creator, ..
            } => private_creator.as_deref(),
        }
    }

    fn matches_tag(&self, private_creator: Option<&str>, tag: Tag) -> bool {
        match self.private_creator() {
            None => self.tag() == tag,
            Some(creator) => {
                let own = self.tag();
                private_creator == Some(creator)
                    && own.group() == tag.group()
                    && own.element() & 0x00FF == tag.element() & 0x00FF
            }
        }
    }
}

impl From<Tag> for AttributeSelectorStep {
    /// Creates an `AttributeSelectorStep::Tag` from a tag
    fn from(tag: Tag) -> Self {
        AttributeSelectorStep::Tag {
            tag,
            private_creator: None,
        }
    }
}

impl From<(Tag, u32)> for AttributeSelectorStep {
    /// Creates an `AttributeSelectorStep::Nested` from a tag and item index
    fn from((tag, item): (Tag, u32)) -> Self {
        AttributeSelectorStep::Nested {
            tag,
            private_creator: None,
            item: Some(item),
        }
    }
}

impl fmt::Display for AttributeSelectorStep {
    /// Displays the attribute selector step:
    /// `(GGGG,EEEE)` if `Tag`,
    /// and `(GGGG,EEEE)[i]` if `Nested`
    /// (`[*]` when any item is accepted),
    /// with `{creator}` after the tag if private.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.tag();
        match self.private_creator() {
            Some(creator) => write!(
                f,
                "({:04X},xx{:02X}){{{}}}",
                tag.group(),
                tag.element() & 0xFF,
                creator
            )?,
            None => write!(f, "{}", tag)?,
        }
        match self {
            AttributeSelectorStep::Nested { item: Some(i), .. } => write!(f, "[{}]", i),
            AttributeSelectorStep::Nested { item: None, .. } => f.write_str("[*]"),
            AttributeSelectorStep::Tag { .. } => Ok(()),
        }
    }
}

/// An attribute selector.
///
/// This type defines a unique element in a DICOM data set,
/// even at any depth of nested data sets.
/// A selector may be perceived as a path
/// which navigates to the intended element.
///
/// The last step is always a tag selection,
/// and all steps before it are nested item selections.
///
/// Selectors are usually parsed from text
/// with a data dictionary's [`parse_selector`][parse] method.
///
/// [parse]: crate::dictionary::DataDictionary::parse_selector
///
/// ```
/// # use dicomio_core::Tag;
/// # use dicomio_core::ops::{AttributeSelector, ItemPointer};
/// // Study Instance UID in the first item of the Request Attributes Sequence
/// let selector = AttributeSelector::from((Tag(0x0040, 0x0275), 0, Tag(0x0020, 0x000D)));
/// let path = [ItemPointer::new(Tag(0x0040, 0x0275), 0)];
/// assert!(selector.matches(&path, None, Tag(0x0020, 0x000D)));
/// assert!(!selector.matches(&[], None, Tag(0x0020, 0x000D)));
/// ```
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct AttributeSelector(SmallVec<[AttributeSelectorStep; 2]>);

impl AttributeSelector {
    /// Construct an attribute selector
    /// from an arbitrary sequence of selector steps.
    ///
    /// Returns `None` if the sequence is empty,
    /// the intermediate items do not represent item selector steps,
    /// or the last step is not a tag selector step.
    pub fn new(steps: impl IntoIterator<Item = AttributeSelectorStep>) -> Option<Self> {
        let steps: SmallVec<_> = steps.into_iter().collect();
        let (last, rest) = steps.split_last()?;
        if matches!(last, AttributeSelectorStep::Nested { .. }) {
            return None;
        }
        if rest
            .iter()
            .any(|step| matches!(step, AttributeSelectorStep::Tag { .. }))
        {
            return None;
        }
        Some(AttributeSelector(steps))
    }

    /// Create a selector for a private attribute at the root,
    /// identified by its group, the lower byte of its element number,
    /// and the private creator reserving its block.
    pub fn private(tag: Tag, private_creator: impl Into<String>) -> Self {
        AttributeSelector(smallvec![AttributeSelectorStep::Tag {
            tag,
            private_creator: Some(private_creator.into()),
        }])
    }

    /// Return a non-empty iterator over the steps of attribute selection.
    ///
    /// The iterator is guaranteed to produce at least one item,
    /// and the last one is guaranteed to be a tag step.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeSelectorStep> {
        self.0.iter()
    }

    /// The number of nesting levels crossed by this selector.
    pub fn depth(&self) -> usize {
        self.0.len() - 1
    }

    /// Check whether an element found with the given item path,
    /// private creator and tag is the one selected.
    ///
    /// The path must have exactly as many levels as the selector,
    /// and each level must name the same sequence
    /// (and the same item, when the step names one).
    pub fn matches(&self, path: &[ItemPointer], private_creator: Option<&str>, tag: Tag) -> bool {
        // guaranteed not to be empty
        let (last, nested) = match self.0.split_last() {
            Some(split) => split,
            None => return false,
        };
        if nested.len() != path.len() || !last.matches_tag(private_creator, tag) {
            return false;
        }
        nested.iter().zip(path).all(|(step, pointer)| {
            let item_matches = match step {
                AttributeSelectorStep::Nested { item: Some(i), .. } => *i == pointer.item_index,
                _ => true,
            };
            item_matches
                && step.matches_tag(pointer.private_creator.as_deref(), pointer.sequence_tag)
        })
    }
}

impl IntoIterator for AttributeSelector {
    type Item = AttributeSelectorStep;
    type IntoIter = <SmallVec<[AttributeSelectorStep; 2]> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Creates an attibute selector for `tag`
impl From<Tag> for AttributeSelector {
    /// Creates a simple attribute selector
    /// by selecting the element at the data set root with the given DICOM tag.
    fn from(tag: Tag) -> Self {
        AttributeSelector(smallvec![tag.into()])
    }
}

/// Creates an attibute selector for `tag[item].tag`
impl From<(Tag, u32, Tag)> for AttributeSelector {
    /// Creates an attribute selector
    /// which navigates to the data set item at index `item`
    /// in the sequence at the first DICOM tag (`tag0`),
    /// then selects the element with the second DICOM tag (`tag1`).
    fn from((tag0, item, tag1): (Tag, u32, Tag)) -> Self {
        AttributeSelector(smallvec![(tag0, item).into(), tag1.into()])
    }
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut started = false;
        for step in &self.0 {
            if started {
                f.write_char('.')?;
            }
            started = true;
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_selectors() {
        let selector: AttributeSelector = Tag(0x0010, 0x0010).into();
        assert_eq!(selector.to_string(), "(0010,0010)");

        let selector: AttributeSelector = (Tag(0x0040, 0xA730), 1, Tag(0x0040, 0xA160)).into();
        assert_eq!(selector.to_string(), "(0040,A730)[1].(0040,A160)");

        let selector = AttributeSelector::private(Tag(0x0029, 0x1010), "ACME 1.0");
        assert_eq!(selector.to_string(), "(0029,xx10){ACME 1.0}");
    }

    #[test]
    fn selector_validation() {
        assert!(AttributeSelector::new(Vec::new()).is_none());
        assert!(
            AttributeSelector::new([AttributeSelectorStep::from((Tag(0x0040, 0x0275), 0))])
                .is_none()
        );
        assert!(AttributeSelector::new([
            AttributeSelectorStep::from(Tag(0x0040, 0x0275)),
            AttributeSelectorStep::from(Tag(0x0020, 0x000D)),
        ])
        .is_none());
    }

    #[test]
    fn match_nested_any_item() {
        let selector = AttributeSelector::new([
            AttributeSelectorStep::Nested {
                tag: Tag(0x5400, 0x0100),
                private_creator: None,
                item: None,
            },
            AttributeSelectorStep::from(Tag(0x5400, 0x1010)),
        ])
        .unwrap();
        let path = [ItemPointer::new(Tag(0x5400, 0x0100), 3)];
        assert!(selector.matches(&path, None, Tag(0x5400, 0x1010)));
        assert!(!selector.matches(&[], None, Tag(0x5400, 0x1010)));
        let deeper = [path[0].clone(), ItemPointer::new(Tag(0x5400, 0x0100), 0)];
        assert!(!selector.matches(&deeper, None, Tag(0x5400, 0x1010)));
    }

    #[test]
    fn match_private_block() {
        let selector = AttributeSelector::private(Tag(0x0029, 0x0010), "ACME 1.0");
        // block 0x12 reserved by the same creator
        assert!(selector.matches(&[], Some("ACME 1.0"), Tag(0x0029, 0x1210)));
        assert!(!selector.matches(&[], Some("OTHER"), Tag(0x0029, 0x1210)));
        assert!(!selector.matches(&[], None, Tag(0x0029, 0x1210)));
        assert!(!selector.matches(&[], Some("ACME 1.0"), Tag(0x0029, 0x1211)));
    }
}
