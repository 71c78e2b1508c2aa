//! Module containing data structures and readers of DICOM file meta information tables.
use dicomio_core::{Tag, VR};
use dicomio_dictionary_std::tags;
use snafu::{Backtrace, OptionExt, Snafu};

/// The magic code of a DICOM file, right after the 128-byte preamble.
pub const DICM_MAGIC_CODE: [u8; 4] = [b'D', b'I', b'C', b'M'];

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// A required file meta group element is missing
    #[snafu(display("Missing data element `{}`", alias))]
    MissingElement {
        alias: &'static str,
        backtrace: Backtrace,
    },
}

type Result<T, E = Error> = std::result::Result<T, E>;

/// DICOM File Meta Information Table.
///
/// This data type contains the relevant parts of the file meta information table, as
/// specified in [1].
/// Text values are held without their trailing padding.
///
/// [1]: http://dicom.nema.org/medical/dicom/current/output/chtml/part06/chapter_7.html
#[derive(Debug, Clone, PartialEq)]
pub struct FileMetaTable {
    /// File Meta Information Group Length
    pub information_group_length: u32,
    /// File Meta Information Version
    pub information_version: [u8; 2],
    /// Media Storage SOP Class UID
    pub media_storage_sop_class_uid: String,
    /// Media Storage SOP Instance UID
    pub media_storage_sop_instance_uid: String,
    /// Transfer Syntax UID
    pub transfer_syntax: String,
    /// Implementation Class UID
    pub implementation_class_uid: String,

    /// Implementation Version Name
    pub implementation_version_name: Option<String>,
    /// Source Application Entity Title
    pub source_application_entity_title: Option<String>,
    /// Sending Application Entity Title
    pub sending_application_entity_title: Option<String>,
    /// Receiving Application Entity Title
    pub receiving_application_entity_title: Option<String>,
    /// Private Information Creator UID
    pub private_information_creator_uid: Option<String>,
    /// Private Information
    pub private_information: Option<Vec<u8>>,
}

fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(|c| c == '\0' || c == ' ')
        .to_string()
}

fn padded(text: &str, vr: VR) -> Vec<u8> {
    let mut bytes = text.as_bytes().to_vec();
    if bytes.len() % 2 == 1 {
        bytes.push(vr.padding());
    }
    bytes
}

impl FileMetaTable {
    /// Collect a table from the raw elements of a file meta group,
    /// as read from a stream.
    ///
    /// Missing elements are left empty
    /// and unknown elements are ignored.
    /// The group length is recalculated
    /// if it was not among the elements.
    pub fn from_elements<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = (Tag, Vec<u8>)>,
    {
        let mut table = FileMetaTable {
            information_group_length: 0,
            information_version: [0, 1],
            media_storage_sop_class_uid: String::new(),
            media_storage_sop_instance_uid: String::new(),
            transfer_syntax: String::new(),
            implementation_class_uid: String::new(),
            implementation_version_name: None,
            source_application_entity_title: None,
            sending_application_entity_title: None,
            receiving_application_entity_title: None,
            private_information_creator_uid: None,
            private_information: None,
        };
        let mut group_length = None;
        for (tag, bytes) in elements {
            match tag {
                tags::FILE_META_INFORMATION_GROUP_LENGTH if bytes.len() >= 4 => {
                    group_length = Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]));
                }
                tags::FILE_META_INFORMATION_VERSION if bytes.len() >= 2 => {
                    table.information_version = [bytes[0], bytes[1]];
                }
                tags::MEDIA_STORAGE_SOP_CLASS_UID => {
                    table.media_storage_sop_class_uid = decode_text(&bytes)
                }
                tags::MEDIA_STORAGE_SOP_INSTANCE_UID => {
                    table.media_storage_sop_instance_uid = decode_text(&bytes)
                }
                tags::TRANSFER_SYNTAX_UID => table.transfer_syntax = decode_text(&bytes),
                tags::IMPLEMENTATION_CLASS_UID => {
                    table.implementation_class_uid = decode_text(&bytes)
                }
                tags::IMPLEMENTATION_VERSION_NAME => {
                    table.implementation_version_name = Some(decode_text(&bytes))
                }
                tags::SOURCE_APPLICATION_ENTITY_TITLE => {
                    table.source_application_entity_title = Some(decode_text(&bytes))
                }
                tags::SENDING_APPLICATION_ENTITY_TITLE => {
                    table.sending_application_entity_title = Some(decode_text(&bytes))
                }
                tags::RECEIVING_APPLICATION_ENTITY_TITLE => {
                    table.receiving_application_entity_title = Some(decode_text(&bytes))
                }
                tags::PRIVATE_INFORMATION_CREATOR_UID => {
                    table.private_information_creator_uid = Some(decode_text(&bytes))
                }
                tags::PRIVATE_INFORMATION => table.private_information = Some(bytes),
                _ => {
                    tracing::debug!("Ignoring file meta element {}", tag);
                }
            }
        }
        table.information_group_length =
            group_length.unwrap_or_else(|| table.calculate_group_length());
        table
    }

    /// The transfer syntax UID, without padding.
    pub fn transfer_syntax(&self) -> &str {
        self.transfer_syntax
            .trim_end_matches(|c: char| c == '\0' || c == ' ')
    }

    /// Replace the transfer syntax UID
    /// and update the group length accordingly.
    pub fn set_transfer_syntax(&mut self, uid: impl Into<String>) {
        self.transfer_syntax = uid.into();
        self.update_information_group_length();
    }

    /// Recalculate the group length from the current contents of the table.
    pub fn update_information_group_length(&mut self) {
        self.information_group_length = self.calculate_group_length();
    }

    /// The encoded length of all elements of the table
    /// except the group length element.
    pub fn calculate_group_length(&self) -> u32 {
        self.content_elements()
            .iter()
            .map(|(_, vr, bytes)| vr.explicit_header_len() + bytes.len() as u32)
            .sum()
    }

    /// The elements of the table in tag order, with padded values,
    /// starting with a group length element holding the calculated length.
    pub fn to_elements(&self) -> Vec<(Tag, VR, Vec<u8>)> {
        let content = self.content_elements();
        let group_length: u32 = content
            .iter()
            .map(|(_, vr, bytes)| vr.explicit_header_len() + bytes.len() as u32)
            .sum();
        let mut elements = Vec::with_capacity(content.len() + 1);
        elements.push((
            tags::FILE_META_INFORMATION_GROUP_LENGTH,
            VR::UL,
            group_length.to_le_bytes().to_vec(),
        ));
        elements.extend(content);
        elements
    }

    fn content_elements(&self) -> Vec<(Tag, VR, Vec<u8>)> {
        let mut elements = vec![
            (
                tags::FILE_META_INFORMATION_VERSION,
                VR::OB,
                self.information_version.to_vec(),
            ),
            (
                tags::MEDIA_STORAGE_SOP_CLASS_UID,
                VR::UI,
                padded(&self.media_storage_sop_class_uid, VR::UI),
            ),
            (
                tags::MEDIA_STORAGE_SOP_INSTANCE_UID,
                VR::UI,
                padded(&self.media_storage_sop_instance_uid, VR::UI),
            ),
            (
                tags::TRANSFER_SYNTAX_UID,
                VR::UI,
                padded(self.transfer_syntax(), VR::UI),
            ),
            (
                tags::IMPLEMENTATION_CLASS_UID,
                VR::UI,
                padded(&self.implementation_class_uid, VR::UI),
            ),
        ];
        let optional = [
            (
                tags::IMPLEMENTATION_VERSION_NAME,
                VR::SH,
                &self.implementation_version_name,
            ),
            (
                tags::SOURCE_APPLICATION_ENTITY_TITLE,
                VR::AE,
                &self.source_application_entity_title,
            ),
            (
                tags::SENDING_APPLICATION_ENTITY_TITLE,
                VR::AE,
                &self.sending_application_entity_title,
            ),
            (
                tags::RECEIVING_APPLICATION_ENTITY_TITLE,
                VR::AE,
                &self.receiving_application_entity_title,
            ),
            (
                tags::PRIVATE_INFORMATION_CREATOR_UID,
                VR::UI,
                &self.private_information_creator_uid,
            ),
        ];
        for (tag, vr, value) in optional {
            if let Some(text) = value {
                elements.push((tag, vr, padded(text, vr)));
            }
        }
        if let Some(info) = &self.private_information {
            let mut bytes = info.clone();
            if bytes.len() % 2 == 1 {
                bytes.push(0);
            }
            elements.push((tags::PRIVATE_INFORMATION, VR::OB, bytes));
        }
        elements
    }
}

/// A builder for DICOM meta information tables.
#[derive(Debug, Default, Clone)]
pub struct FileMetaTableBuilder {
    /// File Meta Information Version (OB)
    information_version: Option<[u8; 2]>,
    /// Media Storage SOP Class UID (UI)
    media_storage_sop_class_uid: Option<String>,
    /// Media Storage SOP Instance UID (UI)
    media_storage_sop_instance_uid: Option<String>,
    /// Transfer Syntax UID (UI)
    transfer_syntax: Option<String>,
    /// Implementation Class UID (UI)
    implementation_class_uid: Option<String>,

    /// Implementation Version Name (SH)
    implementation_version_name: Option<String>,
    /// Source Application Entity Title (AE)
    source_application_entity_title: Option<String>,
    /// Sending Application Entity Title (AE)
    sending_application_entity_title: Option<String>,
    /// Receiving Application Entity Title (AE)
    receiving_application_entity_title: Option<String>,
    /// Private Information Creator UID (UI)
    private_information_creator_uid: Option<String>,
    /// Private Information (OB)
    private_information: Option<Vec<u8>>,
}

/// The implementation class UID written when none is given.
pub const IMPLEMENTATION_CLASS_UID: &str = "2.25.137038125948464847900039011591283709926";

/// The implementation version name written when none is given.
pub const IMPLEMENTATION_VERSION_NAME: &str = "DICOMIO_0_1";

impl FileMetaTableBuilder {
    /// Create a new, empty builder.
    pub fn new() -> FileMetaTableBuilder {
        FileMetaTableBuilder::default()
    }

    /// Define the meta information version.
    pub fn information_version(mut self, value: [u8; 2]) -> FileMetaTableBuilder {
        self.information_version = Some(value);
        self
    }

    /// Define the media storage SOP class UID.
    pub fn media_storage_sop_class_uid<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        self.media_storage_sop_class_uid = Some(value.into());
        self
    }

    /// Define the media storage SOP instance UID.
    pub fn media_storage_sop_instance_uid<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        self.media_storage_sop_instance_uid = Some(value.into());
        self
    }

    /// Define the media storage SOP class UID,
    /// unless one was already defined.
    pub fn media_storage_sop_class_uid_if_missing<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        if self.media_storage_sop_class_uid.is_none() {
            self.media_storage_sop_class_uid = Some(value.into());
        }
        self
    }

    /// Define the media storage SOP instance UID,
    /// unless one was already defined.
    pub fn media_storage_sop_instance_uid_if_missing<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        if self.media_storage_sop_instance_uid.is_none() {
            self.media_storage_sop_instance_uid = Some(value.into());
        }
        self
    }

    /// Define the transfer syntax UID.
    pub fn transfer_syntax<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        self.transfer_syntax = Some(value.into());
        self
    }

    /// Define the implementation class UID.
    pub fn implementation_class_uid<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        self.implementation_class_uid = Some(value.into());
        self
    }

    /// Define the implementation version name.
    pub fn implementation_version_name<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        self.implementation_version_name = Some(value.into());
        self
    }

    /// Define the source application entity title.
    pub fn source_application_entity_title<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        self.source_application_entity_title = Some(value.into());
        self
    }

    /// Define the sending application entity title.
    pub fn sending_application_entity_title<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        self.sending_application_entity_title = Some(value.into());
        self
    }

    /// Define the receiving application entity title.
    pub fn receiving_application_entity_title<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        self.receiving_application_entity_title = Some(value.into());
        self
    }

    /// Define the private information creator UID.
    pub fn private_information_creator_uid<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        self.private_information_creator_uid = Some(value.into());
        self
    }

    /// Define the private information as a vector of bytes.
    pub fn private_information<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<Vec<u8>>,
    {
        self.private_information = Some(value.into());
        self
    }

    /// Build the table.
    ///
    /// The SOP class, SOP instance and transfer syntax UIDs are required.
    /// A missing implementation class UID and version name
    /// are filled in with those of this library.
    pub fn build(self) -> Result<FileMetaTable> {
        // Missing information version, will assume (00H, 01H)
        let information_version = self.information_version.unwrap_or([0, 1]);
        let media_storage_sop_class_uid = self
            .media_storage_sop_class_uid
            .context(MissingElementSnafu {
                alias: "MediaStorageSOPClassUID",
            })?;
        let media_storage_sop_instance_uid =
            self.media_storage_sop_instance_uid
                .context(MissingElementSnafu {
                    alias: "MediaStorageSOPInstanceUID",
                })?;
        let transfer_syntax = self.transfer_syntax.context(MissingElementSnafu {
            alias: "TransferSyntax",
        })?;
        let (implementation_class_uid, implementation_version_name) =
            match self.implementation_class_uid {
                Some(uid) => (uid, self.implementation_version_name),
                None => (
                    IMPLEMENTATION_CLASS_UID.to_string(),
                    self.implementation_version_name
                        .or_else(|| Some(IMPLEMENTATION_VERSION_NAME.to_string())),
                ),
            };

        let mut table = FileMetaTable {
            information_group_length: 0,
            information_version,
            media_storage_sop_class_uid,
            media_storage_sop_instance_uid,
            transfer_syntax,
            implementation_class_uid,
            implementation_version_name,
            source_application_entity_title: self.source_application_entity_title,
            sending_application_entity_title: self.sending_application_entity_title,
            receiving_application_entity_title: self.receiving_application_entity_title,
            private_information_creator_uid: self.private_information_creator_uid,
            private_information: self.private_information,
        };
        table.update_information_group_length();
        Ok(table)
    }
}
