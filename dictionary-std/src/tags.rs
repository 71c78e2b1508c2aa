//! Data element tag declarations
//!
//! This module contains a curated subset of the attributes
//! in the standard data element dictionary (DICOM PS3.6),
//! covering the file meta group, common identification attributes,
//! and every attribute recognized as bulk data.

use dicomio_core::dictionary::{DataDictionaryEntryRef, TagRange::*, VirtualVr};
use dicomio_core::dictionary::VirtualVr::Exact;
use dicomio_core::{Tag, VR};

/// Command Group Length 0000,0000 UL
#[rustfmt::skip]
pub const COMMAND_GROUP_LENGTH: Tag = Tag(0x0000, 0x0000);
/// File Meta Information Group Length 0002,0000 UL
#[rustfmt::skip]
pub const FILE_META_INFORMATION_GROUP_LENGTH: Tag = Tag(0x0002, 0x0000);
/// File Meta Information Version 0002,0001 OB
#[rustfmt::skip]
pub const FILE_META_INFORMATION_VERSION: Tag = Tag(0x0002, 0x0001);
/// Media Storage SOP Class UID 0002,0002 UI
#[rustfmt::skip]
pub const MEDIA_STORAGE_SOP_CLASS_UID: Tag = Tag(0x0002, 0x0002);
/// Media Storage SOP Instance UID 0002,0003 UI
#[rustfmt::skip]
pub const MEDIA_STORAGE_SOP_INSTANCE_UID: Tag = Tag(0x0002, 0x0003);
/// Transfer Syntax UID 0002,0010 UI
#[rustfmt::skip]
pub const TRANSFER_SYNTAX_UID: Tag = Tag(0x0002, 0x0010);
/// Implementation Class UID 0002,0012 UI
#[rustfmt::skip]
pub const IMPLEMENTATION_CLASS_UID: Tag = Tag(0x0002, 0x0012);
/// Implementation Version Name 0002,0013 SH
#[rustfmt::skip]
pub const IMPLEMENTATION_VERSION_NAME: Tag = Tag(0x0002, 0x0013);
/// Source Application Entity Title 0002,0016 AE
#[rustfmt::skip]
pub const SOURCE_APPLICATION_ENTITY_TITLE: Tag = Tag(0x0002, 0x0016);
/// Sending Application Entity Title 0002,0017 AE
#[rustfmt::skip]
pub const SENDING_APPLICATION_ENTITY_TITLE: Tag = Tag(0x0002, 0x0017);
/// Receiving Application Entity Title 0002,0018 AE
#[rustfmt::skip]
pub const RECEIVING_APPLICATION_ENTITY_TITLE: Tag = Tag(0x0002, 0x0018);
/// Private Information Creator UID 0002,0100 UI
#[rustfmt::skip]
pub const PRIVATE_INFORMATION_CREATOR_UID: Tag = Tag(0x0002, 0x0100);
/// Private Information 0002,0102 OB
#[rustfmt::skip]
pub const PRIVATE_INFORMATION: Tag = Tag(0x0002, 0x0102);
/// Specific Character Set 0008,0005 CS
#[rustfmt::skip]
pub const SPECIFIC_CHARACTER_SET: Tag = Tag(0x0008, 0x0005);
/// Image Type 0008,0008 CS
#[rustfmt::skip]
pub const IMAGE_TYPE: Tag = Tag(0x0008, 0x0008);
/// Instance Creation Date 0008,0012 DA
#[rustfmt::skip]
pub const INSTANCE_CREATION_DATE: Tag = Tag(0x0008, 0x0012);
/// Instance Creation Time 0008,0013 TM
#[rustfmt::skip]
pub const INSTANCE_CREATION_TIME: Tag = Tag(0x0008, 0x0013);
/// SOP Class UID 0008,0016 UI
#[rustfmt::skip]
pub const SOP_CLASS_UID: Tag = Tag(0x0008, 0x0016);
/// SOP Instance UID 0008,0018 UI
#[rustfmt::skip]
pub const SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x0018);
/// Study Date 0008,0020 DA
#[rustfmt::skip]
pub const STUDY_DATE: Tag = Tag(0x0008, 0x0020);
/// Study Time 0008,0030 TM
#[rustfmt::skip]
pub const STUDY_TIME: Tag = Tag(0x0008, 0x0030);
/// Accession Number 0008,0050 SH
#[rustfmt::skip]
pub const ACCESSION_NUMBER: Tag = Tag(0x0008, 0x0050);
/// Modality 0008,0060 CS
#[rustfmt::skip]
pub const MODALITY: Tag = Tag(0x0008, 0x0060);
/// Manufacturer 0008,0070 LO
#[rustfmt::skip]
pub const MANUFACTURER: Tag = Tag(0x0008, 0x0070);
/// Referring Physician's Name 0008,0090 PN
#[rustfmt::skip]
pub const REFERRING_PHYSICIAN_NAME: Tag = Tag(0x0008, 0x0090);
/// Code Value 0008,0100 SH
#[rustfmt::skip]
pub const CODE_VALUE: Tag = Tag(0x0008, 0x0100);
/// Coding Scheme Designator 0008,0102 SH
#[rustfmt::skip]
pub const CODING_SCHEME_DESIGNATOR: Tag = Tag(0x0008, 0x0102);
/// Code Meaning 0008,0104 LO
#[rustfmt::skip]
pub const CODE_MEANING: Tag = Tag(0x0008, 0x0104);
/// Study Description 0008,1030 LO
#[rustfmt::skip]
pub const STUDY_DESCRIPTION: Tag = Tag(0x0008, 0x1030);
/// Series Description 0008,103E LO
#[rustfmt::skip]
pub const SERIES_DESCRIPTION: Tag = Tag(0x0008, 0x103E);
/// Operators' Name 0008,1070 PN
#[rustfmt::skip]
pub const OPERATORS_NAME: Tag = Tag(0x0008, 0x1070);
/// Referenced Image Sequence 0008,1140 SQ
#[rustfmt::skip]
pub const REFERENCED_IMAGE_SEQUENCE: Tag = Tag(0x0008, 0x1140);
/// Referenced SOP Class UID 0008,1150 UI
#[rustfmt::skip]
pub const REFERENCED_SOP_CLASS_UID: Tag = Tag(0x0008, 0x1150);
/// Referenced SOP Instance UID 0008,1155 UI
#[rustfmt::skip]
pub const REFERENCED_SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x1155);
/// Referenced SOP Sequence 0008,1199 SQ
#[rustfmt::skip]
pub const REFERENCED_SOP_SEQUENCE: Tag = Tag(0x0008, 0x1199);
/// Patient's Name 0010,0010 PN
#[rustfmt::skip]
pub const PATIENT_NAME: Tag = Tag(0x0010, 0x0010);
/// Patient ID 0010,0020 LO
#[rustfmt::skip]
pub const PATIENT_ID: Tag = Tag(0x0010, 0x0020);
/// Patient's Birth Date 0010,0030 DA
#[rustfmt::skip]
pub const PATIENT_BIRTH_DATE: Tag = Tag(0x0010, 0x0030);
/// Patient's Sex 0010,0040 CS
#[rustfmt::skip]
pub const PATIENT_SEX: Tag = Tag(0x0010, 0x0040);
/// Patient's Age 0010,1010 AS
#[rustfmt::skip]
pub const PATIENT_AGE: Tag = Tag(0x0010, 0x1010);
/// Patient's Size 0010,1020 DS
#[rustfmt::skip]
pub const PATIENT_SIZE: Tag = Tag(0x0010, 0x1020);
/// Patient's Weight 0010,1030 DS
#[rustfmt::skip]
pub const PATIENT_WEIGHT: Tag = Tag(0x0010, 0x1030);
/// Pregnancy Status 0010,21C0 US
#[rustfmt::skip]
pub const PREGNANCY_STATUS: Tag = Tag(0x0010, 0x21C0);
/// Body Part Examined 0018,0015 CS
#[rustfmt::skip]
pub const BODY_PART_EXAMINED: Tag = Tag(0x0018, 0x0015);
/// Slice Thickness 0018,0050 DS
#[rustfmt::skip]
pub const SLICE_THICKNESS: Tag = Tag(0x0018, 0x0050);
/// Spacing Between Slices 0018,0088 DS
#[rustfmt::skip]
pub const SPACING_BETWEEN_SLICES: Tag = Tag(0x0018, 0x0088);
/// Protocol Name 0018,1030 LO
#[rustfmt::skip]
pub const PROTOCOL_NAME: Tag = Tag(0x0018, 0x1030);
/// Study Instance UID 0020,000D UI
#[rustfmt::skip]
pub const STUDY_INSTANCE_UID: Tag = Tag(0x0020, 0x000D);
/// Series Instance UID 0020,000E UI
#[rustfmt::skip]
pub const SERIES_INSTANCE_UID: Tag = Tag(0x0020, 0x000E);
/// Study ID 0020,0010 SH
#[rustfmt::skip]
pub const STUDY_ID: Tag = Tag(0x0020, 0x0010);
/// Series Number 0020,0011 IS
#[rustfmt::skip]
pub const SERIES_NUMBER: Tag = Tag(0x0020, 0x0011);
/// Instance Number 0020,0013 IS
#[rustfmt::skip]
pub const INSTANCE_NUMBER: Tag = Tag(0x0020, 0x0013);
/// Image Position (Patient) 0020,0032 DS
#[rustfmt::skip]
pub const IMAGE_POSITION_PATIENT: Tag = Tag(0x0020, 0x0032);
/// Image Orientation (Patient) 0020,0037 DS
#[rustfmt::skip]
pub const IMAGE_ORIENTATION_PATIENT: Tag = Tag(0x0020, 0x0037);
/// Frame of Reference UID 0020,0052 UI
#[rustfmt::skip]
pub const FRAME_OF_REFERENCE_UID: Tag = Tag(0x0020, 0x0052);
/// Samples per Pixel 0028,0002 US
#[rustfmt::skip]
pub const SAMPLES_PER_PIXEL: Tag = Tag(0x0028, 0x0002);
/// Photometric Interpretation 0028,0004 CS
#[rustfmt::skip]
pub const PHOTOMETRIC_INTERPRETATION: Tag = Tag(0x0028, 0x0004);
/// Number of Frames 0028,0008 IS
#[rustfmt::skip]
pub const NUMBER_OF_FRAMES: Tag = Tag(0x0028, 0x0008);
/// Rows 0028,0010 US
#[rustfmt::skip]
pub const ROWS: Tag = Tag(0x0028, 0x0010);
/// Columns 0028,0011 US
#[rustfmt::skip]
pub const COLUMNS: Tag = Tag(0x0028, 0x0011);
/// Pixel Spacing 0028,0030 DS
#[rustfmt::skip]
pub const PIXEL_SPACING: Tag = Tag(0x0028, 0x0030);
/// Bits Allocated 0028,0100 US
#[rustfmt::skip]
pub const BITS_ALLOCATED: Tag = Tag(0x0028, 0x0100);
/// Bits Stored 0028,0101 US
#[rustfmt::skip]
pub const BITS_STORED: Tag = Tag(0x0028, 0x0101);
/// High Bit 0028,0102 US
#[rustfmt::skip]
pub const HIGH_BIT: Tag = Tag(0x0028, 0x0102);
/// Pixel Representation 0028,0103 US
#[rustfmt::skip]
pub const PIXEL_REPRESENTATION: Tag = Tag(0x0028, 0x0103);
/// Smallest Image Pixel Value 0028,0106 US or SS
#[rustfmt::skip]
pub const SMALLEST_IMAGE_PIXEL_VALUE: Tag = Tag(0x0028, 0x0106);
/// Largest Image Pixel Value 0028,0107 US or SS
#[rustfmt::skip]
pub const LARGEST_IMAGE_PIXEL_VALUE: Tag = Tag(0x0028, 0x0107);
/// Window Center 0028,1050 DS
#[rustfmt::skip]
pub const WINDOW_CENTER: Tag = Tag(0x0028, 0x1050);
/// Window Width 0028,1051 DS
#[rustfmt::skip]
pub const WINDOW_WIDTH: Tag = Tag(0x0028, 0x1051);
/// Rescale Intercept 0028,1052 DS
#[rustfmt::skip]
pub const RESCALE_INTERCEPT: Tag = Tag(0x0028, 0x1052);
/// Rescale Slope 0028,1053 DS
#[rustfmt::skip]
pub const RESCALE_SLOPE: Tag = Tag(0x0028, 0x1053);
/// Red Palette Color Lookup Table Descriptor 0028,1101 US or SS
#[rustfmt::skip]
pub const RED_PALETTE_COLOR_LOOKUP_TABLE_DESCRIPTOR: Tag = Tag(0x0028, 0x1101);
/// Green Palette Color Lookup Table Descriptor 0028,1102 US or SS
#[rustfmt::skip]
pub const GREEN_PALETTE_COLOR_LOOKUP_TABLE_DESCRIPTOR: Tag = Tag(0x0028, 0x1102);
/// Blue Palette Color Lookup Table Descriptor 0028,1103 US or SS
#[rustfmt::skip]
pub const BLUE_PALETTE_COLOR_LOOKUP_TABLE_DESCRIPTOR: Tag = Tag(0x0028, 0x1103);
/// Red Palette Color Lookup Table Data 0028,1201 OW
#[rustfmt::skip]
pub const RED_PALETTE_COLOR_LOOKUP_TABLE_DATA: Tag = Tag(0x0028, 0x1201);
/// Green Palette Color Lookup Table Data 0028,1202 OW
#[rustfmt::skip]
pub const GREEN_PALETTE_COLOR_LOOKUP_TABLE_DATA: Tag = Tag(0x0028, 0x1202);
/// Blue Palette Color Lookup Table Data 0028,1203 OW
#[rustfmt::skip]
pub const BLUE_PALETTE_COLOR_LOOKUP_TABLE_DATA: Tag = Tag(0x0028, 0x1203);
/// Alpha Palette Color Lookup Table Data 0028,1204 OW
#[rustfmt::skip]
pub const ALPHA_PALETTE_COLOR_LOOKUP_TABLE_DATA: Tag = Tag(0x0028, 0x1204);
/// Large Red Palette Color Lookup Table Data 0028,1211 OW
#[rustfmt::skip]
pub const LARGE_RED_PALETTE_COLOR_LOOKUP_TABLE_DATA: Tag = Tag(0x0028, 0x1211);
/// Large Green Palette Color Lookup Table Data 0028,1212 OW
#[rustfmt::skip]
pub const LARGE_GREEN_PALETTE_COLOR_LOOKUP_TABLE_DATA: Tag = Tag(0x0028, 0x1212);
/// Large Blue Palette Color Lookup Table Data 0028,1213 OW
#[rustfmt::skip]
pub const LARGE_BLUE_PALETTE_COLOR_LOOKUP_TABLE_DATA: Tag = Tag(0x0028, 0x1213);
/// Segmented Red Palette Color Lookup Table Data 0028,1221 OW
#[rustfmt::skip]
pub const SEGMENTED_RED_PALETTE_COLOR_LOOKUP_TABLE_DATA: Tag = Tag(0x0028, 0x1221);
/// Segmented Green Palette Color Lookup Table Data 0028,1222 OW
#[rustfmt::skip]
pub const SEGMENTED_GREEN_PALETTE_COLOR_LOOKUP_TABLE_DATA: Tag = Tag(0x0028, 0x1222);
/// Segmented Blue Palette Color Lookup Table Data 0028,1223 OW
#[rustfmt::skip]
pub const SEGMENTED_BLUE_PALETTE_COLOR_LOOKUP_TABLE_DATA: Tag = Tag(0x0028, 0x1223);
/// Segmented Alpha Palette Color Lookup Table Data 0028,1224 OW
#[rustfmt::skip]
pub const SEGMENTED_ALPHA_PALETTE_COLOR_LOOKUP_TABLE_DATA: Tag = Tag(0x0028, 0x1224);
/// Modality LUT Sequence 0028,3000 SQ
#[rustfmt::skip]
pub const MODALITY_LUT_SEQUENCE: Tag = Tag(0x0028, 0x3000);
/// LUT Descriptor 0028,3002 US or SS
#[rustfmt::skip]
pub const LUT_DESCRIPTOR: Tag = Tag(0x0028, 0x3002);
/// LUT Data 0028,3006 US or OW
#[rustfmt::skip]
pub const LUT_DATA: Tag = Tag(0x0028, 0x3006);
/// Pixel Data Provider URL 0028,7FE0 UR
#[rustfmt::skip]
pub const PIXEL_DATA_PROVIDER_URL: Tag = Tag(0x0028, 0x7FE0);
/// Request Attributes Sequence 0040,0275 SQ
#[rustfmt::skip]
pub const REQUEST_ATTRIBUTES_SEQUENCE: Tag = Tag(0x0040, 0x0275);
/// Value Type 0040,A040 CS
#[rustfmt::skip]
pub const VALUE_TYPE: Tag = Tag(0x0040, 0xA040);
/// Concept Name Code Sequence 0040,A043 SQ
#[rustfmt::skip]
pub const CONCEPT_NAME_CODE_SEQUENCE: Tag = Tag(0x0040, 0xA043);
/// Text Value 0040,A160 UT
#[rustfmt::skip]
pub const TEXT_VALUE: Tag = Tag(0x0040, 0xA160);
/// Concept Code Sequence 0040,A168 SQ
#[rustfmt::skip]
pub const CONCEPT_CODE_SEQUENCE: Tag = Tag(0x0040, 0xA168);
/// Content Sequence 0040,A730 SQ
#[rustfmt::skip]
pub const CONTENT_SEQUENCE: Tag = Tag(0x0040, 0xA730);
/// Encapsulated Document 0042,0011 OB
#[rustfmt::skip]
pub const ENCAPSULATED_DOCUMENT: Tag = Tag(0x0042, 0x0011);
/// MIME Type of Encapsulated Document 0042,0012 LO
#[rustfmt::skip]
pub const MIME_TYPE_OF_ENCAPSULATED_DOCUMENT: Tag = Tag(0x0042, 0x0012);
/// Radiopharmaceutical Information Sequence 0054,0016 SQ
#[rustfmt::skip]
pub const RADIOPHARMACEUTICAL_INFORMATION_SEQUENCE: Tag = Tag(0x0054, 0x0016);
/// Audio Sample Data 50xx,200C OB or OW
#[rustfmt::skip]
pub const AUDIO_SAMPLE_DATA: Tag = Tag(0x5000, 0x200C);
/// Curve Data 50xx,3000 OB or OW
#[rustfmt::skip]
pub const CURVE_DATA: Tag = Tag(0x5000, 0x3000);
/// Waveform Sequence 5400,0100 SQ
#[rustfmt::skip]
pub const WAVEFORM_SEQUENCE: Tag = Tag(0x5400, 0x0100);
/// Waveform Bits Allocated 5400,1004 US
#[rustfmt::skip]
pub const WAVEFORM_BITS_ALLOCATED: Tag = Tag(0x5400, 0x1004);
/// Waveform Sample Interpretation 5400,1006 CS
#[rustfmt::skip]
pub const WAVEFORM_SAMPLE_INTERPRETATION: Tag = Tag(0x5400, 0x1006);
/// Waveform Data 5400,1010 OB or OW
#[rustfmt::skip]
pub const WAVEFORM_DATA: Tag = Tag(0x5400, 0x1010);
/// Spectroscopy Data 5600,0020 OF
#[rustfmt::skip]
pub const SPECTROSCOPY_DATA: Tag = Tag(0x5600, 0x0020);
/// Overlay Rows 60xx,0010 US
#[rustfmt::skip]
pub const OVERLAY_ROWS: Tag = Tag(0x6000, 0x0010);
/// Overlay Columns 60xx,0011 US
#[rustfmt::skip]
pub const OVERLAY_COLUMNS: Tag = Tag(0x6000, 0x0011);
/// Overlay Type 60xx,0040 CS
#[rustfmt::skip]
pub const OVERLAY_TYPE: Tag = Tag(0x6000, 0x0040);
/// Overlay Origin 60xx,0050 SS
#[rustfmt::skip]
pub const OVERLAY_ORIGIN: Tag = Tag(0x6000, 0x0050);
/// Overlay Bits Allocated 60xx,0100 US
#[rustfmt::skip]
pub const OVERLAY_BITS_ALLOCATED: Tag = Tag(0x6000, 0x0100);
/// Overlay Data 60xx,3000 OB or OW
#[rustfmt::skip]
pub const OVERLAY_DATA: Tag = Tag(0x6000, 0x3000);
/// Extended Offset Table 7FE0,0001 OV
#[rustfmt::skip]
pub const EXTENDED_OFFSET_TABLE: Tag = Tag(0x7FE0, 0x0001);
/// Extended Offset Table Lengths 7FE0,0002 OV
#[rustfmt::skip]
pub const EXTENDED_OFFSET_TABLE_LENGTHS: Tag = Tag(0x7FE0, 0x0002);
/// Float Pixel Data 7FE0,0008 OF
#[rustfmt::skip]
pub const FLOAT_PIXEL_DATA: Tag = Tag(0x7FE0, 0x0008);
/// Double Float Pixel Data 7FE0,0009 OD
#[rustfmt::skip]
pub const DOUBLE_FLOAT_PIXEL_DATA: Tag = Tag(0x7FE0, 0x0009);
/// Pixel Data 7FE0,0010 OB or OW
#[rustfmt::skip]
pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);
/// Digital Signatures Sequence FFFA,FFFA SQ
#[rustfmt::skip]
pub const DIGITAL_SIGNATURES_SEQUENCE: Tag = Tag(0xFFFA, 0xFFFA);
/// Data Set Trailing Padding FFFC,FFFC OB
#[rustfmt::skip]
pub const DATA_SET_TRAILING_PADDING: Tag = Tag(0xFFFC, 0xFFFC);

type E = DataDictionaryEntryRef<'static>;

#[rustfmt::skip]
pub(crate) const ENTRIES: &[E] = &[
    E { tag: Single(COMMAND_GROUP_LENGTH), alias: "CommandGroupLength", vr: Exact(VR::UL) }, // Command Group Length
    E { tag: Single(FILE_META_INFORMATION_GROUP_LENGTH), alias: "FileMetaInformationGroupLength", vr: Exact(VR::UL) }, // File Meta Information Group Length
    E { tag: Single(FILE_META_INFORMATION_VERSION), alias: "FileMetaInformationVersion", vr: Exact(VR::OB) }, // File Meta Information Version
    E { tag: Single(MEDIA_STORAGE_SOP_CLASS_UID), alias: "MediaStorageSOPClassUID", vr: Exact(VR::UI) }, // Media Storage SOP Class UID
    E { tag: Single(MEDIA_STORAGE_SOP_INSTANCE_UID), alias: "MediaStorageSOPInstanceUID", vr: Exact(VR::UI) }, // Media Storage SOP Instance UID
    E { tag: Single(TRANSFER_SYNTAX_UID), alias: "TransferSyntaxUID", vr: Exact(VR::UI) }, // Transfer Syntax UID
    E { tag: Single(IMPLEMENTATION_CLASS_UID), alias: "ImplementationClassUID", vr: Exact(VR::UI) }, // Implementation Class UID
    E { tag: Single(IMPLEMENTATION_VERSION_NAME), alias: "ImplementationVersionName", vr: Exact(VR::SH) }, // Implementation Version Name
    E { tag: Single(SOURCE_APPLICATION_ENTITY_TITLE), alias: "SourceApplicationEntityTitle", vr: Exact(VR::AE) }, // Source Application Entity Title
    E { tag: Single(SENDING_APPLICATION_ENTITY_TITLE), alias: "SendingApplicationEntityTitle", vr: Exact(VR::AE) }, // Sending Application Entity Title
    E { tag: Single(RECEIVING_APPLICATION_ENTITY_TITLE), alias: "ReceivingApplicationEntityTitle", vr: Exact(VR::AE) }, // Receiving Application Entity Title
    E { tag: Single(PRIVATE_INFORMATION_CREATOR_UID), alias: "PrivateInformationCreatorUID", vr: Exact(VR::UI) }, // Private Information Creator UID
    E { tag: Single(PRIVATE_INFORMATION), alias: "PrivateInformation", vr: Exact(VR::OB) }, // Private Information
    E { tag: Single(SPECIFIC_CHARACTER_SET), alias: "SpecificCharacterSet", vr: Exact(VR::CS) }, // Specific Character Set
    E { tag: Single(IMAGE_TYPE), alias: "ImageType", vr: Exact(VR::CS) }, // Image Type
    E { tag: Single(INSTANCE_CREATION_DATE), alias: "InstanceCreationDate", vr: Exact(VR::DA) }, // Instance Creation Date
    E { tag: Single(INSTANCE_CREATION_TIME), alias: "InstanceCreationTime", vr: Exact(VR::TM) }, // Instance Creation Time
    E { tag: Single(SOP_CLASS_UID), alias: "SOPClassUID", vr: Exact(VR::UI) }, // SOP Class UID
    E { tag: Single(SOP_INSTANCE_UID), alias: "SOPInstanceUID", vr: Exact(VR::UI) }, // SOP Instance UID
    E { tag: Single(STUDY_DATE), alias: "StudyDate", vr: Exact(VR::DA) }, // Study Date
    E { tag: Single(STUDY_TIME), alias: "StudyTime", vr: Exact(VR::TM) }, // Study Time
    E { tag: Single(ACCESSION_NUMBER), alias: "AccessionNumber", vr: Exact(VR::SH) }, // Accession Number
    E { tag: Single(MODALITY), alias: "Modality", vr: Exact(VR::CS) }, // Modality
    E { tag: Single(MANUFACTURER), alias: "Manufacturer", vr: Exact(VR::LO) }, // Manufacturer
    E { tag: Single(REFERRING_PHYSICIAN_NAME), alias: "ReferringPhysicianName", vr: Exact(VR::PN) }, // Referring Physician's Name
    E { tag: Single(CODE_VALUE), alias: "CodeValue", vr: Exact(VR::SH) }, // Code Value
    E { tag: Single(CODING_SCHEME_DESIGNATOR), alias: "CodingSchemeDesignator", vr: Exact(VR::SH) }, // Coding Scheme Designator
    E { tag: Single(CODE_MEANING), alias: "CodeMeaning", vr: Exact(VR::LO) }, // Code Meaning
    E { tag: Single(STUDY_DESCRIPTION), alias: "StudyDescription", vr: Exact(VR::LO) }, // Study Description
    E { tag: Single(SERIES_DESCRIPTION), alias: "SeriesDescription", vr: Exact(VR::LO) }, // Series Description
    E { tag: Single(OPERATORS_NAME), alias: "OperatorsName", vr: Exact(VR::PN) }, // Operators' Name
    E { tag: Single(REFERENCED_IMAGE_SEQUENCE), alias: "ReferencedImageSequence", vr: Exact(VR::SQ) }, // Referenced Image Sequence
    E { tag: Single(REFERENCED_SOP_CLASS_UID), alias: "ReferencedSOPClassUID", vr: Exact(VR::UI) }, // Referenced SOP Class UID
    E { tag: Single(REFERENCED_SOP_INSTANCE_UID), alias: "ReferencedSOPInstanceUID", vr: Exact(VR::UI) }, // Referenced SOP Instance UID
    E { tag: Single(REFERENCED_SOP_SEQUENCE), alias: "ReferencedSOPSequence", vr: Exact(VR::SQ) }, // Referenced SOP Sequence
    E { tag: Single(PATIENT_NAME), alias: "PatientName", vr: Exact(VR::PN) }, // Patient's Name
    E { tag: Single(PATIENT_ID), alias: "PatientID", vr: Exact(VR::LO) }, // Patient ID
    E { tag: Single(PATIENT_BIRTH_DATE), alias: "PatientBirthDate", vr: Exact(VR::DA) }, // Patient's Birth Date
    E { tag: Single(PATIENT_SEX), alias: "PatientSex", vr: Exact(VR::CS) }, // Patient's Sex
    E { tag: Single(PATIENT_AGE), alias: "PatientAge", vr: Exact(VR::AS) }, // Patient's Age
    E { tag: Single(PATIENT_SIZE), alias: "PatientSize", vr: Exact(VR::DS) }, // Patient's Size
    E { tag: Single(PATIENT_WEIGHT), alias: "PatientWeight", vr: Exact(VR::DS) }, // Patient's Weight
    E { tag: Single(PREGNANCY_STATUS), alias: "PregnancyStatus", vr: Exact(VR::US) }, // Pregnancy Status
    E { tag: Single(BODY_PART_EXAMINED), alias: "BodyPartExamined", vr: Exact(VR::CS) }, // Body Part Examined
    E { tag: Single(SLICE_THICKNESS), alias: "SliceThickness", vr: Exact(VR::DS) }, // Slice Thickness
    E { tag: Single(SPACING_BETWEEN_SLICES), alias: "SpacingBetweenSlices", vr: Exact(VR::DS) }, // Spacing Between Slices
    E { tag: Single(PROTOCOL_NAME), alias: "ProtocolName", vr: Exact(VR::LO) }, // Protocol Name
    E { tag: Single(STUDY_INSTANCE_UID), alias: "StudyInstanceUID", vr: Exact(VR::UI) }, // Study Instance UID
    E { tag: Single(SERIES_INSTANCE_UID), alias: "SeriesInstanceUID", vr: Exact(VR::UI) }, // Series Instance UID
    E { tag: Single(STUDY_ID), alias: "StudyID", vr: Exact(VR::SH) }, // Study ID
    E { tag: Single(SERIES_NUMBER), alias: "SeriesNumber", vr: Exact(VR::IS) }, // Series Number
    E { tag: Single(INSTANCE_NUMBER), alias: "InstanceNumber", vr: Exact(VR::IS) }, // Instance Number
    E { tag: Single(IMAGE_POSITION_PATIENT), alias: "ImagePositionPatient", vr: Exact(VR::DS) }, // Image Position (Patient)
    E { tag: Single(IMAGE_ORIENTATION_PATIENT), alias: "ImageOrientationPatient", vr: Exact(VR::DS) }, // Image Orientation (Patient)
    E { tag: Single(FRAME_OF_REFERENCE_UID), alias: "FrameOfReferenceUID", vr: Exact(VR::UI) }, // Frame of Reference UID
    E { tag: Single(SAMPLES_PER_PIXEL), alias: "SamplesPerPixel", vr: Exact(VR::US) }, // Samples per Pixel
    E { tag: Single(PHOTOMETRIC_INTERPRETATION), alias: "PhotometricInterpretation", vr: Exact(VR::CS) }, // Photometric Interpretation
    E { tag: Single(NUMBER_OF_FRAMES), alias: "NumberOfFrames", vr: Exact(VR::IS) }, // Number of Frames
    E { tag: Single(ROWS), alias: "Rows", vr: Exact(VR::US) }, // Rows
    E { tag: Single(COLUMNS), alias: "Columns", vr: Exact(VR::US) }, // Columns
    E { tag: Single(PIXEL_SPACING), alias: "PixelSpacing", vr: Exact(VR::DS) }, // Pixel Spacing
    E { tag: Single(BITS_ALLOCATED), alias: "BitsAllocated", vr: Exact(VR::US) }, // Bits Allocated
    E { tag: Single(BITS_STORED), alias: "BitsStored", vr: Exact(VR::US) }, // Bits Stored
    E { tag: Single(HIGH_BIT), alias: "HighBit", vr: Exact(VR::US) }, // High Bit
    E { tag: Single(PIXEL_REPRESENTATION), alias: "PixelRepresentation", vr: Exact(VR::US) }, // Pixel Representation
    E { tag: Single(SMALLEST_IMAGE_PIXEL_VALUE), alias: "SmallestImagePixelValue", vr: VirtualVr::Xs }, // Smallest Image Pixel Value
    E { tag: Single(LARGEST_IMAGE_PIXEL_VALUE), alias: "LargestImagePixelValue", vr: VirtualVr::Xs }, // Largest Image Pixel Value
    E { tag: Single(WINDOW_CENTER), alias: "WindowCenter", vr: Exact(VR::DS) }, // Window Center
    E { tag: Single(WINDOW_WIDTH), alias: "WindowWidth", vr: Exact(VR::DS) }, // Window Width
    E { tag: Single(RESCALE_INTERCEPT), alias: "RescaleIntercept", vr: Exact(VR::DS) }, // Rescale Intercept
    E { tag: Single(RESCALE_SLOPE), alias: "RescaleSlope", vr: Exact(VR::DS) }, // Rescale Slope
    E { tag: Single(RED_PALETTE_COLOR_LOOKUP_TABLE_DESCRIPTOR), alias: "RedPaletteColorLookupTableDescriptor", vr: VirtualVr::Xs }, // Red Palette Color Lookup Table Descriptor
    E { tag: Single(GREEN_PALETTE_COLOR_LOOKUP_TABLE_DESCRIPTOR), alias: "GreenPaletteColorLookupTableDescriptor", vr: VirtualVr::Xs }, // Green Palette Color Lookup Table Descriptor
    E { tag: Single(BLUE_PALETTE_COLOR_LOOKUP_TABLE_DESCRIPTOR), alias: "BluePaletteColorLookupTableDescriptor", vr: VirtualVr::Xs }, // Blue Palette Color Lookup Table Descriptor
    E { tag: Single(RED_PALETTE_COLOR_LOOKUP_TABLE_DATA), alias: "RedPaletteColorLookupTableData", vr: Exact(VR::OW) }, // Red Palette Color Lookup Table Data
    E { tag: Single(GREEN_PALETTE_COLOR_LOOKUP_TABLE_DATA), alias: "GreenPaletteColorLookupTableData", vr: Exact(VR::OW) }, // Green Palette Color Lookup Table Data
    E { tag: Single(BLUE_PALETTE_COLOR_LOOKUP_TABLE_DATA), alias: "BluePaletteColorLookupTableData", vr: Exact(VR::OW) }, // Blue Palette Color Lookup Table Data
    E { tag: Single(ALPHA_PALETTE_COLOR_LOOKUP_TABLE_DATA), alias: "AlphaPaletteColorLookupTableData", vr: Exact(VR::OW) }, // Alpha Palette Color Lookup Table Data
    E { tag: Single(LARGE_RED_PALETTE_COLOR_LOOKUP_TABLE_DATA), alias: "LargeRedPaletteColorLookupTableData", vr: Exact(VR::OW) }, // Large Red Palette Color Lookup Table Data
    E { tag: Single(LARGE_GREEN_PALETTE_COLOR_LOOKUP_TABLE_DATA), alias: "LargeGreenPaletteColorLookupTableData", vr: Exact(VR::OW) }, // Large Green Palette Color Lookup Table Data
    E { tag: Single(LARGE_BLUE_PALETTE_COLOR_LOOKUP_TABLE_DATA), alias: "LargeBluePaletteColorLookupTableData", vr: Exact(VR::OW) }, // Large Blue Palette Color Lookup Table Data
    E { tag: Single(SEGMENTED_RED_PALETTE_COLOR_LOOKUP_TABLE_DATA), alias: "SegmentedRedPaletteColorLookupTableData", vr: Exact(VR::OW) }, // Segmented Red Palette Color Lookup Table Data
    E { tag: Single(SEGMENTED_GREEN_PALETTE_COLOR_LOOKUP_TABLE_DATA), alias: "SegmentedGreenPaletteColorLookupTableData", vr: Exact(VR::OW) }, // Segmented Green Palette Color Lookup Table Data
    E { tag: Single(SEGMENTED_BLUE_PALETTE_COLOR_LOOKUP_TABLE_DATA), alias: "SegmentedBluePaletteColorLookupTableData", vr: Exact(VR::OW) }, // Segmented Blue Palette Color Lookup Table Data
    E { tag: Single(SEGMENTED_ALPHA_PALETTE_COLOR_LOOKUP_TABLE_DATA), alias: "SegmentedAlphaPaletteColorLookupTableData", vr: Exact(VR::OW) }, // Segmented Alpha Palette Color Lookup Table Data
    E { tag: Single(MODALITY_LUT_SEQUENCE), alias: "ModalityLUTSequence", vr: Exact(VR::SQ) }, // Modality LUT Sequence
    E { tag: Single(LUT_DESCRIPTOR), alias: "LUTDescriptor", vr: VirtualVr::Xs }, // LUT Descriptor
    E { tag: Single(LUT_DATA), alias: "LUTData", vr: VirtualVr::Lt }, // LUT Data
    E { tag: Single(PIXEL_DATA_PROVIDER_URL), alias: "PixelDataProviderURL", vr: Exact(VR::UR) }, // Pixel Data Provider URL
    E { tag: Single(REQUEST_ATTRIBUTES_SEQUENCE), alias: "RequestAttributesSequence", vr: Exact(VR::SQ) }, // Request Attributes Sequence
    E { tag: Single(VALUE_TYPE), alias: "ValueType", vr: Exact(VR::CS) }, // Value Type
    E { tag: Single(CONCEPT_NAME_CODE_SEQUENCE), alias: "ConceptNameCodeSequence", vr: Exact(VR::SQ) }, // Concept Name Code Sequence
    E { tag: Single(TEXT_VALUE), alias: "TextValue", vr: Exact(VR::UT) }, // Text Value
    E { tag: Single(CONCEPT_CODE_SEQUENCE), alias: "ConceptCodeSequence", vr: Exact(VR::SQ) }, // Concept Code Sequence
    E { tag: Single(CONTENT_SEQUENCE), alias: "ContentSequence", vr: Exact(VR::SQ) }, // Content Sequence
    E { tag: Single(ENCAPSULATED_DOCUMENT), alias: "EncapsulatedDocument", vr: Exact(VR::OB) }, // Encapsulated Document
    E { tag: Single(MIME_TYPE_OF_ENCAPSULATED_DOCUMENT), alias: "MIMETypeOfEncapsulatedDocument", vr: Exact(VR::LO) }, // MIME Type of Encapsulated Document
    E { tag: Single(RADIOPHARMACEUTICAL_INFORMATION_SEQUENCE), alias: "RadiopharmaceuticalInformationSequence", vr: Exact(VR::SQ) }, // Radiopharmaceutical Information Sequence
    E { tag: Group100(Tag(0x5000, 0x200C)), alias: "AudioSampleData", vr: VirtualVr::Ox }, // Audio Sample Data
    E { tag: Group100(Tag(0x5000, 0x3000)), alias: "CurveData", vr: VirtualVr::Ox }, // Curve Data
    E { tag: Single(WAVEFORM_SEQUENCE), alias: "WaveformSequence", vr: Exact(VR::SQ) }, // Waveform Sequence
    E { tag: Single(WAVEFORM_BITS_ALLOCATED), alias: "WaveformBitsAllocated", vr: Exact(VR::US) }, // Waveform Bits Allocated
    E { tag: Single(WAVEFORM_SAMPLE_INTERPRETATION), alias: "WaveformSampleInterpretation", vr: Exact(VR::CS) }, // Waveform Sample Interpretation
    E { tag: Single(WAVEFORM_DATA), alias: "WaveformData", vr: VirtualVr::Ox }, // Waveform Data
    E { tag: Single(SPECTROSCOPY_DATA), alias: "SpectroscopyData", vr: Exact(VR::OF) }, // Spectroscopy Data
    E { tag: Group100(Tag(0x6000, 0x0010)), alias: "OverlayRows", vr: Exact(VR::US) }, // Overlay Rows
    E { tag: Group100(Tag(0x6000, 0x0011)), alias: "OverlayColumns", vr: Exact(VR::US) }, // Overlay Columns
    E { tag: Group100(Tag(0x6000, 0x0040)), alias: "OverlayType", vr: Exact(VR::CS) }, // Overlay Type
    E { tag: Group100(Tag(0x6000, 0x0050)), alias: "OverlayOrigin", vr: Exact(VR::SS) }, // Overlay Origin
    E { tag: Group100(Tag(0x6000, 0x0100)), alias: "OverlayBitsAllocated", vr: Exact(VR::US) }, // Overlay Bits Allocated
    E { tag: Group100(Tag(0x6000, 0x3000)), alias: "OverlayData", vr: VirtualVr::Ox }, // Overlay Data
    E { tag: Single(EXTENDED_OFFSET_TABLE), alias: "ExtendedOffsetTable", vr: Exact(VR::OV) }, // Extended Offset Table
    E { tag: Single(EXTENDED_OFFSET_TABLE_LENGTHS), alias: "ExtendedOffsetTableLengths", vr: Exact(VR::OV) }, // Extended Offset Table Lengths
    E { tag: Single(FLOAT_PIXEL_DATA), alias: "FloatPixelData", vr: Exact(VR::OF) }, // Float Pixel Data
    E { tag: Single(DOUBLE_FLOAT_PIXEL_DATA), alias: "DoubleFloatPixelData", vr: Exact(VR::OD) }, // Double Float Pixel Data
    E { tag: Single(PIXEL_DATA), alias: "PixelData", vr: VirtualVr::Px }, // Pixel Data
    E { tag: Single(DIGITAL_SIGNATURES_SEQUENCE), alias: "DigitalSignaturesSequence", vr: Exact(VR::SQ) }, // Digital Signatures Sequence
    E { tag: Single(DATA_SET_TRAILING_PADDING), alias: "DataSetTrailingPadding", vr: Exact(VR::OB) }, // Data Set Trailing Padding
];
