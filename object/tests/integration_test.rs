use dicomio_core::{Fragment, Value, VR};
use dicomio_dictionary_std::{tags, uids};
use dicomio_object::{
    from_reader, open_file, DefaultDicomObject, FileMetaTableBuilder, InMemDataSet,
    InMemElement, IncludeBulkData, OpenFileOptions, ReadError,
};
use std::io::Cursor;

fn item(class_uid: &str, instance_uid: &str) -> InMemDataSet {
    InMemDataSet::from_element_iter(vec![
        InMemElement::text(tags::REFERENCED_SOP_CLASS_UID, VR::UI, class_uid),
        InMemElement::text(tags::REFERENCED_SOP_INSTANCE_UID, VR::UI, instance_uid),
    ])
}

fn code(value: &str, meaning: &str) -> InMemDataSet {
    InMemDataSet::from_element_iter(vec![
        InMemElement::text(tags::CODE_VALUE, VR::SH, value),
        InMemElement::text(tags::CODING_SCHEME_DESIGNATOR, VR::SH, "SCT "),
        InMemElement::text(tags::CODE_MEANING, VR::LO, meaning),
    ])
}

/// A data set with even-length values only,
/// so that it reads back exactly as written.
fn sample_dataset(with_fragments: bool) -> InMemDataSet {
    let mut obj = InMemDataSet::from_element_iter(vec![
        InMemElement::text(
            tags::SOP_CLASS_UID,
            VR::UI,
            &format!("{}\0", uids::CT_IMAGE_STORAGE),
        ),
        InMemElement::text(tags::SOP_INSTANCE_UID, VR::UI, "2.25.77\0"),
        InMemElement::text(tags::STUDY_DESCRIPTION, VR::LO, "HEAD"),
        InMemElement::text(tags::PATIENT_NAME, VR::PN, "Doe^John"),
        InMemElement::new(tags::PATIENT_ID, VR::LO, Value::Empty),
        InMemElement::sequence(
            tags::REFERENCED_IMAGE_SEQUENCE,
            vec![
                item("1.2.3.4\0", "5.6\0"),
                InMemDataSet::new_empty(),
                {
                    let mut nested = item("1.2.3\0", "4.5.6.7\0");
                    nested.put(InMemElement::sequence(
                        tags::CONCEPT_CODE_SEQUENCE,
                        vec![code("69536005", "Head"), code("12738006", "Brain ")],
                    ));
                    nested
                },
                item("1.2\0", "9.8.7.6\0"),
            ],
        ),
        InMemElement::new(tags::ROWS, VR::US, vec![0x00, 0x02]),
        InMemElement::new(tags::COLUMNS, VR::US, vec![0x80, 0x00]),
    ]);
    if with_fragments {
        obj.put(InMemElement::new(
            tags::PIXEL_DATA,
            VR::OB,
            Value::Fragments(vec![
                Fragment::Bytes(vec![]),
                Fragment::Bytes(vec![0xFF, 0xD8, 0x00, 0x01]),
                Fragment::Bytes(vec![0x02, 0x03, 0xFF, 0xD9]),
            ]),
        ));
    }
    obj
}

fn sample_file(uid: &str, with_fragments: bool) -> DefaultDicomObject {
    sample_dataset(with_fragments)
        .with_meta(FileMetaTableBuilder::new().transfer_syntax(uid))
        .unwrap()
}

fn round_trip(uid: &str, with_fragments: bool) {
    let obj = sample_file(uid, with_fragments);
    let bytes = obj.write_all(Vec::new()).unwrap();
    let read = from_reader(Cursor::new(bytes)).unwrap();
    assert_eq!(read.meta(), obj.meta());
    assert_eq!(read.meta().transfer_syntax(), uid);
    assert_eq!(*read, *obj, "data set differs after round trip in {}", uid);
}

#[test]
fn round_trip_implicit_vr_little_endian() {
    round_trip(uids::IMPLICIT_VR_LITTLE_ENDIAN, false);
}

#[test]
fn round_trip_explicit_vr_little_endian() {
    round_trip(uids::EXPLICIT_VR_LITTLE_ENDIAN, true);
}

#[test]
fn round_trip_explicit_vr_big_endian() {
    round_trip(uids::EXPLICIT_VR_BIG_ENDIAN, true);
}

#[test]
fn round_trip_deflated() {
    round_trip(uids::DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN, true);
}

#[test]
fn big_endian_values_are_swapped_on_disk() {
    let obj = sample_file(uids::EXPLICIT_VR_BIG_ENDIAN, false);
    let bytes = obj.write_all(Vec::new()).unwrap();
    // (0028,0010) US 2, 512
    let rows = [0x00, 0x28, 0x00, 0x10, b'U', b'S', 0x00, 0x02, 0x02, 0x00];
    assert!(bytes.windows(rows.len()).any(|w| w == rows));
}

#[test]
fn nested_sequences_survive() {
    for uid in [
        uids::IMPLICIT_VR_LITTLE_ENDIAN,
        uids::EXPLICIT_VR_BIG_ENDIAN,
    ] {
        let bytes = sample_file(uid, false).write_all(Vec::new()).unwrap();
        let read = from_reader(Cursor::new(bytes)).unwrap();
        let items = read
            .element(tags::REFERENCED_IMAGE_SEQUENCE)
            .unwrap()
            .items()
            .unwrap();
        assert_eq!(items.len(), 4);
        let codes = items[2]
            .element(tags::CONCEPT_CODE_SEQUENCE)
            .unwrap()
            .items()
            .unwrap();
        assert_eq!(codes.len(), 2);
        assert_eq!(
            codes[1].element(tags::CODE_MEANING).unwrap().to_str(),
            Some("Brain")
        );
    }
}

#[test]
fn long_values_survive_big_endian() {
    // too long for a US header, so written as UN
    let words: Vec<u8> = (0..35_000u32)
        .flat_map(|i| (i as u16).to_le_bytes())
        .collect();
    let mut obj = sample_file(uids::EXPLICIT_VR_BIG_ENDIAN, false);
    obj.put(InMemElement::new(tags::ROWS, VR::US, words.clone()));
    let bytes = obj.write_all(Vec::new()).unwrap();

    let read = from_reader(Cursor::new(bytes)).unwrap();
    let rows = read.element(tags::ROWS).unwrap();
    assert_eq!(rows.vr(), VR::US);
    assert_eq!(rows.value().primitive(), Some(&words[..]));
}

#[test]
fn bare_data_set_has_no_file_meta() {
    let bytes = sample_dataset(false)
        .write_dataset_with_ts(
            Vec::new(),
            uids::EXPLICIT_VR_LITTLE_ENDIAN,
            Default::default(),
        )
        .unwrap();
    assert!(matches!(
        from_reader(Cursor::new(bytes.clone())),
        Err(ReadError::MissingFileMeta { .. })
    ));
    // while the data set alone can still be read
    let obj = InMemDataSet::read_with_options(Cursor::new(bytes), &OpenFileOptions::new()).unwrap();
    assert_eq!(obj, sample_dataset(false));
}

#[test]
fn read_until_pixel_data() {
    let obj = sample_file(uids::EXPLICIT_VR_LITTLE_ENDIAN, true);
    let bytes = obj.write_all(Vec::new()).unwrap();
    let read = OpenFileOptions::new()
        .read_until(tags::PIXEL_DATA)
        .from_reader(Cursor::new(bytes))
        .unwrap();
    assert!(read.element(tags::ROWS).is_ok());
    assert!(matches!(
        read.element(tags::PIXEL_DATA),
        Err(dicomio_object::AccessError::NoSuchDataElementTag { .. })
    ));
}

fn native_pixel_file(len: usize) -> (DefaultDicomObject, Vec<u8>) {
    let pixels: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
    let mut obj = sample_file(uids::EXPLICIT_VR_LITTLE_ENDIAN, false);
    obj.put(InMemElement::new(tags::PIXEL_DATA, VR::OB, pixels.clone()));
    (obj, pixels)
}

#[test]
fn small_allocate_limit_reads_whole_values() {
    let (obj, pixels) = native_pixel_file(1000);
    let bytes = obj.write_all(Vec::new()).unwrap();
    let read = OpenFileOptions::new()
        .allocate_limit(16)
        .from_reader(Cursor::new(bytes))
        .unwrap();
    assert_eq!(
        read.element(tags::PIXEL_DATA).unwrap().value().primitive(),
        Some(&pixels[..])
    );
}

#[test]
fn bulk_data_left_out() {
    let (obj, _) = native_pixel_file(64);
    let bytes = obj.write_all(Vec::new()).unwrap();
    let read = OpenFileOptions::new()
        .include_bulk_data(IncludeBulkData::No)
        .from_reader(Cursor::new(bytes))
        .unwrap();
    assert!(read.element_opt(tags::PIXEL_DATA).is_none());
    assert!(read.element_opt(tags::COLUMNS).is_some());
}

#[test]
fn bulk_data_referenced_in_source_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("image.dcm");
    let (obj, pixels) = native_pixel_file(64);
    obj.write_to_file(&path).unwrap();

    let read = OpenFileOptions::new()
        .include_bulk_data(IncludeBulkData::Uri)
        .open_file(&path)
        .unwrap();
    assert!(read.bulk_data_files().is_none());
    let bulk = read
        .element(tags::PIXEL_DATA)
        .unwrap()
        .value()
        .bulk_data()
        .unwrap();
    assert_eq!(bulk.length, 64);
    assert_eq!(bulk.read_bytes().unwrap(), pixels);

    // reading everything gives the same bytes
    let full = open_file(&path).unwrap();
    assert_eq!(
        full.element(tags::PIXEL_DATA).unwrap().value().primitive(),
        Some(&pixels[..])
    );
}

#[test]
fn bulk_data_spilled_from_stream() {
    let dir = tempfile::tempdir().unwrap();
    let (obj, pixels) = native_pixel_file(300);
    let bytes = obj.write_all(Vec::new()).unwrap();

    let mut read = OpenFileOptions::new()
        .include_bulk_data(IncludeBulkData::Uri)
        .bulk_data_directory(dir.path())
        .from_reader(Cursor::new(bytes))
        .unwrap();
    let bulk = read
        .element(tags::PIXEL_DATA)
        .unwrap()
        .value()
        .bulk_data()
        .unwrap()
        .clone();
    assert_eq!(read.bulk_data_files().map(|f| f.len()), Some(1));
    assert_eq!(bulk.read_bytes().unwrap(), pixels);

    // written back with the bulk data streamed from the spilled file
    let rewritten = read.write_all(Vec::new()).unwrap();
    let again = from_reader(Cursor::new(rewritten)).unwrap();
    assert_eq!(
        again.element(tags::PIXEL_DATA).unwrap().value().primitive(),
        Some(&pixels[..])
    );

    // the files go away with their owner
    let files = read.take_bulk_data_files().unwrap();
    let paths: Vec<_> = files.paths().map(|p| p.to_path_buf()).collect();
    drop(files);
    assert!(paths.iter().all(|p| !p.exists()));
}

mod props {
    use super::*;
    use proptest::prelude::*;

    const SYNTAXES: [&str; 4] = [
        uids::IMPLICIT_VR_LITTLE_ENDIAN,
        uids::EXPLICIT_VR_LITTLE_ENDIAN,
        uids::EXPLICIT_VR_BIG_ENDIAN,
        uids::DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN,
    ];

    proptest! {
        #[test]
        fn values_survive_any_native_syntax(
            ts in 0..SYNTAXES.len(),
            name in "[A-Z]{1,8}\\^[A-Z]{1,8}",
            rows in any::<u16>(),
            columns in any::<u16>(),
        ) {
            let mut name = name;
            if name.len() % 2 == 1 {
                name.push(' ');
            }
            let mut obj = sample_file(SYNTAXES[ts], false);
            obj.put(InMemElement::text(tags::PATIENT_NAME, VR::PN, &name));
            obj.put(InMemElement::new(tags::ROWS, VR::US, rows.to_le_bytes().to_vec()));
            obj.put(InMemElement::new(tags::COLUMNS, VR::US, columns.to_le_bytes().to_vec()));

            let bytes = obj.write_all(Vec::new()).unwrap();
            let read = from_reader(Cursor::new(bytes)).unwrap();
            prop_assert_eq!(&*read, &*obj);
            prop_assert_eq!(
                read.element(tags::ROWS).unwrap().value().primitive(),
                Some(&rows.to_le_bytes()[..])
            );
        }
    }
}
