use metabag::{
    Block, Reader, Writer,
    bag::MetadataBag,
    codes::{self, CodeTableId, ImageType, ObjectCycle},
    config::Conventions,
    error::MetaError,
    tags::{self, exif, iptc, tiff},
    value::TypedValue,
};

fn logger() {
    _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::max())
        .format_file(true)
        .format_line_number(true)
        .try_init();
}

fn pair() -> (Reader, Writer) {
    logger();
    let bag = MetadataBag::new().into_shared();
    (Reader::new(bag.clone()), Writer::new(bag))
}

/// Every registered tag can be reached by its `(block, key)` pair.
#[test]
fn registry_covers_every_tag() {
    logger();

    let mut count = 0;
    for tag in tags::all() {
        let def = tag.def();
        assert_eq!(tags::lookup(def.block, def.key), Some(tag), "{def}");
        count += 1;
    }

    assert!(count > 150, "only {count} tags registered");
}

#[test]
fn command_layer_by_block_and_key() {
    let (reader, writer) = pair();

    writer.set_meta(Block::Iptc, "Keywords", "sea;sky;;").unwrap();
    writer.set_meta(Block::Tiff, "Make", "Acme").unwrap();
    writer.set_meta(Block::Exif, "ExifVersion", "0230").unwrap();
    writer.set_meta(Block::Gps, "GPSVersionID", "2.3").unwrap();

    assert_eq!(
        reader.get_meta_list(Block::Iptc, "Keywords"),
        Some(vec!["sea".into(), "sky".into()])
    );
    assert_eq!(reader.get_meta(Block::Tiff, "Make").as_deref(), Some("Acme"));
    assert_eq!(reader.get(&exif::EXIF_VERSION), Some([0, 2, 3, 0]));
    assert_eq!(
        reader.get_meta(Block::Gps, "GPSVersionID").as_deref(),
        Some("2.3.0.0"),
        "versions are stored in the tag's own convention"
    );

    assert!(matches!(
        writer.set_meta(Block::Tiff, "Keywords", "x"),
        Err(MetaError::UnknownTag { .. })
    ));
    assert!(matches!(
        writer.set_meta_pseudo(Block::Tiff, "Make", "Fired", "True", None),
        Err(MetaError::UnknownPseudoTag { .. })
    ));

    writer.remove_meta(Block::Tiff, "Make").unwrap();
    assert!(!reader.has_tiff());
}

#[test]
fn flash_pseudo_tags_edit_one_field() {
    let (reader, writer) = pair();

    writer.set_meta(Block::Exif, "Flash", "1").unwrap();
    writer
        .set_meta_pseudo(Block::Exif, "Flash", "Mode", "3", None)
        .unwrap();

    let flash = reader.get(&exif::FLASH).expect("flash was stored");
    assert!(flash.fired, "kept from what was stored");
    assert_eq!(flash.mode, 3);
    assert_eq!(
        reader.get_meta_pseudo(Block::Exif, "Flash", "Mode").as_deref(),
        Some("3")
    );
}

#[test]
fn coordinate_pseudo_tags() {
    let (reader, writer) = pair();

    writer
        .set_meta(Block::Gps, "GPSLatitude", "48,51,24.12N")
        .unwrap();

    assert_eq!(
        reader.get_meta_pseudo(Block::Gps, "GPSLatitude", "Sec").as_deref(),
        Some("24.12")
    );

    writer
        .set_meta_pseudo(Block::Gps, "GPSLatitude", "Dir", "S", None)
        .unwrap();
    assert_eq!(
        reader.exif_coordinate(&tags::gps::LATITUDE),
        Some(("48;51;24.12".into(), 'S'))
    );
}

#[test]
fn lenient_integers_fall_back_to_their_default() {
    let (reader, writer) = pair();

    writer.set_meta(Block::Exif, "ColorSpace", "-4").unwrap();
    assert_eq!(reader.get(&exif::COLOR_SPACE), Some(1));
}

#[test]
fn bag_enumeration_for_serializers() {
    let (reader, writer) = pair();

    writer.set(&iptc::CITY, "Oslo").unwrap();
    writer.set(&tiff::ORIENTATION, 6).unwrap();
    writer.add_gps();

    let snapshot = reader.snapshot();
    let blocks: Vec<Block> = snapshot.blocks().map(|(block, _)| block).collect();
    assert_eq!(blocks, vec![Block::Iptc, Block::Tiff, Block::Gps]);

    assert_eq!(
        snapshot.get(Block::Iptc, "City"),
        Some(&TypedValue::String("Oslo".into()))
    );
    assert_eq!(
        snapshot.block(Block::Gps).map(|attrs| attrs.len()),
        Some(0),
        "explicitly added blocks stay until something empties them"
    );

    // the snapshot is a copy
    writer.remove(&iptc::CITY);
    assert!(snapshot.has_block(Block::Iptc));
    assert!(!reader.has_iptc());
}

#[test]
fn code_tables() {
    logger();
    codes::init();
    codes::init();

    assert_eq!(CodeTableId::ObjectCycle.number("b"), Some(ObjectCycle::Both as i64));
    assert_eq!(CodeTableId::GpsStatus.code(1).as_deref(), Some("A"));

    let image_type = ImageType::from_code("3F").expect("valid image type");
    assert_eq!(image_type.components, 3);
    assert_eq!(ImageType::from_number(image_type.number()), Some(image_type));
    assert!(!CodeTableId::ImageType.accepts("5F"));

    let (reader, writer) = pair();
    writer.set(&iptc::IMAGE_TYPE, "3F").unwrap();
    assert!(writer.set(&iptc::IMAGE_TYPE, "3Q").is_err());
    assert_eq!(reader.get(&iptc::IMAGE_TYPE).as_deref(), Some("3F"));
}

#[test]
fn readers_share_a_bag_across_threads() {
    let (reader, writer) = pair();
    writer.set(&iptc::URGENCY, 2).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let reader = reader.clone();
            std::thread::spawn(move || reader.get(&iptc::URGENCY))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("reader thread panicked"), Some(2));
    }
}

#[test]
fn blob_text_obeys_the_conventions() {
    logger();
    let bag = MetadataBag::new().into_shared();
    let writer = Writer::new(bag.clone());

    writer.set_meta(Block::Exif, "OECF", "1;2;3").unwrap();

    let lenient = Reader::new(bag.clone());
    assert_eq!(lenient.get(&exif::OECF), Some(vec![1, 2, 3]));

    let strict = Reader::with_conventions(
        bag,
        Conventions::default().with_blob_list_fallback(false),
    );
    assert_eq!(strict.get(&exif::OECF), None, "not Base64");
}
