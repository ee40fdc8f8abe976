use metabag::{
    Block, Reader, Writer,
    b64::{self, Base64Mode},
    bag::MetadataBag,
    codec::{Flash, SubjectArea},
    datetime,
    error::{InvalidReason, MetaError},
    gps::{self, Coordinate, Direction},
    tags::{Axis, exif, gps as gps_tags, iptc},
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

/// Canonical Exif datetimes survive a trip through the XML form.
#[test]
fn exif_datetimes_round_trip() {
    logger();

    for year in [1970, 1999, 2000, 2024, 2099] {
        for (month, day) in [(1, 1), (2, 28), (2, 29), (6, 15), (12, 31)] {
            if month == 2 && day == 29 && year % 4 != 0 {
                continue;
            }

            for (h, m, s) in [(0, 0, 0), (3, 4, 5), (12, 30, 59), (23, 59, 59)] {
                let exif = format!("{year:04}:{month:02}:{day:02} {h:02}:{m:02}:{s:02}");
                let xml = datetime::exif_to_xml(&exif);
                assert_eq!(datetime::xml_to_exif(&xml), exif, "via `{xml}`");
            }
        }
    }
}

/// IPTC pairs are normalized to UTC.
#[test]
fn iptc_pairs_normalize_to_utc() {
    logger();

    assert_eq!(
        datetime::iptc_to_xml("20240102", "030405+0100"),
        "2024-01-02T02:04:05Z"
    );
}

#[test]
fn coordinates_format_and_round_trip() {
    let (reader, writer) = pair();

    let text = gps::format_coords(10.0, 54.0, 0.0, ',');
    assert_eq!(text, "10,54,0");

    // half a minute or more rounds the minute up
    assert_eq!(gps::scan_coords("10,54,40", ','), (10.0, 55.0, 0.0));
    assert_eq!(gps::format_coords(10.0, 54.0, 40.0, ','), "10,55,0");

    writer
        .set_meta(Block::Gps, "GPSLatitude", &format!("{text}N"))
        .expect("valid latitude");

    let c = reader.get(&gps_tags::LATITUDE).expect("latitude was stored");
    assert_eq!((c.degree, c.minute, c.second), (10.0, 54.0, 0.0));
    assert!(c.direction.is_positive(), "north is positive");
    assert_eq!(c, Coordinate::new(10.0, 54.0, 0.0, Direction::North));
    assert_eq!(
        Coordinate::parse("10,54,0N", Axis::Latitude),
        Some(c),
        "the stored text parses back"
    );
}

#[test]
fn flash_round_trips_and_packs() {
    let (reader, writer) = pair();

    let flash = Flash {
        fired: true,
        return_light: 3,
        mode: 3,
        function_present: true,
        red_eye_reduction: false,
    };
    writer.set(&exif::FLASH, flash).expect("valid flash");

    assert_eq!(reader.get(&exif::FLASH), Some(flash));
    assert_eq!(flash.encode(), 1 | (3 << 1) | (3 << 3));
    assert_eq!(
        reader.get_meta(Block::Exif, "Flash").as_deref(),
        Some("31"),
        "packed as 0x1F"
    );
}

#[test]
fn subject_area_shape_follows_length() {
    let (reader, writer) = pair();

    writer
        .set_meta(Block::Exif, "SubjectArea", "100;200;50")
        .expect("three values make a circle");
    assert_eq!(
        reader.get(&exif::SUBJECT_AREA),
        Some(SubjectArea::Circle {
            x: 100,
            y: 200,
            diameter: 50
        })
    );

    let refused = writer.set_meta(Block::Exif, "SubjectArea", "1;2;3;4;5");
    assert_eq!(
        refused,
        Err(MetaError::InvalidValue {
            tag: exif::SUBJECT_AREA.def,
            reason: InvalidReason::BadCount { got: 5 },
        })
    );
    assert_eq!(
        reader.get_meta_list(Block::Exif, "SubjectArea"),
        Some(vec!["100".into(), "200".into(), "50".into()]),
        "the circle is untouched"
    );
}

/// Deterministic, but not trivially patterned, bytes.
fn bytes(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    (0..len)
        .map(|_| {
            // xorshift32
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

#[test]
fn base64_round_trips_up_to_a_kilobyte() {
    logger();

    for len in 0..=1000 {
        let input = bytes(len, len as u32);
        let encoded = b64::encode(&input);

        assert!(
            encoded.lines().all(|line| line.len() <= b64::LINE_LEN),
            "lines wrap at {} (len {len})",
            b64::LINE_LEN
        );

        for mode in [Base64Mode::Tolerant, Base64Mode::Strict] {
            assert_eq!(
                b64::decode(&encoded, mode).as_deref(),
                Ok(input.as_slice()),
                "len {len}, {mode:?}"
            );
        }
    }
}

#[test]
fn urgency_is_strict() {
    let (reader, writer) = pair();

    assert!(writer.set(&iptc::URGENCY, 10).is_err());
    assert_eq!(reader.get(&iptc::URGENCY), None);
    assert!(!reader.has_iptc(), "a refused write doesn't create the block");

    assert!(writer.set(&iptc::URGENCY, 5).is_ok());
    assert_eq!(reader.get(&iptc::URGENCY), Some(5));
}

#[test]
fn empty_text_removes() {
    let (reader, writer) = pair();

    for (block, key, text) in [
        (Block::Iptc, "City", "Oslo"),
        (Block::Tiff, "Orientation", "6"),
        (Block::Exif, "Flash", "1"),
        (Block::Gps, "GPSLongitude", "2,21,0W"),
    ] {
        writer.set_meta(block, key, text).expect("valid text");
        assert!(reader.get_meta(block, key).is_some());

        writer.set_meta(block, key, "").expect("removal can't fail");
        assert_eq!(reader.get_meta(block, key), None, "`{key}` was removed");
        assert_eq!(reader.get_meta_pseudo(block, key, "Deg"), None);
        assert!(!reader.has_block(block), "the emptied block was pruned");
    }
}
