//! Text-level access for callers that only have a `(block, key)` pair.
//!
//! The registry hands back an [`AnyTag`], and the variant picks the typed
//! accessor. Everything crosses this boundary as text in the tag's stored
//! layout: lists are `;`-joined, datetimes are XML, coordinates are
//! `D,M,S<dir>`.

use metabag_types::tags::{AnyTag, Axis, PseudoTag};

use super::access::TypedAccess;
use crate::{
    accessor::{self, LIST_SEPARATOR},
    bag::MetadataBag,
    codec::{Flash, SubjectArea, version},
    config::Conventions,
    error::{InvalidReason, MetaError, MetaResult},
    gps::{Coordinate, Direction},
};

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(T::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

/// Reads a tag as one piece of text.
pub(super) fn read_text(tag: AnyTag, bag: &MetadataBag, c: &Conventions) -> Option<String> {
    match tag {
        AnyTag::Text(t) => t.read(bag, c),
        AnyTag::FixedText(t) => t.read(bag, c),
        AnyTag::Coded(t) => t.read(bag, c),
        AnyTag::Long(t) => t.read(bag, c).map(|v| v.to_string()),
        AnyTag::Real(t) => t.read(bag, c).map(|v| v.to_string()),
        AnyTag::TextList(t) => t.read(bag, c).map(|v| v.join(";")),
        AnyTag::LongList(t) => t.read(bag, c).map(|v| join(&v)),
        AnyTag::RealList(t) => t.read(bag, c).map(|v| join(&v)),
        AnyTag::DateTime(t) => t.read(bag, c),
        AnyTag::Blob(t) => t
            .read(bag, c)
            .map(|bytes| accessor::encode_blob(&bytes, t.force_base64)),
        AnyTag::Flash(t) => t.read(bag, c).map(|f| f.encode().to_string()),
        AnyTag::SubjectArea(t) => t.read(bag, c).map(|a| join(&a.values())),
        AnyTag::Version(t) => t.read(bag, c).map(|v| version::encode(v, t.style)),
        AnyTag::Coordinate(t) => t.read(bag, c).map(|coord| coord.to_xmp()),
    }
}

/// Reads a tag as a list of text elements.
///
/// Scalar tags give a one-element list.
pub(super) fn read_list(tag: AnyTag, bag: &MetadataBag, c: &Conventions) -> Option<Vec<String>> {
    match tag {
        AnyTag::TextList(t) => t.read(bag, c),
        AnyTag::LongList(t) => t.read(bag, c).map(|v| v.iter().map(i64::to_string).collect()),
        AnyTag::RealList(t) => t.read(bag, c).map(|v| v.iter().map(f64::to_string).collect()),
        AnyTag::SubjectArea(t) => t
            .read(bag, c)
            .map(|a| a.values().iter().map(u16::to_string).collect()),
        AnyTag::DateTime(t) => accessor::get_array_date_time(bag, t.def.block, t.def.key),
        _ => read_text(tag, bag, c).map(|text| vec![text]),
    }
}

/// Parses text for a tag, validates it, and stores it.
///
/// Empty text removes the tag.
pub(super) fn write_text(
    tag: AnyTag,
    bag: &mut MetadataBag,
    text: &str,
    c: &Conventions,
) -> MetaResult<()> {
    let def = tag.def();
    let invalid = |reason: InvalidReason| {
        log::error!("Refusing to write `{def}`: {reason}");
        MetaError::InvalidValue { tag: def, reason }
    };

    if text.is_empty() {
        log::trace!("Empty write to `{def}`. Removing it.");
        bag.remove(def.block, def.key);
        return Ok(());
    }

    let int = |s: &str| {
        s.trim()
            .parse::<i64>()
            .map_err(|_| invalid(InvalidReason::NotANumber(s.into())))
    };
    let real = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|_| invalid(InvalidReason::NotANumber(s.into())))
    };
    let elements = || text.split(LIST_SEPARATOR).filter(|e| !e.trim().is_empty());

    match tag {
        AnyTag::Text(t) => t.write(bag, text.into(), c),
        AnyTag::FixedText(t) => t.write(bag, text.into(), c),
        AnyTag::Coded(t) => t.write(bag, text.into(), c),
        AnyTag::Long(t) => t.write(bag, int(text)?, c),
        AnyTag::Real(t) => t.write(bag, real(text)?, c),
        AnyTag::TextList(t) => t.write(bag, elements().map(String::from).collect(), c),
        AnyTag::LongList(t) => {
            let values = elements().map(int).collect::<MetaResult<Vec<_>>>()?;
            t.write(bag, values, c)
        }
        AnyTag::RealList(t) => {
            let values = elements().map(real).collect::<MetaResult<Vec<_>>>()?;
            t.write(bag, values, c)
        }
        AnyTag::DateTime(t) => t.write(bag, text.into(), c),
        AnyTag::Blob(t) => {
            let bytes = accessor::decode_blob(text, c.base64_mode, c.blob_list_fallback)
                .ok_or_else(|| invalid(InvalidReason::BadBlob))?;
            t.write(bag, bytes, c)
        }
        AnyTag::Flash(t) => {
            let raw = int(text)?;
            let raw = u16::try_from(raw).map_err(|_| {
                invalid(InvalidReason::OutOfRange {
                    value: raw,
                    min: 0,
                    max: i64::from(u16::MAX),
                })
            })?;
            t.write(bag, Flash::decode(raw), c)
        }
        AnyTag::SubjectArea(t) => {
            let values = elements()
                .map(|e| {
                    let v = int(e)?;
                    u16::try_from(v).map_err(|_| invalid(InvalidReason::TooWide { value: v }))
                })
                .collect::<MetaResult<Vec<u16>>>()?;

            let area = SubjectArea::from_values(&values)
                .ok_or_else(|| invalid(InvalidReason::BadCount { got: values.len() }))?;
            t.write(bag, area, c)
        }
        AnyTag::Version(t) => t.write(bag, version::decode(text), c),
        AnyTag::Coordinate(t) => {
            let coord = Coordinate::parse(text, t.axis)
                .ok_or_else(|| invalid(InvalidReason::BadCoordinate(text.into())))?;
            t.write(bag, coord, c)
        }
    }
}

/// Finds the pseudo-tag named `name`, if `tag` has it.
fn resolve_pseudo(tag: AnyTag, name: &str) -> MetaResult<PseudoTag> {
    PseudoTag::try_from(name)
        .ok()
        .filter(|p| tag.pseudo_tags().contains(p))
        .ok_or_else(|| {
            log::debug!("`{}` has no pseudo-tag `{name}`.", tag.def());
            MetaError::UnknownPseudoTag {
                tag: tag.def(),
                pseudo: name.into(),
            }
        })
}

/// Reads one sub-field of a composite tag.
pub(super) fn read_pseudo(
    tag: AnyTag,
    name: &str,
    bag: &MetadataBag,
    c: &Conventions,
) -> Option<String> {
    let pseudo = resolve_pseudo(tag, name).ok()?;

    match tag {
        AnyTag::Flash(t) => t.read(bag, c)?.project(pseudo),
        AnyTag::Coordinate(t) => t.read(bag, c)?.project(pseudo),
        _ => None,
    }
}

/// Replaces one sub-field of a composite tag.
///
/// The other sub-fields come from `fallback` (the composite's text form) if
/// given, else from what's stored, else from a zero value. Empty text
/// removes the whole composite.
pub(super) fn write_pseudo(
    tag: AnyTag,
    name: &str,
    bag: &mut MetadataBag,
    text: &str,
    fallback: Option<&str>,
    c: &Conventions,
) -> MetaResult<()> {
    let pseudo = resolve_pseudo(tag, name)?;
    let def = tag.def();

    if text.is_empty() {
        log::trace!("Empty write to `{def}` ({pseudo}). Removing it.");
        bag.remove(def.block, def.key);
        return Ok(());
    }

    let refuse = |reason: InvalidReason| {
        log::error!("Refusing to write `{def}` ({pseudo}): {reason}");
        MetaError::InvalidValue { tag: def, reason }
    };

    match tag {
        AnyTag::Flash(t) => {
            let base = fallback
                .and_then(|f| f.trim().parse::<u16>().ok())
                .map(Flash::decode)
                .or_else(|| t.read(bag, c))
                .unwrap_or_else(|| Flash::decode(0));

            let updated = base
                .with(pseudo, text)
                .ok_or_else(|| refuse(InvalidReason::NotANumber(text.into())))?;
            t.write(bag, updated, c)
        }
        AnyTag::Coordinate(t) => {
            let base = fallback
                .and_then(|f| Coordinate::parse(f, t.axis))
                .or_else(|| t.read(bag, c))
                .unwrap_or_else(|| {
                    let direction = match t.axis {
                        Axis::Latitude => Direction::North,
                        Axis::Longitude => Direction::East,
                    };
                    Coordinate::new(0.0, 0.0, 0.0, direction)
                });

            let updated = base
                .with(pseudo, text)
                .ok_or_else(|| refuse(InvalidReason::BadCoordinate(text.into())))?;
            t.write(bag, updated, c)
        }
        _ => Err(MetaError::UnknownPseudoTag {
            tag: def,
            pseudo: name.into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use metabag_types::tags::{AnyTag, exif, gps, iptc, tiff};

    use super::*;
    use crate::{util::logger, value::TypedValue};

    fn fresh() -> (MetadataBag, Conventions) {
        logger();
        (MetadataBag::new(), Conventions::default())
    }

    #[test]
    fn text_round_trips_per_kind() {
        let (mut bag, c) = fresh();

        for (tag, text) in [
            (AnyTag::Text(&iptc::CITY), "Paris"),
            (AnyTag::Long(&tiff::ORIENTATION), "6"),
            (AnyTag::Real(&gps::ALTITUDE), "12.5"),
            (AnyTag::TextList(&iptc::KEYWORDS), "sea;sky"),
            (AnyTag::LongList(&tiff::BITS_PER_SAMPLE), "8;8;8"),
            (AnyTag::DateTime(&tiff::DATE_TIME), "2024-01-02T03:04:05Z"),
            (AnyTag::Flash(&exif::FLASH), "31"),
            (AnyTag::SubjectArea(&exif::SUBJECT_AREA), "1;2;3"),
            (AnyTag::Version(&exif::EXIF_VERSION), "0230"),
            (AnyTag::Coordinate(&gps::LATITUDE), "10,54,0N"),
            (AnyTag::Blob(&exif::OECF), "1;2;3"),
        ] {
            write_text(tag, &mut bag, text, &c).expect("valid text");
            assert_eq!(
                read_text(tag, &bag, &c).as_deref(),
                Some(text),
                "for {}",
                tag.def()
            );
        }
    }

    #[test]
    fn lists() {
        let (mut bag, c) = fresh();
        let keywords = AnyTag::TextList(&iptc::KEYWORDS);

        write_text(keywords, &mut bag, ";a;;b;", &c).unwrap();
        assert_eq!(
            read_list(keywords, &bag, &c),
            Some(vec!["a".into(), "b".into()])
        );

        let city = AnyTag::Text(&iptc::CITY);
        write_text(city, &mut bag, "Oslo", &c).unwrap();
        assert_eq!(read_list(city, &bag, &c), Some(vec!["Oslo".into()]));
    }

    #[test]
    fn bad_text_is_refused() {
        let (mut bag, c) = fresh();

        for (tag, text) in [
            (AnyTag::Long(&tiff::ORIENTATION), "six"),
            (AnyTag::Long(&tiff::ORIENTATION), "9"),
            (AnyTag::SubjectArea(&exif::SUBJECT_AREA), "1;2;3;4;5"),
            (AnyTag::SubjectArea(&exif::SUBJECT_AREA), "1;70000"),
            (AnyTag::Flash(&exif::FLASH), "65536"),
            (AnyTag::Coordinate(&gps::LATITUDE), "10,54,0E"),
            (AnyTag::Blob(&exif::OECF), "not a blob!"),
            (AnyTag::DateTime(&tiff::DATE_TIME), "noon"),
            (AnyTag::Coded(&gps::STATUS), "X"),
        ] {
            assert!(
                matches!(
                    write_text(tag, &mut bag, text, &c),
                    Err(MetaError::InvalidValue { .. })
                ),
                "`{text}` for {}",
                tag.def()
            );
        }

        assert!(bag.is_empty(), "nothing was stored");
    }

    #[test]
    fn flash_pseudo_tags() {
        let (mut bag, c) = fresh();
        let flash = AnyTag::Flash(&exif::FLASH);

        write_pseudo(flash, "Fired", &mut bag, "True", None, &c).unwrap();
        assert_eq!(read_pseudo(flash, "Fired", &bag, &c).as_deref(), Some("True"));
        assert_eq!(
            read_pseudo(flash, "FunctionPresent", &bag, &c).as_deref(),
            Some("True")
        );

        // the fallback wins over what's stored
        write_pseudo(flash, "Mode", &mut bag, "3", Some("6"), &c).unwrap();
        assert_eq!(bag.get(exif::FLASH.def.block, "Flash"), Some(&TypedValue::Integer(0x1E)));

        assert!(matches!(
            write_pseudo(flash, "Deg", &mut bag, "1", None, &c),
            Err(MetaError::UnknownPseudoTag { .. })
        ));
        assert!(matches!(
            write_pseudo(flash, "Mode", &mut bag, "7", None, &c),
            Err(MetaError::InvalidValue { .. })
        ));
    }

    #[test]
    fn coordinate_pseudo_tags() {
        let (mut bag, c) = fresh();
        let lat = AnyTag::Coordinate(&gps::LATITUDE);

        write_text(lat, &mut bag, "10,54,0N", &c).unwrap();
        assert_eq!(read_pseudo(lat, "Deg", &bag, &c).as_deref(), Some("10"));
        assert_eq!(read_pseudo(lat, "Dir", &bag, &c).as_deref(), Some("N"));
        assert_eq!(read_pseudo(lat, "Fired", &bag, &c), None);

        write_pseudo(lat, "Dir", &mut bag, "S", None, &c).unwrap();
        assert_eq!(read_text(lat, &bag, &c).as_deref(), Some("10,54,0S"));

        // nothing stored for the longitude yet: starts from zero, east
        let lon = AnyTag::Coordinate(&gps::LONGITUDE);
        write_pseudo(lon, "Deg", &mut bag, "2", None, &c).unwrap();
        assert_eq!(read_text(lon, &bag, &c).as_deref(), Some("02,00,0E"));

        assert!(matches!(
            write_pseudo(AnyTag::Text(&iptc::CITY), "Deg", &mut bag, "1", None, &c),
            Err(MetaError::UnknownPseudoTag { .. })
        ));
    }

    #[test]
    fn empty_text_removes() {
        let (mut bag, c) = fresh();
        let flash = AnyTag::Flash(&exif::FLASH);

        write_text(flash, &mut bag, "1", &c).unwrap();
        write_text(flash, &mut bag, "", &c).unwrap();
        assert_eq!(read_text(flash, &bag, &c), None);
        assert_eq!(read_pseudo(flash, "Fired", &bag, &c), None);

        // removing something absent is fine too
        write_text(flash, &mut bag, "", &c).unwrap();
    }

    #[test]
    fn blank_blob_text_is_not_a_removal() {
        let (mut bag, c) = fresh();
        let oecf = AnyTag::Blob(&exif::OECF);

        write_text(oecf, &mut bag, "1;2;3", &c).unwrap();
        for blank in ["   ", "\n", " ; "] {
            assert_eq!(
                write_text(oecf, &mut bag, blank, &c),
                Err(MetaError::InvalidValue {
                    tag: exif::OECF.def,
                    reason: InvalidReason::BadBlob,
                }),
                "`{blank}`"
            );
        }

        assert_eq!(read_text(oecf, &bag, &c).as_deref(), Some("1;2;3"));
    }
}
