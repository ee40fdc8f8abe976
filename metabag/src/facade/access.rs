//! Per-kind typed access: each tag handle type knows its value type, how to
//! read it, and how to validate a write.

use metabag_types::tags::{
    BlobTag, CodedTag, CoordinateTag, DateTimeStyle, DateTimeTag, FixedTextTag, FlashTag, IntWidth,
    LongListTag, LongTag, RealListTag, RealTag, SubjectAreaTag, TagDef, TextListTag, TextTag,
    VersionTag,
};

use crate::{
    accessor::{self, ArrayInt, LIST_SEPARATOR},
    bag::MetadataBag,
    codec::{Flash, SubjectArea, version},
    config::Conventions,
    datetime,
    error::{InvalidReason, MetaError, MetaResult},
    gps::Coordinate,
    value::TypedValue,
};

/// Typed access to one tag.
///
/// Implemented by every tag handle in [`metabag_types::tags`], so callers get
/// values of the right type without naming a key:
///
/// ```
/// use metabag::{Reader, Writer, bag::MetadataBag, tags::iptc};
///
/// let bag = MetadataBag::new().into_shared();
/// let (reader, writer) = (Reader::new(bag.clone()), Writer::new(bag));
///
/// assert!(writer.set(&iptc::URGENCY, 10).is_err());
/// assert_eq!(reader.get(&iptc::URGENCY), None);
///
/// writer.set(&iptc::URGENCY, 5).unwrap();
/// assert_eq!(reader.get(&iptc::URGENCY), Some(5));
/// ```
pub trait TypedAccess {
    type Value;

    fn def(&self) -> TagDef;

    /// Reads the value, or `None` if it's absent or unreadable.
    fn read(&self, bag: &MetadataBag, conventions: &Conventions) -> Option<Self::Value>;

    /// Validates, then stores, the value.
    ///
    /// An `Err` leaves the bag untouched. "Empty" values (empty text, empty
    /// lists) remove the tag.
    fn write(
        &self,
        bag: &mut MetadataBag,
        value: Self::Value,
        conventions: &Conventions,
    ) -> MetaResult<()>;
}

fn invalid(def: TagDef, reason: InvalidReason) -> MetaError {
    log::error!("Refusing to write `{def}`: {reason}");
    MetaError::InvalidValue { tag: def, reason }
}

/// Removes the tag and reports success.
fn remove(bag: &mut MetadataBag, def: TagDef) -> MetaResult<()> {
    log::trace!("Removing `{def}`.");
    bag.remove(def.block, def.key);
    Ok(())
}

impl TypedAccess for TextTag {
    type Value = String;

    fn def(&self) -> TagDef {
        self.def
    }

    fn read(&self, bag: &MetadataBag, _: &Conventions) -> Option<String> {
        accessor::get_string(bag, self.def.block, self.def.key)
    }

    fn write(&self, bag: &mut MetadataBag, value: String, _: &Conventions) -> MetaResult<()> {
        accessor::set_string(bag, self.def.block, self.def.key, &value, self.max_len);
        Ok(())
    }
}

impl TypedAccess for FixedTextTag {
    type Value = String;

    fn def(&self) -> TagDef {
        self.def
    }

    fn read(&self, bag: &MetadataBag, _: &Conventions) -> Option<String> {
        accessor::get_string(bag, self.def.block, self.def.key)
    }

    fn write(&self, bag: &mut MetadataBag, value: String, _: &Conventions) -> MetaResult<()> {
        if value.is_empty() {
            return remove(bag, self.def);
        }

        let len = value.chars().count();
        if !(self.min_len..=self.max_len).contains(&len) {
            return Err(invalid(
                self.def,
                InvalidReason::BadLength {
                    len,
                    min: self.min_len,
                    max: self.max_len,
                },
            ));
        }

        if let Some(c) = value.chars().find(|c| !self.charset.allows(*c)) {
            return Err(invalid(self.def, InvalidReason::BadCharacter(c)));
        }

        bag.insert(self.def.block, self.def.key, TypedValue::String(value));
        Ok(())
    }
}

impl TypedAccess for LongTag {
    type Value = i64;

    fn def(&self) -> TagDef {
        self.def
    }

    fn read(&self, bag: &MetadataBag, _: &Conventions) -> Option<i64> {
        accessor::get_long(
            bag,
            self.def.block,
            self.def.key,
            self.min,
            self.max,
            self.default,
        )
    }

    fn write(&self, bag: &mut MetadataBag, value: i64, _: &Conventions) -> MetaResult<()> {
        if self.strict && !(self.min..=self.max).contains(&value) {
            return Err(invalid(
                self.def,
                InvalidReason::OutOfRange {
                    value,
                    min: self.min,
                    max: self.max,
                },
            ));
        }

        accessor::set_long(
            bag,
            self.def.block,
            self.def.key,
            value,
            self.min,
            self.max,
            self.default,
        );
        Ok(())
    }
}

impl TypedAccess for RealTag {
    type Value = f64;

    fn def(&self) -> TagDef {
        self.def
    }

    fn read(&self, bag: &MetadataBag, _: &Conventions) -> Option<f64> {
        accessor::get_real(bag, self.def.block, self.def.key, self.min, self.max)
    }

    fn write(&self, bag: &mut MetadataBag, value: f64, _: &Conventions) -> MetaResult<()> {
        accessor::set_real(bag, self.def.block, self.def.key, value, self.min, self.max)
            .map_err(|reason| invalid(self.def, reason))
    }
}

impl TypedAccess for TextListTag {
    type Value = Vec<String>;

    fn def(&self) -> TagDef {
        self.def
    }

    fn read(&self, bag: &MetadataBag, _: &Conventions) -> Option<Vec<String>> {
        accessor::get_array_string(bag, self.def.block, self.def.key)
    }

    fn write(&self, bag: &mut MetadataBag, value: Vec<String>, _: &Conventions) -> MetaResult<()> {
        accessor::set_array_string(bag, self.def.block, self.def.key, &value, self.max_len)
            .map_err(|reason| invalid(self.def, reason))
    }
}

/// Reads a list at width `T`, then widens it back out.
fn widened<T: ArrayInt>(bag: &MetadataBag, def: TagDef) -> Option<Vec<i64>> {
    accessor::get_array_long::<T>(bag, def.block, def.key, LIST_SEPARATOR)
        .map(|values| values.into_iter().map(Into::into).collect())
}

fn width_max(width: IntWidth) -> i64 {
    match width {
        IntWidth::U8 => i64::from(u8::MAX),
        IntWidth::U16 => i64::from(u16::MAX),
        IntWidth::U32 => i64::from(u32::MAX),
    }
}

impl TypedAccess for LongListTag {
    type Value = Vec<i64>;

    fn def(&self) -> TagDef {
        self.def
    }

    fn read(&self, bag: &MetadataBag, _: &Conventions) -> Option<Vec<i64>> {
        match self.width {
            IntWidth::U8 => widened::<u8>(bag, self.def),
            IntWidth::U16 => widened::<u16>(bag, self.def),
            IntWidth::U32 => widened::<u32>(bag, self.def),
        }
    }

    fn write(&self, bag: &mut MetadataBag, value: Vec<i64>, _: &Conventions) -> MetaResult<()> {
        let max = width_max(self.width);
        if let Some(bad) = value.iter().find(|v| !(0..=max).contains(*v)) {
            return Err(invalid(self.def, InvalidReason::TooWide { value: *bad }));
        }

        accessor::set_array_long(bag, self.def.block, self.def.key, &value, LIST_SEPARATOR);
        Ok(())
    }
}

impl TypedAccess for RealListTag {
    type Value = Vec<f64>;

    fn def(&self) -> TagDef {
        self.def
    }

    fn read(&self, bag: &MetadataBag, _: &Conventions) -> Option<Vec<f64>> {
        accessor::get_array_real(bag, self.def.block, self.def.key)
    }

    fn write(&self, bag: &mut MetadataBag, value: Vec<f64>, _: &Conventions) -> MetaResult<()> {
        if value.is_empty() {
            return remove(bag, self.def);
        }

        if self.count.is_some_and(|count| value.len() != count) {
            return Err(invalid(
                self.def,
                InvalidReason::BadCount { got: value.len() },
            ));
        }

        accessor::set_array_real(bag, self.def.block, self.def.key, &value)
            .map_err(|reason| invalid(self.def, reason))
    }
}

impl TypedAccess for DateTimeTag {
    /// The XML form.
    type Value = String;

    fn def(&self) -> TagDef {
        self.def
    }

    fn read(&self, bag: &MetadataBag, _: &Conventions) -> Option<String> {
        accessor::get_date_time(bag, self.def.block, self.def.key)
    }

    /// Takes the XML form (or the Exif layout). Offsets are normalized to
    /// UTC, unless this is an IPTC tag and local time is being kept.
    fn write(&self, bag: &mut MetadataBag, value: String, conventions: &Conventions) -> MetaResult<()> {
        if value.is_empty() {
            return remove(bag, self.def);
        }

        let value = value.trim();
        let xml = if datetime::is_xml(value) {
            value.to_owned()
        } else if looks_like_exif(value) {
            datetime::exif_to_xml(value)
        } else {
            return Err(invalid(self.def, InvalidReason::BadDateTime(value.into())));
        };

        let keep_offset = self.style == DateTimeStyle::Iptc && conventions.iptc_keep_local_time;
        let xml = if keep_offset {
            xml
        } else {
            datetime::normalize(&xml).unwrap_or(xml)
        };

        accessor::set_date_time(bag, self.def.block, self.def.key, &xml)
            .map_err(|reason| invalid(self.def, reason))
    }
}

/// `YYYY:MM:DD HH:MM:SS` or `YYYY:MM:DD`.
fn looks_like_exif(text: &str) -> bool {
    let b = text.as_bytes();
    matches!(b.len(), 10 | 19)
        && b[4] == b':'
        && b[7] == b':'
        && b.iter()
            .enumerate()
            .all(|(i, c)| matches!(i, 4 | 7 | 10 | 13 | 16) || c.is_ascii_digit())
}

impl TypedAccess for BlobTag {
    type Value = Vec<u8>;

    fn def(&self) -> TagDef {
        self.def
    }

    fn read(&self, bag: &MetadataBag, conventions: &Conventions) -> Option<Vec<u8>> {
        accessor::get_blob(
            bag,
            self.def.block,
            self.def.key,
            conventions.base64_mode,
            conventions.blob_list_fallback,
        )
    }

    fn write(&self, bag: &mut MetadataBag, value: Vec<u8>, _: &Conventions) -> MetaResult<()> {
        accessor::set_blob(bag, self.def.block, self.def.key, &value, self.force_base64);
        Ok(())
    }
}

impl TypedAccess for CodedTag {
    /// The legacy code, like `a` or `3F`.
    type Value = String;

    fn def(&self) -> TagDef {
        self.def
    }

    fn read(&self, bag: &MetadataBag, _: &Conventions) -> Option<String> {
        let code = accessor::get_string(bag, self.def.block, self.def.key)?;

        if !self.table.accepts(&code) {
            log::warn!("`{}` holds `{code}`, which isn't in {:?}.", self.def, self.table);
        }

        Some(code)
    }

    fn write(&self, bag: &mut MetadataBag, value: String, _: &Conventions) -> MetaResult<()> {
        if value.is_empty() {
            return remove(bag, self.def);
        }

        if !self.table.accepts(&value) {
            return Err(invalid(self.def, InvalidReason::UnknownCode(value)));
        }

        bag.insert(self.def.block, self.def.key, TypedValue::String(value));
        Ok(())
    }
}

impl TypedAccess for FlashTag {
    type Value = Flash;

    fn def(&self) -> TagDef {
        self.def
    }

    fn read(&self, bag: &MetadataBag, _: &Conventions) -> Option<Flash> {
        let raw = accessor::get_long(bag, self.def.block, self.def.key, 0, 0xFFFF, 0)?;
        Some(Flash::decode(raw as u16))
    }

    fn write(&self, bag: &mut MetadataBag, value: Flash, _: &Conventions) -> MetaResult<()> {
        bag.insert(
            self.def.block,
            self.def.key,
            TypedValue::Integer(i64::from(value.encode())),
        );
        Ok(())
    }
}

impl TypedAccess for SubjectAreaTag {
    type Value = SubjectArea;

    fn def(&self) -> TagDef {
        self.def
    }

    fn read(&self, bag: &MetadataBag, _: &Conventions) -> Option<SubjectArea> {
        let values =
            accessor::get_array_long::<u16>(bag, self.def.block, self.def.key, LIST_SEPARATOR)?;

        let area = SubjectArea::from_values(&values);
        if area.is_none() {
            log::warn!("`{}` holds `{}` values. That's not a shape.", self.def, values.len());
        }
        area
    }

    fn write(&self, bag: &mut MetadataBag, value: SubjectArea, _: &Conventions) -> MetaResult<()> {
        accessor::set_array_long(
            bag,
            self.def.block,
            self.def.key,
            &value.values(),
            LIST_SEPARATOR,
        );
        Ok(())
    }
}

impl TypedAccess for VersionTag {
    type Value = [u8; 4];

    fn def(&self) -> TagDef {
        self.def
    }

    fn read(&self, bag: &MetadataBag, _: &Conventions) -> Option<[u8; 4]> {
        match bag.get(self.def.block, self.def.key)? {
            TypedValue::Blob(bytes) => {
                let mut parts = [0_u8; 4];
                parts
                    .iter_mut()
                    .zip(bytes)
                    .for_each(|(slot, byte)| *slot = *byte);
                Some(parts)
            }
            other => other.to_text().map(|text| version::decode(&text)),
        }
    }

    fn write(&self, bag: &mut MetadataBag, value: [u8; 4], _: &Conventions) -> MetaResult<()> {
        bag.insert(
            self.def.block,
            self.def.key,
            TypedValue::String(version::encode(value, self.style)),
        );
        Ok(())
    }
}

impl TypedAccess for CoordinateTag {
    type Value = Coordinate;

    fn def(&self) -> TagDef {
        self.def
    }

    fn read(&self, bag: &MetadataBag, _: &Conventions) -> Option<Coordinate> {
        let text = accessor::get_string(bag, self.def.block, self.def.key)?;
        Coordinate::parse(&text, self.axis)
    }

    fn write(&self, bag: &mut MetadataBag, value: Coordinate, _: &Conventions) -> MetaResult<()> {
        if value.direction.axis() != self.axis || !value.is_finite() {
            return Err(invalid(
                self.def,
                InvalidReason::BadCoordinate(value.to_xmp()),
            ));
        }

        bag.insert(self.def.block, self.def.key, TypedValue::String(value.to_xmp()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use metabag_types::tags::{Axis, exif, gps, iptc, tiff};

    use super::TypedAccess;
    use crate::{
        bag::MetadataBag,
        codec::{Flash, SubjectArea},
        config::Conventions,
        error::{InvalidReason, MetaError},
        gps::{Coordinate, Direction},
        util::logger,
    };

    fn fresh() -> (MetadataBag, Conventions) {
        logger();
        (MetadataBag::new(), Conventions::default())
    }

    #[test]
    fn strict_longs_refuse_lenient_longs_default() {
        let (mut bag, c) = fresh();

        let err = iptc::URGENCY.write(&mut bag, 10, &c).unwrap_err();
        assert!(matches!(
            err,
            MetaError::InvalidValue {
                reason: InvalidReason::OutOfRange { value: 10, .. },
                ..
            }
        ));
        assert!(bag.is_empty(), "nothing was stored");

        exif::COLOR_SPACE.write(&mut bag, -4, &c).unwrap();
        assert_eq!(exif::COLOR_SPACE.read(&bag, &c), Some(1), "default substituted");
    }

    #[test]
    fn fixed_text_checks_length_and_charset() {
        let (mut bag, c) = fresh();

        assert!(iptc::COUNTRY_CODE.write(&mut bag, "FRA".into(), &c).is_ok());
        assert!(iptc::COUNTRY_CODE.write(&mut bag, "FR".into(), &c).is_err());
        assert!(iptc::COUNTRY_CODE.write(&mut bag, "fra".into(), &c).is_err());
        assert_eq!(iptc::COUNTRY_CODE.read(&bag, &c).as_deref(), Some("FRA"));

        let hex = "0123456789abcdef0123456789ABCDEF".to_string();
        assert!(exif::IMAGE_UNIQUE_ID.write(&mut bag, hex, &c).is_ok());
    }

    #[test]
    fn coded_tags_check_their_table() {
        let (mut bag, c) = fresh();

        assert!(iptc::OBJECT_CYCLE.write(&mut bag, "p".into(), &c).is_ok());
        assert_eq!(
            iptc::OBJECT_CYCLE.write(&mut bag, "x".into(), &c),
            Err(MetaError::InvalidValue {
                tag: iptc::OBJECT_CYCLE.def,
                reason: InvalidReason::UnknownCode("x".into()),
            })
        );
        assert_eq!(iptc::OBJECT_CYCLE.read(&bag, &c).as_deref(), Some("p"));
        assert_eq!(iptc::OBJECT_CYCLE.table.number("p"), Some(2));

        assert!(iptc::IMAGE_TYPE.write(&mut bag, "3F".into(), &c).is_ok());
        assert!(gps::SPEED_REF.write(&mut bag, "Q".into(), &c).is_err());
    }

    #[test]
    fn long_lists_check_width() {
        let (mut bag, c) = fresh();

        assert!(tiff::BITS_PER_SAMPLE.write(&mut bag, vec![8, 8, 8], &c).is_ok());
        assert_eq!(tiff::BITS_PER_SAMPLE.read(&bag, &c), Some(vec![8, 8, 8]));

        assert_eq!(
            exif::COMPONENTS_CONFIGURATION.write(&mut bag, vec![1, 2, 3, 256], &c),
            Err(MetaError::InvalidValue {
                tag: exif::COMPONENTS_CONFIGURATION.def,
                reason: InvalidReason::TooWide { value: 256 },
            })
        );
    }

    #[test]
    fn real_lists_check_count() {
        let (mut bag, c) = fresh();

        assert!(tiff::WHITE_POINT.write(&mut bag, vec![0.3127, 0.329], &c).is_ok());
        assert!(tiff::WHITE_POINT.write(&mut bag, vec![0.3127], &c).is_err());
        assert_eq!(tiff::WHITE_POINT.read(&bag, &c), Some(vec![0.3127, 0.329]));
    }

    #[test]
    fn datetimes_normalize() {
        let (mut bag, c) = fresh();

        exif::DATE_TIME_ORIGINAL
            .write(&mut bag, "2024-01-02T03:04:05+01:00".into(), &c)
            .unwrap();
        assert_eq!(
            exif::DATE_TIME_ORIGINAL.read(&bag, &c).as_deref(),
            Some("2024-01-02T02:04:05Z")
        );

        tiff::DATE_TIME
            .write(&mut bag, "2024:01:02 03:04:05".into(), &c)
            .unwrap();
        assert_eq!(
            tiff::DATE_TIME.read(&bag, &c).as_deref(),
            Some("2024-01-02T03:04:05Z")
        );

        assert!(tiff::DATE_TIME.write(&mut bag, "tuesday".into(), &c).is_err());

        // IPTC may keep its offset
        let local = Conventions::default().with_iptc_keep_local_time(true);
        iptc::DATE_CREATED
            .write(&mut bag, "2024-01-02T03:04:05+01:00".into(), &local)
            .unwrap();
        assert_eq!(
            iptc::DATE_CREATED.read(&bag, &local).as_deref(),
            Some("2024-01-02T03:04:05+01:00")
        );
    }

    #[test]
    fn flash_round_trips() {
        let (mut bag, c) = fresh();

        let flash = Flash {
            fired: true,
            return_light: 3,
            mode: 3,
            function_present: true,
            red_eye_reduction: false,
        };
        exif::FLASH.write(&mut bag, flash, &c).unwrap();

        assert_eq!(exif::FLASH.read(&bag, &c), Some(flash));
        assert_eq!(
            bag.get(exif::FLASH.def.block, exif::FLASH.def.key),
            Some(&crate::value::TypedValue::Integer(0x1F))
        );
    }

    #[test]
    fn subject_area_shapes() {
        let (mut bag, c) = fresh();

        let circle = SubjectArea::from_values(&[100, 200, 50]).expect("three values");
        exif::SUBJECT_AREA.write(&mut bag, circle, &c).unwrap();
        assert_eq!(exif::SUBJECT_AREA.read(&bag, &c), Some(circle));
    }

    #[test]
    fn versions_follow_their_style() {
        let (mut bag, c) = fresh();

        exif::EXIF_VERSION.write(&mut bag, [0, 2, 3, 0], &c).unwrap();
        gps::VERSION_ID.write(&mut bag, [2, 3, 0, 0], &c).unwrap();

        assert_eq!(
            bag.get(exif::EXIF_VERSION.def.block, "ExifVersion")
                .and_then(|v| v.as_str()),
            Some("0230")
        );
        assert_eq!(
            bag.get(gps::VERSION_ID.def.block, "GPSVersionID")
                .and_then(|v| v.as_str()),
            Some("2.3.0.0")
        );
        assert_eq!(gps::VERSION_ID.read(&bag, &c), Some([2, 3, 0, 0]));
    }

    #[test]
    fn coordinates_check_their_axis() {
        let (mut bag, c) = fresh();

        let north = Coordinate::new(10.0, 54.0, 0.0, Direction::North);
        assert!(gps::LATITUDE.write(&mut bag, north, &c).is_ok());
        assert!(gps::LONGITUDE.write(&mut bag, north, &c).is_err());
        assert_eq!(gps::LATITUDE.read(&bag, &c), Some(north));
    }

    #[test]
    fn coordinates_must_be_finite() {
        let (mut bag, c) = fresh();

        let north = Coordinate::new(10.0, 54.0, 0.0, Direction::North);
        gps::LATITUDE.write(&mut bag, north, &c).unwrap();

        let endless = Coordinate::from_decimal(f64::INFINITY, Axis::Latitude);
        assert!(matches!(
            gps::LATITUDE.write(&mut bag, endless, &c),
            Err(MetaError::InvalidValue {
                reason: InvalidReason::BadCoordinate(_),
                ..
            })
        ));

        let mut nan = north;
        nan.second = f64::NAN;
        assert!(gps::LATITUDE.write(&mut bag, nan, &c).is_err());

        assert_eq!(gps::LATITUDE.read(&bag, &c), Some(north), "unchanged");
    }

    #[test]
    fn text_list_elements_cant_hold_the_separator() {
        let (mut bag, c) = fresh();

        iptc::KEYWORDS
            .write(&mut bag, vec!["sea".into(), "sky".into()], &c)
            .unwrap();

        assert_eq!(
            iptc::KEYWORDS.write(&mut bag, vec!["a;b".into()], &c),
            Err(MetaError::InvalidValue {
                tag: iptc::KEYWORDS.def,
                reason: InvalidReason::BadCharacter(';'),
            })
        );
        assert_eq!(
            iptc::KEYWORDS.read(&bag, &c),
            Some(vec!["sea".into(), "sky".into()])
        );
    }

    #[test]
    fn empty_values_remove() {
        let (mut bag, c) = fresh();

        iptc::CITY.write(&mut bag, "Paris".into(), &c).unwrap();
        iptc::KEYWORDS
            .write(&mut bag, vec!["a".into(), "b".into()], &c)
            .unwrap();

        iptc::CITY.write(&mut bag, String::new(), &c).unwrap();
        assert_eq!(iptc::CITY.read(&bag, &c), None);

        iptc::KEYWORDS.write(&mut bag, vec![], &c).unwrap();
        assert_eq!(iptc::KEYWORDS.read(&bag, &c), None);
        assert!(bag.is_empty());
    }
}
