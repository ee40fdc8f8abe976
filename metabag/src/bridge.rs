//! Moves values between a platform's native metadata tree and a bag.
//!
//! The platform owns its tree and its tag paths. It hands this module a
//! [`NativeSource`] (or [`NativeSink`]) plus a table of [`TagPath`]s saying
//! which path feeds which tag. Every value still goes through the
//! [`Writer`]'s validation on the way in, so a bad native value is reported
//! and skipped rather than stored.
//!
//! Most tags cross as scalars. Two kinds cross as nested containers:
//!
//! - coordinates, as `{ value: "D;M;S", ref: "N" }`;
//! - IPTC and GPS datetimes, as `{ date, time }` in their own layouts.

use std::collections::HashMap;

use metabag_types::tags::{AnyTag, DateTimeStyle, TagDef};

use crate::{
    Reader, Writer,
    error::{InvalidReason, MetaError, MetaResult},
    value::TypedValue,
};

/// Field holding a coordinate's `D;M;S` text.
pub const VALUE_FIELD: &str = "value";

/// Field holding a coordinate's direction letter.
pub const REF_FIELD: &str = "ref";

pub const DATE_FIELD: &str = "date";
pub const TIME_FIELD: &str = "time";

/// A value in the native tree.
#[derive(Clone, Debug, PartialEq)]
pub enum NativeValue {
    String(String),
    Int32(i32),
    Float64(f64),
    ByteArray(Vec<u8>),

    /// Named fields, in the tree's order.
    Nested(Vec<(String, NativeValue)>),
}

impl NativeValue {
    /// Finds a field of a nested value.
    pub fn field(&self, name: &str) -> Option<&NativeValue> {
        match self {
            NativeValue::Nested(fields) => fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Renders a scalar as text. Byte arrays become a `;`-joined list.
    pub fn to_text(&self) -> Option<String> {
        match self {
            NativeValue::String(s) => Some(s.clone()),
            NativeValue::Int32(i) => Some(i.to_string()),
            NativeValue::Float64(f) => Some(f.to_string()),
            NativeValue::ByteArray(bytes) => Some(
                bytes
                    .iter()
                    .map(u8::to_string)
                    .collect::<Vec<_>>()
                    .join(";"),
            ),
            NativeValue::Nested(_) => None,
        }
    }

    fn nested(fields: [(&str, String); 2]) -> Self {
        NativeValue::Nested(
            fields
                .into_iter()
                .map(|(name, text)| (name.to_owned(), NativeValue::String(text)))
                .collect(),
        )
    }
}

impl From<TypedValue> for NativeValue {
    /// Integers that don't fit in 32 bits are passed as text.
    fn from(value: TypedValue) -> Self {
        match value {
            TypedValue::String(s) => NativeValue::String(s),
            TypedValue::Integer(i) => match i32::try_from(i) {
                Ok(i) => NativeValue::Int32(i),
                Err(_) => {
                    log::debug!("`{i}` doesn't fit a native Int32. Passing it as text.");
                    NativeValue::String(i.to_string())
                }
            },
            TypedValue::Real(r) => NativeValue::Float64(r),
            TypedValue::Timestamp(ts) => NativeValue::String(crate::datetime::from_timestamp(&ts)),
            TypedValue::Blob(bytes) => NativeValue::ByteArray(bytes),
        }
    }
}

/// Something the bridge can read native tags from.
pub trait NativeSource {
    fn get_native_tag(&self, path: &str) -> Option<NativeValue>;
}

/// Something the bridge can write native tags into.
pub trait NativeSink {
    /// Returns whether the tree accepted the value.
    fn set_native_tag(&mut self, path: &str, value: NativeValue) -> bool;
}

impl<S: core::hash::BuildHasher> NativeSource for HashMap<String, NativeValue, S> {
    fn get_native_tag(&self, path: &str) -> Option<NativeValue> {
        self.get(path).cloned()
    }
}

impl<S: core::hash::BuildHasher> NativeSink for HashMap<String, NativeValue, S> {
    fn set_native_tag(&mut self, path: &str, value: NativeValue) -> bool {
        self.insert(path.to_owned(), value);
        true
    }
}

/// Pairs a native path with the tag it feeds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TagPath {
    pub path: &'static str,
    pub tag: AnyTag,
}

impl TagPath {
    pub const fn new(path: &'static str, tag: AnyTag) -> Self {
        Self { path, tag }
    }
}

/// What an import did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportReport {
    /// Tags written (or removed, for empty values).
    pub stored: usize,

    /// Tags whose native value was refused, and why.
    pub rejected: Vec<(TagDef, MetaError)>,
}

/// Reads every path in `paths` from `source` and writes it into the bag.
///
/// Paths missing from the tree are skipped. A refused value doesn't stop the
/// import; it's listed in the report instead.
pub fn import_native(
    source: &impl NativeSource,
    paths: &[TagPath],
    writer: &Writer,
) -> ImportReport {
    let mut report = ImportReport::default();

    for entry in paths {
        let Some(value) = source.get_native_tag(entry.path) else {
            log::trace!("`{}` isn't in the native tree. Skipping.", entry.path);
            continue;
        };

        match import_one(entry.tag, value, writer) {
            Ok(()) => report.stored += 1,
            Err(e) => {
                log::warn!("Couldn't import `{}`: {e}", entry.path);
                report.rejected.push((entry.tag.def(), e));
            }
        }
    }

    log::debug!(
        "Imported {} native tags ({} refused).",
        report.stored,
        report.rejected.len()
    );
    report
}

fn import_one(tag: AnyTag, value: NativeValue, writer: &Writer) -> MetaResult<()> {
    let text_field = |name: &str| {
        value
            .field(name)
            .and_then(NativeValue::to_text)
            .unwrap_or_default()
    };

    match (tag, &value) {
        (AnyTag::Coordinate(t), NativeValue::Nested(_)) => {
            writer.set_exif_coordinate(t, &text_field(VALUE_FIELD), &text_field(REF_FIELD))
        }

        (AnyTag::DateTime(t), NativeValue::Nested(_)) => {
            let (date, time) = (text_field(DATE_FIELD), text_field(TIME_FIELD));
            match t.style {
                DateTimeStyle::Iptc => writer.set_iptc_date_time(t, &date, &time),
                DateTimeStyle::Gps => writer.set_gps_date_time(t, &date, &time),
                DateTimeStyle::Exif => {
                    writer.set_exif_date_time(t, format!("{date} {time}").trim())
                }
            }
        }

        (_, NativeValue::Nested(_)) => {
            let reason = InvalidReason::UnexpectedNested;
            log::error!("Refusing to write `{}`: {reason}", tag.def());
            Err(MetaError::InvalidValue {
                tag: tag.def(),
                reason,
            })
        }

        (AnyTag::Blob(t), NativeValue::ByteArray(bytes)) => writer.set(t, bytes.clone()),

        (AnyTag::Version(t), NativeValue::ByteArray(bytes)) => {
            let mut parts = [0_u8; 4];
            parts
                .iter_mut()
                .zip(bytes)
                .for_each(|(slot, byte)| *slot = *byte);
            writer.set(t, parts)
        }

        // every other scalar goes through the tag's text form
        (_, scalar) => writer.set_text(tag, &scalar.to_text().unwrap_or_default()),
    }
}

/// Reads every path in `paths` out of the bag and hands it to `sink`.
///
/// Tags absent from the bag are skipped. Returns how many values the sink
/// accepted.
pub fn export_native(reader: &Reader, paths: &[TagPath], sink: &mut impl NativeSink) -> usize {
    let mut accepted = 0;

    for entry in paths {
        let Some(value) = export_one(entry.tag, reader) else {
            continue;
        };

        if sink.set_native_tag(entry.path, value) {
            accepted += 1;
        } else {
            log::warn!("The native tree refused `{}`.", entry.path);
        }
    }

    accepted
}

fn export_one(tag: AnyTag, reader: &Reader) -> Option<NativeValue> {
    Some(match tag {
        AnyTag::Long(t) => TypedValue::Integer(reader.get(t)?).into(),
        AnyTag::Real(t) => NativeValue::Float64(reader.get(t)?),
        AnyTag::Blob(t) => NativeValue::ByteArray(reader.get(t)?),
        AnyTag::Flash(t) => NativeValue::Int32(i32::from(reader.get(t)?.encode())),

        AnyTag::Coordinate(t) => {
            let (value, letter) = reader.exif_coordinate(t)?;
            NativeValue::nested([(VALUE_FIELD, value), (REF_FIELD, letter.to_string())])
        }

        AnyTag::DateTime(t) => match t.style {
            DateTimeStyle::Iptc => {
                let (date, time) = reader.iptc_date_time(t)?;
                NativeValue::nested([(DATE_FIELD, date), (TIME_FIELD, time)])
            }
            DateTimeStyle::Gps => {
                let (date, time) = reader.gps_date_time(t)?;
                NativeValue::nested([(DATE_FIELD, date), (TIME_FIELD, time)])
            }
            DateTimeStyle::Exif => NativeValue::String(reader.exif_date_time(t)?),
        },

        _ => NativeValue::String(reader.text(tag)?),
    })
}
