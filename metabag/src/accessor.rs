//! Typed get/set over the raw bag.
//!
//! These functions know about value kinds, separators and ranges, but not
//! about tags: the caller passes the block, key and limits. Tag-aware
//! validation lives in the façade, which is the only public way to mutate a
//! bag.
//!
//! Range problems aren't errors here. An out-of-range integer is swapped
//! for its default (on read and on write) and the call still succeeds.

use metabag_types::Block;

use crate::{
    b64::{self, Base64Mode},
    bag::MetadataBag,
    datetime,
    error::InvalidReason,
    value::TypedValue,
};

/// Separator for list-valued tags.
pub const LIST_SEPARATOR: char = ';';

/// Blobs this small (or smaller) are written as a list of byte values.
pub const SMALL_BLOB: usize = 8;

// strings

/// Reads any scalar as text.
pub fn get_string(bag: &MetadataBag, block: Block, key: &str) -> Option<String> {
    bag.get(block, key)?.to_text()
}

/// Stores text, truncated to `max_len` characters.
///
/// Empty text removes the attribute.
pub fn set_string(bag: &mut MetadataBag, block: Block, key: &str, value: &str, max_len: usize) {
    if value.is_empty() {
        bag.remove(block, key);
        return;
    }

    let count = value.chars().count();
    let value: String = if count > max_len {
        log::debug!("Truncating `{block}.{key}` from `{count}` to `{max_len}` characters.");
        value.chars().take(max_len).collect()
    } else {
        value.to_owned()
    };

    bag.insert(block, key, TypedValue::String(value));
}

// integers

fn as_integer(value: &TypedValue) -> Option<i64> {
    match value {
        TypedValue::Integer(i) => Some(*i),
        TypedValue::Real(r) if r.is_finite() => Some(r.round() as i64),
        TypedValue::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.round() as i64))
        }
        _ => None,
    }
}

/// Reads an integer. Values outside `min..=max` read as `default`.
pub fn get_long(
    bag: &MetadataBag,
    block: Block,
    key: &str,
    min: i64,
    max: i64,
    default: i64,
) -> Option<i64> {
    let value = as_integer(bag.get(block, key)?)?;

    if (min..=max).contains(&value) {
        Some(value)
    } else {
        log::warn!("`{block}.{key}` holds `{value}`, outside `{min}..={max}`. Reading `{default}`.");
        Some(default)
    }
}

/// Stores an integer. Values outside `min..=max` are stored as `default`.
pub fn set_long(
    bag: &mut MetadataBag,
    block: Block,
    key: &str,
    value: i64,
    min: i64,
    max: i64,
    default: i64,
) {
    let value = if (min..=max).contains(&value) {
        value
    } else {
        log::warn!("`{value}` is outside `{min}..={max}` for `{block}.{key}`. Storing `{default}`.");
        default
    };

    bag.insert(block, key, TypedValue::Integer(value));
}

// reals

fn as_real(value: &TypedValue) -> Option<f64> {
    let real = match value {
        TypedValue::Real(r) => Some(*r),
        TypedValue::Integer(i) => Some(*i as f64),
        TypedValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    real.filter(|r| !r.is_nan())
}

/// Reads a real, clamped into `[min, max]`.
pub fn get_real(bag: &MetadataBag, block: Block, key: &str, min: f64, max: f64) -> Option<f64> {
    as_real(bag.get(block, key)?).map(|r| r.clamp(min, max))
}

/// Stores a real, clamped into `[min, max]`. NaN is refused.
pub fn set_real(
    bag: &mut MetadataBag,
    block: Block,
    key: &str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), InvalidReason> {
    if value.is_nan() {
        return Err(InvalidReason::NotFinite);
    }

    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("Clamped `{block}.{key}` from `{value}` to `{clamped}`.");
    }

    bag.insert(block, key, TypedValue::Real(clamped));
    Ok(())
}

// lists

/// Splits stored list text, skipping empty elements.
fn elements(text: &str, separator: char) -> impl Iterator<Item = &str> {
    text.split(separator).filter(|e| !e.trim().is_empty())
}

/// Joins elements for storage, or removes the attribute if none are left.
fn store_list<I>(bag: &mut MetadataBag, block: Block, key: &str, items: I, separator: char)
where
    I: IntoIterator<Item = String>,
{
    let items: Vec<String> = items.into_iter().filter(|i| !i.is_empty()).collect();

    if items.is_empty() {
        log::trace!("No elements left for `{block}.{key}`. Removing it.");
        bag.remove(block, key);
        return;
    }

    let separator = separator.to_string();
    bag.insert(block, key, TypedValue::String(items.join(separator.as_str())));
}

pub fn get_array_string(bag: &MetadataBag, block: Block, key: &str) -> Option<Vec<String>> {
    let text = get_string(bag, block, key)?;
    Some(
        elements(&text, LIST_SEPARATOR)
            .map(String::from)
            .collect(),
    )
}

/// Stores a list of strings. Each element is truncated to `max_len`.
///
/// An element holding the list separator is refused, and the bag is left
/// as it was.
pub fn set_array_string<S: AsRef<str>>(
    bag: &mut MetadataBag,
    block: Block,
    key: &str,
    values: &[S],
    max_len: usize,
) -> Result<(), InvalidReason> {
    if values.iter().any(|v| v.as_ref().contains(LIST_SEPARATOR)) {
        return Err(InvalidReason::BadCharacter(LIST_SEPARATOR));
    }

    store_list(
        bag,
        block,
        key,
        values
            .iter()
            .map(|v| v.as_ref().chars().take(max_len).collect::<String>()),
        LIST_SEPARATOR,
    );
    Ok(())
}

/// An integer type that list elements can be narrowed into.
pub trait ArrayInt: Copy + Default + TryFrom<i64> + Into<i64> + core::fmt::Display {}

impl<T> ArrayInt for T where T: Copy + Default + TryFrom<i64> + Into<i64> + core::fmt::Display {}

/// Reads a list of integers of width `T`.
///
/// An element that can't be read, or doesn't fit `T`, reads as
/// `T::default()`.
pub fn get_array_long<T: ArrayInt>(
    bag: &MetadataBag,
    block: Block,
    key: &str,
    separator: char,
) -> Option<Vec<T>> {
    let narrow = |value: i64| {
        T::try_from(value).unwrap_or_else(|_| {
            log::warn!("`{value}` in `{block}.{key}` doesn't fit. Reading the default.");
            T::default()
        })
    };

    match bag.get(block, key)? {
        TypedValue::Integer(i) => Some(vec![narrow(*i)]),
        TypedValue::String(text) => Some(
            elements(text, separator)
                .map(|e| match e.trim().parse::<i64>() {
                    Ok(v) => narrow(v),
                    Err(_) => {
                        log::warn!("`{e}` in `{block}.{key}` isn't an integer.");
                        T::default()
                    }
                })
                .collect(),
        ),
        TypedValue::Blob(bytes) => Some(bytes.iter().map(|b| narrow(i64::from(*b))).collect()),
        _ => None,
    }
}

/// Stores a list of integers, joined with `separator`.
pub fn set_array_long<T: ArrayInt>(
    bag: &mut MetadataBag,
    block: Block,
    key: &str,
    values: &[T],
    separator: char,
) {
    store_list(bag, block, key, values.iter().map(T::to_string), separator);
}

/// Reads a list of reals. Unreadable elements read as `0.0`.
pub fn get_array_real(bag: &MetadataBag, block: Block, key: &str) -> Option<Vec<f64>> {
    match bag.get(block, key)? {
        TypedValue::Real(r) => Some(vec![*r]),
        TypedValue::Integer(i) => Some(vec![*i as f64]),
        TypedValue::String(text) => Some(
            elements(text, LIST_SEPARATOR)
                .map(|e| {
                    e.trim().parse::<f64>().unwrap_or_else(|_| {
                        log::warn!("`{e}` in `{block}.{key}` isn't a real.");
                        0.0
                    })
                })
                .collect(),
        ),
        _ => None,
    }
}

/// Stores a list of reals. NaN elements are refused.
pub fn set_array_real(
    bag: &mut MetadataBag,
    block: Block,
    key: &str,
    values: &[f64],
) -> Result<(), InvalidReason> {
    if values.iter().any(|v| v.is_nan()) {
        return Err(InvalidReason::NotFinite);
    }

    store_list(bag, block, key, values.iter().map(f64::to_string), LIST_SEPARATOR);
    Ok(())
}

// datetimes

/// Brings one stored datetime element to XML form.
fn element_to_xml(text: &str) -> String {
    if datetime::is_xml(text) {
        text.to_owned()
    } else {
        // stored by an older writer, in the Exif layout
        datetime::exif_to_xml(text)
    }
}

/// Reads a datetime as XML.
///
/// Timestamps and Exif-layout strings are converted. Anything else reads as
/// [`datetime::XML_ZERO`].
pub fn get_date_time(bag: &MetadataBag, block: Block, key: &str) -> Option<String> {
    match bag.get(block, key)? {
        TypedValue::Timestamp(ts) => Some(datetime::from_timestamp(ts)),
        TypedValue::String(s) => Some(element_to_xml(s.trim())),
        other => {
            log::warn!("`{block}.{key}` holds a {:?}, not a datetime.", other.kind());
            None
        }
    }
}

/// Stores an XML datetime as written.
///
/// Empty text removes the attribute.
pub fn set_date_time(
    bag: &mut MetadataBag,
    block: Block,
    key: &str,
    xml: &str,
) -> Result<(), InvalidReason> {
    if xml.is_empty() {
        bag.remove(block, key);
        return Ok(());
    }

    if !datetime::is_xml(xml) {
        return Err(InvalidReason::BadDateTime(xml.to_owned()));
    }

    bag.insert(block, key, TypedValue::String(xml.to_owned()));
    Ok(())
}

pub fn get_array_date_time(bag: &MetadataBag, block: Block, key: &str) -> Option<Vec<String>> {
    let text = get_string(bag, block, key)?;
    Some(
        elements(&text, LIST_SEPARATOR)
            .map(|e| element_to_xml(e.trim()))
            .collect(),
    )
}

/// Stores a list of XML datetimes. Every element must be well-formed.
pub fn set_array_date_time<S: AsRef<str>>(
    bag: &mut MetadataBag,
    block: Block,
    key: &str,
    values: &[S],
) -> Result<(), InvalidReason> {
    if let Some(bad) = values
        .iter()
        .map(|v| v.as_ref())
        .find(|v| !v.is_empty() && !datetime::is_xml(v))
    {
        return Err(InvalidReason::BadDateTime(bad.to_owned()));
    }

    store_list(
        bag,
        block,
        key,
        values.iter().map(|v| v.as_ref().to_owned()),
        LIST_SEPARATOR,
    );
    Ok(())
}

// blobs

/// Encodes a blob for storage.
///
/// Small blobs become a `;`-joined list of byte values unless
/// `force_base64` is set. Everything else is Base64.
pub fn encode_blob(bytes: &[u8], force_base64: bool) -> String {
    if !force_base64 && bytes.len() <= SMALL_BLOB {
        bytes
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(";")
    } else {
        b64::encode(bytes)
    }
}

/// Decodes stored blob text.
///
/// Base64 is tried first. If that fails and `allow_list` is set, the text
/// is read as a list of byte values.
pub fn decode_blob(text: &str, mode: Base64Mode, allow_list: bool) -> Option<Vec<u8>> {
    let err = match b64::decode(text, mode) {
        Ok(bytes) if !bytes.is_empty() => return Some(bytes),
        Ok(_) => {
            log::debug!("Blob text `{text}` holds no bytes.");
            return None;
        }
        Err(e) => e,
    };

    if !allow_list {
        log::debug!("Blob text isn't Base64 ({err}), and lists aren't allowed.");
        return None;
    }

    let bytes: Option<Vec<u8>> = elements(text, LIST_SEPARATOR)
        .map(|e| e.trim().parse::<u8>().ok())
        .collect();

    match bytes {
        Some(bytes) if !bytes.is_empty() => Some(bytes),
        _ => {
            log::debug!("Blob text is neither Base64 ({err}) nor a byte list.");
            None
        }
    }
}

/// Reads a blob, whether it's stored raw or as text.
pub fn get_blob(
    bag: &MetadataBag,
    block: Block,
    key: &str,
    mode: Base64Mode,
    allow_list: bool,
) -> Option<Vec<u8>> {
    match bag.get(block, key)? {
        TypedValue::Blob(bytes) => Some(bytes.clone()),
        TypedValue::String(text) => decode_blob(text, mode, allow_list),
        other => {
            log::warn!("`{block}.{key}` holds a {:?}, not a blob.", other.kind());
            None
        }
    }
}

/// Stores a blob in its text encoding. An empty blob removes the attribute.
pub fn set_blob(bag: &mut MetadataBag, block: Block, key: &str, bytes: &[u8], force_base64: bool) {
    if bytes.is_empty() {
        bag.remove(block, key);
        return;
    }

    bag.insert(block, key, TypedValue::String(encode_blob(bytes, force_base64)));
}

#[cfg(test)]
mod tests {
    use metabag_types::Block;

    use super::*;
    use crate::{datetime::XML_ZERO, util::logger};

    const B: Block = Block::Exif;

    #[test]
    fn strings_truncate() {
        logger();

        let mut bag = MetadataBag::new();
        set_string(&mut bag, B, "k", "héllo world", 5);
        assert_eq!(get_string(&bag, B, "k").as_deref(), Some("héllo"));

        set_string(&mut bag, B, "k", "", 5);
        assert_eq!(get_string(&bag, B, "k"), None, "empty removes");
    }

    #[test]
    fn longs_substitute_defaults() {
        logger();

        let mut bag = MetadataBag::new();
        set_long(&mut bag, B, "k", 42, 0, 10, 7);
        assert_eq!(bag.get(B, "k"), Some(&TypedValue::Integer(7)));

        // bad data from elsewhere still reads as the default
        bag.insert(B, "k", TypedValue::from("99"));
        assert_eq!(get_long(&bag, B, "k", 0, 10, 7), Some(7));

        bag.insert(B, "k", TypedValue::from(" 3 "));
        assert_eq!(get_long(&bag, B, "k", 0, 10, 7), Some(3));

        bag.insert(B, "k", TypedValue::from("three"));
        assert_eq!(get_long(&bag, B, "k", 0, 10, 7), None, "not a number at all");
    }

    #[test]
    fn reals_clamp() {
        let mut bag = MetadataBag::new();
        assert_eq!(set_real(&mut bag, B, "k", 400.0, 0.0, 360.0), Ok(()));
        assert_eq!(get_real(&bag, B, "k", 0.0, 360.0), Some(360.0));

        assert_eq!(
            set_real(&mut bag, B, "k", f64::NAN, 0.0, 360.0),
            Err(InvalidReason::NotFinite)
        );
        assert_eq!(get_real(&bag, B, "k", 0.0, 360.0), Some(360.0), "unchanged");
    }

    #[test]
    fn string_lists_skip_empty_elements() {
        logger();

        let mut bag = MetadataBag::new();
        set_array_string(&mut bag, B, "k", &["a", "", "bcd"], 2).unwrap();
        assert_eq!(bag.get(B, "k"), Some(&TypedValue::from("a;bc")));
        assert_eq!(
            get_array_string(&bag, B, "k"),
            Some(vec!["a".to_string(), "bc".to_string()])
        );

        set_array_string(&mut bag, B, "k", &["", ""], 2).unwrap();
        assert!(!bag.has_block(B), "all-empty input removes the tag");
    }

    #[test]
    fn string_list_elements_cant_hold_the_separator() {
        logger();

        let mut bag = MetadataBag::new();
        set_array_string(&mut bag, B, "k", &["sea", "sky"], 10).unwrap();

        assert_eq!(
            set_array_string(&mut bag, B, "k", &["a;b"], 10),
            Err(InvalidReason::BadCharacter(';'))
        );
        assert_eq!(
            get_array_string(&bag, B, "k"),
            Some(vec!["sea".to_string(), "sky".to_string()]),
            "unchanged"
        );
    }

    #[test]
    fn integer_lists_narrow() {
        logger();

        let mut bag = MetadataBag::new();
        set_array_long::<u16>(&mut bag, B, "k", &[8, 8, 8], ';');
        assert_eq!(get_array_long::<u16>(&bag, B, "k", ';'), Some(vec![8, 8, 8]));

        bag.insert(B, "k", TypedValue::from("1;300;x;;2"));
        assert_eq!(
            get_array_long::<u8>(&bag, B, "k", ';'),
            Some(vec![1, 0, 0, 2]),
            "300 doesn't fit a u8; x isn't a number"
        );

        set_array_long::<i32>(&mut bag, B, "k", &[-1, 2], ',');
        assert_eq!(get_array_long::<i32>(&bag, B, "k", ','), Some(vec![-1, 2]));
    }

    #[test]
    fn real_lists() {
        let mut bag = MetadataBag::new();
        assert_eq!(set_array_real(&mut bag, B, "k", &[0.3127, 0.329]), Ok(()));
        assert_eq!(get_array_real(&bag, B, "k"), Some(vec![0.3127, 0.329]));

        assert_eq!(
            set_array_real(&mut bag, B, "k", &[1.0, f64::NAN]),
            Err(InvalidReason::NotFinite)
        );
    }

    #[test]
    fn datetimes() {
        logger();

        let mut bag = MetadataBag::new();
        assert_eq!(set_date_time(&mut bag, B, "k", "2024-01-02T03:04:05Z"), Ok(()));
        assert_eq!(
            get_date_time(&bag, B, "k").as_deref(),
            Some("2024-01-02T03:04:05Z")
        );

        assert!(set_date_time(&mut bag, B, "k", "2024:01:02 03:04:05").is_err());

        // legacy Exif-layout data is converted on read
        bag.insert(B, "k", TypedValue::from("2024:01:02 03:04:05"));
        assert_eq!(
            get_date_time(&bag, B, "k").as_deref(),
            Some("2024-01-02T03:04:05Z")
        );

        assert_eq!(
            set_array_date_time(&mut bag, B, "l", &["2024-01-02T03:04:05Z", "", XML_ZERO]),
            Ok(())
        );
        assert_eq!(
            get_array_date_time(&bag, B, "l"),
            Some(vec!["2024-01-02T03:04:05Z".into(), XML_ZERO.into()])
        );
        assert!(set_array_date_time(&mut bag, B, "l", &["soon"]).is_err());
    }

    #[test]
    fn blob_encoding_policy() {
        logger();

        assert_eq!(encode_blob(&[1, 2, 3], false), "1;2;3");
        assert_eq!(encode_blob(&[1, 2, 3], true), "AQID");
        assert_eq!(encode_blob(&[0; 9], false), "AAAAAAAAAAAA");

        // Base64 first
        assert_eq!(decode_blob("AQID", Base64Mode::Tolerant, true), Some(vec![1, 2, 3]));

        // then the list form, if allowed
        assert_eq!(decode_blob("1;2;3", Base64Mode::Tolerant, true), Some(vec![1, 2, 3]));
        assert_eq!(decode_blob("1;2;3", Base64Mode::Tolerant, false), None);
        assert_eq!(decode_blob("1;256", Base64Mode::Tolerant, true), None);

        // only whitespace is no blob at all
        assert_eq!(decode_blob("   ", Base64Mode::Tolerant, true), None);
        assert_eq!(decode_blob(" \n ", Base64Mode::Tolerant, false), None);
    }

    #[test]
    fn blobs_round_trip_through_the_bag() {
        let mut bag = MetadataBag::new();
        let bytes: Vec<u8> = (0..=200).collect();

        set_blob(&mut bag, B, "k", &bytes, false);
        assert_eq!(get_blob(&bag, B, "k", Base64Mode::Strict, false), Some(bytes));

        bag.insert(B, "raw", TypedValue::Blob(vec![9, 9]));
        assert_eq!(get_blob(&bag, B, "raw", Base64Mode::Strict, false), Some(vec![9, 9]));

        set_blob(&mut bag, B, "k", &[], false);
        assert_eq!(bag.get(B, "k"), None);
    }
}
