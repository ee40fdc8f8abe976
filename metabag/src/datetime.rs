//! Conversions between the datetime layouts of each standard and the
//! canonical XML datetime.
//!
//! The canonical form is `YYYY-MM-DDTHH:MM:SSZ`. IPTC input may also be kept
//! in the offset-preserving `YYYY-MM-DDTHH:MM:SS±HH:MM` form.
//!
//! Every conversion here is total. Malformed or short input gives a fixed
//! zero default (logged with `warn!`), never an error.

use chrono::{DateTime, Datelike as _, NaiveDate, NaiveTime, TimeDelta, Timelike as _, Utc};
use winnow::{
    Parser,
    combinator::alt,
    error::EmptyError,
    token::{one_of, take_while},
};

/// The XML datetime that stands in for unreadable input.
pub const XML_ZERO: &str = "0000-00-00T00:00:00Z";

/// The Exif datetime that stands in for unreadable input.
pub const EXIF_ZERO: &str = "0000:00:00 00:00:00";

const XML_DATE_ZERO: &str = "0000-00-00T";

/// How GPS time is written by a platform.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct GpsTimeFormat {
    /// Goes between hour, minute and second.
    pub separator: char,

    /// Whether seconds carry a `.00` suffix.
    pub fractional_seconds: bool,
}

impl GpsTimeFormat {
    /// `HH;MM;SS`
    pub const SEMICOLON: GpsTimeFormat = GpsTimeFormat {
        separator: ';',
        fractional_seconds: false,
    };

    /// `HH:MM:SS.00`
    pub const COLON_FRACTIONAL: GpsTimeFormat = GpsTimeFormat {
        separator: ':',
        fractional_seconds: true,
    };
}

/// A parsed XML datetime.
///
/// Fields are taken as written. Nothing checks that the date exists, since
/// zero dates (`0000-00-00`) are a normal degraded value.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct XmlDateTime {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,

    /// `None` for `Z`. Otherwise, minutes east of UTC.
    pub offset_minutes: Option<i32>,
}

impl XmlDateTime {
    /// Parses the 20-character (`Z`) or 25-character (`±HH:MM`) form.
    pub fn parse(text: &str) -> Option<Self> {
        let mut input: &str = text;
        let parsed = xml_date_time(&mut input).ok()?;

        // no trailing garbage
        input.is_empty().then_some(parsed)
    }

    /// Moves the datetime into UTC.
    ///
    /// When the date doesn't exist on the calendar (like the zero date),
    /// only the time of day is shifted and the date digits are kept.
    pub fn to_utc(&self) -> XmlDateTime {
        let offset = match self.offset_minutes {
            None | Some(0) => {
                return XmlDateTime {
                    offset_minutes: None,
                    ..*self
                };
            }
            Some(o) => TimeDelta::minutes(i64::from(o)),
        };

        let full = NaiveDate::from_ymd_opt(self.year as i32, self.month, self.day)
            .zip(NaiveTime::from_hms_opt(self.hour, self.minute, self.second))
            .and_then(|(date, time)| date.and_time(time).checked_sub_signed(offset))
            .and_then(|shifted| {
                let year = u32::try_from(shifted.year()).ok().filter(|y| *y <= 9999)?;
                Some(XmlDateTime {
                    year,
                    month: shifted.month(),
                    day: shifted.day(),
                    hour: shifted.hour(),
                    minute: shifted.minute(),
                    second: shifted.second(),
                    offset_minutes: None,
                })
            });

        if let Some(utc) = full {
            return utc;
        }

        log::warn!(
            "Date `{:04}-{:02}-{:02}` isn't on the calendar. Shifting the time only.",
            self.year,
            self.month,
            self.day
        );

        let Some(time) = NaiveTime::from_hms_opt(self.hour, self.minute, self.second) else {
            log::warn!("Time isn't valid either. Dropping the offset as-is.");
            return XmlDateTime {
                offset_minutes: None,
                ..*self
            };
        };

        let (shifted, _days) = time.overflowing_sub_signed(offset);
        XmlDateTime {
            hour: shifted.hour(),
            minute: shifted.minute(),
            second: shifted.second(),
            offset_minutes: None,
            ..*self
        }
    }

    /// Renders the XML form. A zero offset is written as `+00:00`, not `Z`.
    pub fn to_xml(&self) -> String {
        let mut out = format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        );

        match self.offset_minutes {
            None => out.push('Z'),
            Some(o) => {
                let sign = if o < 0 { '-' } else { '+' };
                let o = o.unsigned_abs();
                out.push_str(&format!("{sign}{:02}:{:02}", o / 60, o % 60));
            }
        }

        out
    }

    /// Converts to a `chrono` timestamp, if the date is real.
    pub fn to_timestamp(&self) -> Option<DateTime<Utc>> {
        let utc = self.to_utc();
        NaiveDate::from_ymd_opt(utc.year as i32, utc.month, utc.day)?
            .and_hms_opt(utc.hour, utc.minute, utc.second)
            .map(|naive| naive.and_utc())
    }

    fn date_prefix(&self) -> String {
        format!("{:04}-{:02}-{:02}T", self.year, self.month, self.day)
    }
}

/// A fixed-width run of ASCII digits, read as a number.
fn digits<'i>(n: usize) -> impl Parser<&'i str, u32, EmptyError> {
    take_while(n, |c: char| c.is_ascii_digit()).map(|s: &str| {
        s.bytes()
            .fold(0_u32, |acc, b| acc * 10 + u32::from(b - b'0'))
    })
}

/// `Z` or `±HH:MM`.
fn xml_offset(input: &mut &str) -> Result<Option<i32>, EmptyError> {
    alt((
        'Z'.value(None),
        (one_of(['+', '-']), digits(2), ':', digits(2))
            .map(|(sign, h, _, m): (char, u32, char, u32)| Some(signed_minutes(sign, h, m))),
    ))
    .parse_next(input)
}

fn xml_date_time(input: &mut &str) -> Result<XmlDateTime, EmptyError> {
    (
        digits(4),
        '-',
        digits(2),
        '-',
        digits(2),
        'T',
        digits(2),
        ':',
        digits(2),
        ':',
        digits(2),
        xml_offset,
    )
        .map(
            |(year, _, month, _, day, _, hour, _, minute, _, second, offset_minutes)| {
                XmlDateTime {
                    year,
                    month,
                    day,
                    hour,
                    minute,
                    second,
                    offset_minutes,
                }
            },
        )
        .parse_next(input)
}

/// IPTC time: `HHMMSS±HHMM`.
fn iptc_time(input: &mut &str) -> Result<(u32, u32, u32, i32), EmptyError> {
    (
        digits(2),
        digits(2),
        digits(2),
        one_of(['+', '-']),
        digits(2),
        digits(2),
    )
        .map(|(h, m, s, sign, oh, om)| (h, m, s, signed_minutes(sign, oh, om)))
        .parse_next(input)
}

fn signed_minutes(sign: char, hours: u32, minutes: u32) -> i32 {
    let total = (hours * 60 + minutes) as i32;
    if sign == '-' { -total } else { total }
}

/// Whether `text` is a well-formed XML datetime.
pub fn is_xml(text: &str) -> bool {
    XmlDateTime::parse(text).is_some()
}

/// Parses an XML datetime and moves it to UTC.
///
/// Gives `None` if `text` isn't an XML datetime.
pub fn normalize(text: &str) -> Option<String> {
    XmlDateTime::parse(text).map(|dt| dt.to_utc().to_xml())
}

/// Maps an Exif datetime (`YYYY:MM:DD HH:MM:SS` or `YYYY:MM:DD`) to XML.
///
/// This only swaps separators. Any other length gives [`XML_ZERO`].
///
/// ```
/// use metabag::datetime::exif_to_xml;
///
/// assert_eq!(exif_to_xml("2024:01:02 03:04:05"), "2024-01-02T03:04:05Z");
/// assert_eq!(exif_to_xml("2024:01:02"), "2024-01-02T00:00:00Z");
/// assert_eq!(exif_to_xml("yesterday"), "0000-00-00T00:00:00Z");
/// ```
pub fn exif_to_xml(exif: &str) -> String {
    if !exif.is_ascii() {
        log::warn!("Exif datetime `{exif}` isn't ASCII. Using the zero default.");
        return XML_ZERO.into();
    }

    match exif.len() {
        19 => format!(
            "{}-{}-{}T{}Z",
            &exif[0..4],
            &exif[5..7],
            &exif[8..10],
            &exif[11..19]
        ),
        10 => format!("{}-{}-{}T00:00:00Z", &exif[0..4], &exif[5..7], &exif[8..10]),
        other => {
            log::warn!("Exif datetime has length `{other}`. Using the zero default.");
            XML_ZERO.into()
        }
    }
}

/// Maps an XML datetime back to Exif.
///
/// Offset forms are moved to UTC first, since Exif has no zone.
pub fn xml_to_exif(xml: &str) -> String {
    if !xml.is_ascii() {
        log::warn!("XML datetime `{xml}` isn't ASCII. Using the zero default.");
        return EXIF_ZERO.into();
    }

    let positional = |s: &str| {
        format!(
            "{}:{}:{} {}",
            &s[0..4],
            &s[5..7],
            &s[8..10],
            &s[11..19]
        )
    };

    match xml.len() {
        19 | 20 => positional(xml),
        25 => match XmlDateTime::parse(xml) {
            Some(dt) => positional(&dt.to_utc().to_xml()),
            None => positional(xml),
        },
        10 => format!("{}:{}:{}", &xml[0..4], &xml[5..7], &xml[8..10]),
        other => {
            log::warn!("XML datetime has length `{other}`. Using the zero default.");
            EXIF_ZERO.into()
        }
    }
}

/// XMP datetimes share the Exif layout.
pub fn xmp_to_xml(xmp: &str) -> String {
    exif_to_xml(xmp)
}

/// XMP datetimes share the Exif layout.
pub fn xml_to_xmp(xml: &str) -> String {
    xml_to_exif(xml)
}

/// The date part of an IPTC pair, as `YYYY-MM-DDT`.
fn iptc_date_prefix(date: &str) -> String {
    match date.get(..8) {
        Some(d) if d.bytes().all(|b| b.is_ascii_digit()) => {
            format!("{}-{}-{}T", &d[0..4], &d[4..6], &d[6..8])
        }
        _ => {
            log::warn!("IPTC date `{date}` is unreadable. Using `{XML_DATE_ZERO}`.");
            XML_DATE_ZERO.into()
        }
    }
}

/// Combines an IPTC pair into one datetime, keeping its offset.
fn iptc_combine(date: &str, time: &str) -> XmlDateTime {
    let prefix = iptc_date_prefix(date);

    let mut input = time.get(..11).unwrap_or_default();
    let (hour, minute, second, offset) = match iptc_time(&mut input) {
        Ok(parsed) => parsed,
        Err(_) => {
            log::warn!("IPTC time `{time}` is unreadable. Using midnight UTC.");
            (0, 0, 0, 0)
        }
    };

    // the prefix came from ASCII digits (or the zero default)
    let mut dt = XmlDateTime::parse(&format!("{prefix}00:00:00Z")).unwrap_or(XmlDateTime {
        year: 0,
        month: 0,
        day: 0,
        hour: 0,
        minute: 0,
        second: 0,
        offset_minutes: None,
    });
    dt.hour = hour;
    dt.minute = minute;
    dt.second = second;
    dt.offset_minutes = Some(offset);
    dt
}

/// Joins an IPTC date (`YYYYMMDD`) and time (`HHMMSS±HHMM`), normalized to
/// UTC.
///
/// ```
/// use metabag::datetime::iptc_to_xml;
///
/// assert_eq!(iptc_to_xml("20240102", "030405+0100"), "2024-01-02T02:04:05Z");
/// ```
pub fn iptc_to_xml(date: &str, time: &str) -> String {
    iptc_combine(date, time).to_utc().to_xml()
}

/// Like [`iptc_to_xml`], but keeps the offset (the 25-character form).
pub fn iptc_to_xml_local(date: &str, time: &str) -> String {
    iptc_combine(date, time).to_xml()
}

/// Splits an XML datetime into an IPTC date and time.
///
/// The offset is kept as written. `Z` becomes `+0000`.
pub fn xml_to_iptc(xml: &str) -> (String, String) {
    let Some(dt) = XmlDateTime::parse(xml) else {
        log::warn!("XML datetime `{xml}` is unreadable. Using the IPTC zero pair.");
        return ("00000000".into(), "000000+0000".into());
    };

    let offset = dt.offset_minutes.unwrap_or(0);
    let sign = if offset < 0 { '-' } else { '+' };
    let abs = offset.unsigned_abs();

    (
        format!("{:04}{:02}{:02}", dt.year, dt.month, dt.day),
        format!(
            "{:02}{:02}{:02}{sign}{:02}{:02}",
            dt.hour,
            dt.minute,
            dt.second,
            abs / 60,
            abs % 60
        ),
    )
}

/// Joins a GPS date (`YYYY:MM:DD`) and time into an XML datetime.
///
/// The time is three numbers separated by `;` or `:`. Fractions are dropped,
/// and a field past its clock limit (hour 24, minute or second 60) is zero.
pub fn gps_to_xml(date: &str, time: &str) -> String {
    let prefix = match date.get(..10) {
        Some(d)
            if d.bytes()
                .enumerate()
                .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit()) =>
        {
            format!("{}-{}-{}T", &d[0..4], &d[5..7], &d[8..10])
        }
        _ => {
            log::warn!("GPS date `{date}` is unreadable. Using `{XML_DATE_ZERO}`.");
            XML_DATE_ZERO.into()
        }
    };

    let limits = [24.0, 60.0, 60.0];
    let mut fields = [0_u32; 3];
    for ((slot, field), limit) in fields.iter_mut().zip(time.split([';', ':'])).zip(limits) {
        // out-of-range and unreadable fields are zero
        *slot = field
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && *f >= 0.0 && *f < limit)
            .map_or(0, |f| f.floor() as u32);
    }
    let [hour, minute, second] = fields;

    format!("{prefix}{hour:02}:{minute:02}:{second:02}Z")
}

/// Splits an XML datetime into a GPS date and time, in UTC.
pub fn xml_to_gps(xml: &str, format: GpsTimeFormat) -> (String, String) {
    let sep = format.separator;
    let frac = if format.fractional_seconds { ".00" } else { "" };

    let Some(dt) = XmlDateTime::parse(xml).map(|dt| dt.to_utc()) else {
        log::warn!("XML datetime `{xml}` is unreadable. Using the GPS zero pair.");
        return ("0000:00:00".into(), format!("00{sep}00{sep}00{frac}"));
    };

    (
        format!("{:04}:{:02}:{:02}", dt.year, dt.month, dt.day),
        format!(
            "{:02}{sep}{:02}{sep}{:02}{frac}",
            dt.hour, dt.minute, dt.second
        ),
    )
}

/// Reads an XML datetime as a timestamp.
pub fn to_timestamp(xml: &str) -> Option<DateTime<Utc>> {
    XmlDateTime::parse(xml)?.to_timestamp()
}

/// Renders a timestamp as the canonical XML form.
pub fn from_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Gives the XML date prefix (`YYYY-MM-DDT`) of a datetime.
pub fn date_prefix(xml: &str) -> Option<String> {
    XmlDateTime::parse(xml).map(|dt| dt.date_prefix())
}
