//! Degrees-minutes-seconds coordinates.
//!
//! Coordinates are stored in the XMP form, `D,M,S<dir>`, like `10,54,0N`.
//! Exif splits the same thing into `D;M;S` plus a one-letter reference tag.

use metabag_types::tags::{Axis, PseudoTag};

/// Seconds at or below this are treated as zero.
const SECOND_EPSILON: f64 = 1e-5;

/// Normalizes degrees, minutes and seconds.
///
/// The parts are summed into one (absolute) angle, then split back out.
/// Minutes are rounded to the nearest whole minute, and whatever remainder
/// is left at or below [`SECOND_EPSILON`] (a negative one included) becomes
/// zero seconds. A minute of 60 carries into the degree.
fn normalize(degree: f64, minute: f64, second: f64) -> (f64, f64, f64) {
    let total = degree.abs() + minute.abs() / 60.0 + second.abs() / 3600.0;

    let mut degree = total.floor();
    let minutes = (total - degree) * 60.0;

    let mut minute = (minutes + 0.5).floor();
    let mut second = (minutes - minute) * 60.0;

    if second <= SECOND_EPSILON {
        second = 0.0;
    }

    if minute >= 60.0 {
        degree += 1.0;
        minute -= 60.0;
    }

    (degree, minute, second)
}

/// Splits `text` on `separator` into degrees, minutes and seconds, then
/// normalizes them.
///
/// Missing or unreadable fields count as zero.
///
/// ```
/// use metabag::gps::scan_coords;
///
/// assert_eq!(scan_coords("10,54,0", ','), (10.0, 54.0, 0.0));
/// assert_eq!(scan_coords("10.9", ','), (10.0, 54.0, 0.0));
/// ```
pub fn scan_coords(text: &str, separator: char) -> (f64, f64, f64) {
    let mut fields = [0.0_f64; 3];
    for (slot, field) in fields.iter_mut().zip(text.split(separator)) {
        *slot = field
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .unwrap_or(0.0);
    }

    let [d, m, s] = fields;
    normalize(d, m, s)
}

/// Renders a normalized coordinate.
///
/// Degrees and minutes are two-digit, zero-padded. Seconds keep up to four
/// significant digits.
///
/// ```
/// use metabag::gps::format_coords;
///
/// assert_eq!(format_coords(10.0, 54.0, 0.0, ','), "10,54,0");
/// ```
pub fn format_coords(degree: f64, minute: f64, second: f64, separator: char) -> String {
    let (degree, minute, second) = normalize(degree, minute, second);
    format!(
        "{:02}{separator}{:02}{separator}{}",
        degree as u32,
        minute as u32,
        format_seconds(second)
    )
}

/// Four significant digits, trailing zeros trimmed.
fn format_seconds(second: f64) -> String {
    if second == 0.0 {
        return "0".into();
    }

    let magnitude = second.abs().log10().floor() as i32 + 1;
    let decimals = (4 - magnitude).max(0) as usize;

    let text = format!("{second:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').into()
    } else {
        text
    }
}

/// A hemisphere.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Reads a direction letter, ignoring case.
    ///
    /// The letter must fit the axis: `N`/`S` for latitude, `E`/`W` for
    /// longitude.
    pub fn from_letter(letter: char, axis: Axis) -> Option<Self> {
        match (letter.to_ascii_uppercase(), axis) {
            ('N', Axis::Latitude) => Some(Direction::North),
            ('S', Axis::Latitude) => Some(Direction::South),
            ('E', Axis::Longitude) => Some(Direction::East),
            ('W', Axis::Longitude) => Some(Direction::West),
            _ => None,
        }
    }

    pub const fn letter(&self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        }
    }

    pub const fn axis(&self) -> Axis {
        match self {
            Direction::North | Direction::South => Axis::Latitude,
            Direction::East | Direction::West => Axis::Longitude,
        }
    }

    /// North and east are positive.
    pub const fn is_positive(&self) -> bool {
        matches!(self, Direction::North | Direction::East)
    }
}

/// A coordinate with its direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub degree: f64,
    pub minute: f64,
    pub second: f64,
    pub direction: Direction,
}

impl Coordinate {
    /// Builds a normalized coordinate.
    pub fn new(degree: f64, minute: f64, second: f64, direction: Direction) -> Self {
        let (degree, minute, second) = normalize(degree, minute, second);
        Self {
            degree,
            minute,
            second,
            direction,
        }
    }

    /// Parses the stored form, `D,M,S<dir>`.
    ///
    /// ```
    /// use metabag::gps::{Coordinate, Direction};
    /// use metabag::tags::Axis;
    ///
    /// let c = Coordinate::parse("10,54,0N", Axis::Latitude).unwrap();
    /// assert_eq!((c.degree, c.minute, c.second), (10.0, 54.0, 0.0));
    /// assert_eq!(c.direction, Direction::North);
    ///
    /// assert!(Coordinate::parse("10,54,0E", Axis::Latitude).is_none());
    /// ```
    pub fn parse(text: &str, axis: Axis) -> Option<Self> {
        let text = text.trim();
        let letter = text.chars().last()?;

        let Some(direction) = Direction::from_letter(letter, axis) else {
            log::debug!("`{letter}` isn't a direction on the {axis:?} axis.");
            return None;
        };

        let (degree, minute, second) = scan_coords(&text[..text.len() - letter.len_utf8()], ',');
        Some(Self {
            degree,
            minute,
            second,
            direction,
        })
    }

    /// Whether every part is a real number.
    pub fn is_finite(&self) -> bool {
        self.degree.is_finite() && self.minute.is_finite() && self.second.is_finite()
    }

    /// Renders the stored form.
    pub fn to_xmp(&self) -> String {
        let mut out = format_coords(self.degree, self.minute, self.second, ',');
        out.push(self.direction.letter());
        out
    }

    /// Signed decimal degrees. South and west are negative.
    pub fn to_decimal(&self) -> f64 {
        let abs = self.degree + self.minute / 60.0 + self.second / 3600.0;
        if self.direction.is_positive() { abs } else { -abs }
    }

    /// Builds a coordinate from signed decimal degrees.
    pub fn from_decimal(value: f64, axis: Axis) -> Self {
        let direction = match (axis, value < 0.0) {
            (Axis::Latitude, false) => Direction::North,
            (Axis::Latitude, true) => Direction::South,
            (Axis::Longitude, false) => Direction::East,
            (Axis::Longitude, true) => Direction::West,
        };

        Self::new(value, 0.0, 0.0, direction)
    }

    /// Reads one pseudo-tag out of the coordinate.
    pub fn project(&self, pseudo: PseudoTag) -> Option<String> {
        let (degree, minute, second) = normalize(self.degree, self.minute, self.second);
        Some(match pseudo {
            PseudoTag::Deg => format!("{}", degree as u32),
            PseudoTag::Min => format!("{}", minute as u32),
            PseudoTag::Sec => format_seconds(second),
            PseudoTag::Dir => self.direction.letter().to_string(),
            _ => return None,
        })
    }

    /// Replaces one pseudo-tag, then renormalizes.
    ///
    /// Gives `None` if the text doesn't fit the field.
    pub fn with(&self, pseudo: PseudoTag, text: &str) -> Option<Self> {
        let text = text.trim();
        let number = || text.parse::<f64>().ok().filter(|f| f.is_finite() && *f >= 0.0);

        let mut c = *self;
        match pseudo {
            PseudoTag::Deg => c.degree = number()?,
            PseudoTag::Min => c.minute = number()?,
            PseudoTag::Sec => c.second = number()?,
            PseudoTag::Dir => {
                let mut chars = text.chars();
                let (Some(letter), None) = (chars.next(), chars.next()) else {
                    return None;
                };
                c.direction = Direction::from_letter(letter, self.direction.axis())?;
            }
            _ => return None,
        }

        Some(Self::new(c.degree, c.minute, c.second, c.direction))
    }
}

/// Joins the Exif split form into the XMP form.
///
/// Only the separators change. Gives `None` if `reference` is empty.
///
/// ```
/// use metabag::gps::exif_to_xmp;
///
/// assert_eq!(exif_to_xmp("10;54;0", "n").as_deref(), Some("10,54,0N"));
/// ```
pub fn exif_to_xmp(value: &str, reference: &str) -> Option<String> {
    let letter = reference.trim().chars().next()?.to_ascii_uppercase();

    let mut out = value.trim().replace(';', ",");
    out.push(letter);
    Some(out)
}

/// Splits the XMP form into the Exif value and reference letter.
pub fn xmp_to_exif(xmp: &str) -> Option<(String, char)> {
    let xmp = xmp.trim();
    let letter = xmp.chars().last()?;
    let letter = letter.to_ascii_uppercase();

    if !matches!(letter, 'N' | 'S' | 'E' | 'W') {
        log::debug!("Coordinate `{xmp}` has no direction letter.");
        return None;
    }

    let value = &xmp[..xmp.len() - 1];
    Some((value.replace(',', ";"), letter))
}
