//! Four-part version numbers.
//!
//! `ExifVersion` and `FlashpixVersion` write one digit per part (`0220`).
//! `GPSVersionID` writes dotted parts (`2.2.0.0`).

use metabag_types::tags::VersionStyle;

/// Reads either convention into exactly four parts.
///
/// Extra parts are dropped, and missing ones are zero. So are unreadable
/// ones.
///
/// ```
/// use metabag::codec::version::decode;
///
/// assert_eq!(decode("0220"), [0, 2, 2, 0]);
/// assert_eq!(decode("2.2"), [2, 2, 0, 0]);
/// ```
pub fn decode(text: &str) -> [u8; 4] {
    let text = text.trim();
    let mut parts = [0_u8; 4];

    if text.contains('.') {
        for (slot, part) in parts.iter_mut().zip(text.split('.')) {
            *slot = part.trim().parse().unwrap_or(0);
        }
    } else {
        for (slot, c) in parts.iter_mut().zip(text.chars()) {
            *slot = c.to_digit(10).map_or(0, |d| d as u8);
        }
    }

    parts
}

/// Writes four parts in the given convention.
///
/// Packed parts are single digits, so anything above 9 is written as 9.
pub fn encode(parts: [u8; 4], style: VersionStyle) -> String {
    match style {
        VersionStyle::Packed => parts.iter().map(|p| p.min(&9).to_string()).collect(),
        VersionStyle::Dotted => parts
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join("."),
    }
}

/// Reads in one convention and writes in the other (or the same).
pub fn convert(text: &str, style: VersionStyle) -> String {
    encode(decode(text), style)
}

#[cfg(test)]
mod tests {
    use metabag_types::tags::VersionStyle;

    use super::{convert, decode, encode};

    #[test]
    fn always_four_parts() {
        assert_eq!(decode("0220"), [0, 2, 2, 0]);
        assert_eq!(decode("02201"), [0, 2, 2, 0], "truncated");
        assert_eq!(decode("02"), [0, 2, 0, 0], "padded");
        assert_eq!(decode("2.2.0.0"), [2, 2, 0, 0]);
        assert_eq!(decode("2.3.0.0.7"), [2, 3, 0, 0]);
        assert_eq!(decode("1.x.3"), [1, 0, 3, 0]);
        assert_eq!(decode(""), [0; 4]);
    }

    #[test]
    fn conventions() {
        assert_eq!(encode([0, 2, 3, 0], VersionStyle::Packed), "0230");
        assert_eq!(encode([2, 2, 0, 0], VersionStyle::Dotted), "2.2.0.0");
        assert_eq!(encode([12, 0, 0, 0], VersionStyle::Packed), "9000");

        assert_eq!(convert("0220", VersionStyle::Dotted), "0.2.2.0");
        assert_eq!(convert("2.2.0.0", VersionStyle::Packed), "2200");
    }
}
