//! Base64 for blob-valued tags.
//!
//! The alphabet and padding come from RFC 2045. On top of the `base64`
//! engine, this module adds the MIME-style line wrapping and the whitespace
//! rules that native metadata trees expect.

use base64::{
    DecodeError, Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

/// Output characters per line (15 quadruplets).
pub const LINE_LEN: usize = 60;

const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical)
        .with_decode_allow_trailing_bits(true),
);

/// How whitespace in encoded text is treated.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum Base64Mode {
    /// Whitespace anywhere is dropped.
    #[default]
    Tolerant,

    /// Single line breaks or spaces between characters are fine, but runs of
    /// them (and any leading or trailing whitespace) are refused.
    ///
    /// `\r\n` counts as one character.
    Strict,
}

/// A failure to decode Base64 text. Decoding never returns partial output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Base64Error {
    /// With whitespace removed, the length wasn't a multiple of four.
    BadLength { len: usize },

    /// `=` showed up somewhere other than the final one or two positions.
    MisplacedPadding { at: usize },

    /// Strict mode found a whitespace run, or whitespace at either end.
    BadWhitespace { at: usize },

    /// A character outside the alphabet.
    InvalidSymbol { at: usize, symbol: u8 },
}

impl core::fmt::Display for Base64Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Base64Error::BadLength { len } => {
                write!(f, "Base64 text of length `{len}` isn't made of quadruplets.")
            }
            Base64Error::MisplacedPadding { at } => {
                write!(f, "Found padding at `{at}`, before the final quadruplet's end.")
            }
            Base64Error::BadWhitespace { at } => {
                write!(f, "Whitespace at `{at}` isn't allowed in strict mode.")
            }
            Base64Error::InvalidSymbol { at, symbol } => {
                write!(f, "Byte `{symbol:#04x}` at `{at}` isn't in the Base64 alphabet.")
            }
        }
    }
}

impl core::error::Error for Base64Error {}

/// Encodes bytes, breaking lines every [`LINE_LEN`] characters.
///
/// There's no newline after the last line.
///
/// ```
/// assert_eq!(metabag::b64::encode(b"Man"), "TWFu");
/// assert_eq!(metabag::b64::encode(&[]), "");
/// ```
pub fn encode(bytes: &[u8]) -> String {
    let flat: String = ENGINE.encode(bytes);

    let mut out: String = String::with_capacity(flat.len() + flat.len() / LINE_LEN);
    for (i, c) in flat.chars().enumerate() {
        if i > 0 && i % LINE_LEN == 0 {
            out.push('\n');
        }
        out.push(c);
    }

    out
}

/// Decodes text produced by [`encode`] (or any RFC 2045 encoder).
pub fn decode(text: &str, mode: Base64Mode) -> Result<Vec<u8>, Base64Error> {
    if mode == Base64Mode::Strict {
        check_whitespace(text)?;
    }

    let stripped: Vec<u8> = text
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    if stripped.is_empty() {
        return Ok(Vec::new());
    }

    if stripped.len() % 4 != 0 {
        log::debug!("Base64 text has `{}` significant characters.", stripped.len());
        return Err(Base64Error::BadLength {
            len: stripped.len(),
        });
    }

    // padding may only fill the last one or two slots, and `x=y=` is no good
    let len = stripped.len();
    if let Some(at) = stripped.iter().position(|b| *b == b'=') {
        let only_tail = at >= len - 2 && stripped[at..].iter().all(|b| *b == b'=');
        if !only_tail {
            return Err(Base64Error::MisplacedPadding { at });
        }
    }

    ENGINE.decode(&stripped).map_err(|e| match e {
        DecodeError::InvalidByte(at, symbol) => Base64Error::InvalidSymbol { at, symbol },
        DecodeError::InvalidLastSymbol(at, symbol) => Base64Error::InvalidSymbol { at, symbol },
        DecodeError::InvalidLength(len) => Base64Error::BadLength { len },
        DecodeError::InvalidPadding => Base64Error::MisplacedPadding { at: len - 1 },
    })
}

/// Strict mode: no whitespace at the ends, and no runs of it in the middle.
fn check_whitespace(text: &str) -> Result<(), Base64Error> {
    let bytes = text.as_bytes();

    if bytes.first().is_some_and(u8::is_ascii_whitespace) {
        return Err(Base64Error::BadWhitespace { at: 0 });
    }
    if bytes.last().is_some_and(u8::is_ascii_whitespace) {
        return Err(Base64Error::BadWhitespace {
            at: bytes.len() - 1,
        });
    }

    let mut run = 0_usize;
    let mut prev = 0_u8;
    for (at, &b) in bytes.iter().enumerate() {
        if !b.is_ascii_whitespace() {
            run = 0;
        } else if !(b == b'\n' && prev == b'\r') {
            run += 1;
            if run > 1 {
                return Err(Base64Error::BadWhitespace { at });
            }
        }
        prev = b;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Base64Error, Base64Mode, LINE_LEN, decode, encode};
    use crate::util::logger;

    #[test]
    fn known_vectors() {
        logger();

        for (raw, encoded) in [
            (&b""[..], ""),
            (b"f", "Zg=="),
            (b"fo", "Zm8="),
            (b"foo", "Zm9v"),
            (b"foob", "Zm9vYg=="),
            (b"fooba", "Zm9vYmE="),
            (b"foobar", "Zm9vYmFy"),
        ] {
            assert_eq!(encode(raw), encoded);
            assert_eq!(decode(encoded, Base64Mode::Strict), Ok(raw.to_vec()));
        }
    }

    #[test]
    fn wraps_every_fifteen_quadruplets() {
        logger();

        // 45 bytes -> exactly one full line
        let one_line = encode(&[0xAB; 45]);
        assert_eq!(one_line.len(), LINE_LEN);
        assert!(!one_line.contains('\n'));

        // one more byte spills onto a second line, with no trailing newline
        let two_lines = encode(&[0xAB; 46]);
        let lines: Vec<&str> = two_lines.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), LINE_LEN);
        assert_eq!(lines[1], "qw==");

        assert_eq!(decode(&two_lines, Base64Mode::Strict), Ok(vec![0xAB; 46]));
    }

    #[test]
    fn tolerant_mode_drops_all_whitespace() {
        assert_eq!(
            decode("  Zm9v \n\n\t YmFy  ", Base64Mode::Tolerant),
            Ok(b"foobar".to_vec())
        );
    }

    #[test]
    fn strict_mode_refuses_whitespace_runs() {
        assert_eq!(
            decode("Zm9v\r\nYmFy", Base64Mode::Strict),
            Ok(b"foobar".to_vec()),
            "CRLF is one break"
        );
        assert_eq!(
            decode("Zm9v\n\nYmFy", Base64Mode::Strict),
            Err(Base64Error::BadWhitespace { at: 5 })
        );
        assert_eq!(
            decode(" Zm9v", Base64Mode::Strict),
            Err(Base64Error::BadWhitespace { at: 0 })
        );
        assert_eq!(
            decode("Zm9v\n", Base64Mode::Strict),
            Err(Base64Error::BadWhitespace { at: 4 })
        );
    }

    #[test]
    fn structural_failures() {
        assert_eq!(
            decode("Zm9", Base64Mode::Tolerant),
            Err(Base64Error::BadLength { len: 3 })
        );
        assert_eq!(
            decode("Z=9v", Base64Mode::Tolerant),
            Err(Base64Error::MisplacedPadding { at: 1 })
        );
        assert_eq!(
            decode("Zm=v", Base64Mode::Tolerant),
            Err(Base64Error::MisplacedPadding { at: 2 })
        );
        assert!(matches!(
            decode("Zm9*", Base64Mode::Tolerant),
            Err(Base64Error::InvalidSymbol { at: 3, .. })
        ));
    }
}
