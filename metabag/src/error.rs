//! Errors for refused writes.
//!
//! Only writes fail. Reads that find nothing usable give `None` instead.

use metabag_types::{Block, tags::TagDef};

/// The result of a write through the façade.
///
/// `Ok(())` means the bag now reflects the write (which may have been a
/// removal). Any `Err` means the bag wasn't touched.
pub type MetaResult<T> = Result<T, MetaError>;

/// A reason a write was refused.
///
/// Reads never produce these: a missing tag is just `None`, and an
/// out-of-range integer is quietly replaced with the tag's default.
#[derive(Clone, Debug, PartialEq)]
pub enum MetaError {
    /// No tag with this key exists in the block.
    UnknownTag { block: Block, key: String },

    /// The tag exists, but has no pseudo-tag with this name.
    UnknownPseudoTag { tag: TagDef, pseudo: String },

    /// The value didn't pass the tag's validation.
    InvalidValue { tag: TagDef, reason: InvalidReason },
}

/// Why a value was invalid for its tag.
#[derive(Clone, Debug, PartialEq)]
pub enum InvalidReason {
    /// Expected a number, but couldn't parse one.
    NotANumber(String),

    /// A strict integer tag got a value outside its range.
    OutOfRange { value: i64, min: i64, max: i64 },

    /// A list element doesn't fit the tag's integer width.
    TooWide { value: i64 },

    /// A fixed-length code had the wrong length.
    BadLength { len: usize, min: usize, max: usize },

    /// A fixed-length code had a character outside its charset.
    BadCharacter(char),

    /// The code isn't in the tag's code table.
    UnknownCode(String),

    /// The text isn't an XML (or Exif) datetime.
    BadDateTime(String),

    /// A list had the wrong number of elements.
    BadCount { got: usize },

    /// A coordinate couldn't be parsed, or its direction doesn't fit its axis.
    BadCoordinate(String),

    /// The blob text was neither Base64 nor a small-integer list.
    BadBlob,

    /// Reals must not be NaN.
    NotFinite,

    /// A nested native value was given for a tag that isn't a composite.
    UnexpectedNested,
}

impl core::fmt::Display for MetaError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MetaError::UnknownTag { block, key } => {
                write!(f, "No tag `{key}` exists in the {block} block.")
            }
            MetaError::UnknownPseudoTag { tag, pseudo } => {
                write!(f, "Tag `{tag}` has no pseudo-tag named `{pseudo}`.")
            }
            MetaError::InvalidValue { tag, reason } => {
                write!(f, "Refused to write `{tag}`: {reason}")
            }
        }
    }
}

impl core::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InvalidReason::NotANumber(text) => write!(f, "`{text}` is not a number."),
            InvalidReason::OutOfRange { value, min, max } => {
                write!(f, "`{value}` is outside the range `{min}..={max}`.")
            }
            InvalidReason::TooWide { value } => {
                write!(f, "`{value}` doesn't fit the tag's integer width.")
            }
            InvalidReason::BadLength { len, min, max } => write!(
                f,
                "length `{len}` is outside the permitted `{min}..={max}` characters."
            ),
            InvalidReason::BadCharacter(c) => write!(f, "character `{c}` isn't permitted."),
            InvalidReason::UnknownCode(code) => write!(f, "`{code}` isn't a known code."),
            InvalidReason::BadDateTime(text) => write!(f, "`{text}` is not a datetime."),
            InvalidReason::BadCount { got } => {
                write!(f, "a list of `{got}` elements has the wrong shape.")
            }
            InvalidReason::BadCoordinate(text) => write!(f, "`{text}` is not a coordinate."),
            InvalidReason::BadBlob => f.write_str("the text couldn't be decoded as a blob."),
            InvalidReason::NotFinite => f.write_str("the value is NaN."),
            InvalidReason::UnexpectedNested => {
                f.write_str("a nested value can't be stored in this tag.")
            }
        }
    }
}

impl core::error::Error for MetaError {}
