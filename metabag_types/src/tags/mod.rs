//! Descriptors for every supported tag.
//!
//! Each tag is a `static` handle whose type says what kind of value it holds
//! (text, bounded integer, coordinate, ...), and whose fields carry the limits
//! that the engine enforces: maximum lengths, integer ranges, defaults, code
//! tables.
//!
//! The handles are grouped by block in the submodules. [`lookup`] finds a
//! handle from a `(Block, key)` pair for callers that only have strings.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::{Block, codes::CodeTableId};

pub mod exif;
pub mod gps;
pub mod iptc;
mod pseudo;
pub mod tiff;

pub use pseudo::PseudoTag;

/// No length limit on a text tag.
pub const UNBOUNDED: usize = usize::MAX;

/// The stable identity of a tag: its block and key.
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct TagDef {
    pub block: Block,
    pub key: &'static str,
}

impl TagDef {
    pub const fn new(block: Block, key: &'static str) -> Self {
        Self { block, key }
    }
}

impl core::fmt::Display for TagDef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.block, self.key)
    }
}

/// Free text, truncated to `max_len` characters on write.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextTag {
    pub def: TagDef,
    pub max_len: usize,
}

/// Characters permitted in a [`FixedTextTag`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Charset {
    /// `A-Z` only.
    UpperAlpha,

    /// `0-9`, `a-f`, `A-F`.
    Hex,

    /// ASCII letters.
    Alpha,
}

impl Charset {
    pub fn allows(&self, c: char) -> bool {
        match self {
            Charset::UpperAlpha => c.is_ascii_uppercase(),
            Charset::Hex => c.is_ascii_hexdigit(),
            Charset::Alpha => c.is_ascii_alphabetic(),
        }
    }
}

/// A coded string with a fixed length range and character set.
///
/// Anything else is refused on write.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedTextTag {
    pub def: TagDef,
    pub min_len: usize,
    pub max_len: usize,
    pub charset: Charset,
}

/// A signed integer with a declared range and default.
///
/// Out-of-range values are replaced with `default`, unless the tag is
/// `strict`, in which case writes outside the range are refused.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LongTag {
    pub def: TagDef,
    pub min: i64,
    pub max: i64,
    pub default: i64,
    pub strict: bool,
}

/// A real number, clamped into `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RealTag {
    pub def: TagDef,
    pub min: f64,
    pub max: f64,
}

/// A `;`-joined list of strings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextListTag {
    pub def: TagDef,

    /// Limit for each element, not the whole list.
    pub max_len: usize,
}

/// Integer width of a [`LongListTag`]'s elements.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum IntWidth {
    U8,
    U16,
    U32,
}

/// A `;`-joined list of integers of one width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LongListTag {
    pub def: TagDef,
    pub width: IntWidth,
}

/// A `;`-joined list of reals, optionally of a fixed count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RealListTag {
    pub def: TagDef,
    pub count: Option<usize>,
}

/// Which standard a datetime tag's split form follows at the bridge.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum DateTimeStyle {
    /// `YYYYMMDD` + `HHMMSS±HHMM`.
    Iptc,

    /// `YYYY:MM:DD HH:MM:SS`.
    Exif,

    /// `YYYY:MM:DD` + `H;M;S`.
    Gps,
}

/// A datetime, stored as an XML datetime string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DateTimeTag {
    pub def: TagDef,
    pub style: DateTimeStyle,
}

/// Opaque bytes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlobTag {
    pub def: TagDef,

    /// Always use Base64, even for blobs of eight bytes or fewer.
    pub force_base64: bool,
}

/// A legacy letter code validated against a code table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CodedTag {
    pub def: TagDef,
    pub table: CodeTableId,
}

/// The Exif `Flash` bit field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlashTag {
    pub def: TagDef,
}

/// `SubjectArea` or `SubjectLocation`: a point, circle or rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubjectAreaTag {
    pub def: TagDef,
}

/// How a four-part version number is written.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum VersionStyle {
    /// `0220`, as used by `ExifVersion` and `FlashpixVersion`.
    Packed,

    /// `2.2.0.0`, as used by `GPSVersionID`.
    Dotted,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VersionTag {
    pub def: TagDef,
    pub style: VersionStyle,
}

/// Whether a coordinate runs north/south or east/west.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

/// A GPS coordinate, stored in XMP form (`D,M,S<dir>`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateTag {
    pub def: TagDef,
    pub axis: Axis,
}

// const constructors to keep the tag lists readable
impl TextTag {
    pub const fn new(block: Block, key: &'static str, max_len: usize) -> Self {
        Self {
            def: TagDef::new(block, key),
            max_len,
        }
    }
}

impl FixedTextTag {
    pub const fn new(
        block: Block,
        key: &'static str,
        min_len: usize,
        max_len: usize,
        charset: Charset,
    ) -> Self {
        Self {
            def: TagDef::new(block, key),
            min_len,
            max_len,
            charset,
        }
    }
}

impl LongTag {
    /// Out-of-range writes are replaced with `default`.
    pub const fn lenient(block: Block, key: &'static str, min: i64, max: i64, default: i64) -> Self {
        Self {
            def: TagDef::new(block, key),
            min,
            max,
            default,
            strict: false,
        }
    }

    /// Out-of-range writes are refused.
    pub const fn strict(block: Block, key: &'static str, min: i64, max: i64, default: i64) -> Self {
        Self {
            def: TagDef::new(block, key),
            min,
            max,
            default,
            strict: true,
        }
    }
}

impl RealTag {
    pub const fn new(block: Block, key: &'static str, min: f64, max: f64) -> Self {
        Self {
            def: TagDef::new(block, key),
            min,
            max,
        }
    }

    /// No lower or upper bound.
    pub const fn unbounded(block: Block, key: &'static str) -> Self {
        Self::new(block, key, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Zero or more.
    pub const fn non_negative(block: Block, key: &'static str) -> Self {
        Self::new(block, key, 0.0, f64::INFINITY)
    }
}

impl TextListTag {
    pub const fn new(block: Block, key: &'static str, max_len: usize) -> Self {
        Self {
            def: TagDef::new(block, key),
            max_len,
        }
    }
}

impl LongListTag {
    pub const fn new(block: Block, key: &'static str, width: IntWidth) -> Self {
        Self {
            def: TagDef::new(block, key),
            width,
        }
    }
}

impl RealListTag {
    pub const fn new(block: Block, key: &'static str, count: Option<usize>) -> Self {
        Self {
            def: TagDef::new(block, key),
            count,
        }
    }
}

impl DateTimeTag {
    pub const fn new(block: Block, key: &'static str, style: DateTimeStyle) -> Self {
        Self {
            def: TagDef::new(block, key),
            style,
        }
    }
}

impl BlobTag {
    pub const fn new(block: Block, key: &'static str, force_base64: bool) -> Self {
        Self {
            def: TagDef::new(block, key),
            force_base64,
        }
    }
}

impl CodedTag {
    pub const fn new(block: Block, key: &'static str, table: CodeTableId) -> Self {
        Self {
            def: TagDef::new(block, key),
            table,
        }
    }
}

impl VersionTag {
    pub const fn new(block: Block, key: &'static str, style: VersionStyle) -> Self {
        Self {
            def: TagDef::new(block, key),
            style,
        }
    }
}

impl CoordinateTag {
    pub const fn new(block: Block, key: &'static str, axis: Axis) -> Self {
        Self {
            def: TagDef::new(block, key),
            axis,
        }
    }
}

/// Any tag handle. The variant is the tag's kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnyTag {
    Text(&'static TextTag),
    FixedText(&'static FixedTextTag),
    Long(&'static LongTag),
    Real(&'static RealTag),
    TextList(&'static TextListTag),
    LongList(&'static LongListTag),
    RealList(&'static RealListTag),
    DateTime(&'static DateTimeTag),
    Blob(&'static BlobTag),
    Coded(&'static CodedTag),
    Flash(&'static FlashTag),
    SubjectArea(&'static SubjectAreaTag),
    Version(&'static VersionTag),
    Coordinate(&'static CoordinateTag),
}

impl AnyTag {
    /// The tag's block and key.
    pub fn def(&self) -> TagDef {
        match self {
            AnyTag::Text(t) => t.def,
            AnyTag::FixedText(t) => t.def,
            AnyTag::Long(t) => t.def,
            AnyTag::Real(t) => t.def,
            AnyTag::TextList(t) => t.def,
            AnyTag::LongList(t) => t.def,
            AnyTag::RealList(t) => t.def,
            AnyTag::DateTime(t) => t.def,
            AnyTag::Blob(t) => t.def,
            AnyTag::Coded(t) => t.def,
            AnyTag::Flash(t) => t.def,
            AnyTag::SubjectArea(t) => t.def,
            AnyTag::Version(t) => t.def,
            AnyTag::Coordinate(t) => t.def,
        }
    }

    /// Pseudo-tags that project out of this tag, if it's a composite.
    pub fn pseudo_tags(&self) -> &'static [PseudoTag] {
        match self {
            AnyTag::Flash(_) => PseudoTag::FLASH,
            AnyTag::Coordinate(_) => PseudoTag::COORDINATE,
            _ => &[],
        }
    }

    /// Whether the tag holds more than one value.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            AnyTag::TextList(_)
                | AnyTag::LongList(_)
                | AnyTag::RealList(_)
                | AnyTag::SubjectArea(_)
        )
    }
}

/// A `(Block, key)` pair used as the registry key.
#[derive(Hash, PartialEq, Eq)]
pub struct TagId(pub (Block, &'static str));

// lets the registry be searched with a borrowed `(Block, &str)` of any
// lifetime.
impl<'a> core::borrow::Borrow<(Block, &'a str)> for TagId {
    fn borrow(&self) -> &(Block, &'a str) {
        &self.0
    }
}

/// Every tag, keyed by block and key.
pub static REGISTRY: LazyLock<FxHashMap<TagId, AnyTag>> = LazyLock::new(|| {
    let mut m: FxHashMap<TagId, AnyTag> = FxHashMap::default();

    for tag in all() {
        let def = tag.def();
        let replaced = m.insert(TagId((def.block, def.key)), tag);
        debug_assert!(replaced.is_none(), "duplicate tag: {def}");
    }

    m
});

/// Iterates over every supported tag.
pub fn all() -> impl Iterator<Item = AnyTag> {
    iptc::ALL
        .iter()
        .chain(tiff::ALL)
        .chain(exif::ALL)
        .chain(gps::ALL)
        .copied()
}

/// Finds a tag from its block and key.
///
/// Keys are matched exactly.
pub fn lookup(block: Block, key: &str) -> Option<AnyTag> {
    REGISTRY.get(&(block, key)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_is_registered_once() {
        let count = all().count();
        assert_eq!(REGISTRY.len(), count, "no duplicate (block, key) pairs");
        assert!(count >= 150, "about 150 tags. got: {count}");
    }

    #[test]
    fn tags_live_in_their_own_block() {
        for (list, block) in [
            (iptc::ALL, Block::Iptc),
            (tiff::ALL, Block::Tiff),
            (exif::ALL, Block::Exif),
            (gps::ALL, Block::Gps),
        ] {
            for tag in list {
                assert_eq!(tag.def().block, block, "{} is misfiled", tag.def());
            }
        }
    }

    #[test]
    fn lookup_by_borrowed_key() {
        let key = String::from("Urgency");
        assert_eq!(
            lookup(Block::Iptc, &key),
            Some(AnyTag::Long(&iptc::URGENCY))
        );
        assert_eq!(lookup(Block::Tiff, &key), None, "wrong block");
        assert_eq!(lookup(Block::Iptc, "urgency"), None, "keys are exact");
    }

    #[test]
    fn composites_know_their_pseudo_tags() {
        assert_eq!(
            AnyTag::Flash(&exif::FLASH).pseudo_tags(),
            PseudoTag::FLASH
        );
        assert_eq!(
            AnyTag::Coordinate(&gps::LATITUDE).pseudo_tags(),
            PseudoTag::COORDINATE
        );
        assert!(AnyTag::Long(&iptc::URGENCY).pseudo_tags().is_empty());
    }
}
