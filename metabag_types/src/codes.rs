//! Legacy single/double-character codes and the enumerations they stand for.
//!
//! IPTC and the GPS IFD both encode several small enumerations as one-letter
//! strings. Each table in here maps those letters to a semantic enum (and its
//! integer value) and back.
//!
//! Tables are built on first use and shared by the whole process. A lookup
//! miss is just `None` - unknown codes show up in real files all the time.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

/// A bidirectional mapping between legacy codes and semantic values.
#[derive(Debug)]
pub struct CodeTable<T: 'static> {
    by_code: FxHashMap<&'static str, T>,
    by_number: FxHashMap<i64, &'static str>,
}

impl<T: Copy + Into<i64>> CodeTable<T> {
    fn new(pairs: &[(&'static str, T)]) -> Self {
        let mut by_code = FxHashMap::default();
        let mut by_number = FxHashMap::default();

        for &(code, value) in pairs {
            by_code.insert(code, value);
            by_number.insert(value.into(), code);
        }

        Self { by_code, by_number }
    }

    /// Finds the value for a code. Codes are case-sensitive.
    pub fn value(&self, code: &str) -> Option<T> {
        self.by_code.get(code).copied()
    }

    /// Finds the code for a semantic integer.
    pub fn code(&self, number: i64) -> Option<&'static str> {
        self.by_number.get(&number).copied()
    }

    /// How many codes this table knows.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Whether the table is empty. (It never is.)
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

/// Declares a code enum alongside its lazily-built table.
macro_rules! code_table {
    ($(
        $(#[$enum_meta:meta])*
        $name:ident in $table:ident {
            $( $(#[$variant_meta:meta])* $variant:ident = $number:literal => $code:literal, )+
        }
    )+) => {
        $(
            $(#[$enum_meta])*
            #[repr(u8)]
            #[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
            pub enum $name {
                $( $(#[$variant_meta])* $variant = $number, )+
            }

            #[doc = concat!("Lookup table for [`", stringify!($name), "`].")]
            pub static $table: LazyLock<CodeTable<$name>> =
                LazyLock::new(|| CodeTable::new(&[$( ($code, $name::$variant), )+]));

            impl $name {
                /// Parses a legacy code into this value.
                pub fn from_code(code: &str) -> Option<Self> {
                    $table.value(code)
                }

                /// The legacy code for this value.
                pub const fn code(&self) -> &'static str {
                    match self {
                        $( $name::$variant => $code, )+
                    }
                }
            }

            impl From<$name> for i64 {
                fn from(value: $name) -> i64 {
                    value as i64
                }
            }

            impl TryFrom<i64> for $name {
                type Error = ();

                fn try_from(value: i64) -> Result<Self, Self::Error> {
                    match value {
                        $( $number => Ok($name::$variant), )+
                        _ => Err(()),
                    }
                }
            }
        )+
    };
}

code_table! {
    /// IPTC 2:75, when the object is available.
    ObjectCycle in OBJECT_CYCLE {
        Morning = 1 => "a",
        Evening = 2 => "p",
        Both = 3 => "b",
    }

    /// IPTC 2:130, second character: the colour composition of the image.
    ColourComposition in COLOUR_COMPOSITION {
        Monochrome = 1 => "W",
        Yellow = 2 => "Y",
        Magenta = 3 => "M",
        Cyan = 4 => "C",
        Black = 5 => "K",
        Red = 6 => "R",
        Green = 7 => "G",
        Blue = 8 => "B",
        FrameSequential = 9 => "F",
        LineSequential = 10 => "L",
        PixelSequential = 11 => "P",
        SpecialInterleaving = 12 => "S",
    }

    /// IPTC 2:131.
    ImageOrientation in IMAGE_ORIENTATION {
        Landscape = 1 => "L",
        Portrait = 2 => "P",
        Square = 3 => "S",
    }

    /// `GPSStatus`: whether the receiver had a fix.
    GpsStatus in GPS_STATUS {
        /// Measurement in progress.
        Active = 1 => "A",
        /// Measurement interoperability.
        Void = 2 => "V",
    }

    /// Unit used by `GPSSpeedRef` and `GPSDestDistanceRef`.
    GpsDistanceRef in GPS_DISTANCE_REF {
        Kilometers = 1 => "K",
        Miles = 2 => "M",
        Knots = 3 => "N",
    }

    /// Reference north used by the track, image direction and bearing tags.
    GpsNorthType in GPS_NORTH_TYPE {
        MagneticNorth = 1 => "M",
        TrueNorth = 2 => "T",
    }
}

/// Forces every table to be built.
///
/// Calling this is optional, since tables build themselves on first use.
/// Calling it more than once is harmless.
pub fn init() {
    LazyLock::force(&OBJECT_CYCLE);
    LazyLock::force(&COLOUR_COMPOSITION);
    LazyLock::force(&IMAGE_ORIENTATION);
    LazyLock::force(&GPS_STATUS);
    LazyLock::force(&GPS_DISTANCE_REF);
    LazyLock::force(&GPS_NORTH_TYPE);
}

/// The full IPTC 2:130 image type: a component count and a composition.
///
/// Written as two characters, like `3F` or `1W`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct ImageType {
    /// Number of colour components. One of `0..=4` or `9`.
    pub components: u8,
    pub composition: ColourComposition,
}

impl ImageType {
    /// Parses a two-character image type code.
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let (Some(count), Some(letter), None) = (chars.next(), chars.next(), chars.next()) else {
            return None;
        };

        let components = match count {
            '0'..='4' | '9' => count as u8 - b'0',
            _ => return None,
        };

        let mut buf = [0_u8; 4];
        let composition = ColourComposition::from_code(letter.encode_utf8(&mut buf))?;

        Some(Self {
            components,
            composition,
        })
    }

    /// Renders the two-character code.
    pub fn code(&self) -> String {
        format!("{}{}", self.components, self.composition.code())
    }

    /// Packs the image type into one integer: `components * 100 + composition`.
    pub fn number(&self) -> i64 {
        i64::from(self.components) * 100 + i64::from(self.composition)
    }

    /// Reverses [`ImageType::number`].
    pub fn from_number(number: i64) -> Option<Self> {
        let components = u8::try_from(number / 100).ok()?;
        if !matches!(components, 0..=4 | 9) {
            return None;
        }

        Some(Self {
            components,
            composition: ColourComposition::try_from(number % 100).ok()?,
        })
    }
}

/// Names one of the code tables above.
///
/// Tag descriptors use this to say which table validates them.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum CodeTableId {
    ObjectCycle,
    ImageType,
    ImageOrientation,
    GpsStatus,
    GpsDistanceRef,
    GpsNorthType,
}

impl CodeTableId {
    /// Maps a code to its semantic integer, if the code is known.
    pub fn number(&self, code: &str) -> Option<i64> {
        match self {
            CodeTableId::ObjectCycle => OBJECT_CYCLE.value(code).map(i64::from),
            CodeTableId::ImageType => ImageType::from_code(code).map(|t| t.number()),
            CodeTableId::ImageOrientation => IMAGE_ORIENTATION.value(code).map(i64::from),
            CodeTableId::GpsStatus => GPS_STATUS.value(code).map(i64::from),
            CodeTableId::GpsDistanceRef => GPS_DISTANCE_REF.value(code).map(i64::from),
            CodeTableId::GpsNorthType => GPS_NORTH_TYPE.value(code).map(i64::from),
        }
    }

    /// Maps a semantic integer back to its code.
    pub fn code(&self, number: i64) -> Option<String> {
        match self {
            CodeTableId::ObjectCycle => OBJECT_CYCLE.code(number).map(String::from),
            CodeTableId::ImageType => ImageType::from_number(number).map(|t| t.code()),
            CodeTableId::ImageOrientation => IMAGE_ORIENTATION.code(number).map(String::from),
            CodeTableId::GpsStatus => GPS_STATUS.code(number).map(String::from),
            CodeTableId::GpsDistanceRef => GPS_DISTANCE_REF.code(number).map(String::from),
            CodeTableId::GpsNorthType => GPS_NORTH_TYPE.code(number).map(String::from),
        }
    }

    /// Whether `code` is a member of this table.
    pub fn accepts(&self, code: &str) -> bool {
        self.number(code).is_some()
    }
}
