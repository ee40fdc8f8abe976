//! The Exif `Flash` bit field.
//!
//! | bits | field             |
//! |------|-------------------|
//! | 0    | fired             |
//! | 1-2  | return light      |
//! | 3-4  | mode              |
//! | 5    | function *absent* |
//! | 6    | red-eye reduction |

use metabag_types::tags::PseudoTag;

use super::{format_flag, parse_flag};

const FIRED: u16 = 0b1;
const RETURN_SHIFT: u16 = 1;
const MODE_SHIFT: u16 = 3;
const TWO_BITS: u16 = 0b11;
const NO_FUNCTION: u16 = 1 << 5;
const RED_EYE: u16 = 1 << 6;

/// The five fields of a `Flash` value.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Flash {
    pub fired: bool,

    /// `0..=3`. 2 = strobe return light not detected, 3 = detected.
    pub return_light: u8,

    /// `0..=3`. 1 = compulsory firing, 2 = compulsory suppression, 3 = auto.
    pub mode: u8,

    /// Stored inverted: a set bit 5 means there's *no* flash function.
    pub function_present: bool,

    pub red_eye_reduction: bool,
}

impl Flash {
    /// Unpacks a stored value. Bits above 6 are ignored.
    pub fn decode(raw: u16) -> Self {
        Self {
            fired: raw & FIRED != 0,
            return_light: ((raw >> RETURN_SHIFT) & TWO_BITS) as u8,
            mode: ((raw >> MODE_SHIFT) & TWO_BITS) as u8,
            function_present: raw & NO_FUNCTION == 0,
            red_eye_reduction: raw & RED_EYE != 0,
        }
    }

    /// Packs the fields, masking each to its width first.
    ///
    /// ```
    /// use metabag::codec::Flash;
    ///
    /// let flash = Flash {
    ///     fired: true,
    ///     return_light: 3,
    ///     mode: 3,
    ///     function_present: true,
    ///     red_eye_reduction: false,
    /// };
    /// assert_eq!(flash.encode(), 0x1F);
    /// ```
    pub fn encode(&self) -> u16 {
        let mut raw: u16 = 0;

        if self.fired {
            raw |= FIRED;
        }
        raw |= (u16::from(self.return_light) & TWO_BITS) << RETURN_SHIFT;
        raw |= (u16::from(self.mode) & TWO_BITS) << MODE_SHIFT;
        if !self.function_present {
            raw |= NO_FUNCTION;
        }
        if self.red_eye_reduction {
            raw |= RED_EYE;
        }

        raw
    }

    /// Reads one pseudo-tag as text.
    pub fn project(&self, pseudo: PseudoTag) -> Option<String> {
        Some(match pseudo {
            PseudoTag::Fired => format_flag(self.fired).into(),
            PseudoTag::ReturnLight => self.return_light.to_string(),
            PseudoTag::Mode => self.mode.to_string(),
            PseudoTag::FunctionPresent => format_flag(self.function_present).into(),
            PseudoTag::RedEyeReduction => format_flag(self.red_eye_reduction).into(),
            _ => return None,
        })
    }

    /// Replaces one pseudo-tag.
    ///
    /// Two-bit fields must be `0..=3`. Gives `None` for anything unreadable.
    pub fn with(&self, pseudo: PseudoTag, text: &str) -> Option<Self> {
        let two_bits = || text.trim().parse::<u8>().ok().filter(|v| *v <= 3);

        let mut flash = *self;
        match pseudo {
            PseudoTag::Fired => flash.fired = parse_flag(text)?,
            PseudoTag::ReturnLight => flash.return_light = two_bits()?,
            PseudoTag::Mode => flash.mode = two_bits()?,
            PseudoTag::FunctionPresent => flash.function_present = parse_flag(text)?,
            PseudoTag::RedEyeReduction => flash.red_eye_reduction = parse_flag(text)?,
            _ => return None,
        }

        Some(flash)
    }
}
