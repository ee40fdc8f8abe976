//! Platform conventions the engine can't infer on its own.
//!
//! Different native imaging subsystems disagree on a few string layouts.
//! The bridge that drives the engine picks the right set here.

use crate::{b64::Base64Mode, datetime::GpsTimeFormat};

/// Conventions used by a [`crate::Reader`] or [`crate::Writer`].
///
/// ```
/// use metabag::{b64::Base64Mode, config::Conventions, datetime::GpsTimeFormat};
///
/// let conventions = Conventions::default()
///     .with_gps_time(GpsTimeFormat::COLON_FRACTIONAL)
///     .with_base64_mode(Base64Mode::Strict);
///
/// assert_eq!(conventions.gps_time.separator, ':');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Conventions {
    /// How GPS time is rendered for the bridge.
    pub gps_time: GpsTimeFormat,

    /// How strictly blob text is checked when it's decoded.
    pub base64_mode: Base64Mode,

    /// Whether blob text that isn't Base64 may be read as a `;`-joined list
    /// of byte values.
    pub blob_list_fallback: bool,

    /// Store IPTC datetimes with their original UTC offset, instead of
    /// normalizing them to UTC.
    pub iptc_keep_local_time: bool,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            gps_time: GpsTimeFormat::SEMICOLON,
            base64_mode: Base64Mode::Tolerant,
            blob_list_fallback: true,
            iptc_keep_local_time: false,
        }
    }
}

impl Conventions {
    pub fn with_gps_time(mut self, gps_time: GpsTimeFormat) -> Self {
        self.gps_time = gps_time;
        self
    }

    pub fn with_base64_mode(mut self, mode: Base64Mode) -> Self {
        self.base64_mode = mode;
        self
    }

    pub fn with_blob_list_fallback(mut self, allow: bool) -> Self {
        self.blob_list_fallback = allow;
        self
    }

    pub fn with_iptc_keep_local_time(mut self, keep: bool) -> Self {
        self.iptc_keep_local_time = keep;
        self
    }
}
