//! # `metabag`
//!
//! A metadata bag: one typed attribute store for the IPTC, TIFF, Exif and GPS
//! metadata of an image, plus the conversions between each format's string
//! layouts.
//!
//! A platform bridge fills the bag through a [`Writer`], which validates and
//! normalizes every value, and later reads it back out through a [`Reader`].
//! Both are thin handles over a [`SharedBag`], so any number of them can be
//! layered over the same bag without copying it.
//!
//! ```
//! use metabag::{Reader, Writer, bag::MetadataBag, tags::{exif, gps}};
//!
//! let bag = MetadataBag::new().into_shared();
//! let (reader, writer) = (Reader::new(bag.clone()), Writer::new(bag));
//!
//! writer.set_exif_date_time(&exif::DATE_TIME_ORIGINAL, "2024:01:02 03:04:05").unwrap();
//! writer.set_exif_coordinate(&gps::LATITUDE, "10;54;0", "N").unwrap();
//!
//! assert_eq!(
//!     reader.get(&exif::DATE_TIME_ORIGINAL).as_deref(),
//!     Some("2024-01-02T03:04:05Z")
//! );
//! assert_eq!(reader.get(&gps::LATITUDE).map(|c| c.to_xmp()).as_deref(), Some("10,54,0N"));
//! ```
//!
//! ## Layout
//!
//! - [`bag`] and [`value`] hold the data.
//! - [`accessor`] has the low-level, per-kind getters and setters.
//! - [`datetime`], [`gps`], [`codec`] and [`b64`] convert between layouts.
//! - [`Reader`] and [`Writer`] are the façade. They take typed tag handles
//!   from [`tags`], or `(block, key)` pairs for callers that only have text.
//! - [`bridge`] moves values in and out of a platform's native tree.
//!
//! ## License
//!
//! This project is dual-licensed under either the Apache License 2.0 or the MIT License at your option.

#![forbid(unsafe_code)]

use std::sync::Arc;

use parking_lot::RwLock;

pub mod accessor;
pub mod b64;
pub mod bag;
pub mod bridge;
pub mod codec;
pub mod config;
pub mod datetime;
pub mod error;
pub mod gps;
pub mod value;

mod facade;

pub use facade::{Reader, TypedAccess, Writer};
pub use metabag_types::{Block, codes, tags};

/// A bag shared between readers and writers.
///
/// Readers take the read lock for one call at a time, and a writer holds the
/// write lock for exactly one tag write.
pub type SharedBag = Arc<RwLock<bag::MetadataBag>>;

pub(crate) mod util {
    /// Helper function to initialize the logger for testing.
    #[cfg(test)]
    pub fn logger() {
        _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::max())
            .format_file(true)
            .format_line_number(true)
            .try_init();
    }
}
