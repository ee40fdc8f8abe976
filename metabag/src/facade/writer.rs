use chrono::{DateTime, Utc};
use metabag_types::{
    Block,
    tags::{self, AnyTag, CoordinateTag, DateTimeTag},
};

use super::{access::TypedAccess, dispatch};
use crate::{
    SharedBag,
    config::Conventions,
    datetime,
    error::{InvalidReason, MetaError, MetaResult},
    gps::{self, Coordinate},
};

/// The only way to change a shared bag.
///
/// Every write takes the bag's write lock, validates, and then either
/// stores (or removes) one tag or leaves the bag alone. There's no partial
/// state. Callers must not run two writers against one bag at once if they
/// care about ordering between them.
#[derive(Clone, Debug)]
pub struct Writer {
    bag: SharedBag,
    conventions: Conventions,
}

impl Writer {
    pub fn new(bag: SharedBag) -> Self {
        Self::with_conventions(bag, Conventions::default())
    }

    pub fn with_conventions(bag: SharedBag, conventions: Conventions) -> Self {
        Self { bag, conventions }
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    /// Writes one tag through its typed handle.
    pub fn set<T: TypedAccess>(&self, tag: &T, value: impl Into<T::Value>) -> MetaResult<()> {
        let mut bag = self.bag.write();
        tag.write(&mut bag, value.into(), &self.conventions)
    }

    /// Removes one tag. Returns whether it was there.
    pub fn remove<T: TypedAccess>(&self, tag: &T) -> bool {
        let def = tag.def();
        self.bag.write().remove(def.block, def.key).is_some()
    }

    /// Creates the block if it's missing. Calling this again does nothing.
    pub fn add_block(&self, block: Block) {
        self.bag.write().add_block(block);
    }

    pub fn add_iptc(&self) {
        self.add_block(Block::Iptc);
    }

    pub fn add_tiff(&self) {
        self.add_block(Block::Tiff);
    }

    pub fn add_exif(&self) {
        self.add_block(Block::Exif);
    }

    pub fn add_gps(&self) {
        self.add_block(Block::Gps);
    }

    /// Writes a tag from text, by block and key.
    ///
    /// Empty text removes the tag.
    pub fn set_meta(&self, block: Block, key: &str, value: &str) -> MetaResult<()> {
        self.set_text(lookup(block, key)?, value)
    }

    /// Writes a registry tag from text.
    pub(crate) fn set_text(&self, tag: AnyTag, value: &str) -> MetaResult<()> {
        dispatch::write_text(tag, &mut self.bag.write(), value, &self.conventions)
    }

    /// Writes one pseudo-tag of a composite.
    ///
    /// The composite's other pseudo-tags come from `fallback` (the
    /// composite's text form) when it's given, and from the bag otherwise.
    pub fn set_meta_pseudo(
        &self,
        block: Block,
        key: &str,
        pseudo: &str,
        value: &str,
        fallback: Option<&str>,
    ) -> MetaResult<()> {
        let tag = lookup(block, key)?;
        dispatch::write_pseudo(
            tag,
            pseudo,
            &mut self.bag.write(),
            value,
            fallback,
            &self.conventions,
        )
    }

    /// Removes a tag by block and key.
    pub fn remove_meta(&self, block: Block, key: &str) -> MetaResult<()> {
        self.set_meta(block, key, "")
    }

    /// Writes a datetime from an IPTC date and time.
    ///
    /// The result is normalized to UTC unless this writer keeps IPTC local
    /// time.
    pub fn set_iptc_date_time(&self, tag: &DateTimeTag, date: &str, time: &str) -> MetaResult<()> {
        let xml = if self.conventions.iptc_keep_local_time {
            datetime::iptc_to_xml_local(date, time)
        } else {
            datetime::iptc_to_xml(date, time)
        };

        self.set(tag, xml)
    }

    /// Writes a datetime from the Exif layout.
    pub fn set_exif_date_time(&self, tag: &DateTimeTag, exif: &str) -> MetaResult<()> {
        self.set(tag, datetime::exif_to_xml(exif))
    }

    /// Writes a datetime from a GPS date and time.
    pub fn set_gps_date_time(&self, tag: &DateTimeTag, date: &str, time: &str) -> MetaResult<()> {
        self.set(tag, datetime::gps_to_xml(date, time))
    }

    pub fn set_timestamp(&self, tag: &DateTimeTag, timestamp: &DateTime<Utc>) -> MetaResult<()> {
        self.set(tag, datetime::from_timestamp(timestamp))
    }

    /// Writes a coordinate from the Exif split form.
    pub fn set_exif_coordinate(
        &self,
        tag: &CoordinateTag,
        value: &str,
        reference: &str,
    ) -> MetaResult<()> {
        let coordinate = gps::exif_to_xmp(value, reference)
            .and_then(|xmp| Coordinate::parse(&xmp, tag.axis))
            .ok_or_else(|| {
                let reason = InvalidReason::BadCoordinate(format!("{value} {reference}"));
                log::error!("Refusing to write `{}`: {reason}", tag.def);
                MetaError::InvalidValue {
                    tag: tag.def,
                    reason,
                }
            })?;

        self.set(tag, coordinate)
    }
}

fn lookup(block: Block, key: &str) -> MetaResult<AnyTag> {
    tags::lookup(block, key).ok_or_else(|| {
        log::error!("`{block}.{key}` isn't a known tag.");
        MetaError::UnknownTag {
            block,
            key: key.into(),
        }
    })
}
