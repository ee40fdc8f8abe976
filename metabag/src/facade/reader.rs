use chrono::{DateTime, Utc};
use metabag_types::{
    Block,
    tags::{self, AnyTag, CoordinateTag, DateTimeTag},
};

use super::{access::TypedAccess, dispatch};
use crate::{
    SharedBag,
    bag::MetadataBag,
    config::Conventions,
    datetime,
    gps,
};

/// Read-only access to a shared bag.
///
/// Any number of readers may share one bag. Each call takes a read lock for
/// its own duration only.
#[derive(Clone, Debug)]
pub struct Reader {
    bag: SharedBag,
    conventions: Conventions,
}

impl Reader {
    pub fn new(bag: SharedBag) -> Self {
        Self::with_conventions(bag, Conventions::default())
    }

    pub fn with_conventions(bag: SharedBag, conventions: Conventions) -> Self {
        Self { bag, conventions }
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    /// Reads one tag through its typed handle.
    ///
    /// ```
    /// use metabag::{Reader, Writer, bag::MetadataBag, tags::tiff};
    ///
    /// let bag = MetadataBag::new().into_shared();
    /// Writer::new(bag.clone()).set(&tiff::MAKE, "Acme").unwrap();
    ///
    /// assert_eq!(Reader::new(bag).get(&tiff::MAKE).as_deref(), Some("Acme"));
    /// ```
    pub fn get<T: TypedAccess>(&self, tag: &T) -> Option<T::Value> {
        let bag = self.bag.read();
        tag.read(&bag, &self.conventions)
    }

    /// Whether the block exists. This never creates it.
    pub fn has_block(&self, block: Block) -> bool {
        self.bag.read().has_block(block)
    }

    pub fn has_iptc(&self) -> bool {
        self.has_block(Block::Iptc)
    }

    pub fn has_tiff(&self) -> bool {
        self.has_block(Block::Tiff)
    }

    pub fn has_exif(&self) -> bool {
        self.has_block(Block::Exif)
    }

    pub fn has_gps(&self) -> bool {
        self.has_block(Block::Gps)
    }

    /// Reads a tag as text, by block and key.
    ///
    /// Keys the registry doesn't know are still read if they're in the bag
    /// (a deserializer may have put them there).
    pub fn get_meta(&self, block: Block, key: &str) -> Option<String> {
        let bag = self.bag.read();

        match tags::lookup(block, key) {
            Some(tag) => dispatch::read_text(tag, &bag, &self.conventions),
            None => {
                log::trace!("`{block}.{key}` isn't a known tag. Reading it raw.");
                bag.get(block, key)?.to_text()
            }
        }
    }

    /// Reads a registry tag as text.
    pub(crate) fn text(&self, tag: AnyTag) -> Option<String> {
        dispatch::read_text(tag, &self.bag.read(), &self.conventions)
    }

    /// Reads a tag as a list of text elements.
    pub fn get_meta_list(&self, block: Block, key: &str) -> Option<Vec<String>> {
        let bag = self.bag.read();

        match tags::lookup(block, key) {
            Some(tag) => dispatch::read_list(tag, &bag, &self.conventions),
            None => crate::accessor::get_array_string(&bag, block, key),
        }
    }

    /// Reads one pseudo-tag of a composite, like `Flash`'s `Fired`.
    pub fn get_meta_pseudo(&self, block: Block, key: &str, pseudo: &str) -> Option<String> {
        let tag = tags::lookup(block, key)?;
        dispatch::read_pseudo(tag, pseudo, &self.bag.read(), &self.conventions)
    }

    /// Reads a datetime as an IPTC date (`YYYYMMDD`) and time
    /// (`HHMMSS±HHMM`).
    pub fn iptc_date_time(&self, tag: &DateTimeTag) -> Option<(String, String)> {
        self.get(tag).map(|xml| datetime::xml_to_iptc(&xml))
    }

    /// Reads a datetime in the Exif layout.
    pub fn exif_date_time(&self, tag: &DateTimeTag) -> Option<String> {
        self.get(tag).map(|xml| datetime::xml_to_exif(&xml))
    }

    /// Reads a datetime as a GPS date and time, in this reader's GPS time
    /// format.
    pub fn gps_date_time(&self, tag: &DateTimeTag) -> Option<(String, String)> {
        self.get(tag)
            .map(|xml| datetime::xml_to_gps(&xml, self.conventions.gps_time))
    }

    /// Reads a datetime as a timestamp.
    pub fn timestamp(&self, tag: &DateTimeTag) -> Option<DateTime<Utc>> {
        self.get(tag).and_then(|xml| datetime::to_timestamp(&xml))
    }

    /// Reads a coordinate in the Exif split form: `D;M;S` and a reference
    /// letter.
    pub fn exif_coordinate(&self, tag: &CoordinateTag) -> Option<(String, char)> {
        self.get(tag).and_then(|c| gps::xmp_to_exif(&c.to_xmp()))
    }

    /// Copies the bag out, for a serializer.
    pub fn snapshot(&self) -> MetadataBag {
        self.bag.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use metabag_types::{
        Block,
        tags::{exif, gps, iptc},
    };

    use crate::{Reader, Writer, bag::MetadataBag, config::Conventions, util::logger};

    fn pair() -> (Reader, Writer) {
        logger();
        let bag = MetadataBag::new().into_shared();
        (Reader::new(bag.clone()), Writer::new(bag))
    }

    #[test]
    fn block_queries_dont_create_blocks() {
        let (reader, writer) = pair();

        assert!(!reader.has_exif());
        assert_eq!(reader.get_meta(Block::Exif, "Flash"), None);
        assert!(!reader.has_exif());

        writer.set_meta(Block::Exif, "Flash", "1").unwrap();
        assert!(reader.has_exif());
        assert!(!reader.has_gps());
    }

    #[test]
    fn datetime_views() {
        let (reader, writer) = pair();

        writer
            .set(&exif::DATE_TIME_ORIGINAL, "2024-01-02T03:04:05Z")
            .unwrap();

        assert_eq!(
            reader.exif_date_time(&exif::DATE_TIME_ORIGINAL).as_deref(),
            Some("2024:01:02 03:04:05")
        );
        assert_eq!(
            reader.iptc_date_time(&exif::DATE_TIME_ORIGINAL),
            Some(("20240102".into(), "030405+0000".into()))
        );
        assert_eq!(
            reader.gps_date_time(&exif::DATE_TIME_ORIGINAL),
            Some(("2024:01:02".into(), "03;04;05".into()))
        );
        assert!(reader.timestamp(&exif::DATE_TIME_ORIGINAL).is_some());
        assert_eq!(reader.timestamp(&iptc::DATE_CREATED), None);
    }

    #[test]
    fn gps_time_follows_conventions() {
        logger();
        let bag = MetadataBag::new().into_shared();
        let conventions = Conventions::default()
            .with_gps_time(crate::datetime::GpsTimeFormat::COLON_FRACTIONAL);

        Writer::new(bag.clone())
            .set_gps_date_time(&gps::TIME_STAMP, "2024:01:02", "3;4;5")
            .unwrap();

        let reader = Reader::with_conventions(bag, conventions);
        assert_eq!(
            reader.gps_date_time(&gps::TIME_STAMP),
            Some(("2024:01:02".into(), "03:04:05.00".into()))
        );
    }

    #[test]
    fn unknown_keys_are_read_raw() {
        let bag: MetadataBag = [(Block::Tiff, "Vendor", "x".into())].into_iter().collect();
        let reader = Reader::new(bag.into_shared());

        assert_eq!(reader.get_meta(Block::Tiff, "Vendor").as_deref(), Some("x"));
        assert_eq!(reader.get_meta_pseudo(Block::Tiff, "Vendor", "Fired"), None);
    }

    #[test]
    fn exif_coordinates() {
        let (reader, writer) = pair();

        writer.set_meta(Block::Gps, "GPSLongitude", "2,21,0w").unwrap();
        assert_eq!(
            reader.exif_coordinate(&gps::LONGITUDE),
            Some(("02;21;0".into(), 'W'))
        );
        assert_eq!(
            reader.get_meta(Block::Gps, "GPSLongitude").as_deref(),
            Some("02,21,0W")
        );
    }
}
