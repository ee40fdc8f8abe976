//! GPS IFD tags.
//!
//! Latitude and longitude (and their destination counterparts) are stored
//! in XMP form with the direction letter attached, so there are no separate
//! `GPSLatitudeRef`-style tags here. Date and time live together in
//! [`TIME_STAMP`].

use super::{
    AnyTag, Axis, CodedTag, CoordinateTag, DateTimeStyle, DateTimeTag, LongTag, RealTag, TextTag,
    UNBOUNDED, VersionStyle, VersionTag,
};
use crate::{Block, codes::CodeTableId};

const B: Block = Block::Gps;

pub static VERSION_ID: VersionTag = VersionTag::new(B, "GPSVersionID", VersionStyle::Dotted);
pub static LATITUDE: CoordinateTag = CoordinateTag::new(B, "GPSLatitude", Axis::Latitude);
pub static LONGITUDE: CoordinateTag = CoordinateTag::new(B, "GPSLongitude", Axis::Longitude);

/// 0 = above sea level, 1 = below.
pub static ALTITUDE_REF: LongTag = LongTag::strict(B, "GPSAltitudeRef", 0, 1, 0);
pub static ALTITUDE: RealTag = RealTag::non_negative(B, "GPSAltitude");

/// `GPSDateStamp` and `GPSTimeStamp`, joined.
pub static TIME_STAMP: DateTimeTag = DateTimeTag::new(B, "GPSTimeStamp", DateTimeStyle::Gps);
pub static SATELLITES: TextTag = TextTag::new(B, "GPSSatellites", UNBOUNDED);
pub static STATUS: CodedTag = CodedTag::new(B, "GPSStatus", CodeTableId::GpsStatus);
pub static MEASURE_MODE: LongTag = LongTag::strict(B, "GPSMeasureMode", 2, 3, 2);
pub static DOP: RealTag = RealTag::non_negative(B, "GPSDOP");
pub static SPEED_REF: CodedTag = CodedTag::new(B, "GPSSpeedRef", CodeTableId::GpsDistanceRef);
pub static SPEED: RealTag = RealTag::non_negative(B, "GPSSpeed");
pub static TRACK_REF: CodedTag = CodedTag::new(B, "GPSTrackRef", CodeTableId::GpsNorthType);
pub static TRACK: RealTag = RealTag::new(B, "GPSTrack", 0.0, 360.0);
pub static IMG_DIRECTION_REF: CodedTag =
    CodedTag::new(B, "GPSImgDirectionRef", CodeTableId::GpsNorthType);
pub static IMG_DIRECTION: RealTag = RealTag::new(B, "GPSImgDirection", 0.0, 360.0);
pub static MAP_DATUM: TextTag = TextTag::new(B, "GPSMapDatum", UNBOUNDED);
pub static DEST_LATITUDE: CoordinateTag =
    CoordinateTag::new(B, "GPSDestLatitude", Axis::Latitude);
pub static DEST_LONGITUDE: CoordinateTag =
    CoordinateTag::new(B, "GPSDestLongitude", Axis::Longitude);
pub static DEST_BEARING_REF: CodedTag =
    CodedTag::new(B, "GPSDestBearingRef", CodeTableId::GpsNorthType);
pub static DEST_BEARING: RealTag = RealTag::new(B, "GPSDestBearing", 0.0, 360.0);
pub static DEST_DISTANCE_REF: CodedTag =
    CodedTag::new(B, "GPSDestDistanceRef", CodeTableId::GpsDistanceRef);
pub static DEST_DISTANCE: RealTag = RealTag::non_negative(B, "GPSDestDistance");
pub static PROCESSING_METHOD: TextTag = TextTag::new(B, "GPSProcessingMethod", UNBOUNDED);
pub static AREA_INFORMATION: TextTag = TextTag::new(B, "GPSAreaInformation", UNBOUNDED);
pub static DIFFERENTIAL: LongTag = LongTag::strict(B, "GPSDifferential", 0, 1, 0);
pub static H_POSITIONING_ERROR: RealTag = RealTag::non_negative(B, "GPSHPositioningError");

pub static ALL: &[AnyTag] = &[
    AnyTag::Version(&VERSION_ID),
    AnyTag::Coordinate(&LATITUDE),
    AnyTag::Coordinate(&LONGITUDE),
    AnyTag::Long(&ALTITUDE_REF),
    AnyTag::Real(&ALTITUDE),
    AnyTag::DateTime(&TIME_STAMP),
    AnyTag::Text(&SATELLITES),
    AnyTag::Coded(&STATUS),
    AnyTag::Long(&MEASURE_MODE),
    AnyTag::Real(&DOP),
    AnyTag::Coded(&SPEED_REF),
    AnyTag::Real(&SPEED),
    AnyTag::Coded(&TRACK_REF),
    AnyTag::Real(&TRACK),
    AnyTag::Coded(&IMG_DIRECTION_REF),
    AnyTag::Real(&IMG_DIRECTION),
    AnyTag::Text(&MAP_DATUM),
    AnyTag::Coordinate(&DEST_LATITUDE),
    AnyTag::Coordinate(&DEST_LONGITUDE),
    AnyTag::Coded(&DEST_BEARING_REF),
    AnyTag::Real(&DEST_BEARING),
    AnyTag::Coded(&DEST_DISTANCE_REF),
    AnyTag::Real(&DEST_DISTANCE),
    AnyTag::Text(&PROCESSING_METHOD),
    AnyTag::Text(&AREA_INFORMATION),
    AnyTag::Long(&DIFFERENTIAL),
    AnyTag::Real(&H_POSITIONING_ERROR),
];
