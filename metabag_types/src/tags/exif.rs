//! Exif 2.2 private IFD tags, plus a few Exif 2.3 additions cameras commonly
//! write (lens and body information).

use super::{
    AnyTag, BlobTag, Charset, DateTimeStyle, DateTimeTag, FixedTextTag, FlashTag, IntWidth,
    LongListTag, LongTag, RealListTag, RealTag, SubjectAreaTag, TagDef, TextTag, UNBOUNDED,
    VersionStyle, VersionTag,
};
use crate::Block;

const B: Block = Block::Exif;
const U8_MAX: i64 = u8::MAX as i64;
const U16_MAX: i64 = u16::MAX as i64;
const U32_MAX: i64 = u32::MAX as i64;

pub static EXIF_VERSION: VersionTag = VersionTag::new(B, "ExifVersion", VersionStyle::Packed);
pub static FLASHPIX_VERSION: VersionTag =
    VersionTag::new(B, "FlashpixVersion", VersionStyle::Packed);

/// 1 = sRGB, 65535 = uncalibrated.
pub static COLOR_SPACE: LongTag = LongTag::lenient(B, "ColorSpace", 1, U16_MAX, 1);
pub static COMPONENTS_CONFIGURATION: LongListTag =
    LongListTag::new(B, "ComponentsConfiguration", IntWidth::U8);
pub static COMPRESSED_BITS_PER_PIXEL: RealTag =
    RealTag::non_negative(B, "CompressedBitsPerPixel");
pub static PIXEL_X_DIMENSION: LongTag = LongTag::lenient(B, "PixelXDimension", 0, U32_MAX, 0);
pub static PIXEL_Y_DIMENSION: LongTag = LongTag::lenient(B, "PixelYDimension", 0, U32_MAX, 0);
pub static MAKER_NOTE: BlobTag = BlobTag::new(B, "MakerNote", true);
pub static USER_COMMENT: TextTag = TextTag::new(B, "UserComment", UNBOUNDED);
pub static RELATED_SOUND_FILE: TextTag = TextTag::new(B, "RelatedSoundFile", 12);
pub static DATE_TIME_ORIGINAL: DateTimeTag =
    DateTimeTag::new(B, "DateTimeOriginal", DateTimeStyle::Exif);
pub static DATE_TIME_DIGITIZED: DateTimeTag =
    DateTimeTag::new(B, "DateTimeDigitized", DateTimeStyle::Exif);
pub static SUB_SEC_TIME: TextTag = TextTag::new(B, "SubSecTime", 9);
pub static EXPOSURE_TIME: RealTag = RealTag::non_negative(B, "ExposureTime");
pub static F_NUMBER: RealTag = RealTag::non_negative(B, "FNumber");

/// 0 (not defined) through 8 (landscape mode).
pub static EXPOSURE_PROGRAM: LongTag = LongTag::strict(B, "ExposureProgram", 0, 8, 0);
pub static SPECTRAL_SENSITIVITY: TextTag = TextTag::new(B, "SpectralSensitivity", UNBOUNDED);
pub static ISO_SPEED_RATINGS: LongListTag =
    LongListTag::new(B, "ISOSpeedRatings", IntWidth::U16);
pub static OECF: BlobTag = BlobTag::new(B, "OECF", false);
pub static SHUTTER_SPEED_VALUE: RealTag = RealTag::unbounded(B, "ShutterSpeedValue");
pub static APERTURE_VALUE: RealTag = RealTag::non_negative(B, "ApertureValue");
pub static BRIGHTNESS_VALUE: RealTag = RealTag::unbounded(B, "BrightnessValue");
pub static EXPOSURE_BIAS_VALUE: RealTag = RealTag::unbounded(B, "ExposureBiasValue");
pub static MAX_APERTURE_VALUE: RealTag = RealTag::non_negative(B, "MaxApertureValue");
pub static SUBJECT_DISTANCE: RealTag = RealTag::non_negative(B, "SubjectDistance");
pub static METERING_MODE: LongTag = LongTag::lenient(B, "MeteringMode", 0, U8_MAX, 0);
pub static LIGHT_SOURCE: LongTag = LongTag::lenient(B, "LightSource", 0, U8_MAX, 0);
pub static FLASH: FlashTag = FlashTag {
    def: TagDef::new(B, "Flash"),
};
pub static FOCAL_LENGTH: RealTag = RealTag::non_negative(B, "FocalLength");
pub static SUBJECT_AREA: SubjectAreaTag = SubjectAreaTag {
    def: TagDef::new(B, "SubjectArea"),
};
pub static FLASH_ENERGY: RealTag = RealTag::non_negative(B, "FlashEnergy");
pub static SPATIAL_FREQUENCY_RESPONSE: BlobTag =
    BlobTag::new(B, "SpatialFrequencyResponse", false);
pub static FOCAL_PLANE_X_RESOLUTION: RealTag =
    RealTag::non_negative(B, "FocalPlaneXResolution");
pub static FOCAL_PLANE_Y_RESOLUTION: RealTag =
    RealTag::non_negative(B, "FocalPlaneYResolution");
pub static FOCAL_PLANE_RESOLUTION_UNIT: LongTag =
    LongTag::strict(B, "FocalPlaneResolutionUnit", 1, 3, 2);
pub static SUBJECT_LOCATION: SubjectAreaTag = SubjectAreaTag {
    def: TagDef::new(B, "SubjectLocation"),
};
pub static EXPOSURE_INDEX: RealTag = RealTag::non_negative(B, "ExposureIndex");
pub static SENSING_METHOD: LongTag = LongTag::strict(B, "SensingMethod", 1, 8, 1);
pub static FILE_SOURCE: LongTag = LongTag::strict(B, "FileSource", 0, 3, 3);
pub static SCENE_TYPE: LongTag = LongTag::strict(B, "SceneType", 1, 1, 1);
pub static CFA_PATTERN: BlobTag = BlobTag::new(B, "CFAPattern", false);
pub static CUSTOM_RENDERED: LongTag = LongTag::strict(B, "CustomRendered", 0, 1, 0);
pub static EXPOSURE_MODE: LongTag = LongTag::strict(B, "ExposureMode", 0, 2, 0);
pub static WHITE_BALANCE: LongTag = LongTag::strict(B, "WhiteBalance", 0, 1, 0);
pub static DIGITAL_ZOOM_RATIO: RealTag = RealTag::non_negative(B, "DigitalZoomRatio");
pub static FOCAL_LENGTH_IN_35MM_FILM: LongTag =
    LongTag::lenient(B, "FocalLengthIn35mmFilm", 0, U16_MAX, 0);
pub static SCENE_CAPTURE_TYPE: LongTag = LongTag::strict(B, "SceneCaptureType", 0, 3, 0);
pub static GAIN_CONTROL: LongTag = LongTag::strict(B, "GainControl", 0, 4, 0);
pub static CONTRAST: LongTag = LongTag::strict(B, "Contrast", 0, 2, 0);
pub static SATURATION: LongTag = LongTag::strict(B, "Saturation", 0, 2, 0);
pub static SHARPNESS: LongTag = LongTag::strict(B, "Sharpness", 0, 2, 0);
pub static DEVICE_SETTING_DESCRIPTION: BlobTag =
    BlobTag::new(B, "DeviceSettingDescription", false);
pub static SUBJECT_DISTANCE_RANGE: LongTag =
    LongTag::strict(B, "SubjectDistanceRange", 0, 3, 0);

/// 128-bit identifier as 32 hex characters.
pub static IMAGE_UNIQUE_ID: FixedTextTag =
    FixedTextTag::new(B, "ImageUniqueID", 32, 32, Charset::Hex);
pub static CAMERA_OWNER_NAME: TextTag = TextTag::new(B, "CameraOwnerName", UNBOUNDED);
pub static BODY_SERIAL_NUMBER: TextTag = TextTag::new(B, "BodySerialNumber", UNBOUNDED);
pub static LENS_SPECIFICATION: RealListTag =
    RealListTag::new(B, "LensSpecification", Some(4));
pub static LENS_MAKE: TextTag = TextTag::new(B, "LensMake", UNBOUNDED);
pub static LENS_MODEL: TextTag = TextTag::new(B, "LensModel", UNBOUNDED);
pub static LENS_SERIAL_NUMBER: TextTag = TextTag::new(B, "LensSerialNumber", UNBOUNDED);

pub static ALL: &[AnyTag] = &[
    AnyTag::Version(&EXIF_VERSION),
    AnyTag::Version(&FLASHPIX_VERSION),
    AnyTag::Long(&COLOR_SPACE),
    AnyTag::LongList(&COMPONENTS_CONFIGURATION),
    AnyTag::Real(&COMPRESSED_BITS_PER_PIXEL),
    AnyTag::Long(&PIXEL_X_DIMENSION),
    AnyTag::Long(&PIXEL_Y_DIMENSION),
    AnyTag::Blob(&MAKER_NOTE),
    AnyTag::Text(&USER_COMMENT),
    AnyTag::Text(&RELATED_SOUND_FILE),
    AnyTag::DateTime(&DATE_TIME_ORIGINAL),
    AnyTag::DateTime(&DATE_TIME_DIGITIZED),
    AnyTag::Text(&SUB_SEC_TIME),
    AnyTag::Real(&EXPOSURE_TIME),
    AnyTag::Real(&F_NUMBER),
    AnyTag::Long(&EXPOSURE_PROGRAM),
    AnyTag::Text(&SPECTRAL_SENSITIVITY),
    AnyTag::LongList(&ISO_SPEED_RATINGS),
    AnyTag::Blob(&OECF),
    AnyTag::Real(&SHUTTER_SPEED_VALUE),
    AnyTag::Real(&APERTURE_VALUE),
    AnyTag::Real(&BRIGHTNESS_VALUE),
    AnyTag::Real(&EXPOSURE_BIAS_VALUE),
    AnyTag::Real(&MAX_APERTURE_VALUE),
    AnyTag::Real(&SUBJECT_DISTANCE),
    AnyTag::Long(&METERING_MODE),
    AnyTag::Long(&LIGHT_SOURCE),
    AnyTag::Flash(&FLASH),
    AnyTag::Real(&FOCAL_LENGTH),
    AnyTag::SubjectArea(&SUBJECT_AREA),
    AnyTag::Real(&FLASH_ENERGY),
    AnyTag::Blob(&SPATIAL_FREQUENCY_RESPONSE),
    AnyTag::Real(&FOCAL_PLANE_X_RESOLUTION),
    AnyTag::Real(&FOCAL_PLANE_Y_RESOLUTION),
    AnyTag::Long(&FOCAL_PLANE_RESOLUTION_UNIT),
    AnyTag::SubjectArea(&SUBJECT_LOCATION),
    AnyTag::Real(&EXPOSURE_INDEX),
    AnyTag::Long(&SENSING_METHOD),
    AnyTag::Long(&FILE_SOURCE),
    AnyTag::Long(&SCENE_TYPE),
    AnyTag::Blob(&CFA_PATTERN),
    AnyTag::Long(&CUSTOM_RENDERED),
    AnyTag::Long(&EXPOSURE_MODE),
    AnyTag::Long(&WHITE_BALANCE),
    AnyTag::Real(&DIGITAL_ZOOM_RATIO),
    AnyTag::Long(&FOCAL_LENGTH_IN_35MM_FILM),
    AnyTag::Long(&SCENE_CAPTURE_TYPE),
    AnyTag::Long(&GAIN_CONTROL),
    AnyTag::Long(&CONTRAST),
    AnyTag::Long(&SATURATION),
    AnyTag::Long(&SHARPNESS),
    AnyTag::Blob(&DEVICE_SETTING_DESCRIPTION),
    AnyTag::Long(&SUBJECT_DISTANCE_RANGE),
    AnyTag::FixedText(&IMAGE_UNIQUE_ID),
    AnyTag::Text(&CAMERA_OWNER_NAME),
    AnyTag::Text(&BODY_SERIAL_NUMBER),
    AnyTag::RealList(&LENS_SPECIFICATION),
    AnyTag::Text(&LENS_MAKE),
    AnyTag::Text(&LENS_MODEL),
    AnyTag::Text(&LENS_SERIAL_NUMBER),
];
