//! TIFF 6.0 tags found in IFD 0 of an Exif block.

use super::{
    AnyTag, DateTimeStyle, DateTimeTag, IntWidth, LongListTag, LongTag, RealListTag, RealTag,
    TextTag, UNBOUNDED,
};
use crate::Block;

const B: Block = Block::Tiff;
const U16_MAX: i64 = u16::MAX as i64;
const U32_MAX: i64 = u32::MAX as i64;

pub static IMAGE_WIDTH: LongTag = LongTag::lenient(B, "ImageWidth", 0, U32_MAX, 0);
pub static IMAGE_LENGTH: LongTag = LongTag::lenient(B, "ImageLength", 0, U32_MAX, 0);
pub static BITS_PER_SAMPLE: LongListTag = LongListTag::new(B, "BitsPerSample", IntWidth::U16);
pub static COMPRESSION: LongTag = LongTag::lenient(B, "Compression", 1, U16_MAX, 1);
pub static PHOTOMETRIC_INTERPRETATION: LongTag =
    LongTag::lenient(B, "PhotometricInterpretation", 0, U16_MAX, 2);

/// 1 (top-left) through 8 (left-bottom).
pub static ORIENTATION: LongTag = LongTag::strict(B, "Orientation", 1, 8, 1);
pub static SAMPLES_PER_PIXEL: LongTag = LongTag::lenient(B, "SamplesPerPixel", 1, U16_MAX, 3);
pub static PLANAR_CONFIGURATION: LongTag =
    LongTag::strict(B, "PlanarConfiguration", 1, 2, 1);
pub static YCBCR_SUB_SAMPLING: LongListTag =
    LongListTag::new(B, "YCbCrSubSampling", IntWidth::U16);
pub static YCBCR_POSITIONING: LongTag = LongTag::strict(B, "YCbCrPositioning", 1, 2, 1);
pub static X_RESOLUTION: RealTag = RealTag::non_negative(B, "XResolution");
pub static Y_RESOLUTION: RealTag = RealTag::non_negative(B, "YResolution");

/// 1 = none, 2 = inches, 3 = centimetres.
pub static RESOLUTION_UNIT: LongTag = LongTag::strict(B, "ResolutionUnit", 1, 3, 2);
pub static TRANSFER_FUNCTION: LongListTag =
    LongListTag::new(B, "TransferFunction", IntWidth::U16);
pub static WHITE_POINT: RealListTag = RealListTag::new(B, "WhitePoint", Some(2));
pub static PRIMARY_CHROMATICITIES: RealListTag =
    RealListTag::new(B, "PrimaryChromaticities", Some(6));
pub static YCBCR_COEFFICIENTS: RealListTag = RealListTag::new(B, "YCbCrCoefficients", Some(3));
pub static REFERENCE_BLACK_WHITE: RealListTag =
    RealListTag::new(B, "ReferenceBlackWhite", Some(6));
pub static DATE_TIME: DateTimeTag = DateTimeTag::new(B, "DateTime", DateTimeStyle::Exif);
pub static IMAGE_DESCRIPTION: TextTag = TextTag::new(B, "ImageDescription", UNBOUNDED);
pub static MAKE: TextTag = TextTag::new(B, "Make", UNBOUNDED);
pub static MODEL: TextTag = TextTag::new(B, "Model", UNBOUNDED);
pub static SOFTWARE: TextTag = TextTag::new(B, "Software", UNBOUNDED);
pub static ARTIST: TextTag = TextTag::new(B, "Artist", UNBOUNDED);
pub static COPYRIGHT: TextTag = TextTag::new(B, "Copyright", UNBOUNDED);
pub static DOCUMENT_NAME: TextTag = TextTag::new(B, "DocumentName", UNBOUNDED);
pub static HOST_COMPUTER: TextTag = TextTag::new(B, "HostComputer", UNBOUNDED);
pub static ROWS_PER_STRIP: LongTag = LongTag::lenient(B, "RowsPerStrip", 1, U32_MAX, 1);

pub static ALL: &[AnyTag] = &[
    AnyTag::Long(&IMAGE_WIDTH),
    AnyTag::Long(&IMAGE_LENGTH),
    AnyTag::LongList(&BITS_PER_SAMPLE),
    AnyTag::Long(&COMPRESSION),
    AnyTag::Long(&PHOTOMETRIC_INTERPRETATION),
    AnyTag::Long(&ORIENTATION),
    AnyTag::Long(&SAMPLES_PER_PIXEL),
    AnyTag::Long(&PLANAR_CONFIGURATION),
    AnyTag::LongList(&YCBCR_SUB_SAMPLING),
    AnyTag::Long(&YCBCR_POSITIONING),
    AnyTag::Real(&X_RESOLUTION),
    AnyTag::Real(&Y_RESOLUTION),
    AnyTag::Long(&RESOLUTION_UNIT),
    AnyTag::LongList(&TRANSFER_FUNCTION),
    AnyTag::RealList(&WHITE_POINT),
    AnyTag::RealList(&PRIMARY_CHROMATICITIES),
    AnyTag::RealList(&YCBCR_COEFFICIENTS),
    AnyTag::RealList(&REFERENCE_BLACK_WHITE),
    AnyTag::DateTime(&DATE_TIME),
    AnyTag::Text(&IMAGE_DESCRIPTION),
    AnyTag::Text(&MAKE),
    AnyTag::Text(&MODEL),
    AnyTag::Text(&SOFTWARE),
    AnyTag::Text(&ARTIST),
    AnyTag::Text(&COPYRIGHT),
    AnyTag::Text(&DOCUMENT_NAME),
    AnyTag::Text(&HOST_COMPUTER),
    AnyTag::Long(&ROWS_PER_STRIP),
];
