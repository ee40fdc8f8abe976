//! IPTC IIM record 2 (application record).
//!
//! Length limits follow the IIM 4.2 dataset definitions. Repeatable datasets
//! are list tags, and their limit applies to each element.

use super::{
    AnyTag, Charset, CodedTag, DateTimeStyle, DateTimeTag, FixedTextTag, LongTag, TextListTag,
    TextTag,
};
use crate::{Block, codes::CodeTableId};

const B: Block = Block::Iptc;

pub static OBJECT_NAME: TextTag = TextTag::new(B, "ObjectName", 64);
pub static EDIT_STATUS: TextTag = TextTag::new(B, "EditStatus", 64);
pub static EDITORIAL_UPDATE: LongTag = LongTag::strict(B, "EditorialUpdate", 1, 1, 1);

/// 1 is most urgent, 8 least. 0 and 9 are reserved.
pub static URGENCY: LongTag = LongTag::strict(B, "Urgency", 1, 8, 5);
pub static SUBJECT_REFERENCE: TextListTag = TextListTag::new(B, "SubjectReference", 236);
pub static CATEGORY: FixedTextTag = FixedTextTag::new(B, "Category", 1, 3, Charset::Alpha);
pub static SUPPLEMENTAL_CATEGORIES: TextListTag =
    TextListTag::new(B, "SupplementalCategories", 32);
pub static FIXTURE_IDENTIFIER: TextTag = TextTag::new(B, "FixtureIdentifier", 32);
pub static KEYWORDS: TextListTag = TextListTag::new(B, "Keywords", 64);
pub static CONTENT_LOCATION_CODE: TextListTag = TextListTag::new(B, "ContentLocationCode", 3);
pub static CONTENT_LOCATION_NAME: TextListTag = TextListTag::new(B, "ContentLocationName", 64);
pub static RELEASE_DATE: DateTimeTag = DateTimeTag::new(B, "ReleaseDate", DateTimeStyle::Iptc);
pub static EXPIRATION_DATE: DateTimeTag =
    DateTimeTag::new(B, "ExpirationDate", DateTimeStyle::Iptc);
pub static SPECIAL_INSTRUCTIONS: TextTag = TextTag::new(B, "SpecialInstructions", 256);
pub static ACTION_ADVISED: LongTag = LongTag::strict(B, "ActionAdvised", 1, 4, 1);
pub static REFERENCE_SERVICE: TextListTag = TextListTag::new(B, "ReferenceService", 10);
pub static REFERENCE_NUMBER: TextListTag = TextListTag::new(B, "ReferenceNumber", 8);
pub static DATE_CREATED: DateTimeTag = DateTimeTag::new(B, "DateCreated", DateTimeStyle::Iptc);
pub static DIGITAL_CREATION_DATE: DateTimeTag =
    DateTimeTag::new(B, "DigitalCreationDate", DateTimeStyle::Iptc);
pub static ORIGINATING_PROGRAM: TextTag = TextTag::new(B, "OriginatingProgram", 32);
pub static PROGRAM_VERSION: TextTag = TextTag::new(B, "ProgramVersion", 10);
pub static OBJECT_CYCLE: CodedTag = CodedTag::new(B, "ObjectCycle", CodeTableId::ObjectCycle);
pub static BYLINE: TextListTag = TextListTag::new(B, "Byline", 32);
pub static BYLINE_TITLE: TextListTag = TextListTag::new(B, "BylineTitle", 32);
pub static CITY: TextTag = TextTag::new(B, "City", 32);
pub static SUB_LOCATION: TextTag = TextTag::new(B, "SubLocation", 32);
pub static PROVINCE_STATE: TextTag = TextTag::new(B, "ProvinceState", 32);

/// ISO 3166 three-letter code.
pub static COUNTRY_CODE: FixedTextTag =
    FixedTextTag::new(B, "CountryCode", 3, 3, Charset::UpperAlpha);
pub static COUNTRY_NAME: TextTag = TextTag::new(B, "CountryName", 64);
pub static ORIGINAL_TRANSMISSION_REFERENCE: TextTag =
    TextTag::new(B, "OriginalTransmissionReference", 32);
pub static HEADLINE: TextTag = TextTag::new(B, "Headline", 256);
pub static CREDIT: TextTag = TextTag::new(B, "Credit", 32);
pub static SOURCE: TextTag = TextTag::new(B, "Source", 32);
pub static COPYRIGHT_NOTICE: TextTag = TextTag::new(B, "CopyrightNotice", 128);
pub static CONTACT: TextListTag = TextListTag::new(B, "Contact", 128);
pub static CAPTION: TextTag = TextTag::new(B, "Caption", 2000);
pub static WRITER_EDITOR: TextListTag = TextListTag::new(B, "WriterEditor", 32);
pub static IMAGE_TYPE: CodedTag = CodedTag::new(B, "ImageType", CodeTableId::ImageType);
pub static IMAGE_ORIENTATION: CodedTag =
    CodedTag::new(B, "ImageOrientation", CodeTableId::ImageOrientation);

/// ISO 639 language code, two or three letters.
pub static LANGUAGE_IDENTIFIER: FixedTextTag =
    FixedTextTag::new(B, "LanguageIdentifier", 2, 3, Charset::Alpha);
pub static OBJECT_ATTRIBUTE_REFERENCE: TextListTag =
    TextListTag::new(B, "ObjectAttributeReference", 68);

pub static ALL: &[AnyTag] = &[
    AnyTag::Text(&OBJECT_NAME),
    AnyTag::Text(&EDIT_STATUS),
    AnyTag::Long(&EDITORIAL_UPDATE),
    AnyTag::Long(&URGENCY),
    AnyTag::TextList(&SUBJECT_REFERENCE),
    AnyTag::FixedText(&CATEGORY),
    AnyTag::TextList(&SUPPLEMENTAL_CATEGORIES),
    AnyTag::Text(&FIXTURE_IDENTIFIER),
    AnyTag::TextList(&KEYWORDS),
    AnyTag::TextList(&CONTENT_LOCATION_CODE),
    AnyTag::TextList(&CONTENT_LOCATION_NAME),
    AnyTag::DateTime(&RELEASE_DATE),
    AnyTag::DateTime(&EXPIRATION_DATE),
    AnyTag::Text(&SPECIAL_INSTRUCTIONS),
    AnyTag::Long(&ACTION_ADVISED),
    AnyTag::TextList(&REFERENCE_SERVICE),
    AnyTag::TextList(&REFERENCE_NUMBER),
    AnyTag::DateTime(&DATE_CREATED),
    AnyTag::DateTime(&DIGITAL_CREATION_DATE),
    AnyTag::Text(&ORIGINATING_PROGRAM),
    AnyTag::Text(&PROGRAM_VERSION),
    AnyTag::Coded(&OBJECT_CYCLE),
    AnyTag::TextList(&BYLINE),
    AnyTag::TextList(&BYLINE_TITLE),
    AnyTag::Text(&CITY),
    AnyTag::Text(&SUB_LOCATION),
    AnyTag::Text(&PROVINCE_STATE),
    AnyTag::FixedText(&COUNTRY_CODE),
    AnyTag::Text(&COUNTRY_NAME),
    AnyTag::Text(&ORIGINAL_TRANSMISSION_REFERENCE),
    AnyTag::Text(&HEADLINE),
    AnyTag::Text(&CREDIT),
    AnyTag::Text(&SOURCE),
    AnyTag::Text(&COPYRIGHT_NOTICE),
    AnyTag::TextList(&CONTACT),
    AnyTag::Text(&CAPTION),
    AnyTag::TextList(&WRITER_EDITOR),
    AnyTag::Coded(&IMAGE_TYPE),
    AnyTag::Coded(&IMAGE_ORIENTATION),
    AnyTag::FixedText(&LANGUAGE_IDENTIFIER),
    AnyTag::TextList(&OBJECT_ATTRIBUTE_REFERENCE),
];
