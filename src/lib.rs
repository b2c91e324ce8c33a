//! exif-fields turns the raw Exif tags of an image into a fixed, display-ready
//! set of metadata fields.
//!
//! Decoding image files is left to a [`TagDecoder`]; this crate starts from
//! the decoder's tag map (tag code => [`RawValue`]) and produces
//! [`ExifTables`]:
//!
//! - a [`StandardFieldTable`] with exactly one entry per known tag (see
//!   [`ExifTag::ALL`]), whether or not the image carried it,
//! - a [`UserDefinedFieldTable`] holding every tag the catalog doesn't know.
//!
//! Standard fields with a normalization rule get a human-readable
//! `processed` value: lookup codes become labels, timestamps are parsed,
//! rationals are rendered as f-numbers, focal lengths, exposure times etc.
//! A failing rule only affects its own field.
//!
//! ## Key Features
//!
//! - Full catalog coverage: a consumer can always look up `FNumber` and get
//!   an entry, it's just empty when the image has no f-number.
//!
//! - "No Exif" is distinct from "Exif without values": an image without an
//!   Exif block yields no tables at all (or [`Error::NoExifData`] from
//!   [`ExifImage::exif`]).
//!
//! - Stateless extraction: [`MetadataExtractor`] holds only its options, so
//!   one instance can be shared among threads.
//!
//! ## Usage
//!
//! ```rust
//! use exif_fields::*;
//!
//! fn main() -> Result<()> {
//!     let mut raw = RawTagMap::new();
//!     raw.insert(ExifTag::DateTimeOriginal.code(), "2021:05:17 14:30:00");
//!     raw.insert(ExifTag::Orientation.code(), 1_u16);
//!     raw.insert(ExifTag::FNumber.code(), (56_u32, 10_u32));
//!     raw.insert(ExifTag::XResolution.code(), (300_u32, 1_u32));
//!     raw.insert(ExifTag::ExposureTime.code(), (10_u32, 2500_u32));
//!
//!     let exif = MetadataExtractor::new().extract(Some(raw)).unwrap();
//!     let standard = exif.standard();
//!
//!     assert_eq!(
//!         standard.processed(ExifTag::DateTimeOriginal).unwrap().to_string(),
//!         "2021-05-17 14:30:00"
//!     );
//!     assert_eq!(standard.processed(ExifTag::Orientation).unwrap().to_string(), "Horizontal");
//!     assert_eq!(standard.processed(ExifTag::FNumber).unwrap().to_string(), "f56/10");
//!     assert_eq!(standard.processed(ExifTag::XResolution).unwrap().as_int(), Some(300));
//!     assert_eq!(standard.processed(ExifTag::ExposureTime).unwrap().to_string(), "1/250");
//!
//!     // Every catalog tag has an entry, populated or not
//!     let entry = exif.entry_by_code(0x010f)?;
//!     assert_eq!(entry.tag(), ExifTag::Make.code());
//!     assert!(entry.raw().is_none());
//!
//!     // Raw values are always kept next to the processed ones
//!     assert_eq!(
//!         standard.raw(ExifTag::FNumber),
//!         Some(&RawValue::URational((56, 10).into()))
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Normalization Options
//!
//! ```rust
//! use exif_fields::*;
//!
//! let options = NormalizeOptions::default()
//!     .rational_text(RationalText::Decimal)
//!     .max_exposure_denominator(1000);
//! let extractor = MetadataExtractor::with_options(options);
//!
//! let raw: RawTagMap = [
//!     (ExifTag::FNumber.code(), RawValue::from((56_u32, 10_u32))),
//!     (ExifTag::ExposureBiasValue.code(), (-1_i32, 2_i32).into()),
//! ]
//! .into_iter()
//! .collect();
//!
//! let exif = extractor.extract(Some(raw)).unwrap();
//! assert_eq!(exif[ExifTag::FNumber].processed().unwrap().to_string(), "f5.6");
//! assert_eq!(exif[ExifTag::ExposureBiasValue].processed().unwrap().to_string(), "-0.5 EV");
//! ```
//!
//! ## JSON Tag Dumps
//!
//! Enable the `json_dump` feature to serialize [`ExifTables`] with serde and
//! to read tag maps from JSON dumps with [`JsonTagDump`]:
//!
//! ```rust
//! #[cfg(feature = "json_dump")]
//! fn main() -> exif_fields::Result<()> {
//!     use exif_fields::*;
//!
//!     let img = ExifImage::load("./testdata/scenario.json", &JsonTagDump)?;
//!     let exif = img.exif()?;
//!     assert_eq!(exif[ExifTag::Orientation].processed().unwrap().to_string(), "Horizontal");
//!
//!     let img = ExifImage::load("./testdata/no-exif.json", &JsonTagDump)?;
//!     assert!(matches!(img.exif(), Err(Error::NoExifData)));
//!     Ok(())
//! }
//!
//! #[cfg(not(feature = "json_dump"))]
//! fn main() {}
//! ```

pub use error::{Error, FieldError};
pub type Result<T> = std::result::Result<T, Error>;

pub use exif::lookups;
pub use exif::{
    field_name_for, ExifTables, ExifTag, FieldEntry, Lookup, MetadataExtractor,
    NormalizeOptions, RationalText, Rule, StandardFieldTable, UserDefinedFieldTable,
};
pub use image::{ExifImage, TagDecoder};
pub use values::{FieldValue, IRational, Rational, RawTagMap, RawValue, URational};

#[cfg(feature = "json_dump")]
pub use dump::{parse_tag_dump, JsonTagDump};

#[cfg(feature = "json_dump")]
mod dump;
mod error;
mod exif;
mod image;
mod values;

#[cfg(test)]
mod testkit;
