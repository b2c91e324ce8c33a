use std::collections::{BTreeMap, HashMap};

use crate::{Error, RawTagMap};

use super::{
    normalize::{NormalizeOptions, Rule},
    table::{ExifTables, FieldEntry, StandardFieldTable, UserDefinedFieldTable},
    ExifTag,
};

/// Turns a decoder's raw tag map into [`ExifTables`].
///
/// The extractor holds no per-image state; one instance can serve any number
/// of images, from any number of threads.
///
/// ```rust
/// use exif_fields::*;
///
/// let raw: RawTagMap = [
///     (0x9003, RawValue::from("2021:05:17 14:30:00")),
///     (0x0112, 1_u16.into()),
///     (0x829d, (56_u32, 10_u32).into()),
///     (0xea1d, "custom-string".into()),
/// ]
/// .into_iter()
/// .collect();
///
/// let exif = MetadataExtractor::new().extract(Some(raw)).unwrap();
///
/// let standard = exif.standard();
/// assert_eq!(standard.len(), ExifTag::ALL.len());
/// assert_eq!(standard.processed(ExifTag::Orientation).unwrap().to_string(), "Horizontal");
/// assert_eq!(standard.processed(ExifTag::FNumber).unwrap().to_string(), "f56/10");
/// assert!(standard.raw(ExifTag::Make).is_none());
///
/// assert_eq!(exif.user_defined().get(0xea1d).unwrap().raw(), Some(&RawValue::from("custom-string")));
///
/// // No Exif block at all
/// assert!(MetadataExtractor::new().extract(None).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetadataExtractor {
    options: NormalizeOptions,
}

impl MetadataExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: NormalizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Classify and normalize `raw`.
    ///
    /// `None` means the decoder found no Exif block; the result is then `None`
    /// too, which is different from the tables of an Exif block without
    /// values. Normalization failures never abort the extraction, they are
    /// recorded on the failing entry (see [`FieldEntry::error`]).
    #[tracing::instrument(skip_all)]
    pub fn extract(&self, raw: Option<RawTagMap>) -> Option<ExifTables> {
        let Some(raw) = raw else {
            tracing::warn!(error = %Error::NoExifData, "skip exif extraction");
            return None;
        };

        let mut tables = Self::classify(raw);
        self.normalize(tables.standard_mut());
        Some(tables)
    }

    /// Split `raw` into the standard and the user-defined table, without
    /// normalizing anything: every `processed` value equals its raw value.
    pub fn classify(mut raw: RawTagMap) -> ExifTables {
        let standard: HashMap<ExifTag, FieldEntry> = ExifTag::ALL
            .iter()
            .map(|tag| {
                let value = raw.remove(tag.code());
                (*tag, FieldEntry::new(tag.code(), value))
            })
            .collect();

        // Whatever the catalog did not claim is user-defined.
        let user_defined: BTreeMap<u16, FieldEntry> = raw
            .into_iter()
            .map(|(code, value)| (code, FieldEntry::new(code, Some(value))))
            .collect();

        tracing::debug!(
            standard = standard.values().filter(|e| e.has_value()).count(),
            user_defined = user_defined.len(),
            "classified exif tags"
        );

        ExifTables::new(
            StandardFieldTable::new(standard),
            UserDefinedFieldTable::new(user_defined),
        )
    }

    /// Run each standard field's rule over its raw value.
    ///
    /// Entries without a raw value or without a rule are left alone. Since
    /// rules only read raw values, normalizing a table twice changes nothing.
    pub fn normalize(&self, table: &mut StandardFieldTable) {
        for (tag, entry) in table.iter_mut() {
            let Some(rule) = Rule::for_tag(tag) else {
                continue;
            };
            let Some(raw) = entry.raw() else {
                continue;
            };

            match rule.apply(tag, raw, &self.options) {
                Ok(value) => entry.set_processed(value),
                Err(e) => {
                    tracing::warn!(%tag, raw = %raw, error = %e, "normalize field failed");
                    entry.fail(e);
                }
            }
        }
    }
}
