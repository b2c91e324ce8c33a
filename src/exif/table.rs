use std::{
    collections::{BTreeMap, HashMap},
    ops::Index,
};

#[cfg(feature = "json_dump")]
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::{error::FieldError, FieldValue, RawValue};

use super::ExifTag;

/// One classified tag.
#[cfg_attr(feature = "json_dump", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntry {
    tag: u16,
    raw: Option<RawValue>,
    processed: Option<FieldValue>,
    #[cfg_attr(
        feature = "json_dump",
        serde(skip_serializing_if = "Option::is_none", serialize_with = "ser_error")
    )]
    error: Option<FieldError>,
}

impl FieldEntry {
    pub(crate) fn new(tag: u16, raw: Option<RawValue>) -> Self {
        let processed = raw.clone().map(FieldValue::Raw);
        Self {
            tag,
            raw,
            processed,
            error: None,
        }
    }

    /// Tag code, as assigned by the Exif standard or reported by the decoder.
    pub fn tag(&self) -> u16 {
        self.tag
    }

    /// The value as the decoder supplied it, `None` if the image lacks it.
    pub fn raw(&self) -> Option<&RawValue> {
        self.raw.as_ref()
    }

    /// The display-ready value. Equals the raw value for fields without a
    /// normalization rule, and for fields whose rule failed.
    pub fn processed(&self) -> Option<&FieldValue> {
        self.processed.as_ref()
    }

    /// Why normalization of this field failed, if it did.
    pub fn error(&self) -> Option<&FieldError> {
        self.error.as_ref()
    }

    pub fn has_value(&self) -> bool {
        self.raw.is_some()
    }

    pub(crate) fn set_processed(&mut self, value: FieldValue) {
        self.processed = Some(value);
        self.error = None;
    }

    pub(crate) fn fail(&mut self, error: FieldError) {
        self.processed = self.raw.clone().map(FieldValue::Raw);
        self.error = Some(error);
    }
}

#[cfg(feature = "json_dump")]
fn ser_error<S: Serializer>(error: &Option<FieldError>, serializer: S) -> Result<S::Ok, S::Error> {
    match error {
        Some(e) => serializer.serialize_str(&e.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Standard fields, keyed by catalog tag.
///
/// Always holds one entry per catalog tag, whatever the image contained:
/// missing data is an entry with a `None` raw value, never a missing key.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardFieldTable {
    entries: HashMap<ExifTag, FieldEntry>,
}

impl StandardFieldTable {
    pub(crate) fn new(entries: HashMap<ExifTag, FieldEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, tag: ExifTag) -> Option<&FieldEntry> {
        self.entries.get(&tag)
    }

    /// Look an entry up by its canonical field name, e.g. `"FNumber"`.
    pub fn get_by_name(&self, name: &str) -> Option<&FieldEntry> {
        name.parse::<ExifTag>().ok().and_then(|t| self.get(t))
    }

    /// Shortcut for `get(tag).and_then(FieldEntry::processed)`.
    pub fn processed(&self, tag: ExifTag) -> Option<&FieldValue> {
        self.get(tag).and_then(FieldEntry::processed)
    }

    pub fn raw(&self, tag: ExifTag) -> Option<&RawValue> {
        self.get(tag).and_then(FieldEntry::raw)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (ExifTag, &FieldEntry)> {
        ExifTag::ALL
            .iter()
            .filter_map(|t| self.entries.get(t).map(|e| (*t, e)))
    }

    /// Entries the image actually populated, in catalog order.
    pub fn populated(&self) -> impl Iterator<Item = (ExifTag, &FieldEntry)> {
        self.iter().filter(|(_, e)| e.has_value())
    }

    /// Entries whose normalization failed.
    pub fn errors(&self) -> impl Iterator<Item = (ExifTag, &FieldError)> {
        self.iter().filter_map(|(t, e)| e.error().map(|err| (t, err)))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (ExifTag, &mut FieldEntry)> {
        self.entries.iter_mut().map(|(t, e)| (*t, e))
    }
}

impl Index<ExifTag> for StandardFieldTable {
    type Output = FieldEntry;

    fn index(&self, tag: ExifTag) -> &Self::Output {
        &self.entries[&tag]
    }
}

#[cfg(feature = "json_dump")]
impl Serialize for StandardFieldTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (tag, entry) in self.iter() {
            map.serialize_entry(tag.name(), entry)?;
        }
        map.end()
    }
}

/// Tags the image carried that the catalog does not know, keyed by raw code.
#[cfg_attr(feature = "json_dump", derive(Serialize))]
#[cfg_attr(feature = "json_dump", serde(transparent))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserDefinedFieldTable {
    entries: BTreeMap<u16, FieldEntry>,
}

impl UserDefinedFieldTable {
    pub(crate) fn new(entries: BTreeMap<u16, FieldEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, code: u16) -> Option<&FieldEntry> {
        self.entries.get(&code)
    }

    pub fn contains(&self, code: u16) -> bool {
        self.entries.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending tag code order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &FieldEntry)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}

/// The classified and normalized metadata of one image.
///
/// Built fresh by every extraction and never modified afterwards. An image
/// without an Exif block has no `ExifTables` at all, see
/// [`MetadataExtractor::extract`](crate::MetadataExtractor::extract).
#[cfg_attr(feature = "json_dump", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ExifTables {
    standard: StandardFieldTable,
    user_defined: UserDefinedFieldTable,
}

impl ExifTables {
    pub(crate) fn new(standard: StandardFieldTable, user_defined: UserDefinedFieldTable) -> Self {
        Self {
            standard,
            user_defined,
        }
    }

    pub fn standard(&self) -> &StandardFieldTable {
        &self.standard
    }

    pub fn user_defined(&self) -> &UserDefinedFieldTable {
        &self.user_defined
    }

    pub(crate) fn standard_mut(&mut self) -> &mut StandardFieldTable {
        &mut self.standard
    }

    /// Find the entry for a raw tag code in whichever table holds it.
    ///
    /// Every code the image declared resolves; only codes the image never
    /// carried and the catalog does not know give
    /// [`Error::CatalogLookupMiss`](crate::Error::CatalogLookupMiss).
    pub fn entry_by_code(&self, code: u16) -> crate::Result<&FieldEntry> {
        let entry = match ExifTag::try_from(code) {
            Ok(tag) => self.standard.get(tag),
            Err(_) => self.user_defined.get(code),
        };
        entry.ok_or(crate::Error::CatalogLookupMiss(code))
    }

    pub fn into_parts(self) -> (StandardFieldTable, UserDefinedFieldTable) {
        (self.standard, self.user_defined)
    }
}

impl Index<ExifTag> for ExifTables {
    type Output = FieldEntry;

    fn index(&self, tag: ExifTag) -> &Self::Output {
        &self.standard[tag]
    }
}
