use std::path::Path;

use crate::{image::TagDecoder, RawTagMap};

/// Reads tag maps from JSON tag dumps, as written by external decoders.
///
/// A dump is a JSON object mapping decimal tag codes to values, e.g.
/// `{"274": {"Int": 1}, "33437": {"URational": [56, 10]}}`. The document
/// `null` stands for an image without Exif.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTagDump;

impl TagDecoder for JsonTagDump {
    #[tracing::instrument(skip(self))]
    fn decode(&self, path: &Path) -> crate::Result<Option<RawTagMap>> {
        let data = std::fs::read(path)?;
        let raw: Option<RawTagMap> = serde_json::from_slice(&data)?;
        tracing::debug!(tags = raw.as_ref().map(RawTagMap::len), "tag dump loaded");
        Ok(raw)
    }
}

/// Parse a JSON tag dump held in memory.
pub fn parse_tag_dump(s: &str) -> crate::Result<Option<RawTagMap>> {
    Ok(serde_json::from_str(s)?)
}
