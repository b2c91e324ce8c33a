use exif_fields::{MetadataExtractor, RawTagMap, RawValue};

fn main() {
    let extractor = MetadataExtractor::new();

    afl::fuzz!(|data: &[u8]| {
        if let Ok(s) = std::str::from_utf8(data) {
            if let Ok(raw) = exif_fields::parse_tag_dump(s) {
                let _ = extractor.extract(raw);
            }
        }

        // Arbitrary codes and values, so the rules see junk too.
        let raw: RawTagMap = data
            .chunks(6)
            .map(|c| {
                let code = u16::from_le_bytes([c[0], c.get(1).copied().unwrap_or(0)]);
                let n = c.get(2..4).map_or(0, |x| u16::from_le_bytes([x[0], x[1]]));
                let d = c.get(4..6).map_or(0, |x| u16::from_le_bytes([x[0], x[1]]));
                let value = match code % 4 {
                    0 => RawValue::from((u32::from(n), u32::from(d))),
                    1 => RawValue::from((n as i16 as i32, d as i16 as i32)),
                    2 => RawValue::from(String::from_utf8_lossy(c).into_owned()),
                    _ => RawValue::from(n),
                };
                (code, value)
            })
            .collect();
        let _ = extractor.extract(Some(raw));
    });
}
