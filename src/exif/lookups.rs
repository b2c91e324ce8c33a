use crate::error::FieldError;

use super::ExifTag;

/// An ordered, 0-indexed label table for an enumerated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup {
    tag: ExifTag,
    labels: &'static [&'static str],
}

impl Lookup {
    const fn new(tag: ExifTag, labels: &'static [&'static str]) -> Self {
        Self { tag, labels }
    }

    pub fn tag(&self) -> ExifTag {
        self.tag
    }

    pub fn labels(&self) -> &'static [&'static str] {
        self.labels
    }

    /// Label for `code`. Codes outside the table are a data error and are
    /// never clamped.
    pub fn label(&self, code: i64) -> Result<&'static str, FieldError> {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.labels.get(i))
            .copied()
            .ok_or(FieldError::OutOfRange {
                tag: self.tag,
                code,
                len: self.labels.len(),
            })
    }
}

/// Index 0 is an unused placeholder; Exif defines no orientation 0.
pub const ORIENTATIONS: Lookup = Lookup::new(
    ExifTag::Orientation,
    &[
        "",
        "Horizontal",
        "Mirror horizontal",
        "Rotate 180",
        "Mirror vertical",
        "Mirror horizontal and rotate 270 CW",
        "Rotate 90 CW",
        "Mirror horizontal and rotate 90 CW",
        "Rotate 270 CW",
    ],
);

pub const RESOLUTION_UNITS: Lookup = Lookup::new(
    ExifTag::ResolutionUnit,
    &["", "Undefined", "Inches", "Centimetres"],
);

pub const EXPOSURE_PROGRAMS: Lookup = Lookup::new(
    ExifTag::ExposureProgram,
    &[
        "Undefined",
        "Manual",
        "Program AE",
        "Aperture-priority AE",
        "Shutter speed priority AE",
        "Creative (Slow speed)",
        "Action (High speed)",
        "Portrait",
        "Landscape",
        "Bulb",
    ],
);

pub const METERING_MODES: Lookup = Lookup::new(
    ExifTag::MeteringMode,
    &[
        "Undefined",
        "Average",
        "Center-weighted average",
        "Spot",
        "Multi-spot",
        "Multi-segment",
        "Partial",
    ],
);
