use crate::{error::FieldError, values::Rational, FieldValue, RawValue};

use super::{
    datetime::parse_exif_datetime,
    lookups::{Lookup, EXPOSURE_PROGRAMS, METERING_MODES, ORIENTATIONS, RESOLUTION_UNITS},
    ExifTag,
};

/// How rational fields that echo their value (`FNumber`, `FocalLength`,
/// `ExposureBiasValue`) are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RationalText {
    /// The numerator/denominator pair exactly as encoded, e.g. `f56/10`.
    #[default]
    Fraction,
    /// The computed decimal ratio, e.g. `f5.6`.
    Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub rational_text: RationalText,
    /// Largest denominator used when approximating `ExposureTime`.
    pub max_exposure_denominator: u32,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            rational_text: RationalText::default(),
            max_exposure_denominator: 8000,
        }
    }
}

impl NormalizeOptions {
    pub fn rational_text(mut self, rational_text: RationalText) -> Self {
        self.rational_text = rational_text;
        self
    }

    pub fn max_exposure_denominator(mut self, max: u32) -> Self {
        self.max_exposure_denominator = max;
        self
    }
}

/// A per-field normalization rule.
///
/// Rules only look at their own field's raw value, so they can run in any
/// order, and running one twice gives the same result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `YYYY:MM:DD HH:MM:SS` into a timestamp.
    Timestamp,
    /// `f` followed by the rational text.
    FNumber,
    /// `f` followed by the ratio, one decimal.
    MaxAperture,
    /// Rational text followed by `mm`.
    FocalLength,
    /// Integer followed by `mm`.
    FocalLength35mm,
    /// Small integer code into a label.
    Label(Lookup),
    /// Rational truncated to an integer.
    Resolution,
    /// Closest fraction with a bounded denominator.
    ExposureTime,
    /// Rational text followed by ` EV`.
    ExposureBias,
}

impl Rule {
    pub fn for_tag(tag: ExifTag) -> Option<Rule> {
        use ExifTag::*;

        let rule = match tag {
            DateTime | DateTimeOriginal | DateTimeDigitized => Rule::Timestamp,
            FNumber => Rule::FNumber,
            MaxApertureValue => Rule::MaxAperture,
            FocalLength => Rule::FocalLength,
            FocalLengthIn35mmFilm => Rule::FocalLength35mm,
            Orientation => Rule::Label(ORIENTATIONS),
            ResolutionUnit => Rule::Label(RESOLUTION_UNITS),
            ExposureProgram => Rule::Label(EXPOSURE_PROGRAMS),
            MeteringMode => Rule::Label(METERING_MODES),
            XResolution | YResolution => Rule::Resolution,
            ExposureTime => Rule::ExposureTime,
            ExposureBiasValue => Rule::ExposureBias,
            _ => return None,
        };
        Some(rule)
    }

    pub fn apply(
        self,
        tag: ExifTag,
        raw: &RawValue,
        options: &NormalizeOptions,
    ) -> Result<FieldValue, FieldError> {
        let value = match self {
            Rule::Timestamp => {
                let s = raw.as_str().ok_or_else(|| unexpected(tag, "text", raw))?;
                FieldValue::Time(parse_exif_datetime(s)?)
            }
            Rule::FNumber => {
                let text = rational_text(rational(tag, raw)?, options)?;
                format!("f{text}").into()
            }
            Rule::MaxAperture => {
                let ratio = rational(tag, raw)?.ratio()?;
                format!("f{ratio:.1}").into()
            }
            Rule::FocalLength => {
                let text = rational_text(rational(tag, raw)?, options)?;
                format!("{text}mm").into()
            }
            Rule::FocalLength35mm => {
                let v = raw.as_int().ok_or_else(|| unexpected(tag, "integer", raw))?;
                format!("{v}mm").into()
            }
            Rule::Label(lookup) => {
                let code = raw.as_int().ok_or_else(|| unexpected(tag, "integer", raw))?;
                lookup.label(code)?.into()
            }
            Rule::Resolution => {
                let r = rational(tag, raw)?;
                r.ratio()?;
                FieldValue::Int(r.0 / r.1)
            }
            Rule::ExposureTime => {
                let Rational(n, d) =
                    rational(tag, raw)?.limit_denominator(options.max_exposure_denominator)?;
                if d == 1 {
                    n.to_string().into()
                } else {
                    format!("{n}/{d}").into()
                }
            }
            Rule::ExposureBias => {
                let text = rational_text(rational(tag, raw)?, options)?;
                format!("{text} EV").into()
            }
        };
        Ok(value)
    }
}

fn unexpected(tag: ExifTag, expected: &'static str, raw: &RawValue) -> FieldError {
    FieldError::UnexpectedType {
        tag,
        expected,
        found: raw.kind(),
    }
}

fn rational(tag: ExifTag, raw: &RawValue) -> Result<Rational<i64>, FieldError> {
    raw.as_rational()
        .ok_or_else(|| unexpected(tag, "rational", raw))
}

/// The ratio is always computed, so a zero denominator fails even when the
/// fraction text is what gets displayed.
fn rational_text(r: Rational<i64>, options: &NormalizeOptions) -> Result<String, FieldError> {
    let ratio = r.ratio()?;
    let text = match options.rational_text {
        RationalText::Fraction => r.to_string(),
        RationalText::Decimal => ratio.to_string(),
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use ExifTag::*;

    fn ur(n: u32, d: u32) -> RawValue {
        (n, d).into()
    }

    fn ir(n: i32, d: i32) -> RawValue {
        (n, d).into()
    }

    fn apply(tag: ExifTag, raw: RawValue) -> Result<FieldValue, FieldError> {
        Rule::for_tag(tag)
            .expect("tag should have a rule")
            .apply(tag, &raw, &NormalizeOptions::default())
    }

    #[test_case(FNumber, ur(56, 10), "f56/10")]
    #[test_case(FNumber, ur(28, 10), "f28/10")]
    #[test_case(MaxApertureValue, ur(169, 100), "f1.7")]
    #[test_case(MaxApertureValue, ur(4, 1), "f4.0")]
    #[test_case(FocalLength, ur(50, 1), "50/1mm")]
    #[test_case(FocalLength, ur(4200, 1000), "4200/1000mm")]
    #[test_case(FocalLengthIn35mmFilm, 28_u16.into(), "28mm")]
    #[test_case(Orientation, 1_u16.into(), "Horizontal")]
    #[test_case(Orientation, 6_u16.into(), "Rotate 90 CW")]
    #[test_case(ResolutionUnit, 2_u16.into(), "Inches")]
    #[test_case(ExposureProgram, 2_u16.into(), "Program AE")]
    #[test_case(MeteringMode, 5_u16.into(), "Multi-segment")]
    #[test_case(ExposureTime, ur(1, 250), "1/250")]
    #[test_case(ExposureTime, ur(10, 2500), "1/250")]
    #[test_case(ExposureTime, ur(1, 10000), "1/8000")]
    #[test_case(ExposureTime, ur(30, 1), "30")]
    #[test_case(ExposureTime, ur(5, 2), "5/2")]
    #[test_case(ExposureBiasValue, ir(-1, 3), "-1/3 EV")]
    #[test_case(ExposureBiasValue, ir(0, 1), "0/1 EV")]
    fn text_rules(tag: ExifTag, raw: RawValue, expected: &str) {
        assert_eq!(apply(tag, raw).unwrap(), FieldValue::Text(expected.to_owned()));
    }

    #[test_case(XResolution, ur(300, 1), 300)]
    #[test_case(YResolution, ur(72, 1), 72)]
    #[test_case(XResolution, ur(1999, 10), 199)]
    fn resolution(tag: ExifTag, raw: RawValue, expected: i64) {
        assert_eq!(apply(tag, raw).unwrap(), FieldValue::Int(expected));
    }

    #[test]
    fn timestamp() {
        let v = apply(DateTimeOriginal, "2021:05:17 14:30:00".into()).unwrap();
        assert_eq!(v.to_string(), "2021-05-17 14:30:00");

        assert_eq!(
            apply(DateTime, "2021/05/17 14:30:00".into()),
            Err(FieldError::MalformedTimestamp("2021/05/17 14:30:00".into()))
        );
    }

    #[test]
    fn decimal_text() {
        let options = NormalizeOptions::default().rational_text(RationalText::Decimal);
        let raw = ur(56, 10);
        let v = Rule::FNumber.apply(FNumber, &raw, &options).unwrap();
        assert_eq!(v, FieldValue::Text("f5.6".into()));

        let raw = ir(-1, 2);
        let v = Rule::ExposureBias
            .apply(ExposureBiasValue, &raw, &options)
            .unwrap();
        assert_eq!(v, FieldValue::Text("-0.5 EV".into()));
    }

    #[test]
    fn exposure_denominator_option() {
        let options = NormalizeOptions::default().max_exposure_denominator(100);
        let raw = ur(1, 120);
        let v = Rule::ExposureTime
            .apply(ExposureTime, &raw, &options)
            .unwrap();
        assert_eq!(v, FieldValue::Text("1/100".into()));
    }

    #[test_case(FNumber)]
    #[test_case(MaxApertureValue)]
    #[test_case(FocalLength)]
    #[test_case(XResolution)]
    #[test_case(ExposureTime)]
    #[test_case(ExposureBiasValue)]
    fn division_by_zero(tag: ExifTag) {
        assert_eq!(
            apply(tag, ur(7, 0)),
            Err(FieldError::DivisionByZero(7))
        );
    }

    #[test]
    fn out_of_range() {
        assert!(matches!(
            apply(Orientation, 9_u16.into()),
            Err(FieldError::OutOfRange { code: 9, len: 9, .. })
        ));
        assert!(matches!(
            apply(ResolutionUnit, 4_u16.into()),
            Err(FieldError::OutOfRange { code: 4, len: 4, .. })
        ));
    }

    #[test_case(Orientation, "Horizontal".into(); "label given as text")]
    #[test_case(FocalLengthIn35mmFilm, "35mm".into(); "length given as text")]
    #[test_case(FNumber, "f56/10".into(); "fnumber given as text")]
    #[test_case(XResolution, 300_u16.into(); "resolution given as integer")]
    #[test_case(DateTimeOriginal, 20210517_u32.into(); "timestamp given as integer")]
    fn wrong_shape(tag: ExifTag, raw: RawValue) {
        assert!(matches!(
            apply(tag, raw),
            Err(FieldError::UnexpectedType { .. })
        ));
    }

    #[test]
    fn no_rule() {
        assert_eq!(Rule::for_tag(Make), None);
        assert_eq!(Rule::for_tag(ISOSpeedRatings), None);
    }
}
