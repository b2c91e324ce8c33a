use std::{collections::HashMap, fmt::Display};

use chrono::NaiveDateTime;

#[cfg(feature = "json_dump")]
use serde::{Deserialize, Serialize, Serializer};

use crate::error::FieldError;

/// A tag value as handed over by the image decoder.
///
/// Opaque to the extractor, except where a field's normalization rule
/// interprets it.
#[cfg_attr(feature = "json_dump", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Int(i64),
    IntArray(Vec<i64>),
    Text(String),
    Bytes(Vec<u8>),

    URational(URational),
    IRational(IRational),
    URationalArray(Vec<URational>),
}

impl RawValue {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            RawValue::Int(_) => "integer",
            RawValue::IntArray(_) => "integer array",
            RawValue::Text(_) => "text",
            RawValue::Bytes(_) => "bytes",
            RawValue::URational(_) | RawValue::IRational(_) => "rational",
            RawValue::URationalArray(_) => "rational array",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            RawValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RawValue::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// Either rational flavor, widened to `i64` components.
    pub fn as_rational(&self) -> Option<Rational<i64>> {
        match self {
            RawValue::URational(v) => Some(v.widen()),
            RawValue::IRational(v) => Some(v.widen()),
            _ => None,
        }
    }

    pub fn as_urational_array(&self) -> Option<&[URational]> {
        if let RawValue::URationalArray(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

impl Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawValue::Int(v) => Display::fmt(v, f),
            RawValue::IntArray(v) => {
                let s = v
                    .iter()
                    .map(|x| x.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{s}]")
            }
            RawValue::Text(v) => f.write_str(v),
            RawValue::Bytes(v) => {
                // Display up to MAX_DISPLAY_NUM bytes, and replace the rest with ellipsis
                const MAX_DISPLAY_NUM: usize = 8;
                let s = v
                    .iter()
                    .map(|x| format!("0x{x:02x}"))
                    .take(MAX_DISPLAY_NUM + 1)
                    .enumerate()
                    .map(|(i, x)| {
                        if i >= MAX_DISPLAY_NUM {
                            "...".to_owned()
                        } else {
                            x
                        }
                    })
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "Bytes[{s}]")
            }
            RawValue::URational(v) => Display::fmt(&v.widen(), f),
            RawValue::IRational(v) => Display::fmt(&v.widen(), f),
            RawValue::URationalArray(v) => {
                let s = v
                    .iter()
                    .map(|x| x.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{s}]")
            }
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),+) => {
        $(
            impl From<$t> for RawValue {
                fn from(value: $t) -> Self {
                    RawValue::Int(value.into())
                }
            }
        )+
    };
}

impl_from_int!(u8, u16, u32, i8, i16, i32, i64);

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        value.to_owned().into()
    }
}

impl From<Vec<u8>> for RawValue {
    fn from(value: Vec<u8>) -> Self {
        RawValue::Bytes(value)
    }
}

impl From<(u32, u32)> for RawValue {
    fn from(value: (u32, u32)) -> Self {
        Self::URational(value.into())
    }
}

impl From<(i32, i32)> for RawValue {
    fn from(value: (i32, i32)) -> Self {
        Self::IRational(value.into())
    }
}

impl From<Vec<URational>> for RawValue {
    fn from(value: Vec<URational>) -> Self {
        Self::URationalArray(value)
    }
}

pub type URational = Rational<u32>;
pub type IRational = Rational<i32>;

/// A `(numerator, denominator)` pair, kept exactly as the camera encoded it.
#[cfg_attr(feature = "json_dump", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Rational<T>(pub T, pub T);

impl<T> Rational<T>
where
    T: Copy + Into<i64>,
{
    pub fn widen(&self) -> Rational<i64> {
        Rational(self.0.into(), self.1.into())
    }
}

impl Rational<i64> {
    /// The decimal value of this rational.
    pub fn ratio(&self) -> Result<f64, FieldError> {
        if self.1 == 0 {
            return Err(FieldError::DivisionByZero(self.0));
        }
        Ok(self.0 as f64 / self.1 as f64)
    }

    /// Reduce to lowest terms with a positive denominator.
    pub fn reduce(&self) -> Result<Rational<i64>, FieldError> {
        if self.1 == 0 {
            return Err(FieldError::DivisionByZero(self.0));
        }
        let g = gcd(self.0.unsigned_abs(), self.1.unsigned_abs()) as i64;
        let sign = if self.1 < 0 { -1 } else { 1 };
        Ok(Rational(sign * self.0 / g, sign * self.1 / g))
    }

    /// The closest rational whose denominator is at most `max_den`.
    ///
    /// Walks the continued fraction expansion, then picks between the last
    /// convergent and the best semiconvergent. On a tie the convergent wins.
    /// Components are expected to fit in 32 bits, as all Exif rationals do.
    pub fn limit_denominator(&self, max_den: u32) -> Result<Rational<i64>, FieldError> {
        let Rational(num, den) = self.reduce()?;
        let max_den = i64::from(max_den.max(1));
        if den <= max_den {
            return Ok(Rational(num, den));
        }

        let sign = num.signum();
        let (n0, d0) = (num.abs(), den);

        let (mut p0, mut q0, mut p1, mut q1) = (0_i64, 1_i64, 1_i64, 0_i64);
        let (mut n, mut d) = (n0, d0);
        loop {
            let a = n / d;
            let q2 = q0 + a * q1;
            if q2 > max_den {
                break;
            }
            (p0, q0, p1, q1) = (p1, q1, p0 + a * p1, q2);
            (n, d) = (d, n - a * d);
        }

        let k = (max_den - q0) / q1;
        let (bp, bq) = (p0 + k * p1, q0 + k * q1);

        // |p/q - n0/d0| compared exactly; d0 cancels out on both sides.
        let dist = |p: i64, q: i64| -> i128 {
            (i128::from(p) * i128::from(d0) - i128::from(n0) * i128::from(q)).abs()
        };
        let convergent_closer = dist(p1, q1) * i128::from(bq) <= dist(bp, bq) * i128::from(q1);

        let (p, q) = if convergent_closer { (p1, q1) } else { (bp, bq) };
        Ok(Rational(sign * p, q))
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

impl<T: Display> Display for Rational<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, self.1)
    }
}

impl<T> From<(T, T)> for Rational<T>
where
    T: Copy,
{
    fn from(value: (T, T)) -> Self {
        Self(value.0, value.1)
    }
}

impl<T> From<Rational<T>> for (T, T)
where
    T: Copy,
{
    fn from(value: Rational<T>) -> Self {
        (value.0, value.1)
    }
}

/// A normalized, display-ready value.
///
/// Starts out as [`FieldValue::Raw`]; a field's normalization rule replaces it
/// with one of the other variants.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Raw(RawValue),
    Text(String),
    Int(i64),
    Time(NaiveDateTime),
}

impl FieldValue {
    pub fn as_raw(&self) -> Option<&RawValue> {
        match self {
            FieldValue::Raw(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(v) => Some(v),
            FieldValue::Raw(v) => v.as_str(),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            FieldValue::Raw(v) => v.as_int(),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::Time(v) => Some(*v),
            _ => None,
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Raw(v) => Display::fmt(v, f),
            FieldValue::Text(v) => f.write_str(v),
            FieldValue::Int(v) => Display::fmt(v, f),
            FieldValue::Time(v) => Display::fmt(&v.format("%Y-%m-%d %H:%M:%S"), f),
        }
    }
}

impl From<RawValue> for FieldValue {
    fn from(value: RawValue) -> Self {
        FieldValue::Raw(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        value.to_owned().into()
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::Time(value)
    }
}

#[cfg(feature = "json_dump")]
impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldValue::Int(v) => serializer.serialize_i64(*v),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

/// The decoder's view of an image's Exif block: tag code to raw value.
#[cfg_attr(feature = "json_dump", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "json_dump", serde(transparent))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTagMap {
    entries: HashMap<u16, RawValue>,
}

impl RawTagMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: u16, value: impl Into<RawValue>) -> Option<RawValue> {
        self.entries.insert(code, value.into())
    }

    pub fn get(&self, code: u16) -> Option<&RawValue> {
        self.entries.get(&code)
    }

    pub fn remove(&mut self, code: u16) -> Option<RawValue> {
        self.entries.remove(&code)
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

    pub fn iter(&self) -> impl Iterator<Item = (u16, &RawValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}

impl<V: Into<RawValue>> FromIterator<(u16, V)> for RawTagMap {
    fn from_iter<I: IntoIterator<Item = (u16, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

impl IntoIterator for RawTagMap {
    type Item = (u16, RawValue);
    type IntoIter = std::collections::hash_map::IntoIter<u16, RawValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<HashMap<u16, RawValue>> for RawTagMap {
    fn from(entries: HashMap<u16, RawValue>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use test_case::test_case;

    use super::*;

    #[test_case((1, 250), 8000, "1/250")]
    #[test_case((10, 2500), 8000, "1/250")]
    #[test_case((2, 1), 8000, "2/1")]
    #[test_case((1, 10000), 8000, "1/8000")]
    #[test_case((1, 16001), 8000, "0/1")]
    #[test_case((3, 9999), 8000, "1/3333")]
    #[test_case((-1, 3), 2, "-1/2")]
    #[test_case((314159, 100000), 100, "311/99")]
    fn limit_denominator(r: (i64, i64), max_den: u32, expected: &str) {
        let res = Rational(r.0, r.1).limit_denominator(max_den).unwrap();
        assert_eq!(res.to_string(), expected);
    }

    #[test]
    fn limit_denominator_is_closest() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let num: i64 = rng.gen_range(1..=100_000);
            let den: i64 = rng.gen_range(1..=1_000_000);
            let target = num as f64 / den as f64;
            let res = Rational(num, den).limit_denominator(64).unwrap();
            assert!(res.1 <= 64 && res.1 > 0);

            let best = (1..=64_i64)
                .map(|q| {
                    let p = (target * q as f64).round();
                    (p / q as f64 - target).abs()
                })
                .fold(f64::INFINITY, f64::min);
            let got = (res.0 as f64 / res.1 as f64 - target).abs();
            assert!(got <= best + 1e-12, "{num}/{den} => {res}");
        }
    }

    #[test]
    fn zero_denominator() {
        assert_eq!(
            Rational(5_i64, 0).ratio(),
            Err(FieldError::DivisionByZero(5))
        );
        assert_eq!(
            Rational(5_i64, 0).limit_denominator(8000),
            Err(FieldError::DivisionByZero(5))
        );
    }

    #[test]
    fn display() {
        assert_eq!(RawValue::from((56_u32, 10_u32)).to_string(), "56/10");
        assert_eq!(RawValue::from((-1_i32, 3_i32)).to_string(), "-1/3");
        assert_eq!(
            RawValue::Bytes((0..10).collect()).to_string(),
            "Bytes[0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, ...]"
        );
        assert_eq!(RawValue::IntArray(vec![8, 8, 8]).to_string(), "[8, 8, 8]");

        let t = NaiveDateTime::parse_from_str("2021:05:17 14:30:00", "%Y:%m:%d %H:%M:%S").unwrap();
        assert_eq!(FieldValue::Time(t).to_string(), "2021-05-17 14:30:00");
    }

    #[test]
    fn raw_tag_map() {
        let map: RawTagMap = [(0x0112_u16, RawValue::from(1_u16)), (0x010f, "Canon".into())]
            .into_iter()
            .collect();
        assert_eq!(map.len(), 2);
        assert!(map.contains(0x010f));
        assert_eq!(map.get(0x0112).and_then(RawValue::as_int), Some(1));
        assert_eq!(map.get(0x0110), None);
    }
}
