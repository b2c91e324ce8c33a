use chrono::{NaiveDate, NaiveDateTime};
use nom::{
    bytes::complete::take_while_m_n,
    character::complete::char,
    combinator::{all_consuming, map_res},
    sequence::tuple,
    IResult,
};

use crate::error::FieldError;

fn digits<'a>(n: usize) -> impl FnMut(&'a str) -> IResult<&'a str, u32> {
    map_res(
        take_while_m_n(n, n, |c: char| c.is_ascii_digit()),
        |s: &str| s.parse::<u32>(),
    )
}

type DateTimeParts = (u32, u32, u32, u32, u32, u32);

/// `YYYY:MM:DD HH:MM:SS`, fixed widths and literal separators.
fn exif_datetime(input: &str) -> IResult<&str, DateTimeParts> {
    let (remain, (year, _, month, _, day, _, hour, _, minute, _, second)) = tuple((
        digits(4),
        char(':'),
        digits(2),
        char(':'),
        digits(2),
        char(' '),
        digits(2),
        char(':'),
        digits(2),
        char(':'),
        digits(2),
    ))(input)?;

    Ok((remain, (year, month, day, hour, minute, second)))
}

/// Parse an Exif date/time string. Anything but an exact match of the Exif
/// layout, or a calendar-invalid date, is a
/// [`FieldError::MalformedTimestamp`].
pub(crate) fn parse_exif_datetime(s: &str) -> Result<NaiveDateTime, FieldError> {
    let malformed = || FieldError::MalformedTimestamp(s.to_owned());

    let (_, (year, month, day, hour, minute, second)) =
        all_consuming(exif_datetime)(s).map_err(|_| malformed())?;

    let year = i32::try_from(year).map_err(|_| malformed())?;
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .ok_or_else(malformed)
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};
    use test_case::test_case;

    use super::*;

    #[test]
    fn parse() {
        let t = parse_exif_datetime("2021:05:17 14:30:00").unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2021, 5, 17));
        assert_eq!((t.hour(), t.minute(), t.second()), (14, 30, 0));

        let expected =
            NaiveDateTime::parse_from_str("2023:07:09 20:36:33", "%Y:%m:%d %H:%M:%S").unwrap();
        assert_eq!(parse_exif_datetime("2023:07:09 20:36:33").unwrap(), expected);
    }

    #[test_case("2021-05-17 14:30:00"; "dashes")]
    #[test_case("2021:5:17 14:30:00"; "one digit month")]
    #[test_case("21:05:17 14:30:00"; "short year")]
    #[test_case("2021:05:17T14:30:00"; "iso separator")]
    #[test_case("2021:05:17 14:30:00 "; "trailing space")]
    #[test_case("2021:05:17 14:30"; "missing seconds")]
    #[test_case("2021:02:30 14:30:00"; "no such day")]
    #[test_case("2021:05:17 25:30:00"; "no such hour")]
    #[test_case("    :  :     :  :  "; "blank")]
    #[test_case(""; "empty")]
    fn malformed(s: &str) {
        assert_eq!(
            parse_exif_datetime(s),
            Err(FieldError::MalformedTimestamp(s.to_owned()))
        );
    }
}
