use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Layout tags tried when a document's date convention has to be guessed, in priority order.
pub const SUPPORTED_DATE_FORMATS: &[&str] = &[
    "dd/mm/yyyy",
    "mm/dd/yyyy",
    "dd/mm/yy",
    "mm/dd/yy",
    "yyyy-mm-dd",
];

/// Layout used when nothing else is known about a document.
pub const DEFAULT_DATE_FORMAT: &str = "dd/mm/yyyy";

/// Characters accepted between the parts of a date, whatever the layout says.
///
/// Quicken itself writes dates such as ` 1/ 5'04`, so the apostrophe is a separator too.
const SEPARATORS: &[char] = &['/', '-', '.', '\''];

#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum DateFormatError {
    #[error("unsupported date format '{0}'")]
    Unsupported(String),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
enum DatePart {
    Day,
    Month,
    Year,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
struct Field {
    part: DatePart,
    /// Number of letters in the tag: 1 or 2 for days and months, 2 or 4 for years.
    width: usize,
}

/// A day/month/year layout such as `dd/mm/yyyy`.
///
/// Every date of a QIF document is read and written with one `DateFormat`.
/// Parsing is lenient about separators and padding, but strict about the
/// order of the parts and the number of year digits:
///
/// ```
/// use chrono::NaiveDate;
/// use qif_core::DateFormat;
///
/// let format: DateFormat = "mm/dd/yy".parse().unwrap();
/// assert_eq!(format.try_parse(" 1/ 5'04"), NaiveDate::from_ymd_opt(2004, 1, 5));
/// assert_eq!(format.format(NaiveDate::from_ymd_opt(2004, 1, 5).unwrap()), "01/05/04");
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DateFormat {
    tag: String,
    fields: [Field; 3],
    separator: char,
}

impl DateFormat {
    /// The tag this format was built from, e.g. `dd/mm/yyyy`.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Parse `token` under this layout, or `None` if it isn't a valid date in it.
    pub fn try_parse(&self, token: &str) -> Option<NaiveDate> {
        let pieces: Vec<&str> = token.trim().split(SEPARATORS).map(str::trim).collect();
        if pieces.len() != 3 {
            return None;
        }

        let (mut year, mut month, mut day) = (None, None, None);
        for (field, piece) in self.fields.iter().zip(pieces) {
            if piece.is_empty() || !piece.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            match field.part {
                DatePart::Day if piece.len() <= 2 => day = piece.parse::<u32>().ok(),
                DatePart::Month if piece.len() <= 2 => month = piece.parse::<u32>().ok(),
                DatePart::Year if field.width == 4 && piece.len() == 4 => {
                    year = piece.parse::<i32>().ok()
                }
                DatePart::Year if field.width == 2 && piece.len() <= 2 => {
                    year = piece.parse::<i32>().ok().map(pivot_year)
                }
                _ => return None,
            }
        }

        NaiveDate::from_ymd_opt(year?, month?, day?)
    }

    /// Render `date` following this layout.
    pub fn format(&self, date: NaiveDate) -> String {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|field| match (field.part, field.width) {
                (DatePart::Day, 1) => date.day().to_string(),
                (DatePart::Day, _) => format!("{:02}", date.day()),
                (DatePart::Month, 1) => date.month().to_string(),
                (DatePart::Month, _) => format!("{:02}", date.month()),
                (DatePart::Year, 2) => format!("{:02}", date.year().rem_euclid(100)),
                (DatePart::Year, _) => format!("{:04}", date.year()),
            })
            .collect();
        parts.join(&self.separator.to_string())
    }
}

/// Two digit years follow POSIX `%y`: 69-99 are 19xx, 00-68 are 20xx.
fn pivot_year(year: i32) -> i32 {
    if year >= 69 {
        1900 + year
    } else {
        2000 + year
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        DateFormat {
            tag: DEFAULT_DATE_FORMAT.to_string(),
            fields: [
                Field { part: DatePart::Day, width: 2 },
                Field { part: DatePart::Month, width: 2 },
                Field { part: DatePart::Year, width: 4 },
            ],
            separator: '/',
        }
    }
}

impl FromStr for DateFormat {
    type Err = DateFormatError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let unsupported = || DateFormatError::Unsupported(tag.to_string());

        let separator = tag
            .chars()
            .find(|c| !c.is_ascii_alphabetic())
            .ok_or_else(unsupported)?;

        let mut fields = Vec::with_capacity(3);
        for group in tag.split(separator) {
            let first = group.chars().next().ok_or_else(unsupported)?;
            if !group.chars().all(|c| c == first) {
                return Err(unsupported());
            }
            let field = match (first.to_ascii_lowercase(), group.len()) {
                ('d', width @ 1..=2) => Field { part: DatePart::Day, width },
                ('m', width @ 1..=2) => Field { part: DatePart::Month, width },
                ('y', width @ 2) | ('y', width @ 4) => Field { part: DatePart::Year, width },
                _ => return Err(unsupported()),
            };
            if fields.iter().any(|f: &Field| f.part == field.part) {
                return Err(unsupported());
            }
            fields.push(field);
        }

        match fields.as_slice() {
            [a, b, c] => Ok(DateFormat {
                tag: tag.to_string(),
                fields: [*a, *b, *c],
                separator,
            }),
            _ => Err(unsupported()),
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_tags() {
        for tag in SUPPORTED_DATE_FORMATS {
            assert_eq!(tag.parse::<DateFormat>().unwrap().tag(), *tag);
        }
        assert!("d.m.yy".parse::<DateFormat>().is_ok());

        assert!("dd/mm".parse::<DateFormat>().is_err());
        assert!("dd/dd/yyyy".parse::<DateFormat>().is_err());
        assert!("dd/mm/yyy".parse::<DateFormat>().is_err());
        assert!("ddd/mm/yyyy".parse::<DateFormat>().is_err());
        assert!("dm/mm/yyyy".parse::<DateFormat>().is_err());
        assert!("ddmmyyyy".parse::<DateFormat>().is_err());
        assert!("".parse::<DateFormat>().is_err());
    }

    #[test]
    fn default_is_day_first() {
        assert_eq!(DateFormat::default(), DEFAULT_DATE_FORMAT.parse().unwrap());
    }

    #[test]
    fn try_parse_day_first() {
        let format: DateFormat = "dd/mm/yyyy".parse().unwrap();
        assert_eq!(format.try_parse("15/03/2020"), Some(ymd(2020, 3, 15)));
        assert_eq!(format.try_parse("1/3/2020"), Some(ymd(2020, 3, 1)));
        assert_eq!(format.try_parse(" 15-03-2020\r"), Some(ymd(2020, 3, 15)));

        assert_eq!(format.try_parse("02/13/2020"), None);
        assert_eq!(format.try_parse("15/03/20"), None);
        assert_eq!(format.try_parse("15/03/2020/1"), None);
        assert_eq!(format.try_parse("Grocery Store"), None);
        assert_eq!(format.try_parse("-42.50"), None);
        assert_eq!(format.try_parse(""), None);
    }

    #[test]
    fn try_parse_month_first() {
        let format: DateFormat = "mm/dd/yyyy".parse().unwrap();
        assert_eq!(format.try_parse("02/13/2020"), Some(ymd(2020, 2, 13)));
        assert_eq!(format.try_parse("15/03/2020"), None);
    }

    #[test]
    fn try_parse_two_digit_years() {
        let format: DateFormat = "mm/dd/yy".parse().unwrap();
        assert_eq!(format.try_parse("12/31/99"), Some(ymd(1999, 12, 31)));
        assert_eq!(format.try_parse("1/ 5'04"), Some(ymd(2004, 1, 5)));
        assert_eq!(format.try_parse("01/05/2004"), None);
    }

    #[test]
    fn try_parse_iso() {
        let format: DateFormat = "yyyy-mm-dd".parse().unwrap();
        assert_eq!(format.try_parse("2020-03-15"), Some(ymd(2020, 3, 15)));
        assert_eq!(format.try_parse("15/03/2020"), None);
    }

    #[test]
    fn format_follows_tag() {
        let date = ymd(2020, 3, 5);
        let cases = vec![
            ("dd/mm/yyyy", "05/03/2020"),
            ("mm/dd/yyyy", "03/05/2020"),
            ("d/m/yyyy", "5/3/2020"),
            ("dd/mm/yy", "05/03/20"),
            ("yyyy-mm-dd", "2020-03-05"),
            ("dd.mm.yyyy", "05.03.2020"),
        ];
        for (tag, expected) in cases {
            let format: DateFormat = tag.parse().unwrap();
            assert_eq!(format.format(date), expected);
            assert_eq!(format.try_parse(expected), Some(date));
        }
    }
}
