//! Guessing which date convention a document uses.
//!
//! QIF never declares whether `03/04/2020` is the 3rd of April or the 4th of
//! March. Every line is tried against [`SUPPORTED_DATE_FORMATS`] in order; a
//! date whose day is above 12 settles the question, otherwise the first
//! format that read any date at all is used.

use std::io::{self, BufRead, Seek, SeekFrom};

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use log::debug;

use qif_core::{DateFormat, SUPPORTED_DATE_FORMATS};

lazy_static! {
    static ref CANDIDATES: Vec<(&'static str, DateFormat)> = SUPPORTED_DATE_FORMATS
        .iter()
        .filter_map(|tag| tag.parse().ok().map(|format| (*tag, format)))
        .collect();
    static ref EPOCH: Option<NaiveDate> = NaiveDate::from_ymd_opt(1900, 1, 1);
}

/// Parse `token` with `format`, keeping it only if it looks like a real date.
fn evidence(format: &DateFormat, token: &str) -> Option<NaiveDate> {
    format
        .try_parse(token)
        .filter(|date| EPOCH.map_or(true, |epoch| *date > epoch))
}

/// Scan state: the first format that read any date so far.
#[derive(Debug, Default)]
struct Resolver {
    fallback: Option<&'static str>,
}

impl Resolver {
    /// Look at one line, returning the format if this line settles it.
    fn feed(&mut self, line: &str) -> Option<&'static str> {
        // Drop the field code.
        let token = match line.char_indices().nth(1) {
            Some((start, _)) => line[start..].trim(),
            None => return None,
        };

        for (tag, format) in CANDIDATES.iter() {
            if let Some(date) = evidence(format, token) {
                self.fallback = self.fallback.or(Some(*tag));
                if date.day() > 12 {
                    return Some(*tag);
                }
            }
        }
        None
    }
}

/// Guess the date format from the lines of a document.
pub fn guess_lines<I, S>(lines: I) -> Option<&'static str>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut resolver = Resolver::default();
    for line in lines {
        if let Some(tag) = resolver.feed(line.as_ref()) {
            return Some(tag);
        }
    }
    resolver.fallback
}

/// Guess the date format of the document in `stream`, then rewind it to the start.
pub fn guess<R: BufRead + Seek>(stream: &mut R) -> io::Result<Option<&'static str>> {
    stream.seek(SeekFrom::Start(0))?;

    let mut resolver = Resolver::default();
    let mut settled = None;
    let mut scanned = 0;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if stream.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        scanned += 1;
        settled = resolver.feed(&String::from_utf8_lossy(&buf));
        if settled.is_some() {
            break;
        }
    }
    stream.seek(SeekFrom::Start(0))?;

    let guessed = settled.or(resolver.fallback);
    debug!("guessed date format {:?} after {} lines", guessed, scanned);
    Ok(guessed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::io::{Cursor, Read};

    #[test]
    fn day_above_twelve_settles() {
        assert_eq!(guess_lines(vec!["D15/03/2020"]), Some("dd/mm/yyyy"));
        assert_eq!(guess_lines(vec!["D03/15/2020"]), Some("mm/dd/yyyy"));
        assert_eq!(guess_lines(vec!["D03/15/20"]), Some("mm/dd/yy"));
        assert_eq!(guess_lines(vec!["D2020-03-15"]), Some("yyyy-mm-dd"));
    }

    #[test]
    fn later_line_settles_regardless_of_earlier_ones() {
        let lines = vec![
            "!Type:Bank",
            "D01/02/2020",
            "T-10.00",
            "^",
            "D05/06/2020",
            "^",
            "D02/25/2020",
            "^",
        ];
        assert_eq!(guess_lines(lines), Some("mm/dd/yyyy"));
    }

    #[test]
    fn falls_back_to_first_plausible_format() {
        assert_eq!(guess_lines(vec!["D01/02/2020", "D03/04/2020"]), Some("dd/mm/yyyy"));
        assert_eq!(guess_lines(vec!["D01/02/20"]), Some("dd/mm/yy"));
    }

    #[test]
    fn no_dates() {
        assert_eq!(guess_lines(vec!["!Type:Bank", "PNobody", "T12.00", "^"]), None);
        assert_eq!(guess_lines(Vec::<String>::new()), None);
    }

    #[test]
    fn ignores_dates_before_1900() {
        assert_eq!(guess_lines(vec!["D15/03/1899"]), None);
        assert_eq!(guess_lines(vec!["D01/01/1900"]), None);
        assert_eq!(guess_lines(vec!["D02/01/1900"]), Some("dd/mm/yyyy"));
    }

    #[test]
    fn rewinds_stream() {
        let input = indoc! {"
            !Type:Bank
            D02/01/2020
            ^
            D15/01/2020
            ^
            D01/02/2020
            ^
        "};
        let mut stream = Cursor::new(input);
        stream.set_position(5);

        assert_eq!(guess(&mut stream).unwrap(), Some("dd/mm/yyyy"));
        assert_eq!(stream.position(), 0);
        let mut rest = String::new();
        stream.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, input);
    }

    #[test]
    fn rewinds_stream_without_dates() {
        let mut stream = Cursor::new("!Type:Cash\nPNobody\n^\n");
        assert_eq!(guess(&mut stream).unwrap(), None);
        assert_eq!(stream.position(), 0);
    }
}
