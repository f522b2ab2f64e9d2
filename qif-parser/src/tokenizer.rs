use std::io::BufRead;

use log::debug;

use qif_core::{code, DateFormat, FieldValue, Record};

use crate::error::{ParseError, ParseResult};
use crate::lines::LineReader;

/// Read the next `^`-terminated record.
///
/// Returns `Ok(None)` once the input is exhausted, closing `lines`; a record
/// cut short by the end of input is discarded. A record whose date can't be
/// read is consumed up to its `^` before the error is returned, so the next
/// call starts on the following record.
pub fn next_record<R: BufRead>(
    lines: &mut LineReader<R>,
    format: &DateFormat,
) -> ParseResult<Option<Record>> {
    let mut record = Record::new();
    let mut start = None;
    loop {
        let line = match lines.read_line() {
            Ok(Some(line)) => line,
            Ok(None) => {
                if !record.is_empty() {
                    debug!("discarding unterminated record starting at line {:?}", start);
                }
                return Ok(None);
            }
            Err(err) => {
                let location = lines.lines_read();
                lines.close();
                return Err(ParseError::io(err, location));
            }
        };

        let line = line.trim_start();
        if line.starts_with(code::END) {
            break;
        }
        let mut chars = line.chars();
        let field = match chars.next() {
            Some(c) => c,
            None => continue,
        };
        start = start.or_else(|| Some(lines.lines_read()));
        record.append(field, chars.as_str().trim());
    }

    normalize(&mut record, format).map_err(|value| {
        ParseError::invalid_date(value, start.unwrap_or_else(|| lines.lines_read()))
    })?;
    Ok(Some(record))
}

/// Strip thousands separators from amounts and convert the date.
///
/// On failure, returns the date text that couldn't be parsed.
fn normalize(record: &mut Record, format: &DateFormat) -> Result<(), String> {
    for amount in code::AMOUNTS.iter() {
        if let Some(FieldValue::Text(value)) = record.get_mut(*amount) {
            value.retain(|c| c != ',');
        }
    }

    if let Some(value) = record.text(code::DATE) {
        let date = format.try_parse(value).ok_or_else(|| value.to_string())?;
        record.set(code::DATE, FieldValue::Date(date));
    }
    Ok(())
}
