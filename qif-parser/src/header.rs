use std::io::BufRead;

use log::debug;

use qif_core::{code, AccountType};

use crate::error::{ParseError, ParseResult};
use crate::lines::LineReader;

/// The `!` lines at the top of a QIF file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Header {
    /// The account type named by the first header line.
    pub account_type: AccountType,

    /// The first header line as written, e.g. `!Type:Bank`.
    pub line: String,

    /// The colon-separated parts of the last extra header line, e.g.
    /// `["!Option", "AutoSwitch"]`. Earlier extra lines are not kept.
    pub options: Option<Vec<String>>,
}

/// Read the header block, leaving `lines` at the first line of the first record.
pub fn parse_header<R: BufRead>(lines: &mut LineReader<R>) -> ParseResult<Header> {
    let mut headers = Vec::new();
    let mut first_at = 0;
    let mut next = None;
    while let Some(line) = lines.read_line().map_err(|e| ParseError::io(e, lines.lines_read()))? {
        let line = line.trim();
        if line.is_empty() && headers.is_empty() {
            continue;
        }
        if !line.starts_with(code::HEADER) {
            next = Some(line.to_string());
            break;
        }
        if headers.is_empty() {
            first_at = lines.lines_read();
        }
        headers.push(line.to_string());
    }

    let mut headers = headers.into_iter();
    let first = headers
        .next()
        .ok_or_else(|| ParseError::unrecognized_data(lines.lines_read()))?;
    let account_type = AccountType::from_header(&first)
        .ok_or_else(|| ParseError::unknown_account_type(&first, first_at))?;
    let options = headers
        .last()
        .map(|h| h.split(':').map(String::from).collect::<Vec<_>>());

    // The line after the header block belongs to the first record, unless it closes an empty one.
    if let Some(line) = next.filter(|line| !line.starts_with(code::END)) {
        lines.push_back(line);
    }

    debug!("read header {} ({}), options {:?}", first, account_type.description(), options);
    Ok(Header {
        account_type,
        line: first,
        options,
    })
}
