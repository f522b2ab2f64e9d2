use std::error::Error;
use std::fmt;
use std::io;

use qif_core::{AccountType, DecodeError};

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Clone, Debug, PartialEq)]
pub enum ParseErrorKind {
    /// The input does not start with a `!` header line.
    UnrecognizedData,
    /// The header names an account type outside of the supported set.
    UnknownAccountType { header: String },
    /// A date field could not be read with the document's date format.
    InvalidDate { value: String },
    /// A record was read but could not be turned into a transaction.
    InvalidRecord { message: String },
    /// Reading from the underlying stream failed.
    Io { message: String },
}

#[derive(Debug)]
pub struct ParseError {
    /// The type of error.
    pub kind: ParseErrorKind,
    /// The 1-based line where the error was detected, or 0 if unknown.
    pub location: usize,
    source: Option<Box<dyn Error + 'static + Send + Sync>>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::UnrecognizedData => {
                write!(f, "Provided data doesn't seem to represent a QIF file")?;
            }
            ParseErrorKind::UnknownAccountType { header } => {
                write!(
                    f,
                    "Unknown account type '{}'. Should be one of {:?}",
                    header,
                    AccountType::supported_headers()
                )?;
            }
            ParseErrorKind::InvalidDate { value } => {
                write!(f, "Invalid date '{}'", value)?;
            }
            ParseErrorKind::InvalidRecord { message } => {
                write!(f, "Invalid record: {}", message)?;
            }
            ParseErrorKind::Io { message } => {
                write!(f, "I/O error: {}", message)?;
            }
        }
        if self.location > 0 {
            write!(f, " at line {}", self.location)?;
        }
        Ok(())
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl ParseError {
    fn new(kind: ParseErrorKind, location: usize) -> ParseError {
        ParseError {
            kind,
            location,
            source: None,
        }
    }

    pub(crate) fn unrecognized_data(location: usize) -> ParseError {
        ParseError::new(ParseErrorKind::UnrecognizedData, location)
    }

    pub(crate) fn unknown_account_type<T: ToString>(header: T, location: usize) -> ParseError {
        ParseError::new(
            ParseErrorKind::UnknownAccountType {
                header: header.to_string(),
            },
            location,
        )
    }

    pub(crate) fn invalid_date<T: ToString>(value: T, location: usize) -> ParseError {
        ParseError::new(
            ParseErrorKind::InvalidDate {
                value: value.to_string(),
            },
            location,
        )
    }

    pub(crate) fn invalid_record(err: DecodeError, location: usize) -> ParseError {
        ParseError {
            kind: ParseErrorKind::InvalidRecord {
                message: err.to_string(),
            },
            location,
            source: Some(Box::new(err)),
        }
    }

    pub(crate) fn io(err: io::Error, location: usize) -> ParseError {
        ParseError {
            kind: ParseErrorKind::Io {
                message: err.to_string(),
            },
            location,
            source: Some(Box::new(err)),
        }
    }
}
