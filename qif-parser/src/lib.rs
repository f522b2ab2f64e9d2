//! Reader for QIF (Quicken Interchange Format) files.
//!
//! [`Reader`] parses the header eagerly and the records lazily: each record
//! is decoded the first time iteration or indexed access reaches it and is
//! cached from then on, so traversing a file again never re-reads it.
//!
//! ```
//! use qif_parser::Reader;
//!
//! let mut reader = Reader::from_text("!Type:Bank\nD15/03/2020\nT-42.50\nPGrocery Store\n^\n")?;
//! assert_eq!(reader.date_format().tag(), "dd/mm/yyyy");
//! while let Some(transaction) = reader.next_transaction() {
//!     assert_eq!(transaction.payee.as_deref(), Some("Grocery Store"));
//! }
//! assert_eq!(reader.count(), 1);
//! # Ok::<(), qif_parser::error::ParseError>(())
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Seek};
use std::path::Path;

use log::warn;

use qif_core::{AccountType, DateFormat, Transaction};

pub use config::ReaderConfig;
pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use guess::{guess, guess_lines};
pub use header::{parse_header, Header};
pub use lines::LineReader;
pub use tokenizer::next_record;

mod config;
pub mod error;
mod guess;
mod header;
mod lines;
mod tokenizer;

/// A lazily decoded, cached sequence of the transactions in a QIF document.
///
/// Records that can't be read (a malformed date, an unparseable amount, a
/// record without a date) are skipped: they take no position in the
/// sequence, are logged at `warn` level and counted by
/// [`dropped_records`](Reader::dropped_records).
/// [`try_next_transaction`](Reader::try_next_transaction) reports them instead.
#[derive(Debug)]
pub struct Reader<R> {
    lines: LineReader<R>,
    format: DateFormat,
    header: Header,
    cache: Vec<Transaction>,
    /// Number of transactions handed out in the current traversal.
    position: usize,
    records_read: usize,
    dropped: usize,
}

impl<R: BufRead + Seek> Reader<R> {
    /// Read `stream`, guessing its date format and falling back to `dd/mm/yyyy`.
    pub fn new(stream: R) -> ParseResult<Self> {
        Self::with_config(stream, ReaderConfig::default())
    }

    /// Read `stream` as `config` says.
    ///
    /// The stream has to be seekable even when the config names a date format;
    /// use [`with_date_format`](Reader::with_date_format) for one that isn't.
    pub fn with_config(mut stream: R, config: ReaderConfig) -> ParseResult<Self> {
        let format = match config.date_format {
            Some(format) => format,
            None => guess(&mut stream)
                .map_err(|e| ParseError::io(e, 0))?
                .and_then(|tag| tag.parse().ok())
                .unwrap_or(config.fallback_date_format),
        };
        Self::with_date_format(stream, format)
    }
}

impl Reader<Cursor<String>> {
    /// Read a document held in memory.
    pub fn from_text<T: Into<String>>(text: T) -> ParseResult<Self> {
        Self::new(Cursor::new(text.into()))
    }
}

impl Reader<BufReader<File>> {
    /// Read the file at `path`.
    pub fn open<P: AsRef<Path>>(path: P, config: ReaderConfig) -> ParseResult<Self> {
        let file = File::open(path).map_err(|e| ParseError::io(e, 0))?;
        Self::with_config(BufReader::new(file), config)
    }
}

impl<R: BufRead> Reader<R> {
    /// Read `stream` with a known date format. The stream doesn't need to be seekable.
    pub fn with_date_format(stream: R, format: DateFormat) -> ParseResult<Self> {
        let mut lines = LineReader::new(stream);
        let header = parse_header(&mut lines)?;
        Ok(Reader {
            lines,
            format,
            header,
            cache: Vec::new(),
            position: 0,
            records_read: 0,
            dropped: 0,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn account_type(&self) -> AccountType {
        self.header.account_type
    }

    /// Options of the last extra header line, if there was any.
    pub fn options(&self) -> Option<&[String]> {
        self.header.options.as_deref()
    }

    pub fn date_format(&self) -> &DateFormat {
        &self.format
    }

    /// Position of the traversal: the number of transactions handed out since it (re)started.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Records taken from the input so far, including dropped ones.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Records skipped because they couldn't be read.
    pub fn dropped_records(&self) -> usize {
        self.dropped
    }

    /// Lines taken from the underlying stream so far.
    pub fn lines_read(&self) -> usize {
        self.lines.lines_read()
    }

    /// Whether the whole input has been read (and the stream released).
    pub fn is_exhausted(&self) -> bool {
        self.lines.is_closed()
    }

    /// Next transaction of the traversal, or `None` at the end of the input.
    pub fn next_transaction(&mut self) -> Option<&Transaction> {
        if self.fill(self.position + 1) {
            self.position += 1;
            self.cache.get(self.position - 1)
        } else {
            None
        }
    }

    /// Like [`next_transaction`](Reader::next_transaction), but returns the
    /// error of a record that can't be read instead of skipping it.
    ///
    /// The failed record is consumed either way; calling again moves on to the next one.
    pub fn try_next_transaction(&mut self) -> ParseResult<Option<&Transaction>> {
        if self.try_fill(self.position + 1)? {
            self.position += 1;
            Ok(self.cache.get(self.position - 1))
        } else {
            Ok(None)
        }
    }

    /// The transaction at `index`, reading ahead as far as needed.
    ///
    /// Doesn't move the traversal.
    pub fn get(&mut self, index: usize) -> Option<&Transaction> {
        self.fill(index.saturating_add(1));
        self.cache.get(index)
    }

    /// Start the traversal over. Transactions already read are kept.
    pub fn restart_traversal(&mut self) {
        self.position = 0;
    }

    /// Number of transactions in the document. Reads the rest of the input.
    pub fn count(&mut self) -> usize {
        self.materialize_all().len()
    }

    /// Every transaction of the document, in order. Reads the rest of the input.
    pub fn materialize_all(&mut self) -> &[Transaction] {
        self.fill(usize::MAX);
        &self.cache
    }

    /// Restart the traversal and iterate over copies of the transactions.
    pub fn iter(&mut self) -> Iter<'_, R> {
        self.restart_traversal();
        Iter { reader: self }
    }

    pub fn into_transactions(mut self) -> Vec<Transaction> {
        self.fill(usize::MAX);
        self.cache
    }

    /// Read records until `len` transactions are cached, skipping the ones that fail.
    ///
    /// Returns whether the cache reached `len`.
    fn fill(&mut self, len: usize) -> bool {
        loop {
            match self.try_fill(len) {
                Ok(filled) => return filled,
                Err(err) => {
                    self.dropped += 1;
                    warn!("skipping unreadable record: {}", err);
                }
            }
        }
    }

    fn try_fill(&mut self, len: usize) -> ParseResult<bool> {
        while self.cache.len() < len {
            match self.read_transaction()? {
                Some(transaction) => self.cache.push(transaction),
                None => return Ok(false),
            }
        }
        Ok(true)
    }

    fn read_transaction(&mut self) -> ParseResult<Option<Transaction>> {
        let record = match next_record(&mut self.lines, &self.format) {
            Ok(Some(record)) => record,
            Ok(None) => return Ok(None),
            Err(err) => {
                if let ParseErrorKind::InvalidDate { .. } = err.kind {
                    self.records_read += 1;
                }
                return Err(err);
            }
        };
        self.records_read += 1;
        // Reported at the record's terminator line.
        let location = self.lines.lines_read();
        Transaction::from_record(&record)
            .map(Some)
            .map_err(|e| ParseError::invalid_record(e, location))
    }
}

/// Iterator over a [`Reader`]'s transactions, see [`Reader::iter`].
#[derive(Debug)]
pub struct Iter<'a, R> {
    reader: &'a mut Reader<R>,
}

impl<'a, R: BufRead> Iterator for Iter<'a, R> {
    type Item = Transaction;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next_transaction().cloned()
    }
}
