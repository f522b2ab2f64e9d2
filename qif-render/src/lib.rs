//! Writing transactions back out as QIF.
//!
//! [`encode`] turns one transaction into its field lines; [`Writer`] buffers
//! transactions and writes them as a complete document under a `!Type:` header.

use qif_core::{code, DateFormat, Split, Transaction};
use std::{io, io::Write};
use thiserror::Error;

pub use writer::{Writer, WriterConfig};

mod writer;

#[cfg(test)]
mod tests;

#[derive(Clone, Eq, PartialEq, Default, Debug)]
pub struct QifRenderer {
    format: DateFormat,
}

impl QifRenderer {
    pub fn new(format: DateFormat) -> Self {
        QifRenderer { format }
    }

    pub fn date_format(&self) -> &DateFormat {
        &self.format
    }
}

/// Render a transaction's field lines, joined by `\n`, without a trailing
/// newline or the `^` sentinel.
pub fn encode(transaction: &Transaction, format: &DateFormat) -> Result<String, RenderError> {
    let mut rendered = Vec::new();
    QifRenderer::new(format.clone()).render(transaction, &mut rendered)?;
    Ok(String::from_utf8_lossy(&rendered).into_owned())
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("an io error occurred")]
    Io(#[from] io::Error),
}

pub trait Renderer<T, W: Write> {
    type Error;
    fn render(&self, renderable: T, write: &mut W) -> Result<(), Self::Error>;
}

/// Writes field lines, putting a newline before every line but the first.
struct Lines<'w, W> {
    w: &'w mut W,
    first: bool,
}

impl<'w, W: Write> Lines<'w, W> {
    fn new(w: &'w mut W) -> Self {
        Lines { w, first: true }
    }

    /// One `<code><line>` per line of `value`. Empty values are left out.
    fn field<T: AsRef<str>>(&mut self, code: char, value: Option<T>) -> io::Result<()> {
        match value {
            Some(ref value) if !value.as_ref().is_empty() => {
                for line in value.as_ref().split('\n') {
                    self.line(code, line)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Like `field`, but an empty value still gets a bare `<code>` line when `keep` is set.
    fn slot<T: AsRef<str>>(&mut self, code: char, value: Option<T>, keep: bool) -> io::Result<()> {
        match value {
            Some(ref value) if !value.as_ref().is_empty() => self.field(code, Some(value)),
            _ if keep => self.line(code, ""),
            _ => Ok(()),
        }
    }

    fn line(&mut self, code: char, line: &str) -> io::Result<()> {
        if !self.first {
            writeln!(self.w)?;
        }
        self.first = false;
        write!(self.w, "{}{}", code, line)
    }
}

/// Which split fields are written by at least one split of a transaction.
///
/// Split lines are matched up by position when read back, so once any split
/// has a field, every split writes that field's line, bare if it's empty.
#[derive(Clone, Copy, Debug, Default)]
struct SplitColumns {
    category: bool,
    memo: bool,
    amount: bool,
}

impl SplitColumns {
    fn of(splits: &[Split]) -> Self {
        let filled = |value: Option<&String>| value.map_or(false, |v| !v.is_empty());
        SplitColumns {
            category: splits.iter().any(|s| filled(s.category.as_ref())),
            memo: splits.iter().any(|s| filled(s.memo.as_ref())),
            amount: splits.iter().any(|s| s.amount.is_some()),
        }
    }
}

impl<'a, W: Write> Renderer<&'a Transaction, W> for QifRenderer {
    type Error = RenderError;
    fn render(&self, transaction: &'a Transaction, w: &mut W) -> Result<(), Self::Error> {
        let mut lines = Lines::new(w);
        lines.field(code::DATE, Some(self.format.format(transaction.date)))?;
        lines.field(code::AMOUNT, transaction.amount.map(|a| a.to_string()))?;
        lines.field(code::STATUS, transaction.status.as_ref().map(|s| s.to_string()))?;
        lines.field(code::NUMBER, transaction.number.as_ref())?;
        lines.field(code::PAYEE, transaction.payee.as_ref())?;
        lines.field(code::MEMO, transaction.memo.as_ref())?;
        lines.field(code::ADDRESS, transaction.address.as_ref())?;
        lines.field(code::CATEGORY, transaction.category.as_ref())?;
        let columns = SplitColumns::of(&transaction.splits);
        for split in &transaction.splits {
            render_split(&mut lines, split, columns)?;
        }
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a Split, W> for QifRenderer {
    type Error = RenderError;
    fn render(&self, split: &'a Split, w: &mut W) -> Result<(), Self::Error> {
        render_split(&mut Lines::new(w), split, SplitColumns::default())
    }
}

fn render_split<W: Write>(
    lines: &mut Lines<'_, W>,
    split: &Split,
    columns: SplitColumns,
) -> Result<(), RenderError> {
    lines.slot(code::SPLIT_CATEGORY, split.category.as_ref(), columns.category)?;
    lines.slot(code::SPLIT_MEMO, split.memo.as_ref(), columns.memo)?;
    lines.slot(code::SPLIT_AMOUNT, split.amount.map(|a| a.to_string()), columns.amount)?;
    Ok(())
}
