use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use typed_builder::TypedBuilder;

use qif_core::{DateFormat, Transaction};

use crate::{QifRenderer, RenderError, Renderer};

/// Options for a [`Writer`].
#[derive(Clone, Debug, Eq, PartialEq, TypedBuilder)]
pub struct WriterConfig {
    /// Label written in the `!Type:` header. Not checked against the labels a reader accepts.
    #[builder(default = "Bank".to_string(), setter(into))]
    pub account_type: String,

    #[builder(default)]
    pub date_format: DateFormat,
}

impl Default for WriterConfig {
    fn default() -> Self {
        WriterConfig::builder().build()
    }
}

/// Buffers transactions and writes them out as one QIF document.
///
/// ```
/// use qif_core::Transaction;
/// use qif_render::{Writer, WriterConfig};
///
/// let date = chrono::NaiveDate::from_ymd_opt(2020, 3, 15).unwrap();
/// let sink = Writer::scoped(Vec::new(), WriterConfig::default(), |writer| {
///     writer.append(Transaction::builder().date(date).payee("Grocery Store").build());
/// })?;
/// assert_eq!(String::from_utf8(sink)?, "!Type:Bank\nD15/03/2020\nPGrocery Store\n^\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Writer<W: Write> {
    sink: W,
    account_type: String,
    renderer: QifRenderer,
    transactions: Vec<Transaction>,
}

impl<W: Write> Writer<W> {
    pub fn new(sink: W) -> Self {
        Self::with_config(sink, WriterConfig::default())
    }

    pub fn with_config(sink: W, config: WriterConfig) -> Self {
        Writer {
            sink,
            account_type: config.account_type,
            renderer: QifRenderer::new(config.date_format),
            transactions: Vec::new(),
        }
    }

    /// Create a writer, hand it to `f`, then flush and close it.
    pub fn scoped<F>(sink: W, config: WriterConfig, f: F) -> Result<W, RenderError>
    where
        F: FnOnce(&mut Writer<W>),
    {
        let mut writer = Self::with_config(sink, config);
        f(&mut writer);
        writer.flush()?;
        Ok(writer.close())
    }

    pub fn append(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn account_type(&self) -> &str {
        &self.account_type
    }

    pub fn date_format(&self) -> &DateFormat {
        self.renderer.date_format()
    }

    /// Write the header and every buffered transaction, then flush the sink.
    ///
    /// The buffer is kept, so flushing twice writes the document twice.
    pub fn flush(&mut self) -> Result<(), RenderError> {
        writeln!(self.sink, "!Type:{}", self.account_type)?;
        for transaction in &self.transactions {
            self.renderer.render(transaction, &mut self.sink)?;
            write!(self.sink, "\n^\n")?;
        }
        self.sink.flush()?;
        info!(
            "wrote {} transactions to !Type:{}",
            self.transactions.len(),
            self.account_type
        );
        Ok(())
    }

    /// Give back the sink. Buffered transactions that were never flushed are lost.
    pub fn close(self) -> W {
        self.sink
    }
}

impl Writer<BufWriter<File>> {
    /// Create (or truncate) the file at `path`.
    pub fn create<P: AsRef<Path>>(path: P, config: WriterConfig) -> Result<Self, RenderError> {
        let file = File::create(path)?;
        Ok(Self::with_config(BufWriter::new(file), config))
    }

    /// Create (or truncate) the file at `path` and write to it as [`Writer::scoped`] does.
    pub fn open<P, F>(path: P, config: WriterConfig, f: F) -> Result<(), RenderError>
    where
        P: AsRef<Path>,
        F: FnOnce(&mut Self),
    {
        let file = File::create(path)?;
        Self::scoped(BufWriter::new(file), config, f)?;
        Ok(())
    }
}
