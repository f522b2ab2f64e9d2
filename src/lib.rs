//! Reading and writing QIF (Quicken Interchange Format) files.
//!
//! This crate re-exports the pieces of the workspace:
//!
//! - [`core`]: the transaction model, records and date formats;
//! - [`parser`]: the lazy, cached [`Reader`];
//! - [`render`]: [`encode`] and the [`Writer`].
//!
//! ```
//! use qif::{Reader, Writer, WriterConfig};
//!
//! let mut reader = Reader::from_text("!Type:Bank\nD15/03/2020\nT-42.50\n^\n")?;
//! let out = Writer::scoped(Vec::new(), WriterConfig::default(), |writer| {
//!     for transaction in reader.iter() {
//!         writer.append(transaction);
//!     }
//! })?;
//! assert_eq!(String::from_utf8(out)?, "!Type:Bank\nD15/03/2020\nT-42.50\n^\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use qif_core as core;
pub use qif_parser as parser;
pub use qif_render as render;

pub use qif_core::{AccountType, DateFormat, Split, Status, Transaction};
pub use qif_parser::{ParseError, ParseErrorKind, Reader, ReaderConfig};
pub use qif_render::{encode, RenderError, Writer, WriterConfig};
