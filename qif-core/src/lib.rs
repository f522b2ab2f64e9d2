//! Data representation for QIF (Quicken Interchange Format) files.
//!
//! A QIF file is a header line naming the account type followed by records,
//! each a run of `<code><value>` lines terminated by `^`:
//!
//! ```text
//! !Type:Bank
//! D15/03/2020
//! T-42.50
//! PGrocery Store
//! ^
//! ```

pub use account_types::AccountType;
pub use date::{DateFormat, DateFormatError, DEFAULT_DATE_FORMAT, SUPPORTED_DATE_FORMATS};
pub use flags::Status;
pub use record::{code, FieldValue, Record};
pub use transaction::{decode, DecodeError, Split, Transaction};

pub mod account_types;
pub mod date;
pub mod flags;
pub mod record;
pub mod transaction;
