use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use typed_builder::TypedBuilder;

use super::flags::Status;
use super::record::{code, Record};

#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum DecodeError {
    #[error("record has no date")]
    MissingDate,
    #[error("invalid amount '{value}' in field '{code}'")]
    InvalidAmount { code: char, value: String },
}

/// A share of a transaction's amount assigned to its own category.
///
/// Splits are written as repeated `S`, `E` and `$` lines inside one record:
///
/// ```text
/// SGroceries
/// $-30.00
/// SHousehold
/// EBatteries
/// $-12.50
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq, TypedBuilder)]
pub struct Split {
    #[builder(default, setter(strip_option, into))]
    pub category: Option<String>,

    #[builder(default, setter(strip_option, into))]
    pub memo: Option<String>,

    #[builder(default, setter(strip_option))]
    pub amount: Option<Decimal>,
}

/// A single QIF transaction.
///
/// Text fields may hold several lines (joined with `\n`); they are written
/// back as one field line per line of text.
#[derive(Clone, Debug, Eq, PartialEq, TypedBuilder)]
pub struct Transaction {
    /// Date of the transaction (`D`).
    pub date: NaiveDate,

    /// Total amount (`T`, or `U` when only the latter is present).
    #[builder(default, setter(strip_option))]
    pub amount: Option<Decimal>,

    /// Cleared status (`C`).
    #[builder(default, setter(strip_option))]
    pub status: Option<Status>,

    /// Check or reference number (`N`).
    #[builder(default, setter(strip_option, into))]
    pub number: Option<String>,

    /// Payee (`P`).
    #[builder(default, setter(strip_option, into))]
    pub payee: Option<String>,

    /// Memo (`M`).
    #[builder(default, setter(strip_option, into))]
    pub memo: Option<String>,

    /// Payee address (`A`), up to six lines in files written by Quicken.
    #[builder(default, setter(strip_option, into))]
    pub address: Option<String>,

    /// Category or transfer account (`L`).
    #[builder(default, setter(strip_option, into))]
    pub category: Option<String>,

    #[builder(default)]
    pub splits: Vec<Split>,
}

impl Transaction {
    /// Build a transaction out of a normalized record.
    ///
    /// The record must carry a date already converted by the tokenizer.
    pub fn from_record(record: &Record) -> Result<Transaction, DecodeError> {
        let date = record.date().ok_or(DecodeError::MissingDate)?;

        let amount = match record.text(code::AMOUNT) {
            Some(value) => Some(parse_amount(code::AMOUNT, value)?),
            None => record
                .text(code::AMOUNT_ALT)
                .map(|value| parse_amount(code::AMOUNT_ALT, value))
                .transpose()?,
        };

        Ok(Transaction {
            date,
            amount,
            status: non_empty(record, code::STATUS).map(Status::from),
            number: non_empty(record, code::NUMBER).map(String::from),
            payee: non_empty(record, code::PAYEE).map(String::from),
            memo: non_empty(record, code::MEMO).map(String::from),
            address: non_empty(record, code::ADDRESS).map(String::from),
            category: non_empty(record, code::CATEGORY).map(String::from),
            splits: splits(record)?,
        })
    }
}

/// Decode `record`, or `None` if it can't be read as a transaction.
pub fn decode(record: &Record) -> Option<Transaction> {
    Transaction::from_record(record).ok()
}

fn non_empty(record: &Record, code: char) -> Option<&str> {
    record.text(code).filter(|value| !value.is_empty())
}

fn parse_amount(code: char, value: &str) -> Result<Decimal, DecodeError> {
    let value = value.trim();
    Decimal::from_str(value.strip_prefix('+').unwrap_or(value)).map_err(|_| {
        DecodeError::InvalidAmount {
            code,
            value: value.to_string(),
        }
    })
}

/// Zip the newline-joined `S`, `E` and `$` values back into splits.
///
/// Lines are matched by position, so a split that leaves out its memo shifts
/// the memos of the splits after it.
fn splits(record: &Record) -> Result<Vec<Split>, DecodeError> {
    let categories = lines(record, code::SPLIT_CATEGORY);
    let memos = lines(record, code::SPLIT_MEMO);
    let amounts = lines(record, code::SPLIT_AMOUNT);

    let count = categories.len().max(memos.len()).max(amounts.len());
    (0..count)
        .map(|i| -> Result<Split, DecodeError> {
            let text = |values: &[&str]| {
                values
                    .get(i)
                    .filter(|value| !value.is_empty())
                    .map(|value| value.to_string())
            };
            Ok(Split {
                category: text(&categories[..]),
                memo: text(&memos[..]),
                amount: amounts
                    .get(i)
                    .filter(|value| !value.is_empty())
                    .map(|value| parse_amount(code::SPLIT_AMOUNT, value))
                    .transpose()?,
            })
        })
        .collect()
}

fn lines(record: &Record, code: char) -> Vec<&str> {
    record
        .text(code)
        .map(|text| text.split('\n').collect())
        .unwrap_or_default()
}
