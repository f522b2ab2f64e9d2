use chrono::NaiveDate;

/// Field codes understood by the codec.
pub mod code {
    pub const DATE: char = 'D';
    pub const AMOUNT: char = 'T';
    /// Newer Quicken versions repeat the amount here with more precision.
    pub const AMOUNT_ALT: char = 'U';
    pub const STATUS: char = 'C';
    pub const NUMBER: char = 'N';
    pub const PAYEE: char = 'P';
    pub const MEMO: char = 'M';
    pub const ADDRESS: char = 'A';
    pub const CATEGORY: char = 'L';
    pub const SPLIT_CATEGORY: char = 'S';
    pub const SPLIT_MEMO: char = 'E';
    pub const SPLIT_AMOUNT: char = '$';

    /// Terminates every record.
    pub const END: char = '^';
    /// Starts every header line.
    pub const HEADER: char = '!';

    /// Codes whose values have thousands separators stripped.
    pub const AMOUNTS: [char; 3] = [AMOUNT, AMOUNT_ALT, SPLIT_AMOUNT];
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
}

/// One `^`-terminated block of a QIF file, keyed by field code.
///
/// Codes keep the order in which they first appeared. Appending to a code
/// that is already present joins the values with a newline, which is how
/// memos, addresses and splits spanning several lines are carried.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Record {
    fields: Vec<(char, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one line's value under `code`.
    ///
    /// A code already holding a date falls back to text, so the joined value
    /// no longer reads as one date.
    pub fn append(&mut self, code: char, value: &str) {
        match self.fields.iter_mut().find(|(c, _)| *c == code) {
            Some((_, FieldValue::Text(existing))) => {
                existing.push('\n');
                existing.push_str(value);
            }
            Some((_, slot)) => {
                let previous = match slot {
                    FieldValue::Date(date) => date.to_string(),
                    FieldValue::Text(text) => text.clone(),
                };
                *slot = FieldValue::Text(format!("{}\n{}", previous, value));
            }
            None => self.fields.push((code, FieldValue::Text(value.to_string()))),
        }
    }

    /// Replace (or insert) the value stored under `code`.
    pub fn set(&mut self, code: char, value: FieldValue) {
        match self.fields.iter_mut().find(|(c, _)| *c == code) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((code, value)),
        }
    }

    pub fn get(&self, code: char) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, code: char) -> Option<&mut FieldValue> {
        self.fields
            .iter_mut()
            .find(|(c, _)| *c == code)
            .map(|(_, value)| value)
    }

    /// The text stored under `code`, if it holds text.
    pub fn text(&self, code: char) -> Option<&str> {
        match self.get(code) {
            Some(FieldValue::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// The record's date, once the tokenizer has converted it.
    pub fn date(&self) -> Option<NaiveDate> {
        match self.get(code::DATE) {
            Some(FieldValue::Date(date)) => Some(*date),
            _ => None,
        }
    }

    pub fn codes(&self) -> impl Iterator<Item = char> + '_ {
        self.fields.iter().map(|(c, _)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &FieldValue)> + '_ {
        self.fields.iter().map(|(c, v)| (*c, v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
