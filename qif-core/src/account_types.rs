use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;

lazy_static! {
    static ref HEADERS: HashMap<String, AccountType> = AccountType::ALL
        .iter()
        .map(|ty| (ty.header().to_lowercase(), *ty))
        .collect();
}

/// Account types a QIF file may declare in its `!Type:` header.
///
/// <https://en.wikipedia.org/wiki/Quicken_Interchange_Format>
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum AccountType {
    Bank,
    Cash,
    CreditCard,
    OtherAsset,
    OtherLiability,
}

impl AccountType {
    pub const ALL: [AccountType; 5] = [
        AccountType::Bank,
        AccountType::Cash,
        AccountType::CreditCard,
        AccountType::OtherAsset,
        AccountType::OtherLiability,
    ];

    /// The label following `!Type:` in a header line.
    pub fn label(self) -> &'static str {
        match self {
            AccountType::Bank => "Bank",
            AccountType::Cash => "Cash",
            AccountType::CreditCard => "CCard",
            AccountType::OtherAsset => "Oth A",
            AccountType::OtherLiability => "Oth L",
        }
    }

    pub fn header(self) -> String {
        format!("!Type:{}", self.label())
    }

    pub fn description(self) -> &'static str {
        match self {
            AccountType::Bank => "Bank account transactions",
            AccountType::Cash => "Cash account transactions",
            AccountType::CreditCard => "Credit card account transactions",
            AccountType::OtherAsset => "Asset account transactions",
            AccountType::OtherLiability => "Liability account transactions",
        }
    }

    /// Look up a full header line such as `!type:ccard`, ignoring case and surrounding whitespace.
    pub fn from_header(line: &str) -> Option<AccountType> {
        HEADERS.get(&line.trim().to_lowercase()).copied()
    }

    /// Every supported header line, for error messages.
    pub fn supported_headers() -> Vec<String> {
        Self::ALL.iter().map(|ty| ty.header()).collect()
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
