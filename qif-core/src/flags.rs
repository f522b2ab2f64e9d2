use std::fmt;

/// The cleared status of a transaction (`C` line).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Status {
    Cleared,
    Reconciled,
    Other(String),
}

impl From<&str> for Status {
    fn from(s: &str) -> Self {
        match s {
            "*" | "c" | "C" => Status::Cleared,
            "X" | "x" | "R" | "r" => Status::Reconciled,
            _ => Status::Other(s.to_string()),
        }
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        Status::from(s.as_str())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Cleared => write!(f, "*"),
            Status::Reconciled => write!(f, "X"),
            Status::Other(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str() {
        assert_eq!(Status::from("*"), Status::Cleared);
        assert_eq!(Status::from("c"), Status::Cleared);
        assert_eq!(Status::from("X"), Status::Reconciled);
        assert_eq!(Status::from("R"), Status::Reconciled);
        assert_eq!(Status::from("?"), Status::Other("?".to_string()));
    }

    #[test]
    fn display_reads_back() {
        for status in vec![Status::Cleared, Status::Reconciled, Status::Other("!".into())] {
            assert_eq!(Status::from(status.to_string()), status);
        }
    }
}
