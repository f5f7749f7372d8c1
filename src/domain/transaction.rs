//! Transaction-record vocabulary shared with the recorder service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which leg of a money movement a record describes.
///
/// A credit increases the named account's balance, a debit decreases it. A
/// transfer emits one of each; a plain deposit emits a single credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Credit,
    Debit,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Credit => write!(f, "credit"),
            Direction::Debit => write!(f, "debit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Direction::Credit).expect("serializable"),
            "\"credit\""
        );
        assert_eq!(
            serde_json::to_string(&Direction::Debit).expect("serializable"),
            "\"debit\""
        );
    }

    #[test]
    fn displays_wire_value() {
        assert_eq!(Direction::Credit.to_string(), "credit");
        assert_eq!(Direction::Debit.to_string(), "debit");
    }
}
