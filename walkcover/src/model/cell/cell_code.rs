use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// SA1 statistical area code, the smallest population aggregation unit
/// in the analysis.
#[derive(Debug, Default, Clone, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash)]
pub struct CellCode(pub String);

impl Display for CellCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CellCode {
    fn from(value: &str) -> Self {
        CellCode(value.to_string())
    }
}
