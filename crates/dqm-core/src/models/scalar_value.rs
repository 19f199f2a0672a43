use serde::{Deserialize, Serialize};

/// Value held by a scalar element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ScalarValue {
    Int(i64),
    Real(f64),
    Text(String),
}

impl ScalarValue {
    /// `"i = 42"`, `"f = 2.5"` or `"s = text"`.
    pub fn value_string(&self) -> String {
        match self {
            Self::Int(v) => format!("i = {v}"),
            Self::Real(v) => format!("f = {v}"),
            Self::Text(s) => format!("s = {s}"),
        }
    }
}
