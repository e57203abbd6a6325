//! Leaf values - raw textual content in a virtual tree.

use std::fmt;

/// Primitive content of a virtual tree position.
///
/// Text and numbers are distinct primitive subtypes: a `Text("1")` leaf and a
/// `Number(1.0)` leaf render the same string but classify as a kind mismatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    Text(String),
    Number(f64),
}

impl Leaf {
    /// Short name of the primitive subtype (used in log lines).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Number(_) => "number",
        }
    }

    /// Whether both leaves are the same primitive subtype.
    #[inline]
    pub fn same_kind(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// String form used when the leaf is materialized as a host text node.
///
/// Integral numbers render without a fractional part (`3.0` -> `"3"`).
impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Leaf {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Leaf {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for Leaf {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Leaf {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Leaf {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}
