//! Dynamic event arguments.
//!
//! Remote surfaces report event data as loosely typed values (coordinates,
//! key names, modifier flags, edited text). [`Value`] carries one of those,
//! and a [`Payload`] is the ordered tuple an event method returns.

use std::fmt;

/// A single event argument or payload element.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Ordered event payload. Empty means "no data".
pub type Payload = Vec<Value>;

impl Value {
    /// Borrow the string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view: integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(Value::from("a"), Value::Str("a".into()));
        assert_eq!(Value::from(7), Value::Int(7));
        assert_eq!(Value::from(1.5), Value::Float(1.5));
        assert_eq!(Value::from(true), Value::Bool(true));
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::from("key").as_str(), Some("key"));
        assert_eq!(Value::from(3).as_f64(), Some(3.0));
        assert_eq!(Value::from(false).as_bool(), Some(false));
        assert!(Value::from(3).as_str().is_none());
    }

    #[test]
    fn display() {
        assert_eq!(Value::from("x").to_string(), "x");
        assert_eq!(Value::from(12).to_string(), "12");
        assert_eq!(Value::from(true).to_string(), "true");
    }
}
