//! Values produced by evaluating an expression node

use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved evaluation result.
///
/// Literal nodes resolve to [`Value::Literal`]; comparisons and boolean
/// connectives resolve to [`Value::Boolean`]. The error case of an
/// evaluation is carried separately as `Err(EvalError)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// A scalar token, either a property name or a comparison operand
    Literal(String),

    /// A resolved truth value
    Boolean(bool),
}

impl Value {
    /// Create a literal value.
    pub fn literal(text: impl Into<String>) -> Self {
        Value::Literal(text.into())
    }

    /// Is this a literal?
    pub fn is_literal(&self) -> bool {
        matches!(self, Value::Literal(_))
    }

    /// Is this a boolean?
    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    /// The boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            Value::Literal(_) => None,
        }
    }

    /// The literal text, if this is a literal.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Value::Literal(s) => Some(s),
            Value::Boolean(_) => None,
        }
    }

    /// Truthiness at the top level of an evaluation: booleans are
    /// themselves, a literal is true only when its text is `true`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Literal(s) => s == "true",
        }
    }
}

/// Human-readable name of a value's case, for error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Literal(_) => "literal",
        Value::Boolean(_) => "boolean",
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Literal(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Literal(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Literal(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let lit = Value::literal("fd:/DC0");
        assert!(lit.is_literal());
        assert_eq!(lit.as_literal(), Some("fd:/DC0"));
        assert_eq!(lit.as_bool(), None);

        let b = Value::from(false);
        assert!(b.is_boolean());
        assert_eq!(b.as_bool(), Some(false));
        assert_eq!(b.as_literal(), None);
    }

    #[test]
    fn test_truthiness() {
        assert!(Value::Boolean(true).is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
        assert!(Value::from("true").is_truthy());
        assert!(!Value::from("yes").is_truthy());
    }

    #[test]
    fn test_display_and_type_name() {
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(type_name(&Value::from("abc")), "literal");
        assert_eq!(type_name(&Value::from(true)), "boolean");
    }
}
