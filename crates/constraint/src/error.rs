//! Error types for constraint compilation and evaluation

use thiserror::Error;

/// Error produced while compiling constraint text into an expression tree.
///
/// Any of these means the text is invalid; there is no partial parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A `(` was never closed, or a `)` had no matching `(`
    #[error("unbalanced parenthesis at offset {position}")]
    UnbalancedParenthesis {
        /// Byte offset where the imbalance was detected
        position: usize,
    },

    /// An operator was reduced without the operands it needs
    #[error("operator `{operator}` is missing an operand")]
    MissingOperand {
        /// Symbol of the operator being reduced
        operator: String,
    },

    /// Input where an operator was expected did not start with one
    #[error("expected an operator at offset {position}, found `{found}`")]
    ExpectedOperator {
        /// Byte offset of the offending input
        position: usize,
        /// The remaining input at that offset
        found: String,
    },

    /// Parsing finished with more (or fewer) than one operand left
    #[error("expression did not reduce to a single operand ({count} left)")]
    DanglingOperands {
        /// Number of operands left on the stack
        count: usize,
    },
}

/// Error produced while evaluating a compiled expression.
///
/// Evaluation errors are values: the caller decides whether the candidate
/// is ineligible, logged, or surfaced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The left operand of a comparison names a property that is absent
    #[error("property `{name}` is not defined")]
    PropertyNotDefined {
        /// Property name looked up in the environment
        name: String,
    },

    /// A comparison received a boolean where it needs a literal
    #[error("comparison operator `{op}` is receiving a non-literal operand")]
    NonLiteralOperand {
        /// Comparison symbol
        op: String,
    },

    /// A boolean connective or `!` received a literal where it needs a boolean
    #[error("boolean operator `{op}` expected a boolean operand, got {found}")]
    NonBooleanOperand {
        /// Boolean symbol
        op: String,
        /// Type name of the operand received
        found: String,
    },

    /// A prefix operator was applied to numeric values
    #[error("numeric operands are not supported by the `{op}` operator")]
    NumericPrefix {
        /// Prefix symbol
        op: String,
    },

    /// An ordering operator was applied to non-numeric values
    #[error("operator `{op}` requires numeric operands, got `{left}` and `{right}`")]
    NonNumericOrdering {
        /// Ordering symbol
        op: String,
        /// Resolved left value
        left: String,
        /// Right value
        right: String,
    },

    /// The operator has no evaluation rule
    #[error("unknown operator `{op}`")]
    UnknownOperator {
        /// Operator symbol
        op: String,
    },
}

/// Error produced while parsing a hierarchical URI.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UriError {
    /// The text has no `scheme:` prefix
    #[error("missing or invalid scheme in `{0}`")]
    InvalidScheme(String),

    /// The authority, host, or remainder of the text was rejected by the URL parser
    #[error("invalid URI `{text}`: {source}")]
    InvalidAuthority {
        /// The text being parsed
        text: String,
        /// What the URL parser objected to
        #[source]
        source: url::ParseError,
    },

    /// The port is not a decimal number in 0..=65535
    #[error("invalid port `{0}`")]
    InvalidPort(String),

    /// A `%` escape is not followed by two hex digits
    #[error("invalid percent-encoding in `{0}`")]
    InvalidEscape(String),
}

/// Umbrella error for the crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    /// Compilation failed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Evaluation failed
    #[error(transparent)]
    Eval(#[from] EvalError),

    /// URI parsing failed
    #[error(transparent)]
    Uri(#[from] UriError),
}

/// Result type alias for constraint operations
pub type Result<T> = std::result::Result<T, ConstraintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_error_messages_are_interpolated() {
        let err = EvalError::PropertyNotDefined {
            name: "NodeType".to_string(),
        };
        assert_eq!(err.to_string(), "property `NodeType` is not defined");
        assert!(!err.to_string().contains("{0}"));
    }

    #[test]
    fn test_umbrella_conversion() {
        let err: ConstraintError = ParseError::DanglingOperands { count: 2 }.into();
        assert!(matches!(err, ConstraintError::Parse(_)));
        assert!(err.to_string().contains("2 left"));
    }
}
