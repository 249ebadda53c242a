//! Expression evaluation
//!
//! Evaluation never short-circuits: both children of every binary node are
//! evaluated, in order, so that property consumption is the same no matter
//! how earlier comparisons turn out.

pub mod boolean;
pub mod comparison;
pub mod unary;

use tracing::trace;

use crate::tree::{Expression, Node, NodeKind};
use crate::{Environment, EvalContext, EvalError, Value};

/// Trait for evaluating tree nodes to values.
pub trait Evaluate {
    /// Evaluate this node against the given properties.
    fn eval(&self, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError>;
}

impl Evaluate for Node {
    fn eval(&self, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        let result = match self.kind() {
            NodeKind::Literal(text) => Ok(Value::Literal(text.clone())),
            NodeKind::Boolean { op, left, right } => boolean::eval_boolean(op, left, right, env, ctx),
            NodeKind::Not { operand } => unary::eval_not(operand, env, ctx),
            NodeKind::Comparison { op, left, right } => {
                comparison::eval_comparison(op, left, right, env, ctx)
            }
        };

        if ctx.trace {
            match &result {
                Ok(value) => trace!(node = %self, value = %value, "evaluated"),
                Err(err) => trace!(node = %self, error = %err, "evaluation failed"),
            }
        }

        result
    }
}

impl Expression {
    /// Evaluate against `env` in the given placement mode.
    ///
    /// Properties consulted by comparisons are removed from `env`; whatever
    /// is left afterwards was never looked at.
    ///
    /// # Errors
    ///
    /// Returns an [`EvalError`] when a property is missing or an operator
    /// receives operands it cannot compare.
    pub fn evaluate(&self, env: &mut Environment, for_primary: bool) -> Result<Value, EvalError> {
        self.evaluate_with(env, &EvalContext::with_primary(for_primary))
    }

    /// Evaluate with an explicit context.
    pub fn evaluate_with(&self, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        self.root().eval(env, ctx)
    }

    /// Evaluate and reduce the outcome to a yes/no answer.
    ///
    /// A boolean result is taken as is. A bare literal counts as satisfied
    /// only if its text is `true`.
    pub fn satisfied(&self, env: &mut Environment, for_primary: bool) -> Result<bool, EvalError> {
        self.evaluate(env, for_primary).map(|value| value.is_truthy())
    }
}

/// Require a boolean operand for `op`.
pub(crate) fn expect_bool(op: &str, value: Value) -> Result<bool, EvalError> {
    match value {
        Value::Boolean(b) => Ok(b),
        other => Err(EvalError::NonBooleanOperand {
            op: op.to_string(),
            found: crate::value::type_name(&other).to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_evaluates_to_itself() {
        let mut env = Environment::new();
        let value = Node::literal("abc").eval(&mut env, &EvalContext::new()).unwrap();
        assert_eq!(value, Value::literal("abc"));
    }

    #[test]
    fn test_expect_bool() {
        assert_eq!(expect_bool("&&", Value::Boolean(true)), Ok(true));
        assert_eq!(
            expect_bool("&&", Value::literal("x")),
            Err(EvalError::NonBooleanOperand {
                op: "&&".to_string(),
                found: "literal".to_string(),
            })
        );
    }

    #[test]
    fn test_satisfied_bare_literal() {
        let mut env = Environment::new();
        assert_eq!(Expression::build("true").unwrap().satisfied(&mut env, false), Ok(true));
        assert_eq!(Expression::build("yes").unwrap().satisfied(&mut env, false), Ok(false));
        assert_eq!(Expression::build("").unwrap().satisfied(&mut env, true), Ok(true));
    }
}
