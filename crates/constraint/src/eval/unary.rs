//! `!` evaluation

use crate::operator::NOT;
use crate::tree::Node;
use crate::{Environment, EvalContext, EvalError, Value};

use super::{expect_bool, Evaluate};

/// Evaluate logical negation (`!x`).
pub(crate) fn eval_not(operand: &Node, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
    let value = operand.eval(env, ctx)?;
    Ok(Value::Boolean(!expect_bool(NOT.symbol, value)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_literal_is_error() {
        let mut env = Environment::new();
        let result = eval_not(&Node::literal("a"), &mut env, &EvalContext::new());
        assert_eq!(
            result,
            Err(EvalError::NonBooleanOperand {
                op: "!".to_string(),
                found: "literal".to_string(),
            })
        );
    }
}
