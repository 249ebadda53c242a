//! `&&` and `||` evaluation

use crate::operator::{Operator, AND};
use crate::tree::Node;
use crate::{Environment, EvalContext, EvalError, Value};

use super::{expect_bool, Evaluate};

/// Evaluate a boolean connective. Both sides are always evaluated.
pub(crate) fn eval_boolean(
    op: &Operator,
    left: &Node,
    right: &Node,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    // the right side runs even if the left one failed
    let left = left.eval(env, ctx);
    let right = right.eval(env, ctx);
    let (left, right) = (left?, right?);

    let left = expect_bool(op.symbol, left)?;
    let right = expect_bool(op.symbol, right)?;

    let result = if op.symbol == AND.symbol {
        left && right
    } else {
        left || right
    };
    Ok(Value::Boolean(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::OR;

    fn yes() -> Node {
        Node::binary(Operator::by_symbol("==").unwrap(), Node::literal("a"), Node::literal("1")).unwrap()
    }

    #[test]
    fn test_no_short_circuit() {
        // the right side still consumes `b` even though the left side is false
        let eq = Operator::by_symbol("==").unwrap();
        let left = Node::binary(eq, Node::literal("a"), Node::literal("2")).unwrap();
        let right = Node::binary(eq, Node::literal("b"), Node::literal("2")).unwrap();
        let mut env = Environment::new().with("a", "1").with("b", "2");

        let value = eval_boolean(AND, &left, &right, &mut env, &EvalContext::new()).unwrap();
        assert_eq!(value, Value::Boolean(false));
        assert!(env.is_empty());
    }

    #[test]
    fn test_literal_operand_is_error() {
        let mut env = Environment::new().with("a", "1");
        let value = eval_boolean(OR, &yes(), &Node::literal("x"), &mut env, &EvalContext::new());
        assert!(matches!(value, Err(EvalError::NonBooleanOperand { .. })));
    }
}
