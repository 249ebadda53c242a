//! Comparison evaluation
//!
//! The left operand names a property; its value is taken out of the
//! environment and compared with the right operand's text. Operands that
//! both parse as numbers compare numerically, operands that both parse as
//! URIs compare structurally, and anything else compares as text.

use std::cmp::Ordering;

use crate::operator::Operator;
use crate::tree::Node;
use crate::uri::Uri;
use crate::{Environment, EvalContext, EvalError, Value};

use super::Evaluate;

/// Evaluate a comparison node.
pub(crate) fn eval_comparison(
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

    let (Value::Literal(name), Value::Literal(expected)) = (left, right) else {
        return Err(EvalError::NonLiteralOperand {
            op: op.symbol.to_string(),
        });
    };

    // comparisons outside the requested mode, and `~`, do not take part
    if op.is_primary_variant() != ctx.for_primary || op.is_policy() {
        return Ok(Value::Boolean(true));
    }

    let actual = env
        .take(&name)
        .ok_or(EvalError::PropertyNotDefined { name })?;

    compare(op, &actual, &expected).map(Value::Boolean)
}

/// Compare a property value against the expected text.
pub fn compare(op: &Operator, actual: &str, expected: &str) -> Result<bool, EvalError> {
    let numbers = parse_number(actual).zip(parse_number(expected));
    let uris = match numbers {
        Some(_) => None,
        None => actual.parse::<Uri>().ok().zip(expected.parse::<Uri>().ok()),
    };

    match op.base_symbol() {
        "==" => Ok(equals(numbers, uris.as_ref(), actual, expected)),
        "!=" => Ok(!equals(numbers, uris.as_ref(), actual, expected)),
        "^" => prefix(op, numbers, uris.as_ref(), actual, expected),
        "!^" => prefix(op, numbers, uris.as_ref(), actual, expected).map(|b| !b),
        ">=" | "<=" | "<" | ">" => {
            let (a, b) = numbers.ok_or_else(|| EvalError::NonNumericOrdering {
                op: op.symbol.to_string(),
                left: actual.to_string(),
                right: expected.to_string(),
            })?;
            let ordering = a.partial_cmp(&b);
            Ok(match op.base_symbol() {
                ">=" => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
                "<=" => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
                "<" => ordering == Some(Ordering::Less),
                _ => ordering == Some(Ordering::Greater),
            })
        }
        _ => Err(EvalError::UnknownOperator {
            op: op.symbol.to_string(),
        }),
    }
}

/// Decimal parse of the whole string after leading whitespace.
///
/// Overflow saturates to infinity. `NaN` is not a number.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    text.trim_start().parse::<f64>().ok().filter(|n| !n.is_nan())
}

fn equals(numbers: Option<(f64, f64)>, uris: Option<&(Uri, Uri)>, actual: &str, expected: &str) -> bool {
    match (numbers, uris) {
        (Some((a, b)), _) => a == b,
        (None, Some((a, b))) => a == b,
        (None, None) => actual == expected,
    }
}

/// Is the property value under the expected value?
fn prefix(
    op: &Operator,
    numbers: Option<(f64, f64)>,
    uris: Option<&(Uri, Uri)>,
    actual: &str,
    expected: &str,
) -> Result<bool, EvalError> {
    if numbers.is_some() {
        return Err(EvalError::NumericPrefix {
            op: op.symbol.to_string(),
        });
    }
    Ok(match uris {
        Some((actual, expected)) => expected.is_prefix_of(actual) || expected == actual,
        None => actual.starts_with(expected),
    })
}
