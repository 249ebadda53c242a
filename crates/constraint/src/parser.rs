//! Operator-precedence parser
//!
//! A shunting-yard variant over two LIFO stacks: operands (nullable nodes)
//! and pending operators (seeded with a level-0 sentinel). Binary operators
//! reduce everything at the same or a tighter level before being pushed, which
//! gives comparisons > `&&` > `||`. The prefix `!` is pushed without reducing
//! and leaves a placeholder on the operand stack where its left operand would
//! be.

use tracing::{debug, trace};

use crate::error::ParseError;
use crate::lexer::Lexer;
use crate::operator::{Category, Operator};
use crate::tree::{Expression, Node};

/// Entry on the pending-operator stack.
#[derive(Debug, Clone, Copy)]
enum Pending {
    /// Bottom of the stack; never reduced
    Sentinel,
    /// A catalog operator waiting for its operands
    Op(&'static Operator),
}

impl Pending {
    fn level(&self) -> u8 {
        match self {
            Pending::Sentinel => 0,
            Pending::Op(op) => op.level,
        }
    }

    fn is_open_paren(&self) -> bool {
        matches!(self, Pending::Op(op) if op.category == Category::Paren)
    }
}

/// Compile constraint text into an expression.
///
/// Empty or all-whitespace text compiles to the literal `true`.
pub fn parse(text: &str) -> Result<Expression, ParseError> {
    if text.trim_matches([' ', '\t', '\r', '\n']).is_empty() {
        return Ok(Expression::new(Node::literal("true"), false));
    }

    match Parser::new(text).run() {
        Ok(expr) => {
            debug!(constraint = text, for_primary = expr.for_primary(), "compiled constraint");
            Ok(expr)
        }
        Err(err) => {
            debug!(constraint = text, error = %err, "rejected constraint");
            Err(err)
        }
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    operands: Vec<Option<Node>>,
    operators: Vec<Pending>,
    for_primary: bool,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lexer: Lexer::new(text),
            operands: Vec::new(),
            operators: vec![Pending::Sentinel],
            for_primary: false,
        }
    }

    fn run(mut self) -> Result<Expression, ParseError> {
        // Alternate between reading a literal and reading an operator. A
        // missing literal is not an error here; missing operands surface
        // when the operator that needs them is reduced.
        let mut expect_token = true;
        while expect_token || !self.lexer.is_at_end() {
            if expect_token {
                if let Some(token) = self.lexer.read_token() {
                    self.operands.push(Some(Node::literal(token)));
                }
                expect_token = false;
                continue;
            }

            self.lexer.skip_whitespace();
            if self.lexer.is_at_end() {
                break;
            }

            let position = self.lexer.position();
            let op = self
                .lexer
                .read_operator()
                .ok_or_else(|| ParseError::ExpectedOperator {
                    position,
                    found: self.lexer.rest().to_string(),
                })?;
            expect_token = self.shift(op, position)?;
        }

        while self.operators.len() > 1 {
            self.reduce()?;
        }

        if self.operands.len() != 1 {
            return Err(ParseError::DanglingOperands {
                count: self.operands.len(),
            });
        }

        match self.operands.pop().flatten() {
            Some(root) => Ok(Expression::new(root, self.for_primary)),
            None => Err(ParseError::DanglingOperands { count: 0 }),
        }
    }

    /// Handle one operator. Returns whether a literal should be read next.
    fn shift(&mut self, op: &'static Operator, position: usize) -> Result<bool, ParseError> {
        match (op.category, op.symbol) {
            (Category::Paren, "(") => {
                self.operators.push(Pending::Op(op));
                Ok(true)
            }
            (Category::Paren, _) => {
                while !self.top().is_open_paren() {
                    if matches!(self.top(), Pending::Sentinel) {
                        return Err(ParseError::UnbalancedParenthesis { position });
                    }
                    self.reduce()?;
                }
                self.operators.pop();
                // an operator always follows `)`
                Ok(false)
            }
            (Category::Not, _) => {
                self.operators.push(Pending::Op(op));
                self.operands.push(None);
                Ok(true)
            }
            _ => {
                if op.is_primary_variant() {
                    self.for_primary = true;
                }
                while self.top().level() >= op.level {
                    self.reduce()?;
                }
                self.operators.push(Pending::Op(op));
                Ok(true)
            }
        }
    }

    fn top(&self) -> Pending {
        self.operators.last().copied().unwrap_or(Pending::Sentinel)
    }

    /// Pop one operator and its operands, push the built node.
    fn reduce(&mut self) -> Result<(), ParseError> {
        let op = match self.operators.pop() {
            Some(Pending::Op(op)) if op.category != Category::Paren => op,
            // an unclosed `(` or the sentinel itself
            _ => {
                return Err(ParseError::UnbalancedParenthesis {
                    position: self.lexer.position(),
                })
            }
        };

        let missing = || ParseError::MissingOperand {
            operator: op.symbol.to_string(),
        };

        if self.operands.len() < 2 {
            return Err(missing());
        }
        let right = self.operands.pop().flatten().ok_or_else(missing)?;
        let left = self.operands.pop().flatten();

        let node = if op.category == Category::Not {
            // `left` is the placeholder pushed with the `!`
            Node::not(right)
        } else {
            let left = left.ok_or_else(missing)?;
            Node::binary(op, left, right).ok_or_else(missing)?
        };

        trace!(operator = op.symbol, node = %node, "reduced");
        self.operands.push(Some(node));
        Ok(())
    }
}
