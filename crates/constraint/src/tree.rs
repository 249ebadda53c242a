//! The compiled expression tree
//!
//! Nodes are built bottom-up by the parser and never mutated afterwards, so a
//! compiled [`Expression`] can be shared across threads and evaluated
//! concurrently. Derived policy metadata is computed while each node is built.

use std::fmt;

use crate::error::ParseError;
use crate::operator::{Category, Operator, LITERAL_LEVEL};
use crate::parser;

/// Left operand that makes a `~` node carry a fault-domain policy.
pub const FAULT_DOMAIN_POLICY_NAME: &str = "FDPolicy";

/// Left operand that makes a `~` node carry a placement policy.
pub const PLACEMENT_POLICY_NAME: &str = "PlacePolicy";

/// The shape of a node. Each case carries exactly the children it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A literal token: a property name or a comparison operand
    Literal(String),

    /// `&&` or `||`
    Boolean {
        /// Catalog entry
        op: &'static Operator,
        /// Left operand
        left: Box<Node>,
        /// Right operand
        right: Box<Node>,
    },

    /// Unary `!`
    Not {
        /// The negated operand
        operand: Box<Node>,
    },

    /// A comparison, including primary variants and `~`
    Comparison {
        /// Catalog entry
        op: &'static Operator,
        /// Property name side
        left: Box<Node>,
        /// Value side
        right: Box<Node>,
    },
}

/// A node of a compiled expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    fault_domain_policy: Option<String>,
    placement_policy: Option<String>,
}

impl Node {
    /// Create a literal node.
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Literal(text.into()),
            fault_domain_policy: None,
            placement_policy: None,
        }
    }

    /// Create a `!` node over `operand`.
    pub fn not(operand: Node) -> Self {
        Self {
            fault_domain_policy: operand.fault_domain_policy.clone(),
            placement_policy: operand.placement_policy.clone(),
            kind: NodeKind::Not {
                operand: Box::new(operand),
            },
        }
    }

    /// Create a binary node, deriving policy metadata.
    ///
    /// A `~` whose operands are both literals and whose left operand is
    /// `FDPolicy` (or `PlacePolicy`) takes the right operand's text as its
    /// fault-domain (or placement) policy. Otherwise each policy is inherited
    /// from the left child, then the right child.
    ///
    /// Returns `None` if `op` is not a binary operator.
    pub fn binary(op: &'static Operator, left: Node, right: Node) -> Option<Self> {
        let fault_domain_policy = derive_policy(op, &left, &right, FAULT_DOMAIN_POLICY_NAME, |n| {
            n.fault_domain_policy.as_ref()
        });
        let placement_policy = derive_policy(op, &left, &right, PLACEMENT_POLICY_NAME, |n| {
            n.placement_policy.as_ref()
        });

        let (left, right) = (Box::new(left), Box::new(right));
        let kind = match op.category {
            Category::Boolean => NodeKind::Boolean { op, left, right },
            Category::Comparison => NodeKind::Comparison { op, left, right },
            Category::Not | Category::Paren => return None,
        };

        Some(Self {
            kind,
            fault_domain_policy,
            placement_policy,
        })
    }

    /// The node's shape and children.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The catalog entry, or `None` for literals.
    pub fn operator(&self) -> Option<&'static Operator> {
        match &self.kind {
            NodeKind::Literal(_) => None,
            NodeKind::Not { .. } => Some(crate::operator::NOT),
            NodeKind::Boolean { op, .. } | NodeKind::Comparison { op, .. } => Some(*op),
        }
    }

    /// Precedence level of the node's operator.
    pub fn level(&self) -> u8 {
        self.operator().map_or(LITERAL_LEVEL, |op| op.level)
    }

    /// Is this a literal token?
    pub fn is_literal(&self) -> bool {
        matches!(self.kind, NodeKind::Literal(_))
    }

    /// The literal text, if this is a literal.
    pub fn as_literal(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Literal(text) => Some(text),
            _ => None,
        }
    }

    /// Fault-domain policy carried by this subtree.
    pub fn fault_domain_policy(&self) -> Option<&str> {
        self.fault_domain_policy.as_deref()
    }

    /// Placement policy carried by this subtree.
    pub fn placement_policy(&self) -> Option<&str> {
        self.placement_policy.as_deref()
    }
}

fn derive_policy(
    op: &Operator,
    left: &Node,
    right: &Node,
    name: &str,
    inherited: impl Fn(&Node) -> Option<&String>,
) -> Option<String> {
    if op.is_policy() && left.as_literal() == Some(name) {
        if let Some(value) = right.as_literal() {
            return Some(value.to_string());
        }
    }
    inherited(left).or_else(|| inherited(right)).cloned()
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Literal(text) => f.write_str(text),
            NodeKind::Not { operand } if operand.is_literal() => write!(f, "!({})", operand),
            NodeKind::Not { operand } => write!(f, "!{}", operand),
            NodeKind::Boolean { op, left, right } | NodeKind::Comparison { op, left, right } => {
                write!(f, "({} {} {})", left, op, right)
            }
        }
    }
}

/// A compiled constraint expression.
///
/// # Example
///
/// ```
/// use fabric_constraint::{Environment, Expression};
///
/// let expr = Expression::build("NodeType == FrontEnd && FDPolicy ~ Nonpacking").unwrap();
/// assert_eq!(expr.fault_domain_policy(), Some("Nonpacking"));
///
/// let mut env = Environment::new().with("NodeType", "FrontEnd");
/// assert_eq!(expr.satisfied(&mut env, false), Ok(true));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    root: Node,
    for_primary: bool,
}

impl Expression {
    /// Compile constraint text.
    ///
    /// Empty text compiles to the literal `true`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for any malformed input; the text must be
    /// rejected as a whole.
    pub fn build(text: &str) -> Result<Self, ParseError> {
        parser::parse(text)
    }

    pub(crate) fn new(root: Node, for_primary: bool) -> Self {
        Self { root, for_primary }
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// True if any primary-variant operator occurs in the expression.
    pub fn for_primary(&self) -> bool {
        self.for_primary
    }

    /// Is the whole expression a single literal?
    pub fn is_literal(&self) -> bool {
        self.root.is_literal()
    }

    /// Fault-domain policy extracted with `FDPolicy ~ value`.
    pub fn fault_domain_policy(&self) -> Option<&str> {
        self.root.fault_domain_policy()
    }

    /// Placement policy extracted with `PlacePolicy ~ value`.
    pub fn placement_policy(&self) -> Option<&str> {
        self.root.placement_policy()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

impl std::str::FromStr for Expression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::build(s)
    }
}
