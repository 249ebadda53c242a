//! # Fabric Constraint
//!
//! A compiler and evaluator for placement-constraint expressions.
//!
//! Constraint text such as `NodeType == FrontEnd && FaultDomain ^ fd:/DC0`
//! is compiled once into an immutable expression tree, then evaluated against
//! the properties of each candidate node. The same tree serves both primary
//! and secondary replica placement: primary-variant operators (`^P`, `!^P`)
//! only take part when evaluating for the primary, and every other
//! comparison only when evaluating for a secondary.
//!
//! ## Architecture
//!
//! - **Lexer / Parser**: operator-precedence parse into a [`Node`] tree
//! - **Tree**: immutable nodes with derived fault-domain and placement policy
//! - **Evaluator**: typed comparison over numbers, URIs and text
//! - **Cache**: shared compiled expressions keyed by source text
//!
//! ## Example
//!
//! ```
//! use fabric_constraint::{Environment, Expression};
//!
//! let expr = Expression::build("FaultDomain ^ fd:/DC0 && Memory >= 16").unwrap();
//!
//! let mut env = Environment::new()
//!     .with("FaultDomain", "fd:/DC0/Rack3")
//!     .with("Memory", "32");
//! assert_eq!(expr.satisfied(&mut env, false), Ok(true));
//! assert!(env.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod context;
pub mod environment;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod operator;
pub mod parser;
pub mod tree;
pub mod uri;
pub mod value;

// Re-export main types
pub use cache::ExpressionCache;
pub use context::EvalContext;
pub use environment::Environment;
pub use error::{ConstraintError, EvalError, ParseError, Result, UriError};
pub use eval::Evaluate;
pub use operator::{Category, Operator};
pub use tree::{Expression, Node, NodeKind, FAULT_DOMAIN_POLICY_NAME, PLACEMENT_POLICY_NAME};
pub use uri::{HostKind, Uri};
pub use value::Value;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
