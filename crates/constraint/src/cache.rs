//! Compiled-expression cache
//!
//! Placement decisions evaluate the same handful of constraints against many
//! candidate nodes, so compiled expressions are kept keyed by their source
//! text and handed out as shared [`Arc`]s.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::error::{ParseError, Result};
use crate::tree::Expression;
use crate::Environment;

/// Thread-safe cache of compiled expressions.
#[derive(Debug, Default)]
pub struct ExpressionCache {
    entries: DashMap<String, Arc<Expression>>,
}

impl ExpressionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the compiled form of `text`, compiling it on first use.
    ///
    /// Invalid text is not cached; each call reports the error again.
    pub fn get_or_build(&self, text: &str) -> std::result::Result<Arc<Expression>, ParseError> {
        if let Some(expr) = self.entries.get(text) {
            debug!(constraint = text, "expression cache hit");
            return Ok(Arc::clone(expr.value()));
        }

        debug!(constraint = text, "expression cache miss");
        let expr = Arc::new(Expression::build(text)?);
        // another thread may have won the race; keep whichever landed first
        let entry = self.entries.entry(text.to_string()).or_insert(expr);
        Ok(Arc::clone(entry.value()))
    }

    /// Compile `text` through the cache and test it against `env`.
    ///
    /// Fails with [`ConstraintError::Parse`](crate::ConstraintError::Parse)
    /// for invalid text and [`ConstraintError::Eval`](crate::ConstraintError::Eval)
    /// if evaluation fails. `env` is consumed as by [`Expression::satisfied`].
    pub fn satisfied(&self, text: &str, env: &mut Environment, for_primary: bool) -> Result<bool> {
        let expr = self.get_or_build(text)?;
        Ok(expr.satisfied(env, for_primary)?)
    }

    /// Cached expression for `text`, without compiling.
    pub fn get(&self, text: &str) -> Option<Arc<Expression>> {
        self.entries.get(text).map(|e| Arc::clone(e.value()))
    }

    /// Is `text` cached?
    pub fn contains(&self, text: &str) -> bool {
        self.entries.contains_key(text)
    }

    /// Drop the entry for `text`. Returns whether one was present.
    pub fn invalidate(&self, text: &str) -> bool {
        self.entries.remove(text).is_some()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of cached expressions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the cache empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
