//! The operator catalog
//!
//! A fixed, ordered table consulted top-to-bottom for the first symbol that
//! matches at a scan position. Order matters: `!=`, `!^P` and `!^` must be
//! tried before the bare `!`, and `^P` before `^`.

use std::fmt;

/// Suffix marking a comparison that only applies to the primary replica.
pub const PRIMARY_SUFFIX: char = 'P';

/// Precedence level given to literal tokens. Literals never enter the
/// operator stack; the level exists so every node has one.
pub const LITERAL_LEVEL: u8 = 5;

/// Operator category, which decides how a node is built and evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// `(` and `)`
    Paren,
    /// `&&` and `||`
    Boolean,
    /// `==`, `!=`, ordering, prefix and `~`
    Comparison,
    /// Unary `!`
    Not,
}

/// One catalog entry.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Operator {
    /// Exact source text of the operator
    pub symbol: &'static str,

    /// Higher binds tighter
    pub level: u8,

    /// How the operator builds and evaluates
    pub category: Category,
}

impl Operator {
    const fn new(symbol: &'static str, level: u8, category: Category) -> Self {
        Self {
            symbol,
            level,
            category,
        }
    }

    /// True for comparisons that only apply when evaluating for the primary
    /// replica (`^P`, `!^P`).
    pub fn is_primary_variant(&self) -> bool {
        self.category == Category::Comparison && self.symbol.ends_with(PRIMARY_SUFFIX)
    }

    /// The symbol with any primary-variant suffix removed.
    pub fn base_symbol(&self) -> &'static str {
        if self.is_primary_variant() {
            &self.symbol[..self.symbol.len() - PRIMARY_SUFFIX.len_utf8()]
        } else {
            self.symbol
        }
    }

    /// True for the policy-extraction operator `~`.
    pub fn is_policy(&self) -> bool {
        self.symbol == POLICY.symbol
    }

    /// Does this operator's symbol occur in `text` at byte offset `pos`?
    pub fn matches_at(&self, text: &str, pos: usize) -> bool {
        text.as_bytes()
            .get(pos..)
            .is_some_and(|rest| rest.starts_with(self.symbol.as_bytes()))
    }

    /// First catalog entry whose symbol occurs at `pos`.
    pub fn lookup_at(text: &str, pos: usize) -> Option<&'static Operator> {
        CATALOG.iter().find(|op| op.matches_at(text, pos))
    }

    /// Catalog entry with exactly this symbol.
    pub fn by_symbol(symbol: &str) -> Option<&'static Operator> {
        CATALOG.iter().find(|op| op.symbol == symbol)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol)
    }
}

/// `(`
pub static OPEN_PAREN: &Operator = &CATALOG[0];
/// `)`
pub static CLOSE_PAREN: &Operator = &CATALOG[1];
/// `||`
pub static OR: &Operator = &CATALOG[2];
/// `&&`
pub static AND: &Operator = &CATALOG[3];
/// `~`
pub static POLICY: &Operator = &CATALOG[14];
/// `!`
pub static NOT: &Operator = &CATALOG[15];

/// The catalog, in match order.
pub static CATALOG: [Operator; 16] = [
    Operator::new("(", 1, Category::Paren),
    Operator::new(")", 1, Category::Paren),
    Operator::new("||", 2, Category::Boolean),
    Operator::new("&&", 3, Category::Boolean),
    Operator::new("==", 4, Category::Comparison),
    Operator::new("!=", 4, Category::Comparison),
    Operator::new(">=", 4, Category::Comparison),
    Operator::new("<=", 4, Category::Comparison),
    Operator::new("<", 4, Category::Comparison),
    Operator::new(">", 4, Category::Comparison),
    Operator::new("^P", 4, Category::Comparison),
    Operator::new("!^P", 4, Category::Comparison),
    Operator::new("^", 4, Category::Comparison),
    Operator::new("!^", 4, Category::Comparison),
    Operator::new("~", 4, Category::Comparison),
    Operator::new("!", 6, Category::Not),
];
