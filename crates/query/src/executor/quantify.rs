//! Universal and existential quantifiers over a relation.

use crate::ast::Predicate;
use crate::executor::Relation;

/// Which quantifier to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantifier {
    /// Every row satisfies the predicate (true for an empty relation).
    All,
    /// At least one row satisfies the predicate (false for an empty relation).
    Any,
}

/// Quantify executor - reduces a relation to a single boolean.
pub struct QuantifyExecutor<P: Predicate> {
    quantifier: Quantifier,
    predicate: P,
}

impl<P: Predicate> QuantifyExecutor<P> {
    /// Creates a quantifier over `predicate`.
    pub fn new(quantifier: Quantifier, predicate: P) -> Self {
        Self {
            quantifier,
            predicate,
        }
    }

    /// `ALL` over `predicate`.
    pub fn all(predicate: P) -> Self {
        Self::new(Quantifier::All, predicate)
    }

    /// `ANY` over `predicate`.
    pub fn any(predicate: P) -> Self {
        Self::new(Quantifier::Any, predicate)
    }

    /// Evaluates the quantifier; stops at the first deciding row.
    pub fn execute(&self, input: &Relation) -> bool {
        match self.quantifier {
            Quantifier::All => input.rows().all(|row| self.predicate.eval(row)),
            Quantifier::Any => input.rows().any(|row| self.predicate.eval(row)),
        }
    }
}
