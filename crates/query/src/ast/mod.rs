//! AST module for query expressions and predicates.

mod eval;
mod expr;
mod predicate;

pub use expr::{AggregateFunc, BinaryOp, ColumnRef, Expr, SortOrder, UnaryOp};
pub use predicate::{CombinedPredicate, EvalType, LogicalOp, Predicate, PredicateClone, ValuePredicate};
