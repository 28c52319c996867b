//! SCOTT Query - Relational operators over in-memory tables.
//!
//! This crate provides the pieces the tutorial queries are assembled from:
//!
//! - `ast`: Expressions, predicates and the expression evaluator
//! - `executor`: One-shot operators (scan, filter, project, sort, limit, join,
//!   aggregate, distinct, quantify) that turn a `Relation` into a new `Relation`

#![no_std]

extern crate alloc;

pub mod ast;
pub mod executor;
