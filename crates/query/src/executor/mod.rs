//! Query executor module.

mod aggregate;
mod distinct;
mod filter;
pub mod join;
mod limit;
mod project;
mod quantify;
mod relation;
mod scan;
mod sort;

pub use aggregate::AggregateExecutor;
pub use distinct::DistinctExecutor;
pub use filter::{try_filter_relation, FilterExecutor};
pub use join::{HashJoin, NestedLoopJoin, RangeJoin};
pub use limit::LimitExecutor;
pub use project::{ComputeExecutor, ProjectExecutor};
pub use quantify::{QuantifyExecutor, Quantifier};
pub use relation::{Relation, RelationEntry, SharedTables};
pub use scan::TableScanExecutor;
pub use sort::SortExecutor;
