//! SCOTT Tutorial - the EMP / DEPT / SALGRADE tables and the classic tutorial queries.
//!
//! The dataset is fixed and immutable. Each query is a pure function that scans the
//! tables through the `scott-query` operators and returns a fresh [`Relation`],
//! a scalar [`Value`](scott_core::Value), or a `bool`.
//!
//! # Example
//!
//! ```rust
//! use scott_tutorial::{queries, Employee};
//!
//! let salesmen = queries::salesmen();
//! assert!(salesmen
//!     .rows()
//!     .map(|row| Employee::try_from(row).unwrap())
//!     .all(|emp| emp.job == "SALESMAN"));
//!
//! assert_eq!(queries::total_income_of("ALLEN").unwrap(), 1900);
//! ```

mod dataset;
pub mod display;
mod model;
pub mod queries;
pub mod scenario;

pub use dataset::{
    dept_table, dept_table_as, departments, emp_table, emp_table_as, employees, salary_grades,
    salgrade_table, salgrade_table_as,
};
pub use model::{date_to_millis, millis_to_date, Department, Employee, SalaryGrade};
pub use scenario::{find, scenarios, Scenario};
pub use scott_query::executor::Relation;
