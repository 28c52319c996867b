//! Predicate definitions for query filtering.

use crate::ast::expr::{BinaryOp, ColumnRef, Expr};
use alloc::boxed::Box;
use alloc::vec::Vec;
use hashbrown::HashSet;
use scott_core::{Row, Value};

/// Evaluation type for predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvalType {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl EvalType {
    /// Applies the comparison to two non-null values.
    pub fn compare(&self, left: &Value, right: &Value) -> bool {
        match self {
            EvalType::Eq => left == right,
            EvalType::Ne => left != right,
            EvalType::Lt => left < right,
            EvalType::Le => left <= right,
            EvalType::Gt => left > right,
            EvalType::Ge => left >= right,
        }
    }
}

impl TryFrom<BinaryOp> for EvalType {
    type Error = BinaryOp;

    fn try_from(op: BinaryOp) -> Result<Self, Self::Error> {
        match op {
            BinaryOp::Eq => Ok(EvalType::Eq),
            BinaryOp::Ne => Ok(EvalType::Ne),
            BinaryOp::Lt => Ok(EvalType::Lt),
            BinaryOp::Le => Ok(EvalType::Le),
            BinaryOp::Gt => Ok(EvalType::Gt),
            BinaryOp::Ge => Ok(EvalType::Ge),
            other => Err(other),
        }
    }
}

/// A predicate that can be evaluated against rows.
pub trait Predicate {
    /// Evaluates the predicate against a row.
    fn eval(&self, row: &Row) -> bool;

    /// Returns the columns referenced by this predicate.
    fn columns(&self) -> Vec<&ColumnRef>;

    /// Returns the tables referenced by this predicate, each once, in first-use order.
    fn tables(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.columns()
            .into_iter()
            .map(|c| c.table.as_str())
            .filter(|t| seen.insert(*t))
            .collect()
    }
}

/// A value predicate compares a column to a literal value.
///
/// A NULL cell never satisfies the comparison.
#[derive(Clone, Debug)]
pub struct ValuePredicate {
    pub column: ColumnRef,
    pub eval_type: EvalType,
    pub value: Value,
}

impl ValuePredicate {
    pub fn new(column: ColumnRef, eval_type: EvalType, value: Value) -> Self {
        Self {
            column,
            eval_type,
            value,
        }
    }

    pub fn eq(column: ColumnRef, value: impl Into<Value>) -> Self {
        Self::new(column, EvalType::Eq, value.into())
    }

    pub fn ne(column: ColumnRef, value: impl Into<Value>) -> Self {
        Self::new(column, EvalType::Ne, value.into())
    }

    pub fn lt(column: ColumnRef, value: impl Into<Value>) -> Self {
        Self::new(column, EvalType::Lt, value.into())
    }

    pub fn le(column: ColumnRef, value: impl Into<Value>) -> Self {
        Self::new(column, EvalType::Le, value.into())
    }

    pub fn gt(column: ColumnRef, value: impl Into<Value>) -> Self {
        Self::new(column, EvalType::Gt, value.into())
    }

    pub fn ge(column: ColumnRef, value: impl Into<Value>) -> Self {
        Self::new(column, EvalType::Ge, value.into())
    }
}

impl Predicate for ValuePredicate {
    fn eval(&self, row: &Row) -> bool {
        match row.get(self.column.index) {
            Some(v) if !v.is_null() && !self.value.is_null() => {
                self.eval_type.compare(v, &self.value)
            }
            _ => false,
        }
    }

    fn columns(&self) -> Vec<&ColumnRef> {
        alloc::vec![&self.column]
    }
}

impl Predicate for Expr {
    fn eval(&self, row: &Row) -> bool {
        self.eval_predicate(row)
    }

    fn columns(&self) -> Vec<&ColumnRef> {
        let mut out = Vec::new();
        collect_columns(self, &mut out);
        out
    }
}

fn collect_columns<'a>(expr: &'a Expr, out: &mut Vec<&'a ColumnRef>) {
    match expr {
        Expr::Column(col) => out.push(col),
        Expr::Literal(_) => {}
        Expr::BinaryOp { left, right, .. } => {
            collect_columns(left, out);
            collect_columns(right, out);
        }
        Expr::UnaryOp { expr, .. } => collect_columns(expr, out),
        Expr::Function { args, .. } => args.iter().for_each(|a| collect_columns(a, out)),
        Expr::Between { expr, low, high } => {
            collect_columns(expr, out);
            collect_columns(low, out);
            collect_columns(high, out);
        }
        Expr::In { expr, list } => {
            collect_columns(expr, out);
            list.iter().for_each(|a| collect_columns(a, out));
        }
    }
}

/// Logical operator for combining predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

/// A combined predicate joins multiple predicates with AND/OR.
#[derive(Clone, Debug)]
pub struct CombinedPredicate {
    pub op: LogicalOp,
    pub children: Vec<Box<dyn PredicateClone>>,
}

/// Helper trait for cloning boxed predicates.
pub trait PredicateClone: Predicate {
    fn clone_box(&self) -> Box<dyn PredicateClone>;
}

impl<T: Predicate + Clone + 'static> PredicateClone for T {
    fn clone_box(&self) -> Box<dyn PredicateClone> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn PredicateClone> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl core::fmt::Debug for Box<dyn PredicateClone> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PredicateClone")
    }
}

impl CombinedPredicate {
    pub fn and(children: Vec<Box<dyn PredicateClone>>) -> Self {
        Self {
            op: LogicalOp::And,
            children,
        }
    }

    pub fn or(children: Vec<Box<dyn PredicateClone>>) -> Self {
        Self {
            op: LogicalOp::Or,
            children,
        }
    }
}

impl Predicate for CombinedPredicate {
    fn eval(&self, row: &Row) -> bool {
        match self.op {
            LogicalOp::And => self.children.iter().all(|p| p.eval(row)),
            LogicalOp::Or => self.children.iter().any(|p| p.eval(row)),
        }
    }

    fn columns(&self) -> Vec<&ColumnRef> {
        self.children.iter().flat_map(|p| p.columns()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_value_predicate_eq() {
        let col = ColumnRef::new("emp", "job", 0);
        let pred = ValuePredicate::eq(col, "SALESMAN");

        let row_match = Row::new(1, vec![Value::String("SALESMAN".into())]);
        let row_no_match = Row::new(2, vec![Value::String("CLERK".into())]);

        assert!(pred.eval(&row_match));
        assert!(!pred.eval(&row_no_match));
    }

    #[test]
    fn test_value_predicate_comparison() {
        let col = ColumnRef::new("emp", "sal", 0);

        let pred_lt = ValuePredicate::lt(col.clone(), 1000i64);
        let pred_gt = ValuePredicate::gt(col, 1000i64);

        let row = Row::new(1, vec![Value::Int64(800)]);

        assert!(pred_lt.eval(&row));
        assert!(!pred_gt.eval(&row));
    }

    #[test]
    fn test_value_predicate_null_never_matches() {
        let col = ColumnRef::new("emp", "comm", 0);
        let row = Row::new(1, vec![Value::Null]);

        assert!(!ValuePredicate::lt(col.clone(), 400i64).eval(&row));
        assert!(!ValuePredicate::ne(col.clone(), 400i64).eval(&row));
        assert!(!ValuePredicate::eq(col, Value::Null).eval(&row));
    }

    #[test]
    fn test_combined_predicate() {
        let job = ValuePredicate::eq(ColumnRef::new("emp", "job", 0), "SALESMAN");
        let sal = ValuePredicate::ge(ColumnRef::new("emp", "sal", 1), 1500i64);
        let both = CombinedPredicate::and(vec![Box::new(job.clone()), Box::new(sal.clone())]);
        let either = CombinedPredicate::or(vec![Box::new(job), Box::new(sal)]);

        let allen = Row::new(1, vec![Value::String("SALESMAN".into()), Value::Int64(1600)]);
        let ward = Row::new(2, vec![Value::String("SALESMAN".into()), Value::Int64(1250)]);
        let smith = Row::new(3, vec![Value::String("CLERK".into()), Value::Int64(800)]);

        assert!(both.eval(&allen));
        assert!(!both.eval(&ward));
        assert!(either.eval(&ward));
        assert!(!either.eval(&smith));
        assert_eq!(both.columns().len(), 2);
    }

    #[test]
    fn test_expr_predicate_columns_and_tables() {
        let pred = Expr::and(
            Expr::gt(Expr::column("emp", "sal", 5), Expr::literal(1000i64)),
            Expr::eq(Expr::column("emp", "deptno", 7), Expr::column("dept", "deptno", 8)),
        );
        assert_eq!(pred.columns().len(), 3);
        assert_eq!(pred.tables(), vec!["emp", "dept"]);
    }

    #[test]
    fn test_tables_dedup_non_adjacent() {
        // emp.mgr = mgr.empno AND dept.loc = 'CHICAGO' AND emp.deptno = dept.deptno
        let pred = Expr::and(
            Expr::and(
                Expr::eq(Expr::column("emp", "mgr", 3), Expr::column("mgr", "empno", 8)),
                Expr::eq(Expr::column("dept", "loc", 18), Expr::literal("CHICAGO")),
            ),
            Expr::eq(Expr::column("emp", "deptno", 7), Expr::column("dept", "deptno", 16)),
        );
        assert_eq!(pred.tables(), vec!["emp", "mgr", "dept"]);
    }

    #[test]
    fn test_eval_type_from_binary_op() {
        assert_eq!(EvalType::try_from(BinaryOp::Ge), Ok(EvalType::Ge));
        assert_eq!(EvalType::try_from(BinaryOp::Add), Err(BinaryOp::Add));
    }
}
