//! Expression evaluation against a single row.
//!
//! NULL handling follows SQL: comparisons and arithmetic with a NULL operand yield NULL,
//! `AND`/`OR` use three-valued logic, and a NULL predicate result filters the row out.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use alloc::vec::Vec;
use scott_core::{Row, Value};

impl Expr {
    /// Evaluates this expression against a row.
    ///
    /// Column references that fall outside the row evaluate to NULL.
    pub fn eval(&self, row: &Row) -> Value {
        match self {
            Expr::Column(col) => row.get(col.index).cloned().unwrap_or(Value::Null),

            Expr::Literal(value) => value.clone(),

            Expr::BinaryOp { left, op, right } => {
                let left_val = left.eval(row);
                let right_val = right.eval(row);
                eval_binary_op(*op, &left_val, &right_val)
            }

            Expr::UnaryOp { op, expr } => eval_unary_op(*op, &expr.eval(row)),

            Expr::Function { name, args } => {
                let arg_values: Vec<Value> = args.iter().map(|a| a.eval(row)).collect();
                eval_function(name, &arg_values)
            }

            Expr::Between { expr, low, high } => {
                let val = expr.eval(row);
                let low_val = low.eval(row);
                let high_val = high.eval(row);
                if val.is_null() || low_val.is_null() || high_val.is_null() {
                    return Value::Null;
                }
                Value::Boolean(val >= low_val && val <= high_val)
            }

            Expr::In { expr, list } => {
                let val = expr.eval(row);
                if val.is_null() {
                    return Value::Null;
                }
                Value::Boolean(list.iter().any(|item| item.eval(row) == val))
            }
        }
    }

    /// Evaluates this expression as a predicate; NULL and non-boolean results are false.
    #[inline]
    pub fn eval_predicate(&self, row: &Row) -> bool {
        matches!(self.eval(row), Value::Boolean(true))
    }
}

fn eval_binary_op(op: BinaryOp, left: &Value, right: &Value) -> Value {
    // Handle NULL propagation
    if left.is_null() || right.is_null() {
        return match op {
            BinaryOp::And => {
                // NULL AND FALSE = FALSE, NULL AND TRUE = NULL
                if matches!(left, Value::Boolean(false)) || matches!(right, Value::Boolean(false)) {
                    Value::Boolean(false)
                } else {
                    Value::Null
                }
            }
            BinaryOp::Or => {
                // NULL OR TRUE = TRUE, NULL OR FALSE = NULL
                if matches!(left, Value::Boolean(true)) || matches!(right, Value::Boolean(true)) {
                    Value::Boolean(true)
                } else {
                    Value::Null
                }
            }
            _ => Value::Null,
        };
    }

    match op {
        BinaryOp::Eq => Value::Boolean(left == right),
        BinaryOp::Ne => Value::Boolean(left != right),
        BinaryOp::Lt => Value::Boolean(left < right),
        BinaryOp::Le => Value::Boolean(left <= right),
        BinaryOp::Gt => Value::Boolean(left > right),
        BinaryOp::Ge => Value::Boolean(left >= right),
        BinaryOp::And => Value::Boolean(
            matches!(left, Value::Boolean(true)) && matches!(right, Value::Boolean(true)),
        ),
        BinaryOp::Or => Value::Boolean(
            matches!(left, Value::Boolean(true)) || matches!(right, Value::Boolean(true)),
        ),
        BinaryOp::Add => eval_arithmetic(left, right, i64::checked_add, |a, b| a + b),
        BinaryOp::Sub => eval_arithmetic(left, right, i64::checked_sub, |a, b| a - b),
        BinaryOp::Mul => eval_arithmetic(left, right, i64::checked_mul, |a, b| a * b),
        BinaryOp::Div => match right {
            // Division by zero yields NULL
            Value::Int64(0) => Value::Null,
            Value::Float64(f) if *f == 0.0 => Value::Null,
            _ => eval_arithmetic(left, right, i64::checked_div, |a, b| a / b),
        },
    }
}

/// Integer operands stay in `i64` and overflow yields NULL; any float operand
/// switches the whole operation to `f64`.
fn eval_arithmetic<I, F>(left: &Value, right: &Value, int_op: I, float_op: F) -> Value
where
    I: Fn(i64, i64) -> Option<i64>,
    F: Fn(f64, f64) -> f64,
{
    if let (Value::Int64(l), Value::Int64(r)) = (left, right) {
        return int_op(*l, *r).map_or(Value::Null, Value::Int64);
    }

    match (left.as_number(), right.as_number()) {
        (Some(l), Some(r)) => Value::Float64(float_op(l, r)),
        _ => Value::Null,
    }
}

fn eval_unary_op(op: UnaryOp, value: &Value) -> Value {
    match op {
        UnaryOp::Not => match value {
            Value::Boolean(b) => Value::Boolean(!b),
            _ => Value::Null,
        },
        UnaryOp::Neg => match value {
            Value::Int64(i) => i.checked_neg().map_or(Value::Null, Value::Int64),
            Value::Float64(f) => Value::Float64(-f),
            _ => Value::Null,
        },
        UnaryOp::IsNull => Value::Boolean(value.is_null()),
        UnaryOp::IsNotNull => Value::Boolean(!value.is_null()),
    }
}

fn eval_function(name: &str, args: &[Value]) -> Value {
    if name.eq_ignore_ascii_case("COALESCE") || name.eq_ignore_ascii_case("NVL") {
        return args
            .iter()
            .find(|arg| !arg.is_null())
            .cloned()
            .unwrap_or(Value::Null);
    }
    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn emp_row(sal: i64, comm: Option<i64>) -> Row {
        Row::new(1, vec![Value::String("ALLEN".into()), Value::Int64(sal), comm.into()])
    }

    #[test]
    fn test_eval_column_and_literal() {
        let row = emp_row(1600, Some(300));
        assert_eq!(Expr::column("emp", "sal", 1).eval(&row), Value::Int64(1600));
        assert_eq!(Expr::column("emp", "missing", 9).eval(&row), Value::Null);
        assert_eq!(Expr::literal("x").eval(&row), Value::String("x".into()));
    }

    #[test]
    fn test_coalesce_income() {
        let income = Expr::add(
            Expr::column("emp", "sal", 1),
            Expr::coalesce(Expr::column("emp", "comm", 2), Expr::literal(0i64)),
        );
        assert_eq!(income.eval(&emp_row(1600, Some(300))), Value::Int64(1900));
        assert_eq!(income.eval(&emp_row(800, None)), Value::Int64(800));
    }

    #[test]
    fn test_null_arithmetic_propagates() {
        let expr = Expr::add(Expr::column("emp", "sal", 1), Expr::column("emp", "comm", 2));
        assert_eq!(expr.eval(&emp_row(800, None)), Value::Null);
    }

    #[test]
    fn test_comparison_with_null_is_not_true() {
        let pred = Expr::gt(Expr::column("emp", "comm", 2), Expr::literal(400i64));
        assert!(!pred.eval_predicate(&emp_row(800, None)));
        assert!(pred.eval_predicate(&emp_row(1250, Some(500))));
    }

    #[test]
    fn test_three_valued_logic() {
        let row = emp_row(800, None);
        let null_cmp = Expr::gt(Expr::column("emp", "comm", 2), Expr::literal(0i64));

        let and_false = Expr::and(null_cmp.clone(), Expr::literal(false));
        assert_eq!(and_false.eval(&row), Value::Boolean(false));

        let or_true = Expr::or(null_cmp.clone(), Expr::literal(true));
        assert_eq!(or_true.eval(&row), Value::Boolean(true));

        let or_false = Expr::or(null_cmp, Expr::literal(false));
        assert_eq!(or_false.eval(&row), Value::Null);
    }

    #[test]
    fn test_between_inclusive() {
        let pred = |v: i64| {
            Expr::between(Expr::literal(v), Expr::literal(1401i64), Expr::literal(2000i64))
                .eval_predicate(&Row::dummy(vec![]))
        };
        assert!(pred(1401));
        assert!(pred(2000));
        assert!(!pred(1400));
        assert!(!pred(2001));
    }

    #[test]
    fn test_in_list() {
        let row = Row::new(1, vec![Value::Int64(30)]);
        let pred = Expr::in_list(
            Expr::column("emp", "deptno", 0),
            vec![Value::Int64(10), Value::Int64(30)],
        );
        assert!(pred.eval_predicate(&row));

        let miss = Expr::in_list(Expr::column("emp", "deptno", 0), vec![Value::Int64(20)]);
        assert!(!miss.eval_predicate(&row));
    }

    #[test]
    fn test_unary_ops() {
        let row = emp_row(800, None);
        assert!(Expr::is_null(Expr::column("emp", "comm", 2)).eval_predicate(&row));
        assert!(!Expr::is_not_null(Expr::column("emp", "comm", 2)).eval_predicate(&row));
        assert_eq!(Expr::neg(Expr::literal(5i64)).eval(&row), Value::Int64(-5));
        assert_eq!(Expr::not(Expr::literal(true)).eval(&row), Value::Boolean(false));
    }

    #[test]
    fn test_division() {
        let row = Row::dummy(vec![]);
        assert_eq!(
            Expr::div(Expr::literal(2850.0), Expr::literal(2i64)).eval(&row),
            Value::Float64(1425.0)
        );
        assert_eq!(
            Expr::div(Expr::literal(1i64), Expr::literal(0i64)).eval(&row),
            Value::Null
        );
    }

    #[test]
    fn test_unknown_function_is_null() {
        let row = Row::dummy(vec![]);
        assert_eq!(Expr::function("NOPE", vec![]).eval(&row), Value::Null);
        assert_eq!(
            Expr::function("nvl", vec![Expr::literal(Value::Null), Expr::literal(7i64)]).eval(&row),
            Value::Int64(7)
        );
    }

    #[test]
    fn test_integer_arithmetic_is_exact() {
        let row = Row::dummy(vec![]);
        let big = 9_007_199_254_740_993i64;
        assert_eq!(
            Expr::add(Expr::literal(big), Expr::literal(0i64)).eval(&row),
            Value::Int64(big)
        );
        assert_eq!(
            Expr::sub(Expr::literal(big), Expr::literal(1i64)).eval(&row),
            Value::Int64(big - 1)
        );
        assert_eq!(
            Expr::div(Expr::literal(7i64), Expr::literal(2i64)).eval(&row),
            Value::Int64(3)
        );
    }

    #[test]
    fn test_integer_overflow_is_null() {
        let row = Row::dummy(vec![]);
        assert_eq!(
            Expr::add(Expr::literal(i64::MAX), Expr::literal(1i64)).eval(&row),
            Value::Null
        );
        assert_eq!(
            Expr::mul(Expr::literal(i64::MIN), Expr::literal(-1i64)).eval(&row),
            Value::Null
        );
        assert_eq!(
            Expr::div(Expr::literal(i64::MIN), Expr::literal(-1i64)).eval(&row),
            Value::Null
        );
        assert_eq!(Expr::neg(Expr::literal(i64::MIN)).eval(&row), Value::Null);
    }

    #[test]
    fn test_mixed_arithmetic_is_float() {
        let row = Row::dummy(vec![]);
        assert_eq!(
            Expr::add(Expr::literal(1i64), Expr::literal(0.5)).eval(&row),
            Value::Float64(1.5)
        );
    }

    #[test]
    fn test_equality_agrees_with_between() {
        let row = Row::dummy(vec![]);
        let eq = Expr::eq(Expr::literal(3i64), Expr::literal(3.0)).eval(&row);
        let between =
            Expr::between(Expr::literal(3i64), Expr::literal(3.0), Expr::literal(3.0)).eval(&row);
        assert_eq!(eq, Value::Boolean(true));
        assert_eq!(eq, between);

        let in_list = Expr::in_list(Expr::literal(3.0), vec![Value::Int64(3)]);
        assert!(in_list.eval_predicate(&row));
    }
}
