//! The tutorial queries, one function per SQL statement.
//!
//! Every function scans the fixed tables and returns a fresh result; none of them
//! keep state between calls. Result relations keep the column layout documented on
//! each function, so callers index them with the [`Employee`], [`Department`] and
//! [`SalaryGrade`] column constants (shifted past the left side of a join).

use crate::dataset::{dept_table, emp_table, emp_table_as, salgrade_table};
use crate::model::{Department, Employee, SalaryGrade};
use hashbrown::HashMap;
use scott_core::{DataType, Error, Result, Value};
use scott_query::ast::{AggregateFunc, ColumnRef, Expr, SortOrder, ValuePredicate};
use scott_query::executor::join::{HashJoin, RangeJoin};
use scott_query::executor::{
    try_filter_relation, AggregateExecutor, ComputeExecutor, DistinctExecutor, FilterExecutor,
    LimitExecutor, ProjectExecutor, QuantifyExecutor, Relation, SortExecutor,
};
use tracing::{debug, error};

/// Offset of the `DEPT` columns in `emp ⋈ dept`.
pub const JOINED_DEPT_OFFSET: usize = Employee::COLUMN_COUNT;
/// Offset of the `SALGRADE` columns in `emp ⋈ salgrade`.
pub const JOINED_GRADE_OFFSET: usize = Employee::COLUMN_COUNT;
/// Offset of the manager's columns in `emp e ⋈ emp m`.
pub const MANAGER_OFFSET: usize = Employee::COLUMN_COUNT;
/// Offset of the `SALGRADE` columns in `emp ⋈ dept ⋈ salgrade`.
pub const THREE_WAY_GRADE_OFFSET: usize = Employee::COLUMN_COUNT + Department::COLUMN_COUNT;

fn emp_column(index: usize) -> ColumnRef {
    ColumnRef::new(Employee::TABLE, Employee::COLUMNS[index], index)
}

fn emp_expr(index: usize) -> Expr {
    Expr::Column(emp_column(index))
}

fn traced(query: &str, result: Relation) -> Relation {
    debug!(query, rows = result.len(), "query executed");
    result
}

/// First cell of the first row, or NULL for an empty relation.
fn scalar(result: &Relation) -> Value {
    result
        .entries
        .first()
        .and_then(|e| e.get_field(0))
        .cloned()
        .unwrap_or(Value::Null)
}

/// `SELECT * FROM emp WHERE job = 'SALESMAN'`
pub fn salesmen() -> Relation {
    let filter = FilterExecutor::new(ValuePredicate::eq(emp_column(Employee::JOB), "SALESMAN"));
    traced("salesmen", filter.execute(emp_table()))
}

/// `SELECT * FROM emp WHERE deptno = 30 ORDER BY sal DESC`
pub fn dept_30_by_salary_desc() -> Relation {
    let filter = FilterExecutor::new(ValuePredicate::eq(emp_column(Employee::DEPTNO), 30i64));
    let sorted = SortExecutor::by(Employee::SAL, SortOrder::Desc).execute(filter.execute(emp_table()));
    traced("dept_30_by_salary_desc", sorted)
}

/// `SELECT * FROM emp WHERE deptno IN (SELECT deptno FROM dept WHERE loc = 'CHICAGO')`
///
/// The subquery runs first and its department numbers become an `IN` list.
pub fn employees_in_chicago() -> Relation {
    let loc = ColumnRef::new(Department::TABLE, Department::COLUMNS[Department::LOC], Department::LOC);
    let chicago = FilterExecutor::new(ValuePredicate::eq(loc, "CHICAGO")).execute(dept_table());
    let deptnos: Vec<Value> = chicago.column_values(Department::DEPTNO).cloned().collect();

    let filter = FilterExecutor::new(Expr::in_list(emp_expr(Employee::DEPTNO), deptnos));
    traced("employees_in_chicago", filter.execute(emp_table()))
}

/// `SELECT ename, sal FROM emp` as `(ename, sal)`.
pub fn names_and_salaries() -> Relation {
    let project = ProjectExecutor::new(vec![Employee::ENAME, Employee::SAL]);
    traced("names_and_salaries", project.execute(emp_table()))
}

/// `SELECT * FROM emp JOIN dept ON emp.deptno = dept.deptno`
///
/// EMP columns, then DEPT columns from [`JOINED_DEPT_OFFSET`]; rows follow EMP order.
pub fn employees_with_departments() -> Relation {
    let join = HashJoin::inner(Employee::DEPTNO, Department::DEPTNO);
    traced("employees_with_departments", join.execute(emp_table(), dept_table()))
}

/// `SELECT deptno, COUNT(*) FROM emp GROUP BY deptno` as `(deptno, count)`.
pub fn headcount_by_department() -> Relation {
    let aggregate = AggregateExecutor::new(vec![Employee::DEPTNO], vec![(AggregateFunc::Count, None)]);
    traced("headcount_by_department", aggregate.execute(emp_table()))
}

/// `SELECT * FROM emp WHERE comm IS NOT NULL`
///
/// A commission of zero is still a commission.
pub fn commissioned_employees() -> Relation {
    let filter = FilterExecutor::new(Expr::is_not_null(emp_expr(Employee::COMM)));
    traced("commissioned_employees", filter.execute(emp_table()))
}

/// `SELECT * FROM emp JOIN salgrade ON emp.sal BETWEEN salgrade.losal AND salgrade.hisal`
///
/// EMP columns, then SALGRADE columns from [`JOINED_GRADE_OFFSET`].
pub fn employees_with_grades() -> Relation {
    let join = RangeJoin::new(Employee::SAL, SalaryGrade::LOSAL, SalaryGrade::HISAL);
    traced("employees_with_grades", join.execute(emp_table(), salgrade_table()))
}

/// `SELECT deptno, AVG(sal) FROM emp GROUP BY deptno` as `(deptno, avg)`.
///
/// Averages are `Float64`; departments appear in order of their first employee.
pub fn average_salary_by_department() -> Relation {
    let aggregate = AggregateExecutor::new(
        vec![Employee::DEPTNO],
        vec![(AggregateFunc::Avg, Some(Employee::SAL))],
    );
    traced("average_salary_by_department", aggregate.execute(emp_table()))
}

/// Department averages keyed by `deptno`.
fn department_averages() -> HashMap<Value, f64> {
    average_salary_by_department()
        .iter()
        .filter_map(|entry| {
            let deptno = entry.get_field(0)?.clone();
            let avg = entry.get_field(1)?.as_number()?;
            Some((deptno, avg))
        })
        .collect()
}

/// `SELECT * FROM emp e WHERE sal > (SELECT AVG(sal) FROM emp WHERE deptno = e.deptno)`
///
/// The averages are computed once into a lookup, then each employee is compared
/// with its own department's value.
///
/// # Errors
///
/// See [`above_average_in`].
pub fn above_department_average() -> Result<Relation> {
    let result = above_average_in(emp_table(), &department_averages())?;
    Ok(traced("above_department_average", result))
}

/// Keeps the employees of `emp` earning more than their department's entry in
/// `averages`, keyed by `deptno`.
///
/// # Errors
///
/// Returns [`Error::NotFound`] at the first employee whose department has no
/// average, and [`Error::TypeMismatch`] if a salary is not numeric.
pub fn above_average_in(emp: Relation, averages: &HashMap<Value, f64>) -> Result<Relation> {
    try_filter_relation(emp, |entry| {
        let deptno = entry.get_field(Employee::DEPTNO).cloned().unwrap_or(Value::Null);
        let Some(&avg) = averages.get(&deptno) else {
            error!(%deptno, "no average salary for department");
            return Err(Error::not_found("dept_avg", deptno));
        };
        let sal = entry.get_field(Employee::SAL).unwrap_or(&Value::Null);
        let sal = sal
            .as_number()
            .ok_or_else(|| Error::type_mismatch("sal", DataType::Int64, sal))?;
        Ok(sal > avg)
    })
}

/// `SELECT MAX(sal) FROM emp`
pub fn max_salary() -> Value {
    let aggregate = AggregateExecutor::no_group(vec![(AggregateFunc::Max, Some(Employee::SAL))]);
    let value = scalar(&aggregate.execute(emp_table()));
    debug!(query = "max_salary", %value, "query executed");
    value
}

/// `SELECT MIN(sal) FROM emp WHERE deptno = :deptno`
///
/// NULL when the department has no employees.
pub fn min_salary_in_department(deptno: i64) -> Value {
    let filter = FilterExecutor::new(ValuePredicate::eq(emp_column(Employee::DEPTNO), deptno));
    let aggregate = AggregateExecutor::no_group(vec![(AggregateFunc::Min, Some(Employee::SAL))]);
    let value = scalar(&aggregate.execute(filter.execute(emp_table())));
    debug!(query = "min_salary_in_department", deptno, %value, "query executed");
    value
}

/// `SELECT * FROM emp ORDER BY hiredate ASC LIMIT :n`
///
/// Employees hired on the same day keep dataset order.
pub fn earliest_hires(n: usize) -> Relation {
    let sorted = SortExecutor::by(Employee::HIREDATE, SortOrder::Asc).execute(emp_table());
    traced("earliest_hires", LimitExecutor::limit_only(n).execute(sorted))
}

/// `SELECT DISTINCT job FROM emp` as `(job)`, in order of first appearance.
pub fn distinct_jobs() -> Relation {
    let jobs = ProjectExecutor::new(vec![Employee::JOB]).execute(emp_table());
    traced("distinct_jobs", DistinctExecutor::new(vec![0]).execute(jobs))
}

/// `SELECT * FROM emp WHERE mgr IS NOT NULL`
pub fn managed_employees() -> Relation {
    let filter = FilterExecutor::new(Expr::is_not_null(emp_expr(Employee::MGR)));
    traced("managed_employees", filter.execute(emp_table()))
}

/// `:threshold < ALL (SELECT sal FROM emp)`
pub fn all_earn_more_than(threshold: i64) -> bool {
    let all = QuantifyExecutor::all(ValuePredicate::gt(emp_column(Employee::SAL), threshold));
    let holds = all.execute(&emp_table());
    debug!(query = "all_earn_more_than", threshold, holds, "query executed");
    holds
}

/// `:threshold < ANY (SELECT comm FROM emp)`; absent commissions never qualify.
pub fn any_commission_above(threshold: i64) -> bool {
    let any = QuantifyExecutor::any(ValuePredicate::gt(emp_column(Employee::COMM), threshold));
    let holds = any.execute(&emp_table());
    debug!(query = "any_commission_above", threshold, holds, "query executed");
    holds
}

/// `SELECT * FROM emp e JOIN emp m ON e.mgr = m.empno`
///
/// The employee's columns, then the manager's from [`MANAGER_OFFSET`]. The head of
/// the company has no manager and does not appear.
pub fn employees_with_managers() -> Relation {
    let join = HashJoin::inner(Employee::MGR, Employee::EMPNO);
    traced("employees_with_managers", join.execute(emp_table_as("e"), emp_table_as("m")))
}

fn income_expr() -> Expr {
    Expr::add(
        emp_expr(Employee::SAL),
        Expr::coalesce(emp_expr(Employee::COMM), Expr::literal(0i64)),
    )
}

/// `SELECT ename, sal + COALESCE(comm, 0) FROM emp` as `(ename, income)`.
pub fn total_income() -> Relation {
    let compute = ComputeExecutor::new(vec![emp_expr(Employee::ENAME), income_expr()]);
    traced("total_income", compute.execute(emp_table()))
}

/// `SELECT sal + COALESCE(comm, 0) FROM emp WHERE ename = :name`
///
/// # Errors
///
/// Returns [`Error::NotFound`] if no employee has that name.
pub fn total_income_of(name: &str) -> Result<i64> {
    let filter = FilterExecutor::new(ValuePredicate::eq(emp_column(Employee::ENAME), name));
    let incomes = ComputeExecutor::new(vec![income_expr()]).execute(filter.execute(emp_table()));

    match scalar(&incomes) {
        Value::Null => Err(Error::not_found(Employee::TABLE, Value::from(name))),
        value => value
            .as_i64()
            .ok_or_else(|| Error::type_mismatch("income", DataType::Int64, &value)),
    }
}

/// `SELECT * FROM emp JOIN dept ON emp.deptno = dept.deptno
///  JOIN salgrade ON emp.sal BETWEEN salgrade.losal AND salgrade.hisal`
///
/// EMP columns, DEPT columns from [`JOINED_DEPT_OFFSET`], SALGRADE columns from
/// [`THREE_WAY_GRADE_OFFSET`].
pub fn employees_with_departments_and_grades() -> Relation {
    let with_depts = employees_with_departments();
    let join = RangeJoin::new(Employee::SAL, SalaryGrade::LOSAL, SalaryGrade::HISAL);
    traced(
        "employees_with_departments_and_grades",
        join.execute(with_depts, salgrade_table()),
    )
}
