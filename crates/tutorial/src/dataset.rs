//! The fixed EMP / DEPT / SALGRADE tables.
//!
//! Typed records are built once per process and handed out as `'static` slices.
//! Row encodings are built once per thread, since `Rc` rows cannot be shared across
//! threads, and every scan of a table shares the same rows.

use crate::model::{Department, Employee, SalaryGrade};
use chrono::NaiveDate;
use scott_core::Row;
use scott_query::executor::{Relation, TableScanExecutor};
use std::rc::Rc;
use std::sync::LazyLock;

const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid calendar date"),
    }
}

type EmpRecord = (i64, &'static str, &'static str, Option<i64>, NaiveDate, i64, Option<i64>, i64);

// (empno, ename, job, mgr, hiredate, sal, comm, deptno)
const EMP_DATA: [EmpRecord; 14] = [
    (7369, "SMITH", "CLERK", Some(7902), date(1980, 12, 17), 800, None, 20),
    (7499, "ALLEN", "SALESMAN", Some(7698), date(1981, 2, 20), 1600, Some(300), 30),
    (7521, "WARD", "SALESMAN", Some(7698), date(1981, 2, 22), 1250, Some(500), 30),
    (7566, "JONES", "MANAGER", Some(7839), date(1981, 4, 2), 2975, None, 20),
    (7654, "MARTIN", "SALESMAN", Some(7698), date(1981, 9, 28), 1250, Some(1400), 20),
    (7698, "BLAKE", "MANAGER", Some(7839), date(1981, 5, 1), 2850, None, 10),
    (7782, "CLARK", "MANAGER", Some(7839), date(1981, 6, 9), 2450, None, 10),
    (7788, "SCOTT", "ANALYST", Some(7566), date(1987, 4, 19), 3000, None, 20),
    (7839, "KING", "PRESIDENT", None, date(1981, 11, 17), 5000, None, 10),
    (7844, "TURNER", "SALESMAN", Some(7698), date(1981, 9, 8), 1500, Some(0), 10),
    (7876, "ADAMS", "CLERK", Some(7788), date(1987, 5, 23), 1100, None, 20),
    (7900, "JAMES", "CLERK", Some(7698), date(1981, 12, 3), 950, None, 20),
    (7902, "FORD", "ANALYST", Some(7566), date(1981, 12, 3), 3000, None, 20),
    (7934, "MILLER", "CLERK", Some(7782), date(1982, 1, 23), 1300, None, 10),
];

const DEPT_DATA: [(i64, &str, &str); 4] = [
    (10, "ACCOUNTING", "NEW YORK"),
    (20, "RESEARCH", "DALLAS"),
    (30, "SALES", "CHICAGO"),
    (40, "OPERATIONS", "BOSTON"),
];

const SALGRADE_DATA: [SalaryGrade; 5] = [
    SalaryGrade { grade: 1, losal: 700, hisal: 1200 },
    SalaryGrade { grade: 2, losal: 1201, hisal: 1400 },
    SalaryGrade { grade: 3, losal: 1401, hisal: 2000 },
    SalaryGrade { grade: 4, losal: 2001, hisal: 3000 },
    SalaryGrade { grade: 5, losal: 3001, hisal: 9999 },
];

static EMPLOYEES: LazyLock<Vec<Employee>> = LazyLock::new(|| {
    EMP_DATA
        .iter()
        .map(|&(empno, ename, job, mgr, hiredate, sal, comm, deptno)| Employee {
            empno,
            ename: ename.into(),
            job: job.into(),
            mgr,
            hiredate,
            sal,
            comm,
            deptno,
        })
        .collect()
});

static DEPARTMENTS: LazyLock<Vec<Department>> = LazyLock::new(|| {
    DEPT_DATA
        .iter()
        .map(|&(deptno, dname, loc)| Department {
            deptno,
            dname: dname.into(),
            loc: loc.into(),
        })
        .collect()
});

thread_local! {
    static EMP_ROWS: Vec<Rc<Row>> = encode(employees());
    static DEPT_ROWS: Vec<Rc<Row>> = encode(departments());
    static SALGRADE_ROWS: Vec<Rc<Row>> = encode(salary_grades());
}

fn encode<'a, T>(records: &'a [T]) -> Vec<Rc<Row>>
where
    Row: From<&'a T>,
{
    records.iter().map(|r| Rc::new(Row::from(r))).collect()
}

/// All employees, in dataset order.
pub fn employees() -> &'static [Employee] {
    EMPLOYEES.as_slice()
}

/// All departments, in dataset order. Department 40 has no employees.
pub fn departments() -> &'static [Department] {
    DEPARTMENTS.as_slice()
}

/// The salary grades, ascending and contiguous.
pub fn salary_grades() -> &'static [SalaryGrade] {
    &SALGRADE_DATA
}

/// Scans `EMP` under its own name.
pub fn emp_table() -> Relation {
    emp_table_as(Employee::TABLE)
}

/// Scans `EMP` under an alias, e.g. `e` and `m` for a self-join.
pub fn emp_table_as(alias: &str) -> Relation {
    EMP_ROWS.with(|rows| {
        TableScanExecutor::new(Employee::TABLE, Employee::COLUMN_COUNT, rows.clone())
            .alias(alias)
            .execute()
    })
}

/// Scans `DEPT` under its own name.
pub fn dept_table() -> Relation {
    dept_table_as(Department::TABLE)
}

/// Scans `DEPT` under an alias.
pub fn dept_table_as(alias: &str) -> Relation {
    DEPT_ROWS.with(|rows| {
        TableScanExecutor::new(Department::TABLE, Department::COLUMN_COUNT, rows.clone())
            .alias(alias)
            .execute()
    })
}

/// Scans `SALGRADE` under its own name.
pub fn salgrade_table() -> Relation {
    salgrade_table_as(SalaryGrade::TABLE)
}

/// Scans `SALGRADE` under an alias.
pub fn salgrade_table_as(alias: &str) -> Relation {
    SALGRADE_ROWS.with(|rows| {
        TableScanExecutor::new(SalaryGrade::TABLE, SalaryGrade::COLUMN_COUNT, rows.clone())
            .alias(alias)
            .execute()
    })
}
