//! Named registry of the tutorial queries, for listing and running them by name.

use crate::model::{Department, Employee, SalaryGrade};
use crate::queries;
use scott_core::{Error, Result, Row, Value};
use scott_query::executor::Relation;

/// A tutorial query with its SQL and a runner that yields a printable relation.
pub struct Scenario {
    /// Stable name, used on the command line.
    pub name: &'static str,
    /// The SQL statement the query answers.
    pub sql: &'static str,
    columns: fn() -> Vec<&'static str>,
    runner: fn() -> Result<Relation>,
}

impl Scenario {
    /// Runs the query.
    pub fn run(&self) -> Result<Relation> {
        (self.runner)()
    }

    /// Column headers of the result.
    pub fn columns(&self) -> Vec<&'static str> {
        (self.columns)()
    }
}

/// Wraps a scalar answer in a one-row, one-column relation.
fn single_value(value: Value) -> Relation {
    Relation::from_rows_owned(vec![Row::dummy(vec![value])], "result")
}

fn emp_columns() -> Vec<&'static str> {
    Employee::COLUMNS.to_vec()
}

fn emp_dept_columns() -> Vec<&'static str> {
    [&Employee::COLUMNS[..], &Department::COLUMNS[..]].concat()
}

fn emp_grade_columns() -> Vec<&'static str> {
    [&Employee::COLUMNS[..], &SalaryGrade::COLUMNS[..]].concat()
}

fn emp_dept_grade_columns() -> Vec<&'static str> {
    [&Employee::COLUMNS[..], &Department::COLUMNS[..], &SalaryGrade::COLUMNS[..]].concat()
}

fn emp_mgr_columns() -> Vec<&'static str> {
    [&Employee::COLUMNS[..], &Employee::COLUMNS[..]].concat()
}

static SCENARIOS: [Scenario; 20] = [
    Scenario {
        name: "salesmen",
        sql: "SELECT * FROM emp WHERE job = 'SALESMAN'",
        columns: emp_columns,
        runner: || Ok(queries::salesmen()),
    },
    Scenario {
        name: "dept-30-by-salary",
        sql: "SELECT * FROM emp WHERE deptno = 30 ORDER BY sal DESC",
        columns: emp_columns,
        runner: || Ok(queries::dept_30_by_salary_desc()),
    },
    Scenario {
        name: "chicago",
        sql: "SELECT * FROM emp WHERE deptno IN (SELECT deptno FROM dept WHERE loc = 'CHICAGO')",
        columns: emp_columns,
        runner: || Ok(queries::employees_in_chicago()),
    },
    Scenario {
        name: "names-and-salaries",
        sql: "SELECT ename, sal FROM emp",
        columns: || vec!["ename", "sal"],
        runner: || Ok(queries::names_and_salaries()),
    },
    Scenario {
        name: "with-departments",
        sql: "SELECT * FROM emp JOIN dept ON emp.deptno = dept.deptno",
        columns: emp_dept_columns,
        runner: || Ok(queries::employees_with_departments()),
    },
    Scenario {
        name: "headcount",
        sql: "SELECT deptno, COUNT(*) FROM emp GROUP BY deptno",
        columns: || vec!["deptno", "count"],
        runner: || Ok(queries::headcount_by_department()),
    },
    Scenario {
        name: "commissioned",
        sql: "SELECT * FROM emp WHERE comm IS NOT NULL",
        columns: emp_columns,
        runner: || Ok(queries::commissioned_employees()),
    },
    Scenario {
        name: "with-grades",
        sql: "SELECT * FROM emp JOIN salgrade ON emp.sal BETWEEN salgrade.losal AND salgrade.hisal",
        columns: emp_grade_columns,
        runner: || Ok(queries::employees_with_grades()),
    },
    Scenario {
        name: "average-salary",
        sql: "SELECT deptno, AVG(sal) FROM emp GROUP BY deptno",
        columns: || vec!["deptno", "avg"],
        runner: || Ok(queries::average_salary_by_department()),
    },
    Scenario {
        name: "above-average",
        sql: "SELECT * FROM emp e WHERE sal > (SELECT AVG(sal) FROM emp WHERE deptno = e.deptno)",
        columns: emp_columns,
        runner: queries::above_department_average,
    },
    Scenario {
        name: "max-salary",
        sql: "SELECT MAX(sal) FROM emp",
        columns: || vec!["max"],
        runner: || Ok(single_value(queries::max_salary())),
    },
    Scenario {
        name: "min-salary-30",
        sql: "SELECT MIN(sal) FROM emp WHERE deptno = 30",
        columns: || vec!["min"],
        runner: || Ok(single_value(queries::min_salary_in_department(30))),
    },
    Scenario {
        name: "earliest-hires",
        sql: "SELECT * FROM emp ORDER BY hiredate ASC LIMIT 2",
        columns: emp_columns,
        runner: || Ok(queries::earliest_hires(2)),
    },
    Scenario {
        name: "distinct-jobs",
        sql: "SELECT DISTINCT job FROM emp",
        columns: || vec!["job"],
        runner: || Ok(queries::distinct_jobs()),
    },
    Scenario {
        name: "managed",
        sql: "SELECT * FROM emp WHERE mgr IS NOT NULL",
        columns: emp_columns,
        runner: || Ok(queries::managed_employees()),
    },
    Scenario {
        name: "all-above-500",
        sql: "SELECT 500 < ALL (SELECT sal FROM emp)",
        columns: || vec!["all"],
        runner: || Ok(single_value(Value::Boolean(queries::all_earn_more_than(500)))),
    },
    Scenario {
        name: "any-commission-above-400",
        sql: "SELECT 400 < ANY (SELECT comm FROM emp)",
        columns: || vec!["any"],
        runner: || Ok(single_value(Value::Boolean(queries::any_commission_above(400)))),
    },
    Scenario {
        name: "with-managers",
        sql: "SELECT * FROM emp e JOIN emp m ON e.mgr = m.empno",
        columns: emp_mgr_columns,
        runner: || Ok(queries::employees_with_managers()),
    },
    Scenario {
        name: "income",
        sql: "SELECT ename, sal + COALESCE(comm, 0) FROM emp",
        columns: || vec!["ename", "income"],
        runner: || Ok(queries::total_income()),
    },
    Scenario {
        name: "with-departments-and-grades",
        sql: "SELECT * FROM emp JOIN dept ON emp.deptno = dept.deptno \
              JOIN salgrade ON emp.sal BETWEEN salgrade.losal AND salgrade.hisal",
        columns: emp_dept_grade_columns,
        runner: || Ok(queries::employees_with_departments_and_grades()),
    },
];

/// All registered scenarios, in tutorial order.
pub fn scenarios() -> &'static [Scenario] {
    &SCENARIOS
}

/// Looks up a scenario by name.
pub fn find(name: &str) -> Result<&'static Scenario> {
    SCENARIOS
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| Error::not_found("scenario", Value::from(name)))
}
