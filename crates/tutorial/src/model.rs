//! Typed records for the three tutorial tables and their row encoding.
//!
//! Each record converts to a [`Row`] whose column order is given by the associated
//! index constants (`Employee::SAL`, `Department::LOC`, ...). Absent optional fields
//! become [`Value::Null`]; dates become [`Value::DateTime`] holding milliseconds since
//! the Unix epoch at UTC midnight.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use scott_core::{DataType, Error, Result, Row, RowId, Value};

/// A row of `EMP`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Employee {
    pub empno: i64,
    pub ename: String,
    pub job: String,
    /// Manager's `empno`; `None` for the company head.
    pub mgr: Option<i64>,
    pub hiredate: NaiveDate,
    pub sal: i64,
    /// Sales commission; `None` is "no commission", distinct from `Some(0)`.
    pub comm: Option<i64>,
    pub deptno: i64,
}

impl Employee {
    pub const TABLE: &'static str = "emp";

    pub const EMPNO: usize = 0;
    pub const ENAME: usize = 1;
    pub const JOB: usize = 2;
    pub const MGR: usize = 3;
    pub const HIREDATE: usize = 4;
    pub const SAL: usize = 5;
    pub const COMM: usize = 6;
    pub const DEPTNO: usize = 7;
    pub const COLUMN_COUNT: usize = 8;

    pub const COLUMNS: [&'static str; Self::COLUMN_COUNT] = [
        "empno", "ename", "job", "mgr", "hiredate", "sal", "comm", "deptno",
    ];

    /// Salary plus commission, with no commission counting as zero.
    pub fn income(&self) -> i64 {
        self.sal + self.comm.unwrap_or(0)
    }
}

/// A row of `DEPT`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Department {
    pub deptno: i64,
    pub dname: String,
    pub loc: String,
}

impl Department {
    pub const TABLE: &'static str = "dept";

    pub const DEPTNO: usize = 0;
    pub const DNAME: usize = 1;
    pub const LOC: usize = 2;
    pub const COLUMN_COUNT: usize = 3;

    pub const COLUMNS: [&'static str; Self::COLUMN_COUNT] = ["deptno", "dname", "loc"];
}

/// A row of `SALGRADE`: salaries in `losal..=hisal` belong to `grade`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SalaryGrade {
    pub grade: i64,
    pub losal: i64,
    pub hisal: i64,
}

impl SalaryGrade {
    pub const TABLE: &'static str = "salgrade";

    pub const GRADE: usize = 0;
    pub const LOSAL: usize = 1;
    pub const HISAL: usize = 2;
    pub const COLUMN_COUNT: usize = 3;

    pub const COLUMNS: [&'static str; Self::COLUMN_COUNT] = ["grade", "losal", "hisal"];

    /// Returns true if `sal` falls inside this grade, bounds inclusive.
    pub fn contains(&self, sal: i64) -> bool {
        (self.losal..=self.hisal).contains(&sal)
    }
}

/// Encodes a calendar date as milliseconds since the Unix epoch (UTC midnight).
pub fn date_to_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// Decodes milliseconds since the Unix epoch back into a UTC calendar date.
pub fn millis_to_date(millis: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.date_naive())
}

fn row_id(key: i64) -> RowId {
    key as RowId
}

impl From<&Employee> for Row {
    fn from(emp: &Employee) -> Self {
        Row::new(
            row_id(emp.empno),
            vec![
                Value::Int64(emp.empno),
                Value::String(emp.ename.clone()),
                Value::String(emp.job.clone()),
                Value::from(emp.mgr),
                Value::DateTime(date_to_millis(emp.hiredate)),
                Value::Int64(emp.sal),
                Value::from(emp.comm),
                Value::Int64(emp.deptno),
            ],
        )
    }
}

impl From<&Department> for Row {
    fn from(dept: &Department) -> Self {
        Row::new(
            row_id(dept.deptno),
            vec![
                Value::Int64(dept.deptno),
                Value::String(dept.dname.clone()),
                Value::String(dept.loc.clone()),
            ],
        )
    }
}

impl From<&SalaryGrade> for Row {
    fn from(grade: &SalaryGrade) -> Self {
        Row::new(
            row_id(grade.grade),
            vec![
                Value::Int64(grade.grade),
                Value::Int64(grade.losal),
                Value::Int64(grade.hisal),
            ],
        )
    }
}

/// Reads typed cells out of a row, naming the table and column on failure.
struct RowReader<'a> {
    table: &'static str,
    columns: &'static [&'static str],
    row: &'a [Value],
}

impl<'a> RowReader<'a> {
    fn new(table: &'static str, columns: &'static [&'static str], row: &'a [Value]) -> Self {
        Self { table, columns, row }
    }

    fn column_name(&self, index: usize) -> &'static str {
        self.columns.get(index).copied().unwrap_or("?")
    }

    fn cell(&self, index: usize) -> Result<&'a Value> {
        self.row
            .get(index)
            .ok_or_else(|| Error::column_not_found(self.table, self.column_name(index)))
    }

    fn int(&self, index: usize) -> Result<i64> {
        let value = self.cell(index)?;
        value
            .as_i64()
            .ok_or_else(|| Error::type_mismatch(self.column_name(index), DataType::Int64, value))
    }

    fn opt_int(&self, index: usize) -> Result<Option<i64>> {
        match self.cell(index)? {
            Value::Null => Ok(None),
            _ => self.int(index).map(Some),
        }
    }

    fn string(&self, index: usize) -> Result<String> {
        let value = self.cell(index)?;
        value
            .as_str()
            .map(String::from)
            .ok_or_else(|| Error::type_mismatch(self.column_name(index), DataType::String, value))
    }

    fn date(&self, index: usize) -> Result<NaiveDate> {
        let value = self.cell(index)?;
        value
            .as_datetime()
            .and_then(millis_to_date)
            .ok_or_else(|| Error::type_mismatch(self.column_name(index), DataType::DateTime, value))
    }
}

impl Employee {
    /// Decodes an employee from the first eight values of a slice.
    pub fn from_values(values: &[Value]) -> Result<Self> {
        let r = RowReader::new(Self::TABLE, &Self::COLUMNS, values);
        Ok(Self {
            empno: r.int(Self::EMPNO)?,
            ename: r.string(Self::ENAME)?,
            job: r.string(Self::JOB)?,
            mgr: r.opt_int(Self::MGR)?,
            hiredate: r.date(Self::HIREDATE)?,
            sal: r.int(Self::SAL)?,
            comm: r.opt_int(Self::COMM)?,
            deptno: r.int(Self::DEPTNO)?,
        })
    }
}

impl Department {
    /// Decodes a department from the first three values of a slice.
    pub fn from_values(values: &[Value]) -> Result<Self> {
        let r = RowReader::new(Self::TABLE, &Self::COLUMNS, values);
        Ok(Self {
            deptno: r.int(Self::DEPTNO)?,
            dname: r.string(Self::DNAME)?,
            loc: r.string(Self::LOC)?,
        })
    }
}

impl SalaryGrade {
    /// Decodes a salary grade from the first three values of a slice.
    pub fn from_values(values: &[Value]) -> Result<Self> {
        let r = RowReader::new(Self::TABLE, &Self::COLUMNS, values);
        Ok(Self {
            grade: r.int(Self::GRADE)?,
            losal: r.int(Self::LOSAL)?,
            hisal: r.int(Self::HISAL)?,
        })
    }
}

impl TryFrom<&Row> for Employee {
    type Error = Error;

    fn try_from(row: &Row) -> Result<Self> {
        Self::from_values(row.values())
    }
}

impl TryFrom<&Row> for Department {
    type Error = Error;

    fn try_from(row: &Row) -> Result<Self> {
        Self::from_values(row.values())
    }
}

impl TryFrom<&Row> for SalaryGrade {
    type Error = Error;

    fn try_from(row: &Row) -> Result<Self> {
        Self::from_values(row.values())
    }
}
