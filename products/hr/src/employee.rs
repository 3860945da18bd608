use std::{cmp::Ordering, fmt};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

pub type EmployeeId = u32;

/// Local calendar date used when no joining date is supplied.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub department: String,
    pub designation: String,
    pub salary: f64,
    pub date_of_joining: NaiveDate,
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {:<4} | Name: {:<20} | Dept: {:<12} | Role: {:<15} | Salary: {:<10.2} | DOJ: {}",
            self.id,
            self.name,
            self.department,
            self.designation,
            self.salary,
            self.date_of_joining.format("%Y-%m-%d"),
        )
    }
}

/// Input for creating a record. Optional fields left as `None` take their
/// defaults: empty department/designation, today's joining date.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewEmployee {
    pub name: String,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub salary: f64,
    pub date_of_joining: Option<NaiveDate>,
}

impl NewEmployee {
    pub fn new(name: impl Into<String>, salary: f64) -> Self {
        Self {
            name: name.into(),
            salary,
            ..Self::default()
        }
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn designation(mut self, designation: impl Into<String>) -> Self {
        self.designation = Some(designation.into());
        self
    }

    pub fn date_of_joining(mut self, date: NaiveDate) -> Self {
        self.date_of_joining = Some(date);
        self
    }
}

/// Partial replacement for an existing record. `None` leaves the field as it
/// is; `Some(String::new())` clears department or designation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub salary: Option<f64>,
    pub date_of_joining: Option<NaiveDate>,
}

impl EmployeeUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn designation(mut self, designation: impl Into<String>) -> Self {
        self.designation = Some(designation.into());
        self
    }

    pub fn salary(mut self, salary: f64) -> Self {
        self.salary = Some(salary);
        self
    }

    pub fn date_of_joining(mut self, date: NaiveDate) -> Self {
        self.date_of_joining = Some(date);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.department.is_none()
            && self.designation.is_none()
            && self.salary.is_none()
            && self.date_of_joining.is_none()
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum SortField {
    #[default]
    Id,
    Name,
    Department,
    Designation,
    Salary,
    DateOfJoining,
}

impl SortField {
    /// Case-insensitive lookup by field name. Anything unrecognized sorts by id.
    pub fn from_name(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "name" => SortField::Name,
            "department" => SortField::Department,
            "designation" => SortField::Designation,
            "salary" => SortField::Salary,
            "doj" | "dateofjoining" | "date_of_joining" => SortField::DateOfJoining,
            _ => SortField::Id,
        }
    }

    pub(crate) fn compare(self, a: &Employee, b: &Employee) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Name => cmp_ignore_case(&a.name, &b.name),
            SortField::Department => cmp_ignore_case(&a.department, &b.department),
            SortField::Designation => cmp_ignore_case(&a.designation, &b.designation),
            SortField::Salary => a.salary.total_cmp(&b.salary),
            SortField::DateOfJoining => a.date_of_joining.cmp(&b.date_of_joining),
        }
    }
}

impl From<&str> for SortField {
    fn from(value: &str) -> Self {
        SortField::from_name(value)
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Employee {
        Employee {
            id: 7,
            name: "Anna".into(),
            department: "Ops".into(),
            designation: "Lead".into(),
            salary: 1234.5,
            date_of_joining: NaiveDate::from_ymd_opt(2021, 3, 4).unwrap(),
        }
    }

    #[test]
    fn sort_field_names_are_case_insensitive() {
        assert_eq!(SortField::from_name("SALARY"), SortField::Salary);
        assert_eq!(SortField::from_name("Name"), SortField::Name);
        assert_eq!(SortField::from_name("doj"), SortField::DateOfJoining);
        assert_eq!(SortField::from_name("DateOfJoining"), SortField::DateOfJoining);
        assert_eq!(SortField::from("designation"), SortField::Designation);
    }

    #[test]
    fn unknown_sort_field_falls_back_to_id() {
        assert_eq!(SortField::from_name("shoe size"), SortField::Id);
        assert_eq!(SortField::from_name(""), SortField::Id);
        assert_eq!(SortField::from_name("dept"), SortField::Id);
        assert_eq!(SortField::from_name("role"), SortField::Id);
        assert_eq!(SortField::from_name("date-of-joining"), SortField::Id);
        assert_eq!(SortField::from_name(" name "), SortField::Id);
    }

    #[test]
    fn case_insensitive_compare_ignores_case_only() {
        assert_eq!(cmp_ignore_case("alpha", "ALPHA"), Ordering::Equal);
        assert_eq!(cmp_ignore_case("alpha", "Beta"), Ordering::Less);
        assert_eq!(cmp_ignore_case("Zed", "adam"), Ordering::Greater);
    }

    #[test]
    fn display_renders_listing_line() {
        let line = sample().to_string();
        assert!(line.starts_with("ID: 7    | Name: Anna"));
        assert!(line.contains("Salary: 1234.50"));
        assert!(line.ends_with("DOJ: 2021-03-04"));
    }

    #[test]
    fn serialized_date_is_iso() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["date_of_joining"], "2021-03-04");
        let back: Employee = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn empty_update_reports_empty() {
        assert!(EmployeeUpdate::new().is_empty());
        assert!(!EmployeeUpdate::new().department("").is_empty());
    }
}
