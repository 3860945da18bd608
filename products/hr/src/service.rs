use platform_store::RecordStore;
use tracing::{debug, error, info, info_span};

use crate::{
    employee::{Employee, EmployeeId, EmployeeUpdate, NewEmployee, SortField, today},
    error::{HrError, HrResult},
};

pub const MIN_NAME_CHARS: usize = 2;

/// Owns the authoritative employee collection. Every successful mutation is
/// followed by a full-collection save; a failed save leaves the in-memory
/// change in place and reports `HrError::Storage`.
#[derive(Debug)]
pub struct EmployeeService<S> {
    store: S,
    employees: Vec<Employee>,
}

impl<S> EmployeeService<S>
where
    S: RecordStore<Employee>,
{
    /// Loads the collection once; it is not re-read for the life of the service.
    pub fn open(store: S) -> HrResult<Self> {
        let employees = store.load()?;
        info!(count = employees.len(), "employee records loaded");
        Ok(Self { store, employees })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Insertion-ordered, read-only view.
    pub fn all(&self) -> &[Employee] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn get_by_id(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Case-insensitive substring match on name. An empty query matches everyone.
    pub fn search_by_name(&self, query: &str) -> Vec<&Employee> {
        let needle = query.to_lowercase();
        self.employees
            .iter()
            .filter(|e| e.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Highest id in the collection plus one. Deleting the highest record
    /// frees its id for the next add.
    pub fn next_id(&self) -> EmployeeId {
        self.employees
            .iter()
            .map(|e| e.id)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    pub fn add(&mut self, input: NewEmployee) -> HrResult<Employee> {
        let span = info_span!("hr.employees.add");
        let _guard = span.enter();

        let name = validate_name(&input.name)?;
        let salary = validate_salary(input.salary)?;
        let id = self.next_id();
        if self.get_by_id(id).is_some() {
            return Err(HrError::IdsExhausted);
        }

        let employee = Employee {
            id,
            name,
            department: normalize_text(input.department.as_deref()),
            designation: normalize_text(input.designation.as_deref()),
            salary,
            date_of_joining: input.date_of_joining.unwrap_or_else(today),
        };
        self.employees.push(employee.clone());
        self.persist()?;
        info!(id, "employee added");
        Ok(employee)
    }

    /// Applies only the supplied fields. Returns `Ok(false)` when `id` is unknown.
    pub fn update(&mut self, id: EmployeeId, patch: EmployeeUpdate) -> HrResult<bool> {
        let span = info_span!("hr.employees.update", id, empty = patch.is_empty());
        let _guard = span.enter();

        let Some(index) = self.employees.iter().position(|e| e.id == id) else {
            debug!("employee not found");
            return Ok(false);
        };
        // Everything is checked before anything is written.
        let name = patch.name.as_deref().map(validate_name).transpose()?;
        let salary = patch.salary.map(validate_salary).transpose()?;

        let employee = &mut self.employees[index];
        if let Some(name) = name {
            employee.name = name;
        }
        if let Some(department) = patch.department.as_deref() {
            employee.department = normalize_text(Some(department));
        }
        if let Some(designation) = patch.designation.as_deref() {
            employee.designation = normalize_text(Some(designation));
        }
        if let Some(salary) = salary {
            employee.salary = salary;
        }
        if let Some(date) = patch.date_of_joining {
            employee.date_of_joining = date;
        }

        self.persist()?;
        info!("employee updated");
        Ok(true)
    }

    /// Removes the record with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: EmployeeId) -> HrResult<bool> {
        let span = info_span!("hr.employees.delete", id);
        let _guard = span.enter();

        let before = self.employees.len();
        self.employees.retain(|e| e.id != id);
        if self.employees.len() == before {
            debug!("employee not found");
            return Ok(false);
        }
        self.persist()?;
        info!("employee deleted");
        Ok(true)
    }

    /// Sorted view over the collection; the stored order is untouched.
    /// Ties keep insertion order.
    pub fn sort_by(&self, field: impl Into<SortField>) -> Vec<&Employee> {
        let field = field.into();
        let mut view: Vec<&Employee> = self.employees.iter().collect();
        view.sort_by(|a, b| field.compare(a, b));
        view
    }

    fn persist(&self) -> HrResult<()> {
        self.store.save(&self.employees).map_err(|err| {
            error!(
                error = %err,
                count = self.employees.len(),
                "persist failed; in-memory collection now ahead of storage"
            );
            HrError::from(err)
        })
    }
}

fn validate_name(value: &str) -> HrResult<String> {
    let trimmed = value.trim();
    if trimmed.chars().count() < MIN_NAME_CHARS {
        return Err(HrError::validation(format!(
            "Name must be at least {} characters",
            MIN_NAME_CHARS
        )));
    }
    Ok(trimmed.to_string())
}

fn validate_salary(value: f64) -> HrResult<f64> {
    if !value.is_finite() {
        return Err(HrError::validation("Salary must be a finite number"));
    }
    if value < 0.0 {
        return Err(HrError::validation("Salary cannot be negative"));
    }
    Ok(value)
}

fn normalize_text(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}
