//! Numbered console menu over an [`EmployeeService`]. Reads from any
//! `BufRead` and writes to any `Write`, so whole sessions can be scripted.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::NaiveDate;
use platform_store::RecordStore;
use products_hr::{Employee, EmployeeId, EmployeeService, EmployeeUpdate, HrError, NewEmployee};
use thiserror::Error;
use tracing::warn;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
enum MenuError {
    #[error("input closed")]
    Closed,
    #[error("{0}")]
    BadInput(String),
    #[error(transparent)]
    Hr(#[from] HrError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

type MenuResult<T> = Result<T, MenuError>;

pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| format!("date must be in yyyy-MM-dd format: {}", value.trim()))
}

/// Prints one line per record followed by the total, or a placeholder.
pub fn write_listing<'a, W, I>(out: &mut W, employees: I) -> io::Result<()>
where
    W: Write,
    I: ExactSizeIterator<Item = &'a Employee>,
{
    if employees.len() == 0 {
        return writeln!(out, "(no records)");
    }
    let total = employees.len();
    for employee in employees {
        writeln!(out, "{employee}")?;
    }
    writeln!(out, "Total: {total}")
}

pub struct Menu<'a, S, R, W> {
    service: &'a mut EmployeeService<S>,
    input: R,
    out: W,
}

impl<'a, S, R, W> Menu<'a, S, R, W>
where
    S: RecordStore<Employee>,
    R: BufRead,
    W: Write,
{
    pub fn new(service: &'a mut EmployeeService<S>, input: R, out: W) -> Self {
        Self {
            service,
            input,
            out,
        }
    }

    /// Loops until the user picks 0 or input runs out. Only output failures end
    /// the session with an error.
    pub fn run(mut self) -> Result<()> {
        writeln!(self.out, "==============================================")?;
        writeln!(self.out, "         Employee Management System")?;
        writeln!(self.out, "==============================================")?;

        loop {
            self.print_menu()?;
            let outcome = match self.read_int("Enter choice: ") {
                Ok(0) => {
                    writeln!(self.out, "Exiting... Bye!")?;
                    return Ok(());
                }
                Ok(1) => self.add_flow(),
                Ok(2) => self.view_all_flow(),
                Ok(3) => self.update_flow(),
                Ok(4) => self.delete_flow(),
                Ok(5) => self.search_flow(),
                Ok(6) => self.sort_flow(),
                Ok(_) => writeln!(self.out, "Invalid choice. Try again.").map_err(MenuError::from),
                Err(err) => Err(err),
            };
            match outcome {
                Ok(()) => {}
                Err(MenuError::Closed) => return Ok(()),
                Err(MenuError::Io(err)) => return Err(err.into()),
                Err(MenuError::BadInput(msg)) => writeln!(self.out, "Validation Error: {msg}")?,
                Err(MenuError::Hr(err)) if err.is_validation() => {
                    writeln!(self.out, "Validation Error: {err}")?
                }
                Err(MenuError::Hr(err)) => {
                    warn!(error = %err, "menu operation failed");
                    writeln!(self.out, "Error: {err}")?
                }
            }
            writeln!(self.out)?;
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.out, "\nMenu:")?;
        writeln!(self.out, "1. Add New Employee")?;
        writeln!(self.out, "2. View All Employees")?;
        writeln!(self.out, "3. Update Employee")?;
        writeln!(self.out, "4. Delete Employee")?;
        writeln!(self.out, "5. Search Employee (by ID or Name)")?;
        writeln!(self.out, "6. Sort Employees")?;
        writeln!(self.out, "0. Exit")
    }

    fn add_flow(&mut self) -> MenuResult<()> {
        writeln!(self.out, "\n-- Add New Employee --")?;
        let name = self.read_non_empty("Name: ")?;
        let department = self.read_line("Department (optional): ")?;
        let designation = self.read_line("Designation (optional): ")?;
        let salary = self.read_f64("Salary: ")?;
        let doj = self.read_line("Date of Joining (yyyy-MM-dd, Enter to use today): ")?;
        let date_of_joining = optional(&doj)
            .map(|s| parse_date(s).map_err(|_| bad_input("Date must be in yyyy-MM-dd format.")))
            .transpose()?;

        let created = self.service.add(NewEmployee {
            name,
            department: Some(department),
            designation: Some(designation),
            salary,
            date_of_joining,
        })?;
        writeln!(self.out, "Added successfully:\n{created}")?;
        Ok(())
    }

    fn view_all_flow(&mut self) -> MenuResult<()> {
        writeln!(self.out, "\n-- All Employees --")?;
        write_listing(&mut self.out, self.service.all().iter())?;
        Ok(())
    }

    fn update_flow(&mut self) -> MenuResult<()> {
        writeln!(self.out, "\n-- Update Employee --")?;
        let id = self.read_id("Enter Employee ID: ")?;
        let Some(current) = self.service.get_by_id(id) else {
            writeln!(self.out, "Employee not found.")?;
            return Ok(());
        };
        writeln!(self.out, "Current: {current}")?;

        let name = self.read_line("New Name (leave blank to keep): ")?;
        let department = self.read_line("New Department (blank to keep): ")?;
        let designation = self.read_line("New Designation (blank to keep): ")?;
        let salary = self.read_line("New Salary (blank to keep): ")?;
        let doj = self.read_line("New DOJ yyyy-MM-dd (blank to keep): ")?;

        let patch = EmployeeUpdate {
            name: optional(&name).map(str::to_string),
            department: optional(&department).map(str::to_string),
            designation: optional(&designation).map(str::to_string),
            salary: optional(&salary)
                .map(|s| s.parse::<f64>().map_err(|_| bad_input("Salary must be a number.")))
                .transpose()?,
            date_of_joining: optional(&doj)
                .map(|s| parse_date(s).map_err(|_| bad_input("DOJ must be yyyy-MM-dd.")))
                .transpose()?,
        };

        let updated = self.service.update(id, patch)?;
        writeln!(
            self.out,
            "{}",
            if updated { "Updated successfully." } else { "Update failed." }
        )?;
        if let Some(employee) = self.service.get_by_id(id) {
            writeln!(self.out, "Now: {employee}")?;
        }
        Ok(())
    }

    fn delete_flow(&mut self) -> MenuResult<()> {
        writeln!(self.out, "\n-- Delete Employee --")?;
        let id = self.read_id("Enter Employee ID: ")?;
        let msg = if self.service.delete(id)? {
            "Deleted."
        } else {
            "Employee not found."
        };
        writeln!(self.out, "{msg}")?;
        Ok(())
    }

    fn search_flow(&mut self) -> MenuResult<()> {
        writeln!(self.out, "\n-- Search Employee --")?;
        writeln!(self.out, "1) By ID  2) By Name")?;
        match self.read_int("Choose: ")? {
            1 => {
                let id = self.read_id("Enter ID: ")?;
                match self.service.get_by_id(id) {
                    Some(employee) => writeln!(self.out, "{employee}")?,
                    None => writeln!(self.out, "Employee not found.")?,
                }
            }
            2 => {
                let query = self.read_non_empty("Enter name (partial allowed): ")?;
                let hits = self.service.search_by_name(&query);
                if hits.is_empty() {
                    writeln!(self.out, "No matches.")?;
                }
                for employee in hits {
                    writeln!(self.out, "{employee}")?;
                }
            }
            _ => writeln!(self.out, "Invalid option.")?,
        }
        Ok(())
    }

    fn sort_flow(&mut self) -> MenuResult<()> {
        writeln!(self.out, "\n-- Sort Employees --")?;
        writeln!(self.out, "Fields: id, name, department, designation, salary, doj")?;
        let field = self.read_non_empty("Sort by: ")?;
        for employee in self.service.sort_by(field.as_str()) {
            writeln!(self.out, "{employee}")?;
        }
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> MenuResult<String> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(MenuError::Closed);
        }
        Ok(line.trim().to_string())
    }

    fn read_non_empty(&mut self, prompt: &str) -> MenuResult<String> {
        loop {
            let line = self.read_line(prompt)?;
            if !line.is_empty() {
                return Ok(line);
            }
            writeln!(self.out, "This field cannot be empty.")?;
        }
    }

    fn read_int(&mut self, prompt: &str) -> MenuResult<i64> {
        loop {
            match self.read_line(prompt)?.parse::<i64>() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.out, "Please enter a valid integer.")?,
            }
        }
    }

    fn read_id(&mut self, prompt: &str) -> MenuResult<EmployeeId> {
        loop {
            match self.read_line(prompt)?.parse::<EmployeeId>() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.out, "Please enter a valid employee id.")?,
            }
        }
    }

    fn read_f64(&mut self, prompt: &str) -> MenuResult<f64> {
        loop {
            match self.read_line(prompt)?.parse::<f64>() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.out, "Please enter a valid number.")?,
            }
        }
    }
}

fn optional(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn bad_input(message: &str) -> MenuError {
    MenuError::BadInput(message.to_string())
}
