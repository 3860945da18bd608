mod config;
mod menu;

use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use platform_obs::{ObsConfig, init_tracing};
use platform_store::{DEFAULT_DATA_FILE, JsonFileStore, RecordStore};
use products_hr::{Employee, EmployeeId, EmployeeService, EmployeeUpdate, HrError, NewEmployee};
use tracing::debug;

use crate::{
    config::AppConfig,
    menu::{Menu, parse_date, write_listing},
};

#[derive(Parser, Debug)]
#[command(name = "hr", version, about = "Employee Management System")]
struct Cli {
    /// Data file holding the employee collection.
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "HR_DATA_FILE",
        default_value = DEFAULT_DATA_FILE
    )]
    data_file: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new employee.
    Add(AddCommand),
    /// List every employee in insertion order.
    List,
    /// Show one employee by id.
    Get { id: EmployeeId },
    /// Change selected fields of an employee.
    Update(UpdateCommand),
    /// Remove an employee by id.
    Delete { id: EmployeeId },
    /// Find employees whose name contains QUERY (case-insensitive).
    Search { query: String },
    /// List employees ordered by id, name, department, designation, salary or doj.
    Sort { field: String },
    /// Run the interactive menu (default).
    Menu,
}

#[derive(Args, Debug)]
struct AddCommand {
    #[arg(long)]
    name: String,
    #[arg(long, allow_negative_numbers = true)]
    salary: f64,
    #[arg(long)]
    department: Option<String>,
    #[arg(long)]
    designation: Option<String>,
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    doj: Option<NaiveDate>,
}

impl From<AddCommand> for NewEmployee {
    fn from(value: AddCommand) -> Self {
        NewEmployee {
            name: value.name,
            department: value.department,
            designation: value.designation,
            salary: value.salary,
            date_of_joining: value.doj,
        }
    }
}

#[derive(Args, Debug)]
struct UpdateCommand {
    id: EmployeeId,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    department: Option<String>,
    #[arg(long)]
    designation: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    salary: Option<f64>,
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    doj: Option<NaiveDate>,
}

impl UpdateCommand {
    fn patch(&self) -> EmployeeUpdate {
        EmployeeUpdate {
            name: self.name.clone(),
            department: self.department.clone(),
            designation: self.designation.clone(),
            salary: self.salary,
            date_of_joining: self.doj,
        }
    }
}

fn main() -> Result<ExitCode> {
    dotenv().ok();
    let cli = Cli::parse();
    let config = AppConfig::load(cli.data_file.clone())?;
    init_tracing(ObsConfig::default().with_filter(config.log_filter.clone()))?;
    debug!(data_file = %config.data_file.display(), "configuration loaded");

    let store = JsonFileStore::<Employee>::open(&config.data_file)
        .with_context(|| format!("failed to open {}", config.data_file.display()))?;
    let mut service = EmployeeService::open(store)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            let stdin = io::stdin();
            Menu::new(&mut service, stdin.lock(), &mut out).run()
        }
        command => run_command(&mut service, command, &mut out),
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            if let Some(hr) = err.downcast_ref::<HrError>().filter(|hr| hr.is_validation()) {
                writeln!(out, "Validation Error: {hr}")?;
                return Ok(ExitCode::from(2));
            }
            Err(err)
        }
    }
}

fn run_command<S, W>(service: &mut EmployeeService<S>, command: Command, out: &mut W) -> Result<()>
where
    S: RecordStore<Employee>,
    W: Write,
{
    match command {
        Command::Add(cmd) => {
            let created = service.add(cmd.into())?;
            writeln!(out, "Added successfully:\n{created}")?;
        }
        Command::List => write_listing(out, service.all().iter())?,
        Command::Get { id } => match service.get_by_id(id) {
            Some(employee) => writeln!(out, "{employee}")?,
            None => writeln!(out, "Employee not found.")?,
        },
        Command::Update(cmd) => {
            if service.update(cmd.id, cmd.patch())? {
                writeln!(out, "Updated successfully.")?;
                if let Some(employee) = service.get_by_id(cmd.id) {
                    writeln!(out, "Now: {employee}")?;
                }
            } else {
                writeln!(out, "Employee not found.")?;
            }
        }
        Command::Delete { id } => {
            let msg = if service.delete(id)? {
                "Deleted."
            } else {
                "Employee not found."
            };
            writeln!(out, "{msg}")?;
        }
        Command::Search { query } => {
            let hits = service.search_by_name(&query);
            if hits.is_empty() {
                writeln!(out, "No matches.")?;
            } else {
                for employee in hits {
                    writeln!(out, "{employee}")?;
                }
            }
        }
        Command::Sort { field } => {
            for employee in service.sort_by(field.as_str()) {
                writeln!(out, "{employee}")?;
            }
        }
        Command::Menu => {}
    }
    Ok(())
}
