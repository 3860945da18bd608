//! Shared fixtures for the cross-crate integration tests.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use platform_store::{JsonFileStore, StoreResult};
use products_hr::{Employee, EmployeeService, HrResult, NewEmployee};
use tempfile::TempDir;

/// A private data directory that disappears with the fixture.
pub struct DataDir {
    dir: TempDir,
}

impl DataDir {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_file(&self) -> PathBuf {
        self.dir.path().join("data").join("employees.json")
    }

    pub fn store(&self) -> StoreResult<JsonFileStore<Employee>> {
        JsonFileStore::open(self.data_file())
    }

    /// Fresh service over the data file, as a new process would see it.
    pub fn service(&self) -> HrResult<EmployeeService<JsonFileStore<Employee>>> {
        EmployeeService::open(self.store()?)
    }
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

pub fn staff() -> Vec<NewEmployee> {
    vec![
        NewEmployee::new("Anna", 50_000.0)
            .department("Finance")
            .designation("Analyst")
            .date_of_joining(ymd(2019, 6, 1)),
        NewEmployee::new("Banana", 20_000.0)
            .department("Kitchen")
            .date_of_joining(ymd(2021, 1, 15)),
        NewEmployee::new("Bob", 80_000.0)
            .designation("Director")
            .date_of_joining(ymd(2015, 9, 30)),
    ]
}
