//! Bulk roster import from CSV files.
//!
//! A roster is a headered CSV with columns `name`, `username`,
//! `password` and optionally `studentNumber`. Column order is free and
//! extra columns are ignored. Rows missing any of the three required
//! fields are dropped before the batch-add runs.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::NewStudent;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("could not read roster: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse roster: {0}")]
    Parse(#[from] csv::Error),
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default, rename = "studentNumber")]
    student_number: Option<String>,
}

fn non_empty(field: Option<String>) -> Option<String> {
    field
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
}

/// Read roster rows, keeping only those with all required fields.
pub fn parse_roster<R: Read>(reader: R) -> Result<Vec<NewStudent>, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let mut students = Vec::new();
    let mut skipped = 0usize;

    for record in csv_reader.deserialize::<RosterRow>() {
        let row = record?;
        match (
            non_empty(row.name),
            non_empty(row.username),
            non_empty(row.password),
        ) {
            (Some(name), Some(username), Some(password)) => students.push(NewStudent {
                name,
                username,
                password,
                student_number: non_empty(row.student_number),
            }),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, "dropped roster rows with missing required fields");
    }
    Ok(students)
}

/// Read a roster file from disk.
pub fn load_roster(path: &Path) -> Result<Vec<NewStudent>, RosterError> {
    let file = std::fs::File::open(path)?;
    parse_roster(file)
}
