//! Time-clock export extraction.
//!
//! The export is a sequence of employee blocks. A block opens with a header
//! such as `Dolly (21 : All Users )`, carries a `Date,...` column row and then
//! one data row per observed day: `date, name, in, out, total`.

use std::collections::BTreeMap;
use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::error::ExtractError;
use crate::model::day::AttendanceDay;
use crate::time::{parse_observed_date, PLACEHOLDER};

/// Marker that identifies an employee header cell.
pub const ROSTER_MARKER: &str = "All Users";

const DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

static HEADER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\s*\(").expect("valid header pattern"));

/// Raw, unclassified days per employee, in file order.
pub type RawRecords = BTreeMap<String, Vec<AttendanceDay>>;

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Header(String),
    Record(AttendanceDay),
    Skip(&'static str),
}

/// Classifies one row against the employee the previous rows established.
///
/// Returns the cursor for the next row alongside what this row produced.
pub fn step(cursor: Option<String>, row: &StringRecord) -> (Option<String>, RowOutcome) {
    let first = row.get(0).unwrap_or("");

    if first.contains('(') && first.contains(ROSTER_MARKER) {
        return match header_name(first) {
            Some(name) => (Some(name.clone()), RowOutcome::Header(name)),
            None => (cursor, RowOutcome::Skip("header without a name")),
        };
    }

    if first.trim().eq_ignore_ascii_case("date") {
        return (cursor, RowOutcome::Skip("column header"));
    }
    let Some(current) = cursor else {
        return (None, RowOutcome::Skip("no employee header yet"));
    };

    let name = row.get(1).unwrap_or("").trim();
    let employee = if name.to_lowercase() == current.to_lowercase() {
        current
    } else if name.is_empty() {
        return (Some(current), RowOutcome::Skip("missing employee name"));
    } else {
        name.to_string()
    };

    let Some(date) = parse_observed_date(first) else {
        return (Some(employee), RowOutcome::Skip("unparseable date"));
    };

    let day = AttendanceDay::observed(
        employee.clone(),
        date,
        clean_field(row.get(2)),
        clean_field(row.get(3)),
        clean_field(row.get(4)),
    );
    (Some(employee), RowOutcome::Record(day))
}

fn header_name(cell: &str) -> Option<String> {
    HEADER_NAME
        .captures(cell)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty())
}

fn clean_field(field: Option<&str>) -> Option<String> {
    let value = field?.trim();
    if value.is_empty() || value == PLACEHOLDER {
        None
    } else {
        Some(value.to_string())
    }
}

/// Picks the delimiter that occurs most often in the first line.
pub fn detect_delimiter(input: &[u8]) -> u8 {
    let first_line = input
        .split(|b| *b == b'\n')
        .find(|line| !line.iter().all(u8::is_ascii_whitespace))
        .unwrap_or(&[]);
    DELIMITERS
        .iter()
        .copied()
        .max_by_key(|d| first_line.iter().filter(|b| *b == d).count())
        .filter(|d| first_line.contains(d))
        .unwrap_or(b',')
}

/// Reads a whole export. Malformed rows are skipped; only a decoding
/// failure of the delimited text fails the extraction.
pub fn extract_records<R: Read>(mut reader: R) -> Result<RawRecords, ExtractError> {
    let mut input = Vec::new();
    reader
        .read_to_end(&mut input)
        .map_err(|e| ExtractError::Csv(csv::Error::from(e)))?;

    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(detect_delimiter(&input))
        .from_reader(input.as_slice());

    let mut employees = RawRecords::new();
    let mut cursor: Option<String> = None;

    for (index, result) in csv_reader.records().enumerate() {
        let row = result?;
        if row.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let previous = cursor.clone();
        let (next, outcome) = step(cursor, &row);
        if let Some(name) = next.as_ref().filter(|n| previous.as_ref() != Some(*n)) {
            employees.entry(name.clone()).or_default();
        }

        match outcome {
            RowOutcome::Header(name) => debug!(row = index, employee = %name, "employee header"),
            RowOutcome::Record(day) => employees.entry(day.employee.clone()).or_default().push(day),
            RowOutcome::Skip(reason) => debug!(row = index, reason, "row skipped"),
        }
        cursor = next;
    }

    let records: usize = employees.values().map(Vec::len).sum();
    info!(employees = employees.len(), records, "extracted time-clock records");
    Ok(employees)
}
