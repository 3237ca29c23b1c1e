use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
    #[error("No employee data could be parsed from the file. Please check the format.")]
    NoRecords,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EditError {
    #[error("Unknown employee: '{0}'")]
    UnknownEmployee(String),
    #[error("{employee} has no day {date} in the reconciled calendar")]
    DayOutOfRange { employee: String, date: NaiveDate },
    #[error("Credited hours must be a finite, non-negative number (got {0})")]
    InvalidCredit(f64),
}

/// Failures of the optional reason-suggestion collaborator. Never fatal.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SuggestError {
    #[error("Suggestion service is not configured")]
    Unavailable,
    #[error("Suggestion request failed: {0}")]
    Transport(String),
    #[error("Suggestion response could not be read: {0}")]
    Malformed(String),
}
