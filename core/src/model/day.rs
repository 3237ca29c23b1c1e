use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::reason::ReasonCode;
use crate::model::window::DateWindow;
use crate::time::parse_clock_duration;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Present,
    Absent,
    #[serde(rename = "Half-day")]
    HalfDay,
    #[serde(rename = "Short Hours")]
    ShortHours,
    Weekend,
    #[serde(rename = "Public Holiday")]
    PublicHoliday,
    #[serde(rename = "Work on Holiday")]
    WorkOnHoliday,
    #[serde(rename = "Work on Weekend")]
    WorkOnWeekend,
    Unknown,
}

impl Default for Status {
    fn default() -> Self {
        Status::Unknown
    }
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Present => "Present",
            Status::Absent => "Absent",
            Status::HalfDay => "Half-day",
            Status::ShortHours => "Short Hours",
            Status::Weekend => "Weekend",
            Status::PublicHoliday => "Public Holiday",
            Status::WorkOnHoliday => "Work on Holiday",
            Status::WorkOnWeekend => "Work on Weekend",
            Status::Unknown => "Unknown",
        }
    }

    /// Days worth a closer look: nothing or too little was clocked on a workday.
    pub fn needs_review(&self) -> bool {
        matches!(self, Status::Absent | Status::HalfDay | Status::ShortHours)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One employee's attendance on one calendar date, observed or synthesized.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AttendanceDay {
    pub date: NaiveDate,
    pub employee: String,
    pub in_time: Option<String>,
    pub out_time: Option<String>,
    // Display text as found in the export, or regenerated after a credit.
    pub total_hours: Option<String>,
    pub work_hours: f64,
    pub status: Status,
    pub reason: Option<ReasonCode>,
    pub note: String,
    pub ai_enhanced: bool,
}

impl AttendanceDay {
    pub fn observed(
        employee: String,
        date: NaiveDate,
        in_time: Option<String>,
        out_time: Option<String>,
        total_hours: Option<String>,
    ) -> Self {
        let work_hours = total_hours
            .as_deref()
            .map(parse_clock_duration)
            .unwrap_or(0.0);
        Self {
            date,
            employee,
            in_time,
            out_time,
            total_hours,
            work_hours,
            status: Status::default(),
            reason: None,
            note: String::new(),
            ai_enhanced: false,
        }
    }

    /// A gap-filling day with no clock activity.
    pub fn empty(employee: String, date: NaiveDate) -> Self {
        Self::observed(employee, date, None, None, None)
    }

    pub fn id(&self) -> String {
        format!("{}-{}", self.employee, self.date.format("%Y-%m-%d"))
    }

    pub fn reason_text(&self) -> String {
        match (&self.reason, self.note.is_empty()) {
            (Some(code), true) => code.label().to_string(),
            (Some(code), false) => format!("{}: {}", code.label(), self.note),
            (None, _) => self.note.clone(),
        }
    }
}

/// An employee's reconciled calendar: one day per date, ascending, no gaps.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EmployeeAttendance {
    pub employee: String,
    pub days: Vec<AttendanceDay>,
}

impl EmployeeAttendance {
    pub fn new(employee: String, days: Vec<AttendanceDay>) -> Self {
        Self { employee, days }
    }

    fn position(&self, date: NaiveDate) -> Option<usize> {
        self.days.binary_search_by_key(&date, |d| d.date).ok()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&AttendanceDay> {
        self.position(date).map(|i| &self.days[i])
    }

    pub fn day_mut(&mut self, date: NaiveDate) -> Option<&mut AttendanceDay> {
        self.position(date).map(move |i| &mut self.days[i])
    }

    pub fn range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.days.first()?.date, self.days.last()?.date))
    }

    /// The contiguous run of days inside `window`.
    pub fn within(&self, window: &DateWindow) -> &[AttendanceDay] {
        let start = window
            .from
            .map_or(0, |from| self.days.partition_point(|d| d.date < from));
        let end = window
            .to
            .map_or(self.days.len(), |to| self.days.partition_point(|d| d.date <= to));
        &self.days[start..end.max(start)]
    }
}
