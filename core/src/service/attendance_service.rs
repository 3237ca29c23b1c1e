use std::io::Read;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{EditError, ExtractError, SuggestError};
use crate::export::Report;
use crate::extract::extract_records;
use crate::model::day::{AttendanceDay, EmployeeAttendance};
use crate::model::holiday::HolidayCalendar;
use crate::model::policy::AttendancePolicy;
use crate::model::summary::Summary;
use crate::model::window::DateWindow;
use crate::service::edit::{apply_edit, apply_holiday_change, DayEdit};
use crate::service::reconcile::{reconcile, Attendance};
use crate::service::suggest::{merge_suggestions, suggestion_requests, ReasonSuggester};
use crate::service::summary::summarize;

/// Owns the live attendance dataset for one analysis session.
///
/// Every mutation builds its result on the side and replaces the dataset
/// only once it has fully succeeded.
pub struct AttendanceService {
    attendance: Attendance,
    calendar: HolidayCalendar,
    policy: AttendancePolicy,
}

impl AttendanceService {
    pub fn new(calendar: HolidayCalendar, policy: AttendancePolicy) -> Self {
        Self {
            attendance: Attendance::new(),
            calendar,
            policy,
        }
    }

    /// Extracts and reconciles an export, returning the employee count.
    pub fn load_csv<R: Read>(&mut self, input: R) -> Result<usize, ExtractError> {
        let raw = extract_records(input)?;
        if raw.values().all(Vec::is_empty) {
            return Err(ExtractError::NoRecords);
        }
        self.attendance = reconcile(raw, &self.calendar, &self.policy);
        Ok(self.attendance.len())
    }

    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    pub fn policy(&self) -> &AttendancePolicy {
        &self.policy
    }

    pub fn employees(&self) -> impl Iterator<Item = &EmployeeAttendance> {
        self.attendance.values()
    }

    pub fn employee_names(&self) -> Vec<&str> {
        self.attendance.keys().map(String::as_str).collect()
    }

    /// Case-insensitive lookup by full name.
    pub fn employee(&self, name: &str) -> Option<&EmployeeAttendance> {
        self.attendance.get(name).or_else(|| {
            self.attendance
                .values()
                .find(|e| e.employee.eq_ignore_ascii_case(name))
        })
    }

    fn key_for(&self, name: &str) -> Result<String, EditError> {
        self.employee(name)
            .map(|e| e.employee.clone())
            .ok_or_else(|| EditError::UnknownEmployee(name.to_string()))
    }

    pub fn edit_day(&mut self, employee: &str, date: NaiveDate, edit: &DayEdit) -> Result<&AttendanceDay, EditError> {
        let key = self.key_for(employee)?;
        let day = self
            .attendance
            .get(&key)
            .and_then(|e| e.day(date))
            .ok_or_else(|| EditError::DayOutOfRange {
                employee: key.clone(),
                date,
            })?;
        let updated = apply_edit(day, edit, &self.calendar, &self.policy)?;
        info!(employee = %key, date = %date, status = %updated.status, "day edited");

        let slot = self
            .attendance
            .get_mut(&key)
            .and_then(|e| e.day_mut(date))
            .ok_or(EditError::DayOutOfRange {
                employee: key.clone(),
                date,
            })?;
        *slot = updated;
        Ok(slot)
    }

    /// Swaps in a new holiday set and re-derives every status.
    pub fn set_holidays(&mut self, calendar: HolidayCalendar) {
        self.attendance = apply_holiday_change(&self.attendance, &calendar, &self.policy);
        self.calendar = calendar;
        info!(holidays = self.calendar.len(), "holidays updated and attendance re-analyzed");
    }

    /// Asks the suggester for reasons on every flagged day.
    ///
    /// Any failure leaves the dataset exactly as it was.
    pub fn enhance(&mut self, suggester: &dyn ReasonSuggester) -> Result<usize, SuggestError> {
        let mut enhanced_total = 0;
        let mut next = Attendance::new();
        for (name, employee) in &self.attendance {
            let requests = suggestion_requests(&employee.days);
            let days = if requests.is_empty() {
                employee.days.clone()
            } else {
                let suggestions = suggester.suggest(name, &requests).map_err(|e| {
                    warn!(employee = %name, error = %e, "reason suggestions unavailable");
                    e
                })?;
                let (days, enhanced) = merge_suggestions(&employee.days, &suggestions);
                enhanced_total += enhanced;
                days
            };
            next.insert(name.clone(), EmployeeAttendance::new(name.clone(), days));
        }
        self.attendance = next;
        info!(enhanced = enhanced_total, "reason suggestions merged");
        Ok(enhanced_total)
    }

    pub fn summary(&self, employee: &str, window: &DateWindow) -> Option<Summary> {
        self.employee(employee).map(|e| summarize(e.within(window)))
    }

    pub fn all_summaries(&self, window: &DateWindow) -> Vec<(String, Summary)> {
        self.attendance
            .iter()
            .map(|(name, e)| (name.clone(), summarize(e.within(window))))
            .collect()
    }

    /// Every employee's day on `date`, in employee order.
    pub fn days_on(&self, date: NaiveDate) -> Vec<&AttendanceDay> {
        self.attendance.values().filter_map(|e| e.day(date)).collect()
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.attendance.values().find_map(EmployeeAttendance::range)
    }

    /// The export view for one employee limited to `window`, with its summary
    /// computed by the caller over the same window.
    pub fn report<'a>(&'a self, employee: &str, summary: &'a Summary, window: &DateWindow) -> Option<Report<'a>> {
        let employee = self.employee(employee)?;
        let days = employee.within(window);
        Some(Report {
            employee: &employee.employee,
            start: days.first()?.date,
            end: days.last()?.date,
            days,
            summary,
        })
    }
}
