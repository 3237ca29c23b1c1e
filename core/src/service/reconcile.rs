use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::extract::RawRecords;
use crate::model::day::{AttendanceDay, EmployeeAttendance};
use crate::model::holiday::HolidayCalendar;
use crate::model::policy::AttendancePolicy;
use crate::service::classify::classify_day;

pub type Attendance = BTreeMap<String, EmployeeAttendance>;

/// Earliest and latest date across every employee's records.
pub fn global_span(raw: &RawRecords) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = raw.values().flatten().map(|d| d.date);
    let first = dates.next()?;
    Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}

/// Fills every employee onto the shared date span and classifies each day.
///
/// With no records at all the input comes back as-is (still empty).
pub fn reconcile(raw: RawRecords, calendar: &HolidayCalendar, policy: &AttendancePolicy) -> Attendance {
    let Some((start, end)) = global_span(&raw) else {
        return raw
            .into_iter()
            .map(|(name, days)| (name.clone(), EmployeeAttendance::new(name, days)))
            .collect();
    };

    let mut reconciled = Attendance::new();
    for (employee, days) in raw {
        let mut by_date: HashMap<NaiveDate, AttendanceDay> = HashMap::with_capacity(days.len());
        for day in days {
            if let Some(previous) = by_date.insert(day.date, day) {
                debug!(employee = %employee, date = %previous.date, "duplicate record replaced");
            }
        }

        let mut calendar_days: Vec<AttendanceDay> = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|date| {
                let mut day = by_date
                    .remove(&date)
                    .unwrap_or_else(|| AttendanceDay::empty(employee.clone(), date));
                day.status = classify_day(&day, calendar, policy);
                day
            })
            .collect();
        calendar_days.sort_by_key(|d| d.date);

        reconciled.insert(employee.clone(), EmployeeAttendance::new(employee, calendar_days));
    }

    info!(
        employees = reconciled.len(),
        start = %start,
        end = %end,
        "reconciled attendance calendar"
    );
    reconciled
}

/// Turns a reconciled dataset back into raw input, copying every day.
pub fn reseed(attendance: &Attendance) -> RawRecords {
    attendance
        .iter()
        .map(|(name, employee)| (name.clone(), employee.days.clone()))
        .collect()
}
