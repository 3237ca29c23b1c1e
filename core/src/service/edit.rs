use serde::{Deserialize, Serialize};

use crate::error::EditError;
use crate::model::day::AttendanceDay;
use crate::model::holiday::HolidayCalendar;
use crate::model::policy::AttendancePolicy;
use crate::model::reason::ReasonCode;
use crate::service::classify::classify_day;
use crate::service::reconcile::{reconcile, reseed, Attendance};
use crate::time::format_duration;

/// A reviewer's correction for one day.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DayEdit {
    pub reason: Option<ReasonCode>,
    pub note: String,
    /// `None` annotates the day without touching hours or status.
    pub credit_hours: Option<f64>,
}

impl DayEdit {
    pub fn annotate(reason: Option<ReasonCode>, note: impl Into<String>) -> Self {
        Self {
            reason,
            note: note.into(),
            credit_hours: None,
        }
    }

    pub fn credit(reason: ReasonCode, note: impl Into<String>, hours: f64) -> Self {
        Self {
            reason: Some(reason),
            note: note.into(),
            credit_hours: Some(hours),
        }
    }
}

pub fn apply_edit(
    day: &AttendanceDay,
    edit: &DayEdit,
    calendar: &HolidayCalendar,
    policy: &AttendancePolicy,
) -> Result<AttendanceDay, EditError> {
    let mut updated = day.clone();
    updated.reason = edit.reason;
    updated.note = edit.note.clone();
    updated.ai_enhanced = false;

    if let Some(hours) = edit.credit_hours {
        if !hours.is_finite() || hours < 0.0 {
            return Err(EditError::InvalidCredit(hours));
        }
        updated.work_hours = hours;
        updated.total_hours = Some(format_duration(hours));
        updated.status = classify_day(&updated, calendar, policy);
    }
    Ok(updated)
}

/// Re-runs the whole reconcile pass against a new holiday set.
///
/// Works on a copy of the current days, so credited hours and reasons carry
/// over and only statuses are recomputed.
pub fn apply_holiday_change(
    attendance: &Attendance,
    calendar: &HolidayCalendar,
    policy: &AttendancePolicy,
) -> Attendance {
    reconcile(reseed(attendance), calendar, policy)
}
