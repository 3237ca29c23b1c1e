use serde::{Deserialize, Serialize};

use crate::time::format_duration;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total_days: usize,
    pub workable_days: usize,
    pub present_days: usize,
    pub absent_days: usize,
    pub short_hours_days: usize,
    pub half_days: usize,
    pub holiday_days: usize,
    pub weekend_days: usize,
    pub work_on_holiday_days: usize,
    pub work_on_weekend_days: usize,
    pub total_worked_hours: f64,
}

impl Summary {
    pub fn total_hours_display(&self) -> String {
        format_duration(self.total_worked_hours)
    }

    pub fn short_half_display(&self) -> String {
        format!("{}/{}", self.short_hours_days, self.half_days)
    }

    /// Label/value pairs in report order.
    pub fn metrics(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total Workable Days", self.workable_days.to_string()),
            ("Present Days", self.present_days.to_string()),
            ("Absent Days", self.absent_days.to_string()),
            ("Short/Half Days", self.short_half_display()),
            ("Work on Holiday", self.work_on_holiday_days.to_string()),
            ("Work on Weekend", self.work_on_weekend_days.to_string()),
            ("Total Hours Worked", self.total_hours_display()),
        ]
    }
}
