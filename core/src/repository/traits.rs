use anyhow::Result;
use chrono::NaiveDate;

use crate::model::holiday::{Holiday, HolidayCalendar};
use crate::model::policy::AttendancePolicy;

pub trait HolidayRepository {
    fn calendar(&self) -> Result<HolidayCalendar>;
    /// `false` when a holiday already exists on that date.
    fn add(&self, holiday: Holiday) -> Result<bool>;
    fn remove(&self, date: NaiveDate) -> Result<Option<Holiday>>;
}

pub trait PolicyRepository {
    fn get(&self) -> Result<AttendancePolicy>;
    fn save(&self, policy: &AttendancePolicy) -> Result<()>;
}
