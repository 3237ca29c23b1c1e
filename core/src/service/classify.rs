use chrono::NaiveDate;

use crate::model::day::{AttendanceDay, Status};
use crate::model::holiday::HolidayCalendar;
use crate::model::policy::AttendancePolicy;

/// The one attendance rule. Every status in the crate comes from here.
///
/// Holiday beats weekend whether or not the day was worked.
pub fn classify<F>(work_hours: f64, date: NaiveDate, is_holiday: F, policy: &AttendancePolicy) -> Status
where
    F: Fn(NaiveDate) -> bool,
{
    let holiday = is_holiday(date);
    let weekend = policy.is_weekend(date);

    if work_hours > 0.0 {
        if holiday {
            Status::WorkOnHoliday
        } else if weekend {
            Status::WorkOnWeekend
        } else if work_hours >= policy.full_day_hours {
            Status::Present
        } else if work_hours >= policy.half_day_hours {
            Status::ShortHours
        } else {
            Status::HalfDay
        }
    } else if holiday {
        Status::PublicHoliday
    } else if weekend {
        Status::Weekend
    } else {
        Status::Absent
    }
}

pub fn classify_day(day: &AttendanceDay, calendar: &HolidayCalendar, policy: &AttendancePolicy) -> Status {
    classify(day.work_hours, day.date, |d| calendar.contains(d), policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2025-01-02 is a Thursday, 2025-01-04 a Saturday.
    fn weekday() -> NaiveDate {
        ymd(2025, 1, 2)
    }

    fn saturday() -> NaiveDate {
        ymd(2025, 1, 4)
    }

    #[test]
    fn test_worked_weekday_thresholds() {
        let policy = AttendancePolicy::default();
        let none = |_| false;
        assert_eq!(classify(9.0, weekday(), none, &policy), Status::Present);
        assert_eq!(classify(8.0, weekday(), none, &policy), Status::Present);
        assert_eq!(classify(5.0, weekday(), none, &policy), Status::ShortHours);
        assert_eq!(classify(4.0, weekday(), none, &policy), Status::ShortHours);
        assert_eq!(classify(2.0, weekday(), none, &policy), Status::HalfDay);
        assert_eq!(classify(0.0, weekday(), none, &policy), Status::Absent);
    }

    #[test]
    fn test_weekend_and_holiday() {
        let policy = AttendancePolicy::default();
        let none = |_| false;
        let always = |_| true;
        assert_eq!(classify(0.0, saturday(), none, &policy), Status::Weekend);
        assert_eq!(classify(3.0, saturday(), none, &policy), Status::WorkOnWeekend);
        assert_eq!(classify(0.0, weekday(), always, &policy), Status::PublicHoliday);
        assert_eq!(classify(9.0, weekday(), always, &policy), Status::WorkOnHoliday);
    }

    #[test]
    fn test_holiday_dominates_weekend() {
        let policy = AttendancePolicy::default();
        let always = |_| true;
        assert_eq!(classify(6.0, saturday(), always, &policy), Status::WorkOnHoliday);
        assert_eq!(classify(0.0, saturday(), always, &policy), Status::PublicHoliday);
    }

    #[test]
    fn test_custom_weekend_days() {
        let policy = AttendancePolicy::default().with_weekend_days(vec![Weekday::Fri, Weekday::Sat]);
        // 2025-01-03 is a Friday, 2025-01-05 a Sunday.
        assert_eq!(classify(0.0, ymd(2025, 1, 3), |_| false, &policy), Status::Weekend);
        assert_eq!(classify(0.0, ymd(2025, 1, 5), |_| false, &policy), Status::Absent);
    }

    #[test]
    fn test_classify_day_is_stable() {
        let policy = AttendancePolicy::default();
        let calendar = HolidayCalendar::default_2025();
        let mut day = AttendanceDay::empty("Dolly".to_string(), ymd(2025, 1, 1));
        day.status = classify_day(&day, &calendar, &policy);
        assert_eq!(day.status, Status::PublicHoliday);
        assert_eq!(classify_day(&day, &calendar, &policy), day.status);
    }
}
