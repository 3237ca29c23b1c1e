use crate::model::day::{AttendanceDay, Status};
use crate::model::summary::Summary;

pub fn summarize(days: &[AttendanceDay]) -> Summary {
    let count = |status: Status| days.iter().filter(|d| d.status == status).count();

    let holiday_days = count(Status::PublicHoliday);
    let weekend_days = count(Status::Weekend);
    let work_on_holiday_days = count(Status::WorkOnHoliday);
    let work_on_weekend_days = count(Status::WorkOnWeekend);

    Summary {
        total_days: days.len(),
        workable_days: days.len()
            - (holiday_days + work_on_holiday_days)
            - (weekend_days + work_on_weekend_days),
        present_days: count(Status::Present),
        absent_days: count(Status::Absent),
        short_hours_days: count(Status::ShortHours),
        half_days: count(Status::HalfDay),
        holiday_days,
        weekend_days,
        work_on_holiday_days,
        work_on_weekend_days,
        total_worked_hours: days.iter().map(|d| d.work_hours).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32, hours: f64, status: Status) -> AttendanceDay {
        let mut day = AttendanceDay::empty("Dolly".to_string(), NaiveDate::from_ymd_opt(2025, 1, d).unwrap());
        day.work_hours = hours;
        day.status = status;
        day
    }

    #[test]
    fn test_summarize_counts() {
        let days = vec![
            day(1, 0.0, Status::PublicHoliday),
            day(2, 9.0, Status::Present),
            day(3, 0.0, Status::Absent),
            day(4, 3.5, Status::WorkOnWeekend),
            day(5, 0.0, Status::Weekend),
            day(6, 5.0, Status::ShortHours),
            day(7, 2.0, Status::HalfDay),
            day(8, 8.0, Status::WorkOnHoliday),
        ];
        let summary = summarize(&days);
        assert_eq!(summary.total_days, 8);
        assert_eq!(summary.workable_days, 4);
        assert_eq!(summary.present_days, 1);
        assert_eq!(summary.absent_days, 1);
        assert_eq!(summary.short_hours_days, 1);
        assert_eq!(summary.half_days, 1);
        assert_eq!(summary.work_on_holiday_days, 1);
        assert_eq!(summary.work_on_weekend_days, 1);
        assert_eq!(summary.total_worked_hours, 27.5);
        assert_eq!(summary.total_hours_display(), "27:30");
        assert_eq!(summary.short_half_display(), "1/1");
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.total_hours_display(), "00:00");
    }
}
