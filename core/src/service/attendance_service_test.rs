#[cfg(test)]
mod tests {
    use crate::error::{EditError, ExtractError, SuggestError};
    use crate::export::{CsvExporter, ReportExporter};
    use crate::model::day::Status;
    use crate::model::holiday::{Holiday, HolidayCalendar};
    use crate::model::policy::AttendancePolicy;
    use crate::model::reason::ReasonCode;
    use crate::model::window::DateWindow;
    use crate::service::attendance_service::AttendanceService;
    use crate::service::edit::DayEdit;
    use crate::service::suggest::{ReasonSuggester, Suggestion, SuggestionRequest};
    use chrono::{NaiveDate, Weekday};
    use std::cell::RefCell;

    const NEW_YEAR: &str = "\
Dolly (21 : All Users ),,,,
Date,Name,In Time,Out Time,Total Hours
2025-01-02,Dolly,09:00,18:00,9:00
Sam (22 : All Users ),,,,
Date,Name,In Time,Out Time,Total Hours
2025-01-01,Sam,09:00,17:00,8:00
2025-01-03,Sam,09:00,14:00,5:00
";

    const WEEK: &str = "\
Dolly (21 : All Users ),,,,
Date,Name,In Time,Out Time,Total Hours
2025-01-06,Dolly,09:00,18:00,9:00
2025-01-07,Dolly,-,-,-
2025-01-08,Dolly,09:00,11:00,2:00
2025-01-09,Dolly,09:00,14:00,5:00
2025-01-10,Dolly,09:00,17:30,8:30
2025-01-11,Dolly,10:00,13:00,3:00
";

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn load(text: &str, calendar: HolidayCalendar) -> AttendanceService {
        let mut service = AttendanceService::new(calendar, AttendancePolicy::default());
        service.load_csv(text.as_bytes()).unwrap();
        service
    }

    struct FixedSuggester {
        calls: RefCell<Vec<(String, Vec<SuggestionRequest>)>>,
    }

    impl ReasonSuggester for FixedSuggester {
        fn suggest(&self, employee: &str, requests: &[SuggestionRequest]) -> Result<Vec<Suggestion>, SuggestError> {
            self.calls.borrow_mut().push((employee.to_string(), requests.to_vec()));
            Ok(requests
                .iter()
                .map(|r| Suggestion {
                    date: r.date,
                    suggested_status: r.status.label().to_string(),
                    suggested_reason: format!("Review {}", r.date),
                })
                .collect())
        }
    }

    struct FailingSuggester;

    impl ReasonSuggester for FailingSuggester {
        fn suggest(&self, _employee: &str, _requests: &[SuggestionRequest]) -> Result<Vec<Suggestion>, SuggestError> {
            Err(SuggestError::Transport("model overloaded".to_string()))
        }
    }

    #[test]
    fn test_new_year_scenario() {
        let service = load(NEW_YEAR, HolidayCalendar::default_2025());
        assert_eq!(service.date_range(), Some((ymd(2025, 1, 1), ymd(2025, 1, 3))));

        let dolly = service.employee("dolly").unwrap();
        let statuses: Vec<Status> = dolly.days.iter().map(|d| d.status).collect();
        assert_eq!(statuses, vec![Status::PublicHoliday, Status::Present, Status::Absent]);

        let sam = service.employee("Sam").unwrap();
        let statuses: Vec<Status> = sam.days.iter().map(|d| d.status).collect();
        assert_eq!(statuses, vec![Status::WorkOnHoliday, Status::Absent, Status::ShortHours]);
    }

    #[test]
    fn test_new_year_scenario_with_friday_weekend() {
        let policy = AttendancePolicy::default().with_weekend_days(vec![Weekday::Fri, Weekday::Sat]);
        let mut service = AttendanceService::new(HolidayCalendar::default_2025(), policy);
        service.load_csv(NEW_YEAR.as_bytes()).unwrap();
        assert_eq!(service.employee("Dolly").unwrap().days[2].status, Status::Weekend);
        assert_eq!(service.employee("Sam").unwrap().days[2].status, Status::WorkOnWeekend);
    }

    #[test]
    fn test_load_rejects_files_without_records() {
        let mut service = AttendanceService::new(HolidayCalendar::new(), AttendancePolicy::default());
        let err = service.load_csv("Date,Name\nrandom,text\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ExtractError::NoRecords));
        assert_eq!(service.employees().count(), 0);
    }

    #[test]
    fn test_week_summary() {
        let service = load(WEEK, HolidayCalendar::new());
        let summary = service.summary("Dolly", &DateWindow::all()).unwrap();
        assert_eq!(summary.total_days, 6);
        assert_eq!(summary.workable_days, 5);
        assert_eq!(summary.present_days, 2);
        assert_eq!(summary.absent_days, 1);
        assert_eq!(summary.half_days, 1);
        assert_eq!(summary.short_hours_days, 1);
        assert_eq!(summary.work_on_weekend_days, 1);
        assert_eq!(summary.total_worked_hours, 27.5);
        assert_eq!(service.all_summaries(&DateWindow::all()).len(), 1);
    }

    #[test]
    fn test_annotation_edit_is_isolated() {
        let mut service = load(WEEK, HolidayCalendar::new());
        let before = service.employee("Dolly").unwrap().clone();

        let edit = DayEdit::annotate(Some(ReasonCode::ForgotToPunchOut), "Left badge at home");
        let day = service.edit_day("Dolly", ymd(2025, 1, 9), &edit).unwrap();
        assert_eq!(day.status, Status::ShortHours);
        assert_eq!(day.work_hours, 5.0);

        let after = service.employee("Dolly").unwrap();
        for (old, new) in before.days.iter().zip(&after.days) {
            assert_eq!(old.work_hours, new.work_hours);
            assert_eq!(old.status, new.status);
            if old.date != ymd(2025, 1, 9) {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn test_credit_edit_survives_holiday_change() {
        let mut service = load(WEEK, HolidayCalendar::new());
        let doctor = ymd(2025, 1, 7);
        let edit = DayEdit::credit(ReasonCode::Other, "Doctor", 8.0);
        let day = service.edit_day("Dolly", doctor, &edit).unwrap();
        assert_eq!(day.status, Status::Present);

        let mut calendar = service.calendar().clone();
        calendar.add(Holiday::new(ymd(2025, 1, 8), "Company Day"));
        service.set_holidays(calendar);

        let dolly = service.employee("Dolly").unwrap();
        let day = dolly.day(doctor).unwrap();
        assert_eq!(day.note, "Doctor");
        assert_eq!(day.reason, Some(ReasonCode::Other));
        assert_eq!(day.work_hours, 8.0);
        assert_eq!(day.status, Status::Present);
        assert_eq!(dolly.day(ymd(2025, 1, 8)).unwrap().status, Status::WorkOnHoliday);
        assert_eq!(dolly.days.len(), 6);

        let mut calendar = service.calendar().clone();
        calendar.remove(ymd(2025, 1, 8));
        service.set_holidays(calendar);
        let dolly = service.employee("Dolly").unwrap();
        assert_eq!(dolly.day(ymd(2025, 1, 8)).unwrap().status, Status::HalfDay);
        assert_eq!(dolly.day(doctor).unwrap().note, "Doctor");
    }

    #[test]
    fn test_edit_errors() {
        let mut service = load(WEEK, HolidayCalendar::new());
        let edit = DayEdit::annotate(None, "x");
        assert_eq!(
            service.edit_day("Nobody", ymd(2025, 1, 7), &edit).unwrap_err(),
            EditError::UnknownEmployee("Nobody".to_string())
        );
        assert_eq!(
            service.edit_day("Dolly", ymd(2025, 2, 7), &edit).unwrap_err(),
            EditError::DayOutOfRange {
                employee: "Dolly".to_string(),
                date: ymd(2025, 2, 7),
            }
        );
    }

    #[test]
    fn test_enhance_merges_suggestions() {
        let mut service = load(WEEK, HolidayCalendar::new());
        let suggester = FixedSuggester {
            calls: RefCell::new(Vec::new()),
        };
        let enhanced = service.enhance(&suggester).unwrap();
        assert_eq!(enhanced, 3);

        let calls = suggester.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "Dolly");
        assert_eq!(calls[0].1.len(), 3);

        let day = service.employee("Dolly").unwrap().day(ymd(2025, 1, 7)).unwrap().clone();
        assert!(day.ai_enhanced);
        assert_eq!(day.note, "Review 2025-01-07");

        // A human edit clears the flag.
        let updated = service
            .edit_day("Dolly", day.date, &DayEdit::annotate(None, "Checked"))
            .unwrap();
        assert!(!updated.ai_enhanced);
    }

    #[test]
    fn test_enhance_failure_leaves_dataset_untouched() {
        let mut service = load(WEEK, HolidayCalendar::new());
        let before = service.employee("Dolly").unwrap().clone();
        let err = service.enhance(&FailingSuggester).unwrap_err();
        assert_eq!(err, SuggestError::Transport("model overloaded".to_string()));
        assert_eq!(service.employee("Dolly").unwrap(), &before);
    }

    #[test]
    fn test_report_view() {
        let service = load(WEEK, HolidayCalendar::new());
        let all = DateWindow::all();
        let summary = service.summary("Dolly", &all).unwrap();
        let report = service.report("Dolly", &summary, &all).unwrap();
        assert_eq!(report.employee, "Dolly");
        assert_eq!((report.start, report.end), (ymd(2025, 1, 6), ymd(2025, 1, 11)));
        assert_eq!(report.days.len(), 6);
        assert!(service.report("Nobody", &summary, &all).is_none());
    }

    #[test]
    fn test_window_scopes_summary_and_export() {
        let service = load(WEEK, HolidayCalendar::new());
        let window = DateWindow::new(Some(ymd(2025, 1, 7)), Some(ymd(2025, 1, 9))).unwrap();

        let summary = service.summary("Dolly", &window).unwrap();
        assert_eq!(summary.total_days, 3);
        assert_eq!(summary.workable_days, 3);
        assert_eq!(summary.present_days, 0);
        assert_eq!(summary.absent_days, 1);
        assert_eq!(summary.half_days, 1);
        assert_eq!(summary.short_hours_days, 1);
        assert_eq!(summary.work_on_weekend_days, 0);
        assert_eq!(summary.total_worked_hours, 7.0);
        assert_eq!(service.all_summaries(&window)[0].1, summary);

        let report = service.report("Dolly", &summary, &window).unwrap();
        assert_eq!((report.start, report.end), (ymd(2025, 1, 7), ymd(2025, 1, 9)));
        assert_eq!(report.days.len(), 3);

        let mut out = Vec::new();
        CsvExporter.export(&report, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().any(|l| l == "Period:,2025-01-07 - 2025-01-09"));
        assert!(text.lines().any(|l| l == "Total Hours Worked,07:00"));
        assert!(!text.contains("2025-01-06,"));

        let outside = DateWindow::day(ymd(2025, 2, 1));
        let empty = service.summary("Dolly", &outside).unwrap();
        assert_eq!(empty.total_days, 0);
        assert!(service.report("Dolly", &empty, &outside).is_none());
    }

    #[test]
    fn test_days_on_lists_every_employee() {
        let service = load(NEW_YEAR, HolidayCalendar::default_2025());
        let days = service.days_on(ymd(2025, 1, 1));
        let statuses: Vec<(&str, Status)> = days.iter().map(|d| (d.employee.as_str(), d.status)).collect();
        assert_eq!(
            statuses,
            vec![("Dolly", Status::PublicHoliday), ("Sam", Status::WorkOnHoliday)]
        );
        assert!(service.days_on(ymd(2025, 3, 1)).is_empty());
    }
}
