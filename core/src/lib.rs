pub mod error;
pub mod export;
pub mod extract;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use error::{EditError, ExtractError, SuggestError};
pub use export::{export_file_name, CsvExporter, Report, ReportExporter};
pub use extract::{extract_records, RawRecords};
pub use input::{expand_key, parse_args, parse_edit_spec, EditSpec, ParsedInput};
pub use model::day::{AttendanceDay, EmployeeAttendance, Status};
pub use model::holiday::{Holiday, HolidayCalendar};
pub use model::policy::{parse_weekend_days, AttendancePolicy};
pub use model::reason::ReasonCode;
pub use model::summary::Summary;
pub use model::window::DateWindow;
pub use repository::{FileHolidayRepository, FilePolicyRepository, HolidayRepository, PolicyRepository};
pub use service::attendance_service::AttendanceService;
pub use service::classify::{classify, classify_day};
pub use service::edit::{apply_edit, apply_holiday_change, DayEdit};
pub use service::reconcile::{reconcile, Attendance};
pub use service::suggest::{DisabledSuggester, ReasonSuggester, Suggestion, SuggestionRequest};
pub use service::summary::summarize;
pub use time::{format_duration, parse_clock_duration, parse_observed_date};
