use chrono::NaiveDate;
use punchcard_core::{AttendanceDay, HolidayCalendar, Status, Summary};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "In")]
    in_time: String,
    #[tabled(rename = "Out")]
    out_time: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Reason / Note")]
    reason: String,
}

#[derive(Tabled)]
struct EmployeeDayRow {
    #[tabled(rename = "Employee")]
    employee: String,
    #[tabled(inline)]
    day: DayRow,
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    label: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct EmployeeRow {
    #[tabled(rename = "Employee")]
    employee: String,
    #[tabled(rename = "Workable")]
    workable: usize,
    #[tabled(rename = "Present")]
    present: usize,
    #[tabled(rename = "Absent")]
    absent: usize,
    #[tabled(rename = "Short/Half")]
    short_half: String,
    #[tabled(rename = "Work on Holiday")]
    work_on_holiday: usize,
    #[tabled(rename = "Total Hours")]
    total_hours: String,
}

fn day_row(day: &AttendanceDay, calendar: &HolidayCalendar) -> DayRow {
    let mut reason = day.reason_text();
    if reason.is_empty() && matches!(day.status, Status::PublicHoliday | Status::WorkOnHoliday) {
        reason = calendar.name(day.date).unwrap_or_default().to_string();
    }
    if day.ai_enhanced {
        reason = format!("{} (AI)", reason);
    }

    DayRow {
        date: day.date.format("%Y-%m-%d").to_string(),
        day: day.date.format("%a").to_string(),
        in_time: day.in_time.clone().unwrap_or_else(|| "-".to_string()),
        out_time: day.out_time.clone().unwrap_or_else(|| "-".to_string()),
        hours: day.total_hours.clone().unwrap_or_else(|| "-".to_string()),
        status: day.status.label().to_string(),
        reason: if reason.is_empty() { "-".to_string() } else { reason },
    }
}

fn styled(mut table: Table) -> Table {
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table
}

pub fn days_table(days: &[AttendanceDay], calendar: &HolidayCalendar) -> Table {
    let rows: Vec<DayRow> = days.iter().map(|d| day_row(d, calendar)).collect();
    styled(Table::new(rows))
}

pub fn date_table(days: &[&AttendanceDay], calendar: &HolidayCalendar) -> Table {
    let rows: Vec<EmployeeDayRow> = days
        .iter()
        .map(|d| EmployeeDayRow {
            employee: d.employee.clone(),
            day: day_row(d, calendar),
        })
        .collect();
    styled(Table::new(rows))
}

pub fn summary_table(summary: &Summary) -> Table {
    let rows: Vec<MetricRow> = summary
        .metrics()
        .into_iter()
        .map(|(label, value)| MetricRow {
            label: label.to_string(),
            value,
        })
        .collect();
    styled(Table::new(rows))
}

pub fn overview_table(summaries: &[(String, Summary)]) -> Table {
    let rows: Vec<EmployeeRow> = summaries
        .iter()
        .map(|(employee, s)| EmployeeRow {
            employee: employee.clone(),
            workable: s.workable_days,
            present: s.present_days,
            absent: s.absent_days,
            short_half: s.short_half_display(),
            work_on_holiday: s.work_on_holiday_days,
            total_hours: s.total_hours_display(),
        })
        .collect();
    styled(Table::new(rows))
}

pub fn print_employee(employee: &str, days: &[AttendanceDay], summary: &Summary, calendar: &HolidayCalendar) {
    let range = match (days.first(), days.last()) {
        (Some(first), Some(last)) => format!("{} - {}", first.date.format("%Y-%m-%d"), last.date.format("%Y-%m-%d")),
        _ => "no days in range".to_string(),
    };
    println!("\n\x1b[1;36m{}\x1b[0m ({})", employee, range);
    println!("{}", days_table(days, calendar));
    println!("{}", summary_table(summary));
}

pub fn print_date(date: NaiveDate, days: &[&AttendanceDay], calendar: &HolidayCalendar) {
    println!("\n\x1b[1;36m{}\x1b[0m ({})", date.format("%Y-%m-%d"), date.format("%A"));
    if days.is_empty() {
        println!("No attendance recorded for this date.");
    } else {
        println!("{}", date_table(days, calendar));
    }
}
