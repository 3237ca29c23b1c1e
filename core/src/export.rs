use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use csv::WriterBuilder;

use crate::model::day::AttendanceDay;
use crate::model::summary::Summary;

const DETAIL_HEADERS: [&str; 7] = ["Date", "Day", "In Time", "Out Time", "Total Hours", "Status", "Reason / Note"];

/// Everything a renderer needs for one employee's report.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub employee: &'a str,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: &'a [AttendanceDay],
    pub summary: &'a Summary,
}

pub trait ReportExporter {
    fn export(&self, report: &Report<'_>, out: &mut dyn Write) -> Result<()>;
}

/// Summary block, a blank line, then one row per day.
pub struct CsvExporter;

impl ReportExporter for CsvExporter {
    fn export(&self, report: &Report<'_>, out: &mut dyn Write) -> Result<()> {
        {
            let mut writer = WriterBuilder::new().flexible(true).from_writer(&mut *out);
            writer.write_record(["Employee Attendance Summary"])?;
            writer.write_record(["Employee Name:", report.employee])?;
            let period = format!("{} - {}", report.start.format("%Y-%m-%d"), report.end.format("%Y-%m-%d"));
            writer.write_record(["Period:", period.as_str()])?;
            writer.write_record(["Metric", "Value"])?;
            for (label, value) in report.summary.metrics() {
                writer.write_record([label, value.as_str()])?;
            }
            writer.flush()?;
        }
        writeln!(out)?;

        let mut writer = WriterBuilder::new().from_writer(&mut *out);
        writer.write_record(DETAIL_HEADERS)?;
        for day in report.days {
            let reason = day.reason_text();
            writer.write_record([
                day.date.format("%Y-%m-%d").to_string(),
                day.date.format("%A").to_string(),
                day.in_time.clone().unwrap_or_else(|| "-".to_string()),
                day.out_time.clone().unwrap_or_else(|| "-".to_string()),
                day.total_hours.clone().unwrap_or_else(|| "0:00".to_string()),
                day.status.label().to_string(),
                if reason.is_empty() { "-".to_string() } else { reason },
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}

pub fn export_file_name(employee: &str, today: NaiveDate) -> String {
    format!(
        "Attendance_Report_{}_{}.csv",
        employee.split_whitespace().collect::<Vec<_>>().join("_"),
        today.format("%Y-%m-%d")
    )
}
