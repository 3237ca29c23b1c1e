mod gemini;
mod report;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use punchcard_core::{
    expand_key, export_file_name, parse_edit_spec, parse_observed_date, parse_weekend_days, AttendancePolicy,
    AttendanceService, CsvExporter, DateWindow, DisabledSuggester, EmployeeAttendance, FileHolidayRepository,
    FilePolicyRepository, Holiday, HolidayRepository, PolicyRepository, ReasonSuggester, ReportExporter,
};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::gemini::GeminiSuggester;

#[derive(Parser)]
#[command(name = "punchcard")]
#[command(about = "Reconcile time-clock exports into attendance reports", long_about = None)]
struct Cli {
    /// Directory holding holidays.json and policy.json (default: $PUNCHCARD_HOME or ~/.punchcard)
    #[arg(long, global = true)]
    home: Option<PathBuf>,
    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Per-day attendance for one or all employees
    Report(ReportArgs),
    /// Overview of every employee in an export
    Summary {
        file: PathBuf,
        #[arg(long)]
        weekend: Option<String>,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Manage the stored public holidays
    Holidays {
        #[command(subcommand)]
        action: HolidayAction,
    },
    /// Show or change the stored attendance policy
    Policy {
        #[command(subcommand)]
        action: PolicyAction,
    },
}

/// Inclusive date range limiting the shown days, summaries and exports.
#[derive(clap::Args)]
struct WindowArgs {
    /// First date to include
    #[arg(long)]
    from: Option<String>,
    /// Last date to include
    #[arg(long)]
    to: Option<String>,
}

impl WindowArgs {
    fn window(&self) -> Result<DateWindow> {
        let from = self.from.as_deref().map(parse_date).transpose()?;
        let to = self.to.as_deref().map(parse_date).transpose()?;
        DateWindow::new(from, to)
    }
}

#[derive(clap::Args)]
struct ReportArgs {
    /// Time-clock CSV export
    file: PathBuf,
    /// Employee name or unique prefix
    #[arg(long)]
    employee: Option<String>,
    /// Day edit, e.g. "emp:dolly date:2025-01-07 reason:sick Doctor visit"
    #[arg(long = "edit")]
    edits: Vec<String>,
    /// Extra holiday for this run only: DATE[=name]
    #[arg(long = "add-holiday")]
    add_holidays: Vec<String>,
    /// Ignore a stored holiday for this run only
    #[arg(long = "drop-holiday")]
    drop_holidays: Vec<String>,
    /// Weekend days for this run, e.g. fri,sat
    #[arg(long)]
    weekend: Option<String>,
    #[command(flatten)]
    window: WindowArgs,
    /// Show every selected employee on one date
    #[arg(long, conflicts_with_all = ["from", "to"])]
    date: Option<String>,
    /// Write CSV reports to this file, or one per employee into this directory
    #[arg(long)]
    export: Option<PathBuf>,
    /// Ask the Gemini service for reasons on flagged days (needs GEMINI_API_KEY)
    #[arg(long)]
    suggest: bool,
}

#[derive(clap::Subcommand)]
enum HolidayAction {
    List,
    Add {
        date: String,
        #[arg(trailing_var_arg = true, required = true)]
        name: Vec<String>,
    },
    Remove {
        date: String,
    },
}

#[derive(clap::Subcommand)]
enum PolicyAction {
    Show,
    Set {
        #[arg(long)]
        weekend: Option<String>,
        #[arg(long)]
        full_day: Option<f64>,
        #[arg(long)]
        half_day: Option<f64>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    parse_observed_date(input).ok_or_else(|| anyhow!("Invalid date: '{}'", input))
}

fn load_policy(home: &Option<PathBuf>, weekend: Option<&str>) -> Result<AttendancePolicy> {
    let policy = FilePolicyRepository::new(home.clone())?.get()?;
    match weekend {
        Some(days) => Ok(policy.with_weekend_days(parse_weekend_days(days)?)),
        None => Ok(policy),
    }
}

fn load_service(home: &Option<PathBuf>, file: &Path, weekend: Option<&str>) -> Result<AttendanceService> {
    let calendar = FileHolidayRepository::new(home.clone())?.calendar()?;
    let policy = load_policy(home, weekend)?;
    let mut service = AttendanceService::new(calendar, policy);
    let input = File::open(file).with_context(|| format!("Could not open {}", file.display()))?;
    let employees = service.load_csv(input)?;
    info!(employees, file = %file.display(), "export loaded");
    Ok(service)
}

fn resolve_employee(service: &AttendanceService, name: &str) -> Result<String> {
    expand_key(name, &service.employee_names()).map_err(|e| anyhow!("Employee lookup failed: {}", e))
}

fn parse_holiday_flag(flag: &str) -> Result<Holiday> {
    let (date, name) = match flag.split_once('=') {
        Some((date, name)) => (date, name.trim()),
        None => (flag, ""),
    };
    let name = if name.is_empty() { "Holiday" } else { name };
    Ok(Holiday::new(parse_date(date.trim())?, name))
}

fn export_reports(
    service: &AttendanceService,
    selected: &[&EmployeeAttendance],
    window: &DateWindow,
    target: &Path,
) -> Result<()> {
    let today = Local::now().date_naive();
    let paths: Vec<(PathBuf, &EmployeeAttendance)> = if target.is_dir() {
        selected
            .iter()
            .map(|e| (target.join(export_file_name(&e.employee, today)), *e))
            .collect()
    } else if let [only] = selected {
        vec![(target.to_path_buf(), *only)]
    } else {
        bail!(
            "{} employees selected; pass --employee or an existing directory to --export",
            selected.len()
        );
    };

    for (path, employee) in paths {
        let summary = service
            .summary(&employee.employee, window)
            .ok_or_else(|| anyhow!("Unknown employee: '{}'", employee.employee))?;
        let Some(report) = service.report(&employee.employee, &summary, window) else {
            warn!(employee = %employee.employee, "no days in range to export");
            continue;
        };
        let file = File::create(&path).with_context(|| format!("Could not create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        CsvExporter.export(&report, &mut writer)?;
        writer.flush()?;
        println!("Exported {} to {}", employee.employee, path.display());
    }
    Ok(())
}

fn run_report(home: &Option<PathBuf>, args: ReportArgs) -> Result<()> {
    let day_view = args.date.as_deref().map(parse_date).transpose()?;
    let window = match day_view {
        Some(date) => DateWindow::day(date),
        None => args.window.window()?,
    };
    let mut service = load_service(home, &args.file, args.weekend.as_deref())?;

    if args.suggest {
        let suggester: Box<dyn ReasonSuggester> = match GeminiSuggester::from_env() {
            Some(gemini) => Box::new(gemini),
            None => Box::new(DisabledSuggester),
        };
        match service.enhance(suggester.as_ref()) {
            Ok(count) => println!("{} flagged days received suggested reasons", count),
            Err(e) => println!("Warning: {}", e),
        }
    }

    for spec in &args.edits {
        let parsed = parse_edit_spec(spec, service.policy())?;
        let name = resolve_employee(&service, &parsed.employee)?;
        let day = service.edit_day(&name, parsed.date, &parsed.edit)?;
        println!("Edited {} {}: {}", name, day.date, day.status);
    }

    if !args.add_holidays.is_empty() || !args.drop_holidays.is_empty() {
        let mut calendar = service.calendar().clone();
        for flag in &args.add_holidays {
            let holiday = parse_holiday_flag(flag)?;
            let date = holiday.date;
            if !calendar.add(holiday) {
                println!("Warning: {} is already a holiday", date);
            }
        }
        for flag in &args.drop_holidays {
            let date = parse_date(flag)?;
            if calendar.remove(date).is_none() {
                println!("Warning: {} is not a holiday", date);
            }
        }
        service.set_holidays(calendar);
    }

    let selected: Vec<&EmployeeAttendance> = match &args.employee {
        Some(name) => {
            let name = resolve_employee(&service, name)?;
            service.employee(&name).into_iter().collect()
        }
        None => service.employees().collect(),
    };

    match day_view {
        Some(date) => {
            let days: Vec<_> = service
                .days_on(date)
                .into_iter()
                .filter(|d| selected.iter().any(|e| e.employee == d.employee))
                .collect();
            report::print_date(date, &days, service.calendar());
        }
        None => {
            for employee in &selected {
                if let Some(summary) = service.summary(&employee.employee, &window) {
                    report::print_employee(&employee.employee, employee.within(&window), &summary, service.calendar());
                }
            }
        }
    }

    if let Some(target) = &args.export {
        export_reports(&service, &selected, &window, target)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Report(args) => run_report(&cli.home, args)?,
        Commands::Summary { file, weekend, window } => {
            let window = window.window()?;
            let service = load_service(&cli.home, &file, weekend.as_deref())?;
            if let Some((start, end)) = service.date_range() {
                let start = window.from.map_or(start, |from| from.max(start));
                let end = window.to.map_or(end, |to| to.min(end));
                println!("Period: {} - {}", start, end);
            }
            println!("{}", report::overview_table(&service.all_summaries(&window)));
        }
        Commands::Holidays { action } => {
            let repo = FileHolidayRepository::new(cli.home.clone())?;
            match action {
                HolidayAction::List => {
                    let calendar = repo.calendar()?;
                    if calendar.is_empty() {
                        println!("No holidays configured.");
                    }
                    for holiday in calendar.holidays() {
                        println!("{}  {:<4} {}", holiday.date, holiday.date.format("%a"), holiday.name);
                    }
                }
                HolidayAction::Add { date, name } => {
                    let holiday = Holiday::new(parse_date(&date)?, name.join(" "));
                    let date = holiday.date;
                    if repo.add(holiday)? {
                        println!("Holiday added: {}", date);
                    } else {
                        println!("Error: a holiday already exists on {}", date);
                    }
                }
                HolidayAction::Remove { date } => match repo.remove(parse_date(&date)?)? {
                    Some(holiday) => println!("Holiday removed: {} ({})", holiday.date, holiday.name),
                    None => println!("No holiday on {}", date),
                },
            }
        }
        Commands::Policy { action } => {
            let repo = FilePolicyRepository::new(cli.home.clone())?;
            let mut policy = repo.get()?;
            if let PolicyAction::Set {
                weekend,
                full_day,
                half_day,
            } = action
            {
                if let Some(days) = weekend {
                    policy.weekend_days = parse_weekend_days(&days)?;
                }
                if let Some(hours) = full_day {
                    policy.full_day_hours = hours;
                }
                if let Some(hours) = half_day {
                    policy.half_day_hours = hours;
                }
                repo.save(&policy)?;
            }
            println!("Full day:  {:.2}h", policy.full_day_hours);
            println!("Half day:  {:.2}h", policy.half_day_hours);
            let weekend: Vec<String> = policy.weekend_days.iter().map(|d| d.to_string()).collect();
            println!("Weekend:   {}", weekend.join(", "));
        }
    }
    Ok(())
}
