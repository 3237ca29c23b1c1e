use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::model::holiday::{Holiday, HolidayCalendar};
use crate::repository::config_dir;
use crate::repository::traits::HolidayRepository;

const HOLIDAY_FILE_NAME: &str = "holidays.json";

/// Holiday set kept as a JSON array of `{date, name}`.
pub struct FileHolidayRepository {
    file_path: PathBuf,
}

impl FileHolidayRepository {
    /// Seeds the file with the default calendar on first use.
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = config_dir(base_dir)?;
        fs::create_dir_all(&path)?;
        path.push(HOLIDAY_FILE_NAME);

        let repo = FileHolidayRepository { file_path: path };
        if !repo.file_path.exists() {
            repo.write_calendar(&HolidayCalendar::default_2025())?;
        }
        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_calendar(&self) -> Result<HolidayCalendar> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("Could not open {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let calendar = serde_json::from_reader(reader)
            .with_context(|| format!("Invalid holiday file {}", self.file_path.display()))?;
        Ok(calendar)
    }

    fn write_calendar(&self, calendar: &HolidayCalendar) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, calendar)?;
        writer.flush()?;
        Ok(())
    }
}

impl HolidayRepository for FileHolidayRepository {
    fn calendar(&self) -> Result<HolidayCalendar> {
        self.read_calendar()
    }

    fn add(&self, holiday: Holiday) -> Result<bool> {
        let mut calendar = self.read_calendar()?;
        if !calendar.add(holiday) {
            return Ok(false);
        }
        self.write_calendar(&calendar)?;
        Ok(true)
    }

    fn remove(&self, date: NaiveDate) -> Result<Option<Holiday>> {
        let mut calendar = self.read_calendar()?;
        let removed = calendar.remove(date);
        if removed.is_some() {
            self.write_calendar(&calendar)?;
        }
        Ok(removed)
    }
}
