use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Wire shape: `{"date": "YYYY-MM-DD", "name": "..."}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

impl Holiday {
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
        }
    }
}

/// The public holiday set. At most one holiday per date.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(from = "Vec<Holiday>", into = "Vec<Holiday>")]
pub struct HolidayCalendar {
    entries: BTreeMap<NaiveDate, String>,
}

impl HolidayCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false, leaving the calendar untouched, if the date is taken.
    pub fn add(&mut self, holiday: Holiday) -> bool {
        if self.entries.contains_key(&holiday.date) {
            return false;
        }
        self.entries.insert(holiday.date, holiday.name);
        true
    }

    pub fn remove(&mut self, date: NaiveDate) -> Option<Holiday> {
        self.entries
            .remove(&date)
            .map(|name| Holiday::new(date, name))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.entries.contains_key(&date)
    }

    pub fn name(&self, date: NaiveDate) -> Option<&str> {
        self.entries.get(&date).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn holidays(&self) -> Vec<Holiday> {
        self.entries
            .iter()
            .map(|(date, name)| Holiday::new(*date, name.clone()))
            .collect()
    }

    pub fn within(&self, start: NaiveDate, end: NaiveDate) -> Vec<Holiday> {
        self.entries
            .range(start..=end)
            .map(|(date, name)| Holiday::new(*date, name.clone()))
            .collect()
    }

    /// UAE public holidays for 2025.
    pub fn default_2025() -> Self {
        let seed = [
            (1, 1, "New Year's Day"),
            (3, 30, "Eid al-Fitr 1"),
            (3, 31, "Eid al-Fitr 2"),
            (4, 1, "Eid al-Fitr 3"),
            (6, 5, "Arafat Day"),
            (6, 6, "Eid al-Adha 1"),
            (6, 7, "Eid al-Adha 2"),
            (6, 8, "Eid al-Adha 3"),
            (6, 26, "Islamic New Year"),
            (9, 4, "Prophet Muhammad's Birthday"),
            (12, 2, "UAE National Day 1"),
            (12, 3, "UAE National Day 2"),
        ];
        seed.into_iter()
            .filter_map(|(m, d, name)| NaiveDate::from_ymd_opt(2025, m, d).map(|date| Holiday::new(date, name)))
            .collect()
    }
}

impl FromIterator<Holiday> for HolidayCalendar {
    fn from_iter<I: IntoIterator<Item = Holiday>>(iter: I) -> Self {
        let mut calendar = HolidayCalendar::new();
        for holiday in iter {
            if !calendar.add(holiday.clone()) {
                tracing::debug!(date = %holiday.date, name = %holiday.name, "duplicate holiday date ignored");
            }
        }
        calendar
    }
}

impl From<Vec<Holiday>> for HolidayCalendar {
    fn from(holidays: Vec<Holiday>) -> Self {
        holidays.into_iter().collect()
    }
}

impl From<HolidayCalendar> for Vec<Holiday> {
    fn from(calendar: HolidayCalendar) -> Self {
        calendar.holidays()
    }
}
