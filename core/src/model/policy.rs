use anyhow::{anyhow, bail, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

pub const FULL_DAY_HOURS: f64 = 8.0;
pub const HALF_DAY_HOURS: f64 = 4.0;

/// Thresholds and weekend days the classifier works against.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AttendancePolicy {
    pub full_day_hours: f64,
    pub half_day_hours: f64,
    pub weekend_days: Vec<Weekday>,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            full_day_hours: FULL_DAY_HOURS,
            half_day_hours: HALF_DAY_HOURS,
            weekend_days: vec![Weekday::Sat, Weekday::Sun],
        }
    }
}

impl AttendancePolicy {
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.weekend_days.contains(&date.weekday())
    }

    pub fn with_weekend_days(mut self, days: Vec<Weekday>) -> Self {
        self.weekend_days = days;
        self
    }

    /// Thresholds must be finite, positive, and half-day no larger than full-day.
    pub fn validate(&self) -> Result<()> {
        for (label, hours) in [("full-day", self.full_day_hours), ("half-day", self.half_day_hours)] {
            if !hours.is_finite() || hours <= 0.0 {
                bail!("The {} threshold must be a positive number of hours (got {})", label, hours);
            }
        }
        if self.half_day_hours > self.full_day_hours {
            bail!(
                "The half-day threshold ({}) cannot exceed the full-day threshold ({})",
                self.half_day_hours,
                self.full_day_hours
            );
        }
        Ok(())
    }
}

/// Parses a comma separated weekday list such as `fri,sat`.
pub fn parse_weekend_days(input: &str) -> Result<Vec<Weekday>> {
    let mut days = Vec::new();
    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let day: Weekday = token
            .parse()
            .map_err(|_| anyhow!("Invalid weekday: '{}'", token))?;
        if !days.contains(&day) {
            days.push(day);
        }
    }
    Ok(days)
}
