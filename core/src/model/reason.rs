use std::fmt;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::input::expand_key;
use crate::model::policy::AttendancePolicy;

/// Quick reasons a reviewer can attach to a day.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ReasonCode {
    OutOfOffice,
    SickLeave,
    ApprovedLeave,
    ClientMeeting,
    ForgotToPunchOut,
    Other,
}

impl ReasonCode {
    pub const ALL: [ReasonCode; 6] = [
        ReasonCode::OutOfOffice,
        ReasonCode::SickLeave,
        ReasonCode::ApprovedLeave,
        ReasonCode::ClientMeeting,
        ReasonCode::ForgotToPunchOut,
        ReasonCode::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReasonCode::OutOfOffice => "Out of Office",
            ReasonCode::SickLeave => "Sick Leave",
            ReasonCode::ApprovedLeave => "Approved Leave",
            ReasonCode::ClientMeeting => "Client Meeting",
            ReasonCode::ForgotToPunchOut => "Forgot to Punch Out",
            ReasonCode::Other => "Other",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ReasonCode::OutOfOffice => "out-of-office",
            ReasonCode::SickLeave => "sick-leave",
            ReasonCode::ApprovedLeave => "approved-leave",
            ReasonCode::ClientMeeting => "client-meeting",
            ReasonCode::ForgotToPunchOut => "forgot-to-punch-out",
            ReasonCode::Other => "other",
        }
    }

    /// Hours credited when the code is picked without an explicit amount.
    pub fn default_credit(&self, policy: &AttendancePolicy) -> Option<f64> {
        match self {
            ReasonCode::OutOfOffice
            | ReasonCode::SickLeave
            | ReasonCode::ApprovedLeave
            | ReasonCode::ClientMeeting => Some(policy.full_day_hours),
            ReasonCode::ForgotToPunchOut | ReasonCode::Other => None,
        }
    }

    /// Accepts a label ("Sick Leave") or a unique key prefix ("sick").
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if let Some(code) = Self::ALL
            .iter()
            .find(|c| c.label().eq_ignore_ascii_case(input))
        {
            return Ok(*code);
        }
        let keys: Vec<&str> = Self::ALL.iter().map(|c| c.key()).collect();
        let key = expand_key(input, &keys)?;
        Self::ALL
            .into_iter()
            .find(|c| c.key() == key)
            .ok_or_else(|| anyhow!("Unknown reason: '{}'", input))
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
