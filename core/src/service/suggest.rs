use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SuggestError;
use crate::model::day::{AttendanceDay, Status};

/// What the suggestion service is told about a flagged day.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub date: NaiveDate,
    pub status: Status,
    pub work_hours: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub date: NaiveDate,
    #[serde(default)]
    pub suggested_status: String,
    pub suggested_reason: String,
}

/// An optional service that proposes reasons for days needing review.
pub trait ReasonSuggester {
    fn suggest(&self, employee: &str, requests: &[SuggestionRequest]) -> Result<Vec<Suggestion>, SuggestError>;
}

/// Used when no credential is configured.
pub struct DisabledSuggester;

impl ReasonSuggester for DisabledSuggester {
    fn suggest(&self, _employee: &str, _requests: &[SuggestionRequest]) -> Result<Vec<Suggestion>, SuggestError> {
        Err(SuggestError::Unavailable)
    }
}

pub fn suggestion_requests(days: &[AttendanceDay]) -> Vec<SuggestionRequest> {
    days.iter()
        .filter(|d| d.status.needs_review())
        .map(|d| SuggestionRequest {
            date: d.date,
            status: d.status,
            work_hours: format!("{:.2}", d.work_hours),
        })
        .collect()
}

/// Copies `days`, writing each suggestion into the flagged day with its date.
/// Returns the new days and how many were enhanced.
pub fn merge_suggestions(days: &[AttendanceDay], suggestions: &[Suggestion]) -> (Vec<AttendanceDay>, usize) {
    let by_date: HashMap<NaiveDate, &Suggestion> = suggestions.iter().map(|s| (s.date, s)).collect();
    let mut enhanced = 0;
    let merged = days
        .iter()
        .map(|day| {
            let mut day = day.clone();
            if day.status.needs_review() {
                if let Some(suggestion) = by_date.get(&day.date) {
                    day.note = suggestion.suggested_reason.clone();
                    day.ai_enhanced = true;
                    enhanced += 1;
                }
            }
            day
        })
        .collect();
    (merged, enhanced)
}
