use std::env;
use std::time::Duration;

use punchcard_core::{ReasonSuggester, SuggestError, Suggestion, SuggestionRequest};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Reason suggestions from the Gemini `generateContent` endpoint.
pub struct GeminiSuggester {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiSuggester {
    /// `None` when `GEMINI_API_KEY` is unset or empty.
    pub fn from_env() -> Option<Self> {
        let api_key = env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty())?;
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .ok()?;
        Some(Self {
            client,
            api_key,
            model: DEFAULT_MODEL.to_string(),
        })
    }
}

fn prompt(employee: &str, requests: &[SuggestionRequest]) -> Result<String, SuggestError> {
    let records = serde_json::to_string_pretty(requests).map_err(|e| SuggestError::Malformed(e.to_string()))?;
    Ok(format!(
        "You are reviewing time-clock attendance for an employee named {employee}. \
A standard workday is 8 hours. Each record below was flagged for review.\n\
For every record give a short descriptive status (Full Day, Absent, Short Hours or Half Day) \
and a brief plausible reason. Hours within a few minutes of 8 count as a Full Day. \
Zero hours on a workday is Absent. At least 4 hours but under 8 is Short Hours. \
Anything above zero and under 4 is Half Day.\n\n\
Records:\n{records}\n\n\
Reply with a JSON array only. Each element must have the keys \
\"date\" (YYYY-MM-DD), \"suggestedStatus\" and \"suggestedReason\"."
    ))
}

fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": { "responseMimeType": "application/json" }
    })
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

fn parse_response(body: &str) -> Result<Vec<Suggestion>, SuggestError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| SuggestError::Malformed(e.to_string()))?;
    let text: String = response
        .candidates
        .first()
        .map(|c| c.content.parts.iter().map(|p| p.text.as_str()).collect())
        .ok_or_else(|| SuggestError::Malformed("response has no candidates".to_string()))?;

    let trimmed = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();
    serde_json::from_str(trimmed).map_err(|e| SuggestError::Malformed(e.to_string()))
}

impl ReasonSuggester for GeminiSuggester {
    fn suggest(&self, employee: &str, requests: &[SuggestionRequest]) -> Result<Vec<Suggestion>, SuggestError> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!("{}/{}:generateContent", ENDPOINT, self.model);
        debug!(employee, records = requests.len(), model = %self.model, "requesting reason suggestions");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(&prompt(employee, requests)?))
            .send()
            .map_err(|e| SuggestError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response.text().map_err(|e| SuggestError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(SuggestError::Transport(format!("HTTP {}: {}", status, body.trim())));
        }
        parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use punchcard_core::Status;

    #[test]
    fn test_prompt_names_employee_and_records() {
        let requests = vec![SuggestionRequest {
            date: NaiveDate::from_ymd_opt(2025, 1, 7).unwrap(),
            status: Status::Absent,
            work_hours: "0.00".to_string(),
        }];
        let text = prompt("Dolly", &requests).unwrap();
        assert!(text.contains("Dolly"));
        assert!(text.contains("\"date\": \"2025-01-07\""));
        assert!(text.contains("\"workHours\": \"0.00\""));

        let body = request_body(&text);
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["contents"][0]["parts"][0]["text"], text.as_str());
    }

    #[test]
    fn test_parse_response_reads_suggestions() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{
                    "text": "```json\n[{\"date\":\"2025-01-07\",\"suggestedStatus\":\"Absent\",\"suggestedReason\":\"No check-in record found\"}]\n```"
                }]}
            }]
        })
        .to_string();
        let suggestions = parse_response(&body).unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].date, NaiveDate::from_ymd_opt(2025, 1, 7).unwrap());
        assert_eq!(suggestions[0].suggested_reason, "No check-in record found");
    }

    #[test]
    fn test_parse_response_rejects_garbage() {
        assert!(matches!(parse_response("{}"), Err(SuggestError::Malformed(_))));
        let body = json!({ "candidates": [{ "content": { "parts": [{ "text": "not json" }] } }] }).to_string();
        assert!(matches!(parse_response(&body), Err(SuggestError::Malformed(_))));
    }
}
