use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;

use crate::model::policy::AttendancePolicy;
use crate::model::reason::ReasonCode;
use crate::service::edit::DayEdit;
use crate::time::parse_observed_date;

const EDIT_KEYS: [&str; 4] = ["employee", "date", "reason", "hours"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub text: String,
    pub fields: Vec<(String, String)>,
}

/// Splits `key:value` tokens from free words, keeping their order.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut words = Vec::new();
    let mut fields = Vec::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                fields.push((key.to_string(), value.to_string()));
                continue;
            }
        }
        words.push(arg.as_str());
    }

    ParsedInput {
        text: words.join(" "),
        fields,
    }
}

/// Resolves `key` to the one candidate it names, exactly or by prefix.
/// Matching ignores case; the candidate's own spelling is returned.
pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    let lowered = key.to_lowercase();

    if let Some(exact) = candidates.iter().find(|c| c.to_lowercase() == lowered) {
        return Ok(exact.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|c| c.to_lowercase().starts_with(&lowered))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// A day correction as typed on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSpec {
    pub employee: String,
    pub date: NaiveDate,
    pub edit: DayEdit,
}

/// Parses `emp:<name> date:<date> reason:<code> hours:<n|none> note words...`.
///
/// Without `hours`, the reason code's default credit is used; `hours:none`
/// leaves the clocked hours alone.
pub fn parse_edit_spec(spec: &str, policy: &AttendancePolicy) -> Result<EditSpec> {
    let tokens: Vec<String> = spec.split_whitespace().map(String::from).collect();
    let parsed = parse_args(&tokens);

    let mut employee = None;
    let mut date = None;
    let mut reason = None;
    let mut hours: Option<Option<f64>> = None;

    for (key, value) in parsed.fields {
        match expand_key(&key, &EDIT_KEYS)?.as_str() {
            "employee" => employee = Some(value),
            "date" => {
                date = Some(
                    parse_observed_date(&value)
                        .ok_or_else(|| anyhow!("Invalid date in edit: '{}'", value))?,
                )
            }
            "reason" => reason = Some(ReasonCode::parse(&value)?),
            "hours" => {
                hours = Some(if value.eq_ignore_ascii_case("none") {
                    None
                } else {
                    let credit = value
                        .parse::<f64>()
                        .ok()
                        .filter(|h| h.is_finite() && *h >= 0.0)
                        .ok_or_else(|| anyhow!("Invalid hours in edit: '{}'", value))?;
                    Some(credit)
                })
            }
            other => bail!("Unsupported edit key: '{}'", other),
        }
    }

    let Some(employee) = employee else {
        bail!("Edit is missing 'emp:<name>'");
    };
    let Some(date) = date else {
        bail!("Edit is missing 'date:<YYYY-MM-DD>'");
    };
    let credit_hours = match hours {
        Some(explicit) => explicit,
        None => reason.and_then(|r| r.default_credit(policy)),
    };

    Ok(EditSpec {
        employee,
        date,
        edit: DayEdit {
            reason,
            note: parsed.text,
            credit_hours,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_parse_args_keeps_order() {
        let parsed = parse_args(&args(&["Doctor", "emp:Dolly", "visit", "date:2025-01-03", ":x"]));
        assert_eq!(parsed.text, "Doctor visit :x");
        assert_eq!(
            parsed.fields,
            vec![
                ("emp".to_string(), "Dolly".to_string()),
                ("date".to_string(), "2025-01-03".to_string()),
            ]
        );
    }

    #[test]
    fn test_expand_key() {
        let candidates = vec!["employee", "date", "reason", "hours"];

        assert_eq!(expand_key("emp", &candidates).unwrap(), "employee");
        assert_eq!(expand_key("D", &candidates).unwrap(), "date");
        assert_eq!(expand_key("hours", &candidates).unwrap(), "hours");
        assert!(expand_key("x", &candidates).is_err());

        let names = vec!["Dolly", "Dominic", "Sam Lee"];
        assert!(expand_key("do", &names).is_err());
        assert_eq!(expand_key("dol", &names).unwrap(), "Dolly");
        assert_eq!(expand_key("sam", &names).unwrap(), "Sam Lee");
    }

    #[test]
    fn test_parse_edit_spec_uses_default_credit() {
        let policy = AttendancePolicy::default();
        let spec = parse_edit_spec("emp:dol date:2025-01-03 reason:sick Flu", &policy).unwrap();
        assert_eq!(spec.employee, "dol");
        assert_eq!(spec.date, NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
        assert_eq!(spec.edit.reason, Some(ReasonCode::SickLeave));
        assert_eq!(spec.edit.note, "Flu");
        assert_eq!(spec.edit.credit_hours, Some(8.0));
    }

    #[test]
    fn test_parse_edit_spec_explicit_hours() {
        let policy = AttendancePolicy::default();
        let spec = parse_edit_spec("emp:Dolly date:2025-01-03 reason:oth hours:none Left early", &policy).unwrap();
        assert_eq!(spec.edit.credit_hours, None);
        assert_eq!(spec.edit.note, "Left early");

        let spec = parse_edit_spec("emp:Dolly d:2025-01-03 h:6.5", &policy).unwrap();
        assert_eq!(spec.edit.reason, None);
        assert_eq!(spec.edit.credit_hours, Some(6.5));
    }

    #[test]
    fn test_parse_edit_spec_errors() {
        let policy = AttendancePolicy::default();
        assert!(parse_edit_spec("date:2025-01-03 reason:sick", &policy).is_err());
        assert!(parse_edit_spec("emp:Dolly reason:sick", &policy).is_err());
        assert!(parse_edit_spec("emp:Dolly date:never", &policy).is_err());
        assert!(parse_edit_spec("emp:Dolly date:2025-01-03 hours:lots", &policy).is_err());
        assert!(parse_edit_spec("emp:Dolly date:2025-01-03 hours:inf", &policy).is_err());
        assert!(parse_edit_spec("emp:Dolly date:2025-01-03 hours:NaN", &policy).is_err());
        assert!(parse_edit_spec("emp:Dolly date:2025-01-03 hours:-2", &policy).is_err());
        assert!(parse_edit_spec("emp:Dolly date:2025-01-03 mood:good", &policy).is_err());
    }
}
