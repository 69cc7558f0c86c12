use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use clap::ValueEnum;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::difficulty::Difficulty;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolvedStatus {
    Solved,
    #[default]
    #[value(alias = "not_solved")]
    NotSolved,
}

impl SolvedStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            SolvedStatus::Solved => "Solved",
            SolvedStatus::NotSolved => "Not Solved",
        }
    }

    pub fn parse(s: &str) -> Option<SolvedStatus> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solved" => Some(SolvedStatus::Solved),
            "not_solved" | "not-solved" | "unsolved" => Some(SolvedStatus::NotSolved),
            _ => None,
        }
    }
}

/// One row of the problem list. Never mutated once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemSummary {
    pub id: String,
    pub name: String,
    pub difficulty: Difficulty,
    /// Percentage in [0, 100]; `None` when the server does not know.
    pub acceptance_rate: Option<f64>,
    pub status: SolvedStatus,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ProblemSummary {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

#[cfg(test)]
impl ProblemSummary {
    pub fn new(id: impl Into<String>, name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            difficulty,
            acceptance_rate: None,
            status: SolvedStatus::NotSolved,
            expires_at: None,
        }
    }

    pub fn with_status(mut self, status: SolvedStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_acceptance_rate(mut self, rate: f64) -> Self {
        self.acceptance_rate = Some(rate);
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub output: String,
}

/// Full problem as served by `GET /problems/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProblemDetail {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub input_format: String,
    #[serde(default)]
    pub output_format: String,
    #[serde(default)]
    pub sample_input: String,
    #[serde(default)]
    pub sample_output: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<String>,
    #[serde(default)]
    pub acceptance_rate: Option<f64>,
    #[serde(default)]
    pub testcases: Vec<TestCase>,
}

impl ProblemDetail {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.creation_date.as_deref().and_then(parse_timestamp)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiration_date.as_deref().and_then(parse_timestamp)
    }
}

/// Accepts RFC 3339, naive ISO-8601 (read as UTC) or a bare date.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Ids arrive as strings from some endpoints and integers from others.
pub fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    id_from_value(&value).ok_or_else(|| de::Error::custom("id must be a string or a number"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_parse() {
        assert_eq!(SolvedStatus::parse("solved"), Some(SolvedStatus::Solved));
        assert_eq!(SolvedStatus::parse("NOT_SOLVED"), Some(SolvedStatus::NotSolved));
        assert_eq!(SolvedStatus::parse("pending"), None);
        assert_eq!(SolvedStatus::default(), SolvedStatus::NotSolved);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2025-03-01T12:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-01T14:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-01T12:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-01 12:30:00.000"), Some(expected));
        assert_eq!(
            parse_timestamp("2025-03-01"),
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("next tuesday"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_is_expired() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut problem = ProblemSummary::new("1", "Two Sum", Difficulty::Easy);
        assert!(!problem.is_expired(now));

        problem.expires_at = Some(Utc.with_ymd_and_hms(2025, 5, 31, 0, 0, 0).unwrap());
        assert!(problem.is_expired(now));

        problem.expires_at = Some(Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap());
        assert!(!problem.is_expired(now));
    }

    #[test]
    fn test_detail_accepts_numeric_ids() {
        let json = r#"{
            "id": 42,
            "title": "Two Sum",
            "description": "Find two numbers.",
            "difficulty": "Easy",
            "expiration_date": null,
            "acceptance_rate": 47.5,
            "testcases": [{"id": 7, "input": "1 2", "output": "3"}]
        }"#;
        let detail: ProblemDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.id, "42");
        assert_eq!(detail.testcases[0].id, "7");
        assert_eq!(detail.sample_input, "");
        assert_eq!(detail.expires_at(), None);
    }

    #[test]
    fn test_detail_rejects_missing_id() {
        let json = r#"{"id": null, "title": "x", "difficulty": "Hard"}"#;
        assert!(serde_json::from_str::<ProblemDetail>(json).is_err());
    }
}
