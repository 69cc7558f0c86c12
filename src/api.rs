//! Client for the problems API.
//!
//! Everything coming off the wire is normalised here, so the rest of the
//! program only ever sees well-formed `ProblemSummary` values.

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::models::problem::id_from_value;
use crate::models::{Difficulty, ProblemDetail, ProblemSummary, SolvedStatus, parse_timestamp};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A problem record exactly as the server sends it.
#[derive(Debug, Deserialize)]
struct RawProblem {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    acceptance_rate: Option<f64>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    expiration_date: Option<String>,
}

impl RawProblem {
    fn into_summary(self) -> Option<ProblemSummary> {
        let Some(id) = id_from_value(&self.id) else {
            tracing::warn!("skipping problem without an id");
            return None;
        };

        let difficulty = match self.difficulty.as_deref().and_then(Difficulty::parse) {
            Some(d) => d,
            None => {
                tracing::warn!(
                    id = %id,
                    difficulty = ?self.difficulty,
                    "skipping problem with unknown difficulty"
                );
                return None;
            }
        };

        let acceptance_rate = match self.acceptance_rate {
            Some(rate) if (0.0..=100.0).contains(&rate) => Some(rate),
            Some(rate) => {
                tracing::debug!(id = %id, rate, "acceptance rate out of range, treating as unknown");
                None
            }
            None => None,
        };

        let status = self
            .status
            .as_deref()
            .and_then(SolvedStatus::parse)
            .unwrap_or_default();

        let expires_at = self.expiration_date.as_deref().and_then(|raw| {
            let parsed = parse_timestamp(raw);
            if parsed.is_none() {
                tracing::debug!(id = %id, raw, "ignoring unparseable expiration date");
            }
            parsed
        });

        Some(ProblemSummary {
            name: self.name.or(self.title).unwrap_or_default(),
            id,
            difficulty,
            acceptance_rate,
            status,
            expires_at,
        })
    }
}

/// Decodes a `GET /problems/` body into summaries, dropping records that
/// cannot be represented and repeated ids.
pub fn parse_problem_list(body: &str) -> Result<Vec<ProblemSummary>, ApiError> {
    let raw: Vec<RawProblem> = serde_json::from_str(body)?;
    let mut seen = HashSet::new();

    let problems: Vec<ProblemSummary> = raw
        .into_iter()
        .filter_map(RawProblem::into_summary)
        .filter(|p| {
            let fresh = seen.insert(p.id.clone());
            if !fresh {
                tracing::warn!(id = %p.id, "skipping duplicate problem id");
            }
            fresh
        })
        .collect();

    Ok(problems)
}

pub struct ApiClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("problist/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn problems_url(&self) -> String {
        format!("{}/problems/", self.base_url)
    }

    pub fn problem_url(&self, id: &str) -> String {
        format!("{}/problems/{}", self.base_url, id)
    }

    pub fn fetch_problems(&self) -> Result<Vec<ProblemSummary>, ApiError> {
        let body = self.get(&self.problems_url())?;
        let problems = parse_problem_list(&body)?;
        tracing::debug!(count = problems.len(), "loaded problem list");
        Ok(problems)
    }

    pub fn fetch_problem(&self, id: &str) -> Result<ProblemDetail, ApiError> {
        let body = self.get(&self.problem_url(id))?;
        Ok(serde_json::from_str(&body)?)
    }

    fn get(&self, url: &str) -> Result<String, ApiError> {
        tracing::debug!(url, "GET");
        let response = self.http.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text()?)
    }
}

/// Fetches the list once for a view. A failed fetch is logged and yields an
/// empty list.
pub fn load_problems(client: &ApiClient) -> Vec<ProblemSummary> {
    or_empty(client.fetch_problems(), &client.problems_url())
}

fn or_empty(result: Result<Vec<ProblemSummary>, ApiError>, url: &str) -> Vec<ProblemSummary> {
    match result {
        Ok(problems) => problems,
        Err(e) => {
            tracing::warn!("could not load problems from {}: {}", url, e);
            Vec::new()
        }
    }
}
