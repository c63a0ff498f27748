//! AI-assisted task prioritization.
//!
//! Sends the current task titles and active goals to the generative-
//! language service and interprets the free-text reply as a
//! comma-separated reordering of the titles. There is no retry, no
//! backoff and no partial application: any failure leaves the task
//! order untouched and surfaces as a [`PrioritizeError`].

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PrioritizeError;
use crate::storage::PrioritizerConfig;

/// Environment variable holding the service API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Client for the generative-language ranking call.
pub struct Prioritizer {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl Prioritizer {
    /// Create a client with an explicit API key.
    pub fn new(api_key: impl Into<String>, config: &PrioritizerConfig) -> Result<Self, PrioritizeError> {
        url::Url::parse(&config.base_url).map_err(|e| PrioritizeError::InvalidEndpoint {
            url: config.base_url.clone(),
            message: e.to_string(),
        })?;
        Ok(Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client reading the API key from `GEMINI_API_KEY`.
    pub fn from_env(config: &PrioritizerConfig) -> Result<Self, PrioritizeError> {
        let api_key =
            std::env::var(API_KEY_ENV).map_err(|_| PrioritizeError::MissingApiKey(API_KEY_ENV))?;
        Self::new(api_key, config)
    }

    /// The ranking instruction sent to the service.
    pub fn build_prompt(titles: &[String], goals: &[String]) -> String {
        format!(
            "Given these tasks: {} and these goals: {}, prioritize the tasks based on their relevance to achieving the goals.",
            titles.join(", "),
            goals.join(", ")
        )
    }

    /// Interpret a free-text reply as a comma-separated title sequence.
    ///
    /// Segments are trimmed of whitespace and trailing periods; empty
    /// segments are dropped. No validation against the actual task list
    /// happens here -- matching is the store's concern.
    pub fn parse_ordering(text: &str) -> Vec<String> {
        text.split(',')
            .map(|s| s.trim().trim_end_matches('.').trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Request a priority ordering for `titles` against `goals`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-success HTTP status, or a reply
    /// with no usable text. The caller leaves the task order unchanged
    /// in every failure case.
    pub async fn rank(
        &self,
        titles: &[String],
        goals: &[String],
    ) -> Result<Vec<String>, PrioritizeError> {
        let prompt = Self::build_prompt(titles, goals);
        debug!(tasks = titles.len(), goals = goals.len(), "requesting priority ordering");
        let text = self.request(&prompt).await?;
        let ordering = Self::parse_ordering(&text);
        if ordering.is_empty() {
            return Err(PrioritizeError::EmptyResponse);
        }
        debug!(titles = ordering.len(), "received priority ordering");
        Ok(ordering)
    }

    /// Make a generateContent request and return the first candidate text.
    async fn request(&self, prompt: &str) -> Result<String, PrioritizeError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PrioritizeError::Status { status, body });
        }

        let response: GenerateContentResponse = response.json().await?;
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(PrioritizeError::EmptyResponse)
    }
}
