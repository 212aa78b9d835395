//! The client for the text completion service that writes the summaries.
//!
//! The service is any OpenAI-compatible `chat/completions` endpoint. Each
//! summary is a single request with a single user message, and the text of the
//! first choice is the answer.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::survey::*;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Something that turns a prompt into a text answer.
pub trait TextCompleter {
    fn complete(&self, prompt: &str) -> BSurveyResult<String>;
}

#[derive(Clone, Debug)]
pub struct CompletionSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl CompletionSettings {
    /// Reads `OPENAI_API_KEY`, `OPENAI_BASE_URL` and `OPENAI_MODEL`.
    pub fn from_env() -> BSurveyResult<CompletionSettings> {
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> BSurveyResult<CompletionSettings> {
        let api_key = var("OPENAI_API_KEY")
            .filter(|s| !s.trim().is_empty())
            .context(MissingApiKeySnafu {})?;
        let base_url = var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Ok(CompletionSettings {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

pub struct OpenAiCompleter {
    settings: CompletionSettings,
    http: reqwest::blocking::Client,
}

impl OpenAiCompleter {
    pub fn new(settings: CompletionSettings) -> BSurveyResult<OpenAiCompleter> {
        // No client-side timeout: the summaries of a large survey take a while.
        let http = reqwest::blocking::Client::builder()
            .user_agent("director-survey")
            .timeout(None::<Duration>)
            .build()
            .context(HttpClientSnafu {})?;
        Ok(OpenAiCompleter { settings, http })
    }
}

impl TextCompleter for OpenAiCompleter {
    fn complete(&self, prompt: &str) -> BSurveyResult<String> {
        let url = self.settings.completions_url();
        let request = ChatCompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };
        info!(
            "complete: sending {} characters to {}",
            prompt.len(),
            url
        );
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .json(&request)
            .send()
            .context(CompletionRequestSnafu { url: url.clone() })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(Box::new(SurveyError::CompletionStatus {
                status: status.as_u16(),
                body,
            }));
        }
        let response: ChatCompletionResponse = resp.json().context(ParsingCompletionSnafu {})?;
        debug!("complete: response id {:?}", response.id);
        first_message(response)
    }
}

fn first_message(response: ChatCompletionResponse) -> BSurveyResult<String> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .context(EmptyCompletionSnafu {})?;
    Ok(choice.message.content.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: Option<String>,
    pub choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionChoice {
    pub message: ChatCompletionMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionMessage {
    pub content: Option<String>,
}
