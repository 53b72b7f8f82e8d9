use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::Settings;

/// Which OpenAI-compatible endpoint produces the continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CompletionApi {
    /// `POST /completions`: raw text continuation of the prompt.
    #[default]
    Completions,
    /// `POST /chat/completions`: the prompt is sent as a single user message.
    Chat,
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("request to model server failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model server returned no choices")]
    EmptyResponse,
    #[error("{0}")]
    Backend(String),
}

/// Turns prompt text into continuation text.
///
/// Implementations must stop after `max_new_tokens` generated tokens and must
/// not retry on failure.
pub trait TextCompleter {
    fn complete(&self, prompt: &str, max_new_tokens: u32) -> Result<String, InferenceError>;

    /// Human-readable status of the backend, e.g. `"Connected (3 models available)"`.
    fn check_connection(&self) -> Result<String, InferenceError> {
        Ok("Ready".to_string())
    }
}

impl<T: TextCompleter + ?Sized> TextCompleter for &T {
    fn complete(&self, prompt: &str, max_new_tokens: u32) -> Result<String, InferenceError> {
        (**self).complete(prompt, max_new_tokens)
    }

    fn check_connection(&self) -> Result<String, InferenceError> {
        (**self).check_connection()
    }
}

impl<T: TextCompleter + ?Sized> TextCompleter for Box<T> {
    fn complete(&self, prompt: &str, max_new_tokens: u32) -> Result<String, InferenceError> {
        (**self).complete(prompt, max_new_tokens)
    }

    fn check_connection(&self) -> Result<String, InferenceError> {
        (**self).check_connection()
    }
}

#[derive(Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
pub struct CompletionChoice {
    pub text: String,
}

#[derive(Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Deserialize)]
pub struct Choice {
    pub message: ChatMessageResponse,
}

#[derive(Deserialize)]
pub struct ChatMessageResponse {
    #[serde(default)]
    pub content: Option<String>,
}

/// Blocking client for an OpenAI-compatible server (LM Studio, llama.cpp, vLLM, ...).
pub struct HttpCompleter {
    client: Client,
    base_url: String,
    model: String,
    api: CompletionApi,
    api_key: Option<String>,
    temperature: f32,
}

impl HttpCompleter {
    /// `base_url` includes the API prefix, e.g. `http://localhost:1234/v1`.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self, InferenceError> {
        // No request timeout: generation length is capped by max_new_tokens.
        let client = Client::builder().timeout(None::<Duration>).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api: CompletionApi::default(),
            api_key: None,
            temperature: 0.0,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, InferenceError> {
        Ok(Self::new(&settings.base_url, &settings.model)?
            .with_api(settings.api)
            .with_api_key(settings.api_key.clone())
            .with_temperature(settings.temperature))
    }

    pub fn with_api(mut self, api: CompletionApi) -> Self {
        self.api = api;
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, InferenceError> {
        let mut req = self.client.post(self.endpoint(path)).json(body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        Ok(req.send()?.error_for_status()?.json::<R>()?)
    }
}

impl TextCompleter for HttpCompleter {
    fn complete(&self, prompt: &str, max_new_tokens: u32) -> Result<String, InferenceError> {
        tracing::debug!(
            url = %self.base_url,
            api = ?self.api,
            prompt_chars = prompt.len(),
            max_new_tokens,
            "requesting completion"
        );

        let text = match self.api {
            CompletionApi::Completions => {
                let req = CompletionRequest {
                    model: &self.model,
                    prompt,
                    max_tokens: max_new_tokens,
                    temperature: self.temperature,
                };
                let resp: CompletionResponse = self.post("completions", &req)?;
                resp.choices
                    .into_iter()
                    .next()
                    .ok_or(InferenceError::EmptyResponse)?
                    .text
            }
            CompletionApi::Chat => {
                let req = ChatCompletionRequest {
                    model: &self.model,
                    messages: vec![ChatMessage {
                        role: "user",
                        content: prompt,
                    }],
                    max_tokens: max_new_tokens,
                    temperature: self.temperature,
                };
                let resp: ChatCompletionResponse = self.post("chat/completions", &req)?;
                resp.choices
                    .into_iter()
                    .next()
                    .ok_or(InferenceError::EmptyResponse)?
                    .message
                    .content
                    .unwrap_or_default()
            }
        };

        tracing::debug!(continuation = %text, "model replied");
        Ok(text)
    }

    fn check_connection(&self) -> Result<String, InferenceError> {
        let mut req = self.client.get(self.endpoint("models"));
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        let resp: serde_json::Value = req.send()?.error_for_status()?.json()?;

        Ok(format!(
            "Connected ({} models available)",
            resp["data"].as_array().map(|a| a.len()).unwrap_or(0)
        ))
    }
}
