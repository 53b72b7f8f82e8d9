use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::engine::llm_client::CompletionApi;
use crate::model::prompt_template::TemplateFields;

pub const DEFAULT_BASE_URL: &str = "http://localhost:1234/v1";
pub const DEFAULT_MODEL: &str = "local-model";
pub const DEFAULT_MAX_NEW_TOKENS: u32 = 100;

/// Everything needed to build a model: where the server is, how to call it,
/// and which documents describe the prompt and the node vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub model: String,
    pub api: CompletionApi,
    pub api_key: Option<String>,

    /// Tokens the model may generate beyond the prompt
    pub max_new_tokens: u32,
    pub temperature: f32,

    pub prompt_conf: PathBuf,
    pub nodes: PathBuf,
    pub examples: PathBuf,
    pub template_fields: TemplateFields,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            api: CompletionApi::default(),
            api_key: None,

            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
            temperature: 0.0,

            prompt_conf: "prompt_conf.yml".into(),
            nodes: "nodes.yml".into(),
            examples: "examples.yml".into(),
            template_fields: TemplateFields::default(),
        }
    }
}

/// Values that take precedence over the settings file, e.g. from CLI flags
/// or environment variables. `None` keeps whatever the file (or the default) says.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api: Option<CompletionApi>,
    pub api_key: Option<String>,
    pub max_new_tokens: Option<u32>,
    pub prompt_conf: Option<PathBuf>,
    pub nodes: Option<PathBuf>,
    pub template_fields: Option<TemplateFields>,
}

impl Settings {
    pub fn apply_overrides(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(v) = overrides.base_url {
            self.base_url = v;
        }
        if let Some(v) = overrides.model {
            self.model = v;
        }
        if let Some(v) = overrides.api {
            self.api = v;
        }
        if let Some(v) = overrides.api_key {
            self.api_key = Some(v);
        }
        if let Some(v) = overrides.max_new_tokens {
            self.max_new_tokens = v;
        }
        if let Some(v) = overrides.prompt_conf {
            self.prompt_conf = v;
        }
        if let Some(v) = overrides.nodes {
            self.nodes = v;
        }
        if let Some(v) = overrides.template_fields {
            self.template_fields = v;
        }
        self
    }
}
