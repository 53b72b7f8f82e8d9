use serde::{Deserialize, Serialize};

/// A labeled request from the examples document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub prompt: String,

    /// Expected node labels, e.g. `["[Click]", "[Delay]"]`
    pub nodes: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated: Option<Vec<String>>,
}

impl Example {
    pub fn new(prompt: impl Into<String>, nodes: Vec<String>) -> Self {
        Self {
            prompt: prompt.into(),
            nodes,
            generated: None,
        }
    }
}
