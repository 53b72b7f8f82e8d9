use serde::{Deserialize, Serialize};

/// The three text blocks wrapped around the node list and the user's request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub introduction: String,
    pub prefix: String,
    pub suffix: String,
}

/// How the fields of the template document are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TemplateFields {
    /// First, second and third entries in document order, whatever their keys.
    #[default]
    Positional,
    /// Keys `introduction` (or `intro`), `prefix` and `suffix`.
    Named,
}
