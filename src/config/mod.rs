//! Loading of the YAML documents (prompt template, node vocabulary, examples)
//! and of the application settings.

pub mod documents;
pub mod settings;
pub mod settings_io;

pub use documents::{load_examples, load_prompt_template, load_vocabulary};
pub use settings::{Settings, SettingsOverrides};
pub use settings_io::{load_settings, settings_path};

/// Error when a configuration document is missing or malformed. Always fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse YAML in {path}: {source}")]
    ParseYaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("failed to parse settings {path}: {source}")]
    ParseSettings {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid {path}: {message}")]
    Invalid { path: String, message: String },
}
