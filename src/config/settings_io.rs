use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::settings::Settings;
use super::LoadError;

const APP_DIR: &str = "text2nodeseq";
const SETTINGS_FILE: &str = "settings.json";

/// `<config_dir>/text2nodeseq/settings.json`, or `./settings.json` when the
/// platform has no config dir.
pub fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path.push(SETTINGS_FILE);
    path
}

/// Reads settings from `path`, or from [`settings_path`] when `None`.
///
/// A missing default file yields [`Settings::default`]; an explicitly given
/// path must exist. Fields absent from the file keep their defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, LoadError> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (settings_path(), false),
    };

    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound && !required => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(LoadError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    };

    serde_json::from_str(&content).map_err(|source| LoadError::ParseSettings {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::llm_client::CompletionApi;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "model": "codegemma-7b-it", "api": "chat" }"#).unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.model, "codegemma-7b-it");
        assert_eq!(settings.api, CompletionApi::Chat);
        assert_eq!(settings.max_new_tokens, 100);
        assert_eq!(settings.nodes, PathBuf::from("nodes.yml"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_settings(Some(&path)).unwrap_err();
        assert!(matches!(err, LoadError::ParseSettings { .. }));
    }

    #[test]
    fn settings_live_under_app_dir() {
        let path = settings_path();
        assert!(path.ends_with("text2nodeseq/settings.json"));
    }
}
