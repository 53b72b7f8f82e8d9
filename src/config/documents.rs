use std::path::Path;

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use super::LoadError;
use crate::model::example::Example;
use crate::model::prompt_template::{PromptTemplate, TemplateFields};
use crate::model::vocabulary::NodeVocabulary;

pub fn load_prompt_template(
    path: &Path,
    fields: TemplateFields,
) -> Result<PromptTemplate, LoadError> {
    let text = read_document(path)?;
    parse_prompt_template(&text, fields, &path.display().to_string())
}

pub fn load_vocabulary(path: &Path) -> Result<NodeVocabulary, LoadError> {
    let text = read_document(path)?;
    parse_vocabulary(&text, &path.display().to_string())
}

pub fn load_examples(path: &Path) -> Result<Vec<Example>, LoadError> {
    let text = read_document(path)?;
    parse_examples(&text, &path.display().to_string())
}

/// Parses a template document holding exactly three string fields.
///
/// `origin` names the document in error messages.
pub fn parse_prompt_template(
    text: &str,
    fields: TemplateFields,
    origin: &str,
) -> Result<PromptTemplate, LoadError> {
    let value: Value = parse_yaml(text, origin)?;

    match fields {
        TemplateFields::Positional => {
            let mapping = expect_mapping(&value, origin)?;
            if mapping.len() != 3 {
                return Err(invalid(
                    origin,
                    format!(
                        "expected exactly three fields (introduction, prefix, suffix), found {}",
                        mapping.len()
                    ),
                ));
            }

            let mut parts = Vec::with_capacity(3);
            for (key, field) in mapping {
                parts.push(string_field(key, field, origin)?);
            }
            let mut parts = parts.into_iter();

            Ok(PromptTemplate {
                introduction: parts.next().unwrap_or_default(),
                prefix: parts.next().unwrap_or_default(),
                suffix: parts.next().unwrap_or_default(),
            })
        }
        TemplateFields::Named => {
            let named: NamedTemplate =
                serde_yaml::from_value(value).map_err(|source| LoadError::ParseYaml {
                    path: origin.to_string(),
                    source,
                })?;

            Ok(PromptTemplate {
                introduction: named.introduction,
                prefix: named.prefix,
                suffix: named.suffix,
            })
        }
    }
}

/// Parses a `name: description` mapping, keeping document order.
pub fn parse_vocabulary(text: &str, origin: &str) -> Result<NodeVocabulary, LoadError> {
    let value: Value = parse_yaml(text, origin)?;
    let mapping = expect_mapping(&value, origin)?;

    let mut entries = Vec::with_capacity(mapping.len());
    for (key, description) in mapping {
        let Value::String(name) = key else {
            return Err(invalid(
                origin,
                format!("node names must be strings, found {}", describe(key)),
            ));
        };
        entries.push((name.clone(), string_field(key, description, origin)?));
    }

    tracing::debug!(path = %origin, nodes = entries.len(), "loaded node vocabulary");
    Ok(NodeVocabulary::new(entries))
}

pub fn parse_examples(text: &str, origin: &str) -> Result<Vec<Example>, LoadError> {
    let examples: Vec<Example> = parse_yaml(text, origin)?;
    tracing::debug!(path = %origin, examples = examples.len(), "loaded examples");
    Ok(examples)
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NamedTemplate {
    #[serde(alias = "intro")]
    introduction: String,
    prefix: String,
    suffix: String,
}

fn read_document(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn parse_yaml<T>(text: &str, origin: &str) -> Result<T, LoadError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_yaml::from_str(text).map_err(|source| LoadError::ParseYaml {
        path: origin.to_string(),
        source,
    })
}

fn expect_mapping<'a>(value: &'a Value, origin: &str) -> Result<&'a Mapping, LoadError> {
    value
        .as_mapping()
        .ok_or_else(|| invalid(origin, format!("expected a mapping, found {}", describe(value))))
}

fn string_field(key: &Value, value: &Value, origin: &str) -> Result<String, LoadError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(invalid(
            origin,
            format!(
                "field {} must be a string, found {}",
                describe(key),
                describe(other)
            ),
        )),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("'{s}'"),
        Value::Sequence(_) => "a list".into(),
        Value::Mapping(_) => "a mapping".into(),
        Value::Tagged(t) => format!("tagged value {}", t.tag),
    }
}

fn invalid(origin: &str, message: String) -> LoadError {
    LoadError::Invalid {
        path: origin.to_string(),
        message,
    }
}
