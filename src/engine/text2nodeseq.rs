use super::llm_client::{InferenceError, TextCompleter};
use super::prompt_builder::build_prompt;
use super::response_parser::parse_response;
use crate::config::settings::DEFAULT_MAX_NEW_TOKENS;
use crate::model::prompt_template::PromptTemplate;
use crate::model::vocabulary::NodeVocabulary;

/// Anything that turns a task description into node labels.
pub trait NodeSequenceModel {
    fn get_node_seq(&self, text: &str) -> Result<Vec<String>, InferenceError>;
}

/// Text-to-node-sequence model: prompt template and vocabulary around a completer.
///
/// Built once by the caller and passed by reference; the template and
/// vocabulary never change after construction.
pub struct Text2NodeSeq<C> {
    template: PromptTemplate,
    vocabulary: NodeVocabulary,
    completer: C,
    max_new_tokens: u32,
}

impl<C: TextCompleter> Text2NodeSeq<C> {
    pub fn new(template: PromptTemplate, vocabulary: NodeVocabulary, completer: C) -> Self {
        Self {
            template,
            vocabulary,
            completer,
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
        }
    }

    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    pub fn vocabulary(&self) -> &NodeVocabulary {
        &self.vocabulary
    }

    pub fn completer(&self) -> &C {
        &self.completer
    }

    pub fn max_new_tokens(&self) -> u32 {
        self.max_new_tokens
    }

    /// The exact text sent to the completer for `text`.
    pub fn prompt_for(&self, text: &str) -> String {
        build_prompt(text, &self.template, &self.vocabulary)
    }

    /// Builds the prompt, runs one completion and parses the continuation.
    /// Completer failures are returned as-is, without retry.
    pub fn get_node_seq(&self, text: &str) -> Result<Vec<String>, InferenceError> {
        let prompt = self.prompt_for(text);
        tracing::debug!(prompt_chars = prompt.len(), "built prompt");

        let continuation = self.completer.complete(&prompt, self.max_new_tokens)?;
        let nodes = parse_response(&continuation, &self.vocabulary);

        tracing::debug!(?nodes, "parsed node sequence");
        Ok(nodes)
    }
}

impl<C: TextCompleter> NodeSequenceModel for Text2NodeSeq<C> {
    fn get_node_seq(&self, text: &str) -> Result<Vec<String>, InferenceError> {
        Text2NodeSeq::get_node_seq(self, text)
    }
}

impl<M: NodeSequenceModel + ?Sized> NodeSequenceModel for &M {
    fn get_node_seq(&self, text: &str) -> Result<Vec<String>, InferenceError> {
        (**self).get_node_seq(text)
    }
}

/// Renders a node sequence as a literal list, e.g. `["[Delay]", "[Navigate]"]`.
pub fn format_node_seq(nodes: &[String]) -> String {
    format!("{nodes:?}")
}
