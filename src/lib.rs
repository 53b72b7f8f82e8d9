//! Map a free-text task description to an ordered sequence of workflow nodes
//! drawn from a closed vocabulary, using a pretrained language model.
//!
//! The model is reached through [`TextCompleter`]; [`Text2NodeSeq`] builds the
//! prompt, runs one completion and keeps the vocabulary nodes the reply names.
//! [`evaluate`] scores a model against a labeled example set.

pub mod config;
pub mod engine;
pub mod model;

pub use config::{LoadError, Settings, SettingsOverrides};
pub use engine::evaluator::{evaluate, evaluate_detailed, score_example, EvaluateError, Evaluation, ExampleScore};
pub use engine::llm_client::{CompletionApi, HttpCompleter, InferenceError, TextCompleter};
pub use engine::mock::{CompletionCall, MockCompleter};
pub use engine::prompt_builder::build_prompt;
pub use engine::response_parser::parse_response;
pub use engine::text2nodeseq::{format_node_seq, NodeSequenceModel, Text2NodeSeq};
pub use model::example::Example;
pub use model::metrics::Metrics;
pub use model::prompt_template::{PromptTemplate, TemplateFields};
pub use model::vocabulary::{NodeEntry, NodeVocabulary};
