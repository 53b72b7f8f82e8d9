pub mod engine;
pub mod evaluator;
pub mod llm_client;
pub mod mock;
pub mod protocol;
pub mod text2nodeseq;

pub mod prompt_builder;
pub mod response_parser;
