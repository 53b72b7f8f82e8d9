use std::path::PathBuf;

use super::evaluator::Evaluation;

#[derive(Debug, Clone)]
pub enum EngineCommand {
    Generate { text: String },
    Evaluate { examples_path: PathBuf },
    CheckConnection,
}

#[derive(Debug)]
pub enum EngineResponse {
    NodeSequence {
        prompt: String,
        nodes: Vec<String>,
    },

    Evaluated(Evaluation),

    Connection(String),

    Failed {
        command: &'static str,
        reason: String,
    },
}
