//! Quality metrics for a node-sequence model over a labeled example set.
//!
//! Precision and recall treat each sequence as a set of labels. Exact and near
//! match compare labels index by index over the shorter of the two sequences,
//! so a prediction that agrees with the whole expected sequence and then keeps
//! going still counts as exact.

use std::collections::HashSet;

use serde::Serialize;

use super::llm_client::InferenceError;
use super::text2nodeseq::NodeSequenceModel;
use crate::model::example::Example;
use crate::model::metrics::Metrics;

#[derive(Debug, thiserror::Error)]
pub enum EvaluateError {
    #[error("cannot compute metrics over an empty example set")]
    NoExamples,
    #[error("{metric} is undefined: its denominator is zero")]
    Undefined { metric: &'static str },
    #[error("inference failed on example {index}: {source}")]
    Inference {
        index: usize,
        #[source]
        source: InferenceError,
    },
}

/// Contribution of one example to the aggregate metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ExampleScore {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    /// Indices where predicted and expected hold the same label
    pub positional_matches: usize,
    pub exact: bool,
    pub near: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredExample {
    /// The input example with `generated` filled in.
    pub example: Example,
    pub score: ExampleScore,
}

#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub metrics: Metrics,
    pub examples: Vec<ScoredExample>,
}

pub fn score_example(expected: &[String], predicted: &[String]) -> ExampleScore {
    let expected_set: HashSet<&str> = expected.iter().map(String::as_str).collect();
    let predicted_set: HashSet<&str> = predicted.iter().map(String::as_str).collect();

    let positional_matches = predicted
        .iter()
        .zip(expected)
        .filter(|(p, e)| p == e)
        .count();

    ExampleScore {
        true_positives: expected_set.intersection(&predicted_set).count(),
        false_positives: predicted_set.difference(&expected_set).count(),
        false_negatives: expected_set.difference(&predicted_set).count(),
        positional_matches,
        exact: positional_matches == expected.len(),
        near: positional_matches.abs_diff(expected.len()) == 1,
    }
}

/// Running totals over the scored examples.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    true_positives: usize,
    false_positives: usize,
    false_negatives: usize,
    exact: usize,
    near: usize,
    count: usize,
}

impl Tally {
    fn add(&mut self, score: &ExampleScore) {
        self.true_positives += score.true_positives;
        self.false_positives += score.false_positives;
        self.false_negatives += score.false_negatives;
        self.exact += usize::from(score.exact);
        self.near += usize::from(score.near);
        self.count += 1;
    }

    fn finish(&self) -> Result<Metrics, EvaluateError> {
        if self.count == 0 {
            return Err(EvaluateError::NoExamples);
        }

        let tp = self.true_positives as f64;
        let fp = self.false_positives as f64;
        let fn_ = self.false_negatives as f64;
        let count = self.count as f64;

        Ok(Metrics {
            precision: ratio(tp, tp + fp, "precision")?,
            recall: ratio(tp, tp + fn_, "recall")?,
            f1_score: ratio(2.0 * tp, 2.0 * tp + fp + fn_, "f1_score")?,
            exact_match: self.exact as f64 / count,
            near_match: self.near as f64 / count,
        })
    }
}

fn ratio(numerator: f64, denominator: f64, metric: &'static str) -> Result<f64, EvaluateError> {
    if denominator == 0.0 {
        return Err(EvaluateError::Undefined { metric });
    }
    Ok(numerator / denominator)
}

pub fn evaluate<M>(model: &M, examples: &[Example]) -> Result<Metrics, EvaluateError>
where
    M: NodeSequenceModel + ?Sized,
{
    evaluate_detailed(model, examples).map(|evaluation| evaluation.metrics)
}

/// Runs the model on every example, one after another, and aggregates the scores.
/// Stops at the first inference failure.
pub fn evaluate_detailed<M>(model: &M, examples: &[Example]) -> Result<Evaluation, EvaluateError>
where
    M: NodeSequenceModel + ?Sized,
{
    let mut tally = Tally::default();
    let mut scored = Vec::with_capacity(examples.len());

    for (index, example) in examples.iter().enumerate() {
        let predicted = model
            .get_node_seq(&example.prompt)
            .map_err(|source| EvaluateError::Inference { index, source })?;

        let score = score_example(&example.nodes, &predicted);
        tracing::info!(
            index,
            expected = ?example.nodes,
            generated = ?predicted,
            exact = score.exact,
            near = score.near,
            "scored example"
        );
        tally.add(&score);

        scored.push(ScoredExample {
            example: Example {
                generated: Some(predicted),
                ..example.clone()
            },
            score,
        });
    }

    let metrics = tally.finish()?;
    tracing::info!(examples = tally.count, ?metrics, "evaluation finished");

    Ok(Evaluation {
        metrics,
        examples: scored,
    })
}
