//! Shared fixtures: the three-node vocabulary used across the integration tests.

#![allow(dead_code)]

use text2nodeseq::{MockCompleter, NodeVocabulary, PromptTemplate, Text2NodeSeq};

pub fn vocabulary() -> NodeVocabulary {
    NodeVocabulary::new([
        ("Click", "user clicks a button"),
        ("Delay", "wait N seconds"),
        ("Navigate", "go to a page"),
    ])
}

pub fn template() -> PromptTemplate {
    PromptTemplate {
        introduction: "Pick nodes for the task. Nodes:".into(),
        prefix: "\nTask: ".into(),
        suffix: "\nAnswer:".into(),
    }
}

pub fn model(completer: MockCompleter) -> Text2NodeSeq<MockCompleter> {
    Text2NodeSeq::new(template(), vocabulary(), completer)
}

pub fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
