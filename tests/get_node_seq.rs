//! Orchestration tests: prompt building, completion and parsing through
//! `Text2NodeSeq` with a scripted completer.

mod common;
mod init_logging;

use text2nodeseq::{format_node_seq, InferenceError, MockCompleter, Text2NodeSeq};

#[test]
fn get_node_seq_returns_labels_in_reply_order() {
    let model = common::model(MockCompleter::fixed("First Delay then Navigate"));
    let nodes = model.get_node_seq("Some prompt...").unwrap();
    assert_eq!(nodes, ["[Delay]", "[Navigate]"]);
}

#[test]
fn get_node_seq_gibberish_is_empty() {
    let model = common::model(MockCompleter::fixed("Blablablablablabla... nonsense"));
    let nodes = model
        .get_node_seq("Some gibberish... Blablablablablabla...")
        .unwrap();
    assert!(nodes.is_empty());
}

#[test]
fn get_node_seq_only_emits_vocabulary_labels() {
    let model = common::model(MockCompleter::fixed(
        "1. Click\n2. Delay 3 seconds\n3. navigate to the new page\n4. Scroll",
    ));
    let node_list = common::vocabulary().labels();

    let nodes = model
        .get_node_seq(
            "Navigate to a new page after a delay of 3 seconds when the user clicks a button.",
        )
        .unwrap();

    assert_eq!(nodes, ["[Click]", "[Delay]", "[Navigate]"]);
    for node in &nodes {
        assert!(node_list.contains(node), "{node} not in {node_list:?}");
    }
}

#[test]
fn completer_receives_full_prompt_and_generation_cap() {
    let model = common::model(MockCompleter::fixed("Click"));
    model.get_node_seq("Press the button").unwrap();

    let calls = model.completer().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].max_new_tokens, 100);
    assert_eq!(
        calls[0].prompt,
        "Pick nodes for the task. Nodes:\
         \nClick - user clicks a button\
         \nDelay - wait N seconds\
         \nNavigate - go to a page\
         \nTask: Press the button\
         \nAnswer:"
    );
    assert_eq!(calls[0].prompt, model.prompt_for("Press the button"));
}

#[test]
fn generation_cap_is_configurable() {
    let model = Text2NodeSeq::new(
        common::template(),
        common::vocabulary(),
        MockCompleter::fixed("Delay"),
    )
    .with_max_new_tokens(32);

    model.get_node_seq("wait").unwrap();
    assert_eq!(model.completer().calls()[0].max_new_tokens, 32);
}

#[test]
fn completer_failure_propagates_without_retry() {
    let model = common::model(MockCompleter::failing("model crashed"));
    let err = model.get_node_seq("anything").unwrap_err();

    assert!(matches!(err, InferenceError::Backend(ref m) if m == "model crashed"));
    assert_eq!(model.completer().calls().len(), 1);
}

#[test]
fn each_call_runs_a_fresh_completion() {
    let model = common::model(MockCompleter::sequence(["Click", "Navigate"]));
    assert_eq!(model.get_node_seq("same").unwrap(), ["[Click]"]);
    assert_eq!(model.get_node_seq("same").unwrap(), ["[Navigate]"]);
    assert!(model.get_node_seq("same").is_err());
}

#[test]
fn node_sequence_prints_as_a_literal_list() {
    let model = common::model(MockCompleter::fixed("Delay Navigate"));
    let nodes = model.get_node_seq("wait then go").unwrap();

    assert_eq!(format_node_seq(&nodes), r#"["[Delay]", "[Navigate]"]"#);
    assert_eq!(format_node_seq(&[]), "[]");
}
