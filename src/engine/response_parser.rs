use crate::model::vocabulary::NodeVocabulary;

/// Maps raw model output to the node labels it names, in order.
///
/// The output is split on whitespace and each token is looked up
/// case-insensitively. Unknown tokens are dropped, duplicates are kept.
/// A token only matches when it equals a node name exactly, so `Delay,`
/// or `[Delay]` do not match `Delay`.
///
/// Whitespace is Unicode `White_Space`; the ASCII separators U+001C to
/// U+001F are not in that set and stay inside tokens.
pub fn parse_response(raw: &str, vocabulary: &NodeVocabulary) -> Vec<String> {
    let mut nodes = Vec::new();

    for token in raw.split_whitespace() {
        if let Some(label) = vocabulary.label_for(token) {
            nodes.push(label.to_string());
        }
    }

    nodes
}
