use std::collections::HashMap;

/// Closed set of workflow nodes, kept in document order.
/// Lookup is case-insensitive on the bare node name.
#[derive(Debug, Clone, Default)]
pub struct NodeVocabulary {
    entries: Vec<NodeEntry>,
    lookup: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeEntry {
    pub name: String,
    pub description: String,
}

impl NodeVocabulary {
    /// Builds the vocabulary from ordered `(name, description)` pairs.
    ///
    /// Names are expected to be unique. When two names only differ by case,
    /// the later one owns the case-insensitive lookup slot.
    pub fn new<I, N, D>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: Into<String>,
    {
        let entries: Vec<NodeEntry> = entries
            .into_iter()
            .map(|(name, description)| NodeEntry {
                name: name.into(),
                description: description.into(),
            })
            .collect();

        let mut lookup = HashMap::new();
        for entry in &entries {
            if let Some(previous) = lookup.insert(entry.name.to_lowercase(), label(&entry.name)) {
                tracing::warn!(
                    node = %entry.name,
                    shadowed = %previous,
                    "node names collide case-insensitively; keeping the later one"
                );
            }
        }

        Self { entries, lookup }
    }

    pub fn entries(&self) -> &[NodeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical `[Name]` label for a bare token, ignoring case.
    pub fn label_for(&self, token: &str) -> Option<&str> {
        self.lookup.get(&token.to_lowercase()).map(String::as_str)
    }

    /// All labels this vocabulary can emit, in document order.
    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|e| label(&e.name)).collect()
    }

    /// Whether `candidate` is a label [`Self::label_for`] can return.
    pub fn contains_label(&self, candidate: &str) -> bool {
        self.lookup.values().any(|l| l == candidate)
    }
}

fn label(name: &str) -> String {
    format!("[{name}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NodeVocabulary {
        NodeVocabulary::new([
            ("Click", "user clicks a button"),
            ("Delay", "wait N seconds"),
            ("Navigate", "go to a page"),
        ])
    }

    #[test]
    fn keeps_document_order() {
        let binding = sample();
        let names: Vec<&str> = binding.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Click", "Delay", "Navigate"]);
    }

    #[test]
    fn label_lookup_ignores_case() {
        let vocab = sample();
        assert_eq!(vocab.label_for("delay"), Some("[Delay]"));
        assert_eq!(vocab.label_for("NAVIGATE"), Some("[Navigate]"));
        assert_eq!(vocab.label_for("Delay,"), None);
    }

    #[test]
    fn later_key_wins_on_case_collision() {
        let vocab = NodeVocabulary::new([("Click", "a"), ("CLICK", "b")]);
        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.label_for("click"), Some("[CLICK]"));
        assert!(vocab.contains_label("[CLICK]"));
        assert!(!vocab.contains_label("[Click]"));
    }

    #[test]
    fn labels_are_bracketed() {
        let vocab = sample();
        assert_eq!(vocab.labels(), ["[Click]", "[Delay]", "[Navigate]"]);
        assert!(vocab.contains_label("[Delay]"));
        assert!(!vocab.contains_label("Delay"));
    }
}
