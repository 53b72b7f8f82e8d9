use crate::model::prompt_template::PromptTemplate;
use crate::model::vocabulary::NodeVocabulary;

/// Builds the full prompt sent to the LLM.
/// Only formats text: the user's request is inserted verbatim, so any
/// delimiters around it come from the template.
pub fn build_prompt(
    user_text: &str,
    template: &PromptTemplate,
    vocabulary: &NodeVocabulary,
) -> String {
    let mut prompt = String::new();

    push_introduction(&mut prompt, template, vocabulary);
    push_request(&mut prompt, template, user_text);

    prompt
}

fn push_introduction(prompt: &mut String, template: &PromptTemplate, vocabulary: &NodeVocabulary) {
    prompt.push_str(&template.introduction);
    for node in vocabulary.entries() {
        prompt.push_str(&format!("\n{} - {}", node.name, node.description));
    }
}

fn push_request(prompt: &mut String, template: &PromptTemplate, user_text: &str) {
    prompt.push_str(&template.prefix);
    prompt.push_str(user_text);
    prompt.push_str(&template.suffix);
}
