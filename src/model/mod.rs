pub mod example;
pub mod metrics;
pub mod prompt_template;
pub mod vocabulary;
