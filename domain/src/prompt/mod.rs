//! Prompt templates for every council stage.

pub mod template;

pub use template::PromptTemplate;
