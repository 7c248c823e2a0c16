//! Document templates

use super::entities::{Document, Section};
use crate::core::error::DomainError;

/// Heading of the section that carries the seed idea
pub const EXECUTIVE_SUMMARY: &str = "Executive Summary";

/// A top-level section skeleton
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSection {
    pub heading: String,
    pub subsections: Vec<String>,
}

impl TemplateSection {
    pub fn new(heading: impl Into<String>, subsections: &[&str]) -> Self {
        Self {
            heading: heading.into(),
            subsections: subsections.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Initial skeleton of the output document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTemplate {
    title: String,
    sections: Vec<TemplateSection>,
}

impl DocumentTemplate {
    pub fn new(title: impl Into<String>, sections: Vec<TemplateSection>) -> Self {
        Self {
            title: title.into(),
            sections,
        }
    }

    /// Classic game design document outline
    pub fn game_design() -> Self {
        Self::new(
            "Game Design Document",
            vec![
                TemplateSection::new(
                    "Game Overview",
                    &[
                        "Concept",
                        "Genre",
                        "Target Audience",
                        "Game Flow Summary",
                        "Look and Feel",
                    ],
                ),
                TemplateSection::new(
                    "Gameplay and Mechanics",
                    &["Gameplay", "Mechanics", "Screen Flow"],
                ),
                TemplateSection::new(
                    "Story, Setting and Character",
                    &["Story and Narrative", "Game World", "Characters"],
                ),
                TemplateSection::new("Levels", &["Level Design", "Training Level"]),
                TemplateSection::new(
                    "Interface",
                    &["Visual System", "Control System", "Audio, music, sound effects"],
                ),
                TemplateSection::new(
                    "Artificial Intelligence",
                    &["Opposition AI", "Friend AI", "Support AI"],
                ),
                TemplateSection::new(
                    "Technical",
                    &[
                        "Target Hardware",
                        "Development hardware and software",
                        "Network requirements",
                    ],
                ),
                TemplateSection::new("Game Art", &["Concept Art", "Style Guides"]),
            ],
        )
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sections(&self) -> &[TemplateSection] {
        &self.sections
    }

    /// Instantiate the skeleton with the seed idea as executive summary.
    pub fn instantiate(&self, idea: &str) -> Result<Document, DomainError> {
        let mut document = Document::new(&self.title);
        document.push_section(Section::new(EXECUTIVE_SUMMARY).with_body(idea))?;
        for section in &self.sections {
            document.push_section(
                Section::new(&section.heading).with_placeholders(section.subsections.clone()),
            )?;
        }
        Ok(document)
    }
}

impl Default for DocumentTemplate {
    fn default() -> Self {
        Self::game_design()
    }
}
