//! Document entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Stable identifier of a section, derived from its heading
///
/// `"Story, Setting and Character"` becomes `story-setting-and-character`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn from_heading(heading: &str) -> Self {
        let mut slug = String::with_capacity(heading.len());
        let mut pending_dash = false;
        for c in heading.chars() {
            if c.is_alphanumeric() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.extend(c.to_lowercase());
            } else {
                pending_dash = true;
            }
        }
        Self(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One top-level section of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    id: SectionId,
    heading: String,
    /// Sub-headings shown while the section has no body yet
    placeholders: Vec<String>,
    body: Option<String>,
}

impl Section {
    pub fn new(heading: impl Into<String>) -> Self {
        let heading = heading.into();
        Self {
            id: SectionId::from_heading(&heading),
            heading,
            placeholders: Vec::new(),
            body: None,
        }
    }

    pub fn with_placeholders(mut self, placeholders: Vec<String>) -> Self {
        self.placeholders = placeholders;
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn id(&self) -> &SectionId {
        &self.id
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    pub fn is_filled(&self) -> bool {
        self.body.is_some()
    }

    /// Add content; a second contribution follows the first.
    fn contribute(&mut self, body: &str) {
        match &mut self.body {
            Some(existing) => {
                existing.push_str("\n\n");
                existing.push_str(body);
            }
            None => self.body = Some(body.to_string()),
        }
    }

    fn render_markdown(&self) -> String {
        let mut out = format!("## {}\n\n", self.heading);
        match &self.body {
            Some(body) => {
                out.push_str(body.trim_end());
                out.push_str("\n\n");
            }
            None => {
                for placeholder in &self.placeholders {
                    out.push_str(&format!("### {}\n", placeholder));
                }
                if !self.placeholders.is_empty() {
                    out.push('\n');
                }
            }
        }
        out
    }
}

/// Ordered sequence of sections with a title (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    title: String,
    sections: Vec<Section>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id() == id)
    }

    pub fn section_by_heading(&self, heading: &str) -> Option<&Section> {
        self.section(&SectionId::from_heading(heading))
    }

    /// Append a new section. Two sections may never share an id.
    pub fn push_section(&mut self, section: Section) -> Result<(), DomainError> {
        if self.section(section.id()).is_some() {
            return Err(DomainError::DuplicateSection(section.id().to_string()));
        }
        self.sections.push(section);
        Ok(())
    }

    /// Write `body` into the section with this heading, creating it at the
    /// end of the document when the template has no such section.
    pub fn contribute(&mut self, heading: &str, body: &str) {
        let id = SectionId::from_heading(heading);
        match self.sections.iter_mut().find(|s| s.id() == &id) {
            Some(section) => section.contribute(body),
            None => self.sections.push(Section::new(heading).with_body(body)),
        }
    }

    /// Markdown rendering: `# title` followed by each `## section`.
    pub fn render_markdown(&self) -> String {
        let mut out = format!("# {}\n\n", self.title);
        for section in &self.sections {
            out.push_str(&section.render_markdown());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_id_slug() {
        assert_eq!(
            SectionId::from_heading("Story, Setting and Character").as_str(),
            "story-setting-and-character"
        );
        assert_eq!(SectionId::from_heading("  Levels ").as_str(), "levels");
        assert_eq!(SectionId::from_heading("UI/UX").as_str(), "ui-ux");
    }

    #[test]
    fn test_duplicate_section_rejected() {
        let mut doc = Document::new("GDD");
        doc.push_section(Section::new("Levels")).unwrap();
        let err = doc.push_section(Section::new("levels")).unwrap_err();
        assert_eq!(err, DomainError::DuplicateSection("levels".to_string()));
    }

    #[test]
    fn test_contribute_fills_existing_section_in_place() {
        let mut doc = Document::new("GDD");
        doc.push_section(Section::new("Summary").with_body("idea")).unwrap();
        doc.push_section(Section::new("Levels").with_placeholders(vec!["Level Design".into()]))
            .unwrap();
        doc.push_section(Section::new("Interface")).unwrap();

        doc.contribute("Levels", "### Overview\nten levels");

        let headings: Vec<&str> = doc.sections().iter().map(|s| s.heading()).collect();
        assert_eq!(headings, vec!["Summary", "Levels", "Interface"]);
        assert_eq!(
            doc.section_by_heading("Levels").unwrap().body(),
            Some("### Overview\nten levels")
        );
    }

    #[test]
    fn test_contribute_missing_section_appends() {
        let mut doc = Document::new("GDD");
        doc.contribute("Overview", "body");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.sections()[0].heading(), "Overview");
    }

    #[test]
    fn test_second_contribution_follows_first() {
        let mut doc = Document::new("GDD");
        doc.contribute("Levels", "first");
        doc.contribute("Levels", "second");
        assert_eq!(doc.section_by_heading("Levels").unwrap().body(), Some("first\n\nsecond"));
    }

    #[test]
    fn test_render_markdown() {
        let mut doc = Document::new("Game Design Document");
        doc.push_section(Section::new("Executive Summary").with_body("test game"))
            .unwrap();
        doc.push_section(Section::new("Levels").with_placeholders(vec!["Level Design".into()]))
            .unwrap();

        assert_eq!(
            doc.render_markdown(),
            "# Game Design Document\n\n## Executive Summary\n\ntest game\n\n## Levels\n\n### Level Design\n\n"
        );
    }
}
