//! Document subdomain
//!
//! The output artifact is a structured [`Document`]: an ordered list of
//! sections addressed by [`SectionId`], never a string patched by
//! find-and-replace. [`DocumentTemplate`] provides the initial skeleton.

pub mod entities;
pub mod template;

pub use entities::{Document, Section, SectionId};
pub use template::{DocumentTemplate, TemplateSection};
