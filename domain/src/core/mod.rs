//! Core domain concepts shared across all subdomains.
//!
//! - [`model::ModelId`] - identifier of the model an agent is bound to
//! - [`error::DomainError`] - domain-level errors
//! - [`string`] - UTF-8 safe previews for log lines

pub mod error;
pub mod model;
pub mod string;
