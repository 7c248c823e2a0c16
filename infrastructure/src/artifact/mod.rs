//! Artifact sinks

mod file_sink;
mod render;

pub use file_sink::FileArtifactSink;
pub use render::{markdown_to_html, markdown_to_text};
