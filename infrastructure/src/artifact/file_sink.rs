//! Writes artifacts to a directory as `<stem>.md`, `<stem>.html`,
//! `<stem>.txt` and, for council runs, `<stem>.results.json`.

use super::render::{markdown_to_html, markdown_to_text};
use council_application::ports::artifact_sink::{Artifact, ArtifactError, ArtifactSink};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct FileArtifactSink {
    directory: PathBuf,
    stem: String,
}

impl FileArtifactSink {
    pub fn new(directory: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            stem: stem.into(),
        }
    }

    pub fn path_for(&self, extension: &str) -> PathBuf {
        self.directory.join(format!("{}.{}", self.stem, extension))
    }

    fn write_file(path: &Path, contents: &str) -> Result<(), ArtifactError> {
        fs::write(path, contents).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ArtifactSink for FileArtifactSink {
    fn write(&self, artifact: Artifact<'_>) -> Result<Vec<PathBuf>, ArtifactError> {
        fs::create_dir_all(&self.directory).map_err(|source| ArtifactError::Io {
            path: self.directory.clone(),
            source,
        })?;

        let document = artifact.document;
        let markdown = document.render_markdown();

        let mut renderings = vec![
            (self.path_for("md"), markdown.clone()),
            (
                self.path_for("html"),
                markdown_to_html(document.title(), &markdown),
            ),
            (self.path_for("txt"), markdown_to_text(&markdown)),
        ];

        if let Some(results) = artifact.results {
            let json = serde_json::to_string_pretty(results)
                .map_err(|e| ArtifactError::Serialize(e.to_string()))?;
            renderings.push((self.path_for("results.json"), json));
        }

        let mut written = Vec::with_capacity(renderings.len());
        for (path, contents) in renderings {
            Self::write_file(&path, &contents)?;
            info!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}
