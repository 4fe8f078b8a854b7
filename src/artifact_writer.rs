use log::debug;
use std::path::{Path, PathBuf};

use crate::document::{markdown, DocumentTree};
use crate::errors::AppError;
use crate::file_utils::FileManager;

// @module: Persists translated documents, one file per target language

/// Writes translated documents under a fixed output directory
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    // @field: Directory holding one artifact per language
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `<output-dir>/<doc-name>.<language>.md`, where doc-name is the source file stem
    pub fn artifact_path<P: AsRef<Path>>(&self, source: P, target_language: &str) -> PathBuf {
        FileManager::generate_output_path(source, &self.output_dir, target_language, "md")
    }

    /// Serialize `tree` and write it, replacing any previous artifact for the language
    pub fn write<P: AsRef<Path>>(&self, tree: &DocumentTree, source: P, target_language: &str) -> Result<PathBuf, AppError> {
        let content = markdown::serialize(tree)?;
        let path = self.artifact_path(source, target_language);

        FileManager::write_to_file(&path, &content)
            .map_err(|e| AppError::File(format!("{:#}", e)))?;

        debug!("Wrote {} bytes to {:?}", content.len(), path);
        Ok(path)
    }
}
