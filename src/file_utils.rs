use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};

// @module: File and directory utilities

/// Source document names recognised in the repository root, in priority order
pub const README_NAMES: &[&str] = &["README.md", "README.markdown"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: Output path for a translated document
    // @params: input_file, output_dir, target_language, extension
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        target_language: &str,
        extension: &str,
    ) -> PathBuf {
        let stem = input_file.as_ref().file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(target_language);
        output_filename.push('.');
        output_filename.push_str(extension);

        output_dir.as_ref().join(output_filename)
    }

    /// Find the README in `root`, matching known names case-insensitively.
    ///
    /// Known names are tried in priority order. When several files differ
    /// only in case, the all-lowercase spelling (`readme.md`) wins, then the
    /// lexicographically smallest one.
    pub fn find_readme<P: AsRef<Path>>(root: P) -> Result<Option<PathBuf>> {
        let root = root.as_ref();
        let mut candidates = Vec::new();

        for entry in fs::read_dir(root).with_context(|| format!("Failed to read directory: {:?}", root))? {
            let entry = entry.context("Failed to read directory entry")?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            candidates.push(entry.file_name().to_string_lossy().to_string());
        }
        candidates.sort();

        for known in README_NAMES {
            let lowercase = known.to_lowercase();
            let found = candidates
                .iter()
                .find(|name| **name == lowercase)
                .or_else(|| candidates.iter().find(|name| name.eq_ignore_ascii_case(known)));
            if let Some(name) = found {
                return Ok(Some(root.join(name)));
            }
        }

        Ok(None)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
