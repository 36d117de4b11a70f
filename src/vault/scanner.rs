// file: src/vault/scanner.rs
// description: vault walking and markdown note discovery with filtering
// reference: https://docs.rs/walkdir

use crate::config::VaultConfig;
use crate::error::Result;
use crate::utils::validation::Validator;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

pub struct VaultScanner {
    skip_patterns: Vec<String>,
    max_file_size_mb: usize,
}

#[derive(Debug, Clone)]
pub struct ScannedNote {
    /// Path relative to the vault root, `/`-separated.
    pub relative_path: String,
}

impl VaultScanner {
    pub fn new(config: &VaultConfig) -> Self {
        Self {
            skip_patterns: config.skip_patterns.clone(),
            max_file_size_mb: config.max_file_size_mb,
        }
    }

    pub fn scan(&self, root: &Path) -> Result<Vec<ScannedNote>> {
        info!("Scanning vault: {}", root.display());
        let mut notes = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative_path = Validator::sanitize_file_path(
                &path.strip_prefix(root).unwrap_or(path).to_string_lossy(),
            );

            if self.should_skip(&relative_path) {
                debug!("Skipping note: {}", path.display());
                continue;
            }

            if Validator::validate_markdown_extension(path).is_err() {
                continue;
            }

            if let Ok(metadata) = entry.metadata() {
                let max_size = (self.max_file_size_mb * 1024 * 1024) as u64;
                if metadata.len() > max_size {
                    debug!(
                        "Skipping large note ({} MB): {}",
                        metadata.len() / 1024 / 1024,
                        path.display()
                    );
                    continue;
                }
            }

            notes.push(ScannedNote { relative_path });
        }

        info!("Found {} markdown notes", notes.len());
        Ok(notes)
    }

    fn should_skip(&self, relative_path: &str) -> bool {
        self.skip_patterns.iter().any(|pattern| {
            if let Some(suffix) = pattern.strip_prefix('*') {
                relative_path.ends_with(suffix)
            } else {
                relative_path.contains(pattern.as_str())
            }
        })
    }
}
