// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{BenefitError, Result};
use crate::filter::{HighlightMarkers, SortDirection, SortKey};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub vault: VaultConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VaultConfig {
    pub root: PathBuf,
    /// Notes under this folder are books.
    pub book_folder: String,
    /// Notes under this folder are videos.
    pub video_folder: String,
    #[serde(default)]
    pub skip_patterns: Vec<String>,
    pub max_file_size_mb: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub highlight_open: String,
    pub highlight_close: String,
    #[serde(default)]
    pub sort_key: SortKey,
    #[serde(default)]
    pub descending: bool,
}

impl DisplayConfig {
    pub fn markers(&self) -> HighlightMarkers {
        HighlightMarkers {
            open: self.highlight_open.clone(),
            close: self.highlight_close.clone(),
        }
    }

    pub fn direction(&self) -> SortDirection {
        if self.descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("FAWAID")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| BenefitError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| BenefitError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            vault: VaultConfig {
                root: PathBuf::from("./vault"),
                book_folder: "الكتب".to_string(),
                video_folder: "المرئيات".to_string(),
                skip_patterns: vec![".obsidian/".to_string(), ".trash/".to_string()],
                max_file_size_mb: 10,
            },
            display: DisplayConfig {
                highlight_open: "<mark>".to_string(),
                highlight_close: "</mark>".to_string(),
                sort_key: SortKey::DateCreated,
                descending: true,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.vault.max_file_size_mb == 0 {
            return Err(BenefitError::Config(
                "max_file_size_mb must be greater than 0".to_string(),
            ));
        }

        if self.vault.book_folder.trim() == self.vault.video_folder.trim() {
            return Err(BenefitError::Config(
                "book_folder and video_folder must differ".to_string(),
            ));
        }

        if self.display.highlight_open.is_empty() || self.display.highlight_close.is_empty() {
            return Err(BenefitError::Config(
                "highlight markers must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
