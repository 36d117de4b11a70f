// file: src/exporter/json.rs
// description: json export of benefit records with a manifest
// reference: https://docs.rs/serde_json

use crate::error::Result;
use crate::filter::FilteredBenefit;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub const BENEFITS_FILE: &str = "benefits.json";
pub const MANIFEST_FILE: &str = "export_manifest.json";

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub total_benefits: usize,
    pub files: Vec<String>,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn export(&self, benefits: &[FilteredBenefit], pretty: bool) -> Result<ExportManifest> {
        info!("Starting JSON export to {:?}", self.output_dir);

        let body = if pretty {
            serde_json::to_string_pretty(benefits)?
        } else {
            serde_json::to_string(benefits)?
        };
        fs::write(self.output_dir.join(BENEFITS_FILE), body)?;

        let manifest = ExportManifest {
            exported_at: Utc::now().to_rfc3339(),
            total_benefits: benefits.len(),
            files: vec![BENEFITS_FILE.to_string()],
        };
        fs::write(
            self.output_dir.join(MANIFEST_FILE),
            serde_json::to_string_pretty(&manifest)?,
        )?;

        info!("Export complete: {} benefits exported", manifest.total_benefits);
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Benefit;
    use tempfile::tempdir;

    #[test]
    fn test_export_writes_records_and_manifest() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path().join("out")).unwrap();
        let benefits = vec![FilteredBenefit {
            benefit: Benefit::new(
                "x1".to_string(),
                "عنوان".to_string(),
                "نص".to_string(),
                "2024-01-01 00:00:00".to_string(),
            ),
            highlighted: None,
        }];

        let manifest = exporter.export(&benefits, true).unwrap();
        assert_eq!(manifest.total_benefits, 1);

        let written = fs::read_to_string(dir.path().join("out").join(BENEFITS_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value[0]["id"], "x1");
        assert_eq!(value[0]["content_type"], "book");
        assert!(dir.path().join("out").join(MANIFEST_FILE).exists());
    }
}
