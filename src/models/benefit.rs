// file: src/models/benefit.rs
// description: benefit record model with provenance and content type
// reference: internal data structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BenefitError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Book,
    Video,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Book => "book",
            ContentType::Video => "video",
        }
    }

    pub fn is_book(&self) -> bool {
        matches!(self, ContentType::Book)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = BenefitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "book" => Ok(ContentType::Book),
            "video" => Ok(ContentType::Video),
            other => Err(BenefitError::Validation(format!(
                "Unknown content type: {}",
                other
            ))),
        }
    }
}

/// Where a benefit lives. Filled in from the owning note, never from the
/// record's own text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub file_path: String,
    pub content_type: ContentType,
    pub parent_title: String,
    pub author: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benefit {
    pub id: String,
    pub title: String,
    pub text: String,
    pub page_number: Option<u32>,
    pub volume_number: Option<u32>,
    /// Seconds into the video.
    pub timestamp: Option<u32>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub date_created: String,
    pub date_modified: Option<String>,
    #[serde(flatten)]
    pub provenance: Provenance,
}

impl Benefit {
    pub fn new(id: String, title: String, text: String, date_created: String) -> Self {
        Self {
            id,
            title,
            text,
            date_created,
            ..Default::default()
        }
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    pub fn content_type(&self) -> ContentType {
        self.provenance.content_type
    }
}

/// Appends `value` unless an equal entry is already present.
pub fn push_unique(set: &mut Vec<String>, value: String) {
    if !set.iter().any(|existing| existing == &value) {
        set.push(value);
    }
}
