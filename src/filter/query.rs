// file: src/filter/query.rs
// description: immutable filter query value with sort options
// reference: builder-style query construction

use crate::error::{BenefitError, Result};
use crate::models::ContentType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Title,
    Author,
    ParentTitle,
    #[default]
    DateCreated,
    DateModified,
}

impl FromStr for SortKey {
    type Err = BenefitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "title" => Ok(SortKey::Title),
            "author" => Ok(SortKey::Author),
            "parent_title" | "source" => Ok(SortKey::ParentTitle),
            "date_created" | "created" => Ok(SortKey::DateCreated),
            "date_modified" | "modified" => Ok(SortKey::DateModified),
            other => Err(BenefitError::Validation(format!("Unknown sort key: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Everything a caller has selected. Empty dimensions match every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub tags: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub authors: BTreeSet<String>,
    /// Parent titles.
    pub sources: BTreeSet<String>,
    pub content_types: Vec<ContentType>,
    pub text: String,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort: Option<Sort>,
}

impl FilterQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, path: impl Into<String>) -> Self {
        self.tags.insert(path.into());
        self
    }

    pub fn with_category(mut self, path: impl Into<String>) -> Self {
        self.categories.insert(path.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.authors.insert(author.into());
        self
    }

    pub fn with_source(mut self, parent_title: impl Into<String>) -> Self {
        self.sources.insert(parent_title.into());
        self
    }

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        if !self.content_types.contains(&content_type) {
            self.content_types.push(content_type);
        }
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn created_between(mut self, from: Option<String>, to: Option<String>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    pub fn sorted_by(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort = Some(Sort { key, direction });
        self
    }

    /// Whitespace-separated search terms, matched case-insensitively.
    pub fn terms(&self) -> Vec<String> {
        self.text
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
            && self.categories.is_empty()
            && self.authors.is_empty()
            && self.sources.is_empty()
            && self.content_types.is_empty()
            && self.text.trim().is_empty()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }
}
