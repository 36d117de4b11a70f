// file: src/utils/validation.rs
// description: input validation and normalization for benefit drafts and queries
// reference: input validation patterns

use crate::error::{BenefitError, Result};
use crate::models::{BenefitDraft, ContentType};
use crate::parser::grammar::{DATE_FORMAT, parse_timestamp};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;

pub struct Validator;

impl Validator {
    /// Checks a draft before it is written and normalizes its paths.
    pub fn normalize_draft(mut draft: BenefitDraft) -> Result<BenefitDraft> {
        draft.title = draft.title.trim().to_string();
        draft.text = draft.text.trim().to_string();

        if draft.title.is_empty() {
            return Err(BenefitError::Validation("Title is empty".to_string()));
        }
        if draft.title.contains('\n') {
            return Err(BenefitError::Validation(
                "Title must be a single line".to_string(),
            ));
        }
        if draft.text.is_empty() {
            return Err(BenefitError::Validation("Benefit text is empty".to_string()));
        }

        match draft.content_type {
            ContentType::Book if draft.timestamp.is_some() => {
                return Err(BenefitError::Validation(
                    "Timestamp is only valid for videos".to_string(),
                ));
            }
            ContentType::Video if draft.page_number.is_some() || draft.volume_number.is_some() => {
                return Err(BenefitError::Validation(
                    "Page and volume are only valid for books".to_string(),
                ));
            }
            _ => {}
        }

        draft.categories = Self::normalize_paths(&draft.categories);
        draft.tags = Self::normalize_paths(&draft.tags);
        Ok(draft)
    }

    /// `" فقه / صلاة/ "` becomes `"فقه/صلاة"`.
    pub fn normalize_path(path: &str) -> String {
        path.split('/')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn normalize_paths(paths: &[String]) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(paths.len());
        for path in paths.iter().map(|p| Self::normalize_path(p)) {
            if !path.is_empty() && !out.contains(&path) {
                out.push(path);
            }
        }
        out
    }

    /// Accepts `YYYY-MM-DD` or `YYYY-MM-DD HH:mm:ss`.
    pub fn validate_date_bound(value: &str) -> Result<()> {
        let value = value.trim();
        let valid = NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
            || NaiveDateTime::parse_from_str(value, DATE_FORMAT).is_ok();

        if valid {
            Ok(())
        } else {
            Err(BenefitError::Validation(format!(
                "Invalid date (expected YYYY-MM-DD[ HH:mm:ss]): {}",
                value
            )))
        }
    }

    pub fn parse_timestamp_arg(value: &str) -> Result<u32> {
        parse_timestamp(value).ok_or_else(|| {
            BenefitError::Validation(format!(
                "Invalid timestamp (expected H:MM:SS or MM:SS): {}",
                value
            ))
        })
    }

    pub fn validate_markdown_extension(path: &Path) -> Result<()> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("md") | Some("markdown") => Ok(()),
            _ => Err(BenefitError::Validation(format!(
                "File is not a markdown file: {}",
                path.display()
            ))),
        }
    }

    pub fn sanitize_file_path(path: &str) -> String {
        path.replace('\\', "/")
            .replace("//", "/")
            .trim()
            .to_string()
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            format!("{}...", text.chars().take(max_chars).collect::<String>())
        }
    }
}
