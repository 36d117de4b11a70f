// file: src/parser/record.rs
// description: line classification and block state machine producing benefit records
// reference: line-oriented parsing of labeled text fields

use crate::clock::ClockIdProvider;
use crate::error::{BenefitError, Result};
use crate::models::{Benefit, Provenance};
use crate::parser::grammar::*;
use crate::parser::section::{locate_section, split_blocks};
use tracing::debug;

/// What a single line of a block means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Title(String),
    IdComment(String),
    DateCreated(String),
    DateModified(String),
    Page(u32),
    Volume(u32),
    Timestamp(u32),
    Categories(Vec<String>),
    Tags(Vec<String>),
    BodyLabel(String),
    PlainLine,
}

impl LineKind {
    /// Checks each pattern in a fixed order; the first hit wins.
    pub fn classify(line: &str) -> Self {
        let line = line.trim_end_matches('\r');

        if let Some(caps) = TITLE.captures(line) {
            return LineKind::Title(caps[1].to_string());
        }
        if let Some(caps) = ID_COMMENT.captures(line) {
            return LineKind::IdComment(caps[1].to_string());
        }
        if let Some(caps) = DATE_CREATED_COMMENT.captures(line) {
            return LineKind::DateCreated(caps[1].to_string());
        }
        if let Some(caps) = DATE_MODIFIED_COMMENT.captures(line) {
            return LineKind::DateModified(caps[1].to_string());
        }
        if let Some(value) = PAGE.captures(line).and_then(|c| c[1].parse().ok()) {
            return LineKind::Page(value);
        }
        if let Some(value) = VOLUME.captures(line).and_then(|c| c[1].parse().ok()) {
            return LineKind::Volume(value);
        }
        if let Some(seconds) = TIMESTAMP.captures(line).and_then(|caps| {
            let hours = match caps.get(1) {
                Some(m) => m.as_str().parse().ok()?,
                None => 0,
            };
            timestamp_seconds(hours, caps[2].parse().ok()?, caps[3].parse().ok()?)
        }) {
            return LineKind::Timestamp(seconds);
        }
        if let Some(caps) = CATEGORIES.captures(line) {
            return LineKind::Categories(split_list(&caps[1]));
        }
        if let Some(caps) = TAGS.captures(line) {
            return LineKind::Tags(split_list(&caps[1]));
        }
        if let Some(caps) = BODY.captures(line) {
            return LineKind::BodyLabel(caps[1].to_string());
        }

        LineKind::PlainLine
    }

    /// Metadata lines end body accumulation.
    pub fn is_metadata(&self) -> bool {
        matches!(
            self,
            LineKind::IdComment(_)
                | LineKind::DateCreated(_)
                | LineKind::DateModified(_)
                | LineKind::Page(_)
                | LineKind::Volume(_)
                | LineKind::Timestamp(_)
                | LineKind::Categories(_)
                | LineKind::Tags(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Metadata,
    Body,
    /// Body ended on a metadata line; trailing metadata is still read.
    Trailer,
}

#[derive(Debug, Default)]
struct Fields {
    id: Option<String>,
    date_created: Option<String>,
    date_modified: Option<String>,
    page_number: Option<u32>,
    volume_number: Option<u32>,
    timestamp: Option<u32>,
    categories: Vec<String>,
    tags: Vec<String>,
    body: Vec<String>,
}

impl Fields {
    fn apply(&mut self, kind: LineKind) {
        match kind {
            LineKind::IdComment(id) => self.id = Some(id),
            LineKind::DateCreated(date) => self.date_created = Some(date),
            LineKind::DateModified(date) => self.date_modified = Some(date),
            LineKind::Page(page) => self.page_number = Some(page),
            LineKind::Volume(volume) => self.volume_number = Some(volume),
            LineKind::Timestamp(seconds) => self.timestamp = Some(seconds),
            LineKind::Categories(items) => self.categories = items,
            LineKind::Tags(items) => self.tags = items,
            LineKind::Title(_) | LineKind::BodyLabel(_) | LineKind::PlainLine => {}
        }
    }
}

pub struct BlockParser<'a, C: ClockIdProvider> {
    clock: &'a C,
}

impl<'a, C: ClockIdProvider> BlockParser<'a, C> {
    pub fn new(clock: &'a C) -> Self {
        Self { clock }
    }

    /// Parses one raw block. Missing id and creation date are filled from the
    /// clock; a block without a title line or without body text is rejected.
    pub fn parse_block(&self, block: &str) -> Result<Benefit> {
        let mut lines = block.lines();

        let title = match lines.next().map(LineKind::classify) {
            Some(LineKind::Title(title)) => title,
            _ => return Err(BenefitError::malformed("first line is not a `## ` title")),
        };

        let mut fields = Fields::default();
        let mut state = State::Metadata;

        for line in lines {
            let kind = LineKind::classify(line);

            state = match (state, kind) {
                (State::Metadata, LineKind::BodyLabel(first)) => {
                    fields.body.push(first);
                    State::Body
                }
                (State::Body, kind) if kind.is_metadata() => {
                    fields.apply(kind);
                    State::Trailer
                }
                (State::Body, _) => {
                    fields.body.push(line.trim_end_matches('\r').to_string());
                    State::Body
                }
                (state, kind) => {
                    fields.apply(kind);
                    state
                }
            };
        }

        let text = fields.body.join("\n").trim().to_string();
        if text.is_empty() {
            return Err(BenefitError::malformed(format!(
                "benefit `{}` has no body text",
                title
            )));
        }

        Ok(Benefit {
            id: fields.id.unwrap_or_else(|| self.clock.new_id()),
            title,
            text,
            page_number: fields.page_number,
            volume_number: fields.volume_number,
            timestamp: fields.timestamp,
            categories: fields.categories,
            tags: fields.tags,
            date_created: fields.date_created.unwrap_or_else(|| self.clock.now()),
            date_modified: fields.date_modified,
            provenance: Provenance::default(),
        })
    }

    /// Parses every block of a section, dropping malformed ones.
    pub fn parse_section(&self, section: &str) -> Vec<Benefit> {
        split_blocks(section)
            .into_iter()
            .filter_map(|block| match self.parse_block(block) {
                Ok(benefit) => Some(benefit),
                Err(e) => {
                    debug!("Skipping block: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Parses all benefits of a full document and stamps them with
    /// `provenance`. A document without a benefits section yields nothing.
    pub fn parse_document(&self, document: &str, provenance: &Provenance) -> Vec<Benefit> {
        let Some(section) = locate_section(document) else {
            debug!("No benefits section in {}", provenance.file_path);
            return Vec::new();
        };

        self.parse_section(section.slice(document))
            .into_iter()
            .map(|benefit| benefit.with_provenance(provenance.clone()))
            .collect()
    }
}
