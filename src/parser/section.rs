// file: src/parser/section.rs
// description: locates the benefits section and splits it into raw record blocks
// reference: heading-delimited section extraction

use crate::parser::grammar::{BLOCK_START, SECTION_START, TOP_LEVEL_HEADING};
use std::ops::Range;

/// Byte range of the benefits section, heading line included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub start: usize,
    pub end: usize,
}

impl Section {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn slice<'a>(&self, document: &'a str) -> &'a str {
        &document[self.range()]
    }
}

/// Finds the first `# الفوائد` heading and the next sibling `# ` heading
/// after it. Sub-headings (`##`) stay inside the section.
pub fn locate_section(document: &str) -> Option<Section> {
    let heading = SECTION_START.find(document)?;
    let after_heading = heading.end();

    let end = TOP_LEVEL_HEADING
        .find_at(document, after_heading)
        .map(|m| m.start())
        .unwrap_or(document.len());

    Some(Section {
        start: heading.start(),
        end,
    })
}

/// Splits section text into blocks that each start at a `## ` line. Anything
/// before the first `## ` line is discarded.
pub fn split_blocks(section: &str) -> Vec<&str> {
    let starts: Vec<usize> = BLOCK_START.find_iter(section).map(|m| m.start()).collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(section.len());
            &section[start..end]
        })
        .collect()
}
