// file: src/document/mutator.rs
// description: in-place insert, update and delete of benefit blocks inside a note
// reference: byte-range replacement over heading-delimited blocks

use crate::clock::ClockIdProvider;
use crate::error::{BenefitError, Result};
use crate::models::Benefit;
use crate::parser::grammar::{
    BLOCK_END, DATE_CREATED_COMMENT, SECTION_HEADING, TOP_LEVEL_HEADING, id_comment_for,
};
use crate::parser::section::locate_section;
use crate::parser::serializer::serialize_benefit;
use std::ops::Range;
use tracing::debug;

/// Appends `benefit` as the last record of the benefits section, creating the
/// section at the end of the note when it is missing. Text after the section
/// is kept byte for byte.
pub fn insert_benefit(document: &str, benefit: &Benefit) -> String {
    let block = serialize_benefit(benefit, benefit.content_type(), false);

    match locate_section(document) {
        None => {
            debug!("Creating benefits section for {}", benefit.id);
            let mut out = String::with_capacity(document.len() + block.len() + 32);
            out.push_str(document);
            out.push_str(separator_after(document));
            out.push_str(SECTION_HEADING);
            out.push_str("\n\n");
            out.push_str(&block);
            out
        }
        Some(section) => {
            let (head, tail) = document.split_at(section.end);
            let mut out = String::with_capacity(document.len() + block.len() + 4);
            out.push_str(head);
            out.push_str(separator_after(head));
            out.push_str(&block);
            if !tail.is_empty() {
                out.push('\n');
            }
            out.push_str(tail);
            out
        }
    }
}

/// Replaces the block of record `id` with `benefit`. The original creation
/// date is kept and the modification date comes from `clock`.
pub fn update_benefit<C: ClockIdProvider>(
    document: &str,
    id: &str,
    benefit: &Benefit,
    clock: &C,
) -> Result<String> {
    let range = find_block(document, id)?;
    let old = &document[range.clone()];

    let date_created = old
        .lines()
        .find_map(|line| DATE_CREATED_COMMENT.captures(line).map(|c| c[1].to_string()))
        .unwrap_or_else(|| benefit.date_created.clone());

    let mut date_modified = clock.now();
    if date_modified < date_created {
        debug!(
            "Clock {} is behind creation date {} of {}",
            date_modified, date_created, id
        );
        date_modified = date_created.clone();
    }

    let updated = Benefit {
        id: id.to_string(),
        date_created,
        date_modified: Some(date_modified),
        ..benefit.clone()
    };

    let trailing = &old[old.trim_end().len()..];
    let serialized = serialize_benefit(&updated, updated.content_type(), true);

    let mut out = String::with_capacity(document.len() + serialized.len());
    out.push_str(&document[..range.start]);
    out.push_str(serialized.trim_end());
    out.push_str(trailing);
    out.push_str(&document[range.end..]);

    debug!("Updated benefit {}", id);
    Ok(out)
}

/// Removes the block of record `id`. Blank lines left at the cut are folded
/// to a single empty line.
pub fn delete_benefit(document: &str, id: &str) -> Result<String> {
    let range = find_block(document, id)?;
    let prefix = &document[..range.start];
    let suffix = &document[range.end..];

    let out = if prefix.is_empty() {
        suffix.trim_start_matches('\n').to_string()
    } else if suffix.is_empty() {
        let kept = prefix.trim_end_matches('\n');
        if kept.len() < prefix.len() {
            format!("{}\n", kept)
        } else {
            kept.to_string()
        }
    } else {
        let newlines = trailing_newlines(prefix) + leading_newlines(suffix);
        if newlines > 2 {
            format!(
                "{}\n\n{}",
                prefix.trim_end_matches('\n'),
                suffix.trim_start_matches('\n')
            )
        } else {
            format!("{}{}", prefix, suffix)
        }
    };

    debug!("Deleted benefit {}", id);
    Ok(out)
}

/// Byte range of the block holding the id comment of `id`: from the nearest
/// `## ` line above it up to the next `## ` or `# ` line below it.
pub fn find_block(document: &str, id: &str) -> Result<Range<usize>> {
    let marker = id_comment_for(id)
        .find(document)
        .ok_or_else(|| BenefitError::not_found(id))?;

    let start = match BLOCK_END.find_iter(&document[..marker.start()]).last() {
        Some(boundary) if TOP_LEVEL_HEADING.is_match(boundary.as_str()) => {
            // stray id under a top-level heading: keep the heading line
            document[boundary.start()..marker.start()]
                .find('\n')
                .map(|offset| boundary.start() + offset + 1)
                .unwrap_or(marker.start())
        }
        Some(boundary) => boundary.start(),
        None => 0,
    };

    let end = BLOCK_END
        .find_at(document, marker.end())
        .map(|m| m.start())
        .unwrap_or(document.len());

    Ok(start..end)
}

fn separator_after(text: &str) -> &'static str {
    if text.is_empty() || text.ends_with("\n\n") {
        ""
    } else if text.ends_with('\n') {
        "\n"
    } else {
        "\n\n"
    }
}

fn trailing_newlines(text: &str) -> usize {
    text.len() - text.trim_end_matches('\n').len()
}

fn leading_newlines(text: &str) -> usize {
    text.len() - text.trim_start_matches('\n').len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::{BenefitDraft, Provenance};
    use crate::parser::record::BlockParser;
    use pretty_assertions::assert_eq;
    use regex::Regex;

    const THREE: &str = "---\nauthor: مؤلف\n---\n\n# مقدمة\n\nنص المقدمة\n\n# الفوائد\n\n## أ\n<!-- benefit-id: a -->\n<!-- date-created: 2024-01-01 00:00:00 -->\nالفائدة: نص أ\n\n## ب\n<!-- benefit-id: b -->\n<!-- date-created: 2024-01-02 00:00:00 -->\nالوسوم: قديم\nالفائدة: نص ب\n\n## ج\n<!-- benefit-id: c -->\n<!-- date-created: 2024-01-03 00:00:00 -->\nالفائدة: نص ج\n\n# ملاحظات\n\nخاتمة\n";

    fn benefit(id: &str, title: &str, text: &str) -> Benefit {
        BenefitDraft::new(title, text).into_benefit(id.to_string(), "2024-06-01 12:00:00".to_string())
    }

    fn block_text<'a>(doc: &'a str, id: &str) -> &'a str {
        &doc[find_block(doc, id).unwrap()]
    }

    #[test]
    fn test_insert_creates_section() {
        let doc = "# مقدمة\nنص";
        let out = insert_benefit(doc, &benefit("n1", "جديد", "نص جديد"));

        assert!(out.starts_with("# مقدمة\nنص\n\n# الفوائد\n\n## جديد\n"));
        assert!(out.ends_with("الفائدة: نص جديد\n"));
    }

    #[test]
    fn test_insert_into_empty_document() {
        let out = insert_benefit("", &benefit("n1", "جديد", "نص"));
        assert!(out.starts_with("# الفوائد\n\n## جديد\n"));
    }

    #[test]
    fn test_insert_preserves_trailing_content() {
        let out = insert_benefit(THREE, &benefit("d", "د", "نص د"));
        let tail = "# ملاحظات\n\nخاتمة\n";

        assert!(out.ends_with(tail));
        let section_end = out.len() - tail.len();
        assert!(out[..section_end].ends_with("الفائدة: نص د\n\n"));

        let clock = FixedClock::new("2030-01-01 00:00:00", "gen");
        let parsed = BlockParser::new(&clock).parse_document(&out, &Provenance::default());
        let ids: Vec<&str> = parsed.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_insert_never_writes_modified_date() {
        let mut b = benefit("n1", "جديد", "نص");
        b.date_modified = Some("2024-07-01 00:00:00".to_string());

        let out = insert_benefit("", &b);
        assert!(!out.contains("date-modified"));
    }

    #[test]
    fn test_update_isolation() {
        let clock = FixedClock::new("2024-09-09 09:09:09", "gen");
        let replacement = BenefitDraft::new("ب المعدل", "نص جديد\nسطر ثان")
            .tag("جديد")
            .into_benefit("ignored".to_string(), "1999-01-01 00:00:00".to_string());

        let out = update_benefit(THREE, "b", &replacement, &clock).unwrap();

        assert_eq!(block_text(&out, "a"), block_text(THREE, "a"));
        assert_eq!(block_text(&out, "c"), block_text(THREE, "c"));
        assert!(out.ends_with("# ملاحظات\n\nخاتمة\n"));

        let parsed = BlockParser::new(&clock).parse_document(&out, &Provenance::default());
        let updated = parsed.iter().find(|b| b.id == "b").unwrap();
        assert_eq!(updated.title, "ب المعدل");
        assert_eq!(updated.text, "نص جديد\nسطر ثان");
        assert_eq!(updated.tags, vec!["جديد".to_string()]);
        assert_eq!(updated.date_created, "2024-01-02 00:00:00");
        assert_eq!(updated.date_modified.as_deref(), Some("2024-09-09 09:09:09"));
    }

    #[test]
    fn test_update_last_block_keeps_following_section() {
        let clock = FixedClock::new("2024-09-09 09:09:09", "gen");
        let out = update_benefit(THREE, "c", &benefit("c", "ج", "بديل"), &clock).unwrap();

        assert!(out.contains("الفائدة: بديل\n\n# ملاحظات\n\nخاتمة\n"));
    }

    #[test]
    fn test_update_never_dates_modification_before_creation() {
        let clock = FixedClock::new("2020-01-01 00:00:00", "gen");
        let out = update_benefit(THREE, "a", &benefit("a", "أ", "بديل"), &clock).unwrap();

        let parsed = BlockParser::new(&clock).parse_document(&out, &Provenance::default());
        let updated = parsed.iter().find(|b| b.id == "a").unwrap();
        assert_eq!(updated.date_created, "2024-01-01 00:00:00");
        assert_eq!(updated.date_modified.as_deref(), Some("2024-01-01 00:00:00"));
    }

    #[test]
    fn test_update_unknown_id() {
        let clock = FixedClock::new("2024-09-09 09:09:09", "gen");
        let err = update_benefit(THREE, "zzz", &benefit("zzz", "x", "y"), &clock).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_middle_block() {
        let out = delete_benefit(THREE, "b").unwrap();

        assert!(!out.contains("benefit-id: b"));
        assert!(!Regex::new(r"\n{3,}").unwrap().is_match(&out));
        assert_eq!(block_text(&out, "a"), block_text(THREE, "a"));
        assert!(out.contains("الفائدة: نص أ\n\n## ج\n"));

        let clock = FixedClock::new("2030-01-01 00:00:00", "gen");
        let parsed = BlockParser::new(&clock).parse_document(&out, &Provenance::default());
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_delete_last_block() {
        let out = delete_benefit(THREE, "c").unwrap();

        assert!(out.contains("الفائدة: نص ب\n\n# ملاحظات\n\nخاتمة\n"));
    }

    #[test]
    fn test_delete_collapses_blank_lines_at_cut() {
        let doc = "# الفوائد\n\n## أ\n<!-- benefit-id: a -->\nالفائدة: نص\n\n\n\n## ب\n<!-- benefit-id: b -->\nالفائدة: ثان\n";
        let out = delete_benefit(doc, "b").unwrap();

        assert_eq!(out, "# الفوائد\n\n## أ\n<!-- benefit-id: a -->\nالفائدة: نص\n");
    }

    #[test]
    fn test_delete_unknown_id_leaves_document() {
        let err = delete_benefit(THREE, "missing").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_find_block_does_not_match_id_prefix() {
        let doc = "# الفوائد\n## أ\n<!-- benefit-id: ab -->\nالفائدة: نص\n";
        assert!(find_block(doc, "a").is_err());
    }
}
