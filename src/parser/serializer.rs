// file: src/parser/serializer.rs
// description: renders a benefit record as canonical block text
// reference: fixed-order labeled field emission

use crate::models::{Benefit, ContentType};
use crate::parser::grammar::*;

/// Renders `benefit` in canonical field order. Page and volume are written
/// for books, the timestamp for videos. The body always comes last, and the
/// block ends with a newline.
pub fn serialize_benefit(
    benefit: &Benefit,
    content_type: ContentType,
    include_modified: bool,
) -> String {
    let mut lines = Vec::with_capacity(10);

    lines.push(format!("{}{}", TITLE_PREFIX, benefit.title.trim()));
    lines.push(comment(ID_MARKER, &benefit.id));
    lines.push(comment(DATE_CREATED_MARKER, &benefit.date_created));

    if include_modified && let Some(modified) = &benefit.date_modified {
        lines.push(comment(DATE_MODIFIED_MARKER, modified));
    }

    match content_type {
        ContentType::Book => {
            if let Some(page) = benefit.page_number {
                lines.push(format!("{} {}", PAGE_LABEL, page));
            }
            if let Some(volume) = benefit.volume_number {
                lines.push(format!("{} {}", VOLUME_LABEL, volume));
            }
        }
        ContentType::Video => {
            if let Some(seconds) = benefit.timestamp {
                lines.push(format!("{} {}", TIMESTAMP_LABEL, format_timestamp(seconds)));
            }
        }
    }

    if !benefit.categories.is_empty() {
        lines.push(format!("{} {}", CATEGORIES_LABEL, join_list(&benefit.categories)));
    }
    if !benefit.tags.is_empty() {
        lines.push(format!("{} {}", TAGS_LABEL, join_list(&benefit.tags)));
    }

    lines.push(format!("{} {}", BODY_LABEL, benefit.text.trim()));

    let mut block = lines.join("\n");
    block.push('\n');
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::parser::record::BlockParser;
    use pretty_assertions::assert_eq;

    fn sample() -> Benefit {
        let mut benefit = Benefit::new(
            "x1".to_string(),
            "عنوان".to_string(),
            "السطر الأول\n\n- نقطة\n**مهم**".to_string(),
            "2024-01-01 00:00:00".to_string(),
        );
        benefit.categories = vec!["فقه/صلاة".to_string(), "عقيدة".to_string()];
        benefit.tags = vec!["مهم".to_string()];
        benefit
    }

    #[test]
    fn test_canonical_book_layout() {
        let mut benefit = sample();
        benefit.page_number = Some(12);
        benefit.volume_number = Some(2);
        benefit.date_modified = Some("2024-03-01 10:00:00".to_string());

        let block = serialize_benefit(&benefit, ContentType::Book, true);

        assert_eq!(
            block,
            "## عنوان\n\
             <!-- benefit-id: x1 -->\n\
             <!-- date-created: 2024-01-01 00:00:00 -->\n\
             <!-- date-modified: 2024-03-01 10:00:00 -->\n\
             الصفحة: 12\n\
             المجلد: 2\n\
             التصنيفات: فقه/صلاة، عقيدة\n\
             الوسوم: مهم\n\
             الفائدة: السطر الأول\n\n- نقطة\n**مهم**\n"
        );
    }

    #[test]
    fn test_video_layout_skips_book_fields() {
        let mut benefit = sample();
        benefit.page_number = Some(12);
        benefit.timestamp = Some(3725);

        let block = serialize_benefit(&benefit, ContentType::Video, false);

        assert!(block.contains("الوقت: 1:02:05\n"));
        assert!(!block.contains(PAGE_LABEL));
    }

    #[test]
    fn test_modified_is_optional() {
        let mut benefit = sample();
        benefit.date_modified = Some("2024-03-01 10:00:00".to_string());

        let block = serialize_benefit(&benefit, ContentType::Book, false);

        assert!(!block.contains(DATE_MODIFIED_MARKER));
    }

    #[test]
    fn test_round_trip_book() {
        let clock = FixedClock::new("2030-01-01 00:00:00", "unused");
        let parser = BlockParser::new(&clock);
        let mut benefit = sample();
        benefit.page_number = Some(7);
        benefit.volume_number = Some(1);
        benefit.date_modified = Some("2024-03-01 10:00:00".to_string());

        let parsed = parser
            .parse_block(&serialize_benefit(&benefit, ContentType::Book, true))
            .unwrap();

        assert_eq!(parsed, benefit);
    }

    #[test]
    fn test_round_trip_video_without_modified() {
        let clock = FixedClock::new("2030-01-01 00:00:00", "unused");
        let parser = BlockParser::new(&clock);
        let mut benefit = sample();
        benefit.timestamp = Some(95);
        benefit.categories.clear();
        benefit.date_modified = Some("2024-03-01 10:00:00".to_string());

        let parsed = parser
            .parse_block(&serialize_benefit(&benefit, ContentType::Video, false))
            .unwrap();

        benefit.date_modified = None;
        assert_eq!(parsed, benefit);
    }
}
