// file: src/filter/engine.rs
// description: faceted filtering, multi-term search with highlighting, and sorting
// reference: https://docs.rs/regex

use crate::filter::query::{FilterQuery, Sort, SortDirection, SortKey};
use crate::models::Benefit;
use regex::{Captures, Regex, RegexBuilder};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightMarkers {
    pub open: String,
    pub close: String,
}

impl Default for HighlightMarkers {
    fn default() -> Self {
        Self {
            open: "<mark>".to_string(),
            close: "</mark>".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FilteredBenefit {
    #[serde(flatten)]
    pub benefit: Benefit,
    /// Body with search terms wrapped in markers; set only for text searches.
    pub highlighted: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    markers: HighlightMarkers,
}

impl FilterEngine {
    pub fn new(markers: HighlightMarkers) -> Self {
        Self { markers }
    }

    /// Returns the records matching every active dimension of `query`, in
    /// input order unless the query asks for a sort.
    pub fn apply(&self, benefits: &[Benefit], query: &FilterQuery) -> Vec<FilteredBenefit> {
        let mut results: Vec<FilteredBenefit> = if query.is_empty() {
            benefits
                .iter()
                .cloned()
                .map(|benefit| FilteredBenefit {
                    benefit,
                    highlighted: None,
                })
                .collect()
        } else {
            let patterns = term_patterns(&query.terms());

            benefits
                .iter()
                .filter(|b| matches_paths(&b.tags, &query.tags))
                .filter(|b| matches_paths(&b.categories, &query.categories))
                .filter(|b| matches_member(&b.provenance.author, &query.authors))
                .filter(|b| matches_member(&b.provenance.parent_title, &query.sources))
                .filter(|b| {
                    query.content_types.is_empty()
                        || query.content_types.contains(&b.provenance.content_type)
                })
                .filter(|b| within_dates(&b.date_created, query))
                .filter(|b| patterns.iter().all(|p| p.is_match(&b.text)))
                .map(|b| FilteredBenefit {
                    benefit: b.clone(),
                    highlighted: (!patterns.is_empty())
                        .then(|| highlight(&b.text, &patterns, &self.markers)),
                })
                .collect()
        };

        if let Some(sort) = query.sort {
            sort_results(&mut results, sort);
        }

        debug!("Filter kept {} of {} benefits", results.len(), benefits.len());
        results
    }
}

/// `path` and `filter` match when equal or when one is an ancestor of the other.
pub fn path_matches(path: &str, filter: &str) -> bool {
    path == filter || is_descendant(path, filter) || is_descendant(filter, path)
}

fn is_descendant(path: &str, ancestor: &str) -> bool {
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path[ancestor.len()..].starts_with('/')
}

fn matches_paths(paths: &[String], selected: &BTreeSet<String>) -> bool {
    selected.is_empty()
        || paths
            .iter()
            .any(|path| selected.iter().any(|filter| path_matches(path, filter)))
}

fn matches_member(value: &str, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || selected.contains(value)
}

/// Inclusive bounds; a date-only bound compares against the date prefix.
fn within_dates(created: &str, query: &FilterQuery) -> bool {
    let after_start = query
        .date_from
        .as_deref()
        .is_none_or(|from| created >= from.trim());

    let before_end = query.date_to.as_deref().is_none_or(|to| {
        let to = to.trim();
        created.get(..to.len()).unwrap_or(created) <= to
    });

    after_start && before_end
}

/// One case-insensitive literal pattern per term. Matching and highlighting
/// both go through these so they agree on case folding.
pub fn term_patterns(terms: &[String]) -> Vec<Regex> {
    terms
        .iter()
        .filter(|t| !t.is_empty())
        .filter_map(|term| {
            RegexBuilder::new(&regex::escape(term))
                .case_insensitive(true)
                .build()
                .ok()
        })
        .collect()
}

/// Wraps every occurrence of each pattern, one pass per pattern.
pub fn highlight(text: &str, patterns: &[Regex], markers: &HighlightMarkers) -> String {
    let mut out = text.to_string();

    for pattern in patterns {
        out = pattern
            .replace_all(&out, |caps: &Captures| {
                format!("{}{}{}", markers.open, &caps[0], markers.close)
            })
            .into_owned();
    }

    out
}

fn sort_results(results: &mut [FilteredBenefit], sort: Sort) {
    results.sort_by(|a, b| {
        let ordering = compare(&a.benefit, &b.benefit, sort.key);
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn compare(a: &Benefit, b: &Benefit, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => a.title.cmp(&b.title),
        SortKey::Author => a.provenance.author.cmp(&b.provenance.author),
        SortKey::ParentTitle => a.provenance.parent_title.cmp(&b.provenance.parent_title),
        SortKey::DateCreated => a.date_created.cmp(&b.date_created),
        // None sorts first
        SortKey::DateModified => a.date_modified.as_deref().cmp(&b.date_modified.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentType, Provenance};

    fn benefit(id: &str, text: &str, tags: &[&str]) -> Benefit {
        let mut b = Benefit::new(
            id.to_string(),
            format!("عنوان {}", id),
            text.to_string(),
            "2024-01-01 00:00:00".to_string(),
        );
        b.tags = tags.iter().map(|t| t.to_string()).collect();
        b
    }

    fn ids(results: &[FilteredBenefit]) -> Vec<&str> {
        results.iter().map(|r| r.benefit.id.as_str()).collect()
    }

    #[test]
    fn test_path_matching() {
        assert!(path_matches("فقه", "فقه"));
        assert!(path_matches("فقه/صلاة", "فقه"));
        assert!(path_matches("فقه", "فقه/صلاة"));
        assert!(!path_matches("فقهيات", "فقه"));
        assert!(!path_matches("فقه/صلاة", "فقه/زكاة"));
    }

    #[test]
    fn test_hierarchical_filter_symmetry() {
        let engine = FilterEngine::default();
        let records = vec![
            benefit("1", "نص", &["فقه"]),
            benefit("2", "نص", &["فقه/صلاة"]),
            benefit("3", "نص", &["عقيدة"]),
        ];

        let by_parent = engine.apply(&records, &FilterQuery::new().with_tag("فقه"));
        assert_eq!(ids(&by_parent), vec!["1", "2"]);

        let by_child = engine.apply(&records, &FilterQuery::new().with_tag("فقه/صلاة"));
        assert_eq!(ids(&by_child), vec!["1", "2"]);
    }

    #[test]
    fn test_search_and_semantics() {
        let engine = FilterEngine::default();
        let records = vec![benefit("1", "القرآن الكريم عظيم", &[])];

        assert_eq!(engine.apply(&records, &FilterQuery::new().with_text("قرآن عظيم")).len(), 1);
        assert_eq!(engine.apply(&records, &FilterQuery::new().with_text("عظيم قرآن")).len(), 1);
        assert!(engine.apply(&records, &FilterQuery::new().with_text("قرآن فقه")).is_empty());
    }

    #[test]
    fn test_highlight_case_insensitive() {
        let markers = HighlightMarkers::default();
        let patterns = term_patterns(&["rust".to_string()]);
        let out = highlight("Rust and rust", &patterns, &markers);
        assert_eq!(out, "<mark>Rust</mark> and <mark>rust</mark>");
    }

    #[test]
    fn test_every_match_is_highlighted() {
        let engine = FilterEngine::default();
        let records = vec![
            benefit("1", "İstanbul", &[]),
            benefit("2", "RUST and rust", &[]),
        ];

        for (text, expected) in [("İstanbul", "1"), ("Rust", "2")] {
            let results = engine.apply(&records, &FilterQuery::new().with_text(text));
            assert_eq!(ids(&results), vec![expected]);
            let highlighted = results[0].highlighted.as_deref().unwrap();
            assert!(highlighted.contains("<mark>"), "{}", highlighted);
        }

        let results = engine.apply(&records, &FilterQuery::new().with_text("rust"));
        assert_eq!(
            results[0].highlighted.as_deref(),
            Some("<mark>RUST</mark> and <mark>rust</mark>")
        );
    }

    #[test]
    fn test_empty_query_keeps_everything_in_order() {
        let engine = FilterEngine::default();
        let records = vec![benefit("b", "نص", &["x"]), benefit("a", "نص", &[])];

        let results = engine.apply(&records, &FilterQuery::new());
        assert_eq!(ids(&results), vec!["b", "a"]);
        assert!(results.iter().all(|r| r.highlighted.is_none()));
    }

    #[test]
    fn test_highlight_only_for_text_queries() {
        let engine = FilterEngine::new(HighlightMarkers {
            open: "[".to_string(),
            close: "]".to_string(),
        });
        let records = vec![benefit("1", "القرآن الكريم", &["x"])];

        let with_text = engine.apply(&records, &FilterQuery::new().with_text("الكريم"));
        assert_eq!(with_text[0].highlighted.as_deref(), Some("القرآن [الكريم]"));

        let without = engine.apply(&records, &FilterQuery::new().with_tag("x"));
        assert_eq!(without[0].highlighted, None);
    }

    #[test]
    fn test_dimensions_are_anded() {
        let engine = FilterEngine::default();
        let mut a = benefit("a", "نص", &["فقه"]);
        a.provenance = Provenance {
            author: "ابن القيم".to_string(),
            parent_title: "زاد المعاد".to_string(),
            ..Default::default()
        };
        let mut b = benefit("b", "نص", &["فقه"]);
        b.provenance.author = "النووي".to_string();
        b.provenance.content_type = ContentType::Video;
        let records = vec![a, b];

        let query = FilterQuery::new().with_tag("فقه").with_author("ابن القيم");
        assert_eq!(ids(&engine.apply(&records, &query)), vec!["a"]);

        let query = FilterQuery::new().with_author("ابن القيم").with_author("النووي");
        assert_eq!(ids(&engine.apply(&records, &query)), vec!["a", "b"]);

        let query = FilterQuery::new().with_source("زاد المعاد");
        assert_eq!(ids(&engine.apply(&records, &query)), vec!["a"]);

        let query = FilterQuery::new().with_content_type(ContentType::Video);
        assert_eq!(ids(&engine.apply(&records, &query)), vec!["b"]);
    }

    #[test]
    fn test_date_range() {
        let engine = FilterEngine::default();
        let mut early = benefit("early", "نص", &[]);
        early.date_created = "2024-01-31 23:59:59".to_string();
        let mut late = benefit("late", "نص", &[]);
        late.date_created = "2024-02-01 00:00:00".to_string();
        let records = vec![early, late];

        let query = FilterQuery::new().created_between(None, Some("2024-01-31".to_string()));
        assert_eq!(ids(&engine.apply(&records, &query)), vec!["early"]);

        let query = FilterQuery::new().created_between(Some("2024-02-01".to_string()), None);
        assert_eq!(ids(&engine.apply(&records, &query)), vec!["late"]);
    }

    #[test]
    fn test_sort_modified_missing_first_and_stable() {
        let engine = FilterEngine::default();
        let mut a = benefit("a", "نص", &[]);
        a.date_modified = Some("2024-03-01 00:00:00".to_string());
        let b = benefit("b", "نص", &[]);
        let c = benefit("c", "نص", &[]);
        let records = vec![a, b, c];

        let asc = engine.apply(
            &records,
            &FilterQuery::new().sorted_by(SortKey::DateModified, SortDirection::Ascending),
        );
        assert_eq!(ids(&asc), vec!["b", "c", "a"]);

        let desc = engine.apply(
            &records,
            &FilterQuery::new().sorted_by(SortKey::DateModified, SortDirection::Descending),
        );
        assert_eq!(ids(&desc), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_by_title() {
        let engine = FilterEngine::default();
        let records = vec![benefit("2", "نص", &[]), benefit("1", "نص", &[])];

        let sorted = engine.apply(
            &records,
            &FilterQuery::new().sorted_by(SortKey::Title, SortDirection::Ascending),
        );
        assert_eq!(ids(&sorted), vec!["1", "2"]);
    }
}
