// file: src/filter/facets.rs
// description: hierarchical tag/category counts and distinct authors and sources
// reference: faceted navigation over path-shaped labels

use crate::models::Benefit;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, Serialize)]
pub struct Facets {
    /// Records per tag node; `A/B` also counts toward `A`.
    pub tags: BTreeMap<String, usize>,
    pub categories: BTreeMap<String, usize>,
    pub authors: BTreeSet<String>,
    pub sources: BTreeSet<String>,
}

impl Facets {
    pub fn from_benefits(benefits: &[Benefit]) -> Self {
        let mut facets = Self::default();

        for benefit in benefits {
            count_nodes(&mut facets.tags, &benefit.tags);
            count_nodes(&mut facets.categories, &benefit.categories);

            if !benefit.provenance.author.is_empty() {
                facets.authors.insert(benefit.provenance.author.clone());
            }
            if !benefit.provenance.parent_title.is_empty() {
                facets.sources.insert(benefit.provenance.parent_title.clone());
            }
        }

        facets
    }

    /// Direct children of `parent` in `tree`; an empty parent lists the roots.
    pub fn children<'a>(tree: &'a BTreeMap<String, usize>, parent: &str) -> Vec<(&'a str, usize)> {
        tree.iter()
            .filter(|(path, _)| match parent {
                "" => !path.contains('/'),
                _ => path
                    .strip_prefix(parent)
                    .and_then(|rest| rest.strip_prefix('/'))
                    .is_some_and(|rest| !rest.contains('/')),
            })
            .map(|(path, count)| (path.as_str(), *count))
            .collect()
    }
}

/// Every ancestor path of `path`, itself included: `A`, `A/B`, `A/B/C`.
pub fn ancestors(path: &str) -> Vec<&str> {
    path.char_indices()
        .filter(|(_, c)| *c == '/')
        .map(|(i, _)| &path[..i])
        .chain(std::iter::once(path))
        .filter(|p| !p.is_empty())
        .collect()
}

fn count_nodes(tree: &mut BTreeMap<String, usize>, paths: &[String]) {
    let nodes: BTreeSet<&str> = paths.iter().flat_map(|p| ancestors(p)).collect();
    for node in nodes {
        *tree.entry(node.to_string()).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(tags: &[&str], author: &str) -> Benefit {
        let mut b = Benefit::default();
        b.tags = tags.iter().map(|t| t.to_string()).collect();
        b.provenance.author = author.to_string();
        b
    }

    #[test]
    fn test_ancestors() {
        assert_eq!(ancestors("أ/ب/ج"), vec!["أ", "أ/ب", "أ/ب/ج"]);
        assert_eq!(ancestors("أ"), vec!["أ"]);
    }

    #[test]
    fn test_counts_each_record_once_per_node() {
        let benefits = vec![
            tagged(&["فقه/صلاة", "فقه/زكاة"], "النووي"),
            tagged(&["فقه"], ""),
        ];

        let facets = Facets::from_benefits(&benefits);

        assert_eq!(facets.tags.get("فقه"), Some(&2));
        assert_eq!(facets.tags.get("فقه/صلاة"), Some(&1));
        assert_eq!(facets.authors.len(), 1);
    }

    #[test]
    fn test_children() {
        let benefits = vec![tagged(&["فقه/صلاة/سنن", "عقيدة"], "")];
        let facets = Facets::from_benefits(&benefits);

        let roots: Vec<&str> = Facets::children(&facets.tags, "").into_iter().map(|(p, _)| p).collect();
        assert_eq!(roots, vec!["عقيدة", "فقه"]);

        let under = Facets::children(&facets.tags, "فقه");
        assert_eq!(under, vec![("فقه/صلاة", 1)]);
    }
}
