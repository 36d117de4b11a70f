// file: src/filter/mod.rs
// description: faceted filter engine module exports
// reference: internal module structure

pub mod engine;
pub mod facets;
pub mod query;

pub use engine::{
    FilterEngine, FilteredBenefit, HighlightMarkers, highlight, path_matches, term_patterns,
};
pub use facets::Facets;
pub use query::{FilterQuery, Sort, SortDirection, SortKey};
