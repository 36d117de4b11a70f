// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod clock;
pub mod config;
pub mod document;
pub mod error;
pub mod exporter;
pub mod filter;
pub mod models;
pub mod parser;
pub mod utils;
pub mod vault;

pub use clock::{ClockIdProvider, FixedClock, SystemClock};
pub use config::{Config, DisplayConfig, VaultConfig};
pub use document::{
    BenefitEditor, DocumentStore, FsDocumentStore, delete_benefit, find_block, insert_benefit,
    update_benefit,
};
pub use error::{BenefitError, Result};
pub use exporter::{ExportManifest, JsonExporter};
pub use filter::{
    Facets, FilterEngine, FilterQuery, FilteredBenefit, HighlightMarkers, SortDirection, SortKey,
};
pub use models::{Benefit, BenefitDraft, ContentType, Provenance};
pub use parser::{BlockParser, LineKind, locate_section, serialize_benefit, split_blocks};
pub use utils::Validator;
pub use vault::{ContentTypeClassifier, VaultCollector, VaultScanner};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _engine = FilterEngine::default();
        let _clock = SystemClock;
    }
}
