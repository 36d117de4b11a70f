// file: src/vault/collector.rs
// description: gathers every benefit of a vault with provenance from each note
// reference: per-file processing that logs and skips failures

use crate::clock::ClockIdProvider;
use crate::config::VaultConfig;
use crate::document::store::DocumentStore;
use crate::error::Result;
use crate::models::{Benefit, Provenance};
use crate::parser::{BlockParser, FrontmatterParser};
use crate::vault::classifier::ContentTypeClassifier;
use crate::vault::scanner::VaultScanner;
use std::path::Path;
use tracing::{info, warn};

pub struct VaultCollector<'a, S: DocumentStore, C: ClockIdProvider> {
    store: &'a S,
    clock: &'a C,
    scanner: VaultScanner,
    classifier: ContentTypeClassifier,
    frontmatter: FrontmatterParser,
}

impl<'a, S: DocumentStore, C: ClockIdProvider> VaultCollector<'a, S, C> {
    pub fn new(store: &'a S, clock: &'a C, config: &VaultConfig) -> Self {
        Self {
            store,
            clock,
            scanner: VaultScanner::new(config),
            classifier: ContentTypeClassifier::new(&config.book_folder, &config.video_folder),
            frontmatter: FrontmatterParser::new(),
        }
    }

    /// Every benefit under `root`. Notes that cannot be read are skipped.
    pub async fn collect(&self, root: &Path) -> Result<Vec<Benefit>> {
        let notes = self.scanner.scan(root)?;
        let mut benefits = Vec::new();
        let mut failed = 0usize;

        for note in &notes {
            match self.collect_note(&note.relative_path).await {
                Ok(found) => benefits.extend(found),
                Err(e) => {
                    failed += 1;
                    warn!("Failed to read {}: {}", note.relative_path, e);
                }
            }
        }

        info!(
            "Collected {} benefits from {} notes ({} failed)",
            benefits.len(),
            notes.len(),
            failed
        );
        Ok(benefits)
    }

    pub async fn collect_note(&self, relative_path: &str) -> Result<Vec<Benefit>> {
        let document = self.store.read(Path::new(relative_path)).await?;
        let provenance = self.provenance(relative_path, &document);
        Ok(BlockParser::new(self.clock).parse_document(&document, &provenance))
    }

    /// Reads one note and resolves its provenance without parsing records.
    pub async fn note_provenance(&self, relative_path: &str) -> Result<Provenance> {
        let document = self.store.read(Path::new(relative_path)).await?;
        Ok(self.provenance(relative_path, &document))
    }

    /// Provenance of a note: frontmatter first, folder mapping and file name
    /// as fallbacks.
    pub fn provenance(&self, relative_path: &str, document: &str) -> Provenance {
        let frontmatter = match self.frontmatter.extract(document, relative_path) {
            Ok(frontmatter) => frontmatter.unwrap_or_default(),
            Err(e) => {
                warn!("Ignoring frontmatter: {}", e);
                Default::default()
            }
        };

        let path = Path::new(relative_path);
        let parent_title = frontmatter
            .title()
            .map(str::to_string)
            .or_else(|| path.file_stem().map(|s| s.to_string_lossy().to_string()))
            .unwrap_or_default();

        Provenance {
            file_path: relative_path.to_string(),
            content_type: frontmatter
                .content_type()
                .unwrap_or_else(|| self.classifier.classify(path)),
            parent_title,
            author: frontmatter.author().unwrap_or_default().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::document::store::FsDocumentStore;
    use crate::models::ContentType;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn vault_config() -> VaultConfig {
        VaultConfig {
            root: PathBuf::new(),
            book_folder: "books".to_string(),
            video_folder: "videos".to_string(),
            skip_patterns: vec![],
            max_file_size_mb: 10,
        }
    }

    #[tokio::test]
    async fn test_collect_vault() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("books")).unwrap();
        fs::create_dir_all(temp.path().join("videos")).unwrap();
        fs::write(
            temp.path().join("books/zad.md"),
            "---\ntitle: زاد المعاد\nauthor: ابن القيم\n---\n\n# الفوائد\n\n## أ\n<!-- benefit-id: a -->\nالصفحة: 3\nالفائدة: نص أ\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("videos/lesson.md"),
            "# الفوائد\n\n## ب\n<!-- benefit-id: b -->\nالوقت: 10:05\nالفائدة: نص ب\n",
        )
        .unwrap();
        fs::write(temp.path().join("empty.md"), "# لا شيء\n").unwrap();

        let store = FsDocumentStore::new(temp.path());
        let clock = FixedClock::new("2024-01-01 00:00:00", "gen");
        let collector = VaultCollector::new(&store, &clock, &vault_config());

        let benefits = collector.collect(temp.path()).await.unwrap();

        assert_eq!(benefits.len(), 2);
        let a = &benefits[0];
        assert_eq!(a.provenance.author, "ابن القيم");
        assert_eq!(a.provenance.parent_title, "زاد المعاد");
        assert_eq!(a.provenance.file_path, "books/zad.md");
        assert_eq!(a.content_type(), ContentType::Book);

        let b = &benefits[1];
        assert_eq!(b.provenance.parent_title, "lesson");
        assert_eq!(b.content_type(), ContentType::Video);
        assert_eq!(b.timestamp, Some(605));
    }

    #[test]
    fn test_frontmatter_type_overrides_folder() {
        let store = FsDocumentStore::new(".");
        let clock = FixedClock::new("2024-01-01 00:00:00", "gen");
        let collector = VaultCollector::new(&store, &clock, &vault_config());

        let provenance = collector.provenance("books/talk.md", "---\ntype: video\n---\n");

        assert_eq!(provenance.content_type, ContentType::Video);
    }

    #[tokio::test]
    async fn test_note_provenance_reads_frontmatter_type() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("books")).unwrap();
        fs::write(
            temp.path().join("books/talk.md"),
            "---\ntype: video\ntitle: محاضرة\n---\n\nنص\n",
        )
        .unwrap();
        fs::write(temp.path().join("books/plain.md"), "نص\n").unwrap();

        let store = FsDocumentStore::new(temp.path());
        let clock = FixedClock::new("2024-01-01 00:00:00", "gen");
        let collector = VaultCollector::new(&store, &clock, &vault_config());

        let talk = collector.note_provenance("books/talk.md").await.unwrap();
        assert_eq!(talk.content_type, ContentType::Video);
        assert_eq!(talk.parent_title, "محاضرة");

        let plain = collector.note_provenance("books/plain.md").await.unwrap();
        assert_eq!(plain.content_type, ContentType::Book);

        assert!(collector.note_provenance("books/missing.md").await.is_err());
    }
}
