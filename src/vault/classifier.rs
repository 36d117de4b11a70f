// file: src/vault/classifier.rs
// description: folder-prefix mapping from note path to content type
// reference: configurable path-based classification

use crate::models::ContentType;
use std::path::{Component, Path};
use tracing::debug;

pub struct ContentTypeClassifier {
    book_folder: String,
    video_folder: String,
}

impl ContentTypeClassifier {
    pub fn new(book_folder: impl Into<String>, video_folder: impl Into<String>) -> Self {
        Self {
            book_folder: book_folder.into(),
            video_folder: video_folder.into(),
        }
    }

    /// Content type of a note given its path relative to the vault root.
    /// Notes outside both folders are treated as books.
    pub fn classify(&self, relative_path: &Path) -> ContentType {
        if self.is_under(relative_path, &self.video_folder) {
            ContentType::Video
        } else {
            if !self.is_under(relative_path, &self.book_folder) {
                debug!("{} is outside the book and video folders", relative_path.display());
            }
            ContentType::Book
        }
    }

    fn is_under(&self, path: &Path, folder: &str) -> bool {
        let folder = Path::new(folder.trim_matches('/'));
        let relative: std::path::PathBuf = path
            .components()
            .filter(|c| !matches!(c, Component::CurDir | Component::RootDir))
            .collect();

        !folder.as_os_str().is_empty() && relative.starts_with(folder)
    }
}
