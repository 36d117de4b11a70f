// file: src/models/draft.rs
// description: caller-supplied benefit content before id and dates are stamped
// reference: builder pattern for record construction

use crate::models::benefit::{Benefit, ContentType, push_unique};

/// Content of a benefit as entered by a user. The editor turns it into a
/// [`Benefit`] by attaching an id and dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BenefitDraft {
    pub title: String,
    pub text: String,
    pub content_type: ContentType,
    pub page_number: Option<u32>,
    pub volume_number: Option<u32>,
    pub timestamp: Option<u32>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

impl BenefitDraft {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page_number = Some(page);
        self
    }

    pub fn volume(mut self, volume: u32) -> Self {
        self.volume_number = Some(volume);
        self
    }

    pub fn timestamp(mut self, seconds: u32) -> Self {
        self.timestamp = Some(seconds);
        self
    }

    pub fn category(mut self, path: impl Into<String>) -> Self {
        push_unique(&mut self.categories, path.into());
        self
    }

    pub fn tag(mut self, path: impl Into<String>) -> Self {
        push_unique(&mut self.tags, path.into());
        self
    }

    /// Builds the record. Location fields that do not belong to the content
    /// type are dropped.
    pub fn into_benefit(self, id: String, date_created: String) -> Benefit {
        let is_book = self.content_type.is_book();
        let mut benefit = Benefit::new(id, self.title, self.text, date_created);
        benefit.page_number = self.page_number.filter(|_| is_book);
        benefit.volume_number = self.volume_number.filter(|_| is_book);
        benefit.timestamp = self.timestamp.filter(|_| !is_book);
        benefit.categories = self.categories;
        benefit.tags = self.tags;
        benefit.provenance.content_type = self.content_type;
        benefit
    }
}
