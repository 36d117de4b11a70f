// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod benefit;
pub mod draft;

pub use benefit::{Benefit, ContentType, Provenance, push_unique};
pub use draft::BenefitDraft;
