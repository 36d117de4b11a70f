// file: src/document/mod.rs
// description: document mutation, storage and editing module exports
// reference: internal module structure

pub mod editor;
pub mod mutator;
pub mod store;

pub use editor::BenefitEditor;
pub use mutator::{delete_benefit, find_block, insert_benefit, update_benefit};
pub use store::{DocumentStore, FsDocumentStore};
