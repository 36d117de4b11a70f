// file: src/vault/mod.rs
// description: vault scanning and benefit collection module exports
// reference: internal module structure

pub mod classifier;
pub mod collector;
pub mod scanner;

pub use classifier::ContentTypeClassifier;
pub use collector::VaultCollector;
pub use scanner::{ScannedNote, VaultScanner};
