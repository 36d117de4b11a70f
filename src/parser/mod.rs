// file: src/parser/mod.rs
// description: benefit block grammar, parsing and serialization module exports
// reference: internal module structure

pub mod frontmatter;
pub mod grammar;
pub mod record;
pub mod section;
pub mod serializer;

pub use frontmatter::{Frontmatter, FrontmatterParser};
pub use record::{BlockParser, LineKind};
pub use section::{Section, locate_section, split_blocks};
pub use serializer::serialize_benefit;
