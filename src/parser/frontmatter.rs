// file: src/parser/frontmatter.rs
// description: YAML frontmatter of a note, source of benefit provenance
// reference: https://docs.rs/yaml-rust

use crate::error::{BenefitError, Result};
use crate::models::ContentType;
use std::collections::HashMap;
use yaml_rust::{Yaml, YamlLoader};

pub struct FrontmatterParser;

#[derive(Debug, Clone, Default)]
pub struct Frontmatter {
    pub fields: HashMap<String, String>,
}

impl Frontmatter {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn author(&self) -> Option<&str> {
        self.get("author").or_else(|| self.get("المؤلف"))
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title").or_else(|| self.get("العنوان"))
    }

    /// `type: book|video`, when present and recognised.
    pub fn content_type(&self) -> Option<ContentType> {
        self.get("type").and_then(|v| v.parse().ok())
    }
}

impl FrontmatterParser {
    pub fn new() -> Self {
        Self
    }

    /// Splits a leading `---` fenced block off `content`. Notes without one
    /// yield `None`.
    pub fn extract(&self, content: &str, file: &str) -> Result<Option<Frontmatter>> {
        if !content.starts_with("---") {
            return Ok(None);
        }

        let parts: Vec<&str> = content.splitn(3, "---").collect();

        if parts.len() < 3 {
            return Ok(None);
        }

        let docs =
            YamlLoader::load_from_str(parts[1].trim()).map_err(|e| BenefitError::Frontmatter {
                file: file.to_string(),
                message: format!("YAML parse error: {}", e),
            })?;

        let Some(doc) = docs.first() else {
            return Ok(None);
        };

        let mut fields = HashMap::new();

        if let Yaml::Hash(hash) = doc {
            for (key, value) in hash {
                let Yaml::String(k) = key else { continue };
                if let Some(v) = scalar_to_string(value) {
                    fields.insert(k.clone(), v);
                }
            }
        }

        Ok(Some(Frontmatter { fields }))
    }
}

impl Default for FrontmatterParser {
    fn default() -> Self {
        Self::new()
    }
}

fn scalar_to_string(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) | Yaml::Real(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Boolean(b) => Some(b.to_string()),
        // first author of a list
        Yaml::Array(items) => items.first().and_then(scalar_to_string),
        _ => None,
    }
}
