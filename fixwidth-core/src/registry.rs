//! Schema registry: the immutable tree of sources and record types

use crate::config::SchemaDocument;
use crate::error::SchemaError;
use crate::schema::{RecordSchema, SourceSchema};
use hashbrown::HashMap;
use std::path::Path;

#[cfg(feature = "logging")]
use tracing::info;

/// All sources known to a parser
///
/// Populated once (from a document or by hand) and then only read.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    sources: Vec<SourceSchema>,
    index: HashMap<String, usize>,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source; names must be unique
    pub fn add_source(&mut self, source: SourceSchema) -> Result<(), SchemaError> {
        if self.index.contains_key(source.name()) {
            return Err(SchemaError::DuplicateSource(source.name().to_string()));
        }

        #[cfg(feature = "logging")]
        info!("Loaded source: {}", source.name());

        self.index.insert(source.name().to_string(), self.sources.len());
        self.sources.push(source);
        Ok(())
    }

    /// Chaining form of [`add_source`](Self::add_source)
    pub fn with_source(mut self, source: SourceSchema) -> Result<Self, SchemaError> {
        self.add_source(source)?;
        Ok(self)
    }

    /// Build from a parsed document
    pub fn from_document(document: &SchemaDocument) -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        for source in document.resolve()? {
            registry.add_source(source)?;
        }
        Ok(registry)
    }

    /// Build from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self, SchemaError> {
        Self::from_document(&SchemaDocument::from_yaml_str(content)?)
    }

    /// Build from a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SchemaError::Io(format!("{}: {}", path.display(), e))
        })?;
        let registry = Self::from_yaml_str(&content)?;

        #[cfg(feature = "logging")]
        info!(
            "Loaded {} sources from {}",
            registry.source_count(),
            path.display()
        );

        Ok(registry)
    }

    /// Look up a source
    pub fn source(&self, name: &str) -> Option<&SourceSchema> {
        self.index.get(name).map(|&i| &self.sources[i])
    }

    /// Look up a record type within a source
    pub fn record_type(&self, source: &str, record_type: &str) -> Option<&RecordSchema> {
        self.source(source)?.record_type(record_type)
    }

    /// Check for a source
    pub fn has_source(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Sources in insertion order
    pub fn sources(&self) -> impl Iterator<Item = &SourceSchema> {
        self.sources.iter()
    }

    /// Source names in insertion order
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(SourceSchema::name).collect()
    }

    /// Number of sources
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldSchema;

    fn source(name: &str) -> SourceSchema {
        SourceSchema::new(name, 10)
            .unwrap()
            .with_record_type(
                RecordSchema::sequential("r")
                    .field(FieldSchema::new("a", 2).unwrap())
                    .build()
                    .unwrap(),
            )
            .unwrap()
    }

    #[test]
    fn test_lookup() {
        let registry = SchemaRegistry::new()
            .with_source(source("s1"))
            .unwrap()
            .with_source(source("s2"))
            .unwrap();

        assert_eq!(registry.source_names(), vec!["s1", "s2"]);
        assert!(registry.has_source("s2"));
        assert!(registry.record_type("s1", "r").is_some());
        assert!(registry.record_type("s1", "x").is_none());
        assert!(registry.record_type("nope", "r").is_none());
    }

    #[test]
    fn test_duplicate_source() {
        let mut registry = SchemaRegistry::new();
        registry.add_source(source("s")).unwrap();
        assert_eq!(
            registry.add_source(source("s")).unwrap_err(),
            SchemaError::DuplicateSource("s".into())
        );
        assert_eq!(registry.source_count(), 1);
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.yaml");
        std::fs::write(
            &path,
            "sources:\n  - source: s\n    records:\n      - type: r\n        fields:\n          - { name: a, length: 3 }\n",
        )
        .unwrap();

        let registry = SchemaRegistry::from_yaml_file(&path).unwrap();
        assert_eq!(registry.record_type("s", "r").unwrap().total_length(), 3);

        assert!(matches!(
            SchemaRegistry::from_yaml_file(dir.path().join("missing.yaml")),
            Err(SchemaError::Io(_))
        ));
    }
}
