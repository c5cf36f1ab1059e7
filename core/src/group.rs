#![deny(missing_docs)]

//! # Path Groups
//!
//! The unit of authorship: a named bundle of paths plus the schema definitions
//! its author chose to publish. Groups are never validated on their own; a group
//! may reference definitions that live in another group.

use crate::derive::SchemaRegistry;
use crate::dsl::Path;
use crate::schema::SchemaDefinition;

/// An independently authored bundle of paths and definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathGroup {
    name: String,
    definitions: Vec<SchemaDefinition>,
    paths: Vec<Path>,
}

impl PathGroup {
    /// An empty group called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definitions: Vec::new(),
            paths: Vec::new(),
        }
    }

    /// Replaces the definitions.
    pub fn with_definitions(mut self, definitions: Vec<SchemaDefinition>) -> Self {
        self.definitions = definitions;
        self
    }

    /// Replaces the definitions with everything registered in `registry`.
    pub fn with_registry(self, registry: SchemaRegistry) -> Self {
        self.with_definitions(registry.into_definitions())
    }

    /// Replaces the paths.
    pub fn with_paths(mut self, paths: Vec<Path>) -> Self {
        self.paths = paths;
        self
    }

    /// Group name, used to label error sites.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Definitions in declaration order.
    pub fn definitions(&self) -> &[SchemaDefinition] {
        &self.definitions
    }

    /// Paths in declaration order.
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }
}
