#![deny(missing_docs)]

//! # Schema Registry
//!
//! An explicit, caller-owned map from type identifier to derived definition.
//! Path groups typically build one registry per module and hand its
//! definitions to [`crate::group::PathGroup`].

use crate::derive::{SchemaDeriver, TypeDescriptor};
use crate::error::ValidationError;
use crate::schema::{DefinitionLookup, SchemaDefinition, SchemaNode};
use indexmap::IndexMap;
use tracing::debug;

/// Definitions keyed by type identifier, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaRegistry {
    definitions: IndexMap<String, SchemaDefinition>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives `descriptor` (and, for sum types, each variant) and stores the results.
    ///
    /// Returns a `Ref` node pointing at the descriptor's definition.
    pub fn register<D>(&mut self, deriver: &D, descriptor: &TypeDescriptor) -> SchemaNode
    where
        D: SchemaDeriver + ?Sized,
    {
        for definition in deriver.derive_all(descriptor) {
            self.insert(definition);
        }
        SchemaNode::reference(descriptor.name())
    }

    /// Stores a definition under its own name, replacing any previous one.
    pub fn insert(&mut self, definition: SchemaDefinition) {
        if let Some(previous) = self.definitions.get(&definition.name) {
            if previous != &definition {
                debug!(name = %definition.name, "Replacing registered schema definition.");
            }
        }
        self.definitions.insert(definition.name.clone(), definition);
    }

    /// Returns the definition registered for `name`.
    pub fn get(&self, name: &str) -> Option<&SchemaDefinition> {
        self.definitions.get(name)
    }

    /// Returns a `Ref` node for `name` when it has been registered.
    pub fn reference(&self, name: &str) -> Option<SchemaNode> {
        self.definitions.get(name).map(SchemaDefinition::to_ref)
    }

    /// Definitions that `name` reaches through references.
    pub fn related_definitions(
        &self,
        name: &str,
    ) -> Result<Vec<&SchemaDefinition>, ValidationError> {
        match self.definitions.get(name) {
            Some(def) => def.related_definitions(self),
            None => Ok(Vec::new()),
        }
    }

    /// Iterates definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &SchemaDefinition> {
        self.definitions.values()
    }

    /// Consumes the registry, returning definitions in registration order.
    pub fn into_definitions(self) -> Vec<SchemaDefinition> {
        self.definitions.into_values().collect()
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl DefinitionLookup for SchemaRegistry {
    fn definition(&self, name: &str) -> Option<&SchemaDefinition> {
        self.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::{DescriptorDeriver, FieldDescriptor};

    #[test]
    fn test_register_sum_type_registers_variants() {
        let deriver = DescriptorDeriver::new();
        let mut registry = SchemaRegistry::new();

        let node = registry.register(
            &deriver,
            &TypeDescriptor::sum(
                "Shape",
                vec![
                    TypeDescriptor::record("Circle", vec![FieldDescriptor::new("r", "f64")]),
                    TypeDescriptor::record("Square", vec![FieldDescriptor::new("side", "f64")]),
                ],
            ),
        );

        assert_eq!(node, SchemaNode::reference("Shape"));
        assert_eq!(registry.len(), 3);
        let names: Vec<&str> = registry.definitions().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Shape", "Circle", "Square"]);

        let related: Vec<&str> = registry
            .related_definitions("Shape")
            .unwrap()
            .into_iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(related, vec!["Circle", "Square"]);
    }

    #[test]
    fn test_reference_requires_registration() {
        let mut registry = SchemaRegistry::new();
        assert!(registry.reference("Pet").is_none());

        registry.register(
            &DescriptorDeriver::new(),
            &TypeDescriptor::record("Pet", vec![FieldDescriptor::new("id", "i64")]),
        );
        assert_eq!(registry.reference("Pet"), Some(SchemaNode::reference("Pet")));
        assert!(registry.related_definitions("Nope").unwrap().is_empty());
    }
}
