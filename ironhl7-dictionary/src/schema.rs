/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/8/26
******************************************************************************/

//! Schema definitions for HL7 field types.
//!
//! This module defines the structures that describe structured field types:
//! - [`SlotKind`]: The semantic kind of a slot
//! - [`SlotDef`]: A named slot within a field type
//! - [`FieldSchema`]: An ordered slot list for one field type
//! - [`Registry`]: Lookup of schemas by type id or name

use ironhl7_core::error::ContractError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Semantic kind of a slot.
///
/// Codes from clinical code tables are deliberately `Text`: they round-trip
/// as free text and are never validated against table content here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    /// Free-text value, escaped on the wire.
    Text,
    /// Integer value.
    Integer,
    /// Decimal value.
    Decimal,
    /// Timestamp with length-implied precision.
    Timestamp,
    /// A nested field type, delimited one separator level deeper.
    Composite(String),
}

impl SlotKind {
    /// Convenience constructor for a composite slot kind.
    #[must_use]
    pub fn composite(type_id: impl Into<String>) -> Self {
        Self::Composite(type_id.into())
    }

    /// Returns the kind name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Timestamp => "timestamp",
            Self::Composite(_) => "composite",
        }
    }
}

/// A named slot within a field type, in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDef {
    /// Slot name.
    pub name: String,
    /// Semantic kind of the slot.
    pub kind: SlotKind,
}

impl SlotDef {
    /// Creates a new slot definition.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SlotKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Declarative description of one structured field type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field type identifier (e.g. `CE`, `CX`).
    pub type_id: String,
    /// Human-readable type name.
    pub name: String,
    /// Ordered slot definitions.
    pub slots: Vec<SlotDef>,
}

impl FieldSchema {
    /// Creates a schema with no slots.
    ///
    /// # Arguments
    /// * `type_id` - The field type identifier
    /// * `name` - The human-readable type name
    #[must_use]
    pub fn new(type_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            name: name.into(),
            slots: Vec::new(),
        }
    }

    /// Appends a slot definition, preserving declaration order.
    #[must_use]
    pub fn slot(mut self, name: impl Into<String>, kind: SlotKind) -> Self {
        self.slots.push(SlotDef::new(name, kind));
        self
    }

    /// Returns the number of declared slots.
    #[inline]
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

/// Registry of field-type schemas.
///
/// Pure data: the registry is built once (at startup or from
/// [`Registry::standard`]) and only read afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    /// Schemas indexed by type id.
    schemas: HashMap<String, FieldSchema>,
    /// Type ids indexed by human-readable name.
    by_name: HashMap<String, String>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a schema, replacing any previous schema with the same type id.
    pub fn add_schema(&mut self, schema: FieldSchema) {
        self.by_name
            .insert(schema.name.clone(), schema.type_id.clone());
        self.schemas.insert(schema.type_id.clone(), schema);
    }

    /// Gets a schema by type id.
    #[must_use]
    pub fn schema_for(&self, type_id: &str) -> Option<&FieldSchema> {
        self.schemas.get(type_id)
    }

    /// Gets a schema by human-readable name.
    #[must_use]
    pub fn schema_by_name(&self, name: &str) -> Option<&FieldSchema> {
        self.by_name
            .get(name)
            .and_then(|type_id| self.schemas.get(type_id))
    }

    /// Returns an iterator over all registered schemas.
    pub fn schemas(&self) -> impl Iterator<Item = &FieldSchema> {
        self.schemas.values()
    }

    /// Returns the number of registered field types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if no field types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Checks that every composite slot references a registered type.
    ///
    /// # Errors
    /// Returns [`ContractError::UnknownFieldType`] for the first unresolved
    /// reference. Meant to be called once after registry construction.
    pub fn validate(&self) -> Result<(), ContractError> {
        for schema in self.schemas.values() {
            for slot in &schema.slots {
                if let SlotKind::Composite(type_id) = &slot.kind
                    && !self.schemas.contains_key(type_id)
                {
                    return Err(ContractError::UnknownFieldType {
                        type_id: type_id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
