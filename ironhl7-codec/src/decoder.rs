/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/8/26
******************************************************************************/

//! Generic structured-field decoder.
//!
//! One decoder handles every registered field type. The slot schema drives
//! the split-and-convert loop; nothing is hand-written per type.
//!
//! Malformed slot data (unparseable numerics or timestamps) degrades to an
//! absent slot and never aborts the field. Only caller bugs — an unknown
//! field type, or a composite slot reached when no deeper separator level
//! exists — surface as [`ContractError`].

use crate::escape::unescape;
use ironhl7_core::error::ContractError;
use ironhl7_core::separators::{NestingContext, Separators};
use ironhl7_core::types::DtmValue;
use ironhl7_core::value::{FieldValue, SlotValue};
use ironhl7_dictionary::{FieldSchema, Registry, SlotDef, SlotKind};
use rust_decimal::Decimal;

/// Generic field decoder.
///
/// Holds only a registry reference and an immutable separator set, so a
/// single decoder can be shared across threads and reused for any number of
/// fields. The nesting context is a per-call parameter.
#[derive(Debug, Clone, Copy)]
pub struct FieldDecoder<'a> {
    registry: &'a Registry,
    separators: Separators,
}

impl<'a> FieldDecoder<'a> {
    /// Creates a decoder using the process-wide default separators.
    #[must_use]
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            separators: Separators::resolve(None),
        }
    }

    /// Replaces the separator set, e.g. with one derived from a message
    /// header's own encoding declaration.
    #[must_use]
    pub const fn with_separators(mut self, separators: Separators) -> Self {
        self.separators = separators;
        self
    }

    /// Returns the separator set in effect.
    #[inline]
    #[must_use]
    pub const fn separators(&self) -> Separators {
        self.separators
    }

    /// Decodes one field span into a structured value.
    ///
    /// # Arguments
    /// * `type_id` - The registered field type to decode as
    /// * `text` - The raw field span; `None` decodes to all slots absent
    /// * `context` - Whether this span is already at sub-component depth
    ///
    /// # Errors
    /// Returns [`ContractError`] for an unknown `type_id` or when a
    /// composite slot is reached in sub-component context.
    pub fn decode(
        &self,
        type_id: &str,
        text: Option<&str>,
        context: NestingContext,
    ) -> Result<FieldValue, ContractError> {
        let schema = self.schema(type_id)?;
        self.decode_with_schema(schema, text, context)
    }

    /// Decodes a repeating field span into one value per repetition.
    ///
    /// Each repetition is decoded at component depth. An empty span between
    /// two repetition separators yields an all-absent value, keeping
    /// repetition indexes stable.
    ///
    /// # Errors
    /// Same contract as [`FieldDecoder::decode`].
    pub fn decode_repetitions(
        &self,
        type_id: &str,
        text: Option<&str>,
    ) -> Result<Vec<FieldValue>, ContractError> {
        let schema = self.schema(type_id)?;
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return Ok(Vec::new());
        };
        text.split(self.separators.repetition)
            .map(|rep| self.decode_with_schema(schema, Some(rep), NestingContext::Component))
            .collect()
    }

    fn schema(&self, type_id: &str) -> Result<&'a FieldSchema, ContractError> {
        self.registry
            .schema_for(type_id)
            .ok_or_else(|| ContractError::UnknownFieldType {
                type_id: type_id.to_string(),
            })
    }

    fn decode_with_schema(
        &self,
        schema: &FieldSchema,
        text: Option<&str>,
        context: NestingContext,
    ) -> Result<FieldValue, ContractError> {
        let mut value = FieldValue::new(schema.type_id.clone());
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            for _ in &schema.slots {
                value.push_slot(SlotValue::Absent);
            }
            return Ok(value);
        };

        // split preserves empty spans so positional slot mapping stays exact;
        // spans beyond the declared slot count are ignored
        let separator = self.separators.separator_for(context);
        let mut spans = text.split(separator);
        for def in &schema.slots {
            let slot = match spans.next() {
                None | Some("") => SlotValue::Absent,
                Some(span) => self.decode_slot(schema, def, span, context)?,
            };
            value.push_slot(slot);
        }
        Ok(value)
    }

    fn decode_slot(
        &self,
        schema: &FieldSchema,
        def: &SlotDef,
        span: &str,
        context: NestingContext,
    ) -> Result<SlotValue, ContractError> {
        match &def.kind {
            SlotKind::Text => Ok(SlotValue::Text(unescape(span, &self.separators))),
            SlotKind::Integer => {
                let text = unescape(span, &self.separators);
                match text.parse::<i64>() {
                    Ok(v) => Ok(SlotValue::Integer(v)),
                    Err(_) => {
                        tracing::debug!(slot = %def.name, span, "malformed integer, slot absent");
                        Ok(SlotValue::Absent)
                    }
                }
            }
            SlotKind::Decimal => {
                let text = unescape(span, &self.separators);
                match text.parse::<Decimal>() {
                    Ok(v) => Ok(SlotValue::Decimal(v)),
                    Err(_) => {
                        tracing::debug!(slot = %def.name, span, "malformed decimal, slot absent");
                        Ok(SlotValue::Absent)
                    }
                }
            }
            SlotKind::Timestamp => {
                let text = unescape(span, &self.separators);
                match DtmValue::parse(&text, &self.separators.formats) {
                    Some(v) => Ok(SlotValue::Timestamp(v)),
                    None => {
                        tracing::debug!(slot = %def.name, span, "malformed timestamp, slot absent");
                        Ok(SlotValue::Absent)
                    }
                }
            }
            SlotKind::Composite(type_id) => {
                let Some(deeper) = context.descend() else {
                    return Err(ContractError::NestingTooDeep {
                        type_id: schema.type_id.clone(),
                        slot: def.name.clone(),
                    });
                };
                let inner = self.schema(type_id)?;
                let nested = self.decode_with_schema(inner, Some(span), deeper)?;
                Ok(SlotValue::Composite(Box::new(nested)))
            }
        }
    }
}
