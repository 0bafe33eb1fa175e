/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/8/26
******************************************************************************/

//! Generic structured-field encoder.
//!
//! Mirrors the decoder: slots are formatted in declared order, text slots
//! pass through the escape transcoder, and the separator is selected by the
//! nesting context. Trailing absent slots are omitted entirely; an absent
//! slot followed by a present one still contributes its empty span so that
//! positional decoding of later slots is not corrupted.
//!
//! The trailing trim operates on whole formatted spans, never on characters
//! of the joined string, so a value that legitimately ends with an escaped
//! separator sequence is never truncated.

use crate::escape::escape;
use ironhl7_core::error::ContractError;
use ironhl7_core::separators::{NestingContext, Separators, ValueFormats};
use ironhl7_core::value::{FieldValue, SlotValue};
use ironhl7_dictionary::{FieldSchema, Registry, SlotDef, SlotKind};
use rust_decimal::Decimal;
use smallvec::SmallVec;

/// Generic field encoder.
///
/// Like the decoder, this holds only a registry reference and an immutable
/// separator set; the nesting context is a per-call parameter.
#[derive(Debug, Clone, Copy)]
pub struct FieldEncoder<'a> {
    registry: &'a Registry,
    separators: Separators,
}

impl<'a> FieldEncoder<'a> {
    /// Creates an encoder using the process-wide default separators.
    #[must_use]
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            separators: Separators::resolve(None),
        }
    }

    /// Replaces the separator set.
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

    /// Encodes a structured value back to delimited text.
    ///
    /// # Arguments
    /// * `value` - The structured value; its type id selects the schema
    /// * `context` - Whether the output is destined for sub-component depth
    ///
    /// # Errors
    /// Returns [`ContractError`] for an unknown field type, a slot value
    /// that contradicts the schema, or a composite slot encoded when no
    /// deeper separator level exists.
    pub fn encode(
        &self,
        value: &FieldValue,
        context: NestingContext,
    ) -> Result<String, ContractError> {
        let schema = self.schema(value.type_id())?;
        self.encode_with_schema(schema, value, context)
    }

    /// Encodes a sequence of values as one repeating field.
    ///
    /// # Errors
    /// Same contract as [`FieldEncoder::encode`].
    pub fn encode_repetitions(&self, values: &[FieldValue]) -> Result<String, ContractError> {
        let mut out = String::new();
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                out.push(self.separators.repetition);
            }
            out.push_str(&self.encode(value, NestingContext::Component)?);
        }
        Ok(out)
    }

    fn schema(&self, type_id: &str) -> Result<&'a FieldSchema, ContractError> {
        self.registry
            .schema_for(type_id)
            .ok_or_else(|| ContractError::UnknownFieldType {
                type_id: type_id.to_string(),
            })
    }

    fn encode_with_schema(
        &self,
        schema: &FieldSchema,
        value: &FieldValue,
        context: NestingContext,
    ) -> Result<String, ContractError> {
        let mut spans: SmallVec<[String; 6]> = SmallVec::new();
        for (i, def) in schema.slots.iter().enumerate() {
            spans.push(self.format_slot(schema, def, value.slot(i), context)?);
        }

        // absent trailing slots are omitted entirely; embedded empty spans
        // survive because only the trailing run is dropped
        while spans.last().is_some_and(String::is_empty) {
            spans.pop();
        }

        let separator = self.separators.separator_for(context);
        let mut out = String::new();
        for (i, span) in spans.iter().enumerate() {
            if i > 0 {
                out.push(separator);
            }
            out.push_str(span);
        }
        Ok(out)
    }

    fn format_slot(
        &self,
        schema: &FieldSchema,
        def: &SlotDef,
        slot: &SlotValue,
        context: NestingContext,
    ) -> Result<String, ContractError> {
        match (&def.kind, slot) {
            (_, SlotValue::Absent) => Ok(String::new()),
            (SlotKind::Text, SlotValue::Text(s)) => Ok(escape(s, &self.separators)),
            (SlotKind::Integer, SlotValue::Integer(v)) => {
                let mut buf = itoa::Buffer::new();
                Ok(buf.format(*v).to_string())
            }
            (SlotKind::Decimal, SlotValue::Decimal(v)) => {
                Ok(format_decimal(*v, &self.separators.formats))
            }
            (SlotKind::Timestamp, SlotValue::Timestamp(v)) => {
                Ok(v.format(&self.separators.formats).to_string())
            }
            (SlotKind::Composite(type_id), SlotValue::Composite(nested)) => {
                let Some(deeper) = context.descend() else {
                    return Err(ContractError::NestingTooDeep {
                        type_id: schema.type_id.clone(),
                        slot: def.name.clone(),
                    });
                };
                if nested.type_id() != type_id {
                    return Err(ContractError::SlotKindMismatch {
                        type_id: schema.type_id.clone(),
                        slot: def.name.clone(),
                        expected: def.kind.name(),
                    });
                }
                let inner = self.schema(type_id)?;
                self.encode_with_schema(inner, nested, deeper)
            }
            _ => Err(ContractError::SlotKindMismatch {
                type_id: schema.type_id.clone(),
                slot: def.name.clone(),
                expected: def.kind.name(),
            }),
        }
    }
}

fn format_decimal(value: Decimal, formats: &ValueFormats) -> String {
    match formats.decimal_scale {
        Some(scale) => format!("{:.*}", scale as usize, value),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::FieldDecoder;
    use ironhl7_core::types::DtmValue;
    use ironhl7_core::value::SlotValue;

    fn encoder(registry: &Registry) -> FieldEncoder<'_> {
        FieldEncoder::new(registry).with_separators(Separators::standard())
    }

    #[test]
    fn test_encode_two_slots() {
        let registry = Registry::standard();
        let value = FieldValue::new("PT")
            .with_slot(0, SlotValue::text("1"))
            .with_slot(1, SlotValue::text("2"));
        let text = encoder(&registry)
            .encode(&value, NestingContext::Component)
            .unwrap();
        assert_eq!(text, "1^2");
    }

    #[test]
    fn test_encode_trailing_absent_stripped() {
        let registry = Registry::standard();
        let value = FieldValue::new("MOP").with_slot(0, SlotValue::text("P"));
        let text = encoder(&registry)
            .encode(&value, NestingContext::Component)
            .unwrap();
        assert_eq!(text, "P");
    }

    #[test]
    fn test_encode_embedded_absent_keeps_span() {
        let registry = Registry::standard();
        let value = FieldValue::new("CE")
            .with_slot(0, SlotValue::text("A"))
            .with_slot(2, SlotValue::text("C"));
        let text = encoder(&registry)
            .encode(&value, NestingContext::Component)
            .unwrap();
        assert_eq!(text, "A^^C");
    }

    #[test]
    fn test_encode_all_absent_is_empty() {
        let registry = Registry::standard();
        let text = encoder(&registry)
            .encode(&FieldValue::new("CE"), NestingContext::Component)
            .unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_encode_escapes_text() {
        let registry = Registry::standard();
        let value = FieldValue::new("CE").with_slot(0, SlotValue::text("a|b"));
        let text = encoder(&registry)
            .encode(&value, NestingContext::Component)
            .unwrap();
        assert_eq!(text, "a\\F\\b");
    }

    #[test]
    fn test_encode_timestamp_at_own_precision() {
        let registry = Registry::standard();
        let seps = Separators::standard();
        let date = DtmValue::parse("20230615", &seps.formats).unwrap();
        let value = FieldValue::new("FC")
            .with_slot(0, SlotValue::text("ACCT1"))
            .with_slot(1, SlotValue::Timestamp(date));
        let text = encoder(&registry)
            .encode(&value, NestingContext::Component)
            .unwrap();
        assert_eq!(text, "ACCT1^20230615");
    }

    #[test]
    fn test_encode_integer_slot() {
        let mut registry = Registry::standard();
        registry.add_schema(
            FieldSchema::new("ZDS", "Dose Schedule")
                .slot("sequence_number", SlotKind::Integer)
                .slot("description", SlotKind::Text),
        );
        let value = FieldValue::new("ZDS")
            .with_slot(0, SlotValue::Integer(-42))
            .with_slot(1, SlotValue::text("q6h"));
        let text = encoder(&registry)
            .encode(&value, NestingContext::Component)
            .unwrap();
        assert_eq!(text, "-42^q6h");
    }

    #[test]
    fn test_encode_decimal() {
        let registry = Registry::standard();
        let value = FieldValue::new("MOP")
            .with_slot(0, SlotValue::text("P"))
            .with_slot(1, SlotValue::Decimal("12.50".parse().unwrap()));
        let text = encoder(&registry)
            .encode(&value, NestingContext::Component)
            .unwrap();
        assert_eq!(text, "P^12.50");
    }

    #[test]
    fn test_encode_decimal_fixed_scale() {
        let registry = Registry::standard();
        let mut seps = Separators::standard();
        seps.formats.decimal_scale = Some(2);
        let value = FieldValue::new("MOP")
            .with_slot(0, SlotValue::text("P"))
            .with_slot(1, SlotValue::Decimal("5".parse().unwrap()));
        let text = FieldEncoder::new(&registry)
            .with_separators(seps)
            .encode(&value, NestingContext::Component)
            .unwrap();
        assert_eq!(text, "P^5.00");
    }

    #[test]
    fn test_encode_composite_uses_subcomponent_separator() {
        let registry = Registry::standard();
        let authority = FieldValue::new("HD")
            .with_slot(0, SlotValue::text("NS"))
            .with_slot(1, SlotValue::text("1.2.3"))
            .with_slot(2, SlotValue::text("ISO"));
        let value = FieldValue::new("CX")
            .with_slot(0, SlotValue::text("12345"))
            .with_slot(3, SlotValue::Composite(Box::new(authority)))
            .with_slot(4, SlotValue::text("MR"));
        let text = encoder(&registry)
            .encode(&value, NestingContext::Component)
            .unwrap();
        assert_eq!(text, "12345^^^NS&1.2.3&ISO^MR");
    }

    #[test]
    fn test_encode_composite_in_subcomponent_context_fails() {
        let registry = Registry::standard();
        let value = FieldValue::new("CX").with_slot(
            3,
            SlotValue::Composite(Box::new(FieldValue::new("HD").with_slot(0, SlotValue::text("NS")))),
        );
        let err = encoder(&registry)
            .encode(&value, NestingContext::Subcomponent)
            .unwrap_err();
        assert!(matches!(err, ContractError::NestingTooDeep { .. }));
    }

    #[test]
    fn test_encode_slot_kind_mismatch() {
        let registry = Registry::standard();
        let value = FieldValue::new("MOP")
            .with_slot(0, SlotValue::text("P"))
            .with_slot(1, SlotValue::text("not-a-decimal-slot"));
        let err = encoder(&registry)
            .encode(&value, NestingContext::Component)
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::SlotKindMismatch {
                type_id: "MOP".to_string(),
                slot: "money_or_percentage_quantity".to_string(),
                expected: "decimal",
            }
        );
    }

    #[test]
    fn test_encode_composite_type_mismatch() {
        let registry = Registry::standard();
        let value = FieldValue::new("CX").with_slot(
            3,
            SlotValue::Composite(Box::new(FieldValue::new("CE").with_slot(0, SlotValue::text("X")))),
        );
        let err = encoder(&registry)
            .encode(&value, NestingContext::Component)
            .unwrap_err();
        assert!(matches!(err, ContractError::SlotKindMismatch { .. }));
    }

    #[test]
    fn test_encode_repetitions() {
        let registry = Registry::standard();
        let values = vec![
            FieldValue::new("CE").with_slot(0, SlotValue::text("A")),
            FieldValue::new("CE").with_slot(0, SlotValue::text("B")),
        ];
        let text = encoder(&registry).encode_repetitions(&values).unwrap();
        assert_eq!(text, "A~B");
    }

    #[test]
    fn test_round_trip_decode_encode() {
        let registry = Registry::standard();
        let seps = Separators::standard();
        let d = FieldDecoder::new(&registry).with_separators(seps);
        let e = FieldEncoder::new(&registry).with_separators(seps);

        for (type_id, text) in [
            ("CE", "A^^C"),
            ("FC", "ACCT1^20230615120000"),
            ("MOP", "P"),
            ("CX", "12345^^^NS&1.2.3&ISO^MR"),
            ("CE", "a\\F\\b^t"),
        ] {
            let value = d
                .decode(type_id, Some(text), NestingContext::Component)
                .unwrap();
            let encoded = e.encode(&value, NestingContext::Component).unwrap();
            assert_eq!(encoded, text, "round trip for {type_id}");
            let redecoded = d
                .decode(type_id, Some(&encoded), NestingContext::Component)
                .unwrap();
            assert_eq!(redecoded, value);
        }
    }
}
