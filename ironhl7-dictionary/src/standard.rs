/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/8/26
******************************************************************************/

//! Builtin HL7 v2 composite data types.
//!
//! Slot names follow the HL7 v2.x data type component names. Coded values
//! (identifiers, coding system names, processing ids) are `Text`: the codec
//! never validates them against table content.

use crate::schema::{FieldSchema, Registry, SlotKind};

impl Registry {
    /// Returns a registry pre-populated with the builtin HL7 v2 types.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();

        registry.add_schema(
            FieldSchema::new("FC", "Financial Class")
                .slot("financial_class_code", SlotKind::Text)
                .slot("effective_date", SlotKind::Timestamp),
        );

        registry.add_schema(
            FieldSchema::new("MOP", "Money or Percentage")
                .slot("money_or_percentage_indicator", SlotKind::Text)
                .slot("money_or_percentage_quantity", SlotKind::Decimal)
                .slot("monetary_denomination", SlotKind::Text),
        );

        registry.add_schema(
            FieldSchema::new("MO", "Money")
                .slot("quantity", SlotKind::Decimal)
                .slot("denomination", SlotKind::Text),
        );

        registry.add_schema(
            FieldSchema::new("CE", "Coded Element")
                .slot("identifier", SlotKind::Text)
                .slot("text", SlotKind::Text)
                .slot("name_of_coding_system", SlotKind::Text)
                .slot("alternate_identifier", SlotKind::Text)
                .slot("alternate_text", SlotKind::Text)
                .slot("name_of_alternate_coding_system", SlotKind::Text),
        );

        registry.add_schema(
            FieldSchema::new("HD", "Hierarchic Designator")
                .slot("namespace_id", SlotKind::Text)
                .slot("universal_id", SlotKind::Text)
                .slot("universal_id_type", SlotKind::Text),
        );

        registry.add_schema(
            FieldSchema::new("EI", "Entity Identifier")
                .slot("entity_identifier", SlotKind::Text)
                .slot("namespace_id", SlotKind::Text)
                .slot("universal_id", SlotKind::Text)
                .slot("universal_id_type", SlotKind::Text),
        );

        registry.add_schema(
            FieldSchema::new("CX", "Extended Composite ID")
                .slot("id_number", SlotKind::Text)
                .slot("check_digit", SlotKind::Text)
                .slot("check_digit_scheme", SlotKind::Text)
                .slot("assigning_authority", SlotKind::composite("HD"))
                .slot("identifier_type_code", SlotKind::Text)
                .slot("assigning_facility", SlotKind::composite("HD")),
        );

        registry.add_schema(
            FieldSchema::new("CQ", "Composite Quantity with Units")
                .slot("quantity", SlotKind::Decimal)
                .slot("units", SlotKind::composite("CE")),
        );

        registry.add_schema(
            FieldSchema::new("VID", "Version Identifier")
                .slot("version_id", SlotKind::Text)
                .slot("internationalization_code", SlotKind::composite("CE"))
                .slot("international_version_id", SlotKind::composite("CE")),
        );

        registry.add_schema(
            FieldSchema::new("PT", "Processing Type")
                .slot("processing_id", SlotKind::Text)
                .slot("processing_mode", SlotKind::Text),
        );

        registry.add_schema(
            FieldSchema::new("DLN", "Driver's License Number")
                .slot("license_number", SlotKind::Text)
                .slot("issuing_state_province_country", SlotKind::Text)
                .slot("expiration_date", SlotKind::Timestamp),
        );

        registry.add_schema(
            FieldSchema::new("TS", "Time Stamp")
                .slot("time", SlotKind::Timestamp)
                .slot("degree_of_precision", SlotKind::Text),
        );

        registry.add_schema(
            FieldSchema::new("NR", "Numeric Range")
                .slot("low_value", SlotKind::Decimal)
                .slot("high_value", SlotKind::Decimal),
        );

        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_contents() {
        let registry = Registry::standard();
        assert_eq!(registry.len(), 13);

        let fc = registry.schema_for("FC").unwrap();
        assert_eq!(fc.slots[0].name, "financial_class_code");
        assert_eq!(fc.slots[1].kind, SlotKind::Timestamp);

        let ce = registry.schema_for("CE").unwrap();
        assert_eq!(ce.slot_count(), 6);
    }

    #[test]
    fn test_composite_slots_reference_registered_types() {
        assert!(Registry::standard().validate().is_ok());
    }

    #[test]
    fn test_lookup_by_name() {
        let registry = Registry::standard();
        let cx = registry.schema_by_name("Extended Composite ID").unwrap();
        assert_eq!(cx.type_id, "CX");
    }
}
