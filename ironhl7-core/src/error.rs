/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/8/26
******************************************************************************/

//! Error types for the IronHL7 codec.
//!
//! This module provides a unified error hierarchy using `thiserror` for typed,
//! domain-specific errors across all IronHL7 operations.
//!
//! Malformed *data* is deliberately not represented here: unparseable numeric
//! or timestamp text and unknown escape sequences degrade to absent slots or
//! literal passthrough during decoding. Only caller bugs (contract violations)
//! and invalid configuration surface as errors.

use thiserror::Error;

/// Result type alias using [`Hl7Error`] as the error type.
pub type Result<T> = std::result::Result<T, Hl7Error>;

/// Top-level error type for all IronHL7 operations.
#[derive(Debug, Error)]
pub enum Hl7Error {
    /// A caller violated the codec contract.
    #[error("contract error: {0}")]
    Contract(#[from] ContractError),

    /// Invalid separator or format configuration.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Contract violations raised by the field codec.
///
/// These indicate a bug in the calling code rather than bad input data, and
/// are surfaced immediately instead of being tolerated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// The requested field type is not present in the registry.
    #[error("unknown field type: {type_id}")]
    UnknownFieldType {
        /// The field type identifier that failed to resolve.
        type_id: String,
    },

    /// A composite slot was reached while already in sub-component context.
    ///
    /// There is no separator level below sub-components, so the field type
    /// cannot be decoded or encoded at this nesting depth.
    #[error("nesting too deep: composite slot '{slot}' of type {type_id} has no separator level left")]
    NestingTooDeep {
        /// The field type declaring the composite slot.
        type_id: String,
        /// The name of the offending slot.
        slot: String,
    },

    /// A slot value does not match the kind declared by the schema.
    #[error("slot kind mismatch for '{slot}' of type {type_id}: expected {expected}")]
    SlotKindMismatch {
        /// The field type being encoded.
        type_id: String,
        /// The name of the offending slot.
        slot: String,
        /// The kind declared by the schema.
        expected: &'static str,
    },
}

/// Errors in separator configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An encoding-characters declaration did not contain exactly four characters.
    #[error("invalid encoding characters: expected 4 characters, found '{found}'")]
    InvalidEncodingCharacters {
        /// The declaration that failed to parse.
        found: String,
    },

    /// A separator character is outside the ASCII range.
    #[error("non-ascii separator character: '{character}'")]
    NonAsciiSeparator {
        /// The offending character.
        character: char,
    },

    /// The same character was declared for two separator roles.
    #[error("duplicate separator character: '{character}'")]
    DuplicateSeparator {
        /// The duplicated character.
        character: char,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_error_display() {
        let err = ContractError::UnknownFieldType {
            type_id: "ZZZ".to_string(),
        };
        assert_eq!(err.to_string(), "unknown field type: ZZZ");
    }

    #[test]
    fn test_hl7_error_from_contract() {
        let contract_err = ContractError::NestingTooDeep {
            type_id: "CX".to_string(),
            slot: "assigning_authority".to_string(),
        };
        let err: Hl7Error = contract_err.into();
        assert!(matches!(err, Hl7Error::Contract(_)));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::DuplicateSeparator { character: '^' };
        assert_eq!(err.to_string(), "duplicate separator character: '^'");
    }
}
