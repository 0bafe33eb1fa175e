/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/8/26
******************************************************************************/

//! # IronHL7
//!
//! A hierarchical delimited-text codec for HL7 v2 clinical messaging.
//!
//! IronHL7 decodes and encodes structured field values using the HL7 v2
//! four-level delimiter scheme (field / repetition / component /
//! sub-component) with a configurable escape mechanism. One generic codec
//! engine, driven by declarative slot schemas, replaces the per-type codec
//! classes found in typical HL7 libraries.
//!
//! ## Quick Start
//!
//! ```rust
//! use ironhl7::prelude::*;
//!
//! let registry = Registry::standard();
//! let decoder = FieldDecoder::new(&registry);
//!
//! let value = decoder
//!     .decode("FC", Some("ACCT1^20230615120000"), NestingContext::Component)
//!     .unwrap();
//! assert_eq!(value.slot(0).as_text(), Some("ACCT1"));
//!
//! let encoder = FieldEncoder::new(&registry);
//! let text = encoder.encode(&value, NestingContext::Component).unwrap();
//! assert_eq!(text, "ACCT1^20230615120000");
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Error types, separators, nesting context, and value types
//! - [`dictionary`]: Field-type schemas and the standard type registry
//! - [`codec`]: Escape transcoding and the generic field decoder/encoder

pub mod core {
    //! Error types, separators, nesting context, and value types.
    pub use ironhl7_core::*;
}

pub mod dictionary {
    //! Field-type schemas and the standard type registry.
    pub use ironhl7_dictionary::*;
}

pub mod codec {
    //! Escape transcoding and the generic field decoder/encoder.
    pub use ironhl7_codec::*;
}

/// Commonly used types, re-exported for convenient glob imports.
pub mod prelude {
    pub use ironhl7_codec::{FieldDecoder, FieldEncoder, escape, unescape};
    pub use ironhl7_core::{
        ContractError, DtmPrecision, DtmValue, FieldValue, Hl7Error, NestingContext,
        SeparatorSource, Separators, SlotValue, ValueFormats,
    };
    pub use ironhl7_dictionary::{FieldSchema, Registry, SlotDef, SlotKind};
}
