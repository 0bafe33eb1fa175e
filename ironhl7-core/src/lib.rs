/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/8/26
******************************************************************************/

//! # IronHL7 Core
//!
//! Core types, traits, and error definitions for the IronHL7 delimited-text codec.
//!
//! This crate provides the fundamental building blocks used across all IronHL7 crates:
//! - **Error types**: Unified error handling with `thiserror`
//! - **Separators**: The active delimiter and escape characters for a message
//! - **Value types**: `FieldValue`, `SlotValue`, and the variable-precision `DtmValue`
//! - **Nesting**: `NestingContext` for component vs. sub-component delimiting
//!
//! ## Immutable-Value Design
//!
//! Separators and decoded values are plain immutable values. Nothing in this
//! crate holds per-call mutable state, so codec instances can be shared freely
//! across threads.

pub mod error;
pub mod separators;
pub mod types;
pub mod value;

pub use error::{ConfigError, ContractError, Hl7Error, Result};
pub use separators::{
    NestingContext, SeparatorSource, Separators, ValueFormats, default_separators,
    set_default_separators,
};
pub use types::{DtmPrecision, DtmValue};
pub use value::{FieldValue, SlotValue};
