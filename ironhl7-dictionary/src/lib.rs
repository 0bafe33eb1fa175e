/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/8/26
******************************************************************************/

//! # IronHL7 Dictionary
//!
//! Field-type schemas and registry for the IronHL7 codec.
//!
//! A field type is described declaratively: an ordered list of named slots,
//! each with a semantic kind. One generic codec engine (in `ironhl7-codec`)
//! is driven by these schemas instead of one hand-written codec per type.
//!
//! [`Registry::standard`] ships the builtin HL7 v2 composite data types;
//! callers may register additional types with [`Registry::add_schema`].

pub mod schema;
pub mod standard;

pub use schema::{FieldSchema, Registry, SlotDef, SlotKind};
