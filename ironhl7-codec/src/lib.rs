/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/8/26
******************************************************************************/

//! # IronHL7 Codec
//!
//! Generic delimited-text field encoding and decoding for the IronHL7 engine.
//!
//! One engine handles every registered field type, driven by the declarative
//! slot schemas from `ironhl7-dictionary`:
//!
//! - **Escape transcoder**: `\F\ \S\ \T\ \R\ \E\` sequences for reserved
//!   characters, with unknown sequences passed through verbatim
//! - **Decoder**: splits on the context-selected separator, preserves empty
//!   spans, degrades malformed slot data to absent
//! - **Encoder**: formats slots in declared order and omits trailing absent
//!   slots without collapsing embedded empty spans
//!
//! Decoding tolerates bad data; only caller bugs (unknown field types,
//! impossible nesting) surface as errors.

pub mod decoder;
pub mod encoder;
pub mod escape;

pub use decoder::FieldDecoder;
pub use encoder::FieldEncoder;
pub use escape::{escape, unescape};
