/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/8/26
******************************************************************************/

//! Structured field values.
//!
//! This module provides:
//! - [`SlotValue`]: A single decoded slot (tagged by semantic kind)
//! - [`FieldValue`]: A decoded field as an ordered, positional slot list
//!
//! A slot that was never supplied is [`SlotValue::Absent`], which is distinct
//! from an empty string: absent slots are omitted entirely when they are
//! trailing, but still contribute an empty span when a later slot is present.

use crate::types::DtmValue;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

static ABSENT: SlotValue = SlotValue::Absent;

/// A single decoded slot of a structured field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum SlotValue {
    /// The slot was not supplied.
    #[default]
    Absent,
    /// Free-text value (already unescaped).
    Text(String),
    /// Integer value.
    Integer(i64),
    /// Decimal value.
    Decimal(Decimal),
    /// Timestamp value with its own precision.
    Timestamp(DtmValue),
    /// A nested structured value (decoded one separator level deeper).
    Composite(Box<FieldValue>),
}

impl SlotValue {
    /// Convenience constructor for a text slot.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns true if the slot was not supplied.
    #[inline]
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the value as a string slice, if it is a Text variant.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an i64, if it is an Integer variant.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a Decimal, if it is a Decimal variant.
    #[must_use]
    pub const fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a timestamp, if it is a Timestamp variant.
    #[must_use]
    pub const fn as_timestamp(&self) -> Option<DtmValue> {
        match self {
            Self::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the nested value, if it is a Composite variant.
    #[must_use]
    pub fn as_composite(&self) -> Option<&FieldValue> {
        match self {
            Self::Composite(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for SlotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => Ok(()),
            Self::Text(s) => write!(f, "{}", s),
            Self::Integer(v) => write!(f, "{}", v),
            Self::Decimal(v) => write!(f, "{}", v),
            Self::Timestamp(v) => write!(f, "{}", v),
            Self::Composite(v) => write!(f, "<{} {} slots>", v.type_id(), v.slot_count()),
        }
    }
}

/// A decoded structured field: a type identifier plus positional slots.
///
/// Slot positions follow the declared order of the field type's schema.
/// Positions never supplied (or supplied empty) hold [`SlotValue::Absent`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldValue {
    type_id: String,
    slots: SmallVec<[SlotValue; 6]>,
}

impl FieldValue {
    /// Creates an empty value for the given field type.
    #[must_use]
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            slots: SmallVec::new(),
        }
    }

    /// Sets a slot by position, growing the slot list with absent slots
    /// as needed, and returns the value for chaining.
    #[must_use]
    pub fn with_slot(mut self, index: usize, value: SlotValue) -> Self {
        self.set_slot(index, value);
        self
    }

    /// Sets a slot by position, growing the slot list with absent slots
    /// as needed.
    pub fn set_slot(&mut self, index: usize, value: SlotValue) {
        if index >= self.slots.len() {
            self.slots.resize(index + 1, SlotValue::Absent);
        }
        self.slots[index] = value;
    }

    /// Appends a slot at the next position.
    pub fn push_slot(&mut self, value: SlotValue) {
        self.slots.push(value);
    }

    /// Returns the field type identifier.
    #[inline]
    #[must_use]
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// Returns the slot at `index`, or [`SlotValue::Absent`] for positions
    /// beyond the stored slot list.
    #[inline]
    #[must_use]
    pub fn slot(&self, index: usize) -> &SlotValue {
        self.slots.get(index).unwrap_or(&ABSENT)
    }

    /// Returns the stored slots in positional order.
    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[SlotValue] {
        &self.slots
    }

    /// Returns the number of stored slot positions.
    #[inline]
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if every stored slot is absent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(SlotValue::is_absent)
    }
}

/// Trailing absent slots never affect equality: a value decoded from `"A"`
/// equals one decoded from `"A^^"`, matching the serialization rule that
/// both encode to `"A"`.
impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        if self.type_id != other.type_id {
            return false;
        }
        let len = self.slots.len().max(other.slots.len());
        (0..len).all(|i| self.slot(i) == other.slot(i))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_id)?;
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", slot)?;
        }
        write!(f, ")")
    }
}
