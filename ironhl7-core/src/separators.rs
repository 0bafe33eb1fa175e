/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/8/26
******************************************************************************/

//! Separator sets and nesting context for HL7 delimited text.
//!
//! This module provides:
//! - [`Separators`]: The five delimiter/escape characters plus value formats
//! - [`ValueFormats`]: Timestamp format strings and decimal precision
//! - [`NestingContext`]: Selects the component vs. sub-component separator
//! - Process-wide defaults behind an atomically swapped registry
//!
//! HL7 messages may declare their own delimiters in the MSH segment header
//! (`MSH-1` is the field separator, `MSH-2` the remaining four encoding
//! characters). [`Separators::from_encoding_characters`] builds a per-message
//! override from such a declaration; [`Separators::resolve`] falls back to the
//! process-wide defaults when no override is present.

use crate::error::ConfigError;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp format strings and numeric precision for encoded values.
///
/// HL7 `DTM` values carry their precision in their length: `%Y` (4 chars)
/// through `%Y%m%d%H%M%S` (14 chars). The format strings here are keyed by
/// that precision and are shared by the parser and the formatter so that
/// round trips are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueFormats {
    /// Year-only timestamp format.
    pub year: &'static str,
    /// Year-and-month timestamp format.
    pub year_month: &'static str,
    /// Full-date timestamp format.
    pub date: &'static str,
    /// Date with hours and minutes.
    pub date_minutes: &'static str,
    /// Date with full time of day.
    pub date_seconds: &'static str,
    /// Fixed number of decimal places for decimal slots, or `None` to keep
    /// the scale of the value as supplied.
    pub decimal_scale: Option<u32>,
}

impl ValueFormats {
    /// Returns the standard HL7 v2 formats.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            year: "%Y",
            year_month: "%Y%m",
            date: "%Y%m%d",
            date_minutes: "%Y%m%d%H%M",
            date_seconds: "%Y%m%d%H%M%S",
            decimal_scale: None,
        }
    }
}

impl Default for ValueFormats {
    fn default() -> Self {
        Self::standard()
    }
}

/// Indicates which separator level applies to the next split.
///
/// A field decoded at the top level splits its slots on the component
/// separator. The same field type nested inside another field (or inside a
/// repetition of one) has already consumed the component level, so its slots
/// split on the sub-component separator instead. This is threaded through
/// every decode/encode call as a parameter; it is never stored on a codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NestingContext {
    /// Slots are delimited by the component separator.
    #[default]
    Component,
    /// Slots are delimited by the sub-component separator.
    Subcomponent,
}

impl NestingContext {
    /// Returns true if this context is already at sub-component depth.
    #[inline]
    #[must_use]
    pub const fn is_subcomponent(self) -> bool {
        matches!(self, Self::Subcomponent)
    }

    /// Returns the context one nesting level deeper, or `None` when no
    /// deeper separator level exists.
    #[inline]
    #[must_use]
    pub const fn descend(self) -> Option<Self> {
        match self {
            Self::Component => Some(Self::Subcomponent),
            Self::Subcomponent => None,
        }
    }
}

/// The set of delimiter and escape characters in effect for a message.
///
/// Immutable once constructed. Two instances commonly exist at the same
/// time: the process-wide defaults and a message-scoped override derived
/// from the message's own header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separators {
    /// Field separator (default `|`).
    pub field: char,
    /// Component separator (default `^`).
    pub component: char,
    /// Repetition separator (default `~`).
    pub repetition: char,
    /// Escape character (default `\`).
    pub escape: char,
    /// Sub-component separator (default `&`).
    pub subcomponent: char,
    /// Timestamp and numeric formats used when converting slot values.
    pub formats: ValueFormats,
}

impl Separators {
    /// Returns the standard HL7 v2 separator set `|^~\&`.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            field: '|',
            component: '^',
            repetition: '~',
            escape: '\\',
            subcomponent: '&',
            formats: ValueFormats::standard(),
        }
    }

    /// Builds a separator set from an MSH-style declaration.
    ///
    /// # Arguments
    /// * `field` - The field separator (MSH-1)
    /// * `encoding` - The four encoding characters (MSH-2), in order:
    ///   component, repetition, escape, sub-component
    ///
    /// # Errors
    /// Returns [`ConfigError`] if `encoding` is not exactly four characters,
    /// or if any separator is non-ASCII or duplicated.
    pub fn from_encoding_characters(field: char, encoding: &str) -> Result<Self, ConfigError> {
        let mut chars = encoding.chars();
        let (Some(component), Some(repetition), Some(escape), Some(subcomponent), None) = (
            chars.next(),
            chars.next(),
            chars.next(),
            chars.next(),
            chars.next(),
        ) else {
            return Err(ConfigError::InvalidEncodingCharacters {
                found: encoding.to_string(),
            });
        };

        let separators = Self {
            field,
            component,
            repetition,
            escape,
            subcomponent,
            formats: ValueFormats::standard(),
        };
        separators.validate()?;
        Ok(separators)
    }

    /// Resolves an optional explicit separator set against the process-wide
    /// defaults. Absence of an explicit set is normal and never fails.
    #[must_use]
    pub fn resolve(explicit: Option<Separators>) -> Separators {
        explicit.unwrap_or_else(default_separators)
    }

    /// Returns the separator that delimits slots in the given context.
    #[inline]
    #[must_use]
    pub const fn separator_for(&self, context: NestingContext) -> char {
        match context {
            NestingContext::Component => self.component,
            NestingContext::Subcomponent => self.subcomponent,
        }
    }

    /// Returns all five separator characters in declaration order.
    #[inline]
    #[must_use]
    pub const fn all(&self) -> [char; 5] {
        [
            self.field,
            self.component,
            self.repetition,
            self.escape,
            self.subcomponent,
        ]
    }

    /// Returns true if `c` is one of the five reserved characters.
    #[must_use]
    pub fn is_reserved(&self, c: char) -> bool {
        self.all().contains(&c)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let all = self.all();
        for (i, &c) in all.iter().enumerate() {
            if !c.is_ascii() {
                return Err(ConfigError::NonAsciiSeparator { character: c });
            }
            if all[..i].contains(&c) {
                return Err(ConfigError::DuplicateSeparator { character: c });
            }
        }
        Ok(())
    }
}

impl Default for Separators {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Separators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.field, self.component, self.repetition, self.escape, self.subcomponent
        )
    }
}

/// Narrow capability for anything that can supply the active separator set.
///
/// Collaborators that carry their own encoding declaration (a parsed message
/// header, a session configuration) implement this instead of inheriting
/// from any parser machinery.
pub trait SeparatorSource {
    /// Returns the separator set in effect for this source.
    fn active_separators(&self) -> Separators;
}

impl SeparatorSource for Separators {
    fn active_separators(&self) -> Separators {
        *self
    }
}

impl SeparatorSource for Option<Separators> {
    fn active_separators(&self) -> Separators {
        Separators::resolve(*self)
    }
}

/// Process-wide default separators. Read on every `resolve(None)`; replaced
/// as a whole value so in-flight calls always observe a consistent set.
static DEFAULTS: RwLock<Separators> = RwLock::new(Separators::standard());

/// Returns the process-wide default separator set.
#[must_use]
pub fn default_separators() -> Separators {
    *DEFAULTS.read()
}

/// Replaces the process-wide default separator set.
///
/// The update is a single whole-value swap: concurrent decode/encode calls
/// observe either the old or the new set, never a mixture.
pub fn set_default_separators(separators: Separators) {
    *DEFAULTS.write() = separators;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_separators() {
        let s = Separators::standard();
        assert_eq!(s.field, '|');
        assert_eq!(s.component, '^');
        assert_eq!(s.repetition, '~');
        assert_eq!(s.escape, '\\');
        assert_eq!(s.subcomponent, '&');
    }

    #[test]
    fn test_from_encoding_characters() {
        let s = Separators::from_encoding_characters('|', "^~\\&").unwrap();
        assert_eq!(s, Separators::standard());

        let custom = Separators::from_encoding_characters('#', "@*!+").unwrap();
        assert_eq!(custom.component, '@');
        assert_eq!(custom.subcomponent, '+');
    }

    #[test]
    fn test_from_encoding_characters_wrong_length() {
        let err = Separators::from_encoding_characters('|', "^~\\").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEncodingCharacters { .. }
        ));
        assert!(Separators::from_encoding_characters('|', "^~\\&&").is_err());
    }

    #[test]
    fn test_from_encoding_characters_duplicate() {
        let err = Separators::from_encoding_characters('^', "^~\\&").unwrap_err();
        assert_eq!(err, ConfigError::DuplicateSeparator { character: '^' });
    }

    #[test]
    fn test_from_encoding_characters_non_ascii() {
        let err = Separators::from_encoding_characters('|', "§~\\&").unwrap_err();
        assert_eq!(err, ConfigError::NonAsciiSeparator { character: '§' });
    }

    #[test]
    fn test_separator_for_context() {
        let s = Separators::standard();
        assert_eq!(s.separator_for(NestingContext::Component), '^');
        assert_eq!(s.separator_for(NestingContext::Subcomponent), '&');
    }

    #[test]
    fn test_nesting_descend() {
        assert_eq!(
            NestingContext::Component.descend(),
            Some(NestingContext::Subcomponent)
        );
        assert_eq!(NestingContext::Subcomponent.descend(), None);
    }

    #[test]
    fn test_is_reserved() {
        let s = Separators::standard();
        assert!(s.is_reserved('|'));
        assert!(s.is_reserved('&'));
        assert!(!s.is_reserved('a'));
    }

    #[test]
    fn test_resolve_and_process_defaults() {
        // Single test for the global registry to avoid interleaving with
        // other tests that read the defaults.
        assert_eq!(Separators::resolve(None), Separators::standard());

        let custom = Separators::from_encoding_characters('#', "@*!+").unwrap();
        set_default_separators(custom);
        assert_eq!(Separators::resolve(None), custom);
        assert_eq!(Separators::resolve(Some(Separators::standard())).field, '|');

        set_default_separators(Separators::standard());
        assert_eq!(default_separators(), Separators::standard());
    }

    #[test]
    fn test_separator_source() {
        let s = Separators::standard();
        assert_eq!(s.active_separators(), s);
        assert_eq!(Some(s).active_separators(), s);
    }

    #[test]
    fn test_display() {
        assert_eq!(Separators::standard().to_string(), "|^~\\&");
    }
}
