//! Raw label to canonical label mapping
//!
//! The table is a closed allow-list. A raw value that is not listed maps to
//! [`Label::Ham`] and is reported as [`LabelMapping::Unmapped`] so callers can
//! log and count it instead of silently misclassifying.

use crate::artifact::RawLabel;
use spamguard_core::Label;

/// How a raw label was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMapping {
    /// Found in the table
    Mapped(Label),
    /// Not in the table; treated as ham
    Unmapped,
}

impl LabelMapping {
    pub fn label(&self) -> Label {
        match self {
            Self::Mapped(label) => *label,
            Self::Unmapped => Label::Ham,
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, Self::Mapped(_))
    }
}

/// Finite mapping from raw artifact labels to canonical labels
#[derive(Debug, Clone)]
pub struct LabelTable {
    entries: Vec<(RawLabel, Label)>,
}

impl LabelTable {
    /// Empty table; every raw label resolves to [`LabelMapping::Unmapped`]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Standard conventions for binary spam artifacts.
    ///
    /// Spam: integer `1`, float `1.0`, `true`, `"spam"`, `"Spam"`, `"SPAM"`.
    /// Ham: integer `0`, float `0.0`, `false`, `"ham"`, `"Ham"`, `"HAM"`.
    /// The numeric string `"1"` is deliberately absent.
    pub fn standard() -> Self {
        Self::empty()
            .with_entry(RawLabel::Int(1), Label::Spam)
            .with_entry(RawLabel::Float(1.0), Label::Spam)
            .with_entry(RawLabel::Bool(true), Label::Spam)
            .with_entry(RawLabel::text("spam"), Label::Spam)
            .with_entry(RawLabel::text("Spam"), Label::Spam)
            .with_entry(RawLabel::text("SPAM"), Label::Spam)
            .with_entry(RawLabel::Int(0), Label::Ham)
            .with_entry(RawLabel::Float(0.0), Label::Ham)
            .with_entry(RawLabel::Bool(false), Label::Ham)
            .with_entry(RawLabel::text("ham"), Label::Ham)
            .with_entry(RawLabel::text("Ham"), Label::Ham)
            .with_entry(RawLabel::text("HAM"), Label::Ham)
    }

    /// Add or replace an entry
    pub fn with_entry(mut self, raw: RawLabel, label: Label) -> Self {
        match self.entries.iter_mut().find(|(r, _)| *r == raw) {
            Some(entry) => entry.1 = label,
            None => self.entries.push((raw, label)),
        }
        self
    }

    pub fn resolve(&self, raw: &RawLabel) -> LabelMapping {
        self.entries
            .iter()
            .find(|(r, _)| r == raw)
            .map(|(_, label)| LabelMapping::Mapped(*label))
            .unwrap_or(LabelMapping::Unmapped)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LabelTable {
    fn default() -> Self {
        Self::standard()
    }
}
