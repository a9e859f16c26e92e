//! Seam to the presentation surface the operator is looking at.
//!
//! The surface is a write-only collaborator: the controller pushes text and
//! roster entries into it and assumes nothing it wrote is mutated behind its
//! back.

use shared::protocol::StoredRecord;

/// One rendered roster line. `record` is `Some` exactly when the entry is
/// selectable; an empty slot gets no selection affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub label: String,
    pub selectable: bool,
    pub record: Option<StoredRecord>,
}

pub trait PresentationSurface: Send + Sync {
    fn set_status(&self, text: &str);
    /// Fully replaces the rendered roster; nothing from a previous call
    /// survives.
    fn replace_roster(&self, entries: &[RosterEntry]);
    fn set_selection(&self, text: &str);
    /// Appends one line to the operator-visible transcript.
    fn append_transcript(&self, line: &str);
    /// Blocking notification for operator-triggered outcomes.
    fn notify(&self, message: &str);
}

/// Surface that discards everything. Useful when a controller is driven
/// purely for its state, as in tests.
pub struct NullSurface;

impl PresentationSurface for NullSurface {
    fn set_status(&self, _text: &str) {}
    fn replace_roster(&self, _entries: &[RosterEntry]) {}
    fn set_selection(&self, _text: &str) {}
    fn append_transcript(&self, _line: &str) {}
    fn notify(&self, _message: &str) {}
}
