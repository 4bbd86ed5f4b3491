//! In-memory `NativeEditor` over an owned operation list.
//!
//! Used by the CLI and tests; hosts with a real widget implement
//! `NativeEditor` themselves. Every content change queues one notification,
//! delivered through `EditorSession::pump`.

use crate::content::delta::{Delta, DeltaOp};
use crate::editor::{NativeEditor, Selection};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryEditor {
    contents: Delta,
    selection: Option<Selection>,
    queued_changes: usize,
}

impl MemoryEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one op, moving the caret to the end.
    pub fn push(&mut self, op: DeltaOp) {
        self.contents.ops.push(op);
        self.selection = Some(Selection::caret(self.contents.length()));
        self.queued_changes += 1;
    }

    /// Removes all content and the selection.
    pub fn clear(&mut self) {
        if !self.contents.is_empty() {
            self.queued_changes += 1;
        }
        self.contents = Delta::default();
        self.selection = None;
    }

    pub fn queued_changes(&self) -> usize {
        self.queued_changes
    }
}

impl NativeEditor for MemoryEditor {
    fn contents(&self) -> Delta {
        self.contents.clone()
    }

    fn set_contents(&mut self, delta: &Delta) -> bool {
        if self.contents == *delta {
            return false;
        }
        self.contents = delta.clone();
        self.selection = self
            .selection
            .map(|selection| selection.clamp(self.contents.length()));
        self.queued_changes += 1;
        true
    }

    fn selection(&self) -> Option<Selection> {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) {
        self.selection = Some(selection.clamp(self.contents.length()));
    }

    fn drain_changes(&mut self) -> usize {
        std::mem::take(&mut self.queued_changes)
    }
}
