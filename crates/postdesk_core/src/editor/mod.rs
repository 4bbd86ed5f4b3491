//! Live editing session over a native rich-text editor.
//!
//! # Responsibility
//! - Define the `NativeEditor` seam hosts implement for their editor widget.
//! - Own one editing session and translate its changes into documents.
//!
//! # Invariants
//! - The native editor is owned by exactly one session for its lifetime.
//! - Content the session applies itself is never echoed back to the host.

pub mod memory;
pub mod session;

use crate::content::delta::Delta;

/// Cursor or range selection in editor positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub length: usize,
}

impl Selection {
    pub fn caret(index: usize) -> Self {
        Self { index, length: 0 }
    }

    /// Fits the selection inside a document of `doc_length` positions.
    pub fn clamp(self, doc_length: usize) -> Self {
        let index = self.index.min(doc_length);
        let length = self.length.min(doc_length - index);
        Self { index, length }
    }
}

/// Contract of the editor widget a session drives.
pub trait NativeEditor {
    /// Returns the full current operation list.
    fn contents(&self) -> Delta;
    /// Replaces the full contents.
    ///
    /// Returns whether the editor will emit a change notification for this
    /// replacement (editors stay silent when nothing changed).
    fn set_contents(&mut self, delta: &Delta) -> bool;
    fn selection(&self) -> Option<Selection>;
    fn set_selection(&mut self, selection: Selection);

    /// Drains change notifications the editor queued since the last call.
    ///
    /// Editors that notify through the host's own event loop keep the default
    /// and the host calls `EditorSession::handle_text_change` directly.
    fn drain_changes(&mut self) -> usize {
        0
    }

    fn length(&self) -> usize {
        self.contents().length()
    }
}
