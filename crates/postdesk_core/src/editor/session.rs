//! Editing session state machine.
//!
//! # Responsibility
//! - Drive `Uninitialized -> Ready -> Destroyed` for one native editor.
//! - Encode user edits and hand the resulting document to the host.
//! - Apply host-supplied documents without echoing them back.
//!
//! # Invariants
//! - The change callback only runs while `Ready`.
//! - `ChangeGuard::PendingExternal` swallows exactly one change notification.
//! - `content()` is `None` outside `Ready`.

use crate::content::decode::decode;
use crate::content::document::Document;
use crate::content::encode::encode;
use crate::content::ContentError;
use crate::editor::NativeEditor;
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Host callback receiving the re-derived document after each user edit.
pub type ChangeCallback = Box<dyn FnMut(&Document)>;

/// Observable lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Ready,
    Destroyed,
}

/// One-shot guard against re-processing content the session applied itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeGuard {
    Idle,
    /// The next change notification stems from an applied document.
    PendingExternal,
}

/// Session operation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// `action` is not allowed in phase `phase`.
    InvalidPhase {
        action: &'static str,
        phase: SessionPhase,
    },
    /// Supplied document cannot be loaded into the editor.
    Content(ContentError),
}

impl Display for SessionPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Ready => "ready",
            Self::Destroyed => "destroyed",
        };
        f.write_str(name)
    }
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPhase { action, phase } => {
                write!(f, "cannot {action} while session is {phase}")
            }
            Self::Content(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Content(err) => Some(err),
            Self::InvalidPhase { .. } => None,
        }
    }
}

impl From<ContentError> for SessionError {
    fn from(value: ContentError) -> Self {
        Self::Content(value)
    }
}

enum SessionState<E> {
    Uninitialized,
    Ready { editor: E, guard: ChangeGuard },
    Destroyed,
}

/// Owns one live editing session bound to one document at a time.
pub struct EditorSession<E: NativeEditor> {
    state: SessionState<E>,
    on_change: Option<ChangeCallback>,
}

impl<E: NativeEditor> Default for EditorSession<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: NativeEditor> EditorSession<E> {
    /// Creates an uninitialized session without a change callback.
    pub fn new() -> Self {
        Self {
            state: SessionState::Uninitialized,
            on_change: None,
        }
    }

    /// Registers the host callback invoked after each user edit.
    pub fn on_change(mut self, callback: impl FnMut(&Document) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn phase(&self) -> SessionPhase {
        match self.state {
            SessionState::Uninitialized => SessionPhase::Uninitialized,
            SessionState::Ready { .. } => SessionPhase::Ready,
            SessionState::Destroyed => SessionPhase::Destroyed,
        }
    }

    /// Returns the guard state; `None` outside `Ready`.
    pub fn guard(&self) -> Option<ChangeGuard> {
        match self.state {
            SessionState::Ready { guard, .. } => Some(guard),
            _ => None,
        }
    }

    /// Binds `editor` and loads `initial` (or a single empty paragraph).
    ///
    /// # Errors
    /// - `InvalidPhase` unless the session is `Uninitialized`.
    /// - `Content` when `initial` fails validation; the session stays
    ///   `Uninitialized`.
    pub fn start(
        &mut self,
        mut editor: E,
        initial: Option<&Document>,
    ) -> Result<(), SessionError> {
        self.expect_phase("start", SessionPhase::Uninitialized)?;

        let document = initial.cloned().unwrap_or_else(Document::empty);
        let delta = decode(&document).map_err(|err| {
            warn!(
                "event=session_start module=editor status=error error={}",
                err
            );
            SessionError::from(err)
        })?;

        let guard = if editor.set_contents(&delta) {
            ChangeGuard::PendingExternal
        } else {
            ChangeGuard::Idle
        };
        self.state = SessionState::Ready { editor, guard };
        debug!(
            "event=session_start module=editor status=ok blocks={} initial={}",
            document.blocks.len(),
            initial.is_some()
        );
        Ok(())
    }

    /// Processes one change notification from the native editor.
    ///
    /// Returns `true` when a document was derived and handed to the host,
    /// `false` when the notification was suppressed or the session is not
    /// `Ready`.
    pub fn handle_text_change(&mut self) -> bool {
        let Self { state, on_change } = self;
        let SessionState::Ready { editor, guard } = state else {
            return false;
        };

        if *guard == ChangeGuard::PendingExternal {
            *guard = ChangeGuard::Idle;
            debug!("event=text_change module=editor status=suppressed");
            return false;
        }

        let document = encode(&editor.contents());
        if let Some(callback) = on_change.as_mut() {
            callback(&document);
        }
        true
    }

    /// Delivers change notifications queued inside the native editor.
    ///
    /// Returns how many documents were handed to the host.
    pub fn pump(&mut self) -> usize {
        let queued = match &mut self.state {
            SessionState::Ready { editor, .. } => editor.drain_changes(),
            _ => return 0,
        };

        let mut delivered = 0;
        for _ in 0..queued {
            if self.handle_text_change() {
                delivered += 1;
            }
        }
        delivered
    }

    /// Runs a user edit against the owned editor, then pumps its
    /// notifications.
    ///
    /// # Errors
    /// - `InvalidPhase` unless the session is `Ready`.
    pub fn apply_edit<R>(&mut self, edit: impl FnOnce(&mut E) -> R) -> Result<R, SessionError> {
        let SessionState::Ready { editor, .. } = &mut self.state else {
            return Err(self.invalid_phase("edit"));
        };
        let result = edit(editor);
        self.pump();
        Ok(result)
    }

    /// Applies a document supplied by the host.
    ///
    /// Returns `Ok(false)` when `document` already matches the editor, in
    /// which case nothing is applied and the host is not notified.
    ///
    /// # Errors
    /// - `InvalidPhase` unless the session is `Ready`.
    /// - `Content` when `document` fails validation; the editor is untouched.
    pub fn set_external_content(&mut self, document: &Document) -> Result<bool, SessionError> {
        let SessionState::Ready { editor, guard } = &mut self.state else {
            return Err(self.invalid_phase("apply external content"));
        };

        if encode(&editor.contents()) == *document {
            return Ok(false);
        }

        let delta = decode(document)?;
        let selection = editor.selection();
        if editor.set_contents(&delta) {
            *guard = ChangeGuard::PendingExternal;
        }
        if let Some(selection) = selection {
            editor.set_selection(selection.clamp(delta.length()));
        }

        debug!(
            "event=external_content module=editor status=applied blocks={} selection_restored={}",
            document.blocks.len(),
            selection.is_some()
        );
        Ok(true)
    }

    /// Encodes the current editor state; `None` outside `Ready`.
    ///
    /// Hosts call this at submit time instead of relying on the last change
    /// callback, which may not have run yet.
    pub fn content(&self) -> Option<Document> {
        match &self.state {
            SessionState::Ready { editor, .. } => Some(encode(&editor.contents())),
            _ => None,
        }
    }

    /// Releases the editor and drops the change callback.
    pub fn destroy(&mut self) {
        if matches!(self.state, SessionState::Destroyed) {
            return;
        }
        self.state = SessionState::Destroyed;
        self.on_change = None;
        debug!("event=session_destroy module=editor status=ok");
    }

    fn expect_phase(
        &self,
        action: &'static str,
        expected: SessionPhase,
    ) -> Result<(), SessionError> {
        if self.phase() == expected {
            Ok(())
        } else {
            Err(self.invalid_phase(action))
        }
    }

    fn invalid_phase(&self, action: &'static str) -> SessionError {
        SessionError::InvalidPhase {
            action,
            phase: self.phase(),
        }
    }
}
