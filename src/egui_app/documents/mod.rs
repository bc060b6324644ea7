//! Document views' state: the list with its debounced search, and the
//! create/edit forms.

pub mod debounce;
pub mod editor;
pub mod list;

pub use debounce::{Debouncer, FetchSequence, FetchTicket};
pub use editor::{EditorCommand, EditorMode, EditorOutcome, EditorState};
pub use list::{DocumentListState, ListCommand};

/// Raised whenever the list must fetch again: on entering it, and after a
/// document was saved elsewhere. The list consumes it on its next frame.
#[derive(Debug, Default)]
pub struct RefreshSignal {
    raised: bool,
}

impl RefreshSignal {
    pub fn raise(&mut self) {
        self.raised = true;
    }

    pub fn is_raised(&self) -> bool {
        self.raised
    }

    /// Consume the signal, returning whether it was raised
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.raised)
    }
}
