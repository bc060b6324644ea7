//! Document list state.
//!
//! Holds the collection shown on the home view and decides when to talk to
//! the backend. It never performs I/O itself: every operation returns a
//! [`ListCommand`] for the app to execute, and results are fed back through
//! [`DocumentListState::apply_fetch`] and [`DocumentListState::apply_delete`].
//!
//! Rules:
//! - mounting without a session redirects to login and fetches nothing
//! - mounting with a session fetches the unfiltered collection immediately
//! - search input is debounced; an empty or blank query lists everything
//! - only the most recently issued fetch may replace the collection
//! - a failed fetch leaves the collection as it was
//! - deletes need confirmation and remove the entry locally on success

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::egui_app::api::ApiError;
use crate::egui_app::documents::debounce::{Debouncer, FetchSequence, FetchTicket};
use crate::egui_app::notify::Toasts;
use crate::egui_app::session::Session;
use crate::shared::config::DEFAULT_PREVIEW_CHARS;
use crate::shared::markup;
use crate::shared::Document;

pub const LOAD_FAILED: &str = "Failed to load documents";
pub const DELETE_FAILED: &str = "Failed to delete document";
pub const DELETED: &str = "Document deleted";
pub const EMPTY_STATE: &str = "No documents found";
pub const NO_PREVIEW: &str = "No preview";
pub const NO_CONTENT: &str = "No content available";

/// Work the list view needs the app to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListCommand {
    /// List (blank query) or search the collection
    Fetch { ticket: FetchTicket, query: String },
    /// Delete one document; confirmation already given
    Delete { id: i64 },
    RedirectToLogin,
}

#[derive(Debug)]
pub struct DocumentListState {
    documents: Vec<Document>,
    /// Bound to the search box
    pub search_input: String,
    observed_input: String,
    debouncer: Debouncer<String>,
    sequence: FetchSequence,
    loading: bool,
    loaded: bool,
    pending_delete: Option<i64>,
    deleting: HashSet<i64>,
    preview: Option<Document>,
    preview_chars: usize,
}

impl DocumentListState {
    pub fn new(quiet_period: Duration, preview_chars: usize) -> Self {
        Self {
            documents: Vec::new(),
            search_input: String::new(),
            observed_input: String::new(),
            debouncer: Debouncer::new(quiet_period),
            sequence: FetchSequence::new(),
            loading: false,
            loaded: false,
            pending_delete: None,
            deleting: HashSet::new(),
            preview: None,
            preview_chars,
        }
    }

    /// Enter the view. Always starts from an empty search.
    pub fn mount(&mut self, session: &Session) -> ListCommand {
        self.search_input.clear();
        self.observed_input.clear();
        self.debouncer.cancel();
        self.pending_delete = None;
        self.preview = None;

        if !session.is_authenticated() {
            self.sequence.invalidate();
            self.loading = false;
            tracing::info!("document list mounted without a session, redirecting to login");
            return ListCommand::RedirectToLogin;
        }
        self.issue_fetch(String::new())
    }

    /// Leave the view; responses still in flight will be ignored
    pub fn unmount(&mut self) {
        self.debouncer.cancel();
        self.sequence.invalidate();
        self.loading = false;
    }

    /// Redirect if the session disappeared while the view is showing
    pub fn ensure_session(&self, session: &Session) -> Option<ListCommand> {
        (!session.is_authenticated()).then_some(ListCommand::RedirectToLogin)
    }

    /// Replace the search text as if typed at `now`
    pub fn set_query(&mut self, query: impl Into<String>, now: Instant) {
        self.search_input = query.into();
        self.observe_input(now);
    }

    /// Notice edits made to `search_input` since the last call and
    /// (re)schedule the debounced fetch
    pub fn observe_input(&mut self, now: Instant) {
        if self.search_input != self.observed_input {
            self.observed_input = self.search_input.clone();
            self.debouncer.schedule(self.observed_input.clone(), now);
        }
    }

    /// Release a debounced fetch whose quiet period has passed
    pub fn poll(&mut self, now: Instant) -> Option<ListCommand> {
        let query = self.debouncer.poll(now)?;
        tracing::debug!(query = %query, "search input settled");
        Some(self.issue_fetch(query))
    }

    /// When the UI should wake up next to release a debounced fetch
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        self.debouncer.time_until_due(now)
    }

    fn issue_fetch(&mut self, query: String) -> ListCommand {
        let ticket = self.sequence.issue();
        self.loading = true;
        ListCommand::Fetch { ticket, query }
    }

    /// Apply a fetch response. Returns false if the response was stale.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Document>, ApiError>,
        toasts: &mut Toasts,
    ) -> bool {
        if !self.sequence.is_current(ticket) {
            tracing::debug!(ticket = ticket.sequence(), "discarding stale document response");
            return false;
        }
        self.loading = false;

        match result {
            Ok(documents) => {
                tracing::info!(count = documents.len(), "documents loaded");
                self.documents = documents;
                self.loaded = true;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch documents");
                toasts.error(LOAD_FAILED);
            }
        }
        true
    }

    /// Ask for confirmation before deleting `id`
    pub fn request_delete(&mut self, id: i64) {
        if self.documents.iter().any(|d| d.id == id) {
            self.pending_delete = Some(id);
        }
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    /// Document awaiting confirmation, for the dialog
    pub fn pending_delete_document(&self) -> Option<&Document> {
        let id = self.pending_delete?;
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn confirm_delete(&mut self) -> Option<ListCommand> {
        let id = self.pending_delete.take()?;
        self.deleting.insert(id);
        Some(ListCommand::Delete { id })
    }

    pub fn is_deleting(&self, id: i64) -> bool {
        self.deleting.contains(&id)
    }

    pub fn apply_delete(&mut self, id: i64, result: Result<(), ApiError>, toasts: &mut Toasts) {
        self.deleting.remove(&id);
        match result {
            Ok(()) => {
                self.documents.retain(|d| d.id != id);
                if self.preview.as_ref().is_some_and(|d| d.id == id) {
                    self.preview = None;
                }
                tracing::info!(id, "document deleted");
                toasts.success(DELETED);
            }
            Err(e) => {
                tracing::error!(id, error = %e, "failed to delete document");
                toasts.error(DELETE_FAILED);
            }
        }
    }

    pub fn open_preview(&mut self, id: i64) {
        self.preview = self.documents.iter().find(|d| d.id == id).cloned();
    }

    pub fn close_preview(&mut self) {
        self.preview = None;
    }

    pub fn preview(&self) -> Option<&Document> {
        self.preview.as_ref()
    }

    pub fn document(&self, id: i64) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// At least one fetch has succeeded since startup
    pub fn has_loaded(&self) -> bool {
        self.loaded
    }

    /// Leading slice of a document's markup for its card, if it has content
    pub fn preview_markup<'a>(&self, doc: &'a Document) -> Option<&'a str> {
        if doc.content.trim().is_empty() {
            return None;
        }
        Some(markup::truncate_chars(&doc.content, self.preview_chars))
    }

    /// Forget everything; used on logout
    pub fn reset(&mut self) {
        self.unmount();
        self.documents.clear();
        self.search_input.clear();
        self.observed_input.clear();
        self.pending_delete = None;
        self.deleting.clear();
        self.preview = None;
        self.loaded = false;
    }
}

impl Default for DocumentListState {
    fn default() -> Self {
        Self::new(Duration::from_millis(300), DEFAULT_PREVIEW_CHARS)
    }
}
