//! Create and edit forms for a single document.
//!
//! Like the list, the editor is a plain state machine: [`EditorState::mount`]
//! and [`EditorState::submit`] hand back [`EditorCommand`]s, and the
//! responses come back through `apply_loaded` / `apply_saved`, which tell the
//! app where to go next.

use crate::egui_app::api::ApiError;
use crate::egui_app::notify::Toasts;
use crate::egui_app::session::Session;
use crate::egui_app::types::Route;
use crate::shared::{Document, DocumentPayload, Visibility};

pub const SAVE_FAILED: &str = "Failed to save document";
pub const UPDATE_FAILED: &str = "Failed to update document";
pub const NOT_FOUND: &str = "Document not found or not authorized";
pub const LOAD_FAILED: &str = "Error loading document";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(i64),
}

impl EditorMode {
    pub fn route(&self) -> Route {
        match self {
            EditorMode::Create => Route::Create,
            EditorMode::Edit(id) => Route::Edit(*id),
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            EditorMode::Create => "Create Document",
            EditorMode::Edit(_) => "Edit Document",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    RedirectToLogin,
    /// Fetch the whole collection and look up `id` in it
    LoadCollection { id: i64 },
    Create { payload: DocumentPayload },
    Update { id: i64, payload: DocumentPayload },
}

/// Where the app should go after a response was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
    Stay,
    /// Leave the editor for `Route`
    Navigate(Route),
    /// Saved; go back to the list and refresh it
    Saved,
}

#[derive(Debug, Clone)]
pub struct EditorState {
    mode: EditorMode,
    pub title: String,
    pub content: String,
    pub visibility: Visibility,
    /// Show the rendered markup next to the source
    pub show_preview: bool,
    loading: bool,
    saving: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorMode::Create)
    }
}

impl EditorState {
    pub fn new(mode: EditorMode) -> Self {
        Self {
            mode,
            title: String::new(),
            content: String::new(),
            visibility: Visibility::default(),
            show_preview: true,
            loading: false,
            saving: false,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn has_required_fields(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.trim().is_empty()
    }

    /// Save is offered only with a title and content, and nothing in flight
    pub fn can_save(&self) -> bool {
        self.has_required_fields() && !self.loading && !self.saving
    }

    /// Request body built from the form as typed
    pub fn payload(&self) -> DocumentPayload {
        DocumentPayload::new(self.title.clone(), self.content.clone(), self.visibility)
    }

    /// Start over in `mode` with an empty form
    pub fn mount(&mut self, mode: EditorMode, session: &Session) -> Option<EditorCommand> {
        *self = Self::new(mode);

        if !session.is_authenticated() {
            tracing::info!(route = %mode.route(), "editor mounted without a session, redirecting to login");
            return Some(EditorCommand::RedirectToLogin);
        }

        match mode {
            EditorMode::Create => None,
            EditorMode::Edit(id) => {
                self.loading = true;
                Some(EditorCommand::LoadCollection { id })
            }
        }
    }

    /// Apply the collection fetched for an edit. Responses for a different
    /// id than the one being edited are ignored.
    pub fn apply_loaded(
        &mut self,
        id: i64,
        result: Result<Vec<Document>, ApiError>,
        toasts: &mut Toasts,
    ) -> EditorOutcome {
        if self.mode != EditorMode::Edit(id) || !self.loading {
            tracing::debug!(id, "ignoring load response for an editor that moved on");
            return EditorOutcome::Stay;
        }
        self.loading = false;

        match result {
            Ok(documents) => match documents.into_iter().find(|d| d.id == id) {
                Some(doc) => {
                    tracing::info!(id, "loaded document for editing");
                    self.title = doc.title;
                    self.content = doc.content;
                    self.visibility = doc.visibility;
                    EditorOutcome::Stay
                }
                None => {
                    tracing::warn!(id, "document missing from collection");
                    toasts.error(NOT_FOUND);
                    EditorOutcome::Navigate(Route::Documents)
                }
            },
            Err(e) => {
                tracing::error!(id, error = %e, "failed to load document");
                toasts.error(LOAD_FAILED);
                EditorOutcome::Stay
            }
        }
    }

    pub fn submit(&mut self, session: &Session) -> Option<EditorCommand> {
        if !self.can_save() {
            return None;
        }
        if !session.is_authenticated() {
            return Some(EditorCommand::RedirectToLogin);
        }

        self.saving = true;
        let payload = self.payload();
        Some(match self.mode {
            EditorMode::Create => EditorCommand::Create { payload },
            EditorMode::Edit(id) => EditorCommand::Update { id, payload },
        })
    }

    pub fn apply_saved(&mut self, result: Result<Document, ApiError>, toasts: &mut Toasts) -> EditorOutcome {
        if !self.saving {
            return EditorOutcome::Stay;
        }
        self.saving = false;

        match result {
            Ok(doc) => {
                tracing::info!(id = doc.id, mode = ?self.mode, "document saved");
                EditorOutcome::Saved
            }
            Err(e) => {
                let message = match self.mode {
                    EditorMode::Create => SAVE_FAILED,
                    EditorMode::Edit(_) => UPDATE_FAILED,
                };
                tracing::error!(mode = ?self.mode, error = %e, "failed to save document");
                toasts.error(message);
                EditorOutcome::Stay
            }
        }
    }
}
