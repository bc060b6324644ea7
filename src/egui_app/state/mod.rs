use std::path::PathBuf;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::egui_app::api::{ApiClient, ApiError};
use crate::egui_app::auth::{self, AuthFlow, AuthState, LoginForm, RegisterForm};
use crate::egui_app::documents::{
    DocumentListState, EditorCommand, EditorMode, EditorOutcome, EditorState, FetchTicket, ListCommand,
    RefreshSignal,
};
use crate::egui_app::export;
use crate::egui_app::notify::Toasts;
use crate::egui_app::runtime::{PendingTask, Poll, TaskRunner};
use crate::egui_app::session::{SessionManager, TokenStore};
use crate::egui_app::types::{History, Route};
use crate::egui_app::Config;
use crate::shared::{Document, TokenResponse};

pub const EXPORT_FAILED: &str = "Failed to export document";

/// How often to wake up while requests are in flight
const BUSY_REPAINT: Duration = Duration::from_millis(100);

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to start background runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

type ApiTask<T> = PendingTask<Result<T, ApiError>>;

/// Central application state shared across egui views.
pub struct AppState {
    pub config: Config,
    api: ApiClient,
    runner: TaskRunner,
    pub session: SessionManager,
    pub history: History,

    pub auth_state: AuthState,
    pub login_form: LoginForm,
    pub register_form: RegisterForm,

    pub documents: DocumentListState,
    pub editor: EditorState,
    pub refresh: RefreshSignal,

    pub toasts: Toasts,
    pub export_dir: PathBuf,

    auth_result: Option<(AuthFlow, ApiTask<TokenResponse>)>,
    list_fetches: Vec<(FetchTicket, ApiTask<Vec<Document>>)>,
    deletes: Vec<(i64, ApiTask<()>)>,
    editor_load: Option<(i64, ApiTask<Vec<Document>>)>,
    editor_save: Option<ApiTask<Document>>,
}

/// Result of a task if it has finished; a task that died counts as failed
fn settle<T>(task: &ApiTask<T>) -> Option<Result<T, ApiError>> {
    match task.poll() {
        Poll::Ready(result) => Some(result),
        Poll::Pending => None,
        Poll::Lost => {
            tracing::error!("background request ended without reporting");
            Some(Err(ApiError::Interrupted))
        }
    }
}

impl AppState {
    pub fn new(config: Config, store: impl TokenStore + 'static) -> Result<Self, StartupError> {
        let api = ApiClient::new(&config)?;
        let runner = TaskRunner::new()?;

        let mut session = SessionManager::new(store);
        let start = if session.restore().is_authenticated() {
            Route::Documents
        } else {
            Route::Login
        };
        tracing::info!(server = %config.server_url(), route = %start, "app state initialized");

        let mut refresh = RefreshSignal::default();
        if start == Route::Documents {
            refresh.raise();
        }

        Ok(Self {
            documents: DocumentListState::new(config.search_debounce(), config.preview_chars()),
            config,
            api,
            runner,
            session,
            history: History::new(start),
            auth_state: AuthState::new(),
            login_form: LoginForm::default(),
            register_form: RegisterForm::default(),
            editor: EditorState::default(),
            refresh,
            toasts: Toasts::default(),
            export_dir: export::download_dir(),
            auth_result: None,
            list_fetches: Vec::new(),
            deletes: Vec::new(),
            editor_load: None,
            editor_save: None,
        })
    }

    pub fn current_route(&self) -> Route {
        self.history.current()
    }

    /// Go to `route`, keeping the current view in the back-stack
    pub fn navigate(&mut self, route: Route) {
        let from = self.history.current();
        self.history.push(route);
        self.enter(from, route);
    }

    /// Go to `route` in place of the current view
    pub fn replace(&mut self, route: Route) {
        let from = self.history.current();
        self.history.replace(route);
        self.enter(from, route);
    }

    pub fn back(&mut self) {
        let from = self.history.current();
        let to = self.history.back();
        if to != from {
            self.enter(from, to);
        }
    }

    fn enter(&mut self, from: Route, to: Route) {
        tracing::debug!(from = %from, to = %to, "route change");
        if from == Route::Documents && to != Route::Documents {
            self.documents.unmount();
        }
        if from == self.editor.mode().route() && to != from {
            // a response for an editor the user has left must not steer navigation
            self.editor_load = None;
            self.editor_save = None;
        }
        match to {
            Route::Documents => self.refresh.raise(),
            Route::Login | Route::Register => {
                self.auth_state.clear_error();
            }
            Route::Create => self.mount_editor(EditorMode::Create),
            Route::Edit(id) => self.mount_editor(EditorMode::Edit(id)),
        }
    }

    fn mount_editor(&mut self, mode: EditorMode) {
        self.editor_load = None;
        self.editor_save = None;
        if let Some(command) = self.editor.mount(mode, self.session.session()) {
            self.run_editor_command(command);
        }
    }

    pub fn handle_login(&mut self) {
        if self.auth_result.is_some() {
            return;
        }
        if let Err(e) = self.login_form.validate() {
            self.auth_state.set_error(e.user_message().to_string());
            return;
        }

        self.auth_state.begin();
        let api = self.api.clone();
        let request = self.login_form.to_request();
        let task = self.runner.spawn(async move { auth::login(&api, request).await });
        self.auth_result = Some((AuthFlow::Login, task));
    }

    pub fn handle_register(&mut self) {
        if self.auth_result.is_some() {
            return;
        }
        if let Err(e) = self.register_form.validate() {
            self.auth_state.set_error(e.user_message().to_string());
            return;
        }

        self.auth_state.begin();
        let api = self.api.clone();
        let request = self.register_form.to_request();
        let task = self.runner.spawn(async move { auth::register(&api, request).await });
        self.auth_result = Some((AuthFlow::Register, task));
    }

    fn apply_auth(&mut self, flow: AuthFlow, result: Result<TokenResponse, ApiError>) {
        match result {
            Ok(token) => {
                if let Err(e) = self.session.establish(token.access_token) {
                    tracing::warn!(error = %e, "session will not survive a restart");
                    self.toasts.error("Could not save session");
                }
                self.auth_state.finish(None);
                self.login_form.clear_secrets();
                self.register_form.clear_secrets();
                self.replace(Route::Documents);
            }
            Err(e) => {
                self.auth_state.finish(Some(e.user_message(flow.failure_message())));
            }
        }
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.session.end() {
            tracing::error!(error = %e, "failed to remove saved session");
            self.toasts.error("Could not remove saved session");
        }
        tracing::info!("logged out");

        self.list_fetches.clear();
        self.deletes.clear();
        self.editor_load = None;
        self.editor_save = None;
        self.documents.reset();
        self.editor = EditorState::default();

        let from = self.history.current();
        self.history = History::new(Route::Login);
        self.enter(from, Route::Login);
    }

    fn run_list_command(&mut self, command: ListCommand) {
        match command {
            ListCommand::RedirectToLogin => self.replace(Route::Login),
            ListCommand::Fetch { ticket, query } => {
                let api = self.api.clone();
                let session = self.session.session().clone();
                let task = self
                    .runner
                    .spawn(async move { api.fetch_documents(&session, &query).await });
                self.list_fetches.push((ticket, task));
            }
            ListCommand::Delete { id } => {
                let api = self.api.clone();
                let session = self.session.session().clone();
                let task = self
                    .runner
                    .spawn(async move { api.delete_document(&session, id).await });
                self.deletes.push((id, task));
            }
        }
    }

    fn run_editor_command(&mut self, command: EditorCommand) {
        let api = self.api.clone();
        let session = self.session.session().clone();
        match command {
            EditorCommand::RedirectToLogin => self.replace(Route::Login),
            EditorCommand::LoadCollection { id } => {
                let task = self
                    .runner
                    .spawn(async move { api.list_documents(&session).await });
                self.editor_load = Some((id, task));
            }
            EditorCommand::Create { payload } => {
                let task = self
                    .runner
                    .spawn(async move { api.create_document(&session, &payload).await });
                self.editor_save = Some(task);
            }
            EditorCommand::Update { id, payload } => {
                let task = self
                    .runner
                    .spawn(async move { api.update_document(&session, id, &payload).await });
                self.editor_save = Some(task);
            }
        }
    }

    fn follow(&mut self, outcome: EditorOutcome) {
        match outcome {
            EditorOutcome::Stay => {}
            EditorOutcome::Navigate(route) => self.replace(route),
            EditorOutcome::Saved => {
                self.refresh.raise();
                self.navigate(Route::Documents);
            }
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(command) = self.documents.confirm_delete() {
            self.run_list_command(command);
        }
    }

    pub fn submit_editor(&mut self) {
        if let Some(command) = self.editor.submit(self.session.session()) {
            self.run_editor_command(command);
        }
    }

    /// Render a document to PDF in the export directory. Blocks until done.
    pub fn export_document(&mut self, id: i64) {
        let Some(doc) = self.documents.document(id).cloned() else {
            return;
        };
        match export::save_pdf(&doc, &self.export_dir) {
            Ok(path) => self.toasts.success(format!("Saved {}", path.display())),
            Err(e) => {
                tracing::error!(id, error = %e, "export failed");
                self.toasts.error(EXPORT_FAILED);
            }
        }
    }

    /// Apply every background result that has arrived since the last frame
    pub fn check_pending_operations(&mut self) {
        if let Some((flow, task)) = &self.auth_result {
            if let Some(result) = settle(task) {
                let flow = *flow;
                self.auth_result = None;
                self.apply_auth(flow, result);
            }
        }

        let mut fetched = Vec::new();
        self.list_fetches.retain(|(ticket, task)| match settle(task) {
            Some(result) => {
                fetched.push((*ticket, result));
                false
            }
            None => true,
        });
        for (ticket, result) in fetched {
            self.documents.apply_fetch(ticket, result, &mut self.toasts);
        }

        let mut deleted = Vec::new();
        self.deletes.retain(|(id, task)| match settle(task) {
            Some(result) => {
                deleted.push((*id, result));
                false
            }
            None => true,
        });
        for (id, result) in deleted {
            self.documents.apply_delete(id, result, &mut self.toasts);
        }

        if let Some((id, task)) = &self.editor_load {
            if let Some(result) = settle(task) {
                let id = *id;
                self.editor_load = None;
                let outcome = self.editor.apply_loaded(id, result, &mut self.toasts);
                self.follow(outcome);
            }
        }

        if let Some(task) = &self.editor_save {
            if let Some(result) = settle(task) {
                self.editor_save = None;
                let outcome = self.editor.apply_saved(result, &mut self.toasts);
                self.follow(outcome);
            }
        }
    }

    /// Once-per-frame housekeeping: results, refreshes and debounced search
    pub fn tick(&mut self, now: Instant) {
        self.toasts.prune(now);
        self.check_pending_operations();

        if self.current_route() != Route::Documents {
            return;
        }

        if let Some(command) = self.documents.ensure_session(self.session.session()) {
            self.run_list_command(command);
            return;
        }
        if self.refresh.take() {
            let command = self.documents.mount(self.session.session());
            self.run_list_command(command);
            return;
        }

        self.documents.observe_input(now);
        if let Some(command) = self.documents.poll(now) {
            self.run_list_command(command);
        }
    }

    /// No request is waiting for a response
    pub fn is_idle(&self) -> bool {
        self.auth_result.is_none()
            && self.list_fetches.is_empty()
            && self.deletes.is_empty()
            && self.editor_load.is_none()
            && self.editor_save.is_none()
    }

    /// How long the UI may sleep before the next `tick` has work to do
    pub fn next_repaint(&self, now: Instant) -> Option<Duration> {
        let busy = (!self.is_idle()).then_some(BUSY_REPAINT);
        let search = self.documents.next_wakeup(now);
        let toasts = (!self.toasts.is_empty()).then_some(Duration::from_millis(500));
        [busy, search, toasts].into_iter().flatten().min()
    }
}
