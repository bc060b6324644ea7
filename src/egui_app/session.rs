//! Session Store
//!
//! The session is a single opaque bearer token. It is persisted outside the
//! process so a restart keeps the user logged in, and it is threaded through
//! every authorized API call as an explicit [`Session`] value rather than
//! read from ambient global state.
//!
//! [`SessionManager`] is the one owner allowed to load, replace, or clear
//! the persisted token. Writes replace the whole file atomically.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Credential attached to authorized requests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// `Authorization` header value, if a token is held
    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {}", token))
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("token storage at {} failed: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("token storage is unavailable")]
    Poisoned,
}

/// Durable storage for the session token
pub trait TokenStore: Send {
    fn load(&self) -> Result<Option<String>, SessionError>;
    fn save(&self, token: &str) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// Token kept in a single file under the user's config directory
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, token).map_err(|e| self.io_error(e))?;
        fs::rename(&staging, &self.path).map_err(|e| {
            let _ = fs::remove_file(&staging);
            self.io_error(e)
        })
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// In-process token storage. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token.into()))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        self.slot
            .lock()
            .map(|slot| slot.clone())
            .map_err(|_| SessionError::Poisoned)
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        let mut slot = self.slot.lock().map_err(|_| SessionError::Poisoned)?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut slot = self.slot.lock().map_err(|_| SessionError::Poisoned)?;
        *slot = None;
        Ok(())
    }
}

/// Owns the current session and its persistence
pub struct SessionManager {
    store: Box<dyn TokenStore>,
    session: Session,
}

impl SessionManager {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            session: Session::anonymous(),
        }
    }

    /// Load whatever token survived the last run. A store that cannot be
    /// read leaves the user logged out.
    pub fn restore(&mut self) -> &Session {
        self.session = match self.store.load() {
            Ok(Some(token)) => {
                tracing::info!("restored saved session");
                Session::new(token)
            }
            Ok(None) => Session::anonymous(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read saved session");
                Session::anonymous()
            }
        };
        &self.session
    }

    /// Adopt a freshly issued token. The in-memory session is replaced even
    /// if persisting fails; the error is returned so the caller can warn.
    pub fn establish(&mut self, token: impl Into<String>) -> Result<(), SessionError> {
        let token = token.into();
        let persisted = self.store.save(&token);
        self.session = Session::new(token);
        persisted
    }

    /// Log out: forget the token in memory and on disk
    pub fn end(&mut self) -> Result<(), SessionError> {
        self.session = Session::anonymous();
        self.store.clear()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_bearer_header() {
        assert_eq!(Session::new("abc").bearer().as_deref(), Some("Bearer abc"));
        assert!(Session::anonymous().bearer().is_none());
    }

    #[test]
    fn test_manager_restore_from_store() {
        let mut manager = SessionManager::new(MemoryTokenStore::with_token("saved"));
        assert!(!manager.is_authenticated());
        manager.restore();
        assert_eq!(manager.session().token(), Some("saved"));
    }

    #[test]
    fn test_manager_establish_and_end() {
        let store = MemoryTokenStore::new();
        let mut manager = SessionManager::new(store.clone());

        manager.establish("abc").unwrap();
        assert_eq!(manager.session().token(), Some("abc"));
        assert_eq!(store.load().unwrap().as_deref(), Some("abc"));

        manager.end().unwrap();
        assert!(!manager.is_authenticated());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_establish_replaces_previous_token() {
        let store = MemoryTokenStore::with_token("old");
        let mut manager = SessionManager::new(store.clone());
        manager.restore();
        manager.establish("new").unwrap();
        assert_eq!(manager.session().token(), Some("new"));
        assert_eq!(store.load().unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("token"));

        assert!(store.load().unwrap().is_none());
        store.save("tok-1").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("tok-1"));
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_ignores_blank_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "  \n").unwrap();
        assert!(FileTokenStore::new(path).load().unwrap().is_none());
    }
}
