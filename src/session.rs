//! Session token ownership and durable storage
//!
//! The client holds at most one bearer token. It is read from a
//! [`TokenStore`] once, when the session is created, and written back on
//! every [`Session::set_token`] call.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::error::{ApiError, Result};

/// Durable slot for the session token
pub trait TokenStore: Send + Sync {
    /// Read the stored token, if any
    fn load(&self) -> Result<Option<String>>;

    /// Replace the stored token
    fn save(&self, token: &str) -> Result<()>;

    /// Remove the stored token
    fn clear(&self) -> Result<()>;
}

// =============================================================================
// File store
// =============================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    token: Option<String>,
}

/// Token stored in a small TOML file (`token = "..."`)
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default session file (~/.config/streamhub/session.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("streamhub").join("session.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ApiError::Storage(e.to_string())),
        };

        let file: SessionFile =
            toml::from_str(&text).map_err(|e| ApiError::Storage(e.to_string()))?;
        Ok(file.token.filter(|t| !t.is_empty()))
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ApiError::Storage(e.to_string()))?;
        }

        let file = SessionFile {
            token: Some(token.to_string()),
        };
        let text = toml::to_string(&file).map_err(|e| ApiError::Storage(e.to_string()))?;
        write_private(&self.path, text.as_bytes()).map_err(|e| ApiError::Storage(e.to_string()))
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Storage(e.to_string())),
        }
    }
}

/// Write a file only the owner can read (0600 on unix), tightening an
/// existing file too
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(bytes)
}

// =============================================================================
// Memory store
// =============================================================================

/// In-process token store. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token.into()))),
        }
    }

    /// Current slot contents
    pub fn get(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slot.clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
        Ok(())
    }
}

// =============================================================================
// Session
// =============================================================================

/// Bearer token owned by one client, backed by a durable store
pub struct Session {
    token: RwLock<Option<String>>,
    store: Box<dyn TokenStore>,
}

impl Session {
    /// Create a session, reading the stored token once
    pub fn new(store: impl TokenStore + 'static) -> Self {
        let token = match store.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored session token");
                None
            }
        };

        Self {
            token: RwLock::new(token),
            store: Box::new(store),
        }
    }

    /// Current token. A poisoned lock is read through; the slot is a plain value.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace or clear the token, store first.
    ///
    /// If the store rejects the write the in-memory token is left as it was.
    pub fn set_token(&self, token: Option<&str>) -> Result<()> {
        match token {
            Some(t) => self.store.save(t)?,
            None => self.store.clear()?,
        }

        let mut slot = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *slot = token.map(str::to_string);
        tracing::debug!(authenticated = slot.is_some(), "session token updated");
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.token().is_some())
            .finish()
    }
}
