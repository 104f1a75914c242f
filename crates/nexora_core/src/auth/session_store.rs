//! Session record persistence backends.

use crate::auth::User;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Storage key of the signed-in user record.
pub const SESSION_KEY: &str = "user";

/// Key-value persistence for the signed-in user.
pub trait SessionStore {
    fn load(&self) -> Result<Option<User>, SessionError>;
    fn save(&mut self, user: &User) -> Result<(), SessionError>;
    fn clear(&mut self) -> Result<(), SessionError>;
}

#[derive(Debug)]
pub enum SessionError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "session storage failed: {err}"),
            Self::Json(err) => write!(f, "session record is not valid JSON: {err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SessionError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Process-local store. Records are kept serialized, like browser storage.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: HashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw serialized record, if any.
    pub fn raw(&self) -> Option<&str> {
        self.entries.get(SESSION_KEY).map(String::as_str)
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<User>, SessionError> {
        self.raw()
            .map(serde_json::from_str::<User>)
            .transpose()
            .map_err(Into::into)
    }

    fn save(&mut self, user: &User) -> Result<(), SessionError> {
        self.entries
            .insert(SESSION_KEY.to_string(), serde_json::to_string(user)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        self.entries.remove(SESSION_KEY);
        Ok(())
    }
}

/// File-backed store: one `user.json` inside a directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{SESSION_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<User>, SessionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, user: &User) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec(user)?)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
