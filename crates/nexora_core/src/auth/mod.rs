//! Authentication collaborator contract and session persistence.
//!
//! # Responsibility
//! - Describe the external credential service the app consumes.
//! - Persist the signed-in user record so it survives a reload.
//!
//! # Invariants
//! - The board store never calls into this module.
//! - Session records are opaque JSON stored under the `user` key.
//! - Log events never include emails, names or passwords.

mod session;
mod session_store;

pub use session::AuthSession;
pub use session_store::{FileSessionStore, MemorySessionStore, SessionError, SessionStore};

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Application-level role of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    User,
}

/// How the account authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthProvider {
    Local,
    Google,
}

/// Signed-in account record returned by the credential service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_provider: Option<AuthProvider>,
}

/// Account creation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Partial profile update. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<Option<String>>,
}

impl ProfilePatch {
    /// Applies the patch locally; used when the service echoes nothing back.
    pub fn apply_to(&self, user: &User) -> User {
        let mut updated = user.clone();
        if let Some(email) = &self.email {
            updated.email = email.clone();
        }
        if let Some(first_name) = &self.first_name {
            updated.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            updated.last_name = last_name.clone();
        }
        if let Some(avatar) = &self.avatar {
            updated.avatar = avatar.clone();
        }
        updated
    }
}

/// External credential service.
///
/// Implementations may be in-process fakes or backend clients; callers only
/// see this contract.
pub trait CredentialService {
    fn login(&self, email: &str, password: &str) -> Result<User, AuthError>;
    fn signup(&self, request: &SignupRequest) -> Result<User, AuthError>;
    /// Ends the remote session, if the backend has one.
    fn logout(&self) -> Result<(), AuthError> {
        Ok(())
    }
    fn update_profile(&self, user: &User, patch: &ProfilePatch) -> Result<User, AuthError>;
}

/// Errors surfaced to the caller for display.
#[derive(Debug)]
pub enum AuthError {
    /// Email/password pair was rejected.
    InvalidCredentials,
    /// Input was rejected before or by the service.
    Validation(String),
    /// Operation needs a signed-in user.
    NotAuthenticated,
    /// Service transport/backend failure.
    Backend(String),
    /// Local session record could not be persisted.
    Session(SessionError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::Validation(message) => write!(f, "{message}"),
            Self::NotAuthenticated => write!(f, "no user is signed in"),
            Self::Backend(message) => write!(f, "auth backend failed: {message}"),
            Self::Session(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Session(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SessionError> for AuthError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}
