//! Signed-in user session facade.

use crate::auth::session_store::SessionStore;
use crate::auth::{AuthError, CredentialService, ProfilePatch, SignupRequest, User};
use log::{info, warn};

/// Couples a credential service with session persistence.
///
/// The persisted record is restored on construction, so a reload keeps the
/// user signed in.
pub struct AuthSession<C: CredentialService, S: SessionStore> {
    credentials: C,
    store: S,
    user: Option<User>,
}

impl<C: CredentialService, S: SessionStore> AuthSession<C, S> {
    /// Creates a session and restores any persisted user.
    ///
    /// A corrupt or unreadable record is treated as signed out.
    pub fn new(credentials: C, store: S) -> Self {
        let user = match store.load() {
            Ok(user) => user,
            Err(err) => {
                warn!("event=auth_restore module=auth status=error error={err}");
                None
            }
        };
        Self {
            credentials,
            store,
            user,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<&User, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "email and password are required".to_string(),
            ));
        }
        let user = self.credentials.login(email, password).map_err(|err| {
            warn!("event=auth_login module=auth status=error error_code={}", error_code(&err));
            err
        })?;
        self.sign_in("auth_login", user)
    }

    pub fn signup(&mut self, request: &SignupRequest) -> Result<&User, AuthError> {
        let required = [
            request.email.trim(),
            request.password.as_str(),
            request.first_name.trim(),
            request.last_name.trim(),
        ];
        if required.iter().any(|value| value.is_empty()) {
            return Err(AuthError::Validation(
                "email, password, first and last name are required".to_string(),
            ));
        }
        let user = self.credentials.signup(request).map_err(|err| {
            warn!("event=auth_signup module=auth status=error error_code={}", error_code(&err));
            err
        })?;
        self.sign_in("auth_signup", user)
    }

    /// Signs out locally even if the service call fails.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        let remote = self.credentials.logout();
        self.user = None;
        self.store.clear()?;
        info!("event=auth_logout module=auth status=ok");
        remote
    }

    pub fn update_profile(&mut self, patch: &ProfilePatch) -> Result<&User, AuthError> {
        let current = self.user.as_ref().ok_or(AuthError::NotAuthenticated)?;
        let updated = self.credentials.update_profile(current, patch)?;
        self.sign_in("auth_profile_update", updated)
    }

    fn sign_in(&mut self, event: &'static str, user: User) -> Result<&User, AuthError> {
        self.store.save(&user)?;
        info!("event={event} module=auth status=ok");
        Ok(self.user.insert(user))
    }
}

fn error_code(err: &AuthError) -> &'static str {
    match err {
        AuthError::InvalidCredentials => "invalid_credentials",
        AuthError::Validation(_) => "validation",
        AuthError::NotAuthenticated => "not_authenticated",
        AuthError::Backend(_) => "backend",
        AuthError::Session(_) => "session",
    }
}
