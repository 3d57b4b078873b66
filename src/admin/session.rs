use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::store::domain::{
    AccessLevel, Admin, AdminDraft, NewUser, Role, User, ValidationError,
};
use crate::store::ids::UserId;
use crate::store::repository::{EntityStore, StoreError};

/// Bearer token handed to the admin UI on login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SessionToken(pub Uuid);

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A live admin session. Created on login, dropped on logout or expiry;
/// there is no ambient session state anywhere else in the service.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SessionToken,
    pub user_id: UserId,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Authentication failures. All of them surface as 401 to the client.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("session is missing, expired, or revoked")]
    InvalidSession,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Registration payload for a new admin account.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRegistration {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub access_level: Option<AccessLevel>,
}

impl AdminRegistration {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "email" });
        }
        if !self.email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }
        if self.password.len() < 8 {
            return Err(ValidationError::WeakPassword);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Error raised while registering an admin account.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Manages admin credentials and the session table.
pub struct SessionService<S> {
    store: Arc<S>,
    sessions: Mutex<HashMap<Uuid, Session>>,
    ttl: Duration,
}

impl<S> SessionService<S>
where
    S: EntityStore,
{
    pub fn new(store: Arc<S>, ttl_minutes: i64) -> Self {
        Self {
            store,
            sessions: Mutex::new(HashMap::new()),
            ttl: Duration::minutes(ttl_minutes.max(1)),
        }
    }

    /// Registers a new admin account: user record plus admin profile with
    /// the default moderation permissions.
    pub fn register(&self, registration: AdminRegistration) -> Result<Admin, RegistrationError> {
        registration.validate()?;

        let password_hash = bcrypt::hash(&registration.password, bcrypt::DEFAULT_COST)
            .map_err(|err| RegistrationError::Hashing(err.to_string()))?;

        let user = self.store.create_user(NewUser {
            email: registration.email,
            password_hash,
            role: Role::Admin,
        })?;

        let admin = self.store.create_admin(AdminDraft {
            user_id: user.id,
            permissions: Admin::default_permissions(),
            access_level: registration.access_level.unwrap_or(AccessLevel::Moderator),
        })?;

        tracing::info!(user_id = %user.id, "admin account registered");
        Ok(admin)
    }

    /// Verifies credentials and opens a session. Only accounts with the
    /// admin role and an existing admin profile can log in here.
    pub fn login(&self, email: &str, password: &str) -> Result<(Session, User), AuthError> {
        let user = self
            .store
            .user_by_email(email)?
            .ok_or(AuthError::InvalidCredentials)?;

        if user.role != Role::Admin {
            return Err(AuthError::InvalidCredentials);
        }
        let verified = bcrypt::verify(password, &user.password_hash).unwrap_or(false);
        if !verified {
            return Err(AuthError::InvalidCredentials);
        }
        self.store
            .admin_for_user(&user.id)?
            .ok_or(AuthError::InvalidCredentials)?;

        let now = Utc::now();
        self.store.record_admin_login(&user.id, now)?;

        let session = Session {
            token: SessionToken(Uuid::new_v4()),
            user_id: user.id,
            role: user.role,
            issued_at: now,
            expires_at: now + self.ttl,
        };

        let mut sessions = self.sessions.lock().map_err(|_| AuthError::InvalidSession)?;
        sessions.insert(session.token.0, session.clone());

        tracing::info!(user_id = %user.id, "admin session opened");
        Ok((session, user))
    }

    /// Resolves a bearer token to a live session. Expired sessions are
    /// removed on the way out.
    pub fn resolve(&self, raw_token: &str) -> Result<Session, AuthError> {
        let token = Uuid::parse_str(raw_token.trim()).map_err(|_| AuthError::InvalidSession)?;
        let mut sessions = self.sessions.lock().map_err(|_| AuthError::InvalidSession)?;

        match sessions.get(&token) {
            Some(session) if session.expires_at > Utc::now() => Ok(session.clone()),
            Some(_) => {
                sessions.remove(&token);
                Err(AuthError::InvalidSession)
            }
            None => Err(AuthError::InvalidSession),
        }
    }

    /// Drops a session. Safe to call for tokens that are already gone.
    pub fn logout(&self, token: &SessionToken) {
        if let Ok(mut sessions) = self.sessions.lock() {
            sessions.remove(&token.0);
        }
    }
}
