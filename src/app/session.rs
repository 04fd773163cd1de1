use crate::services::AccountApi;
use crate::types::User;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub const LOGIN_FAILED: &str = "Login failed";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Checking,
    Authenticated(User),
    Anonymous,
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// Carries the account service's message verbatim
    #[error("{0}")]
    LoginRejected(String),
    #[error("Signed in, but the session could not be confirmed")]
    SessionNotEstablished,
}

/// Application-scoped session. Created once at startup and shared by every view.
pub struct Session {
    account: Arc<dyn AccountApi>,
    state: RwLock<SessionState>,
    /// Set when the service turned the session down or it was signed out.
    /// An unreachable service leaves it unset.
    ended: AtomicBool,
}

impl Session {
    pub fn new(account: Arc<dyn AccountApi>) -> Self {
        Self {
            account,
            state: RwLock::new(SessionState::Checking),
            ended: AtomicBool::new(false),
        }
    }

    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user().cloned()
    }

    pub async fn is_authenticated(&self) -> bool {
        matches!(*self.state.read().await, SessionState::Authenticated(_))
    }

    /// Whether the saved session is known to be over, as opposed to merely
    /// unconfirmed for this run
    pub fn has_ended(&self) -> bool {
        self.ended.load(Ordering::SeqCst)
    }

    /// Ask the account service whether the current session is valid.
    /// Any failure counts as anonymous.
    pub async fn bootstrap(&self) -> SessionState {
        self.check().await
    }

    async fn check(&self) -> SessionState {
        let next = match self.account.check_auth().await {
            Ok(user) => {
                debug!("Session belongs to {}", user.display_name());
                self.ended.store(false, Ordering::SeqCst);
                SessionState::Authenticated(user)
            }
            Err(e) if e.is_session_rejected() => {
                debug!("No valid session: {}", e);
                self.ended.store(true, Ordering::SeqCst);
                SessionState::Anonymous
            }
            Err(e) => {
                warn!("Could not confirm session: {}", e);
                SessionState::Anonymous
            }
        };

        *self.state.write().await = next.clone();
        next
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        if let Err(e) = self.account.login(email, password).await {
            warn!("Login failed: {}", e);
            *self.state.write().await = SessionState::Anonymous;
            let message = e.server_message().unwrap_or(LOGIN_FAILED).to_string();
            return Err(SessionError::LoginRejected(message));
        }

        match self.check().await {
            SessionState::Authenticated(user) => {
                info!("Signed in as {}", user.display_name());
                Ok(user)
            }
            _ => Err(SessionError::SessionNotEstablished),
        }
    }

    /// Best-effort: the session ends locally even when the service call fails
    pub async fn logout(&self) {
        if let Err(e) = self.account.logout().await {
            warn!("Logout request failed: {}", e);
        }
        *self.state.write().await = SessionState::Anonymous;
        self.ended.store(true, Ordering::SeqCst);
        info!("Signed out");
    }
}
