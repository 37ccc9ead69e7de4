//! Session provider
//!
//! Owns the current identity session and is the only writer of the token.
//! Every transition is announced to subscribers as a `SessionEvent` that
//! carries the new token value, which is how the API client learns about it.

use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{info, warn};

use super::identity::{
    validate_credentials, AuthError, AuthResult, AuthSession, IdentityProvider, User,
};
use super::secret::SecretString;
use super::store::SessionStore;

/// A session state transition
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SignedIn { user: User, token: SecretString },
    TokenRefreshed { token: SecretString },
    SignedOut,
}

impl SessionEvent {
    /// The token in effect after this transition, `None` once signed out
    pub fn token(&self) -> Option<&SecretString> {
        match self {
            SessionEvent::SignedIn { token, .. } | SessionEvent::TokenRefreshed { token } => {
                Some(token)
            }
            SessionEvent::SignedOut => None,
        }
    }
}

/// Current user, loading flag and authentication operations
pub struct SessionProvider<P> {
    identity: P,
    store: Option<SessionStore>,
    session: Option<AuthSession>,
    loading: bool,
    subscribers: Vec<Sender<SessionEvent>>,
}

impl<P: IdentityProvider> SessionProvider<P> {
    /// Create a provider that keeps the session in memory only
    pub fn new(identity: P) -> Self {
        Self {
            identity,
            store: None,
            session: None,
            loading: true,
            subscribers: Vec::new(),
        }
    }

    /// Create a provider that persists the session between runs
    pub fn with_store(identity: P, store: SessionStore) -> Self {
        Self {
            store: Some(store),
            ..Self::new(identity)
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// True until `restore` has resolved the initial session state
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn token(&self) -> Option<&SecretString> {
        self.session.as_ref().map(|s| &s.id_token)
    }

    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    /// Receive every future session transition
    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Resume the persisted session, refreshing its token if it has expired
    ///
    /// Resolves the loading state whatever the outcome. A session that can no
    /// longer be refreshed is discarded.
    pub fn restore(&mut self) -> AuthResult<Option<&User>> {
        let saved = match &self.store {
            Some(store) => store.load().unwrap_or_else(|e| {
                warn!(error = %e, "failed to read saved session");
                None
            }),
            None => None,
        };

        let result = match saved {
            None => Ok(()),
            Some(session) if session.is_expired() => match self.identity.refresh(&session) {
                Ok(fresh) => {
                    info!("restored session after token refresh");
                    self.install(fresh);
                    Ok(())
                }
                Err(e) => {
                    warn!(error = %e, "saved session could not be refreshed");
                    self.forget();
                    Err(e)
                }
            },
            Some(session) => {
                info!("restored saved session");
                self.install(session);
                Ok(())
            }
        };

        self.loading = false;
        result.map(|_| self.user())
    }

    /// Sign in with email and password
    pub fn sign_in(&mut self, email: &str, password: &SecretString) -> AuthResult<&User> {
        let email = email.trim();
        validate_credentials(email, password, None)?;
        let session = self
            .identity
            .sign_in_with_password(email, password)
            .map_err(|e| AuthError::or_fallback(e.message(), "Failed to sign in"))?;
        info!("signed in with password");
        Ok(self.install(session))
    }

    /// Create an account and sign in to it
    pub fn sign_up(
        &mut self,
        email: &str,
        password: &SecretString,
        confirm: &SecretString,
    ) -> AuthResult<&User> {
        let email = email.trim();
        validate_credentials(email, password, Some(confirm.expose()))?;
        let session = self
            .identity
            .create_account_with_password(email, password)
            .map_err(|e| AuthError::or_fallback(e.message(), "Failed to create account"))?;
        info!("created account");
        Ok(self.install(session))
    }

    /// Sign in as a guest
    pub fn sign_in_anonymous(&mut self) -> AuthResult<&User> {
        let session = self
            .identity
            .sign_in_anonymously()
            .map_err(|e| AuthError::or_fallback(e.message(), "Failed to sign in anonymously"))?;
        info!("signed in anonymously");
        Ok(self.install(session))
    }

    /// End the session locally and with the identity service
    pub fn logout(&mut self) -> AuthResult<()> {
        if let Some(session) = &self.session {
            self.identity
                .sign_out(session)
                .map_err(|e| AuthError::or_fallback(e.message(), "Failed to sign out"))?;
        }
        self.forget();
        info!("signed out");
        Ok(())
    }

    /// Refresh the token if it is about to expire
    ///
    /// Returns the token that should be used for the next request.
    pub fn ensure_fresh(&mut self) -> AuthResult<Option<&SecretString>> {
        let Some(current) = &self.session else {
            return Ok(None);
        };
        if !current.is_expired() {
            return Ok(self.token());
        }

        match self.identity.refresh(current) {
            Ok(fresh) => {
                let token = fresh.id_token.clone();
                self.save(&fresh);
                self.session = Some(fresh);
                self.emit(SessionEvent::TokenRefreshed { token });
                Ok(self.token())
            }
            Err(e) => {
                self.forget();
                Err(e)
            }
        }
    }

    fn install(&mut self, session: AuthSession) -> &User {
        let event = SessionEvent::SignedIn {
            user: session.user.clone(),
            token: session.id_token.clone(),
        };
        self.loading = false;
        self.save(&session);
        self.emit(event);
        &self.session.insert(session).user
    }

    fn forget(&mut self) {
        let had_session = self.session.take().is_some();
        if let Some(store) = &self.store {
            if let Err(e) = store.clear() {
                warn!(error = %e, "failed to remove saved session");
            }
        }
        if had_session {
            self.emit(SessionEvent::SignedOut);
        }
    }

    fn save(&self, session: &AuthSession) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(session) {
                warn!(error = %e, "failed to save session");
            }
        }
    }

    fn emit(&mut self, event: SessionEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
