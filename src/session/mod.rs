//! Identity session management
//!
//! - `identity`: the provider trait, user and session types, credential checks
//! - `firebase`: REST implementation against a Firebase-compatible service
//! - `provider`: the session state machine and its event stream
//! - `store`: persistence of the session between runs
//! - `secret`: zeroizing string for passwords and tokens

pub mod firebase;
pub mod identity;
pub mod provider;
pub mod secret;
pub mod store;

pub use firebase::FirebaseIdentity;
pub use identity::{AuthError, AuthResult, AuthSession, IdentityProvider, User};
pub use provider::{SessionEvent, SessionProvider};
pub use secret::SecretString;
pub use store::SessionStore;

use crate::config::{Settings, TrackerPaths};

/// Session provider wired to the configured identity service and to
/// `session.json`
pub type AppSession = SessionProvider<Box<dyn IdentityProvider>>;

/// Build the application's session provider from settings
pub fn open(paths: &TrackerPaths, settings: &Settings) -> AuthResult<AppSession> {
    let identity = FirebaseIdentity::new(&settings.identity, settings.request_timeout())?;
    Ok(SessionProvider::with_store(
        Box::new(identity) as Box<dyn IdentityProvider>,
        SessionStore::new(paths),
    ))
}
