//! Identity provider abstraction
//!
//! The session provider talks to the identity service only through the
//! `IdentityProvider` trait, so tests can substitute an in-memory fake.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::secret::SecretString;

/// Tokens are refreshed this long before they actually expire
const EXPIRY_SKEW_SECS: i64 = 60;

/// An authentication failure, carrying a message fit to show the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthError {
    message: String,
}

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Use `fallback` when the underlying error has no message
    pub fn or_fallback(message: &str, fallback: &str) -> Self {
        if message.trim().is_empty() {
            Self::new(fallback)
        } else {
            Self::new(message)
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type AuthResult<T> = Result<T, AuthError>;

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable user id, used to scope every backend request
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub is_anonymous: bool,
}

impl User {
    /// Label for the navigation bar
    pub fn display_label(&self) -> String {
        if self.is_anonymous {
            return "Guest User".to_string();
        }
        self.display_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.email.as_deref().filter(|s| !s.trim().is_empty()))
            .unwrap_or("User")
            .to_string()
    }
}

/// A live identity session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub id_token: SecretString,
    pub refresh_token: SecretString,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    /// True once the id token is within a minute of expiring
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_SKEW_SECS) >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Operations offered by an identity service
pub trait IdentityProvider {
    fn sign_in_with_password(&self, email: &str, password: &SecretString)
        -> AuthResult<AuthSession>;

    fn create_account_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> AuthResult<AuthSession>;

    fn sign_in_anonymously(&self) -> AuthResult<AuthSession>;

    /// Exchange the refresh token for a fresh id token
    fn refresh(&self, session: &AuthSession) -> AuthResult<AuthSession>;

    /// Revoke the session remotely, if the service supports it
    fn sign_out(&self, _session: &AuthSession) -> AuthResult<()> {
        Ok(())
    }
}

impl<T: IdentityProvider + ?Sized> IdentityProvider for Box<T> {
    fn sign_in_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> AuthResult<AuthSession> {
        (**self).sign_in_with_password(email, password)
    }

    fn create_account_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> AuthResult<AuthSession> {
        (**self).create_account_with_password(email, password)
    }

    fn sign_in_anonymously(&self) -> AuthResult<AuthSession> {
        (**self).sign_in_anonymously()
    }

    fn refresh(&self, session: &AuthSession) -> AuthResult<AuthSession> {
        (**self).refresh(session)
    }

    fn sign_out(&self, session: &AuthSession) -> AuthResult<()> {
        (**self).sign_out(session)
    }
}

/// Check the shape of an email address: `local@domain.tld`, no whitespace
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Validate credentials before contacting the identity service
///
/// `confirm` is the password confirmation, only given on sign-up.
pub fn validate_credentials(email: &str, password: &str, confirm: Option<&str>) -> AuthResult<()> {
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::new("Please fill in all fields"));
    }
    if !is_valid_email(email) {
        return Err(AuthError::new("Please enter a valid email address"));
    }
    if password.chars().count() < 6 {
        return Err(AuthError::new("Password must be at least 6 characters long"));
    }
    if let Some(confirm) = confirm {
        if confirm != password {
            return Err(AuthError::new("Passwords do not match"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: Option<&str>, name: Option<&str>, anonymous: bool) -> User {
        User {
            uid: "u1".into(),
            email: email.map(String::from),
            display_name: name.map(String::from),
            is_anonymous: anonymous,
        }
    }

    #[test]
    fn test_display_label() {
        assert_eq!(user(None, None, true).display_label(), "Guest User");
        assert_eq!(
            user(Some("a@b.co"), Some("Ada"), false).display_label(),
            "Ada"
        );
        assert_eq!(user(Some("a@b.co"), None, false).display_label(), "a@b.co");
        assert_eq!(user(None, Some(""), false).display_label(), "User");
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a.b@c.d.e"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@example."));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn test_validate_credentials_messages() {
        let msg = |r: AuthResult<()>| r.unwrap_err().message().to_string();

        assert_eq!(msg(validate_credentials("", "secret", None)), "Please fill in all fields");
        assert_eq!(
            msg(validate_credentials("nope", "secret", None)),
            "Please enter a valid email address"
        );
        assert_eq!(
            msg(validate_credentials("a@b.co", "12345", None)),
            "Password must be at least 6 characters long"
        );
        assert_eq!(
            msg(validate_credentials("a@b.co", "123456", Some("1234567"))),
            "Passwords do not match"
        );
        assert!(validate_credentials("a@b.co", "123456", Some("123456")).is_ok());
    }

    #[test]
    fn test_expiry_uses_skew() {
        let now = Utc::now();
        let session = AuthSession {
            user: user(None, None, true),
            id_token: "t".into(),
            refresh_token: "r".into(),
            expires_at: now + Duration::seconds(30),
        };
        assert!(session.is_expired_at(now));
        assert!(!session.is_expired_at(now - Duration::seconds(120)));
    }

    #[test]
    fn test_fallback_message() {
        assert_eq!(AuthError::or_fallback("", "Failed to sign in").message(), "Failed to sign in");
        assert_eq!(AuthError::or_fallback("boom", "Failed to sign in").message(), "boom");
    }
}
