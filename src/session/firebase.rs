//! Firebase-compatible identity REST client
//!
//! Talks to the `accounts:*` endpoints for password and anonymous sign-in and
//! to the secure token endpoint for refreshes. Provider error codes are
//! mapped to messages a user can act on.

use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::identity::{AuthError, AuthResult, AuthSession, IdentityProvider, User};
use super::secret::SecretString;
use crate::config::settings::IdentitySettings;

const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

/// Identity client for a Firebase-compatible project
#[derive(Debug, Clone)]
pub struct FirebaseIdentity {
    http: Client,
    api_key: Option<String>,
    identity_url: String,
    token_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnonymousRequest {
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl FirebaseIdentity {
    pub fn new(settings: &IdentitySettings, timeout: Duration) -> AuthResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::new(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key: settings.api_key.clone().filter(|k| !k.trim().is_empty()),
            identity_url: settings.identity_url.trim_end_matches('/').to_string(),
            token_url: settings.token_url.trim_end_matches('/').to_string(),
        })
    }

    fn api_key(&self) -> AuthResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            AuthError::new(
                "Identity API key is not configured. Run 'fintrack config set-api-key KEY' \
                 or set FINTRACK_API_KEY.",
            )
        })
    }

    fn account_call<B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
        fallback: &str,
    ) -> AuthResult<AccountResponse> {
        let url = format!("{}/accounts:{}", self.identity_url, endpoint);
        debug!(endpoint, "identity request");
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key()?)])
            .json(body)
            .send()
            .map_err(|e| AuthError::new(format!("{}: {}", fallback, e)))?;
        read_response(response, fallback)
    }

    fn account_session(&self, account: AccountResponse, is_anonymous: bool) -> AuthSession {
        let expires_at = expiry_for(&account.id_token, account.expires_in.as_deref());
        AuthSession {
            user: User {
                uid: account.local_id,
                email: account.email.filter(|e| !e.is_empty()),
                display_name: account.display_name.filter(|n| !n.is_empty()),
                is_anonymous,
            },
            id_token: SecretString::new(account.id_token),
            refresh_token: SecretString::new(account.refresh_token),
            expires_at,
        }
    }
}

impl IdentityProvider for FirebaseIdentity {
    fn sign_in_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> AuthResult<AuthSession> {
        let body = PasswordRequest {
            email,
            password: password.expose(),
            return_secure_token: true,
        };
        let account = self.account_call("signInWithPassword", &body, "Failed to sign in")?;
        Ok(self.account_session(account, false))
    }

    fn create_account_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> AuthResult<AuthSession> {
        let body = PasswordRequest {
            email,
            password: password.expose(),
            return_secure_token: true,
        };
        let account = self.account_call("signUp", &body, "Failed to create account")?;
        Ok(self.account_session(account, false))
    }

    fn sign_in_anonymously(&self) -> AuthResult<AuthSession> {
        let body = AnonymousRequest {
            return_secure_token: true,
        };
        let account = self.account_call("signUp", &body, "Failed to sign in anonymously")?;
        Ok(self.account_session(account, true))
    }

    fn refresh(&self, session: &AuthSession) -> AuthResult<AuthSession> {
        const FALLBACK: &str = "Failed to refresh session";
        let url = format!("{}/token", self.token_url);
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key()?)])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", session.refresh_token.expose()),
            ])
            .send()
            .map_err(|e| AuthError::new(format!("{}: {}", FALLBACK, e)))?;
        let refreshed: RefreshResponse = read_response(response, FALLBACK)?;

        if let Some(uid) = &refreshed.user_id {
            if uid != &session.user.uid {
                warn!("refresh returned a different user id");
                return Err(AuthError::new(
                    "Your session has expired. Please sign in again",
                ));
            }
        }

        Ok(AuthSession {
            user: session.user.clone(),
            expires_at: expiry_for(&refreshed.id_token, refreshed.expires_in.as_deref()),
            id_token: SecretString::new(refreshed.id_token),
            refresh_token: SecretString::new(refreshed.refresh_token),
        })
    }
}

fn read_response<T: DeserializeOwned>(
    response: reqwest::blocking::Response,
    fallback: &str,
) -> AuthResult<T> {
    let status = response.status();
    let text = response
        .text()
        .map_err(|e| AuthError::new(format!("{}: {}", fallback, e)))?;

    if !status.is_success() {
        let code = serde_json::from_str::<ErrorEnvelope>(&text)
            .map(|env| env.error.message)
            .unwrap_or_default();
        warn!(status = status.as_u16(), code = %code, "identity request rejected");
        return Err(if code.is_empty() {
            AuthError::new(format!("{}: HTTP {}", fallback, status.as_u16()))
        } else {
            map_error_code(&code)
        });
    }

    serde_json::from_str(&text).map_err(|e| AuthError::new(format!("{}: {}", fallback, e)))
}

/// Turn a provider error code into a readable message
///
/// Codes may carry a detail suffix (`WEAK_PASSWORD : Password should be ...`).
/// Unknown codes are passed through unchanged.
pub fn map_error_code(raw: &str) -> AuthError {
    let code = raw.split(" : ").next().unwrap_or(raw).trim();
    let message = match code {
        "EMAIL_EXISTS" => "An account with this email already exists",
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Incorrect email or password"
        }
        "INVALID_EMAIL" => "Please enter a valid email address",
        "WEAK_PASSWORD" => "Password must be at least 6 characters long",
        "USER_DISABLED" => "This account has been disabled",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts. Please try again later",
        "OPERATION_NOT_ALLOWED" | "ADMIN_ONLY_OPERATION" => {
            "This sign-in method is not enabled"
        }
        "TOKEN_EXPIRED" | "INVALID_REFRESH_TOKEN" | "USER_NOT_FOUND" | "INVALID_ID_TOKEN" => {
            "Your session has expired. Please sign in again"
        }
        _ => raw,
    };
    AuthError::new(message)
}

/// Work out when an id token expires
///
/// Prefers the `exp` claim in the token itself and falls back to the
/// `expiresIn` seconds the endpoint reported.
fn expiry_for(id_token: &str, expires_in: Option<&str>) -> DateTime<Utc> {
    if let Some(exp) = token_expiry(id_token) {
        return exp;
    }
    let secs = expires_in
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
    Utc::now() + chrono::Duration::seconds(secs)
}

/// Read the `exp` claim from a JWT without verifying it
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    #[derive(Deserialize)]
    struct Claims {
        exp: i64,
    }

    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    Utc.timestamp_opt(claims.exp, 0).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_known_codes() {
        assert_eq!(
            map_error_code("EMAIL_EXISTS").message(),
            "An account with this email already exists"
        );
        assert_eq!(
            map_error_code("INVALID_LOGIN_CREDENTIALS").message(),
            "Incorrect email or password"
        );
        assert_eq!(
            map_error_code("WEAK_PASSWORD : Password should be at least 6 characters").message(),
            "Password must be at least 6 characters long"
        );
    }

    #[test]
    fn test_unknown_code_is_verbatim() {
        assert_eq!(
            map_error_code("API key not valid. Please pass a valid API key.").message(),
            "API key not valid. Please pass a valid API key."
        );
    }

    #[test]
    fn test_token_expiry_reads_exp_claim() {
        let payload = URL_SAFE_NO_PAD.encode(br#"{"exp":1700000000,"user_id":"u1"}"#);
        let token = format!("header.{}.signature", payload);
        let exp = token_expiry(&token).unwrap();
        assert_eq!(exp.timestamp(), 1_700_000_000);

        assert!(token_expiry("not-a-jwt").is_none());
    }

    #[test]
    fn test_missing_api_key_is_reported() {
        let identity =
            FirebaseIdentity::new(&IdentitySettings::default(), Duration::from_secs(1)).unwrap();
        let err = identity.sign_in_anonymously().unwrap_err();
        assert!(err.message().contains("API key"));
    }
}
