//! Authentication CLI commands

use std::io::{self, BufRead, Write};

use clap::Subcommand;
use tracing::warn;

use super::CliContext;
use crate::error::{TrackerError, TrackerResult};
use crate::session::{SecretString, SessionStore};

/// Auth subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Sign in with email and password
    #[command(alias = "login")]
    Signin {
        /// Account email (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Create an account and sign in
    Signup {
        /// Account email (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Continue as a guest
    #[command(alias = "guest")]
    Anonymous,

    /// Sign out and forget the saved session
    Logout,

    /// Show the signed-in user
    Whoami,
}

/// Handle an auth command
pub fn handle_auth_command(ctx: &CliContext, cmd: AuthCommands) -> TrackerResult<()> {
    match cmd {
        AuthCommands::Signin { email } => {
            let email = prompt_email(email)?;
            let password = prompt_secret("Password: ")?;
            let mut session = ctx.open_session()?;
            let user = session.sign_in(&email, &password)?;
            println!("Signed in as {}", user.display_label());
        }

        AuthCommands::Signup { email } => {
            let email = prompt_email(email)?;
            let password = prompt_secret("Password: ")?;
            let confirm = prompt_secret("Confirm password: ")?;
            let mut session = ctx.open_session()?;
            let user = session.sign_up(&email, &password, &confirm)?;
            println!("Account created. Signed in as {}", user.display_label());
        }

        AuthCommands::Anonymous => {
            let mut session = ctx.open_session()?;
            let user = session.sign_in_anonymous()?;
            println!("Signed in as {}", user.display_label());
        }

        AuthCommands::Logout => {
            let store = SessionStore::new(&ctx.paths);
            if store.load()?.is_none() {
                println!("Not signed in.");
                return Ok(());
            }

            match ctx.open_session() {
                Ok(mut session) => {
                    if let Err(e) = session.restore() {
                        warn!(error = %e, "could not resume session before sign out");
                    }
                    session.logout()?;
                }
                Err(e) => {
                    warn!(error = %e, "identity service unavailable, clearing local session");
                    store.clear()?;
                }
            }
            println!("Signed out.");
        }

        AuthCommands::Whoami => match SessionStore::new(&ctx.paths).load()? {
            Some(session) => {
                println!("User:      {}", session.user.display_label());
                println!("User ID:   {}", session.user.uid);
                if let Some(email) = &session.user.email {
                    println!("Email:     {}", email);
                }
                println!("Anonymous: {}", session.user.is_anonymous);
                let state = if session.is_expired() {
                    "expired, refreshed on next request"
                } else {
                    "valid"
                };
                println!(
                    "Token:     {} until {}",
                    state,
                    session.expires_at.format("%Y-%m-%d %H:%M UTC")
                );
            }
            None => return Err(TrackerError::NotSignedIn),
        },
    }

    Ok(())
}

fn prompt_email(email: Option<String>) -> TrackerResult<String> {
    if let Some(email) = email {
        return Ok(email);
    }

    print!("Email: ");
    io::stdout()
        .flush()
        .map_err(|e| TrackerError::Io(format!("Failed to write prompt: {}", e)))?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| TrackerError::Io(format!("Failed to read email: {}", e)))?;
    Ok(line.trim().to_string())
}

fn prompt_secret(prompt: &str) -> TrackerResult<SecretString> {
    rpassword::prompt_password(prompt)
        .map(SecretString::from)
        .map_err(|e| TrackerError::Io(format!("Failed to read password: {}", e)))
}
