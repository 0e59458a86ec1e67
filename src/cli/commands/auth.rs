use anyhow::Context;
use chrono::Utc;
use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::client::ApiClient;
use crate::cli::config::SessionStore;
use crate::cli::utils::{output_notice, output_record, output_success};
use crate::cli::OutputFormat;
use crate::session::{AuthGuard, Session};

/// Where the CLI sends users who need a session
const LOGIN_HINT: &str = "estate auth login <email>";

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login as an admin")]
    Login {
        #[arg(help = "Admin email")]
        email: String,
        #[arg(long, env = "ESTATE_ADMIN_PASSWORD", help = "Password (read from stdin if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Logout and forget the stored session")]
    Logout,

    #[command(about = "Show the admin identity behind the stored token")]
    Whoami,

    #[command(about = "Show current authentication status")]
    Status,
}

pub async fn handle(cmd: AuthCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = SessionStore::open_default()?;

    match cmd {
        AuthCommands::Login { email, password } => {
            // Login is an anonymous-only view: an existing session short-circuits it
            let outcome = AuthGuard::anonymous_only().evaluate(&store.state()?);
            if outcome.redirect.is_some() {
                let current = outcome.session.map(|s| s.email).unwrap_or_default();
                return output_notice(
                    &output_format,
                    &format!("Already logged in as {}; run `estate auth logout` first", current),
                );
            }

            let password = match password {
                Some(p) => p,
                None => read_password()?,
            };

            let body = client
                .post("/api/auth/admin/login", Some(&json!({ "email": email, "password": password })))
                .await?
                .into_success()?;

            let session = session_from_login(&body)?;
            store.save(&session)?;

            output_success(
                &output_format,
                &format!("Logged in as {}", session.email),
                Some(json!({ "admin": body["admin"] })),
            )
        }
        AuthCommands::Logout => {
            let had_session = logout(&store, client).await?;
            let message = if had_session { "Logged out" } else { "No stored session" };
            output_success(&output_format, message, None)
        }
        AuthCommands::Whoami => {
            let outcome = AuthGuard::require_auth(LOGIN_HINT).evaluate(&store.state()?);
            let session = match (outcome.redirect, outcome.session) {
                (None, Some(session)) => session,
                (redirect, _) => {
                    let hint = redirect.unwrap_or_else(|| LOGIN_HINT.to_string());
                    return output_notice(&output_format, &format!("Not logged in; run `{}`", hint));
                }
            };

            let body = client
                .get("/api/auth/admin/me", Some(&session.token))
                .await?
                .into_success()?;
            output_record(&output_format, &body, &["admin.id", "admin.email", "admin.role", "admin.type"])
        }
        AuthCommands::Status => {
            let outcome = AuthGuard::default().evaluate(&store.state()?);
            match outcome.session {
                Some(session) => output_record(
                    &output_format,
                    &json!({
                        "authenticated": outcome.is_authenticated,
                        "email": session.email,
                        "role": session.role,
                        "since": session.created_at,
                    }),
                    &["authenticated", "email", "role", "since"],
                ),
                None => output_notice(&output_format, "Not logged in"),
            }
        }
    }
}

/// Forget the local session, then tell the server. Server tokens are
/// stateless, so a failed request does not keep the session alive.
async fn logout(store: &SessionStore, client: &ApiClient) -> anyhow::Result<bool> {
    let had_session = store.clear()?;

    let reply = client.post::<Value>("/api/auth/logout", None).await;
    if let Err(e) = reply.and_then(|r| r.into_success()) {
        tracing::warn!("Server logout failed: {:#}", e);
    }

    Ok(had_session)
}

fn read_password() -> anyhow::Result<String> {
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin().read_line(&mut line).context("failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Build the stored session from a successful login body
fn session_from_login(body: &Value) -> anyhow::Result<Session> {
    let field = |path: &[&str]| -> anyhow::Result<String> {
        path.iter()
            .try_fold(body, |v, key| v.get(*key))
            .and_then(Value::as_str)
            .map(str::to_string)
            .with_context(|| format!("login response missing {}", path.join(".")))
    };

    Ok(Session {
        token: field(&["token"])?,
        id: field(&["admin", "id"])?,
        email: field(&["admin", "email"])?,
        role: field(&["admin", "role"])?,
        created_at: Utc::now(),
    })
}
