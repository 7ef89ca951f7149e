//! Product catalog admin CLI.

mod commands;
mod config;
mod handlers;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::product;

/// Product catalog admin console
#[derive(Parser)]
#[command(name = "catalog")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "plain")]
    format: output::OutputFormat,

    /// Backend base URL
    #[arg(short, long, global = true, env = "CATALOG_BASE_URL")]
    base_url: Option<String>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage authentication
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Product operations
    #[command(alias = "p")]
    Product {
        #[command(subcommand)]
        action: product::ProductAction,
    },

    /// Show current configuration
    Config,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Login against the backend, or store a token directly
    Login {
        /// Account username; stored as-is with --token, or used to login
        /// with --password
        #[arg(short, long)]
        username: Option<String>,
        /// Account password
        #[arg(short, long, requires = "username", conflicts_with = "token")]
        password: Option<String>,
        /// Store this bearer token without calling the backend
        #[arg(short, long)]
        token: Option<String>,
        /// User ID stored alongside a manual token
        #[arg(long, requires = "token")]
        id: Option<String>,
        /// Roles stored alongside a manual token (comma-separated)
        #[arg(long, requires = "token", value_delimiter = ',')]
        roles: Vec<String>,
    },
    /// Logout and clear the persisted session
    Logout,
    /// Show current auth status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let base_url = cli.base_url.as_deref();

    match cli.command {
        Commands::Auth { action } => handle_auth(action, base_url).await,
        Commands::Product { action } => product::handle(action, cli.format, base_url).await,
        Commands::Config => {
            let store = config::open_store()?;
            let auth = store.state().auth;
            println!("State file: {}", config::state_path()?.display());
            println!("Authenticated: {}", auth.is_authenticated());
            if let Some(username) = &auth.username {
                println!("Username: {}", username);
            }
            if let Some(id) = &auth.id {
                println!("User ID: {}", id);
            }
            Ok(())
        }
    }
}

async fn handle_auth(action: AuthAction, base_url: Option<&str>) -> Result<()> {
    match action {
        AuthAction::Login {
            username,
            password,
            token,
            id,
            roles,
        } => {
            let store = config::open_store()?;

            let session = match (token, username) {
                (Some(token), username) => manual_session(token, id, username, roles),
                (None, Some(username)) => {
                    let password = password
                        .ok_or_else(|| anyhow::anyhow!("--password is required with --username"))?;
                    let client = config::build_client(&store, base_url)?;
                    client.auth().login(&username, &password).await?
                }
                (None, None) => {
                    anyhow::bail!("provide either --token or --username/--password")
                }
            };

            store.login(&session);
            println!("Logged in as {}", display_name(&session));
            Ok(())
        }
        AuthAction::Logout => {
            let store = config::open_store()?;
            store.logout();
            println!("Logged out");
            Ok(())
        }
        AuthAction::Status => {
            let store = config::open_store()?;
            let auth = store.state().auth;
            match auth.to_session() {
                Some(session) => println!("Logged in as {}", display_name(&session)),
                None => println!("Not logged in"),
            }
            Ok(())
        }
    }
}

/// Build a session from manually supplied auth fields. Replaces the
/// persisted auth slice wholesale; omitted fields store as empty.
fn manual_session(
    token: String,
    id: Option<String>,
    username: Option<String>,
    roles: Vec<String>,
) -> catalog::Session {
    catalog::Session::new(token, id.unwrap_or_default())
        .with_username(username.unwrap_or_default())
        .with_roles(roles)
}

fn display_name(session: &catalog::Session) -> String {
    if !session.username.is_empty() {
        session.username.clone()
    } else if !session.id.is_empty() {
        session.id.clone()
    } else {
        "(unnamed)".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::AuthState;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_manual_session_stores_all_fields() {
        let session = manual_session(
            "t1".into(),
            Some("u1".into()),
            Some("admin".into()),
            vec!["ROLE_ADMIN".into(), "ROLE_USER".into()],
        );

        let auth = AuthState::from(&session);
        assert_eq!(auth.token.as_deref(), Some("t1"));
        assert_eq!(auth.username.as_deref(), Some("admin"));
        assert_eq!(auth.roles, vec!["ROLE_ADMIN".to_owned(), "ROLE_USER".to_owned()]);

        // survives a persistence round trip
        let persisted = serde_json::to_string(&auth).unwrap();
        assert_eq!(AuthState::from_persisted(&persisted), auth);
    }

    #[test]
    fn test_manual_session_defaults_omitted_fields() {
        let session = manual_session("t2".into(), None, None, Vec::new());

        assert_eq!(session.token, "t2");
        assert!(session.username.is_empty());
        assert!(session.roles.is_empty());
        assert_eq!(display_name(&session), "(unnamed)");
    }
}
