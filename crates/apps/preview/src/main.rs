//! inbox-preview - print the newest messages of a Gmail inbox
//!
//! Tokens are handed over by the identity provider with `store-token`;
//! `fetch` resolves the session user's token and lists the inbox.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, TimeDelta, Utc};
use clap::{Parser, Subcommand};
use log::{debug, error};
use mail::{
    CredentialStore, FileCredentialStore, PreviewConfig, PreviewService, SessionIdentity,
    StoredToken, UserId,
};
use std::io::Read;
use std::path::PathBuf;

mod render;

#[derive(Parser)]
#[command(name = "inbox-preview")]
#[command(about = "Preview the newest messages in a Gmail inbox", long_about = None)]
struct Cli {
    /// Settings file (defaults to ~/.config/inbox-preview/preview.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch and print the inbox of the signed-in user
    Fetch {
        /// Signed-in user; without one the inbox is empty
        #[arg(long, env = "INBOX_PREVIEW_USER")]
        user: Option<String>,

        /// Print records as JSON instead of the mail list
        #[arg(long)]
        json: bool,

        /// Width of the mail list in characters
        #[arg(long, default_value_t = 60)]
        width: usize,
    },

    /// Store an access token for a user (token is read from stdin)
    StoreToken {
        #[arg(long)]
        user: String,

        #[arg(long)]
        refresh_token: Option<String>,

        /// Seconds until the access token expires
        #[arg(long)]
        expires_in: Option<i64>,
    },

    /// Remove the stored token for a user
    Forget {
        #[arg(long)]
        user: String,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    // Bootstrap config directory
    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => PreviewConfig::from_file(path)?,
        None => PreviewConfig::load()?,
    };

    match cli.cmd.unwrap_or(Command::Fetch {
        user: std::env::var("INBOX_PREVIEW_USER").ok(),
        json: false,
        width: 60,
    }) {
        Command::Fetch { user, json, width } => {
            let service = PreviewService::from_config(&settings)?;
            let session = user.filter(|u| !u.is_empty()).map(SessionIdentity::new);
            if session.is_none() {
                debug!("No user signed in; pass --user or set INBOX_PREVIEW_USER");
            }

            let records = service.fetch_inbox_preview(session.as_ref());

            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                print!("{}", render::render_inbox("Inbox", &records, width));
            }
        }
        Command::StoreToken {
            user,
            refresh_token,
            expires_in,
        } => {
            eprintln!("Paste access token (end with Ctrl-D):");
            let mut access_token = String::new();
            std::io::stdin()
                .read_to_string(&mut access_token)
                .context("Failed to read access token from stdin")?;
            let access_token = access_token.trim();
            if access_token.is_empty() {
                bail!("No access token given");
            }

            let mut token = StoredToken::new(access_token);
            if let Some(refresh_token) = refresh_token {
                token = token.with_refresh_token(refresh_token);
            }
            if let Some(secs) = expires_in {
                token = token.with_expires_at(expiry_after(Utc::now(), secs)?);
            }

            let store = credential_store(&settings)?;
            store.put(UserId::new(&user), token)?;
            println!("Stored token for {} in {}", user, store.path().display());
        }
        Command::Forget { user } => {
            let store = credential_store(&settings)?;
            store.remove(&UserId::new(&user))?;
            println!("Removed token for {}", user);
        }
    }

    Ok(())
}

fn credential_store(settings: &PreviewConfig) -> Result<FileCredentialStore> {
    match &settings.credentials_path {
        Some(path) => Ok(FileCredentialStore::new(path)),
        None => FileCredentialStore::open_default(),
    }
}

/// Absolute expiry `secs` seconds after `now`
fn expiry_after(now: DateTime<Utc>, secs: i64) -> Result<DateTime<Utc>> {
    TimeDelta::try_seconds(secs)
        .and_then(|delta| now.checked_add_signed(delta))
        .with_context(|| format!("--expires-in {} is out of range", secs))
}
