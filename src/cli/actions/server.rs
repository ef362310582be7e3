use crate::api::{self, handlers::auth};
use anyhow::{Context, Result};
use std::{fs, sync::Arc};
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub users_file: Option<String>,
    pub session_ttl_seconds: u64,
    pub public_url: String,
}

/// Load the credential table: the JSON file when given, otherwise the demo users.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or holds no users.
pub fn load_credentials(users_file: Option<&str>) -> Result<auth::CredentialStore> {
    let Some(path) = users_file else {
        debug!("No users file given, using demo credentials");
        return Ok(auth::CredentialStore::demo());
    };

    let json =
        fs::read_to_string(path).with_context(|| format!("Failed to read users file: {path}"))?;
    let store = auth::CredentialStore::from_json(&json)
        .with_context(|| format!("Invalid users file: {path}"))?;
    anyhow::ensure!(!store.is_empty(), "Users file has no entries: {path}");

    Ok(store)
}

/// Execute the server action.
/// # Errors
/// Returns an error if the credential table cannot be loaded or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let credentials = Arc::new(load_credentials(args.users_file.as_deref())?);

    let auth_config = auth::AuthConfig::new(args.public_url)
        .with_session_ttl_seconds(args.session_ttl_seconds);

    let sessions = Arc::new(auth::MemorySessionStore::new(auth_config.session_ttl()));

    let auth_state = Arc::new(auth::AuthState::new(auth_config, credentials, sessions));

    api::new(args.port, auth_state).await
}
