//! Command-line argument dispatch.
//!
//! Maps validated CLI arguments to the action to run, such as starting the
//! HTTP server with its session and credential settings.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{auth, ARG_PORT};
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let auth_opts = auth::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        users_file: auth_opts.users_file,
        session_ttl_seconds: auth_opts.session_ttl_seconds,
        public_url: auth_opts.public_url,
    }))
}
