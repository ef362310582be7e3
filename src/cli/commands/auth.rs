use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgMatches, Command};
use url::Url;

pub const ARG_USERS_FILE: &str = "users-file";
pub const ARG_SESSION_TTL: &str = "session-ttl";
pub const ARG_PUBLIC_URL: &str = "public-url";

#[derive(Debug, Clone)]
pub struct Options {
    pub users_file: Option<String>,
    pub session_ttl_seconds: u64,
    pub public_url: String,
}

impl Options {
    /// Parse session and credential arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the TTL is zero or the public URL is not an http(s) URL.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let session_ttl_seconds = matches
            .get_one::<u64>(ARG_SESSION_TTL)
            .copied()
            .unwrap_or(43_200);
        if session_ttl_seconds == 0 {
            return Err(anyhow!("--{ARG_SESSION_TTL} must be greater than zero"));
        }

        let public_url = matches
            .get_one::<String>(ARG_PUBLIC_URL)
            .cloned()
            .unwrap_or_else(|| "http://localhost:8080".to_string());
        let parsed = Url::parse(&public_url)
            .with_context(|| format!("invalid --{ARG_PUBLIC_URL}: {public_url}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(anyhow!(
                "--{ARG_PUBLIC_URL} must use http or https, got {}",
                parsed.scheme()
            ));
        }

        Ok(Self {
            users_file: matches
                .get_one::<String>(ARG_USERS_FILE)
                .cloned()
                .filter(|v| !v.trim().is_empty()),
            session_ttl_seconds,
            public_url,
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_USERS_FILE)
                .long(ARG_USERS_FILE)
                .help("JSON file with a {\"username\": \"password\"} table (default: demo users)")
                .env("GATEKEEPER_USERS_FILE"),
        )
        .arg(
            Arg::new(ARG_SESSION_TTL)
                .long(ARG_SESSION_TTL)
                .help("Idle session lifetime in seconds")
                .env("GATEKEEPER_SESSION_TTL")
                .default_value("43200")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new(ARG_PUBLIC_URL)
                .long(ARG_PUBLIC_URL)
                .help("Public URL of the service; https marks the session cookie Secure")
                .env("GATEKEEPER_PUBLIC_URL")
                .default_value("http://localhost:8080"),
        )
}
