//! # Gatekeeper (Session Login Demo)
//!
//! `gatekeeper` is a small web service that accepts a username/password form,
//! validates it against a fixed credential table and keeps the result in a
//! server-side session.
//!
//! ## Session Flow
//!
//! - **Anonymous:** `GET /` redirects to `/login`.
//! - **Login:** `POST /login` checks both fields are non-empty, then compares the
//!   pair byte-for-byte with the credential table. On success the session records the
//!   username and the client is redirected to `/`.
//! - **Authenticated:** `GET /` renders `Welcome <username>!` with a logout link.
//! - **Logout:** `GET /logout` clears the username and redirects to `/login`.
//!
//! ## Credential Table
//!
//! The table is built once at startup (the demo users, or a JSON file passed with
//! `--users-file`) and shared read-only between requests. Passwords are stored in
//! plaintext on purpose: this is a demo, not an identity provider.
//!
//! ## Sessions
//!
//! Session state lives in process memory and is addressed by a random token carried in
//! the `gatekeeper_session` cookie. Only the SHA-256 of the token is used as the key.
//! Idle sessions expire after `--session-ttl` seconds.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
