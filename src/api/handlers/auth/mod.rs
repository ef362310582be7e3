//! Auth handlers and supporting modules.
//!
//! This module owns the credential table, the authenticator that moves a client
//! between the Anonymous and Authenticated states, and the cookie-backed session
//! storage those transitions are recorded in.
//!
//! ## Login Rules
//!
//! - Both fields must be non-empty; an empty field fails without consulting the table.
//! - Usernames and passwords are compared byte-for-byte (case-sensitive, no trimming).
//! - A successful login while already authenticated replaces the previous user.
//! - A failed login never changes the session.
//!
//! Every failure surfaces as the single message `Invalid username or password!`.

mod authenticator;
mod credentials;
pub(crate) mod login;
pub(crate) mod session;
mod state;
mod storage;
pub(crate) mod types;
mod utils;
pub(crate) mod views;

pub use authenticator::{AuthError, Authenticator};
pub use credentials::CredentialStore;
pub use state::{AuthConfig, AuthState};
pub use storage::{spawn_session_reaper, MemorySessionStore, Session, SessionStore};
pub use types::{Flash, FlashLevel};
pub use views::{render_index, render_login_page, ViewResult};
