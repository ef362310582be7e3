//! Fixed username/password table consulted by the authenticator.

use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::collections::{BTreeMap, HashMap};

/// Immutable credential table, built once at startup and shared behind `Arc`.
///
/// Passwords are compared byte-for-byte: no normalization, no trimming, no hashing.
#[derive(Debug, Default)]
pub struct CredentialStore {
    // Insertion order of usernames; `passwords` holds the lookup side.
    usernames: Vec<String>,
    passwords: HashMap<String, SecretString>,
}

impl CredentialStore {
    /// Build a store from `(username, password)` pairs.
    ///
    /// A repeated username keeps its first position and the last password.
    pub fn new<I, U, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (U, P)>,
        U: Into<String>,
        P: Into<String>,
    {
        let mut store = Self::default();
        for (username, password) in entries {
            let username = username.into();
            let password = SecretString::from(password.into());
            if store.passwords.insert(username.clone(), password).is_none() {
                store.usernames.push(username);
            }
        }
        store
    }

    /// The demo table served when no `--users-file` is given.
    #[must_use]
    pub fn demo() -> Self {
        Self::new([
            ("admin", "password123"),
            ("user", "userpass"),
            ("test", "testpass"),
        ])
    }

    /// Parse a JSON object of `"username": "password"` pairs.
    ///
    /// Usernames are kept in lexicographic order.
    ///
    /// # Errors
    /// Returns an error if the document is not an object of string values.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: BTreeMap<String, String> =
            serde_json::from_str(json).context("credential table must be a JSON object of strings")?;
        Ok(Self::new(entries))
    }

    /// True iff `username` exists and its password equals `password` exactly.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.passwords
            .get(username)
            .is_some_and(|stored| stored.expose_secret() == password)
    }

    /// Known usernames in insertion order.
    #[must_use]
    pub fn all_usernames(&self) -> Vec<&str> {
        self.usernames.iter().map(String::as_str).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.usernames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.usernames.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn stored_password(&self, username: &str) -> Option<&str> {
        self.passwords
            .get(username)
            .map(|password| password.expose_secret())
    }
}
