//! Cookie-carried sessions and the logout endpoint.

use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    http::{
        header::{InvalidHeaderValue, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::error;

use super::{
    state::{AuthConfig, AuthState},
    storage::Session,
    types::{Flash, LOGGED_OUT},
    utils::{generate_session_token, hash_session_token},
    views::{ViewResult, LOGIN_PATH},
};

pub const SESSION_COOKIE_NAME: &str = "gatekeeper_session";

/// The session of the client behind the current request.
///
/// Loaded from the cookie at the start of a handler and written back with [`respond`].
#[derive(Debug)]
pub(crate) struct ClientSession {
    token: Option<String>,
    session: Session,
    rotate: bool,
}

impl ClientSession {
    /// Resolve the session cookie; missing, unknown, or expired tokens yield an anonymous session.
    pub(crate) fn load(headers: &HeaderMap, auth_state: &AuthState) -> Self {
        let loaded = extract_session_token(headers).and_then(|token| {
            let session = auth_state.sessions().load(&hash_session_token(&token))?;
            Some((token, session))
        });

        match loaded {
            Some((token, session)) => Self {
                token: Some(token),
                session,
                rotate: false,
            },
            None => Self {
                token: None,
                session: Session::default(),
                rotate: false,
            },
        }
    }

    /// Whether the cookie resolved to a stored session.
    pub(crate) fn is_stored(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Issue a fresh token on persist and drop the old record.
    pub(crate) fn rotate(&mut self) {
        self.rotate = true;
    }

    /// Store the session and return the cookie to send, if any.
    ///
    /// A client without a stored session only gets one once there is state to carry.
    pub(crate) fn persist(self, auth_state: &AuthState) -> Result<Option<HeaderValue>> {
        let sessions = auth_state.sessions();
        let token = match self.token {
            Some(token) if !self.rotate => token,
            previous => {
                if let Some(previous) = previous {
                    sessions.remove(&hash_session_token(&previous));
                }
                if self.session.is_empty() {
                    return Ok(None);
                }
                generate_session_token()?
            }
        };

        sessions.save(hash_session_token(&token), self.session);

        let cookie =
            session_cookie(auth_state.config(), &token).context("invalid session cookie")?;
        Ok(Some(cookie))
    }
}

/// Persist the client session and render `view`, attaching `Set-Cookie` when needed.
pub(crate) fn respond(client: ClientSession, auth_state: &AuthState, view: ViewResult) -> Response {
    match client.persist(auth_state) {
        Ok(Some(cookie)) => {
            let mut headers = HeaderMap::new();
            headers.insert(SET_COOKIE, cookie);
            (headers, view).into_response()
        }
        Ok(None) => view.into_response(),
        Err(err) => {
            error!("Failed to persist session: {err:#}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 302, description = "Session cleared, redirect to the login page")
    ),
    tag = "auth"
)]
pub async fn logout(headers: HeaderMap, auth_state: Extension<Arc<AuthState>>) -> Response {
    let mut client = ClientSession::load(&headers, &auth_state);

    // Anonymous clients get the redirect only; no record is created for them.
    if client.is_stored() {
        auth_state.authenticator().logout(client.session_mut());
        client.session_mut().push_flash(Flash::info(LOGGED_OUT));
    }

    respond(client, &auth_state, ViewResult::redirect(LOGIN_PATH))
}

/// Build an `HttpOnly` cookie for the session token.
pub(super) fn session_cookie(
    config: &AuthConfig,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl_seconds = config.session_ttl_seconds();
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    if config.session_cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(value) = header.to_str() else {
            continue;
        };
        for pair in value.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            let (Some(key), Some(val)) = (parts.next(), parts.next()) else {
                continue;
            };
            let val = val.trim();
            if key.trim() == SESSION_COOKIE_NAME && !val.is_empty() {
                return Some(val.to_string());
            }
        }
    }
    None
}
