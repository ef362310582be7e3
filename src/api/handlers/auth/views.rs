//! Session-gated view selection.

use axum::{
    http::{header::LOCATION, StatusCode},
    response::{Html, IntoResponse, Response},
};

use super::{storage::Session, types::Flash};
use crate::api::templates;

pub const INDEX_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewResult {
    Welcome {
        username: String,
        flashes: Vec<Flash>,
    },
    LoginPage {
        flashes: Vec<Flash>,
    },
    Redirect {
        location: String,
    },
}

impl ViewResult {
    pub fn redirect(location: impl Into<String>) -> Self {
        Self::Redirect {
            location: location.into(),
        }
    }
}

/// Welcome the authenticated user, or send an anonymous client to the login form.
pub fn render_index(session: &mut Session) -> ViewResult {
    match session.current_user().map(ToString::to_string) {
        Some(username) => ViewResult::Welcome {
            username,
            flashes: session.take_flashes(),
        },
        None => ViewResult::redirect(LOGIN_PATH),
    }
}

/// Always the login form; `last_error` is appended after any pending flashes.
pub fn render_login_page(session: &mut Session, last_error: Option<&str>) -> ViewResult {
    let mut flashes = session.take_flashes();
    if let Some(error) = last_error {
        flashes.push(Flash::error(error));
    }
    ViewResult::LoginPage { flashes }
}

impl IntoResponse for ViewResult {
    fn into_response(self) -> Response {
        match self {
            Self::Welcome { username, flashes } => {
                Html(templates::welcome(&username, &flashes)).into_response()
            }
            Self::LoginPage { flashes } => Html(templates::login_page(&flashes)).into_response(),
            Self::Redirect { location } => (StatusCode::FOUND, [(LOCATION, location)]).into_response(),
        }
    }
}
