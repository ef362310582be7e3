use axum::{extract::Extension, http::HeaderMap, response::Response};
use std::sync::Arc;

use super::auth::{
    render_index,
    session::{respond, ClientSession},
    AuthState,
};

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome page for the signed-in user", body = String, content_type = "text/html"),
        (status = 302, description = "No active session, redirect to the login page")
    ),
    tag = "gatekeeper"
)]
pub async fn root(headers: HeaderMap, auth_state: Extension<Arc<AuthState>>) -> Response {
    let mut client = ClientSession::load(&headers, &auth_state);
    let view = render_index(client.session_mut());
    respond(client, &auth_state, view)
}
