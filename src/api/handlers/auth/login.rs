use axum::{
    extract::{Extension, Form},
    http::HeaderMap,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{
    session::{respond, ClientSession},
    state::AuthState,
    types::{Flash, LoginForm, LOGIN_SUCCESSFUL},
    views::{render_login_page, ViewResult, INDEX_PATH},
};

#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "Login form", body = String, content_type = "text/html")
    ),
    tag = "auth"
)]
pub async fn login_page(headers: HeaderMap, auth_state: Extension<Arc<AuthState>>) -> Response {
    let mut client = ClientSession::load(&headers, &auth_state);
    let view = render_login_page(client.session_mut(), None);
    respond(client, &auth_state, view)
}

#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Login successful, redirect to the index"),
        (status = 200, description = "Invalid or missing credentials, login form re-rendered", body = String, content_type = "text/html")
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn login(
    headers: HeaderMap,
    auth_state: Extension<Arc<AuthState>>,
    form: Option<Form<LoginForm>>,
) -> Response {
    // An unparseable body is treated like an empty form.
    let form = form.map(|Form(form)| form).unwrap_or_default();

    debug!("form: {:?}", form);

    let mut client = ClientSession::load(&headers, &auth_state);

    match auth_state
        .authenticator()
        .login(client.session_mut(), &form.username, &form.password)
    {
        Ok(()) => {
            client.session_mut().push_flash(Flash::success(LOGIN_SUCCESSFUL));
            client.rotate();
            respond(client, &auth_state, ViewResult::redirect(INDEX_PATH))
        }
        Err(err) => {
            let view = render_login_page(client.session_mut(), Some(&err.to_string()));
            respond(client, &auth_state, view)
        }
    }
}
