//! End-to-end tests for the Gatekeeper login flow.
//!
//! The full application router is served on an ephemeral port and driven with a
//! real HTTP client. Redirects are not followed so status codes and `Location`
//! headers can be asserted; the session cookie is forwarded by hand.

use anyhow::{Context, Result};
use gatekeeper::api::{
    self,
    handlers::auth::{AuthConfig, AuthState, CredentialStore, MemorySessionStore},
};
use reqwest::{
    header::{COOKIE, LOCATION, SET_COOKIE},
    redirect::Policy,
    Client, Response, StatusCode,
};
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;

struct TestServer {
    base_url: String,
    client: Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn start() -> Result<Self> {
        let auth_state = Arc::new(AuthState::new(
            AuthConfig::default().with_session_ttl_seconds(300),
            Arc::new(CredentialStore::demo()),
            Arc::new(MemorySessionStore::new(Duration::from_secs(300))),
        ));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind test listener")?;
        let addr = listener.local_addr()?;
        let app = api::app(auth_state);

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app.into_make_service()).await;
        });

        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            base_url: format!("http://{addr}"),
            client,
            handle,
        })
    }

    async fn get(&self, path: &str, cookie: Option<&str>) -> Result<Response> {
        let mut request = self.client.get(format!("{}{path}", self.base_url));
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        Ok(request.send().await?)
    }

    async fn login(&self, body: &str, cookie: Option<&str>) -> Result<Response> {
        let mut request = self
            .client
            .post(format!("{}/login", self.base_url))
            .header("content-type", "application/x-www-form-urlencoded")
            .body(body.to_string());
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        Ok(request.send().await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
}

fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

#[tokio::test]
async fn login_welcome_logout_flow() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server.get("/", None).await?;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), Some("/login"));

    let response = server.login("username=test&password=testpass", None).await?;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), Some("/"));
    let cookie = session_cookie(&response).context("login did not set a session cookie")?;

    let response = server.get("/", Some(&cookie)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await?;
    assert!(body.contains("Welcome test!"));
    assert!(body.contains("href=\"/logout\""));

    let response = server.get("/logout", Some(&cookie)).await?;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), Some("/login"));

    let response = server.get("/", Some(&cookie)).await?;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), Some("/login"));

    let response = server.get("/login", Some(&cookie)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await?.contains("You have been logged out!"));

    Ok(())
}

#[tokio::test]
async fn invalid_and_empty_logins_rerender_login_page() -> Result<()> {
    let server = TestServer::start().await?;

    for body in [
        "username=invalid_user&password=wrong_password",
        "username=ADMIN&password=password123",
        "username=&password=",
        "username=admin&password=",
        "username=&password=password123",
    ] {
        let response = server.login(body, None).await?;
        assert_eq!(response.status(), StatusCode::OK, "body: {body}");
        assert!(response.headers().get(SET_COOKIE).is_none());
        let html = response.text().await?;
        assert!(html.contains("Invalid username or password!"));
        assert!(html.contains("login-button"));
    }

    Ok(())
}

#[tokio::test]
async fn every_demo_user_can_log_in() -> Result<()> {
    let server = TestServer::start().await?;

    for (username, password) in [
        ("admin", "password123"),
        ("user", "userpass"),
        ("test", "testpass"),
    ] {
        let response = server
            .login(&format!("username={username}&password={password}"), None)
            .await?;
        assert_eq!(response.status(), StatusCode::FOUND);
        let cookie = session_cookie(&response).context("missing session cookie")?;

        let response = server.get("/", Some(&cookie)).await?;
        assert!(response
            .text()
            .await?
            .contains(&format!("Welcome {username}!")));
    }

    Ok(())
}

#[tokio::test]
async fn health_endpoint_reports_json() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server.get("/health", None).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-request-id").is_some());
    let body: serde_json::Value = serde_json::from_str(&response.text().await?)?;
    assert_eq!(body.get("users").and_then(serde_json::Value::as_u64), Some(3));

    Ok(())
}
