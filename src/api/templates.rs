//! HTML fragments for the index and login pages.
//!
//! Presentation only: every interpolated string is escaped here, so callers can pass
//! usernames and messages through untouched.

use html_escape::encode_text;
use std::fmt::Write;

use crate::api::handlers::auth::types::Flash;

fn flash_list(flashes: &[Flash]) -> String {
    if flashes.is_empty() {
        return String::new();
    }

    let mut html = String::from("<ul class=\"flashes\">");
    for flash in flashes {
        let _ = write!(
            html,
            "<li class=\"flash flash-{}\">{}</li>",
            flash.level.as_str(),
            encode_text(&flash.message)
        );
    }
    html.push_str("</ul>");
    html
}

/// Welcome page for an authenticated user.
pub(crate) fn welcome(username: &str, flashes: &[Flash]) -> String {
    format!(
        "{}Welcome {}! <a href=\"/logout\">Logout</a>",
        flash_list(flashes),
        encode_text(username)
    )
}

/// Login form; the form posts `username` and `password` back to `/login`.
pub(crate) fn login_page(flashes: &[Flash]) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Food.com Login</title>
</head>
<body>
<h1>Food.com Login</h1>
{}<form method="POST" action="/login">
<label for="username">Username</label>
<input id="username" name="username" type="text" required>
<label for="password">Password</label>
<input id="password" name="password" type="password" required>
<button type="submit" id="login-button" class="login-button">Login</button>
</form>
</body>
</html>
"#,
        flash_list(flashes)
    )
}
