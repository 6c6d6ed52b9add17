//! Static HTML pages served from `/`.

use crate::auth::AuthMode;

const LOGIN_PAGE: &str = include_str!("pages/login.html");
const CONTROL_PAGE: &str = include_str!("pages/control.html");

const LOGOUT_FORM: &str = r#"<form class="logout" method="post" action="/logout"><button type="submit">Sign out</button></form>"#;

#[must_use]
pub fn login_page() -> &'static str {
    LOGIN_PAGE
}

/// Control page for `username`. The sign-out form is only rendered for
/// session deployments; Basic auth has nothing to clear.
#[must_use]
pub fn control_page(username: &str, mode: AuthMode) -> String {
    let logout = match mode {
        AuthMode::Session => LOGOUT_FORM,
        AuthMode::Basic => "",
    };
    CONTROL_PAGE
        .replace("{USERNAME}", &escape_html(username))
        .replace("{LOGOUT}", logout)
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
