//! Minimal HTML pages for the auth flow.
//!
//! The catalog's real templates live elsewhere; these pages only need to
//! carry the navigation links, the forms and the form messages.

use crate::config::{ROUTE_HOME, ROUTE_LOGIN, ROUTE_SIGNUP};

/// Escape text for safe inclusion in HTML element content and attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn nav(current_user: Option<&str>) -> String {
    match current_user {
        Some(username) => format!(
            r#"<nav>
  <a href="{home}">Home</a>
  <span>Logged in as {name}</span>
  <form method="post" action="/logout"><button type="submit">Log Out</button></form>
</nav>"#,
            home = ROUTE_HOME,
            name = escape(username),
        ),
        None => format!(
            r#"<nav>
  <a href="{home}">Home</a>
  <a href="{login}">Log In</a>
  <a href="{signup}">Sign Up</a>
</nav>"#,
            home = ROUTE_HOME,
            login = ROUTE_LOGIN,
            signup = ROUTE_SIGNUP,
        ),
    }
}

fn layout(title: &str, current_user: Option<&str>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{title} | Books</title></head>
<body>
{nav}
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        nav = nav(current_user),
        body = body,
    )
}

fn message(error: Option<&str>) -> String {
    error
        .map(|msg| format!(r#"<p class="error">{}</p>"#, escape(msg)))
        .unwrap_or_default()
}

fn credentials_form(action: &str, submit: &str, username: &str) -> String {
    format!(
        r#"<form method="post" action="{action}">
  <label>Username <input type="text" name="username" value="{username}" required></label>
  <label>Password <input type="password" name="password" required></label>
  <button type="submit">{submit}</button>
</form>"#,
        action = action,
        username = escape(username),
        submit = submit,
    )
}

pub fn home_page(current_user: Option<&str>) -> String {
    let body = match current_user {
        Some(username) => format!(
            r#"<h1>Books</h1>
<p>Welcome back, {}.</p>
<p><a href="/account">Your account</a></p>"#,
            escape(username)
        ),
        None => format!(
            r#"<h1>Books</h1>
<p><a href="{}">Login</a> to manage the catalog.</p>"#,
            ROUTE_LOGIN
        ),
    };
    layout("Home", current_user, &body)
}

pub fn login_page(current_user: Option<&str>, error: Option<&str>, username: &str) -> String {
    let body = format!(
        "<h1>Log In</h1>\n{}\n{}",
        message(error),
        credentials_form(ROUTE_LOGIN, "Log In", username)
    );
    layout("Log In", current_user, &body)
}

pub fn signup_page(current_user: Option<&str>, error: Option<&str>, username: &str) -> String {
    let body = format!(
        "<h1>Sign Up</h1>\n{}\n{}",
        message(error),
        credentials_form(ROUTE_SIGNUP, "Sign Up", username)
    );
    layout("Sign Up", current_user, &body)
}

pub fn account_page(username: &str) -> String {
    let body = format!(
        "<h1>Account</h1>\n<p>Username: {}</p>",
        escape(username)
    );
    layout("Account", Some(username), &body)
}

pub fn error_page(code: &str, msg: &str) -> String {
    let body = format!(
        r#"<h1>Something went wrong</h1>
<p class="error" data-code="{}">{}</p>"#,
        escape(code),
        escape(msg)
    );
    layout("Error", None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
        );
        assert_eq!(escape("omarlopez"), "omarlopez");
    }

    #[test]
    fn test_anonymous_home_offers_login() {
        let page = home_page(None);
        assert!(page.contains("Login"));
        assert!(page.contains("Log In"));
    }

    #[test]
    fn test_authenticated_home_hides_login() {
        let page = home_page(Some("omarlopez"));
        assert!(!page.contains("Login"));
        assert!(!page.contains("Log In"));
        assert!(page.contains("Log Out"));
        assert!(page.contains("omarlopez"));
    }

    #[test]
    fn test_form_message_is_rendered() {
        let page = login_page(None, Some("Username does not exist. Please try again."), "notuser");
        assert!(page.contains("Username does not exist. Please try again."));
        assert!(page.contains(r#"value="notuser""#));
    }

    #[test]
    fn test_username_is_escaped() {
        let page = signup_page(None, None, "<b>");
        assert!(page.contains("&lt;b&gt;"));
        assert!(!page.contains("value=\"<b>\""));
    }
}
