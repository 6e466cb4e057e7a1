//! HTML page templates.

use crate::config::{ROUTE_CHANGE_PASSWORD, ROUTE_DASHBOARD, ROUTE_LOGIN, ROUTE_LOGOUT};

/// Login form
pub fn login_page() -> String {
    layout(
        "Sign in",
        &format!(
            r##"<h1 class="text-xl font-semibold mb-4">Sign in</h1>
<form hx-post="{login}" hx-swap="none" class="space-y-4">
  <label class="block">Username
    <input type="text" name="username" autocomplete="username" required class="border w-full">
  </label>
  <label class="block">Password
    <input type="password" name="password" autocomplete="current-password" required class="border w-full">
  </label>
  <div id="error-message"></div>
  <button type="submit" class="bg-blue-600 text-white px-4 py-2">Sign in</button>
</form>"##,
            login = ROUTE_LOGIN
        ),
    )
}

/// Dashboard greeting the authenticated user
pub fn dashboard_page(username: &str) -> String {
    layout(
        "Dashboard",
        &format!(
            r##"<h1 class="text-xl font-semibold mb-4">Welcome, {username}</h1>
<ul class="space-y-2">
  <li><a href="{change}" class="text-blue-600">Change password</a></li>
  <li><form method="post" action="{logout}"><button type="submit" class="text-blue-600">Sign out</button></form></li>
</ul>"##,
            username = escape_html(username),
            change = ROUTE_CHANGE_PASSWORD,
            logout = ROUTE_LOGOUT
        ),
    )
}

/// Change-password form
pub fn change_password_page(username: &str) -> String {
    layout(
        "Change password",
        &format!(
            r##"<h1 class="text-xl font-semibold mb-4">Change password for {username}</h1>
<form hx-post="{change}" hx-swap="none" class="space-y-4">
  <label class="block">Current password
    <input type="password" name="current_password" autocomplete="current-password" required class="border w-full">
  </label>
  <label class="block">New password
    <input type="password" name="new_password" autocomplete="new-password" required class="border w-full">
  </label>
  <label class="block">Confirm new password
    <input type="password" name="confirm_password" autocomplete="new-password" required class="border w-full">
  </label>
  <div id="error-message"></div>
  <div id="success-message"></div>
  <button type="submit" class="bg-blue-600 text-white px-4 py-2">Change password</button>
</form>
<p class="mt-4"><a href="{dashboard}" class="text-blue-600">Back to dashboard</a></p>"##,
            username = escape_html(username),
            change = ROUTE_CHANGE_PASSWORD,
            dashboard = ROUTE_DASHBOARD
        ),
    )
}

fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <script src="https://unpkg.com/htmx.org@1.9.12"></script>
  <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-50">
  <main class="max-w-md mx-auto mt-16 bg-white p-8 shadow">
{content}
  </main>
</body>
</html>"#,
        title = escape_html(title),
        content = content
    )
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">O'Neil & co</a>"#),
            "&lt;a href=&quot;x&quot;&gt;O&#39;Neil &amp; co&lt;/a&gt;"
        );
        assert_eq!(escape_html("alice"), "alice");
    }

    #[test]
    fn test_dashboard_escapes_username() {
        let page = dashboard_page("<b>mallory</b>");
        assert!(page.contains("&lt;b&gt;mallory&lt;/b&gt;"));
        assert!(!page.contains("<b>mallory</b>"));
    }

    #[test]
    fn test_forms_post_to_routes() {
        assert!(login_page().contains(r#"hx-post="/login""#));
        let page = change_password_page("alice");
        assert!(page.contains(r#"hx-post="/change-password""#));
        assert!(page.contains(r#"name="confirm_password""#));
        assert!(page.contains(r#"id="success-message""#));
    }
}
