//! Session cookie handling
//!
//! The session is a signed access token carried either in the session cookie
//! or as a bearer token.

#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: &'static str,
    max_age: i64,
    secure: bool,
}

impl SessionCookie {
    pub fn new(name: &'static str, max_age: i64, secure: bool) -> Self {
        Self { name, max_age, secure }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// `Set-Cookie` value issuing `value`.
    pub fn issue(&self, value: &str) -> String {
        self.render(value, self.max_age)
    }

    /// `Set-Cookie` value expiring the cookie.
    pub fn clear(&self) -> String {
        self.render("", 0)
    }

    fn render(&self, value: &str, max_age: i64) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.name, value, max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// Finds a cookie value in a `Cookie` request header.
pub fn read_cookie<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn read_bearer(authorization: &str) -> Option<&str> {
    authorization
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_clear() {
        let cookie = SessionCookie::new("menu_session", 3600, true);
        assert_eq!(
            cookie.issue("abc"),
            "menu_session=abc; Path=/; HttpOnly; SameSite=Lax; Max-Age=3600; Secure"
        );
        assert!(cookie.clear().starts_with("menu_session=; "));
        assert!(cookie.clear().contains("Max-Age=0"));
    }

    #[test]
    fn test_read_cookie() {
        let header = "theme=dark; menu_session=tok.en.value; other=1";
        assert_eq!(read_cookie(header, "menu_session"), Some("tok.en.value"));
        assert_eq!(read_cookie(header, "missing"), None);
        assert_eq!(read_cookie("menu_session=", "menu_session"), None);
    }

    #[test]
    fn test_read_bearer() {
        assert_eq!(read_bearer("Bearer abc"), Some("abc"));
        assert_eq!(read_bearer("Basic abc"), None);
        assert_eq!(read_bearer("Bearer "), None);
    }
}
