//! The refresh-token cookie.
//!
//! The refresh token never appears in a response body. It lives in an
//! `HttpOnly`, `Secure`, `SameSite=None` cookie scoped to `/`.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// Name of the cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "CODELET-JWT-REFRESH-TOKEN";

fn base(value: String) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .build()
}

/// Cookie holding `token`, living as long as the token itself.
pub fn refresh_cookie(token: String, max_age: chrono::Duration) -> Cookie<'static> {
    let mut cookie = base(token);
    cookie.set_max_age(time::Duration::seconds(max_age.num_seconds()));
    cookie
}

/// Empty, already-expired cookie that makes the browser drop the token.
pub fn cleared_refresh_cookie() -> Cookie<'static> {
    let mut cookie = base(String::new());
    cookie.set_max_age(time::Duration::ZERO);
    cookie.set_expires(time::OffsetDateTime::UNIX_EPOCH);
    cookie
}

/// The refresh token sent by the client, if any. Empty values count as absent.
pub fn read_refresh_token(jar: &CookieJar) -> Option<String> {
    jar.get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}
