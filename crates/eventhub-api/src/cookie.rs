//! The session cookie carrying the signed token.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use eventhub_core::config::AuthConfig;

/// Builds the session cookie and clears it on logout.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
    max_age: Duration,
    secure: bool,
}

impl SessionCookie {
    /// Read cookie attributes from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let hours = i64::try_from(config.jwt_ttl_hours).unwrap_or(i64::MAX / 3600);
        Self {
            name: config.cookie_name.clone(),
            max_age: Duration::hours(hours),
            secure: config.secure_cookie,
        }
    }

    /// Cookie name the session token travels under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add the cookie carrying `token` for the full token lifetime.
    pub fn issue(&self, jar: CookieJar, token: String) -> CookieJar {
        jar.add(self.build(token))
    }

    /// Expire the session cookie in the browser.
    ///
    /// A jar that never held the cookie gets an explicit removal cookie, so
    /// logout always answers with a `Set-Cookie`.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        let cookie = self.build(String::new());
        if jar.get(&self.name).is_some() {
            return jar.remove(cookie);
        }
        let mut removal = cookie;
        removal.make_removal();
        jar.add(removal)
    }

    fn build(&self, value: String) -> Cookie<'static> {
        Cookie::build((self.name.clone(), value))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(self.max_age)
            .secure(self.secure)
            .build()
    }
}
