//! Client-held session token.
//!
//! The session lives entirely in an HS256-signed token stored in the `session`
//! cookie. Nothing is kept server-side; a token that fails verification (bad
//! signature, malformed, expired) reads as an anonymous session.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{
    SessionConfig, SECONDS_PER_HOUR, SESSION_COOKIE_NAME, SESSION_COOKIE_PATH,
    SESSION_LIFETIME_HOURS,
};
use crate::errors::{AppError, AppResult};

/// Decoded session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated { username: String, user_dn: String },
}

/// Session token payload
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub auth: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dn: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

impl From<SessionClaims> for SessionState {
    fn from(claims: SessionClaims) -> Self {
        match (claims.auth, claims.sub, claims.dn) {
            (true, Some(username), Some(user_dn)) => SessionState::Authenticated { username, user_dn },
            _ => SessionState::Anonymous,
        }
    }
}

/// Issues, reads and clears session tokens.
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    cookie_secure: bool,
}

impl SessionManager {
    pub fn new(config: &SessionConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // The lifetime is absolute; no grace period after expiry
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.key_bytes()),
            decoding_key: DecodingKey::from_secret(config.key_bytes()),
            validation,
            cookie_secure: config.cookie_secure,
        }
    }

    /// Current session state; integrity failures degrade to `Anonymous`.
    pub fn state(&self, jar: &CookieJar) -> SessionState {
        let Some(cookie) = jar.get(SESSION_COOKIE_NAME) else {
            return SessionState::Anonymous;
        };

        match self.decode(cookie.value()) {
            Ok(claims) => claims.into(),
            Err(e) => {
                tracing::debug!("Discarding session cookie: {}", e);
                SessionState::Anonymous
            }
        }
    }

    pub fn is_authenticated(&self, jar: &CookieJar) -> bool {
        matches!(self.state(jar), SessionState::Authenticated { .. })
    }

    /// Username of the session, or an empty string.
    pub fn username(&self, jar: &CookieJar) -> String {
        match self.state(jar) {
            SessionState::Authenticated { username, .. } => username,
            SessionState::Anonymous => String::new(),
        }
    }

    /// Directory DN of the session user, or an empty string.
    pub fn user_dn(&self, jar: &CookieJar) -> String {
        match self.state(jar) {
            SessionState::Authenticated { user_dn, .. } => user_dn,
            SessionState::Anonymous => String::new(),
        }
    }

    /// Mark the session authenticated.
    ///
    /// Only call this with a user returned by a successful credential check.
    /// The returned jar must be part of the response.
    pub fn set_authenticated(
        &self,
        jar: CookieJar,
        username: &str,
        user_dn: &str,
    ) -> AppResult<CookieJar> {
        let token = self.issue(true, Some(username.to_string()), Some(user_dn.to_string()))?;
        Ok(jar.add(self.cookie(token)))
    }

    /// Drop authentication and identity from the session.
    pub fn clear(&self, jar: CookieJar) -> AppResult<CookieJar> {
        let token = self.issue(false, None, None)?;
        Ok(jar.add(self.cookie(token)))
    }

    fn issue(&self, auth: bool, sub: Option<String>, dn: Option<String>) -> AppResult<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            auth,
            sub,
            dn,
            iat: now.timestamp(),
            exp: (now + Duration::hours(SESSION_LIFETIME_HOURS)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("failed to sign session token: {}", e)))
    }

    fn decode(&self, token: &str) -> AppResult<SessionClaims> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::SessionIntegrity(e.to_string()))
    }

    fn cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE_NAME, token))
            .path(SESSION_COOKIE_PATH)
            .max_age(time::Duration::seconds(SESSION_LIFETIME_HOURS * SECONDS_PER_HOUR))
            .http_only(true)
            .secure(self.cookie_secure)
            .same_site(SameSite::Lax)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "test-session-key-with-at-least-32-bytes!!";
    const DN: &str = "CN=Alice,OU=Users,DC=example,DC=com";

    fn manager() -> SessionManager {
        SessionManager::new(&SessionConfig::new(KEY, true))
    }

    fn jar_with(token: &str) -> CookieJar {
        CookieJar::new().add(Cookie::new(SESSION_COOKIE_NAME, token.to_string()))
    }

    #[test]
    fn test_no_cookie_is_anonymous() {
        let sessions = manager();
        let jar = CookieJar::new();

        assert!(!sessions.is_authenticated(&jar));
        assert_eq!(sessions.username(&jar), "");
        assert_eq!(sessions.user_dn(&jar), "");
    }

    #[test]
    fn test_set_authenticated() {
        let sessions = manager();
        let jar = sessions.set_authenticated(CookieJar::new(), "alice", DN).unwrap();

        assert!(sessions.is_authenticated(&jar));
        assert_eq!(sessions.username(&jar), "alice");
        assert_eq!(sessions.user_dn(&jar), DN);
    }

    #[test]
    fn test_clear() {
        let sessions = manager();
        let jar = sessions.set_authenticated(CookieJar::new(), "alice", DN).unwrap();
        let jar = sessions.clear(jar).unwrap();

        assert!(!sessions.is_authenticated(&jar));
        assert_eq!(sessions.username(&jar), "");
        assert_eq!(sessions.user_dn(&jar), "");
        // The cookie is overwritten, not deleted
        assert!(jar.get(SESSION_COOKIE_NAME).is_some());
    }

    #[test]
    fn test_cookie_attributes() {
        let sessions = manager();
        let jar = sessions.set_authenticated(CookieJar::new(), "alice", DN).unwrap();
        let cookie = jar.get(SESSION_COOKIE_NAME).unwrap();

        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(time::Duration::hours(8)));
    }

    #[test]
    fn test_insecure_cookie_flag() {
        let sessions = SessionManager::new(&SessionConfig::new(KEY, false));
        let jar = sessions.set_authenticated(CookieJar::new(), "alice", DN).unwrap();
        assert_eq!(jar.get(SESSION_COOKIE_NAME).unwrap().secure(), Some(false));
    }

    #[test]
    fn test_tampered_token_is_anonymous() {
        let sessions = manager();
        let jar = sessions.set_authenticated(CookieJar::new(), "alice", DN).unwrap();
        let token = jar.get(SESSION_COOKIE_NAME).unwrap().value().to_string();

        // Flip one byte in the middle of the token
        let mut bytes = token.into_bytes();
        let mid = bytes.len() / 2;
        bytes[mid] = if bytes[mid] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(!sessions.is_authenticated(&jar_with(&tampered)));
    }

    #[test]
    fn test_garbage_cookie_is_anonymous() {
        let sessions = manager();
        assert_eq!(sessions.state(&jar_with("not-a-token")), SessionState::Anonymous);
        assert_eq!(sessions.state(&jar_with("")), SessionState::Anonymous);
    }

    #[test]
    fn test_token_from_other_key_is_anonymous() {
        let other = SessionManager::new(&SessionConfig::new("another-key-of-sufficient-length!!", true));
        let jar = other.set_authenticated(CookieJar::new(), "alice", DN).unwrap();

        assert!(!manager().is_authenticated(&jar));
    }

    #[test]
    fn test_expired_token_is_anonymous() {
        let sessions = manager();
        let issued = Utc::now() - Duration::hours(SESSION_LIFETIME_HOURS + 1);
        let claims = SessionClaims {
            auth: true,
            sub: Some("alice".into()),
            dn: Some(DN.into()),
            iat: issued.timestamp(),
            exp: (issued + Duration::hours(SESSION_LIFETIME_HOURS)).timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &sessions.encoding_key).unwrap();

        assert!(!sessions.is_authenticated(&jar_with(&token)));
    }

    #[test]
    fn test_authenticated_without_identity_is_anonymous() {
        let sessions = manager();
        let claims = SessionClaims {
            auth: true,
            sub: None,
            dn: None,
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &sessions.encoding_key).unwrap();

        assert_eq!(sessions.state(&jar_with(&token)), SessionState::Anonymous);
    }

    #[test]
    fn test_short_key_still_works() {
        let sessions = SessionManager::new(&SessionConfig::new("short", true));
        let jar = sessions.set_authenticated(CookieJar::new(), "alice", DN).unwrap();
        assert!(sessions.is_authenticated(&jar));
    }
}
