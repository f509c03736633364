//! Browser sessions: a signed JWT carrying the visitor's [`Identity`],
//! stored in an HttpOnly cookie.

use std::time::Duration;

use axum::{
    extract::FromRef,
    http::{header, HeaderMap},
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use crate::{
    config::{SessionConfig, MAX_SESSION_TTL_MINUTES},
    state::AppState,
};

pub const COOKIE_NAME: &str = "fitzone_session";

/// Who the current request is acting as. A login replaces whatever
/// identity was there before.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Identity {
    #[default]
    Anonymous,
    Member {
        id: i64,
        name: String,
    },
    Admin,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        matches!(self, Identity::Admin)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub identity: Identity,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
}

#[derive(Clone)]
pub struct SessionKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
    pub cookie_secure: bool,
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        let SessionConfig {
            secret,
            issuer,
            audience,
            ttl_minutes,
            cookie_secure,
        } = state.config.session.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            ttl: session_ttl(ttl_minutes),
            cookie_secure,
        }
    }
}

impl SessionKeys {
    pub fn sign(&self, identity: &Identity) -> Result<String, jsonwebtoken::errors::Error> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            identity: identity.clone(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(identity = ?identity, "session signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }

    /// `Set-Cookie` value establishing a session for `identity`.
    pub fn issue_cookie(&self, identity: &Identity) -> Result<String, jsonwebtoken::errors::Error> {
        let token = self.sign(identity)?;
        Ok(self.cookie(&token, self.ttl.as_secs()))
    }

    /// `Set-Cookie` value that makes the browser drop the session.
    pub fn clear_cookie(&self) -> String {
        self.cookie("", 0)
    }

    fn cookie(&self, value: &str, max_age: u64) -> String {
        let mut cookie =
            format!("{COOKIE_NAME}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}");
        if self.cookie_secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// Decodes the session cookie. Missing or invalid tokens are anonymous.
    pub fn identity_from_headers(&self, headers: &HeaderMap) -> Identity {
        let Some(token) = session_token(headers) else {
            return Identity::Anonymous;
        };
        match self.verify(token) {
            Ok(claims) => claims.identity,
            Err(e) => {
                debug!(error = %e, "ignoring invalid session cookie");
                Identity::Anonymous
            }
        }
    }
}

/// Lifetime for `ttl_minutes`, clamped to `1..=MAX_SESSION_TTL_MINUTES`.
fn session_ttl(ttl_minutes: i64) -> Duration {
    Duration::from_secs(ttl_minutes.clamp(1, MAX_SESSION_TTL_MINUTES) as u64 * 60)
}

fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == COOKIE_NAME && !value.is_empty())
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn make_keys(secret: &str, issuer: &str) -> SessionKeys {
        SessionKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            audience: "test-aud".into(),
            ttl: Duration::from_secs(300),
            cookie_secure: false,
        }
    }

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn sign_and_verify_member() {
        let keys = make_keys("dev-secret", "test-issuer");
        let identity = Identity::Member {
            id: 7,
            name: "Ana".into(),
        };
        let token = keys.sign(&identity).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.identity, identity);
        assert_eq!(claims.iss, "test-issuer");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn verify_rejects_other_secret_or_issuer() {
        let good = make_keys("same-secret", "good-iss");
        let token = good.sign(&Identity::Admin).unwrap();
        assert!(make_keys("other-secret", "good-iss").verify(&token).is_err());
        assert!(make_keys("same-secret", "bad-iss").verify(&token).is_err());
    }

    #[test]
    fn identity_from_cookie_header() {
        let keys = make_keys("dev-secret", "iss");
        let token = keys.sign(&Identity::Admin).unwrap();
        let headers = headers_with_cookie(&format!("theme=dark; {COOKIE_NAME}={token}"));
        assert_eq!(keys.identity_from_headers(&headers), Identity::Admin);
    }

    #[test]
    fn missing_or_forged_cookie_is_anonymous() {
        let keys = make_keys("dev-secret", "iss");
        assert_eq!(keys.identity_from_headers(&HeaderMap::new()), Identity::Anonymous);

        let forged = make_keys("attacker", "iss").sign(&Identity::Admin).unwrap();
        let headers = headers_with_cookie(&format!("{COOKIE_NAME}={forged}"));
        assert_eq!(keys.identity_from_headers(&headers), Identity::Anonymous);

        let headers = headers_with_cookie(&format!("{COOKIE_NAME}="));
        assert_eq!(keys.identity_from_headers(&headers), Identity::Anonymous);
    }

    #[test]
    fn expired_token_is_anonymous() {
        let keys = make_keys("dev-secret", "iss");
        let now = OffsetDateTime::now_utc().unix_timestamp() as usize;
        let claims = Claims {
            identity: Identity::Admin,
            iat: now - 600,
            exp: now - 120,
            iss: "iss".into(),
            aud: "test-aud".into(),
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).unwrap();

        assert!(keys.verify(&token).is_err());
        let headers = headers_with_cookie(&format!("{COOKIE_NAME}={token}"));
        assert_eq!(keys.identity_from_headers(&headers), Identity::Anonymous);
    }

    #[test]
    fn ttl_is_clamped() {
        assert_eq!(session_ttl(0), Duration::from_secs(60));
        assert_eq!(session_ttl(-5), Duration::from_secs(60));
        assert_eq!(
            session_ttl(i64::MAX),
            Duration::from_secs(MAX_SESSION_TTL_MINUTES as u64 * 60)
        );

        let mut keys = make_keys("dev-secret", "iss");
        keys.ttl = session_ttl(i64::MAX);
        let claims = keys.verify(&keys.sign(&Identity::Admin).unwrap()).unwrap();
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn cookie_attributes() {
        let mut keys = make_keys("dev-secret", "iss");
        let issued = keys.issue_cookie(&Identity::Admin).unwrap();
        assert!(issued.starts_with(&format!("{COOKIE_NAME}=")));
        assert!(issued.contains("HttpOnly"));
        assert!(issued.contains("Max-Age=300"));
        assert!(!issued.contains("Secure"));

        keys.cookie_secure = true;
        let cleared = keys.clear_cookie();
        assert_eq!(
            cleared,
            format!("{COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0; Secure")
        );
    }

    #[test]
    fn identity_serializes_with_role_tag() {
        let json = serde_json::to_value(Identity::Member {
            id: 3,
            name: "Bo".into(),
        })
        .unwrap();
        assert_eq!(json["role"], "member");
        assert_eq!(json["id"], 3);
        let json = serde_json::to_value(Identity::Admin).unwrap();
        assert_eq!(json["role"], "admin");
    }
}
