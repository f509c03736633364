use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::Redirect,
};
use tracing::debug;

use super::session::{Identity, SessionKeys};

/// The identity carried by the session cookie, `Anonymous` when absent.
pub struct CurrentIdentity(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);
        Ok(CurrentIdentity(keys.identity_from_headers(&parts.headers)))
    }
}

/// A logged-in member. Anyone else is sent to the member login page.
pub struct MemberSession {
    pub id: i64,
    pub name: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for MemberSession
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);
        match keys.identity_from_headers(&parts.headers) {
            Identity::Member { id, name } => Ok(MemberSession { id, name }),
            _ => {
                debug!(uri = %parts.uri, "member session required");
                Err(Redirect::to("/user_login"))
            }
        }
    }
}

/// A logged-in admin. Anyone else is sent to the admin login page.
pub struct AdminSession;

#[async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);
        if keys.identity_from_headers(&parts.headers).is_admin() {
            Ok(AdminSession)
        } else {
            debug!(uri = %parts.uri, "admin session required");
            Err(Redirect::to("/login"))
        }
    }
}
