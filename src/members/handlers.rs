use axum::{
    extract::{FromRef, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{NewMember, RegisterForm},
    repo::CreateOutcome,
    repo_types::{Member, MemberProfile},
};
use crate::{
    auth::{
        extractors::{CurrentIdentity, MemberSession},
        password::hash_password,
        session::SessionKeys,
    },
    error::AppResult,
    state::AppState,
    views::{self, Notice},
};

pub const REGISTERED: &str = "Registration Successful!";
pub const EMAIL_TAKEN: &str = "Email already registered!";

pub fn membership_routes() -> Router<AppState> {
    Router::new()
        .route("/membership", get(membership_page).post(register))
        .route("/profile", get(profile))
}

pub async fn membership_page(CurrentIdentity(identity): CurrentIdentity) -> Response {
    views::membership(&identity, None).into_response()
}

#[instrument(skip(state, identity, form))]
pub async fn register(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    let member = match NewMember::try_from(form) {
        Ok(m) => m,
        Err(e) => {
            warn!(error = %e, "registration rejected");
            let page = views::membership(&identity, Some(&Notice::error(e.to_string())));
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    let hash = hash_password(&member.password)?;

    match Member::create(&state.db, &member, &hash).await? {
        CreateOutcome::Created(id) => {
            info!(member_id = id, email = %member.email, plan = %member.plan, "member registered");
            Ok(views::membership(&identity, Some(&Notice::success(REGISTERED))).into_response())
        }
        CreateOutcome::DuplicateEmail => {
            warn!(email = %member.email, "email already registered");
            let page = views::membership(&identity, Some(&Notice::error(EMAIL_TAKEN)));
            Ok((StatusCode::CONFLICT, page).into_response())
        }
    }
}

#[instrument(skip(state, identity, session), fields(member_id = session.id))]
pub async fn profile(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    session: MemberSession,
) -> AppResult<Response> {
    match MemberProfile::find_by_id(&state.db, session.id).await? {
        Some(member) => Ok(views::profile(&identity, &member).into_response()),
        None => {
            warn!(name = %session.name, "session refers to a deleted member");
            let keys = SessionKeys::from_ref(&state);
            Ok((
                [(header::SET_COOKIE, keys.clear_cookie())],
                Redirect::to("/user_login"),
            )
                .into_response())
        }
    }
}
