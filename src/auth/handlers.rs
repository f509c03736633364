use axum::{
    extract::{FromRef, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AdminLoginForm, LoginForm},
        extractors::CurrentIdentity,
        password::{password_matches, reject_without_account},
        session::{Identity, SessionKeys},
    },
    config::AdminConfig,
    error::AppResult,
    members::repo_types::Member,
    state::AppState,
    validation::normalize_email,
    views::{self, Notice},
};

/// Shown for every failed member login, whatever the cause.
pub const INVALID_MEMBER_LOGIN: &str = "Invalid email or password!";
pub const INVALID_ADMIN_LOGIN: &str = "Invalid Credentials!";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/user_login", get(user_login_page).post(user_login))
        .route("/login", get(admin_login_page).post(admin_login))
        .route("/logout", get(logout))
}

pub async fn user_login_page(CurrentIdentity(identity): CurrentIdentity) -> Response {
    views::user_login(&identity, None).into_response()
}

#[instrument(skip(state, identity, form))]
pub async fn user_login(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let Some(member) = authenticate_member(&state, form).await? else {
        let page = views::user_login(&identity, Some(&Notice::error(INVALID_MEMBER_LOGIN)));
        return Ok((StatusCode::UNAUTHORIZED, page).into_response());
    };

    let keys = SessionKeys::from_ref(&state);
    let cookie = keys.issue_cookie(&Identity::Member {
        id: member.id,
        name: member.name.clone(),
    })?;

    info!(member_id = member.id, email = %member.email, plan = %member.plan, "member logged in");
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/profile")).into_response())
}

/// `None` for blank input, unknown email or a wrong password. Each of
/// those paths runs one argon2 check.
async fn authenticate_member(state: &AppState, form: LoginForm) -> AppResult<Option<Member>> {
    let email = normalize_email(form.email.as_deref().unwrap_or(""));
    let password = form.password.unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        warn!("login with missing fields");
        reject_without_account(&password);
        return Ok(None);
    }

    let Some(member) = Member::find_by_email(&state.db, &email).await? else {
        warn!(email = %email, "login unknown email");
        reject_without_account(&password);
        return Ok(None);
    };

    if password_matches(&password, &member.password) {
        Ok(Some(member))
    } else {
        warn!(email = %email, member_id = member.id, "login invalid password");
        Ok(None)
    }
}

pub async fn admin_login_page(CurrentIdentity(identity): CurrentIdentity) -> Response {
    views::admin_login(&identity, None).into_response()
}

#[instrument(skip(state, identity, form))]
pub async fn admin_login(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Form(form): Form<AdminLoginForm>,
) -> AppResult<Response> {
    if !admin_credentials_match(&state.config.admin, &form) {
        warn!(username = form.username.as_deref().unwrap_or(""), "admin login failed");
        let page = views::admin_login(&identity, Some(&Notice::error(INVALID_ADMIN_LOGIN)));
        return Ok((StatusCode::UNAUTHORIZED, page).into_response());
    }

    let keys = SessionKeys::from_ref(&state);
    let cookie = keys.issue_cookie(&Identity::Admin)?;
    info!("admin logged in");
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/admin")).into_response())
}

fn admin_credentials_match(admin: &AdminConfig, form: &AdminLoginForm) -> bool {
    let password = form.password.as_deref().unwrap_or("");
    let Some(hash) = admin.password_hash.as_deref() else {
        return reject_without_account(password);
    };
    let username = form.username.as_deref().unwrap_or("");
    if username.trim() != admin.username || password.is_empty() {
        return reject_without_account(password);
    }
    password_matches(password, hash)
}

#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let keys = SessionKeys::from_ref(&state);
    ([(header::SET_COOKIE, keys.clear_cookie())], Redirect::to("/"))
}
