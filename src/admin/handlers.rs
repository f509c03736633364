use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{extractors::AdminSession, session::Identity},
    contacts::repo_types::Contact,
    error::AppResult,
    members::repo_types::{Member, MemberSummary},
    state::AppState,
    views,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(dashboard))
        .route("/delete_contact/:id", get(delete_contact))
        .route("/delete_member/:id", get(delete_member))
}

#[instrument(skip_all)]
pub async fn dashboard(State(state): State<AppState>, _admin: AdminSession) -> AppResult<Response> {
    let contacts = Contact::list_all(&state.db).await?;
    let members = MemberSummary::list_all(&state.db).await?;
    Ok(views::admin_dashboard(&Identity::Admin, &contacts, &members).into_response())
}

#[instrument(skip(state, _admin))]
pub async fn delete_contact(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    let removed = Contact::delete(&state.db, id).await?;
    info!(contact_id = id, removed, "contact deleted");
    Ok(Redirect::to("/admin"))
}

#[instrument(skip(state, _admin))]
pub async fn delete_member(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    let removed = Member::delete(&state.db, id).await?;
    info!(member_id = id, removed, "member deleted");
    Ok(Redirect::to("/admin"))
}
