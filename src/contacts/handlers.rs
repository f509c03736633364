use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Form, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{ContactForm, NewContact},
    repo_types::Contact,
};
use crate::{
    auth::extractors::CurrentIdentity,
    error::AppResult,
    state::AppState,
    views::{self, Notice},
};

pub const SENT: &str = "Message Sent Successfully!";

pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/contact", get(contact_page).post(submit))
}

pub async fn contact_page(CurrentIdentity(identity): CurrentIdentity) -> Response {
    views::contact(&identity, None).into_response()
}

#[instrument(skip(state, identity, form))]
pub async fn submit(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Form(form): Form<ContactForm>,
) -> AppResult<Response> {
    let contact = match NewContact::try_from(form) {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "contact rejected");
            let page = views::contact(&identity, Some(&Notice::error(e.to_string())));
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    let id = Contact::create(&state.db, &contact).await?;
    info!(contact_id = id, "contact message stored");
    Ok(views::contact(&identity, Some(&Notice::success(SENT))).into_response())
}
