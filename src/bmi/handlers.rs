use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Form, Router,
};
use tracing::{debug, instrument};

use super::services::{bmi, BmiForm, BmiInput};
use crate::{
    auth::extractors::CurrentIdentity,
    state::AppState,
    views::{self, Notice},
};

pub fn bmi_routes() -> Router<AppState> {
    Router::new().route("/bmi", get(bmi_page).post(calculate))
}

pub async fn bmi_page(CurrentIdentity(identity): CurrentIdentity) -> Response {
    views::bmi(&identity, None, None).into_response()
}

#[instrument(skip_all)]
pub async fn calculate(
    CurrentIdentity(identity): CurrentIdentity,
    Form(form): Form<BmiForm>,
) -> Response {
    match BmiInput::try_from(form).and_then(bmi) {
        Ok(value) => {
            debug!(bmi = value, "bmi calculated");
            views::bmi(&identity, Some(value), None).into_response()
        }
        Err(e) => {
            let page = views::bmi(&identity, None, Some(&Notice::error(e.to_string())));
            (StatusCode::UNPROCESSABLE_ENTITY, page).into_response()
        }
    }
}
