use axum::{response::Html, routing::get, Router};

use crate::{auth::extractors::CurrentIdentity, state::AppState, views};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/health", get(|| async { "ok" }))
}

pub async fn home(CurrentIdentity(identity): CurrentIdentity) -> Html<String> {
    views::home(&identity)
}

pub async fn about(CurrentIdentity(identity): CurrentIdentity) -> Html<String> {
    views::about(&identity)
}
