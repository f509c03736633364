use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::views;

pub type AppResult<T> = Result<T, AppError>;

/// Failures that end a request with the generic error page.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Session error: {0}")]
    Session(#[from] jsonwebtoken::errors::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(err) => error!(error = %err, "database error"),
            AppError::Session(err) => error!(error = %err, "session error"),
            AppError::Internal(err) => error!(error = %err, "internal error"),
        }
        (StatusCode::INTERNAL_SERVER_ERROR, views::error_page()).into_response()
    }
}

/// Problems with submitted form input. `Display` is the message shown to
/// the visitor next to the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in the {0} field")]
    Missing(&'static str),

    #[error("{0} must be a number")]
    NotANumber(&'static str),

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("{0} is out of range, please check weight and height")]
    OutOfRange(&'static str),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Unknown membership plan: {0}")]
    UnknownPlan(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn validation_messages_are_user_facing() {
        assert_eq!(
            ValidationError::NotPositive("Height").to_string(),
            "Height must be greater than zero"
        );
        assert_eq!(
            ValidationError::Missing("email").to_string(),
            "Please fill in the email field"
        );
    }

    #[tokio::test]
    async fn app_error_hides_details_from_client() {
        let res = AppError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("Something went wrong"));
        assert!(!body.contains("RowNotFound"));
    }
}
