use sqlx::FromRow;

/// Visitor message from the contact form.
#[derive(Debug, Clone, FromRow)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub message: String,
}
