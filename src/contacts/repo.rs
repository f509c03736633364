use sqlx::SqlitePool;

use super::dto::NewContact;
use super::repo_types::Contact;

impl Contact {
    pub async fn create(db: &SqlitePool, contact: &NewContact) -> Result<i64, sqlx::Error> {
        let done = sqlx::query("INSERT INTO contacts (name, message) VALUES (?, ?)")
            .bind(&contact.name)
            .bind(&contact.message)
            .execute(db)
            .await?;
        Ok(done.last_insert_rowid())
    }

    pub async fn list_all(db: &SqlitePool) -> Result<Vec<Contact>, sqlx::Error> {
        sqlx::query_as::<_, Contact>("SELECT id, name, message FROM contacts ORDER BY id")
            .fetch_all(db)
            .await
    }

    /// Returns the number of rows removed (0 when `id` is unknown).
    pub async fn delete(db: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
        let done = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id)
            .execute(db)
            .await?;
        Ok(done.rows_affected())
    }
}
