use sqlx::SqlitePool;

use super::dto::NewMember;
use super::repo_types::{Member, MemberProfile, MemberSummary};

/// Result of an insert into `members`.
#[derive(Debug, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(i64),
    DuplicateEmail,
}

impl Member {
    /// Find a member by (already normalized) email.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> Result<Option<Member>, sqlx::Error> {
        sqlx::query_as::<_, Member>(
            r#"
            SELECT id, name, email, password, plan
            FROM members
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    /// Insert a member. The `UNIQUE` constraint on `email` decides
    /// duplicates.
    pub async fn create(
        db: &SqlitePool,
        member: &NewMember,
        password_hash: &str,
    ) -> Result<CreateOutcome, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO members (name, email, password, plan)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&member.name)
        .bind(&member.email)
        .bind(password_hash)
        .bind(member.plan.as_str())
        .execute(db)
        .await;

        match result {
            Ok(done) => Ok(CreateOutcome::Created(done.last_insert_rowid())),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Ok(CreateOutcome::DuplicateEmail)
            }
            Err(e) => Err(e),
        }
    }

    /// Returns the number of rows removed (0 when `id` is unknown).
    pub async fn delete(db: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
        let done = sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id)
            .execute(db)
            .await?;
        Ok(done.rows_affected())
    }
}

impl MemberSummary {
    pub async fn list_all(db: &SqlitePool) -> Result<Vec<MemberSummary>, sqlx::Error> {
        sqlx::query_as::<_, MemberSummary>(
            r#"SELECT id, name, email, plan FROM members ORDER BY id"#,
        )
        .fetch_all(db)
        .await
    }
}

impl MemberProfile {
    pub async fn find_by_id(db: &SqlitePool, id: i64) -> Result<Option<MemberProfile>, sqlx::Error> {
        sqlx::query_as::<_, MemberProfile>(
            r#"SELECT name, email, plan FROM members WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db, members::repo_types::Plan};

    fn new_member(email: &str) -> NewMember {
        NewMember {
            name: "Ana".into(),
            email: email.into(),
            password: "irrelevant".into(),
            plan: Plan::Standard,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_reported_not_raised() {
        let db = db::in_memory().await;
        let first = Member::create(&db, &new_member("ana@fitzone.io"), "hash").await.unwrap();
        assert!(matches!(first, CreateOutcome::Created(_)));

        let second = Member::create(&db, &new_member("ana@fitzone.io"), "hash").await.unwrap();
        assert_eq!(second, CreateOutcome::DuplicateEmail);
        assert_eq!(MemberSummary::list_all(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn ids_increase_and_profile_loads() {
        let db = db::in_memory().await;
        let CreateOutcome::Created(a) = Member::create(&db, &new_member("a@x.io"), "h").await.unwrap() else {
            panic!("expected insert");
        };
        let CreateOutcome::Created(b) = Member::create(&db, &new_member("b@x.io"), "h").await.unwrap() else {
            panic!("expected insert");
        };
        assert!(b > a);

        let profile = MemberProfile::find_by_id(&db, b).await.unwrap().expect("profile");
        assert_eq!(profile.email, "b@x.io");
        assert_eq!(profile.plan, "standard");

        let found = Member::find_by_email(&db, "a@x.io").await.unwrap().expect("member");
        assert_eq!(found.id, a);
        assert_eq!(found.password, "h");
    }

    #[tokio::test]
    async fn delete_unknown_id_is_noop() {
        let db = db::in_memory().await;
        Member::create(&db, &new_member("a@x.io"), "h").await.unwrap();
        assert_eq!(Member::delete(&db, 999).await.unwrap(), 0);
        assert_eq!(MemberSummary::list_all(&db).await.unwrap().len(), 1);
    }
}
