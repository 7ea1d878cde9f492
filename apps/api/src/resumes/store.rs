//! Resume persistence. Every read and write except the public lookup is scoped
//! to an owner; a resume owned by someone else behaves as if it did not exist.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::resume::Resume;

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn insert(&self, resume: &Resume) -> Result<(), sqlx::Error>;

    /// The owner's resumes, most recently updated first.
    async fn list_for_owner(&self, user_id: Uuid) -> Result<Vec<Resume>, sqlx::Error>;

    async fn find_owned(&self, user_id: Uuid, id: Uuid) -> Result<Option<Resume>, sqlx::Error>;

    /// Only resumes flagged public are returned.
    async fn find_public(&self, id: Uuid) -> Result<Option<Resume>, sqlx::Error>;

    /// Overwrites the stored document. Returns `false` when no owned row matched.
    async fn replace_owned(&self, resume: &Resume) -> Result<bool, sqlx::Error>;

    /// Returns `false` when no owned row matched.
    async fn delete_owned(&self, user_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error>;
}

/// Row shape of the `resumes` table. The document column holds the full
/// aggregate; the scalar columns are authoritative for identity and access.
#[derive(Debug, FromRow)]
struct ResumeRow {
    id: Uuid,
    user_id: Uuid,
    is_public: bool,
    document: Json<Resume>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ResumeRow> for Resume {
    fn from(row: ResumeRow) -> Self {
        let mut resume = row.document.0;
        resume.id = row.id;
        resume.user_id = row.user_id;
        resume.is_public = row.is_public;
        resume.created_at = row.created_at;
        resume.updated_at = row.updated_at;
        resume
    }
}

#[derive(Clone)]
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn insert(&self, resume: &Resume) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO resumes (id, user_id, is_public, document, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(resume.id)
        .bind(resume.user_id)
        .bind(resume.is_public)
        .bind(Json(resume))
        .bind(resume.created_at)
        .bind(resume.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_for_owner(&self, user_id: Uuid) -> Result<Vec<Resume>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE user_id = $1 ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Resume::from).collect())
    }

    async fn find_owned(&self, user_id: Uuid, id: Uuid) -> Result<Option<Resume>, sqlx::Error> {
        let row = sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Resume::from))
    }

    async fn find_public(&self, id: Uuid) -> Result<Option<Resume>, sqlx::Error> {
        let row = sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE id = $1 AND is_public = TRUE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Resume::from))
    }

    async fn replace_owned(&self, resume: &Resume) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE resumes
            SET is_public = $3, document = $4, updated_at = $5
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(resume.id)
        .bind(resume.user_id)
        .bind(resume.is_public)
        .bind(Json(resume))
        .bind(resume.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_owned(&self, user_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
