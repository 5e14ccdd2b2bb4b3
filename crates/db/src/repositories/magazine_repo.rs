use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::magazine::{CreateMagazine, Magazine, UpdateMagazine};

const COLUMNS: &str = "id, title, issue_label, description, cover_image_url, pdf_url, \
                        is_published, display_order, created_at, updated_at";

/// E-magazine issues.
pub struct MagazineRepo;

impl MagazineRepo {
    pub async fn list(
        pool: &PgPool,
        published_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Magazine>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM magazines
             WHERE ($1 = false OR is_published = true)
             ORDER BY display_order, created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Magazine>(&query)
            .bind(published_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        published_only: bool,
    ) -> Result<Option<Magazine>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM magazines WHERE id = $1 AND ($2 = false OR is_published = true)"
        );
        sqlx::query_as::<_, Magazine>(&query)
            .bind(id)
            .bind(published_only)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateMagazine) -> Result<Magazine, sqlx::Error> {
        let query = format!(
            "INSERT INTO magazines
                (title, issue_label, description, cover_image_url, pdf_url, is_published, display_order)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, true), COALESCE($7, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Magazine>(&query)
            .bind(input.title.trim())
            .bind(&input.issue_label)
            .bind(&input.description)
            .bind(&input.cover_image_url)
            .bind(&input.pdf_url)
            .bind(input.is_published)
            .bind(input.display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMagazine,
    ) -> Result<Option<Magazine>, sqlx::Error> {
        let query = format!(
            "UPDATE magazines SET
                title = COALESCE($2, title),
                issue_label = COALESCE($3, issue_label),
                description = COALESCE($4, description),
                cover_image_url = COALESCE($5, cover_image_url),
                pdf_url = COALESCE($6, pdf_url),
                is_published = COALESCE($7, is_published),
                display_order = COALESCE($8, display_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Magazine>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.issue_label)
            .bind(&input.description)
            .bind(&input.cover_image_url)
            .bind(&input.pdf_url)
            .bind(input.is_published)
            .bind(input.display_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM magazines WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
