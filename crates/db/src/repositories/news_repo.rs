//! Repository for the `news` table.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::news::{CreateNewsArticle, NewsArticle, UpdateNewsArticle};

const COLUMNS: &str = "id, title, summary, body, cover_image_url, is_published, published_at, \
                        display_order, created_at, updated_at";

pub struct NewsRepo;

impl NewsRepo {
    /// List articles by `display_order`, then newest first.
    ///
    /// With `published_only` drafts are excluded.
    pub async fn list(
        pool: &PgPool,
        published_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<NewsArticle>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM news
             WHERE ($1 = false OR is_published = true)
             ORDER BY display_order, published_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, NewsArticle>(&query)
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
    ) -> Result<Option<NewsArticle>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM news WHERE id = $1 AND ($2 = false OR is_published = true)"
        );
        sqlx::query_as::<_, NewsArticle>(&query)
            .bind(id)
            .bind(published_only)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreateNewsArticle,
    ) -> Result<NewsArticle, sqlx::Error> {
        let query = format!(
            "INSERT INTO news
                (title, summary, body, cover_image_url, is_published, published_at, display_order)
             VALUES ($1, $2, $3, $4, COALESCE($5, true), COALESCE($6, NOW()), COALESCE($7, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NewsArticle>(&query)
            .bind(input.title.trim())
            .bind(&input.summary)
            .bind(&input.body)
            .bind(&input.cover_image_url)
            .bind(input.is_published)
            .bind(input.published_at)
            .bind(input.display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNewsArticle,
    ) -> Result<Option<NewsArticle>, sqlx::Error> {
        let query = format!(
            "UPDATE news SET
                title = COALESCE($2, title),
                summary = COALESCE($3, summary),
                body = COALESCE($4, body),
                cover_image_url = COALESCE($5, cover_image_url),
                is_published = COALESCE($6, is_published),
                published_at = COALESCE($7, published_at),
                display_order = COALESCE($8, display_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NewsArticle>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.summary)
            .bind(&input.body)
            .bind(&input.cover_image_url)
            .bind(input.is_published)
            .bind(input.published_at)
            .bind(input.display_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
