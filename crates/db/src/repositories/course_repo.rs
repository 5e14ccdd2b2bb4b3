//! Repository for the `courses` table.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{Course, CreateCourse, UpdateCourse};

const COLUMNS: &str = "id, title, description, category, thumbnail_url, is_paid, price_minor, \
                        currency, is_published, instructor_id, created_at, updated_at";

/// Provides CRUD operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course owned by `instructor_id`.
    pub async fn create(
        pool: &PgPool,
        instructor_id: DbId,
        input: &CreateCourse,
    ) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses
                (title, description, category, thumbnail_url, is_paid, price_minor,
                 currency, is_published, instructor_id)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'NGN'), COALESCE($8, true), $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(input.title.trim())
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.thumbnail_url)
            .bind(input.is_paid)
            .bind(input.price_minor)
            .bind(&input.currency)
            .bind(input.is_published)
            .bind(instructor_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List courses, newest first.
    ///
    /// `published_only` hides drafts from the public catalogue; `category`
    /// filters by exact category label.
    pub async fn list(
        pool: &PgPool,
        category: Option<&str>,
        published_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses
             WHERE ($1::TEXT IS NULL OR category = $1)
               AND ($2 = false OR is_published = true)
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(category)
            .bind(published_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Courses with the given ids, in id order.
    pub async fn list_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Course>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Update a course. Only non-`None` fields in `input` are applied.
    ///
    /// Turning a course free clears its price.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                thumbnail_url = COALESCE($5, thumbnail_url),
                is_paid = COALESCE($6, is_paid),
                price_minor = CASE WHEN COALESCE($6, is_paid)
                                   THEN COALESCE($7, price_minor) END,
                currency = COALESCE($8, currency),
                is_published = COALESCE($9, is_published)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.thumbnail_url)
            .bind(input.is_paid)
            .bind(input.price_minor)
            .bind(&input.currency)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
