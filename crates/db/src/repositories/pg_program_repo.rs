use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::pg_program::{CreatePgProgram, PgProgram, UpdatePgProgram};

const COLUMNS: &str = "id, name, department, duration, description, requirements, is_open, \
                        display_order, created_at, updated_at";

/// Postgraduate programmes. Closed programmes stay listed with `is_open = false`.
pub struct PgProgramRepo;

impl PgProgramRepo {
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<PgProgram>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pg_programs
             ORDER BY display_order, created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, PgProgram>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PgProgram>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pg_programs WHERE id = $1");
        sqlx::query_as::<_, PgProgram>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreatePgProgram) -> Result<PgProgram, sqlx::Error> {
        let query = format!(
            "INSERT INTO pg_programs
                (name, department, duration, description, requirements, is_open, display_order)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, true), COALESCE($7, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PgProgram>(&query)
            .bind(input.name.trim())
            .bind(&input.department)
            .bind(&input.duration)
            .bind(&input.description)
            .bind(&input.requirements)
            .bind(input.is_open)
            .bind(input.display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePgProgram,
    ) -> Result<Option<PgProgram>, sqlx::Error> {
        let query = format!(
            "UPDATE pg_programs SET
                name = COALESCE($2, name),
                department = COALESCE($3, department),
                duration = COALESCE($4, duration),
                description = COALESCE($5, description),
                requirements = COALESCE($6, requirements),
                is_open = COALESCE($7, is_open),
                display_order = COALESCE($8, display_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PgProgram>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.department)
            .bind(&input.duration)
            .bind(&input.description)
            .bind(&input.requirements)
            .bind(input.is_open)
            .bind(input.display_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pg_programs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
