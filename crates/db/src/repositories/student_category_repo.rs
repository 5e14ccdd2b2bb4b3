use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::student_category::{
    CreateStudentCategory, StudentCategory, UpdateStudentCategory,
};

const COLUMNS: &str = "id, name, description, created_at, updated_at";

pub struct StudentCategoryRepo;

impl StudentCategoryRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<StudentCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM student_categories ORDER BY name");
        sqlx::query_as::<_, StudentCategory>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<StudentCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM student_categories WHERE id = $1");
        sqlx::query_as::<_, StudentCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreateStudentCategory,
    ) -> Result<StudentCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO student_categories (name, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StudentCategory>(&query)
            .bind(input.name.trim())
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStudentCategory,
    ) -> Result<Option<StudentCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE student_categories SET
                name = COALESCE($2, name),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StudentCategory>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM student_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
