//! Repositories for `gallery_videos` and `gallery_pictures`.
//!
//! Every query runs under [`with_retry`]: the gallery tables are the
//! most recently added and the first to be read by the public site, so a
//! relation-not-found or schema-cache miss is retried with backoff before
//! it reaches the caller.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::error::with_retry;
use crate::models::gallery::{
    CreateGalleryPicture, CreateGalleryVideo, GalleryPicture, GalleryVideo, UpdateGalleryPicture,
    UpdateGalleryVideo,
};

const VIDEO_COLUMNS: &str = "id, title, video_url, thumbnail_url, description, is_featured, \
                              display_order, created_at, updated_at";

const PICTURE_COLUMNS: &str =
    "id, title, image_url, caption, is_featured, display_order, created_at, updated_at";

pub struct GalleryVideoRepo;

impl GalleryVideoRepo {
    /// Featured videos first, then by `display_order` and newest.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<GalleryVideo>, sqlx::Error> {
        let query = format!(
            "SELECT {VIDEO_COLUMNS} FROM gallery_videos
             ORDER BY is_featured DESC, display_order, created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        let query = &query;
        with_retry(move || async move {
            sqlx::query_as::<_, GalleryVideo>(query)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await
        })
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GalleryVideo>, sqlx::Error> {
        let query = format!("SELECT {VIDEO_COLUMNS} FROM gallery_videos WHERE id = $1");
        let query = &query;
        with_retry(move || async move {
            sqlx::query_as::<_, GalleryVideo>(query)
                .bind(id)
                .fetch_optional(pool)
                .await
        })
        .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreateGalleryVideo,
    ) -> Result<GalleryVideo, sqlx::Error> {
        let query = format!(
            "INSERT INTO gallery_videos
                (title, video_url, thumbnail_url, description, is_featured, display_order)
             VALUES ($1, $2, $3, $4, COALESCE($5, false), COALESCE($6, 0))
             RETURNING {VIDEO_COLUMNS}"
        );
        let query = &query;
        with_retry(move || async move {
            sqlx::query_as::<_, GalleryVideo>(query)
                .bind(input.title.trim())
                .bind(&input.video_url)
                .bind(&input.thumbnail_url)
                .bind(&input.description)
                .bind(input.is_featured)
                .bind(input.display_order)
                .fetch_one(pool)
                .await
        })
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGalleryVideo,
    ) -> Result<Option<GalleryVideo>, sqlx::Error> {
        let query = format!(
            "UPDATE gallery_videos SET
                title = COALESCE($2, title),
                video_url = COALESCE($3, video_url),
                thumbnail_url = COALESCE($4, thumbnail_url),
                description = COALESCE($5, description),
                is_featured = COALESCE($6, is_featured),
                display_order = COALESCE($7, display_order)
             WHERE id = $1
             RETURNING {VIDEO_COLUMNS}"
        );
        let query = &query;
        with_retry(move || async move {
            sqlx::query_as::<_, GalleryVideo>(query)
                .bind(id)
                .bind(input.title.as_deref().map(str::trim))
                .bind(&input.video_url)
                .bind(&input.thumbnail_url)
                .bind(&input.description)
                .bind(input.is_featured)
                .bind(input.display_order)
                .fetch_optional(pool)
                .await
        })
        .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = with_retry(move || async move {
            sqlx::query("DELETE FROM gallery_videos WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await
        })
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub struct GalleryPictureRepo;

impl GalleryPictureRepo {
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<GalleryPicture>, sqlx::Error> {
        let query = format!(
            "SELECT {PICTURE_COLUMNS} FROM gallery_pictures
             ORDER BY is_featured DESC, display_order, created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        let query = &query;
        with_retry(move || async move {
            sqlx::query_as::<_, GalleryPicture>(query)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await
        })
        .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<GalleryPicture>, sqlx::Error> {
        let query = format!("SELECT {PICTURE_COLUMNS} FROM gallery_pictures WHERE id = $1");
        let query = &query;
        with_retry(move || async move {
            sqlx::query_as::<_, GalleryPicture>(query)
                .bind(id)
                .fetch_optional(pool)
                .await
        })
        .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreateGalleryPicture,
    ) -> Result<GalleryPicture, sqlx::Error> {
        let query = format!(
            "INSERT INTO gallery_pictures (title, image_url, caption, is_featured, display_order)
             VALUES ($1, $2, $3, COALESCE($4, false), COALESCE($5, 0))
             RETURNING {PICTURE_COLUMNS}"
        );
        let query = &query;
        with_retry(move || async move {
            sqlx::query_as::<_, GalleryPicture>(query)
                .bind(input.title.trim())
                .bind(&input.image_url)
                .bind(&input.caption)
                .bind(input.is_featured)
                .bind(input.display_order)
                .fetch_one(pool)
                .await
        })
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGalleryPicture,
    ) -> Result<Option<GalleryPicture>, sqlx::Error> {
        let query = format!(
            "UPDATE gallery_pictures SET
                title = COALESCE($2, title),
                image_url = COALESCE($3, image_url),
                caption = COALESCE($4, caption),
                is_featured = COALESCE($5, is_featured),
                display_order = COALESCE($6, display_order)
             WHERE id = $1
             RETURNING {PICTURE_COLUMNS}"
        );
        let query = &query;
        with_retry(move || async move {
            sqlx::query_as::<_, GalleryPicture>(query)
                .bind(id)
                .bind(input.title.as_deref().map(str::trim))
                .bind(&input.image_url)
                .bind(&input.caption)
                .bind(input.is_featured)
                .bind(input.display_order)
                .fetch_optional(pool)
                .await
        })
        .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = with_retry(move || async move {
            sqlx::query("DELETE FROM gallery_pictures WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await
        })
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
