//! Gallery video and picture models.

use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `gallery_videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryVideo {
    pub id: DbId,
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub is_featured: bool,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateGalleryVideo {
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub is_featured: Option<bool>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateGalleryVideo {
    pub title: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub is_featured: Option<bool>,
    pub display_order: Option<i32>,
}

/// A row from the `gallery_pictures` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryPicture {
    pub id: DbId,
    pub title: String,
    pub image_url: String,
    pub caption: Option<String>,
    pub is_featured: bool,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateGalleryPicture {
    pub title: String,
    pub image_url: String,
    pub caption: Option<String>,
    pub is_featured: Option<bool>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateGalleryPicture {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub caption: Option<String>,
    pub is_featured: Option<bool>,
    pub display_order: Option<i32>,
}
