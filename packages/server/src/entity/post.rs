use common::PostStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,

    /// Assigned once at creation.
    #[sea_orm(unique)]
    pub slug: String,

    #[sea_orm(column_type = "Text")]
    pub excerpt: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    pub category: String,

    /// JSON array of tag strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: serde_json::Value,

    /// `{url, publicId, width, height}` or NULL.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub cover_image: Option<serde_json::Value>,

    #[sea_orm(indexed)]
    pub status: PostStatus,

    /// Set exactly when `status` is published.
    #[sea_orm(indexed)]
    pub published_at: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,

    #[sea_orm(indexed)]
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
