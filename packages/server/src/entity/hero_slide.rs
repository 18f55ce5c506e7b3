use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Homepage carousel slide.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hero_slide")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "JsonBinary")]
    pub image: serde_json::Value,

    #[sea_orm(column_name = "display_order", indexed)]
    pub order: i32,

    #[sea_orm(default_value = true)]
    pub active: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
