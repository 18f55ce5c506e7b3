use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "annual_report")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    /// Free-form period label, e.g. `2022/2023`.
    pub year: String,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub cover_image: Option<serde_json::Value>,

    /// Link to the hosted flipbook.
    pub flipbook_url: String,

    #[sea_orm(column_name = "display_order", indexed)]
    pub order: i32,

    #[sea_orm(default_value = true)]
    pub active: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
