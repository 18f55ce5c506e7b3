use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "partner")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub logo: Option<serde_json::Value>,

    /// Empty when the partner has no site.
    pub website: String,

    #[sea_orm(column_name = "display_order", indexed)]
    pub order: i32,

    #[sea_orm(default_value = true)]
    pub active: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
