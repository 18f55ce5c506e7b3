pub mod auth;
pub mod blog;
pub mod health;
pub mod hero;
pub mod partner;
pub mod post;
pub mod report;
pub mod upload;

use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::error::AppError;

/// Display position for a new showcase record: the number already stored.
pub(crate) async fn next_order<E>(db: &DatabaseConnection) -> Result<i32, AppError>
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    let count = E::find().count(db).await?;
    i32::try_from(count).map_err(|_| AppError::Internal("display order overflow".into()))
}
