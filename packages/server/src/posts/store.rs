use async_trait::async_trait;
use common::PostStatus;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use uuid::Uuid;

use super::repository::{PostRepository, RepoError};
use super::types::Post;
use crate::entity::post;

/// [`PostRepository`] over the `post` table.
#[derive(Clone)]
pub struct SeaOrmPostRepository {
    db: DatabaseConnection,
}

impl SeaOrmPostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn published() -> sea_orm::Select<post::Entity> {
        post::Entity::find()
            .filter(post::Column::Status.eq(PostStatus::Published))
            .order_by_desc(post::Column::PublishedAt)
            .order_by_desc(post::Column::CreatedAt)
    }
}

impl TryFrom<post::Model> for Post {
    type Error = serde_json::Error;

    fn try_from(model: post::Model) -> Result<Self, Self::Error> {
        Ok(Post {
            id: model.id,
            title: model.title,
            slug: model.slug,
            excerpt: model.excerpt,
            content: model.content,
            category: model.category,
            tags: serde_json::from_value(model.tags)?,
            cover_image: model.cover_image.map(serde_json::from_value).transpose()?,
            status: model.status,
            published_at: model.published_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

fn to_model(post: &Post) -> Result<post::Model, serde_json::Error> {
    Ok(post::Model {
        id: post.id,
        title: post.title.clone(),
        slug: post.slug.clone(),
        excerpt: post.excerpt.clone(),
        content: post.content.clone(),
        category: post.category.clone(),
        tags: serde_json::to_value(&post.tags)?,
        cover_image: post
            .cover_image
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?,
        status: post.status,
        published_at: post.published_at,
        created_at: post.created_at,
        updated_at: post.updated_at,
    })
}

fn decode_all(models: Vec<post::Model>) -> Result<Vec<Post>, RepoError> {
    models
        .into_iter()
        .map(|m| Post::try_from(m).map_err(RepoError::from))
        .collect()
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError> {
        let count = post::Entity::find()
            .filter(post::Column::Slug.eq(slug))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn insert(&self, post: &Post) -> Result<(), RepoError> {
        let active = to_model(post)?.into_active_model().reset_all();
        match post::Entity::insert(active).exec_without_returning(&self.db).await {
            Ok(_) => Ok(()),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(RepoError::SlugTaken(post.slug.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        post::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Post::try_from)
            .transpose()
            .map_err(RepoError::from)
    }

    async fn update(&self, post: &Post) -> Result<bool, RepoError> {
        let active = to_model(post)?.into_active_model().reset_all();
        match active.update(&self.db).await {
            Ok(_) => Ok(true),
            Err(DbErr::RecordNotUpdated) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let result = post::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn list(&self, status: Option<PostStatus>) -> Result<Vec<Post>, RepoError> {
        let mut select = post::Entity::find();
        if let Some(status) = status {
            select = select.filter(post::Column::Status.eq(status));
        }
        let models = select
            .order_by_desc(post::Column::UpdatedAt)
            .all(&self.db)
            .await?;
        decode_all(models)
    }

    async fn list_published(&self, offset: u64, limit: u64) -> Result<Vec<Post>, RepoError> {
        // Offsets are bound as BIGINT.
        let models = Self::published()
            .offset(Some(offset.min(i64::MAX as u64)))
            .limit(Some(limit))
            .all(&self.db)
            .await?;
        decode_all(models)
    }

    async fn count_published(&self) -> Result<u64, RepoError> {
        Ok(post::Entity::find()
            .filter(post::Column::Status.eq(PostStatus::Published))
            .count(&self.db)
            .await?)
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        post::Entity::find()
            .filter(post::Column::Slug.eq(slug))
            .filter(post::Column::Status.eq(PostStatus::Published))
            .one(&self.db)
            .await?
            .map(Post::try_from)
            .transpose()
            .map_err(RepoError::from)
    }
}
