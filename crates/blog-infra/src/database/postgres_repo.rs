//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use blog_core::domain::{Comment, Contact, Post, PostQuery, User, Visibility};
use blog_core::error::RepoError;
use blog_core::ports::{
    CommentRepository, ContactRepository, PostRepository, UserRepository, Window,
};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::contact::{self, Entity as ContactEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL contact repository.
pub type PostgresContactRepository = PostgresBaseRepository<ContactEntity>;

/// Translate a [`PostQuery`] into a WHERE condition.
///
/// The only place the visibility rule is expressed in SQL.
pub(crate) fn post_condition(query: &PostQuery) -> Condition {
    let mut cond = Condition::all();

    if query.visibility == Visibility::Published {
        cond = cond.add(post::Column::Status.eq(post::Status::Published));
    }
    if let Some(slug) = &query.slug {
        cond = cond.add(post::Column::Slug.eq(slug.as_str()));
    }
    if let Some(search) = &query.search {
        cond = cond.add(
            Condition::any()
                .add(icontains(post::Column::Title, search))
                .add(icontains(post::Column::Body, search)),
        );
    }
    if let Some(tag) = &query.tag {
        cond = cond.add(icontains(post::Column::Tags, tag));
    }

    cond
}

/// `LOWER(col) LIKE '%needle%'` with LIKE metacharacters in the needle escaped.
fn icontains(column: post::Column, needle: &str) -> SimpleExpr {
    let escaped = needle
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(format!("%{escaped}%")).escape('\\'))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find(&self, query: &PostQuery, window: Window) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post_condition(query))
            .order_by_desc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id)
            .offset(window.offset)
            .limit(window.limit)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_one(&self, query: &PostQuery) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post_condition(query))
            .order_by_desc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn count(&self, query: &PostQuery) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(post_condition(query))
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = post.into();
        let model = active_model.update(self.db.as_ref()).await.map_err(map_db_err)?;
        Ok(model.into())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post(
        &self,
        post_id: Uuid,
        active_only: bool,
    ) -> Result<Vec<Comment>, RepoError> {
        let mut select = CommentEntity::find().filter(comment::Column::PostId.eq(post_id));
        if active_only {
            select = select.filter(comment::Column::Active.eq(true));
        }

        let result = select
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_by_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<Comment, RepoError> {
        let model = CommentEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active_model = model.into_active_model();
        active_model.active = Set(active);
        let updated = active_model.update(self.db.as_ref()).await.map_err(map_db_err)?;

        tracing::info!(comment_id = %id, active, "Comment moderation changed");
        Ok(updated.into())
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn find_recent(&self, limit: u64) -> Result<Vec<Contact>, RepoError> {
        let result = ContactEntity::find()
            .order_by_desc(contact::Column::CreatedAt)
            .order_by_asc(contact::Column::Id)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        ContactEntity::find()
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }
}
