use anyhow::bail;
use chrono::Utc;
use entity::{related, slug};
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::active_models::{prelude::*, *};
use entity::prelude::*;

// Upper bound on disambiguation attempts for one base slug.
const MAX_SLUG_ATTEMPTS: usize = 1000;

#[derive(Clone, Debug)]
pub struct PostRepository {
    db: DatabaseConnection,
}

impl PostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// A `From` impl is ruled out by coherence: `PostEntity` is foreign and a
// tuple of local models does not count as a local type.
fn post_entity((post, author): (post::Model, Option<user::Model>)) -> PostEntity {
    PostEntity {
        id: post.id,
        title: post.title,
        slug: post.slug,
        excerpt: post.excerpt,
        content: post.content,
        cover_image: post.cover_image,
        author_id: post.author_id,
        author_name: author.map(|u| u.username).unwrap_or_default(),
        tags: serde_json::from_value(post.tags).unwrap_or_default(),
        published_at: post.published_at.and_utc(),
        updated_at: post.updated_at.and_utc(),
    }
}

impl PostRepository {
    pub async fn find_paginate(
        &self,
        offset: Option<u64>,
        limit: Option<u64>,
    ) -> anyhow::Result<Vec<PostEntity>> {
        let posts = Post::find()
            .find_also_related(User)
            .order_by_desc(post::Column::PublishedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(posts.into_iter().map(post_entity).collect())
    }

    pub async fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<PostEntity>> {
        let post = Post::find()
            .find_also_related(User)
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await?;

        Ok(post.map(post_entity))
    }

    /// Up to `limit` posts related to the target by tag overlap, most recent
    /// first, falling back to plain recency when nothing overlaps. The
    /// target itself is excluded at the query level.
    pub async fn find_related(
        &self,
        target: &PostEntity,
        limit: usize,
    ) -> anyhow::Result<Vec<PostEntity>> {
        let candidates: Vec<PostEntity> = Post::find()
            .find_also_related(User)
            .filter(post::Column::Id.ne(target.id))
            .order_by_desc(post::Column::PublishedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(post_entity)
            .collect();

        Ok(related::select_related(&target.tags, candidates, limit))
    }

    /// Insert a new post. Slug assignment and the row write happen in one
    /// transaction; dropping the transaction on any error path rolls both
    /// back together. A concurrent create can still take the chosen slug
    /// between the availability check and the insert, so a unique-violation
    /// loser retries once against the then-current slug set.
    pub async fn create(&self, new_post: NewPost) -> anyhow::Result<PostEntity> {
        match self.insert_with_free_slug(new_post.clone()).await {
            Err(err) if is_unique_violation(&err) => self.insert_with_free_slug(new_post).await,
            result => result,
        }
    }

    async fn insert_with_free_slug(&self, new_post: NewPost) -> anyhow::Result<PostEntity> {
        let txn = self.db.begin().await?;

        let slug = match new_post.slug {
            Some(slug) if !slug.is_empty() => slug,
            _ => free_slug(&txn, &slug::slugify(&new_post.title)).await?,
        };

        let now = Utc::now().naive_utc();
        let model = post::ActiveModel {
            id: ActiveValue::not_set(),
            title: ActiveValue::set(new_post.title),
            slug: ActiveValue::set(slug),
            excerpt: ActiveValue::set(new_post.excerpt),
            content: ActiveValue::set(new_post.content),
            cover_image: ActiveValue::set(new_post.cover_image),
            author_id: ActiveValue::set(new_post.author_id),
            tags: ActiveValue::set(serde_json::to_value(&new_post.tags)?),
            published_at: ActiveValue::set(now),
            updated_at: ActiveValue::set(now),
        };

        let inserted = Post::insert(model).exec_with_returning(&txn).await?;
        txn.commit().await?;

        let author = User::find_by_id(inserted.author_id).one(&self.db).await?;

        Ok(post_entity((inserted, author)))
    }

    pub async fn count(&self) -> anyhow::Result<u64> {
        let count = Post::find().count(&self.db).await?;

        Ok(count)
    }
}

async fn free_slug<C: ConnectionTrait>(conn: &C, base: &str) -> anyhow::Result<String> {
    for candidate in slug::candidates(base).take(MAX_SLUG_ATTEMPTS) {
        let taken = Post::find()
            .filter(post::Column::Slug.eq(&candidate))
            .count(conn)
            .await?;

        if taken == 0 {
            return Ok(candidate);
        }
    }

    bail!("no free slug within {} attempts of {:?}", MAX_SLUG_ATTEMPTS, base)
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<sea_orm::DbErr>().and_then(|e| e.sql_err()),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_model_tags_round_trip_through_json() {
        // Arrange
        let model = post::Model {
            id: 1,
            title: "Hello".to_string(),
            slug: "hello".to_string(),
            excerpt: "e".to_string(),
            content: "c".to_string(),
            cover_image: None,
            author_id: 7,
            tags: serde_json::json!(["rust", "web"]),
            published_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        };

        // Act
        let entity = post_entity((model, None));

        // Assert
        assert_eq!(entity.tags, vec!["rust".to_string(), "web".to_string()]);
        assert_eq!(entity.author_name, "");
    }

    #[test]
    fn test_malformed_tags_column_degrades_to_empty() {
        let model = post::Model {
            id: 1,
            title: "Hello".to_string(),
            slug: "hello".to_string(),
            excerpt: "e".to_string(),
            content: "c".to_string(),
            cover_image: None,
            author_id: 7,
            tags: serde_json::json!({"not": "a list"}),
            published_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        };

        let entity = post_entity((model, None));

        assert!(entity.tags.is_empty());
    }

    #[test]
    fn test_only_unique_violations_trigger_a_second_insert() {
        let db_err = anyhow::anyhow!(sea_orm::DbErr::Custom("connection reset".to_string()));
        let plain_err = anyhow::anyhow!("no free slug within 1000 attempts");

        assert!(!is_unique_violation(&db_err));
        assert!(!is_unique_violation(&plain_err));
    }
}
