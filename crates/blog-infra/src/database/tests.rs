use std::collections::BTreeMap;
use std::sync::Arc;

use blog_core::domain::{Comment, Post, PostFilter, PostQuery, PostStatus};
use blog_core::error::RepoError;
use blog_core::ports::{
    BaseRepository, CommentRepository, ContactRepository, PostRepository, Window,
};
use sea_orm::{
    DatabaseBackend, DatabaseConnection, EntityTrait, MockDatabase, MockExecResult, QueryFilter,
    QueryTrait, Value,
};

use crate::database::entity::{comment, contact, post};
use crate::database::postgres_repo::{
    PostgresCommentRepository, PostgresContactRepository, PostgresPostRepository,
    post_condition,
};

fn post_model(slug: &str, status: post::Status) -> post::Model {
    let now = chrono::Utc::now();
    post::Model {
        id: uuid::Uuid::new_v4(),
        author_id: uuid::Uuid::new_v4(),
        title: "Test Post".to_owned(),
        slug: slug.to_owned(),
        body: "Content".to_owned(),
        status,
        tags: "rust,web".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn sql_for(query: &PostQuery) -> String {
    post::Entity::find()
        .filter(post_condition(query))
        .build(DatabaseBackend::Postgres)
        .to_string()
}

/// SQL of every statement the mock connection executed.
fn executed_sql(db: Arc<DatabaseConnection>) -> Vec<String> {
    let db = Arc::try_unwrap(db)
        .ok()
        .expect("repository still holds the connection");
    db.into_transaction_log()
        .iter()
        .flat_map(|txn| txn.statements().iter().map(|stmt| stmt.sql.clone()))
        .collect()
}

#[tokio::test]
async fn test_find_published_post_by_slug() {
    let model = post_model("test-post", post::Status::Published);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model.clone()]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo
        .find_one(&PostQuery::published().with_slug("test-post"))
        .await
        .unwrap();

    let post = result.expect("post should be found");
    assert_eq!(post.id, model.id);
    assert_eq!(post.slug, "test-post");
    assert_eq!(post.status, PostStatus::Published);
}

#[tokio::test]
async fn test_count_published_posts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![BTreeMap::from([(
            "num_items",
            Value::BigInt(Some(12)),
        )])]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert_eq!(repo.count(&PostQuery::published()).await.unwrap(), 12);
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = BaseRepository::<Post, uuid::Uuid>::delete(&repo, uuid::Uuid::new_v4()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_insert_comment_returns_stored_row() {
    let now = chrono::Utc::now();
    let model = comment::Model {
        id: uuid::Uuid::new_v4(),
        post_id: uuid::Uuid::new_v4(),
        name: "Alice".to_owned(),
        email: "alice@example.com".to_owned(),
        body: "Great post".to_owned(),
        created_at: now.into(),
        active: true,
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model.clone()]])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);
    let comment = Comment {
        id: model.id,
        post_id: model.post_id,
        name: model.name.clone(),
        email: model.email.clone(),
        body: model.body.clone(),
        created_at: now,
        active: true,
    };

    let saved = repo.insert(comment).await.unwrap();
    assert_eq!(saved.id, model.id);
    assert!(saved.active);
}

#[tokio::test]
async fn test_visible_comments_query() {
    let now = chrono::Utc::now();
    let post_id = uuid::Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![comment::Model {
            id: uuid::Uuid::new_v4(),
            post_id,
            name: "Bob".to_owned(),
            email: "bob@example.com".to_owned(),
            body: "First!".to_owned(),
            created_at: now.into(),
            active: true,
        }]])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);
    let comments = repo.find_by_post(post_id, true).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].name, "Bob");
}

#[test]
fn test_published_condition_filters_status() {
    let sql = sql_for(&PostQuery::published());
    assert!(sql.contains(r#""posts"."status" = 'published'"#), "{sql}");
}

#[test]
fn test_admin_condition_has_no_status_filter() {
    let sql = sql_for(&PostQuery::any());
    assert!(!sql.contains("= 'published'"), "{sql}");
}

#[test]
fn test_search_condition_is_case_insensitive_or() {
    let query = PostQuery::published().with_filter(&PostFilter::new(Some("Hello"), Some("Go")));
    let sql = sql_for(&query);

    assert!(sql.contains("LOWER(\"title\") LIKE '%hello%'"), "{sql}");
    assert!(sql.contains("LOWER(\"body\") LIKE '%hello%'"), "{sql}");
    assert!(sql.contains(" OR "), "{sql}");
    assert!(sql.contains("LOWER(\"tags\") LIKE '%go%'"), "{sql}");
}

#[test]
fn test_search_escapes_like_metacharacters() {
    let query = PostQuery::published().with_filter(&PostFilter::new(Some("100%_x"), None));
    let stmt = post::Entity::find()
        .filter(post_condition(&query))
        .build(DatabaseBackend::Postgres);

    assert!(stmt.sql.contains(" ESCAPE "), "{}", stmt.sql);
    let values = stmt.values.expect("bound values").0;
    assert!(values.contains(&Value::from(r"%100\%\_x%")), "{values:?}");
}

#[tokio::test]
async fn test_post_page_orders_ties_by_id() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection(),
    );
    let repo = PostgresPostRepository::new(db.clone());

    let window = Window {
        offset: 5,
        limit: 5,
    };
    repo.find(&PostQuery::published(), window).await.unwrap();
    drop(repo);

    let sql = executed_sql(db);
    assert!(
        sql[0].contains(r#"ORDER BY "posts"."created_at" DESC, "posts"."id" ASC"#),
        "{sql:?}"
    );
}

#[tokio::test]
async fn test_comment_and_contact_listings_order_ties_by_id() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<comment::Model>::new()])
            .append_query_results(vec![Vec::<contact::Model>::new()])
            .into_connection(),
    );
    let comments = PostgresCommentRepository::new(db.clone());
    let contacts = PostgresContactRepository::new(db.clone());

    comments.find_by_post(uuid::Uuid::new_v4(), true).await.unwrap();
    contacts.find_recent(10).await.unwrap();
    drop(comments);
    drop(contacts);

    let sql = executed_sql(db);
    assert!(
        sql[0].contains(r#"ORDER BY "comments"."created_at" ASC, "comments"."id" ASC"#),
        "{sql:?}"
    );
    assert!(
        sql[1].contains(r#"ORDER BY "contacts"."created_at" DESC, "contacts"."id" ASC"#),
        "{sql:?}"
    );
}
