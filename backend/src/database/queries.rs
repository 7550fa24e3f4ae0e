//! Database query functions (Data Access Objects).
//!
//! All SQL is centralized here. Functions take the pool, bind typed
//! parameters, and return the row structs from [`super::models`]; no
//! handler or service builds SQL of its own.

use sqlx::PgPool;
use uuid::Uuid;

use super::models::{Article, Category, Comment, Page, User, UserRow};
use crate::auth::models::Role;

fn decode(e: super::models::UnknownRole) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(e))
}

// ─── Users ───

const USER_COLUMNS: &str =
    "id, email, name, password_hash, role, image, phone, reputation, created_at, updated_at";

pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;
    row.map(|r| r.into_user().map_err(decode)).transpose()
}

pub async fn find_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(|r| r.into_user().map_err(decode)).transpose()
}

pub async fn insert_user(
    pool: &PgPool,
    email: &str,
    name: &str,
    password_hash: Option<&str>,
    role: Role,
) -> Result<User, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "INSERT INTO users (id, email, name, password_hash, role, reputation, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, 0, now(), now()) \
         RETURNING {USER_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .bind(role.as_str())
    .fetch_one(pool)
    .await?;
    row.into_user().map_err(decode)
}

pub async fn list_users(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    let rows = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    rows.into_iter()
        .map(|r| r.into_user().map_err(decode))
        .collect()
}

pub async fn update_user_role(
    pool: &PgPool,
    id: Uuid,
    role: Role,
) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "UPDATE users SET role = $2, updated_at = now() WHERE id = $1 RETURNING {USER_COLUMNS}"
    ))
    .bind(id)
    .bind(role.as_str())
    .fetch_optional(pool)
    .await?;
    row.map(|r| r.into_user().map_err(decode)).transpose()
}

pub async fn delete_user(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ─── Articles ───

const ARTICLE_COLUMNS: &str = "id, slug, title, excerpt, body, cover_image, category_id, \
     author_id, published, published_at, created_at, updated_at";

pub async fn list_published_articles(
    pool: &PgPool,
    category_slug: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Article>, sqlx::Error> {
    match category_slug {
        Some(slug) => {
            sqlx::query_as::<_, Article>(&format!(
                "SELECT a.{} FROM articles a \
                 JOIN categories c ON c.id = a.category_id \
                 WHERE a.published AND c.slug = $1 \
                 ORDER BY a.published_at DESC LIMIT $2 OFFSET $3",
                ARTICLE_COLUMNS.replace(", ", ", a.")
            ))
            .bind(slug)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Article>(&format!(
                "SELECT {ARTICLE_COLUMNS} FROM articles WHERE published \
                 ORDER BY published_at DESC LIMIT $1 OFFSET $2"
            ))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
    }
}

/// Editor-facing listing: drafts included.
pub async fn list_all_articles(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<Article>, sqlx::Error> {
    sqlx::query_as::<_, Article>(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY updated_at DESC LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn find_published_article_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<Article>, sqlx::Error> {
    sqlx::query_as::<_, Article>(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles WHERE slug = $1 AND published"
    ))
    .bind(slug)
    .fetch_optional(pool)
    .await
}

pub async fn find_article_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Article>, sqlx::Error> {
    sqlx::query_as::<_, Article>(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_article(
    pool: &PgPool,
    slug: &str,
    title: &str,
    excerpt: Option<&str>,
    body: &str,
    cover_image: Option<&str>,
    category_id: Option<Uuid>,
    author_id: Uuid,
    published: bool,
) -> Result<Article, sqlx::Error> {
    sqlx::query_as::<_, Article>(&format!(
        "INSERT INTO articles \
         (id, slug, title, excerpt, body, cover_image, category_id, author_id, published, \
          published_at, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, \
                 CASE WHEN $9 THEN now() END, now(), now()) \
         RETURNING {ARTICLE_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(slug)
    .bind(title)
    .bind(excerpt)
    .bind(body)
    .bind(cover_image)
    .bind(category_id)
    .bind(author_id)
    .bind(published)
    .fetch_one(pool)
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn update_article(
    pool: &PgPool,
    id: Uuid,
    title: &str,
    excerpt: Option<&str>,
    body: &str,
    cover_image: Option<&str>,
    category_id: Option<Uuid>,
    published: bool,
) -> Result<Option<Article>, sqlx::Error> {
    sqlx::query_as::<_, Article>(&format!(
        "UPDATE articles SET title = $2, excerpt = $3, body = $4, cover_image = $5, \
         category_id = $6, published = $7, \
         published_at = CASE WHEN $7 AND published_at IS NULL THEN now() ELSE published_at END, \
         updated_at = now() \
         WHERE id = $1 RETURNING {ARTICLE_COLUMNS}"
    ))
    .bind(id)
    .bind(title)
    .bind(excerpt)
    .bind(body)
    .bind(cover_image)
    .bind(category_id)
    .bind(published)
    .fetch_optional(pool)
    .await
}

pub async fn delete_article(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM articles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ─── Comments ───

pub async fn list_comments_for_article(
    pool: &PgPool,
    article_id: Uuid,
) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        "SELECT c.id, c.article_id, c.author_id, u.name AS author_name, c.body, c.created_at \
         FROM comments c JOIN users u ON u.id = c.author_id \
         WHERE c.article_id = $1 ORDER BY c.created_at ASC",
    )
    .bind(article_id)
    .fetch_all(pool)
    .await
}

pub async fn insert_comment(
    pool: &PgPool,
    article_id: Uuid,
    author_id: Uuid,
    body: &str,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        "WITH inserted AS ( \
            INSERT INTO comments (id, article_id, author_id, body, created_at) \
            VALUES ($1, $2, $3, $4, now()) \
            RETURNING id, article_id, author_id, body, created_at \
         ) \
         SELECT i.id, i.article_id, i.author_id, u.name AS author_name, i.body, i.created_at \
         FROM inserted i JOIN users u ON u.id = i.author_id",
    )
    .bind(Uuid::new_v4())
    .bind(article_id)
    .bind(author_id)
    .bind(body)
    .fetch_one(pool)
    .await
}

pub async fn find_comment(pool: &PgPool, id: Uuid) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        "SELECT c.id, c.article_id, c.author_id, u.name AS author_name, c.body, c.created_at \
         FROM comments c JOIN users u ON u.id = c.author_id WHERE c.id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_comment(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ─── Categories ───

pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>("SELECT id, slug, name FROM categories ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn insert_category(
    pool: &PgPool,
    slug: &str,
    name: &str,
) -> Result<Category, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        "INSERT INTO categories (id, slug, name) VALUES ($1, $2, $3) RETURNING id, slug, name",
    )
    .bind(Uuid::new_v4())
    .bind(slug)
    .bind(name)
    .fetch_one(pool)
    .await
}

pub async fn update_category(
    pool: &PgPool,
    id: Uuid,
    slug: &str,
    name: &str,
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        "UPDATE categories SET slug = $2, name = $3 WHERE id = $1 RETURNING id, slug, name",
    )
    .bind(id)
    .bind(slug)
    .bind(name)
    .fetch_optional(pool)
    .await
}

pub async fn delete_category(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ─── Pages ───

pub async fn find_page_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Page>, sqlx::Error> {
    sqlx::query_as::<_, Page>(
        "SELECT id, slug, title, body, updated_at FROM pages WHERE slug = $1",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await
}

pub async fn list_pages(pool: &PgPool) -> Result<Vec<Page>, sqlx::Error> {
    sqlx::query_as::<_, Page>("SELECT id, slug, title, body, updated_at FROM pages ORDER BY slug")
        .fetch_all(pool)
        .await
}

pub async fn insert_page(
    pool: &PgPool,
    slug: &str,
    title: &str,
    body: &str,
) -> Result<Page, sqlx::Error> {
    sqlx::query_as::<_, Page>(
        "INSERT INTO pages (id, slug, title, body, updated_at) \
         VALUES ($1, $2, $3, $4, now()) RETURNING id, slug, title, body, updated_at",
    )
    .bind(Uuid::new_v4())
    .bind(slug)
    .bind(title)
    .bind(body)
    .fetch_one(pool)
    .await
}

pub async fn update_page(
    pool: &PgPool,
    id: Uuid,
    title: &str,
    body: &str,
) -> Result<Option<Page>, sqlx::Error> {
    sqlx::query_as::<_, Page>(
        "UPDATE pages SET title = $2, body = $3, updated_at = now() \
         WHERE id = $1 RETURNING id, slug, title, body, updated_at",
    )
    .bind(id)
    .bind(title)
    .bind(body)
    .fetch_optional(pool)
    .await
}

pub async fn delete_page(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM pages WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
