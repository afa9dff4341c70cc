//! Read-only access to account rows.
//!
//! Accounts are created by the seed or by operator tooling; nothing in this
//! crate writes them. Lookups are exact equality on the stored value, with no
//! trimming or case folding, and a miss is `Ok(None)` rather than an error
//! since callers treat it as an unauthenticated or unknown party.

use crate::domain::models::{User, UserRole};
use crate::error::Result;
use sqlx::{FromRow, SqlitePool};

#[derive(FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password: String,
    token: String,
    is_admin: i64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            password: row.password,
            token: row.token,
            role: UserRole::from_flag(row.is_admin),
        }
    }
}

/// All accounts in id order, roles decoded from the stored flag.
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, username, password, token, is_admin
        FROM users
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(User::from).collect())
}

/// Exact-match lookup by username, used by login.
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, username, password, token, is_admin
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(User::from))
}

/// Exact-match lookup by session token, used to resolve the caller on every
/// request.
pub async fn find_by_token(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, username, password, token, is_admin
        FROM users
        WHERE token = ?
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(User::from))
}
