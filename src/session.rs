//! Login and per-request session resolution.
//!
//! Known weakness, kept on purpose for compatibility with the existing user
//! table: passwords are stored and compared as plain values, and the session
//! token is a static per-user credential that never rotates. Fixing either
//! means changing the stored rows and the clients that hold tokens, which is
//! an authentication-protocol migration, not a change this crate can make
//! alone.

use crate::directory;
use crate::domain::models::User;
use crate::error::Result;
use sqlx::SqlitePool;

/// Checks a username/password pair and returns the account's standing
/// session token on success. `None` covers both unknown usernames and wrong
/// passwords; callers present the two identically.
pub async fn login(pool: &SqlitePool, username: &str, password: &str) -> Result<Option<String>> {
    let Some(user) = directory::find_by_username(pool, username).await? else {
        tracing::warn!(username, "login attempt for unknown user");
        return Ok(None);
    };

    if user.password != password {
        tracing::warn!(username, "login attempt with wrong password");
        return Ok(None);
    }

    tracing::debug!(username, user_id = user.id, "login succeeded");
    Ok(Some(user.token))
}

/// Resolves the caller from a bearer token. `None` is an unauthenticated
/// request, not an error.
pub async fn authenticate(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
    directory::find_by_token(pool, token).await
}
