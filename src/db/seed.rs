//! Demo data for local development: a handful of accounts and two forms.
//!
//! Safe to run on every startup. Users upsert by username and forms are only
//! created when the catalog is empty, so an already-provisioned database is
//! left untouched.

use crate::catalog;
use crate::domain::models::{NewQuestion, UserRole};
use anyhow::Result;
use rand::distributions::Alphanumeric;
use rand::Rng;
use sqlx::SqlitePool;

struct SeedUser<'a> {
    username: &'a str,
    password: &'a str,
    role: UserRole,
}

pub async fn seed_all(pool: &SqlitePool) -> Result<()> {
    seed_users(pool).await?;
    seed_forms(pool).await?;
    Ok(())
}

async fn seed_users(pool: &SqlitePool) -> Result<()> {
    let users = vec![
        SeedUser {
            username: "admin",
            password: "admin123",
            role: UserRole::Admin,
        },
        SeedUser {
            username: "alice",
            password: "alice123",
            role: UserRole::Employee,
        },
        SeedUser {
            username: "bob",
            password: "bob123",
            role: UserRole::Employee,
        },
        SeedUser {
            username: "chloe",
            password: "chloe123",
            role: UserRole::Employee,
        },
    ];

    for user in users {
        let token = fresh_token();
        sqlx::query(
            r#"
            INSERT INTO users (username, password, token, is_admin)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(user.username)
        .bind(user.password)
        .bind(&token)
        .bind(user.role.flag())
        .execute(pool)
        .await?;
    }

    Ok(())
}

async fn seed_forms(pool: &SqlitePool) -> Result<()> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM forms")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(());
    }

    catalog::create_form_with_questions(
        pool,
        "Onboarding",
        "First-week questionnaire for new hires",
        &[
            NewQuestion::new("Name", "text"),
            NewQuestion::new("Team", "text"),
            NewQuestion::new("Do you have all the hardware you need?", "choice"),
        ],
    )
    .await?;

    catalog::create_form_with_questions(
        pool,
        "Workstation review",
        "Yearly ergonomics and equipment survey",
        &[
            NewQuestion::new("Desk setup rating", "choice"),
            NewQuestion::new("Anything missing?", "text"),
        ],
    )
    .await?;

    Ok(())
}

/// Opaque bearer credential for a freshly seeded account.
fn fresh_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}
