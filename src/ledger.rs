//! Completion ledger: submission writes and completion membership.
//!
//! A form counts as completed when at least one completion row exists for
//! the (form, user) pair. Nothing deduplicates those rows on write; every
//! read treats them as a set, so submitting twice changes nothing a caller
//! can observe except the raw row count.

use crate::domain::models::{Form, SubmittedAnswer};
use crate::error::{Error, Result};
use sqlx::SqlitePool;
use std::collections::HashSet;

/// Records one filled-in form: every non-blank answer plus one completion
/// row, in a single transaction. On any failure nothing is written.
///
/// A blank value (empty or whitespace-only) marks a question left
/// unanswered. It is skipped, not stored, and the form still counts as
/// completed. An answer naming a question outside the form aborts the whole
/// submission.
pub async fn record_submission(
    pool: &SqlitePool,
    form_id: i64,
    user_id: i64,
    answers: &[SubmittedAnswer],
) -> Result<()> {
    let mut tx = pool.begin().await?;

    let known: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM forms WHERE id = ?)")
        .bind(form_id)
        .fetch_one(&mut *tx)
        .await?;
    if !known {
        return Err(Error::FormNotFound(form_id));
    }

    let mut stored = 0usize;
    for answer in answers {
        if answer.value.trim().is_empty() {
            continue;
        }

        let owner: Option<i64> = sqlx::query_scalar("SELECT form_id FROM questions WHERE id = ?")
            .bind(answer.question_id)
            .fetch_optional(&mut *tx)
            .await?;
        if owner != Some(form_id) {
            // Dropping the open transaction rolls back anything staged so far.
            return Err(Error::MalformedInput(format!(
                "question {} does not belong to form {}",
                answer.question_id, form_id
            )));
        }

        sqlx::query("INSERT INTO answers (question_id, user_id, value) VALUES (?, ?, ?)")
            .bind(answer.question_id)
            .bind(user_id)
            .bind(&answer.value)
            .execute(&mut *tx)
            .await?;
        stored += 1;
    }

    sqlx::query("INSERT INTO completed_forms (form_id, user_id) VALUES (?, ?)")
        .bind(form_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::debug!(
        form_id,
        user_id,
        stored,
        skipped = answers.len() - stored,
        "submission recorded"
    );
    Ok(())
}

/// Ids of every form the user has completed at least once.
pub async fn list_completed_form_ids(pool: &SqlitePool, user_id: i64) -> Result<HashSet<i64>> {
    let ids: Vec<i64> =
        sqlx::query_scalar("SELECT DISTINCT form_id FROM completed_forms WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(pool)
            .await?;
    Ok(ids.into_iter().collect())
}

/// Forms the user has completed, in creation order.
pub async fn list_completed_forms(pool: &SqlitePool, user_id: i64) -> Result<Vec<Form>> {
    let forms = sqlx::query_as::<_, Form>(
        r#"
        SELECT id, name, description
        FROM forms
        WHERE id IN (SELECT form_id FROM completed_forms WHERE user_id = ?)
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(forms)
}

/// Forms the user has never completed, in creation order.
pub async fn list_uncompleted_forms(pool: &SqlitePool, user_id: i64) -> Result<Vec<Form>> {
    let forms = sqlx::query_as::<_, Form>(
        r#"
        SELECT id, name, description
        FROM forms
        WHERE id NOT IN (SELECT form_id FROM completed_forms WHERE user_id = ?)
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(forms)
}
