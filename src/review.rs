//! Read-side aggregation: per-user form listings, answer sheets and
//! completer rosters.

use crate::domain::models::{Completer, FormSummary, QuestionEntry, ReviewEntry, ReviewSheet};
use crate::error::{Error, Result};
use sqlx::{FromRow, SqlitePool};

#[derive(FromRow)]
struct SummaryRow {
    id: i64,
    name: String,
    description: String,
    label: String,
    #[sqlx(rename = "type")]
    kind: String,
}

#[derive(FromRow)]
struct SheetRow {
    label: String,
    #[sqlx(rename = "type")]
    kind: String,
    value: Option<String>,
}

/// Completed or pending forms for one user, each with its questions in
/// creation order.
///
/// Membership is a set test against the completion ledger, so duplicate
/// completion rows cannot multiply the output. Forms with no questions drop
/// out of the join and appear in neither listing.
pub async fn forms_for_user(
    pool: &SqlitePool,
    user_id: i64,
    completed: bool,
) -> Result<Vec<FormSummary>> {
    let query = if completed {
        r#"
        SELECT f.id, f.name, f.description, q.label, q.type
        FROM forms f
        JOIN questions q ON q.form_id = f.id
        WHERE f.id IN (SELECT cf.form_id FROM completed_forms cf WHERE cf.user_id = ?)
        ORDER BY f.id, q.id
        "#
    } else {
        r#"
        SELECT f.id, f.name, f.description, q.label, q.type
        FROM forms f
        JOIN questions q ON q.form_id = f.id
        WHERE f.id NOT IN (SELECT cf.form_id FROM completed_forms cf WHERE cf.user_id = ?)
        ORDER BY f.id, q.id
        "#
    };

    let rows = sqlx::query_as::<_, SummaryRow>(query)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    // Rows arrive sorted by form id, one row per question.
    let mut summaries: Vec<FormSummary> = Vec::new();
    for row in rows {
        let entry = QuestionEntry {
            label: row.label,
            kind: row.kind,
        };
        match summaries.last_mut() {
            Some(last) if last.id == row.id => last.questions.push(entry),
            _ => summaries.push(FormSummary {
                id: row.id,
                name: row.name,
                description: row.description,
                questions: vec![entry],
            }),
        }
    }
    Ok(summaries)
}

/// One user's answer sheet for one form: exactly one entry per question of
/// the form, in catalog order, with the recorded value or `None` when the
/// user never answered. Should duplicate answer rows exist for a pair, any
/// one of them is shown.
pub async fn review(pool: &SqlitePool, form_id: i64, user_id: i64) -> Result<ReviewSheet> {
    let form: Option<(String, String)> =
        sqlx::query_as("SELECT name, description FROM forms WHERE id = ?")
            .bind(form_id)
            .fetch_optional(pool)
            .await?;
    let (name, description) = form.ok_or(Error::FormNotFound(form_id))?;

    let rows = sqlx::query_as::<_, SheetRow>(
        r#"
        SELECT q.label, q.type,
               (SELECT a.value FROM answers a
                WHERE a.question_id = q.id AND a.user_id = ?
                LIMIT 1) AS value
        FROM questions q
        WHERE q.form_id = ?
        ORDER BY q.id
        "#,
    )
    .bind(user_id)
    .bind(form_id)
    .fetch_all(pool)
    .await?;

    let answers = rows
        .into_iter()
        .map(|row| ReviewEntry {
            question: QuestionEntry {
                label: row.label,
                kind: row.kind,
            },
            answer: row.value,
        })
        .collect();

    Ok(ReviewSheet {
        name,
        description,
        answers,
    })
}

/// Users who completed the form, each listed once no matter how many
/// completion rows they hold. Unknown forms simply have no completers.
pub async fn completers(pool: &SqlitePool, form_id: i64) -> Result<Vec<Completer>> {
    let users = sqlx::query_as::<_, Completer>(
        r#"
        SELECT DISTINCT u.id, u.username AS name
        FROM users u
        JOIN completed_forms cf ON cf.user_id = u.id
        WHERE cf.form_id = ?
        ORDER BY u.id
        "#,
    )
    .bind(form_id)
    .fetch_all(pool)
    .await?;
    Ok(users)
}
