//! Form catalog: creating forms and their questions, and reading them back.
//!
//! Question order is the order of insertion. Rows get ascending ids from the
//! store and every read sorts by id, so a form's questions always come back
//! in the order the admin submitted them.

use crate::domain::models::{Form, FormDetails, NewQuestion, Question};
use crate::error::{Error, Result};
use sqlx::{SqliteConnection, SqlitePool};

/// Creates an empty form. Names are unique across the catalog; a taken name
/// is rejected before anything is written.
pub async fn create_form(pool: &SqlitePool, name: &str, description: &str) -> Result<i64> {
    let mut tx = pool.begin().await?;
    let form_id = insert_form(&mut tx, name, description).await?;
    tx.commit().await?;

    tracing::debug!(form_id, name, "form created");
    Ok(form_id)
}

/// Appends questions to an existing form in the given order, atomically.
pub async fn add_questions(
    pool: &SqlitePool,
    form_id: i64,
    questions: &[NewQuestion],
) -> Result<()> {
    let mut tx = pool.begin().await?;
    ensure_form_exists(&mut tx, form_id).await?;
    insert_questions(&mut tx, form_id, questions).await?;
    tx.commit().await?;

    tracing::debug!(form_id, count = questions.len(), "questions added");
    Ok(())
}

/// The one-shot publish action: form row plus its question batch in a single
/// transaction, so a half-created form is never visible.
pub async fn create_form_with_questions(
    pool: &SqlitePool,
    name: &str,
    description: &str,
    questions: &[NewQuestion],
) -> Result<i64> {
    let mut tx = pool.begin().await?;
    let form_id = insert_form(&mut tx, name, description).await?;
    insert_questions(&mut tx, form_id, questions).await?;
    tx.commit().await?;

    tracing::debug!(form_id, name, count = questions.len(), "form published");
    Ok(form_id)
}

/// A form and its questions in creation order.
pub async fn get_form_details(pool: &SqlitePool, form_id: i64) -> Result<FormDetails> {
    let form: Option<Form> =
        sqlx::query_as("SELECT id, name, description FROM forms WHERE id = ?")
            .bind(form_id)
            .fetch_optional(pool)
            .await?;
    let form = form.ok_or(Error::FormNotFound(form_id))?;

    let questions: Vec<Question> = sqlx::query_as(
        r#"
        SELECT id, form_id, label, type
        FROM questions
        WHERE form_id = ?
        ORDER BY id
        "#,
    )
    .bind(form_id)
    .fetch_all(pool)
    .await?;

    Ok(FormDetails {
        id: form.id,
        name: form.name,
        description: form.description,
        questions,
    })
}

async fn insert_form(conn: &mut SqliteConnection, name: &str, description: &str) -> Result<i64> {
    let taken: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM forms WHERE name = ?)")
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;
    if taken {
        return Err(Error::MalformedInput(format!(
            "form name {name:?} is already in use"
        )));
    }

    let result = sqlx::query("INSERT INTO forms (name, description) VALUES (?, ?)")
        .bind(name)
        .bind(description)
        .execute(&mut *conn)
        .await?;
    Ok(result.last_insert_rowid())
}

async fn insert_questions(
    conn: &mut SqliteConnection,
    form_id: i64,
    questions: &[NewQuestion],
) -> Result<()> {
    for question in questions {
        sqlx::query("INSERT INTO questions (form_id, label, type) VALUES (?, ?, ?)")
            .bind(form_id)
            .bind(&question.label)
            .bind(&question.kind)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

async fn ensure_form_exists(conn: &mut SqliteConnection, form_id: i64) -> Result<()> {
    let known: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM forms WHERE id = ?)")
        .bind(form_id)
        .fetch_one(&mut *conn)
        .await?;
    if known {
        Ok(())
    } else {
        Err(Error::FormNotFound(form_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[tokio::test]
    async fn test_create_form_and_read_details() {
        let pool = db::testing::pool().await;

        let form_id = create_form(&pool, "Onboarding", "first week").await.unwrap();
        add_questions(
            &pool,
            form_id,
            &[
                NewQuestion::new("Name", "text"),
                NewQuestion::new("Age", "number"),
            ],
        )
        .await
        .unwrap();

        let details = get_form_details(&pool, form_id).await.unwrap();
        assert_eq!(details.id, form_id);
        assert_eq!(details.name, "Onboarding");
        assert_eq!(details.description, "first week");
        assert_eq!(details.questions.len(), 2);
        assert_eq!(details.questions[0].label, "Name");
        assert_eq!(details.questions[0].kind, "text");
        assert_eq!(details.questions[1].label, "Age");
        assert_eq!(details.questions[1].form_id, form_id);
    }

    #[tokio::test]
    async fn test_questions_keep_insertion_order() {
        let pool = db::testing::pool().await;
        let form_id = create_form(&pool, "Survey", "ordering").await.unwrap();

        // Labels chosen so alphabetical order would differ.
        add_questions(&pool, form_id, &[NewQuestion::new("Zeta", "text")])
            .await
            .unwrap();
        add_questions(
            &pool,
            form_id,
            &[
                NewQuestion::new("Alpha", "text"),
                NewQuestion::new("Midway", "choice"),
            ],
        )
        .await
        .unwrap();

        let details = get_form_details(&pool, form_id).await.unwrap();
        let labels: Vec<&str> = details.questions.iter().map(|q| q.label.as_str()).collect();
        assert_eq!(labels, ["Zeta", "Alpha", "Midway"]);
    }

    #[tokio::test]
    async fn test_duplicate_form_name_rejected() {
        let pool = db::testing::pool().await;
        create_form(&pool, "Onboarding", "first").await.unwrap();

        let err = create_form(&pool, "Onboarding", "second").await.unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)), "got {err:?}");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM forms")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_publish_rolls_back_on_duplicate_name() {
        let pool = db::testing::pool().await;
        create_form_with_questions(
            &pool,
            "Yearly",
            "original",
            &[NewQuestion::new("Q1", "text"), NewQuestion::new("Q2", "text")],
        )
        .await
        .unwrap();

        let err = create_form_with_questions(
            &pool,
            "Yearly",
            "imposter",
            &[NewQuestion::new("Q3", "text")],
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)), "got {err:?}");

        let questions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(questions, 2);
    }

    #[tokio::test]
    async fn test_unknown_form_is_not_found() {
        let pool = db::testing::pool().await;

        let err = get_form_details(&pool, 404).await.unwrap_err();
        assert!(matches!(err, Error::FormNotFound(404)), "got {err:?}");

        let err = add_questions(&pool, 404, &[NewQuestion::new("Q", "text")])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::FormNotFound(404)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_form_without_questions_reads_back_empty() {
        let pool = db::testing::pool().await;
        let form_id = create_form(&pool, "Placeholder", "no questions yet")
            .await
            .unwrap();

        let details = get_form_details(&pool, form_id).await.unwrap();
        assert!(details.questions.is_empty());
    }
}
