use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account role, decoded from the stored flag: 0 is an employee, any other
/// value counts as an admin.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Employee,
    Admin,
}

impl UserRole {
    pub fn from_flag(flag: i64) -> Self {
        if flag == 0 {
            UserRole::Employee
        } else {
            UserRole::Admin
        }
    }

    pub fn flag(self) -> i64 {
        match self {
            UserRole::Employee => 0,
            UserRole::Admin => 1,
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

/// An account row. `password` and `token` are opaque values compared by
/// equality, stored and exposed as-is; see the `session` module docs.
#[derive(Clone, Debug, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub token: String,
    pub role: UserRole,
}

#[derive(Clone, Debug, Serialize, FromRow)]
pub struct Form {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, Serialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub form_id: i64,
    pub label: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
}

/// Label and kind for a question about to be added, in submission order.
#[derive(Clone, Debug, Deserialize)]
pub struct NewQuestion {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl NewQuestion {
    pub fn new(label: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: kind.into(),
        }
    }
}

/// One question/value pair from a filled-in form.
#[derive(Clone, Debug, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: i64,
    pub value: String,
}

impl SubmittedAnswer {
    pub fn new(question_id: i64, value: impl Into<String>) -> Self {
        Self {
            question_id,
            value: value.into(),
        }
    }
}

/// A form with its full question rows, in creation order.
#[derive(Clone, Debug, Serialize)]
pub struct FormDetails {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub questions: Vec<Question>,
}

/// Question shape embedded in summaries and review sheets.
#[derive(Clone, Debug, Serialize)]
pub struct QuestionEntry {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One form in a per-user listing, questions included.
#[derive(Clone, Debug, Serialize)]
pub struct FormSummary {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub questions: Vec<QuestionEntry>,
}

/// One user's answer sheet for one form: every question of the form, each
/// paired with the recorded value or `None`.
#[derive(Clone, Debug, Serialize)]
pub struct ReviewSheet {
    pub name: String,
    pub description: String,
    pub answers: Vec<ReviewEntry>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReviewEntry {
    pub question: QuestionEntry,
    pub answer: Option<String>,
}

/// A user who completed a given form at least once.
#[derive(Clone, Debug, Serialize, FromRow)]
pub struct Completer {
    pub id: i64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_flag_roundtrip() {
        assert_eq!(UserRole::from_flag(0), UserRole::Employee);
        assert_eq!(UserRole::from_flag(1), UserRole::Admin);
        // Legacy rows are not guaranteed to store exactly 1.
        assert_eq!(UserRole::from_flag(7), UserRole::Admin);
        assert_eq!(UserRole::from_flag(-1), UserRole::Admin);
        assert!(!UserRole::Employee.is_admin());
        assert!(UserRole::Admin.is_admin());
    }

    #[test]
    fn test_question_serializes_kind_as_type() {
        let question = Question {
            id: 3,
            form_id: 1,
            label: "Team".to_string(),
            kind: "text".to_string(),
        };
        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(value["type"], "text");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn test_new_question_deserializes_type_field() {
        let question: NewQuestion =
            serde_json::from_str(r#"{"label":"Age","type":"number"}"#).unwrap();
        assert_eq!(question.label, "Age");
        assert_eq!(question.kind, "number");
    }
}
