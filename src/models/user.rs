use chrono::NaiveDate;
use sqlx::FromRow;

/// A questionnaire participant, re-identified by `(name, dob)` on every request.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub dob: NaiveDate,
}
