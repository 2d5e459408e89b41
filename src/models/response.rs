use chrono::NaiveDate;
use sqlx::FromRow;

/// One questionnaire submission. Immutable once stored.
#[derive(Debug, Clone, FromRow)]
pub struct Response {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub happiness: i64,
    pub energy: i64,
    pub hopefulness: i64,
    pub sleep_hours: f64,
}

/// A response joined with its owner's birth date, for age-based grouping.
#[derive(Debug, Clone, FromRow)]
pub struct ResponseWithDob {
    pub dob: NaiveDate,
    #[sqlx(flatten)]
    pub response: Response,
}

/// The metric values of a submission before it is stored.
#[derive(Debug, Clone)]
pub struct NewResponse {
    pub happiness: i64,
    pub energy: i64,
    pub hopefulness: i64,
    pub sleep_hours: f64,
}
