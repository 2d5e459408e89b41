//! Storage access for users and their questionnaire responses.
//!
//! `Store` owns the pool for the life of the process: opened in `main`,
//! handed to handlers through `AppState`, closed after shutdown.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::db::pool;
use crate::models::response::{NewResponse, Response, ResponseWithDob};
use crate::models::user::User;

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Connects and creates the tables if they do not exist yet.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = pool::create_pool(database_url, max_connections).await?;
        Self::from_pool(pool).await
    }

    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = pool::create_memory_pool().await?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database schema ready");
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
    }

    /// First user (lowest id) registered under this name and birth date.
    pub async fn find_user(&self, name: &str, dob: NaiveDate) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, dob FROM users WHERE name = ? AND dob = ? ORDER BY id LIMIT 1",
        )
        .bind(name)
        .bind(dob)
        .fetch_optional(&self.pool)
        .await
    }

    /// Looks the user up and inserts one on a miss.
    ///
    /// The lookup and insert are separate statements with no unique
    /// constraint behind them; two concurrent first submissions for the
    /// same pair can both insert.
    pub async fn find_or_create_user(&self, name: &str, dob: NaiveDate) -> Result<i64, sqlx::Error> {
        if let Some(user) = self.find_user(name, dob).await? {
            return Ok(user.id);
        }

        let result = sqlx::query("INSERT INTO users (name, dob) VALUES (?, ?)")
            .bind(name)
            .bind(dob)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        tracing::debug!(user_id = id, "Created user");
        Ok(id)
    }

    pub async fn insert_response(
        &self,
        user_id: i64,
        date: NaiveDate,
        metrics: &NewResponse,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO responses (user_id, date, happiness, energy, hopefulness, sleep_hours)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(metrics.happiness)
        .bind(metrics.energy)
        .bind(metrics.hopefulness)
        .bind(metrics.sleep_hours)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn responses_for_user(&self, user_id: i64) -> Result<Vec<Response>, sqlx::Error> {
        sqlx::query_as::<_, Response>("SELECT * FROM responses WHERE user_id = ? ORDER BY id")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Every stored response alongside its owner's birth date.
    pub async fn responses_with_dob(&self) -> Result<Vec<ResponseWithDob>, sqlx::Error> {
        sqlx::query_as::<_, ResponseWithDob>(
            r#"
            SELECT users.dob, responses.* FROM responses
            JOIN users ON responses.user_id = users.id
            ORDER BY responses.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dob() -> NaiveDate {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
    }

    fn metrics(happiness: i64) -> NewResponse {
        NewResponse {
            happiness,
            energy: 3,
            hopefulness: 3,
            sleep_hours: 8.0,
        }
    }

    #[tokio::test]
    async fn test_find_or_create_reuses_existing_user() {
        let store = Store::in_memory().await.unwrap();
        let first = store.find_or_create_user("Alice", dob()).await.unwrap();
        let second = store.find_or_create_user("Alice", dob()).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_same_name_different_dob_is_a_different_user() {
        let store = Store::in_memory().await.unwrap();
        let a = store.find_or_create_user("Alice", dob()).await.unwrap();
        let b = store
            .find_or_create_user("Alice", NaiveDate::from_ymd_opt(1990, 5, 5).unwrap())
            .await
            .unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_find_user_misses_unknown_pair() {
        let store = Store::in_memory().await.unwrap();
        assert!(store.find_user("Nobody", dob()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_responses_round_trip_through_storage() {
        let store = Store::in_memory().await.unwrap();
        let user_id = store.find_or_create_user("Alice", dob()).await.unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        store.insert_response(user_id, today, &metrics(2)).await.unwrap();
        store.insert_response(user_id, today, &metrics(4)).await.unwrap();

        let rows = store.responses_for_user(user_id).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].happiness, 2);
        assert_eq!(rows[1].date, today);

        let joined = store.responses_with_dob().await.unwrap();
        assert_eq!(joined.len(), 2);
        assert!(joined.iter().all(|r| r.dob == dob() && r.response.user_id == user_id));
    }

    #[tokio::test]
    async fn test_ping() {
        let store = Store::in_memory().await.unwrap();
        assert!(store.ping().await.is_ok());
    }
}
