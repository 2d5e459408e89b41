use std::collections::BTreeMap;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};

use crate::dto::{MessageResponse, ResultsRequest, ResultsResponse, SubmitRequest, SummaryResponse};
use crate::error::{AppError, AppResult};
use crate::models::response::{Response, ResponseWithDob};
use crate::stats::{age_on, AgeBand, Averages};
use crate::AppState;

pub async fn submit(
    State(state): State<AppState>,
    Json(body): Json<SubmitRequest>,
) -> AppResult<Json<MessageResponse>> {
    let user_id = state.store.find_or_create_user(&body.name, body.dob).await?;

    let date = Utc::now().date_naive();
    let response_id = state
        .store
        .insert_response(user_id, date, &body.metrics())
        .await?;

    tracing::info!(user_id, response_id, %date, "Response recorded");

    Ok(Json(MessageResponse {
        message: "Response recorded".into(),
    }))
}

pub async fn results(
    State(state): State<AppState>,
    Json(body): Json<ResultsRequest>,
) -> AppResult<Json<ResultsResponse>> {
    let user = state
        .store
        .find_user(&body.name, body.dob)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    let now = Utc::now();
    let age = age_on(user.dob, now);

    let own = state.store.responses_for_user(user.id).await?;
    let user_avg = Averages::from_responses(&own)
        .ok_or(AppError::NotFound("No responses recorded".into()))?;

    let all = state.store.responses_with_dob().await?;
    let cohort = same_age(&all, age, now);
    let age_group_avg = Averages::from_responses(cohort.iter().copied())
        .ok_or(AppError::NotFound("No responses recorded".into()))?;

    tracing::debug!(
        user_id = user.id,
        age,
        own = own.len(),
        cohort = cohort.len(),
        "Computed results"
    );

    Ok(Json(ResultsResponse {
        user_avg,
        age_group_avg,
    }))
}

pub async fn summary(State(state): State<AppState>) -> AppResult<Json<SummaryResponse>> {
    let rows = state.store.responses_with_dob().await?;
    Ok(Json(summarize_by_band(&rows, Utc::now())))
}

/// Responses whose owner is exactly `age` whole years old at `now`.
fn same_age(rows: &[ResponseWithDob], age: i64, now: DateTime<Utc>) -> Vec<&Response> {
    rows.iter()
        .filter(|row| age_on(row.dob, now) == age)
        .map(|row| &row.response)
        .collect()
}

/// Averages per age band, with each row's age taken at `now`. Empty bands are left out.
fn summarize_by_band(rows: &[ResponseWithDob], now: DateTime<Utc>) -> SummaryResponse {
    let mut groups: BTreeMap<AgeBand, Vec<&Response>> = BTreeMap::new();
    for row in rows {
        let band = AgeBand::for_age(age_on(row.dob, now));
        groups.entry(band).or_default().push(&row.response);
    }

    groups
        .into_iter()
        .filter_map(|(band, responses)| {
            Averages::from_responses(responses).map(|avg| (band, avg))
        })
        .collect()
}
