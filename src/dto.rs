//! # moodcheck — Request/Response DTOs
//!
//! The JSON shapes shared by the HTTP handlers and the terminal client.
//!
//! Conventions:
//! - `*Request`  → deserialized from the client JSON body
//! - `*Response` → serialized to client JSON
//! - Averages are always rendered as two-decimal strings

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::response::NewResponse;
use crate::stats::{AgeBand, Averages};

// ============================================================================
// Common
// ============================================================================

/// Standard success message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Questionnaire
// ============================================================================

/// POST /submit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub name: String,
    pub dob: NaiveDate,
    pub happiness: i64,
    pub energy: i64,
    pub hopefulness: i64,
    pub sleep_hours: f64,
}

impl SubmitRequest {
    pub fn metrics(&self) -> NewResponse {
        NewResponse {
            happiness: self.happiness,
            energy: self.energy,
            hopefulness: self.hopefulness,
            sleep_hours: self.sleep_hours,
        }
    }
}

/// POST /results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsRequest {
    pub name: String,
    pub dob: NaiveDate,
}

/// The user's own averages next to those of everyone the same age.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsResponse {
    pub user_avg: Averages,
    pub age_group_avg: Averages,
}

/// GET /summary — band label to averages, empty bands omitted.
pub type SummaryResponse = BTreeMap<AgeBand, Averages>;
