pub mod health;
pub mod questionnaire;
