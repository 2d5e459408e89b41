//! Terminal client for the questionnaire: asks the questions, posts the
//! answers and prints how today compares with the user's history and
//! their age cohort.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};

use crate::dto::{MessageResponse, ResultsRequest, ResultsResponse, SubmitRequest};
use crate::stats::averages::format_two_places;
use crate::stats::Averages;

pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Summary as received over the wire; labels sort in band order.
pub type SummaryView = BTreeMap<String, Averages>;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn submit(&self, form: &SubmitRequest) -> anyhow::Result<MessageResponse> {
        self.post("/api/submit", form).await
    }

    pub async fn results(&self, name: &str, dob: NaiveDate) -> anyhow::Result<ResultsResponse> {
        let body = ResultsRequest {
            name: name.to_string(),
            dob,
        };
        self.post("/api/results", &body).await
    }

    pub async fn summary(&self) -> anyhow::Result<SummaryView> {
        let response = self
            .http
            .get(format!("{}/api/summary", self.base_url))
            .send()
            .await?;
        decode(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> anyhow::Result<T> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> anyhow::Result<T> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        bail!("server returned {}: {}", status, text);
    }
    Ok(response.json::<T>().await?)
}

/// Asks each question in turn. Empty answers to the rating questions take
/// the form defaults (3 for ratings, 8 hours of sleep).
pub fn prompt_form<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> anyhow::Result<SubmitRequest> {
    let name = ask(input, output, "Enter your full name: ")?;
    if name.is_empty() {
        bail!("name is required");
    }

    let dob_raw = ask(input, output, "Enter your date of birth (YYYY-MM-DD): ")?;
    let dob = NaiveDate::parse_from_str(&dob_raw, "%Y-%m-%d")
        .with_context(|| format!("invalid date of birth: {dob_raw:?}"))?;

    let happiness = ask_or(input, output, "On a scale from 1-5, how happy do you feel? [3] ", 3)?;
    let energy = ask_or(input, output, "On a scale from 1-5, how energetic do you feel? [3] ", 3)?;
    let hopefulness = ask_or(
        input,
        output,
        "On a scale from 1-5, how hopeful do you feel about the future? [3] ",
        3,
    )?;
    let sleep_hours = ask_or(input, output, "How many hours did you sleep last night? [8] ", 8.0)?;

    Ok(SubmitRequest {
        name,
        dob,
        happiness,
        energy,
        hopefulness,
        sleep_hours,
    })
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> anyhow::Result<String> {
    write!(output, "{question}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input closed");
    }
    Ok(line.trim().to_string())
}

fn ask_or<R, W, T>(input: &mut R, output: &mut W, question: &str, default: T) -> anyhow::Result<T>
where
    R: BufRead,
    W: Write,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let answer = ask(input, output, question)?;
    if answer.is_empty() {
        return Ok(default);
    }
    answer
        .parse()
        .with_context(|| format!("could not read {answer:?} as a number"))
}

pub fn render_results(form: &SubmitRequest, results: &ResultsResponse) -> String {
    let user = &results.user_avg;
    let cohort = &results.age_group_avg;
    let rows = [
        (
            "Happiness",
            "your average happiness",
            form.happiness.to_string(),
            user.happiness,
            cohort.happiness,
        ),
        (
            "Energy level",
            "your average energy level",
            form.energy.to_string(),
            user.energy,
            cohort.energy,
        ),
        (
            "Hopefulness",
            "your average hopefulness",
            form.hopefulness.to_string(),
            user.hopefulness,
            cohort.hopefulness,
        ),
        (
            "Hours of sleep",
            "your average sleeping hours",
            form.sleep_hours.to_string(),
            user.sleep_hours,
            cohort.sleep_hours,
        ),
    ];

    let mut out = String::from("Your Results\n");
    for (today_label, average_label, today, own, others) in rows {
        let own = format_two_places(own);
        let _ = writeln!(out, "{today_label} today compared to {average_label}: {today} vs {own}");
        let mut capitalized = average_label.to_string();
        capitalized[..1].make_ascii_uppercase();
        let _ = writeln!(
            out,
            "{capitalized} compared to others of your age: {own} vs {}",
            format_two_places(others)
        );
    }
    out
}

pub fn render_summary(summary: &SummaryView) -> String {
    let mut out = String::from("Summary Per Age Group\n");
    for (group, avg) in summary {
        let _ = writeln!(out, "Age Group: {group}");
        let _ = writeln!(out, "  Average Happiness: {}", format_two_places(avg.happiness));
        let _ = writeln!(out, "  Average Energy: {}", format_two_places(avg.energy));
        let _ = writeln!(out, "  Average Hopefulness: {}", format_two_places(avg.hopefulness));
        let _ = writeln!(out, "  Average Sleeping Hours: {}", format_two_places(avg.sleep_hours));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_prompt(answers: &str) -> anyhow::Result<SubmitRequest> {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        prompt_form(&mut input, &mut output)
    }

    #[test]
    fn test_prompt_reads_every_answer() {
        let form = run_prompt("Alice\n2000-01-01\n4\n3\n5\n7.5\n").unwrap();
        assert_eq!(form.name, "Alice");
        assert_eq!(form.dob, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        assert_eq!((form.happiness, form.energy, form.hopefulness), (4, 3, 5));
        assert_eq!(form.sleep_hours, 7.5);
    }

    #[test]
    fn test_prompt_blank_answers_take_defaults() {
        let form = run_prompt("Bob\n1990-05-05\n\n\n\n\n").unwrap();
        assert_eq!((form.happiness, form.energy, form.hopefulness), (3, 3, 3));
        assert_eq!(form.sleep_hours, 8.0);
    }

    #[test]
    fn test_prompt_rejects_bad_date() {
        assert!(run_prompt("Alice\n01/01/2000\n").is_err());
    }

    #[test]
    fn test_prompt_fails_on_closed_input() {
        assert!(run_prompt("Alice\n").is_err());
    }

    #[test]
    fn test_render_results_compares_today_and_cohort() {
        let form = SubmitRequest {
            name: "Alice".into(),
            dob: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            happiness: 4,
            energy: 3,
            hopefulness: 5,
            sleep_hours: 7.5,
        };
        let results = ResultsResponse {
            user_avg: Averages {
                happiness: 3.5,
                energy: 3.0,
                hopefulness: 5.0,
                sleep_hours: 7.25,
            },
            age_group_avg: Averages {
                happiness: 2.0,
                energy: 2.5,
                hopefulness: 4.0,
                sleep_hours: 6.0,
            },
        };
        let text = render_results(&form, &results);
        assert!(text.contains("Happiness today compared to your average happiness: 4 vs 3.50"));
        assert!(text.contains("Your average happiness compared to others of your age: 3.50 vs 2.00"));
        assert!(text.contains("Hours of sleep today compared to your average sleeping hours: 7.5 vs 7.25"));
        assert!(text.contains("Your average sleeping hours compared to others of your age: 7.25 vs 6.00"));
    }

    #[test]
    fn test_render_summary_lists_bands_in_order() {
        let summary: SummaryView = serde_json::from_str(
            r#"{
                "71+": {"happiness":"2.00","energy":"2.00","hopefulness":"2.00","sleep_hours":"6.00"},
                "22-30": {"happiness":"4.00","energy":"3.00","hopefulness":"5.00","sleep_hours":"7.50"}
            }"#,
        )
        .unwrap();
        let text = render_summary(&summary);
        let young = text.find("Age Group: 22-30").unwrap();
        let old = text.find("Age Group: 71+").unwrap();
        assert!(young < old);
        assert!(text.contains("  Average Sleeping Hours: 7.50"));
    }

    #[test]
    fn test_api_client_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:3001/").unwrap();
        assert_eq!(client.base_url, "http://localhost:3001");
    }
}
