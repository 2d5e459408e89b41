use std::io;

use moodcheck::client::{self, ApiClient, DEFAULT_API_URL};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "questionnaire=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let base_url = std::env::var("MOODCHECK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
    let api = ApiClient::new(base_url)?;

    println!("Questionnaire");
    let form = client::prompt_form(&mut io::stdin().lock(), &mut io::stdout())?;

    let ack = api.submit(&form).await?;
    tracing::debug!(message = %ack.message, "Submitted");

    let results = api.results(&form.name, form.dob).await?;
    println!();
    print!("{}", client::render_results(&form, &results));

    match api.summary().await {
        Ok(summary) => {
            println!();
            print!("{}", client::render_summary(&summary));
        }
        Err(e) => tracing::warn!(error = %e, "Summary unavailable"),
    }

    Ok(())
}
