use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use steaminsight::config::cli::Command;
use steaminsight::config::Config;
use steaminsight::error::{GameError, Result};
use steaminsight::infrastructure::GeminiClient;
use steaminsight::services::dashboard::Dashboard;
use steaminsight::services::insight::InsightService;
use steaminsight::view::render_dashboard;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::new()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .with_writer(std::io::stderr)
        .init();

    let client = GeminiClient::new(
        config.http_client.clone(),
        config.args.api_key.clone(),
        config.args.model.clone(),
        config.args.api_base.clone(),
    );
    let mut dashboard = Dashboard::new(InsightService::new(client));

    let spinner = spinner()?;
    let outcome = match &config.args.command {
        Some(Command::Search { query }) => {
            let query = query.join(" ");
            spinner.set_message(format!("Searching for {query}..."));
            dashboard.search(&query).await
        }
        Some(Command::Trending) | None => {
            spinner.set_message("Loading trending games...");
            dashboard.load_trending().await;
            Ok(())
        }
    };
    spinner.finish_and_clear();
    outcome?;

    dashboard.apply_choices(config.args.select.as_deref(), &config.args.compare);
    let state = dashboard.state();

    match state.visible_batch() {
        Some(batch) if config.args.json && state.error.is_none() => {
            println!("{}", serde_json::to_string_pretty(&batch)?);
        }
        _ => print!("{}", render_dashboard(state)),
    }

    if let Some(message) = &state.error {
        return Err(GameError::Dashboard(message.clone()));
    }

    info!("Dashboard rendered");
    Ok(())
}

fn spinner() -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg} [{elapsed}]")
            .map_err(|e| GameError::Other(e.to_string()))?,
    );
    spinner.enable_steady_tick(Duration::from_millis(120));
    Ok(spinner)
}
