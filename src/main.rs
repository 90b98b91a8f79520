//! Medilens: AI-assisted lab report review
//!
//! Main entry point for the terminal application.

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use medilens::adapters::redact::RedactingMakeWriter;
use medilens::adapters::{DemoGateway, HttpGateway, SeededRiskScorer};
use medilens::application::{HistoryLog, PatientQueue, WorkflowController};
use medilens::config::{Config, GatewayKind};
use medilens::ports::AnalysisGateway;
use medilens::tui::App;

fn main() -> Result<()> {
    let config = Config::from_env();

    // Writing logs to the terminal would corrupt the TUI (alternate screen):
    // interactive sessions log to a file, non-interactive ones to stdout.
    let interactive = std::io::stdout().is_terminal();
    let (writer, _guard) = if config.log_mode.use_file(interactive) {
        if let Some(parent) = config.log_file.parent() {
            // Best-effort: a missing directory surfaces as the open error below.
            let _ = std::fs::create_dir_all(parent);
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(RedactingMakeWriter::new(writer)))
        .init();

    tracing::info!("Starting Medilens...");
    for warning in &config.warnings {
        tracing::warn!("{}", warning);
    }

    let gateway: Arc<dyn AnalysisGateway> = match config.gateway {
        GatewayKind::Http => {
            let http = HttpGateway::new(&config.api_url, config.timeout_secs)?;
            // Startup probe only; the service may come up later.
            match http.health() {
                Ok(()) => tracing::info!("Analysis service reachable at {}", config.api_url),
                Err(e) => tracing::warn!("Analysis service health check failed: {}", e),
            }
            Arc::new(http)
        }
        GatewayKind::Demo => {
            tracing::info!("Using built-in demo analysis (placeholder data)");
            Arc::new(DemoGateway::new())
        }
    };

    let scorer = match config.risk_seed {
        Some(seed) => SeededRiskScorer::from_seed(seed),
        None => SeededRiskScorer::from_entropy(),
    };
    let queue = PatientQueue::seeded(Box::new(scorer), Utc::now());
    let workflow = WorkflowController::new(queue, HistoryLog::seeded());

    let mut app = App::new(workflow, gateway);
    app.run()?;

    tracing::info!("Medilens shutdown complete.");
    Ok(())
}
