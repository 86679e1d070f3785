mod input;
mod terminal;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use prometheus::{Encoder, Registry, TextEncoder};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use autocomplete_core::{
    load_config, metrics, Autocomplete, AutocompleteError, AutocompleteOptions, ElementRegistry,
    Host, LifecycleState, WidgetEvent,
};

use input::LineInput;
use terminal::{mark_highlights, TerminalRenderer};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Logs go to stderr; stdout carries results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = std::env::var("AUTOCOMPLETE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("autocomplete.toml"));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    let mut options = AutocompleteOptions::new(config.clone());
    if let Ok(data_path) = std::env::var("AUTOCOMPLETE_DATA") {
        let values = load_dataset(&data_path).await?;
        info!(items = values.len(), "Dataset loaded from {}", data_path);
        options = options.with_data(values);
    }

    let registry = ElementRegistry::new();
    let input = Arc::new(LineInput::new("stdin"));
    let renderer = Arc::new(TerminalRenderer::stdout());
    let host = Host::new(Arc::new(registry.clone())).with_renderer(renderer.clone());

    let options = options
        .on_feedback(|results| match serde_json::to_string(results) {
            Ok(line) => println!("{}", line),
            Err(e) => warn!("Failed to encode results: {}", e),
        })
        .on_no_results(|ctx| println!("dataset is empty (query '{}')", ctx.query_value))
        .on_selection(|selection| {
            println!("selected: {}", mark_highlights(&selection.result));
        })
        .on_error(|e: &AutocompleteError| {
            if e.is_terminal() {
                error!("Autocomplete failed: {}", e);
            } else {
                warn!("Query failed: {}", e);
            }
        });

    let widget = Autocomplete::new(options, host).context("Invalid autocomplete options")?;
    let mut events = widget.subscribe();
    tokio::spawn(async move {
        while let Ok(envelope) = events.recv().await {
            match envelope.event {
                WidgetEvent::Connected { selector, .. } => {
                    debug!(instance = %envelope.instance_id, "Connected to {}", selector);
                }
                WidgetEvent::QueryAnalyzed {
                    query_value,
                    results,
                    ..
                } => {
                    debug!(
                        instance = %envelope.instance_id,
                        query = %query_value,
                        matches = results.match_count,
                        "Query analyzed"
                    );
                }
            }
        }
    });

    widget.start();
    registry.insert(config.selector.clone(), input.clone());
    match widget.ready().await {
        LifecycleState::Ready(mode) => {
            info!(mode = mode.as_str(), "Type a query per line, :N to pick")
        }
        state => {
            widget.join().await.context("Autocomplete did not start")?;
            anyhow::bail!("Autocomplete stopped before it was ready ({:?})", state);
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read stdin")? {
                    Some(line) => handle_line(&line, &input, &renderer),
                    None => {
                        info!("Input closed");
                        break;
                    }
                }
            }
            _ = &mut shutdown => {
                info!("Received shutdown signal");
                break;
            }
        }
    }

    input.close();
    widget.shutdown().await.context("Autocomplete failed")?;

    if std::env::var("AUTOCOMPLETE_METRICS").is_ok_and(|v| v == "1") {
        dump_metrics()?;
    }

    Ok(())
}

/// `:N` picks entry N of the open list; anything else is typed.
fn handle_line(line: &str, input: &LineInput, renderer: &TerminalRenderer) {
    if let Some(index) = line.strip_prefix(':').and_then(|n| n.trim().parse().ok()) {
        if !renderer.select(index) {
            warn!("Nothing to select at {}", index);
        }
        return;
    }
    input.feed(line);
}

async fn load_dataset(path: &str) -> Result<Vec<Value>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read dataset {}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Dataset {} is not a JSON array", path))
}

fn dump_metrics() -> Result<()> {
    let registry = Registry::new();
    for metric in metrics::all_metrics() {
        registry
            .register(metric)
            .context("Failed to register metric")?;
    }

    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&registry.gather(), &mut buffer)
        .context("Failed to encode metrics")?;
    print!("{}", String::from_utf8_lossy(&buffer));
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
