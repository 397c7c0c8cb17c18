use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chart_viewer_cli::app::{PendingAnswer, LOGIN_PROMPT};
use chart_viewer_cli::{App, Config, Flow};
use chart_viewer_core::RecordStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::parse();

    let store = RecordStore::load(&config.data)
        .with_context(|| format!("loading dataset {}", config.data.display()))?;
    info!(patients = store.len(), "Loaded patient dataset");
    debug!(ids = ?store.ids(), "Patient identifiers");

    let client = Arc::new(config.assistant_client());
    {
        let client = Arc::clone(&client);
        tokio::spawn(async move {
            match client.health().await {
                Ok(answer) => info!(url = client.base_url(), answer = %answer, "Assistant reachable"),
                Err(e) => warn!(url = client.base_url(), error = %e, "Assistant health check failed"),
            }
        });
    }

    let mut app = App::new(&store, client, config.model_mode);
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<PendingAnswer> = None;

    write_out(&mut stdout, &format!("{}\n", LOGIN_PROMPT), &app.prompt()).await?;

    loop {
        tokio::select! {
            settled = async {
                match pending.as_mut() {
                    Some(handle) => handle.await.ok().flatten(),
                    None => None,
                }
            }, if pending.is_some() => {
                pending = None;
                let output = app.answer_arrived(settled);
                if !output.is_empty() {
                    write_out(&mut stdout, &format!("\n{}", output), &app.prompt()).await?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let step = app.handle_line(&line);
                if step.pending.is_some() {
                    pending = step.pending;
                }
                if step.flow == Flow::Quit {
                    break;
                }
                write_out(&mut stdout, &step.output, &app.prompt()).await?;
            }
        }
    }

    Ok(())
}

async fn write_out(stdout: &mut tokio::io::Stdout, output: &str, prompt: &str) -> anyhow::Result<()> {
    if !output.is_empty() {
        stdout.write_all(output.as_bytes()).await?;
        if !output.ends_with('\n') {
            stdout.write_all(b"\n").await?;
        }
    }
    stdout.write_all(prompt.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
