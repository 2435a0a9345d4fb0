use anyhow::Result;
use calengine::cli::{CliArgs, print_help};
use calengine::config::EngineConfig;
use calengine::context::{AppContext, StandardContext};
use calengine::logging;
use calengine::metrics;
use calengine::protocol::{EngineEvent, Performance, Request, Response};
use calengine::worker::spawn_engine;
use log::LevelFilter;
use serde_json::Value;
use std::env;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse(env::args().skip(1))?;
    if args.help {
        print_help("calengine");
        return Ok(());
    }

    let ctx = StandardContext::new(args.root.clone());
    let config = match &args.config {
        Some(path) => EngineConfig::load_from_path(path)?,
        None => EngineConfig::load(&ctx)?,
    };

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        logging::parse_level(&config.log_level)
    };
    let log_file = if config.log_to_file {
        ctx.get_log_file_path()
    } else {
        None
    };
    if let Err(e) = logging::init_logging(level, log_file.as_deref()) {
        eprintln!("Logging disabled: {:#}", e);
    }
    log::info!("Calengine v{} ready", env!("CARGO_PKG_VERSION"));

    let (engine, mut events) = spawn_engine(&config);
    let (out_tx, mut out_rx) = mpsc::channel::<EngineEvent>(config.channel_capacity.max(1));

    let forward_tx = out_tx.clone();
    let forwarder = tokio::spawn(async move {
        while let Some(ev) = events.recv().await {
            if forward_tx.send(ev).await.is_err() {
                break;
            }
        }
    });

    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(ev) = out_rx.recv().await {
            let line = match serde_json::to_string(&ev) {
                Ok(line) => line,
                Err(e) => {
                    log::error!("Dropping unserializable message: {}", e);
                    continue;
                }
            };
            if stdout.write_all(line.as_bytes()).await.is_err()
                || stdout.write_all(b"\n").await.is_err()
                || stdout.flush().await.is_err()
            {
                log::error!("Stdout closed, stopping output");
                break;
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Request>(&line) {
            Ok(request) => engine.send(request).await?,
            Err(e) => {
                let rejected = reject_line(&line, &e);
                let _ = out_tx.send(EngineEvent::Response(rejected)).await;
            }
        }
    }

    drop(engine);
    drop(out_tx);
    let _ = forwarder.await;
    let _ = writer.await;

    let snapshot = metrics::global().snapshot();
    log::info!(
        "Shutting down: {} requests, {} failed, {} panics, {:.1}ms busy",
        snapshot.requests,
        snapshot.failures,
        snapshot.panics,
        snapshot.busy_micros as f64 / 1000.0
    );
    Ok(())
}

// Answers a line that is not a valid request, reusing its id when one is readable.
fn reject_line(line: &str, err: &serde_json::Error) -> Response {
    let parsed: Option<Value> = serde_json::from_str(line).ok();
    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|v| v.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    let id = field("id").unwrap_or_else(|| "unknown".to_string());
    let kind = field("type").unwrap_or_default();
    log::warn!("Rejected malformed request line: {}", err);
    Response::failure(
        &id,
        &kind,
        format!("Malformed request: {}", err),
        Performance {
            duration_ms: 0.0,
            memory_used_bytes: 0,
        },
    )
}
