use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use yuv::config::AssistantConfig;
use yuv::memory::FileStore;
use yuv::outputs::ConsoleRenderer;
use yuv::services::ReqwestTransport;
use yuv::{Command, Dispatcher, Session};

#[derive(Debug, Parser)]
#[command(name = "yuv", version, about = "Yuv, a small personal chat assistant")]
struct Args {
    /// Configuration file (TOML). Defaults to ~/.config/yuv/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Storage file, overrides the configured path
    #[arg(long)]
    store: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = AssistantConfig::load(args.config.as_deref())?;
    if let Some(path) = args.store {
        config.storage.path = Some(path);
    }

    // Logs go to stderr so they never interleave with the conversation.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let store_path = config.storage.resolved_path();
    let store = FileStore::open(&store_path)
        .with_context(|| format!("Failed to open store {}", store_path.display()))?;
    tracing::info!("Using store {}", store_path.display());

    let transport = Arc::new(ReqwestTransport::new(&config.http));
    let dispatcher = Dispatcher::new(Box::new(store), transport, config.endpoints.clone());
    let mut session = Session::new(dispatcher, Box::new(ConsoleRenderer::new()));

    let (tx, rx) = mpsc::channel(32);

    // Stdin reader: one line, one command.
    tokio::spawn(async move {
        let reader = BufReader::new(tokio::io::stdin());
        let mut lines = reader.lines();

        while let Ok(Some(line)) = lines.next_line().await {
            let Some(command) = Command::parse(&line) else {
                if line.trim().starts_with('/') {
                    eprintln!("Unknown command. Type /help for the list.");
                }
                continue;
            };

            let quit = command == Command::Quit;
            if tx.send(command).await.is_err() || quit {
                break;
            }
        }
    });

    session.start();

    tokio::select! {
        _ = session.run(rx) => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted");
        }
    }

    Ok(())
}
