use std::fs::File;
use std::io::{self, BufReader};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use cedict_reader::{AppState, OutputFormat, router, run};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_MAX_LINES: usize = 1000;

#[derive(Parser)]
#[command(name = "cedict-reader", version, about = "Parse CC-CEDICT dictionary files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a dictionary file (or stdin) and print every entry.
    Parse {
        /// Dictionary file, usually cedict_ts.u8. Reads stdin when omitted.
        file: Option<PathBuf>,
        #[arg(long, env = "CEDICT_FORMAT", value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Stop at the first line that fails to parse.
        #[arg(long)]
        strict: bool,
    },
    /// Serve the parser over HTTP.
    Serve {
        #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
        host: String,
        #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Maximum number of lines accepted by one batch request.
        #[arg(long, env = "CEDICT_MAX_LINES", default_value_t = DEFAULT_MAX_LINES)]
        max_lines: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    match Cli::parse().command {
        Command::Parse {
            file,
            format,
            strict,
        } => parse_file(file, format, strict),
        Command::Serve {
            host,
            port,
            max_lines,
        } => serve(host, port, max_lines).await,
    }
}

fn parse_file(file: Option<PathBuf>, format: OutputFormat, strict: bool) -> anyhow::Result<()> {
    let parser = cedict_parser::Parser::new();
    let stdout = io::stdout().lock();
    let start = Instant::now();
    match file {
        Some(path) => {
            info!("reading {}", path.display());
            let file =
                File::open(&path).with_context(|| format!("open {}", path.display()))?;
            run(&parser, BufReader::new(file), stdout, format, strict)?;
        }
        None => {
            run(&parser, io::stdin().lock(), stdout, format, strict)?;
        }
    }
    info!("done in {} ms", start.elapsed().as_millis());
    Ok(())
}

async fn serve(host: String, port: u16, max_lines: usize) -> anyhow::Result<()> {
    info!("binding to {}:{}", host, port);
    info!("batch requests limited to {} lines", max_lines);

    let state = AppState {
        parser: Arc::new(cedict_parser::Parser::new()),
        max_lines,
    };

    let app = router(state).layer(TraceLayer::new_for_http());
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", host, port))?;
    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
