use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use topicform::api::{GreetBackend, HttpGreetBackend};
use topicform::core::config::{self, CliOverrides, FormConfig, ResolvedConfig};
use topicform::tui;

#[derive(Parser)]
#[command(name = "topicform", about = "Send a topic to a greet backend and read its reply")]
struct Args {
    /// Backend endpoint [default: http://127.0.0.1:5000/api/greet]
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Submit this topic once, print the reply and exit
    #[arg(short, long)]
    topic: Option<String>,

    /// Where to write the log [default: topicform.log]
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let (file_config, load_notes, config_error) = match config::load_config() {
        Ok((c, notes)) => (c, notes, None),
        Err(e) => (FormConfig::default(), Vec::new(), Some(e)),
    };
    let cli = CliOverrides {
        endpoint: args.endpoint.as_deref(),
        log_file: args.log_file.as_deref(),
    };
    let resolved = config::resolve(&file_config, &cli);

    // Nothing above could log yet
    init_logging(&resolved);
    config::log_notes(&load_notes);
    config::log_notes(&resolved.notes);
    if let Some(e) = config_error {
        log::warn!("Ignoring config file, using defaults: {}", e);
    }
    log::info!(
        "topicform starting: endpoint={}, timeout={:?}",
        resolved.endpoint,
        resolved.timeout
    );

    let backend = match HttpGreetBackend::new(resolved.endpoint.clone(), resolved.timeout) {
        Ok(b) => Arc::new(b),
        Err(e) => {
            eprintln!("topicform: {e}");
            return ExitCode::FAILURE;
        }
    };

    match args.topic {
        Some(topic) => run_once(backend.as_ref(), &topic).await,
        None => match tui::run(backend) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::warn!("TUI exited with error: {}", e);
                eprintln!("topicform: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

/// File logger: the TUI owns the terminal, so nothing goes to stdout.
fn init_logging(resolved: &ResolvedConfig) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }
}

/// One submission without the TUI: reply on stdout, failure on stderr.
async fn run_once(backend: &dyn GreetBackend, topic: &str) -> ExitCode {
    if topic.is_empty() {
        eprintln!("topicform: a topic is required");
        return ExitCode::from(2);
    }

    match backend.greet(topic).await {
        Ok(reply) => {
            println!("{}", reply.message);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::warn!("One-shot submission failed: {}", e);
            eprintln!("topicform: {e}");
            ExitCode::FAILURE
        }
    }
}
