//! CLI entrypoint for code-crew
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use crew_application::{
    AskTeamUseCase, ConversationLogger, NoConversationLogger, NoProgress, ProgressNotifier,
    ReviewChangesInput, ReviewChangesUseCase, RunTeamUseCase,
};
use crew_infrastructure::{
    ConfigLoader, FileConfig, GitChangeSource, InMemoryStore, JsonlConversationLogger,
    LocalArtifactStore, OpenAiGateway,
};
use crew_presentation::{AppState, Cli, Command, ConsoleFormatter, ProgressReporter, serve};
use futures::StreamExt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let batch = matches!(cli.command, Some(Command::Review { .. }));
    let _log_guard = match init_logging(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        // No subscriber yet, so stderr is the only place left
        Err(e) if batch => {
            eprintln!("Review batch could not run: {:#}", e);
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    settle(batch, run(cli).await)
}

/// The CI batch always exits normally: its failures are logged, not returned.
fn settle(batch: bool, result: Result<()>) -> Result<()> {
    match result {
        Err(e) if batch => {
            error!("Review batch could not run: {:#}", e);
            Ok(())
        }
        other => other,
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    if !issues.is_empty() {
        eprint!("{}", ConsoleFormatter::format_issues(&issues));
    }
    if FileConfig::has_errors(&issues) {
        bail!("Configuration has errors; refusing to start");
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    info!("Starting code-crew");

    // === Dependency Injection ===
    let gateway = Arc::new(OpenAiGateway::from_config(&config.providers.openai)?);
    let team = RunTeamUseCase::new(gateway, config.models.to_team_spec()?)
        .with_params(config.team_params())
        .with_logger(transcript_logger(&config));

    match command {
        Command::Review { before, after, repo } => {
            let store = LocalArtifactStore::new(&repo, &config.batch.reports_dir);
            info!("Writing reports to {}", store.reports_dir().display());
            let batch = ReviewChangesUseCase::new(
                team,
                Arc::new(GitChangeSource::new(&repo)),
                Arc::new(store),
            )
            .with_filter(config.batch.to_filter())
            .with_logger(transcript_logger(&config));

            let reporter = ProgressReporter::new();
            let progress: &dyn ProgressNotifier = if cli.quiet { &NoProgress } else { &reporter };

            // Per-artifact failures are in the summary.
            match batch
                .execute_with_progress(ReviewChangesInput::new(before, after), progress)
                .await
            {
                Ok(summary) => print!("{}", ConsoleFormatter::format_batch(&summary)),
                Err(e) => error!("{}", e),
            }
        }

        Command::Serve { host, port } => {
            let mut server = config.server.clone();
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }

            let ask = AskTeamUseCase::new(team.with_memory(Arc::new(InMemoryStore::default())));
            let state = AppState::new(ask, server.image_path.clone());

            let shutdown = CancellationToken::new();
            spawn_ctrl_c(shutdown.clone());
            serve(state, &server.bind_address(), shutdown)
                .await
                .with_context(|| format!("Server on {} failed", server.bind_address()))?;
        }

        Command::Ask { query, session } => {
            let ask = AskTeamUseCase::new(team.with_memory(Arc::new(InMemoryStore::default())));
            let session = ask.resolve_session(session.as_deref());
            if !cli.quiet {
                eprintln!("session: {}", session);
            }

            let mut chunks = ask.ask(&session, Some(&query));
            let mut stdout = std::io::stdout().lock();
            while let Some(chunk) = chunks.next().await {
                stdout.write_all(chunk.as_bytes())?;
                stdout.flush()?;
            }
            writeln!(stdout)?;
        }
    }

    Ok(())
}

/// Console logging from `-v` (or `RUST_LOG`), plus an optional log file.
///
/// The returned guard flushes the file writer on drop.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            })
        })
    };

    let console = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter());

    let Some(path) = log_file else {
        tracing_subscriber::registry().with(console).init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Cannot create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    let file = fmt::layer()
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(filter());

    tracing_subscriber::registry().with(console).with(file).init();
    Ok(Some(guard))
}

fn transcript_logger(config: &FileConfig) -> Arc<dyn ConversationLogger> {
    match config.logging.transcript.as_ref() {
        Some(path) => match JsonlConversationLogger::open(path) {
            Some(logger) => Arc::new(logger),
            None => {
                warn!("Transcript disabled: cannot open {}", path.display());
                Arc::new(NoConversationLogger)
            }
        },
        None => Arc::new(NoConversationLogger),
    }
}

fn spawn_ctrl_c(shutdown: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutting down"),
            Err(e) => warn!("Cannot listen for Ctrl+C: {}", e),
        }
        shutdown.cancel();
    });
}
