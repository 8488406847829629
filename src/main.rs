use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use mazesearch::{app::App, config::Cli};

/// Install the global subscriber. Interactive runs log to a file so the terminal UI stays
/// clean; the returned guard flushes that file when dropped.
fn init_tracing(cli: &Cli) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if cli.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    }

    let dir = cli
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = cli
        .log_file
        .file_name()
        .with_context(|| format!("invalid log file path {}", cli.log_file.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        dir, file_name,
    ));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing(&cli)?;
    let app = App::new(cli);

    let mut stdout = std::io::stdout();
    if app.is_headless() {
        app.run_headless(&mut stdout)?;
        return Ok(());
    }

    App::setup_terminal(&mut stdout)?;
    let result = app.run(&mut stdout);
    // Restore the terminal before reporting any error
    App::restore_terminal(&mut stdout)?;
    let summary = result?;
    tracing::info!("[main] finished: {:?}", summary);
    Ok(())
}
