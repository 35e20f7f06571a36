// xcclean/src/main.rs
use std::fs;
use std::process;

use clap::Parser;
use colored::Colorize;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;
use xcclean_common::config::Config;
use xcclean_common::error::{Result as XcResult, XccleanError};

mod cli;

use cli::CliArgs;

#[tokio::main]
async fn main() -> XcResult<()> {
    let cli_args = CliArgs::parse();

    if cli_args.version {
        println!("{}", cli::version_line());
        return Ok(());
    }

    let config = Config::load()
        .map_err(|e| XccleanError::Config(format!("Could not load config: {e}")))?;

    let level_filter = match cli_args.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let max_log_level = level_filter.into_level().unwrap_or(tracing::Level::INFO);

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("XCCLEAN_LOG")
        .from_env_lossy();

    if cli_args.verbose > 0 {
        let log_dir = config.logs_dir();
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!(
                "{} Failed to create log directory {}: {}",
                "Warning:".yellow(),
                log_dir.display(),
                e
            );
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .without_time()
                .try_init();
        } else {
            let file_appender = tracing_appender::rolling::daily(&log_dir, "xcclean.log");
            let (non_blocking_appender, guard) = tracing_appender::non_blocking(file_appender);

            // For verbose mode, show debug/trace logs on stderr too
            let stderr_writer = std::io::stderr.with_max_level(max_log_level);
            let file_writer = non_blocking_appender.with_max_level(max_log_level);

            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(stderr_writer.and(file_writer))
                .with_ansi(true)
                .without_time()
                .try_init();

            Box::leak(Box::new(guard)); // Keep guard alive

            tracing::debug!(
                "Verbose logging enabled. Writing logs to: {}/xcclean.log",
                log_dir.display()
            );
        }
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .without_time()
            .try_init();
    }

    if let Err(e) = cli_args.run(&config).await {
        error!("Command failed: {:#}", e);
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        process::exit(1);
    }

    debug!("Command completed successfully.");
    Ok(())
}
