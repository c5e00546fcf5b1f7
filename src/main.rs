// src/main.rs

use clap::{CommandFactory, Parser};
use feishu_reader::{
    print_to_stdout, AppError, CommandLineInput, ContentSource, FeishuHttpClient, FeishuReader,
    Presentation, ReaderConfig, ResultRenderer,
};
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
///
/// The console appender writes to stderr so stdout carries only the result.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("feishu_reader.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "[{l}] {m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Fetches the configured target, renders it and prints it.
async fn execute_read(config: &ReaderConfig) -> Result<(), AppError> {
    let client = FeishuHttpClient::new(config.credentials.clone(), config.base_url.clone())?;
    let reader = FeishuReader::new(Arc::new(client), config.limits);

    let result = reader.fetch(&config.target, config.recursive).await?;

    let presentation = Presentation {
        format: config.output,
        pretty: config.pretty,
    };
    let rendered = presentation.render(&result)?;
    print_to_stdout(&rendered)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    if !cli.has_target() {
        CommandLineInput::command().print_help()?;
        std::process::exit(1);
    }

    setup_logging(cli.verbose)?;

    let outcome = match ReaderConfig::resolve(cli) {
        Ok(config) => execute_read(&config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = outcome {
        log::error!("Error: {}", e);
        if e.is_auth_related() {
            log::error!("Check app_id/app_secret and that the app has been granted access to this resource");
        }
        std::process::exit(1);
    }

    Ok(())
}
