// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_book_ingest::api::{NotionApi, NotionHttpClient, NotionTransport};
use notion_book_ingest::output::{deliver, DeliveryTarget, OutputPlan, OutputReport};
use notion_book_ingest::{
    extract_id_from_url, AppError, BookIngestor, Command, CommandLineInput, ExtractIdResponse,
    IngestConfig, IngestionResponse, PageId, PageReader, PageResponse, RawApiResponse,
};
use serde::Serialize;
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
///
/// Console logs go to stderr so stdout carries only the JSON response.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_book_ingest.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
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
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Runs the selected command and returns its pretty-printed JSON response.
async fn execute(config: &IngestConfig) -> Result<String, AppError> {
    match &config.command {
        Command::ExtractId { url } => {
            let page_id = extract_id_from_url(url).ok_or_else(|| AppError::InvalidReference {
                url: url.clone(),
            })?;
            to_json(&ExtractIdResponse {
                page_id,
                url: url.clone(),
            })
        }
        Command::Read { url } => {
            let reader = PageReader::new(connect(config)?, config.fetch.render);
            let page = reader.read_page(url).await?;
            to_json(&PageResponse::from(page))
        }
        Command::Ingest { url } => {
            let ingestor = BookIngestor::new(connect(config)?, config.fetch);
            let result = ingestor.ingest_book(url).await?;
            to_json(&IngestionResponse::from(result))
        }
        Command::Raw { url } => {
            let page_id: PageId = extract_id_from_url(url)
                .ok_or_else(|| AppError::InvalidReference { url: url.clone() })?
                .cast();
            let response = connect(config)?
                .raw_get(&format!("pages/{}", page_id))
                .await?;
            to_json(&RawApiResponse::new(page_id, response))
        }
    }
}

fn connect(config: &IngestConfig) -> Result<NotionApi, AppError> {
    let client = NotionHttpClient::new(config.require_api_key()?, config.client.clone())?;
    let transport: Arc<dyn NotionTransport> = Arc::new(client);
    Ok(NotionApi::new(transport))
}

fn to_json<T: Serialize>(response: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(response)?)
}

/// Writes the response where the configuration says and reports failures.
fn deliver_response(config: &IngestConfig, json: String) -> Result<OutputReport, AppError> {
    let plan = OutputPlan::for_destination(config.output_file.clone(), json);
    let report = deliver(plan);

    if !report.is_success() {
        return Err(AppError::DeliveryFailed {
            failures: report.failed.iter().map(|f| f.error.clone()).collect(),
        });
    }

    for completed in &report.completed {
        if let DeliveryTarget::WriteFile { path, .. } = &completed.operation {
            eprintln!("✓ Response saved to {}", path.display());
        }
    }

    Ok(report)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.options.verbose)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("failed to initialize logging")?;

    let config = IngestConfig::resolve(cli)?;
    let json = execute(&config).await?;
    let report = deliver_response(&config, json)?;
    log::debug!("Delivered {} bytes", report.bytes_written);

    Ok(())
}
