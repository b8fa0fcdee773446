// src/config.rs
use crate::api::ClientSettings;
use crate::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, NOTION_API_BASE_URL};
use crate::error::AppError;
use crate::formatting::{RenderMode, RenderOptions, TodoStyle};
use crate::ingest::FetchSettings;
use crate::types::ApiKey;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the integration token.
pub const API_KEY_ENV: &str = "NOTION_API_KEY";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub options: GlobalOptions,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ingest a book page and every database embedded in it
    Ingest {
        /// Notion URL of the book page
        url: String,
    },
    /// Read a single page and render its content
    Read {
        /// Notion URL of the page
        url: String,
    },
    /// Print the ID embedded in a Notion URL without calling the API
    ExtractId {
        /// Notion URL to inspect
        url: String,
    },
    /// Fetch a page object and print the unchecked API response
    Raw {
        /// Notion URL of the page
        url: String,
    },
}

impl Command {
    pub fn url(&self) -> &str {
        match self {
            Command::Ingest { url }
            | Command::Read { url }
            | Command::ExtractId { url }
            | Command::Raw { url } => url,
        }
    }

    /// Whether the command talks to the Notion API at all.
    pub fn needs_api(&self) -> bool {
        !matches!(self, Command::ExtractId { .. })
    }

    /// The render options used when none are given on the command line.
    fn default_render(&self) -> RenderOptions {
        match self {
            Command::Ingest { .. } => RenderOptions::spaced(),
            _ => RenderOptions::compact(),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Write the JSON response to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// How rendered lines are joined (defaults per command)
    #[arg(long, global = true, value_enum)]
    pub render_mode: Option<RenderMode>,

    /// Marker style for to-do items (defaults per command)
    #[arg(long, global = true, value_enum)]
    pub todo_style: Option<TodoStyle>,

    /// Number of database rows fetched at once (default: auto, max 32)
    #[arg(long, global = true)]
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Notion API base URL
    #[arg(long, global = true, default_value = NOTION_API_BASE_URL)]
    pub base_url: String,
}

/// Resolved configuration, validated and ready to drive one command.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub command: Command,
    /// Present whenever the command needs the API.
    pub api_key: Option<ApiKey>,
    pub client: ClientSettings,
    pub fetch: FetchSettings,
    pub output_file: Option<PathBuf>,
    pub verbose: bool,
}

impl IngestConfig {
    /// Resolves configuration from CLI input and the process environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, std::env::var(API_KEY_ENV).ok())
    }

    /// Resolves configuration with an explicitly supplied API key value.
    pub fn resolve_with(cli: CommandLineInput, api_key: Option<String>) -> Result<Self, AppError> {
        let CommandLineInput { command, options } = cli;

        let api_key = if command.needs_api() {
            let raw = api_key.filter(|key| !key.trim().is_empty()).ok_or_else(|| {
                AppError::MissingConfiguration(format!(
                    "{} environment variable not set",
                    API_KEY_ENV
                ))
            })?;
            Some(ApiKey::new(raw.trim())?)
        } else {
            None
        };

        let preset = command.default_render();
        let render = RenderOptions {
            mode: options.render_mode.unwrap_or(preset.mode),
            todo_style: options.todo_style.unwrap_or(preset.todo_style),
        };

        let client = ClientSettings {
            base_url: options.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(options.timeout_secs.max(1)),
        };

        Ok(IngestConfig {
            command,
            api_key,
            client,
            fetch: FetchSettings::new(render, options.concurrency),
            output_file: options.output.map(PathBuf::from),
            verbose: options.verbose,
        })
    }

    /// The API key, for commands that need one.
    pub fn require_api_key(&self) -> Result<&ApiKey, AppError> {
        self.api_key.as_ref().ok_or_else(|| {
            AppError::MissingConfiguration(format!("{} environment variable not set", API_KEY_ENV))
        })
    }
}
