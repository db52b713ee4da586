pub mod commands;
pub mod core;
pub mod extraction;
pub mod providers;
pub mod query;
pub mod security;

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::{
    commands::research::{resolve_api_key, run_topic_query},
    core::{
        config::AppConfig,
        errors::{AppError, AppResult},
        types::{Provider, TopicQueryResponse},
    },
    providers::chat::ChatClient,
    query::{
        sort::{SortDirection, SortKey, SortState},
        view::BrowserState,
    },
};

#[derive(Debug, Parser)]
#[command(name = "claimscope")]
#[command(about = "Extract sourced factual claims about a topic")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Store the provider API key in the OS keyring.
    SetKey { api_key: String },
    /// Ask the model about a topic and print the normalized claims.
    Ask(AskArgs),
}

#[derive(Debug, Args)]
struct AskArgs {
    topic: String,
    #[arg(long)]
    filter: Option<String>,
    #[arg(long, value_parser = parse_sort_key)]
    sort: Option<SortKey>,
    #[arg(long)]
    descending: bool,
    /// Print the unmodified model content instead of the claim rows.
    #[arg(long)]
    raw: bool,
}

fn parse_sort_key(raw: &str) -> Result<SortKey, String> {
    match raw.to_ascii_lowercase().as_str() {
        "claim" => Ok(SortKey::Claim),
        "category" => Ok(SortKey::Category),
        "context" => Ok(SortKey::Context),
        other => Err(format!("unknown sort key `{other}`")),
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(config.log_level.into()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let config = AppConfig::from_env();
    init_tracing(&config);

    let outcome = match cli.command {
        Command::SetKey { api_key } => {
            commands::settings::set_provider_key(Provider::Perplexity, &api_key)
                .and_then(|response| serde_json::to_string_pretty(&response).map_err(AppError::from))
        }
        Command::Ask(args) => ask(&config, args),
    };

    match outcome {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(code = err.code(), "{err}");
            let body = serde_json::to_string(&err).unwrap_or_else(|_| err.to_string());
            eprintln!("{body}");
            ExitCode::FAILURE
        }
    }
}

fn ask(config: &AppConfig, args: AskArgs) -> AppResult<String> {
    let api_key = resolve_api_key(config)?;
    let client = ChatClient::from_config(config)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let response = runtime.block_on(run_topic_query(&client, &api_key, &args.topic))?;

    if args.raw || response.failure.is_some() {
        if let Some(failure) = &response.failure {
            tracing::warn!(code = %failure.code, "{}", failure.message);
        }
        return Ok(response.raw_content);
    }
    render_rows(response, &args)
}

fn render_rows(response: TopicQueryResponse, args: &AskArgs) -> AppResult<String> {
    let sort = SortState {
        key: args.sort.unwrap_or(SortState::default().key),
        direction: if args.descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
    };
    let state = BrowserState {
        sort,
        ..BrowserState::with_rows(response.claims.clone())
    }
    .with_search(args.filter.clone().unwrap_or_default());

    let body = serde_json::json!({
        "topic": response.topic,
        "receivedAt": response.received_at,
        "metadata": response.metadata,
        "sort": state.sort,
        "claims": state.visible_rows(),
        "citations": response.citations,
    });
    Ok(serde_json::to_string_pretty(&body)?)
}
