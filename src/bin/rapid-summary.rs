use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use rapid_summary::pipeline::request::coerce_sentence_count;
use rapid_summary::{
    handle_request, KeywordEngine, SummarizeRequest, SummarizeResponse, Summarizer, SummaryConfig,
};

#[derive(Parser)]
#[command(name = "rapid-summary")]
#[command(about = "Extractive summaries with highlighted keyphrases", long_about = None)]
struct Cli {
    /// Text to summarize (default: read stdin)
    #[arg(short, long, conflicts_with = "file")]
    text: Option<String>,

    /// Read the text from a file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Number of sentences; unparseable or < 1 falls back to the default
    #[arg(short = 'n', long)]
    sentences: Option<String>,

    /// Keyphrase engine: rake, textrank or none
    #[arg(short, long)]
    keywords: Option<KeywordEngine>,

    /// JSON config file
    #[arg(short, long, env = "RAPID_SUMMARY_CONFIG")]
    config: Option<PathBuf>,

    /// Print the JSON response instead of text
    #[arg(long)]
    json: bool,
}

fn read_text(cli: &Cli) -> anyhow::Result<String> {
    if let Some(text) = &cli.text {
        return Ok(text.clone());
    }
    if let Some(path) = &cli.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read stdin")?;
    Ok(text)
}

fn run(cli: Cli) -> anyhow::Result<SummarizeResponse> {
    let mut config = match &cli.config {
        Some(path) => SummaryConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SummaryConfig::default(),
    };
    if let Some(engine) = cli.keywords {
        config.keyword_engine = engine;
    }

    let text = read_text(&cli)?;
    let count = coerce_sentence_count(
        cli.sentences.map(Value::String).as_ref(),
        config.default_sentence_count,
    );

    let summarizer = Summarizer::from_config(config);
    tracing::debug!(?summarizer, "summarizer ready");
    Ok(handle_request(&summarizer, &SummarizeRequest::new(text, count)))
}

fn main() -> ExitCode {
    let filter = EnvFilter::from_default_env().add_directive(
        "rapid_summary=info"
            .parse()
            .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
    );
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    rapid_summary::warm_up();

    let cli = Cli::parse();
    let json = cli.json;
    let response = match run(cli) {
        Ok(response) => response,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if json {
        match serde_json::to_string_pretty(&response) {
            Ok(body) => println!("{body}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        match &response {
            SummarizeResponse::Success(ok) => {
                println!("{}", ok.summary);
                println!();
                println!(
                    "{} -> {} words ({}% reduction)",
                    ok.original_word_count, ok.summary_word_count, ok.reduction_percentage
                );
            }
            SummarizeResponse::Failure(err) => eprintln!("Error: {}", err.error),
        }
    }

    match response.status() {
        200 => ExitCode::SUCCESS,
        400 => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}
