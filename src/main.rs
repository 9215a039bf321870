mod app;
mod corpus;
mod faq;
mod hf;
mod lang;
mod query;
mod secret;

pub const USER_AGENT: &str = concat!("faqbot/", env!("CARGO_PKG_VERSION"));

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use reqwest::Client;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use corpus::{Corpus, FileCorpus, SupabaseCorpus};
use faq::QueryResolver;
use hf::HfClient;
use hf::similarity::HfSimilarity;
use hf::translation::HfTranslator;
use lang::TrigramDetector;
use query::Query;

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Answer questions from an FAQ corpus, replying in the asker's language.
///
/// Configuration via environment variables:
/// - `HF_API_KEY`: Hugging Face token for similarity and translation (required)
/// - `HF_API_BASE`, `FAQ_SIMILARITY_MODEL`: endpoint and model overrides
/// - `SUPABASE_URL`, `SUPABASE_KEY`, `FAQ_TABLE`: corpus store (unless `--corpus` is given)
#[derive(Parser)]
#[command(name = "faqbot", version, about)]
struct Cli {
    /// Question to answer. When omitted, reads one question per line from stdin.
    query: Vec<String>,

    /// Read the corpus from a JSON file of {"question", "answer"} objects instead of Supabase
    #[arg(long, value_name = "FILE")]
    corpus: Option<PathBuf>,

    /// Seconds allowed for resolving a single question
    #[arg(long, default_value_t = 60)]
    timeout: u64,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("faqbot=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let http = Client::builder().connect_timeout(CONNECT_TIMEOUT).build()?;
    let hf = HfClient::from_env(http.clone())?;
    let corpus = match &cli.corpus {
        Some(path) => Corpus::File(FileCorpus::new(path)),
        None => Corpus::Supabase(SupabaseCorpus::from_env(http)?),
    };
    let resolver = QueryResolver::new(
        TrigramDetector,
        corpus,
        HfSimilarity::from_env(hf.clone()),
        HfTranslator::new(hf),
    );
    let timeout = Duration::from_secs(cli.timeout);

    if !cli.query.is_empty() {
        let query = Query::new(cli.query.join(" "))?;
        let answer = app::resolve_with_timeout(&resolver, &query, timeout).await?;
        let json = if cli.compact {
            serde_json::to_string(&answer)?
        } else {
            serde_json::to_string_pretty(&answer)?
        };
        println!("{json}");
        return Ok(());
    }

    let mut lines = Vec::new();
    let mut reader = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = reader.next_line().await? {
        lines.push(line);
    }
    info!(lines = lines.len(), "resolving batch from stdin");

    for line in app::resolve_batch(&resolver, lines, timeout).await {
        println!("{}", serde_json::to_string(&line)?);
    }
    Ok(())
}
