//! menuqa: ask a question about a menu from the command line
//!
//! Reads a menu snapshot (JSON), answers one question and prints the answer
//! as JSON.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use menuqa::config::Config;
use menuqa::{MenuConcierge, MenuRequest, MenuSnapshot};

/// Menu question answering
#[derive(Parser)]
#[command(name = "menuqa")]
#[command(version)]
#[command(about = "Answer a customer question about a restaurant menu")]
struct Args {
    /// Path to the menu snapshot JSON file
    #[arg(short, long)]
    menu: PathBuf,

    /// Restaurant id (default: the id in the snapshot)
    #[arg(short, long)]
    restaurant: Option<String>,

    /// Language code of the question
    #[arg(short, long, default_value = "bg")]
    lang: String,

    /// Config file (default: ~/.menuqa/config.toml, then /etc/menuqa/config.toml)
    #[arg(short, long, env = "MENUQA_CONFIG")]
    config: Option<PathBuf>,

    /// Answer from the fallback rules without calling the LLM
    #[arg(long)]
    offline: bool,

    /// The customer's question
    question: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    let menu: MenuSnapshot = serde_json::from_str(&fs::read_to_string(&args.menu)?)?;

    let mut builder = MenuConcierge::builder()
        .cache_config(config.cache.to_cache_config())
        .timeout(config.llm.timeout())
        .max_tokens(config.llm.max_tokens)
        .temperature(config.llm.temperature)
        .retry(config.llm.retry());

    builder = match Config::api_key() {
        Some(key) if !args.offline => builder
            .openai(key)
            .base_url(&config.llm.base_url)
            .model(&config.llm.model),
        Some(_) => builder.offline(),
        None => {
            if !args.offline {
                tracing::warn!("no API key in MENUQA_API_KEY or OPENAI_API_KEY, running offline");
            }
            builder.offline()
        }
    };
    let concierge = builder.build()?;

    let request = MenuRequest {
        restaurant_id: args
            .restaurant
            .unwrap_or_else(|| menu.restaurant.id.clone()),
        question: Some(args.question),
        language: Some(args.lang),
        menu: Some(menu),
    };

    let answer = concierge.answer(&request).await?;
    println!("{}", serde_json::to_string_pretty(&answer)?);
    Ok(())
}
