//! wikiq CLI - free-form requests to Wikipedia summaries
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments, layering config, and handling top-level errors.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use wikiq::model::{ModelOptions, T5Generator};
use wikiq::{query, summary, ui, wiki, Config, WikiClient};

#[derive(Parser)]
#[command(name = "wikiq")]
#[command(
    author,
    version,
    about = "Transform user requests into Wikipedia queries via a local neural model and fetch summaries",
    long_about = None
)]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite a request into a Wikipedia query and show the article summary
    Ask {
        /// The user request to process
        message: String,
        /// Hugging Face model used for rewriting the query
        #[arg(short, long)]
        model: Option<String>,
        /// Number of sentences to include in the summary
        #[arg(short, long, allow_negative_numbers = true)]
        sentences: Option<i64>,
        /// Cache directory for downloaded model files
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ask {
            message,
            model,
            sentences,
            cache_dir,
        } => ask(message, model, sentences, cache_dir).await,
    }
}

async fn ask(
    message: String,
    model: Option<String>,
    sentences: Option<i64>,
    cache_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    let model_id = model.unwrap_or(config.model.name);
    let sentences = sentences.unwrap_or(config.summary.sentences);
    let cache_dir = cache_dir.or(config.model.cache_dir);

    // Model load and inference are CPU-bound; keep them off the runtime.
    ui::info(format!("Loading model '{model_id}'..."));
    let options = ModelOptions {
        model_id: model_id.clone(),
        cache_dir,
    };
    let mut generator = tokio::task::spawn_blocking(move || T5Generator::load(&options))
        .await
        .context("model loading task failed")?
        .with_context(|| format!("failed to load model '{model_id}'"))?;
    ui::success("Model loaded successfully");

    let bar = ui::spinner("Converting request into Wikipedia query...");
    let rewritten = tokio::task::spawn_blocking(move || query::rewrite(&mut generator, &message))
        .await
        .context("query rewriting task failed")?;
    bar.finish_and_clear();
    let rewritten = rewritten.context("failed to rewrite request")?;

    let sanitized = query::sanitize(&rewritten);
    println!(
        "{} {}",
        "Searching Wikipedia for:".cyan(),
        sanitized.bold()
    );

    let client = WikiClient::new(&config.wiki.api_url)?;
    let results = client.search(&sanitized).await.context("search error")?;
    if results.is_empty() {
        ui::warn(format!("No results found for '{sanitized}'."));
        return Ok(());
    }

    let title = ui::select_title(&results)?;
    println!("{} {}", "Loading page:".cyan(), title.green());

    let article = wiki::resolve(&client, &title, &sanitized)
        .await
        .context("failed to fetch article")?;

    let rendered = summary::render(&article, sentences);
    ui::print_summary(&rendered);
    Ok(())
}
