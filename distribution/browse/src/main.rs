//! Command-line browser for an emoji dataset
//!
//! Loads the dataset once (file path or http(s) URL), enriches it, and runs a
//! single query against the resulting catalog.
//!
//! Run with: cargo run -p emojidex-browse -- --source emojis.json search fox
//! Logging: RUST_LOG=emojidex=debug

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use emojidex::query::{DEFAULT_RELATED_LIMIT, DEFAULT_SUGGESTION_LIMIT};
use emojidex::{source_for_location, Catalog, EnrichedEntry, Lexicon, LoadOutcome, QueryEngine};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Dataset location: a JSON file path or an http(s) URL
    #[arg(short, long, env = "EMOJIDEX_SOURCE", default_value = "emojis.json")]
    source: String,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Maximum number of results to print
    #[arg(short, long, global = true)]
    limit: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List categories with their entry counts
    Categories,
    /// List entries, optionally restricted to one category
    List {
        #[arg(short, long, default_value = "all")]
        category: String,
    },
    /// Search names and keywords ("sad" shows the curated sad view)
    Search { query: String },
    /// Typeahead suggestions for a partial query
    Suggest { query: String },
    /// Show one entry in detail, with related entries
    Show { name: String },
    /// Entries tagged with exactly this keyword
    Keyword { keyword: String },
}

#[derive(Serialize)]
struct Detail<'a> {
    entry: &'a EnrichedEntry,
    related: Vec<&'a EnrichedEntry>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let engine = QueryEngine::new(load(&args.source).await?.catalog);

    match &args.command {
        Command::Categories => {
            let counts = engine.catalog().category_counts();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&counts)?);
            } else {
                for count in &counts {
                    println!("{:>6}  {}", count.count, count.group);
                }
            }
        }
        Command::List { category } => {
            print_entries(&engine.by_category(category), &args)?;
        }
        Command::Search { query } => {
            // blank means "no search": the whole catalog
            print_entries(&engine.search(query), &args)?;
        }
        Command::Suggest { query } => {
            let limit = args.limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT);
            print_entries(&engine.suggestions(query, limit), &args)?;
        }
        Command::Show { name } => {
            let entry = find_by_name(&engine, name)
                .with_context(|| format!("No emoji named '{}'", name))?;
            let limit = args.limit.unwrap_or(DEFAULT_RELATED_LIMIT);
            let detail = Detail {
                entry,
                related: engine.related(entry, limit),
            };
            print_detail(&detail, args.json)?;
        }
        Command::Keyword { keyword } => {
            print_entries(&engine.by_keyword(keyword), &args)?;
        }
    }

    Ok(())
}

/// Load and enrich the dataset behind a spinner. Load failures degrade to the
/// fallback set with a warning rather than aborting.
async fn load(location: &str) -> Result<LoadOutcome> {
    let lexicon = Lexicon::builtin();

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Loading {}...", location));
    pb.enable_steady_tick(Duration::from_millis(100));

    let outcome = match source_for_location(location) {
        Ok(source) => Catalog::load(source.as_ref(), lexicon).await,
        Err(err) => Catalog::recover(err, lexicon),
    };
    pb.finish_and_clear();

    if let Some(notice) = &outcome.notice {
        tracing::warn!(cause = %notice.cause, "{}", notice.message);
    }
    Ok(outcome)
}

/// First entry whose name matches, ignoring case (Unicode-aware).
fn find_by_name<'a>(engine: &'a QueryEngine, name: &str) -> Option<&'a EnrichedEntry> {
    let wanted = name.trim().to_lowercase();
    engine
        .catalog()
        .iter()
        .find(|e| e.name.to_lowercase() == wanted)
}

fn print_entries(entries: &[&EnrichedEntry], args: &Args) -> Result<()> {
    let shown = &entries[..args.limit.unwrap_or(entries.len()).min(entries.len())];

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(shown).context("Failed to serialize results")?
        );
        return Ok(());
    }

    for entry in shown {
        println!("{}  {}  [{}]", entry.glyph, entry.name, entry.group);
    }
    if shown.len() < entries.len() {
        println!("... {} more", entries.len() - shown.len());
    } else if entries.is_empty() {
        println!("No emojis found.");
    }
    Ok(())
}

fn print_detail(detail: &Detail<'_>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(detail)?);
        return Ok(());
    }

    let entry = detail.entry;
    println!("{}  {}", entry.glyph, entry.name);
    println!("Category:    {} / {}", entry.group, entry.subcategory);
    println!("Description: {}", entry.description);
    println!("Usage:       {}", entry.usage);
    println!("Keywords:    {}", entry.keywords.join(", "));
    if !detail.related.is_empty() {
        let related: Vec<&str> = detail.related.iter().map(|e| e.glyph.as_str()).collect();
        println!("Related:     {}", related.join(" "));
    }
    Ok(())
}
