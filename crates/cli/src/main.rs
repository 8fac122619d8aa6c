use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use taskseek_corpus::{CorpusProvider, InMemoryCorpus};
use taskseek_fuzzy::{FuzzyRanker, MatchResult};
use taskseek_search::{FusedResult, HybridConfig, HybridSearch};
use taskseek_vector_store::{EmbeddingProvider, HashEmbedder, SemanticHit, VectorStore};

#[derive(Parser)]
#[command(name = "taskseek")]
#[command(about = "Hybrid search over a task corpus", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Corpus snapshot utilities
    #[command(subcommand)]
    Corpus(CorpusCommands),

    /// Hybrid search: keyword + fuzzy + semantic, fused
    Search(SearchArgs),

    /// Fuzzy channel only, with banded scores and a suggestion
    Fuzzy(FuzzyArgs),

    /// Semantic channel only, with cosine scores
    Semantic(SemanticArgs),
}

#[derive(Subcommand)]
enum CorpusCommands {
    /// Write the built-in sample snapshot
    Init(CorpusInitArgs),
}

#[derive(Args)]
struct CorpusInitArgs {
    /// Output path of the snapshot
    #[arg(long, default_value = "tasks.json")]
    output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

#[derive(Args)]
struct SearchArgs {
    /// Query text
    query: String,

    /// Corpus snapshot to search
    #[arg(long, default_value = "tasks.json")]
    corpus: PathBuf,

    /// Semantic channel result cap (overrides the config file)
    #[arg(long)]
    top_k: Option<usize>,

    /// Optional TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct FuzzyArgs {
    /// Query text
    query: String,

    /// Corpus snapshot to search
    #[arg(long, default_value = "tasks.json")]
    corpus: PathBuf,
}

#[derive(Args)]
struct SemanticArgs {
    /// Query text
    query: String,

    /// Corpus snapshot to search
    #[arg(long, default_value = "tasks.json")]
    corpus: PathBuf,

    /// Result cap
    #[arg(long, default_value_t = 5)]
    top_k: usize,
}

#[derive(Serialize)]
struct InitOutput {
    path: PathBuf,
    items: usize,
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    suggestion: Option<String>,
    results: Vec<FusedResult>,
}

#[derive(Serialize)]
struct FuzzyOutput<'a> {
    query: &'a str,
    suggestion: Option<String>,
    results: Vec<MatchResult>,
}

#[derive(Serialize)]
struct SemanticOutput<'a> {
    query: &'a str,
    results: Vec<SemanticHit>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Corpus(CorpusCommands::Init(args)) => run_corpus_init(args).await,
        Commands::Search(args) => run_search(args).await,
        Commands::Fuzzy(args) => run_fuzzy(args).await,
        Commands::Semantic(args) => run_semantic(args).await,
    }
}

async fn run_corpus_init(args: CorpusInitArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            args.output.display()
        );
    }

    let corpus = InMemoryCorpus::sample();
    corpus.save(&args.output).await?;
    log::info!("Wrote sample corpus to {}", args.output.display());

    print_json(&InitOutput {
        items: corpus.len(),
        path: args.output,
    })
}

async fn run_search(args: SearchArgs) -> Result<()> {
    let corpus = Arc::new(load_corpus(&args.corpus).await?);
    let mut config = match &args.config {
        Some(path) => HybridConfig::load(path).await?,
        None => HybridConfig::default(),
    };
    if let Some(top_k) = args.top_k {
        config.top_k = top_k;
        config.validate()?;
    }

    let search = HybridSearch::new(
        Arc::clone(&corpus) as Arc<dyn CorpusProvider>,
        corpus,
        Arc::new(HashEmbedder::default()),
        Arc::new(VectorStore::new()),
        config,
    );
    search.index_corpus().await?;

    let outcome = search.search(&args.query).await?;
    print_json(&SearchOutput {
        query: &args.query,
        suggestion: outcome.suggestion,
        results: outcome.results,
    })
}

async fn run_fuzzy(args: FuzzyArgs) -> Result<()> {
    let corpus = load_corpus(&args.corpus).await?;
    let snapshot = corpus.snapshot().await?;

    let outcome = FuzzyRanker::new().search(&args.query, &snapshot);
    print_json(&FuzzyOutput {
        query: &args.query,
        suggestion: outcome.suggestion,
        results: outcome.results,
    })
}

async fn run_semantic(args: SemanticArgs) -> Result<()> {
    let corpus = load_corpus(&args.corpus).await?;
    let snapshot = corpus.snapshot().await?;

    let embedder = HashEmbedder::default();
    let store = VectorStore::new();
    let titles: Vec<String> = snapshot.iter().map(|item| item.title.clone()).collect();
    let embeddings = embedder.embed_batch(&titles).await?;
    for (item, embedding) in snapshot.iter().zip(embeddings) {
        store.upsert(item.id, item.title.clone(), embedding);
    }

    let query_embedding = embedder.embed(&args.query).await?;
    print_json(&SemanticOutput {
        query: &args.query,
        results: store.query(&query_embedding, args.top_k),
    })
}

async fn load_corpus(path: &Path) -> Result<InMemoryCorpus> {
    InMemoryCorpus::load(path)
        .await
        .with_context(|| format!("failed to load corpus {}", path.display()))
}

fn print_json<T: Serialize>(output: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}
