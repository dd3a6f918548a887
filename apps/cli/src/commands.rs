//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use paperwright_composer::pipeline::{self, ProduceConfig, ProduceResult, ProgressReporter};
use paperwright_payments::{MockGateway, PricingGate};
use paperwright_shared::{
    AppConfig, ComposeConfig, DocumentRequest, WorkKind, init_config, load_config,
};
use paperwright_sources::{FixtureProvider, SourceProvider};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// PaperWright — produce templated academic works.
#[derive(Parser)]
#[command(
    name = "paperwright",
    version,
    about = "Quote, charge, and produce templated academic works from bibliographic sources.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Work kind CLI argument.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum KindArg {
    Coursework,
    Report,
}

impl From<KindArg> for WorkKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Coursework => WorkKind::Coursework,
            KindArg::Report => WorkKind::Report,
        }
    }
}

/// Output format for the produced document.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Produce a document (quotes, confirms payment, then assembles).
    Generate {
        /// Topic of the work.
        topic: String,

        /// Kind of work to produce.
        #[arg(short, long)]
        kind: KindArg,

        /// Document length in pages (defaults from config).
        #[arg(short, long)]
        pages: Option<u32>,

        /// Free-form requirements to record on the document.
        #[arg(short, long)]
        requirements: Option<String>,

        /// Paying party identifier. Payment is confirmed before generation.
        #[arg(long)]
        payer: String,

        /// Write the rendered text to this path instead of stdout.
        #[arg(short, long)]
        out: Option<String>,

        /// Output format: text (rendered document) or json (full structure).
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the price quote for a work kind.
    Quote {
        /// Kind of work to quote.
        #[arg(short, long)]
        kind: KindArg,

        /// Page count to record on the quote (does not change the amount).
        #[arg(short, long)]
        pages: Option<u32>,
    },

    /// List the source records the provider returns for a topic.
    Sources {
        /// Topic to look up.
        topic: String,

        /// Maximum records to fetch (defaults from config).
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate {
            topic,
            kind,
            pages,
            requirements,
            payer,
            out,
            format,
        } => {
            cmd_generate(
                &topic,
                kind.into(),
                pages,
                requirements,
                &payer,
                out.as_deref(),
                format,
            )
            .await
        }
        Command::Quote { kind, pages } => cmd_quote(kind.into(), pages).await,
        Command::Sources { topic, limit } => cmd_sources(&topic, limit).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_generate(
    topic: &str,
    kind: WorkKind,
    pages: Option<u32>,
    requirements: Option<String>,
    payer: &str,
    out: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let config = load_config()?;
    let compose = ComposeConfig::from(&config);

    let request = DocumentRequest {
        topic: topic.to_string(),
        kind,
        requirements,
        page_count: pages.unwrap_or(compose.page_count),
    };

    let produce_config = ProduceConfig {
        request,
        payer_id: payer.to_string(),
        source_limit: compose.source_limit,
    };

    let provider = FixtureProvider::new();
    let gateway = MockGateway::new();
    let pricing = PricingGate::new(config.pricing.clone());

    info!(topic, kind = %kind, payer, "producing document");

    let reporter = CliProgress::new();
    let result = pipeline::produce(&provider, &gateway, &pricing, &produce_config, &reporter)
        .await
        .map_err(|e| eyre!(e))?;

    let document = match &result.outcome {
        paperwright_composer::assembler::GenerationOutcome::Complete(doc) => doc,
        paperwright_composer::assembler::GenerationOutcome::Degraded(degraded) => {
            return Err(eyre!(
                "generation degraded for '{}' ({}): {}",
                degraded.topic,
                degraded.kind,
                degraded.error
            ));
        }
    };

    // Print summary
    println!();
    println!("  Document produced successfully!");
    println!("  Title:        {}", document.title);
    println!("  Kind:         {}", document.kind);
    println!("  Pages:        {}", document.page_count);
    println!("  Sources:      {}", document.sources.len());
    println!("  Price:        {} {}", result.quote.amount, result.quote.currency);
    println!("  Confirmation: {}", result.receipt.confirmation_id);
    if let Some(fingerprint) = &result.fingerprint {
        println!("  Fingerprint:  {fingerprint}");
    }
    println!("  Time:         {:.1}s", result.elapsed.as_secs_f64());
    println!();

    let rendered = match format {
        OutputFormat::Text => document.rendered_text.clone(),
        OutputFormat::Json => serde_json::to_string_pretty(document.as_ref())?,
    };

    match out {
        Some(path) => {
            let path = PathBuf::from(path);
            std::fs::write(&path, &rendered)
                .map_err(|e| eyre!("cannot write {}: {e}", path.display()))?;
            println!("  Written to: {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

async fn cmd_quote(kind: WorkKind, pages: Option<u32>) -> Result<()> {
    let config = load_config()?;
    let pricing = PricingGate::new(config.pricing.clone());

    let quote = pricing.quote(kind, pages);

    println!();
    println!("  Quote for a {} ({} pages):", quote.kind, quote.page_count);
    println!("  {} {}", quote.amount, quote.currency);
    println!();

    Ok(())
}

async fn cmd_sources(topic: &str, limit: Option<usize>) -> Result<()> {
    let config = load_config()?;
    let limit = limit.unwrap_or(config.defaults.source_limit);

    let provider = FixtureProvider::new();
    let outcome = provider.fetch(topic, limit).await;

    if let Some(error) = &outcome.error {
        println!("  Provider degraded: {error}");
    }

    if outcome.records.is_empty() {
        println!("  No sources available for '{topic}'.");
        return Ok(());
    }

    println!();
    println!("  Sources for '{topic}':");
    for record in &outcome.records {
        println!();
        println!("  [{}] {} ({})", record.id, record.title, record.year);
        println!("      {} — {}", record.journal, record.authors.join(", "));
        println!("      {}", record.url);
    }
    println!();

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn done(&self, _result: &ProduceResult) {
        self.spinner.finish_and_clear();
    }
}
