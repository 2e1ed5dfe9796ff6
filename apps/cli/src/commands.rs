//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use goldkey_core::pipeline::{self, ProgressReporter, Providers, RunResult};
use goldkey_core::scoring;
use goldkey_providers::{
    CpcProvider, KeywordToolClient, NaverSearchClient, build_seed_providers,
};
use goldkey_shared::{
    AppConfig, PipelineConfig, TieBreak, init_config, load_config, load_config_from,
    read_credential,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// goldkey: find low-competition, high-demand keywords.
#[derive(Parser)]
#[command(
    name = "goldkey",
    version,
    about = "Discover, score, and rank golden keywords from shopping and search trends.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
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

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run the full pipeline and write data.json.
    Run {
        /// Config file (defaults to ~/.goldkey/goldkey.toml).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory (overrides `defaults.output_dir`).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Skip related-keyword expansion.
        #[arg(long)]
        no_expand: bool,

        /// Cap golden scores at 100.
        #[arg(long)]
        clamp_score: bool,

        /// Tie-break for equal scores: volume-then-keyword or score-only.
        #[arg(long)]
        tie_break: Option<TieBreak>,
    },

    /// Score a single volume/document-count pair.
    Score {
        /// Monthly search volume.
        #[arg(long)]
        volume: u64,

        /// Indexed document count.
        #[arg(long)]
        documents: u64,

        /// Cap the score at 100.
        #[arg(long)]
        clamp_score: bool,
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
        0 => "goldkey=info",
        1 => "goldkey=debug",
        _ => "goldkey=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run {
            config,
            out,
            no_expand,
            clamp_score,
            tie_break,
        } => {
            let mut app = match config {
                Some(path) => load_config_from(&path)?,
                None => load_config()?,
            };
            apply_overrides(&mut app, no_expand, clamp_score, tie_break);
            let out_dir = out.unwrap_or_else(|| PathBuf::from(&app.defaults.output_dir));
            cmd_run(app, out_dir).await
        }
        Command::Score {
            volume,
            documents,
            clamp_score,
        } => cmd_score(volume, documents, clamp_score),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

/// CLI flags override config file values.
fn apply_overrides(
    config: &mut AppConfig,
    no_expand: bool,
    clamp_score: bool,
    tie_break: Option<TieBreak>,
) {
    if no_expand {
        config.defaults.expand = false;
    }
    if clamp_score {
        config.scoring.clamp_score = true;
    }
    if let Some(tie_break) = tie_break {
        config.scoring.tie_break = tie_break;
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

/// Wire the configured adapters into the pipeline's provider bundle.
fn build_providers(config: &AppConfig) -> Result<Providers> {
    let naver = &config.naver;
    if read_credential(&naver.client_id_env).is_none()
        || read_credential(&naver.client_secret_env).is_none()
    {
        warn!(
            id_env = %naver.client_id_env,
            secret_env = %naver.client_secret_env,
            "Naver credentials not set; document counts will default to 1"
        );
    }
    let tool = &config.keyword_tool;
    if read_credential(&tool.api_key_env).is_none() || read_credential(&tool.customer_id_env).is_none() {
        warn!(
            key_env = %tool.api_key_env,
            customer_env = %tool.customer_id_env,
            "keyword tool credentials not set; volumes default to 0 and expansion yields nothing"
        );
    }

    let seeds = build_seed_providers(config);
    if seeds.is_empty() {
        warn!("no seed sources configured; add [[sources]] to the config file");
    }

    let keyword_tool = KeywordToolClient::from_config(config)?;
    let cpc = config
        .keyword_tool
        .cpc
        .then(|| Box::new(keyword_tool.clone()) as Box<dyn CpcProvider>);

    Ok(Providers {
        seeds,
        related: Box::new(keyword_tool.clone()),
        volume: Box::new(keyword_tool),
        documents: Box::new(NaverSearchClient::from_config(config)?),
        cpc,
    })
}

async fn cmd_run(config: AppConfig, out_dir: PathBuf) -> Result<()> {
    let pipeline_config = PipelineConfig::from(&config);

    info!(
        sources = config.sources.len(),
        expand = pipeline_config.expand,
        out = %out_dir.display(),
        "starting run"
    );

    // Providers use blocking HTTP clients; keep them off the async runtime.
    let (result, path) = tokio::task::spawn_blocking(move || -> Result<(RunResult, PathBuf)> {
        let providers = build_providers(&config)?;
        let reporter = CliProgress::new();
        let result = pipeline::run(&pipeline_config, &providers, &reporter);

        let doc = goldkey_report::build_document(&result.dataset);
        let path = goldkey_report::write_report(&out_dir, &doc)?;
        Ok((result, path))
    })
    .await
    .map_err(|e| eyre!("pipeline task failed: {e}"))??;

    print_run_summary(&result, &path);
    Ok(())
}

fn print_run_summary(result: &RunResult, path: &Path) {
    let summary = result.dataset.summary();

    println!();
    println!("  Keyword report written!");
    println!("  Keywords:   {} ({} seeds, {} related)", summary.total, result.seed_count, result.related_count);
    println!("  Diamond:    {}", summary.diamond);
    println!("  Gold:       {}", summary.gold);
    println!("  Silver:     {}", summary.silver);
    println!("  Normal:     {}", summary.normal);
    println!("  Blue ocean: {}", summary.blue_ocean);
    if let Some(top) = result.dataset.entries().first() {
        println!("  Top:        {} ({:.1}, {})", top.candidate.text, top.score, top.grade);
    }
    println!("  Path:       {}", path.display());
    println!("  Time:       {:.1}s", result.elapsed.as_secs_f64());
    println!();
}

fn cmd_score(volume: u64, documents: u64, clamp_score: bool) -> Result<()> {
    let (mut score, efficiency) = scoring::score(volume, documents);
    if clamp_score {
        score = score.min(100.0);
    }
    let grade = scoring::grade_for(score);

    println!("  Score:      {score:.1}");
    println!("  Efficiency: {efficiency:.2}");
    println!("  Grade:      {grade}");
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config file created at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
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
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn candidate_enriched(&self, keyword: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Fetching metrics [{current}/{total}] {keyword}"));
    }

    fn done(&self, _result: &RunResult) {
        self.spinner.finish_and_clear();
    }
}
