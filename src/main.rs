//! Heterogeneity Charts CLI
//!
//! Renders the study's visualizations as Vega-Lite specs and HTML
//! fragments, ready to be embedded in the project page.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;
use std::time::Duration;

use heterogeneity_charts::commands::{
    display_questions, display_report, display_version, emit_chart, execute_build,
    list_questions, render_question, BuildArgs, SourceArgs, StyleArgs,
};
use heterogeneity_charts::utils::config::{
    DEFAULT_FETCH_TIMEOUT, DEFAULT_HIGHLIGHT, DOMAIN_FILE, QUESTIONS_FILE, VARIANCE_FILE,
};

/// Heterogeneity Charts - Vega-Lite charts for the Silicon Philosophers study
#[derive(Parser, Debug)]
#[command(name = "hetviz")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Where to load data from
#[derive(Args, Debug)]
struct SourceOpts {
    /// Directory or URL prefix holding the data files
    #[arg(short, long, env = "HETVIZ_ASSETS", default_value = "assets")]
    assets: String,

    /// Questions JSON file name
    #[arg(long, default_value = QUESTIONS_FILE)]
    questions_file: String,

    /// Per-question variance CSV file name
    #[arg(long, default_value = VARIANCE_FILE)]
    variance_file: String,

    /// Domain heterogeneity CSV file name
    #[arg(long, default_value = DOMAIN_FILE)]
    domain_file: String,

    /// Fetch timeout in seconds
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT.as_secs())]
    timeout: u64,

    /// Do not add a timestamp parameter to HTTP requests
    #[arg(long)]
    no_cache_bust: bool,
}

impl From<SourceOpts> for SourceArgs {
    fn from(opts: SourceOpts) -> Self {
        Self {
            assets: opts.assets,
            questions_file: opts.questions_file,
            variance_file: opts.variance_file,
            domain_file: opts.domain_file,
            timeout: Duration::from_secs(opts.timeout),
            cache_bust: !opts.no_cache_bust,
        }
    }
}

/// How charts look
#[derive(Args, Debug)]
struct StyleOpts {
    /// Source display order (comma separated); defaults to the study's order
    #[arg(long, value_delimiter = ',')]
    order: Vec<String>,

    /// Labels drawn in the highlight color (comma separated)
    #[arg(long, value_delimiter = ',', default_value = DEFAULT_HIGHLIGHT)]
    highlight: Vec<String>,

    /// Clamp values outside the fixed axis domains
    #[arg(long)]
    clamp: bool,
}

impl From<StyleOpts> for StyleArgs {
    fn from(opts: StyleOpts) -> Self {
        Self {
            order: opts.order,
            highlight: opts.highlight,
            clamp: opts.clamp,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render every visualization into an output directory
    Build {
        #[command(flatten)]
        sources: SourceOpts,

        #[command(flatten)]
        style: StyleOpts,

        /// Output directory for specs and HTML fragments
        #[arg(short, long, default_value = "charts")]
        output: PathBuf,

        /// Question shown initially (defaults to the first one)
        #[arg(short, long)]
        question: Option<String>,

        /// Also write a standalone index.html
        #[arg(long)]
        page: bool,
    },

    /// List the questions offered by the selection control
    Questions {
        #[command(flatten)]
        sources: SourceOpts,
    },

    /// Render the distribution chart of one question
    Question {
        /// Question key (e.g. Q0)
        key: String,

        #[command(flatten)]
        sources: SourceOpts,

        #[command(flatten)]
        style: StyleOpts,

        /// Write the spec here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Build {
            sources,
            style,
            output,
            question,
            page,
        } => {
            let args = BuildArgs {
                sources: sources.into(),
                style: style.into(),
                output_dir: output,
                question,
                page,
                ..Default::default()
            };

            let report = execute_build(args).await?;
            display_report(&report);
        }

        Commands::Questions { sources } => {
            let control = list_questions(&sources.into()).await?;
            display_questions(&control);
            if control.is_error() {
                anyhow::bail!("Questions could not be loaded");
            }
        }

        Commands::Question {
            key,
            sources,
            style,
            output,
        } => {
            let chart = render_question(&sources.into(), &style.into(), &key).await?;
            emit_chart(&chart, output.as_deref())?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
