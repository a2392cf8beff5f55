#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod batch;
mod document;
mod error;
mod extract;
mod features;
mod inspect;
mod prelude;
mod settings;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Infer the title and H1/H2/H3 outline of PDF documents"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// TOML file with noise, scoring, title, and level thresholds
    #[clap(long, env = "DOCOUTLINE_CONFIG", global = true)]
    config: Option<std::path::PathBuf>,

    /// Heading classification strategy
    #[clap(
        long,
        env = "DOCOUTLINE_STRATEGY",
        global = true,
        value_enum,
        default_value_t = settings::Strategy::Heuristic
    )]
    strategy: settings::Strategy,

    /// Decision forest artifact used by the model strategy
    #[clap(
        long,
        env = "DOCOUTLINE_MODEL",
        global = true,
        default_value = "heading_classifier.json"
    )]
    model: std::path::PathBuf,

    /// Label decoder artifact used by the model strategy
    #[clap(
        long,
        env = "DOCOUTLINE_LABELS",
        global = true,
        default_value = "label_encoder.json"
    )]
    labels: std::path::PathBuf,

    /// Whether to display additional information.
    #[clap(long, env = "DOCOUTLINE_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Infer the outline of a single PDF
    Extract(crate::extract::Options),

    /// Infer the outline of every PDF in a directory
    Batch(crate::batch::Options),

    /// Show how each line of a PDF was classified
    Inspect(crate::inspect::Options),

    /// Write labeled feature rows for model fitting
    Features(crate::features::Options),
}

/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug` over `warn`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let app = App::parse();

    init_logging(app.global.verbose);
    color_eyre::install()?;

    match app.command {
        SubCommands::Extract(options) => crate::extract::run(options, app.global).await,
        SubCommands::Batch(options) => crate::batch::run(options, app.global).await,
        SubCommands::Inspect(options) => crate::inspect::run(options, app.global).await,
        SubCommands::Features(options) => crate::features::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
