//! CMAP CLI - Command-line interface
//!
//! Usage:
//!   cmap build --text "..." [--document paper.pdf]
//!   cmap triples --text-file notes.txt
//!   cmap resolve --text "..."
//!   cmap rank --document paper.pdf

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use cmap_core::{AppConfig, LoggingConfig};
use cmap_pipeline::{ConceptMapPipeline, ConceptMapRequest};

#[derive(Parser)]
#[command(name = "cmap")]
#[command(about = "Concept map builder")]
#[command(version)]
struct Cli {
    /// TOML configuration file; environment overrides still apply
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct TextInput {
    /// Input text
    #[arg(long, conflicts_with = "text_file")]
    text: Option<String>,

    /// File containing the input text
    #[arg(long)]
    text_file: Option<PathBuf>,
}

impl TextInput {
    fn read(&self) -> anyhow::Result<Option<String>> {
        match (&self.text, &self.text_file) {
            (Some(text), _) => Ok(Some(text.clone())),
            (None, Some(path)) => std::fs::read_to_string(path)
                .map(Some)
                .with_context(|| format!("failed to read {}", path.display())),
            (None, None) => Ok(None),
        }
    }

    fn require(&self) -> anyhow::Result<String> {
        match self.read()? {
            Some(text) => Ok(text),
            None => bail!("either --text or --text-file is required"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build a positioned concept map graph
    Build {
        #[command(flatten)]
        input: TextInput,

        /// Supporting PDF used to keep only the most salient concepts
        #[arg(long)]
        document: Option<PathBuf>,

        /// Number of top-ranked concepts kept when a document is given
        #[arg(long)]
        top_n: Option<usize>,

        /// Layout seed for reproducible positions
        #[arg(long)]
        seed: Option<u64>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Extract concept triples from coreference-resolved text
    Triples {
        #[command(flatten)]
        input: TextInput,
    },
    /// Print the text with pronouns replaced by their antecedents
    Resolve {
        #[command(flatten)]
        input: TextInput,
    },
    /// Rank concepts against a PDF's token salience
    Rank {
        /// Supporting PDF
        #[arg(long)]
        document: PathBuf,

        #[command(flatten)]
        input: TextInput,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_file(path)?.with_env_override()?,
        None => AppConfig::from_env()?,
    };
    Ok(config)
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("cmap={}", logging.level).into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    init_tracing(&config.logging);

    match cli.command {
        Commands::Build {
            input,
            document,
            top_n,
            seed,
            pretty,
        } => {
            if let Some(top_n) = top_n {
                config.ranking.top_n = top_n;
            }
            if let Some(seed) = seed {
                config.layout.seed = Some(seed);
            }
            config.validate()?;

            let request = ConceptMapRequest {
                text: input.read()?.unwrap_or_default(),
                document,
            };
            debug!(has_document = request.document.is_some(), "Building concept map");

            let response = ConceptMapPipeline::new(config).build(&request)?;
            print_json(&response, pretty)?;
        }
        Commands::Triples { input } => {
            let pipeline = ConceptMapPipeline::new(config);
            let resolved = pipeline.resolve_coreferences(&input.require()?)?;
            let triples = pipeline.extract_concept_triples(&resolved)?;
            print_json(&triples, true)?;
        }
        Commands::Resolve { input } => {
            let pipeline = ConceptMapPipeline::new(config);
            println!("{}", pipeline.resolve_coreferences(&input.require()?)?);
        }
        Commands::Rank { document, input } => {
            let pipeline = ConceptMapPipeline::new(config);
            let ranked = match input.read()? {
                Some(text) => {
                    let document_text = pipeline.read_pdf_text(&document)?;
                    let token_scores = pipeline.rank_tokens(&document_text)?;
                    pipeline.rank_concepts(&text, &token_scores)?
                }
                None => pipeline.rank_document(&document)?,
            };
            print_json(&ranked, true)?;
        }
    }

    Ok(())
}
