//! Component Box CLI
//!
//! Reads a design-document export, classifies the selection and prints the
//! component box forest as JSON on stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Build the forest for the export's own selection
//! component-box build --file page.json
//!
//! # Override the selection, pretty-print, keep going past broken roots
//! cat page.json | component-box build --select 12:4 --select 12:9 --pretty --skip-failed-roots
//!
//! # Show how every node under the selection is classified
//! component-box classify --file page.json
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use component_box::emit::{self, EmitStyle};
use component_box::{BatchMode, PolicyOverrides, TreeWalker, UnmatchedComponent, WalkPolicy};
use scene_types::SceneDocument;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "component-box")]
#[command(version)]
#[command(about = "Classify design-document nodes into typed component box trees")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Walk policy file (YAML)
    #[arg(long, global = true, env = "COMPONENT_BOX_POLICY")]
    policy: Option<PathBuf>,

    /// Classification of components that match no rule
    #[arg(long, global = true, value_enum)]
    unmatched_component: Option<UnmatchedArg>,

    /// Maximum nesting depth to walk
    #[arg(long, global = true)]
    max_depth: Option<usize>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum UnmatchedArg {
    Unknown,
    Column,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the component box forest and print it as JSON
    Build {
        /// Export file (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Node id to use as a root instead of the export's selection (repeatable)
        #[arg(short, long = "select")]
        select: Vec<String>,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,

        /// Leave out roots that fail instead of aborting
        #[arg(long)]
        skip_failed_roots: bool,
    },

    /// Print the classification of every node under the selection
    Classify {
        /// Export file (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Node id to use as a root instead of the export's selection (repeatable)
        #[arg(short, long = "select")]
        select: Vec<String>,
    },
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,component_box=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let policy = load_policy(&cli)?;

    match cli.command {
        Commands::Build {
            file,
            select,
            pretty,
            skip_failed_roots,
        } => {
            let policy = policy.with_overrides(PolicyOverrides {
                batch_mode: skip_failed_roots.then_some(BatchMode::SkipFailedRoot),
                ..Default::default()
            });
            let style = if pretty {
                EmitStyle::Pretty
            } else {
                EmitStyle::Compact
            };
            cmd_build(file, &select, policy, style)
        }
        Commands::Classify { file, select } => cmd_classify(file, &select, policy),
    }
}

/// Policy file (or defaults), then global flags on top.
fn load_policy(cli: &Cli) -> Result<WalkPolicy> {
    let policy = match &cli.policy {
        Some(path) => WalkPolicy::from_yaml_file(path)
            .with_context(|| format!("loading policy {}", path.display()))?,
        None => WalkPolicy::default(),
    };

    let policy = policy.with_overrides(PolicyOverrides {
        unmatched_component: cli.unmatched_component.map(|arg| match arg {
            UnmatchedArg::Unknown => UnmatchedComponent::Unknown,
            UnmatchedArg::Column => UnmatchedComponent::Column,
        }),
        max_depth: cli.max_depth,
        ..Default::default()
    });

    tracing::debug!(?policy, "walk policy");
    Ok(policy)
}

fn load_document(file: Option<PathBuf>, select: &[String]) -> Result<SceneDocument> {
    let mut doc = match file {
        Some(path) => {
            let reader = BufReader::new(
                File::open(&path).with_context(|| format!("opening {}", path.display()))?,
            );
            SceneDocument::from_reader(reader)
                .with_context(|| format!("reading export {}", path.display()))?
        }
        None => {
            SceneDocument::from_reader(io::stdin().lock()).context("reading export from stdin")?
        }
    };

    if !select.is_empty() {
        doc.select(select)?;
    }

    tracing::info!(nodes = doc.len(), roots = doc.selection().len(), "loaded document");
    Ok(doc)
}

// =============================================================================
// COMMANDS
// =============================================================================

fn cmd_build(
    file: Option<PathBuf>,
    select: &[String],
    policy: WalkPolicy,
    style: EmitStyle,
) -> Result<()> {
    let doc = load_document(file, select)?;
    let walker = TreeWalker::new(policy);

    let forest = walker
        .build_forest(&doc.selection())
        .context("building component boxes (use --skip-failed-roots to leave out broken roots)")?;

    for failure in &forest.skipped {
        eprintln!("skipped: {}", failure);
    }

    emit::write_forest(io::stdout().lock(), &forest.boxes, style)?;

    if forest.all_roots_failed() {
        bail!("every selected root failed");
    }
    Ok(())
}

fn cmd_classify(file: Option<PathBuf>, select: &[String], policy: WalkPolicy) -> Result<()> {
    let doc = load_document(file, select)?;
    let walker = TreeWalker::new(policy);

    for root in doc.selection() {
        for entry in walker.outline(&root) {
            println!(
                "{}{} [{}] -> {}",
                "  ".repeat(entry.depth),
                entry.node_name,
                entry.node_kind,
                entry.component_type
            );
        }
    }
    Ok(())
}
