//! Command-line interface for implfix.

use clap::Parser;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::bootstrap;
use crate::config::{self, FixerConfig};
use crate::context::FixContext;
use crate::detect::Runner;
use crate::report::{self, RunReport};
use crate::synth::Fixer;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "IMPLFIX_LOG";

/// Repair gaps between Unreal plugin headers and their implementation files.
///
/// Scans every implementation file under the project's source folder, finds methods
/// that are declared but never defined (interface contracts, RPCs, native
/// overrides), framework types used without their include, and members
/// reported as undeclared by pasted compiler errors. Each gap is fixed by
/// appending a stub, inserting an include or declaring a member.
#[derive(Parser, Debug)]
#[command(name = "implfix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Plugin or project root containing the source folder
    pub project_dir: PathBuf,

    /// Path to config YAML file (default: auto-discover in the project root)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Report issues without writing anything (exit 1 if any are found)
    #[arg(long)]
    pub check: bool,

    /// Do not create the shared-types header
    #[arg(long)]
    pub no_bootstrap: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log debug detail
    #[arg(short, long)]
    pub verbose: bool,
}

/// Install the global tracing subscriber, writing to stderr.
///
/// `IMPLFIX_LOG` takes precedence over the level chosen by the flags.
pub fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Collect every implementation file under the source folder, sorted.
///
/// Files outside a discovered module are included; they can still pair
/// with a header through the tree search.
pub fn collect_implementation_files(ctx: &FixContext) -> anyhow::Result<Vec<PathBuf>> {
    let layout = &ctx.layout;
    if !layout.source_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&layout.source_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            // Skip hidden directories
            !(e.file_type().is_dir() && e.depth() > 0 && is_hidden(e.path()))
        })
    {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || !layout.is_implementation(path) {
            continue;
        }

        let relative = path.strip_prefix(&layout.project_root).unwrap_or(path);
        if ctx.config.is_path_excluded(relative) {
            tracing::debug!("Skipping excluded file {}", relative.display());
            continue;
        }
        files.push(path.to_path_buf());
    }

    Ok(files)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// Run a full detect-and-fix pass.
pub fn run_fix(cli: &Cli) -> anyhow::Result<i32> {
    if cli.format != "pretty" && cli.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            cli.format
        );
        return Ok(EXIT_ERROR);
    }

    let root = match cli.project_dir.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", cli.project_dir, e);
            return Ok(EXIT_ERROR);
        }
    };
    if !root.is_dir() {
        eprintln!("Error: {} is not a directory", root.display());
        return Ok(EXIT_ERROR);
    }

    let config = match FixerConfig::load(&root, cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    if let Err(e) = config::validate(&config) {
        eprintln!("Error: invalid config: {}", e);
        return Ok(EXIT_ERROR);
    }

    let ctx = FixContext::build(&root, config)?;

    let bootstrap_created = if cli.check || cli.no_bootstrap || !ctx.config.bootstrap.enabled {
        None
    } else {
        bootstrap::ensure_shared_types(&ctx.layout, &ctx.config.bootstrap)?
    };

    let files = collect_implementation_files(&ctx)?;
    if files.is_empty() {
        tracing::warn!("no implementation files to scan");
    }

    let result = Runner::new(&ctx).run(&files)?;

    let fixes = if cli.check {
        None
    } else if result.is_empty() {
        Some(Default::default())
    } else {
        Some(Fixer::new(&ctx).apply(&result)?)
    };

    let summary = RunReport::new(&ctx, &result, fixes.as_ref(), bootstrap_created.as_deref());

    match cli.format.as_str() {
        "json" => report::write_json(&summary)?,
        _ => report::write_pretty(&summary),
    }

    if cli.check && !result.is_empty() {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}
