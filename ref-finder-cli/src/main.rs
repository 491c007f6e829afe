//! Reference Finder CLI Application
//!
//! This is the command-line host for the ref-finder-core library. It loads a
//! project snapshot, picks the target object, runs the search and prints the
//! references found in each scene and in the project assets.

use anyhow::{bail, Context, Result};
use clap::Parser;
use ref_finder_core::{Handle, NullTargetPolicy, SearchScope, SnapshotStore};
use std::fs;
use std::path::PathBuf;

mod config;
mod report;

use config::{AppConfig, OutputFormat};

/// Reference Finder - Find every object that references a target object
#[derive(Parser, Debug)]
#[command(name = "ref-finder")]
#[command(about = "Find objects, prefabs and assets referencing a target object", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the project snapshot (JSON)
    #[arg(short, long, value_name = "FILE")]
    project: PathBuf,

    /// Id of the target object
    #[arg(short, long, value_name = "ID", conflicts_with = "target_name")]
    target: Option<u64>,

    /// Name of the target object (must be unique in the project)
    #[arg(long, value_name = "NAME")]
    target_name: Option<String>,

    /// Search scope (game-object, scriptable-object, any); inferred from the target if omitted
    #[arg(short, long, value_name = "SCOPE")]
    scope: Option<SearchScope>,

    /// Let an empty target match empty reference slots
    #[arg(long)]
    match_empty_slots: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file for the report (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to configuration file (ref-finder.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Reference Finder CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using ref-finder-core v{}", ref_finder_core::VERSION);

    let config = resolve_config(&args)?;

    let store = SnapshotStore::load(&args.project)
        .with_context(|| format!("Failed to load project snapshot: {:?}", args.project))?;
    log::info!("Loaded {} objects from {:?}", store.len(), args.project);

    let target = resolve_target(&store, &args)?;
    let outcome = ref_finder_core::search(&store, target, &config.search)?;

    let report = report::Report::from_outcome(&outcome, chrono::Utc::now());
    let rendered = match config.output.format {
        OutputFormat::Txt => report::render_txt(&report)?,
        OutputFormat::Json => report::render_json(&report)?,
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write report: {:?}", path))?;
            log::info!("Report written to {:?}", path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Merge the optional config file with command-line overrides
fn resolve_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    if let Some(scope) = args.scope {
        config.search.scope = Some(scope);
    }
    if args.match_empty_slots {
        config.search.null_target = NullTargetPolicy::MatchEmptySlots;
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }
    Ok(config)
}

/// Pick the target handle from `--target` or `--target-name`
fn resolve_target(store: &SnapshotStore, args: &Args) -> Result<Option<Handle>> {
    if let Some(id) = args.target {
        return Ok(Some(Handle::new(id)));
    }

    let Some(name) = &args.target_name else {
        log::warn!("No target given, searching for empty references");
        return Ok(None);
    };

    let found = store.find_by_name(name);
    match found.as_slice() {
        [] => bail!("No object named '{}' in project", name),
        [only] => Ok(Some(only.handle)),
        many => {
            let ids: Vec<String> = many.iter().map(|s| s.handle.to_string()).collect();
            bail!(
                "Object name '{}' is ambiguous ({}), use --target <ID>",
                name,
                ids.join(", ")
            )
        }
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT: &str = r#"{
        "assets": [
            { "id": 1, "name": "Shared" },
            { "id": 2, "name": "Shared" },
            { "id": 3, "name": "Unique" }
        ]
    }"#;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["ref-finder", "--project", "project.json"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_target_by_name() {
        let store = SnapshotStore::from_json(PROJECT).unwrap();

        let target = resolve_target(&store, &args(&["--target-name", "Unique"])).unwrap();
        assert_eq!(target, Some(Handle::new(3)));

        let err = resolve_target(&store, &args(&["--target-name", "Shared"])).unwrap_err();
        assert!(err.to_string().contains("ambiguous"));

        assert!(resolve_target(&store, &args(&["--target-name", "Nope"])).is_err());
        assert_eq!(resolve_target(&store, &args(&[])).unwrap(), None);
    }

    #[test]
    fn test_flags_override_config() {
        let config = resolve_config(&args(&[
            "--scope",
            "scriptable-object",
            "--match-empty-slots",
            "--format",
            "json",
        ]))
        .unwrap();

        assert_eq!(config.search.scope, Some(SearchScope::ScriptableObject));
        assert_eq!(config.search.null_target, NullTargetPolicy::MatchEmptySlots);
        assert_eq!(config.output.format, OutputFormat::Json);
    }
}
