use anyhow::{Context, Result, bail};
use checkbox_sync_config::Config;
use checkbox_sync_engine::sync::{parse_forest, snapshot, sync_text};
use checkbox_sync_engine::{SyncPipeline, io, line_edits};
use clap::{ArgAction, Parser, Subcommand};
use notify_debouncer_full::notify::RecursiveMode;
use notify_debouncer_full::{DebounceEventResult, new_debouncer};
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

mod snapshots;

#[derive(Parser)]
#[command(name = "checkbox-sync")]
#[command(version)]
#[command(about = "Keep nested markdown checkbox lists consistent")]
struct Cli {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to ~/.config/checkbox-sync/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Make every markdown file under the notes directory consistent
    Sync {
        /// Notes directory (defaults to notes_path from the config file)
        notes_path: Option<PathBuf>,

        /// Report what would change without writing any file
        #[arg(long)]
        dry_run: bool,
    },

    /// Sync once, then keep syncing every markdown file as it changes
    Watch {
        /// Notes directory (defaults to notes_path from the config file)
        notes_path: Option<PathBuf>,

        /// Milliseconds to wait for a burst of changes to settle
        #[arg(long, default_value_t = 200)]
        debounce_ms: u64,
    },

    /// Sync a single file, optionally against its previous version
    Apply {
        /// The edited file
        current: PathBuf,

        /// The file's content before the edit
        #[arg(short, long)]
        previous: Option<PathBuf>,

        /// Write the result back instead of printing it
        #[arg(short, long)]
        write: bool,
    },

    /// Print the checkbox tree of a file
    Inspect {
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let (config, config_path) = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Sync {
            notes_path,
            dry_run,
        } => {
            let notes_path = resolve_notes_path(notes_path, &config, &config_path)?;
            sync_notes(&config, &notes_path, dry_run)
        }
        Commands::Watch {
            notes_path,
            debounce_ms,
        } => {
            let notes_path = resolve_notes_path(notes_path, &config, &config_path)?;
            watch_notes(&config, &notes_path, Duration::from_millis(debounce_ms))
        }
        Commands::Apply {
            current,
            previous,
            write,
        } => apply_file(&config, &current, previous.as_deref(), write),
        Commands::Inspect { file } => inspect_file(&config, &file),
    }
}

/// Loads the config file, falling back to defaults when it does not exist.
fn load_config(explicit: Option<&Path>) -> Result<(Config, PathBuf)> {
    let config_path = explicit.map_or_else(Config::config_path, Path::to_path_buf);
    log::debug!("Config path: {}", config_path.display());

    let config = Config::load_from_path(&config_path)
        .with_context(|| format!("Failed to load config file {}", config_path.display()))?;

    match config {
        Some(config) => Ok((config, config_path)),
        None if explicit.is_some() => {
            bail!("Config file {} does not exist", config_path.display())
        }
        None => Ok((Config::default(), config_path)),
    }
}

fn resolve_notes_path(
    explicit: Option<PathBuf>,
    config: &Config,
    config_path: &Path,
) -> Result<PathBuf> {
    match explicit.or_else(|| config.notes_path.clone()) {
        Some(path) => Ok(path),
        None => bail!(
            "No notes path provided and none configured in {}",
            config_path.display()
        ),
    }
}

/// A pipeline seeded with the snapshots saved by earlier runs.
fn open_pipeline(config: &Config, notes_path: &Path) -> Result<SyncPipeline> {
    let settings = config.sync.to_settings()?;
    let filter = config.sync.path_filter()?;
    Ok(SyncPipeline::with_store(
        settings,
        filter,
        snapshots::load(notes_path)?,
    ))
}

fn sync_notes(config: &Config, notes_path: &Path, dry_run: bool) -> Result<()> {
    io::validate_notes_dir(notes_path)
        .with_context(|| format!("Notes path '{}' is invalid", notes_path.display()))?;

    let mut pipeline = open_pipeline(config, notes_path)?;
    let files = io::scan_markdown_files(notes_path)?;
    let mut updated = 0;

    for path in &files {
        if sync_file(&mut pipeline, notes_path, path, dry_run)? {
            updated += 1;
        }
    }

    if !dry_run {
        // Forget notes that were deleted since the last run
        pipeline.store_mut().retain(|path| {
            files
                .binary_search_by(|file| file.as_relative_path().cmp(path))
                .is_ok()
        });
        snapshots::save(notes_path, pipeline.store())?;
    }

    let verb = if dry_run { "would be updated" } else { "updated" };
    println!("{updated} of {} file(s) {verb}", files.len());
    Ok(())
}

/// Runs one note through the pipeline. Returns whether its text changed.
fn sync_file(
    pipeline: &mut SyncPipeline,
    notes_path: &Path,
    path: &RelativePath,
    dry_run: bool,
) -> Result<bool> {
    let content =
        io::read_file(path, notes_path).with_context(|| format!("Failed to read {path}"))?;
    let synced = pipeline.apply(&content, path);
    if synced == content {
        return Ok(false);
    }

    let changed_lines = line_edits(&content, &synced)?.len();
    println!("updated {path} ({changed_lines} lines)");
    if !dry_run {
        io::write_file(path, notes_path, &synced)
            .with_context(|| format!("Failed to write {path}"))?;
    }
    Ok(true)
}

fn watch_notes(config: &Config, notes_path: &Path, debounce: Duration) -> Result<()> {
    io::validate_notes_dir(notes_path)
        .with_context(|| format!("Notes path '{}' is invalid", notes_path.display()))?;
    // Watcher events carry canonical paths
    let notes_path = fs::canonicalize(notes_path)
        .with_context(|| format!("Failed to resolve {}", notes_path.display()))?;

    sync_notes(config, &notes_path, false)?;
    let mut pipeline = open_pipeline(config, &notes_path)?;

    let (tx, rx) = mpsc::channel();
    let mut debouncer = new_debouncer(debounce, None, move |result: DebounceEventResult| {
        match result {
            Ok(events) => {
                let paths: Vec<PathBuf> = events
                    .into_iter()
                    .flat_map(|event| event.event.paths)
                    .collect();
                if !paths.is_empty() && tx.send(paths).is_err() {
                    log::debug!("watch loop has stopped, dropping events");
                }
            }
            Err(errors) => {
                for error in errors {
                    log::warn!("watch error: {error}");
                }
            }
        }
    })?;
    debouncer.watch(&notes_path, RecursiveMode::Recursive)?;

    log::info!("watching {} (Ctrl+C to stop)", notes_path.display());

    for paths in rx {
        log::debug!("{} changed path(s)", paths.len());
        if let Err(err) = sync_changed(&mut pipeline, &notes_path, &paths) {
            log::error!("sync failed: {err:#}");
        }
    }

    Ok(())
}

/// Syncs the notes among `changed` and saves the snapshots. Paths outside
/// the notes directory, hidden paths and non-markdown files are skipped.
fn sync_changed(
    pipeline: &mut SyncPipeline,
    notes_path: &Path,
    changed: &[PathBuf],
) -> Result<usize> {
    let mut notes: Vec<RelativePathBuf> = changed
        .iter()
        .filter_map(|path| io::relative_to(notes_path, path).ok())
        .filter(|path| io::is_markdown_note(path))
        .collect();
    notes.sort();
    notes.dedup();
    if notes.is_empty() {
        return Ok(0);
    }

    let mut updated = 0;
    for note in &notes {
        if !note.to_path(notes_path).is_file() {
            log::debug!("{note} was removed");
            pipeline.store_mut().remove(note);
            continue;
        }
        if sync_file(pipeline, notes_path, note, false)? {
            updated += 1;
        }
    }

    snapshots::save(notes_path, pipeline.store())?;
    Ok(updated)
}

fn apply_file(config: &Config, current: &Path, previous: Option<&Path>, write: bool) -> Result<()> {
    let settings = config.sync.to_settings()?;
    let content = read(current)?;
    let previous = previous.map(read).transpose()?;

    let synced = sync_text(&content, previous.as_deref(), &settings);

    if write {
        if synced != content {
            fs::write(current, &synced)
                .with_context(|| format!("Failed to write {}", current.display()))?;
            log::info!("updated {}", current.display());
        }
    } else {
        print!("{synced}");
    }
    Ok(())
}

fn inspect_file(config: &Config, file: &Path) -> Result<()> {
    let settings = config.sync.to_settings()?;
    let content = read(file)?;
    println!("{}", snapshot::outline(&parse_forest(&content, &settings)));
    Ok(())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
