/// Shredder console front end
///
/// Acts as the polling presentation layer: starts the scan, asks for
/// confirmation, starts the deletion, redraws a status line every refresh and
/// routes Skip/Terminate decisions typed on stdin back into the engine.
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process::exit;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::{error, info};

use shredder::config::{load_config, load_config_from};
use shredder::utils::{lock_registry, process_name};
use shredder::{Config, ConflictAction, LockConflict, Progress, RunSummary, Shredder};

const REFRESH: Duration = Duration::from_millis(100);
const STATUS_WIDTH: usize = 72;

const EXIT_SUCCESS: i32 = 0;
const EXIT_LEFT_BEHIND: i32 = 1;
const EXIT_CANCELLED: i32 = 2;
const EXIT_USAGE: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ConflictPolicy {
    /// Prompt for every conflict
    Ask,
    /// Leave locked paths in place
    Skip,
    /// Kill whatever holds a locked path
    Terminate,
}

#[derive(Parser, Debug)]
#[command(
    name = "shredder",
    version,
    about = "Overwrite and delete files, resolving locks held by other processes"
)]
struct Cli {
    /// Files and directories to destroy
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Config file (default: <executable>.config)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<String>,

    /// What to do when a path is held open by another process
    #[arg(long, value_enum, default_value_t = ConflictPolicy::Ask)]
    on_conflict: ConflictPolicy,

    /// Do not ask for confirmation before deleting
    #[arg(short, long)]
    yes: bool,
}

fn main() {
    let cli = Cli::parse();
    exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    let config = match load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            return EXIT_USAGE;
        }
    };
    init_logging(&config);

    info!(
        "🚀 shredder starting... PID={} lock registry: {}",
        std::process::id(),
        lock_registry().name()
    );

    let shredder = Shredder::new(config);
    let progress = shredder.progress();
    let input = spawn_input_reader();

    let scan = match shredder.begin_enumeration(cli.paths) {
        Ok(scan) => scan,
        Err(e) => {
            error!("❌ {}", e);
            return EXIT_USAGE;
        }
    };

    while !scan.is_finished() {
        drain_input(&input, &progress);
        render_status("scanning", progress.latest_scanned().as_deref(), None);
        thread::sleep(REFRESH);
    }
    clear_status();

    let batch = match scan.join() {
        Ok(batch) => batch,
        Err(e) => {
            error!("❌ {}", e);
            return EXIT_USAGE;
        }
    };

    if progress.is_cancelled() {
        eprintln!("🛑 Cancelled");
        return EXIT_CANCELLED;
    }

    if batch.is_empty() {
        eprintln!("Nothing to delete");
        return EXIT_SUCCESS;
    }

    eprintln!(
        "⚠️  {} files and {} directories will be overwritten and deleted. This cannot be undone.",
        batch.files().count(),
        batch.directories().count()
    );

    if !cli.yes && !confirm(&input) {
        eprintln!("Aborted");
        return EXIT_CANCELLED;
    }

    let deletion = match shredder.begin_deletion(batch) {
        Ok(deletion) => deletion,
        Err(e) => {
            error!("❌ {}", e);
            return EXIT_USAGE;
        }
    };

    match cli.on_conflict {
        ConflictPolicy::Skip => progress.set_decision(ConflictAction::Skip, true),
        ConflictPolicy::Terminate => progress.set_decision(ConflictAction::Terminate, true),
        ConflictPolicy::Ask => {}
    }

    eprintln!("Type s / t (append ! to remember) when asked, q to cancel");

    let mut prompted: Option<u64> = None;
    while !deletion.is_finished() {
        drain_input(&input, &progress);

        if progress.conflict_pending() && !progress.remember() {
            if let Some((serial, conflict)) = unanswered_conflict(&progress, prompted) {
                clear_status();
                prompt_conflict(&conflict);
                prompted = Some(serial);
            }
        } else {
            render_status(
                "deleting",
                progress.latest_deleted().as_deref(),
                Some(progress.ratio()),
            );
        }

        thread::sleep(REFRESH);
    }
    clear_status();

    match deletion.join() {
        Ok(summary) => {
            print_summary(&summary);
            if summary.cancelled {
                EXIT_CANCELLED
            } else if summary.all_removed() {
                EXIT_SUCCESS
            } else {
                EXIT_LEFT_BEHIND
            }
        }
        Err(e) => {
            error!("❌ {}", e);
            EXIT_LEFT_BEHIND
        }
    }
}

fn load(cli: &Cli) -> shredder::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    if let Some(level) = &cli.log_level {
        config.log_level = level.to_lowercase();
        config.validate()?;
    }

    Ok(config)
}

fn init_logging(config: &Config) {
    let mut builder = env_logger::Builder::new();
    match config.log_filter() {
        Some(filter) => builder.parse_filters(filter),
        None => builder.filter_level(log::LevelFilter::Off),
    };
    // RUST_LOG, when set, takes precedence
    builder.parse_env(env_logger::Env::default());
    let _ = builder.try_init();
}

/// Forward stdin lines to the polling loop
fn spawn_input_reader() -> Receiver<String> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if sender.send(line).is_err() {
                break;
            }
        }
    });
    receiver
}

fn confirm(input: &Receiver<String>) -> bool {
    eprint!("Continue? [y/N] ");
    match input.recv() {
        Ok(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

/// Apply every line typed since the last refresh
fn drain_input(input: &Receiver<String>, progress: &Progress) {
    loop {
        let line = match input.try_recv() {
            Ok(line) => line,
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return,
        };

        let line = line.trim();
        if matches!(line, "q" | "quit" | "cancel") {
            eprintln!("🛑 Cancelling...");
            progress.cancel();
            continue;
        }

        if !progress.conflict_pending() {
            continue;
        }

        match parse_decision(line) {
            Some((action, remember)) => progress.set_decision(action, remember),
            None if !line.is_empty() => eprintln!("Unknown choice {:?}", line),
            None => {}
        }
    }
}

/// "s", "t", "skip", "terminate"; a trailing "!" means remember
fn parse_decision(line: &str) -> Option<(ConflictAction, bool)> {
    let line = line.trim();
    let (word, remember) = match line.strip_suffix('!') {
        Some(word) => (word, true),
        None => (line, false),
    };
    ConflictAction::from_str(word).map(|action| (action, remember))
}

/// The pending conflict, unless it is the one already asked about
fn unanswered_conflict(progress: &Progress, prompted: Option<u64>) -> Option<(u64, LockConflict)> {
    progress
        .pending_conflict()
        .filter(|(serial, _)| prompted != Some(*serial))
}

fn prompt_conflict(conflict: &LockConflict) {
    eprintln!("🔒 {} could not be deleted", conflict.path.display());
    if conflict.blocking.is_empty() {
        eprintln!("   no owning process found");
    }
    for &pid in &conflict.blocking {
        let name = process_name(pid).unwrap_or_else(|| "?".to_string());
        eprintln!("   held by PID {} ({})", pid, name);
    }
    eprintln!("   [s]kip or [t]erminate? (append ! to remember)");
}

fn render_status(label: &str, path: Option<&Path>, ratio: Option<f32>) {
    let text = path
        .map(|path| truncate_middle(&path.display().to_string(), STATUS_WIDTH))
        .unwrap_or_default();

    match ratio {
        Some(ratio) => eprint!(
            "\r[{:>3.0}%] {} {:<width$}",
            ratio * 100.0,
            label,
            text,
            width = STATUS_WIDTH
        ),
        None => eprint!("\r{} {:<width$}", label, text, width = STATUS_WIDTH),
    }
}

fn clear_status() {
    eprint!("\r{}\r", " ".repeat(STATUS_WIDTH + 16));
}

fn print_summary(summary: &RunSummary) {
    let elapsed = summary.finished_at - summary.started_at;
    let status = if summary.cancelled {
        "🛑 Cancelled"
    } else if summary.all_removed() {
        "✅ Done"
    } else {
        "⚠️  Finished with leftovers"
    };

    eprintln!(
        "{} ({}): {} removed, {} skipped, {} failed, {} already gone in {:.1}s",
        status,
        summary.started_at.format("%Y-%m-%d %H:%M:%S"),
        summary.completed,
        summary.skipped,
        summary.failed,
        summary.missing,
        elapsed.num_milliseconds() as f64 / 1000.0
    );
}

/// Shorten `text` to at most `max` characters by cutting out the middle
fn truncate_middle(text: &str, max: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return chars[..max].iter().collect();
    }

    let keep = max - 3;
    let head = keep.div_ceil(2);
    let tail = keep / 2;

    let mut out: String = chars[..head].iter().collect();
    out.push_str("...");
    out.extend(&chars[chars.len() - tail..]);
    out
}
