use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use strum::IntoEnumIterator;

use crate::analysis::{contended_locks, group_by_stack, status_histogram};
use crate::loader::{discover_dumps, load_dumps, read_dump_file};
use crate::models::{ThreadDump, ThreadStatus};
use crate::utils::get_dump_dir;

#[derive(Parser)]
#[command(name = "thread-dump-analyzer")]
#[command(version = "0.1.0")]
#[command(about = "Inspect JVM thread dumps: threads, locks and who waits on whom", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a summary of one dump
    Summary {
        file: PathBuf,
        /// Print the whole parsed dump as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// List threads in dump order
    Threads {
        file: PathBuf,
        /// Only threads with this status (e.g. BLOCKED, TIMED_WAITING)
        #[arg(long, value_parser = parse_status)]
        status: Option<ThreadStatus>,
    },
    /// Show locks that threads are waiting on
    Locks { file: PathBuf },
    /// Group threads with identical stacks
    Groups {
        file: PathBuf,
        /// Hide groups smaller than this
        #[arg(long, default_value_t = 1)]
        min: usize,
    },
    /// Summarize every dump in a directory (default: $THREAD_DUMP_DIR or the current directory)
    Scan { dir: Option<PathBuf> },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Some(Commands::Summary { file, json }) => show_summary(file, *json)?,
        Some(Commands::Threads { file, status }) => show_threads(file, *status)?,
        Some(Commands::Locks { file }) => show_locks(file)?,
        Some(Commands::Groups { file, min }) => show_groups(file, *min)?,
        Some(Commands::Scan { dir }) => scan(dir.clone())?,
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn show_summary(file: &Path, json: bool) -> Result<()> {
    let dump = read_dump_file(file)?;

    if json {
        let out = serde_json::to_string_pretty(&dump).context("Failed to serialize dump")?;
        println!("{}", out);
        return Ok(());
    }

    println!("Thread Dump Summary");
    println!("===================");
    println!("File: {}", file.display());
    if let Some(captured) = dump.captured_at {
        println!("Captured: {}", captured.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(jvm) = &dump.jvm_info {
        println!("JVM: {}", jvm);
    }
    println!("Threads: {}", dump.threads.len());
    for (status, count) in status_histogram(&dump) {
        println!("  {}: {}", status, count);
    }
    println!("Locks: {}", dump.locks.len());
    println!("Contended locks: {}", contended_locks(&dump).len());
    if dump.stats.unrecognized_lines > 0 || dump.stats.unknown_verbs > 0 {
        println!(
            "Skipped: {} unrecognized lines, {} unknown lock verbs",
            dump.stats.unrecognized_lines, dump.stats.unknown_verbs
        );
    }

    Ok(())
}

/// Case-insensitive exact status name; `-` may stand in for `_`
fn parse_status(raw: &str) -> std::result::Result<ThreadStatus, String> {
    ThreadStatus::from_str(&raw.to_ascii_uppercase().replace('-', "_")).map_err(|_| {
        let names: Vec<_> = ThreadStatus::iter().map(|s| s.to_string()).collect();
        format!("unknown thread status '{}' (expected one of: {})", raw, names.join(", "))
    })
}

fn show_threads(file: &Path, status: Option<ThreadStatus>) -> Result<()> {
    let dump = read_dump_file(file)?;

    for thread in dump.threads.iter().filter(|t| status.is_none_or(|s| t.status == s)) {
        let nid = thread.nid.map(|n| format!("0x{:x}", n)).unwrap_or_else(|| "-".to_string());
        let mut line = format!("{:<14} {:>8}  {}", thread.status.as_ref(), nid, thread.name);
        if let Some(lock) = thread.waiting_on {
            let lock = dump.lock(lock);
            line.push_str(&format!("  waiting on <{}> ({})", lock.id, lock.class_name));
        }
        if !thread.held_locks.is_empty() {
            line.push_str(&format!("  holds {}", thread.held_locks.len()));
        }
        println!("{}", line);
    }

    Ok(())
}

fn show_locks(file: &Path) -> Result<()> {
    let dump = read_dump_file(file)?;
    let report = contended_locks(&dump);

    if report.is_empty() {
        println!("No contended locks");
        return Ok(());
    }

    for entry in report {
        println!("<{}> ({})", entry.id, entry.class_name);
        println!("  owner: {}", entry.owner.unwrap_or("none"));
        println!("  waiters ({}): {}", entry.waiters.len(), entry.waiters.join(", "));
    }

    Ok(())
}

fn show_groups(file: &Path, min: usize) -> Result<()> {
    let dump = read_dump_file(file)?;

    for group in group_by_stack(&dump).iter().filter(|g| g.len() >= min) {
        let top = group.frames.first().map(String::as_str).unwrap_or("<no frames>");
        println!("{} thread(s) at {}", group.len(), top);
        for &thread in &group.threads {
            println!("  {}", dump.thread(thread).name);
        }
    }

    Ok(())
}

fn scan(dir: Option<PathBuf>) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => get_dump_dir()?,
    };
    let paths = discover_dumps(&dir)?;
    let mut loaded: Vec<(PathBuf, ThreadDump)> = Vec::new();
    let mut failed = 0;

    for (path, result) in load_dumps(&paths) {
        match result {
            Ok(dump) => loaded.push((path, dump)),
            Err(e) => {
                log::warn!("Failed to load {}: {:#}", path.display(), e);
                failed += 1;
            }
        }
    }

    // Undated dumps sort first, then by capture time; path breaks ties
    loaded.sort_by(|(pa, a), (pb, b)| a.captured_at.cmp(&b.captured_at).then_with(|| pa.cmp(pb)));

    println!("Scanned {} dump(s) in {}", loaded.len(), dir.display());
    for (path, dump) in &loaded {
        let captured = dump
            .captured_at
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        let blocked = dump.threads_with_status(ThreadStatus::Blocked).count();
        println!(
            "{}  {}  threads={} blocked={} contended={}",
            captured,
            path.display(),
            dump.threads.len(),
            blocked,
            contended_locks(dump).len()
        );
    }
    if failed > 0 {
        println!("Failed: {}", failed);
    }

    Ok(())
}
