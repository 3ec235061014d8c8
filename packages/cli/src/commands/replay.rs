use super::{display_value, load_document};
use crate::config::{self, TimingArgs};
use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use formthinker_common::{Path, Value};
use formthinker_editor::{Commit, Document, EditorConfig, Patch, UpdateScheduler};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Starting JSON document
    #[arg(long)]
    pub doc: PathBuf,

    /// Edit script: `[{ "atMs": 0, "path": "title", "value": "Hi" }, ...]`
    #[arg(long)]
    pub script: PathBuf,

    #[command(flatten)]
    pub timing: TimingArgs,
}

/// One widget `onChange` call at a point on the virtual clock
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptEntry {
    pub at_ms: u64,
    pub path: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub remove: bool,
}

/// Commit delivered at `at_ms` on the virtual clock
#[derive(Debug)]
pub struct TimedCommit {
    pub at_ms: u64,
    pub commit: Commit,
}

pub fn replay(args: ReplayArgs, cwd: &str) -> Result<()> {
    let config = config::load(cwd, &args.timing)?;
    let doc = load_document(&args.doc)?;

    let source = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Cannot read {}", args.script.display()))?;
    let script: Vec<ScriptEntry> = serde_json::from_str(&source)
        .with_context(|| format!("Invalid script in {}", args.script.display()))?;

    println!(
        "{} {} edits (debounce {}ms, throttle {}ms)",
        "▶".bright_blue(),
        script.len(),
        config.debounce_ms,
        config.throttle_ms
    );

    let commits = run_script(&config, &script)?;
    let mut current = doc;

    for (n, timed) in commits.iter().enumerate() {
        println!(
            "{} commit #{} at {}ms ({} updates)",
            "●".green(),
            n + 1,
            timed.at_ms,
            timed.commit.len()
        );
        for (path, patch) in timed.commit.updates() {
            match patch {
                Patch::Set(value) => println!("    set    {} = {}", path, display_value(value)),
                Patch::Delete => println!("    {} {}", "delete".red(), path),
            }
        }

        current = Document {
            root: timed.commit.apply(&current.root),
            version: current.version + 1,
        };
    }

    println!();
    println!("{}", current.to_json_pretty()?);
    Ok(())
}

/// Drive the scheduler over `script` on a virtual clock.
///
/// Entries must be in non-decreasing `atMs` order. Every pending update is
/// flushed after the last entry.
pub fn run_script(config: &EditorConfig, script: &[ScriptEntry]) -> Result<Vec<TimedCommit>> {
    let mut scheduler = UpdateScheduler::new(config);
    let start = Instant::now();
    let elapsed_ms =
        |at: Instant| u64::try_from(at.duration_since(start).as_millis()).unwrap_or(u64::MAX);

    let mut commits = Vec::new();
    let mut last_ms = 0;

    for entry in script {
        if entry.at_ms < last_ms {
            bail!(
                "Script entries must be in time order: {}ms comes after {}ms",
                entry.at_ms,
                last_ms
            );
        }
        last_ms = entry.at_ms;

        let Some(now) = start.checked_add(Duration::from_millis(entry.at_ms)) else {
            bail!("Script time {}ms is out of range", entry.at_ms);
        };
        drain_until(&mut scheduler, Some(now), |at, commit| {
            commits.push(TimedCommit {
                at_ms: elapsed_ms(at),
                commit,
            })
        });

        let path: Path = entry.path.parse()?;
        scheduler.schedule(
            path,
            Patch::from_change(entry.value.clone(), entry.remove),
            now,
        );
    }

    drain_until(&mut scheduler, None, |at, commit| {
        commits.push(TimedCommit {
            at_ms: elapsed_ms(at),
            commit,
        })
    });

    Ok(commits)
}

/// Step through scheduler deadlines up to `limit` (or until idle)
fn drain_until(
    scheduler: &mut UpdateScheduler,
    limit: Option<Instant>,
    mut deliver: impl FnMut(Instant, Commit),
) {
    while let Some(deadline) = scheduler.next_deadline() {
        if limit.is_some_and(|limit| deadline > limit) {
            break;
        }
        if let Some(commit) = scheduler.poll(deadline) {
            deliver(deadline, commit);
        }
    }
}
