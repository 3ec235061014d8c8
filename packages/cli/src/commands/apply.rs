use super::{load_document, parse_value};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use formthinker_editor::Patch;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// JSON document to edit
    #[arg(long)]
    pub doc: PathBuf,

    /// Dotted key path (e.g. `theme.color`, `slides.0.title`)
    #[arg(long)]
    pub path: String,

    /// Value to set, as JSON (bare text is taken as a string)
    #[arg(long, conflicts_with = "delete", required_unless_present = "delete")]
    pub value: Option<String>,

    /// Delete the path instead of setting it
    #[arg(long)]
    pub delete: bool,

    /// Write the result back to the document file
    #[arg(short, long)]
    pub write: bool,
}

pub fn apply(args: ApplyArgs, _cwd: &str) -> Result<()> {
    let doc = load_document(&args.doc)?;

    let patch = match &args.value {
        Some(raw) if !args.delete => Patch::Set(parse_value(raw)),
        _ => Patch::Delete,
    };

    let next = doc.apply_at(&args.path, &patch)?;
    let output = next.to_json_pretty()?;

    if args.write {
        std::fs::write(&args.doc, format!("{}\n", output))?;
        eprintln!(
            "{} {} {} → {}",
            "✓".green(),
            patch.name(),
            args.path,
            args.doc.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}
