use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use formthinker_schema::{FieldKind, Schema};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct FieldsArgs {
    /// Form schema (JSON with top-level `properties`)
    #[arg(long)]
    pub schema: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn fields(args: FieldsArgs, _cwd: &str) -> Result<()> {
    let source = std::fs::read_to_string(&args.schema)
        .with_context(|| format!("Cannot read {}", args.schema.display()))?;
    let schema = Schema::from_json(&source)?;
    let slots = schema.fields();

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&slots)?);
        return Ok(());
    }

    let width = slots
        .iter()
        .map(|slot| slot.path.to_string().len())
        .max()
        .unwrap_or(0);

    for slot in &slots {
        let kind = match &slot.kind {
            FieldKind::Error { description } => {
                format!("{} ({})", slot.kind.name(), description).red()
            }
            FieldKind::Unknown { type_name } => {
                format!("{} ({:?})", slot.kind.name(), type_name).yellow()
            }
            FieldKind::Range { min, max, step } => {
                format!("{} [{}..{} step {}]", slot.kind.name(), min, max, step).normal()
            }
            FieldKind::Options { choices }
            | FieldKind::MultiCheckbox { choices }
            | FieldKind::Select { choices } => {
                format!("{} {:?}", slot.kind.name(), choices).normal()
            }
            other => other.name().normal(),
        };

        let devices = if slot.viewport_support {
            " (per device)".dimmed().to_string()
        } else {
            String::new()
        };

        println!(
            "  {:<width$}  {}{}",
            slot.path.to_string().bold(),
            kind,
            devices,
            width = width
        );
    }

    println!();
    println!("{} {} fields", "✓".green(), slots.len());
    Ok(())
}
