use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use formthinker_editor::{decode, encode, Decoded, Device};

#[derive(Debug, Args)]
pub struct CodecArgs {
    #[command(subcommand)]
    pub command: CodecCommand,
}

#[derive(Debug, Subcommand)]
pub enum CodecCommand {
    /// Join mobile, tablet and desktop values into one stored string
    Encode {
        mobile: String,
        tablet: String,
        desktop: String,
    },

    /// Split a stored string into its device segments
    Decode { raw: String },
}

pub fn codec(args: CodecArgs, _cwd: &str) -> Result<()> {
    match args.command {
        CodecCommand::Encode {
            mobile,
            tablet,
            desktop,
        } => {
            println!("{}", encode(&[mobile, tablet, desktop]));
        }
        CodecCommand::Decode { raw } => match decode(&raw) {
            Decoded::Uniform(value) => {
                println!("{} {}", "uniform:".dimmed(), value);
            }
            Decoded::Variants(segments) => {
                for device in Device::ALL {
                    println!(
                        "{:>8} {}",
                        format!("{}:", device).cyan(),
                        segments[device.index()]
                    );
                }
            }
        },
    }

    Ok(())
}
