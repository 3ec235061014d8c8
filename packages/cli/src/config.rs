use clap::Args;
use formthinker_editor::EditorConfig;
use std::path::Path;

/// Scheduler timing overrides shared by commands that drive the scheduler
#[derive(Args, Debug, Clone, Default)]
pub struct TimingArgs {
    /// Quiet window per path, in milliseconds (overrides config)
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Minimum spacing between commits, in milliseconds (overrides config)
    #[arg(long)]
    pub throttle_ms: Option<u64>,
}

/// Load `formthinker.config.json` from `cwd`, then apply command-line overrides
pub fn load(cwd: &str, overrides: &TimingArgs) -> anyhow::Result<EditorConfig> {
    let mut config = EditorConfig::load(Path::new(cwd))?;

    if let Some(ms) = overrides.debounce_ms {
        config.debounce_ms = ms;
    }
    if let Some(ms) = overrides.throttle_ms {
        config.throttle_ms = ms;
    }

    tracing::debug!(
        debounce_ms = config.debounce_ms,
        throttle_ms = config.throttle_ms,
        "loaded editor config"
    );
    Ok(config)
}
