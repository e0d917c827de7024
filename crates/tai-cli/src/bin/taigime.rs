use std::io::stdout;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use tai_core::{InputMode, OutputMode};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputModeArg {
    /// Multi-candidate composition
    Auto,
    /// Word-at-a-time composition
    Classic,
    /// Free typing
    Manual,
}

impl From<InputModeArg> for InputMode {
    fn from(arg: InputModeArg) -> Self {
        match arg {
            InputModeArg::Auto => InputMode::Continuous,
            InputModeArg::Classic => InputMode::Classic,
            InputModeArg::Manual => InputMode::Manual,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputModeArg {
    Lomaji,
    Hanji,
}

impl From<OutputModeArg> for OutputMode {
    fn from(arg: OutputModeArg) -> Self {
        match arg {
            OutputModeArg::Lomaji => OutputMode::LomajiFirst,
            OutputModeArg::Hanji => OutputMode::HanjiFirst,
        }
    }
}

/// Interactive demo of the Tâi-gí keystroke dispatch controller.
#[derive(Parser)]
#[command(name = "taigime")]
struct Args {
    /// Starting input mode
    #[arg(long, value_enum, default_value = "classic")]
    input_mode: InputModeArg,

    /// Starting output mode
    #[arg(long, value_enum, default_value = "lomaji")]
    output_mode: OutputModeArg,

    /// Custom settings TOML (defaults are embedded)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Directory for the JSON trace log (needs the `trace` feature)
    #[arg(long)]
    trace_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.settings {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        tai_core::settings::init_custom(content).context("invalid settings TOML")?;
    }

    if let Some(dir) = &args.trace_dir {
        tai_cli::trace_init::init_tracing(dir);
    }

    let mut out = stdout();
    tai_cli::app::run(&mut out, args.input_mode.into(), args.output_mode.into())
}
