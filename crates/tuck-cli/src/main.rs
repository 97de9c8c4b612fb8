use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use console::style;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tuck_config::Config;
use tuck_engine::{Mode, Options, Position, apply_edits, process_with};

mod output;

const STDIN: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Wrap,
    Unwrap,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Wrap => Mode::Wrap,
            ModeArg::Unwrap => Mode::Unwrap,
        }
    }
}

/// Wrap the python statement at a given position within a text document.
///
/// The target file is never modified; the result goes to stdout.
#[derive(Debug, Parser)]
#[command(name = "tuck", version)]
struct Cli {
    /// The file to read from. Use '-' to read from STDIN.
    #[arg(required_unless_present = "save_config")]
    file: Option<PathBuf>,

    /// The positions within the file to wrap at, as LINE:COL with 1-based
    /// lines and 0-based columns. Positions must lead to edits that do not
    /// overlap.
    #[arg(
        long,
        num_args = 1..,
        value_parser = parse_position,
        required_unless_present = "save_config"
    )]
    positions: Vec<Position>,

    #[arg(long, value_enum, default_value_t = ModeArg::Wrap)]
    mode: ModeArg,

    /// Print the changes as a unified diff rather than the new content.
    #[arg(long, conflicts_with = "edits")]
    diff: bool,

    /// Print the changes as language-server-protocol compatible edits
    /// rather than the new content.
    #[arg(long)]
    edits: bool,

    /// Spaces per indent level, overriding any config file.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..))]
    indent_width: Option<u8>,

    /// Read settings from this file instead of searching for one.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings to the user config file and exit.
    #[arg(long)]
    save_config: bool,
}

fn parse_position(value: &str) -> Result<Position, String> {
    let (line, col) = value
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:COL, got '{value}'"))?;
    let line: usize = line
        .parse()
        .map_err(|e| format!("invalid line '{line}': {e}"))?;
    let col: usize = col
        .parse()
        .map_err(|e| format!("invalid column '{col}': {e}"))?;
    if line == 0 {
        return Err("line numbers start at 1".to_string());
    }
    Ok(Position::new(line, col))
}

impl Cli {
    fn reads_stdin(&self) -> bool {
        self.file.as_deref() == Some(Path::new(STDIN))
    }

    /// Where to start looking for a project config.
    fn search_dir(&self) -> Result<PathBuf> {
        match self.file.as_deref().and_then(Path::parent) {
            Some(parent) if !self.reads_stdin() && !parent.as_os_str().is_empty() => {
                Ok(parent.to_path_buf())
            }
            _ => std::env::current_dir().context("Failed to determine the current directory"),
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => match Config::load_from_path(path)? {
            Some(config) => config,
            None => bail!("Config file not found: {}", path.display()),
        },
        None => Config::discover(cli.search_dir()?)?,
    };

    if let Some(indent_width) = cli.indent_width {
        config.indent_width = indent_width.into();
    }
    Ok(config)
}

fn read_source(cli: &Cli, path: &Path) -> Result<(String, String)> {
    if cli.reads_stdin() {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read from stdin")?;
        return Ok((content, "<stdin>".to_string()));
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok((content, path.display().to_string()))
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = resolve_config(cli)?;
    log::debug!("Using config: {config:?}");

    if cli.save_config {
        config.save()?;
        println!("Saved config to {}", Config::config_path().display());
        return Ok(ExitCode::SUCCESS);
    }

    let Some(path) = cli.file.as_deref() else {
        bail!("No file given");
    };
    let (content, source_name) = read_source(cli, path)?;
    log::debug!("Read {} bytes from {source_name}", content.len());

    let options = Options {
        mode: cli.mode.into(),
        indent_width: config.indent_width,
    };
    log::debug!("Processing {} position(s)", cli.positions.len());

    let edits = match process_with(&options, &cli.positions, &content, &source_name) {
        Ok(edits) => edits,
        Err(error) => {
            log::debug!("Engine error: {error:?}");
            if cli.edits {
                // the consumer is a tool looking for JSON
                eprintln!("{}", output::error_json(&error));
            } else {
                eprintln!("{}", style(error.to_string()).red());
            }
            return Ok(ExitCode::FAILURE);
        }
    };
    log::debug!("Produced {} edit(s)", edits.len());

    if cli.edits {
        println!("{}", output::edits_json(&edits)?);
    } else if cli.diff {
        print!("{}", output::unified_diff(&content, &apply_edits(&content, &edits)));
    } else {
        print!("{}", apply_edits(&content, &edits));
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    run(&cli)
}
