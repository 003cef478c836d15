//! spi2pll — turn a TICS Pro LMX2582 register export into an SPI writer binary.

mod settings;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{CommandFactory, FromArgMatches, Parser};
use spi2pll_build::{BuildConfig, OutputLayout};

use settings::Settings;

const USAGE: &str = "spi2pll [OPTIONS] <EXPORT_FILE>\n       \
                     spi2pll [OPTIONS] <COMPILER> <COMPILER_FLAGS> <EXPORT_FILE>";

#[derive(Parser)]
#[command(
    name = "spi2pll",
    version,
    about = "Generate an LMX2582 register header from a TICS Pro export and compile the SPI writer",
    override_usage = USAGE
)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Settings file (default: spi2pll.toml, searched upward from the working directory)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// <EXPORT_FILE>, or <COMPILER> <COMPILER_FLAGS> <EXPORT_FILE>
    #[arg(
        value_name = "ARGS",
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    args: Vec<OsString>,
}

fn main() {
    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("error: cannot determine working directory: {e}");
            process::exit(1);
        }
    };

    process::exit(dispatch(std::env::args_os(), &cwd));
}

/// Parse `argv`, run the build and return the process exit code.
///
/// Help, version and bad usage return before anything touches the
/// filesystem.
fn dispatch<I, T>(argv: I, cwd: &Path) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut command = Cli::command().after_help(output_note(cwd));
    let cli = match command
        .try_get_matches_from_mut(argv)
        .and_then(|matches| Cli::from_arg_matches(&matches))
    {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return e.exit_code();
        }
    };

    if !is_valid_arg_count(cli.args.len()) {
        eprintln!("Bad usage...");
        let _ = command.print_help();
        return 2;
    }

    init_logging(cli.verbose);

    match run(cli, cwd) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {e:#}");
            1
        }
    }
}

fn is_valid_arg_count(count: usize) -> bool {
    matches!(count, 1 | 3)
}

fn output_note(cwd: &Path) -> String {
    let layout = OutputLayout::in_dir(cwd);
    format!(
        "Headers are written to {} and programs to {}.",
        layout.headers_dir.display(),
        layout.binaries_dir.display()
    )
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init()
        .ok();
}

fn run(cli: Cli, cwd: &Path) -> anyhow::Result<()> {
    let settings = Settings::resolve(cli.config.as_deref(), cwd)?;
    let layout = settings.apply_layout(OutputLayout::in_dir(cwd));
    let config = BuildConfig::from_positionals(&cli.args, settings.compiler_defaults(), layout)?;

    let outcome = spi2pll_build::run(&config)
        .with_context(|| format!("building from {}", config.export_file.display()))?;

    println!(
        "Registers: {} ({} bytes)",
        outcome.export.len(),
        outcome.export.to_bytes().len()
    );
    println!("Header:    {}", outcome.header.display());
    println!("Program:   {}", outcome.program.display());
    Ok(())
}
