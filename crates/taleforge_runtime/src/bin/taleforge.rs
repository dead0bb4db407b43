//! Taleforge CLI entry point.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use log::LevelFilter;
use taleforge_engine::EngineConfig;
use taleforge_runtime::{Repl, ScriptEditor, Session};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    batch: Option<PathBuf>,
    seed: Option<u64>,
    plain: bool,
    verbose: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut args = args.into_iter().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-p" | "--plain" => config.plain = true,
            "-v" | "--verbose" => config.verbose = true,
            "-b" | "--batch" => {
                let path = args.next().ok_or("--batch requires a file")?;
                config.batch = Some(PathBuf::from(path));
            }
            "--seed" => {
                let value = args.next().ok_or("--seed requires a value")?;
                config.seed = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid --seed value: {value}"))?,
                );
            }
            other => return Err(format!("unknown option: {other}").into()),
        }
    }

    Ok(config)
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default)
        .parse_default_env()
        .init();
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("taleforge {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_logging(config.verbose);

    let mut engine_config = if config.plain || config.batch.is_some() {
        EngineConfig::plain()
    } else {
        EngineConfig::terminal()
    };
    if let Some(seed) = config.seed {
        engine_config = engine_config.with_rng_seed(seed);
    }

    if let Some(path) = &config.batch {
        let script = fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        let session = Session::demo(engine_config.with_echo_commands(true))?;
        let mut repl = Repl::with_editor(ScriptEditor::default(), session);
        for line in repl.run_script(&script) {
            println!("{line}");
        }
        return Ok(());
    }

    let session = Session::demo(engine_config.with_echo_commands(false))?;
    Repl::new(session)?.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mTaleforge\x1b[0m - Interactive-fiction runtime

\x1b[1mUSAGE:\x1b[0m
    taleforge [OPTIONS]

\x1b[1mOPTIONS:\x1b[0m
    -h, --help          Print help information
    -V, --version       Print version information
    -b, --batch FILE    Play the commands in FILE and exit
    --seed N            Seed for random text
    -p, --plain         Plain text output (no ANSI styling)
    -v, --verbose       Debug logging (RUST_LOG overrides)

\x1b[1mEXAMPLES:\x1b[0m
    taleforge                       Play the demo interactively
    taleforge -b walkthrough.txt    Play a script and print the transcript
    RUST_LOG=trace taleforge        Trace disambiguation and delegation

\x1b[1mMETA COMMANDS:\x1b[0m
    scope NAME           Show every scope predicate for an object
    commands [NAME]      Show what can be done with objects
    bugs                 Show text directive bug reports
    quit                 Leave the game
    Ctrl+D               Leave the game
    Ctrl+C               Cancel current input"
    );
}
