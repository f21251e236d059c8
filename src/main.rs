//! appini CLI
//!
//! Inspects the layered configuration resolved for the current deployment
//! target. Fatal misconfiguration surfaces as a diagnostic message and a
//! non-zero exit; absent values print their fallback or nothing at all.

use anyhow::{Result, bail};
use appini::app;
use appini::cli::{Cli, Command};
use appini::config::{CnfPaths, ConfigStore};
use appini::dsn::dsn;
use appini::format::{self, OutputFormat};
use clap::Parser;
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging based on the --log option.
fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            let file = OpenOptions::new().create(true).append(true).open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let paths = match &cli.root {
        Some(root) => CnfPaths::with_root(root),
        None => CnfPaths::discover()?,
    };
    let store = ConfigStore::new(paths);
    let format = cli.format;

    match cli.command {
        Command::Get {
            keys,
            default,
            shorten,
        } => run_get(&store, &keys, default.as_deref(), shorten, format)?,

        Command::Section { name } => match store.section(&name)? {
            Some(section) => print!("{}", format::render_map(section, format)),
            None => bail!("section {name:?} is not defined in any layer"),
        },

        Command::Target => {
            let target = store.target()?;
            match format {
                OutputFormat::Text => println!("{} (mode: {})", target.id(), target.mode()),
                OutputFormat::Json => println!("{}", format::to_json(target)),
            }
        }

        Command::Layers => {
            let resolved = store.resolved()?;
            match format {
                OutputFormat::Text => {
                    for layer in &resolved.layers {
                        println!("{:<12} {}", layer.role.to_string(), layer.path.display());
                    }
                }
                OutputFormat::Json => println!("{}", format::to_json(&resolved.layers)),
            }
        }

        Command::Dsn { name } => println!("{}", dsn(&store, name.as_deref())?),

        Command::RuntimeIni { use_defaults } => {
            if !std::io::stdout().is_terminal() {
                bail!("runtime-ini is only available in an interactive terminal session");
            }
            let target = store.target()?.clone();
            let mode = store.mode()?;
            match app::runtime_ini_path(store.paths(), &target, mode, use_defaults) {
                Some(path) => println!("{}", path.display()),
                None => bail!("no runtime ini found for target {target}"),
            }
        }

        Command::Dump => println!("{}", format::to_json(store.resolved()?)),
    }

    Ok(())
}

fn run_get(
    store: &ConfigStore,
    keys: &[String],
    default: Option<&str>,
    shorten: bool,
    format: OutputFormat,
) -> Result<()> {
    if let [key] = keys {
        match (store.get_one(key)?, default) {
            (Some(value), _) => println!("{value}"),
            (None, Some(fallback)) => println!("{fallback}"),
            (None, None) => bail!("key {key:?} is not set"),
        }
        return Ok(());
    }

    let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
    let found = store.get_many(&refs, shorten)?;
    if found.is_empty() {
        match default {
            Some(fallback) => println!("{fallback}"),
            None => bail!("none of the requested keys are set"),
        }
        return Ok(());
    }
    print!("{}", format::render_map(&found, format));
    Ok(())
}
