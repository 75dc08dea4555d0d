// CLI module - command-line argument parsing and handlers
//
// Provides subcommands for configuration management:
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --edit: Open config file in $EDITOR
// - config --update: Rewrite the file with the current structure
// - config --path: Show config file path

use crate::config::{Config, VERSION};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::Command;

/// gaugemon - scalar gauge widget for a query endpoint
#[derive(Parser)]
#[command(name = "gaugemon")]
#[command(version = VERSION)]
#[command(about = "Polls a query endpoint and renders the result as a gauge", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Rewrite the config file with the current structure, keeping
        /// user values
        #[arg(long)]
        update: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle CLI commands. Returns true if a command was handled (exit after).
pub fn handle_cli() -> bool {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config {
            show,
            reset,
            edit,
            update,
            path,
        }) => {
            if path {
                handle_config_path();
            } else if show {
                handle_config_show();
            } else if reset {
                handle_config_reset();
            } else if edit {
                handle_config_edit();
            } else if update {
                handle_config_update();
            } else {
                // No flag provided, show help
                println!("Usage: gaugemon config [--show|--reset|--edit|--update|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --edit    Open config file in $EDITOR");
                println!("  --update  Rewrite config with the current structure, keeping values");
                println!("  --path    Show config file path");
            }
            true
        }
        None => false, // No subcommand, run the widget
    }
}

/// Resolve the config path or bail out with a message.
fn config_path_or_exit() -> std::path::PathBuf {
    match Config::config_path() {
        Some(path) => path,
        None => {
            eprintln!("Error: could not determine the config path (no home directory?)");
            std::process::exit(1);
        }
    }
}

fn handle_config_path() {
    println!("{}", config_path_or_exit().display());
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("server_url = {:?}", config.server_url);
    println!("theme = {:?}", config.theme);
    println!();
    println!("[widget]");
    println!("expression = {:?}", config.widget.expression);
    println!("refresh = {}", config.widget.refresh);
    println!("range = {:?}", config.widget.range);
    println!("max = {}", config.widget.max);
    if let Some(units) = &config.widget.units {
        println!("units = {:?}", units);
    }
    println!("warning = {}", config.widget.warning);
    println!("danger = {}", config.widget.danger);
    println!("precision = {}", config.widget.precision);
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);

    // Show source info
    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let path = config_path_or_exit();

    // An existing file needs explicit confirmation before it is lost
    if path.exists() && !confirm_overwrite(&path) {
        println!("Aborted.");
        return;
    }

    let write_result = path
        .parent()
        .map(std::fs::create_dir_all)
        .unwrap_or(Ok(()))
        .and_then(|()| std::fs::write(&path, Config::default().to_toml()));

    match write_result {
        Ok(()) => println!("Config reset to defaults: {}", path.display()),
        Err(e) => {
            eprintln!("Error writing config: {}", e);
            std::process::exit(1);
        }
    }
}

fn confirm_overwrite(path: &std::path::Path) -> bool {
    eprint!(
        "Config file exists at {}. Overwrite? [y/N] ",
        path.display()
    );
    let _ = std::io::stderr().flush();

    let mut input = String::new();
    if std::io::stdin().read_line(&mut input).is_err() {
        return false;
    }
    input.trim().eq_ignore_ascii_case("y")
}

fn handle_config_update() {
    let path = config_path_or_exit();

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
        return;
    }

    // Re-render the effective config through to_toml, so new fields
    // and comments appear while user values are kept
    let updated = Config::from_env().to_toml();

    let backup_path = path.with_extension("toml.bak");
    match std::fs::copy(&path, &backup_path) {
        Ok(_) => println!("Backup created: {}", backup_path.display()),
        Err(e) => eprintln!("Warning: could not create backup: {}", e),
    }

    if let Err(e) = std::fs::write(&path, updated) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config updated: {}", path.display());
}

fn handle_config_edit() {
    let path = config_path_or_exit();

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    // $EDITOR, then $VISUAL, then a platform default
    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            let fallback = if cfg!(windows) { "notepad" } else { "nano" };
            fallback.to_string()
        });

    println!("Opening {} with {}", path.display(), editor);

    match Command::new(&editor).arg(&path).status() {
        Ok(s) if s.success() => {}
        Ok(s) => {
            eprintln!("Editor exited with status: {}", s);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to launch editor '{}': {}", editor, e);
            eprintln!("Set $EDITOR to your preferred editor");
            std::process::exit(1);
        }
    }
}
