//! CLI definitions and command routing.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, ConfigPaths};
use crate::entry::Entry;
use crate::hosts::{EntrySequence, Hosts};

#[derive(Parser)]
#[command(name = "hostsfile")]
#[command(about = "Inspect and edit the system hosts file")]
pub struct Cli {
    /// Hosts file to operate on (default: HOSTSFILE_PATH, config, then platform path)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print all entries
    List {
        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Print entries whose address, hostname or alias equals QUERY
    Find {
        query: String,
        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Add an entry; fails if the address or a name is already used
    Add {
        address: String,
        hostname: String,
        aliases: Vec<String>,
        /// Inline comment written after the names
        #[arg(long)]
        comment: Option<String>,
        /// Add even if the address or a name is already present
        #[arg(long)]
        allow_duplicates: bool,
        #[command(flatten)]
        save: SaveArgs,
    },

    /// Remove every entry matching QUERY (address, hostname or alias)
    Remove {
        query: String,
        #[command(flatten)]
        save: SaveArgs,
    },

    /// Print the resolved hosts file path
    Path,

    /// Check the hosts file for malformed lines, shared names and loose permissions
    Doctor,

    /// Show or change defaults in config.toml
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

#[derive(Args)]
pub struct SaveArgs {
    /// Copy the current file to <file>.backup before writing
    #[arg(long)]
    pub backup: bool,
    /// Do not write the managed header
    #[arg(long)]
    pub no_header: bool,
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Print the config file path and its values
    Show,
    /// Update one or more defaults
    Set {
        /// Default hosts file path
        #[arg(long)]
        hosts_file: Option<PathBuf>,
        /// Back up before every save
        #[arg(long)]
        backup: Option<bool>,
        /// Write the managed header on save
        #[arg(long)]
        header: Option<bool>,
    },
}

/// Run CLI and dispatch to handlers.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose);

    let paths = ConfigPaths::default_paths();
    let config = Config::load(&paths)?;

    let hosts = || -> Result<Hosts> {
        Ok(Hosts::new(config.resolve_hosts_path(cli.file.as_deref())?))
    };

    match cli.command {
        Commands::List { json } => {
            let mut hosts = hosts()?;
            let entries: Vec<&Entry> = hosts.iter()?.collect();
            print_entries(&entries, json)
        }
        Commands::Find { query, json } => {
            let mut hosts = hosts()?;
            let found = hosts.find(&query)?;
            print_entries(&found, json)
        }
        Commands::Add {
            address,
            hostname,
            aliases,
            comment,
            allow_duplicates,
            save,
        } => {
            let mut entry = Entry::parse(&address, hostname)?.with_aliases(aliases)?;
            if let Some(c) = comment {
                entry = entry.with_comment(c)?;
            }
            let line = entry.to_string();
            let options = config.write_options(save.backup, save.no_header);
            hosts()?.edit(options, |h| h.add(entry, allow_duplicates))?;
            println!("Added: {line}");
            Ok(())
        }
        Commands::Remove { query, save } => {
            let options = config.write_options(save.backup, save.no_header);
            let count = hosts()?.edit(options, |h| h.remove(&query))?;
            println!("Removed {count} entr{}", if count == 1 { "y" } else { "ies" });
            Ok(())
        }
        Commands::Path => {
            println!("{}", hosts()?.path().display());
            Ok(())
        }
        Commands::Doctor => cmd_doctor(&hosts()?),
        Commands::Config { cmd } => cmd_config(&paths, &config, cmd),
    }
}

fn cmd_doctor(hosts: &Hosts) -> Result<()> {
    let results = crate::doctor::run_checks(hosts.path())?;
    let mut failed = false;
    for r in &results {
        let mark = if r.ok { "ok" } else { "!!" };
        println!("[{mark}] {}", r.message);
        failed |= !r.ok;
    }
    if failed {
        anyhow::bail!("some checks failed");
    }
    Ok(())
}

fn print_entries(entries: &[&Entry], json: bool) -> Result<()> {
    if json {
        let s = serde_json::to_string_pretty(entries).context("serialize entries")?;
        println!("{s}");
    } else {
        for e in entries {
            println!("{e}");
        }
    }
    Ok(())
}

fn cmd_config(paths: &ConfigPaths, config: &Config, cmd: ConfigCmd) -> Result<()> {
    let mut config = config.clone();
    match cmd {
        ConfigCmd::Show => {
            println!("# {}", paths.config_file.display());
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigCmd::Set {
            hosts_file,
            backup,
            header,
        } => {
            if let Some(f) = hosts_file {
                config.hosts_file = Some(f);
            }
            if let Some(b) = backup {
                config.backup = b;
            }
            if let Some(h) = header {
                config.write_header = h;
            }
            config.save(paths)?;
            println!("Saved {}", paths.config_file.display());
            Ok(())
        }
    }
}
