use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use juceview_core::field::FieldPath;
use juceview_core::plugin::register_providers;
use juceview_core::registry::{CommandScript, TypeCategories};
use juceview_core::snapshot::{Snapshot, SnapshotValue};
use juceview_core::{PluginConfig, ValueHandle};
use juceview_utils::{debug, init_logging, init_logging_for_host, init_logging_with_level, LogFormat, LogLevel};

mod render;

/// Debugger display providers for JUCE core types.
#[derive(Parser, Debug)]
#[command(name = "juceview")]
#[command(version)]
#[command(about = "Inspect juceview formatter bindings and render JUCE values from snapshots", long_about = None)]
struct Cli
{
    /// Log level (overrides RUST_LOG's default level)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Log to the dated file under ~/.juceview, as a debugger-hosted plugin does
    #[arg(long, global = true, default_value_t = false)]
    host_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// List the bindings the plugin registers with the current configuration
    Bindings
    {
        /// Print debugger commands naming providers in JUCEVIEW_HOST_MODULE instead of a table
        #[arg(long, default_value_t = false)]
        script: bool,
    },
    /// Render values from a JSON snapshot through the registered providers
    Render
    {
        /// Path to the snapshot file
        snapshot: PathBuf,
        /// Only render the root with this name
        #[arg(long)]
        root: Option<String>,
        /// Dotted member path to render instead of each root itself
        #[arg(long)]
        path: Option<String>,
        /// How many levels of synthetic children to expand
        #[arg(short, long, default_value_t = 2)]
        depth: usize,
        /// Maximum children listed per value
        #[arg(long, default_value_t = 100)]
        max_children: usize,
    },
}

fn main()
{
    let cli = Cli::parse();

    let logging = match (cli.host_log, cli.log_level) {
        (true, level) => init_logging_for_host(level).map(|path| eprintln!("Logging to {}", path.display())),
        (false, Some(level)) => init_logging_with_level(level, LogFormat::Pretty),
        (false, None) => init_logging(),
    };
    if let Err(e) = logging {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(1);
    }

    if let Err(e) = run_command(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run_command(cli: Cli) -> Result<(), Box<dyn std::error::Error>>
{
    let config = PluginConfig::from_env();
    debug!(?config, "configuration loaded");
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Bindings { script: true } => {
            let mut script = CommandScript::<SnapshotValue>::with_module(config.host_module.clone());
            register_providers(&mut script, &config)?;
            for line in script.lines() {
                writeln!(stdout, "{line}")?;
            }
        }
        Commands::Bindings { script: false } => {
            let mut registry = TypeCategories::<SnapshotValue>::new();
            register_providers(&mut registry, &config)?;
            for category in registry.categories() {
                let state = if category.enabled { "enabled" } else { "disabled" };
                writeln!(stdout, "category {} ({state})", category.name)?;
                for binding in &category.bindings {
                    writeln!(
                        stdout,
                        "  {:<9} {:<14} {}",
                        binding.kind.label(),
                        binding.kind.provider(),
                        binding.matcher
                    )?;
                }
            }
        }
        Commands::Render { snapshot, root, path, depth, max_children } => {
            let snapshot = Snapshot::load(&snapshot)?;
            let path = path.as_deref().map(FieldPath::parse).transpose()?;

            let mut registry = TypeCategories::<SnapshotValue>::new();
            register_providers(&mut registry, &config)?;
            let renderer = render::Renderer::new(&registry, config.options, max_children);

            for value in snapshot.roots() {
                if root.as_deref().is_some_and(|wanted| wanted != value.name()) {
                    continue;
                }
                let target = match &path {
                    Some(path) => path.resolve(&value),
                    None => Some(value.clone()),
                };
                match target {
                    Some(target) => renderer.render(&mut stdout, &target, depth)?,
                    None => writeln!(stdout, "{}: path not found", value.name())?,
                }
            }
        }
    }

    Ok(())
}
