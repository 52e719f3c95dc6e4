//! Hook Check
//!
//! Installs the configured hooks against the stub host, reports how every
//! target resolved, and uninstalls again. Useful for checking a config file
//! and for seeing what an incompatible host does to installation.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use sim_intercept::core::config::HookConfig;
use sim_intercept::core::error::Result;
use sim_intercept::hooks::HookRegistry;
use sim_intercept::host::locate;
use sim_intercept::host::operations::{known_descriptors, spawn_position_descriptor};
use sim_intercept::ports::PolicyPorts;
use sim_intercept::testing::{FixedWeather, RecordingPolicy, StubHost};
use tracing_subscriber::EnvFilter;

/// Hook Check - dry-run hook installation
#[derive(Parser, Debug)]
#[command(name = "hook_check")]
#[command(about = "Install the configured hooks against a stub host and report the result")]
struct Args {
    /// TOML config file (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Host operation name to remove from the stub catalog (e.g. HandleCrime)
    #[arg(long)]
    missing: Option<String>,

    /// Host operation name the stub host refuses to bind
    #[arg(long)]
    refuse: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sim_intercept=info")))
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("hook_check: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => HookConfig::load(path)?,
        None => HookConfig::default(),
    };

    let mut host = StubHost::new();
    for descriptor in known_descriptors().into_iter().chain([spawn_position_descriptor()]) {
        if args.missing.as_deref() == Some(descriptor.name()) {
            host = host.without(&descriptor);
        }
        if args.refuse.as_deref() == Some(descriptor.name()) {
            host = host.refuse_bind(&descriptor);
        }
    }

    let ports = Arc::new(
        PolicyPorts::new()
            .with_building(Arc::new(RecordingPolicy::new()))
            .with_weather(Arc::new(FixedWeather(false))),
    );
    let mut registry = HookRegistry::from_config(&config, ports, &host);

    println!("{} hook slot(s) configured", registry.len());
    for slot in registry.slots() {
        let resolution = match locate(&host, &slot.descriptor) {
            Ok(handle) => format!("found at {:?}", handle),
            Err(err) => err.to_string(),
        };
        println!("  {:<32} {}", slot.name, resolution);
        for required in &slot.requires {
            let resolution = match locate(&host, required) {
                Ok(handle) => format!("found at {:?}", handle),
                Err(err) => err.to_string(),
            };
            println!("  {:<32}   requires {}: {}", "", required.name(), resolution);
        }
    }

    let installed = registry.install_all(&host);
    for slot in registry.slots() {
        let state = if slot.installed { "installed" } else { "not installed" };
        println!("  {:<32} {}", slot.name, state);
    }

    let restored = registry.uninstall_all(&host);
    println!("{} slot(s) restored", restored);

    installed
}
