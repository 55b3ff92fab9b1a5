//! svgt-engine CLI
//!
//! Usage:
//!   svgt-engine [OPTIONS] <TEMPLATE>
//!
//! Options:
//!   -s, --set <NAME=VALUE>  Bind a placeholder value (repeatable)
//!   -c, --config <FILE>     Engine configuration (TOML format)
//!   -p, --props             List the template's required placeholders
//!       --path              Print the artifact path instead of its bytes
//!   -h, --help              Print help

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use svgt_engine::{Catalog, EngineConfig, OsSourceReader};

#[derive(Parser)]
#[command(name = "svgt-engine")]
#[command(about = "Compile placeholder templates into cached artifacts")]
struct Cli {
    /// Template source file
    template: String,

    /// Bind a placeholder value, e.g. --set color=red (repeatable; repeated
    /// placeholder names reuse the same value)
    #[arg(short, long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,

    /// Engine configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// List the template's required placeholder names and exit
    #[arg(short, long)]
    props: bool,

    /// Print the derived artifact path instead of the artifact bytes
    #[arg(long)]
    path: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match EngineConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    let catalog = Catalog::with_config(Arc::new(OsSourceReader), config);

    if let Err(e) = catalog.template(&cli.template) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let required = match catalog.required_properties(&cli.template) {
        Ok(names) => names,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.props {
        for name in &required {
            println!("{}", name);
        }
        return;
    }

    // Split --set pairs into (name, value) bindings.
    let mut bindings: Vec<(String, String)> = Vec::with_capacity(cli.set.len());
    for pair in &cli.set {
        match pair.split_once('=') {
            Some((name, value)) => bindings.push((name.to_string(), value.to_string())),
            None => {
                eprintln!("Error: --set expects NAME=VALUE, got '{}'", pair);
                std::process::exit(1);
            }
        }
    }

    // Stand in for the host's property reflection: produce one value per
    // required placeholder occurrence, in order.
    let mut values: Vec<&str> = Vec::with_capacity(required.len());
    for name in &required {
        match bindings.iter().find(|(n, _)| n == name) {
            Some((_, value)) => values.push(value),
            None => {
                eprintln!("Error: no value supplied for placeholder '{}'", name);
                std::process::exit(1);
            }
        }
    }

    let artifact = match catalog.resolve_artifact(&cli.template, &values) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.path {
        println!("{}", artifact);
        return;
    }

    match catalog.data_for(&artifact) {
        Some(data) => {
            if let Err(e) = io::stdout().write_all(&data) {
                eprintln!("Error writing output: {}", e);
                std::process::exit(1);
            }
        }
        None => {
            eprintln!("Error: artifact '{}' missing from cache", artifact);
            std::process::exit(1);
        }
    }
}
