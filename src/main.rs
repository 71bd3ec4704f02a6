//! Fabric Topology CLI
//!
//! Usage:
//!   fabric-topology [OPTIONS] <FILES>...
//!
//! Options:
//!   -f, --format <FORMAT>        Output format: json, dot, links or summary
//!   -o, --output <FILE>          Write output to a file instead of stdout
//!   -p, --port-offsets <FILE>    Port offset table (TOML format)
//!   -l, --location <KEY=VALUE>   Location tag attached to every node
//!   -n, --name <NAME>            Fabric name
//!   -d, --debug                  Log every node and link
//!   -h, --help                   Print help

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use fabric_topology::loader::TemplateFormat;
use fabric_topology::{
    compile, render_dot, render_json, render_links, render_summary, CompileConfig, ExportConfig,
    LoadError, Location, PortOffsetTable, TemplateSet,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Dot,
    Links,
    Summary,
}

#[derive(Parser)]
#[command(name = "fabric-topology")]
#[command(about = "Compile Clos fabric templates into a topology graph")]
struct Cli {
    /// Template files (.toml or .json), merged into one template pool
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: Format,

    /// Output file (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Port offset table (TOML format), replaces the built-in table
    #[arg(short, long)]
    port_offsets: Option<PathBuf>,

    /// Location tag attached to every node, e.g. latitude=51.05
    #[arg(short, long, value_parser = parse_tag)]
    location: Vec<(String, String)>,

    /// Fabric name, also used as the DOT graph name
    #[arg(short, long, default_value = "fabric")]
    name: String,

    /// Debug mode: log every node and link
    #[arg(short, long)]
    debug: bool,
}

fn parse_tag(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", s)),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    // Load templates
    let mut set = TemplateSet::new();
    for path in &cli.files {
        match load_template_set(path) {
            Ok(loaded) => set.extend(loaded),
            Err(report) => {
                eprintln!("Error loading template file '{}': {}", path.display(), report);
                std::process::exit(1);
            }
        }
    }

    // Load port offsets
    let port_offsets = match &cli.port_offsets {
        Some(path) => match PortOffsetTable::from_file(path) {
            Ok(table) => table,
            Err(e) => {
                eprintln!("Error loading port offsets '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => PortOffsetTable::default(),
    };

    let mut config = CompileConfig::new()
        .with_fabric_name(cli.name.clone())
        .with_port_offsets(port_offsets);
    if !cli.location.is_empty() {
        let mut location = Location::new();
        for (key, value) in &cli.location {
            location.insert(key.clone(), value.clone());
        }
        config = config.with_location(location);
    }

    let registry = match set.into_registry() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let fabric = match compile(&registry, &config) {
        Ok(fabric) => fabric,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let export = ExportConfig::new().with_graph_name(fabric.name());
    let output = match cli.format {
        Format::Json => match render_json(fabric.graph(), &export) {
            Ok(json) => json + "\n",
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Format::Dot => render_dot(fabric.graph(), &export),
        Format::Links => render_links(fabric.graph()),
        Format::Summary => render_summary(fabric.graph()),
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, output) {
                eprintln!("Error writing file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => print!("{}", output),
    }
}

/// Log to stderr; `--debug` overrides RUST_LOG
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load one template file, rendering parse errors with source context
fn load_template_set(path: &Path) -> Result<TemplateSet, String> {
    let format = TemplateFormat::from_path(path).map_err(|e| e.to_string())?;
    let source = fs::read_to_string(path).map_err(|e| LoadError::from(e).to_string())?;
    TemplateSet::parse(&source, format).map_err(|e| {
        let filename = path.display().to_string();
        format!("\n{}", e.format(&source, &filename))
    })
}
