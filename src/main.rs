//! Component Engine CLI
//!
//! Usage:
//!   component-engine [OPTIONS] <MANIFEST>
//!
//! Options:
//!   -c, --component <NAME>     Render this component instead of the manifest root
//!   -f, --folder <FOLDER>      Pin the rendered component to a folder
//!   -p, --prop <KEY=VALUE>     Set a prop (repeatable, overrides manifest props)
//!   -l, --list                 List components and the folder each resolves to
//!   -d, --debug                Log resolution and rendering to stderr
//!   -h, --help                 Print help

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use component_engine::{render_root, ComponentRegistry, Manifest, RootOverrides, Value};

#[derive(Parser)]
#[command(name = "component-engine")]
#[command(about = "Render components resolved from ordered folders")]
struct Cli {
    /// Site manifest (TOML)
    manifest: PathBuf,

    /// Component to render (defaults to the manifest root)
    #[arg(short, long)]
    component: Option<String>,

    /// Pin the component to this folder instead of searching all folders
    #[arg(short, long)]
    folder: Option<String>,

    /// Prop assignment, value parsed as a TOML value when possible
    #[arg(short, long = "prop", value_name = "KEY=VALUE", value_parser = parse_prop)]
    props: Vec<(String, Value)>,

    /// List every component and the folder it resolves to
    #[arg(short, long)]
    list: bool,

    /// Debug mode: log resolution and rendering
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let manifest = match Manifest::from_file(&cli.manifest) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error loading manifest '{}': {}", cli.manifest.display(), e);
            process::exit(1);
        }
    };

    let registry = match manifest.build_registry() {
        Ok(r) => Arc::new(r),
        Err(e) => {
            eprintln!("Error loading components: {}", e);
            process::exit(1);
        }
    };

    if cli.list {
        print_listing(&registry);
        return;
    }

    let overrides = RootOverrides {
        component: cli.component,
        folder: cli.folder,
        props: cli.props,
    };
    match render_root(&manifest, &registry, &overrides) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn print_listing(registry: &ComponentRegistry) {
    for name in registry.component_names() {
        let definers = registry.folders_defining(name);
        match definers.split_first() {
            Some((winner, [])) => println!("{} -> {}", name, winner),
            Some((winner, shadowed)) => {
                println!("{} -> {} (overrides {})", name, winner, shadowed.join(", "))
            }
            None => println!("{} -> (pinned only)", name),
        }
    }
}

/// Parse `key=value`; the value is read as TOML and falls back to a string
fn parse_prop(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing prop name in '{}'", raw));
    }

    let parsed = toml::from_str::<toml::Table>(&format!("v = {}", value))
        .ok()
        .and_then(|mut table| table.remove("v"))
        .map(Value::from)
        .unwrap_or_else(|| Value::from(value));

    Ok((key.to_string(), parsed))
}
