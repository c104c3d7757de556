//! pake-net - inspect the JSON resources published by pake nodes

use anyhow::Result;
use clap::{Parser, Subcommand};
use pake_net::{Alien, Fetcher, Node, build_index};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pake-net")]
#[command(version, about = "Inspect the JSON resources published by pake nodes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a node's metadata
    Meta {
        /// Node root URL
        root: String,
    },
    /// List a node's mirrors
    Mirrors {
        /// Node root URL
        root: String,
    },
    /// List the packages a node provides
    Packages {
        /// Node root URL
        root: String,
    },
    /// Build the package index across the given nodes
    Index {
        /// Node URLs to index
        #[arg(required = true)]
        nodes: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Meta { root } => {
            let node = Node::new(root)?;
            print_json(&node.meta().get().await)?;
        }
        Commands::Mirrors { root } => {
            let node = Node::new(root)?;
            print_json(&Value::Array(node.mirrors().get().await))?;
        }
        Commands::Packages { root } => {
            let node = Node::new(root)?;
            print_json(&Value::Array(node.packages().get().await))?;
        }
        Commands::Index { nodes } => {
            let fetcher = Fetcher::new()?;
            let mut aliens = Vec::with_capacity(nodes.len());
            for url in &nodes {
                aliens.push(Alien::discover(&fetcher, url).await);
            }
            let index = build_index(&fetcher, &aliens).await;
            // index errors are diagnostics, not failures
            for err in &index.errors {
                eprintln!("pake-net: fail: {err}");
            }
            print_json(&serde_json::to_value(&index.entries)?)?;
        }
    }
    Ok(())
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
