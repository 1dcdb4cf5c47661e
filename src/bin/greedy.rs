//! `greedy` - command-line front end
//!
//! Loads a graph (CSV) or a text file, runs one algorithm and prints the
//! result as text or JSON. `greedy menu` offers the same four algorithms in
//! an interactive loop.
//!
//! Paths default from `GREEDY_GRAPH_PATH` / `GREEDY_TEXT_PATH` (a `.env` file
//! is honoured); logging is controlled with `RUST_LOG`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use greedy_structures::huffman::{build_frequency_table, run_huffman};
use greedy_structures::loader::{load_graph, read_text};
use greedy_structures::mst::{run_kruskal, run_prim, MstResult};
use greedy_structures::shortest_path::run_dijkstra;
use greedy_structures::{Graph, ShortestPathTree};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "greedy", version, about = "MST, shortest paths and Huffman codes")]
struct Cli {
    /// CSV file with `origin,destination,weight` rows
    #[arg(
        long,
        global = true,
        env = "GREEDY_GRAPH_PATH",
        default_value = "data/graphs/example.csv"
    )]
    graph: PathBuf,

    /// Text file to build a Huffman code for
    #[arg(
        long,
        global = true,
        env = "GREEDY_TEXT_PATH",
        default_value = "data/text/example.txt"
    )]
    text: PathBuf,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Minimum spanning tree with Prim's algorithm
    Prim {
        /// Start node; defaults to the first node in the file
        #[arg(long)]
        start: Option<String>,
    },
    /// Minimum spanning tree with Kruskal's algorithm
    Kruskal,
    /// Shortest paths from a source node with Dijkstra's algorithm
    Dijkstra {
        /// Source node
        #[arg(long)]
        source: String,
    },
    /// Optimal prefix code for the text file
    Huffman,
    /// Interactive menu
    Menu,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "greedy_structures=info,greedy=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Prim { start } => prim(&cli.graph, start.as_ref(), cli.format),
        Command::Kruskal => kruskal(&cli.graph, cli.format),
        Command::Dijkstra { source } => dijkstra(&cli.graph, source, cli.format),
        Command::Huffman => huffman(&cli.text, cli.format),
        Command::Menu => menu(cli),
    }
}

fn open_graph(path: &Path) -> Result<Graph<String>> {
    load_graph(path).with_context(|| format!("loading graph from {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn prim(path: &Path, start: Option<&String>, format: OutputFormat) -> Result<()> {
    let graph = open_graph(path)?;
    let mst = run_prim(&graph, start)?;
    print_mst(&mst, format)
}

fn kruskal(path: &Path, format: OutputFormat) -> Result<()> {
    let graph = open_graph(path)?;
    let mst = run_kruskal(&graph)?;
    print_mst(&mst, format)
}

fn print_mst(mst: &MstResult<String>, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(mst);
    }

    println!("\n--- {} minimum spanning tree ---", mst.algorithm);
    println!("Total weight: {}", mst.total_weight);
    println!("Edges (u, v, weight):");
    for edge in &mst.edges {
        println!("  ({} - {}, weight: {})", edge.origin, edge.destination, edge.weight);
    }
    if !mst.is_spanning() {
        println!(
            "Not reached from {}: {}",
            mst.root.as_deref().unwrap_or("-"),
            mst.unreached.join(", ")
        );
    }
    Ok(())
}

fn dijkstra(path: &Path, source: &str, format: OutputFormat) -> Result<()> {
    let graph = open_graph(path)?;
    let tree = run_dijkstra(&graph, &source.to_string())?;
    if format == OutputFormat::Json {
        return print_json(&tree);
    }
    print_routes(&tree);
    Ok(())
}

fn print_routes(tree: &ShortestPathTree<String>) {
    println!("\n--- Shortest paths from {} ---", tree.source);
    let mut entries: Vec<_> = tree.entries.iter().collect();
    entries.sort_by(|a, b| a.node.cmp(&b.node));
    for entry in entries {
        match tree.path_to(&entry.node) {
            Some(path) => println!(
                "Route to {} (distance {}): {}",
                entry.node,
                entry.distance,
                path.join(" -> ")
            ),
            None => println!("Route to {}: UNREACHABLE", entry.node),
        }
    }
}

fn huffman(path: &Path, format: OutputFormat) -> Result<()> {
    let text = read_text(path).with_context(|| format!("reading text from {}", path.display()))?;
    info!(path = %path.display(), chars = text.chars().count(), "loaded text");

    let table = build_frequency_table(text.chars());
    let (tree, codebook) = run_huffman(&table)?;

    if format == OutputFormat::Json {
        #[derive(Serialize)]
        struct HuffmanOutput<'a> {
            tree: &'a greedy_structures::HuffmanTree<char>,
            codebook: &'a greedy_structures::Codebook<char>,
            encoded_bits: u64,
        }
        return print_json(&HuffmanOutput {
            tree: &tree,
            codebook: &codebook,
            encoded_bits: tree.weighted_path_length(),
        });
    }

    println!("\n--- Huffman code ---");
    println!("Symbol: code (by descending frequency)");
    for entry in codebook.by_frequency() {
        let shown = match entry.symbol {
            ' ' | '\n' | '\t' | '\r' => format!("{:?}", entry.symbol),
            c => c.to_string(),
        };
        println!("  {:<6} (frequency {:>4}): {}", shown, entry.frequency, entry.code);
    }
    let encoded = tree.weighted_path_length();
    let plain = 8 * table.total();
    println!("Root frequency (total symbols): {}", tree.total_frequency());
    println!(
        "Encoded size: {} bits vs {} bits at 8 bits/symbol ({:.1}%)",
        encoded,
        plain,
        100.0 * encoded as f64 / plain as f64
    );
    Ok(())
}

fn menu(cli: &Cli) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("\n{}", "=".repeat(50));
        println!("   GREEDY ALGORITHMS");
        println!("{}", "=".repeat(50));
        println!("1. Prim (MST)");
        println!("2. Kruskal (MST)");
        println!("3. Dijkstra (shortest paths)");
        println!("4. Huffman (optimal code)");
        println!("0. Exit");
        println!("{}", "-".repeat(50));
        print!("Choose an option: ");
        io::stdout().flush()?;

        let Some(choice) = lines.next().transpose()? else {
            return Ok(());
        };

        // a failed run is reported and the menu continues
        let outcome = match choice.trim() {
            "0" => return Ok(()),
            "1" => prim(&cli.graph, None, cli.format),
            "2" => kruskal(&cli.graph, cli.format),
            "3" => {
                print!("Source node for Dijkstra (e.g. A, B, C; case-insensitive): ");
                io::stdout().flush()?;
                let input = lines.next().transpose()?.unwrap_or_default();
                match menu_source(&input) {
                    Some(source) => dijkstra(&cli.graph, &source, cli.format),
                    None => {
                        println!("Source node cannot be empty.");
                        Ok(())
                    }
                }
            }
            "4" => huffman(&cli.text, cli.format),
            _ => {
                println!("Invalid option, choose a number from 0 to 4.");
                Ok(())
            }
        };
        if let Err(e) = outcome {
            error!("{e:#}");
        }
    }
}

/// Menu input is trimmed and upper-cased, matching upper-case node labels.
fn menu_source(input: &str) -> Option<String> {
    let source = input.trim();
    (!source.is_empty()).then(|| source.to_uppercase())
}
