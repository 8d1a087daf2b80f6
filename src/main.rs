use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use flowdesk::config::Config;
use flowdesk::model::{create_node, DisplayZone, IdScheme, IdSource, Position};
use flowdesk::{flog, flog_debug, flog_error, ProcessGraph, Result};

/// flowdesk - inspect and edit process-builder graphs
#[derive(Parser, Debug)]
#[command(name = "flowdesk")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    FLOWDESK_DEBUG=1     Enable debug logging (alternative to --debug)")]
pub struct Cli {
    /// Enable debug logging (writes to ~/.flowdesk/flowdesk.log)
    #[arg(short = 'd', long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a node with default data and print it as JSON
    Node {
        /// Node type (input, output, process, conditional, code)
        kind: String,

        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        x: f64,

        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        y: f64,

        /// Append the node to this graph file (created if missing)
        #[arg(long)]
        graph: Option<PathBuf>,

        /// Generate a uuid-based id regardless of the configured scheme
        #[arg(long)]
        uuid: bool,
    },

    /// Print trigger and deadline summaries for a graph
    Describe {
        /// Graph file (defaults to default_graph from the config)
        graph: Option<PathBuf>,
    },

    /// Validate predecessor links in a graph
    Check {
        /// Graph file (defaults to default_graph from the config)
        graph: Option<PathBuf>,
    },

    /// Show the config, updating any setting given
    Config {
        /// Zone timestamps are shown in (local, utc)
        #[arg(long)]
        display_zone: Option<DisplayZone>,

        /// How new node ids are generated (counter, uuid)
        #[arg(long)]
        id_scheme: Option<IdScheme>,

        /// Graph file used when describe/check get no path
        #[arg(long)]
        default_graph: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    flowdesk::log::init_with_debug(cli.debug);

    let config = Config::load()?;
    let result = match cli.command {
        Command::Node {
            kind,
            x,
            y,
            graph,
            uuid,
        } => {
            let scheme = if uuid { IdScheme::Uuid } else { config.id_scheme };
            run_node(&config, scheme, &kind, Position::new(x, y), graph)
        }
        Command::Describe { graph } => run_describe(&config, config.graph_path(graph)?),
        Command::Check { graph } => run_check(&config, config.graph_path(graph)?),
        Command::Config {
            display_zone,
            id_scheme,
            default_graph,
        } => run_config(
            config,
            &Config::config_path()?,
            display_zone,
            id_scheme,
            default_graph,
        ),
    };
    if let Err(e) = &result {
        flog_error!("command failed: {}", e);
    }
    result
}

fn load_graph(config: &Config, path: &Path) -> Result<ProcessGraph> {
    load_graph_with(config.id_scheme, path)
}

fn load_graph_with(scheme: IdScheme, path: &Path) -> Result<ProcessGraph> {
    ProcessGraph::load(path, scheme.source())
}

fn run_node(
    config: &Config,
    scheme: IdScheme,
    kind: &str,
    position: Position,
    graph: Option<PathBuf>,
) -> Result<()> {
    flog!(
        "Node command: kind={}, scheme={:?}, graph={:?}",
        kind,
        scheme,
        graph
    );
    flog_debug!("display_zone={:?}", config.display_zone);

    let node = match graph {
        Some(path) => {
            let mut graph = if path.exists() {
                load_graph_with(scheme, &path)?
            } else {
                ProcessGraph::with_ids(scheme.source())
            };
            let node = graph.add_node(kind, position).clone();
            graph.save(&path)?;
            node
        }
        None => {
            let mut ids = scheme.source();
            create_node(kind, position, ids.next_id(kind))
        }
    };

    println!("{}", serde_json::to_string_pretty(&node)?);
    Ok(())
}

fn run_describe(config: &Config, path: PathBuf) -> Result<()> {
    flog!("Describe command: graph={}", path.display());
    let graph = load_graph(config, &path)?;
    let zone = config.display_zone;

    for node in graph.nodes() {
        println!("{} [{}] {}", node.id, node.kind(), node.label());
        if let Some(text) = flowdesk::describe_start_trigger(&node.data, zone) {
            println!("    {}", text);
        }
        if let Some(deadline) = graph.deadline_for(&node.id) {
            println!("    {}", deadline.describe(zone));
        }
        let open = node.tasks().iter().filter(|t| !t.completed).count();
        if !node.tasks().is_empty() {
            println!("    tasks: {} open of {}", open, node.tasks().len());
        }
    }
    Ok(())
}

fn run_check(config: &Config, path: PathBuf) -> Result<()> {
    flog!("Check command: graph={}", path.display());
    let graph = load_graph(config, &path)?;
    graph.validate()?;
    println!("{}: {} nodes, predecessor links OK", path.display(), graph.len());
    Ok(())
}

fn run_config(
    mut config: Config,
    path: &Path,
    display_zone: Option<DisplayZone>,
    id_scheme: Option<IdScheme>,
    default_graph: Option<String>,
) -> Result<()> {
    let changed = display_zone.is_some() || id_scheme.is_some() || default_graph.is_some();
    if let Some(zone) = display_zone {
        config.display_zone = zone;
    }
    if let Some(scheme) = id_scheme {
        config.id_scheme = scheme;
    }
    if let Some(graph) = default_graph {
        config.default_graph = Some(graph);
    }
    if changed {
        flog!("Config command: saving {}", path.display());
        config.save_to(path)?;
    }

    println!("display_zone = {}", config.display_zone);
    println!("id_scheme = {}", config.id_scheme);
    if let Some(graph) = &config.default_graph {
        println!("default_graph = {}", graph);
    }
    Ok(())
}
