use clap::{Parser, Subcommand};
use junbi::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use tracing_subscriber::EnvFilter;

// --- JSON Deserialization Structs (Editor Export Format) ---
// These structs match the flow editor's export and are only used here for conversion.

#[derive(Deserialize)]
struct RawFlow {
    nodes: Vec<RawNode>,
    #[serde(default, alias = "edges")]
    connections: Vec<RawConnection>,
}

#[derive(Deserialize)]
struct RawNode {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    position: Option<Position>,
    #[serde(default)]
    config: serde_json::Value,
}

#[derive(Deserialize)]
struct RawConnection {
    #[serde(default)]
    id: Option<String>,
    #[serde(alias = "sourceNodeId")]
    source: String,
    #[serde(default, alias = "sourcePortId", alias = "sourceHandle")]
    source_port: Option<String>,
    #[serde(alias = "targetNodeId")]
    target: String,
    #[serde(default, alias = "targetPortId", alias = "targetHandle")]
    target_port: Option<String>,
}

// --- Converter Implementation ---

impl IntoFlow for RawFlow {
    fn into_flow(self) -> Result<FlowSnapshot, FlowConversionError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(|raw| {
                let operation: OperationType = raw.kind.parse()?;
                let mut node = FlowNode::new(raw.id, operation);
                node.position = raw.position.unwrap_or_default();
                node.config = raw.config;
                Ok(node)
            })
            .collect::<Result<Vec<_>, FlowConversionError>>()?;

        let connections = self
            .connections
            .into_iter()
            .enumerate()
            .map(|(i, raw)| {
                if raw.source.is_empty() || raw.target.is_empty() {
                    return Err(FlowConversionError::ValidationError(format!(
                        "connection #{} is missing an endpoint",
                        i
                    )));
                }
                let id = raw.id.unwrap_or_else(|| format!("connection-{}", i + 1));
                let mut connection = FlowConnection::new(id, raw.source, raw.target);
                if let Some(port) = raw.source_port {
                    connection.source_port_id = port;
                }
                if let Some(port) = raw.target_port {
                    connection.target_port_id = port;
                }
                Ok(connection)
            })
            .collect::<Result<Vec<_>, FlowConversionError>>()?;

        Ok(FlowSnapshot::new(nodes, connections))
    }
}

/// Prerequisite planning for ledger operation flows
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional path to a planner configuration JSON file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the missing steps before an operation can be added anywhere in the flow
    Recipe { flow_path: String, operation: String },
    /// Find the best node to attach a new operation to
    Attach { flow_path: String, operation: String },
    /// Plan the blocks to insert for a new operation
    Plan {
        flow_path: String,
        operation: String,
        /// Print the resulting flow instead of the plan
        #[arg(long)]
        apply: bool,
    },
    /// Check structural integrity and every node's prerequisites
    Validate { flow_path: String },
    /// Compute fresh positions for every node
    Layout { flow_path: String },
    /// Print the prerequisite rule table
    Rules,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => {
            let json = read_file(path);
            PlannerConfig::from_json(&json)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to load '{}': {}", path, e)))
        }
        None => PlannerConfig::default(),
    };
    let planner = Planner::builder().with_config(config).build();

    match cli.command {
        Command::Recipe {
            flow_path,
            operation,
        } => {
            let flow = load_flow(&flow_path);
            let target = parse_operation(&operation);
            let recipe = planner.resolve_recipe(target, &flow);
            if cli.json {
                print_json(&recipe);
            } else {
                println!(
                    "{}",
                    RecipeFormatter::summarize_recipe(planner.rules(), target, &recipe)
                );
            }
        }
        Command::Attach {
            flow_path,
            operation,
        } => {
            let flow = load_flow(&flow_path);
            let attachment = planner.find_best_attachment(parse_operation(&operation), &flow);
            if cli.json {
                print_json(&attachment);
            } else {
                println!("{}", RecipeFormatter::format_attachment(&attachment));
            }
        }
        Command::Plan {
            flow_path,
            operation,
            apply,
        } => {
            let flow = load_flow(&flow_path);
            let plan = planner.plan_insertion(parse_operation(&operation), &flow);
            if apply {
                let next = flow.with_insertion(&plan);
                let positions = planner.layout(&next);
                print_json(&next.with_positions(&positions));
            } else if cli.json {
                print_json(&plan);
            } else {
                let ops: Vec<OperationType> = plan.nodes.iter().map(|n| n.operation).collect();
                match &plan.attach_to_node_id {
                    Some(id) => println!("attach below '{}':", id),
                    None => println!("start a new chain:"),
                }
                println!("  {}", RecipeFormatter::format_recipe(&ops));
            }
        }
        Command::Validate { flow_path } => {
            let flow = load_flow(&flow_path);
            let structure = planner.validate_flow(&flow);
            let nodes = planner.validate_nodes(&flow);
            if cli.json {
                #[derive(Serialize)]
                struct Report<'a> {
                    flow: &'a FlowValidation,
                    nodes: &'a [NodeValidation],
                }
                print_json(&Report {
                    flow: &structure,
                    nodes: &nodes,
                });
            } else {
                println!("{}", RecipeFormatter::format_flow(&structure));
                for node in &nodes {
                    println!("{}", RecipeFormatter::format_node(node));
                }
            }
            if !structure.valid || nodes.iter().any(|n| n.severity == NodeSeverity::Error) {
                std::process::exit(2);
            }
        }
        Command::Layout { flow_path } => {
            let flow = load_flow(&flow_path);
            let positions = planner.layout(&flow);
            if cli.json {
                print_json(&positions);
            } else {
                for node in &flow.nodes {
                    if let Some(p) = positions.get(&node.id) {
                        println!("{:<24} x={:>8.1} y={:>8.1}", node.id, p.x, p.y);
                    }
                }
            }
        }
        Command::Rules => {
            if cli.json {
                print_json(&planner.rules().iter().collect::<Vec<_>>());
            } else {
                for rule in planner.rules().iter() {
                    println!(
                        "{} ({} credits): {}",
                        rule.operation.label(),
                        rule.credit_cost,
                        RecipeFormatter::format_recipe(&rule.default_recipe)
                    );
                }
            }
        }
    }
}

fn read_file(path: &str) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read file '{}': {}", path, e)))
}

fn load_flow(path: &str) -> FlowSnapshot {
    let raw: RawFlow = serde_json::from_str(&read_file(path))
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse flow JSON: {}", e)));
    raw.into_flow()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to convert flow: {}", e)))
}

fn parse_operation(name: &str) -> OperationType {
    name.parse().unwrap_or_else(|e: FlowConversionError| {
        exit_with_error(&format!(
            "{} (known types: {})",
            e,
            OperationType::ALL
                .iter()
                .map(|op| op.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => exit_with_error(&format!("Failed to serialize output: {}", e)),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
