//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::{HandlerStatus, RouteTable};
use serde::Serialize;
use tracing::info;

use super::table::{build_echo_tree, load_table, EchoTree};
use crate::cli::InfoArgs;

/// Tree info for JSON output
#[derive(Debug, Serialize)]
struct TreeInfo {
    version: String,
    route_count: usize,
    node_count: usize,
    handler_node_count: usize,
    nodes: Vec<NodeInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    handlers: Vec<HandlerInfo>,
}

#[derive(Debug, Serialize)]
struct NodeInfo {
    path: String,
    depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    handler: Option<String>,
}

#[derive(Debug, Serialize)]
struct HandlerInfo {
    name: String,
    declared: bool,
    status: HandlerStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading route table info");

    let table = load_table(&args.config)?;
    let (tree, _) = build_echo_tree(&table)?;

    if args.json {
        let info = build_tree_info(&table, &tree, args.handlers);
        let json = serde_json::to_string_pretty(&info).context("Failed to serialize tree info")?;
        println!("{}", json);
    } else {
        print_tree_info(&table, &tree, args.handlers);
    }

    Ok(())
}

fn build_tree_info(table: &RouteTable, tree: &EchoTree, with_handlers: bool) -> TreeInfo {
    let nodes = tree
        .walk()
        .map(|(depth, id)| NodeInfo {
            path: tree.node_path(id),
            depth,
            handler: tree
                .node(id)
                .and_then(|n| n.handler_id())
                .map(|h| h.to_string()),
        })
        .collect();

    let handlers = if with_handlers {
        handler_infos(table)
    } else {
        Vec::new()
    };

    TreeInfo {
        version: format!("{:?}", table.version),
        route_count: table.routes.len(),
        node_count: tree.len(),
        handler_node_count: tree.handler_count(),
        nodes,
        handlers,
    }
}

fn handler_infos(table: &RouteTable) -> Vec<HandlerInfo> {
    table
        .all_handler_names()
        .into_iter()
        .map(|name| {
            let spec = table.handlers.get(name);
            HandlerInfo {
                name: name.to_string(),
                declared: spec.is_some(),
                status: spec.map_or(0, |s| s.status),
                description: spec.and_then(|s| s.description.clone()),
            }
        })
        .collect()
}

fn print_tree_info(table: &RouteTable, tree: &EchoTree, with_handlers: bool) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                     Path Dispatch Tree                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("📍 Table");
    println!("   ├─ Version: {:?}", table.version);
    println!("   ├─ Routes: {}", table.routes.len());
    println!("   ├─ Nodes: {}", tree.len());
    println!("   └─ Nodes with handler: {}", tree.handler_count());

    println!("\n🌳 Tree");
    for line in tree.to_string().lines() {
        println!("   {}", line);
    }

    if with_handlers {
        let handlers = handler_infos(table);
        println!("\n⚙️  Handlers ({})", handlers.len());
        for (i, handler) in handlers.iter().enumerate() {
            let prefix = if i == handlers.len() - 1 { "└─" } else { "├─" };
            let declared = if handler.declared { "" } else { ", undeclared" };
            match handler.description {
                Some(ref description) => println!(
                    "   {} {} (status {}{}) {}",
                    prefix, handler.name, handler.status, declared, description
                ),
                None => println!(
                    "   {} {} (status {}{})",
                    prefix, handler.name, handler.status, declared
                ),
            }
        }
    }

    println!();
}
