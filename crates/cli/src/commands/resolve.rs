//! `resolve` command implementation.

use anyhow::{Context, Result};
use contracts::{HandlerId, ResolutionKind};
use observability::DispatchStatsAggregator;
use serde::Serialize;
use tracing::info;

use super::table::{build_echo_tree, load_table, EchoTree};
use crate::cli::ResolveArgs;

/// One resolved query, for JSON output
#[derive(Debug, Serialize)]
struct ResolveResult {
    path: String,
    kind: ResolutionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    handler: Option<String>,
    /// Node that supplied the handler
    #[serde(skip_serializing_if = "Option::is_none")]
    via: Option<String>,
    matched: usize,
    segments: usize,
}

/// Execute the `resolve` command
pub fn run_resolve(args: &ResolveArgs) -> Result<()> {
    info!(config = %args.config.display(), queries = args.paths.len(), "Resolving paths");

    let table = load_table(&args.config)?;
    let (tree, _) = build_echo_tree(&table)?;

    let mut stats = DispatchStatsAggregator::new();
    let results: Vec<ResolveResult> = args
        .paths
        .iter()
        .map(|path| {
            let result = resolve_one(&tree, path);
            stats.update(result.kind, result.handler.as_deref(), result.matched);
            result
        })
        .collect();

    if args.json {
        let json =
            serde_json::to_string_pretty(&results).context("Failed to serialize resolve results")?;
        println!("{}", json);
    } else {
        for result in &results {
            print_result(result);
        }
    }

    if args.stats {
        println!("\n{}", stats.summary());
    }

    Ok(())
}

fn resolve_one(tree: &EchoTree, path: &str) -> ResolveResult {
    let resolution = tree.resolve_match(path);
    ResolveResult {
        path: path.to_string(),
        kind: resolution.kind,
        handler: resolution.handler_id().map(HandlerId::to_string),
        via: resolution.node.map(|id| tree.node_path(id)),
        matched: resolution.matched,
        segments: resolution.segments,
    }
}

fn print_result(result: &ResolveResult) {
    match (&result.handler, &result.via) {
        (Some(handler), Some(via)) if result.kind == ResolutionKind::Ancestor => {
            println!("{} -> {} (ancestor {})", result.path, handler, via);
        }
        (Some(handler), _) => println!("{} -> {}", result.path, handler),
        (None, _) => println!("{} -> (no handler)", result.path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{RouteSpec, RouteTable};

    fn tree() -> EchoTree {
        let table = RouteTable {
            routes: vec![
                RouteSpec::new("/a", "handler_a"),
                RouteSpec::structural("/a/dead"),
                RouteSpec::new("/b/interface=", "handler_key"),
            ],
            ..Default::default()
        };
        build_echo_tree(&table).unwrap().0
    }

    #[test]
    fn test_resolve_one_ancestor() {
        let result = resolve_one(&tree(), "/a/dead");
        assert_eq!(result.kind, ResolutionKind::Ancestor);
        assert_eq!(result.handler.as_deref(), Some("handler_a"));
        assert_eq!(result.via.as_deref(), Some("/a"));
    }

    #[test]
    fn test_resolve_one_keyed_exact() {
        let result = resolve_one(&tree(), "/b/interface=eth0");
        assert_eq!(result.kind, ResolutionKind::Exact);
        assert_eq!(result.via.as_deref(), Some("/b/interface="));
    }

    #[test]
    fn test_resolve_one_miss_serializes_without_handler() {
        let result = resolve_one(&tree(), "/z");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], "miss");
        assert!(json.get("handler").is_none());
    }
}
