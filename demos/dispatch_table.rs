//! Dispatch Table Example
//!
//! Builds the sample dispatch table, prints the tree and runs the sample
//! queries through it. Each handler prints its name and the path it got.
//!
//! Run with: cargo run -p demos --bin dispatch_table [routes.toml]

use std::path::Path;
use std::sync::Arc;

use config_loader::ConfigLoader;
use contracts::{RouteSpec, RouteTable};
use dispatch_tree::{DispatchTree, FnHandler, HandlerRegistry, SharedHandler};
use observability::DispatchStatsAggregator;

const QUERIES: [&str; 10] = [
    "/",
    "/a",
    "/a/dead",
    "/a/aa",
    "/a/ab",
    "/a/ab/aba",
    "/a/aa/xxx",
    "/b",
    "/b/interface",
    "/b/interface=eth0",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Dispatch Table Demo");

    // ==== Stage 1: Use the built-in table or load one from file ====
    let table = if let Some(path) = std::env::args().nth(1) {
        tracing::info!(path = %path, "Loading route table");
        ConfigLoader::load_from_path(Path::new(&path))?
    } else {
        create_sample_table()
    };

    // ==== Stage 2: Bind handler names ====
    let mut registry: HandlerRegistry = HandlerRegistry::new();
    for name in table.all_handler_names() {
        registry.insert(printing_handler(name));
    }

    // ==== Stage 3: Build the tree ====
    let (tree, report) = DispatchTree::from_table(&table, &registry)?;
    for rejected in &report.rejected {
        tracing::warn!(path = %rejected.path, reason = %rejected.reason, "Route rejected");
    }
    println!("{tree}");

    // ==== Stage 4: Dispatch ====
    let mut stats = DispatchStatsAggregator::new();
    for query in QUERIES {
        let resolution = tree.resolve_match(query);
        stats.update(
            resolution.kind,
            resolution.handler_id().map(|id| id.as_str()),
            resolution.matched,
        );

        match tree.invoke(query, &mut ()) {
            Ok(_) => {}
            Err(e) if e.is_no_handler() => println!("{query}: no handler"),
            Err(e) => return Err(e.into()),
        }
    }

    println!("\n{}", stats.summary());
    Ok(())
}

fn printing_handler(name: &str) -> SharedHandler {
    let label = name.to_string();
    Arc::new(FnHandler::new(name, move |path: &str, _: &mut ()| {
        println!("{label}: {path}");
        0
    }))
}

/// Same table as `sample_routes.toml`
fn create_sample_table() -> RouteTable {
    RouteTable {
        routes: vec![
            RouteSpec::new("/a", "handler_a"),
            RouteSpec::new("/a/aa", "handler_aa"),
            RouteSpec::structural("/a/dead"),
            RouteSpec::new("/a/ab", "handler_ab"),
            RouteSpec::new("/a/ab/aba", "handler_aba"),
            RouteSpec::new("/b", "handler_b"),
            RouteSpec::new("/b/interface", "handler_binterface"),
            RouteSpec::new("/b/interface=", "handler_binterface_key"),
            RouteSpec::new("/", "handler_default"),
        ],
        ..Default::default()
    }
}
