//! Route table loading and echo-handler tree construction shared by commands.

use std::path::Path;

use contracts::{HandlerStatus, RouteTable};
use dispatch_tree::{DispatchTree, HandlerRegistry, RegistrationReport};
use tracing::{debug, info};

use crate::error::{CliError, Result};

/// Lines written by echo handlers, one per call
pub type Echoes = Vec<String>;

/// Tree whose handlers echo into an [`Echoes`] buffer
pub type EchoTree = DispatchTree<Echoes>;

/// Load and validate a route table from disk
pub fn load_table(path: &Path) -> Result<RouteTable> {
    if !path.exists() {
        return Err(CliError::config_not_found(path.display().to_string()));
    }

    let table = config_loader::ConfigLoader::load_from_path(path)
        .map_err(|e| CliError::config_load(path.display().to_string(), e))?;

    info!(
        config = %path.display(),
        routes = table.routes.len(),
        handlers = table.all_handler_names().len(),
        "Route table loaded"
    );
    Ok(table)
}

/// One echo handler per declared or referenced name.
///
/// Each call pushes `"<name>: <path>"` and returns the status declared for the
/// name (0 when undeclared).
pub fn echo_registry(table: &RouteTable) -> HandlerRegistry<Echoes> {
    let mut registry = HandlerRegistry::new();
    for name in table.all_handler_names() {
        let status: HandlerStatus = table.handlers.get(name).map_or(0, |spec| spec.status);
        let label = name.to_string();
        registry.insert_fn(name, move |path: &str, out: &mut Echoes| {
            out.push(format!("{label}: {path}"));
            status
        });
    }
    debug!(handlers = registry.len(), "echo handlers prepared");
    registry
}

/// Build the echo tree for `table`
pub fn build_echo_tree(table: &RouteTable) -> Result<(EchoTree, RegistrationReport)> {
    let registry = echo_registry(table);
    Ok(DispatchTree::from_table(table, &registry)?)
}
