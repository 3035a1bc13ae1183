//! Handler registry - binds route-table handler names to callables

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use contracts::{FnHandler, HandlerId, HandlerStatus, RouteTable};
use tracing::{info, instrument, warn};

use crate::error::DispatchError;
use crate::registrar::RegistrationReport;
use crate::tree::{DispatchTree, SharedHandler};

/// Name -> handler lookup used to build a tree from a [`RouteTable`]
pub struct HandlerRegistry<C = ()> {
    handlers: HashMap<HandlerId, SharedHandler<C>>,
}

impl<C> Default for HandlerRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for HandlerRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}

impl<C> HandlerRegistry<C> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Add a handler under its own id, returning the one it displaced
    pub fn insert(&mut self, handler: SharedHandler<C>) -> Option<SharedHandler<C>> {
        let id = handler.id().clone();
        let previous = self.handlers.insert(id.clone(), handler);
        if previous.is_some() {
            warn!(handler = %id, "handler registry entry replaced");
        }
        previous
    }

    /// Add a closure under `name`
    pub fn insert_fn<F>(&mut self, name: impl Into<HandlerId>, f: F) -> Option<SharedHandler<C>>
    where
        C: 'static,
        F: Fn(&str, &mut C) -> HandlerStatus + Send + Sync + 'static,
    {
        self.insert(Arc::new(FnHandler::new::<C>(name, f)))
    }

    /// Look up a handler by name
    pub fn get(&self, name: &str) -> Option<&SharedHandler<C>> {
        self.handlers.get(name)
    }

    /// True if `name` is known
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Known names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(HandlerId::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True if empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<C> DispatchTree<C> {
    /// Build a tree from a route table, binding handler names via `registry`.
    ///
    /// Every handler name is checked before the first registration, so an
    /// unknown name leaves nothing half-built. Rejected and replaced routes are
    /// reported, not fatal.
    ///
    /// # Errors
    /// [`DispatchError::UnknownHandler`] if a route names a handler missing
    /// from `registry`.
    #[instrument(
        name = "dispatch_tree_from_table",
        skip(table, registry),
        fields(routes = table.routes.len(), handlers = registry.len())
    )]
    pub fn from_table(
        table: &RouteTable,
        registry: &HandlerRegistry<C>,
    ) -> Result<(Self, RegistrationReport), DispatchError> {
        let mut routes = Vec::with_capacity(table.routes.len());
        for route in &table.routes {
            let handler = match route.handler.as_deref() {
                Some(name) => Some(
                    registry
                        .get(name)
                        .cloned()
                        .ok_or_else(|| DispatchError::unknown_handler(name, &route.path))?,
                ),
                None => None,
            };
            routes.push((route.path.as_str(), handler));
        }

        let mut tree = Self::new();
        let report = tree.register_all(routes);

        info!(
            nodes = tree.len(),
            handlers = tree.handler_count(),
            rejected = report.rejected.len(),
            replaced = report.replaced.len(),
            "dispatch tree built"
        );

        Ok((tree, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::RouteSpec;

    fn registry() -> HandlerRegistry {
        let mut registry = HandlerRegistry::new();
        registry.insert_fn("handler_a", |_, _: &mut ()| 0);
        registry.insert_fn("handler_b", |_, _: &mut ()| 1);
        registry
    }

    #[test]
    fn test_registry_lookup() {
        let registry = registry();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("handler_a"));
        assert!(registry.get("handler_x").is_none());
        assert_eq!(registry.names(), vec!["handler_a", "handler_b"]);
    }

    #[test]
    fn test_registry_insert_replaces() {
        let mut registry = registry();
        let previous = registry.insert_fn("handler_a", |_, _: &mut ()| 9);
        assert!(previous.is_some());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("handler_a").unwrap().handle("/", &mut ()), 9);
    }

    #[test]
    fn test_from_table() {
        let table = RouteTable {
            routes: vec![
                RouteSpec::new("/a", "handler_a"),
                RouteSpec::structural("/a/dead"),
                RouteSpec::new("/b", "handler_b"),
                RouteSpec::new("relative", "handler_b"),
            ],
            ..Default::default()
        };

        let (tree, report) = DispatchTree::from_table(&table, &registry()).unwrap();

        assert_eq!(report.registered, 3);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(tree.handler_count(), 2);
        assert_eq!(
            tree.resolve("/a/dead").map(|h| h.id().as_str()),
            Some("handler_a")
        );
    }

    #[test]
    fn test_from_table_unknown_handler() {
        let table = RouteTable {
            routes: vec![
                RouteSpec::new("/a", "handler_a"),
                RouteSpec::new("/x", "handler_x"),
            ],
            ..Default::default()
        };

        let err = DispatchTree::from_table(&table, &registry()).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::UnknownHandler { ref handler, ref path } if handler == "handler_x" && path == "/x"
        ));
    }

    #[test]
    fn test_shared_handler_across_routes_is_same_arc() {
        let table = RouteTable {
            routes: vec![
                RouteSpec::new("/a", "handler_a"),
                RouteSpec::new("/c", "handler_a"),
            ],
            ..Default::default()
        };
        let (tree, _) = DispatchTree::from_table(&table, &registry()).unwrap();

        let a = tree.resolve("/a").unwrap();
        let c = tree.resolve("/c").unwrap();
        assert!(Arc::ptr_eq(a, c));
    }
}
