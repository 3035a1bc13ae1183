//! Dispatch tree storage
//!
//! Nodes live in a slab and are addressed by [`NodeId`]. Every node owns an
//! ordered list of child ids (its sibling group); the top-level group is held
//! by the tree itself. The parent id stored on a node is a lookup key for
//! introspection and is never followed by resolution.

use std::fmt;
use std::sync::Arc;

use contracts::{HandlerId, PathHandler};
use slab::Slab;

use crate::segment::{ROOT, SEPARATOR};

/// Shared, type-erased handler as stored in the tree
pub type SharedHandler<C = ()> = Arc<dyn PathHandler<C>>;

/// Index of a node inside one [`DispatchTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// One path segment at one tree level
pub struct DispatchNode<C = ()> {
    name: String,
    handler: Option<SharedHandler<C>>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl<C> DispatchNode<C> {
    fn new(name: &str, parent: Option<NodeId>) -> Self {
        Self {
            name: name.to_owned(),
            handler: None,
            children: Vec::new(),
            parent,
        }
    }

    /// Segment this node stands for (unique among its siblings)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handler registered exactly here, if any
    pub fn handler(&self) -> Option<&SharedHandler<C>> {
        self.handler.as_ref()
    }

    /// Identity of the handler registered here
    pub fn handler_id(&self) -> Option<&HandlerId> {
        self.handler.as_ref().map(|h| h.id())
    }

    /// True if a handler is registered here
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Child sibling group, in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parent node, `None` for a top-level node
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// True if the node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn handler_slot(&mut self) -> &mut Option<SharedHandler<C>> {
        &mut self.handler
    }
}

impl<C> fmt::Debug for DispatchNode<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchNode")
            .field("name", &self.name)
            .field("handler", &self.handler_id())
            .field("children", &self.children)
            .field("parent", &self.parent)
            .finish()
    }
}

/// Static dispatch table keyed by path segment.
///
/// Built once through [`DispatchTree::register`], then queried through
/// [`DispatchTree::resolve`]. Registration needs `&mut self` and resolution
/// only `&self`, so once built the tree can be shared between any number of
/// readers without locking.
pub struct DispatchTree<C = ()> {
    nodes: Slab<DispatchNode<C>>,
    top_level: Vec<NodeId>,
}

impl<C> Default for DispatchTree<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for DispatchTree<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTree")
            .field("nodes", &self.nodes.len())
            .field("handlers", &self.handler_count())
            .field("top_level", &self.top_level)
            .finish_non_exhaustive()
    }
}

impl<C> DispatchTree<C> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self {
            nodes: Slab::new(),
            top_level: Vec::new(),
        }
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if nothing was registered yet
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes carrying a handler
    pub fn handler_count(&self) -> usize {
        self.nodes.iter().filter(|(_, n)| n.has_handler()).count()
    }

    /// Top-level sibling group (normally just `/`)
    pub fn top_level(&self) -> &[NodeId] {
        &self.top_level
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&DispatchNode<C>> {
        self.nodes.get(id.0)
    }

    /// Children of a node; empty for an unknown id
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children()).unwrap_or(&[])
    }

    /// Find a top-level node by exact name
    pub fn find_top_level(&self, name: &str) -> Option<NodeId> {
        self.find_in_group(&self.top_level, name)
    }

    /// Find a direct child of `parent` by exact name
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.find_in_group(self.children_of(parent), name)
    }

    /// Find the node registered under `path`, without canonicalization
    pub fn find_path(&self, path: &str) -> Option<NodeId> {
        let mut segments = crate::segment::split(path).into_iter();
        let first = self.find_top_level(segments.next()?)?;
        segments.try_fold(first, |parent, name| self.find_child(parent, name))
    }

    /// Number of ancestors of a node (0 for a top-level node)
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count().saturating_sub(1)
    }

    /// Rebuild the registration path of a node from its parent chain.
    ///
    /// `node_path` of the `aba` node under `/a/ab` is `/a/ab/aba`.
    pub fn node_path(&self, id: NodeId) -> String {
        let mut names: Vec<&str> = self
            .ancestors(id)
            .map(|a| self.nodes[a.0].name.as_str())
            .collect();
        names.reverse();

        let mut path = String::new();
        for name in names {
            if name == ROOT {
                path.push_str(ROOT);
                continue;
            }
            if !path.ends_with(SEPARATOR) {
                path.push(SEPARATOR);
            }
            path.push_str(name);
        }
        path
    }

    /// Depth-first, pre-order walk over every node with its depth.
    ///
    /// Siblings are visited in insertion order.
    pub fn walk(&self) -> Walk<'_, C> {
        Walk {
            tree: self,
            stack: self.top_level.iter().rev().map(|&id| (0, id)).collect(),
        }
    }

    /// Linear scan of a sibling group by exact name
    pub(crate) fn find_in_group(&self, group: &[NodeId], name: &str) -> Option<NodeId> {
        group
            .iter()
            .copied()
            .find(|id| self.nodes[id.0].name == name)
    }

    /// Return the named node of a group, appending it first if missing.
    ///
    /// `parent = None` addresses the top-level group.
    pub(crate) fn insert_or_get(&mut self, parent: Option<NodeId>, name: &str) -> NodeId {
        let group = match parent {
            Some(p) => self.nodes[p.0].children.as_slice(),
            None => self.top_level.as_slice(),
        };
        if let Some(existing) = self.find_in_group(group, name) {
            return existing;
        }

        let id = NodeId(self.nodes.insert(DispatchNode::new(name, parent)));
        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.top_level.push(id),
        }
        id
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut DispatchNode<C> {
        &mut self.nodes[id.0]
    }

    pub(crate) fn node_ref(&self, id: NodeId) -> &DispatchNode<C> {
        &self.nodes[id.0]
    }

    fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes.get(id.0).map(|_| id), move |cur| {
            self.nodes[cur.0].parent
        })
    }
}

/// Iterator returned by [`DispatchTree::walk`]
pub struct Walk<'t, C> {
    tree: &'t DispatchTree<C>,
    stack: Vec<(usize, NodeId)>,
}

impl<C> Iterator for Walk<'_, C> {
    type Item = (usize, NodeId);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, id) = self.stack.pop()?;
        let children = &self.tree.nodes[id.0].children;
        self.stack
            .extend(children.iter().rev().map(|&child| (depth + 1, child)));
        Some((depth, id))
    }
}

/// Indented dump, one node per line: `[name] handler` or `[name] -`
impl<C> fmt::Display for DispatchTree<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, id) in self.walk() {
            let node = &self.nodes[id.0];
            let handler = node.handler_id().map(HandlerId::as_str).unwrap_or("-");
            writeln!(f, "{:indent$}[{}] {}", "", node.name, handler, indent = depth * 4)?;
        }
        Ok(())
    }
}
