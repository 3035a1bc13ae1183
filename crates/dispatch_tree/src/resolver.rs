//! Resolver - finds the handler applicable to a query path
//!
//! The query is canonicalized (`interface=eth0` -> `interface=`) and walked
//! level by level. Every matched node carrying a handler becomes the current
//! candidate, so the deepest one wins; the walk stops at the first segment
//! with no matching node and the last candidate is returned
//! (closest-ancestor fallback).

use std::fmt;

use contracts::{HandlerId, ResolutionKind};
use observability::record_resolution;
use tracing::{debug, trace};

use crate::segment;
use crate::tree::{DispatchTree, NodeId, SharedHandler};

/// Full result of a resolution walk
pub struct Resolution<'t, C = ()> {
    /// Handler found, if any
    pub handler: Option<&'t SharedHandler<C>>,
    /// Node that supplied the handler
    pub node: Option<NodeId>,
    /// Number of query segments that matched a node
    pub matched: usize,
    /// Number of segments in the query
    pub segments: usize,
    /// Exact / ancestor / miss
    pub kind: ResolutionKind,
}

impl<C> Resolution<'_, C> {
    /// Identity of the resolved handler
    pub fn handler_id(&self) -> Option<&HandlerId> {
        self.handler.map(|h| h.id())
    }

    /// True if a handler was found
    pub fn is_hit(&self) -> bool {
        self.handler.is_some()
    }
}

impl<C> fmt::Debug for Resolution<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("handler", &self.handler_id())
            .field("node", &self.node)
            .field("matched", &self.matched)
            .field("segments", &self.segments)
            .field("kind", &self.kind)
            .finish()
    }
}

impl<C> DispatchTree<C> {
    /// Return the handler applicable to `path`, if any.
    ///
    /// An exact match with a handler wins; otherwise the closest ancestor that
    /// defined one is used. A path not starting with `/` has no handler.
    pub fn resolve(&self, path: &str) -> Option<&SharedHandler<C>> {
        self.resolve_match(path).handler
    }

    /// Same walk as [`resolve`](Self::resolve), with the details of how the
    /// handler was found.
    pub fn resolve_match(&self, path: &str) -> Resolution<'_, C> {
        if !segment::is_rooted(path) {
            debug!(path, "query path does not start at root, no handler");
            record_resolution(ResolutionKind::Miss, 0);
            return Resolution {
                handler: None,
                node: None,
                matched: 0,
                segments: segment::split(path).len(),
                kind: ResolutionKind::Miss,
            };
        }

        let segments = segment::split_and_canonicalize(path);
        trace!(path, ?segments, "resolving");

        let mut group = self.top_level();
        let mut candidate: Option<NodeId> = None;
        let mut last_matched: Option<NodeId> = None;
        let mut matched = 0;

        for name in &segments {
            let Some(id) = self.find_in_group(group, name) else {
                break;
            };
            let node = self.node_ref(id);
            if node.has_handler() {
                candidate = Some(id);
            }
            matched += 1;
            last_matched = Some(id);
            group = node.children();
        }

        let kind = match candidate {
            None => ResolutionKind::Miss,
            Some(id) if matched == segments.len() && last_matched == Some(id) => {
                ResolutionKind::Exact
            }
            Some(_) => ResolutionKind::Ancestor,
        };
        let handler = candidate.and_then(|id| self.node_ref(id).handler());

        debug!(
            path,
            matched,
            segments = segments.len(),
            kind = %kind,
            handler = handler.map(|h| h.id().as_str()).unwrap_or("-"),
            "resolved"
        );
        record_resolution(kind, matched);

        Resolution {
            handler,
            node: candidate,
            matched,
            segments: segments.len(),
            kind,
        }
    }
}
