//! Registrar - builds the dispatch tree from (path, handler) pairs
//!
//! Registration keys are literal: a path meant to match any key value must be
//! registered in its canonical form (`/b/interface=`).

use std::sync::Arc;

use contracts::HandlerId;
use observability::record_registration;
use tracing::{debug, warn};

use crate::error::DispatchError;
use crate::segment;
use crate::tree::{DispatchTree, NodeId, SharedHandler};

/// What a registration did at its terminal node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// Handler set on a node that had none
    Installed(HandlerId),
    /// Handler overwrote a different one (non-fatal, logged as a warning)
    Replaced {
        previous: HandlerId,
        current: HandlerId,
    },
    /// The very same handler was already there
    Unchanged(HandlerId),
    /// No handler given; only the path's nodes were ensured
    Structural,
}

impl RegisterOutcome {
    /// Stable label (metrics)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Installed(_) => "installed",
            Self::Replaced { .. } => "replaced",
            Self::Unchanged(_) => "unchanged",
            Self::Structural => "structural",
        }
    }
}

/// Result of one successful registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Terminal node of the registered path
    pub node: NodeId,
    /// What happened to its handler
    pub outcome: RegisterOutcome,
}

/// A registration that was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRoute {
    pub path: String,
    pub reason: String,
}

/// A handler replacement that happened during a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub path: String,
    pub previous: HandlerId,
    pub current: HandlerId,
}

/// Summary of a batch registration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationReport {
    /// Registrations applied (any outcome)
    pub registered: usize,
    /// Registrations skipped, in batch order
    pub rejected: Vec<RejectedRoute>,
    /// Handler replacements, in batch order
    pub replaced: Vec<Replacement>,
}

impl RegistrationReport {
    /// True if nothing was rejected or replaced
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.replaced.is_empty()
    }
}

impl<C> DispatchTree<C> {
    /// Register `handler` under `path`.
    ///
    /// Every segment of the path gets a node, reusing existing ones. With
    /// `handler = None` the nodes are only ensured (structural element). A
    /// path not starting with `/` is rejected and the tree left untouched.
    ///
    /// # Errors
    /// [`DispatchError::InvalidPath`] for a path not starting at the root.
    pub fn register(
        &mut self,
        path: &str,
        handler: Option<SharedHandler<C>>,
    ) -> Result<Registration, DispatchError> {
        if !segment::is_rooted(path) {
            let reason = if path.is_empty() {
                "empty path"
            } else {
                "must start with '/'"
            };
            warn!(path, reason, "registration path rejected, skipped");
            record_registration("rejected");
            return Err(DispatchError::invalid_path(path, reason));
        }

        let mut current: Option<NodeId> = None;
        for name in segment::split(path) {
            if segment::is_keyed(name) && segment::canonicalize(name) != name {
                warn!(
                    path,
                    segment = name,
                    "keyed segment registered with a value, queries only reach its `name=` form"
                );
            }
            current = Some(self.insert_or_get(current, name));
        }
        let node = current.ok_or_else(|| DispatchError::invalid_path(path, "no segments"))?;

        let outcome = match handler {
            Some(handler) => self.set_handler(node, handler),
            None => RegisterOutcome::Structural,
        };

        match &outcome {
            RegisterOutcome::Replaced { previous, current } => {
                warn!(
                    path,
                    node = %self.node_ref(node).name(),
                    previous = %previous,
                    current = %current,
                    "replacing existing handler"
                );
            }
            other => debug!(path, outcome = other.label(), "route registered"),
        }
        record_registration(outcome.label());

        Ok(Registration { node, outcome })
    }

    /// Register a batch of routes, in order.
    ///
    /// A bad entry is reported and skipped; it never aborts the batch.
    pub fn register_all<I, P>(&mut self, routes: I) -> RegistrationReport
    where
        I: IntoIterator<Item = (P, Option<SharedHandler<C>>)>,
        P: AsRef<str>,
    {
        let mut report = RegistrationReport::default();

        for (path, handler) in routes {
            let path = path.as_ref();
            match self.register(path, handler) {
                Ok(registration) => {
                    report.registered += 1;
                    if let RegisterOutcome::Replaced { previous, current } = registration.outcome {
                        report.replaced.push(Replacement {
                            path: path.to_string(),
                            previous,
                            current,
                        });
                    }
                }
                Err(e) => report.rejected.push(RejectedRoute {
                    path: path.to_string(),
                    reason: e.to_string(),
                }),
            }
        }

        debug!(
            registered = report.registered,
            rejected = report.rejected.len(),
            replaced = report.replaced.len(),
            nodes = self.len(),
            "batch registration finished"
        );
        report
    }

    fn set_handler(&mut self, node: NodeId, handler: SharedHandler<C>) -> RegisterOutcome {
        let current = handler.id().clone();
        let slot = self.node_mut(node).handler_slot();

        let existing = slot
            .as_ref()
            .map(|old| (Arc::ptr_eq(old, &handler), old.id().clone()));

        match existing {
            Some((true, _)) => RegisterOutcome::Unchanged(current),
            Some((false, previous)) => {
                *slot = Some(handler);
                RegisterOutcome::Replaced { previous, current }
            }
            None => {
                *slot = Some(handler);
                RegisterOutcome::Installed(current)
            }
        }
    }
}
