//! # Dispatch Tree
//!
//! Static path dispatch table.
//!
//! Responsibilities:
//! - Cut `/`-delimited paths into segments (keyed `name=value` segments stay whole)
//! - Build an n-ary tree keyed by segment from (path, handler) registrations
//! - Resolve a query path to its most specific handler, falling back to the
//!   closest ancestor that defines one
//!
//! Build once, then query: registration takes `&mut self`, resolution `&self`.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use contracts::FnHandler;
//! use dispatch_tree::{DispatchTree, SharedHandler};
//!
//! let handler_a: SharedHandler = Arc::new(FnHandler::new("handler_a", |_, _: &mut ()| 0));
//! let handler_key: SharedHandler = Arc::new(FnHandler::new("handler_key", |_, _: &mut ()| 0));
//!
//! let mut tree = DispatchTree::new();
//! tree.register("/a", Some(handler_a)).unwrap();
//! tree.register("/a/dead", None).unwrap();
//! tree.register("/b/interface=", Some(handler_key)).unwrap();
//!
//! assert_eq!(tree.resolve("/a/dead").unwrap().id().as_str(), "handler_a");
//! assert_eq!(tree.resolve("/b/interface=eth0").unwrap().id().as_str(), "handler_key");
//! assert!(tree.resolve("/c").is_none());
//! ```

pub mod error;
pub mod invoker;
pub mod registrar;
pub mod registry;
pub mod resolver;
pub mod segment;
pub mod tree;

pub use contracts::{FnHandler, HandlerId, HandlerStatus, PathHandler, ResolutionKind};
pub use error::DispatchError;
pub use registrar::{RegisterOutcome, Registration, RegistrationReport, RejectedRoute, Replacement};
pub use registry::HandlerRegistry;
pub use resolver::Resolution;
pub use tree::{DispatchNode, DispatchTree, NodeId, SharedHandler, Walk};
