//! # Contracts
//!
//! Frozen interface contracts shared by every crate of the path dispatcher.
//! Business crates depend on this crate only, reverse dependencies are prohibited.
//!
//! ## Path Model
//! - Paths are `/`-delimited, rooted at `/` (e.g. `/b/interface=eth0`)
//! - A keyed list segment is written `name=value`; its canonical form is `name=`
//! - Handlers receive the original query path, never the canonical one

mod error;
mod handler;
mod handler_id;
mod resolution;
mod route_table;

pub use error::*;
pub use handler::{FnHandler, HandlerStatus, PathHandler};
pub use handler_id::HandlerId;
pub use resolution::ResolutionKind;
pub use route_table::*;
