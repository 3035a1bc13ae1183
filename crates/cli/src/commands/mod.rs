//! Command implementations.

mod info;
mod invoke;
mod resolve;
mod table;
mod validate;

pub use info::run_info;
pub use invoke::run_invoke;
pub use resolve::run_resolve;
pub use validate::run_validate;
