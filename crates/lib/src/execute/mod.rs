//! External command execution.
//!
//! Commands are described by an [`Invocation`] built from a [`Context`] and
//! handed to a [`Runner`]. Execution is strictly sequential: each call blocks
//! until the child exits, and there is no timeout or cancellation.

mod context;
mod runner;
mod types;

pub use context::Context;
pub use runner::{DryRunner, ProcessRunner, Runner};
pub use types::{ExecError, Invocation};
