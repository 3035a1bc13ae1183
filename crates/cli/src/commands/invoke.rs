//! `invoke` command implementation.

use anyhow::Result;
use contracts::HandlerStatus;
use tracing::{info, warn};

use super::table::{build_echo_tree, load_table, EchoTree, Echoes};
use crate::cli::InvokeArgs;
use crate::error::CliError;

/// Outcome of invoking one path
#[derive(Debug, PartialEq, Eq)]
enum Invocation {
    /// A handler ran and returned this status
    Handled(HandlerStatus),
    /// Nothing along the path had a handler
    NoHandler,
}

/// Execute the `invoke` command
pub fn run_invoke(args: &InvokeArgs) -> Result<()> {
    info!(config = %args.config.display(), paths = args.paths.len(), "Invoking paths");

    let table = load_table(&args.config)?;
    let (tree, _) = build_echo_tree(&table)?;

    let mut echoes = Echoes::new();
    let mut unresolved = 0;

    for path in &args.paths {
        match invoke_one(&tree, path, &mut echoes)? {
            Invocation::Handled(status) => {
                for line in echoes.drain(..) {
                    println!("{}", line);
                }
                if status != 0 {
                    warn!(path = %path, status, "handler reported failure");
                    println!("  ⚠ status {}", status);
                }
            }
            Invocation::NoHandler => {
                unresolved += 1;
                println!("✗ {}: no handler", path);
                if !args.keep_going {
                    break;
                }
            }
        }
    }

    if unresolved > 0 {
        return Err(CliError::unresolved(unresolved, args.paths.len()).into());
    }
    Ok(())
}

/// Invoke `path`, telling "no handler" apart from a handler's own failure
fn invoke_one(
    tree: &EchoTree,
    path: &str,
    echoes: &mut Echoes,
) -> Result<Invocation, CliError> {
    match tree.invoke(path, echoes) {
        Ok(status) => Ok(Invocation::Handled(status)),
        Err(e) if e.is_no_handler() => Ok(Invocation::NoHandler),
        Err(e) => Err(e.into()),
    }
}
