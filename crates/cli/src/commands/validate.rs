//! `validate` command implementation.

use anyhow::{Context, Result};
use config_loader::validator::collect_warnings;
use contracts::RouteTable;
use dispatch_tree::RegistrationReport;
use serde::Serialize;
use tracing::info;

use super::table::{build_echo_tree, load_table};
use crate::cli::ValidateArgs;
use crate::error::CliError;

/// Validation result for JSON output
#[derive(Debug, Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    rejected: Vec<RejectedInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    replaced: Vec<ReplacedInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<TableSummary>,
}

#[derive(Debug, Serialize)]
struct RejectedInfo {
    path: String,
    reason: String,
}

#[derive(Debug, Serialize)]
struct ReplacedInfo {
    path: String,
    previous: String,
    current: String,
}

#[derive(Debug, Serialize)]
struct TableSummary {
    version: String,
    route_count: usize,
    bound_route_count: usize,
    handler_count: usize,
    node_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating route table");

    let config_path = args.config.display().to_string();
    let result = match load_table(&args.config) {
        Ok(table) => validate_table(config_path, &table),
        Err(e) => invalid(config_path, e.to_string()),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    match result.error {
        None => Ok(()),
        Some(message) => Err(CliError::config_validation(message).into()),
    }
}

/// Dry-run registration of a loaded table
fn validate_table(config_path: String, table: &RouteTable) -> ValidationResult {
    let (tree, report) = match build_echo_tree(table) {
        Ok(built) => built,
        Err(e) => return invalid(config_path, e.to_string()),
    };
    let RegistrationReport {
        rejected, replaced, ..
    } = report;

    ValidationResult {
        valid: true,
        config_path,
        error: None,
        warnings: collect_warnings(table),
        rejected: rejected
            .into_iter()
            .map(|r| RejectedInfo {
                path: r.path,
                reason: r.reason,
            })
            .collect(),
        replaced: replaced
            .into_iter()
            .map(|r| ReplacedInfo {
                path: r.path,
                previous: r.previous.to_string(),
                current: r.current.to_string(),
            })
            .collect(),
        summary: Some(TableSummary {
            version: format!("{:?}", table.version),
            route_count: table.routes.len(),
            bound_route_count: table.bound_route_count(),
            handler_count: table.all_handler_names().len(),
            node_count: tree.len(),
        }),
    }
}

fn invalid(config_path: String, error: String) -> ValidationResult {
    ValidationResult {
        valid: false,
        config_path,
        error: Some(error),
        warnings: Vec::new(),
        rejected: Vec::new(),
        replaced: Vec::new(),
        summary: None,
    }
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Route table is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!(
                "  Routes: {} ({} with handler)",
                summary.route_count, summary.bound_route_count
            );
            println!("  Handlers: {}", summary.handler_count);
            println!("  Nodes: {}", summary.node_count);
        }

        if !result.rejected.is_empty() {
            println!("\n✗ Rejected registrations:");
            for rejected in &result.rejected {
                println!("  - {}: {}", rejected.path, rejected.reason);
            }
        }

        if !result.replaced.is_empty() {
            println!("\n⚠ Replaced handlers:");
            for replaced in &result.replaced {
                println!(
                    "  - {}: {} -> {}",
                    replaced.path, replaced.previous, replaced.current
                );
            }
        }

        if !result.warnings.is_empty() {
            println!("\n⚠ Warnings:");
            for warning in &result.warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Route table is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
