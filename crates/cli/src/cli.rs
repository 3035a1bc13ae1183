//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Path Dispatch - resolve hierarchical paths against a static handler table
#[derive(Parser, Debug)]
#[command(
    name = "path-dispatch",
    author,
    version,
    about = "Static hierarchical path dispatch",
    long_about = "Builds a dispatch tree from a route table and resolves paths against it.\n\n\
                  A path with no handler of its own falls back to the closest ancestor \n\
                  that has one; keyed segments (name=value) match their name= entry."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "PATH_DISPATCH_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "PATH_DISPATCH_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve paths to their handlers
    Resolve(ResolveArgs),

    /// Resolve paths and invoke their handlers
    Invoke(InvokeArgs),

    /// Validate a route table without dispatching
    Validate(ValidateArgs),

    /// Display the dispatch tree built from a route table
    Info(InfoArgs),
}

/// Arguments for the `resolve` command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Path to route table (TOML or JSON)
    #[arg(short, long, default_value = "routes.toml", env = "PATH_DISPATCH_TABLE")]
    pub config: PathBuf,

    /// Paths to resolve
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Print a resolution summary after the results
    #[arg(long)]
    pub stats: bool,
}

/// Arguments for the `invoke` command
#[derive(Parser, Debug)]
pub struct InvokeArgs {
    /// Path to route table (TOML or JSON)
    #[arg(short, long, default_value = "routes.toml", env = "PATH_DISPATCH_TABLE")]
    pub config: PathBuf,

    /// Paths to invoke, in order
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Continue with the remaining paths after one finds no handler
    #[arg(long)]
    pub keep_going: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to route table to validate
    #[arg(short, long, default_value = "routes.toml", env = "PATH_DISPATCH_TABLE")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to route table
    #[arg(short, long, default_value = "routes.toml", env = "PATH_DISPATCH_TABLE")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// List declared and referenced handlers
    #[arg(long)]
    pub handlers: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::try_parse_from([
            "path-dispatch",
            "resolve",
            "-c",
            "table.toml",
            "/a/dead",
            "/b/interface=eth0",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.config, PathBuf::from("table.toml"));
                assert_eq!(args.paths, vec!["/a/dead", "/b/interface=eth0"]);
                assert!(args.json);
                assert!(!args.stats);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_requires_a_path() {
        assert!(Cli::try_parse_from(["path-dispatch", "resolve", "-c", "t.toml"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "path-dispatch",
            "invoke",
            "/a",
            "-vv",
            "--log-format",
            "compact",
            "--keep-going",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.log_format, LogFormat::Compact));
        assert!(matches!(cli.command, Commands::Invoke(ref a) if a.keep_going));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["path-dispatch", "-q", "-v", "info"]).is_err());
    }

    #[test]
    fn test_log_format_maps_to_observability() {
        assert_eq!(
            observability::LogFormat::from(LogFormat::Json),
            observability::LogFormat::Json
        );
    }
}
