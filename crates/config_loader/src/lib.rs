//! # Config Loader
//!
//! Route table loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON route tables
//! - Validate handler names and route paths
//! - Collect non-fatal warnings for diagnostics
//! - Generate `RouteTable`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let table = ConfigLoader::load_from_path(Path::new("routes.toml")).unwrap();
//! println!("Routes: {}", table.routes.len());
//! ```

mod parser;
pub mod validator;

pub use contracts::RouteTable;
pub use parser::ConfigFormat;

use contracts::ContractError;
use std::path::Path;

/// Route table loader
///
/// Provides static methods to load a table from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a route table from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<RouteTable, ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load a route table from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<RouteTable, ContractError> {
        Self::parse_and_validate(content, format)
    }

    /// Serialize RouteTable to TOML string
    pub fn to_toml(table: &RouteTable) -> Result<String, ContractError> {
        toml::to_string_pretty(table)
            .map_err(|e| ContractError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize RouteTable to JSON string
    pub fn to_json(table: &RouteTable) -> Result<String, ContractError> {
        serde_json::to_string_pretty(table)
            .map_err(|e| ContractError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer table format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// Read table file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Parse and validate table content
    fn parse_and_validate(content: &str, format: ConfigFormat) -> Result<RouteTable, ContractError> {
        let table = parser::parse(content, format)?;
        validator::validate(&table)?;
        Ok(table)
    }
}
