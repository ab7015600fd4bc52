//! Configuration loading.
//!
//! Settings come from an optional YAML file at `.depsupply/config.yml` in
//! the build dir. Command-line flags override individual settings.
//!
//! # Example
//!
//! ```
//! use depsupply::config::load_config;
//! use depsupply::planner::BackendKind;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::create_dir_all(temp.path().join(".depsupply")).unwrap();
//! fs::write(temp.path().join(".depsupply/config.yml"), "settings:\n  backend: npm\n").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.settings.backend, BackendKind::Npm);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_file, parse_config, project_config_path};
pub use schema::{Settings, SupplyConfig, STATE_DIR};
