//! Command-line interface and orchestration for menu-visibility
//!
//! This module implements the CLI commands and ties the other modules together:
//! it loads configuration and menus, resolves the request context, runs the
//! evaluator, and hands the results to the report generators.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **filter**: Print the items of each menu that are visible for the request
//! - **explain**: Print every item with its decision and the reasons it was hidden
//! - **stats**: Print visible/hidden counts, overall and per menu
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file, and optionally a menu file
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! appropriate command handler. The evaluating commands follow the same pattern:
//!
//! 1. Load the configuration and derive the feature flags for the pass
//! 2. Load the menu file, applying the configured default rule
//! 3. Resolve the request context once, geolocating only if an item needs it
//! 4. Evaluate and render the report to the console or a JSON file
//!
//! The `common` module holds the shared argument definitions, logging setup, and
//! the session that carries one pass's inputs.

mod common;
mod config;
mod explain;
mod filter;
mod host;
mod init;
mod run;
mod stats;
mod validate;

#[cfg(debug_assertions)]
pub use config::{Config, DEFAULT_CONFIG_TOML};

pub use explain::{ExplainArgs, explain_menus};
pub use filter::{FilterArgs, filter_menus};
pub use host::Host;
#[cfg(test)]
pub use host::TestHost;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use stats::{StatsArgs, menu_stats};
pub use validate::{ValidateArgs, validate_config};
