// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for cmlint.
//!
//! This module handles loading and parsing rule files, the built-in
//! presets, and merging presets with local declarations.

pub mod default;
mod loader;
mod schema;

pub use default::{example_config, preset, project_rules};
pub use loader::{
    load_config, load_config_from, merge_configs, parse_config, parse_json_config, resolve_config,
};
pub use schema::*;
