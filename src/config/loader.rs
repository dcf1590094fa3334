// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading and merging.

use crate::error::{ConfigError, LintError, Result};
use std::path::Path;

use super::default::preset;
use super::schema::LintConfig;

/// Load configuration from an explicit path, or fall back to the defaults.
pub fn load_config(path: Option<&Path>) -> Result<LintConfig> {
    match path {
        Some(path) => load_config_from(path),
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Ok(LintConfig::default())
        }
    }
}

/// Load configuration from a specific path.
///
/// Files ending in `.json` are read as JSON, everything else as TOML.
pub fn load_config_from(path: &Path) -> Result<LintConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(LintError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        LintError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        parse_json_config(&content)
    } else {
        parse_config(&content)
    }
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<LintConfig> {
    toml::from_str(content).map_err(|e| {
        LintError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })
}

/// Parse configuration from a JSON string.
pub fn parse_json_config(content: &str) -> Result<LintConfig> {
    serde_json::from_str(content).map_err(|e| {
        LintError::Config(ConfigError::ParseError {
            message: format!("Failed to parse JSON: {}", e),
        })
    })
}

/// Merge two configurations, with the overlay taking precedence.
///
/// Rule declarations are merged by name; ignore patterns accumulate.
pub fn merge_configs(base: LintConfig, overlay: LintConfig) -> LintConfig {
    let mut rules = base.rules;
    rules.extend(overlay.rules);

    let mut ignores = base.ignores;
    for pattern in overlay.ignores {
        if !ignores.contains(&pattern) {
            ignores.push(pattern);
        }
    }

    LintConfig {
        extends: overlay.extends,
        default_ignores: overlay.default_ignores,
        ignores,
        rules,
        ui: overlay.ui,
    }
}

/// Apply the presets named in `extends` underneath the configuration.
///
/// The returned configuration has an empty `extends` list.
pub fn resolve_config(config: LintConfig) -> Result<LintConfig> {
    let mut base = LintConfig::empty();
    for name in &config.extends {
        tracing::debug!("Applying preset: {}", name);
        base = merge_configs(base, preset(name)?);
    }

    let mut resolved = merge_configs(base, config);
    resolved.extends.clear();
    Ok(resolved)
}
