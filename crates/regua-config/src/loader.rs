// SPDX-FileCopyrightText: 2026 Regua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./regua.toml` > `~/.config/regua/regua.toml` > `/etc/regua/regua.toml`
//! with environment variable overrides via the `REGUA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ReguaConfig;

/// Sections that environment keys may address, e.g. `REGUA_SERVER_PORT`.
const SECTIONS: &[&str] = &["server", "openai", "analysis", "logging"];

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/regua/regua.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "regua.toml";

/// Location of the per-user config file, if a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("regua/regua.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/regua/regua.toml` (system-wide)
/// 3. `~/.config/regua/regua.toml` (user XDG config)
/// 4. `./regua.toml` (local directory)
/// 5. `REGUA_*` environment variables
pub fn load_config() -> Result<ReguaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<ReguaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ReguaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ReguaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ReguaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the layered Figment before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ReguaConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Environment provider mapping `REGUA_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because keys themselves
/// contain underscores: `REGUA_OPENAI_API_KEY` must become `openai.api_key`.
fn env_provider() -> Env {
    Env::prefixed("REGUA_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a prefix-stripped env key to a dotted config path.
///
/// figment hands the key over in its original case, so it is lowercased here.
pub fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|r| r.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("openai_api_key"), "openai.api_key");
        assert_eq!(map_env_key("server_port"), "server.port");
        assert_eq!(
            map_env_key("analysis_model_cache_ttl_secs"),
            "analysis.model_cache_ttl_secs"
        );
        assert_eq!(map_env_key("logging_format"), "logging.format");
    }

    #[test]
    fn uppercase_env_keys_map_to_sections() {
        assert_eq!(map_env_key("SERVER_PORT"), "server.port");
        assert_eq!(map_env_key("OPENAI_API_KEY"), "openai.api_key");
        assert_eq!(
            map_env_key("ANALYSIS_MODEL_CACHE_TTL_SECS"),
            "analysis.model_cache_ttl_secs"
        );
    }

    #[test]
    fn unknown_env_prefix_is_left_alone() {
        assert_eq!(map_env_key("telemetry_on"), "telemetry_on");
    }

    #[test]
    fn string_overrides_defaults() {
        let config = load_config_from_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
    }
}
