// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Loader configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable overriding [`LoaderConfig::project_root`]
pub const PROJECT_ROOT_ENV: &str = "SPACEY_HOOKS_PROJECT_ROOT";

/// Environment variable overriding [`LoaderConfig::tsconfig`]
pub const TSCONFIG_ENV: &str = "SPACEY_HOOKS_TSCONFIG";

/// Default project config file name
pub const DEFAULT_TSCONFIG: &str = "tsconfig.json";

/// Configuration fixed when the hooks are registered
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directory the project config is looked up in
    pub project_root: PathBuf,

    /// Project config file name, relative to `project_root`
    pub tsconfig: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            project_root: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            tsconfig: DEFAULT_TSCONFIG.to_string(),
        }
    }
}

impl LoaderConfig {
    /// Defaults plus environment overrides
    pub fn load() -> Self {
        let mut config = Self::default();
        config.load_from_env();
        config
    }

    /// Apply `SPACEY_HOOKS_*` environment variables
    fn load_from_env(&mut self) {
        for (key, value) in std::env::vars() {
            self.set(&key, &value);
        }
    }

    /// Set a value by environment variable name; unknown keys are ignored
    pub fn set(&mut self, key: &str, value: &str) {
        match key {
            PROJECT_ROOT_ENV if !value.is_empty() => self.project_root = PathBuf::from(value),
            TSCONFIG_ENV if !value.is_empty() => self.tsconfig = value.to_string(),
            _ => {}
        }
    }

    /// Full path of the project config
    pub fn tsconfig_path(&self) -> PathBuf {
        self.project_root.join(&self.tsconfig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoaderConfig::default();
        assert_eq!(config.tsconfig, "tsconfig.json");
        assert!(config.tsconfig_path().ends_with("tsconfig.json"));
    }

    #[test]
    fn test_set() {
        let mut config = LoaderConfig::default();
        config.set(PROJECT_ROOT_ENV, "/srv/app");
        config.set(TSCONFIG_ENV, "tsconfig.build.json");
        config.set("PATH", "/usr/bin");
        config.set(TSCONFIG_ENV, "");

        assert_eq!(config.tsconfig_path(), PathBuf::from("/srv/app/tsconfig.build.json"));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: LoaderConfig = serde_json::from_str(r#"{ "tsconfig": "tsconfig.app.json" }"#).unwrap();
        assert_eq!(config.tsconfig, "tsconfig.app.json");
        assert_eq!(config.project_root, LoaderConfig::default().project_root);
    }
}
