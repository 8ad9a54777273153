// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! `tsconfig.json` reading
//!
//! Only `compilerOptions.target` is consumed. Files may contain comments and
//! trailing commas, and may inherit options through `extends`. Every failure
//! (missing file, bad JSON, unknown target) means "no target".

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tracing::{debug, warn};

/// Language level the transform engine lowers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EsTarget {
    /// ECMAScript 3
    Es3,
    /// ECMAScript 5
    Es5,
    /// ES2015 (ES6)
    Es2015,
    /// ES2016
    Es2016,
    /// ES2017
    Es2017,
    /// ES2018
    Es2018,
    /// ES2019
    Es2019,
    /// ES2020
    Es2020,
    /// ES2021
    Es2021,
    /// ES2022
    Es2022,
    /// ES2023
    Es2023,
    /// ES2024
    Es2024,
    /// Latest supported syntax
    EsNext,
}

impl EsTarget {
    /// Parse a `compilerOptions.target` value (case-insensitive)
    pub fn from_config(value: &str) -> Option<Self> {
        let target = match value.trim().to_ascii_lowercase().as_str() {
            "es3" => EsTarget::Es3,
            "es5" => EsTarget::Es5,
            "es6" | "es2015" => EsTarget::Es2015,
            "es2016" => EsTarget::Es2016,
            "es2017" => EsTarget::Es2017,
            "es2018" => EsTarget::Es2018,
            "es2019" => EsTarget::Es2019,
            "es2020" => EsTarget::Es2020,
            "es2021" => EsTarget::Es2021,
            "es2022" => EsTarget::Es2022,
            "es2023" => EsTarget::Es2023,
            "es2024" => EsTarget::Es2024,
            "esnext" | "latest" => EsTarget::EsNext,
            _ => return None,
        };
        Some(target)
    }

    /// Identifier understood by the transform engine
    pub fn as_str(&self) -> &'static str {
        match self {
            EsTarget::Es3 => "es3",
            EsTarget::Es5 => "es5",
            EsTarget::Es2015 => "es2015",
            EsTarget::Es2016 => "es2016",
            EsTarget::Es2017 => "es2017",
            EsTarget::Es2018 => "es2018",
            EsTarget::Es2019 => "es2019",
            EsTarget::Es2020 => "es2020",
            EsTarget::Es2021 => "es2021",
            EsTarget::Es2022 => "es2022",
            EsTarget::Es2023 => "es2023",
            EsTarget::Es2024 => "es2024",
            EsTarget::EsNext => "esnext",
        }
    }
}

/// `extends` may name one base config or several
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Extends {
    /// `"extends": "./base.json"`
    Single(String),
    /// `"extends": ["./a.json", "./b.json"]`
    Multiple(Vec<String>),
}

/// The subset of `compilerOptions` the loader reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    /// `target`
    #[serde(default, deserialize_with = "lenient")]
    pub target: Option<String>,
}

/// Minimal tsconfig.json structure.
///
/// Fields with an unexpected shape read as absent instead of failing the
/// whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    /// Base configs
    #[serde(default, deserialize_with = "lenient")]
    pub extends: Option<Extends>,
    /// Compiler options
    #[serde(default, deserialize_with = "lenient")]
    pub compiler_options: CompilerOptions,
}

/// Deserialize `T`, falling back to its default on a type mismatch
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

impl TsConfig {
    /// Parse tsconfig text, tolerating comments and trailing commas
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(&strip_jsonc(text))
    }

    /// Read and parse a config file; `None` on any failure
    pub async fn read(path: &Path) -> Option<Self> {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No project config at {}", path.display());
                return None;
            }
            Err(err) => {
                warn!("Cannot read {}: {}", path.display(), err);
                return None;
            }
        };

        match Self::parse(&text) {
            Ok(config) => Some(config),
            Err(err) => {
                warn!("Ignoring malformed {}: {}", path.display(), err);
                None
            }
        }
    }

    /// Base configs in declaration order
    pub fn extends_paths(&self) -> Vec<&str> {
        match &self.extends {
            None => Vec::new(),
            Some(Extends::Single(path)) => vec![path.as_str()],
            Some(Extends::Multiple(paths)) => paths.iter().map(String::as_str).collect(),
        }
    }
}

/// Read the effective target for the project config at `path`.
///
/// The config's own value wins over inherited ones; among several bases the
/// later one wins.
pub async fn read_target(path: &Path) -> Option<EsTarget> {
    let mut visited = HashSet::new();
    let raw = find_target(path.to_path_buf(), &mut visited).await?;

    let target = EsTarget::from_config(&raw);
    if target.is_none() {
        warn!("Ignoring unsupported tsconfig target '{}'", raw);
    }
    target
}

fn find_target<'a>(
    path: PathBuf,
    visited: &'a mut HashSet<PathBuf>,
) -> Pin<Box<dyn Future<Output = Option<String>> + Send + 'a>> {
    Box::pin(async move {
        if !visited.insert(path.clone()) {
            debug!("Skipping circular extends of {}", path.display());
            return None;
        }

        let config = TsConfig::read(&path).await?;
        if let Some(target) = config.compiler_options.target {
            return Some(target);
        }

        let dir = path.parent().unwrap_or(Path::new("."));
        for base in config.extends_paths().into_iter().rev() {
            let Some(base_path) = locate_base_config(dir, base).await else {
                debug!("Cannot find extends '{}' of {}", base, path.display());
                continue;
            };
            if let Some(target) = find_target(base_path, &mut *visited).await {
                return Some(target);
            }
        }

        None
    })
}

/// Locate an `extends` entry.
///
/// Relative and absolute entries are tried as written, then with `.json`
/// appended. Package entries are looked up in `node_modules` of `dir` and each
/// ancestor: as written, with `.json` appended, then as a directory holding
/// `tsconfig.json`.
async fn locate_base_config(dir: &Path, base: &str) -> Option<PathBuf> {
    let relative = base.starts_with("./") || base.starts_with("../");
    if relative || Path::new(base).is_absolute() {
        return first_file(&config_candidates(&dir.join(base), base)).await;
    }

    for ancestor in dir.ancestors() {
        let package = ancestor.join("node_modules").join(base);
        let mut candidates = config_candidates(&package, base);
        candidates.push(package.join("tsconfig.json"));
        if let Some(found) = first_file(&candidates).await {
            return Some(found);
        }
    }
    None
}

/// `path` itself, then `path.json` unless `base` already names a `.json` file
fn config_candidates(path: &Path, base: &str) -> Vec<PathBuf> {
    let mut candidates = vec![path.to_path_buf()];
    if !base.ends_with(".json") {
        let mut name = path.as_os_str().to_os_string();
        name.push(".json");
        candidates.push(PathBuf::from(name));
    }
    candidates
}

async fn first_file(candidates: &[PathBuf]) -> Option<PathBuf> {
    for candidate in candidates {
        if let Ok(metadata) = tokio::fs::metadata(candidate).await {
            if metadata.is_file() {
                return Some(candidate.clone());
            }
        }
    }
    None
}

/// Remove `//` and `/* */` comments and trailing commas outside strings
pub fn strip_jsonc(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    let mut pending_comma: Option<usize> = None;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '/' if chars.peek() == Some(&'/') => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
                out.push(' ');
            }
            ',' => {
                pending_comma = Some(out.len());
                out.push(c);
            }
            '}' | ']' => {
                if let Some(index) = pending_comma.take() {
                    out.remove(index);
                }
                out.push(c);
            }
            c if c.is_whitespace() => out.push(c),
            _ => {
                pending_comma = None;
                if c == '"' {
                    in_string = true;
                }
                out.push(c);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_from_config() {
        assert_eq!(EsTarget::from_config("ES2020"), Some(EsTarget::Es2020));
        assert_eq!(EsTarget::from_config("es6"), Some(EsTarget::Es2015));
        assert_eq!(EsTarget::from_config("ESNext"), Some(EsTarget::EsNext));
        assert_eq!(EsTarget::from_config("Latest"), Some(EsTarget::EsNext));
        assert_eq!(EsTarget::from_config("JSON"), None);
        assert_eq!(EsTarget::from_config("es1999"), None);
        assert_eq!(EsTarget::Es2022.as_str(), "es2022");
    }

    #[test]
    fn test_strip_jsonc() {
        let text = r#"{
            // line comment
            "compilerOptions": {
                /* block */ "target": "ES2022", // trailing
                "outDir": "dist/**/*",
            },
            "include": ["src",],
        }"#;
        let config = TsConfig::parse(text).unwrap();
        assert_eq!(config.compiler_options.target.as_deref(), Some("ES2022"));
    }

    #[test]
    fn test_strip_jsonc_keeps_strings() {
        let stripped = strip_jsonc(r#"{"a": "http://x/*y*/", "b": "q\"//,}"}"#);
        let value: serde_json::Value = serde_json::from_str(&stripped).unwrap();
        assert_eq!(value["a"], "http://x/*y*/");
        assert_eq!(value["b"], "q\"//,}");
    }

    #[test]
    fn test_extends_paths() {
        let config = TsConfig::parse(r#"{"extends": ["./a", "./b.json"]}"#).unwrap();
        assert_eq!(config.extends_paths(), vec!["./a", "./b.json"]);

        let config = TsConfig::parse(r#"{"extends": "./base"}"#).unwrap();
        assert_eq!(config.extends_paths(), vec!["./base"]);
    }

    #[test]
    fn test_config_candidates() {
        let path = Path::new("/app/base");
        assert_eq!(
            config_candidates(path, "./base"),
            vec![PathBuf::from("/app/base"), PathBuf::from("/app/base.json")]
        );
        assert_eq!(
            config_candidates(Path::new("/app/base.json"), "./base.json"),
            vec![PathBuf::from("/app/base.json")]
        );
    }

    #[test]
    fn test_lenient_fields() {
        let config = TsConfig::parse(r#"{"extends": 5, "compilerOptions": {"target": "es2020"}}"#).unwrap();
        assert_eq!(config.extends, None);
        assert_eq!(config.compiler_options.target.as_deref(), Some("es2020"));

        let config = TsConfig::parse(r#"{"extends": "./base", "compilerOptions": []}"#).unwrap();
        assert_eq!(config.extends_paths(), vec!["./base"]);
        assert_eq!(config.compiler_options, CompilerOptions::default());
    }

    #[tokio::test]
    async fn test_read_target_direct() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tsconfig.json");
        std::fs::write(&path, r#"{ "compilerOptions": { "target": "ES2019" } }"#).unwrap();

        assert_eq!(read_target(&path).await, Some(EsTarget::Es2019));
    }

    #[tokio::test]
    async fn test_read_target_missing_or_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tsconfig.json");
        assert_eq!(read_target(&path).await, None);

        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(read_target(&path).await, None);

        std::fs::write(&path, r#"{ "compilerOptions": { "target": 7 } }"#).unwrap();
        assert_eq!(read_target(&path).await, None);
    }

    #[tokio::test]
    async fn test_read_target_follows_extends() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("base.json"),
            r#"{ "compilerOptions": { "target": "es2017" } }"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("strict.json"),
            r#"{ "compilerOptions": { "target": "es2021" } }"#,
        )
        .unwrap();
        let path = dir.path().join("tsconfig.json");

        std::fs::write(&path, r#"{ "extends": "./base" }"#).unwrap();
        assert_eq!(read_target(&path).await, Some(EsTarget::Es2017));

        std::fs::write(&path, r#"{ "extends": ["./base", "./strict.json"] }"#).unwrap();
        assert_eq!(read_target(&path).await, Some(EsTarget::Es2021));

        std::fs::write(
            &path,
            r#"{ "extends": "./base", "compilerOptions": { "target": "esnext" } }"#,
        )
        .unwrap();
        assert_eq!(read_target(&path).await, Some(EsTarget::EsNext));
    }

    #[tokio::test]
    async fn test_read_target_extends_cycle() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), r#"{ "extends": "./tsconfig.json" }"#).unwrap();
        let path = dir.path().join("tsconfig.json");
        std::fs::write(&path, r#"{ "extends": "./a.json" }"#).unwrap();

        assert_eq!(read_target(&path).await, None);
    }

    #[tokio::test]
    async fn test_read_target_extends_exact_path_first() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("tsconfig.base"),
            r#"{ "compilerOptions": { "target": "es2019" } }"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("tsconfig.base.json"),
            r#"{ "compilerOptions": { "target": "es5" } }"#,
        )
        .unwrap();
        let path = dir.path().join("tsconfig.json");
        std::fs::write(&path, r#"{ "extends": "./tsconfig.base" }"#).unwrap();

        assert_eq!(read_target(&path).await, Some(EsTarget::Es2019));
    }

    #[tokio::test]
    async fn test_read_target_extends_package() {
        let dir = tempfile::tempdir().unwrap();
        let preset = dir.path().join("node_modules/@tsconfig/node20");
        std::fs::create_dir_all(&preset).unwrap();
        std::fs::write(
            preset.join("tsconfig.json"),
            r#"{ "compilerOptions": { "target": "es2022" } }"#,
        )
        .unwrap();
        std::fs::write(
            preset.join("strict.json"),
            r#"{ "compilerOptions": { "target": "es2023" } }"#,
        )
        .unwrap();
        let path = dir.path().join("tsconfig.json");

        std::fs::write(&path, r#"{ "extends": "@tsconfig/node20/tsconfig.json" }"#).unwrap();
        assert_eq!(read_target(&path).await, Some(EsTarget::Es2022));

        std::fs::write(&path, r#"{ "extends": "@tsconfig/node20/strict" }"#).unwrap();
        assert_eq!(read_target(&path).await, Some(EsTarget::Es2023));

        std::fs::write(&path, r#"{ "extends": "@tsconfig/node20" }"#).unwrap();
        assert_eq!(read_target(&path).await, Some(EsTarget::Es2022));

        std::fs::write(&path, r#"{ "extends": "@tsconfig/missing" }"#).unwrap();
        assert_eq!(read_target(&path).await, None);
    }

    #[tokio::test]
    async fn test_read_target_extends_package_from_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let shared = dir.path().join("node_modules/shared-config");
        std::fs::create_dir_all(&shared).unwrap();
        std::fs::write(
            shared.join("tsconfig.json"),
            r#"{ "compilerOptions": { "target": "es2018" } }"#,
        )
        .unwrap();
        let app = dir.path().join("packages/app");
        std::fs::create_dir_all(&app).unwrap();
        let path = app.join("tsconfig.json");
        std::fs::write(&path, r#"{ "extends": "shared-config" }"#).unwrap();

        assert_eq!(read_target(&path).await, Some(EsTarget::Es2018));
    }

    #[tokio::test]
    async fn test_read_target_ignores_mistyped_extends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tsconfig.json");
        std::fs::write(&path, r#"{ "extends": 5, "compilerOptions": { "target": "es2020" } }"#).unwrap();

        assert_eq!(read_target(&path).await, Some(EsTarget::Es2020));
    }
}
