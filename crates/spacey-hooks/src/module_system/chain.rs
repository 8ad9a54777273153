// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Hook chain plumbing
//!
//! Every hook receives a continuation standing for "the rest of the pipeline".
//! A hook either returns its own result or calls the continuation, possibly
//! with a rewritten input.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Format tag attached to a loaded module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    /// Runtime built-in (`node:fs`)
    Builtin,
    /// CommonJS module
    CommonJs,
    /// JSON document
    Json,
    /// ECMAScript module
    Module,
    /// WebAssembly module
    Wasm,
}

impl ModuleFormat {
    /// The tag the host uses for this format
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleFormat::Builtin => "builtin",
            ModuleFormat::CommonJs => "commonjs",
            ModuleFormat::Json => "json",
            ModuleFormat::Module => "module",
            ModuleFormat::Wasm => "wasm",
        }
    }
}

impl fmt::Display for ModuleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Import attributes (`with { type: 'json' }`)
pub type ImportAttributes = BTreeMap<String, String>;

/// Context passed to a resolve hook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveContext {
    /// URL of the importing module, absent for entry points
    pub parent_url: Option<Url>,
    /// Export conditions in effect (`import`, `node`, ...)
    pub conditions: Vec<String>,
    /// Attributes from the import statement
    pub import_attributes: ImportAttributes,
}

impl ResolveContext {
    /// Context for an import made from `parent`
    pub fn with_parent(parent: Url) -> Self {
        Self {
            parent_url: Some(parent),
            ..Self::default()
        }
    }
}

/// Result of a resolve hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOutput {
    /// Resolved URL
    pub url: String,
    /// Format hint for the load hook
    pub format: Option<ModuleFormat>,
    /// Whether the rest of the chain was skipped
    pub short_circuit: bool,
}

impl ResolveOutput {
    /// A resolution with no format hint
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            format: None,
            short_circuit: false,
        }
    }
}

/// Context passed to a load hook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadContext {
    /// Format hint from resolution
    pub format: Option<ModuleFormat>,
    /// Export conditions in effect
    pub conditions: Vec<String>,
    /// Attributes from the import statement
    pub import_attributes: ImportAttributes,
}

impl LoadContext {
    /// Context asking the next loader to treat the source as `format`
    pub fn with_format(format: ModuleFormat) -> Self {
        Self {
            format: Some(format),
            ..Self::default()
        }
    }
}

/// Result of a load hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutput {
    /// Format of the returned source
    pub format: ModuleFormat,
    /// Module source text; absent for formats the host reads itself
    pub source: Option<String>,
    /// Whether the rest of the chain was skipped
    pub short_circuit: bool,
}

impl LoadOutput {
    /// An ES module with the given source
    pub fn module(source: impl Into<String>) -> Self {
        Self {
            format: ModuleFormat::Module,
            source: Some(source.into()),
            short_circuit: false,
        }
    }

    /// Mark this output as terminal for the chain
    pub fn short_circuited(mut self) -> Self {
        self.short_circuit = true;
        self
    }
}

/// The next resolver in the chain
#[async_trait]
pub trait NextResolve: Send + Sync {
    /// Resolve `specifier` in `context`
    async fn resolve(&self, specifier: &str, context: &ResolveContext) -> Result<ResolveOutput>;
}

/// The next loader in the chain
#[async_trait]
pub trait NextLoad: Send + Sync {
    /// Load the module at `url`
    async fn load(&self, url: &str, context: &LoadContext) -> Result<LoadOutput>;
}
