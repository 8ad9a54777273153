// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Boundary to the external transform engine

use crate::typescript::tsconfig::EsTarget;
use serde::Serialize;

/// Output module format requested from the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// ECMAScript module syntax
    #[default]
    Esm,
}

/// Source language handed to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLoader {
    /// TypeScript
    #[default]
    Ts,
}

/// Options for a single transform call
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TransformOptions {
    /// Output format
    pub format: OutputFormat,
    /// Source language
    pub loader: SourceLoader,
    /// Language level to lower to, engine default when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<EsTarget>,
}

impl TransformOptions {
    /// ESM output from TypeScript input, optionally lowered to `target`
    pub fn new(target: Option<EsTarget>) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }
}

/// Engine output
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransformOutput {
    /// Generated module source
    pub code: String,
}

/// A TypeScript-to-JavaScript transform engine.
///
/// Calls are synchronous. Any error is a hard load failure for the module
/// being transformed.
pub trait Transformer: Send + Sync {
    /// Transform `source` according to `options`
    fn transform(&self, source: &str, options: &TransformOptions) -> anyhow::Result<TransformOutput>;
}

impl<F> Transformer for F
where
    F: Fn(&str, &TransformOptions) -> anyhow::Result<TransformOutput> + Send + Sync,
{
    fn transform(&self, source: &str, options: &TransformOptions) -> anyhow::Result<TransformOutput> {
        self(source, options)
    }
}
