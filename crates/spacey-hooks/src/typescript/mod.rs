// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! TypeScript support for the load hook.
//!
//! The runtime only understands plain ECMAScript modules, so TypeScript sources
//! are handed to an external transform engine before evaluation:
//!
//! ```text
//! .ts → next loader (raw text) → Transformer (esm, ts, target?) → module source
//! ```
//!
//! The target level comes from the project's `tsconfig.json`, read on every
//! TypeScript load.

pub mod transform;
pub mod tsconfig;

pub use transform::{OutputFormat, SourceLoader, TransformOptions, TransformOutput, Transformer};
pub use tsconfig::{read_target, EsTarget, TsConfig};

/// TypeScript file extensions recognised by the load hook.
pub const TS_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".mts", ".cts"];

/// Check if a URL names a TypeScript file.
///
/// Only the end of the URL string is inspected; `file.ts?raw` is not a match.
pub fn is_typescript_url(url: &str) -> bool {
    TS_EXTENSIONS.iter().any(|ext| url.ends_with(ext))
}

/// How the load hook treats a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// `.ts`, `.tsx`, `.mts`, `.cts`
    TypeScript,
    /// `.css`
    Stylesheet,
    /// `.json`
    Json,
    /// Anything else
    Other,
}

impl ContentKind {
    /// Classify a URL by its trailing extension
    pub fn classify(url: &str) -> Self {
        if is_typescript_url(url) {
            ContentKind::TypeScript
        } else if url.ends_with(".css") {
            ContentKind::Stylesheet
        } else if url.ends_with(".json") {
            ContentKind::Json
        } else {
            ContentKind::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_typescript_url() {
        assert!(is_typescript_url("file:///app/file.ts"));
        assert!(is_typescript_url("file:///app/file.tsx"));
        assert!(is_typescript_url("file:///app/file.mts"));
        assert!(is_typescript_url("file:///app/file.cts"));
        assert!(!is_typescript_url("file:///app/file.js"));
        assert!(!is_typescript_url("file:///app/file.d.ts.map"));
        assert!(!is_typescript_url("file:///app/file.ts?raw"));
    }

    #[test]
    fn test_classify() {
        assert_eq!(ContentKind::classify("file:///a/b.ts"), ContentKind::TypeScript);
        assert_eq!(ContentKind::classify("file:///a/b.css"), ContentKind::Stylesheet);
        assert_eq!(ContentKind::classify("file:///a/b.json"), ContentKind::Json);
        assert_eq!(ContentKind::classify("file:///a/b.mjs"), ContentKind::Other);
        assert_eq!(ContentKind::classify("node:fs"), ContentKind::Other);
    }
}
