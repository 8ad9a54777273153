// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for the module hooks

use thiserror::Error;

/// Result type for hook operations
pub type Result<T> = std::result::Result<T, HookError>;

/// Errors that can surface from a resolve or load hook
#[derive(Debug, Error)]
pub enum HookError {
    /// A relative specifier was imported without a parent module URL
    #[error("Cannot resolve relative specifier '{specifier}' without a parent module URL")]
    MissingParentUrl {
        /// The relative specifier
        specifier: String,
    },

    /// The transform engine rejected a TypeScript source
    #[error("Failed to transform '{url}': {source}")]
    Transform {
        /// URL of the module being loaded
        url: String,
        /// Error reported by the transform engine
        #[source]
        source: anyhow::Error,
    },

    /// A suffix rule pattern failed to compile
    #[error("Invalid suffix pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Module not found (raised by host pipelines)
    #[error("Cannot find module '{0}'")]
    ModuleNotFound(String),

    /// File system error
    #[error("File system error: {0}")]
    Fs(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

impl HookError {
    /// Create a module not found error
    pub fn module_not_found(module: impl Into<String>) -> Self {
        Self::ModuleNotFound(module.into())
    }

    /// Wrap a transform engine failure for `url`
    pub fn transform(url: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Transform {
            url: url.into(),
            source,
        }
    }
}
