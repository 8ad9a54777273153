// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Filesystem access used by the resolver

use async_trait::async_trait;
use std::path::Path;

/// Existence checks for resolution candidates
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Whether `path` exists. Errors count as "does not exist".
    async fn exists(&self, path: &Path) -> bool;
}

/// Filesystem backed by `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFs;

#[async_trait]
impl FileSystem for TokioFs {
    async fn exists(&self, path: &Path) -> bool {
        match tokio::fs::try_exists(path).await {
            Ok(exists) => exists,
            Err(err) => {
                tracing::trace!("Existence check for {} failed: {}", path.display(), err);
                false
            }
        }
    }
}
