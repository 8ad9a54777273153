// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Resolution cache for relative specifiers
//!
//! Maps the absolute URL an import pointed at to the file URL it resolved to.
//! Entries live as long as the cache; there is no eviction, and misses are
//! never stored.

use dashmap::DashMap;
use url::Url;

/// Thread-safe resolution cache
#[derive(Debug, Default)]
pub struct ResolutionCache {
    /// Unresolved URL -> resolved URL
    entries: DashMap<Url, Url>,
}

impl ResolutionCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Get the resolved URL for an unresolved one
    pub fn get(&self, unresolved: &Url) -> Option<Url> {
        self.entries.get(unresolved).map(|entry| entry.value().clone())
    }

    /// Record a successful resolution. The last writer wins.
    pub fn set(&self, unresolved: Url, resolved: Url) {
        self.entries.insert(unresolved, resolved);
    }

    /// Get the number of cached resolutions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
