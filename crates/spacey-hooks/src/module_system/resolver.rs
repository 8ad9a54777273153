// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Suffix resolution for extensionless relative imports
//!
//! `import { x } from './util'` is legal TypeScript but the runtime's own
//! resolver wants a full file name. For every relative specifier the resolver
//! tries, in order:
//!
//! 1. `<path>.js`
//! 2. `<path>.ts`
//! 3. `<path>/index.js`
//! 4. `<path>/index.ts`
//!
//! An explicit `.js`/`.ts` extension (or `/index` tail) is stripped before the
//! suffix is applied, so `./util.js` also finds `util.ts`. The first candidate
//! that exists wins and is remembered for the lifetime of the resolver.

use crate::error::{HookError, Result};
use crate::fs::{FileSystem, TokioFs};
use crate::module_system::cache::ResolutionCache;
use crate::module_system::chain::{NextResolve, ResolveContext, ResolveOutput};
use regex::{NoExpand, Regex};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, instrument, trace};
use url::Url;

/// Matches an optional trailing `.js`/`.ts` extension
pub const FILE_PATTERN: &str = r"(?:\.[tj]s)?$";

/// Matches an optional trailing `index`, `/index.js` or `/index.ts`
pub const INDEX_PATTERN: &str = r"(?:[\\/]?(?:index(?:\.[tj]s)?))?$";

/// A trailing pattern and the suffix that replaces it
#[derive(Debug, Clone)]
pub struct SuffixRule {
    pattern: Regex,
    suffix: String,
}

impl SuffixRule {
    /// Create a rule replacing the first match of `pattern` with `suffix`
    pub fn new(pattern: &str, suffix: impl Into<String>) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            suffix: suffix.into(),
        })
    }

    /// Build the candidate path for `path`
    pub fn apply(&self, path: &str) -> String {
        self.pattern
            .replace(path, NoExpand(&self.suffix))
            .into_owned()
    }
}

/// The rules in resolution order: plain file, typed file, plain index, typed index
pub fn default_suffix_rules() -> Result<Vec<SuffixRule>> {
    Ok(vec![
        SuffixRule::new(FILE_PATTERN, ".js")?,
        SuffixRule::new(FILE_PATTERN, ".ts")?,
        SuffixRule::new(INDEX_PATTERN, "/index.js")?,
        SuffixRule::new(INDEX_PATTERN, "/index.ts")?,
    ])
}

/// Outcome of suffix resolution for one specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Hand the next resolver this verified file URL instead of the specifier
    Rewrite(Url),
    /// Hand the next resolver the original specifier
    Passthrough,
}

/// Whether a specifier is handled by suffix resolution
pub fn is_relative(specifier: &str) -> bool {
    specifier.starts_with('.')
}

/// Resolver for relative specifiers with a per-instance cache
pub struct ModuleResolver {
    /// Suffix rules, tried in order
    rules: Vec<SuffixRule>,
    /// Successful resolutions
    cache: ResolutionCache,
    /// Existence checks
    fs: Arc<dyn FileSystem>,
}

impl ModuleResolver {
    /// Create a resolver using the real filesystem
    pub fn new() -> Result<Self> {
        Self::with_fs(Arc::new(TokioFs))
    }

    /// Create a resolver with the default rules over `fs`
    pub fn with_fs(fs: Arc<dyn FileSystem>) -> Result<Self> {
        Ok(Self::with_rules(default_suffix_rules()?, fs))
    }

    /// Create a resolver with custom rules
    pub fn with_rules(rules: Vec<SuffixRule>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            rules,
            cache: ResolutionCache::new(),
            fs,
        }
    }

    /// The resolution cache
    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Resolve hook: rewrite relative specifiers to existing files, then
    /// always hand off to `next`
    #[instrument(level = "debug", skip(self, context, next))]
    pub async fn resolve(
        &self,
        specifier: &str,
        context: &ResolveContext,
        next: &dyn NextResolve,
    ) -> Result<ResolveOutput> {
        match self.resolution(specifier, context).await? {
            Resolution::Rewrite(url) => next.resolve(url.as_str(), context).await,
            Resolution::Passthrough => next.resolve(specifier, context).await,
        }
    }

    /// Decide how `specifier` should be handed to the next resolver
    pub async fn resolution(&self, specifier: &str, context: &ResolveContext) -> Result<Resolution> {
        if !is_relative(specifier) {
            return Ok(Resolution::Passthrough);
        }

        let parent = context
            .parent_url
            .as_ref()
            .ok_or_else(|| HookError::MissingParentUrl {
                specifier: specifier.to_string(),
            })?;

        let unresolved = match parent.join(specifier) {
            Ok(url) => url,
            Err(err) => {
                debug!("Cannot join '{}' onto {}: {}", specifier, parent, err);
                return Ok(Resolution::Passthrough);
            }
        };

        Ok(match self.resolve_url(&unresolved).await {
            Some(resolved) => Resolution::Rewrite(resolved),
            None => Resolution::Passthrough,
        })
    }

    /// Resolve an absolute URL through the cache and the suffix rules
    pub async fn resolve_url(&self, unresolved: &Url) -> Option<Url> {
        if let Some(resolved) = self.cache.get(unresolved) {
            trace!("Cache hit for {}", unresolved);
            return Some(resolved);
        }

        let path = match unresolved.to_file_path() {
            Ok(path) => path,
            Err(()) => {
                trace!("{} is not a file URL", unresolved);
                return None;
            }
        };
        let path = path.to_str()?;

        for rule in &self.rules {
            let candidate = PathBuf::from(rule.apply(path));
            if !self.fs.exists(&candidate).await {
                continue;
            }
            if let Ok(resolved) = Url::from_file_path(&candidate) {
                debug!("Resolved {} to {}", unresolved, resolved);
                self.cache.set(unresolved.clone(), resolved.clone());
                return Some(resolved);
            }
        }

        trace!("No suffix rule matched {}", unresolved);
        None
    }
}
