// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Hook registration
//!
//! [`ModuleHooks`] is built once when the hooks are registered and owns the
//! resolution cache for its whole lifetime. [`register`] layers it over the
//! host's pipeline; the result is itself a pipeline, so layers stack.

use crate::config::LoaderConfig;
use crate::error::Result;
use crate::module_system::{
    LoadContext, LoadDispatcher, LoadOutput, ModuleResolver, NextLoad, NextResolve,
    ResolveContext, ResolveOutput,
};
use crate::typescript::Transformer;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// The resolve/load hook pair
pub struct ModuleHooks {
    resolver: ModuleResolver,
    loader: LoadDispatcher,
}

impl ModuleHooks {
    /// Build hooks from configuration, using the real filesystem
    pub fn new(config: &LoaderConfig, transformer: Arc<dyn Transformer>) -> Result<Self> {
        Ok(Self::from_parts(
            ModuleResolver::new()?,
            LoadDispatcher::new(transformer, config.tsconfig_path()),
        ))
    }

    /// Build hooks from an existing resolver and dispatcher
    pub fn from_parts(resolver: ModuleResolver, loader: LoadDispatcher) -> Self {
        Self { resolver, loader }
    }

    /// The resolve hook's state
    pub fn resolver(&self) -> &ModuleResolver {
        &self.resolver
    }

    /// The load hook's state
    pub fn loader(&self) -> &LoadDispatcher {
        &self.loader
    }

    /// Resolve hook
    pub async fn resolve(
        &self,
        specifier: &str,
        context: &ResolveContext,
        next: &dyn NextResolve,
    ) -> Result<ResolveOutput> {
        self.resolver.resolve(specifier, context, next).await
    }

    /// Load hook
    pub async fn load(&self, url: &str, context: &LoadContext, next: &dyn NextLoad) -> Result<LoadOutput> {
        self.loader.load(url, context, next).await
    }
}

/// Hooks layered over the rest of a pipeline
pub struct HookedPipeline<N> {
    hooks: Arc<ModuleHooks>,
    next: N,
}

impl<N> HookedPipeline<N> {
    /// The registered hooks
    pub fn hooks(&self) -> &Arc<ModuleHooks> {
        &self.hooks
    }
}

/// Register `hooks` in front of `next`
pub fn register<N>(hooks: impl Into<Arc<ModuleHooks>>, next: N) -> HookedPipeline<N>
where
    N: NextResolve + NextLoad,
{
    debug!("Registering TypeScript module hooks");
    HookedPipeline {
        hooks: hooks.into(),
        next,
    }
}

#[async_trait]
impl<N> NextResolve for HookedPipeline<N>
where
    N: NextResolve + NextLoad,
{
    async fn resolve(&self, specifier: &str, context: &ResolveContext) -> Result<ResolveOutput> {
        self.hooks.resolve(specifier, context, &self.next).await
    }
}

#[async_trait]
impl<N> NextLoad for HookedPipeline<N>
where
    N: NextResolve + NextLoad,
{
    async fn load(&self, url: &str, context: &LoadContext) -> Result<LoadOutput> {
        self.hooks.load(url, context, &self.next).await
    }
}
