// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Load dispatcher - routes a resolved URL by content kind

use crate::error::{HookError, Result};
use crate::module_system::chain::{LoadContext, LoadOutput, ModuleFormat, NextLoad};
use crate::typescript::{read_target, ContentKind, TransformOptions, Transformer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Source returned for every stylesheet import
pub const EMPTY_STYLESHEET_MODULE: &str = "export default '';";

/// Load hook
pub struct LoadDispatcher {
    /// External TypeScript transform engine
    transformer: Arc<dyn Transformer>,
    /// Project config consulted for the target level
    tsconfig_path: PathBuf,
}

impl LoadDispatcher {
    /// Create a dispatcher reading its target from `tsconfig_path`
    pub fn new(transformer: Arc<dyn Transformer>, tsconfig_path: impl Into<PathBuf>) -> Self {
        Self {
            transformer,
            tsconfig_path: tsconfig_path.into(),
        }
    }

    /// Load hook: transform TypeScript, stub stylesheets, force the JSON
    /// attribute, and delegate everything else unchanged
    #[instrument(level = "debug", skip(self, context, next))]
    pub async fn load(&self, url: &str, context: &LoadContext, next: &dyn NextLoad) -> Result<LoadOutput> {
        match ContentKind::classify(url) {
            ContentKind::TypeScript => self.load_typescript(url, next).await,
            ContentKind::Stylesheet => {
                debug!("Stubbing stylesheet {}", url);
                Ok(LoadOutput::module(EMPTY_STYLESHEET_MODULE).short_circuited())
            }
            ContentKind::Json => {
                let mut context = context.clone();
                context.import_attributes.clear();
                context
                    .import_attributes
                    .insert("type".to_string(), "json".to_string());
                next.load(url, &context).await
            }
            ContentKind::Other => next.load(url, context).await,
        }
    }

    async fn load_typescript(&self, url: &str, next: &dyn NextLoad) -> Result<LoadOutput> {
        let raw = next
            .load(url, &LoadContext::with_format(ModuleFormat::Module))
            .await?;
        let source = raw.source.unwrap_or_default();

        let options = TransformOptions::new(read_target(&self.tsconfig_path).await);
        debug!("Transforming {} ({} bytes, target {:?})", url, source.len(), options.target);

        let output = self
            .transformer
            .transform(&source, &options)
            .map_err(|err| HookError::transform(url, err))?;

        Ok(LoadOutput::module(output.code))
    }
}
