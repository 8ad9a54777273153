// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # spacey-hooks
//!
//! Module customization hooks that let a Node-compatible runtime import
//! TypeScript directly.
//!
//! The crate provides the two hooks a runtime calls for every import:
//!
//! - **resolve**: completes extensionless relative specifiers
//!   (`./util` → `./util.ts`, `./widgets` → `./widgets/index.ts`) and caches
//!   the answer
//! - **load**: runs TypeScript through a transform engine, turns stylesheet
//!   imports into empty modules, and forces `type: 'json'` on JSON imports
//!
//! Both hooks are middleware: whatever they do not handle is passed on to the
//! next resolver or loader in the chain.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use spacey_hooks::{register, LoaderConfig, ModuleHooks};
//! use std::sync::Arc;
//!
//! let hooks = ModuleHooks::new(&LoaderConfig::load(), Arc::new(my_transformer))?;
//! let pipeline = register(hooks, host_default_pipeline);
//!
//! // The host now calls pipeline.resolve(..) and pipeline.load(..)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod fs;
pub mod hooks;
pub mod module_system;
pub mod typescript;

// Re-exports
pub use config::LoaderConfig;
pub use error::{HookError, Result};
pub use hooks::{register, HookedPipeline, ModuleHooks};
pub use module_system::{
    LoadContext, LoadOutput, ModuleFormat, NextLoad, NextResolve, ResolveContext, ResolveOutput,
};
pub use typescript::{is_typescript_url, TransformOptions, TransformOutput, Transformer, TS_EXTENSIONS};

/// Version of the hooks crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
