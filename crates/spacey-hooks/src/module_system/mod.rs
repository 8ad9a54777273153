// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Module customization hooks
//!
//! ## Resolve
//! - Relative specifiers (`./util`, `../widgets`) are completed with
//!   `.js`, `.ts`, `/index.js` or `/index.ts`, whichever exists first
//! - Results are cached per resolver
//! - Everything else goes straight to the next resolver
//!
//! ## Load
//! - `.ts` / `.tsx` / `.mts` / `.cts` are transformed to ES modules
//! - `.css` becomes an empty module
//! - `.json` is loaded with `type: 'json'`
//! - Everything else goes straight to the next loader

mod cache;
pub mod chain;
mod loader;
mod resolver;

pub use cache::ResolutionCache;
pub use chain::{
    ImportAttributes, LoadContext, LoadOutput, ModuleFormat, NextLoad, NextResolve,
    ResolveContext, ResolveOutput,
};
pub use loader::{LoadDispatcher, EMPTY_STYLESHEET_MODULE};
pub use resolver::{
    default_suffix_rules, is_relative, ModuleResolver, Resolution, SuffixRule, FILE_PATTERN,
    INDEX_PATTERN,
};
