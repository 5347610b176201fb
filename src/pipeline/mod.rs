//! Staged text-preparation pipeline.
//!
//! - [`artifacts`]: the typed value each stage produces
//! - [`traits`]: one trait per stage boundary, with the built-in impls
//! - [`runner`]: [`Pipeline`](runner::Pipeline), [`RunConfig`](runner::RunConfig) and the builder
//! - [`observer`]: stage hooks for timing and logging
//! - [`spec`], [`validation`], [`errors`]: the JSON configuration and its checks

pub mod artifacts;
pub mod errors;
pub mod observer;
pub mod runner;
pub mod spec;
pub mod traits;
pub mod validation;
