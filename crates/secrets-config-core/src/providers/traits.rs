//! Core traits for configuration sources and providers
//!
//! A [`ConfigurationSource`] is a cheap description of where configuration
//! comes from. The configuration container asks each source for a
//! [`ConfigurationProvider`], loads it once, then serves lookups from it.
//! Loading is synchronous: sources are read during application startup.

use crate::error::SecretsResult;
use std::fmt;

/// Loaded key/value configuration from one source
pub trait ConfigurationProvider: Send + Sync + fmt::Debug {
    /// Short name used in logs and diagnostics
    fn name(&self) -> &str;

    /// Read the underlying source, replacing everything loaded before.
    ///
    /// On error nothing from this pass is kept.
    fn load(&mut self) -> SecretsResult<()>;

    /// Case-insensitive exact key lookup
    fn try_get(&self, key: &str) -> Option<&str>;

    /// Every key this provider currently holds, in original casing
    fn keys(&self) -> Vec<&str>;
}

/// Description of a configuration source
pub trait ConfigurationSource: Send + Sync + fmt::Debug {
    /// Create an unloaded provider for this source. Performs no I/O.
    fn build(&self) -> Box<dyn ConfigurationProvider>;
}
