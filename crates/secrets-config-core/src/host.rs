//! Host integration
//!
//! A [`HostBuilder`] collects configuration callbacks that run against the
//! host's environment, so registration can depend on where the application
//! runs. The main use is skipping the secrets mount on developer machines.

use crate::configuration::{Configuration, ConfigurationBuilder};
use crate::error::SecretsResult;
use crate::registration::SecretsConfigurationExt;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Variable naming the host environment
pub const ENVIRONMENT_VARIABLE: &str = "APP_ENVIRONMENT";

pub const DEVELOPMENT: &str = "Development";
pub const STAGING: &str = "Staging";
pub const PRODUCTION: &str = "Production";

/// Name of the environment the application runs in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnvironment {
    name: String,
}

impl HostEnvironment {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn development() -> Self {
        Self::new(DEVELOPMENT)
    }

    pub fn production() -> Self {
        Self::new(PRODUCTION)
    }

    /// Read [`ENVIRONMENT_VARIABLE`], defaulting to Production when unset or
    /// blank
    pub fn from_env() -> Self {
        match std::env::var(ENVIRONMENT_VARIABLE) {
            Ok(name) if !name.trim().is_empty() => Self::new(name.trim()),
            _ => Self::production(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive comparison with `name`
    pub fn is_environment(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn is_development(&self) -> bool {
        self.is_environment(DEVELOPMENT)
    }

    pub fn is_staging(&self) -> bool {
        self.is_environment(STAGING)
    }

    pub fn is_production(&self) -> bool {
        self.is_environment(PRODUCTION)
    }
}

impl Default for HostEnvironment {
    fn default() -> Self {
        Self::production()
    }
}

impl fmt::Display for HostEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// What configuration callbacks can see about the host
#[derive(Debug, Clone, Default)]
pub struct HostContext {
    pub environment: HostEnvironment,
}

type ConfigureFn = Box<dyn Fn(&HostContext, &mut ConfigurationBuilder) + Send + Sync>;

/// Collects configuration callbacks for an application host
#[derive(Default)]
pub struct HostBuilder {
    context: HostContext,
    configure: Vec<ConfigureFn>,
}

impl fmt::Debug for HostBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostBuilder")
            .field("context", &self.context)
            .field("callbacks", &self.configure.len())
            .finish()
    }
}

impl HostBuilder {
    pub fn new(environment: HostEnvironment) -> Self {
        Self {
            context: HostContext { environment },
            configure: Vec::new(),
        }
    }

    /// Builder for the environment named by [`ENVIRONMENT_VARIABLE`]
    pub fn from_env() -> Self {
        Self::new(HostEnvironment::from_env())
    }

    pub fn context(&self) -> &HostContext {
        &self.context
    }

    /// Queue a callback that registers configuration sources
    pub fn configure_app_configuration<F>(mut self, configure: F) -> Self
    where
        F: Fn(&HostContext, &mut ConfigurationBuilder) + Send + Sync + 'static,
    {
        self.configure.push(Box::new(configure));
        self
    }

    /// Add `/run/secrets`, failing if it is missing
    pub fn add_secrets(self) -> Self {
        self.configure_app_configuration(|_, builder| {
            builder.add_secrets();
        })
    }

    /// Add `/run/secrets`, tolerating its absence when `optional` is set
    pub fn add_secrets_optional(self, optional: bool) -> Self {
        self.configure_app_configuration(move |_, builder| {
            builder.add_secrets_optional(optional);
        })
    }

    /// Add a secrets directory
    pub fn add_secrets_dir_optional(self, directory: impl Into<PathBuf>, optional: bool) -> Self {
        let directory = directory.into();
        self.configure_app_configuration(move |_, builder| {
            builder.add_secrets_dir_optional(directory.clone(), optional);
        })
    }

    /// Add `/run/secrets` as a required source, except in Development
    pub fn add_secrets_except_in_development(self) -> Self {
        self.configure_app_configuration(|context, builder| {
            if context.environment.is_development() {
                debug!("Development environment, secrets directory not registered");
                return;
            }
            builder.add_secrets_optional(false);
        })
    }

    /// Run every callback in order and load the resulting configuration
    pub fn build_configuration(&self) -> SecretsResult<Configuration> {
        self.configuration_builder().build()
    }

    /// Run every callback in order without loading anything
    pub fn configuration_builder(&self) -> ConfigurationBuilder {
        let mut builder = ConfigurationBuilder::new();
        for configure in &self.configure {
            configure(&self.context, &mut builder);
        }
        builder
    }
}
