//! Environment configuration.
//!
//! Every setting is optional and read from `REPO_SWEEP_*` variables, e.g.
//! `REPO_SWEEP_REGION=eu-west-1` or `REPO_SWEEP_PAGE_SIZE=500`. The region
//! and credentials otherwise come from the standard AWS provider chain.

use aws_config::{BehaviorVersion, Region};
use aws_types::SdkConfig;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SweepError};

/// Prefix of every environment variable read by [`SweepConfig::from_env`].
pub const ENV_PREFIX: &str = "REPO_SWEEP_";

/// Largest page ListImages accepts.
pub const MAX_PAGE_SIZE: i32 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Region override for the registry client
    #[serde(default)]
    pub region: Option<String>,
    /// Endpoint override, for registry emulators
    #[serde(default)]
    pub endpoint_url: Option<String>,
    /// Account id of the registry, when it is not the caller's own
    #[serde(default)]
    pub registry_id: Option<String>,
    /// Images requested per ListImages page
    #[serde(default)]
    pub page_size: Option<i32>,
    /// `tracing` filter directive
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            region: None,
            endpoint_url: None,
            registry_id: None,
            page_size: None,
            log_filter: default_log_filter(),
        }
    }
}

impl SweepConfig {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        let config: SweepConfig = envy::prefixed(ENV_PREFIX).from_env()?;
        config.normalized().validated()
    }

    /// Load and validate configuration from explicit `(name, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: SweepConfig = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
        config.normalized().validated()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(page_size) = self.page_size {
            if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
                return Err(SweepError::Config(format!(
                    "page_size must be between 1 and {}, got {}",
                    MAX_PAGE_SIZE, page_size
                )));
            }
        }

        if let Some(registry_id) = &self.registry_id {
            if registry_id.len() != 12 || !registry_id.chars().all(|c| c.is_ascii_digit()) {
                return Err(SweepError::Config(format!(
                    "registry_id must be a 12 digit account id, got {:?}",
                    registry_id
                )));
            }
        }

        if let Some(endpoint_url) = &self.endpoint_url {
            if !endpoint_url.starts_with("http://") && !endpoint_url.starts_with("https://") {
                return Err(SweepError::Config(format!(
                    "endpoint_url must be an http(s) URL, got {:?}",
                    endpoint_url
                )));
            }
        }

        Ok(())
    }

    /// Shared AWS configuration, honouring the region override.
    pub async fn load_sdk_config(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        loader.load().await
    }

    /// ECR client, honouring the region and endpoint overrides.
    pub async fn ecr_client(&self) -> aws_sdk_ecr::Client {
        let sdk_config = self.load_sdk_config().await;
        let mut builder = aws_sdk_ecr::config::Builder::from(&sdk_config);
        if let Some(endpoint_url) = &self.endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }
        aws_sdk_ecr::Client::from_conf(builder.build())
    }

    // Empty variables count as unset.
    fn normalized(mut self) -> Self {
        for value in [&mut self.region, &mut self.endpoint_url, &mut self.registry_id] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *value = None;
            }
        }
        if self.log_filter.trim().is_empty() {
            self.log_filter = default_log_filter();
        }
        self
    }

    fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }
}
