//! Application configuration.
//!
//! Process settings come from environment variables (a `.env` file is loaded
//! by the binary through `dotenvy`). Moderation policy comes from an optional
//! TOML file layered under `TRUST__`-prefixed environment overrides.
//!
//! # Environment Variables
//!
//! ## Required Variables
//! - `JWT_SECRET`: Secret used to verify moderator bearer tokens
//!
//! ## Optional Variables
//! - `RUST_LOG`: Logging level (default: "info,trust_engine=debug,tower_http=debug")
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 3000)
//! - `POLICY_PATH`: Moderation policy file (default: "./policy.toml")
//! - `REQUEST_BODY_LIMIT_BYTES`: Maximum JSON body size (default: 1 MiB)
//! - `TRUST__<SECTION>__<KEY>`: Overrides a single policy value, e.g.
//!   `TRUST__ANALYZER__APPROVAL_THRESHOLD=8`

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::application::policy::engine::PolicyRules;
use crate::application::reports::aggregator::AggregatorThresholds;
use crate::application::suspension::calculator::SuspensionPolicy;
use crate::domain::reputation::badge::BadgeCatalog;
use crate::domain::reputation::weights::PointWeights;
use crate::infrastructure::security::content_analyzer::AnalyzerConfig;

/// Server configuration loaded from environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Secret key for JWT verification
    pub jwt_secret: String,

    /// Location of the moderation policy file; a missing file means defaults
    pub policy_path: String,

    pub request_body_limit_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `JWT_SECRET` is missing or a set variable cannot be
    /// parsed to the expected type.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 3000)?,
            jwt_secret: env_required("JWT_SECRET")?,
            policy_path: env_or("POLICY_PATH", "./policy.toml".to_string())?,
            request_body_limit_bytes: env_or("REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?,
        })
    }
}

/// Every tunable of the moderation engine. Sections left out of the policy
/// file keep the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PolicyConfig {
    pub analyzer: AnalyzerConfig,
    pub policy: PolicyRules,
    pub weights: PointWeights,
    pub badges: BadgeCatalog,
    pub suspension: SuspensionPolicy,
    pub reports: AggregatorThresholds,
}

impl PolicyConfig {
    /// Layers the optional policy file at `path` and `TRUST__` overrides.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("TRUST")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let policy: PolicyConfig = settings.try_deserialize()?;
        if policy.suspension.durations.is_empty() {
            anyhow::bail!("suspension.durations must not be empty");
        }

        Ok(policy)
    }
}

/// Load a required environment variable.
///
/// # Errors
///
/// Returns an error if the variable is not set.
fn env_required(key: &str) -> anyhow::Result<String> {
    std::env::var(key).map_err(|_| anyhow::anyhow!("Missing required environment variable: {}", key))
}

/// Load an environment variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
