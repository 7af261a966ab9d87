//! Server configuration read from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `WORDGRAPH_PORT` | `3000` |
//! | `WORDGRAPH_WINDOW_CAPACITY` | `30` |
//! | `WORDGRAPH_SEMANTIC_THRESHOLD` | `0.5` |
//! | `WORDGRAPH_EMBEDDING_DIM` | `256` |

use std::fmt::Display;
use std::str::FromStr;

use wordgraph_core::{GraphConfig, HashingEncoder};

/// Invalid configuration value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    /// Defaults for new sessions; requests may override them.
    pub graph: GraphConfig,
    pub embedding_dim: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: 3000,
            graph: GraphConfig::default(),
            embedding_dim: HashingEncoder::DEFAULT_DIM,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ServerConfig::default();
        let config = ServerConfig {
            port: parse_var(&lookup, "WORDGRAPH_PORT", defaults.port)?,
            graph: GraphConfig {
                window_capacity: parse_var(
                    &lookup,
                    "WORDGRAPH_WINDOW_CAPACITY",
                    defaults.graph.window_capacity,
                )?,
                semantic_threshold: parse_var(
                    &lookup,
                    "WORDGRAPH_SEMANTIC_THRESHOLD",
                    defaults.graph.semantic_threshold,
                )?,
            },
            embedding_dim: parse_var(&lookup, "WORDGRAPH_EMBEDDING_DIM", defaults.embedding_dim)?,
        };

        if !config.graph.semantic_threshold.is_finite() {
            return Err(ConfigError::Invalid {
                var: "WORDGRAPH_SEMANTIC_THRESHOLD",
                value: config.graph.semantic_threshold.to_string(),
                reason: "must be a finite number".into(),
            });
        }
        if config.embedding_dim == 0 {
            return Err(ConfigError::Invalid {
                var: "WORDGRAPH_EMBEDDING_DIM",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(config)
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: err.to_string(),
        }),
    }
}
