// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! (and an optional `.env` file) once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8001` |
//! | `SOLANA_RPC_URL` | Solana JSON-RPC endpoint | `https://api.mainnet-beta.solana.com` |
//! | `SOLANA_CLUSTER` | Cluster name used in explorer links | `mainnet-beta` |
//! | `OPENAI_API_KEY` | API key for the completion model | Required |
//! | `OPENAI_BASE_URL` | OpenAI-compatible API base URL | `https://api.openai.com/v1` |
//! | `OPENAI_MODEL` | Chat model name | `gpt-4o-mini` |
//! | `CORS_ALLOWED_ORIGINS` | Comma-separated origin allow-list | `http://localhost:3000,https://*.vercel.app` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{env, net::SocketAddr};

use crate::blockchain::{ClusterConfig, MAINNET_BETA_CLUSTER, MAINNET_BETA_RPC_URL};
use crate::completion::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::logging::LogFormat;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const SOLANA_RPC_URL_ENV: &str = "SOLANA_RPC_URL";
pub const SOLANA_CLUSTER_ENV: &str = "SOLANA_CLUSTER";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const OPENAI_BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const OPENAI_MODEL_ENV: &str = "OPENAI_MODEL";
pub const CORS_ALLOWED_ORIGINS_ENV: &str = "CORS_ALLOWED_ORIGINS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Port the bundled frontend expects by default.
pub const DEFAULT_PORT: u16 = 8001;

/// Local Next.js dev server and Vercel preview deployments.
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,https://*.vercel.app";

/// Settings for the completion-model client.
#[derive(Clone)]
pub struct ModelConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub cluster: ClusterConfig,
    pub model: ModelConfig,
    pub cors_origins: Vec<String>,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = var(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match var(PORT_ENV) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: PORT_ENV,
                reason: format!("`{raw}` is not a valid port"),
            })?,
            None => DEFAULT_PORT,
        };
        let bind_addr: SocketAddr =
            format!("{host}:{port}")
                .parse()
                .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                    key: HOST_ENV,
                    reason: e.to_string(),
                })?;

        let rpc_url = var(SOLANA_RPC_URL_ENV).unwrap_or_else(|| MAINNET_BETA_RPC_URL.to_string());
        validate_url(SOLANA_RPC_URL_ENV, &rpc_url)?;
        let cluster_name =
            var(SOLANA_CLUSTER_ENV).unwrap_or_else(|| MAINNET_BETA_CLUSTER.to_string());

        let api_key = var(OPENAI_API_KEY_ENV).ok_or(ConfigError::Missing(OPENAI_API_KEY_ENV))?;
        let base_url = var(OPENAI_BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        validate_url(OPENAI_BASE_URL_ENV, &base_url)?;
        let model = var(OPENAI_MODEL_ENV).unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let cors_origins = var(CORS_ALLOWED_ORIGINS_ENV)
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let log_format = match var(LOG_FORMAT_ENV) {
            Some(raw) => raw.parse().map_err(|reason| ConfigError::Invalid {
                key: LOG_FORMAT_ENV,
                reason,
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            cluster: ClusterConfig::new(cluster_name, rpc_url),
            model: ModelConfig {
                api_key,
                base_url,
                model,
            },
            cors_origins,
            log_format,
        })
    }
}

fn validate_url(key: &'static str, raw: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(raw).map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::Invalid {
            key,
            reason: format!("unsupported scheme `{other}`"),
        }),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_api_key_is_set() {
        let config = AppConfig::from_lookup(lookup(&[(OPENAI_API_KEY_ENV, "sk-test")])).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8001".parse().unwrap());
        assert_eq!(config.cluster, ClusterConfig::mainnet_beta());
        assert_eq!(config.model.model, "gpt-4o-mini");
        assert_eq!(config.model.base_url, "https://api.openai.com/v1");
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:3000", "https://*.vercel.app"]
        );
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn api_key_is_required() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(OPENAI_API_KEY_ENV)));

        let blank = AppConfig::from_lookup(lookup(&[(OPENAI_API_KEY_ENV, "  ")])).unwrap_err();
        assert!(matches!(blank, ConfigError::Missing(_)));
    }

    #[test]
    fn overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup(&[
            (OPENAI_API_KEY_ENV, "sk-test"),
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "9000"),
            (SOLANA_RPC_URL_ENV, "https://api.devnet.solana.com"),
            (SOLANA_CLUSTER_ENV, "devnet"),
            (CORS_ALLOWED_ORIGINS_ENV, " https://app.example.com , ,http://localhost:5173"),
            (LOG_FORMAT_ENV, "json"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.cluster.name, "devnet");
        assert_eq!(config.cluster.rpc_url, "https://api.devnet.solana.com");
        assert_eq!(
            config.cors_origins,
            vec!["https://app.example.com", "http://localhost:5173"]
        );
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_invalid_values() {
        let bad_port = AppConfig::from_lookup(lookup(&[
            (OPENAI_API_KEY_ENV, "sk"),
            (PORT_ENV, "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(bad_port, ConfigError::Invalid { key: PORT_ENV, .. }));

        let bad_rpc = AppConfig::from_lookup(lookup(&[
            (OPENAI_API_KEY_ENV, "sk"),
            (SOLANA_RPC_URL_ENV, "ftp://node"),
        ]))
        .unwrap_err();
        assert!(matches!(
            bad_rpc,
            ConfigError::Invalid {
                key: SOLANA_RPC_URL_ENV,
                ..
            }
        ));

        let bad_log = AppConfig::from_lookup(lookup(&[
            (OPENAI_API_KEY_ENV, "sk"),
            (LOG_FORMAT_ENV, "xml"),
        ]))
        .unwrap_err();
        assert!(matches!(bad_log, ConfigError::Invalid { key: LOG_FORMAT_ENV, .. }));
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = AppConfig::from_lookup(lookup(&[(OPENAI_API_KEY_ENV, "sk-secret")])).unwrap();
        assert!(!format!("{config:?}").contains("sk-secret"));
    }
}
