// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cross-origin policy.
//!
//! Allow-list entries are either exact origins (`http://localhost:3000`) or
//! wildcard-subdomain patterns (`https://*.vercel.app`). A wildcard matches
//! any origin with the same scheme and port whose host has at least one
//! extra label in front of the domain; the bare domain does not match.

use axum::http::{request::Parts, HeaderValue};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginPattern {
    Exact(String),
    Subdomain {
        scheme: String,
        domain: String,
        port: Option<u16>,
    },
}

impl OriginPattern {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err("empty origin".to_string());
        }

        let Some((scheme, rest)) = trimmed.split_once("://") else {
            return Err(format!("origin `{trimmed}` has no scheme"));
        };

        let Some(host_port) = rest.strip_prefix("*.") else {
            if rest.contains('*') {
                return Err(format!("wildcard must be the leftmost label in `{trimmed}`"));
            }
            return Ok(Self::Exact(trimmed.to_ascii_lowercase()));
        };

        let (domain, port) = match host_port.rsplit_once(':') {
            Some((domain, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| format!("invalid port in `{trimmed}`"))?;
                (domain, Some(port))
            }
            None => (host_port, None),
        };

        if domain.is_empty() || domain.contains('*') || domain.contains('/') {
            return Err(format!("invalid wildcard domain in `{trimmed}`"));
        }

        let scheme = scheme.to_ascii_lowercase();
        // Normalise explicit default ports the way browsers serialise origins.
        let port = match (scheme.as_str(), port) {
            ("http", Some(80)) | ("https", Some(443)) => None,
            (_, port) => port,
        };

        Ok(Self::Subdomain {
            scheme,
            domain: domain.to_ascii_lowercase(),
            port,
        })
    }

    pub fn matches(&self, origin: &str) -> bool {
        match self {
            Self::Exact(expected) => origin.eq_ignore_ascii_case(expected),
            Self::Subdomain {
                scheme,
                domain,
                port,
            } => {
                let Ok(url) = url::Url::parse(origin) else {
                    return false;
                };
                let Some(host) = url.host_str() else {
                    return false;
                };
                let host = host.to_ascii_lowercase();

                url.scheme() == scheme
                    && url.port() == *port
                    && host.len() > domain.len() + 1
                    && host.ends_with(domain.as_str())
                    && host.as_bytes()[host.len() - domain.len() - 1] == b'.'
            }
        }
    }
}

/// Compile allow-list entries, skipping (and logging) malformed ones.
pub fn compile_origins(origins: &[String]) -> Vec<OriginPattern> {
    origins
        .iter()
        .filter_map(|raw| match OriginPattern::parse(raw) {
            Ok(pattern) => Some(pattern),
            Err(reason) => {
                tracing::warn!(origin = %raw, %reason, "ignoring CORS origin");
                None
            }
        })
        .collect()
}

/// CORS layer allowing credentials from the configured origins, with request
/// methods and headers mirrored back.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let patterns = compile_origins(origins);

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|origin| patterns.iter().any(|p| p.matches(origin)))
                    .unwrap_or(false)
            },
        ))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(raw: &str) -> OriginPattern {
        OriginPattern::parse(raw).unwrap()
    }

    #[test]
    fn exact_origins_match_case_insensitively() {
        let p = pattern("http://localhost:3000/");
        assert_eq!(p, OriginPattern::Exact("http://localhost:3000".into()));
        assert!(p.matches("http://localhost:3000"));
        assert!(p.matches("HTTP://LOCALHOST:3000"));
        assert!(!p.matches("http://localhost:3001"));
        assert!(!p.matches("https://localhost:3000"));
    }

    #[test]
    fn wildcard_matches_subdomains_only() {
        let p = pattern("https://*.vercel.app");
        assert!(p.matches("https://my-app.vercel.app"));
        assert!(p.matches("https://preview.my-app.vercel.app"));
        assert!(p.matches("https://My-App.Vercel.App"));
        assert!(p.matches("https://my-app.vercel.app:443"));

        assert!(!p.matches("https://vercel.app"));
        assert!(!p.matches("http://my-app.vercel.app"));
        assert!(!p.matches("https://my-app.vercel.app:8443"));
        assert!(!p.matches("https://evilvercel.app"));
        assert!(!p.matches("https://vercel.app.evil.com"));
        assert!(!p.matches("null"));
    }

    #[test]
    fn wildcard_with_port() {
        let p = pattern("http://*.local.test:8080");
        assert!(p.matches("http://a.local.test:8080"));
        assert!(!p.matches("http://a.local.test"));
    }

    #[test]
    fn rejects_malformed_patterns() {
        assert!(OriginPattern::parse("").is_err());
        assert!(OriginPattern::parse("localhost:3000").is_err());
        assert!(OriginPattern::parse("https://app.*.com").is_err());
        assert!(OriginPattern::parse("https://*.").is_err());
        assert!(OriginPattern::parse("https://*.x.com:http").is_err());

        let compiled = compile_origins(&["https://*.".to_string(), "http://ok".to_string()]);
        assert_eq!(compiled, vec![OriginPattern::Exact("http://ok".into())]);
    }
}
