use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::{Context, anyhow, bail};
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::application::ports::token_verifier::{TokenUse, TokenVerifier, VerifiedClaims};
use crate::bootstrap::config::Config;

#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    pub kid: String,
    pub kty: String,
    pub n: String,
    pub e: String,
    #[serde(default)]
    pub alg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

#[derive(Debug, Deserialize)]
struct CognitoClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    token_use: String,
    // id tokens carry the app client in `aud`, access tokens in `client_id`
    #[serde(default)]
    aud: Option<String>,
    #[serde(default)]
    client_id: Option<String>,
}

/// Lower bound between two key-set downloads, whatever the outcome of the last one.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Default)]
struct KeyCache {
    keys: HashMap<String, Jwk>,
    fetched_at: Option<Instant>,
    last_attempt: Option<Instant>,
}

impl KeyCache {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.map(|t| t.elapsed() < ttl).unwrap_or(false)
    }

    fn may_refresh(&self, floor: Duration) -> bool {
        self.last_attempt.map(|t| t.elapsed() >= floor).unwrap_or(true)
    }
}

/// Verifies Cognito-issued RS256 tokens against the pool's key set.
pub struct JwksVerifier {
    http: reqwest::Client,
    jwks_url: String,
    issuer: String,
    client_id: String,
    ttl: Duration,
    min_refresh: Duration,
    cache: RwLock<KeyCache>,
}

impl JwksVerifier {
    pub fn new(cfg: &Config) -> Self {
        let issuer = cfg.cognito_issuer();
        Self {
            http: reqwest::Client::new(),
            jwks_url: format!("{issuer}/.well-known/jwks.json"),
            issuer,
            client_id: cfg.cognito_client_id.clone(),
            ttl: Duration::from_secs(cfg.jwks_cache_ttl_secs),
            min_refresh: MIN_REFRESH_INTERVAL,
            cache: RwLock::new(KeyCache::default()),
        }
    }

    /// Verifier with a pre-loaded key set; `jwks_url` is only hit for unknown kids.
    pub fn with_keys(
        jwks_url: impl Into<String>,
        issuer: impl Into<String>,
        client_id: impl Into<String>,
        keys: Vec<Jwk>,
    ) -> Self {
        let cache = KeyCache {
            keys: keys.into_iter().map(|k| (k.kid.clone(), k)).collect(),
            fetched_at: Some(Instant::now()),
            last_attempt: None,
        };
        Self {
            http: reqwest::Client::new(),
            jwks_url: jwks_url.into(),
            issuer: issuer.into(),
            client_id: client_id.into(),
            ttl: Duration::from_secs(3600),
            min_refresh: MIN_REFRESH_INTERVAL,
            cache: RwLock::new(cache),
        }
    }

    async fn fetch_keys(&self) -> anyhow::Result<HashMap<String, Jwk>> {
        tracing::debug!(url = %self.jwks_url, "fetching_jwks");
        let resp = self
            .http
            .get(&self.jwks_url)
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .context("jwks request failed")?;
        if !resp.status().is_success() {
            bail!("jwks request failed with status {}", resp.status());
        }
        let set: JwkSet = resp.json().await.context("invalid jwks document")?;
        tracing::info!(count = set.keys.len(), "jwks_refreshed");
        Ok(set.keys.into_iter().map(|k| (k.kid.clone(), k)).collect())
    }

    async fn key_for(&self, kid: &str) -> anyhow::Result<Jwk> {
        {
            let cache = self.cache.read().await;
            if cache.is_fresh(self.ttl) {
                if let Some(k) = cache.keys.get(kid) {
                    return Ok(k.clone());
                }
            }
        }

        // Concurrent misses queue on the write lock and share one download.
        let mut cache = self.cache.write().await;
        if cache.is_fresh(self.ttl) {
            if let Some(k) = cache.keys.get(kid) {
                return Ok(k.clone());
            }
        }
        let cached = cache.keys.get(kid).cloned();
        if !cache.may_refresh(self.min_refresh) {
            return cached.ok_or_else(|| anyhow!("no signing key for kid {kid}"));
        }

        cache.last_attempt = Some(Instant::now());
        match self.fetch_keys().await {
            Ok(keys) => {
                cache.keys = keys;
                cache.fetched_at = Some(Instant::now());
            }
            Err(err) => match cached {
                Some(k) => {
                    tracing::warn!(error = ?err, "jwks_refresh_failed_using_cached_key");
                    return Ok(k);
                }
                None => return Err(err),
            },
        }
        cache
            .keys
            .get(kid)
            .cloned()
            .ok_or_else(|| anyhow!("no signing key for kid {kid}"))
    }
}

#[async_trait]
impl TokenVerifier for JwksVerifier {
    async fn verify(&self, token: &str) -> anyhow::Result<VerifiedClaims> {
        let header = decode_header(token).context("malformed token header")?;
        if header.alg != Algorithm::RS256 {
            bail!("unexpected token algorithm {:?}", header.alg);
        }
        let kid = header.kid.ok_or_else(|| anyhow!("token header has no kid"))?;
        let jwk = self.key_for(&kid).await?;
        if jwk.kty != "RSA" {
            bail!("signing key {kid} is not an RSA key");
        }
        let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.validate_exp = true;
        validation.validate_aud = false;
        let claims = decode::<CognitoClaims>(token, &key, &validation)?.claims;

        let (token_use, audience) = match claims.token_use.as_str() {
            "id" => (TokenUse::Id, claims.aud.as_deref()),
            "access" => (TokenUse::Access, claims.client_id.as_deref()),
            other => bail!("unsupported token_use {other}"),
        };
        if audience != Some(self.client_id.as_str()) {
            bail!("token was issued for a different client");
        }
        Ok(VerifiedClaims {
            sub: claims.sub,
            email: claims.email.map(|e| e.to_ascii_lowercase()),
            token_use,
        })
    }
}
