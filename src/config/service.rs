// src/config/service.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

use crate::language::{LanguageResolver, NoopResolver, WhatlangResolver};
use crate::lexicon::Lexicon;
use crate::sentiment::Scorer;

pub const DEFAULT_CONFIG_PATH: &str = "config/sentiment.toml";

pub const ENV_CONFIG_PATH: &str = "SENTIMENT_CONFIG_PATH";
pub const ENV_BIND: &str = "SENTIMENT_BIND";
pub const ENV_LEXICON_PATH: &str = "SENTIMENT_LEXICON_PATH";
pub const ENV_DETECT_LANGUAGE: &str = "SENTIMENT_DETECT_LANGUAGE";
pub const ENV_METRICS: &str = "SENTIMENT_METRICS";

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub bind_addr: String,
    /// Lexicon JSON to load instead of the bundled one.
    pub lexicon_path: Option<PathBuf>,
    /// `false` leaves phrases without a language code unresolved.
    pub detect_language: bool,
    /// Install the Prometheus recorder and expose `/metrics`.
    pub metrics: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            lexicon_path: None,
            detect_language: true,
            metrics: false,
        }
    }
}

impl ServiceConfig {
    /// Parse a TOML file as-is (no environment overrides).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading service config from {}", path.display()))?;
        let mut cfg: ServiceConfig = toml::from_str(&data)
            .with_context(|| format!("parsing service config {}", path.display()))?;

        if cfg.bind_addr.trim().is_empty() {
            cfg.bind_addr = default_bind_addr();
        }
        Ok(cfg)
    }

    /// Resolve config using env var + fallbacks, then apply env overrides:
    /// 1) $SENTIMENT_CONFIG_PATH (must exist)
    /// 2) config/sentiment.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from_file(&pb)?
        } else {
            let fallback = PathBuf::from(DEFAULT_CONFIG_PATH);
            if fallback.exists() {
                Self::load_from_file(&fallback)?
            } else {
                warn!(path = DEFAULT_CONFIG_PATH, "service config not found, using defaults");
                Self::default()
            }
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(bind) = env::var(ENV_BIND) {
            if !bind.trim().is_empty() {
                self.bind_addr = bind.trim().to_string();
            }
        }
        if let Ok(p) = env::var(ENV_LEXICON_PATH) {
            if !p.trim().is_empty() {
                self.lexicon_path = Some(PathBuf::from(p.trim()));
            }
        }
        if let Some(on) = env::var(ENV_DETECT_LANGUAGE).ok().as_deref().and_then(parse_flag) {
            self.detect_language = on;
        }
        if let Some(on) = env::var(ENV_METRICS).ok().as_deref().and_then(parse_flag) {
            self.metrics = on;
        }
    }

    /// Build the scorer this config describes. A configured lexicon path that
    /// cannot be loaded, or an emoticon table too large to compile, is an
    /// error rather than a silent fallback.
    pub fn build_scorer(&self) -> Result<Scorer> {
        let lexicon = match &self.lexicon_path {
            Some(path) => Arc::new(Lexicon::load_from_file(path)?),
            None => Lexicon::bundled(),
        };
        let resolver: Arc<dyn LanguageResolver> = if self.detect_language {
            Arc::new(WhatlangResolver::for_languages(lexicon.languages()))
        } else {
            Arc::new(NoopResolver)
        };
        info!(
            languages = ?lexicon.languages(),
            detect_language = self.detect_language,
            "lexicon ready"
        );
        Scorer::new(lexicon, resolver)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
