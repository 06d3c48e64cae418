//! Language detection.
//!
//! Sources are consulted in the configured order; the first one yielding a
//! well-formed language tag wins. Tags are canonicalized (`zh-cn` -> `zh-CN`,
//! `en_US.UTF-8` -> `en-US`) before use.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;
use unic_langid::LanguageIdentifier;

use super::cache::LanguageCache;

/// Query parameter consulted by [`DetectionSource::QueryString`].
pub const LOOKUP_QUERYSTRING: &str = "lng";

/// Where a language preference can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectionSource {
    /// An explicit request: `?lng=` on a page URL, `--lng` on the command line.
    #[serde(rename = "querystring")]
    QueryString,
    /// The language cached by an earlier run.
    #[serde(rename = "localStorage")]
    LocalStorage,
    /// Languages reported by the operating system.
    #[serde(rename = "navigator")]
    Navigator,
}

impl fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionSource::QueryString => write!(f, "querystring"),
            DetectionSource::LocalStorage => write!(f, "localStorage"),
            DetectionSource::Navigator => write!(f, "navigator"),
        }
    }
}

/// Where a detected language gets persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheTarget {
    #[serde(rename = "localStorage")]
    LocalStorage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionOptions {
    #[serde(default = "default_order")]
    pub order: Vec<DetectionSource>,
    #[serde(default = "default_caches")]
    pub caches: Vec<CacheTarget>,
}

fn default_order() -> Vec<DetectionSource> {
    vec![
        DetectionSource::QueryString,
        DetectionSource::LocalStorage,
        DetectionSource::Navigator,
    ]
}

fn default_caches() -> Vec<CacheTarget> {
    vec![CacheTarget::LocalStorage]
}

impl Default for DetectionOptions {
    fn default() -> Self {
        Self {
            order: default_order(),
            caches: default_caches(),
        }
    }
}

/// Everything the detector may look at.
#[derive(Debug, Clone, Default)]
pub struct DetectionEnv {
    /// Language requested explicitly.
    pub query_lng: Option<String>,
    /// Persisted choice from a previous run.
    pub cache: Option<LanguageCache>,
    /// Preferred languages of the host, most preferred first.
    pub navigator: Vec<String>,
}

impl DetectionEnv {
    /// Detection inputs from the running system: the OS locale list plus a
    /// cache file.
    pub fn from_system(query_lng: Option<String>, cache: Option<LanguageCache>) -> Self {
        let navigator: Vec<String> = sys_locale::get_locales().collect();
        debug!(?navigator, "system locales");
        Self {
            query_lng,
            cache,
            navigator,
        }
    }

    /// Take the requested language from a URL query string such as
    /// `?lng=zh&theme=dark`.
    pub fn with_query(mut self, query: &str) -> Self {
        self.query_lng = lng_from_query(query);
        self
    }

    fn candidates(&self, source: DetectionSource) -> Vec<String> {
        match source {
            DetectionSource::QueryString => self.query_lng.iter().cloned().collect(),
            DetectionSource::LocalStorage => self
                .cache
                .as_ref()
                .and_then(LanguageCache::read)
                .into_iter()
                .collect(),
            DetectionSource::Navigator => self.navigator.clone(),
        }
    }
}

/// Result of running detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub language: String,
    /// `None` when no source produced a usable tag and the fallback was used.
    pub source: Option<DetectionSource>,
}

/// Walk `order` and return the first usable language, or `fallback_lng`.
pub fn detect(order: &[DetectionSource], env: &DetectionEnv, fallback_lng: &str) -> Detection {
    for source in order {
        for candidate in env.candidates(*source) {
            match canonicalize(&candidate) {
                Some(language) => {
                    debug!(%source, %language, "language detected");
                    return Detection {
                        language,
                        source: Some(*source),
                    };
                }
                None => debug!(%source, %candidate, "ignoring malformed language tag"),
            }
        }
    }

    Detection {
        language: fallback_lng.to_string(),
        source: None,
    }
}

/// Canonical BCP 47 form of a language tag, tolerating POSIX spellings.
///
/// Returns `None` for tags without a language (`und`, `C`, empty strings).
pub fn canonicalize(code: &str) -> Option<String> {
    let code = code.trim();
    let code = code.split(['.', '@']).next().unwrap_or_default();
    let code = code.replace('_', "-");

    let id: LanguageIdentifier = code.parse().ok()?;
    if id.language.is_empty() {
        return None;
    }
    Some(id.to_string())
}

/// Lookup order for a language: the tag itself, its base language, then the
/// fallback. Duplicates are dropped.
pub fn resolution_chain(language: &str, fallback_lng: &str) -> Vec<String> {
    let mut chain = vec![language.to_string()];

    if let Ok(id) = language.parse::<LanguageIdentifier>() {
        chain.push(id.language.as_str().to_string());
    }
    chain.push(fallback_lng.to_string());

    let mut seen = Vec::with_capacity(chain.len());
    for code in chain {
        if !code.is_empty() && !seen.contains(&code) {
            seen.push(code);
        }
    }
    seen
}

fn lng_from_query(query: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == LOOKUP_QUERYSTRING)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}
