//! Translation engine: resource tables, language detection, lookups.
//!
//! An [`I18n`] only exists once initialization has finished (resources
//! registered, language detected, choice cached), so anything holding one can
//! translate right away.

mod cache;
mod detect;
mod resources;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use cache::LanguageCache;
pub use detect::{
    CacheTarget, Detection, DetectionEnv, DetectionOptions, DetectionSource, LOOKUP_QUERYSTRING,
    canonicalize, detect, resolution_chain,
};
pub use resources::{LoadedResources, bundled_resources, load_resources};

use crate::core::{AllLocaleMessages, TranslationContext};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpolationOptions {
    /// Must stay `false`: strings pass through raw and the document layer
    /// escapes them when writing markup.
    #[serde(default)]
    pub escape_value: bool,
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct InitOptions {
    pub resources: AllLocaleMessages,
    pub fallback_lng: String,
    pub interpolation: InterpolationOptions,
    pub detection: DetectionOptions,
}

impl InitOptions {
    pub fn new(resources: AllLocaleMessages, fallback_lng: impl Into<String>) -> Self {
        Self {
            resources,
            fallback_lng: fallback_lng.into(),
            interpolation: InterpolationOptions::default(),
            detection: DetectionOptions::default(),
        }
    }
}

/// An initialized translation engine.
#[derive(Debug)]
pub struct I18n {
    resources: AllLocaleMessages,
    fallback_lng: String,
    language: String,
    languages: Vec<String>,
    detected_by: Option<DetectionSource>,
    caches: Vec<CacheTarget>,
    cache: Option<LanguageCache>,
}

impl I18n {
    /// Register resources, detect the language and cache the choice.
    ///
    /// Fails on invalid options; never on detection or cache problems.
    pub fn init(options: InitOptions, env: &DetectionEnv) -> Result<Self> {
        if options.interpolation.escape_value {
            bail!(
                "interpolation.escapeValue must be false: translations are inserted as text and escaped by the document"
            );
        }

        let Some(fallback_lng) = canonicalize(&options.fallback_lng) else {
            bail!(
                "Invalid fallback language: \"{}\"",
                options.fallback_lng
            );
        };

        if options.resources.is_empty() {
            bail!("No translation resources registered");
        }

        let detection = detect(&options.detection.order, env, &fallback_lng);
        let languages = resolution_chain(&detection.language, &fallback_lng);
        debug!(
            language = %detection.language,
            ?languages,
            source = ?detection.source,
            "i18n initialized"
        );

        let i18n = Self {
            resources: options.resources,
            fallback_lng,
            language: detection.language,
            languages,
            detected_by: detection.source,
            caches: options.detection.caches,
            cache: env.cache.clone(),
        };
        i18n.cache_language();
        Ok(i18n)
    }

    /// Lookup across the resolution chain. Unknown keys come back unchanged.
    pub fn t(&self, key: &str) -> String {
        self.languages
            .iter()
            .filter_map(|lng| self.resources.get(lng))
            .find_map(|table| table.value(key))
            .unwrap_or(key)
            .to_string()
    }

    pub fn exists(&self, key: &str) -> bool {
        self.languages
            .iter()
            .filter_map(|lng| self.resources.get(lng))
            .any(|table| table.contains_key(key))
    }

    /// The detected (or most recently chosen) language.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Lookup order, most specific first.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn fallback_lng(&self) -> &str {
        &self.fallback_lng
    }

    /// Which source picked the language; `None` means the fallback was used.
    pub fn detected_by(&self) -> Option<DetectionSource> {
        self.detected_by
    }

    pub fn resources(&self) -> &AllLocaleMessages {
        &self.resources
    }

    /// Whether a resource table is registered for `lng`.
    pub fn has_resource_bundle(&self, lng: &str) -> bool {
        self.resources.contains_key(lng)
    }

    /// Switch language and cache the new choice.
    pub fn change_language(&mut self, lng: &str) -> Result<()> {
        let Some(language) = canonicalize(lng) else {
            bail!("Invalid language: \"{}\"", lng);
        };
        self.languages = resolution_chain(&language, &self.fallback_lng);
        self.language = language;
        self.detected_by = None;
        self.cache_language();
        Ok(())
    }

    fn cache_language(&self) {
        let Some(cache) = &self.cache else {
            return;
        };
        for target in &self.caches {
            match target {
                CacheTarget::LocalStorage => {
                    if let Err(e) = cache.write(&self.language) {
                        warn!(error = %format!("{:#}", e), "failed to cache language");
                    }
                }
            }
        }
    }
}

impl TranslationContext for I18n {
    fn t(&self, key: &str) -> String {
        I18n::t(self, key)
    }

    fn exists(&self, key: &str) -> bool {
        I18n::exists(self, key)
    }
}
