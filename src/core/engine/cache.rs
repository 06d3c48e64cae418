use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// On-disk stand-in for browser local storage: remembers the last language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCache {
    path: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lng: Option<String>,
}

impl LanguageCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The cached language. Missing or unreadable files count as empty.
    pub fn read(&self) -> Option<String> {
        let content = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<CacheFile>(&content) {
            Ok(file) => file.lng.filter(|lng| !lng.is_empty()),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring corrupt language cache");
                None
            }
        }
    }

    pub fn write(&self, lng: &str) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let file = CacheFile {
            lng: Some(lng.to_string()),
        };
        let content = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write language cache: {}", self.path.display()))?;
        debug!(path = %self.path.display(), %lng, "language cached");
        Ok(())
    }
}
