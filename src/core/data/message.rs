use std::collections::HashMap;

/// Position information in locale resource files (JSON).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MessageLocation {
    /// Path to the locale file (e.g., "./locales/en.json").
    pub file_path: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub col: usize,
}

impl MessageLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }

    /// Create with default column (1).
    pub fn with_line(file_path: impl Into<String>, line: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col: 1,
        }
    }
}

/// Position with context information in message files.
///
/// Contains the key and value at this location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContext {
    pub location: MessageLocation,
    /// The translation key (e.g., "nav.home").
    pub key: String,
    /// The translation value.
    pub value: String,
}

impl MessageContext {
    pub fn new(
        location: MessageLocation,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            location,
            key: key.into(),
            value: value.into(),
        }
    }

    // Convenience accessors
    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }
}

/// All messages for a single locale (its resource table).
#[derive(Debug, Clone)]
pub struct LocaleMessages {
    /// Locale code (e.g., "en", "zh").
    pub locale: String,
    /// File path of the locale file.
    pub file_path: String,
    /// All message entries, keyed by flattened translation key.
    pub entries: HashMap<String, MessageContext>,
}

/// Resource tables keyed by locale code.
pub type AllLocaleMessages = HashMap<String, LocaleMessages>;

impl LocaleMessages {
    pub fn new(locale: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            file_path: file_path.into(),
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&MessageContext> {
        self.entries.get(key)
    }

    /// The translated string for `key`, if present.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|ctx| ctx.value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
