use std::path::Path;

use anyhow::{Result, bail};
use tracing::{debug, warn};

use super::detect::canonicalize;
use crate::core::{
    AllLocaleMessages, LocaleMessages,
    parsers::json::{MessageScanWarning, parse_json_str, scan_message_files},
};

/// Locale tables compiled into the binary.
const BUNDLED: &[(&str, &str)] = &[
    (
        "en",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/locales/en.json")),
    ),
    (
        "zh",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/locales/zh.json")),
    ),
];

/// Resource tables plus the files that failed to load.
#[derive(Debug, Default)]
pub struct LoadedResources {
    pub messages: AllLocaleMessages,
    pub warnings: Vec<MessageScanWarning>,
}

/// The bundled `en` and `zh` tables.
pub fn bundled_resources() -> Result<AllLocaleMessages> {
    let mut messages = AllLocaleMessages::new();
    for (locale, content) in BUNDLED {
        let table = parse_json_str(content, &format!("<bundled>/{}.json", locale), locale)?;
        messages.insert(locale.to_string(), table);
    }
    Ok(messages)
}

/// Load resources from `messages_root`, or the bundled tables when unset.
///
/// Locale codes are canonicalized so `zh-cn.json` serves `zh-CN`.
pub fn load_resources(messages_root: Option<&Path>) -> Result<LoadedResources> {
    let Some(root) = messages_root else {
        return Ok(LoadedResources {
            messages: bundled_resources()?,
            warnings: Vec::new(),
        });
    };

    let scanned = scan_message_files(root)?;
    for warning in &scanned.warnings {
        warn!(file = %warning.file_path, error = %warning.error, "skipping locale file");
    }

    if scanned.messages.is_empty() {
        bail!(
            "No locale files could be loaded from '{}'",
            root.display()
        );
    }

    let messages = scanned
        .messages
        .into_values()
        .map(|table| {
            let code = canonicalize(&table.locale).unwrap_or_else(|| table.locale.clone());
            debug!(locale = %code, keys = table.len(), file = %table.file_path, "loaded locale");
            (code.clone(), LocaleMessages { locale: code, ..table })
        })
        .collect();

    Ok(LoadedResources {
        messages,
        warnings: scanned.warnings,
    })
}
