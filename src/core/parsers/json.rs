use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::core::{
    AllLocaleMessages, LocaleMessages, MessageContext, MessageLocation,
    utils::{build_line_index, offset_to_line},
};

/// A warning from scanning message files.
#[derive(Debug, Clone)]
pub struct MessageScanWarning {
    pub file_path: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct ScanMessagesResult {
    pub messages: AllLocaleMessages,
    pub warnings: Vec<MessageScanWarning>,
}

pub fn parse_json_file(path: &Path, locale: &str) -> Result<LocaleMessages> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {:?}", path))?;

    parse_json_str(&content, &path.to_string_lossy(), locale)
}

/// Parse one locale resource table from JSON text.
///
/// Nested objects flatten to dotted keys, string arrays are joined with
/// `", "`, arrays of objects expand with their index (`items.0.label`).
/// Numbers, booleans and nulls carry no translation and are skipped.
pub fn parse_json_str(content: &str, file_path: &str, locale: &str) -> Result<LocaleMessages> {
    let json: Value = serde_json::from_str(content)
        .with_context(|| format!("Failed to parse JSON file: {:?}", file_path))?;

    if !json.is_object() {
        bail!("Locale file {:?} must contain a JSON object", file_path);
    }

    // Pre-compute line index for O(log n) line lookups
    let line_index = build_line_index(content);
    let mut messages = LocaleMessages::new(locale, file_path);
    flatten_json(
        &json,
        String::new(),
        file_path,
        content,
        &line_index,
        &mut messages,
    );
    Ok(messages)
}

/// Find the line number where a key appears in the JSON content.
///
/// Searches for each key part in sequence to handle duplicate leaf keys correctly.
/// For example, `nav.home` finds the `"home"` that comes after `"nav"`,
/// not a `"home"` in another namespace like `"footer"`.
///
/// Each match must be a JSON key (followed by `:`), not a string value that
/// happens to contain the same text.
fn find_key_line(content: &str, key_path: &str, line_index: &[usize]) -> usize {
    let mut search_start = 0;
    for part in key_path.split('.') {
        let pattern = format!("\"{}\"", part);
        let remaining = &content[search_start..];

        let mut pos = 0;
        let mut found = false;
        while let Some(rel_pos) = remaining[pos..].find(&pattern) {
            let abs_pos = pos + rel_pos;
            let after_pattern = abs_pos + pattern.len();

            if after_pattern < remaining.len()
                && remaining[after_pattern..].trim_start().starts_with(':')
            {
                search_start += after_pattern;
                found = true;
                break;
            }
            pos = abs_pos + 1;
        }

        if !found {
            break;
        }
    }

    if search_start > 0 {
        offset_to_line(line_index, search_start)
    } else {
        1
    }
}

fn flatten_json(
    value: &Value,
    prefix: String,
    file_path: &str,
    content: &str,
    line_index: &[usize],
    result: &mut LocaleMessages,
) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        }
    };

    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten_json(val, join(key), file_path, content, line_index, result);
            }
        }
        Value::String(s) => {
            let line = find_key_line(content, &prefix, line_index);
            let context = MessageContext::new(
                MessageLocation::with_line(file_path, line),
                prefix.clone(),
                s.clone(),
            );
            result.entries.insert(prefix, context);
        }
        Value::Array(arr) => {
            if arr.is_empty() {
                return;
            }

            let is_string_array = arr.iter().all(Value::is_string);

            if is_string_array && !prefix.is_empty() {
                let values: Vec<&str> = arr.iter().filter_map(Value::as_str).collect();
                let line = find_key_line(content, &prefix, line_index);
                let context = MessageContext::new(
                    MessageLocation::with_line(file_path, line),
                    prefix.clone(),
                    values.join(", "),
                );
                result.entries.insert(prefix, context);
            } else {
                for (index, val) in arr.iter().enumerate() {
                    flatten_json(
                        val,
                        join(&index.to_string()),
                        file_path,
                        content,
                        line_index,
                        result,
                    );
                }
            }
        }
        _ => {}
    }
}

/// Extracts locale from filename.
///
/// Examples:
/// - "en.json" -> Some("en")
/// - "zh-CN.json" -> Some("zh-CN")
/// - "/path/to/locales/ja.json" -> Some("ja")
pub fn extract_locale(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// Load every `<locale>.json` in `message_dir`.
///
/// Unparseable files become warnings so one broken locale doesn't take the
/// others down with it.
pub fn scan_message_files(message_dir: impl AsRef<Path>) -> Result<ScanMessagesResult> {
    let message_dir = message_dir.as_ref();
    let mut result = ScanMessagesResult::default();

    if !message_dir.exists() {
        bail!(
            "Messages directory '{}' does not exist.\n\
             Hint: Check your .i18npagerc.json 'messagesRoot' setting.",
            message_dir.display()
        );
    }

    if !message_dir.is_dir() {
        bail!("'{}' is not a directory.", message_dir.display());
    }

    for entry in fs::read_dir(message_dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) == Some("json")
            && let Some(locale) = extract_locale(&path)
        {
            match parse_json_file(&path, &locale) {
                Ok(messages) => {
                    result.messages.insert(locale, messages);
                }
                Err(e) => {
                    result.warnings.push(MessageScanWarning {
                        file_path: path.to_string_lossy().to_string(),
                        error: format!("{:#}", e),
                    });
                }
            }
        }
    }

    Ok(result)
}
