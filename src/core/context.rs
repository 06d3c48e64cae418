use std::{
    cell::OnceCell,
    collections::BTreeSet,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context as _, Result, anyhow};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        dom::HtmlDocument,
        engine::{DetectionEnv, I18n, InitOptions, LanguageCache, load_resources},
        file_scanner::scan_files,
    },
    issues::{ParseErrorFileType, ParseErrorIssue},
};

/// A markup file parsed into a document, with its source kept for reporting.
#[derive(Debug, Clone)]
pub struct ParsedPage {
    pub file_path: String,
    pub source: String,
    pub document: HtmlDocument,
}

/// Everything a command needs about the project: configuration, the page
/// set and an initialized engine.
///
/// Pages are parsed on first access; the engine is initialized eagerly so
/// configuration and resource errors surface before any work starts.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g. `--fallback-lng zh`)
/// 2. `.i18npagerc.json`
/// 3. Built-in defaults
pub struct PageContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root directory (for resolving relative paths).
    pub root_dir: PathBuf,

    /// Directory the pages are scanned from.
    pub source_dir: PathBuf,

    /// HTML files to process, sorted.
    pub files: BTreeSet<String>,

    /// Initialized engine.
    pub i18n: I18n,

    parsed_pages: OnceCell<Vec<ParsedPage>>,

    page_parse_errors: OnceCell<Vec<ParseErrorIssue>>,

    /// Locale files that failed to load.
    message_parse_errors: Vec<ParseErrorIssue>,
}

impl PageContext {
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        Self::with_out_dir(common_args, None)
    }

    /// Like [`PageContext::new`], with an output directory overriding the
    /// config file's `outDir`.
    pub fn with_out_dir(common_args: &CommonArgs, out_dir: Option<&Path>) -> Result<Self> {
        let verbose = common_args.verbose;

        // Priority: CLI --source-root arg > current directory
        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        root_dir
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", root_dir))?;

        let config_result = load_config(&root_dir)?;
        if !config_result.from_file {
            debug!("no config file found, using default configuration");
        }
        let mut config = config_result.config;

        if let Some(ref messages_root) = common_args.messages_root {
            config.messages_root = Some(messages_root.to_string_lossy().to_string());
        }
        if let Some(ref fallback_lng) = common_args.fallback_lng {
            config.fallback_lng = fallback_lng.clone();
            config.validate()?;
        }
        if let Some(out_dir) = out_dir {
            config.out_dir = out_dir.to_string_lossy().to_string();
        }

        let source_dir = resolve_path(&root_dir, &config.source_root);
        let out_dir = resolve_path(&root_dir, &config.out_dir);
        let message_dir = config
            .messages_root
            .as_deref()
            .map(|p| resolve_path(&root_dir, p));
        let cache_path = resolve_path(&root_dir, &config.cache_file);

        let source_path = source_dir
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", source_dir))?;

        // Run file scanning and resource loading in parallel
        let (scan_result, loaded) = rayon::join(
            || scan_files(source_path, &config.includes, &config.ignores),
            || load_resources(message_dir.as_deref()),
        );

        if scan_result.skipped_count > 0 {
            eprintln!(
                "Warning: {} path(s) skipped due to access errors{}",
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        // Generated pages must never be re-read as sources.
        let out_dir = normalize(&out_dir);
        let files = scan_result
            .files
            .into_iter()
            .filter(|f| !normalize(Path::new(f)).starts_with(&out_dir))
            .collect();

        let loaded = loaded?;
        let message_parse_errors = loaded
            .warnings
            .iter()
            .map(|warning| ParseErrorIssue {
                file_path: warning.file_path.clone(),
                error: warning.error.clone(),
                file_type: ParseErrorFileType::Message,
            })
            .collect();

        let options = InitOptions {
            resources: loaded.messages,
            fallback_lng: config.fallback_lng.clone(),
            interpolation: config.interpolation,
            detection: config.detection.clone(),
        };
        let env = detection_env(common_args.lng.as_deref(), LanguageCache::new(cache_path));
        let i18n = I18n::init(options, &env)?;

        Ok(Self {
            config,
            root_dir,
            source_dir,
            files,
            i18n,
            parsed_pages: OnceCell::new(),
            page_parse_errors: OnceCell::new(),
            message_parse_errors,
        })
    }

    /// Parsed documents for all pages (lazy initialization).
    ///
    /// Reading and parsing run in parallel; failures are collected as
    /// parse errors and the page is left out.
    pub fn parsed_pages(&self) -> &Vec<ParsedPage> {
        self.parsed_pages.get_or_init(|| {
            let results: Vec<_> = self
                .files
                .par_iter()
                .map(|file_path| {
                    let result = std::fs::read_to_string(file_path)
                        .map_err(|e| anyhow!("Failed to read file: {}", e))
                        .and_then(|source| {
                            let document = HtmlDocument::parse(&source)?;
                            Ok((source, document))
                        });
                    (file_path.clone(), result)
                })
                .collect();

            let mut pages = Vec::new();
            let mut errors = Vec::new();

            for (file_path, result) in results {
                match result {
                    Ok((source, document)) => pages.push(ParsedPage {
                        file_path,
                        source,
                        document,
                    }),
                    Err(e) => {
                        warn!(file = %file_path, error = %format!("{:#}", e), "failed to parse page");
                        errors.push(ParseErrorIssue {
                            file_path,
                            error: format!("{:#}", e),
                            file_type: ParseErrorFileType::Markup,
                        });
                    }
                }
            }

            let _ = self.page_parse_errors.set(errors);
            pages
        })
    }

    /// Pages that could not be read or parsed. Populated by `parsed_pages()`.
    pub fn page_parse_errors(&self) -> &Vec<ParseErrorIssue> {
        self.parsed_pages();
        self.page_parse_errors.get_or_init(Vec::new)
    }

    /// Locale files that could not be loaded.
    pub fn message_parse_errors(&self) -> &Vec<ParseErrorIssue> {
        &self.message_parse_errors
    }

    /// Output directory for translated pages.
    pub fn out_dir(&self) -> PathBuf {
        resolve_path(&self.root_dir, &self.config.out_dir)
    }

    /// Number of loaded locale tables.
    pub fn locale_count(&self) -> usize {
        self.i18n.resources().len()
    }
}

/// Detection inputs for a run. `lng` may be a language tag or a query
/// string such as `?lng=zh`.
fn detection_env(lng: Option<&str>, cache: LanguageCache) -> DetectionEnv {
    let env = DetectionEnv::from_system(None, Some(cache));
    match lng {
        Some(query) if query.contains('=') => env.with_query(query),
        Some(lng) => DetectionEnv {
            query_lng: Some(lng.to_string()),
            ..env
        },
        None => env,
    }
}

/// Resolve a config path against the project root; absolute paths win.
fn resolve_path(root_dir: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    let is_cur_dir = root_dir
        .components()
        .all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        p.to_path_buf()
    } else {
        let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
        root_dir.join(rel)
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
