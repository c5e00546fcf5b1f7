// src/config.rs
//! Command-line input, credential discovery and read limits.

use crate::constants::{
    DEFAULT_BITABLE_RECORD_CAP, DEFAULT_WIKI_MAX_DEPTH, FEISHU_API_BASE_URL,
    WIKI_MAX_DEPTH_CEILING,
};
use crate::error::AppError;
use crate::output::OutputFormat;
use crate::types::{AppCredentials, ResourceKind, SpaceId, ValidatedUrl, ValidationError};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_FILE_RELATIVE: &str = "reference/feishu_config.json";
const ENV_APP_ID: &str = "FEISHU_APP_ID";
const ENV_APP_SECRET: &str = "FEISHU_APP_SECRET";
const ENV_BASE_URL: &str = "FEISHU_BASE_URL";

const USAGE_EXAMPLES: &str = "\
Examples:
  feishu-reader docx_xxxxxxxxxxxxxx
  feishu-reader shtcnxxxxxxxxxxxxxx --type sheet
  feishu-reader bascnxxxxxxxxxxxxxx --type bitable --pretty
  feishu-reader wikcnxxxxxxxxxxxxxx --type wiki --recursive
  feishu-reader --wiki-space 7012345678901234567 --recursive
  feishu-reader \"https://example.feishu.cn/docx/xxxxx\" --output text";

/// Resource kind selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Infer from the token or URL
    Auto,
    Docx,
    Doc,
    Sheet,
    Bitable,
    Wiki,
}

impl KindArg {
    fn explicit(self) -> Option<ResourceKind> {
        match self {
            KindArg::Auto => None,
            KindArg::Docx => Some(ResourceKind::Docx),
            KindArg::Doc => Some(ResourceKind::Doc),
            KindArg::Sheet => Some(ResourceKind::Sheet),
            KindArg::Bitable => Some(ResourceKind::Bitable),
            KindArg::Wiki => Some(ResourceKind::Wiki),
        }
    }
}

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, after_help = USAGE_EXAMPLES)]
pub struct CommandLineInput {
    /// Document token or URL (e.g. "https://example.feishu.cn/docx/...")
    pub token: Option<String>,

    /// Resource kind; inferred from the token or URL by default
    #[arg(short = 't', long = "type", value_enum, default_value_t = KindArg::Auto)]
    pub kind: KindArg,

    /// Read a whole knowledge space instead of a single resource
    #[arg(long, value_name = "SPACE_ID")]
    pub wiki_space: Option<String>,

    /// Resolve the content of wiki child nodes as well
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// Pretty-print JSON output
    #[arg(short, long, default_value_t = false)]
    pub pretty: bool,

    /// Deepest wiki level whose nodes are resolved and expanded
    #[arg(long, default_value_t = DEFAULT_WIKI_MAX_DEPTH)]
    pub max_depth: u8,

    /// Records read per bitable table before the table is marked truncated
    #[arg(long, default_value_t = DEFAULT_BITABLE_RECORD_CAP)]
    pub max_records: usize,

    /// Credentials file (JSON with app_id and app_secret)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl CommandLineInput {
    /// Whether anything was given to read.
    pub fn has_target(&self) -> bool {
        self.token.is_some() || self.wiki_space.is_some()
    }
}

/// Policy limits for one read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadLimits {
    /// Nodes deeper than this are returned unexpanded.
    pub max_wiki_depth: u8,
    /// Records per bitable table.
    pub bitable_record_cap: usize,
}

impl ReadLimits {
    pub fn new(max_wiki_depth: u8, bitable_record_cap: usize) -> Result<Self, ValidationError> {
        if max_wiki_depth > WIKI_MAX_DEPTH_CEILING {
            return Err(ValidationError::OutOfBounds {
                value: max_wiki_depth as u32,
                min: 0,
                max: WIKI_MAX_DEPTH_CEILING as u32,
            });
        }
        if bitable_record_cap == 0 {
            return Err(ValidationError::OutOfBounds {
                value: 0,
                min: 1,
                max: u32::MAX,
            });
        }
        Ok(Self {
            max_wiki_depth,
            bitable_record_cap,
        })
    }
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self {
            max_wiki_depth: DEFAULT_WIKI_MAX_DEPTH,
            bitable_record_cap: DEFAULT_BITABLE_RECORD_CAP,
        }
    }
}

/// What the invocation asked to read.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadTarget {
    /// A token or URL, with an optional kind override.
    Resource {
        identifier: String,
        kind: Option<ResourceKind>,
    },
    /// A whole knowledge space.
    WikiSpace { space_id: SpaceId },
}

/// Resolved configuration, validated and ready to drive a read.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    pub target: ReadTarget,
    pub credentials: AppCredentials,
    pub base_url: ValidatedUrl,
    pub limits: ReadLimits,
    pub recursive: bool,
    pub output: OutputFormat,
    pub pretty: bool,
    pub verbose: bool,
}

impl ReaderConfig {
    /// Resolves a complete configuration from CLI input, files and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let target = match (&cli.wiki_space, &cli.token) {
            (Some(space), _) => ReadTarget::WikiSpace {
                space_id: SpaceId::parse(space)?,
            },
            (None, Some(identifier)) => ReadTarget::Resource {
                identifier: identifier.clone(),
                kind: cli.kind.explicit(),
            },
            (None, None) => {
                return Err(AppError::MissingConfiguration(
                    "a token, URL or --wiki-space is required".to_string(),
                ))
            }
        };

        let limits = ReadLimits::new(cli.max_depth, cli.max_records)?;
        let discovered = discover_credentials(
            &candidate_config_paths(cli.config.as_deref()),
            cli.config.is_some(),
            |key| std::env::var(key).ok(),
        )?;

        let base_url = discovered
            .base_url
            .unwrap_or_else(|| FEISHU_API_BASE_URL.to_string());
        let base_url = ValidatedUrl::parse(&base_url)?;

        Ok(ReaderConfig {
            target,
            credentials: discovered.credentials,
            base_url,
            limits,
            recursive: cli.recursive,
            output: cli.output,
            pretty: cli.pretty,
            verbose: cli.verbose,
        })
    }
}

/// Credentials file contents; every field optional.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    app_id: Option<String>,
    #[serde(default)]
    app_secret: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
}

/// Where the credentials came from, and the base URL override if any.
#[derive(Debug)]
pub struct DiscoveredCredentials {
    pub credentials: AppCredentials,
    pub base_url: Option<String>,
    pub source: String,
}

/// Config files checked in order: an explicit path alone, otherwise the
/// working directory and the directory above the executable.
fn candidate_config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }

    let mut paths = vec![PathBuf::from(".").join(CONFIG_FILE_RELATIVE)];
    if let Some(exe_parent) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().and_then(Path::parent).map(Path::to_path_buf))
    {
        paths.push(exe_parent.join(CONFIG_FILE_RELATIVE));
    }
    paths
}

/// Finds app credentials: the first usable config file, then the environment.
///
/// With `strict`, a listed file that cannot be read or parsed is an error;
/// otherwise it is logged and skipped.
pub fn discover_credentials<E>(
    paths: &[PathBuf],
    strict: bool,
    env: E,
) -> Result<DiscoveredCredentials, AppError>
where
    E: Fn(&str) -> Option<String>,
{
    for path in paths {
        match read_config_file(path) {
            Ok(Some(file)) => {
                if let (Some(app_id), Some(app_secret)) = (
                    file.app_id.filter(|s| !s.trim().is_empty()),
                    file.app_secret.filter(|s| !s.trim().is_empty()),
                ) {
                    log::info!("Using credentials from {}", path.display());
                    return Ok(DiscoveredCredentials {
                        credentials: AppCredentials::new(app_id, app_secret)?,
                        base_url: file.base_url.or_else(|| env(ENV_BASE_URL)),
                        source: path.display().to_string(),
                    });
                }
                log::warn!("{} has no app_id/app_secret; skipping", path.display());
            }
            Ok(None) => {
                if strict {
                    return Err(AppError::MissingConfiguration(format!(
                        "config file {} does not exist",
                        path.display()
                    )));
                }
            }
            Err(e) if strict => return Err(e),
            Err(e) => log::warn!("Failed to load config file: {}", e),
        }
    }

    match (env(ENV_APP_ID), env(ENV_APP_SECRET)) {
        (Some(app_id), Some(app_secret))
            if !app_id.trim().is_empty() && !app_secret.trim().is_empty() =>
        {
            log::info!("Using credentials from {}/{}", ENV_APP_ID, ENV_APP_SECRET);
            Ok(DiscoveredCredentials {
                credentials: AppCredentials::new(app_id, app_secret)?,
                base_url: env(ENV_BASE_URL),
                source: "environment".to_string(),
            })
        }
        _ => Err(AppError::MissingConfiguration(format!(
            "no usable credentials: create {} or set {} and {}",
            CONFIG_FILE_RELATIVE, ENV_APP_ID, ENV_APP_SECRET
        ))),
    }
}

/// Reads a config file; `Ok(None)` when it does not exist.
fn read_config_file(path: &Path) -> Result<Option<ConfigFile>, AppError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(AppError::Io(e)),
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| AppError::JsonParseError {
            path: path.to_path_buf(),
            source,
        })
}
