//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the credentials are not all in the environment, falls back to a
//!    config file, then overlays whatever the environment does provide
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//! 5. With no config file anywhere, starts from defaults plus environment
//!
//! ## Environment Variables
//! - `JIRA_URL`, `JIRA_EMAIL`, `JIRA_API_TOKEN`, `JIRA_PROJECT_KEY`
//! - `JIRA_FETCH_WORKLOGS` (true/false), `JIRA_MAX_RESULTS`
//! - `GITHUB_TOKEN`, `GITHUB_USERNAME` (or `GITHUB_OWNER`), `GITHUB_API_URL`
//! - `LLM_PROVIDER` (`groq`, `openai`, `azure`, `disabled`)
//! - `GROQ_API_KEY`, `GROQ_MODEL`, `OPENAI_API_KEY`, `OPENAI_MODEL`
//! - `AZURE_OPENAI_ENDPOINT`, `AZURE_OPENAI_API_KEY`,
//!   `AZURE_OPENAI_API_VERSION`, `AZURE_OPENAI_DEPLOYMENT_NAME`
//! - `DAYSHEET_LOGS_DIR`
//! - `EMPLOYEE_ID`, `EMPLOYEE_NAME`, `EMPLOYEE_BILLABLE`, `EMPLOYEE_ROLE`,
//!   `EMPLOYEE_SITE`, `EMPLOYEE_AUTHORIZED_HOURS`
//! - `DAYSHEET_REPORT_DAYS`, `DAYSHEET_LOOKBACK_DAYS`,
//!   `DAYSHEET_HTTP_TIMEOUT_SECS`, `DAYSHEET_HTTP_MAX_ATTEMPTS`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./daysheet.{toml,json}` or `./config.{toml,json}` (current working
//!    directory)
//! 2. The same names in the parent and grandparent directories
//! 3. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use daysheet_domain::{Config, DaysheetError, LlmProvider, Result};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["daysheet.toml", "daysheet.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `DaysheetError::Config` if:
/// - An environment variable has an invalid value
/// - A config file exists but its format is invalid
pub fn load() -> Result<Config> {
    // Try loading from environment first
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            match probe_config_paths() {
                Some(path) => apply_env_overrides(load_from_file(Some(path))?),
                None => {
                    tracing::info!("No config file found; using defaults and environment");
                    apply_env_overrides(Config::default())
                }
            }
        }
    }
}

/// Load configuration from environment variables
///
/// The Jira URL, Jira API token, and GitHub token must all be present;
/// every other setting falls back to its default.
///
/// # Errors
/// Returns `DaysheetError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    env_var("JIRA_URL")?;
    env_var("JIRA_API_TOKEN")?;
    env_var("GITHUB_TOKEN")?;
    apply_env_overrides(Config::default())
}

/// Overlay every configuration variable present in the environment onto
/// `config`.
///
/// # Errors
/// Returns `DaysheetError::Config` for unparsable numbers or providers.
pub fn apply_env_overrides(mut config: Config) -> Result<Config> {
    set_opt(&mut config.jira.base_url, "JIRA_URL");
    set_opt(&mut config.jira.email, "JIRA_EMAIL");
    set_opt(&mut config.jira.api_token, "JIRA_API_TOKEN");
    set_opt(&mut config.jira.project_key, "JIRA_PROJECT_KEY");
    config.jira.fetch_worklogs = env_bool("JIRA_FETCH_WORKLOGS", config.jira.fetch_worklogs);
    if let Some(max) = env_parse("JIRA_MAX_RESULTS")? {
        config.jira.max_results = max;
    }

    set_opt(&mut config.github.token, "GITHUB_TOKEN");
    set_opt(&mut config.github.username, "GITHUB_OWNER");
    set_opt(&mut config.github.username, "GITHUB_USERNAME");
    if let Some(url) = env_opt("GITHUB_API_URL") {
        config.github.api_url = url;
    }

    if let Some(provider) = env_opt("LLM_PROVIDER") {
        config.llm.provider = LlmProvider::from_str(&provider).map_err(DaysheetError::Config)?;
    }
    match config.llm.provider {
        LlmProvider::Groq => {
            set_opt(&mut config.llm.api_key, "GROQ_API_KEY");
            if let Some(model) = env_opt("GROQ_MODEL") {
                config.llm.model = model;
            }
        }
        LlmProvider::OpenAi => {
            set_opt(&mut config.llm.api_key, "OPENAI_API_KEY");
            if let Some(model) = env_opt("OPENAI_MODEL") {
                config.llm.model = model;
            }
        }
        LlmProvider::Azure => {
            set_opt(&mut config.llm.api_key, "AZURE_OPENAI_API_KEY");
            set_opt(&mut config.llm.endpoint, "AZURE_OPENAI_ENDPOINT");
            set_opt(&mut config.llm.api_version, "AZURE_OPENAI_API_VERSION");
            set_opt(&mut config.llm.deployment, "AZURE_OPENAI_DEPLOYMENT_NAME");
        }
        LlmProvider::Disabled => {}
    }

    if let Some(dir) = env_opt("DAYSHEET_LOGS_DIR") {
        config.cache.logs_dir = PathBuf::from(dir);
    }

    if let Some(id) = env_opt("EMPLOYEE_ID") {
        config.employee.employee_id = id;
    }
    if let Some(name) = env_opt("EMPLOYEE_NAME") {
        config.employee.employee_name = name;
    }
    config.employee.billable = env_bool("EMPLOYEE_BILLABLE", config.employee.billable);
    if let Some(role) = env_opt("EMPLOYEE_ROLE") {
        config.employee.role = role;
    }
    if let Some(site) = env_opt("EMPLOYEE_SITE") {
        config.employee.site = site;
    }
    if let Some(hours) = env_parse("EMPLOYEE_AUTHORIZED_HOURS")? {
        config.employee.authorized_hours = hours;
    }

    if let Some(days) = env_parse("DAYSHEET_REPORT_DAYS")? {
        config.report.default_days = days;
    }
    if let Some(days) = env_parse("DAYSHEET_LOOKBACK_DAYS")? {
        config.report.carry_forward_lookback_days = days;
    }
    if let Some(secs) = env_parse("DAYSHEET_HTTP_TIMEOUT_SECS")? {
        config.http.timeout_secs = secs;
    }
    if let Some(attempts) = env_parse("DAYSHEET_HTTP_MAX_ATTEMPTS")? {
        config.http.max_attempts = attempts;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `DaysheetError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(DaysheetError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            DaysheetError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| DaysheetError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| DaysheetError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| DaysheetError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(DaysheetError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the working directory, its two parents, then the executable's
/// directory for `daysheet.{toml,json}` and `config.{toml,json}`.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `DaysheetError::Config` if the variable is not set or empty.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        DaysheetError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Non-empty environment variable, trimmed
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn set_opt(target: &mut Option<String>, key: &str) {
    if let Some(value) = env_opt(key) {
        *target = Some(value);
    }
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| DaysheetError::Config(format!("Invalid value for {}: {}", key, e)))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
