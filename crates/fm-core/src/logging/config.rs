//! Logging configuration.
//!
//! Level and format come from, in increasing priority:
//! - `RUST_LOG` (full `EnvFilter` directives)
//! - `FM_LOG` / `FM_LOG_FORMAT`
//! - CLI flags (`-v` / `-q`, `--log-format`)

use serde::{Deserialize, Serialize};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Console lines on stderr (default).
    #[default]
    Human,
    /// One JSON object per line on stderr.
    Jsonl,
}

impl LogFormat {
    const ALIASES: [(&'static str, LogFormat); 6] = [
        ("human", LogFormat::Human),
        ("console", LogFormat::Human),
        ("pretty", LogFormat::Human),
        ("jsonl", LogFormat::Jsonl),
        ("json", LogFormat::Jsonl),
        ("structured", LogFormat::Jsonl),
    ];
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(&Self::ALIASES, s).ok_or_else(|| format!("unknown log format: {}", s))
    }
}

/// Verbosity threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    /// Warnings and errors only (default).
    #[default]
    Warn,
    Error,
    Off,
}

impl LogLevel {
    const ALIASES: [(&'static str, LogLevel); 9] = [
        ("trace", LogLevel::Trace),
        ("debug", LogLevel::Debug),
        ("info", LogLevel::Info),
        ("warn", LogLevel::Warn),
        ("warning", LogLevel::Warn),
        ("error", LogLevel::Error),
        ("off", LogLevel::Off),
        ("none", LogLevel::Off),
        ("quiet", LogLevel::Off),
    ];

    /// Directive understood by `EnvFilter`.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(&Self::ALIASES, s).ok_or_else(|| format!("unknown log level: {}", s))
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.directive())
    }
}

fn lookup<T: Copy>(table: &[(&str, T)], name: &str) -> Option<T> {
    let name = name.trim().to_ascii_lowercase();
    table
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, value)| *value)
}

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Raw `RUST_LOG` directives, used only when nothing else set a level.
    pub rust_log: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::Human,
            level: LogLevel::Warn,
            rust_log: None,
        }
    }
}

/// Logging-related environment variables.
#[derive(Debug, Clone, Default)]
pub struct LogEnv {
    pub fm_log: Option<String>,
    pub fm_log_format: Option<String>,
    pub rust_log: Option<String>,
}

impl LogEnv {
    pub fn capture() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        LogEnv {
            fm_log: var("FM_LOG"),
            fm_log_format: var("FM_LOG_FORMAT"),
            rust_log: var("RUST_LOG"),
        }
    }
}

impl LogConfig {
    /// Read the environment, then apply CLI overrides.
    pub fn from_env(cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self {
        LogConfig::resolve(&LogEnv::capture(), cli_level, cli_format)
    }

    /// CLI flags beat `FM_LOG*`, which beat `RUST_LOG`.
    pub fn resolve(
        env: &LogEnv,
        cli_level: Option<LogLevel>,
        cli_format: Option<LogFormat>,
    ) -> Self {
        let defaults = LogConfig::default();
        let explicit_level = cli_level.or_else(|| env.fm_log.as_deref()?.parse().ok());
        let env_format = env.fm_log_format.as_deref().and_then(|v| v.parse().ok());

        LogConfig {
            format: cli_format.or(env_format).unwrap_or(defaults.format),
            level: explicit_level.unwrap_or(defaults.level),
            rust_log: match explicit_level {
                Some(_) => None,
                None => env.rust_log.clone(),
            },
        }
    }

    /// Directives for the subscriber's `EnvFilter`.
    pub fn filter_directives(&self) -> &str {
        self.rust_log
            .as_deref()
            .unwrap_or_else(|| self.level.directive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!("human".parse::<LogFormat>().unwrap(), LogFormat::Human);
        assert_eq!(" JSONL ".parse::<LogFormat>().unwrap(), LogFormat::Jsonl);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Jsonl);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("quiet".parse::<LogLevel>().unwrap(), LogLevel::Off);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Warn);
        assert!(LogLevel::Error < LogLevel::Off);
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }

    fn env(fm_log: Option<&str>, rust_log: Option<&str>) -> LogEnv {
        LogEnv {
            fm_log: fm_log.map(String::from),
            fm_log_format: None,
            rust_log: rust_log.map(String::from),
        }
    }

    #[test]
    fn test_rust_log_used_when_nothing_else_set() {
        let config = LogConfig::resolve(&env(None, Some("fm_core=debug")), None, None);
        assert_eq!(config.filter_directives(), "fm_core=debug");
    }

    #[test]
    fn test_cli_level_beats_rust_log() {
        let config = LogConfig::resolve(&env(None, Some("debug")), Some(LogLevel::Error), None);
        assert_eq!(config.level, LogLevel::Error);
        assert_eq!(config.rust_log, None);
        assert_eq!(config.filter_directives(), "error");
    }

    #[test]
    fn test_fm_log_beats_rust_log() {
        let config = LogConfig::resolve(&env(Some("error"), Some("debug")), None, None);
        assert_eq!(config.filter_directives(), "error");
    }

    #[test]
    fn test_cli_level_beats_fm_log() {
        let config = LogConfig::resolve(&env(Some("error"), None), Some(LogLevel::Trace), None);
        assert_eq!(config.level, LogLevel::Trace);
    }

    #[test]
    fn test_default_filter_is_warn() {
        let config = LogConfig::resolve(&LogEnv::default(), None, None);
        assert_eq!(config.filter_directives(), "warn");
    }

    #[test]
    fn test_format_precedence() {
        let mut vars = env(None, None);
        vars.fm_log_format = Some("jsonl".into());
        assert_eq!(LogConfig::resolve(&vars, None, None).format, LogFormat::Jsonl);
        assert_eq!(
            LogConfig::resolve(&vars, None, Some(LogFormat::Human)).format,
            LogFormat::Human
        );
    }
}
