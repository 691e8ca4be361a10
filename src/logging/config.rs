use std::{env, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Формат вывода логов в консоль.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let s = match self {
            Self::Pretty => "pretty",
            Self::Compact => "compact",
            Self::Json => "json",
        };
        f.write_str(s)
    }
}

/// Конфигурация логирования.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Базовый уровень (`trace`, `debug`, `info`, `warn`, `error`)
    pub level: String,
    /// Формат консольного вывода
    pub format: LogFormat,
    /// Цветной вывод
    pub with_ansi: bool,
    /// Печатать target события
    pub with_target: bool,
    /// Печатать id и имя потока
    pub with_thread_ids: bool,
    /// Печатать номер строки
    pub with_line_numbers: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            with_ansi: true,
            with_target: true,
            with_thread_ids: false,
            with_line_numbers: false,
        }
    }
}

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl LoggingConfig {
    /// Применяет переопределения из `FANOUT_LOG_LEVEL` и `FANOUT_LOG_FORMAT`.
    ///
    /// Некорректный формат игнорируется с предупреждением в stderr.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("FANOUT_LOG_LEVEL") {
            self.level = level.trim().to_ascii_lowercase();
        }
        if let Ok(format) = env::var("FANOUT_LOG_FORMAT") {
            match format.parse() {
                Ok(format) => self.format = format,
                Err(e) => eprintln!("Ignoring FANOUT_LOG_FORMAT: {e}"),
            }
        }
    }

    /// Проверяет уровень логирования.
    pub fn validate(&self) -> Result<(), String> {
        if LEVELS.contains(&self.level.as_str()) {
            Ok(())
        } else {
            Err(format!(
                "invalid log level '{}', expected one of {}",
                self.level,
                LEVELS.join(", ")
            ))
        }
    }

    /// Директива для `EnvFilter`, например `"fanout=debug,info"`.
    ///
    /// Уровень применяется к крейту, остальные цели остаются на `info`.
    pub fn build_filter_directive(&self) -> String {
        format!("{}={},info", env!("CARGO_CRATE_NAME"), self.level)
    }
}
