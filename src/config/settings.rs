use std::time::Duration;

use serde::{Deserialize, Serialize};

use config::{Config, ConfigError, Environment};

use crate::logging::LoggingConfig;

/// Настройки демо-издателя.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Пауза между публикациями, мс
    pub publish_interval_ms: u64,
    /// Сколько раз публиковать
    pub iterations: u64,
    /// Имена подписчиков, которых регистрирует демо
    pub subscribers: Vec<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Settings {
    /// Загружает настройки: значения по умолчанию, затем переменные окружения
    /// с префиксом `FANOUT_` (вложенные ключи через `__`, например
    /// `FANOUT_LOGGING__LEVEL=debug`; списки через запятую).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(
            Environment::with_prefix("FANOUT")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("subscribers")
                .try_parsing(true),
        )
    }

    fn load_from(env: Environment) -> Result<Self, ConfigError> {
        let cfg = Config::builder()
            // Добавляем значения по умолчанию
            .set_default("publish_interval_ms", 100)?
            .set_default("iterations", 10_000)?
            .set_default("subscribers", vec!["subscriberA", "subscriberB"])?
            .add_source(env)
            .build()?;

        let settings: Self = cfg.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Проверяет значения, которые `serde` пропускает.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.publish_interval_ms == 0 {
            return Err(ConfigError::Message(
                "publish_interval_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn publish_interval(&self) -> Duration {
        Duration::from_millis(self.publish_interval_ms)
    }
}
