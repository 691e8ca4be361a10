pub mod config;
mod filters;
mod formatter;

pub use self::config::{LogFormat, LoggingConfig};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError};

/// Ошибка инициализации логирования.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid logging config: {0}")]
    InvalidConfig(String),

    #[error("global subscriber is already set: {0}")]
    Init(#[from] TryInitError),
}

/// Инициализация логирования с конфигурацией.
///
/// Конфигурация дополняется переменными окружения `FANOUT_LOG_*`, затем
/// устанавливается глобальный subscriber. Повторный вызов вернёт
/// [`LoggingError::Init`].
pub fn init_logging(mut config: LoggingConfig) -> Result<(), LoggingError> {
    config.apply_env_overrides();
    config.validate().map_err(LoggingError::InvalidConfig)?;

    let env_filter = filters::build_filter_from_config(&config);
    let console_layer = formatter::build_formatter_from_config(&config);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = %config.level,
        log_format = %config.format,
        "Logging system initialized"
    );

    Ok(())
}
