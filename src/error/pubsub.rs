use std::error::Error as StdError;

use thiserror::Error;

/// Результат вызова обработчика подписки.
pub type HandlerResult = Result<(), HandlerError>;

/// Ошибка, которую возвращает обработчик подписки.
///
/// Любой `Err` означает, что текущий раунд публикации был для подписки
/// последним: брокер удалит её после раунда. Различие только в том,
/// попадёт ли текст ошибки в итоговый [`PublishError`].
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Добровольная отписка. Подписка удаляется, но ошибкой это не считается
    /// и в агрегированное сообщение не попадает.
    #[error("")]
    Unsubscribe,

    /// Обработчик упал с текстовым сообщением.
    #[error("{0}")]
    Failed(String),

    /// Обработчик упал с произвольной ошибкой.
    #[error("{0}")]
    Other(Box<dyn StdError + Send + Sync>),
}

impl HandlerError {
    /// Создаёт ошибку с текстовым сообщением.
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }

    /// Оборачивает любую ошибку.
    pub fn other<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Other(Box::new(err))
    }

    /// Проверяет, является ли ошибка сигналом отписки.
    ///
    /// Сравнение идёт по варианту, а не по тексту: `Failed("")` сигналом
    /// отписки не является.
    pub fn is_unsubscribe(&self) -> bool {
        matches!(self, Self::Unsubscribe)
    }
}

impl From<&str> for HandlerError {
    fn from(msg: &str) -> Self {
        Self::Failed(msg.to_string())
    }
}

impl From<String> for HandlerError {
    fn from(msg: String) -> Self {
        Self::Failed(msg)
    }
}

/// Агрегированная ошибка одного раунда публикации.
///
/// Содержит тексты всех ошибок (кроме [`HandlerError::Unsubscribe`]) в порядке
/// вызова обработчиков. `Display` склеивает их через `"; "`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .failures.join("; "))]
pub struct PublishError {
    failures: Vec<String>,
}

impl PublishError {
    pub(crate) fn new(failures: Vec<String>) -> Self {
        Self { failures }
    }

    /// Тексты ошибок в порядке вызова обработчиков.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_unsubscribe_display_is_empty() {
        assert_eq!(HandlerError::Unsubscribe.to_string(), "");
        assert!(HandlerError::Unsubscribe.is_unsubscribe());
    }

    /// Тест проверяет, что пустое сообщение не превращает ошибку в сигнал
    /// отписки.
    #[test]
    fn test_empty_failure_is_not_unsubscribe() {
        let err = HandlerError::failed("");
        assert!(!err.is_unsubscribe());
        assert_eq!(err.to_string(), HandlerError::Unsubscribe.to_string());
    }

    #[test]
    fn test_conversions() {
        let from_str: HandlerError = "boom".into();
        assert!(matches!(from_str, HandlerError::Failed(ref m) if m == "boom"));

        let from_string: HandlerError = String::from("bang").into();
        assert_eq!(from_string.to_string(), "bang");
    }

    #[test]
    fn test_other_uses_inner_display() {
        let err = HandlerError::other(io::Error::other("disk on fire"));
        assert_eq!(err.to_string(), "disk on fire");
        assert!(!err.is_unsubscribe());
    }

    #[test]
    fn test_publish_error_joins_failures() {
        let err = PublishError::new(vec!["e1".into(), "e2".into()]);
        assert_eq!(err.to_string(), "e1; e2");
        assert_eq!(err.failures(), ["e1", "e2"]);

        let single = PublishError::new(vec!["only".into()]);
        assert_eq!(single.to_string(), "only");
    }
}
