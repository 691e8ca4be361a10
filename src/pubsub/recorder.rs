use std::sync::Arc;

use parking_lot::Mutex;

use super::Params;
use crate::{HandlerError, HandlerResult};

/// Что вернёт записывающий обработчик после записи вызова.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Успешная обработка.
    Ok,
    /// Сигнал отписки.
    Unsubscribe,
    /// Ошибка с указанным текстом.
    Fail(String),
}

impl Outcome {
    pub fn fail(msg: impl Into<String>) -> Self {
        Self::Fail(msg.into())
    }

    fn to_result(&self) -> HandlerResult {
        match self {
            Self::Ok => Ok(()),
            Self::Unsubscribe => Err(HandlerError::Unsubscribe),
            Self::Fail(msg) => Err(HandlerError::failed(msg.clone())),
        }
    }
}

/// Общий журнал вызовов для набора именованных обработчиков.
///
/// Каждый обработчик, созданный через [`CallRecorder::handler`], дописывает
/// в журнал строку `name` (без параметров) или `name: [p1 p2]`, после чего
/// возвращает заранее заданный [`Outcome`]. Удобно для демо и тестов, где
/// нужно видеть порядок доставки.
#[derive(Debug, Clone, Default)]
pub struct CallRecorder {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Создаёт именованный обработчик для `Broker<Params>`.
    ///
    /// Обработчик клонируемый: один и тот же экземпляр можно подписать
    /// несколько раз.
    pub fn handler(
        &self,
        name: impl Into<String>,
        outcome: Outcome,
    ) -> impl Fn(&Params) -> HandlerResult + Clone + Send + Sync + 'static {
        let calls = Arc::clone(&self.calls);
        let name: Arc<str> = Arc::from(name.into());

        move |params: &Params| {
            let entry = if params.is_empty() {
                name.to_string()
            } else {
                format!("{name}: {params}")
            };
            calls.lock().push(entry);
            outcome.to_result()
        }
    }

    /// Возвращает копию журнала вызовов.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Количество записанных вызовов.
    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    /// Очищает журнал.
    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}
