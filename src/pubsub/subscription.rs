use std::{fmt, sync::Arc};

use uuid::Uuid;

use crate::HandlerResult;

/// Тип-стёртый обработчик подписки.
pub type HandlerFn<P> = Arc<dyn Fn(&P) -> HandlerResult + Send + Sync>;

/// Уникальный идентификатор подписки.
///
/// Генерируется при регистрации (UUID v4) и никогда не переиспользуется:
/// повторная подписка того же обработчика получает новый идентификатор.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Зарегистрированный обработчик вместе с его идентификатором.
///
/// Принадлежит брокеру целиком и наружу не выдаётся.
pub(crate) struct Subscription<P: ?Sized> {
    pub(crate) id: SubscriptionId,
    handler: HandlerFn<P>,
}

impl<P: ?Sized> Subscription<P> {
    pub(crate) fn new(handler: HandlerFn<P>) -> Self {
        Self {
            id: SubscriptionId::generate(),
            handler,
        }
    }

    #[inline]
    pub(crate) fn call(
        &self,
        params: &P,
    ) -> HandlerResult {
        (self.handler)(params)
    }
}

impl<P: ?Sized> fmt::Debug for Subscription<P> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
