use std::{
    collections::HashSet,
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use super::{Params, Subscription, SubscriptionId};
use crate::{HandlerResult, PublishError};

/// Синхронный внутрипроцессный брокер Pub/Sub.
///
/// Хранит упорядоченный список подписок и доставляет каждую публикацию всем
/// подписчикам по очереди в порядке регистрации, прямо в потоке вызывающего.
///
/// Поддерживает:
/// - Конкурентные `publish` (обработчики вызываются под read-lock)
/// - Самоотписку через [`HandlerError::Unsubscribe`](crate::HandlerError)
/// - Удаление упавших подписчиков и агрегацию их ошибок
/// - Статистику публикаций и удалений
pub struct Broker<P: ?Sized = Params> {
    /// Подписки в порядке регистрации
    subscriptions: RwLock<Vec<Subscription<P>>>,
    /// Общее количество вызовов `publish`
    publish_count: AtomicU64,
    /// Количество вызовов обработчиков
    delivered_count: AtomicU64,
    /// Количество подписок, удалённых по сигналу отписки
    unsubscribed_count: AtomicU64,
    /// Количество подписок, удалённых из-за ошибки
    failed_count: AtomicU64,
}

/// Снимок счётчиков брокера.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrokerStats {
    pub publish_count: u64,
    pub delivered_count: u64,
    pub unsubscribed_count: u64,
    pub failed_count: u64,
}

impl<P: ?Sized> Broker<P> {
    /// Создаёт брокер без подписок.
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(Vec::new()),
            publish_count: AtomicU64::new(0),
            delivered_count: AtomicU64::new(0),
            unsubscribed_count: AtomicU64::new(0),
            failed_count: AtomicU64::new(0),
        }
    }

    /// Регистрирует обработчик и возвращает идентификатор новой подписки.
    ///
    /// Повторная регистрация того же обработчика (например, клона одного
    /// замыкания) создаёт независимую подписку со своим идентификатором.
    ///
    /// Обработчик не должен вызывать `subscribe` у брокера, который его
    /// вызывает: write-lock будет ждать read-lock того же потока.
    pub fn subscribe<F>(
        &self,
        handler: F,
    ) -> SubscriptionId
    where
        F: Fn(&P) -> HandlerResult + Send + Sync + 'static,
    {
        let sub = Subscription::new(Arc::new(handler));
        let id = sub.id;

        let total = {
            let mut subs = self.subscriptions.write();
            subs.push(sub);
            subs.len()
        };

        debug!(subscription_id = %id, total, "Subscription registered");
        id
    }

    /// Публикует `params` всем текущим подписчикам.
    ///
    /// Работает в два этапа:
    /// 1. Под read-lock вызывает каждый обработчик в порядке регистрации и
    ///    запоминает результат. Ошибка одного обработчика не прерывает
    ///    рассылку.
    /// 2. Без read-lock удаляет (одним write-lock) все подписки, вернувшие
    ///    ошибку, и собирает тексты ошибок, кроме сигнала отписки.
    ///
    /// Между этапами другой конкурентный `publish` может ещё раз вызвать
    /// подписку, которую этот раунд уже решил удалить.
    ///
    /// # Возвращает
    /// - `Ok(())`, если ни один обработчик не вернул ошибку (кроме отписки)
    /// - `Err(PublishError)` с текстами ошибок в порядке вызова
    pub fn publish(
        &self,
        params: &P,
    ) -> Result<(), PublishError> {
        self.publish_count.fetch_add(1, Ordering::Relaxed);

        // 1) вызов обработчиков под read-lock
        let outcomes: Vec<(SubscriptionId, HandlerResult)> = {
            let subs = self.subscriptions.read();
            if subs.is_empty() {
                trace!("Publish skipped: no subscriptions");
                return Ok(());
            }

            subs.iter().map(|sub| (sub.id, sub.call(params))).collect()
        };
        self.delivered_count
            .fetch_add(outcomes.len() as u64, Ordering::Relaxed);

        // 2) разбор результатов
        let mut to_remove = HashSet::new();
        let mut failures = Vec::new();
        for (id, outcome) in outcomes {
            let Err(err) = outcome else {
                continue;
            };

            to_remove.insert(id);
            if err.is_unsubscribe() {
                self.unsubscribed_count.fetch_add(1, Ordering::Relaxed);
                debug!(subscription_id = %id, "Subscriber unsubscribed itself");
            } else {
                self.failed_count.fetch_add(1, Ordering::Relaxed);
                warn!(subscription_id = %id, error = %err, "Subscriber failed and was dropped");
                failures.push(err.to_string());
            }
        }

        if !to_remove.is_empty() {
            self.remove_subscriptions(&to_remove);
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(PublishError::new(failures))
        }
    }

    /// Удаляет подписки с указанными идентификаторами.
    ///
    /// Порядок оставшихся подписок сохраняется, неизвестные идентификаторы
    /// игнорируются.
    pub(crate) fn remove_subscriptions(
        &self,
        ids: &HashSet<SubscriptionId>,
    ) {
        let mut subs = self.subscriptions.write();
        let before = subs.len();
        subs.retain(|sub| !ids.contains(&sub.id));

        debug!(
            requested = ids.len(),
            removed = before - subs.len(),
            remaining = subs.len(),
            "Subscriptions removed"
        );
    }

    /// Количество живых подписок.
    pub fn len(&self) -> usize {
        self.subscriptions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.read().is_empty()
    }

    /// Возвращает снимок счётчиков.
    pub fn stats(&self) -> BrokerStats {
        BrokerStats {
            publish_count: self.publish_count.load(Ordering::Relaxed),
            delivered_count: self.delivered_count.load(Ordering::Relaxed),
            unsubscribed_count: self.unsubscribed_count.load(Ordering::Relaxed),
            failed_count: self.failed_count.load(Ordering::Relaxed),
        }
    }
}

impl<P: ?Sized> Default for Broker<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ?Sized> fmt::Debug for Broker<P> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Broker")
            .field("subscriptions", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::HandlerError;

    type Calls = Arc<Mutex<Vec<&'static str>>>;

    /// Helper: обработчик, который пишет своё имя в `calls` и возвращает
    /// результат из `outcome`.
    fn named(
        calls: &Calls,
        name: &'static str,
        outcome: fn() -> HandlerResult,
    ) -> impl Fn(&()) -> HandlerResult + Clone + Send + Sync + 'static {
        let calls = calls.clone();
        move |_: &()| {
            calls.lock().unwrap().push(name);
            outcome()
        }
    }

    fn ok() -> HandlerResult {
        Ok(())
    }

    fn unsub() -> HandlerResult {
        Err(HandlerError::Unsubscribe)
    }

    /// Тест проверяет, что публикация без подписчиков ничего не вызывает
    /// и не является ошибкой.
    #[test]
    fn test_publish_without_subscribers() {
        let broker: Broker<()> = Broker::new();
        assert!(broker.publish(&()).is_ok());
        assert!(broker.is_empty());

        let stats = broker.stats();
        assert_eq!(stats.publish_count, 1);
        assert_eq!(stats.delivered_count, 0);
    }

    #[test]
    fn test_subscribe_returns_distinct_ids() {
        let broker: Broker<()> = Broker::new();
        let a = broker.subscribe(|_| Ok(()));
        let b = broker.subscribe(|_| Ok(()));
        assert_ne!(a, b);
        assert_eq!(broker.len(), 2);
    }

    /// Тест проверяет порядок вызовов и удаление подписчика, вернувшего
    /// сигнал отписки.
    #[test]
    fn test_unsubscribe_sentinel_removes_silently() {
        let calls = Calls::default();
        let broker: Broker<()> = Broker::new();
        broker.subscribe(named(&calls, "A", ok));
        broker.subscribe(named(&calls, "B", unsub));
        broker.subscribe(named(&calls, "C", ok));

        assert!(broker.publish(&()).is_ok());
        assert_eq!(*calls.lock().unwrap(), ["A", "B", "C"]);
        assert_eq!(broker.len(), 2);

        assert!(broker.publish(&()).is_ok());
        assert_eq!(*calls.lock().unwrap(), ["A", "B", "C", "A", "C"]);

        let stats = broker.stats();
        assert_eq!(stats.unsubscribed_count, 1);
        assert_eq!(stats.failed_count, 0);
        assert_eq!(stats.delivered_count, 5);
    }

    #[test]
    fn test_errors_are_aggregated_and_subscribers_dropped() {
        let calls = Calls::default();
        let broker: Broker<()> = Broker::new();
        broker.subscribe(named(&calls, "A", || Err("e1".into())));
        broker.subscribe(named(&calls, "B", ok));
        broker.subscribe(named(&calls, "C", || Err("e2".into())));

        let err = broker.publish(&()).unwrap_err();
        assert_eq!(err.to_string(), "e1; e2");
        assert_eq!(err.failures(), ["e1", "e2"]);

        assert!(broker.publish(&()).is_ok());
        assert_eq!(*calls.lock().unwrap(), ["A", "B", "C", "B"]);
        assert_eq!(broker.stats().failed_count, 2);
    }

    /// Тест проверяет, что удаление несуществующих идентификаторов ничего
    /// не ломает, а порядок оставшихся подписок сохраняется.
    #[test]
    fn test_remove_subscriptions_is_idempotent_and_keeps_order() {
        let calls = Calls::default();
        let broker: Broker<()> = Broker::new();
        let a = broker.subscribe(named(&calls, "A", ok));
        let b = broker.subscribe(named(&calls, "B", ok));
        broker.subscribe(named(&calls, "C", ok));

        let ids: HashSet<_> = [b, SubscriptionId::generate()].into_iter().collect();
        broker.remove_subscriptions(&ids);
        broker.remove_subscriptions(&ids);
        assert_eq!(broker.len(), 2);

        broker.remove_subscriptions(&HashSet::new());
        broker.publish(&()).unwrap();
        assert_eq!(*calls.lock().unwrap(), ["A", "C"]);

        broker.remove_subscriptions(&[a].into_iter().collect());
        assert_eq!(broker.len(), 1);
    }

    /// Тест проверяет, что один и тот же параметр передаётся всем
    /// обработчикам без копирования.
    #[test]
    fn test_params_are_shared_by_reference() {
        let seen: Arc<Mutex<Vec<usize>>> = Arc::default();
        let broker: Broker<str> = Broker::new();
        for _ in 0..3 {
            let seen = seen.clone();
            broker.subscribe(move |s: &str| {
                seen.lock().unwrap().push(s.as_ptr() as usize);
                Ok(())
            });
        }

        let payload = String::from("shared");
        broker.publish(payload.as_str()).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|p| *p == payload.as_ptr() as usize));
    }
}
