//! Подсистема Publish–Subscribe (pub/sub).
//!
//! Этот модуль реализует синхронный внутрипроцессный pub/sub:
//!
//! - `broker`: реестр подписок, доставка публикаций, удаление подписчиков и
//!   агрегация ошибок.
//! - `params`: непрозрачный типизированный список параметров публикации.
//! - `recorder`: именованные обработчики с общим журналом вызовов.
//! - `subscription` (приватный): идентификатор подписки и сам обработчик.
//!
//! Публичный API переэкспортирует:
//! - `broker::{Broker, BrokerStats}`
//! - `params::{Param, Params}`
//! - `recorder::{CallRecorder, Outcome}`
//! - `subscription::{HandlerFn, SubscriptionId}`

pub mod broker;
pub mod params;
pub mod recorder;
mod subscription;

pub use broker::{Broker, BrokerStats};
pub use params::{Param, Params};
pub use recorder::{CallRecorder, Outcome};
pub(crate) use subscription::Subscription;
pub use subscription::{HandlerFn, SubscriptionId};
