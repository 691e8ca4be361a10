use std::sync::Arc;

use crate::{Broker, HandlerResult, PublishError, SubscriptionId};

/// Порт pub/sub, через который с брокером работают потребители.
pub trait PubSubPort<P: ?Sized> {
    fn subscribe<F>(
        &self,
        handler: F,
    ) -> SubscriptionId
    where
        F: Fn(&P) -> HandlerResult + Send + Sync + 'static;

    fn publish(
        &self,
        params: &P,
    ) -> Result<(), PublishError>;
}

impl<P: ?Sized> PubSubPort<P> for Broker<P> {
    fn subscribe<F>(
        &self,
        handler: F,
    ) -> SubscriptionId
    where
        F: Fn(&P) -> HandlerResult + Send + Sync + 'static,
    {
        Broker::subscribe(self, handler)
    }

    fn publish(
        &self,
        params: &P,
    ) -> Result<(), PublishError> {
        Broker::publish(self, params)
    }
}

impl<P: ?Sized, T: PubSubPort<P> + ?Sized> PubSubPort<P> for Arc<T> {
    fn subscribe<F>(
        &self,
        handler: F,
    ) -> SubscriptionId
    where
        F: Fn(&P) -> HandlerResult + Send + Sync + 'static,
    {
        (**self).subscribe(handler)
    }

    fn publish(
        &self,
        params: &P,
    ) -> Result<(), PublishError> {
        (**self).publish(params)
    }
}
