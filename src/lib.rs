//! # fanout
//!
//! In-process synchronous publish/subscribe. A [`Broker`] keeps an ordered list
//! of handlers and [`Broker::publish`] calls each of them on the caller's
//! thread. Handlers that return an error are dropped after the round, and
//! their messages come back as one [`PublishError`]. A handler leaves quietly
//! by returning [`HandlerError::Unsubscribe`].
//!
//! ```
//! use fanout::{params, Broker, HandlerError};
//!
//! let broker: Broker = Broker::new();
//! broker.subscribe(|_| Ok(()));
//! broker.subscribe(|_| Err(HandlerError::Unsubscribe));
//! broker.subscribe(|p| Err(HandlerError::failed(format!("cannot handle {p}"))));
//!
//! let err = broker.publish(&params!["x"]).unwrap_err();
//! assert_eq!(err.to_string(), "cannot handle [x]");
//! assert_eq!(broker.len(), 1);
//! ```

/// Ports used by consumers of the broker.
pub mod application;
/// Demo publisher configuration.
pub mod config;
/// Handler and publish errors.
pub mod error;
/// Logging initialisation (tracing).
pub mod logging;
/// Pub/Sub: Broker, Subscription, Params.
pub mod pubsub;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Broker port.
pub use application::PubSubPort;
/// Config
pub use crate::config::Settings;
/// Errors and handler result type.
pub use error::{HandlerError, HandlerResult, PublishError};
/// Logging.
pub use logging::{init_logging, LoggingConfig};
/// Pub/Sub API.
pub use pubsub::{
    Broker, BrokerStats, CallRecorder, HandlerFn, Outcome, Param, Params, SubscriptionId,
};
