pub mod pubsub;

// Публичный экспорт всех типов ошибок из вложенных модулей, чтобы упростить
// доступ к ним из внешнего кода.
pub use pubsub::{HandlerError, HandlerResult, PublishError};
