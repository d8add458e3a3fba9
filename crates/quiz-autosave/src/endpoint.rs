//! Seams between the saver and the outside world.

use std::future::Future;

use crate::error::{SaveError, SaveFailure};

/// Remote endpoint that accepts a value.
///
/// The returned future must resolve eventually. The saver enforces no
/// timeout of its own; a transport timeout should surface as an `Err`.
pub trait SaveEndpoint<T>: Send + Sync + 'static {
    /// Send `value` to the server.
    fn save(&self, value: &T) -> impl Future<Output = Result<(), SaveError>> + Send;
}

/// Receives save failures.
///
/// Called once per failed request, on the saver's task. Implementations
/// should return quickly.
pub trait FailureHandler: Send + 'static {
    /// Report a failure. `failure.explicit()` tells whether a finalize
    /// caller is waiting on it.
    fn on_failure(&self, failure: &SaveFailure);
}

impl<F> FailureHandler for F
where
    F: Fn(&SaveFailure) + Send + 'static,
{
    fn on_failure(&self, failure: &SaveFailure) {
        self(failure);
    }
}
