//! The async function abstraction every enhancement wraps.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::Result;

// == Operation Trait ==
/// An async call from `A` to `Result<R>`.
///
/// Any `Fn(A) -> impl Future<Output = Result<R>>` closure is an operation, so
/// plain async closures can be enhanced directly.
pub trait Operation<A, R>: Send + Sync {
    fn call(&self, args: A) -> BoxFuture<'_, Result<R>>;
}

impl<F, Fut, A, R> Operation<A, R> for F
where
    F: Fn(A) -> Fut + Send + Sync,
    Fut: Future<Output = Result<R>> + Send + 'static,
{
    fn call(&self, args: A) -> BoxFuture<'_, Result<R>> {
        Box::pin(self(args))
    }
}

/// Type-erased operation shared between layers and handlers.
pub type SharedOperation<A, R> = Arc<dyn Operation<A, R>>;

/// Erases the concrete type of `op`.
pub fn shared<A, R, O>(op: O) -> SharedOperation<A, R>
where
    O: Operation<A, R> + 'static,
{
    Arc::new(op)
}
