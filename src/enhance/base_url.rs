//! Base URL enhancement.

use futures::future::BoxFuture;

use super::{Operation, SharedOperation};
use crate::error::Result;

// == URL Arguments ==
/// Argument types whose first element is a request path.
pub trait UrlArgs {
    fn url_mut(&mut self) -> &mut String;
}

impl UrlArgs for String {
    fn url_mut(&mut self) -> &mut String {
        self
    }
}

impl<T> UrlArgs for (String, T) {
    fn url_mut(&mut self) -> &mut String {
        &mut self.0
    }
}

/// Joins `base` and `path` unless `path` already carries a scheme.
pub fn prefix_base_url(base: &str, path: &str) -> String {
    if path.starts_with("http") {
        path.to_string()
    } else {
        format!("{base}{path}")
    }
}

// == Base URL Layer ==
/// Rewrites the path argument to an absolute URL before calling through.
pub struct WithBaseUrl<A, R> {
    base_url: String,
    inner: SharedOperation<A, R>,
}

impl<A, R> WithBaseUrl<A, R> {
    pub fn new(base_url: impl Into<String>, inner: SharedOperation<A, R>) -> Self {
        Self {
            base_url: base_url.into(),
            inner,
        }
    }
}

impl<A, R> Operation<A, R> for WithBaseUrl<A, R>
where
    A: UrlArgs + Send + 'static,
    R: Send + 'static,
{
    fn call(&self, mut args: A) -> BoxFuture<'_, Result<R>> {
        let full = prefix_base_url(&self.base_url, args.url_mut());
        *args.url_mut() = full;
        self.inner.call(args)
    }
}
