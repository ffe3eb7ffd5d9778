//! Remote listing operations
//!
//! The fetcher treats the service client as a black box behind
//! [`ListOperation`]. This module provides the trait, an adapter for plain
//! async closures, and a generic JSON-over-HTTP implementation.

mod function;
mod json;

pub use function::{from_fn, FnOperation};
pub use json::{lookup_path, JsonListOperation, JsonListRequest, JsonListResponse};

use crate::error::Result;
use crate::pagination::{ListRequest, ListResponse};
use async_trait::async_trait;
use std::sync::Arc;

/// A remote call that returns one page of a listing
#[async_trait]
pub trait ListOperation: Send + Sync {
    /// Request type, carrying filters and the continuation token
    type Request: ListRequest;
    /// Response type, carrying items and the next token
    type Response: ListResponse;

    /// Operation name used in logs and errors
    fn name(&self) -> &str;

    /// Perform one call
    async fn list(&self, request: &Self::Request) -> Result<Self::Response>;
}

#[async_trait]
impl<T: ListOperation + ?Sized> ListOperation for &T {
    type Request = T::Request;
    type Response = T::Response;

    fn name(&self) -> &str {
        (**self).name()
    }

    async fn list(&self, request: &Self::Request) -> Result<Self::Response> {
        (**self).list(request).await
    }
}

#[async_trait]
impl<T: ListOperation + ?Sized> ListOperation for Arc<T> {
    type Request = T::Request;
    type Response = T::Response;

    fn name(&self) -> &str {
        (**self).name()
    }

    async fn list(&self, request: &Self::Request) -> Result<Self::Response> {
        (**self).list(request).await
    }
}

#[cfg(test)]
mod tests;
