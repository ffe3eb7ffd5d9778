//! Closure-backed listing operations

use super::ListOperation;
use crate::error::Result;
use crate::pagination::{ListRequest, ListResponse};
use async_trait::async_trait;
use std::future::Future;
use std::marker::PhantomData;

/// A [`ListOperation`] backed by an async closure.
///
/// The closure receives an owned copy of the request with the
/// continuation token already assigned.
pub struct FnOperation<F, Req, Resp> {
    name: String,
    call: F,
    _marker: PhantomData<fn(Req) -> Resp>,
}

/// Wrap an async closure as a named listing operation
pub fn from_fn<F, Fut, Req, Resp>(name: impl Into<String>, call: F) -> FnOperation<F, Req, Resp>
where
    F: Fn(Req) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Resp>> + Send,
    Req: ListRequest,
    Resp: ListResponse,
{
    FnOperation {
        name: name.into(),
        call,
        _marker: PhantomData,
    }
}

#[async_trait]
impl<F, Fut, Req, Resp> ListOperation for FnOperation<F, Req, Resp>
where
    F: Fn(Req) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Resp>> + Send,
    Req: ListRequest,
    Resp: ListResponse,
{
    type Request = Req;
    type Response = Resp;

    fn name(&self) -> &str {
        &self.name
    }

    async fn list(&self, request: &Req) -> Result<Resp> {
        (self.call)(request.clone()).await
    }
}

impl<F, Req, Resp> std::fmt::Debug for FnOperation<F, Req, Resp> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnOperation")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
