//! The pagination loop
//!
//! [`PaginatedFetcher`] turns a listing operation into a lazy stream. No
//! call is made until the stream is first polled, each call is awaited
//! before the next one is issued, and the stream ends after the first
//! error.

use super::types::{CancellationFlag, FetchOptions, FetchState, ListRequest, ListResponse, Page};
use crate::error::Result;
use crate::remote::ListOperation;
use futures::stream::{self, Stream, TryStreamExt};
use tracing::{debug, info, warn};

type ItemOf<O> = <<O as ListOperation>::Response as ListResponse>::Item;

/// Drives repeated calls to a listing operation, forwarding the
/// continuation token, until results are exhausted or the caller takes
/// manual control.
pub struct PaginatedFetcher<O: ListOperation> {
    operation: O,
    request: O::Request,
    options: FetchOptions,
    cancellation: Option<CancellationFlag>,
}

impl<O: ListOperation> PaginatedFetcher<O> {
    /// Create a fetcher for one invocation
    pub fn new(operation: O, request: O::Request, options: FetchOptions) -> Self {
        Self {
            operation,
            request,
            options,
            cancellation: None,
        }
    }

    /// Stop before the next call once `flag` is cancelled
    #[must_use]
    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = Some(flag);
        self
    }

    /// Options this fetcher was built with
    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Stream every fetched page
    pub fn pages(self) -> impl Stream<Item = Result<Page<O::Response>>> + Send {
        let cursor = Cursor {
            state: FetchState::new(&self.options),
            operation: self.operation,
            request: self.request,
            cancellation: self.cancellation,
        };

        stream::unfold(cursor, |mut cursor| async move {
            let page = cursor.next_page().await?;
            Some((page, cursor))
        })
    }

    /// Stream the items of every page, honouring the emission limit
    pub fn items(self) -> impl Stream<Item = Result<ItemOf<O>>> + Send {
        self.pages()
            .map_ok(|page| stream::iter(page.into_items().into_iter().map(Ok)))
            .try_flatten()
    }

    /// Stream a caller-defined projection of every response
    pub fn project<T, I, F>(self, mut projection: F) -> impl Stream<Item = Result<T>> + Send
    where
        F: FnMut(O::Response) -> I + Send,
        I: IntoIterator<Item = T>,
        I::IntoIter: Send,
        T: Send,
    {
        self.pages()
            .map_ok(move |page| stream::iter(projection(page.response).into_iter().map(Ok)))
            .try_flatten()
    }

    /// Drain all items, failing on the first error
    pub async fn collect_items(self) -> Result<Vec<ItemOf<O>>> {
        self.items().try_collect().await
    }
}

impl<O: ListOperation> std::fmt::Debug for PaginatedFetcher<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedFetcher")
            .field("operation", &self.operation.name())
            .field("options", &self.options)
            .field("cancellable", &self.cancellation.is_some())
            .finish_non_exhaustive()
    }
}

struct Cursor<O: ListOperation> {
    operation: O,
    request: O::Request,
    state: FetchState,
    cancellation: Option<CancellationFlag>,
}

impl<O: ListOperation> Cursor<O> {
    async fn next_page(&mut self) -> Option<Result<Page<O::Response>>> {
        if self.state.is_done() {
            return None;
        }

        let operation = self.operation.name().to_string();

        if self
            .cancellation
            .as_ref()
            .is_some_and(CancellationFlag::is_cancelled)
        {
            info!(
                operation = %operation,
                pages = self.state.pages_fetched(),
                "Pagination cancelled before next request"
            );
            self.state.finish();
            return None;
        }

        let sent_token = self.state.token().cloned();
        let mut request = self.request.clone();
        request.set_continuation_token(sent_token.clone());
        if let Some(size) = self.state.next_page_size() {
            request.set_page_size(size);
        }

        let index = self.state.pages_fetched();
        debug!(
            operation = %operation,
            page = index,
            has_token = sent_token.is_some(),
            "Requesting page"
        );

        match self.operation.list(&request).await {
            Ok(response) => {
                let next_token = response.next_token();
                let item_count = response.item_count();
                let emit_limit = self.state.record_page(next_token.clone(), item_count);
                let resume_token = self.state.token().cloned();

                if emit_limit < item_count && next_token.is_some() {
                    warn!(
                        operation = %operation,
                        page = index,
                        items = item_count,
                        emitted = emit_limit,
                        "Page exceeded the item limit; listing cannot be resumed exactly"
                    );
                }

                debug!(
                    operation = %operation,
                    page = index,
                    items = item_count,
                    more = next_token.is_some(),
                    "Received page"
                );

                if self.state.is_done() {
                    info!(
                        operation = %operation,
                        pages = self.state.pages_fetched(),
                        items = self.state.items_emitted(),
                        resumable = resume_token.is_some(),
                        "Pagination finished"
                    );
                }

                Some(Ok(Page::new(
                    index,
                    sent_token,
                    next_token,
                    resume_token,
                    response,
                    emit_limit,
                )))
            }
            Err(e) => {
                warn!(
                    operation = %operation,
                    page = index,
                    error = %e,
                    "Listing call failed"
                );
                self.state.finish();
                Some(Err(e))
            }
        }
    }
}
