//! Pagination types and traits
//!
//! Defines the request/response abstractions the fetcher drives, the
//! per-call options, and the transient state of one fetch.

use crate::types::ContinuationToken;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A listing request owned by the caller.
///
/// The fetcher clones the request for every call and assigns the current
/// continuation token before sending it.
pub trait ListRequest: Clone + Send + Sync {
    /// Set (or clear) the continuation token sent with the next call
    fn set_continuation_token(&mut self, token: Option<ContinuationToken>);

    /// Cap the number of results the service returns for one call.
    ///
    /// Requests for services without a page size parameter keep the
    /// default no-op.
    fn set_page_size(&mut self, _size: u32) {}
}

/// A single page returned by a listing operation
pub trait ListResponse: Send {
    /// Item type emitted for each result on the page
    type Item: Send;

    /// Token for the next page, `None` when the listing is exhausted
    fn next_token(&self) -> Option<ContinuationToken>;

    /// Number of items on this page
    fn item_count(&self) -> usize;

    /// Consume the page into its items
    fn into_items(self) -> Vec<Self::Item>;
}

/// Options for one fetch invocation.
///
/// Built once per call and never mutated by the fetcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Token to resume from; `None` starts from the beginning
    pub starting_token: Option<ContinuationToken>,
    /// Fetch exactly one page and leave further paging to the caller
    pub manual_control: bool,
    /// Stop after this many items have been emitted
    pub max_items: Option<usize>,
    /// Maximum results requested per call
    pub page_size: Option<u32>,
}

impl FetchOptions {
    /// Create options that page through everything from the start
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a previously returned token (empty means "from the start")
    #[must_use]
    pub fn starting_token(mut self, token: impl Into<String>) -> Self {
        self.starting_token = ContinuationToken::new(token);
        self
    }

    /// Enable or disable manual (single page) control
    #[must_use]
    pub fn manual_control(mut self, manual: bool) -> Self {
        self.manual_control = manual;
        self
    }

    /// Limit the total number of emitted items
    #[must_use]
    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    /// Set the per-call page size
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }
}

/// Phase of a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// More calls may be issued
    Fetching,
    /// Terminal; no further calls
    Done,
}

/// Transient state of one fetch invocation
#[derive(Debug, Clone)]
pub struct FetchState {
    token: Option<ContinuationToken>,
    manual_control: bool,
    max_items: Option<usize>,
    page_size: Option<u32>,
    pages_fetched: u32,
    items_emitted: usize,
    phase: FetchPhase,
}

impl FetchState {
    /// Initial state for the given options
    pub fn new(options: &FetchOptions) -> Self {
        let phase = if options.max_items == Some(0) {
            FetchPhase::Done
        } else {
            FetchPhase::Fetching
        };

        Self {
            token: options.starting_token.clone(),
            manual_control: options.manual_control,
            max_items: options.max_items,
            page_size: options.page_size,
            pages_fetched: 0,
            items_emitted: 0,
            phase,
        }
    }

    /// Token sent with the next call, or the resume point once done
    pub fn token(&self) -> Option<&ContinuationToken> {
        self.token.as_ref()
    }

    /// Current phase
    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    /// Whether the fetch reached its terminal phase
    pub fn is_done(&self) -> bool {
        self.phase == FetchPhase::Done
    }

    /// Pages successfully fetched so far
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Items emitted so far (never above `max_items`)
    pub fn items_emitted(&self) -> usize {
        self.items_emitted
    }

    /// Items still allowed by the emission limit
    pub fn remaining(&self) -> Option<usize> {
        self.max_items
            .map(|max| max.saturating_sub(self.items_emitted))
    }

    /// Page size to request on the next call.
    ///
    /// With an emission limit the page size never exceeds the remaining
    /// count, so the returned token resumes right after the last emitted
    /// item.
    pub fn next_page_size(&self) -> Option<u32> {
        match (self.page_size, self.remaining()) {
            (Some(size), Some(remaining)) => Some(size.min(clamp_u32(remaining))),
            (None, Some(remaining)) => Some(clamp_u32(remaining)),
            (size, None) => size,
        }
    }

    /// Record a fetched page and advance the state machine.
    ///
    /// Returns how many of the page's items may be emitted. When the page
    /// had to be cut short the returned token would skip the dropped
    /// items, so no resume point is kept.
    pub fn record_page(&mut self, next: Option<ContinuationToken>, item_count: usize) -> usize {
        let emit = self
            .remaining()
            .map_or(item_count, |remaining| item_count.min(remaining));

        self.pages_fetched += 1;
        self.items_emitted += emit;
        self.token = if emit < item_count { None } else { next };

        let limit_reached = self.remaining() == Some(0);
        if self.manual_control || self.token.is_none() || limit_reached {
            self.phase = FetchPhase::Done;
        }

        emit
    }

    /// Move to the terminal phase without touching the token
    pub fn finish(&mut self) {
        self.phase = FetchPhase::Done;
    }
}

fn clamp_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// One fetched page
#[derive(Debug, Clone)]
pub struct Page<R> {
    /// Zero-based page index within this fetch
    pub index: u32,
    /// Token that was sent to obtain this page
    pub sent_token: Option<ContinuationToken>,
    /// Token returned with this page
    pub next_token: Option<ContinuationToken>,
    /// Token that continues right after the last emitted item; `None`
    /// when the listing is exhausted or the page was truncated
    pub resume_token: Option<ContinuationToken>,
    /// The raw response
    pub response: R,
    emit_limit: usize,
}

impl<R> Page<R> {
    pub(crate) fn new(
        index: u32,
        sent_token: Option<ContinuationToken>,
        next_token: Option<ContinuationToken>,
        resume_token: Option<ContinuationToken>,
        response: R,
        emit_limit: usize,
    ) -> Self {
        Self {
            index,
            sent_token,
            next_token,
            resume_token,
            response,
            emit_limit,
        }
    }

    /// Number of items from this page that fall within the emission limit
    pub fn emit_limit(&self) -> usize {
        self.emit_limit
    }
}

impl<R: ListResponse> Page<R> {
    /// Items of this page, truncated to the emission limit
    pub fn into_items(self) -> Vec<R::Item> {
        let mut items = self.response.into_items();
        items.truncate(self.emit_limit);
        items
    }
}

/// Advisory cancellation shared between a fetch and its caller.
///
/// Checked before each remote call; a call already in flight runs to
/// completion.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    /// Create an unset flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
