//! Pagination module
//!
//! Continuation-token pagination with user-controlled override.
//!
//! # Overview
//!
//! A [`PaginatedFetcher`] repeatedly calls a [`ListOperation`](crate::remote::ListOperation),
//! assigning the token returned by call *k* to the request of call *k+1*,
//! until a page comes back without a token. With
//! [`FetchOptions::manual_control`] set, exactly one page is fetched and
//! the returned token is left to the caller.
//!
//! ```text
//!   FETCHING ──(token, not manual)──▶ FETCHING
//!      │
//!      └──(no token | manual | limit | cancel | error)──▶ DONE
//! ```

mod fetcher;
mod types;

pub use fetcher::PaginatedFetcher;
pub use types::{
    CancellationFlag, FetchOptions, FetchPhase, FetchState, ListRequest, ListResponse, Page,
};
