//! Timeline Pagination
//!
//! Grows an append-only collection of life entries page by page under a
//! continuation cursor. One cursor allows one fetch in flight; a consumer
//! that goes away cancels its cursor, which only suppresses the eventual
//! response and never reaches back into the collection.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::collection::OrderedCollection;
use crate::domain::{DomainResult, Entity, LifeEntry};
use crate::repository::TimelineRepository;

/// What a `fetch_next_page` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Appended this many new entries (overlapping ids are dropped)
    Appended(usize),
    /// Another fetch for this cursor is already running
    InFlight,
    /// The timeline reported no further pages
    Exhausted,
    /// The cursor was cancelled while the request was out; the response
    /// was thrown away
    Discarded,
}

struct CursorState {
    next_cursor: Option<String>,
    has_next: bool,
    in_flight: bool,
    /// Bumped on cancel/reset so a late response can tell it is stale
    generation: u64,
}

/// Single-flight incremental loader for the life timeline
#[derive(Clone)]
pub struct TimelineCursor {
    entries: Arc<Mutex<OrderedCollection<LifeEntry>>>,
    remote: Arc<dyn TimelineRepository>,
    state: Arc<Mutex<CursorState>>,
    page_size: usize,
}

impl TimelineCursor {
    pub fn new(remote: Arc<dyn TimelineRepository>, page_size: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(OrderedCollection::new())),
            remote,
            state: Arc::new(Mutex::new(CursorState {
                next_cursor: None,
                has_next: true,
                in_flight: false,
                generation: 0,
            })),
            page_size,
        }
    }

    /// Load the next page, if any and if not already loading.
    pub async fn fetch_next_page(&self) -> DomainResult<FetchOutcome> {
        let (cursor, generation) = {
            let mut state = self.state.lock().await;
            if state.in_flight {
                return Ok(FetchOutcome::InFlight);
            }
            if !state.has_next {
                return Ok(FetchOutcome::Exhausted);
            }
            state.in_flight = true;
            (state.next_cursor.clone(), state.generation)
        };

        let result = self
            .remote
            .fetch_page(cursor.as_deref(), self.page_size)
            .await;

        let page = {
            let mut state = self.state.lock().await;
            if state.generation != generation {
                // cancel() already released the in-flight slot
                log::debug!("discarding timeline page for a cancelled cursor");
                return Ok(FetchOutcome::Discarded);
            }
            state.in_flight = false;
            let page = result?;
            state.has_next = page.next_cursor.is_some() && page.items.len() >= self.page_size;
            state.next_cursor = page.next_cursor.clone();
            page
        };

        let mut entries = self.entries.lock().await;
        let mut appended = 0;
        for item in page.items {
            if entries.index_of(item.id()).is_some() {
                // overlapping page or server retry; idempotent merge
                log::debug!("timeline already has entry {}, skipping", item.id());
                continue;
            }
            entries.insert(item)?;
            appended += 1;
        }
        Ok(FetchOutcome::Appended(appended))
    }

    pub async fn has_next_page(&self) -> bool {
        self.state.lock().await.has_next
    }

    /// Abandon an in-flight fetch. The response, if it ever arrives, is
    /// discarded instead of applied.
    pub async fn cancel(&self) {
        let mut state = self.state.lock().await;
        if state.in_flight {
            state.generation += 1;
            state.in_flight = false;
        }
    }

    /// Cancel and start over from the newest entry with an empty
    /// collection.
    pub async fn reset(&self) {
        {
            let mut state = self.state.lock().await;
            state.generation += 1;
            state.in_flight = false;
            state.next_cursor = None;
            state.has_next = true;
        }
        self.entries.lock().await.clear();
    }

    /// Shared handle to the underlying collection.
    pub fn entries(&self) -> Arc<Mutex<OrderedCollection<LifeEntry>>> {
        Arc::clone(&self.entries)
    }

    /// Owned copy of the loaded timeline, for rendering.
    pub async fn snapshot(&self) -> Vec<LifeEntry> {
        self.entries.lock().await.snapshot()
    }
}
