//! Repository Layer - Core Traits
//!
//! Abstract interfaces to the remote persistence collaborator. The store
//! layer only ever sees these traits; the HTTP implementation and the
//! in-memory test doubles are interchangeable behind them.

use async_trait::async_trait;

use crate::domain::{CardList, DomainResult, LifeEntry, TaskCard};

use super::types::{
    CheckinRequest, EntryCreate, EntryUpdate, ListCreate, ListUpdate, ReorderRequest, TaskCreate,
    TaskUpdate, TimelinePage,
};

/// Remote operations on task cards
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Fetch all cards, optionally scoped to one list.
    async fn list(&self, list_id: Option<&str>, include_deleted: bool)
        -> DomainResult<Vec<TaskCard>>;

    async fn create(&self, req: &TaskCreate) -> DomainResult<TaskCard>;

    async fn update(&self, id: &str, req: &TaskUpdate) -> DomainResult<TaskCard>;

    /// Soft delete by default; `hard` removes the row entirely.
    async fn delete(&self, id: &str, hard: bool) -> DomainResult<()>;

    /// Record a habit check-in; the server recomputes streaks as well.
    async fn checkin(&self, id: &str, req: &CheckinRequest) -> DomainResult<TaskCard>;

    /// Persist a board order in one batch call.
    async fn reorder(&self, req: &ReorderRequest) -> DomainResult<()>;
}

/// Remote operations on card lists
#[async_trait]
pub trait ListRepository: Send + Sync {
    async fn list(&self) -> DomainResult<Vec<CardList>>;

    async fn create(&self, req: &ListCreate) -> DomainResult<CardList>;

    async fn update(&self, id: &str, req: &ListUpdate) -> DomainResult<CardList>;

    async fn delete(&self, id: &str) -> DomainResult<()>;
}

/// Remote operations on the life timeline
#[async_trait]
pub trait TimelineRepository: Send + Sync {
    /// Read one page; `cursor` of `None` starts from the newest entry.
    async fn fetch_page(&self, cursor: Option<&str>, page_size: usize)
        -> DomainResult<TimelinePage>;

    async fn create(&self, req: &EntryCreate) -> DomainResult<LifeEntry>;

    async fn update(&self, id: &str, req: &EntryUpdate) -> DomainResult<LifeEntry>;

    async fn delete(&self, id: &str, hard: bool) -> DomainResult<()>;
}
