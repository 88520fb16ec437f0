//! Store Layer
//!
//! Headless client state: the collections, the optimistic mutation queue,
//! the timeline cursor, and the toast surface, wired to the repository
//! traits. Rendering collaborators read snapshots; every mutation flows
//! through here.

pub mod mutation;
pub mod pagination;
pub mod toast;
pub mod view;


pub use mutation::{MutationQueue, TaskMutation};
pub use pagination::{FetchOutcome, TimelineCursor};
pub use toast::{Toast, ToastKind, ToastService};
pub use view::{
    empty_state_preset, EmptyStateKind, EmptyStatePreset, FallbackAction, LoadState,
    FALLBACK_ACTIONS,
};

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::collection::OrderedCollection;
use crate::domain::{
    selection, CardList, DomainError, DomainResult, LifeEntry, TaskCard, DEFAULT_COLOR,
};
use crate::repository::{
    ApiConfig, EntryCreate, EntryUpdate, HttpRepository, ListCreate, ListRepository, ListUpdate,
    TaskCreate, TaskRepository, TimelineRepository,
};

use chrono::{DateTime, Utc};

/// Client-side application state
///
/// One instance per running client. All shared handles are
/// `Arc<tokio::sync::Mutex<...>>`; local transitions run to completion
/// without interleaving, suspension happens only at persistence calls.
pub struct ClientStore {
    tasks: Arc<Mutex<OrderedCollection<TaskCard>>>,
    lists: Arc<Mutex<OrderedCollection<CardList>>>,
    mutations: MutationQueue,
    timeline: TimelineCursor,
    toasts: ToastService,
    task_remote: Arc<dyn TaskRepository>,
    list_remote: Arc<dyn ListRepository>,
    entry_remote: Arc<dyn TimelineRepository>,
}

impl ClientStore {
    pub fn new(
        task_remote: Arc<dyn TaskRepository>,
        list_remote: Arc<dyn ListRepository>,
        entry_remote: Arc<dyn TimelineRepository>,
        config: &ApiConfig,
    ) -> Self {
        let tasks = Arc::new(Mutex::new(OrderedCollection::new()));
        let lists = Arc::new(Mutex::new(OrderedCollection::new()));
        let toasts = ToastService::new(Duration::from_millis(config.toast_duration_ms));
        let mutations = MutationQueue::new(
            Arc::clone(&tasks),
            Arc::clone(&lists),
            Arc::clone(&task_remote),
            toasts.clone(),
        );
        let timeline = TimelineCursor::new(Arc::clone(&entry_remote), config.page_size);
        Self {
            tasks,
            lists,
            mutations,
            timeline,
            toasts,
            task_remote,
            list_remote,
            entry_remote,
        }
    }

    /// Store talking to the real backend over HTTP.
    pub fn with_http(config: &ApiConfig) -> Self {
        let remote = Arc::new(HttpRepository::new(config));
        Self::new(
            Arc::clone(&remote) as Arc<dyn TaskRepository>,
            Arc::clone(&remote) as Arc<dyn ListRepository>,
            remote as Arc<dyn TimelineRepository>,
            config,
        )
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Replace the task board with a fresh fetch. Returns the card count.
    pub async fn load_tasks(&self, list_filter: Option<&str>) -> DomainResult<usize> {
        let cards = self.task_remote.list(list_filter, false).await?;
        let collection = OrderedCollection::with_items(cards)?;
        let count = collection.len();
        *self.tasks.lock().await = collection;
        Ok(count)
    }

    /// Replace the list collection with a fresh fetch, then re-check any
    /// stale category references against it.
    pub async fn load_lists(&self) -> DomainResult<usize> {
        let lists = self.list_remote.list().await?;
        let collection = OrderedCollection::with_items(lists)?;
        let count = collection.len();
        *self.lists.lock().await = collection;
        let still_stale = self.mutations.reconcile_stale().await;
        if !still_stale.is_empty() {
            log::warn!("{} task(s) still reference unknown lists", still_stale.len());
        }
        Ok(count)
    }

    // ------------------------------------------------------------------
    // Creation. Ids are server-assigned, so a new entity appears locally
    // once the remote accepts it.
    // ------------------------------------------------------------------

    pub async fn create_task(
        &self,
        title: &str,
        content: &str,
        list_id: Option<String>,
        is_habit: bool,
        reminder_time: Option<DateTime<Utc>>,
    ) -> DomainResult<TaskCard> {
        let req = TaskCreate {
            title: TaskCard::validate_title(title)?,
            content: content.to_string(),
            list_id,
            is_habit,
            reminder_time,
        };
        let card = match self.task_remote.create(&req).await {
            Ok(card) => card,
            Err(error) => {
                self.toasts
                    .show(format!("Couldn't create task: {}", error), ToastKind::Error)
                    .await;
                return Err(error);
            }
        };
        self.tasks.lock().await.insert(card.clone())?;
        Ok(card)
    }

    pub async fn create_list(&self, name: &str, color: Option<&str>) -> DomainResult<CardList> {
        let name = CardList::validate_name(name)?;
        let color = color.unwrap_or(DEFAULT_COLOR);
        CardList::validate_color(color)?;
        let sort_order = self.lists.lock().await.len() as u32;
        let req = ListCreate {
            name,
            color: color.to_string(),
            sort_order,
        };
        let list = match self.list_remote.create(&req).await {
            Ok(list) => list,
            Err(error) => {
                self.toasts
                    .show(format!("Couldn't create list: {}", error), ToastKind::Error)
                    .await;
                return Err(error);
            }
        };
        self.lists.lock().await.insert(list.clone())?;
        Ok(list)
    }

    pub async fn create_entry(&self, content: &str) -> DomainResult<LifeEntry> {
        let req = EntryCreate {
            content: LifeEntry::validate_content(content)?,
        };
        let entry = match self.entry_remote.create(&req).await {
            Ok(entry) => entry,
            Err(error) => {
                self.toasts
                    .show(format!("Couldn't save entry: {}", error), ToastKind::Error)
                    .await;
                return Err(error);
            }
        };
        // newest first
        let entries = self.timeline.entries();
        entries.lock().await.insert_at(entry.clone(), 0)?;
        Ok(entry)
    }

    // ------------------------------------------------------------------
    // List management
    // ------------------------------------------------------------------

    pub async fn rename_list(&self, list_id: &str, name: &str) -> DomainResult<CardList> {
        let name = CardList::validate_name(name)?;
        let req = ListUpdate {
            name: Some(name),
            ..Default::default()
        };
        let updated = self.list_remote.update(list_id, &req).await?;
        self.lists.lock().await.replace(updated.clone());
        Ok(updated)
    }

    /// Reorder the lists and persist each one's new `sort_order`.
    pub async fn move_list(&self, from: usize, to: usize) -> DomainResult<()> {
        let (before, order) = {
            let mut lists = self.lists.lock().await;
            let before = lists.ids();
            lists.move_to(from, to)?;
            (before, lists.ids())
        };

        for (position, id) in order.iter().enumerate() {
            let req = ListUpdate {
                sort_order: Some(position as u32),
                ..Default::default()
            };
            if let Err(error) = self.list_remote.update(id, &req).await {
                self.lists.lock().await.restore_order(&before);
                self.toasts
                    .show(format!("Couldn't save list order: {}", error), ToastKind::Error)
                    .await;
                return Err(error);
            }
        }

        let mut lists = self.lists.lock().await;
        for (position, id) in order.iter().enumerate() {
            if let Some(list) = lists.get_by_id(id) {
                let mut updated = list.clone();
                updated.sort_order = position as u32;
                lists.replace(updated);
            }
        }
        Ok(())
    }

    /// Delete a list. Cards that referenced it keep their now-stale
    /// reference; the next mutation on such a card flags it for
    /// reconciliation.
    pub async fn delete_list(&self, list_id: &str) -> DomainResult<()> {
        self.list_remote.delete(list_id).await?;
        self.lists.lock().await.remove_by_id(&list_id.to_string());
        Ok(())
    }

    // ------------------------------------------------------------------
    // Category selection boundary
    // ------------------------------------------------------------------

    /// The selection-control value for a card's list, `""` when
    /// uncategorized.
    pub async fn list_selection(&self, task_id: &str) -> DomainResult<String> {
        let tasks = self.tasks.lock().await;
        let card = tasks
            .get_by_id(&task_id.to_string())
            .ok_or_else(|| DomainError::NotFound(format!("Task '{}' not found", task_id)))?;
        Ok(selection::to_selection(card.list_id.as_deref()))
    }

    /// Apply a selection-control value to a card as an optimistic
    /// mutation.
    pub async fn select_list(&self, task_id: &str, value: &str) -> DomainResult<()> {
        self.mutations
            .apply(task_id, TaskMutation::SetList(selection::from_selection(value)))
            .await
    }

    // ------------------------------------------------------------------
    // Timeline entry management
    // ------------------------------------------------------------------

    pub async fn update_entry(&self, entry_id: &str, content: &str) -> DomainResult<LifeEntry> {
        let req = EntryUpdate {
            content: Some(LifeEntry::validate_content(content)?),
        };
        let updated = self.entry_remote.update(entry_id, &req).await?;
        let entries = self.timeline.entries();
        entries.lock().await.replace(updated.clone());
        Ok(updated)
    }

    /// Delete an entry remotely, then drop it from the loaded timeline.
    pub async fn delete_entry(&self, entry_id: &str, hard: bool) -> DomainResult<()> {
        self.entry_remote.delete(entry_id, hard).await?;
        let entries = self.timeline.entries();
        entries.lock().await.remove_by_id(&entry_id.to_string());
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn mutations(&self) -> &MutationQueue {
        &self.mutations
    }

    pub fn timeline(&self) -> &TimelineCursor {
        &self.timeline
    }

    pub fn toasts(&self) -> &ToastService {
        &self.toasts
    }

    /// Owned copy of the task board for rendering collaborators.
    pub async fn task_snapshot(&self) -> Vec<TaskCard> {
        self.tasks.lock().await.snapshot()
    }

    pub async fn list_snapshot(&self) -> Vec<CardList> {
        self.lists.lock().await.snapshot()
    }

    /// Shared handle to the task collection (store-internal consumers).
    pub fn tasks(&self) -> Arc<Mutex<OrderedCollection<TaskCard>>> {
        Arc::clone(&self.tasks)
    }

    pub fn lists(&self) -> Arc<Mutex<OrderedCollection<CardList>>> {
        Arc::clone(&self.lists)
    }
}
