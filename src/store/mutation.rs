//! Optimistic Mutation Queue
//!
//! Applies a user edit to the local collection immediately, then persists
//! it in the background. Mutations for the same card are dispatched one at
//! a time so a stale response can never clobber a later edit; cards are
//! independent of each other. A rejected dispatch rolls the card back to
//! its last confirmed state and raises an error toast.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::collection::OrderedCollection;
use crate::domain::{habit, CardList, DomainError, DomainResult, TaskCard, TaskPatch};
use crate::repository::{CheckinRequest, ReorderRequest, TaskRepository, TaskUpdate};

use super::toast::{ToastKind, ToastService};

/// A user-initiated change to one task card
#[derive(Debug, Clone, PartialEq)]
pub enum TaskMutation {
    /// Drag the card at `from` so it lands at `to`
    Move { from: usize, to: usize },
    /// File the card under a list, or `None` for uncategorized
    SetList(Option<String>),
    /// Edit card fields
    Patch(TaskPatch),
    /// Daily habit check-in
    Checkin { tz_offset_minutes: i32 },
    /// Soft-delete the card
    SoftDelete,
}

/// Wire form of a mutation, fixed at apply time so later local edits
/// cannot leak into an earlier dispatch.
#[derive(Debug, Clone)]
enum Payload {
    Reorder(ReorderRequest),
    Update(TaskUpdate),
    Checkin(CheckinRequest),
    Delete { hard: bool },
}

/// How to take a mutation back out of the local collection.
///
/// Applying an undo is total; rollback must never be able to fail.
#[derive(Debug, Clone)]
enum Undo {
    /// Put this exact card state back in place
    Restore(TaskCard),
    /// Rearrange the board to this id order
    RestoreOrder(Vec<String>),
}

#[derive(Debug, Clone)]
struct Dispatch {
    payload: Payload,
    undo: Undo,
    /// Success toast, e.g. a streak milestone
    announce: Option<String>,
}

#[derive(Default)]
struct QueueInner {
    /// Card ids with a dispatch currently on the wire
    in_flight: HashSet<String>,
    /// Applied-but-not-yet-dispatched mutations per card
    pending: HashMap<String, VecDeque<Dispatch>>,
    /// Cards whose list reference didn't resolve when it was set
    stale: HashSet<String>,
}

/// Optimistic writer for the task board
#[derive(Clone)]
pub struct MutationQueue {
    tasks: Arc<Mutex<OrderedCollection<TaskCard>>>,
    lists: Arc<Mutex<OrderedCollection<CardList>>>,
    remote: Arc<dyn TaskRepository>,
    toasts: ToastService,
    inner: Arc<Mutex<QueueInner>>,
}

impl MutationQueue {
    pub fn new(
        tasks: Arc<Mutex<OrderedCollection<TaskCard>>>,
        lists: Arc<Mutex<OrderedCollection<CardList>>>,
        remote: Arc<dyn TaskRepository>,
        toasts: ToastService,
    ) -> Self {
        Self {
            tasks,
            lists,
            remote,
            toasts,
            inner: Arc::new(Mutex::new(QueueInner::default())),
        }
    }

    /// Apply a mutation locally and queue its persistence.
    ///
    /// Structural problems (bad index, unknown card, invalid field) are
    /// returned here and change nothing. Once this returns `Ok`, readers
    /// see the new state; confirmation or rollback follows as a separate
    /// event.
    pub async fn apply(&self, task_id: &str, mutation: TaskMutation) -> DomainResult<()> {
        let now = Utc::now();

        // Phase 1: validate and mutate the collection.
        let (dispatch, stale_candidate) = {
            let mut tasks = self.tasks.lock().await;
            match mutation {
                TaskMutation::Move { from, to } => {
                    if let Some(card) = tasks.get(from) {
                        if card.id != task_id {
                            return Err(DomainError::InvalidInput(format!(
                                "Card at index {} is '{}', not '{}'",
                                from, card.id, task_id
                            )));
                        }
                    }
                    let before = tasks.ids();
                    tasks.move_to(from, to)?;
                    let dispatch = Dispatch {
                        payload: Payload::Reorder(ReorderRequest {
                            ordered_ids: tasks.ids(),
                        }),
                        undo: Undo::RestoreOrder(before),
                        announce: None,
                    };
                    (dispatch, None)
                }
                TaskMutation::SetList(list_id) => {
                    let snapshot = self.require(&tasks, task_id)?.clone();
                    let mut updated = snapshot.clone();
                    updated.list_id = list_id.clone();
                    updated.updated_at = now;
                    tasks.replace(updated);
                    let payload = match &list_id {
                        Some(id) => Payload::Update(TaskUpdate {
                            list_id: Some(id.clone()),
                            ..Default::default()
                        }),
                        None => Payload::Update(TaskUpdate {
                            clear_list: true,
                            ..Default::default()
                        }),
                    };
                    let dispatch = Dispatch {
                        payload,
                        undo: Undo::Restore(snapshot),
                        announce: None,
                    };
                    (dispatch, list_id)
                }
                TaskMutation::Patch(patch) => {
                    let snapshot = self.require(&tasks, task_id)?.clone();
                    let mut updated = snapshot.clone();
                    updated.apply_patch(&patch, now)?;
                    let payload = Payload::Update(TaskUpdate {
                        // send the normalized title, not the raw input
                        title: patch.title.as_ref().map(|_| updated.title.clone()),
                        content: patch.content.clone(),
                        is_habit: patch.is_habit,
                        reminder_time: if patch.clear_reminder {
                            None
                        } else {
                            patch.reminder_time
                        },
                        clear_reminder: patch.clear_reminder,
                        ..Default::default()
                    });
                    tasks.replace(updated);
                    let dispatch = Dispatch {
                        payload,
                        undo: Undo::Restore(snapshot),
                        announce: None,
                    };
                    (dispatch, None)
                }
                TaskMutation::Checkin { tz_offset_minutes } => {
                    let snapshot = self.require(&tasks, task_id)?.clone();
                    let today = habit::local_date(now, tz_offset_minutes);
                    if snapshot.last_checkin_date == Some(today) {
                        // already checked in today; nothing to persist
                        log::debug!("task {} already checked in on {}", task_id, today);
                        return Ok(());
                    }
                    let streak =
                        habit::next_streak(snapshot.last_checkin_date, snapshot.current_streak, today);
                    let mut updated = snapshot.clone();
                    updated.current_streak = streak;
                    updated.longest_streak = updated.longest_streak.max(streak);
                    updated.last_checkin_date = Some(today);
                    updated.updated_at = now;
                    let announce = habit::is_milestone(streak)
                        .then(|| format!("{} day streak on '{}'!", streak, updated.title));
                    tasks.replace(updated);
                    let dispatch = Dispatch {
                        payload: Payload::Checkin(CheckinRequest {
                            timezone_offset: tz_offset_minutes,
                        }),
                        undo: Undo::Restore(snapshot),
                        announce,
                    };
                    (dispatch, None)
                }
                TaskMutation::SoftDelete => {
                    let snapshot = self.require(&tasks, task_id)?.clone();
                    let mut updated = snapshot.clone();
                    updated.is_deleted = true;
                    updated.updated_at = now;
                    tasks.replace(updated);
                    let dispatch = Dispatch {
                        payload: Payload::Delete { hard: false },
                        undo: Undo::Restore(snapshot),
                        announce: None,
                    };
                    (dispatch, None)
                }
            }
        };

        // Phase 2: a list reference that doesn't resolve yet is applied
        // anyway and flagged for reconciliation once lists refresh.
        let stale = match &stale_candidate {
            Some(list_id) => {
                let lists = self.lists.lock().await;
                lists.index_of(list_id).is_none()
            }
            None => false,
        };

        // Phase 3: enqueue behind any dispatch already on the wire.
        let mut inner = self.inner.lock().await;
        if stale {
            log::warn!(
                "task {} now references unknown list {:?}; flagged for reconciliation",
                task_id,
                stale_candidate
            );
            inner.stale.insert(task_id.to_string());
        }
        if inner.in_flight.contains(task_id) {
            inner
                .pending
                .entry(task_id.to_string())
                .or_default()
                .push_back(dispatch);
        } else {
            inner.in_flight.insert(task_id.to_string());
            let queue = self.clone();
            let task_id = task_id.to_string();
            tokio::spawn(async move {
                queue.run_dispatches(task_id, dispatch).await;
            });
        }
        Ok(())
    }

    fn require<'a>(
        &self,
        tasks: &'a OrderedCollection<TaskCard>,
        task_id: &str,
    ) -> DomainResult<&'a TaskCard> {
        tasks
            .get_by_id(&task_id.to_string())
            .ok_or_else(|| DomainError::NotFound(format!("Task '{}' not found", task_id)))
    }

    /// Drive one card's dispatch chain until the queue drains or a
    /// dispatch fails.
    ///
    /// Returns a boxed future to break the `Send` auto-trait inference
    /// cycle created by the mutual recursion with `rollback` (which spawns
    /// this future, requiring it to be `Send`).
    fn run_dispatches<'a>(
        &'a self,
        task_id: String,
        first: Dispatch,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
        let mut current = first;
        loop {
            match self.send(&task_id, &current.payload).await {
                Ok(()) => {
                    if let Some(message) = current.announce.take() {
                        self.toasts.show(message, ToastKind::Success).await;
                    }
                    let next = {
                        let mut inner = self.inner.lock().await;
                        let next = inner
                            .pending
                            .get_mut(&task_id)
                            .and_then(|queue| queue.pop_front());
                        if next.is_none() {
                            inner.pending.remove(&task_id);
                            inner.in_flight.remove(&task_id);
                        }
                        next
                    };
                    match next {
                        Some(dispatch) => current = dispatch,
                        None => break,
                    }
                }
                Err(error) => {
                    self.rollback(&task_id, current.undo, &error).await;
                    break;
                }
            }
        }
        })
    }

    async fn send(&self, task_id: &str, payload: &Payload) -> DomainResult<()> {
        match payload {
            Payload::Reorder(req) => self.remote.reorder(req).await,
            Payload::Update(req) => self.remote.update(task_id, req).await.map(|_| ()),
            Payload::Checkin(req) => self.remote.checkin(task_id, req).await.map(|_| ()),
            Payload::Delete { hard } => self.remote.delete(task_id, *hard).await,
        }
    }

    /// Return the card to its last confirmed state.
    ///
    /// Mutations queued behind the failed one were applied locally on top
    /// of it, so they are undone first, in reverse order, and dropped.
    /// The in-flight slot stays held until the rollback has landed, so a
    /// concurrent `apply` keeps queueing instead of dispatching against
    /// state that is about to be rewound.
    async fn rollback(&self, task_id: &str, failed_undo: Undo, error: &DomainError) {
        let queued_undos: Vec<Undo> = {
            let mut inner = self.inner.lock().await;
            inner.stale.remove(task_id);
            inner
                .pending
                .remove(task_id)
                .map(|queue| queue.into_iter().map(|d| d.undo).collect())
                .unwrap_or_default()
        };

        {
            let mut tasks = self.tasks.lock().await;
            for undo in queued_undos.into_iter().rev() {
                Self::apply_undo(&mut tasks, undo);
            }
            Self::apply_undo(&mut tasks, failed_undo);
        }

        log::warn!("mutation for task {} was rejected, rolled back: {}", task_id, error);
        self.toasts
            .show(format!("Couldn't save your change: {}", error), ToastKind::Error)
            .await;

        // A mutation applied while the rollback ran starts a fresh chain;
        // otherwise the slot is released.
        let next = {
            let mut inner = self.inner.lock().await;
            let next = inner
                .pending
                .get_mut(task_id)
                .and_then(|queue| queue.pop_front());
            if next.is_none() {
                inner.pending.remove(task_id);
                inner.in_flight.remove(task_id);
            }
            next
        };
        if let Some(dispatch) = next {
            let queue = self.clone();
            let task_id = task_id.to_string();
            tokio::spawn(async move {
                queue.run_dispatches(task_id, dispatch).await;
            });
        }
    }

    fn apply_undo(tasks: &mut OrderedCollection<TaskCard>, undo: Undo) {
        match undo {
            Undo::Restore(card) => {
                if !tasks.replace(card.clone()) {
                    // card vanished locally in the meantime; put it back
                    let _ = tasks.insert(card);
                }
            }
            Undo::RestoreOrder(ids) => tasks.restore_order(&ids),
        }
    }

    /// Cards currently flagged with an unresolved list reference.
    pub async fn stale_refs(&self) -> Vec<String> {
        let inner = self.inner.lock().await;
        inner.stale.iter().cloned().collect()
    }

    /// Re-check stale flags against the current list collection, clearing
    /// the ones that resolve now. Returns the ids still stale.
    pub async fn reconcile_stale(&self) -> Vec<String> {
        let referenced: HashMap<String, Option<String>> = {
            let tasks = self.tasks.lock().await;
            tasks
                .iter()
                .map(|card| (card.id.clone(), card.list_id.clone()))
                .collect()
        };
        let known: HashSet<String> = {
            let lists = self.lists.lock().await;
            lists.iter().map(|list| list.id.clone()).collect()
        };

        let mut inner = self.inner.lock().await;
        inner.stale.retain(|task_id| match referenced.get(task_id) {
            Some(Some(list_id)) => !known.contains(list_id),
            // card is gone or uncategorized again; nothing left to resolve
            _ => false,
        });
        inner.stale.iter().cloned().collect()
    }

    /// True when nothing is on the wire and nothing is queued.
    pub async fn is_idle(&self) -> bool {
        let inner = self.inner.lock().await;
        inner.in_flight.is_empty() && inner.pending.is_empty()
    }
}
