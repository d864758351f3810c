//! Effect queue and coordinator
//!
//! Dispatching an event reduces the state and, when the event needs the
//! server, queues an [`Effect`]. [`Coordinator::run_until_idle`] drains the
//! queue in order, executes each effect exactly once and dispatches the
//! follow-up event it produced. Failed effects are reported, never retried.

use std::collections::VecDeque;

use tracing::{debug, warn};

use super::state::{reduce, CatalogEvent, CatalogState};
use super::CatalogApi;
use crate::models::{NewSong, SongPatch};

/// A described network call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchAll,
    Create(NewSong),
    Update { id: String, patch: SongPatch },
    Delete(String),
}

impl Effect {
    /// The effect an event asks for, if any
    pub fn for_event(event: &CatalogEvent) -> Option<Effect> {
        match event {
            CatalogEvent::FetchRequested => Some(Effect::FetchAll),
            CatalogEvent::CreateRequested(song) => Some(Effect::Create(song.clone())),
            CatalogEvent::UpdateRequested { id, patch } => Some(Effect::Update {
                id: id.clone(),
                patch: patch.clone(),
            }),
            CatalogEvent::DeleteRequested(id) => Some(Effect::Delete(id.clone())),
            CatalogEvent::FetchSucceeded(_)
            | CatalogEvent::FetchFailed(_)
            | CatalogEvent::MutationFailed(_) => None,
        }
    }
}

/// Effect waiting in the queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedEffect {
    pub seq: u64,
    pub effect: Effect,
}

/// FIFO of pending effects
#[derive(Debug, Default)]
pub struct EffectQueue {
    pending: VecDeque<QueuedEffect>,
    next_seq: u64,
}

impl EffectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an effect, returning its sequence number
    pub fn push(&mut self, effect: Effect) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push_back(QueuedEffect { seq, effect });
        seq
    }

    pub fn pop(&mut self) -> Option<QueuedEffect> {
        self.pending.pop_front()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Owns the client state and the only path that executes effects
pub struct Coordinator<A> {
    api: A,
    state: CatalogState,
    queue: EffectQueue,
}

impl<A: CatalogApi> Coordinator<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: CatalogState::default(),
            queue: EffectQueue::new(),
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Number of effects still queued
    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Reduce the event into the state and queue its effect
    pub fn dispatch(&mut self, event: CatalogEvent) {
        if let Some(effect) = Effect::for_event(&event) {
            let seq = self.queue.push(effect);
            debug!("Queued effect #{}", seq);
        }
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, &event);
    }

    /// Execute queued effects until none remain; returns how many ran
    pub async fn run_until_idle(&mut self) -> usize {
        let mut executed = 0;
        while let Some(QueuedEffect { seq, effect }) = self.queue.pop() {
            debug!("Running effect #{}: {:?}", seq, effect);
            let follow_up = self.execute(effect).await;
            executed += 1;
            self.dispatch(follow_up);
        }
        executed
    }

    async fn execute(&self, effect: Effect) -> CatalogEvent {
        match effect {
            Effect::FetchAll => match self.api.list_songs().await {
                Ok(songs) => CatalogEvent::FetchSucceeded(songs),
                Err(e) => {
                    warn!("Fetching songs failed: {}", e);
                    CatalogEvent::FetchFailed(e.to_string())
                }
            },
            Effect::Create(song) => mutation(self.api.create_song(&song).await.map(|_| ()), "Create"),
            Effect::Update { id, patch } => {
                mutation(self.api.update_song(&id, &patch).await.map(|_| ()), "Update")
            }
            Effect::Delete(id) => mutation(self.api.delete_song(&id).await, "Delete"),
        }
    }
}

/// Successful mutations refetch the list
fn mutation(result: crate::error::Result<()>, action: &str) -> CatalogEvent {
    match result {
        Ok(()) => CatalogEvent::FetchRequested,
        Err(e) => {
            warn!("{} failed: {}", action, e);
            CatalogEvent::MutationFailed(format!("{} failed: {}", action, e))
        }
    }
}
