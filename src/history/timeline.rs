//! History timeline: an indexable log of entries with a cursor.
//!
//! Entry 0 starts out as a snapshot of the empty document. `current` always
//! points at the entry whose state is materialized in the live scene, so
//! `undo` reverses `entries[current]` and `redo` replays `entries[current + 1]`.
//! Recording discards every entry after `current` before appending.

use std::collections::BTreeSet;
use std::sync::Arc;

use bevy::log::debug;
use chrono::{DateTime, Utc};

use crate::constants::{DEFAULT_MAX_HISTORY_SIZE, INITIAL_STATE_DESCRIPTION};
use crate::scene::{Element, IdGenerator, SceneSnapshot};

use super::commands::OperationCommand;

/// Receives replay requests while the timeline walks its cursor.
///
/// Each method also gets the timeline itself. Any mutation attempted through
/// it during replay is dropped, so an undo can never record a new edit.
pub trait ReplayHandler {
    fn replay_undo(&mut self, command: &OperationCommand, history: &mut HistoryTimeline);
    fn replay_redo(&mut self, command: &OperationCommand, history: &mut HistoryTimeline);
    /// Restore a whole snapshot entry, bypassing the command path
    fn restore_state(&mut self, snapshot: &SceneSnapshot, history: &mut HistoryTimeline);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplayState {
    #[default]
    Idle,
    /// An undo or redo is delegating to its handler
    Replaying,
}

#[derive(Debug, Clone)]
pub enum EntryPayload {
    Command(Arc<OperationCommand>),
    Snapshot(Arc<SceneSnapshot>),
}

#[derive(Debug, Clone)]
pub struct TimelineEntry {
    pub id: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub payload: EntryPayload,
}

impl TimelineEntry {
    pub fn command(&self) -> Option<&OperationCommand> {
        match &self.payload {
            EntryPayload::Command(command) => Some(&**command),
            EntryPayload::Snapshot(_) => None,
        }
    }

    pub fn snapshot(&self) -> Option<&SceneSnapshot> {
        match &self.payload {
            EntryPayload::Snapshot(snapshot) => Some(&**snapshot),
            EntryPayload::Command(_) => None,
        }
    }
}

pub type HistoryListener = Box<dyn FnMut(bool, bool) + Send + Sync>;

pub struct HistoryTimeline {
    entries: Vec<TimelineEntry>,
    current: usize,
    max_size: usize,
    state: ReplayState,
    listeners: Vec<HistoryListener>,
    ids: IdGenerator,
}

impl Default for HistoryTimeline {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY_SIZE)
    }
}

impl HistoryTimeline {
    /// New timeline holding only the bootstrap snapshot. `max_size` is at least 1.
    pub fn new(max_size: usize) -> Self {
        let ids = IdGenerator::new();
        let bootstrap = Self::bootstrap_entry(&ids);
        Self {
            entries: vec![bootstrap],
            current: 0,
            max_size: max_size.max(1),
            state: ReplayState::Idle,
            listeners: Vec::new(),
            ids,
        }
    }

    fn bootstrap_entry(ids: &IdGenerator) -> TimelineEntry {
        TimelineEntry {
            id: ids.next_id("entry"),
            description: INITIAL_STATE_DESCRIPTION.to_string(),
            timestamp: Utc::now(),
            payload: EntryPayload::Snapshot(Arc::new(SceneSnapshot::elements_only(
                &[],
                &BTreeSet::new(),
            ))),
        }
    }

    /// Register an `(can_undo, can_redo)` listener
    pub fn add_history_listener(
        &mut self,
        listener: impl FnMut(bool, bool) + Send + Sync + 'static,
    ) {
        self.listeners.push(Box::new(listener));
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn state(&self) -> ReplayState {
        self.state
    }

    pub fn is_replaying(&self) -> bool {
        self.state == ReplayState::Replaying
    }

    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.entries.len()
    }

    pub fn undo_description(&self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        Some(self.entries[self.current].description.as_str())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.entries
            .get(self.current + 1)
            .map(|entry| entry.description.as_str())
    }

    /// Record an applied command. Returns false when dropped during replay.
    pub fn record_command(
        &mut self,
        command: OperationCommand,
        description: impl Into<String>,
    ) -> bool {
        if self.is_replaying() {
            debug!("Ignoring {} recorded during undo/redo", command.label());
            return false;
        }

        let entry = TimelineEntry {
            id: self.ids.next_id("entry"),
            description: description.into(),
            timestamp: Utc::now(),
            payload: EntryPayload::Command(Arc::new(command)),
        };
        self.push_entry(entry);
        true
    }

    /// Record a full elements + selection snapshot
    pub fn record_snapshot(
        &mut self,
        elements: &[Element],
        selected_ids: &BTreeSet<String>,
        description: impl Into<String>,
    ) -> bool {
        if self.is_replaying() {
            debug!("Ignoring snapshot recorded during undo/redo");
            return false;
        }

        let entry = TimelineEntry {
            id: self.ids.next_id("entry"),
            description: description.into(),
            timestamp: Utc::now(),
            payload: EntryPayload::Snapshot(Arc::new(SceneSnapshot::elements_only(
                elements,
                selected_ids,
            ))),
        };
        self.push_entry(entry);
        true
    }

    fn push_entry(&mut self, entry: TimelineEntry) {
        // Discard redo history
        self.entries.truncate(self.current + 1);
        self.entries.push(entry);
        self.current = self.entries.len() - 1;
        self.trim();
        self.notify();
    }

    fn trim(&mut self) {
        if self.entries.len() <= self.max_size {
            return;
        }
        let excess = self.entries.len() - self.max_size;
        self.entries.drain(..excess);
        self.current = self.current.saturating_sub(excess);
        debug!("Trimmed {} history entries", excess);
    }

    /// Change the cap, trimming the oldest entries immediately if needed
    pub fn set_max_size(&mut self, max_size: usize) {
        if self.is_replaying() {
            debug!("Ignoring history resize during undo/redo");
            return;
        }
        self.max_size = max_size.max(1);
        let before = self.entries.len();
        self.trim();
        if before != self.entries.len() {
            self.notify();
        }
    }

    /// Step back one entry. Returns false at the oldest entry or while replaying.
    pub fn undo<H: ReplayHandler + ?Sized>(&mut self, handler: &mut H) -> bool {
        if self.is_replaying() {
            debug!("Nested undo ignored");
            return false;
        }
        if self.current == 0 {
            return false;
        }

        let payload = self.entries[self.current].payload.clone();
        self.state = ReplayState::Replaying;
        match &payload {
            EntryPayload::Command(command) => handler.replay_undo(command, self),
            EntryPayload::Snapshot(_) => debug!("Undo over a snapshot entry has no inverse"),
        }
        self.current -= 1;
        self.state = ReplayState::Idle;

        self.notify();
        true
    }

    /// Step forward one entry. Returns false at the newest entry or while replaying.
    pub fn redo<H: ReplayHandler + ?Sized>(&mut self, handler: &mut H) -> bool {
        if self.is_replaying() {
            debug!("Nested redo ignored");
            return false;
        }
        if !self.can_redo() {
            return false;
        }

        let payload = self.entries[self.current + 1].payload.clone();
        self.state = ReplayState::Replaying;
        match &payload {
            EntryPayload::Command(command) => handler.replay_redo(command, self),
            EntryPayload::Snapshot(snapshot) => handler.restore_state(snapshot, self),
        }
        self.current += 1;
        self.state = ReplayState::Idle;

        self.notify();
        true
    }

    /// Walk undo/redo until `current == index`. Returns whether it got there.
    pub fn jump_to<H: ReplayHandler + ?Sized>(&mut self, index: usize, handler: &mut H) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        while self.current > index {
            if !self.undo(handler) {
                break;
            }
        }
        while self.current < index {
            if !self.redo(handler) {
                break;
            }
        }
        self.current == index
    }

    /// Reset to a single fresh bootstrap entry
    pub fn clear(&mut self) {
        if self.is_replaying() {
            debug!("Ignoring history clear during undo/redo");
            return;
        }
        self.entries = vec![Self::bootstrap_entry(&self.ids)];
        self.current = 0;
        self.notify();
    }

    fn notify(&mut self) {
        let can_undo = self.can_undo();
        let can_redo = self.can_redo();
        for listener in self.listeners.iter_mut() {
            listener(can_undo, can_redo);
        }
    }
}
