//! Undo/redo history of serialized scene snapshots.
//!
//! Every mutation batch appends one full-document snapshot. Undo and redo
//! move an index over the list and hand back the snapshot to restore; the
//! caller replays it inside a `begin_replay` / `end_replay` window so the
//! restore itself is not recorded.

use pc_core::ObjectId;

/// One recorded scene state: the document JSON plus the ids its objects
/// had, in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub json: String,
    pub ids: Vec<ObjectId>,
}

impl Snapshot {
    pub fn new(json: impl Into<String>, ids: Vec<ObjectId>) -> Self {
        Self {
            json: json.into(),
            ids,
        }
    }
}

/// Linear snapshot history with a bounded depth.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    index: usize,
    /// Maximum number of snapshots kept.
    max_depth: usize,
    replaying: bool,
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            index: 0,
            max_depth: max_depth.max(2),
            replaying: false,
        }
    }

    /// Drop everything and start from `initial`, which is never evicted.
    pub fn reset(&mut self, initial: Snapshot) {
        self.snapshots.clear();
        self.snapshots.push(initial);
        self.index = 0;
        self.replaying = false;
    }

    /// Record a new state. Discards any redo tail. Ignored while replaying.
    /// A state whose JSON equals the current snapshot only refreshes its ids.
    pub fn save(&mut self, snapshot: Snapshot) -> bool {
        if self.replaying {
            return false;
        }
        let current = self.snapshots.get_mut(self.index);
        if let Some(current) = current.filter(|c| c.json == snapshot.json) {
            current.ids = snapshot.ids;
            return false;
        }
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(snapshot);
        if self.snapshots.len() > self.max_depth {
            // Keep the initial snapshot; evict the oldest one after it.
            self.snapshots.remove(1);
        }
        self.index = self.snapshots.len() - 1;
        true
    }

    /// Step back; returns the snapshot to restore.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.snapshots.get(self.index)
    }

    /// Step forward; returns the snapshot to restore.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.snapshots.get(self.index)
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.snapshots.get(self.index)
    }

    pub fn begin_replay(&mut self) {
        self.replaying = true;
    }

    pub fn end_replay(&mut self) {
        self.replaying = false;
    }

    pub fn is_replaying(&self) -> bool {
        self.replaying
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }
}
