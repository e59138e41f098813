//! Debounced persistence of the scene to a document backend.
//!
//! Every recorded snapshot schedules a save. Saves within the debounce
//! window collapse to the latest payload; a forced save (Ctrl+S) bypasses
//! the window. Time comes from a [`Clock`] so hosts drive it with their own
//! timer (`Editor::tick`) and tests drive it by hand.

use pc_core::Document;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

// ─── Clock ───────────────────────────────────────────────────────────────

/// Millisecond time source.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall time since construction. Not available on `wasm32-unknown-unknown`;
/// browser hosts use [`ManualClock`] fed from `performance.now()`.
#[derive(Debug)]
pub struct MonotonicClock {
    start: std::time::Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: u64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

// ─── Debouncer ───────────────────────────────────────────────────────────

/// Holds the latest value until `delay_ms` passes without a newer one.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_ms: u64,
    pending: Option<(u64, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Replace any pending value and restart the timer.
    pub fn schedule(&mut self, now_ms: u64, value: T) {
        self.pending = Some((now_ms.saturating_add(self.delay_ms), value));
    }

    /// Take the value if its deadline has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if *deadline <= now_ms => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    /// Take the value regardless of the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(_, v)| v)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

// ─── Store ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistError {
    #[error("document {0} not found")]
    NotFound(String),
    #[error("backend error: {0}")]
    Backend(String),
}

/// What gets written on every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavePayload {
    pub json: String,
    pub width: f64,
    pub height: f64,
}

/// Document backend.
pub trait DocumentStore {
    fn save(&mut self, document_id: &str, payload: &SavePayload) -> Result<Document, PersistError>;
    fn load(&mut self, document_id: &str) -> Result<Document, PersistError>;
}

impl<T: DocumentStore + ?Sized> DocumentStore for Box<T> {
    fn save(&mut self, document_id: &str, payload: &SavePayload) -> Result<Document, PersistError> {
        (**self).save(document_id, payload)
    }

    fn load(&mut self, document_id: &str) -> Result<Document, PersistError> {
        (**self).load(document_id)
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    documents: HashMap<String, Document>,
    saves: usize,
    fail_with: Option<String>,
}

/// In-process store. Clones share the same documents, so a caller can keep a
/// handle after giving one to the editor.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, document: Document) {
        self.inner
            .borrow_mut()
            .documents
            .insert(document.id.clone(), document);
    }

    pub fn get(&self, document_id: &str) -> Option<Document> {
        self.inner.borrow().documents.get(document_id).cloned()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.inner.borrow().saves
    }

    /// Make every save fail with `message` until cleared with `None`.
    pub fn set_failure(&self, message: Option<&str>) {
        self.inner.borrow_mut().fail_with = message.map(str::to_string);
    }
}

impl DocumentStore for MemoryStore {
    fn save(&mut self, document_id: &str, payload: &SavePayload) -> Result<Document, PersistError> {
        let mut inner = self.inner.borrow_mut();
        if let Some(message) = &inner.fail_with {
            return Err(PersistError::Backend(message.clone()));
        }
        let doc = inner
            .documents
            .entry(document_id.to_string())
            .or_insert_with(|| Document {
                id: document_id.to_string(),
                name: "Untitled project".to_string(),
                json: String::new(),
                width: payload.width,
                height: payload.height,
                created_at: None,
                updated_at: None,
            });
        doc.json.clone_from(&payload.json);
        doc.width = payload.width;
        doc.height = payload.height;
        let saved = doc.clone();
        inner.saves += 1;
        Ok(saved)
    }

    fn load(&mut self, document_id: &str) -> Result<Document, PersistError> {
        self.get(document_id)
            .ok_or_else(|| PersistError::NotFound(document_id.to_string()))
    }
}

// ─── Auto-saver ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    #[default]
    Idle,
    /// A save is scheduled or in flight.
    Saving,
    Saved,
    Error,
}

/// Debounced writer of scene snapshots to a [`DocumentStore`].
pub struct AutoSaver<S> {
    store: S,
    document_id: String,
    debouncer: Debouncer<SavePayload>,
    clock: Rc<dyn Clock>,
    status: SaveStatus,
}

impl<S: DocumentStore> AutoSaver<S> {
    pub fn new(store: S, document_id: &str, delay_ms: u64, clock: Rc<dyn Clock>) -> Self {
        Self {
            store,
            document_id: document_id.to_string(),
            debouncer: Debouncer::new(delay_ms),
            clock,
            status: SaveStatus::Idle,
        }
    }

    pub fn set_clock(&mut self, clock: Rc<dyn Clock>) {
        self.clock = clock;
    }

    pub fn schedule(&mut self, payload: SavePayload) {
        self.debouncer.schedule(self.clock.now_ms(), payload);
        self.status = SaveStatus::Saving;
    }

    /// Run the pending save if its window has elapsed. Returns whether a
    /// save was attempted.
    pub fn poll(&mut self) -> bool {
        match self.debouncer.poll(self.clock.now_ms()) {
            Some(payload) => {
                self.write(&payload);
                true
            }
            None => false,
        }
    }

    /// Save `payload` immediately, dropping anything pending.
    pub fn save_now(&mut self, payload: SavePayload) {
        self.debouncer.cancel();
        self.write(&payload);
    }

    /// Write the pending save now, if there is one.
    pub fn flush(&mut self) -> bool {
        match self.debouncer.flush() {
            Some(payload) => {
                self.write(&payload);
                true
            }
            None => false,
        }
    }

    /// Discard a pending save without writing it.
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
        if self.status == SaveStatus::Saving {
            self.status = SaveStatus::Idle;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn status(&self) -> SaveStatus {
        self.status
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn write(&mut self, payload: &SavePayload) {
        match self.store.save(&self.document_id, payload) {
            Ok(_) => {
                log::debug!("saved document {} ({} bytes)", self.document_id, payload.json.len());
                self.status = SaveStatus::Saved;
            }
            Err(err) => {
                log::warn!("failed to save document {}: {err}", self.document_id);
                self.status = SaveStatus::Error;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn payload(json: &str) -> SavePayload {
        SavePayload {
            json: json.to_string(),
            width: 900.0,
            height: 1200.0,
        }
    }

    #[test]
    fn debouncer_collapses_to_latest() {
        let mut d = Debouncer::new(500);
        d.schedule(0, "a");
        d.schedule(300, "b");
        assert_eq!(d.poll(700), None, "timer restarted at 300");
        assert_eq!(d.poll(800), Some("b"));
        assert_eq!(d.poll(10_000), None);
    }

    #[test]
    fn debouncer_flush_and_cancel() {
        let mut d = Debouncer::new(500);
        d.schedule(0, 1);
        assert_eq!(d.flush(), Some(1));
        d.schedule(0, 2);
        d.cancel();
        assert!(!d.is_pending());
        assert_eq!(d.poll(1_000), None);
    }

    #[test]
    fn autosaver_status_transitions() {
        let clock = Rc::new(ManualClock::new(0));
        let store = MemoryStore::new();
        let mut saver = AutoSaver::new(store.clone(), "doc", 500, clock.clone());
        assert_eq!(saver.status(), SaveStatus::Idle);

        saver.schedule(payload("{}"));
        assert_eq!(saver.status(), SaveStatus::Saving);
        assert!(!saver.poll());

        clock.advance(500);
        assert!(saver.poll());
        assert_eq!(saver.status(), SaveStatus::Saved);
        assert_eq!(store.get("doc").unwrap().json, "{}");
    }

    #[test]
    fn autosaver_reports_errors() {
        let clock = Rc::new(ManualClock::new(0));
        let store = MemoryStore::new();
        store.set_failure(Some("offline"));
        let mut saver = AutoSaver::new(store.clone(), "doc", 500, clock);
        saver.save_now(payload("{}"));
        assert_eq!(saver.status(), SaveStatus::Error);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn memory_store_load() {
        let mut store = MemoryStore::new();
        assert_eq!(
            store.load("missing"),
            Err(PersistError::NotFound("missing".into()))
        );
        store.save("doc", &payload("[]")).unwrap();
        assert_eq!(store.load("doc").unwrap().json, "[]");
    }
}
