//! # Note Store
//!
//! [`NoteStore`] owns the canonical in-memory note collection, the selection
//! pointer, and the ephemeral search query. It is the single entry point for
//! all mutations; persistence and rendering are side effects it pushes to
//! its collaborators.
//!
//! ## Timing model
//!
//! The store is single-threaded and event-driven. Its two timers (the save
//! debounce and the deletion delay) are deadlines against the injected
//! [`Clock`]; the host pumps them by calling [`NoteStore::tick`] when its
//! own timer fires, and [`NoteStore::next_wakeup`] says when that should be.
//! No operation blocks, and nothing inside the store spawns threads.
//!
//! ## Persistence ordering
//!
//! The medium gives no multi-key atomicity, so every full save writes the
//! note collection before the selection pointer: a crash in between leaves
//! a valid collection with a possibly stale selection, which hydration
//! repairs.

use crate::clock::{Clock, SystemClock};
use crate::codec;
use crate::error::{JotterError, Result};
use crate::export::{self, ExportDocument};
use crate::lifecycle::{DeletionLifecycle, DEFAULT_DELETE_DELAY_MS};
use crate::model::{Note, NotePatch};
use crate::render::{Notice, NullRender, RenderSink};
use crate::scheduler::{SaveScheduler, DEFAULT_DEBOUNCE_MS};
use crate::storage::{StorageBackend, NOTES_KEY, SELECTED_KEY};
use chrono::{DateTime, Duration, Utc};
use log::debug;
use uuid::Uuid;

/// Timing knobs. The defaults match the reference behavior; neither value
/// is load-bearing beyond "short enough to feel instant".
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub debounce_window: Duration,
    pub delete_delay: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            debounce_window: Duration::milliseconds(DEFAULT_DEBOUNCE_MS),
            delete_delay: Duration::milliseconds(DEFAULT_DELETE_DELAY_MS),
        }
    }
}

/// The canonical note collection and its consistency discipline.
///
/// Generic over [`StorageBackend`] so production uses the file backend and
/// tests use the in-memory one, the same way the rest of the store's
/// collaborators (clock, render sink) are injected.
pub struct NoteStore<S: StorageBackend> {
    backend: S,
    clock: Box<dyn Clock>,
    render: Box<dyn RenderSink>,
    notes: Vec<Note>,
    selected: Option<Uuid>,
    search: String,
    saver: SaveScheduler,
    deletion: DeletionLifecycle,
    delete_delay: Duration,
}

impl<S: StorageBackend> NoteStore<S> {
    /// Open with the wall clock and a headless render sink.
    pub fn open(backend: S) -> Self {
        Self::open_with(
            backend,
            StoreOptions::default(),
            Box::new(SystemClock),
            Box::new(NullRender),
        )
    }

    /// Open and hydrate from the backend. Structurally invalid persisted
    /// records are repaired or dropped by the codec; a dangling selection
    /// falls back to the first note. Finishes with a full render.
    pub fn open_with(
        backend: S,
        options: StoreOptions,
        clock: Box<dyn Clock>,
        render: Box<dyn RenderSink>,
    ) -> Self {
        let now = clock.now();

        let mut notes = backend
            .get(NOTES_KEY)
            .map(|raw| codec::decode_notes(&raw, now))
            .unwrap_or_default();
        sort_by_recency(&mut notes);

        let persisted = backend
            .get(SELECTED_KEY)
            .and_then(|raw| codec::decode_selection(&raw));
        let selected = persisted
            .filter(|id| notes.iter().any(|n| n.id == *id))
            .or_else(|| notes.first().map(|n| n.id));

        debug!("hydrated {} note(s), selected {:?}", notes.len(), selected);

        let store = Self {
            backend,
            clock,
            render,
            notes,
            selected,
            search: String::new(),
            saver: SaveScheduler::new(options.debounce_window),
            deletion: DeletionLifecycle::default(),
            delete_delay: options.delete_delay,
        };
        store.render_full();
        store
    }

    // --- Queries ---

    /// The canonical collection, sorted by `updated_at` descending.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn selected(&self) -> Option<Uuid> {
        self.selected
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_delete_pending(&self) -> bool {
        self.deletion.is_pending()
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// The derived view: notes whose title or content contains the active
    /// search query (case-insensitive), in the canonical sort order. An
    /// empty query yields the whole collection. Pure; never mutates.
    pub fn visible(&self) -> Vec<Note> {
        self.notes
            .iter()
            .filter(|n| n.matches(&self.search))
            .cloned()
            .collect()
    }

    /// Earliest pending deadline (save flush or deletion completion), so
    /// the host knows when to call [`NoteStore::tick`] next.
    pub fn next_wakeup(&self) -> Option<DateTime<Utc>> {
        match (self.saver.deadline(), self.deletion.due_at()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // --- Mutations ---

    /// Create a fresh empty note, select it, and persist immediately
    /// (creation is a discrete event; no debounce). Returns the new id.
    pub fn create(&mut self) -> Result<Uuid> {
        self.guard_mutation()?;

        let note = Note::new(self.clock.now());
        let id = note.id;
        // newest-first, so the sort invariant holds without a re-sort
        self.notes.insert(0, note);
        self.selected = Some(id);

        self.persist_all();
        self.render_full();
        Ok(id)
    }

    /// Point the selection at `id`. A no-op when `id` does not resolve.
    /// Persists the selection pointer only (the collection is unchanged).
    pub fn select(&mut self, id: Uuid) -> Result<()> {
        self.guard_mutation()?;

        if !self.contains(id) {
            return Ok(());
        }
        self.selected = Some(id);
        self.persist_selection();
        self.render_full();
        Ok(())
    }

    /// Apply a partial update to the note matching `id`. Ignored when `id`
    /// does not resolve or when the patch changes nothing. A real change
    /// bumps `updated_at`, re-sorts the collection, and schedules a
    /// debounced save — never a durable write per keystroke.
    pub fn update(&mut self, id: Uuid, patch: NotePatch) -> Result<()> {
        self.guard_mutation()?;

        let now = self.clock.now();
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            return Ok(());
        };
        if patch.is_noop_for(note) {
            return Ok(());
        }

        if let Some(title) = patch.title {
            note.title = title;
        }
        if let Some(content) = patch.content {
            note.content = content;
        }
        note.updated_at = now;

        sort_by_recency(&mut self.notes);
        self.saver.schedule(now);
        self.render_list();
        Ok(())
    }

    /// Request deletion of `id`. The note is not removed yet: the store
    /// enters `Pending`, asks the render sink to start the removal
    /// animation, and performs the removal in [`NoteStore::tick`] once the
    /// delay elapses. Rejected when a deletion is already in flight or when
    /// `id` does not resolve.
    pub fn delete(&mut self, id: Uuid) -> Result<()> {
        if self.deletion.is_pending() {
            return Err(JotterError::DeletePending);
        }
        if !self.contains(id) {
            return Err(JotterError::NoteNotFound(id));
        }

        let now = self.clock.now();
        self.deletion.begin(id, now, self.delete_delay);
        self.render.begin_removal(id);
        Ok(())
    }

    /// Set the ephemeral search query. Touches no persisted state and is
    /// allowed mid-deletion (it only changes the projection).
    pub fn query(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.render_list();
    }

    /// Pump due timers. Call when the deadline from
    /// [`NoteStore::next_wakeup`] passes.
    ///
    /// Completes a due deletion first (remove the note, reselect the first
    /// remaining note, save immediately), then flushes a due debounced save.
    pub fn tick(&mut self) {
        let now = self.clock.now();

        if let Some(id) = self.deletion.take_due(now) {
            self.notes.retain(|n| n.id != id);
            self.selected = self.notes.first().map(|n| n.id);

            self.persist_all();
            self.render_full();
            self.render.notice(Notice::success("Note deleted"));
        }

        if self.saver.take_due(now) {
            debug!("debounced save fired");
            self.persist_all();
        }
    }

    /// Snapshot the full collection (unfiltered, regardless of the active
    /// search) into a portable backup document. No side effects.
    pub fn export(&self) -> ExportDocument {
        export::snapshot(&self.notes, self.clock.now())
    }

    /// The finished backup text handed to the clipboard collaborator.
    pub fn export_json(&self) -> Result<String> {
        self.export().to_json()
    }

    // --- Internals ---

    fn contains(&self, id: Uuid) -> bool {
        self.notes.iter().any(|n| n.id == id)
    }

    fn guard_mutation(&self) -> Result<()> {
        if self.deletion.is_pending() {
            return Err(JotterError::DeletePending);
        }
        Ok(())
    }

    /// Durable write of the whole state, notes before selection. Supersedes
    /// any pending debounced flush.
    fn persist_all(&mut self) {
        self.saver.cancel();
        match codec::encode_notes(&self.notes) {
            Ok(encoded) => self.write(NOTES_KEY, &encoded),
            Err(err) => {
                // in-memory state stays authoritative; the user can retry
                log::warn!("could not encode notes: {err}");
                self.render
                    .notice(Notice::warning("Could not save notes"));
            }
        }
        self.persist_selection();
    }

    fn persist_selection(&mut self) {
        let encoded = codec::encode_selection(self.selected);
        self.write(SELECTED_KEY, &encoded);
    }

    fn write(&mut self, key: &str, value: &str) {
        if !self.backend.set(key, value) {
            log::warn!("storage write failed for {key:?}");
            self.render.notice(Notice::warning(
                "Could not save — changes are kept in memory",
            ));
        }
    }

    fn render_full(&self) {
        self.render
            .render_full(&self.visible(), self.selected, &self.search);
    }

    fn render_list(&self) {
        self.render.render_list(&self.visible(), &self.search);
    }
}

/// Most-recently-updated first. `sort_by` is stable, so notes with equal
/// `updated_at` keep their prior relative order.
fn sort_by_recency(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::memory::MemoryBackend;
    use std::cell::RefCell;
    use std::rc::Rc;

    const WINDOW: i64 = DEFAULT_DEBOUNCE_MS;
    const DELAY: i64 = DEFAULT_DELETE_DELAY_MS;

    fn open(backend: MemoryBackend) -> (NoteStore<MemoryBackend>, ManualClock) {
        let clock = ManualClock::new(1_000);
        let store = NoteStore::open_with(
            backend,
            StoreOptions::default(),
            Box::new(clock.clone()),
            Box::new(NullRender),
        );
        (store, clock)
    }

    fn fresh() -> (NoteStore<MemoryBackend>, ManualClock) {
        open(MemoryBackend::new())
    }

    fn assert_sorted(store: &NoteStore<MemoryBackend>) {
        let notes = store.notes();
        assert!(notes.windows(2).all(|w| w[0].updated_at >= w[1].updated_at));
    }

    #[test]
    fn create_inserts_front_selects_and_saves_immediately() {
        let (mut store, _clock) = fresh();
        let first = store.create().unwrap();
        let second = store.create().unwrap();

        assert_eq!(store.notes()[0].id, second);
        assert_eq!(store.selected(), Some(second));
        assert_sorted(&store);

        let raw = store.backend().raw(NOTES_KEY).unwrap();
        assert!(raw.contains(&first.to_string()));
        assert!(raw.contains(&second.to_string()));
        assert_eq!(
            store.backend().raw(SELECTED_KEY).unwrap(),
            second.to_string()
        );
    }

    #[test]
    fn select_unknown_id_is_a_no_op() {
        let (mut store, _clock) = fresh();
        let id = store.create().unwrap();

        store.select(Uuid::new_v4()).unwrap();
        assert_eq!(store.selected(), Some(id));
    }

    #[test]
    fn update_bumps_timestamp_and_resorts() {
        let (mut store, clock) = fresh();
        let a = store.create().unwrap();
        clock.advance(10);
        let b = store.create().unwrap();
        assert_eq!(store.notes()[0].id, b);

        clock.advance(10);
        store.update(a, NotePatch::title("x")).unwrap();

        assert_eq!(store.notes()[0].id, a);
        assert!(store.notes()[0].updated_at > store.notes()[1].updated_at);
        assert_sorted(&store);
    }

    #[test]
    fn update_of_unknown_id_is_ignored() {
        let (mut store, _clock) = fresh();
        store.create().unwrap();
        let before = store.notes().to_vec();

        store.update(Uuid::new_v4(), NotePatch::title("x")).unwrap();
        assert_eq!(store.notes(), &before[..]);
    }

    #[test]
    fn noop_update_does_not_bump_or_schedule() {
        let (mut store, clock) = fresh();
        let id = store.create().unwrap();
        let stamped = store.notes()[0].updated_at;

        clock.advance(10);
        store.update(id, NotePatch::title("")).unwrap();

        assert_eq!(store.notes()[0].updated_at, stamped);
        assert_eq!(store.next_wakeup(), None);
    }

    #[test]
    fn burst_of_updates_coalesces_into_one_write() {
        let (mut store, clock) = fresh();
        let id = store.create().unwrap();
        let writes_after_create = store.backend().write_count();

        for i in 0..5 {
            clock.advance(100); // each within the window of the previous
            store
                .update(id, NotePatch::title(format!("title {i}")))
                .unwrap();
            store.tick();
        }
        assert_eq!(store.backend().write_count(), writes_after_create);

        clock.advance(WINDOW);
        store.tick();

        // one flush: notes entry plus selection entry
        assert_eq!(store.backend().write_count(), writes_after_create + 2);
        let raw = store.backend().raw(NOTES_KEY).unwrap();
        assert!(raw.contains("title 4"));
        assert!(!raw.contains("title 3"));
    }

    #[test]
    fn delete_is_gated_behind_the_pending_delay() {
        let (mut store, clock) = fresh();
        let id = store.create().unwrap();

        store.delete(id).unwrap();
        assert!(store.is_delete_pending());
        assert_eq!(store.notes().len(), 1);

        clock.advance(DELAY - 1);
        store.tick();
        assert_eq!(store.notes().len(), 1);

        clock.advance(1);
        store.tick();
        assert!(store.notes().is_empty());
        assert_eq!(store.selected(), None);
        assert!(!store.is_delete_pending());
        assert_eq!(store.backend().raw(NOTES_KEY).unwrap(), "[]");
        assert_eq!(store.backend().raw(SELECTED_KEY).unwrap(), "");
    }

    #[test]
    fn mutations_are_rejected_while_delete_is_pending() {
        let (mut store, clock) = fresh();
        let a = store.create().unwrap();
        clock.advance(10);
        let b = store.create().unwrap();

        store.delete(b).unwrap();

        assert!(matches!(
            store.update(a, NotePatch::title("x")),
            Err(JotterError::DeletePending)
        ));
        assert!(matches!(store.create(), Err(JotterError::DeletePending)));
        assert!(matches!(
            store.delete(a),
            Err(JotterError::DeletePending)
        ));
        assert!(matches!(
            store.select(a),
            Err(JotterError::DeletePending)
        ));

        // the rejected update left no trace
        clock.advance(DELAY);
        store.tick();
        assert_eq!(store.notes()[0].id, a);
        assert_eq!(store.notes()[0].title, "");
    }

    #[test]
    fn deleting_the_selected_note_reselects_the_most_recent_survivor() {
        let (mut store, clock) = fresh();
        let a = store.create().unwrap();
        clock.advance(10);
        let b = store.create().unwrap();
        assert_eq!(store.selected(), Some(b));

        store.delete(b).unwrap();
        clock.advance(DELAY);
        store.tick();

        assert_eq!(store.selected(), Some(a));
        assert_sorted(&store);
    }

    #[test]
    fn delete_of_unknown_id_is_rejected() {
        let (mut store, _clock) = fresh();
        store.create().unwrap();
        assert!(matches!(
            store.delete(Uuid::new_v4()),
            Err(JotterError::NoteNotFound(_))
        ));
        assert!(!store.is_delete_pending());
    }

    #[test]
    fn search_filters_the_view_without_touching_the_collection() {
        let (mut store, clock) = fresh();
        let a = store.create().unwrap();
        store.update(a, NotePatch::title("Shopping list")).unwrap();
        clock.advance(10);
        let b = store.create().unwrap();
        store
            .update(b, NotePatch::content("call the PLUMBER"))
            .unwrap();

        store.query("plumber");
        let visible = store.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, b);

        store.query("zz-no-match");
        assert!(store.visible().is_empty());
        assert_eq!(store.notes().len(), 2);

        store.query("");
        assert_eq!(store.visible().len(), 2);
    }

    #[test]
    fn hydration_restores_notes_and_selection() {
        let (mut store, clock) = fresh();
        let a = store.create().unwrap();
        store.update(a, NotePatch::title("kept")).unwrap();
        clock.advance(10);
        store.create().unwrap();
        store.select(a).unwrap();
        clock.advance(WINDOW);
        store.tick();

        let notes_raw = store.backend().raw(NOTES_KEY).unwrap().to_string();
        let sel_raw = store.backend().raw(SELECTED_KEY).unwrap().to_string();

        let mut backend = MemoryBackend::new();
        backend.seed(NOTES_KEY, &notes_raw);
        backend.seed(SELECTED_KEY, &sel_raw);
        let (reloaded, _clock) = open(backend);

        assert_eq!(reloaded.notes().len(), 2);
        assert_eq!(reloaded.selected(), Some(a));
        assert_eq!(reloaded.search(), ""); // ephemeral, reset on reload
        assert_sorted(&reloaded);
    }

    #[test]
    fn dangling_persisted_selection_repairs_to_first_note() {
        let (mut store, _clock) = fresh();
        store.create().unwrap();
        let notes_raw = store.backend().raw(NOTES_KEY).unwrap().to_string();

        let mut backend = MemoryBackend::new();
        backend.seed(NOTES_KEY, &notes_raw);
        backend.seed(SELECTED_KEY, &Uuid::new_v4().to_string());
        let (reloaded, _clock) = open(backend);

        assert_eq!(reloaded.selected(), Some(reloaded.notes()[0].id));
    }

    #[test]
    fn empty_backend_hydrates_to_an_empty_store() {
        let (store, _clock) = fresh();
        assert!(store.notes().is_empty());
        assert_eq!(store.selected(), None);
    }

    #[test]
    fn write_failure_surfaces_a_warning_not_a_crash() {
        struct Recorder(Rc<RefCell<Vec<Notice>>>);
        impl RenderSink for Recorder {
            fn notice(&self, notice: Notice) {
                self.0.borrow_mut().push(notice);
            }
        }

        let notices = Rc::new(RefCell::new(Vec::new()));
        let mut backend = MemoryBackend::new();
        backend.fail_writes(true);
        let mut store = NoteStore::open_with(
            backend,
            StoreOptions::default(),
            Box::new(ManualClock::new(0)),
            Box::new(Recorder(notices.clone())),
        );

        let id = store.create().unwrap();
        assert_eq!(store.notes().len(), 1);
        assert_eq!(store.selected(), Some(id));
        assert!(notices
            .borrow()
            .iter()
            .any(|n| n.level == crate::render::NoticeLevel::Warning));
    }

    #[test]
    fn next_wakeup_tracks_the_earliest_deadline() {
        let (mut store, clock) = fresh();
        let a = store.create().unwrap();
        clock.advance(10);
        let b = store.create().unwrap();
        assert_eq!(store.next_wakeup(), None);

        store.update(a, NotePatch::title("x")).unwrap();
        let save_deadline = store.next_wakeup().unwrap();
        assert_eq!(
            save_deadline,
            clock.now() + Duration::milliseconds(WINDOW)
        );

        // flush, then arm a deletion
        clock.advance(WINDOW);
        store.tick();
        store.delete(b).unwrap();
        assert_eq!(
            store.next_wakeup().unwrap(),
            clock.now() + Duration::milliseconds(DELAY)
        );
    }

    #[test]
    fn export_snapshots_everything_regardless_of_search() {
        let (mut store, _clock) = fresh();
        let a = store.create().unwrap();
        store.update(a, NotePatch::title("alpha")).unwrap();
        store.query("zz-no-match");

        let doc = store.export();
        assert_eq!(doc.data.notes.len(), 1);
        assert_eq!(doc.app, "jotter");
    }
}
