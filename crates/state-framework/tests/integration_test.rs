use serde::{Deserialize, Serialize};
use state_framework::mock::RecordingObserver;
use state_framework::storage::{load_json, save_json};
use state_framework::{FileStore, KeyValueStore, MemoryStore, Subject};
use std::sync::Arc;

// --- Test Store ---

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct Settings {
    theme: String,
    font_size: u32,
}

/// A tiny store following the same shape as a domain store: mutate, notify, mirror.
struct SettingsStore {
    subject: Subject<Settings>,
    slot: Arc<dyn KeyValueStore>,
}

impl SettingsStore {
    const KEY: &'static str = "settings";

    fn open(slot: Arc<dyn KeyValueStore>) -> Self {
        let initial = load_json::<Settings>(slot.as_ref(), Self::KEY)
            .ok()
            .flatten()
            .unwrap_or_default();
        Self {
            subject: Subject::new(initial),
            slot,
        }
    }

    fn set_theme(&self, theme: &str) {
        let mut next = self.subject.get_state();
        next.theme = theme.to_string();
        self.subject.set_state(next.clone());
        save_json(self.slot.as_ref(), Self::KEY, &next).unwrap();
    }
}

#[test]
fn test_store_notifies_then_mirrors() {
    let slot: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let store = SettingsStore::open(slot.clone());

    let recorder = RecordingObserver::<Settings>::new();
    store.subject.attach(recorder.handle());
    recorder
        .expect_update()
        .matching(|s: &Settings| s.theme == "dark");

    store.set_theme("dark");

    recorder.verify();
    let mirrored: Settings = load_json(slot.as_ref(), SettingsStore::KEY)
        .unwrap()
        .unwrap();
    assert_eq!(mirrored.theme, "dark");
}

#[test]
fn test_file_slot_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let slot: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));
        let store = SettingsStore::open(slot);
        store.set_theme("solarized");
    }

    let slot: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));
    let reopened = SettingsStore::open(slot);
    assert_eq!(reopened.subject.get_state().theme, "solarized");
}

#[test]
fn test_malformed_slot_falls_back_to_default() {
    let slot: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    slot.set(SettingsStore::KEY, "{ not json").unwrap();

    let store = SettingsStore::open(slot);
    assert_eq!(store.subject.get_state(), Settings::default());
}

#[test]
fn test_detached_recorder_stops_receiving() {
    let subject = Subject::new(0u32);
    let recorder = RecordingObserver::<u32>::new();
    let handle = recorder.handle();

    subject.attach(handle.clone());
    subject.set_state(1);
    subject.detach(&handle);
    subject.set_state(2);

    assert_eq!(recorder.updates(), vec![1]);
    assert_eq!(subject.observer_count(), 0);
}

#[test]
#[should_panic(expected = "Not all expectations were met")]
fn test_verify_panics_on_missing_update() {
    let recorder = RecordingObserver::<u32>::new();
    recorder.expect_update().equal_to(3);
    recorder.verify();
}
