//! End-to-end persistence flow: mutate the ideas list and settings the way
//! the app does, write every change wholesale, and verify a fresh store
//! reloads the exact same state.

use momentum::config::settings::{Settings, Theme};
use momentum::ideas::{Idea, IdeasList};
use momentum::storage::{LocalStore, KEY_BIRTHDAY, KEY_IDEAS, KEY_SETTINGS};

#[tokio::test]
async fn test_ideas_survive_mutation_and_reload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("momentum.json");

    let mut list = IdeasList::default();
    assert!(list.add("learn rust"));
    assert!(list.add("ship the dashboard"));
    assert!(list.add("call mom"));
    assert!(list.reorder(0, 2));

    {
        let mut store = LocalStore::open(&path).expect("open store");
        store
            .set(KEY_IDEAS, &list.ideas().to_vec())
            .await
            .expect("persist ideas");
    }

    // Reload from disk into a fresh store, as the next launch would.
    let store = LocalStore::open(&path).expect("reopen store");
    let reloaded = store.get::<Vec<Idea>>(KEY_IDEAS).expect("ideas present");
    let texts: Vec<&str> = reloaded.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts, vec!["ship the dashboard", "call mom", "learn rust"]);
    assert_eq!(reloaded, list.ideas().to_vec());
}

#[tokio::test]
async fn test_theme_switch_persists_palette() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("momentum.json");

    let mut settings = Settings::default();
    settings.apply_theme(Theme::Dark);

    {
        let mut store = LocalStore::open(&path).expect("open store");
        store.set(KEY_SETTINGS, &settings).await.expect("persist");
    }

    let store = LocalStore::open(&path).expect("reopen store");
    let snapshot = store.snapshot();
    let reloaded = snapshot.settings.expect("settings present");
    assert_eq!(reloaded.background_color, "#1F1F1F");
    assert_eq!(reloaded.main_text_color, "#DFDFDF");
    assert_eq!(reloaded.theme, Theme::Dark);
}

#[tokio::test]
async fn test_last_writer_wins_on_same_key() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("momentum.json");

    let mut store = LocalStore::open(&path).expect("open store");
    store.set(KEY_BIRTHDAY, &"1990-01-01").await.expect("write");
    store.set(KEY_BIRTHDAY, &"1991-02-02").await.expect("write");

    let reloaded = LocalStore::open(&path).expect("reopen store");
    assert_eq!(
        reloaded.get::<String>(KEY_BIRTHDAY).as_deref(),
        Some("1991-02-02")
    );
}

#[tokio::test]
async fn test_swap_flow_persists_both_keys() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("momentum.json");

    let mut settings = Settings::default();
    let mut list = IdeasList::default();
    assert!(list.add("become the headline"));
    let id = list.ideas()[0].id.clone();

    let new_main = list
        .swap_with_main_text(&id, &settings.text)
        .expect("swap succeeds");
    settings.text = new_main;

    {
        let mut store = LocalStore::open(&path).expect("open store");
        store.set(KEY_SETTINGS, &settings).await.expect("persist settings");
        store
            .set(KEY_IDEAS, &list.ideas().to_vec())
            .await
            .expect("persist ideas");
    }

    let store = LocalStore::open(&path).expect("reopen store");
    let snapshot = store.snapshot();
    assert_eq!(
        snapshot.settings.expect("settings").text,
        "become the headline"
    );
    // The previous main text took the swapped idea's list position.
    assert_eq!(snapshot.ideas.len(), 1);
    assert_eq!(snapshot.ideas[0].text, "Make every moment count!");
    assert_ne!(snapshot.ideas[0].id, id);
}
