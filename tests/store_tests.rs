mod test_harness;

use std::sync::Arc;

use ministry_scheduler::engine::Engine;
use ministry_scheduler::repo::Repository;
use ministry_scheduler::schedule::HistoryEntry;
use ministry_scheduler::store::MemoryStore;
use test_harness::{date, elder, midweek_schedule};

#[tokio::test]
async fn test_open_missing_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");

    let store = MemoryStore::open(&path).unwrap();
    assert!(store.active_members().await.unwrap().is_empty());
    assert!(store.schedule_for(date("2025-03-06")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_saved_schedule_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");

    let schedule = midweek_schedule("2025-03-06");
    let id = schedule.id;
    {
        let store = MemoryStore::open(&path).unwrap();
        store.save_schedule(&schedule).await.unwrap();
    }

    let reopened = MemoryStore::open(&path).unwrap();
    let loaded = reopened.schedule_by_id(id).await.unwrap().unwrap();
    assert_eq!(loaded.date, date("2025-03-06"));
    assert_eq!(loaded.parts.len(), schedule.parts.len());
}

#[tokio::test]
async fn test_inactive_members_filtered_from_listing() {
    let store = MemoryStore::new();
    let active = elder("Active");
    let mut inactive = elder("Inactive");
    inactive.active = false;

    store.add_member(active.clone()).await;
    store.add_member(inactive).await;

    let members = store.active_members().await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, active.id);
}

#[tokio::test]
async fn test_history_regeneration_replaces_only_that_date() {
    let a = elder("A");
    let b = elder("B");
    let store = MemoryStore::new();
    store
        .add_history(HistoryEntry::new(a.id, date("2025-02-27"), "Chairman"))
        .await;
    store
        .add_history(HistoryEntry::new(a.id, date("2025-03-06"), "Chairman"))
        .await;

    let engine = Engine::new(Arc::new(store));

    // Re-save the 2025-03-06 schedule with B as chairman instead
    let mut schedule = midweek_schedule("2025-03-06");
    schedule.chairman.assign(b.id);
    engine.save_schedule(&schedule).await.unwrap();

    let history = engine.repository().history().await.unwrap();
    let on_saved_date: Vec<_> = history
        .iter()
        .filter(|h| h.date == date("2025-03-06"))
        .collect();
    assert_eq!(on_saved_date.len(), 1);
    assert_eq!(on_saved_date[0].member, b.id);
    assert_eq!(on_saved_date[0].label, "Chairman");

    // The older week is untouched
    assert!(history
        .iter()
        .any(|h| h.date == date("2025-02-27") && h.member == a.id));
}

#[tokio::test]
async fn test_saved_assignments_feed_future_rotation() {
    let a = elder("A");
    let b = elder("B");
    let store = MemoryStore::new();
    store.add_member(a.clone()).await;
    store.add_member(b.clone()).await;

    let engine = Engine::new(Arc::new(store));

    // Week 1: A chairs (manually assigned) and the save is recorded
    let mut week1 = midweek_schedule("2025-03-06");
    week1.chairman.assign(a.id);
    engine.save_schedule(&week1).await.unwrap();

    // Week 2: auto-fill must prefer B, who has no history
    let week2 = midweek_schedule("2025-03-13");
    engine.save_schedule(&week2).await.unwrap();
    let planned = engine.plan_week(date("2025-03-13")).await.unwrap();
    assert_eq!(planned.chairman.member, Some(b.id));
}
