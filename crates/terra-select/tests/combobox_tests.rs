//! Behavioural tests for the combobox state machine on virtual time.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures_util::FutureExt;
use parking_lot::Mutex;
use serde_json::json;
use terra_select::SelectError;
use terra_select::combobox::{
    CandidateItem, Combobox, ControlOptions, DisplayState, LocalItem, LocalSource, LookupFuture,
    RemoteSource, SearchBackend,
};
use terra_select_core::{Point, PointerButton, PointerDownEvent, PointerEvents, Rect};

type Calls = Arc<Mutex<Vec<String>>>;

fn soil(id: u64, label: &str) -> CandidateItem {
    CandidateItem::from_value(json!({ "id": id, "label": label })).unwrap()
}

/// Answers `"Kur"` after 500 ms and everything else after 50 ms.
fn recording_backend(calls: Calls) -> impl SearchBackend {
    move |query: &str, _limit: usize| -> LookupFuture<CandidateItem> {
        calls.lock().push(query.to_string());
        let delay = if query == "Kur" { 500 } else { 50 };
        let label = format!("Result for {query}");
        async move {
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(vec![soil(1, &label)])
        }
        .boxed()
    }
}

fn mount_remote(
    calls: &Calls,
    min_chars: usize,
    pointer: &PointerEvents,
) -> Combobox<RemoteSource<impl SearchBackend>> {
    Combobox::mount(
        RemoteSource::new(recording_backend(calls.clone())),
        ControlOptions::new("Search...", min_chars),
        pointer,
    )
    .unwrap()
}

fn labels<S: terra_select::combobox::CandidateSource>(combo: &Combobox<S>) -> Vec<String> {
    combo.candidate_rows().into_iter().map(|row| row.label).collect()
}

fn press(pointer: &PointerEvents, x: f32, y: f32) {
    pointer.pointer_down(PointerDownEvent::new(Point::new(x, y), PointerButton::Primary));
}

#[tokio::test(start_paused = true)]
async fn test_keystrokes_within_settle_delay_search_once() {
    let calls = Calls::default();
    let mut combo = mount_remote(&calls, 2, &PointerEvents::new());

    for query in ["K", "Ku", "Kur", "Kurn", "Kurno", "Kurnoo", "Kurnool"] {
        combo.set_query(query);
        tokio::time::advance(Duration::from_millis(100)).await;
    }
    assert!(combo.is_settling());
    assert!(calls.lock().is_empty());

    combo.run_until_settled().await;

    assert_eq!(*calls.lock(), vec!["Kurnool".to_string()]);
    assert_eq!(labels(&combo), vec!["Result for Kurnool"]);
    assert_eq!(combo.committed_query(), "Kurnool");
    assert_eq!(combo.display_state(), DisplayState::Results);
}

#[tokio::test(start_paused = true)]
async fn test_late_response_for_older_query_is_discarded() {
    let calls = Calls::default();
    let mut combo = mount_remote(&calls, 2, &PointerEvents::new());

    combo.set_query("Kur");
    assert!(combo.process_next().await);
    assert!(combo.is_loading());
    assert_eq!(combo.display_state(), DisplayState::Loading);
    assert_eq!(combo.status_text().as_deref(), Some("Searching..."));

    combo.set_query("Kurnool");
    assert!(combo.process_next().await);
    assert!(combo.process_next().await);
    assert!(!combo.is_loading());
    assert_eq!(labels(&combo), vec!["Result for Kurnool"]);

    // The "Kur" response lands last and must not replace the list.
    assert!(combo.process_next().await);
    assert_eq!(labels(&combo), vec!["Result for Kurnool"]);
    assert!(!combo.is_loading());
    assert_eq!(*calls.lock(), vec!["Kur".to_string(), "Kurnool".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_short_query_never_reaches_backend() {
    let calls = Calls::default();
    let mut combo = mount_remote(&calls, 2, &PointerEvents::new());

    combo.set_query("K");
    combo.run_until_settled().await;

    assert!(calls.lock().is_empty());
    assert!(combo.candidates().is_empty());
    assert_eq!(combo.display_state(), DisplayState::Prompt);
    assert_eq!(
        combo.status_text().as_deref(),
        Some("Type at least 2 character(s) to search")
    );
}

#[tokio::test(start_paused = true)]
async fn test_shortening_query_discards_inflight_lookup() {
    let calls = Calls::default();
    let mut combo = mount_remote(&calls, 2, &PointerEvents::new());

    combo.set_query("Kur");
    assert!(combo.process_next().await);
    assert!(combo.is_loading());

    combo.set_query("K");
    assert!(combo.process_next().await);
    assert!(!combo.is_loading());

    assert!(combo.process_next().await);
    assert!(combo.candidates().is_empty());
    assert_eq!(combo.display_state(), DisplayState::Prompt);
}

#[tokio::test(start_paused = true)]
async fn test_zero_threshold_searches_on_mount() {
    let calls = Calls::default();
    let mut combo = mount_remote(&calls, 0, &PointerEvents::new());
    assert_eq!(*calls.lock(), vec![String::new()]);
    assert!(combo.is_loading());

    combo.focus();
    assert_eq!(combo.display_state(), DisplayState::Loading);
    assert_eq!(combo.status_text().as_deref(), Some("Searching..."));

    assert!(combo.process_next().await);
    assert_eq!(combo.display_state(), DisplayState::Results);
    assert_eq!(labels(&combo), vec!["Result for "]);
    assert_eq!(calls.lock().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_threshold_above_zero_does_not_search_on_mount() {
    let calls = Calls::default();
    let mut combo = mount_remote(&calls, 2, &PointerEvents::new());

    combo.focus();
    assert!(calls.lock().is_empty());
    assert!(!combo.is_loading());
    assert_eq!(combo.display_state(), DisplayState::Prompt);
}

#[tokio::test(start_paused = true)]
async fn test_failed_lookup_shows_no_results() {
    let backend = |_: &str, _: usize| -> LookupFuture<CandidateItem> {
        async { Err(SelectError::Search("connection refused".to_string())) }.boxed()
    };
    let mut combo = Combobox::mount(
        RemoteSource::new(backend),
        ControlOptions::new("Search...", 2),
        &PointerEvents::new(),
    )
    .unwrap();

    combo.set_query("Black");
    combo.run_until_settled().await;

    assert!(!combo.is_loading());
    assert!(combo.candidates().is_empty());
    assert_eq!(combo.display_state(), DisplayState::NoMatches);
    assert_eq!(combo.status_text().as_deref(), Some("No results"));
}

#[tokio::test(start_paused = true)]
async fn test_activation_fires_once_and_resets() {
    let calls = Calls::default();
    let mut combo = mount_remote(&calls, 2, &PointerEvents::new());
    let picked = Arc::new(Mutex::new(Vec::new()));
    let picked_clone = picked.clone();
    combo.activated.connect(move |item: &CandidateItem| {
        picked_clone.lock().push(item.label("label"));
    });

    combo.set_query("Kurnool");
    combo.run_until_settled().await;
    assert!(combo.activate(0));

    assert_eq!(*picked.lock(), vec!["Result for Kurnool".to_string()]);
    assert_eq!(combo.display_state(), DisplayState::Closed);
    assert_eq!(combo.query(), "");
    assert_eq!(combo.display_text(), "");
    assert!(combo.candidates().is_empty());

    assert!(!combo.activate(0));
    assert_eq!(picked.lock().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_activation_cancels_pending_settle() {
    let calls = Calls::default();
    let mut combo = mount_remote(&calls, 2, &PointerEvents::new());

    combo.set_query("Kurnool");
    combo.run_until_settled().await;
    combo.set_query("Kurnool dist");
    assert!(combo.activate(0));
    assert!(!combo.is_settling());

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(combo.process_pending(), 0);
    assert_eq!(calls.lock().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_outside_press_dismisses_open_control() {
    let pointer = PointerEvents::new();
    let calls = Calls::default();
    let mut combo = mount_remote(&calls, 2, &pointer);
    let activations = Arc::new(AtomicUsize::new(0));
    let activations_clone = activations.clone();
    combo.activated.connect(move |_: &CandidateItem| {
        activations_clone.fetch_add(1, Ordering::SeqCst);
    });
    combo.set_region(vec![
        Rect::new(0.0, 0.0, 240.0, 32.0),
        Rect::new(0.0, 32.0, 240.0, 300.0),
    ]);

    press(&pointer, 400.0, 400.0);
    assert_eq!(combo.process_pending(), 0);

    combo.set_query("Kurnool");
    combo.run_until_settled().await;

    press(&pointer, 100.0, 120.0);
    assert_eq!(combo.process_pending(), 0);
    assert!(combo.is_open());

    press(&pointer, 400.0, 400.0);
    assert_eq!(combo.process_pending(), 1);
    assert!(!combo.is_open());
    assert_eq!(combo.query(), "");
    assert_eq!(activations.load(Ordering::SeqCst), 0);
    assert_eq!(pointer.subscriber_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_unmount_releases_everything() {
    let pointer = PointerEvents::new();
    let calls = Calls::default();
    let mut combo = mount_remote(&calls, 2, &pointer);

    combo.set_query("Kur");
    assert!(combo.process_next().await);
    combo.set_query("Kurnool");
    combo.unmount();

    assert_eq!(pointer.subscriber_count(), 0);
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(*calls.lock(), vec!["Kur".to_string()]);
}

#[tokio::test]
async fn test_local_filter_caps_results() {
    let items = (0..30)
        .map(|i| LocalItem::new(format!("Millet {i}"), format!("millet-{i}")))
        .collect();
    let mut combo =
        Combobox::mount(LocalSource::new(items), ControlOptions::default(), &PointerEvents::new())
            .unwrap();

    combo.set_query("millet");
    assert_eq!(combo.candidates().len(), 20);
    assert_eq!(combo.candidates()[0].value, "millet-0");

    combo.set_query("MILLET 2");
    let values: Vec<_> = combo.candidates().iter().map(|item| item.value.as_str()).collect();
    assert_eq!(values, vec!["millet-2", "millet-20", "millet-21", "millet-22", "millet-23", "millet-24", "millet-25", "millet-26", "millet-27", "millet-28", "millet-29"]);
}

fn mount_crops(pointer: &PointerEvents) -> Combobox<LocalSource> {
    let mut combo = Combobox::mount(
        LocalSource::new(vec![
            LocalItem::new("Rice (Kharif)", "rice"),
            LocalItem::new("Wheat (Rabi)", "wheat"),
        ]),
        ControlOptions::default(),
        pointer,
    )
    .unwrap();
    combo.set_region(vec![Rect::new(0.0, 0.0, 240.0, 32.0)]);
    combo
}

#[tokio::test]
async fn test_queued_dismissal_does_not_close_after_new_keystroke() {
    let pointer = PointerEvents::new();
    let mut combo = mount_crops(&pointer);

    combo.focus();
    press(&pointer, 400.0, 400.0);
    combo.set_query("ri");
    assert_eq!(combo.process_pending(), 1);

    assert!(combo.is_open());
    assert_eq!(combo.query(), "ri");
    assert_eq!(labels(&combo), vec!["Rice (Kharif)"]);

    press(&pointer, 400.0, 400.0);
    assert_eq!(combo.process_pending(), 1);
    assert!(!combo.is_open());
    assert_eq!(combo.query(), "");
}

#[tokio::test]
async fn test_queued_dismissal_does_not_close_after_refocus() {
    let pointer = PointerEvents::new();
    let mut combo = mount_crops(&pointer);

    combo.set_query("wh");
    press(&pointer, 400.0, 400.0);
    combo.focus();
    combo.process_pending();

    assert!(combo.is_open());
    assert_eq!(combo.query(), "wh");
}

#[tokio::test]
async fn test_outside_press_keeps_local_selection() {
    let pointer = PointerEvents::new();
    let mut combo = mount_crops(&pointer);

    combo.set_query("ric");
    assert!(combo.activate(0));
    assert_eq!(combo.current_value(), Some("rice"));

    combo.focus();
    press(&pointer, 400.0, 400.0);
    assert_eq!(combo.process_pending(), 1);
    assert!(!combo.is_open());
    assert_eq!(combo.current_value(), Some("rice"));
    assert_eq!(combo.display_text(), "Rice (Kharif)");

    combo.set_query("wh");
    press(&pointer, 400.0, 400.0);
    assert_eq!(combo.process_pending(), 1);
    assert!(!combo.is_open());
    assert_eq!(combo.query(), "");
    assert_eq!(combo.current_value(), Some("rice"));
    assert_eq!(combo.display_text(), "Rice (Kharif)");
}
