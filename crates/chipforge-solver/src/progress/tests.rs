//! Tests for the delta window, tracker and result view.

use chipforge_core::domain::{BoardCombination, Placement, ProgressSample, ResultSnapshot};

use super::*;

fn sample(timestamp_millis: u64, enumerated: u64, total_estimate: u64) -> ProgressSample {
    ProgressSample {
        timestamp_millis,
        enumerated,
        total_estimate,
        found: 0,
    }
}

fn combo(candidate: usize) -> BoardCombination {
    BoardCombination::new(vec![Placement {
        candidate,
        rotation: 0,
        row: 0,
        col: 0,
    }])
}

#[test]
fn test_window_caps_at_capacity() {
    let mut window = DeltaWindow::new();
    for i in 0..250 {
        window.push(i);
    }
    assert_eq!(window.len(), ETA_WINDOW);
    let kept: Vec<u64> = window.iter().collect();
    assert_eq!(kept.first(), Some(&150));
    assert_eq!(kept.last(), Some(&249));
}

#[test]
fn test_window_clear() {
    let mut window = DeltaWindow::new();
    window.push(10);
    window.push(20);
    window.clear();
    assert!(window.is_empty());
    assert_eq!(window.average(), None);
    window.push(7);
    assert_eq!(window.average(), Some(7));
}

#[test]
fn test_average_depends_on_latest_hundred_only() {
    let tracker = ProgressTracker::new(3600);
    let mut ts = 0;
    tracker.on_sample(sample(ts, 0, 1_000_000));
    // 50 slow deltas followed by 100 fast ones.
    for i in 1..=150u64 {
        ts += if i <= 50 { 5_000 } else { 20 };
        tracker.on_sample(sample(ts, i, 1_000_000));
    }
    assert_eq!(tracker.average_delta(), Some(20));
}

#[test]
fn test_no_eta_without_deltas() {
    let tracker = ProgressTracker::new(3600);
    assert_eq!(tracker.eta(), None);

    tracker.on_sample(sample(1_000, 1, 100));
    assert_eq!(tracker.eta(), None);
}

#[test]
fn test_eta_formula() {
    let tracker = ProgressTracker::new(3600);
    tracker.on_sample(sample(0, 0, 10_000));
    tracker.on_sample(sample(250, 10, 10_000));
    tracker.on_sample(sample(500, 20, 10_000));

    // 250 ms * 9_980 remaining / 1000
    let eta = tracker.eta().unwrap();
    assert_eq!(eta.remaining_secs, 2_495);
    assert!(!eta.warn);
}

#[test]
fn test_warning_threshold_is_strict() {
    let tracker = ProgressTracker::new(3600);
    tracker.on_sample(sample(0, 0, 3_600));
    tracker.on_sample(sample(1_000, 0, 3_600));
    assert_eq!(
        tracker.eta(),
        Some(Eta {
            remaining_secs: 3_600,
            warn: false,
        })
    );

    tracker.on_sample(sample(2_000, 0, 3_601));
    assert_eq!(
        tracker.eta(),
        Some(Eta {
            remaining_secs: 3_601,
            warn: true,
        })
    );
}

#[test]
fn test_reset_window_drops_reference() {
    let tracker = ProgressTracker::new(3600);
    tracker.on_sample(sample(0, 0, 100));
    tracker.on_sample(sample(100, 1, 100));
    tracker.reset_window();
    assert_eq!(tracker.average_delta(), None);

    // A long gap after the reset is not counted.
    tracker.on_sample(sample(60_000, 2, 100));
    assert_eq!(tracker.average_delta(), None);
    tracker.on_sample(sample(60_040, 3, 100));
    assert_eq!(tracker.average_delta(), Some(40));
}

#[test]
fn test_found_follows_appended_results() {
    let tracker = ProgressTracker::new(3600);
    tracker.on_result_appended();
    tracker.on_result_appended();
    tracker.on_sample(sample(5, 1, 10));
    assert_eq!(tracker.latest().found, 2);
    assert_eq!(tracker.latest().enumerated, 1);
}

#[test]
fn test_view_drops_missing_selection() {
    let mut view = ResultView::new();
    view.sync(ResultSnapshot::from_boards(vec![combo(0), combo(1)]));
    assert!(view.select(0));

    view.sync(ResultSnapshot::from_boards(vec![combo(1), combo(2)]));
    assert_eq!(view.selected_index(), None);
    assert_eq!(view.boards().len(), 2);
}

#[test]
fn test_view_select_out_of_range() {
    let mut view = ResultView::new();
    view.sync(ResultSnapshot::from_boards(vec![combo(0)]));
    assert!(!view.select(1));
    assert_eq!(view.selected_board(), None);
}
