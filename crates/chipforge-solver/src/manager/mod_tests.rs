//! Tests for the job controller.

use std::env;
use std::fs;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chipforge_config::ChipForgeConfig;
use chipforge_core::domain::{
    Chip, Color, DictionaryVariant, JobId, JobState, SettingsSnapshot, Strategy,
};
use chipforge_test::catalog::StaticCatalog;
use chipforge_test::chips::{alpha_board, cell, invalid_chip, inventory, valid_chip};

use super::*;
use crate::clock::ManualClock;
use crate::event::CountingEventListener;
use crate::record::{JobRecord, JobStatus};
use crate::strategy::{AbortReason, StrategyOption, StrategyPrompt};
use crate::test_utils::{
    combo, scripted_factory, wait_for, wait_until_stopped, Script, ScriptedChoices,
};

fn alpha_catalog() -> Arc<StaticCatalog> {
    Arc::new(
        StaticCatalog::new()
            .with_board("Alpha", Color::Orange, 36)
            .with_dictionary("Alpha", 5, DictionaryVariant::Subset, cell("4")),
    )
}

fn controller_with(script: Script, clock: &ManualClock) -> JobController {
    let catalog = alpha_catalog();
    JobControllerBuilder::new(catalog.clone(), catalog, scripted_factory(script))
        .with_clock(Arc::new(clock.clone()))
        .build()
}

fn covered_inventory() -> Vec<Chip> {
    inventory(&["6", "5B", "4"], Color::Orange)
}

fn start(controller: &mut JobController) -> JobHandle {
    controller
        .start(
            &alpha_board(),
            &covered_inventory(),
            &SettingsSnapshot::default(),
            &mut ScriptedChoices::new(vec![]),
        )
        .expect("job starts")
}

#[test]
fn test_pause_resume_stop_elapsed() {
    let clock = ManualClock::new();
    let mut controller = controller_with(Script::UntilStopped, &clock);
    start(&mut controller);

    clock.set(10_000);
    assert!(controller.pause());
    clock.set(15_000);
    assert_eq!(controller.elapsed_ms(), 10_000);
    assert!(controller.resume());
    clock.set(18_000);
    assert!(controller.stop());

    assert_eq!(controller.elapsed_ms(), 13_000);
    clock.advance(60_000);
    assert_eq!(controller.elapsed_ms(), 13_000);
}

#[test]
fn test_stop_while_paused_closes_pause() {
    let clock = ManualClock::new();
    let mut controller = controller_with(Script::UntilStopped, &clock);
    start(&mut controller);

    clock.set(4_000);
    controller.pause();
    clock.set(9_000);
    controller.stop();

    assert_eq!(controller.elapsed_ms(), 4_000);
    assert_eq!(controller.state(), JobState::Stopped);
}

#[test]
fn test_stop_is_idempotent() {
    let clock = ManualClock::new();
    let counter = Arc::new(CountingEventListener::new());
    let mut controller = controller_with(Script::UntilStopped, &clock);
    controller.add_listener(counter.clone());
    start(&mut controller);

    assert!(controller.stop());
    assert!(!controller.stop());
    assert!(!controller.stop());

    assert_eq!(controller.state(), JobState::Stopped);
    assert_eq!(counter.transition_count(), 2);
    assert_eq!(counter.finished_count(), 1);
}

#[test]
fn test_invalid_transitions_are_noops() {
    let clock = ManualClock::new();
    let mut controller = controller_with(Script::UntilStopped, &clock);

    assert!(!controller.pause());
    assert!(!controller.resume());
    assert!(!controller.stop());
    assert_eq!(controller.state(), JobState::Stopped);

    start(&mut controller);
    assert!(!controller.resume());
    assert!(controller.pause());
    assert!(!controller.pause());
    assert_eq!(controller.state(), JobState::Paused);
    assert!(controller.resume());
    assert_eq!(controller.state(), JobState::Running);
    controller.stop();
}

#[test]
fn test_start_rejected_while_active() {
    let clock = ManualClock::new();
    let mut controller = controller_with(Script::UntilStopped, &clock);
    let first = start(&mut controller);

    let second = controller.start(
        &alpha_board(),
        &covered_inventory(),
        &SettingsSnapshot::default(),
        &mut ScriptedChoices::new(vec![]),
    );

    assert_eq!(second.unwrap_err(), StartError::AlreadyActive);
    assert_eq!(controller.state(), JobState::Running);
    assert_eq!(controller.job_record(), None);
    controller.stop();
    assert_eq!(controller.job_record().map(|r| r.id), Some(first.id()));
}

#[test]
fn test_invalid_inventory_creates_no_job() {
    let clock = ManualClock::new();
    let counter = Arc::new(CountingEventListener::new());
    let mut controller = controller_with(Script::UntilStopped, &clock);
    controller.add_listener(counter.clone());

    let chips = vec![
        valid_chip("6", Color::Orange),
        invalid_chip("5B", Color::Orange),
        valid_chip("3", Color::Orange),
    ];
    let before = chips.clone();
    let mut choices = ScriptedChoices::new(vec![Some(StrategyOption::Fallback)]);

    let result = controller.start(
        &alpha_board(),
        &chips,
        &SettingsSnapshot::default(),
        &mut choices,
    );

    assert_eq!(result.unwrap_err(), StartError::InvalidInventory { index: 1 });
    assert_eq!(chips, before);
    assert!(choices.prompts().is_empty());
    assert_eq!(controller.state(), JobState::Stopped);
    assert_eq!(counter.transition_count(), 0);
    assert_eq!(controller.completion_label(), CompletionLabel::Idle);
}

#[test]
fn test_full_coverage_starts_dictionary_without_prompt() {
    let clock = ManualClock::new();
    let mut controller = controller_with(Script::UntilStopped, &clock);
    let mut choices = ScriptedChoices::new(vec![]);

    let handle = controller
        .start(
            &alpha_board(),
            &covered_inventory(),
            &SettingsSnapshot::default(),
            &mut choices,
        )
        .unwrap();

    match handle.strategy() {
        Strategy::Dictionary(plan) => assert_eq!(plan.variant(), DictionaryVariant::Subset),
        other => panic!("expected dictionary, got {other}"),
    }
    assert!(choices.prompts().is_empty());
    assert_eq!(handle.board(), &alpha_board());
    controller.stop();
}

#[test]
fn test_undersized_chip_fallback_keeps_chip() {
    let clock = ManualClock::new();
    let mut controller = controller_with(Script::UntilStopped, &clock);
    let mut chips = covered_inventory();
    chips.push(valid_chip("3", Color::Orange));
    let mut choices = ScriptedChoices::new(vec![Some(StrategyOption::Fallback)]);

    let handle = controller
        .start(
            &alpha_board(),
            &chips,
            &SettingsSnapshot::default(),
            &mut choices,
        )
        .unwrap();

    assert_eq!(handle.strategy(), &Strategy::Fallback);
    assert_eq!(choices.prompts().len(), 1);
    assert!(matches!(
        choices.prompts()[0],
        StrategyPrompt::UndersizedChips { undersized: 1, .. }
    ));
    assert_eq!(choices.prompts()[0].options().len(), 2);

    let candidates = handle.descriptor().candidates();
    assert_eq!(candidates.len(), 4);
    assert!(candidates.iter().any(|chip| chip.cell_type() == cell("3")));
    controller.stop();
}

#[test]
fn test_undersized_chip_dictionary_excludes_chip() {
    let clock = ManualClock::new();
    let mut controller = controller_with(Script::UntilStopped, &clock);
    let mut chips = covered_inventory();
    chips.push(valid_chip("3", Color::Orange));
    let mut choices =
        ScriptedChoices::new(vec![Some(StrategyOption::DictionaryExcludingUndersized)]);

    let handle = controller
        .start(
            &alpha_board(),
            &chips,
            &SettingsSnapshot::default(),
            &mut choices,
        )
        .unwrap();

    assert!(handle.strategy().is_dictionary());
    assert_eq!(handle.descriptor().candidates().len(), 3);
    assert_eq!(chips.len(), 4);
    controller.stop();
}

#[test]
fn test_cancel_aborts_start() {
    let clock = ManualClock::new();
    let mut controller = controller_with(Script::UntilStopped, &clock);
    let mut chips = covered_inventory();
    chips.push(valid_chip("3", Color::Orange));

    let result = controller.start(
        &alpha_board(),
        &chips,
        &SettingsSnapshot::default(),
        &mut ScriptedChoices::new(vec![None]),
    );

    assert_eq!(
        result.unwrap_err(),
        StartError::Aborted(AbortReason::Cancelled)
    );
    assert_eq!(controller.state(), JobState::Stopped);
}

#[test]
fn test_zero_results_is_none_found() {
    let clock = ManualClock::new();
    let mut controller = controller_with(Script::Exhaust(vec![]), &clock);
    start(&mut controller);

    let report = wait_until_stopped(&mut controller);

    assert_eq!(report.found, 0);
    assert_eq!(report.completion, CompletionLabel::NoneFound);
    assert_ne!(report.completion, CompletionLabel::Count(0));
    assert_eq!(report.completion.to_string(), "none found");
}

#[test]
fn test_completion_counts_results() {
    let clock = ManualClock::new();
    let mut controller = controller_with(Script::Exhaust(vec![combo(0), combo(1)]), &clock);
    start(&mut controller);

    let report = wait_until_stopped(&mut controller);

    assert_eq!(report.completion, CompletionLabel::Count(2));
    assert_eq!(report.found, 2);
    assert_eq!(report.revision, 2);
    assert!(report.refresh);
}

#[test]
fn test_stopped_job_is_interrupted_not_none_found() {
    let clock = ManualClock::new();
    let mut controller = controller_with(Script::UntilStopped, &clock);
    start(&mut controller);
    controller.stop();

    assert_eq!(controller.completion_label(), CompletionLabel::Interrupted(0));
}

#[test]
fn test_engine_panic_fails_job() {
    let clock = ManualClock::new();
    let counter = Arc::new(CountingEventListener::new());
    let mut controller = controller_with(Script::Panic("engine exploded"), &clock);
    controller.add_listener(counter.clone());
    start(&mut controller);

    let report = wait_until_stopped(&mut controller);

    match report.completion {
        CompletionLabel::Failed(message) => assert!(message.contains("engine exploded")),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(controller.state(), JobState::Stopped);
    assert_eq!(counter.finished_count(), 1);

    // The controller stays usable.
    assert!(!controller.stop());
}

#[test]
fn test_engine_error_fails_job() {
    let clock = ManualClock::new();
    let mut controller = controller_with(Script::Fail("no dictionary file"), &clock);
    start(&mut controller);

    let report = wait_until_stopped(&mut controller);

    assert!(matches!(report.completion, CompletionLabel::Failed(_)));
}

#[test]
fn test_results_frozen_after_stop() {
    let clock = ManualClock::new();
    let mut controller = controller_with(Script::PublishUntilRejected, &clock);
    start(&mut controller);

    wait_for(|| controller.poll_progress().found >= 2);
    controller.stop();
    let frozen = controller.results();

    thread::sleep(Duration::from_millis(20));
    assert!(!controller.boards_updated());
    assert_eq!(controller.results(), frozen);
    assert!(!controller.results_changed_since(frozen.revision()));
}

#[test]
fn test_dirty_flag_is_sticky() {
    let clock = ManualClock::new();
    let mut controller =
        controller_with(Script::Exhaust(vec![combo(0), combo(1), combo(2)]), &clock);
    start(&mut controller);
    wait_until_stopped(&mut controller);

    assert!(controller.boards_updated());
    assert!(controller.boards_updated());
    assert!(controller.poll_progress().refresh);
    assert!(controller.boards_updated());
    assert!(controller.results_changed_since(0));

    let results = controller.results();
    assert_eq!(results.len(), 3);
    assert!(!controller.boards_updated());
    assert!(!controller.poll_progress().refresh);
    assert!(!controller.results_changed_since(results.revision()));
}

#[test]
fn test_state_change_forces_refresh() {
    let clock = ManualClock::new();
    let mut controller = controller_with(Script::UntilStopped, &clock);
    start(&mut controller);

    assert!(controller.poll_progress().refresh);
    assert!(!controller.poll_progress().refresh);
    controller.pause();
    let report = controller.poll_progress();
    assert!(report.refresh);
    assert_eq!(report.state, JobState::Paused);
    assert_eq!(report.eta, None);
    controller.stop();
}

#[test]
fn test_export_requires_stopped_job_with_results() {
    let clock = ManualClock::new();
    let mut controller = controller_with(Script::UntilStopped, &clock);
    assert!(matches!(
        controller.export_results(env::temp_dir().join("unused")),
        Err(ExportError::NoResults)
    ));

    start(&mut controller);
    assert!(matches!(
        controller.export_results(env::temp_dir().join("unused")),
        Err(ExportError::NotStopped)
    ));
    controller.stop();
    assert!(matches!(
        controller.export_results(env::temp_dir().join("unused")),
        Err(ExportError::NoResults)
    ));
}

#[test]
fn test_export_and_restore() {
    let clock = ManualClock::new();
    let mut controller = controller_with(Script::Exhaust(vec![combo(4), combo(5)]), &clock);
    let handle = start(&mut controller);
    clock.set(2_500);
    wait_until_stopped(&mut controller);

    let target = env::temp_dir().join(format!("chipforge-export-{}", JobId::new()));
    let written = controller.export_results(&target).unwrap();
    let record = JobRecord::load(&written);
    let _ = fs::remove_file(&written);
    let record = record.unwrap();

    assert_eq!(written.extension().and_then(|e| e.to_str()), Some("fpc"));
    assert_eq!(record.id, handle.id());
    assert_eq!(record.status, JobStatus::Finished);
    assert_eq!(record.result_count, 2);
    assert_eq!(record.board, alpha_board());

    let mut fresh = controller_with(Script::UntilStopped, &clock);
    assert!(fresh.restore(record));
    assert_eq!(fresh.state(), JobState::Stopped);
    assert_eq!(fresh.completion_label(), CompletionLabel::Count(2));
    assert_eq!(fresh.results().boards(), &[combo(4), combo(5)]);
    assert!(fresh.poll_progress().refresh);
}

#[test]
fn test_restore_rejected_while_active() {
    let clock = ManualClock::new();
    let mut controller = controller_with(Script::UntilStopped, &clock);
    start(&mut controller);
    controller.stop();
    let record = controller.job_record().unwrap();

    start(&mut controller);
    assert!(!controller.restore(record));
    assert_eq!(controller.state(), JobState::Running);
    controller.stop();
}

#[test]
fn test_new_job_gets_new_descriptor() {
    let clock = ManualClock::new();
    let mut controller = controller_with(Script::UntilStopped, &clock);
    let first = start(&mut controller);
    controller.stop();
    let second = start(&mut controller);
    controller.stop();

    assert_ne!(first.id(), second.id());
    assert!(!Arc::ptr_eq(first.descriptor(), second.descriptor()));
}

#[test]
fn test_start_with_defaults_uses_configured_settings() {
    let clock = ManualClock::new();
    let settings = SettingsSnapshot {
        match_color: false,
        ..SettingsSnapshot::default()
    };
    let catalog = alpha_catalog();
    let mut controller =
        JobControllerBuilder::new(catalog.clone(), catalog, scripted_factory(Script::UntilStopped))
            .with_clock(Arc::new(clock.clone()))
            .with_config(ChipForgeConfig::new().with_settings(settings.clone()))
            .build();
    let mut chips = covered_inventory();
    chips.push(valid_chip("6", Color::Blue));

    let handle = controller
        .start_with_defaults(&alpha_board(), &chips, &mut ScriptedChoices::new(vec![]))
        .unwrap();

    assert_eq!(handle.descriptor().settings(), &settings);
    assert_eq!(handle.descriptor().candidates().len(), 4);
    controller.stop();
}

#[test]
fn test_preview_only_while_running() {
    let clock = ManualClock::new();
    let mut controller = controller_with(Script::Previews, &clock);
    let settings = SettingsSnapshot {
        show_progress_image: true,
        ..SettingsSnapshot::default()
    };
    controller
        .start(
            &alpha_board(),
            &covered_inventory(),
            &settings,
            &mut ScriptedChoices::new(vec![]),
        )
        .unwrap();

    wait_for(|| controller.take_preview().is_some());
    assert!(controller.pause());
    thread::sleep(Duration::from_millis(10));
    assert_eq!(controller.take_preview(), None);

    assert!(controller.resume());
    wait_for(|| controller.take_preview().is_some());
    let seen = controller.poll_progress().enumerated;
    wait_for(|| controller.poll_progress().enumerated >= seen + 2);
    controller.stop();
    assert_eq!(controller.take_preview(), None);
}

#[test]
fn test_completion_while_paused_freezes_at_pause() {
    let clock = ManualClock::new();
    let counter = Arc::new(CountingEventListener::new());
    let mut controller = controller_with(Script::FinishWhenPaused, &clock);
    controller.add_listener(counter.clone());
    start(&mut controller);

    clock.set(4_000);
    assert!(controller.pause());
    clock.set(9_000);
    let report = wait_until_stopped(&mut controller);

    assert_eq!(report.state, JobState::Stopped);
    assert_eq!(report.completion, CompletionLabel::NoneFound);
    assert_eq!(report.elapsed_ms, 4_000);
    clock.advance(30_000);
    assert_eq!(controller.elapsed_ms(), 4_000);
    assert!(!controller.resume());
    assert_eq!(counter.finished_count(), 1);
}

#[test]
fn test_pause_gap_never_enters_eta() {
    let clock = ManualClock::new();
    let mut controller = controller_with(Script::UntilStopped, &clock);
    start(&mut controller);

    // The clock stands still while running, so every running delta is zero.
    wait_for(|| controller.poll_progress().eta.is_some());
    assert_eq!(controller.poll_progress().eta.map(|eta| eta.remaining_secs), Some(0));

    assert!(controller.pause());
    thread::sleep(Duration::from_millis(10));
    assert_eq!(controller.poll_progress().eta, None);
    clock.advance(600_000);
    let paused_at = controller.poll_progress().enumerated;
    assert!(controller.resume());

    wait_for(|| {
        let report = controller.poll_progress();
        report.enumerated >= paused_at + 3 && report.eta.is_some()
    });
    let eta = controller.poll_progress().eta.unwrap();
    assert_eq!(eta.remaining_secs, 0);
    assert!(!eta.warn);
    controller.stop();
}
