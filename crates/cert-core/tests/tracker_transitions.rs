//! Transition-function properties of the step tracker: predecessor
//! completion, error capture, idempotence, retry and the canonical 4-step
//! end-to-end scenarios.

use cert_core::{build_step_sequence, FlowError, StepState, StepTracker};

fn four_step_tracker() -> (StepTracker, u64) {
    let seq = build_step_sequence(&[("a", "Step A"),
                                    ("b", "Step B"),
                                    ("c", "Step C"),
                                    ("d", "Step D")]).expect("valid sequence");
    let mut tracker = StepTracker::new();
    let gen = tracker.begin(&seq);
    (tracker, gen)
}

fn states(tracker: &StepTracker) -> Vec<StepState> {
    tracker.steps().iter().map(|s| s.state).collect()
}

#[test]
fn set_step_completes_predecessors_and_leaves_successors_untouched() {
    // every valid target index of a 4-step sequence
    for (target, expected) in [("a", vec![StepState::Active, StepState::Idle, StepState::Idle, StepState::Idle]),
                               ("b", vec![StepState::Completed, StepState::Active, StepState::Idle, StepState::Idle]),
                               ("c", vec![StepState::Completed, StepState::Completed, StepState::Active, StepState::Idle]),
                               // last step completes instead of activating
                               ("d", vec![StepState::Completed, StepState::Completed, StepState::Completed, StepState::Completed])]
    {
        let (mut tracker, gen) = four_step_tracker();
        tracker.set_step(gen, target).unwrap();
        assert_eq!(states(&tracker), expected, "target {target}");
    }
}

#[test]
fn error_sets_exactly_the_target_to_failed() {
    let (mut tracker, gen) = four_step_tracker();
    tracker.set_step_error(gen, "b", "network down").unwrap();

    let steps = tracker.steps();
    assert_eq!(steps[0].state, StepState::Completed);
    assert_eq!(steps[1].state, StepState::Failed);
    assert_eq!(steps[1].error.as_deref(), Some("network down"));
    assert_eq!(steps[2].state, StepState::Idle);
    assert_eq!(steps[3].state, StepState::Idle);
}

#[test]
fn set_step_is_idempotent() {
    let (mut tracker, gen) = four_step_tracker();
    tracker.set_step(gen, "b").unwrap();
    let once = states(&tracker);
    tracker.set_step(gen, "b").unwrap();
    assert_eq!(states(&tracker), once);
}

#[test]
fn end_to_end_flow_with_failure_at_third_step() {
    // A active, B advances, C fails with "boom"
    let (mut tracker, gen) = four_step_tracker();

    tracker.set_step(gen, "a").unwrap();
    assert_eq!(states(&tracker),
               vec![StepState::Active, StepState::Idle, StepState::Idle, StepState::Idle]);

    tracker.set_step(gen, "b").unwrap();
    assert_eq!(states(&tracker),
               vec![StepState::Completed, StepState::Active, StepState::Idle, StepState::Idle]);

    tracker.set_step_error(gen, "c", "boom").unwrap();
    assert_eq!(states(&tracker),
               vec![StepState::Completed, StepState::Completed, StepState::Failed, StepState::Idle]);
    assert_eq!(tracker.steps()[2].error.as_deref(), Some("boom"));
    assert!(!tracker.is_completed());
}

#[test]
fn end_to_end_success_completes_every_step() {
    let (mut tracker, gen) = four_step_tracker();
    for id in ["a", "b", "c", "d"] {
        tracker.set_step(gen, id).unwrap();
    }
    assert!(states(&tracker).iter().all(|s| *s == StepState::Completed));
    assert!(tracker.is_completed());
}

#[test]
fn retry_moves_failed_step_back_to_active_and_clears_error() {
    // easy to regress: re-entering a failed step without an error is the
    // retry path
    let (mut tracker, gen) = four_step_tracker();
    tracker.set_step_error(gen, "c", "boom").unwrap();
    assert_eq!(tracker.steps()[2].state, StepState::Failed);

    tracker.set_step(gen, "c").unwrap();
    let steps = tracker.steps();
    assert_eq!(steps[2].state, StepState::Active);
    assert_eq!(steps[2].error, None, "retry clears the previous error message");
    assert_eq!(steps[0].state, StepState::Completed);
    assert_eq!(steps[1].state, StepState::Completed);
}

#[test]
fn begin_resets_to_all_idle() {
    let (mut tracker, gen) = four_step_tracker();
    tracker.set_step(gen, "b").unwrap();

    let seq = build_step_sequence(&[("a", "A"), ("b", "B")]).unwrap();
    let gen2 = tracker.begin(&seq);
    assert!(tracker.steps().iter().all(|s| s.state == StepState::Idle));
    assert_eq!(tracker.steps().len(), 2);
    assert!(gen2 > gen);
}

#[test]
fn reset_invalidates_in_flight_generation() {
    let (mut tracker, gen) = four_step_tracker();
    tracker.set_step(gen, "a").unwrap();
    tracker.reset();

    // an update racing with the dialog close must be ignored
    let err = tracker.set_step(gen, "b").unwrap_err();
    assert!(matches!(err, FlowError::StaleGeneration { .. }));
    assert!(tracker.steps().iter().all(|s| s.state == StepState::Idle));
}

#[test]
fn cancel_marks_the_active_step() {
    let (mut tracker, gen) = four_step_tracker();
    tracker.set_step(gen, "b").unwrap();
    tracker.cancel_active(gen).unwrap();

    assert_eq!(states(&tracker),
               vec![StepState::Completed, StepState::Cancelled, StepState::Idle, StepState::Idle]);
}

#[test]
fn cancel_after_completion_is_a_noop() {
    let (mut tracker, gen) = four_step_tracker();
    for id in ["a", "b", "c", "d"] {
        tracker.set_step(gen, id).unwrap();
    }
    tracker.cancel_active(gen).unwrap();
    assert!(tracker.is_completed());
}

#[test]
fn sequence_validation() {
    assert_eq!(build_step_sequence(&[]).unwrap_err(), FlowError::EmptySequence);
    assert_eq!(build_step_sequence(&[("a", "A"), ("a", "again")]).unwrap_err(),
               FlowError::DuplicateStepId("a".into()));
}

#[test]
fn transitions_before_begin_are_rejected() {
    let mut tracker = StepTracker::new();
    // generation 0 matches, but there is no sequence yet
    let err = tracker.set_step(0, "a").unwrap_err();
    assert_eq!(err, FlowError::NoActiveFlow);
}
