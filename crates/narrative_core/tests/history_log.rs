use narrative_core::{DialogueEvent, HistoryConfig, HistoryManager, ManualClock, PushOutcome};
use std::rc::Rc;

fn setup() -> (Rc<ManualClock>, HistoryManager<Rc<ManualClock>>) {
    let clock = Rc::new(ManualClock::at_epoch());
    let history = HistoryManager::with_clock(
        &[DialogueEvent::with_id(0)],
        HistoryConfig::default(),
        Rc::clone(&clock),
    );
    (clock, history)
}

fn state(id: u64) -> Vec<DialogueEvent> {
    vec![DialogueEvent::with_id(id)]
}

fn push_spaced(clock: &ManualClock, history: &mut HistoryManager<Rc<ManualClock>>, id: u64) {
    clock.advance_ms(500);
    assert_eq!(
        history.push_state(&state(id), &format!("push {id}")),
        PushOutcome::Accepted
    );
}

#[test]
fn spaced_pushes_grow_log_up_to_capacity() {
    for pushes in [0_u64, 1, 5, 49, 50, 75] {
        let (clock, mut history) = setup();
        for id in 1..=pushes {
            push_spaced(&clock, &mut history, id);
        }
        let expected = (pushes as usize + 1).min(50);
        assert_eq!(history.len(), expected, "after {pushes} pushes");
        assert_eq!(history.cursor(), expected - 1);
    }
}

#[test]
fn burst_inside_window_keeps_only_first_push() {
    let (clock, mut history) = setup();

    clock.advance_ms(1_000);
    assert_eq!(history.push_state(&state(1), "first"), PushOutcome::Accepted);
    for id in 2..=5 {
        clock.advance_ms(100);
        assert_eq!(
            history.push_state(&state(id), "burst"),
            PushOutcome::Debounced
        );
    }

    assert_eq!(history.len(), 2);
    assert_eq!(history.current().records, state(1));
    assert_eq!(history.current_action_label(), "first");
}

#[test]
fn debounce_measures_from_last_accepted_push() {
    let (clock, mut history) = setup();

    history.push_state(&state(1), "a");
    clock.advance_ms(300);
    assert_eq!(history.push_state(&state(2), "b"), PushOutcome::Debounced);
    clock.advance_ms(300);
    assert_eq!(history.push_state(&state(3), "c"), PushOutcome::Accepted);

    assert_eq!(history.len(), 3);
}

#[test]
fn undo_then_redo_returns_to_same_snapshot() {
    let (clock, mut history) = setup();
    for id in 1..=4 {
        push_spaced(&clock, &mut history, id);
    }
    history.undo();
    assert_eq!(history.cursor(), 3);
    let before = history.current().records.clone();

    let undone = history.undo().expect("undo should move back");
    assert_eq!(undone, state(2));
    let redone = history.redo().expect("redo should move forward");

    assert_eq!(redone, before);
    assert_eq!(history.cursor(), 3);
}

#[test]
fn boundary_navigation_is_a_noop() {
    let (clock, mut history) = setup();
    assert!(history.undo().is_none());
    assert!(history.redo().is_none());
    assert!(!history.can_undo());
    assert!(!history.can_redo());

    push_spaced(&clock, &mut history, 1);
    assert!(history.redo().is_none());
    assert_eq!(history.cursor(), 1);
}

#[test]
fn push_after_undo_prunes_redo_branch() {
    let (clock, mut history) = setup();
    push_spaced(&clock, &mut history, 1);
    push_spaced(&clock, &mut history, 2);
    assert_eq!(history.cursor(), 2);

    assert_eq!(history.undo(), Some(state(1)));
    push_spaced(&clock, &mut history, 3);

    let logged = history
        .snapshots()
        .map(|snapshot| snapshot.records[0].id)
        .collect::<Vec<_>>();
    assert_eq!(logged, vec![0, 1, 3]);
    assert_eq!(history.cursor(), 2);
    assert!(history.redo().is_none());
}

#[test]
fn overflow_evicts_oldest_entries_first() {
    let (clock, mut history) = setup();
    for id in 1..=60 {
        push_spaced(&clock, &mut history, id);
    }

    assert_eq!(history.len(), 50);
    assert_eq!(history.cursor(), 49);
    let oldest = history.snapshots().next().expect("log is never empty");
    assert_eq!(oldest.records, state(11));
    assert_eq!(oldest.action, "push 11");

    let mut steps = 0;
    while history.undo().is_some() {
        steps += 1;
    }
    assert_eq!(steps, 49);
    assert_eq!(history.current().records, state(11));
}

#[test]
fn custom_capacity_and_debounce_are_honored() {
    let clock = Rc::new(ManualClock::at_epoch());
    let config = HistoryConfig {
        capacity: 3,
        debounce_ms: 0,
    };
    let mut history = HistoryManager::with_clock(&[], config, Rc::clone(&clock));

    for id in 1..=5 {
        assert_eq!(history.push_state(&state(id), "edit"), PushOutcome::Accepted);
    }

    assert_eq!(history.len(), 3);
    assert_eq!(history.capacity(), 3);
    assert_eq!(history.current().records, state(5));
}

#[test]
fn snapshots_are_copies_of_caller_state() {
    let (clock, mut history) = setup();
    let mut records = state(7);
    push_spaced(&clock, &mut history, 7);
    clock.advance_ms(500);
    history.push_state(&records, "capture");

    records[0].speaker = "changed after capture".to_string();

    assert_eq!(history.current().records[0].speaker, "");
}
