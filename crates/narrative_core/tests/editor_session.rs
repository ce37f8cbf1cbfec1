use narrative_core::{
    ClickMode, DialogueEvent, EditorConfig, EditorSession, ManualClock, RecordField, StoreError,
};
use std::rc::Rc;

fn seed() -> Vec<DialogueEvent> {
    (1..=3)
        .map(|id| {
            let mut record = DialogueEvent::with_id(id);
            record.speaker = format!("speaker {id}");
            record.mission = "Harbor".to_string();
            record
        })
        .collect()
}

fn setup() -> (Rc<ManualClock>, EditorSession<Rc<ManualClock>>) {
    let clock = Rc::new(ManualClock::at_epoch());
    let session = EditorSession::with_clock(seed(), EditorConfig::default(), Rc::clone(&clock))
        .expect("seed records are valid");
    (clock, session)
}

#[test]
fn new_session_seeds_history_with_initial_state() {
    let (_clock, session) = setup();

    assert_eq!(session.history().len(), 1);
    assert!(!session.can_undo());
    assert!(!session.can_redo());
    assert_eq!(session.undo_label(), "initial");
    assert_eq!(session.redo_label(), "");
}

#[test]
fn edit_then_undo_and_redo_swap_record_sets() {
    let (clock, mut session) = setup();

    clock.advance_ms(600);
    assert!(session.edit_field(1, RecordField::Speaker, "Harper"));
    assert!(session.can_undo());
    assert_eq!(session.undo_label(), "edit speaker");

    assert!(session.undo());
    assert_eq!(session.store().get(1).map(|r| r.speaker.as_str()), Some("speaker 1"));
    assert_eq!(session.redo_label(), "edit speaker");

    assert!(session.redo());
    assert_eq!(session.store().get(1).map(|r| r.speaker.as_str()), Some("Harper"));
    assert!(!session.redo());
}

#[test]
fn undo_and_redo_never_push_history() {
    let (clock, mut session) = setup();
    clock.advance_ms(600);
    session.edit_field(2, RecordField::Zone, "Dock");
    clock.advance_ms(600);
    session.edit_field(2, RecordField::Zone, "Pier");
    assert_eq!(session.history().len(), 3);

    clock.advance_ms(600);
    session.undo();
    clock.advance_ms(600);
    session.undo();
    clock.advance_ms(600);
    session.redo();

    assert_eq!(session.history().len(), 3);
    assert_eq!(session.history().cursor(), 1);
    assert_eq!(session.store().get(2).map(|r| r.zone.as_str()), Some("Dock"));
}

#[test]
fn rapid_edits_collapse_into_first_snapshot() {
    let (clock, mut session) = setup();

    clock.advance_ms(600);
    session.edit_field(1, RecordField::Notes, "a");
    clock.advance_ms(100);
    session.edit_field(1, RecordField::Notes, "ab");

    assert_eq!(session.history().len(), 2);
    assert_eq!(session.store().get(1).map(|r| r.notes.as_str()), Some("ab"));
    let captured = &session.history().current().records;
    assert_eq!(captured[0].notes, "a");
}

#[test]
fn edit_of_missing_record_is_a_noop() {
    let (clock, mut session) = setup();
    clock.advance_ms(600);

    assert!(!session.edit_field(99, RecordField::Speaker, "ghost"));
    assert_eq!(session.history().len(), 1);
}

#[test]
fn delete_selected_is_undoable() {
    let (clock, mut session) = setup();
    session.click_row(1, ClickMode::Plain);
    session.click_row(3, ClickMode::Toggle);

    clock.advance_ms(600);
    assert_eq!(session.delete_selected(), 2);
    assert_eq!(session.store().ids(), vec![2]);
    assert!(session.selection().is_empty());

    assert!(session.undo());
    assert_eq!(session.store().ids(), vec![1, 2, 3]);
}

#[test]
fn undo_never_lets_identifiers_be_reissued() {
    let (clock, mut session) = setup();

    clock.advance_ms(600);
    assert_eq!(session.add_blank_record(), Some(4));
    session.undo();
    assert_eq!(session.store().ids(), vec![1, 2, 3]);

    clock.advance_ms(600);
    assert_eq!(session.add_blank_record(), Some(5));
}

#[test]
fn undo_drops_selection_of_vanished_records() {
    let (clock, mut session) = setup();
    clock.advance_ms(600);
    let added = session.add_blank_record().expect("ids available");
    session.click_row(added, ClickMode::Plain);

    session.undo();

    assert!(session.selection().is_empty());
}

#[test]
fn copy_requires_focus_or_selection() {
    let (_clock, mut session) = setup();
    assert!(!session.copy());

    session.click_row(2, ClickMode::Plain);
    assert!(session.copy());
    assert_eq!(session.clipboard().source_ids(), vec![2]);
}

#[test]
fn copy_multiple_rows_uses_table_order() {
    let (_clock, mut session) = setup();
    session.click_row(3, ClickMode::Plain);
    session.click_row(1, ClickMode::Toggle);

    session.copy();

    assert_eq!(session.clipboard().source_ids(), vec![1, 3]);
}

#[test]
fn escape_clears_selection_focus_and_clipboard() {
    let (_clock, mut session) = setup();
    session.select_all();
    session.copy();
    session.focus_cell(1, RecordField::Zone);

    session.escape();

    assert!(session.selection().is_empty());
    assert_eq!(session.selection().focused(), None);
    assert!(session.clipboard().is_empty());
}

#[test]
fn select_all_and_header_checkbox() {
    let (_clock, mut session) = setup();
    session.set_all_checked(true);
    assert_eq!(session.selection().len(), 3);

    session.set_checked(2, false);
    assert!(!session.selection().is_selected(2));

    session.set_all_checked(false);
    assert!(session.selection().is_empty());

    session.focus_cell(3, RecordField::Trigger);
    session.select_focused_row();
    assert!(session.selection().is_selected(3));
}

#[test]
fn added_records_use_configured_defaults() {
    let clock = Rc::new(ManualClock::at_epoch());
    let config = EditorConfig::from_json_str(r#"{"defaults":{"creator":"Narrative Team"}}"#)
        .expect("config should parse");
    let mut session = EditorSession::with_clock(Vec::new(), config, Rc::clone(&clock))
        .expect("empty record set is valid");

    let id = session.add_blank_record().expect("ids available");

    let record = session.store().get(id).expect("record exists");
    assert_eq!(id, 1);
    assert_eq!(record.creator, "Narrative Team");
    assert_eq!(record.game_status, "Not Started");
    assert_eq!(record.created_at, "2024-01-01T00:00:00.000Z");
}

#[test]
fn sessions_do_not_share_state() {
    let (_clock_a, mut first) = setup();
    let (_clock_b, second) = setup();

    first.click_row(1, ClickMode::Plain);
    first.copy();

    assert!(second.clipboard().is_empty());
    assert_eq!(second.history().len(), 1);
}

#[test]
fn loaded_records_must_have_unique_ids() {
    let records: Vec<DialogueEvent> =
        serde_json::from_str(r#"[{"id":1,"speaker":"A"},{"id":1,"speaker":"B"}]"#)
            .expect("json is well formed");
    let clock = Rc::new(ManualClock::at_epoch());

    let session = EditorSession::with_clock(records, EditorConfig::default(), clock);

    assert_eq!(session.err(), Some(StoreError::DuplicateId(1)));
    assert!(serde_json::from_str::<Vec<DialogueEvent>>(r#"[{"speaker":"A"}]"#).is_err());
}

#[test]
fn exhausted_id_space_makes_adds_no_ops() {
    let clock = Rc::new(ManualClock::at_epoch());
    let mut session = EditorSession::with_clock(
        vec![DialogueEvent::with_id(u64::MAX - 1)],
        EditorConfig::default(),
        Rc::clone(&clock),
    )
    .expect("largest allowed id loads");

    clock.advance_ms(600);
    assert_eq!(session.add_blank_record(), None);
    assert!(session.add_drafts(&[Default::default()]).is_empty());

    assert_eq!(session.records().len(), 1);
    assert_eq!(session.history().len(), 1);
}
