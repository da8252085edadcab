//! End-to-end flows through the host controller: capture notes in the
//! editor, watch them land on the stack, pop them into the active task.

use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use notestack::app::App;
use notestack::event_loop::ControlFlow;

const MS: Duration = Duration::from_millis(1);

fn key(code: KeyCode, mods: KeyModifiers) -> Event {
    Event::Key(KeyEvent::new(code, mods))
}

fn submit_note(app: &mut App, text: &str, now: Instant) {
    app.on_event(&key(KeyCode::Char('n'), KeyModifiers::CONTROL), now);
    for c in text.chars() {
        app.on_event(&key(KeyCode::Char(c), KeyModifiers::NONE), now);
    }
    app.on_event(&key(KeyCode::Enter, KeyModifiers::NONE), now);
    app.on_tick(now);
}

fn contents(app: &App) -> Vec<String> {
    app.panel()
        .stack()
        .entries()
        .iter()
        .map(|e| e.body().raw().to_owned())
        .collect()
}

#[test]
fn notes_arrive_in_submission_order() {
    let mut app = App::new(1000 * MS);
    let start = Instant::now();
    submit_note(&mut app, "first", start);
    submit_note(&mut app, "second", start + 10 * MS);
    submit_note(&mut app, "third", start + 20 * MS);
    assert_eq!(contents(&app), ["first", "second", "third"]);
    assert_eq!(app.panel().stack().count(), 3);
}

#[test]
fn panel_expands_on_submit_and_collapses_after_idle() {
    let mut app = App::new(1000 * MS);
    let start = Instant::now();
    submit_note(&mut app, "note", start);
    assert!(app.panel().is_expanded());

    // a second submission inside the window pushes the deadline out
    submit_note(&mut app, "another", start + 600 * MS);
    app.on_tick(start + 1200 * MS);
    assert!(app.panel().is_expanded());
    app.on_tick(start + 1600 * MS);
    assert!(!app.panel().is_expanded());
}

#[test]
fn pop_clear_lifecycle() {
    let mut app = App::new(1000 * MS);
    let start = Instant::now();
    submit_note(&mut app, "one", start);
    submit_note(&mut app, "two", start + 10 * MS);

    let pop = key(KeyCode::Char('p'), KeyModifiers::CONTROL);
    app.on_event(&pop, start + 20 * MS);
    assert_eq!(app.panel().stack().count(), 1);
    let active = app.panel().stack().active_task().unwrap();
    assert_eq!(active.body().raw(), "two");

    // popping again silently replaces the active task
    app.on_event(&pop, start + 30 * MS);
    assert_eq!(app.panel().stack().count(), 0);
    let active = app.panel().stack().active_task().unwrap();
    assert_eq!(active.body().raw(), "one");

    // with the stack empty the same binding clears the slot
    app.on_event(&pop, start + 40 * MS);
    assert!(app.panel().stack().active_task().is_none());

    // and once everything is gone it is a no-op
    app.on_event(&pop, start + 50 * MS);
    assert!(app.panel().stack().active_task().is_none());
    assert_eq!(app.panel().stack().count(), 0);
}

#[test]
fn submitted_note_ids_are_unique_across_pops() {
    let mut app = App::new(1000 * MS);
    let start = Instant::now();
    submit_note(&mut app, "a", start);
    app.on_event(&key(KeyCode::Char('p'), KeyModifiers::CONTROL), start);
    submit_note(&mut app, "b", start + 10 * MS);

    let popped = app.panel().stack().active_task().unwrap().id();
    let remaining = app.panel().stack().entries()[0].id();
    assert_ne!(popped, remaining);
}

#[test]
fn editor_escape_hides_without_submitting() {
    let mut app = App::new(1000 * MS);
    let now = Instant::now();
    app.on_event(&key(KeyCode::Char('n'), KeyModifiers::CONTROL), now);
    assert!(app.is_editor_visible());
    for c in "draft".chars() {
        app.on_event(&key(KeyCode::Char(c), KeyModifiers::NONE), now);
    }
    app.on_event(&key(KeyCode::Esc, KeyModifiers::NONE), now);
    app.on_tick(now);
    assert!(!app.is_editor_visible());
    assert_eq!(app.panel().stack().count(), 0);
}

#[test]
fn rapid_resubmit_during_settle_is_dropped() {
    let mut app = App::new(1000 * MS);
    let start = Instant::now();
    app.on_event(&key(KeyCode::Char('n'), KeyModifiers::CONTROL), start);
    for c in "kept".chars() {
        app.on_event(&key(KeyCode::Char(c), KeyModifiers::NONE), start);
    }
    // two Enters land before the host processes either; only the first
    // submission survives the settle guard
    app.on_event(&key(KeyCode::Enter, KeyModifiers::NONE), start);
    app.on_event(&key(KeyCode::Enter, KeyModifiers::NONE), start);
    app.on_tick(start + MS);
    assert_eq!(app.panel().stack().count(), 1);
}

#[test]
fn quit_binding_returns_quit_flow() {
    let mut app = App::new(1000 * MS);
    let flow = app.on_event(
        &key(KeyCode::Char('q'), KeyModifiers::CONTROL),
        Instant::now(),
    );
    assert!(matches!(flow, ControlFlow::Quit));
}
