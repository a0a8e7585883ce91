#![forbid(unsafe_code)]
use chrono::{NaiveDate, NaiveTime};
use schichtplan::{
    model::{Employee, ShiftKind},
    scheduler::{DragSession, Edge, Planner, TimeBounds},
    timegrid, ShiftConfig,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn clock(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn duration_wraps_past_midnight_for_any_kind() {
    assert_eq!(timegrid::duration_hours(clock(22, 0), clock(6, 0)), 8.0);
    assert_eq!(timegrid::duration_hours(clock(6, 0), clock(14, 0)), 8.0);
    // auch eine Spätschicht, die per Resize über Mitternacht läuft
    assert_eq!(timegrid::duration_hours(clock(18, 0), clock(2, 0)), 8.0);
}

#[test]
fn snap_rounds_to_quarter_hours() {
    assert_eq!(timegrid::snap_to_grid(487, timegrid::GRID_MINUTES), 480);
    assert_eq!(timegrid::snap_to_grid(488, timegrid::GRID_MINUTES), 495);
    assert_eq!(timegrid::snap_to_grid(-8, timegrid::GRID_MINUTES), -15);
    assert_eq!(timegrid::snap_to_grid(0, timegrid::GRID_MINUTES), 0);
}

#[test]
fn resize_start_clamps_to_min_duration() {
    // 08:00–08:45: der Start darf höchstens bis 08:15 wandern
    let mut planner = Planner::new();
    let anna = Employee::new("Anna", "Müller", "#4f9d69");
    let anna_id = anna.id.clone();
    planner.add_employees(vec![anna]);

    let config = ShiftConfig::default();
    let id = planner
        .create_assignment(
            &anna_id,
            ShiftKind::Early,
            date(2026, 8, 26),
            Some((clock(8, 0), clock(8, 45))),
            &config,
        )
        .unwrap();
    let target = planner.roster().find_assignment(&id).unwrap().clone();

    let mut session = DragSession::resize(&target, Edge::Start);
    session.drag_by(120);
    assert_eq!(session.preview().start_time(), clock(8, 15));
    assert_eq!(session.preview().end_time(), clock(8, 45));

    planner.commit_drag(session, &config).unwrap();
    let stored = planner.roster().find_assignment(&id).unwrap();
    assert_eq!(stored.start, clock(8, 15));
}

#[test]
fn resize_start_never_before_midnight() {
    let bounds = TimeBounds::from_times(clock(0, 30), clock(4, 0));
    let resized = schichtplan::scheduler::resize_edge(bounds, Edge::Start, -120);
    assert_eq!(resized.start, 0);
}

#[test]
fn resize_end_never_past_midnight() {
    let bounds = TimeBounds::from_times(clock(20, 0), clock(23, 30));
    let resized = schichtplan::scheduler::resize_edge(bounds, Edge::End, 120);
    assert_eq!(resized.end, timegrid::DAY_MINUTES);
}

#[test]
fn resize_snaps_the_moving_edge() {
    let bounds = TimeBounds::from_times(clock(8, 0), clock(12, 0));
    let resized = schichtplan::scheduler::resize_edge(bounds, Edge::Start, 7);
    assert_eq!(resized.start, 480);
    let resized = schichtplan::scheduler::resize_edge(bounds, Edge::Start, 8);
    assert_eq!(resized.start, 495);
}

#[test]
fn move_preserves_duration() {
    let bounds = TimeBounds::from_times(clock(8, 0), clock(16, 30));
    let moved = schichtplan::scheduler::shift_by(bounds, 37);
    assert_eq!(moved.duration_minutes(), bounds.duration_minutes());
    assert_eq!(moved.start, 510); // 08:30
}

#[test]
fn move_to_other_slot_keeps_times() {
    let mut planner = Planner::new();
    let ben = Employee::new("Ben", "Schmidt", "#d08114");
    let ben_id = ben.id.clone();
    planner.add_employees(vec![ben]);

    let config = ShiftConfig::default();
    let id = planner
        .create_assignment(&ben_id, ShiftKind::Early, date(2026, 8, 26), None, &config)
        .unwrap();
    let target = planner.roster().find_assignment(&id).unwrap().clone();

    let mut session = DragSession::move_of(&target);
    session.drop_on(date(2026, 8, 27), ShiftKind::Late);

    let candidate = planner.candidate_from(&session, &config).unwrap();
    assert!(planner.check(&candidate, &config).unwrap().is_empty());

    planner.commit_drag(session, &config).unwrap();
    let stored = planner.roster().find_assignment(&id).unwrap();
    assert_eq!(stored.date, date(2026, 8, 27));
    assert_eq!(stored.kind, ShiftKind::Late);
    assert_eq!(stored.start, target.start);
    assert_eq!(stored.end, target.end);
}

#[test]
fn placement_commit_creates_assignment() {
    let mut planner = Planner::new();
    let anna = Employee::new("Anna", "Müller", "#4f9d69");
    let anna_id = anna.id.clone();
    planner.add_employees(vec![anna]);

    let config = ShiftConfig::default();
    let session = DragSession::placement(
        anna_id.clone(),
        date(2026, 8, 26),
        ShiftKind::Night,
        config.window(ShiftKind::Night),
    );
    let id = planner.commit_drag(session, &config).unwrap();

    let stored = planner.roster().find_assignment(&id).unwrap();
    assert_eq!(stored.employee, anna_id);
    assert_eq!(stored.start, clock(22, 0));
    assert_eq!(stored.end, clock(6, 0));
}

#[test]
fn abandoned_drag_changes_nothing() {
    let mut planner = Planner::new();
    let anna = Employee::new("Anna", "Müller", "#4f9d69");
    let anna_id = anna.id.clone();
    planner.add_employees(vec![anna]);

    let config = ShiftConfig::default();
    let id = planner
        .create_assignment(&anna_id, ShiftKind::Early, date(2026, 8, 26), None, &config)
        .unwrap();
    let target = planner.roster().find_assignment(&id).unwrap().clone();

    {
        let mut session = DragSession::resize(&target, Edge::End);
        session.drag_by(-90);
        // kein Commit: Vorschau wird verworfen
    }

    let stored = planner.roster().find_assignment(&id).unwrap();
    assert_eq!(stored.start, target.start);
    assert_eq!(stored.end, target.end);
}
