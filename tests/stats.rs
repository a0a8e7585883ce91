#![forbid(unsafe_code)]
use chrono::{NaiveDate, NaiveTime};
use schichtplan::{
    model::{AssignmentStatus, Employee, ShiftKind},
    render_summary,
    scheduler::Planner,
    ShiftConfig,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn clock(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn team() -> (Planner, Employee, Employee) {
    let mut planner = Planner::new();
    let anna = Employee::new("Anna", "Müller", "#4f9d69");
    let ben = Employee::new("Ben", "Schmidt", "#d08114");
    planner.add_employees(vec![anna.clone(), ben.clone()]);
    (planner, anna, ben)
}

#[test]
fn understaffed_slot_is_reported() {
    let (mut planner, anna, _ben) = team();
    let config = ShiftConfig::default(); // Früh verlangt 2

    planner
        .create_assignment(&anna.id, ShiftKind::Early, date(2026, 8, 24), None, &config)
        .unwrap();

    let stats = planner.weekly_statistics(date(2026, 8, 24), &config);
    assert_eq!(stats.understaffed.len(), 1);
    let u = &stats.understaffed[0];
    assert_eq!(u.date, date(2026, 8, 24));
    assert_eq!(u.shift, ShiftKind::Early);
    assert_eq!(u.staffed, 1);
    assert_eq!(u.required, 2);
}

#[test]
fn empty_slot_is_not_flagged() {
    let (planner, _anna, _ben) = team();
    let config = ShiftConfig::default();
    // keine Zuteilung = kein Versuch, keine Unterbesetzungsmeldung
    let stats = planner.weekly_statistics(date(2026, 8, 24), &config);
    assert!(stats.understaffed.is_empty());
}

#[test]
fn sick_and_vacation_excluded_but_listed() {
    let (mut planner, anna, ben) = team();
    let config = ShiftConfig::default();

    let id = planner
        .create_assignment(&anna.id, ShiftKind::Early, date(2026, 8, 24), None, &config)
        .unwrap();
    planner.set_status(&id, AssignmentStatus::Sick).unwrap();

    let stats = planner.weekly_statistics(date(2026, 8, 24), &config);
    assert_eq!(stats.total_hours, 0.0);
    assert_eq!(stats.hours_by_employee.get(&anna.id), Some(&0.0));
    assert_eq!(stats.shifts_by_employee.get(&anna.id), Some(&0));
    // auch der einsatzlose Kollege taucht mit Nullzeile auf
    assert_eq!(stats.hours_by_employee.get(&ben.id), Some(&0.0));
    // der kranke Versuch zählt als unterbesetzt: 0 von 2
    assert_eq!(stats.understaffed[0].staffed, 0);
}

#[test]
fn fairness_is_100_for_equal_hours() {
    let (mut planner, anna, ben) = team();
    let config = ShiftConfig::default();

    planner
        .create_assignment(&anna.id, ShiftKind::Early, date(2026, 8, 24), None, &config)
        .unwrap();
    planner
        .create_assignment(&ben.id, ShiftKind::Late, date(2026, 8, 24), None, &config)
        .unwrap();

    let stats = planner.weekly_statistics(date(2026, 8, 24), &config);
    assert_eq!(stats.fairness, 100);
}

#[test]
fn fairness_drops_when_hours_concentrate() {
    let (mut planner, anna, _ben) = team();
    let config = ShiftConfig::default();

    planner
        .create_assignment(&anna.id, ShiftKind::Early, date(2026, 8, 24), None, &config)
        .unwrap();
    planner
        .create_assignment(&anna.id, ShiftKind::Early, date(2026, 8, 25), None, &config)
        .unwrap();

    let stats = planner.weekly_statistics(date(2026, 8, 24), &config);
    assert!(stats.fairness < 100);
    // alles auf einer Person, eine zweite aktive mit 0h: maximal unfair
    assert_eq!(stats.fairness, 0);
}

#[test]
fn fairness_vacuous_for_single_employee() {
    let mut planner = Planner::new();
    let solo = Employee::new("Anna", "Müller", "#4f9d69");
    let solo_id = solo.id.clone();
    planner.add_employees(vec![solo]);
    let config = ShiftConfig::default();

    planner
        .create_assignment(&solo_id, ShiftKind::Early, date(2026, 8, 24), None, &config)
        .unwrap();

    let stats = planner.weekly_statistics(date(2026, 8, 24), &config);
    assert_eq!(stats.fairness, 100);
}

#[test]
fn inactive_employees_do_not_skew_fairness() {
    let (mut planner, anna, ben) = team();
    let config = ShiftConfig::default();

    planner
        .create_assignment(&anna.id, ShiftKind::Early, date(2026, 8, 24), None, &config)
        .unwrap();
    planner.deactivate_employee(&ben.id).unwrap();

    let stats = planner.weekly_statistics(date(2026, 8, 24), &config);
    // nur noch eine aktive Person: trivial fair
    assert_eq!(stats.fairness, 100);
}

#[test]
fn weekly_summary() {
    let (mut planner, anna, ben) = team();
    let config = ShiftConfig::default();

    planner
        .create_assignment(&anna.id, ShiftKind::Early, date(2026, 8, 24), None, &config)
        .unwrap();
    planner
        .create_assignment(&ben.id, ShiftKind::Late, date(2026, 8, 24), None, &config)
        .unwrap();

    let stats = planner.weekly_statistics(date(2026, 8, 24), &config);
    let summary = render_summary(&stats, &planner.roster().employees);
    insta::assert_snapshot!(summary);
}
