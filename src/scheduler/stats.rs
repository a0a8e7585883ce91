use crate::model::{Employee, EmployeeId, ShiftAssignment, ShiftKind};
use crate::settings::ShiftConfig;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

/// Unterbesetzter (Tag, Schichtart)-Slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Understaffing {
    pub date: NaiveDate,
    pub shift: ShiftKind,
    pub staffed: u32,
    pub required: u32,
}

/// Flüchtiges Wochenaggregat für das Dashboard.
#[derive(Debug, Clone)]
pub struct WeeklyStatistics {
    pub total_hours: f64,
    pub hours_by_employee: BTreeMap<EmployeeId, f64>,
    pub shifts_by_employee: BTreeMap<EmployeeId, u32>,
    pub understaffed: Vec<Understaffing>,
    /// Gleichverteilung der Wochenstunden, 0–100.
    pub fairness: u8,
}

/// Aggregiert eine Woche: Stunden und Schichtzahl je Mitarbeiter,
/// Unterbesetzung gegen die Mindestbesetzung, Fairness-Score.
/// Kranke/Urlauber bleiben in der Liste, zählen aber nicht.
pub(super) fn compute_weekly(
    assignments: &[ShiftAssignment],
    employees: &[Employee],
    config: &ShiftConfig,
) -> WeeklyStatistics {
    let mut hours_by_employee: BTreeMap<EmployeeId, f64> = BTreeMap::new();
    let mut shifts_by_employee: BTreeMap<EmployeeId, u32> = BTreeMap::new();
    // Nullzeilen für alle Mitarbeiter, auch ohne Einsätze in der Woche.
    for e in employees {
        hours_by_employee.insert(e.id.clone(), 0.0);
        shifts_by_employee.insert(e.id.clone(), 0);
    }

    let mut total_hours = 0.0;
    for a in assignments.iter().filter(|a| a.counts()) {
        let hours = a.duration_hours();
        total_hours += hours;
        *hours_by_employee.entry(a.employee.clone()).or_insert(0.0) += hours;
        *shifts_by_employee.entry(a.employee.clone()).or_insert(0) += 1;
    }

    // Nur Slots mit mindestens einer Zuteilung werden geprüft; ein ganz
    // leerer Slot gilt als "kein Versuch", nicht als Unterbesetzung.
    let slots: BTreeSet<(NaiveDate, ShiftKind)> =
        assignments.iter().map(|a| (a.date, a.kind)).collect();
    let mut understaffed = Vec::new();
    for (date, kind) in slots {
        let staffed = assignments
            .iter()
            .filter(|a| a.date == date && a.kind == kind && a.counts())
            .count() as u32;
        let required = config.window(kind).min_staffing;
        if staffed < required {
            understaffed.push(Understaffing {
                date,
                shift: kind,
                staffed,
                required,
            });
        }
    }

    let fairness = fairness_score(&hours_by_employee, employees);

    WeeklyStatistics {
        total_hours,
        hours_by_employee,
        shifts_by_employee,
        understaffed,
        fairness,
    }
}

/// Mittlere absolute Abweichung vom Mittelwert, normiert auf den
/// Mittelwert (gekappt bei 1.0). Bewusst keine Varianz: robuster bei
/// den kleinen Teams, um die es hier geht. Zählt nur aktive Mitarbeiter.
fn fairness_score(hours: &BTreeMap<EmployeeId, f64>, employees: &[Employee]) -> u8 {
    let active: Vec<f64> = employees
        .iter()
        .filter(|e| e.active)
        .map(|e| hours.get(&e.id).copied().unwrap_or(0.0))
        .collect();
    if active.len() <= 1 {
        return 100;
    }
    let mean = active.iter().sum::<f64>() / active.len() as f64;
    if mean == 0.0 {
        return 100;
    }
    let mad = active.iter().map(|h| (h - mean).abs()).sum::<f64>() / active.len() as f64;
    let normalized = (mad / mean).min(1.0);
    ((1.0 - normalized) * 100.0).round() as u8
}

/// Textzusammenfassung für CLI und Berichte. Mitarbeiter erscheinen in
/// Planreihenfolge, damit die Ausgabe stabil bleibt.
pub fn render_summary(stats: &WeeklyStatistics, employees: &[Employee]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "total hours: {:.1}", stats.total_hours);
    let _ = writeln!(out, "fairness: {}/100", stats.fairness);
    for e in employees {
        let hours = stats.hours_by_employee.get(&e.id).copied().unwrap_or(0.0);
        let shifts = stats.shifts_by_employee.get(&e.id).copied().unwrap_or(0);
        let _ = writeln!(out, "{}: {:.1}h / {} shift(s)", e.full_name(), hours, shifts);
    }
    if stats.understaffed.is_empty() {
        let _ = writeln!(out, "staffing: ok");
    } else {
        for u in &stats.understaffed {
            let _ = writeln!(
                out,
                "understaffed {} {}: {}/{}",
                u.date, u.shift, u.staffed, u.required
            );
        }
    }
    out
}
