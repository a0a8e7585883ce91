use super::{Conflict, ConflictKind, Severity};
use crate::model::{Employee, ShiftAssignment, ShiftKind};
use crate::settings::ShiftConfig;
use crate::timegrid;
use chrono::Duration;

const MIN_REST_HOURS: u32 = 11;
const OVERTIME_EPSILON: f64 = 1e-9;

/// Prüft einen Kandidaten gegen den bestehenden Plan. Reine Funktion,
/// hebt nie ab — keine Konflikte heißt leere Liste. Reihenfolge:
/// Doppelbuchung (Fehler), Mehrfachschicht, Ruhezeit, Überstunden.
pub(super) fn detect(
    candidate: &ShiftAssignment,
    existing: &[ShiftAssignment],
    employee: &Employee,
    config: &ShiftConfig,
) -> Vec<Conflict> {
    let mut out = Vec::new();

    // Zuteilungen desselben Mitarbeiters, die zählen; der Kandidat selbst
    // ist ausgenommen (Neubewertung nach Move/Resize).
    let relevant: Vec<&ShiftAssignment> = existing
        .iter()
        .filter(|a| a.employee == candidate.employee && a.id != candidate.id && a.counts())
        .collect();

    if let Some(taken) = relevant
        .iter()
        .find(|a| a.date == candidate.date && a.kind == candidate.kind)
    {
        out.push(Conflict {
            kind: ConflictKind::DoubleBooking,
            severity: Severity::Error,
            message: format!(
                "{} is already assigned to the {} shift on {} ({}–{})",
                employee.full_name(),
                taken.kind,
                taken.date,
                taken.start.format("%H:%M"),
                taken.end.format("%H:%M"),
            ),
            employee: Some(candidate.employee.clone()),
            date: candidate.date,
            shift: candidate.kind,
        });
    }

    let same_day_other_kind = relevant
        .iter()
        .filter(|a| a.date == candidate.date && a.kind != candidate.kind)
        .count();
    if same_day_other_kind > 0 {
        let total = same_day_other_kind + 1;
        let label = match total {
            2 => "double shift".to_string(),
            3 => "triple shift".to_string(),
            n => format!("{n}-fold shift"),
        };
        out.push(Conflict {
            kind: ConflictKind::MultipleShift,
            severity: Severity::Warning,
            message: format!(
                "{label}: {} already has {} other shift(s) on {}",
                employee.full_name(),
                same_day_other_kind,
                candidate.date,
            ),
            employee: Some(candidate.employee.clone()),
            date: candidate.date,
            shift: candidate.kind,
        });
    }

    // Ruhezeit-Heuristik: Nachtschicht am Vortag vor einer Frühschicht
    // unterschreitet die 11 Stunden immer.
    if candidate.kind == ShiftKind::Early {
        let previous_day = candidate.date - Duration::days(1);
        if let Some(night) = relevant
            .iter()
            .find(|a| a.date == previous_day && a.kind == ShiftKind::Night)
        {
            out.push(Conflict {
                kind: ConflictKind::RestPeriod,
                severity: Severity::Warning,
                message: format!(
                    "less than {MIN_REST_HOURS} hours rest: night shift on {} ends {}, early shift starts {}",
                    night.date,
                    night.end.format("%H:%M"),
                    candidate.start.format("%H:%M"),
                ),
                employee: Some(candidate.employee.clone()),
                date: candidate.date,
                shift: candidate.kind,
            });
        }
    }

    let (monday, sunday) = timegrid::week_bounds(candidate.date);
    let week_hours: f64 = relevant
        .iter()
        .filter(|a| a.date >= monday && a.date <= sunday)
        .map(|a| a.duration_hours())
        .sum();
    let candidate_hours = candidate_duration_hours(candidate, config);
    let total = week_hours + candidate_hours;
    if total > employee.max_hours_per_week + OVERTIME_EPSILON {
        out.push(Conflict {
            kind: ConflictKind::Overtime,
            severity: Severity::Warning,
            message: format!(
                "{:.1}h planned for {} in week of {monday} exceeds the limit of {:.1}h",
                total,
                employee.full_name(),
                employee.max_hours_per_week,
            ),
            employee: Some(candidate.employee.clone()),
            date: candidate.date,
            shift: candidate.kind,
        });
    }

    out
}

/// Dauer des Kandidaten: explizite Grenzen, bei degenerierten Grenzen
/// (noch nicht gefüllt) das nominale Fenster seiner Schichtart.
fn candidate_duration_hours(candidate: &ShiftAssignment, config: &ShiftConfig) -> f64 {
    if candidate.start == candidate.end {
        let window = config.window(candidate.kind);
        timegrid::duration_hours(window.start, window.end)
    } else {
        candidate.duration_hours()
    }
}
