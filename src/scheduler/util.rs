use crate::model::ShiftAssignment;
use crate::timegrid;

/// Halb-offene Minutenintervalle `[start, end)`.
pub(super) fn overlaps(a: (i64, i64), b: (i64, i64)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Tagesintervall einer Zuteilung in Minuten. Läuft sie über Mitternacht
/// (`end <= start`), zählt für die Tagesansicht nur der Anteil bis 24:00.
pub(super) fn day_interval(a: &ShiftAssignment) -> (i64, i64) {
    let start = timegrid::minute_of_day(a.start);
    let end = timegrid::minute_of_day(a.end);
    if end <= start {
        (start, timegrid::DAY_MINUTES)
    } else {
        (start, end)
    }
}
