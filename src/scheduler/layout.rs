use super::util;
use crate::model::{AssignmentId, ShiftAssignment};

/// Spaltenzuordnung einer Zuteilung für die Tagesansicht.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotLayout {
    pub assignment: AssignmentId,
    /// Spaltenindex, beginnend bei 0.
    pub column: usize,
    /// Spaltenbreite der Überlappungsgruppe dieser Zuteilung.
    pub columns: usize,
}

/// Packt die Zuteilungen eines Kalendertags in nebeneinanderliegende
/// Spalten (Kalender-Layout). Deterministisch: gleiche Eingabe ergibt
/// stets dieselben Spalten, sortiert wird nach Startminute, bei
/// Gleichstand nach Eingabereihenfolge. Die Ergebnisliste folgt der
/// Eingabereihenfolge.
pub fn layout_day(assignments: &[ShiftAssignment]) -> Vec<SlotLayout> {
    let n = assignments.len();
    if n == 0 {
        return Vec::new();
    }

    let intervals: Vec<(i64, i64)> = assignments.iter().map(util::day_interval).collect();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| (intervals[i].0, i));

    // First-fit: erste Spalte ohne überlappenden Belegten, sonst neue.
    let mut columns: Vec<Vec<usize>> = Vec::new();
    let mut column_of = vec![0usize; n];
    for &i in &order {
        let slot = columns.iter_mut().enumerate().find(|(_, members)| {
            members
                .iter()
                .all(|&m| !util::overlaps(intervals[i], intervals[m]))
        });
        match slot {
            Some((col, members)) => {
                members.push(i);
                column_of[i] = col;
            }
            None => {
                columns.push(vec![i]);
                column_of[i] = columns.len() - 1;
            }
        }
    }

    // Zusammenhängende Überlappungsgruppen per Sweep über die sortierten
    // Intervalle; die Breite einer Gruppe ist ihre höchste Spalte + 1,
    // nicht die global angelegte Spaltenzahl.
    let mut total_of = vec![1usize; n];
    let mut group: Vec<usize> = Vec::new();
    let mut group_end = i64::MIN;
    let mut flush = |group: &mut Vec<usize>, total_of: &mut Vec<usize>| {
        if group.is_empty() {
            return;
        }
        let width = group.iter().map(|&i| column_of[i] + 1).max().unwrap_or(1);
        for &i in group.iter() {
            total_of[i] = width;
        }
        group.clear();
    };
    for &i in &order {
        let (start, end) = intervals[i];
        if start >= group_end {
            flush(&mut group, &mut total_of);
            group_end = end;
        } else {
            group_end = group_end.max(end);
        }
        group.push(i);
    }
    flush(&mut group, &mut total_of);

    assignments
        .iter()
        .enumerate()
        .map(|(i, a)| SlotLayout {
            assignment: a.id.clone(),
            column: column_of[i],
            columns: total_of[i],
        })
        .collect()
}
