use crate::model::{AssignmentId, EmployeeId, ShiftAssignment, ShiftKind};
use crate::settings::ShiftWindow;
use crate::timegrid::{self, DAY_MINUTES, GRID_MINUTES, MIN_DURATION_MINUTES};
use chrono::{NaiveDate, NaiveTime};

/// Gezogene Kante beim Resize; die Gegenkante bleibt fest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
}

/// Zeitgrenzen in "entrollten" Minuten: `end` liegt in `(start, start+1440]`
/// und darf für Schichten über Mitternacht 1440 überschreiten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBounds {
    pub start: i64,
    pub end: i64,
}

impl TimeBounds {
    pub fn new(start: i64, end: i64) -> Self {
        debug_assert!(end > start);
        Self { start, end }
    }

    pub fn of(assignment: &ShiftAssignment) -> Self {
        Self::from_times(assignment.start, assignment.end)
    }

    pub fn from_times(start: NaiveTime, end: NaiveTime) -> Self {
        let s = timegrid::minute_of_day(start);
        let mut e = timegrid::minute_of_day(end);
        if e <= s {
            e += DAY_MINUTES;
        }
        Self { start: s, end: e }
    }

    pub fn duration_minutes(&self) -> i64 {
        self.end - self.start
    }

    /// Läuft das Intervall über Mitternacht?
    pub fn wraps(&self) -> bool {
        self.end > DAY_MINUTES
    }

    pub fn start_time(&self) -> NaiveTime {
        // start liegt nach den Klammerungen immer in [0, 1440)
        timegrid::from_minutes(self.start.rem_euclid(DAY_MINUTES))
            .unwrap_or_else(|_| NaiveTime::from_hms_opt(0, 0, 0).unwrap())
    }

    pub fn end_time(&self) -> NaiveTime {
        timegrid::from_minutes(self.end.rem_euclid(DAY_MINUTES))
            .unwrap_or_else(|_| NaiveTime::from_hms_opt(0, 0, 0).unwrap())
    }
}

/// Verschiebt eine Kante um `delta` Minuten, gerastert. Die bewegliche
/// Kante kommt der festen nie näher als die Mindestdauer; der Start
/// bleibt ≥ 00:00, das Ende ≤ 24:00 (bzw. ≤ 24 h nach Start bei
/// Mitternachtsübergang).
pub fn resize_edge(origin: TimeBounds, edge: Edge, delta: i64) -> TimeBounds {
    match edge {
        Edge::Start => {
            let snapped = timegrid::snap_to_grid(origin.start + delta, GRID_MINUTES);
            let start = snapped.clamp(0, origin.end - MIN_DURATION_MINUTES);
            TimeBounds {
                start,
                end: origin.end,
            }
        }
        Edge::End => {
            let max_end = if origin.wraps() {
                origin.start + DAY_MINUTES
            } else {
                DAY_MINUTES
            };
            let snapped = timegrid::snap_to_grid(origin.end + delta, GRID_MINUTES);
            let end = snapped.clamp(origin.start + MIN_DURATION_MINUTES, max_end);
            TimeBounds {
                start: origin.start,
                end,
            }
        }
    }
}

/// Verschiebt den ganzen Block um `delta` Minuten; die Dauer bleibt
/// erhalten. Ohne Mitternachtsübergang bleibt der Block im Tag.
pub fn shift_by(origin: TimeBounds, delta: i64) -> TimeBounds {
    let duration = origin.duration_minutes();
    let snapped = timegrid::snap_to_grid(origin.start + delta, GRID_MINUTES);
    let max_start = if origin.wraps() {
        DAY_MINUTES - GRID_MINUTES
    } else {
        DAY_MINUTES - duration
    };
    let start = snapped.clamp(0, max_start);
    TimeBounds {
        start,
        end: start + duration,
    }
}

/// Art der laufenden Interaktion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragKind {
    /// Mitarbeiter wird auf einen Tag/Schichtart-Slot gezogen.
    Placement { employee: EmployeeId },
    /// Bestehende Zuteilung wandert auf einen anderen Slot oder eine
    /// andere Uhrzeit.
    Move,
    /// Eine Kante einer bestehenden Zuteilung wird gezogen.
    Resize(Edge),
}

/// Kurzlebiges Wertobjekt für eine laufende Drag-Interaktion. Die
/// Vorschau lebt nur hier; der Plan wird erst beim Commit über den
/// [`Planner`](super::Planner) angefasst. Abbrechen heißt: Wert fallen
/// lassen.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub kind: DragKind,
    /// `None` bei Neuplatzierung.
    pub assignment: Option<AssignmentId>,
    pub date: NaiveDate,
    pub shift: ShiftKind,
    origin: TimeBounds,
    preview: TimeBounds,
}

impl DragSession {
    pub fn resize(assignment: &ShiftAssignment, edge: Edge) -> Self {
        let origin = TimeBounds::of(assignment);
        Self {
            kind: DragKind::Resize(edge),
            assignment: Some(assignment.id.clone()),
            date: assignment.date,
            shift: assignment.kind,
            origin,
            preview: origin,
        }
    }

    pub fn move_of(assignment: &ShiftAssignment) -> Self {
        let origin = TimeBounds::of(assignment);
        Self {
            kind: DragKind::Move,
            assignment: Some(assignment.id.clone()),
            date: assignment.date,
            shift: assignment.kind,
            origin,
            preview: origin,
        }
    }

    pub fn placement(
        employee: EmployeeId,
        date: NaiveDate,
        shift: ShiftKind,
        window: &ShiftWindow,
    ) -> Self {
        let origin = TimeBounds::from_times(window.start, window.end);
        Self {
            kind: DragKind::Placement { employee },
            assignment: None,
            date,
            shift,
            origin,
            preview: origin,
        }
    }

    /// Aktualisiert die Vorschau. `delta` ist der Gesamtversatz seit
    /// Beginn der Interaktion (nicht inkrementell), damit das Rastern
    /// sich nicht aufsummiert.
    pub fn drag_by(&mut self, delta: i64) {
        self.preview = match self.kind {
            DragKind::Resize(edge) => resize_edge(self.origin, edge, delta),
            DragKind::Move | DragKind::Placement { .. } => shift_by(self.origin, delta),
        };
    }

    /// Zielslot wechseln (Move/Placement über einen anderen Tag ziehen).
    pub fn drop_on(&mut self, date: NaiveDate, shift: ShiftKind) {
        self.date = date;
        self.shift = shift;
    }

    pub fn preview(&self) -> TimeBounds {
        self.preview
    }

    pub fn origin(&self) -> TimeBounds {
        self.origin
    }
}
