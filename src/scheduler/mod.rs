mod conflicts;
mod layout;
mod mutate;
mod stats;
mod types;
mod util;

pub use layout::{layout_day, SlotLayout};
pub use mutate::{resize_edge, shift_by, DragKind, DragSession, Edge, TimeBounds};
pub use stats::{render_summary, Understaffing, WeeklyStatistics};
pub use types::{has_blocking, Conflict, ConflictKind, SchedError, Severity};

use crate::model::{
    AssignmentId, AssignmentStatus, Employee, EmployeeId, Roster, ShiftAssignment, ShiftKind,
};
use crate::settings::ShiftConfig;
use crate::timegrid;
use anyhow::anyhow;
use chrono::{NaiveDate, NaiveTime, Utc};

/// Planner: hält den maßgeblichen Plan im Speicher und bündelt die
/// Engine-Aufrufe. Ablauf je Mutation: Kandidat bauen → `check` →
/// bei Warnungen bestätigen lassen → übernehmen → Statistik/Layout
/// der betroffenen Tage neu rechnen.
#[derive(Debug, Default)]
pub struct Planner {
    roster: Roster,
}

impl Planner {
    pub fn new() -> Self {
        Self {
            roster: Roster::default(),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn add_employees(&mut self, employees: Vec<Employee>) {
        self.roster.employees.extend(employees);
    }

    /// Baut einen Kandidaten, ohne ihn zu übernehmen. Fehlende
    /// Zeitgrenzen werden aus dem nominalen Fenster der Schichtart
    /// gefüllt (Invariante: persistierte Zuteilungen haben immer
    /// explizite Grenzen).
    pub fn build_assignment(
        &self,
        employee: &EmployeeId,
        kind: ShiftKind,
        date: NaiveDate,
        bounds: Option<(NaiveTime, NaiveTime)>,
        config: &ShiftConfig,
    ) -> Result<ShiftAssignment, SchedError> {
        let e = self
            .roster
            .find_employee(employee)
            .ok_or_else(|| SchedError::UnknownEmployee(employee.as_str().to_string()))?;
        if !e.active {
            return Err(SchedError::InactiveEmployee(e.full_name()));
        }
        let (start, end) = bounds.unwrap_or_else(|| {
            let w = config.window(kind);
            (w.start, w.end)
        });
        ShiftAssignment::new(employee.clone(), kind, date, start, end)
            .map_err(|_| SchedError::DurationTooShort)
    }

    /// Prüft einen Kandidaten gegen den aktuellen Plan. Nur
    /// `Severity::Error` blockiert; Warnungen sind nach Bestätigung
    /// übernehmbar.
    pub fn check(
        &self,
        candidate: &ShiftAssignment,
        config: &ShiftConfig,
    ) -> Result<Vec<Conflict>, SchedError> {
        let employee = self
            .roster
            .find_employee(&candidate.employee)
            .ok_or_else(|| SchedError::UnknownEmployee(candidate.employee.as_str().to_string()))?;
        Ok(conflicts::detect(
            candidate,
            &self.roster.assignments,
            employee,
            config,
        ))
    }

    /// Übernimmt einen (bereits geprüften) Kandidaten.
    pub fn insert(&mut self, assignment: ShiftAssignment) -> AssignmentId {
        let id = assignment.id.clone();
        self.roster.assignments.push(assignment);
        id
    }

    /// Bauen + übernehmen in einem Schritt; die Konfliktprüfung bleibt
    /// Sache des Aufrufers.
    pub fn create_assignment(
        &mut self,
        employee: &EmployeeId,
        kind: ShiftKind,
        date: NaiveDate,
        bounds: Option<(NaiveTime, NaiveTime)>,
        config: &ShiftConfig,
    ) -> Result<AssignmentId, SchedError> {
        let assignment = self.build_assignment(employee, kind, date, bounds, config)?;
        Ok(self.insert(assignment))
    }

    /// Kandidat, der beim Commit der Drag-Interaktion entstünde —
    /// zum Prüfen vor dem Loslassen.
    pub fn candidate_from(
        &self,
        session: &DragSession,
        config: &ShiftConfig,
    ) -> Result<ShiftAssignment, SchedError> {
        let preview = session.preview();
        match &session.kind {
            DragKind::Placement { employee } => self.build_assignment(
                employee,
                session.shift,
                session.date,
                Some((preview.start_time(), preview.end_time())),
                config,
            ),
            DragKind::Move | DragKind::Resize(_) => {
                let id = session
                    .assignment
                    .as_ref()
                    .ok_or_else(|| SchedError::NotFound("drag session without target".into()))?;
                let mut candidate = self
                    .roster
                    .find_assignment(id)
                    .ok_or_else(|| SchedError::NotFound(id.as_str().to_string()))?
                    .clone();
                candidate.date = session.date;
                candidate.kind = session.shift;
                candidate.start = preview.start_time();
                candidate.end = preview.end_time();
                Ok(candidate)
            }
        }
    }

    /// Übernimmt eine beendete Drag-Interaktion in den Plan. Erst beim
    /// Loslassen aufrufen — Zwischenbewegungen bleiben reine Vorschau.
    pub fn commit_drag(
        &mut self,
        session: DragSession,
        config: &ShiftConfig,
    ) -> Result<AssignmentId, SchedError> {
        let candidate = self.candidate_from(&session, config)?;
        match session.kind {
            DragKind::Placement { .. } => Ok(self.insert(candidate)),
            DragKind::Move | DragKind::Resize(_) => {
                let stored = self
                    .roster
                    .find_assignment_mut(&candidate.id)
                    .ok_or_else(|| SchedError::NotFound(candidate.id.as_str().to_string()))?;
                stored.date = candidate.date;
                stored.kind = candidate.kind;
                stored.start = candidate.start;
                stored.end = candidate.end;
                stored.updated_at = Utc::now();
                Ok(candidate.id)
            }
        }
    }

    pub fn set_status(
        &mut self,
        id: &AssignmentId,
        status: AssignmentStatus,
    ) -> Result<(), SchedError> {
        let a = self
            .roster
            .find_assignment_mut(id)
            .ok_or_else(|| SchedError::NotFound(id.as_str().to_string()))?;
        a.status = status;
        a.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_note(&mut self, id: &AssignmentId, note: Option<String>) -> Result<(), SchedError> {
        let a = self
            .roster
            .find_assignment_mut(id)
            .ok_or_else(|| SchedError::NotFound(id.as_str().to_string()))?;
        a.note = note;
        a.updated_at = Utc::now();
        Ok(())
    }

    pub fn delete_assignment(&mut self, id: &AssignmentId) -> Result<(), SchedError> {
        let before = self.roster.assignments.len();
        self.roster.assignments.retain(|a| &a.id != id);
        if self.roster.assignments.len() == before {
            return Err(SchedError::NotFound(id.as_str().to_string()));
        }
        Ok(())
    }

    /// Deaktiviert einen Mitarbeiter: keine neuen Zuteilungen mehr,
    /// bestehende bleiben erhalten.
    pub fn deactivate_employee(&mut self, id: &EmployeeId) -> Result<(), SchedError> {
        let e = self
            .roster
            .find_employee_mut(id)
            .ok_or_else(|| SchedError::UnknownEmployee(id.as_str().to_string()))?;
        e.active = false;
        Ok(())
    }

    /// Entfernt einen Mitarbeiter endgültig, kaskadiert auf alle seine
    /// Zuteilungen. Liefert die Anzahl entfernter Zuteilungen.
    pub fn remove_employee(&mut self, id: &EmployeeId) -> Result<usize, SchedError> {
        if self.roster.find_employee(id).is_none() {
            return Err(SchedError::UnknownEmployee(id.as_str().to_string()));
        }
        let before = self.roster.assignments.len();
        self.roster.assignments.retain(|a| &a.employee != id);
        self.roster.employees.retain(|e| &e.id != id);
        Ok(before - self.roster.assignments.len())
    }

    /// Kopiert alle Zuteilungen der Woche von `from` in die Woche von
    /// `to` (Status wieder `planned`, frische Ids). Jede Kopie ist eine
    /// unabhängige Einheit — kein Rollback über die Woche hinweg.
    pub fn copy_week(
        &mut self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AssignmentId>, SchedError> {
        let monday_from = timegrid::week_monday(from);
        let monday_to = timegrid::week_monday(to);
        if monday_from == monday_to {
            return Err(SchedError::Other(anyhow!(
                "source and target week are identical"
            )));
        }
        let offset = monday_to - monday_from;
        let source: Vec<ShiftAssignment> = self
            .roster
            .assignments
            .iter()
            .filter(|a| timegrid::same_week(a.date, monday_from))
            .cloned()
            .collect();
        let mut created = Vec::with_capacity(source.len());
        for a in source {
            let mut copy = ShiftAssignment::new(
                a.employee.clone(),
                a.kind,
                a.date + offset,
                a.start,
                a.end,
            )
            .map_err(|_| SchedError::DurationTooShort)?;
            copy.note = a.note.clone();
            created.push(self.insert(copy));
        }
        Ok(created)
    }

    /// Spaltenlayout für einen Kalendertag (über alle Schichtarten,
    /// da sich Fenster nach manuellem Resize überlappen können).
    pub fn layout_day(&self, date: NaiveDate) -> Vec<SlotLayout> {
        let day: Vec<ShiftAssignment> = self
            .roster
            .assignments
            .iter()
            .filter(|a| a.date == date)
            .cloned()
            .collect();
        layout::layout_day(&day)
    }

    /// Wochenstatistik für die Montag–Sonntag-Woche von `week_of`,
    /// immer mit der aktuell übergebenen Konfiguration gerechnet.
    pub fn weekly_statistics(&self, week_of: NaiveDate, config: &ShiftConfig) -> WeeklyStatistics {
        let week: Vec<ShiftAssignment> = self
            .roster
            .assignments
            .iter()
            .filter(|a| timegrid::same_week(a.date, week_of))
            .cloned()
            .collect();
        stats::compute_weekly(&week, &self.roster.employees, config)
    }
}
