use crate::model::{EmployeeId, ShiftKind};
use chrono::NaiveDate;
use thiserror::Error;

/// Schwere eines Konflikts. Nur `Error` blockiert das Übernehmen;
/// `Warning` verlangt eine ausdrückliche Bestätigung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    DoubleBooking,
    MultipleShift,
    RestPeriod,
    Overtime,
    Understaffing,
}

impl ConflictKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ConflictKind::DoubleBooking => "double-booking",
            ConflictKind::MultipleShift => "multiple-shift",
            ConflictKind::RestPeriod => "rest-period",
            ConflictKind::Overtime => "overtime",
            ConflictKind::Understaffing => "understaffing",
        }
    }
}

/// Flüchtiges Prüfergebnis, wird nie persistiert.
#[derive(Debug, Clone)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub severity: Severity,
    pub message: String,
    /// Bei Unterbesetzung gibt es keinen einzelnen Verursacher.
    pub employee: Option<EmployeeId>,
    pub date: NaiveDate,
    pub shift: ShiftKind,
}

impl Conflict {
    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Enthält die Liste mindestens einen blockierenden Konflikt?
pub fn has_blocking(conflicts: &[Conflict]) -> bool {
    conflicts.iter().any(Conflict::is_blocking)
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("assignment must last at least 30 minutes")]
    DurationTooShort,
    #[error("unknown employee: {0}")]
    UnknownEmployee(String),
    #[error("employee is deactivated: {0}")]
    InactiveEmployee(String),
    #[error("assignment not found: {0}")]
    NotFound(String),
    #[error("assignment not persisted: {0}")]
    NotPersisted(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
