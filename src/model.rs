use crate::timegrid;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Starker Bezeichner für Mitarbeiter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Mitarbeiter im Planungspool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    /// Anzeigefarbe im Kalender, z. B. `#4f9d69`.
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Wochenstundenbudget.
    pub max_hours_per_week: f64,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Employee {
    pub fn new<F: Into<String>, L: Into<String>, C: Into<String>>(
        first_name: F,
        last_name: L,
        color: C,
    ) -> Self {
        Self {
            id: EmployeeId::random(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            color: color.into(),
            role: None,
            max_hours_per_week: 40.0,
            active: true,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Schichtart mit fester Reihenfolge Früh → Spät → Nacht.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftKind {
    Early,
    Late,
    Night,
}

impl ShiftKind {
    pub const ALL: [ShiftKind; 3] = [ShiftKind::Early, ShiftKind::Late, ShiftKind::Night];

    pub fn as_str(self) -> &'static str {
        match self {
            ShiftKind::Early => "early",
            ShiftKind::Late => "late",
            ShiftKind::Night => "night",
        }
    }
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "early" | "frueh" | "früh" => Ok(ShiftKind::Early),
            "late" | "spaet" | "spät" => Ok(ShiftKind::Late),
            "night" | "nacht" => Ok(ShiftKind::Night),
            other => Err(format!("unknown shift kind: {other}")),
        }
    }
}

/// Status einer Zuteilung. `sick`/`vacation` bleiben zur Nachvollziehbarkeit
/// erhalten, zählen aber weder für Besetzung noch für Stunden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Planned,
    Confirmed,
    Sick,
    Vacation,
    Swapped,
}

impl AssignmentStatus {
    /// Zählt dieser Status für Besetzung und Stunden?
    pub fn counts(self) -> bool {
        !matches!(self, AssignmentStatus::Sick | AssignmentStatus::Vacation)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentStatus::Planned => "planned",
            AssignmentStatus::Confirmed => "confirmed",
            AssignmentStatus::Sick => "sick",
            AssignmentStatus::Vacation => "vacation",
            AssignmentStatus::Swapped => "swapped",
        }
    }
}

impl FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planned" => Ok(AssignmentStatus::Planned),
            "confirmed" => Ok(AssignmentStatus::Confirmed),
            "sick" => Ok(AssignmentStatus::Sick),
            "vacation" => Ok(AssignmentStatus::Vacation),
            "swapped" => Ok(AssignmentStatus::Swapped),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// Starker Bezeichner für Zuteilungen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssignmentId(String);

impl AssignmentId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Eine Schichtzuteilung: ein Mitarbeiter, eine Schichtart, ein Kalendertag,
/// mit eigenen (ggf. per Resize angepassten) Zeitgrenzen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftAssignment {
    pub id: AssignmentId,
    pub employee: EmployeeId,
    pub kind: ShiftKind,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub status: AssignmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShiftAssignment {
    /// Legt eine Zuteilung an und prüft die Mindestdauer (30 Minuten,
    /// Mitternachtsübergang eingerechnet).
    pub fn new(
        employee: EmployeeId,
        kind: ShiftKind,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self, String> {
        if timegrid::duration_minutes(start, end) < timegrid::MIN_DURATION_MINUTES {
            return Err(format!(
                "assignment must last at least {} minutes",
                timegrid::MIN_DURATION_MINUTES
            ));
        }
        let now = Utc::now();
        Ok(Self {
            id: AssignmentId::random(),
            employee,
            kind,
            date,
            start,
            end,
            status: AssignmentStatus::Planned,
            note: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Dauer in Stunden nach der Mitternachtsregel.
    pub fn duration_hours(&self) -> f64 {
        timegrid::duration_hours(self.start, self.end)
    }

    /// Zählt diese Zuteilung für Besetzung und Stunden?
    pub fn counts(&self) -> bool {
        self.status.counts()
    }
}

/// Vollständiger Plan: Mitarbeiter plus Zuteilungen.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Roster {
    pub employees: Vec<Employee>,
    pub assignments: Vec<ShiftAssignment>,
}

impl Roster {
    pub fn find_employee<'a>(&'a self, id: &EmployeeId) -> Option<&'a Employee> {
        self.employees.iter().find(|e| &e.id == id)
    }
    pub fn find_employee_by_name<'a>(&'a self, full_name: &str) -> Option<&'a Employee> {
        self.employees.iter().find(|e| e.full_name() == full_name)
    }
    pub fn find_employee_mut(&mut self, id: &EmployeeId) -> Option<&mut Employee> {
        self.employees.iter_mut().find(|e| &e.id == id)
    }
    pub fn find_assignment<'a>(&'a self, id: &AssignmentId) -> Option<&'a ShiftAssignment> {
        self.assignments.iter().find(|a| &a.id == id)
    }
    pub fn find_assignment_mut(&mut self, id: &AssignmentId) -> Option<&mut ShiftAssignment> {
        self.assignments.iter_mut().find(|a| &a.id == id)
    }
    /// Alle Zuteilungen eines Kalendertags.
    pub fn assignments_on(&self, date: NaiveDate) -> Vec<&ShiftAssignment> {
        self.assignments.iter().filter(|a| a.date == date).collect()
    }
}
