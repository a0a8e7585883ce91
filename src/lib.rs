#![forbid(unsafe_code)]
//! Schichtplan — Planungskern für kleine Produktionsteams (ohne BD).
//!
//! - Drei Schichtarten (Früh/Spät/Nacht) auf einem Wochenraster.
//! - Konfliktprüfung vor jeder Mutation (Doppelbuchung, Ruhezeit,
//!   Überstunden), Wochenstatistik mit Fairness-Score.
//! - Spaltenlayout für die Tagesansicht, Drag-Vorschau als Wertobjekt.
//! - Dateiablage: Plan und Einstellungen als JSON, CSV-Austausch.

pub mod io;
pub mod model;
pub mod scheduler;
pub mod settings;
pub mod storage;
pub mod timegrid;

pub use model::{
    AssignmentId, AssignmentStatus, Employee, EmployeeId, Roster, ShiftAssignment, ShiftKind,
};
pub use scheduler::{
    has_blocking, layout_day, render_summary, Conflict, ConflictKind, DragKind, DragSession, Edge,
    Planner, SchedError, Severity, SlotLayout, TimeBounds, Understaffing, WeeklyStatistics,
};
pub use settings::{SettingsStore, ShiftConfig, ShiftWindow};
pub use storage::{JsonStorage, Storage};
