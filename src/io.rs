use crate::model::{Employee, Roster};
use crate::timegrid;
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import von Mitarbeitern aus CSV, Header
/// `first_name,last_name,color[,role][,max_hours][,active]`.
pub fn import_employees_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Employee>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let first = rec.get(0).context("missing first_name")?.trim();
        let last = rec.get(1).context("missing last_name")?.trim();
        let color = rec.get(2).context("missing color")?.trim();
        if first.is_empty() || last.is_empty() {
            bail!("invalid employee row (empty name)");
        }
        let color = if color.is_empty() { "#888888" } else { color };
        let mut employee = Employee::new(first, last, color);
        if let Some(role) = rec.get(3) {
            let role = role.trim();
            if !role.is_empty() {
                employee.role = Some(role.to_string());
            }
        }
        if let Some(hours) = rec.get(4) {
            let hours = hours.trim();
            if !hours.is_empty() {
                employee.max_hours_per_week = hours
                    .parse()
                    .with_context(|| format!("invalid max_hours for {first} {last}"))?;
            }
        }
        if let Some(flag) = rec.get(5) {
            let flag = flag.trim();
            if !flag.is_empty() {
                employee.active = parse_bool(flag)
                    .with_context(|| format!("invalid active value for {first} {last}"))?;
            }
        }
        out.push(employee);
    }
    Ok(out)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "ja" | "j" => Ok(true),
        "false" | "0" | "no" | "n" | "nein" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// Export des Plans als JSON (formatiert).
pub fn export_plan_json<P: AsRef<Path>>(path: P, roster: &Roster) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(roster)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export der Zuteilungen als CSV, Header
/// `id,date,shift,start,end,minutes,employee,status`.
pub fn export_assignments_csv<P: AsRef<Path>>(path: P, roster: &Roster) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "id", "date", "shift", "start", "end", "minutes", "employee", "status",
    ])?;
    let mut minutes_buf = itoa::Buffer::new();
    for a in &roster.assignments {
        let employee = roster
            .find_employee(&a.employee)
            .map(Employee::full_name)
            .unwrap_or_default();
        let date = a.date.to_string();
        let start = a.start.format("%H:%M").to_string();
        let end = a.end.format("%H:%M").to_string();
        let minutes = minutes_buf.format(timegrid::duration_minutes(a.start, a.end));
        w.write_record([
            a.id.as_str(),
            date.as_str(),
            a.kind.as_str(),
            start.as_str(),
            end.as_str(),
            minutes,
            employee.as_str(),
            a.status.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
