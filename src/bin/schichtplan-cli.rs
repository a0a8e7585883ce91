#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use schichtplan::{
    io,
    model::{AssignmentId, AssignmentStatus, Employee, ShiftKind},
    scheduler::{has_blocking, Conflict, DragSession, Edge, Planner},
    settings::SettingsStore,
    storage::{JsonStorage, Storage},
    timegrid,
};
use std::str::FromStr;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Schichtplanung für kleine Produktionsteams (ohne Datenbank)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Logs aktivieren (Feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// JSON-Datei des Plans
    #[arg(long, global = true, default_value = "plan.json")]
    plan: String,

    /// JSON-Datei der Schichtkonfiguration
    #[arg(long, global = true, default_value = "settings.json")]
    settings: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Mitarbeiter anlegen
    AddEmployee {
        #[arg(long)]
        first: String,
        #[arg(long)]
        last: String,
        #[arg(long, default_value = "#888888")]
        color: String,
        #[arg(long)]
        role: Option<String>,
        #[arg(long, default_value_t = 40.0)]
        max_hours: f64,
    },

    /// Mitarbeiter aus CSV importieren
    ImportEmployees {
        #[arg(long)]
        csv: String,
    },

    /// Mitarbeiter deaktivieren (Historie bleibt erhalten)
    DeactivateEmployee {
        /// Voller Name oder Id
        #[arg(long)]
        employee: String,
    },

    /// Mitarbeiter endgültig entfernen (kaskadiert auf Zuteilungen)
    RemoveEmployee {
        #[arg(long)]
        employee: String,
    },

    /// Zuteilung planen (mit Konfliktprüfung)
    Plan {
        /// Voller Name oder Id
        #[arg(long)]
        employee: String,
        /// early | late | night
        #[arg(long)]
        shift: String,
        /// Kalendertag (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// HH:MM, sonst Fensterbeginn der Schichtart
        #[arg(long)]
        start: Option<String>,
        /// HH:MM, sonst Fensterende der Schichtart
        #[arg(long)]
        end: Option<String>,
        /// Warnungen bestätigen und trotzdem übernehmen
        #[arg(long)]
        force: bool,
    },

    /// Kante einer Zuteilung verschieben (gerastert, min. 30 Minuten)
    Resize {
        #[arg(long)]
        id: String,
        /// start | end
        #[arg(long)]
        edge: String,
        /// Versatz in Minuten (auch negativ)
        #[arg(long)]
        delta: i64,
        #[arg(long)]
        force: bool,
    },

    /// Zuteilung auf anderen Tag/Slot verschieben (Dauer bleibt)
    Move {
        #[arg(long)]
        id: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        shift: String,
        #[arg(long)]
        force: bool,
    },

    /// Status einer Zuteilung setzen
    SetStatus {
        #[arg(long)]
        id: String,
        /// planned | confirmed | sick | vacation | swapped
        #[arg(long)]
        status: String,
    },

    /// Zuteilung löschen
    Delete {
        #[arg(long)]
        id: String,
    },

    /// Ganze Woche in eine andere Woche kopieren
    CopyWeek {
        /// Beliebiger Tag der Quellwoche
        #[arg(long)]
        from: String,
        /// Beliebiger Tag der Zielwoche
        #[arg(long)]
        to: String,
    },

    /// Spaltenlayout eines Tages ausgeben
    Layout {
        #[arg(long)]
        date: String,
    },

    /// Wochenstatistik ausgeben
    Stats {
        /// Beliebiger Tag der Woche
        #[arg(long)]
        week: String,
    },

    /// Alle Zuteilungen einer Woche auf Konflikte prüfen
    Check {
        #[arg(long)]
        week: String,
        /// CSV-Bericht der Konflikte (optional)
        #[arg(long)]
        report: Option<String>,
    },

    /// Standardkonfiguration schreiben
    InitSettings,

    /// Aktive Konfiguration anzeigen
    ShowSettings,

    /// Plan auflisten und optional exportieren
    List {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.plan)?;
    let mut planner = match storage.load() {
        Ok(r) => {
            let mut p = Planner::new();
            *p.roster_mut() = r;
            p
        }
        Err(_) => Planner::new(),
    };
    let settings = SettingsStore::new(&cli.settings);
    let config = settings.load()?;

    let code = match cli.cmd {
        Commands::AddEmployee {
            first,
            last,
            color,
            role,
            max_hours,
        } => {
            let mut e = Employee::new(first, last, color);
            e.role = role;
            e.max_hours_per_week = max_hours;
            println!("{} {}", e.id.as_str(), e.full_name());
            planner.add_employees(vec![e]);
            storage.save(planner.roster())?;
            0
        }
        Commands::ImportEmployees { csv } => {
            let employees = io::import_employees_csv(csv)?;
            println!("imported {} employee(s)", employees.len());
            planner.add_employees(employees);
            storage.save(planner.roster())?;
            0
        }
        Commands::DeactivateEmployee { employee } => {
            let id = resolve_employee(&planner, &employee)?;
            planner.deactivate_employee(&id)?;
            storage.save(planner.roster())?;
            0
        }
        Commands::RemoveEmployee { employee } => {
            let id = resolve_employee(&planner, &employee)?;
            let removed = planner.remove_employee(&id)?;
            println!("removed employee and {removed} assignment(s)");
            storage.save(planner.roster())?;
            0
        }
        Commands::Plan {
            employee,
            shift,
            date,
            start,
            end,
            force,
        } => {
            let id = resolve_employee(&planner, &employee)?;
            let kind = parse_kind(&shift)?;
            let date: NaiveDate = date.parse()?;
            let bounds = match (start, end) {
                (Some(s), Some(e)) => {
                    Some((timegrid::parse_clock(&s)?, timegrid::parse_clock(&e)?))
                }
                (None, None) => None,
                _ => bail!("--start and --end must be given together"),
            };
            let candidate = planner.build_assignment(&id, kind, date, bounds, &config)?;
            let conflicts = planner.check(&candidate, &config)?;
            match gate(&conflicts, force)? {
                Gate::Blocked => 1,
                Gate::NeedsConfirm => 2,
                Gate::Clear => {
                    let id = planner.insert(candidate);
                    println!("{}", id.as_str());
                    storage.save(planner.roster())?;
                    0
                }
            }
        }
        Commands::Resize {
            id,
            edge,
            delta,
            force,
        } => {
            let id = AssignmentId::new(id);
            let edge = match edge.trim() {
                "start" => Edge::Start,
                "end" => Edge::End,
                other => bail!("unknown edge: {other} (use start|end)"),
            };
            let target = planner
                .roster()
                .find_assignment(&id)
                .ok_or_else(|| anyhow::anyhow!("unknown assignment: {}", id.as_str()))?
                .clone();
            let mut session = DragSession::resize(&target, edge);
            session.drag_by(delta);
            let candidate = planner.candidate_from(&session, &config)?;
            let conflicts = planner.check(&candidate, &config)?;
            match gate(&conflicts, force)? {
                Gate::Blocked => 1,
                Gate::NeedsConfirm => 2,
                Gate::Clear => {
                    planner.commit_drag(session, &config)?;
                    println!(
                        "{} {}–{}",
                        candidate.id.as_str(),
                        candidate.start.format("%H:%M"),
                        candidate.end.format("%H:%M")
                    );
                    storage.save(planner.roster())?;
                    0
                }
            }
        }
        Commands::Move {
            id,
            date,
            shift,
            force,
        } => {
            let id = AssignmentId::new(id);
            let date: NaiveDate = date.parse()?;
            let kind = parse_kind(&shift)?;
            let target = planner
                .roster()
                .find_assignment(&id)
                .ok_or_else(|| anyhow::anyhow!("unknown assignment: {}", id.as_str()))?
                .clone();
            let mut session = DragSession::move_of(&target);
            session.drop_on(date, kind);
            let candidate = planner.candidate_from(&session, &config)?;
            let conflicts = planner.check(&candidate, &config)?;
            match gate(&conflicts, force)? {
                Gate::Blocked => 1,
                Gate::NeedsConfirm => 2,
                Gate::Clear => {
                    planner.commit_drag(session, &config)?;
                    storage.save(planner.roster())?;
                    0
                }
            }
        }
        Commands::SetStatus { id, status } => {
            let status = AssignmentStatus::from_str(&status).map_err(anyhow::Error::msg)?;
            planner.set_status(&AssignmentId::new(id), status)?;
            storage.save(planner.roster())?;
            0
        }
        Commands::Delete { id } => {
            planner.delete_assignment(&AssignmentId::new(id))?;
            storage.save(planner.roster())?;
            0
        }
        Commands::CopyWeek { from, to } => {
            let from: NaiveDate = from.parse()?;
            let to: NaiveDate = to.parse()?;
            let created = planner.copy_week(from, to)?;
            println!("copied {} assignment(s)", created.len());
            storage.save(planner.roster())?;
            0
        }
        Commands::Layout { date } => {
            let date: NaiveDate = date.parse()?;
            let layout = planner.layout_day(date);
            for slot in &layout {
                let Some(a) = planner.roster().find_assignment(&slot.assignment) else {
                    continue;
                };
                println!(
                    "{} | {} {}–{} | column {}/{}",
                    a.id.as_str(),
                    a.kind,
                    a.start.format("%H:%M"),
                    a.end.format("%H:%M"),
                    slot.column + 1,
                    slot.columns
                );
            }
            0
        }
        Commands::Stats { week } => {
            let week: NaiveDate = week.parse()?;
            let stats = planner.weekly_statistics(week, &config);
            print!(
                "{}",
                schichtplan::render_summary(&stats, &planner.roster().employees)
            );
            if stats.understaffed.is_empty() {
                0
            } else {
                2
            }
        }
        Commands::Check { week, report } => {
            let week: NaiveDate = week.parse()?;
            let candidates: Vec<_> = planner
                .roster()
                .assignments
                .iter()
                .filter(|a| timegrid::same_week(a.date, week))
                .cloned()
                .collect();
            let mut conflicts: Vec<Conflict> = Vec::new();
            for candidate in &candidates {
                for c in planner.check(candidate, &config)? {
                    // symmetrische Treffer (z. B. Doppelbuchung beider
                    // Partner) nur einmal melden
                    let duplicate = conflicts.iter().any(|k| {
                        k.kind == c.kind
                            && k.employee == c.employee
                            && k.date == c.date
                            && k.shift == c.shift
                    });
                    if !duplicate {
                        conflicts.push(c);
                    }
                }
            }
            let understaffed = planner.weekly_statistics(week, &config).understaffed;
            for u in &understaffed {
                println!(
                    "[warning] understaffing: {} {} staffed {}/{}",
                    u.date, u.shift, u.staffed, u.required
                );
            }
            if conflicts.is_empty() && understaffed.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                for c in &conflicts {
                    print_conflict(c);
                }
                if let Some(path) = report {
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["kind", "severity", "employee", "date", "shift", "message"])?;
                    for c in &conflicts {
                        let severity = if c.is_blocking() { "error" } else { "warning" };
                        let employee = c.employee.as_ref().map(|e| e.as_str()).unwrap_or("");
                        let date = c.date.to_string();
                        w.write_record([
                            c.kind.as_str(),
                            severity,
                            employee,
                            date.as_str(),
                            c.shift.as_str(),
                            c.message.as_str(),
                        ])?;
                    }
                    w.flush()?;
                }
                // Code 2 = Warnungen/unvollständig
                2
            }
        }
        Commands::InitSettings => {
            settings.save(&schichtplan::ShiftConfig::default())?;
            println!("settings written to {}", settings.path().display());
            0
        }
        Commands::ShowSettings => {
            for kind in ShiftKind::ALL {
                let w = config.window(kind);
                println!(
                    "{kind}: {}–{} (min staffing {})",
                    w.start.format("%H:%M"),
                    w.end.format("%H:%M"),
                    w.min_staffing
                );
            }
            0
        }
        Commands::List { out_json, out_csv } => {
            if let Some(path) = out_json {
                io::export_plan_json(path, planner.roster())?;
            }
            if let Some(path) = out_csv {
                io::export_assignments_csv(path, planner.roster())?;
            }
            // kompakte Ausgabe
            for a in &planner.roster().assignments {
                let employee = planner
                    .roster()
                    .find_employee(&a.employee)
                    .map(Employee::full_name)
                    .unwrap_or_else(|| "-".into());
                println!(
                    "{} | {} {} {}–{} | {} | {}",
                    a.id.as_str(),
                    a.date,
                    a.kind,
                    a.start.format("%H:%M"),
                    a.end.format("%H:%M"),
                    employee,
                    a.status.as_str()
                );
            }
            0
        }
    };

    std::process::exit(code);
}

enum Gate {
    Clear,
    NeedsConfirm,
    Blocked,
}

/// Konflikte ausgeben und entscheiden: Fehler blockieren immer,
/// Warnungen nur ohne `--force`.
fn gate(conflicts: &[Conflict], force: bool) -> Result<Gate> {
    for c in conflicts {
        print_conflict(c);
    }
    if has_blocking(conflicts) {
        eprintln!("blocked: resolve the error above first");
        return Ok(Gate::Blocked);
    }
    if !conflicts.is_empty() && !force {
        eprintln!("warnings present; repeat with --force to commit anyway");
        return Ok(Gate::NeedsConfirm);
    }
    Ok(Gate::Clear)
}

fn print_conflict(c: &Conflict) {
    let severity = if c.is_blocking() { "error" } else { "warning" };
    println!("[{severity}] {}: {}", c.kind.as_str(), c.message);
}

fn parse_kind(s: &str) -> Result<ShiftKind> {
    ShiftKind::from_str(s).map_err(anyhow::Error::msg)
}

fn resolve_employee(
    planner: &Planner,
    selector: &str,
) -> Result<schichtplan::model::EmployeeId> {
    let roster = planner.roster();
    if let Some(e) = roster.find_employee_by_name(selector) {
        return Ok(e.id.clone());
    }
    if let Some(e) = roster
        .employees
        .iter()
        .find(|e| e.id.as_str() == selector)
    {
        return Ok(e.id.clone());
    }
    bail!("unknown employee: {selector}")
}
