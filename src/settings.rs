use crate::model::ShiftKind;
use crate::timegrid;
use anyhow::{bail, Context, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Nominales Zeitfenster und Mindestbesetzung einer Schichtart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShiftWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub min_staffing: u32,
}

impl ShiftWindow {
    fn validate(&self, kind: ShiftKind) -> Result<()> {
        if timegrid::duration_minutes(self.start, self.end) < timegrid::MIN_DURATION_MINUTES {
            bail!(
                "{kind} window must last at least {} minutes",
                timegrid::MIN_DURATION_MINUTES
            );
        }
        if self.min_staffing == 0 {
            bail!("{kind} min_staffing must be at least 1");
        }
        Ok(())
    }
}

/// Betriebsweite Schichtkonfiguration. Wird in jede Engine-Funktion
/// hineingereicht, nie global gehalten — Änderungen wirken ab der
/// nächsten Neuberechnung.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShiftConfig {
    pub early: ShiftWindow,
    pub late: ShiftWindow,
    pub night: ShiftWindow,
}

impl Default for ShiftConfig {
    fn default() -> Self {
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        Self {
            early: ShiftWindow {
                start: t(6, 0),
                end: t(14, 0),
                min_staffing: 2,
            },
            late: ShiftWindow {
                start: t(14, 0),
                end: t(22, 0),
                min_staffing: 2,
            },
            night: ShiftWindow {
                start: t(22, 0),
                end: t(6, 0),
                min_staffing: 1,
            },
        }
    }
}

impl ShiftConfig {
    pub fn window(&self, kind: ShiftKind) -> &ShiftWindow {
        match kind {
            ShiftKind::Early => &self.early,
            ShiftKind::Late => &self.late,
            ShiftKind::Night => &self.night,
        }
    }

    pub fn window_mut(&mut self, kind: ShiftKind) -> &mut ShiftWindow {
        match kind {
            ShiftKind::Early => &mut self.early,
            ShiftKind::Late => &mut self.late,
            ShiftKind::Night => &mut self.night,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for kind in ShiftKind::ALL {
            self.window(kind).validate(kind)?;
        }
        Ok(())
    }
}

/// JSON-Ablage der Schichtkonfiguration. Fehlende Datei fällt auf die
/// Standardfenster zurück.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<ShiftConfig> {
        if !self.path.exists() {
            return Ok(ShiftConfig::default());
        }
        let data = fs::read(&self.path)
            .with_context(|| format!("reading settings {}", self.path.display()))?;
        let config: ShiftConfig = serde_json::from_slice(&data)
            .with_context(|| format!("parsing settings {}", self.path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &ShiftConfig) -> Result<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating settings directory {}", parent.display()))?;
            }
        }
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing settings {}", self.path.display()))?;
        Ok(())
    }
}
