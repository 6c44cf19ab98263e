use crate::scheduler::SchedError;
use chrono::{Duration, NaiveTime, Timelike};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DAY_SECONDS: i64 = 24 * 60 * 60;

/// Plage horaire dans une journée (`start` → `end`).
///
/// Si `end < start`, la plage passe minuit : `end` est lu comme l'heure du
/// lendemain. Toute l'arithmétique de passage de minuit est centralisée ici.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Construit une plage à partir d'heures/minutes ; `None` si une valeur est hors bornes.
    pub fn hm(start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> Option<Self> {
        Some(Self {
            start: NaiveTime::from_hms_opt(start_h, start_m, 0)?,
            end: NaiveTime::from_hms_opt(end_h, end_m, 0)?,
        })
    }

    /// Vrai si la plage passe minuit.
    pub fn wraps(&self) -> bool {
        self.end < self.start
    }

    /// Bornes en secondes depuis minuit, `end` corrigé de 24 h si la plage passe minuit.
    pub fn bounds_seconds(&self) -> (i64, i64) {
        let start = i64::from(self.start.num_seconds_from_midnight());
        let mut end = i64::from(self.end.num_seconds_from_midnight());
        if self.wraps() {
            end += DAY_SECONDS;
        }
        (start, end)
    }

    /// Durée, toujours positive ou nulle après correction.
    pub fn duration(&self) -> Duration {
        let (start, end) = self.bounds_seconds();
        Duration::seconds(end - start)
    }

    pub fn hours(&self) -> f64 {
        as_hours(self.duration())
    }

    /// Plage `[start, start + length)` ramenée sur une horloge de 24 h.
    pub fn starting_at(start: NaiveTime, length: Duration) -> Self {
        let (end, _) = start.overflowing_add_signed(length);
        Self { start, end }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Format `HH:MM-HH:MM`.
impl FromStr for TimeWindow {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SchedError::InvalidTimeRange(s.to_string());
        let (start, end) = s.split_once('-').ok_or_else(invalid)?;
        let start = NaiveTime::parse_from_str(start.trim(), "%H:%M").map_err(|_| invalid())?;
        let end = NaiveTime::parse_from_str(end.trim(), "%H:%M").map_err(|_| invalid())?;
        if start == end {
            return Err(invalid());
        }
        Ok(Self { start, end })
    }
}

/// Chevauchement semi-ouvert après correction de minuit de chaque plage.
pub fn overlaps(a: &TimeWindow, b: &TimeWindow) -> bool {
    let (a_start, a_end) = a.bounds_seconds();
    let (b_start, b_end) = b.bounds_seconds();
    a_start < b_end && a_end > b_start
}

/// `inner` entièrement compris dans `outer`, après correction de minuit.
pub fn contains(outer: &TimeWindow, inner: &TimeWindow) -> bool {
    let (outer_start, outer_end) = outer.bounds_seconds();
    let (inner_start, inner_end) = inner.bounds_seconds();
    inner_start >= outer_start && inner_end <= outer_end
}

/// Convertit un nombre d'heures (config) en durée, à la seconde près.
pub fn from_hours(hours: f64) -> Duration {
    Duration::seconds((hours * 3600.0).round() as i64)
}

pub fn as_hours(duration: Duration) -> f64 {
    duration.num_seconds() as f64 / 3600.0
}
