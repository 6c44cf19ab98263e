use crate::window::TimeWindow;
use chrono::{NaiveDate, Weekday};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Exception datée aux horaires hebdomadaires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DateOverride {
    Open(TimeWindow),
    Closed,
}

/// Horaires d'ouverture : défauts par jour de semaine + exceptions datées.
///
/// Une exception datée l'emporte toujours sur le défaut du jour, y compris
/// pour fermer un jour normalement ouvert.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OperatingHours {
    #[cfg_attr(feature = "serde", serde(default))]
    weekly: BTreeMap<u8, TimeWindow>,
    #[cfg_attr(feature = "serde", serde(default))]
    overrides: BTreeMap<NaiveDate, DateOverride>,
}

fn key(day: Weekday) -> u8 {
    day.num_days_from_monday() as u8
}

impl OperatingHours {
    pub fn new() -> Self {
        Self::default()
    }

    /// Semaine type utilisée par `init` : lun-ven 18:00-23:00, sam 11:00-23:00, dim 11:00-20:00.
    pub fn with_default_week() -> Self {
        let mut hours = Self::new();
        let defaults = [
            (Weekday::Mon, TimeWindow::hm(18, 0, 23, 0)),
            (Weekday::Tue, TimeWindow::hm(18, 0, 23, 0)),
            (Weekday::Wed, TimeWindow::hm(18, 0, 23, 0)),
            (Weekday::Thu, TimeWindow::hm(18, 0, 23, 0)),
            (Weekday::Fri, TimeWindow::hm(18, 0, 23, 0)),
            (Weekday::Sat, TimeWindow::hm(11, 0, 23, 0)),
            (Weekday::Sun, TimeWindow::hm(11, 0, 20, 0)),
        ];
        for (day, window) in defaults {
            if let Some(window) = window {
                hours.set_hours(day, window);
            }
        }
        hours
    }

    pub fn set_hours(&mut self, day: Weekday, window: TimeWindow) {
        self.weekly.insert(key(day), window);
    }

    pub fn clear_hours(&mut self, day: Weekday) {
        self.weekly.remove(&key(day));
    }

    pub fn set_hours_for_date(&mut self, date: NaiveDate, window: TimeWindow) {
        self.overrides.insert(date, DateOverride::Open(window));
    }

    pub fn set_closed_for_date(&mut self, date: NaiveDate) {
        self.overrides.insert(date, DateOverride::Closed);
    }

    pub fn remove_date_override(&mut self, date: NaiveDate) -> Option<DateOverride> {
        self.overrides.remove(&date)
    }

    pub fn has_date_override(&self, date: NaiveDate) -> bool {
        self.overrides.contains_key(&date)
    }

    pub fn date_override(&self, date: NaiveDate) -> Option<DateOverride> {
        self.overrides.get(&date).copied()
    }

    pub fn weekday_hours(&self, day: Weekday) -> Option<TimeWindow> {
        self.weekly.get(&key(day)).copied()
    }

    /// Horaires effectifs ; `None` = fermé.
    pub fn get_hours(&self, day: Weekday, date: Option<NaiveDate>) -> Option<TimeWindow> {
        if let Some(ov) = date.and_then(|d| self.overrides.get(&d)) {
            return match ov {
                DateOverride::Open(window) => Some(*window),
                DateOverride::Closed => None,
            };
        }
        self.weekday_hours(day)
    }

    pub fn is_open(&self, day: Weekday, date: Option<NaiveDate>) -> bool {
        self.get_hours(day, date).is_some()
    }
}
