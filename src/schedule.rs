use crate::model::{Shift, ShiftOrigin};
use crate::window::as_hours;
use chrono::{Duration, NaiveDate, Weekday};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Planning d'un mois : shifts dans l'ordre de génération (pas forcément chronologique).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schedule {
    year: i32,
    month: u32,
    shifts: Vec<Shift>,
}

impl Schedule {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            shifts: Vec::new(),
        }
    }

    pub(crate) fn add_shift(&mut self, shift: Shift) {
        self.shifts.push(shift);
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shift> {
        self.shifts.iter()
    }

    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    pub fn shifts_for_employee<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Shift> + 'a {
        self.shifts.iter().filter(move |s| s.employee() == name)
    }

    pub fn total_duration_for_employee(&self, name: &str) -> Duration {
        self.shifts_for_employee(name)
            .fold(Duration::zero(), |acc, s| acc + s.duration())
    }

    /// Total d'heures d'un employé (somme des durées de ses shifts).
    pub fn total_hours_for_employee(&self, name: &str) -> f64 {
        as_hours(self.total_duration_for_employee(name))
    }

    pub fn shifts_on(&self, date: NaiveDate) -> impl Iterator<Item = &Shift> + '_ {
        self.shifts.iter().filter(move |s| s.date() == date)
    }

    pub fn shifts_for_weekday(&self, day: Weekday) -> impl Iterator<Item = &Shift> + '_ {
        self.shifts.iter().filter(move |s| s.weekday() == day)
    }

    /// Shifts issus du dernier recours (hors plafond mensuel possible).
    pub fn fallback_shifts(&self) -> impl Iterator<Item = &Shift> + '_ {
        self.shifts
            .iter()
            .filter(|s| s.origin() == ShiftOrigin::Fallback)
    }

    /// Dates distinctes ayant au moins un shift, triées.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let set: BTreeSet<NaiveDate> = self.shifts.iter().map(Shift::date).collect();
        set.into_iter().collect()
    }

    /// Récapitulatif heures par employé, trié par nom.
    pub fn hours_by_employee(&self) -> BTreeMap<String, f64> {
        let mut totals: BTreeMap<String, Duration> = BTreeMap::new();
        for shift in &self.shifts {
            let entry = totals
                .entry(shift.employee().to_owned())
                .or_insert_with(Duration::zero);
            *entry = *entry + shift.duration();
        }
        totals
            .into_iter()
            .map(|(name, total)| (name, as_hours(total)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Shift;
    type IntoIter = std::slice::Iter<'a, Shift>;

    fn into_iter(self) -> Self::IntoIter {
        self.shifts.iter()
    }
}
