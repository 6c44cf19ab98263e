use crate::scheduler::SchedError;
use crate::window::{self, TimeWindow};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Préférence (non contraignante) pour une journée.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Preference {
    WholeDay,
    Window(TimeWindow),
}

/// Indisponibilité : toute la journée ou sur une plage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Unavailability {
    WholeDay,
    Window(TimeWindow),
}

/// Règles d'un employé pour un jour de semaine ou une date précise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayRules {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub preferred: Option<Preference>,
    /// L'employé ne peut travailler *que* dans cette plage.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub available_only: Option<TimeWindow>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub unavailable: Option<Unavailability>,
}

impl DayRules {
    pub fn is_empty(&self) -> bool {
        self.preferred.is_none() && self.available_only.is_none() && self.unavailable.is_none()
    }

    pub fn wholly_unavailable(&self) -> bool {
        matches!(self.unavailable, Some(Unavailability::WholeDay))
    }
}

/// Employé : plafond mensuel, bornes de durée de shift, règles par jour et par date.
///
/// Les règles datées priment sur les règles du jour de semaine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Employee {
    pub name: String,
    pub max_hours_per_month: f64,
    pub min_hours_per_shift: f64,
    pub max_hours_per_shift: f64,
    /// Indexé par `Weekday::num_days_from_monday`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub weekly: [DayRules; 7],
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "BTreeMap::is_empty"))]
    pub dated: BTreeMap<NaiveDate, DayRules>,
}

impl Employee {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            max_hours_per_month: 160.0,
            min_hours_per_shift: 4.0,
            max_hours_per_shift: 8.0,
            weekly: Default::default(),
            dated: BTreeMap::new(),
        }
    }

    pub fn with_limits(mut self, max_per_month: f64, min_per_shift: f64, max_per_shift: f64) -> Self {
        self.max_hours_per_month = max_per_month;
        self.min_hours_per_shift = min_per_shift;
        self.max_hours_per_shift = max_per_shift;
        self
    }

    pub fn prefer_weekday(mut self, day: Weekday) -> Self {
        self.weekday_rules_mut(day).preferred = Some(Preference::WholeDay);
        self
    }

    pub fn prefer_window(mut self, day: Weekday, window: TimeWindow) -> Self {
        self.weekday_rules_mut(day).preferred = Some(Preference::Window(window));
        self
    }

    pub fn unavailable_on(mut self, day: Weekday) -> Self {
        self.weekday_rules_mut(day).unavailable = Some(Unavailability::WholeDay);
        self
    }

    pub fn unavailable_between(mut self, day: Weekday, window: TimeWindow) -> Self {
        self.weekday_rules_mut(day).unavailable = Some(Unavailability::Window(window));
        self
    }

    pub fn available_only(mut self, day: Weekday, window: TimeWindow) -> Self {
        self.weekday_rules_mut(day).available_only = Some(window);
        self
    }

    pub fn prefer_date(mut self, date: NaiveDate) -> Self {
        self.dated.entry(date).or_default().preferred = Some(Preference::WholeDay);
        self
    }

    pub fn prefer_window_on_date(mut self, date: NaiveDate, window: TimeWindow) -> Self {
        self.dated.entry(date).or_default().preferred = Some(Preference::Window(window));
        self
    }

    pub fn unavailable_on_date(mut self, date: NaiveDate) -> Self {
        self.dated.entry(date).or_default().unavailable = Some(Unavailability::WholeDay);
        self
    }

    pub fn unavailable_between_on_date(mut self, date: NaiveDate, window: TimeWindow) -> Self {
        self.dated.entry(date).or_default().unavailable = Some(Unavailability::Window(window));
        self
    }

    pub fn available_only_on_date(mut self, date: NaiveDate, window: TimeWindow) -> Self {
        self.dated.entry(date).or_default().available_only = Some(window);
        self
    }

    /// Supprime toutes les règles datées de `date`.
    pub fn clear_date_rules(&mut self, date: NaiveDate) -> Option<DayRules> {
        self.dated.remove(&date)
    }

    pub fn weekday_rules(&self, day: Weekday) -> &DayRules {
        &self.weekly[day.num_days_from_monday() as usize]
    }

    pub fn weekday_rules_mut(&mut self, day: Weekday) -> &mut DayRules {
        &mut self.weekly[day.num_days_from_monday() as usize]
    }

    pub fn date_rules(&self, date: NaiveDate) -> Option<&DayRules> {
        self.dated.get(&date)
    }

    /// Plage préférée : celle de la date si présente, sinon celle du jour de semaine.
    pub fn preferred_window(&self, day: Weekday, date: Option<NaiveDate>) -> Option<TimeWindow> {
        let dated = date
            .and_then(|d| self.date_rules(d))
            .and_then(|rules| rules.preferred);
        match dated.or(self.weekday_rules(day).preferred) {
            Some(Preference::Window(window)) => Some(window),
            _ => None,
        }
    }

    pub fn monthly_cap(&self) -> Duration {
        window::from_hours(self.max_hours_per_month)
    }

    pub fn min_shift(&self) -> Duration {
        window::from_hours(self.min_hours_per_shift)
    }

    pub fn max_shift(&self) -> Duration {
        window::from_hours(self.max_hours_per_shift)
    }

    /// Vérifie la cohérence de la configuration (échec rapide avant génération).
    pub fn validate(&self) -> Result<(), SchedError> {
        let invalid = |reason: &str| SchedError::InvalidEmployee {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if !self.max_hours_per_month.is_finite() || self.max_hours_per_month < 0.0 {
            return Err(invalid("monthly hour cap must be >= 0"));
        }
        if !self.min_hours_per_shift.is_finite() || self.min_shift() <= Duration::zero() {
            return Err(invalid("minimum shift length must be > 0"));
        }
        if !self.max_hours_per_shift.is_finite()
            || self.min_hours_per_shift > self.max_hours_per_shift
        {
            return Err(invalid("minimum shift length must be <= maximum shift length"));
        }
        Ok(())
    }
}

/// Provenance d'un shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShiftOrigin {
    /// Boucle principale.
    #[default]
    Regular,
    /// Passe de secours à durée minimale, premier shift du jour.
    Relaxed,
    /// Dernier recours : peut dépasser le plafond mensuel.
    Fallback,
}

/// Shift produit par le moteur ; immuable une fois créé.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shift {
    employee: String,
    weekday: Weekday,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    #[cfg_attr(feature = "serde", serde(default))]
    origin: ShiftOrigin,
}

impl Shift {
    pub(crate) fn new(
        employee: &str,
        date: NaiveDate,
        window: TimeWindow,
        origin: ShiftOrigin,
    ) -> Self {
        Self {
            employee: employee.to_owned(),
            weekday: date.weekday(),
            date,
            start: window.start,
            end: window.end,
            origin,
        }
    }

    pub fn employee(&self) -> &str {
        &self.employee
    }
    pub fn weekday(&self) -> Weekday {
        self.weekday
    }
    pub fn date(&self) -> NaiveDate {
        self.date
    }
    pub fn start(&self) -> NaiveTime {
        self.start
    }
    pub fn end(&self) -> NaiveTime {
        self.end
    }
    pub fn origin(&self) -> ShiftOrigin {
        self.origin
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }

    pub fn duration(&self) -> Duration {
        self.window().duration()
    }

    pub fn duration_hours(&self) -> f64 {
        self.window().hours()
    }
}

/// Effectif ordonné ; l'ordre sert au dernier recours.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Roster {
    employees: Vec<Employee>,
}

impl Roster {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn push(&mut self, employee: Employee) {
        self.employees.push(employee);
    }

    pub fn find<'a>(&'a self, name: &str) -> Option<&'a Employee> {
        self.employees.iter().find(|e| e.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Employee> {
        self.employees.iter_mut().find(|e| e.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Valide chaque employé et l'unicité des noms.
    pub fn validate(&self) -> Result<(), SchedError> {
        let mut seen = HashSet::new();
        for employee in &self.employees {
            employee.validate()?;
            if !seen.insert(employee.name.as_str()) {
                return Err(SchedError::DuplicateEmployee(employee.name.clone()));
            }
        }
        Ok(())
    }
}

impl From<Vec<Employee>> for Roster {
    fn from(employees: Vec<Employee>) -> Self {
        Self::new(employees)
    }
}
