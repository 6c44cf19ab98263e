mod conflicts;
mod day;
mod fallback;
mod types;
mod util;

pub use types::{
    Conflict, ConflictKind, DayOutcome, DayReport, EngineOptions, RunReport, SchedError,
};

use crate::hours::OperatingHours;
use crate::model::{Employee, Roster};
use crate::schedule::Schedule;
use chrono::{Datelike, Duration};
#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Bornes d'un employé converties en durées, calculées une fois par moteur.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Limits {
    pub cap: Duration,
    pub min_shift: Duration,
    pub max_shift: Duration,
}

impl From<&Employee> for Limits {
    fn from(e: &Employee) -> Self {
        Self {
            cap: e.monthly_cap(),
            min_shift: e.min_shift(),
            max_shift: e.max_shift(),
        }
    }
}

/// Moteur d'affectation : lit un effectif et des horaires, produit un planning mensuel.
///
/// Les entrées ne sont jamais modifiées ; le seul état mutable est le cumul
/// d'heures par employé, propre à chaque appel de `generate`.
#[derive(Debug, Clone)]
pub struct Scheduler<'a> {
    roster: &'a Roster,
    hours: &'a OperatingHours,
    limits: Vec<Limits>,
    opts: EngineOptions,
}

impl<'a> Scheduler<'a> {
    /// Valide l'effectif (échec rapide) et prépare le moteur.
    pub fn new(roster: &'a Roster, hours: &'a OperatingHours) -> Result<Self, SchedError> {
        roster.validate()?;
        Ok(Self {
            roster,
            hours,
            limits: roster.employees().iter().map(Limits::from).collect(),
            opts: EngineOptions::default(),
        })
    }

    pub fn with_options(mut self, opts: EngineOptions) -> Self {
        self.opts = opts;
        self
    }

    pub fn options(&self) -> &EngineOptions {
        &self.opts
    }

    pub fn generate(&self, year: i32, month: u32) -> Result<Schedule, SchedError> {
        self.generate_with_report(year, month)
            .map(|(schedule, _)| schedule)
    }

    /// Parcourt les dates du mois dans l'ordre ; le cumul d'heures d'une date
    /// alimente les suivantes, d'où l'absence de parallélisme.
    pub fn generate_with_report(
        &self,
        year: i32,
        month: u32,
    ) -> Result<(Schedule, RunReport), SchedError> {
        let dates = util::dates_in_month(year, month)?;
        let mut schedule = Schedule::new(year, month);
        let mut report = RunReport::default();
        let mut worked = vec![Duration::zero(); self.limits.len()];

        for date in dates {
            let weekday = date.weekday();
            let Some(open) = self.hours.get_hours(weekday, Some(date)) else {
                report.days.push(DayReport {
                    date,
                    outcome: DayOutcome::Closed,
                    shifts: 0,
                });
                continue;
            };

            let planner = day::DayPlanner {
                employees: self.roster.employees(),
                limits: &self.limits,
                opts: &self.opts,
                weekday,
                date,
                open,
            };
            let mut filled = planner.fill(&mut worked);

            if filled.shifts.is_empty() {
                if let Some(shift) = fallback::last_resort(&planner, &mut worked) {
                    #[cfg(feature = "logging")]
                    warn!(%date, employee = shift.employee(), "no regular shift placed, using last-resort assignment");
                    filled.shifts.push(shift);
                    filled.outcome = DayOutcome::Fallback;
                }
            }

            #[cfg(feature = "logging")]
            {
                if filled.outcome == DayOutcome::IterationCapHit {
                    warn!(%date, "iteration cap reached, keeping partial day");
                }
                debug!(%date, shifts = filled.shifts.len(), outcome = ?filled.outcome, "day planned");
            }

            report.days.push(DayReport {
                date,
                outcome: filled.outcome,
                shifts: filled.shifts.len(),
            });
            for shift in filled.shifts {
                schedule.add_shift(shift);
            }
        }

        Ok((schedule, report))
    }

    /// Audit d'un planning : chevauchements, hors horaires, indisponibilités, plafond.
    pub fn detect_conflicts(&self, schedule: &Schedule) -> Vec<Conflict> {
        conflicts::detect_conflicts(self, schedule)
    }
}
