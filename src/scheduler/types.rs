use crate::model::Shift;
use chrono::{Duration, NaiveDate, NaiveTime};
use thiserror::Error;

/// Options du moteur.
///
/// `max_iterations_per_day` est une soupape de sécurité, pas une règle métier :
/// sur des entrées bien formées, la modifier ne change pas le planning.
#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    pub max_iterations_per_day: usize,
    /// Pas d'avance du curseur quand aucun shift ne peut démarrer.
    pub probe_step: Duration,
    /// En dessous (ou égal), une seule personne couvre la journée.
    pub single_shift_threshold: Duration,
    /// Longueur visée maximale lors du découpage d'une longue journée.
    pub max_target_shift: Duration,
    pub fallback_max_shift: Duration,
    /// Si vrai, le dernier recours respecte aussi le plafond mensuel.
    pub enforce_cap_in_fallback: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_iterations_per_day: 1000,
            probe_step: Duration::minutes(15),
            single_shift_threshold: Duration::hours(6),
            max_target_shift: Duration::hours(8),
            fallback_max_shift: Duration::hours(8),
            enforce_cap_in_fallback: false,
        }
    }
}

/// Issue du remplissage d'une journée.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOutcome {
    Closed,
    /// Toute l'amplitude est couverte.
    Filled,
    /// Des shifts existent mais laissent des trous.
    PartiallyFilled,
    /// La boucle a atteint `max_iterations_per_day` ; résultat partiel conservé.
    IterationCapHit,
    /// Seul le dernier recours a produit un shift.
    Fallback,
    /// Ouvert, mais personne n'a pu être placé.
    Unstaffed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayReport {
    pub date: NaiveDate,
    pub outcome: DayOutcome,
    pub shifts: usize,
}

/// Compte-rendu d'une génération, un élément par date du mois.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub days: Vec<DayReport>,
}

impl RunReport {
    /// Jours dégradés : plafond d'itérations, dernier recours ou personne.
    pub fn degraded_days(&self) -> impl Iterator<Item = &DayReport> + '_ {
        self.days.iter().filter(|d| {
            matches!(
                d.outcome,
                DayOutcome::IterationCapHit | DayOutcome::Fallback | DayOutcome::Unstaffed
            )
        })
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded_days().next().is_some()
    }

    /// Jours staffés avec des trous ; signalés à part, pas considérés dégradés.
    pub fn partial_days(&self) -> impl Iterator<Item = &DayReport> + '_ {
        self.days
            .iter()
            .filter(|d| d.outcome == DayOutcome::PartiallyFilled)
    }

    pub fn outcome_on(&self, date: NaiveDate) -> Option<DayOutcome> {
        self.days.iter().find(|d| d.date == date).map(|d| d.outcome)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// Deux shifts du même employé se chevauchent le même jour.
    Overlap,
    /// Shift hors de l'amplitude d'ouverture (ou jour fermé).
    OutsideHours,
    /// Shift posé sur une indisponibilité (hors dernier recours).
    Unavailable,
    /// Cumul hors dernier recours au-delà du plafond mensuel.
    OverCap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub employee: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub kind: ConflictKind,
}

impl Conflict {
    pub(crate) fn new(shift: &Shift, kind: ConflictKind) -> Self {
        Self {
            employee: shift.employee().to_owned(),
            date: shift.date(),
            start: shift.start(),
            kind,
        }
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid time range: {0}")]
    InvalidTimeRange(String),
    #[error("invalid employee configuration for {name}: {reason}")]
    InvalidEmployee { name: String, reason: String },
    #[error("duplicate employee name: {0}")]
    DuplicateEmployee(String),
    #[error("invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
