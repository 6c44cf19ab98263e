#![forbid(unsafe_code)]
//! Roulement — génération du planning mensuel des employés d'une boutique.
//!
//! - Horaires d'ouverture par jour de semaine, exceptions datées prioritaires.
//! - Disponibilités/préférences par jour et par date (les dates priment).
//! - Remplissage glouton jour par jour, plafond mensuel, tourniquet équitable.
//! - Heures locales sans fuseau ; une plage dont la fin précède le début passe minuit.

pub mod availability;
pub mod hours;
pub mod model;
pub mod schedule;
pub mod scheduler;
#[cfg(feature = "serde")]
pub mod storage;
pub mod window;

pub use availability::{can_work, is_available, prefers};
pub use hours::{DateOverride, OperatingHours};
pub use model::{DayRules, Employee, Preference, Roster, Shift, ShiftOrigin, Unavailability};
pub use schedule::Schedule;
pub use scheduler::{
    Conflict, ConflictKind, DayOutcome, DayReport, EngineOptions, RunReport, SchedError, Scheduler,
};
#[cfg(feature = "serde")]
pub use storage::{JsonStorage, Storage, Workspace};
pub use window::{contains, overlaps, TimeWindow};
