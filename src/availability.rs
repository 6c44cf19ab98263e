//! Résolution des disponibilités et préférences d'un employé.
//!
//! Cascade ordonnée, la première règle applicable l'emporte :
//! règles datées d'abord (indispo journée, indispo sur plage, plage exclusive),
//! puis les mêmes règles pour le jour de semaine, sinon disponible.

use crate::model::{DayRules, Employee, Unavailability};
use crate::window::{contains, overlaps, TimeWindow};
use chrono::{NaiveDate, Weekday};

/// Verdict d'une règle de la cascade ; `None` = règle non applicable.
fn rule_verdict(rules: &DayRules, candidate: &TimeWindow) -> Option<bool> {
    match rules.unavailable {
        Some(Unavailability::WholeDay) => return Some(false),
        Some(Unavailability::Window(blocked)) => return Some(!overlaps(candidate, &blocked)),
        None => {}
    }
    rules
        .available_only
        .map(|allowed| contains(&allowed, candidate))
}

/// L'employé peut-il travailler sur `candidate` ce jour-là ?
pub fn is_available(
    employee: &Employee,
    day: Weekday,
    date: Option<NaiveDate>,
    candidate: &TimeWindow,
) -> bool {
    if let Some(verdict) = date
        .and_then(|d| employee.date_rules(d))
        .and_then(|rules| rule_verdict(rules, candidate))
    {
        return verdict;
    }
    rule_verdict(employee.weekday_rules(day), candidate).unwrap_or(true)
}

/// Préférence pour le jour : une entrée datée (journée ou plage) suffit, sinon le jour de semaine.
pub fn prefers(employee: &Employee, day: Weekday, date: Option<NaiveDate>) -> bool {
    let dated = date
        .and_then(|d| employee.date_rules(d))
        .is_some_and(|rules| rules.preferred.is_some());
    dated || employee.weekday_rules(day).preferred.is_some()
}

/// Faux seulement si l'employé est indisponible toute la journée.
///
/// Même préséance que [`is_available`] : une règle datée de disponibilité
/// (plage d'indispo ou plage exclusive) masque le blocage du jour de semaine.
pub fn can_work(employee: &Employee, day: Weekday, date: Option<NaiveDate>) -> bool {
    if let Some(rules) = date.and_then(|d| employee.date_rules(d)) {
        if rules.unavailable.is_some() || rules.available_only.is_some() {
            return !rules.wholly_unavailable();
        }
    }
    !employee.weekday_rules(day).wholly_unavailable()
}
