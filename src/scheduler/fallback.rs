use super::day::DayPlanner;
use crate::model::{Shift, ShiftOrigin};
use chrono::Duration;

/// Dernier recours pour une journée ouverte restée vide.
///
/// Premier employé (ordre de l'effectif) non bloqué toute la journée, sans
/// contrôle fin des plages ni, par défaut, du plafond mensuel. Le shift est
/// marqué `ShiftOrigin::Fallback` pour rester identifiable.
pub(super) fn last_resort(planner: &DayPlanner<'_>, worked: &mut [Duration]) -> Option<Shift> {
    let total = planner.open.duration();
    if total <= Duration::zero() {
        return None;
    }
    let strict = planner.opts.enforce_cap_in_fallback;

    let idx = (0..planner.employees.len()).find(|&i| {
        planner.can_work(i) && (!strict || worked[i] < planner.limits[i].cap)
    })?;

    let budget = planner.limits[idx].cap - worked[idx];
    let mut length = total
        .min(budget.max(Duration::hours(1)))
        .min(planner.opts.fallback_max_shift);
    if strict {
        length = length.min(budget);
    }

    let window = planner.window_at(Duration::zero(), length);
    worked[idx] = worked[idx] + length;
    Some(Shift::new(
        &planner.employees[idx].name,
        planner.date,
        window,
        ShiftOrigin::Fallback,
    ))
}
