use super::{util, DayOutcome, EngineOptions, Limits};
use crate::availability;
use crate::model::{Employee, Shift, ShiftOrigin};
use crate::window::TimeWindow;
use chrono::{Duration, NaiveDate, Weekday};

/// Reste en dessous duquel on n'essaie même plus un premier shift court.
fn min_tail() -> Duration {
    Duration::minutes(15)
}

/// Durée plancher d'un premier shift accepté par tolérance.
fn lenient_floor() -> Duration {
    Duration::hours(1)
}

/// Contexte en lecture seule d'une journée ouverte.
pub(super) struct DayPlanner<'p> {
    pub employees: &'p [Employee],
    pub limits: &'p [Limits],
    pub opts: &'p EngineOptions,
    pub weekday: Weekday,
    pub date: NaiveDate,
    pub open: TimeWindow,
}

pub(super) struct DayFill {
    pub shifts: Vec<Shift>,
    pub outcome: DayOutcome,
}

/// Place un shift trouvé ; positions exprimées depuis l'ouverture.
struct Placement {
    slot: usize,
    shift: Shift,
    end: Duration,
}

impl<'p> DayPlanner<'p> {
    pub(super) fn window_at(&self, from: Duration, to: Duration) -> TimeWindow {
        TimeWindow::starting_at(util::clock(self.open.start, from), to - from)
    }

    pub(super) fn available(&self, idx: usize, window: &TimeWindow) -> bool {
        availability::is_available(&self.employees[idx], self.weekday, Some(self.date), window)
    }

    pub(super) fn can_work(&self, idx: usize) -> bool {
        availability::can_work(&self.employees[idx], self.weekday, Some(self.date))
    }

    fn shift(&self, idx: usize, window: TimeWindow, origin: ShiftOrigin) -> Shift {
        Shift::new(&self.employees[idx].name, self.date, window, origin)
    }

    /// Employés éligibles triés : préférence d'abord, puis taux d'utilisation du plafond.
    fn eligible(&self, worked: &[Duration]) -> Vec<usize> {
        let mut eligible: Vec<usize> = (0..self.employees.len())
            .filter(|&i| self.can_work(i) && worked[i] < self.limits[i].cap)
            .collect();
        let key = |i: usize| {
            let prefers =
                availability::prefers(&self.employees[i], self.weekday, Some(self.date));
            let ratio = worked[i].num_seconds() as f64 / self.limits[i].cap.num_seconds() as f64;
            (!prefers, ratio)
        };
        eligible.sort_by(|&a, &b| {
            let (pa, ra) = key(a);
            let (pb, rb) = key(b);
            pa.cmp(&pb).then(ra.total_cmp(&rb))
        });
        eligible
    }

    /// Remplit la journée de l'ouverture à la fermeture.
    ///
    /// Boucle bornée : tri des éligibles, tentative de placement au curseur,
    /// avance du curseur (fin du shift, ou pas de sonde en cas d'échec).
    pub(super) fn fill(&self, worked: &mut [Duration]) -> DayFill {
        let total = self.open.duration();
        let target = util::target_shift_length(total, self.opts);
        let mut shifts = Vec::new();
        let mut covered = Duration::zero();
        let mut cursor = Duration::zero();
        let mut offset = 0usize;
        let mut last_order: Vec<usize> = Vec::new();
        let mut iterations = 0usize;
        let mut cap_hit = false;

        while cursor < total {
            if iterations >= self.opts.max_iterations_per_day {
                cap_hit = true;
                break;
            }
            iterations += 1;

            let eligible = self.eligible(worked);
            if eligible.is_empty() {
                break;
            }
            if eligible != last_order {
                offset = 0;
                last_order = eligible.clone();
            }

            let remaining = total - cursor;
            let min_feasible = eligible
                .iter()
                .map(|&i| self.limits[i].min_shift)
                .min()
                .unwrap_or(remaining);
            if remaining < min_feasible && (!shifts.is_empty() || remaining < min_tail()) {
                break;
            }

            let first = shifts.is_empty();
            let seen: &[Duration] = worked;
            let placed = self
                .place(&eligible, offset, cursor, remaining, target, min_feasible, first, seen)
                .or_else(|| {
                    first
                        .then(|| self.place_minimum(&eligible, cursor, remaining, seen))
                        .flatten()
                });

            match placed {
                Some(p) => {
                    let length = p.end - cursor;
                    worked[eligible[p.slot]] = worked[eligible[p.slot]] + length;
                    covered = covered + length;
                    offset = p.slot + 1;
                    cursor = p.end;
                    shifts.push(p.shift);
                }
                None => {
                    let next = cursor + self.opts.probe_step;
                    if next <= cursor || next >= total {
                        break;
                    }
                    cursor = next;
                    offset = 0;
                }
            }
        }

        let outcome = if cap_hit {
            DayOutcome::IterationCapHit
        } else if shifts.is_empty() {
            DayOutcome::Unstaffed
        } else if covered >= total {
            DayOutcome::Filled
        } else {
            DayOutcome::PartiallyFilled
        };
        DayFill { shifts, outcome }
    }

    /// Parcourt les éligibles à partir de `offset` (tourniquet), en essayant pour
    /// chacun les durées candidates de la plus longue à la plus courte.
    #[allow(clippy::too_many_arguments)]
    fn place(
        &self,
        eligible: &[usize],
        offset: usize,
        cursor: Duration,
        remaining: Duration,
        target: Duration,
        min_feasible: Duration,
        first: bool,
        worked: &[Duration],
    ) -> Option<Placement> {
        let n = eligible.len();
        (0..n).find_map(|attempt| {
            let slot = (offset + attempt) % n;
            let idx = eligible[slot];
            let limits = self.limits[idx];
            let budget = limits.cap - worked[idx];

            candidate_durations(target, budget, remaining, limits.max_shift, min_feasible)
                .into_iter()
                .find_map(|length| {
                    let lenient = first
                        && (length * 5 >= remaining * 4 || remaining < limits.min_shift)
                        && length >= lenient_floor();
                    if length < limits.min_shift && !lenient {
                        return None;
                    }
                    let end = cursor + length;
                    let window = self.window_at(cursor, end);
                    self.available(idx, &window).then(|| Placement {
                        slot,
                        shift: self.shift(idx, window, ShiftOrigin::Regular),
                        end,
                    })
                })
        })
    }

    /// Passe de secours du premier shift : durée minimale de chaque éligible.
    fn place_minimum(
        &self,
        eligible: &[usize],
        cursor: Duration,
        remaining: Duration,
        worked: &[Duration],
    ) -> Option<Placement> {
        eligible.iter().enumerate().find_map(|(slot, &idx)| {
            let limits = self.limits[idx];
            if remaining < limits.min_shift || limits.cap - worked[idx] < limits.min_shift {
                return None;
            }
            let end = cursor + limits.min_shift;
            let window = self.window_at(cursor, end);
            self.available(idx, &window).then(|| Placement {
                slot,
                shift: self.shift(idx, window, ShiftOrigin::Relaxed),
                end,
            })
        })
    }
}

/// Durées à essayer, décroissantes et dédoublonnées.
///
/// Chaque candidate est bornée par le reste de la journée, le budget mensuel et
/// la durée max de shift. Une durée au-delà de la cible n'est gardée que si un
/// shift de longueur cible laisserait une fin de journée impossible à staffer.
fn candidate_durations(
    target: Duration,
    budget: Duration,
    remaining: Duration,
    max_shift: Duration,
    min_feasible: Duration,
) -> Vec<Duration> {
    let limit = remaining.min(budget).min(max_shift);
    let absorb_tail = remaining - target < min_feasible;
    let mut out: Vec<Duration> = [target, budget, remaining]
        .into_iter()
        .map(|d| d.min(limit))
        .filter(|d| *d > Duration::zero() && (*d <= target || absorb_tail))
        .collect();
    out.sort_by(|a, b| b.cmp(a));
    out.dedup();
    out
}
