use super::{Conflict, ConflictKind, Limits, Scheduler};
use crate::availability;
use crate::model::{Shift, ShiftOrigin};
use crate::schedule::Schedule;
use crate::window::overlaps;
use chrono::Duration;

const DAY_SECONDS: i64 = 24 * 60 * 60;

pub(super) fn detect_conflicts(scheduler: &Scheduler<'_>, schedule: &Schedule) -> Vec<Conflict> {
    let mut out = Vec::new();
    let roster = scheduler.roster.employees();

    for employee in roster {
        let mut shifts: Vec<&Shift> = schedule.shifts_for_employee(&employee.name).collect();
        shifts.sort_by_key(|s| (s.date(), s.start()));

        for (i, a) in shifts.iter().enumerate() {
            for b in shifts.iter().skip(i + 1) {
                if a.date() == b.date() && overlaps(&a.window(), &b.window()) {
                    out.push(Conflict::new(b, ConflictKind::Overlap));
                }
            }
        }

        let mut regular = Duration::zero();
        let limits = Limits::from(employee);
        for shift in schedule
            .shifts_for_employee(&employee.name)
            .filter(|s| s.origin() != ShiftOrigin::Fallback)
        {
            let window = shift.window();
            if !availability::is_available(employee, shift.weekday(), Some(shift.date()), &window) {
                out.push(Conflict::new(shift, ConflictKind::Unavailable));
            }
            regular = regular + shift.duration();
            if regular > limits.cap {
                out.push(Conflict::new(shift, ConflictKind::OverCap));
            }
        }
    }

    for shift in schedule {
        if !within_opening(scheduler, shift) {
            out.push(Conflict::new(shift, ConflictKind::OutsideHours));
        }
    }

    out
}

/// Le shift tient-il dans l'amplitude du jour, passage de minuit compris ?
fn within_opening(scheduler: &Scheduler<'_>, shift: &Shift) -> bool {
    let Some(open) = scheduler.hours.get_hours(shift.weekday(), Some(shift.date())) else {
        return false;
    };
    let (open_start, open_end) = open.bounds_seconds();
    let (shift_start, _) = shift.window().bounds_seconds();
    let offset = (shift_start - open_start).rem_euclid(DAY_SECONDS);
    offset + shift.duration().num_seconds() <= open_end - open_start
}
