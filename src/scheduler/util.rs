use super::{EngineOptions, SchedError};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime};

pub(super) fn dates_in_month(year: i32, month: u32) -> Result<Vec<NaiveDate>, SchedError> {
    let first =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(SchedError::InvalidMonth { year, month })?;
    Ok(first
        .iter_days()
        .take_while(|d| d.month() == month)
        .collect())
}

/// Longueur de shift visée : toute la journée si courte, sinon `n >= 2` parts égales.
pub(super) fn target_shift_length(total: Duration, opts: &EngineOptions) -> Duration {
    if total <= opts.single_shift_threshold {
        return total;
    }
    let chunk = opts.max_target_shift.num_seconds().max(1);
    let total_secs = total.num_seconds();
    let parts = ((total_secs + chunk - 1) / chunk).max(2);
    Duration::seconds(total_secs / parts)
}

/// Heure d'horloge à `offset` après `open`.
pub(super) fn clock(open: NaiveTime, offset: Duration) -> NaiveTime {
    open.overflowing_add_signed(offset).0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lengths() {
        assert_eq!(dates_in_month(2024, 2).unwrap().len(), 29);
        assert_eq!(dates_in_month(2025, 2).unwrap().len(), 28);
        assert_eq!(dates_in_month(2025, 12).unwrap().len(), 31);
        assert!(matches!(
            dates_in_month(2025, 13),
            Err(SchedError::InvalidMonth { month: 13, .. })
        ));
    }

    #[test]
    fn target_lengths() {
        let opts = EngineOptions::default();
        assert_eq!(target_shift_length(Duration::hours(6), &opts), Duration::hours(6));
        assert_eq!(target_shift_length(Duration::hours(10), &opts), Duration::hours(5));
        assert_eq!(target_shift_length(Duration::hours(7), &opts), Duration::minutes(210));
        assert_eq!(target_shift_length(Duration::hours(18), &opts), Duration::hours(6));
    }
}
